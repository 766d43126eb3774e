//! Headless host for the push-notification worker.
//!
//! Provides the in-process platform the engine runs against (notification
//! center, WebSocket client windows, window launcher), the HTTP surface that
//! feeds it events, and the background scheduler.

pub mod app;
pub mod background;
pub mod bootstrap;
pub mod config;
pub mod platform;
pub mod server;

#[cfg(test)]
mod tests;

pub use bootstrap::{init_foundation, start_worker};
