//! Runtime configuration loaded from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use oauth_client::OAuthConfig;
use push_engine::NotificationDefaults;

use super::defaults::{self, SettingDef};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_port: u16,
    pub app_origin: String,
    pub open_window_command: Option<String>,
    pub notification_icon: String,
    pub notification_badge: String,
    pub periodic_sync_interval_secs: u64,
    pub oauth_client_id: String,
    pub oauth_client_secret: String,
    pub oauth_auth_url: String,
    pub oauth_token_url: String,
    pub data_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup; blank values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let g = |key: &str| -> String {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .or_else(|| defaults::get_default(key).map(str::to_string))
                .unwrap_or_default()
        };

        let server_port = parse_u16(&g("SERVER_PORT"), 8080);
        let app_origin = {
            let origin = g("APP_ORIGIN");
            if origin.is_empty() {
                format!("http://localhost:{server_port}")
            } else {
                origin.trim_end_matches('/').to_string()
            }
        };
        let open_window_command = Some(g("OPEN_WINDOW_COMMAND")).filter(|c| !c.is_empty());

        Self {
            server_port,
            app_origin,
            open_window_command,
            notification_icon: g("NOTIFICATION_ICON"),
            notification_badge: g("NOTIFICATION_BADGE"),
            periodic_sync_interval_secs: parse_u64(&g("PERIODIC_SYNC_INTERVAL_SECS"), 3600),
            oauth_client_id: g("OAUTH_CLIENT_ID"),
            oauth_client_secret: g("OAUTH_CLIENT_SECRET"),
            oauth_auth_url: g("OAUTH_AUTH_URL"),
            oauth_token_url: g("OAUTH_TOKEN_URL"),
            data_dir: data_dir(&g("CALENDAR_PUSH_DATA_DIR")),
        }
    }

    pub fn notification_defaults(&self) -> NotificationDefaults {
        NotificationDefaults {
            icon: self.notification_icon.clone(),
            badge: self.notification_badge.clone(),
        }
    }

    pub fn oauth_config(&self) -> OAuthConfig {
        let mut config = OAuthConfig::new(&self.oauth_client_id, &self.oauth_client_secret);
        config.auth_url = self.oauth_auth_url.clone();
        config.token_url = self.oauth_token_url.clone();
        config
    }

    /// `None` when the periodic check is disabled.
    pub fn periodic_sync_interval(&self) -> Option<Duration> {
        (self.periodic_sync_interval_secs > 0)
            .then(|| Duration::from_secs(self.periodic_sync_interval_secs))
    }

    /// Settings that leave a feature disabled when blank.
    pub fn missing_settings(&self) -> Vec<&'static SettingDef> {
        let blank = [
            ("OAUTH_CLIENT_ID", self.oauth_client_id.is_empty()),
            ("OAUTH_CLIENT_SECRET", self.oauth_client_secret.is_empty()),
            ("OPEN_WINDOW_COMMAND", self.open_window_command.is_none()),
        ];
        defaults::SETTINGS
            .iter()
            .filter(|d| blank.iter().any(|(key, missing)| *missing && *key == d.key))
            .collect()
    }
}

/// Priority: CALENDAR_PUSH_DATA_DIR > ~/.calendar-push
fn data_dir(configured: &str) -> PathBuf {
    if !configured.is_empty() {
        return PathBuf::from(configured);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".calendar-push")
}

fn parse_u16(s: &str, default: u16) -> u16 {
    if s.is_empty() {
        return default;
    }
    s.parse().unwrap_or(default)
}

fn parse_u64(s: &str, default: u64) -> u64 {
    if s.is_empty() {
        return default;
    }
    s.parse().unwrap_or(default)
}
