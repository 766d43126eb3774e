//! Setting definitions with their default values.

/// A single setting definition.
#[derive(Debug, Clone, Copy)]
pub struct SettingDef {
    pub key: &'static str,
    pub default: &'static str,
    pub secret: bool,
    pub description: &'static str,
}

const fn def(key: &'static str, default: &'static str, secret: bool, description: &'static str) -> SettingDef {
    SettingDef {
        key,
        default,
        secret,
        description,
    }
}

pub const SETTINGS: &[SettingDef] = &[
    def("SERVER_PORT", "8080", false, "HTTP/WebSocket listen port"),
    def("APP_ORIGIN", "", false, "Origin new windows are opened under (defaults to http://localhost:<port>)"),
    def(
        "OPEN_WINDOW_COMMAND",
        "",
        false,
        "Command used to open a URL in a browser, split on whitespace (no shell quoting); empty disables opening windows",
    ),
    def("NOTIFICATION_ICON", push_engine::normalizer::DEFAULT_ICON, false, "Icon path for notifications without one"),
    def("NOTIFICATION_BADGE", push_engine::normalizer::DEFAULT_BADGE, false, "Badge path for notifications without one"),
    def("PERIODIC_SYNC_INTERVAL_SECS", "3600", false, "Scheduled-notification check interval; 0 disables"),
    def("OAUTH_CLIENT_ID", "", false, "OAuth client id"),
    def("OAUTH_CLIENT_SECRET", "", true, "OAuth client secret"),
    def("OAUTH_AUTH_URL", oauth_client::DEFAULT_AUTH_URL, false, "OAuth consent endpoint"),
    def("OAUTH_TOKEN_URL", oauth_client::DEFAULT_TOKEN_URL, false, "OAuth token endpoint"),
    def("CALENDAR_PUSH_DATA_DIR", "", false, "Data directory (defaults to ~/.calendar-push)"),
];

/// Get the default value for a setting key, or `None` if not defined.
pub fn get_default(key: &str) -> Option<&'static str> {
    SETTINGS.iter().find(|d| d.key == key).map(|d| d.default)
}
