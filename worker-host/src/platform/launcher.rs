//! Opens application URLs in a new browser window via an external command.

use std::process::Stdio;

use push_engine::PlatformError;
use url::Url;

pub struct WindowLauncher {
    command: Option<String>,
    origin: String,
}

impl WindowLauncher {
    /// `command` is split on whitespace with no shell quoting, so arguments cannot
    /// contain spaces. The absolute URL is appended as the last argument.
    pub fn new(command: Option<String>, origin: impl Into<String>) -> Self {
        Self {
            command: command.filter(|c| !c.trim().is_empty()),
            origin: origin.into(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.command.is_some()
    }

    /// Resolve an application-relative URL against the configured origin.
    pub fn absolute_url(&self, path: &str) -> Result<String, PlatformError> {
        let open_err = |message: String| PlatformError::OpenWindow {
            url: path.to_string(),
            message,
        };
        let base = Url::parse(&self.origin).map_err(|e| open_err(format!("invalid origin: {e}")))?;
        let url = base.join(path).map_err(|e| open_err(e.to_string()))?;
        Ok(url.to_string())
    }

    pub async fn open(&self, path: &str) -> Result<(), PlatformError> {
        let Some(command) = self.command.as_deref() else {
            return Err(PlatformError::OpenWindow {
                url: path.to_string(),
                message: "no window command configured".into(),
            });
        };
        let url = self.absolute_url(path)?;

        let mut parts = command.split_whitespace();
        let Some(program) = parts.next() else {
            return Err(PlatformError::OpenWindow {
                url,
                message: "empty window command".into(),
            });
        };

        tokio::process::Command::new(program)
            .args(parts)
            .arg(&url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| PlatformError::OpenWindow {
                url: url.clone(),
                message: e.to_string(),
            })?;

        tracing::info!(program, url = %url, "Launched window");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_urls_resolve_against_origin() {
        let launcher = WindowLauncher::new(None, "https://shifts.example.com");
        assert_eq!(
            launcher.absolute_url("/calendar?scheduleId=7").unwrap(),
            "https://shifts.example.com/calendar?scheduleId=7"
        );
        assert_eq!(
            launcher.absolute_url("/dashboard").unwrap(),
            "https://shifts.example.com/dashboard"
        );
    }

    #[test]
    fn blank_command_is_unavailable() {
        assert!(!WindowLauncher::new(Some("  ".into()), "http://localhost:8080").is_available());
        assert!(WindowLauncher::new(Some("xdg-open".into()), "http://localhost:8080").is_available());
    }

    #[tokio::test]
    async fn open_without_command_fails() {
        let launcher = WindowLauncher::new(None, "http://localhost:8080");
        let err = launcher.open("/calendar").await.unwrap_err();
        assert!(matches!(err, PlatformError::OpenWindow { ref url, .. } if url == "/calendar"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn open_spawns_command_with_absolute_url() {
        let launcher = WindowLauncher::new(Some("true".into()), "http://localhost:8080");
        launcher.open("/leave-requests").await.unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn command_is_split_on_whitespace_without_quoting() {
        let launcher = WindowLauncher::new(Some("sh -c true".into()), "http://localhost:8080");
        launcher.open("/calendar").await.unwrap();

        let quoted = WindowLauncher::new(Some("'no such browser'".into()), "http://localhost:8080");
        assert!(quoted.open("/calendar").await.is_err());
    }

    #[tokio::test]
    async fn missing_program_reports_spawn_error() {
        let launcher = WindowLauncher::new(
            Some("calendar-push-no-such-browser".into()),
            "http://localhost:8080",
        );
        let err = launcher.open("/dashboard").await.unwrap_err();
        assert!(matches!(
            err,
            PlatformError::OpenWindow { ref url, .. } if url == "http://localhost:8080/dashboard"
        ));
    }
}
