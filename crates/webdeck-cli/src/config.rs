//! CLI configuration.
//!
//! Loaded once from environment variables at startup and passed down
//! explicitly — the library crates never read ambient configuration.
//!
//! Environment variables:
//! - `WEBDECK_SECRET_KEY` — application-wide secret.
//! - `WEBDECK_CREDENTIALS_KEY` — optional dedicated secret for credential
//!   encryption; takes priority over `WEBDECK_SECRET_KEY` when set.
//! - `WEBDECK_FAVICON_TIMEOUT` — per-request timeout in seconds (default: `4`).
//! - `WEBDECK_LOG_LEVEL` — log filter when `RUST_LOG` is unset (default: `warn`).

/// Runtime configuration resolved from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Application-wide secret.
    pub secret_key: Option<String>,
    /// Dedicated credential-encryption secret, overriding `secret_key`.
    pub app_credentials_key: Option<String>,
    /// Favicon probe timeout in seconds.
    pub favicon_timeout_secs: u64,
    /// Log level filter.
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let secret_key = std::env::var("WEBDECK_SECRET_KEY").ok().filter(|v| !v.is_empty());
        let app_credentials_key = std::env::var("WEBDECK_CREDENTIALS_KEY")
            .ok()
            .filter(|v| !v.is_empty());

        let favicon_timeout_secs = std::env::var("WEBDECK_FAVICON_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(4);

        let log_level = std::env::var("WEBDECK_LOG_LEVEL").unwrap_or_else(|_| "warn".to_owned());

        Self {
            secret_key,
            app_credentials_key,
            favicon_timeout_secs,
            log_level,
        }
    }

    /// The secret used for credential encryption.
    ///
    /// The dedicated credentials key takes priority over the application
    /// secret; `None` when neither is configured.
    #[must_use]
    pub fn credentials_secret(&self) -> Option<&str> {
        self.app_credentials_key
            .as_deref()
            .or(self.secret_key.as_deref())
    }
}
