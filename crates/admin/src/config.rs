//! Admin client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `RIDEXTRA_API_BASE_URL` - Backend base URL, prefixed to every API path
//!   (e.g., `https://api.ridextra.app` or `http://localhost:8082`)
//!
//! ## Optional
//! - `RIDEXTRA_SESSION_FILE` - Where the admin session is persisted
//!   (default: `<config dir>/ridextra/session.json`)
//! - `RIDEXTRA_HTTP_TIMEOUT_SECS` - Per-request timeout (default: none, the
//!   transport's own behavior applies)
//! - `RIDEXTRA_LOG_JSON` - Emit JSON log lines when set to `1` or `true`
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Sentry error sample rate (default: 1.0)

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const SESSION_DIR: &str = "ridextra";
const SESSION_FILE: &str = "session.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Admin client configuration.
#[derive(Clone)]
pub struct AdminConfig {
    /// Backend base URL (no trailing slash required)
    pub api_base_url: Url,
    /// Session file path; `None` keeps the session in memory only
    pub session_file: Option<PathBuf>,
    /// Optional per-request timeout
    pub request_timeout: Option<Duration>,
    /// Emit JSON-formatted logs
    pub log_json: bool,
    /// Sentry DSN for error tracking (contains a client key)
    pub sentry_dsn: Option<SecretString>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("api_base_url", &self.api_base_url.as_str())
            .field("session_file", &self.session_file)
            .field("request_timeout", &self.request_timeout)
            .field("log_json", &self.log_json)
            .field(
                "sentry_dsn",
                &self.sentry_dsn.as_ref().map(|_| "[REDACTED]"),
            )
            .field("sentry_environment", &self.sentry_environment)
            .field("sentry_sample_rate", &self.sentry_sample_rate)
            .finish()
    }
}

impl AdminConfig {
    /// Configuration for a base URL with every optional setting at its default
    /// and an in-memory session.
    #[must_use]
    pub const fn new(api_base_url: Url) -> Self {
        Self {
            api_base_url,
            session_file: None,
            request_timeout: None,
            log_json: false,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the base URL is missing or invalid, or if an
    /// optional variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`AdminConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = parse_base_url(&get_required(&lookup, "RIDEXTRA_API_BASE_URL")?)?;

        let session_file = match get_optional(&lookup, "RIDEXTRA_SESSION_FILE") {
            Some(path) => Some(PathBuf::from(path)),
            None => default_session_file(),
        };

        let request_timeout = get_optional(&lookup, "RIDEXTRA_HTTP_TIMEOUT_SECS")
            .map(|raw| {
                raw.parse::<u64>().map(Duration::from_secs).map_err(|e| {
                    ConfigError::InvalidEnvVar("RIDEXTRA_HTTP_TIMEOUT_SECS".to_string(), e.to_string())
                })
            })
            .transpose()?;

        let log_json = get_optional(&lookup, "RIDEXTRA_LOG_JSON")
            .is_some_and(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"));

        let sentry_dsn = get_optional(&lookup, "SENTRY_DSN").map(SecretString::from);
        let sentry_environment = get_optional(&lookup, "SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional(&lookup, "SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            api_base_url,
            session_file,
            request_timeout,
            log_json,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
        })
    }

    /// Replace the session file location.
    #[must_use]
    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = Some(path.into());
        self
    }

    /// Set a per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse and check the backend base URL.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|e| {
        ConfigError::InvalidEnvVar("RIDEXTRA_API_BASE_URL".to_string(), e.to_string())
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            "RIDEXTRA_API_BASE_URL".to_string(),
            format!("unsupported scheme '{}', expected http or https", url.scheme()),
        ));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(ConfigError::InvalidEnvVar(
            "RIDEXTRA_API_BASE_URL".to_string(),
            "must not contain a query string or fragment".to_string(),
        ));
    }
    Ok(url)
}

/// Default session file under the platform config directory.
fn default_session_file() -> Option<PathBuf> {
    let dir = dirs::config_dir();
    if dir.is_none() {
        tracing::warn!("No config directory available; the session will not survive a restart");
    }
    dir.map(|dir| dir.join(SESSION_DIR).join(SESSION_FILE))
}

/// Get a required variable; empty values count as missing.
fn get_required<F>(lookup: &F, key: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    get_optional(lookup, key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional variable; empty values count as unset.
fn get_optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|value| !value.trim().is_empty())
}
