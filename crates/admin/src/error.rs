//! Unified error handling for the admin client.

use reqwest::StatusCode;
use thiserror::Error;

use crate::config::ConfigError;

/// Fallback message when the login endpoint gives no reason.
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed";

/// Fallback message when a failed request carries no backend message.
pub const REQUEST_FAILED_MESSAGE: &str = "Request failed";

/// Error type for every admin client operation.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Input rejected locally; nothing was sent to the backend.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The login endpoint rejected the credentials or could not be reached.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The backend answered 401/403; the session has been cleared.
    #[error("Unauthorized ({status}): session expired, please log in again")]
    Unauthorized {
        /// The 401 or 403 status that ended the session.
        status: StatusCode,
    },

    /// The backend answered with any other non-success status.
    #[error("Request failed ({status}): {message}")]
    Request {
        /// HTTP status of the response.
        status: StatusCode,
        /// Backend message, or a generic fallback.
        message: String,
    },

    /// The request never produced a response (connection, TLS, timeout).
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response payload did not have the expected shape.
    #[error("Unexpected response data: {0}")]
    Decode(String),

    /// The session file could not be written or removed.
    #[error("Session storage error: {0}")]
    Storage(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl AdminError {
    /// Whether repeating the same action may succeed.
    ///
    /// Unauthorized is never retryable: the session is gone and the user has
    /// to log in again.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Request { .. } | Self::Transport(_))
    }

    /// Whether this error ended the session.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// HTTP status associated with the error, if any.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Unauthorized { status } | Self::Request { status, .. } => Some(*status),
            Self::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// Short message suitable for showing to staff.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(message)
            | Self::Authentication(message)
            | Self::Request { message, .. } => message.clone(),
            Self::Unauthorized { .. } => "Your session has ended. Please log in again.".to_string(),
            Self::Transport(_) => REQUEST_FAILED_MESSAGE.to_string(),
            _ => self.to_string(),
        }
    }
}
