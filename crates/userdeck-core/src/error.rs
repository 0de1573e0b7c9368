// ── Core error types ──
//
// User-facing errors from userdeck-core. These are NOT API-specific --
// consumers never see reqwest errors or JSON parse failures directly.
// The `From<userdeck_api::Error>` impl translates transport-layer errors
// into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Clone, Error)]
pub enum CoreError {
    // ── Provider errors ──────────────────────────────────────────────
    #[error("Cannot reach the user directory at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("User directory request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("User directory error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    #[error("Unexpected user directory payload: {message}")]
    InvalidPayload { message: String },

    // ── Browsing errors ──────────────────────────────────────────────
    #[error("Record not found on the current page: {identifier}")]
    RecordNotFound { identifier: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Short message stored in `Phase::Error` and shown next to the retry
    /// action.
    pub fn user_message(&self) -> String {
        match self {
            Self::RecordNotFound { .. } | Self::Config { .. } => self.to_string(),
            _ => format!("Failed to load users: {self}"),
        }
    }

    /// Whether this error came from the provider request.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed { .. }
                | Self::Timeout { .. }
                | Self::Api { .. }
                | Self::InvalidPayload { .. }
        )
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<userdeck_api::Error> for CoreError {
    fn from(err: userdeck_api::Error) -> Self {
        match err {
            userdeck_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            userdeck_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            userdeck_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            userdeck_api::Error::Status { status, body } => CoreError::Api {
                message: if body.is_empty() {
                    format!("HTTP {status}")
                } else {
                    format!("HTTP {status}: {body}")
                },
                status: Some(status),
            },
            userdeck_api::Error::Deserialization { message, body: _ } => {
                CoreError::InvalidPayload { message }
            }
        }
    }
}
