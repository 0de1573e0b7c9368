//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text and distinct exit codes.

use miette::Diagnostic;
use thiserror::Error;

use userdeck_config::ConfigError;
use userdeck_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the user directory at {url}")]
    #[diagnostic(
        code(userdeck::connection_failed),
        help(
            "Check that the directory API is running and accessible.\n\
             URL: {url}\n\
             Self-signed certificate? Try: userdeck list --insecure"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(userdeck::timeout),
        help("Increase timeout with --timeout or check the directory's responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── API ──────────────────────────────────────────────────────────
    #[error("Failed to load users: {message}")]
    #[diagnostic(code(userdeck::api_error))]
    ApiError { status: Option<u16>, message: String },

    #[error("Failed to load users: unexpected payload ({message})")]
    #[diagnostic(
        code(userdeck::invalid_payload),
        help("The endpoint must return a JSON array of user records.")
    )]
    InvalidPayload { message: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(userdeck::not_found),
        help("Run: userdeck {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(userdeck::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(userdeck::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: userdeck config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No user directory configured")]
    #[diagnostic(
        code(userdeck::no_config),
        help(
            "Pass --api-url (or set USERDECK_API_URL), or create a profile with:\n\
             userdeck config init\n\
             Expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(userdeck::config))]
    Config(Box<figment::Error>),

    #[error("Failed to write configuration: {0}")]
    #[diagnostic(code(userdeck::config_write))]
    ConfigWrite(String),

    // ── IO / Serialization ────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(userdeck::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    #[diagnostic(code(userdeck::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::ProfileNotFound { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },

            CoreError::Api { message, status } => CliError::ApiError { status, message },

            CoreError::InvalidPayload { message } => CliError::InvalidPayload { message },

            CoreError::RecordNotFound { identifier } => CliError::NotFound {
                resource_type: "user".into(),
                identifier,
                list_command: "list".into(),
            },

            CoreError::Config { message } => CliError::Validation {
                field: "configuration".into(),
                reason: message,
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::UnknownProfile { name } => CliError::ProfileNotFound {
                name,
                available: String::new(),
            },
            ConfigError::Figment(e) => CliError::Config(e),
            ConfigError::Io(e) => CliError::Io(e),
            ConfigError::Serialization(e) => CliError::ConfigWrite(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_error_kind() {
        let timeout = CliError::from(CoreError::Timeout { timeout_secs: 5 });
        assert_eq!(timeout.exit_code(), exit_code::TIMEOUT);

        let refused = CliError::from(CoreError::ConnectionFailed {
            url: "http://localhost:3000/usuarios".into(),
            reason: "connection refused".into(),
        });
        assert_eq!(refused.exit_code(), exit_code::CONNECTION);

        let missing = CliError::from(CoreError::RecordNotFound {
            identifier: "42".into(),
        });
        assert_eq!(missing.exit_code(), exit_code::NOT_FOUND);
        assert_eq!(missing.to_string(), "user '42' not found");

        let server = CliError::from(CoreError::Api {
            message: "HTTP 500".into(),
            status: Some(500),
        });
        assert_eq!(server.exit_code(), exit_code::GENERAL);
        assert_eq!(server.to_string(), "Failed to load users: HTTP 500");
    }

    #[test]
    fn config_validation_is_a_usage_error() {
        let err = CliError::from(ConfigError::Validation {
            field: "page_size".into(),
            reason: "must be at least 1".into(),
        });
        assert_eq!(err.exit_code(), exit_code::USAGE);
    }
}
