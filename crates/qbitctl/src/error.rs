//! CLI error types with miette diagnostics.
//!
//! Maps library and config errors into user-facing errors with actionable
//! help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use qbitctl_api::Error as ApiError;
use qbitctl_config::ConfigError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const DECODE: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not connect to qBittorrent at {url}")]
    #[diagnostic(
        code(qbitctl::connection_failed),
        help(
            "Check that the daemon is running and the WebUI is enabled.\n\
             URL: {url}\n\
             Try: qbitctl app version --insecure"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Could not set up the HTTP transport: {message}")]
    #[diagnostic(
        code(qbitctl::tls_error),
        help(
            "A self-signed WebUI certificate can be accepted with --insecure (-k),\n\
             or configure ca_cert in your profile."
        )
    )]
    TlsError { message: String },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(qbitctl::auth_failed),
        help(
            "Verify the WebUI username and password.\n\
             Run: qbitctl config set-password --profile {profile}"
        )
    )]
    AuthFailed { profile: String, message: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(qbitctl::no_credentials),
        help(
            "Configure credentials with: qbitctl config init\n\
             Or set QBITCTL_USERNAME and QBITCTL_PASSWORD."
        )
    )]
    NoCredentials { profile: String },

    // ── API ──────────────────────────────────────────────────────────

    #[error("{operation} failed with status code: {status}")]
    #[diagnostic(code(qbitctl::request_failed), help("{hint}"))]
    RequestFailed {
        operation: String,
        status: u16,
        hint: String,
    },

    #[error("Unexpected response to {operation}: {message}")]
    #[diagnostic(
        code(qbitctl::decode),
        help("The daemon may be a different qBittorrent version. Re-run with -vv for details.")
    )]
    Decode { operation: String, message: String },

    #[error("Operation '{name}' is not a known Web API operation")]
    #[diagnostic(
        code(qbitctl::unknown_operation),
        help("Run: qbitctl endpoints to list the available operations")
    )]
    UnknownOperation { name: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(qbitctl::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(qbitctl::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: qbitctl config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No daemon configured")]
    #[diagnostic(
        code(qbitctl::no_config),
        help(
            "Create a profile with: qbitctl config init\n\
             Expected at: {path}\n\
             Or pass --url (QBITCTL_URL) with --username and --password."
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(qbitctl::config))]
    Config(Box<ConfigError>),

    // ── Interactive ──────────────────────────────────────────────────

    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(qbitctl::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(qbitctl::json), help("Check the JSON text and try again."))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::TlsError { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::RequestFailed { status, .. } if matches!(status, 401 | 403) => exit_code::AUTH,
            Self::Decode { .. } => exit_code::DECODE,
            Self::Validation { .. }
            | Self::UnknownOperation { .. }
            | Self::NonInteractiveRequiresYes { .. }
            | Self::Json(_) => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Attribute an authentication failure to a named profile.
    pub fn for_profile(self, name: &str) -> Self {
        match self {
            Self::AuthFailed { message, .. } => Self::AuthFailed {
                profile: name.into(),
                message,
            },
            other => other,
        }
    }
}

fn request_hint(status: u16) -> String {
    match status {
        403 => "The session was rejected. The cookie may have expired; run the command again.".into(),
        404 => "The daemon does not know this endpoint. Check the Web API version with: qbitctl app api-version".into(),
        409 => "The daemon refused the change in its current state.".into(),
        400 => "The daemon rejected the parameters.".into(),
        _ => "Re-run with -vv to see the request.".into(),
    }
}

// ── Library errors → CliError ────────────────────────────────────────

impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Construction { operation, message } => CliError::Validation {
                field: operation.into(),
                reason: message,
            },

            ApiError::InvalidUrl(e) => CliError::Validation {
                field: "url".into(),
                reason: e.to_string(),
            },

            ApiError::Tls(message) => CliError::TlsError { message },

            ApiError::Transport(e) => CliError::ConnectionFailed {
                url: e
                    .url()
                    .map_or_else(|| "(unknown)".into(), ToString::to_string),
                source: Box::new(e),
            },

            ApiError::AuthenticationFailed { message, .. } => CliError::AuthFailed {
                profile: "current".into(),
                message,
            },

            ApiError::RequestFailed {
                operation, status, ..
            } => CliError::RequestFailed {
                operation: operation.into(),
                status,
                hint: request_hint(status),
            },

            ApiError::Decode {
                operation, message, ..
            }
            | ApiError::Protocol { operation, message } => CliError::Decode {
                operation: operation.into(),
                message,
            },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            other => CliError::Config(Box::new(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forbidden_request_exits_with_auth_code() {
        let err = CliError::from(ApiError::RequestFailed {
            operation: "GetTorrentList",
            status: 403,
            body: "Forbidden".into(),
        });
        assert_eq!(err.exit_code(), exit_code::AUTH);
    }

    #[test]
    fn construction_is_a_usage_error() {
        let err = CliError::from(ApiError::Construction {
            operation: "PauseTorrents",
            message: "missing parameter 'hashes'".into(),
        });
        assert_eq!(err.exit_code(), exit_code::USAGE);
        assert!(err.to_string().contains("missing parameter 'hashes'"));
    }

    #[test]
    fn protocol_and_decode_share_exit_code() {
        let err = CliError::from(ApiError::Protocol {
            operation: "Login",
            message: "no cookie".into(),
        });
        assert_eq!(err.exit_code(), exit_code::DECODE);
    }

    #[test]
    fn auth_failure_names_the_profile() {
        let err = CliError::from(ApiError::AuthenticationFailed {
            status: 401,
            message: "bad".into(),
        })
        .for_profile("home");
        assert!(matches!(err, CliError::AuthFailed { ref profile, .. } if profile == "home"));
        assert_eq!(err.exit_code(), exit_code::AUTH);
    }
}
