use thiserror::Error;

/// Top-level error type for the `qbitctl-api` crate.
///
/// Every call is all-or-nothing: nothing here is retried internally, and
/// each variant carries enough context (operation, HTTP status, body) to be
/// logged or shown to a user verbatim.
#[derive(Debug, Error)]
pub enum Error {
    // ── Construction ────────────────────────────────────────────────
    /// A request could not be built from the endpoint descriptor and the
    /// supplied arguments (unknown or missing parameter, wrong value kind).
    #[error("Cannot build request for {operation}: {message}")]
    Construction {
        operation: &'static str,
        message: String,
    },

    /// Base address or resolved request URL failed to parse.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The HTTP transport could not be configured (CA file, TLS backend).
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Transport ───────────────────────────────────────────────────
    /// Network-level failure before a response was received.
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    // ── Authentication ──────────────────────────────────────────────
    /// Login or logout was rejected by the daemon.
    #[error("Authentication failed (HTTP {status}): {message}")]
    AuthenticationFailed { status: u16, message: String },

    // ── Request ─────────────────────────────────────────────────────
    /// The daemon answered with a status other than 200.
    #[error("{operation} failed with status code: {status}")]
    RequestFailed {
        operation: &'static str,
        status: u16,
        body: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// A 200 response whose body does not match the declared shape.
    #[error("Cannot decode {operation} response: {message}")]
    Decode {
        operation: &'static str,
        message: String,
        body: String,
    },

    /// The daemon broke an invariant the client depends on.
    #[error("Protocol violation in {operation}: {message}")]
    Protocol {
        operation: &'static str,
        message: String,
    },
}

impl Error {
    /// HTTP status carried by this error, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::AuthenticationFailed { status, .. } | Self::RequestFailed { status, .. } => {
                Some(*status)
            }
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if the daemon refused the credentials or the session.
    ///
    /// A 403 on an ordinary operation means the cookie is missing, expired
    /// or revoked; logging in again may resolve it.
    pub fn is_auth_failure(&self) -> bool {
        match self {
            Self::AuthenticationFailed { .. } => true,
            Self::RequestFailed { status, .. } => *status == 401 || *status == 403,
            _ => false,
        }
    }

    /// Returns `true` for failures raised before any network I/O.
    pub fn is_construction(&self) -> bool {
        matches!(
            self,
            Self::Construction { .. } | Self::InvalidUrl(_) | Self::Tls(_)
        )
    }

    /// Returns `true` if the connection itself failed (refused, DNS, timeout).
    pub fn is_connect(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }

    /// Name of the operation that failed, where known.
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            Self::Construction { operation, .. }
            | Self::RequestFailed { operation, .. }
            | Self::Decode { operation, .. }
            | Self::Protocol { operation, .. } => Some(*operation),
            _ => None,
        }
    }
}
