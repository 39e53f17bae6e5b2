// ── Core error types ──
//
// User-facing errors from jetbot-core. Consumers never see HTTP status
// codes or JSON parse failures directly on the read path; the `From`
// impls translate transport-layer errors into domain variants.

use thiserror::Error;

/// Failure of one refresh cycle.
///
/// `Clone` because every caller merged onto a single in-flight fetch
/// receives the same outcome. The previous snapshot is always retained
/// on failure — consumers keep showing stale data rather than nothing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RefreshError {
    /// The token was rejected; reauthorization is required before the
    /// next refresh can succeed.
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    /// Transient failure (transport error, API error, bad payload).
    #[error("Refresh failed: {message}")]
    Failed { message: String },
}

impl From<jetbot_api::Error> for RefreshError {
    fn from(err: jetbot_api::Error) -> Self {
        if err.is_auth_failure() {
            Self::AuthenticationFailed {
                message: err.to_string(),
            }
        } else {
            Self::Failed {
                message: err.to_string(),
            }
        }
    }
}

/// Failure of one command dispatch. No device state change is assumed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
    /// The token was rejected. Never silently retried.
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    /// The API refused the command.
    #[error("Command rejected (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    /// The command never reached the API (transport failure).
    #[error("Command failed: {message}")]
    Failed { message: String },
}

impl From<jetbot_api::Error> for DispatchError {
    fn from(err: jetbot_api::Error) -> Self {
        if err.is_auth_failure() {
            return Self::AuthenticationFailed {
                message: err.to_string(),
            };
        }
        match err {
            jetbot_api::Error::Api {
                status, message, ..
            } => Self::Rejected { status, message },
            other => Self::Failed {
                message: other.to_string(),
            },
        }
    }
}
