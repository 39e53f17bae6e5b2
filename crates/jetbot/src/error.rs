//! CLI error types.
//!
//! Maps core errors into user-facing errors with stable exit codes.

use thiserror::Error;

use jetbot_core::{DispatchError, RefreshError};

/// Exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
}

#[derive(Debug, Error)]
pub enum CliError {
    // ── Configuration ────────────────────────────────────────────────
    #[error("No device selected: pass --device or set device_id in the profile")]
    NoDevice,

    #[error("No credentials configured for profile '{profile}' (set JETBOT_TOKEN or --token)")]
    NoCredentials { profile: String },

    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error(transparent)]
    Config(#[from] jetbot_config::ConfigError),

    // ── Runtime ──────────────────────────────────────────────────────
    #[error(transparent)]
    Refresh(#[from] RefreshError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error(transparent)]
    Api(#[from] jetbot_api::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoDevice | Self::Validation { .. } => exit_code::USAGE,
            Self::NoCredentials { .. }
            | Self::Refresh(RefreshError::AuthenticationFailed { .. })
            | Self::Dispatch(DispatchError::AuthenticationFailed { .. }) => exit_code::AUTH,
            Self::Api(e) if e.is_auth_failure() => exit_code::AUTH,
            Self::Api(e) if e.is_not_found() => exit_code::NOT_FOUND,
            Self::Config(jetbot_config::ConfigError::NoCredentials { .. }) => exit_code::AUTH,
            _ => exit_code::GENERAL,
        }
    }
}
