//! CLI configuration — thin wrapper around `jetbot_config` shared types.
//!
//! Re-exports the shared types and adds resolution that respects
//! `GlobalOpts` flag overrides (--device, --token, --api-url, ...).

use std::time::Duration;

use secrecy::SecretString;

use jetbot_api::Credential;
use jetbot_core::JetBotConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use jetbot_config::{Config, Profile, config_path, load_config_or_default, save_config};

// ── Resolution ──────────────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Everything a command handler needs to talk to the API.
pub struct Resolved {
    pub config: JetBotConfig,
    pub credential: Credential,
}

/// Translate profile + flags into runtime config and a credential.
/// Flag overrides take priority over profile values, which take
/// priority over the config defaults.
///
/// `needs_device` is false for account-level commands (`devices`),
/// which leave `device_id` empty when nothing selects one.
pub fn resolve(global: &GlobalOpts, needs_device: bool) -> Result<Resolved, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);
    let profile = cfg.profiles.get(&profile_name);

    // 1. Device id (flag > env > profile)
    let device_id = match global
        .device
        .clone()
        .or_else(|| profile.and_then(|p| p.device_id.clone()))
    {
        Some(id) => id,
        None if needs_device => return Err(CliError::NoDevice),
        None => String::new(),
    };

    // 2. API URL
    let api_url = global
        .api_url
        .clone()
        .or_else(|| profile.and_then(|p| p.api_url.clone()))
        .unwrap_or_else(|| jetbot_api::DEFAULT_BASE_URL.to_owned());

    // 3. Tuning
    let timeout_secs = global
        .timeout
        .or_else(|| profile.and_then(|p| p.timeout))
        .unwrap_or(cfg.defaults.timeout);
    let refresh_interval_secs = profile
        .and_then(|p| p.refresh_interval)
        .unwrap_or(cfg.defaults.refresh_interval);

    // 4. Credential (CLI flag / env wins, then the profile chain)
    let credential = if let Some(ref token) = global.token {
        Credential::PersonalToken(SecretString::from(token.clone()))
    } else if let Some(profile) = profile {
        jetbot_config::resolve_credential(profile, &profile_name)?
    } else {
        return Err(CliError::NoCredentials {
            profile: profile_name,
        });
    };

    Ok(Resolved {
        config: JetBotConfig {
            api_url,
            device_id,
            refresh_interval_secs,
            timeout: Duration::from_secs(timeout_secs),
        },
        credential,
    })
}
