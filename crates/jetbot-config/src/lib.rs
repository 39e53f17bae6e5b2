//! Shared configuration for the jetbot CLI.
//!
//! TOML profiles, credential resolution (env + plaintext), and
//! translation to `jetbot_core::JetBotConfig`. The CLI adds
//! flag-aware wrappers on top.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use jetbot_api::{Credential, OauthSession};
use jetbot_core::JetBotConfig;

/// Environment variable holding the personal access token when a
/// profile doesn't name its own.
pub const DEFAULT_TOKEN_ENV: &str = "JETBOT_TOKEN";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named device profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default = "default_refresh_interval")]
    pub refresh_interval: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            timeout: default_timeout(),
            refresh_interval: default_refresh_interval(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_refresh_interval() -> u64 {
    30
}

/// A named device profile.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Profile {
    /// SmartThings device id of the vacuum.
    pub device_id: Option<String>,

    /// API base URL override (defaults to the production endpoint).
    pub api_url: Option<String>,

    /// Personal access token (plaintext — prefer the env var).
    pub token: Option<String>,

    /// Environment variable name containing the token.
    pub token_env: Option<String>,

    /// OAuth app settings; presence switches the profile to OAuth.
    pub oauth: Option<OauthProfile>,

    /// Override refresh interval (seconds, 0 = never).
    pub refresh_interval: Option<u64>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,
}

/// OAuth app settings for a profile. Secrets come from the named
/// environment variables, never from the TOML file.
#[derive(Debug, Deserialize, Serialize)]
pub struct OauthProfile {
    /// Token endpoint; defaults to the SmartThings one.
    pub token_url: Option<String>,

    pub client_id: String,

    /// Environment variable holding the client secret.
    #[serde(default = "default_client_secret_env")]
    pub client_secret_env: String,

    /// Environment variable holding the refresh token.
    #[serde(default = "default_refresh_token_env")]
    pub refresh_token_env: String,
}

fn default_client_secret_env() -> String {
    "JETBOT_CLIENT_SECRET".into()
}
fn default_refresh_token_env() -> String {
    "JETBOT_REFRESH_TOKEN".into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "jetbot", "jetbot").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("jetbot");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    let path = config_path();

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("JETBOT_CONFIG_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the credential for a profile.
///
/// OAuth settings win when present; otherwise the token chain is
/// profile `token_env` → `JETBOT_TOKEN` → plaintext `token`.
pub fn resolve_credential(profile: &Profile, profile_name: &str) -> Result<Credential, ConfigError> {
    if let Some(ref oauth) = profile.oauth {
        return resolve_oauth(oauth, profile_name);
    }

    // 1. Profile's token_env → env var lookup
    if let Some(ref env_name) = profile.token_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(Credential::PersonalToken(SecretString::from(val)));
        }
    }

    // 2. Default env var
    if let Ok(val) = std::env::var(DEFAULT_TOKEN_ENV) {
        return Ok(Credential::PersonalToken(SecretString::from(val)));
    }

    // 3. Plaintext in config
    if let Some(ref token) = profile.token {
        return Ok(Credential::PersonalToken(SecretString::from(token.clone())));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

fn resolve_oauth(oauth: &OauthProfile, profile_name: &str) -> Result<Credential, ConfigError> {
    let raw_url = oauth
        .token_url
        .as_deref()
        .unwrap_or(OauthSession::SMARTTHINGS_TOKEN_URL);
    let token_url: Url = raw_url.parse().map_err(|_| ConfigError::Validation {
        field: "oauth.token_url".into(),
        reason: format!("invalid URL: {raw_url}"),
    })?;

    let client_secret =
        std::env::var(&oauth.client_secret_env).map_err(|_| ConfigError::NoCredentials {
            profile: profile_name.into(),
        })?;
    let refresh_token =
        std::env::var(&oauth.refresh_token_env).map_err(|_| ConfigError::NoCredentials {
            profile: profile_name.into(),
        })?;

    Ok(Credential::OAuth(OauthSession::new(
        token_url,
        oauth.client_id.clone(),
        SecretString::from(client_secret),
        SecretString::from(refresh_token),
    )))
}

// ── Profile translation ─────────────────────────────────────────────

/// Build a `JetBotConfig` from a profile — no CLI flag overrides.
pub fn profile_to_config(
    profile: &Profile,
    defaults: &Defaults,
    profile_name: &str,
) -> Result<JetBotConfig, ConfigError> {
    let device_id = profile
        .device_id
        .clone()
        .ok_or_else(|| ConfigError::Validation {
            field: "device_id".into(),
            reason: format!("profile '{profile_name}' has no device_id"),
        })?;

    let api_url = profile
        .api_url
        .clone()
        .unwrap_or_else(|| jetbot_api::DEFAULT_BASE_URL.to_owned());

    Ok(JetBotConfig {
        api_url,
        device_id,
        refresh_interval_secs: profile.refresh_interval.unwrap_or(defaults.refresh_interval),
        timeout: Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout)),
    })
}
