//! Shared helpers for command handlers.

use std::sync::Arc;

use jetbot_api::{SmartThingsClient, TransportConfig};
use jetbot_core::{JetBotConfig, RefreshCoordinator};

use crate::cli::GlobalOpts;
use crate::config;
use crate::error::CliError;

/// A resolved client plus the runtime config it was built from.
pub struct Setup {
    pub client: Arc<SmartThingsClient>,
    pub config: JetBotConfig,
}

impl Setup {
    pub fn coordinator(&self) -> RefreshCoordinator {
        RefreshCoordinator::new(Arc::clone(&self.client), self.config.clone())
    }
}

/// Resolve config + credential and build the API client.
pub fn setup(global: &GlobalOpts, needs_device: bool) -> Result<Setup, CliError> {
    let resolved = config::resolve(global, needs_device)?;

    let transport = TransportConfig {
        timeout: resolved.config.timeout,
        ..TransportConfig::default()
    };
    let client = Arc::new(SmartThingsClient::new(
        &resolved.config.api_url,
        resolved.credential,
        &transport,
    )?);

    Ok(Setup {
        client,
        config: resolved.config,
    })
}
