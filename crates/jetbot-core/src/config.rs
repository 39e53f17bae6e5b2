// ── Runtime configuration ──
//
// Describes *which* device to coordinate and *how often* to poll it.
// Credentials are not part of this type; they live in the
// `jetbot_api::Credential` injected into the client. The CLI constructs
// a `JetBotConfig` and hands it in — core never reads config files.

use std::time::Duration;

/// Configuration for coordinating a single Jet Bot device.
#[derive(Debug, Clone)]
pub struct JetBotConfig {
    /// API base URL (production: [`jetbot_api::DEFAULT_BASE_URL`]).
    pub api_url: String,
    /// SmartThings device id of the vacuum.
    pub device_id: String,
    /// How often the polling task refreshes (seconds). 0 = never.
    pub refresh_interval_secs: u64,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for JetBotConfig {
    fn default() -> Self {
        Self {
            api_url: jetbot_api::DEFAULT_BASE_URL.to_owned(),
            device_id: String::new(),
            refresh_interval_secs: 30,
            timeout: Duration::from_secs(30),
        }
    }
}

impl JetBotConfig {
    /// The polling cadence, or `None` when polling is disabled.
    pub fn refresh_interval(&self) -> Option<Duration> {
        (self.refresh_interval_secs > 0).then(|| Duration::from_secs(self.refresh_interval_secs))
    }
}
