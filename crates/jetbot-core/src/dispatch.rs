// ── Command dispatch ──
//
// The write path. One outbound POST per user action; the caller
// converges state afterwards with `request_refresh` — the dispatcher
// never refreshes on its own, and never retries. A command's lifecycle
// is terminal after one round-trip: acknowledged, auth-failed, or
// transport-failed.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use jetbot_api::{CommandRequest, SmartThingsClient};

use crate::error::DispatchError;

/// Capability ids used by Jet Bot models.
pub const OPERATING_STATE_CAPABILITY: &str = "samsungce.robotCleanerOperatingState";
pub const CLEANING_MODE_CAPABILITY: &str = "samsungce.robotCleanerCleaningMode";
pub const CLEANING_TYPE_CAPABILITY: &str = "samsungce.robotCleanerCleaningType";

/// A user-level action on the vacuum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VacuumCommand {
    Start,
    Stop,
    Pause,
    ReturnToHome,
    /// Raw API mode value (e.g. "auto", "spot").
    SetCleaningMode(String),
    /// Raw API cleaning type (e.g. "vacuumAndMopTogether") — translate
    /// display strings with [`crate::translate::to_raw`] first.
    SetCleaningType(String),
}

impl VacuumCommand {
    /// The wire command this action maps to.
    pub fn to_request(&self) -> CommandRequest {
        match self {
            Self::Start => CommandRequest::main(OPERATING_STATE_CAPABILITY, "start"),
            Self::Stop => CommandRequest::main(OPERATING_STATE_CAPABILITY, "stop"),
            Self::Pause => CommandRequest::main(OPERATING_STATE_CAPABILITY, "pause"),
            Self::ReturnToHome => CommandRequest::main(OPERATING_STATE_CAPABILITY, "returnToHome"),
            Self::SetCleaningMode(mode) => {
                CommandRequest::main(CLEANING_MODE_CAPABILITY, "setCleaningMode")
                    .with_arguments(vec![Value::String(mode.clone())])
            }
            Self::SetCleaningType(cleaning_type) => {
                CommandRequest::main(CLEANING_TYPE_CAPABILITY, "setCleaningType")
                    .with_arguments(vec![Value::String(cleaning_type.clone())])
            }
        }
    }
}

/// Sends validated commands to one device.
pub struct CommandDispatcher {
    client: Arc<SmartThingsClient>,
    device_id: String,
}

impl CommandDispatcher {
    pub fn new(client: Arc<SmartThingsClient>, device_id: impl Into<String>) -> Self {
        Self {
            client,
            device_id: device_id.into(),
        }
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Send one command. 401/403 surface as
    /// [`DispatchError::AuthenticationFailed`]; any other non-2xx as
    /// [`DispatchError::Rejected`] with status and body context.
    pub async fn dispatch(&self, command: &VacuumCommand) -> Result<(), DispatchError> {
        let request = command.to_request();
        debug!(
            device = %self.device_id,
            capability = %request.capability,
            command = %request.command,
            "dispatching command"
        );

        self.client
            .execute_commands(&self.device_id, &[request])
            .await
            .map_err(DispatchError::from)
    }
}
