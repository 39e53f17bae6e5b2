// jetbot-core: Polling data layer between jetbot-api and consumers.
//
// Read path:  RefreshCoordinator → CapabilitySnapshot → project → views.
// Write path: VacuumCommand → CommandDispatcher → API; the caller then
// requests a refresh to converge.

pub mod config;
pub mod coordinator;
pub mod dispatch;
pub mod error;
pub mod peers;
pub mod project;
pub mod snapshot;
pub mod translate;
pub mod views;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::JetBotConfig;
pub use coordinator::{RefreshCoordinator, RefreshOutcome};
pub use dispatch::{CommandDispatcher, VacuumCommand};
pub use error::{DispatchError, RefreshError};
pub use peers::PeerStateIndex;
pub use snapshot::CapabilitySnapshot;
pub use views::{SENSORS, SensorSpec, VacuumActivity, VacuumView};
