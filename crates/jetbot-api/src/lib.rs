// jetbot-api: Async Rust client for the SmartThings cloud API.

pub mod auth;
pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use auth::{Credential, OauthSession};
pub use client::{DEFAULT_BASE_URL, SmartThingsClient};
pub use error::Error;
pub use transport::TransportConfig;
pub use types::{CommandRequest, Device, DeviceStatus};
