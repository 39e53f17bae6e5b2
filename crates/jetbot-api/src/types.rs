//! Wire types for the SmartThings REST API.
//!
//! Shapes follow the payloads of `GET /devices`, `GET /devices/{id}`,
//! `GET /devices/{id}/status`, and `POST /devices/{id}/commands`.
//! Unknown fields are ignored; the API adds fields without versioning.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ── Devices ──────────────────────────────────────────────────────────

/// A device as returned by `GET /devices` and `GET /devices/{id}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub device_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub location_id: Option<String>,
    #[serde(default)]
    pub components: Vec<DeviceComponent>,
}

/// A sub-unit of a device ("main", "station", ...), each with its own
/// capability list.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceComponent {
    pub id: String,
    #[serde(default)]
    pub capabilities: Vec<CapabilityRef>,
}

/// Reference to a capability a component implements.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityRef {
    pub id: String,
    #[serde(default)]
    pub version: Option<u32>,
}

impl Device {
    /// Display name: label, falling back to name, falling back to id.
    pub fn display_label(&self) -> &str {
        self.label
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or(&self.device_id)
    }

    /// Whether any component advertises a robot-cleaner operating state
    /// capability (case-insensitive substring match on the capability id).
    pub fn is_robot_cleaner(&self) -> bool {
        self.components.iter().any(|component| {
            component
                .capabilities
                .iter()
                .any(|cap| cap.id.to_ascii_lowercase().contains("robotcleaneroperatingstate"))
        })
    }
}

/// One page of a device listing.
#[derive(Debug, Deserialize)]
pub struct DevicePage {
    #[serde(default)]
    pub items: Vec<Device>,
    #[serde(default, rename = "_links")]
    pub links: Option<PageLinks>,
}

#[derive(Debug, Deserialize)]
pub struct PageLinks {
    #[serde(default)]
    pub next: Option<PageLink>,
}

#[derive(Debug, Deserialize)]
pub struct PageLink {
    pub href: String,
}

// ── Status ───────────────────────────────────────────────────────────

/// Attribute name → attribute value. Values are either bare scalars or
/// wrapper objects of shape `{ "value": ..., "unit": ..., "timestamp": ... }`;
/// unwrapping is the projection layer's job, so the raw `Value` is kept.
pub type CapabilityStatus = HashMap<String, Value>;

/// Capability id → attribute map.
pub type ComponentStatus = HashMap<String, CapabilityStatus>;

/// Full device status: component → capability → attribute → value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeviceStatus {
    #[serde(default)]
    pub components: HashMap<String, ComponentStatus>,
}

// ── Commands ─────────────────────────────────────────────────────────

/// One command in a `POST /devices/{id}/commands` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandRequest {
    pub component: String,
    pub capability: String,
    pub command: String,
    #[serde(default)]
    pub arguments: Vec<Value>,
}

impl CommandRequest {
    /// A command on the "main" component with no arguments.
    pub fn main(capability: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            component: "main".into(),
            capability: capability.into(),
            command: command.into(),
            arguments: Vec::new(),
        }
    }

    /// Attach arguments to the command.
    pub fn with_arguments(mut self, arguments: Vec<Value>) -> Self {
        self.arguments = arguments;
        self
    }
}

/// The `{"commands": [...]}` envelope the API expects.
#[derive(Debug, Serialize)]
pub struct CommandsBody<'a> {
    pub commands: &'a [CommandRequest],
}
