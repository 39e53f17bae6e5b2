// ── Capability snapshot ──
//
// The result of one successful refresh: the device's full capability
// tree plus its label. Immutable once published — the coordinator
// replaces the whole snapshot atomically, never patches it.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use jetbot_api::types::{ComponentStatus, Device, DeviceStatus};

/// Immutable capability tree captured by one refresh.
///
/// `components` maps component name ("main", "station") → capability id
/// ("battery", "samsungce.robotCleanerOperatingState") → attribute name
/// → raw value. Values may be bare scalars or `{ "value": ... }`
/// wrapper objects; [`crate::project`] handles the unwrapping.
#[derive(Debug, Clone, Serialize)]
pub struct CapabilitySnapshot {
    pub device_id: String,
    pub label: Option<String>,
    pub components: HashMap<String, ComponentStatus>,
    pub fetched_at: DateTime<Utc>,
}

impl CapabilitySnapshot {
    /// Combine a status response and a detail response into a snapshot.
    pub fn from_parts(device_id: String, status: DeviceStatus, detail: Option<&Device>) -> Self {
        let label = detail.map(|d| d.display_label().to_owned());
        Self {
            device_id,
            label,
            components: status.components,
            fetched_at: Utc::now(),
        }
    }

    /// Display name for the device, with the stock fallback.
    pub fn label_or_default(&self) -> &str {
        self.label.as_deref().unwrap_or("Jet Bot Vacuum")
    }

    /// Raw attribute lookup — no wrapper unwrapping.
    pub fn attribute(&self, component: &str, capability: &str, attribute: &str) -> Option<&Value> {
        self.components.get(component)?.get(capability)?.get(attribute)
    }

    /// All attributes of one capability, if present.
    pub fn capability(
        &self,
        component: &str,
        capability: &str,
    ) -> Option<&HashMap<String, Value>> {
        self.components.get(component)?.get(capability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn status_from(json: Value) -> DeviceStatus {
        serde_json::from_value(json).expect("valid status")
    }

    #[test]
    fn from_parts_prefers_label() {
        let device: Device = serde_json::from_value(json!({
            "deviceId": "dev-1",
            "name": "robot-vacuum",
            "label": "Living Room Bot"
        }))
        .expect("valid device");

        let snap = CapabilitySnapshot::from_parts(
            "dev-1".into(),
            status_from(json!({ "components": {} })),
            Some(&device),
        );

        assert_eq!(snap.label.as_deref(), Some("Living Room Bot"));
        assert_eq!(snap.label_or_default(), "Living Room Bot");
    }

    #[test]
    fn missing_label_uses_default() {
        let snap = CapabilitySnapshot::from_parts(
            "dev-1".into(),
            status_from(json!({ "components": {} })),
            None,
        );

        assert_eq!(snap.label, None);
        assert_eq!(snap.label_or_default(), "Jet Bot Vacuum");
    }

    #[test]
    fn attribute_lookup_is_raw() {
        let snap = CapabilitySnapshot::from_parts(
            "dev-1".into(),
            status_from(json!({
                "components": {
                    "main": { "battery": { "battery": { "value": 57, "unit": "%" } } }
                }
            })),
            None,
        );

        let raw = snap.attribute("main", "battery", "battery").expect("present");
        assert_eq!(raw["value"], json!(57));
        assert!(snap.attribute("main", "battery", "missing").is_none());
        assert!(snap.attribute("station", "battery", "battery").is_none());
    }
}
