// ── Entity views ──
//
// Read-only sensor/vacuum/select projections: pure functions of the
// latest snapshot (plus the optional peer index), no I/O. The host
// renders these; the write path goes through the dispatcher.

use serde_json::Value;

use crate::dispatch::{
    CLEANING_MODE_CAPABILITY, CLEANING_TYPE_CAPABILITY, OPERATING_STATE_CAPABILITY,
};
use crate::peers::PeerStateIndex;
use crate::project;
use crate::snapshot::CapabilitySnapshot;
use crate::translate;

// ── Sensors ──────────────────────────────────────────────────────────

/// Declarative description of one sensor reading.
#[derive(Debug, Clone, Copy)]
pub struct SensorSpec {
    pub key: &'static str,
    pub name: &'static str,
    pub component: &'static str,
    pub capability: &'static str,
    pub attribute: &'static str,
    pub unit: Option<&'static str>,
    pub icon: Option<&'static str>,
}

impl SensorSpec {
    /// The sensor's current value, or `None` if the capability is absent.
    pub fn value<'a>(&self, snapshot: &'a CapabilitySnapshot) -> Option<&'a Value> {
        project::project(snapshot, self.component, self.capability, self.attribute)
    }
}

/// Every sensor a Jet Bot exposes. The dustbin lives on the clean
/// station's own component, not "main".
pub const SENSORS: &[SensorSpec] = &[
    SensorSpec {
        key: "battery",
        name: "Battery",
        component: "main",
        capability: "battery",
        attribute: "battery",
        unit: Some("%"),
        icon: Some("mdi:battery"),
    },
    SensorSpec {
        key: "mode",
        name: "Cleaning Mode",
        component: "main",
        capability: CLEANING_MODE_CAPABILITY,
        attribute: "robotCleanerCleaningMode",
        unit: None,
        icon: None,
    },
    SensorSpec {
        key: "state",
        name: "Operating State",
        component: "main",
        capability: OPERATING_STATE_CAPABILITY,
        attribute: "operatingState",
        unit: None,
        icon: None,
    },
    SensorSpec {
        key: "step",
        name: "Cleaning Step",
        component: "main",
        capability: OPERATING_STATE_CAPABILITY,
        attribute: "cleaningStep",
        unit: None,
        icon: None,
    },
    SensorSpec {
        key: "dustbin",
        name: "Dustbin Status",
        component: "station",
        capability: "samsungce.robotCleanerDustBag",
        attribute: "status",
        unit: None,
        icon: None,
    },
    SensorSpec {
        key: "spray",
        name: "Water Spray Level",
        component: "main",
        capability: "samsungce.robotCleanerWaterSprayLevel",
        attribute: "waterSprayLevel",
        unit: None,
        icon: None,
    },
    SensorSpec {
        key: "turbo",
        name: "Turbo Mode",
        component: "main",
        capability: "samsungce.robotCleanerTurboMode",
        attribute: "robotCleanerTurboMode",
        unit: None,
        icon: None,
    },
    SensorSpec {
        key: "sound",
        name: "Sound Mode",
        component: "main",
        capability: "samsungce.robotCleanerSystemSoundMode",
        attribute: "soundMode",
        unit: None,
        icon: None,
    },
    SensorSpec {
        key: "map_area",
        name: "Map Area",
        component: "main",
        capability: "samsungce.robotCleanerMapCleaningInfo",
        attribute: "area",
        unit: None,
        icon: None,
    },
    SensorSpec {
        key: "extent",
        name: "Cleaned Extent",
        component: "main",
        capability: "samsungce.robotCleanerMapCleaningInfo",
        attribute: "cleanedExtent",
        unit: None,
        icon: None,
    },
];

// ── Vacuum ───────────────────────────────────────────────────────────

/// Activity buckets for the vacuum card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VacuumActivity {
    Cleaning,
    Paused,
    Returning,
    Docked,
    Idle,
}

/// Operating states the peer fallback is allowed to report. Peer ids
/// are matched fuzzily, so anything outside this set is noise.
const KNOWN_STATES: &[&str] = &["cleaning", "paused", "docked", "idle", "returning"];

impl VacuumActivity {
    /// Map a raw operating state onto an activity bucket. Unknown
    /// states land on `Idle` rather than erroring.
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "cleaning" => Self::Cleaning,
            "paused" => Self::Paused,
            "returning" | "return_to_base" | "returntohome" => Self::Returning,
            "docked" => Self::Docked,
            _ => Self::Idle,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cleaning => "cleaning",
            Self::Paused => "paused",
            Self::Returning => "returning",
            Self::Docked => "docked",
            Self::Idle => "idle",
        }
    }
}

/// The vacuum card: operating state, activity, battery, and the full
/// attribute table.
pub struct VacuumView<'a> {
    snapshot: &'a CapabilitySnapshot,
    peers: Option<&'a PeerStateIndex>,
}

impl<'a> VacuumView<'a> {
    pub fn new(snapshot: &'a CapabilitySnapshot, peers: Option<&'a PeerStateIndex>) -> Self {
        Self { snapshot, peers }
    }

    /// Raw operating state, lowercased; "unknown" when nothing reports.
    pub fn operating_state(&self) -> String {
        if let Some(state) = project::project_str(
            self.snapshot,
            "main",
            OPERATING_STATE_CAPABILITY,
            "operatingState",
        ) {
            return state.to_ascii_lowercase();
        }

        self.peers
            .and_then(|peers| peers.find(project::OPERATING_STATE_KEYWORDS))
            .map(|(_, state)| state.to_ascii_lowercase())
            .filter(|state| KNOWN_STATES.contains(&state.as_str()))
            .unwrap_or_else(|| "unknown".to_owned())
    }

    pub fn activity(&self) -> VacuumActivity {
        VacuumActivity::from_raw(&self.operating_state())
    }

    /// Battery percentage, if any source reports one.
    pub fn battery_level(&self) -> Option<i64> {
        project::project_with_peers(
            self.snapshot,
            self.peers,
            "main",
            "battery",
            "battery",
            project::BATTERY_KEYWORDS,
        )
        .as_ref()
        .and_then(project::value_as_i64)
    }

    /// Every sensor value present in the snapshot, keyed by sensor key.
    pub fn attributes(&self) -> Vec<(&'static str, Value)> {
        SENSORS
            .iter()
            .filter_map(|spec| spec.value(self.snapshot).map(|v| (spec.key, v.clone())))
            .collect()
    }
}

// ── Selects ──────────────────────────────────────────────────────────

/// Available cleaning modes, from the device's own supported list.
pub fn cleaning_mode_options(snapshot: &CapabilitySnapshot) -> Vec<String> {
    project::project_str_list(snapshot, "main", CLEANING_MODE_CAPABILITY, "supportedValues")
        .unwrap_or_default()
}

/// Current cleaning mode (raw API value).
pub fn current_cleaning_mode(snapshot: &CapabilitySnapshot) -> Option<String> {
    project::project_str(
        snapshot,
        "main",
        CLEANING_MODE_CAPABILITY,
        "robotCleanerCleaningMode",
    )
    .map(str::to_owned)
}

/// Available cleaning types as display strings. Falls back to the
/// documented Combo list when the device doesn't report its own.
pub fn cleaning_type_options(snapshot: &CapabilitySnapshot) -> Vec<String> {
    let raw = project::project_str_list(
        snapshot,
        "main",
        CLEANING_TYPE_CAPABILITY,
        "supportedCleaningTypes",
    )
    .unwrap_or_else(|| {
        translate::FALLBACK_CLEANING_TYPES
            .iter()
            .map(|&s| s.to_owned())
            .collect()
    });

    raw.iter()
        .map(|option| translate::to_friendly(option).to_owned())
        .collect()
}

/// Current cleaning type as a display string.
pub fn current_cleaning_type(snapshot: &CapabilitySnapshot) -> Option<String> {
    project::project_str(snapshot, "main", CLEANING_TYPE_CAPABILITY, "cleaningType")
        .map(|raw| translate::to_friendly(raw).to_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot(components: Value) -> CapabilitySnapshot {
        let status = serde_json::from_value(json!({ "components": components })).unwrap();
        CapabilitySnapshot::from_parts("dev-1".into(), status, None)
    }

    fn full_snapshot() -> CapabilitySnapshot {
        snapshot(json!({
            "main": {
                "battery": { "battery": { "value": 57 } },
                "samsungce.robotCleanerOperatingState": {
                    "operatingState": { "value": "Cleaning" },
                    "cleaningStep": { "value": "clean" }
                },
                "samsungce.robotCleanerCleaningMode": {
                    "robotCleanerCleaningMode": { "value": "auto" },
                    "supportedValues": ["auto", "spot", "repeat"]
                },
                "samsungce.robotCleanerCleaningType": {
                    "cleaningType": { "value": "vacuumAndMopTogether" },
                    "supportedCleaningTypes": { "value": ["vacuum", "mop", "vacuumAndMopTogether"] }
                }
            },
            "station": {
                "samsungce.robotCleanerDustBag": { "status": { "value": "normal" } }
            }
        }))
    }

    #[test]
    fn sensor_specs_project() {
        let snap = full_snapshot();
        let by_key = |key: &str| {
            SENSORS
                .iter()
                .find(|s| s.key == key)
                .unwrap()
                .value(&snap)
                .cloned()
        };

        assert_eq!(by_key("battery"), Some(json!(57)));
        assert_eq!(by_key("dustbin"), Some(json!("normal")));
        assert_eq!(by_key("spray"), None);
    }

    #[test]
    fn vacuum_view_reads_state_and_battery() {
        let snap = full_snapshot();
        let view = VacuumView::new(&snap, None);

        assert_eq!(view.operating_state(), "cleaning");
        assert_eq!(view.activity(), VacuumActivity::Cleaning);
        assert_eq!(view.battery_level(), Some(57));
    }

    #[test]
    fn vacuum_view_degrades_to_unknown() {
        let snap = snapshot(json!({ "main": {} }));
        let view = VacuumView::new(&snap, None);

        assert_eq!(view.operating_state(), "unknown");
        assert_eq!(view.activity(), VacuumActivity::Idle);
        assert_eq!(view.battery_level(), None);
        assert!(view.attributes().is_empty());
    }

    #[test]
    fn peer_fallback_rejects_noise_states() {
        let snap = snapshot(json!({ "main": {} }));
        let mut peers = PeerStateIndex::new();
        peers.insert("sensor.jetbot_operating_state", "unavailable");

        let view = VacuumView::new(&snap, Some(&peers));
        assert_eq!(view.operating_state(), "unknown");

        let mut peers = PeerStateIndex::new();
        peers.insert("sensor.jetbot_operating_state", "Docked");

        let view = VacuumView::new(&snap, Some(&peers));
        assert_eq!(view.operating_state(), "docked");
        assert_eq!(view.activity(), VacuumActivity::Docked);
    }

    #[test]
    fn activity_maps_returning_aliases() {
        for raw in ["returning", "return_to_base", "returntohome"] {
            assert_eq!(VacuumActivity::from_raw(raw), VacuumActivity::Returning);
        }
        assert_eq!(VacuumActivity::from_raw("charging"), VacuumActivity::Idle);
    }

    #[test]
    fn select_views_translate() {
        let snap = full_snapshot();

        assert_eq!(
            cleaning_mode_options(&snap),
            vec!["auto", "spot", "repeat"]
        );
        assert_eq!(current_cleaning_mode(&snap).as_deref(), Some("auto"));
        assert_eq!(
            cleaning_type_options(&snap),
            vec!["Vacuum Only", "Mop Only", "Vacuum & Mop Together"]
        );
        assert_eq!(
            current_cleaning_type(&snap).as_deref(),
            Some("Vacuum & Mop Together")
        );
    }

    #[test]
    fn cleaning_types_fall_back_to_documented_list() {
        let snap = snapshot(json!({ "main": {} }));

        assert_eq!(
            cleaning_type_options(&snap),
            vec![
                "Vacuum Only",
                "Mop Only",
                "Vacuum & Mop Together",
                "Vacuum Then Mop"
            ]
        );
        assert_eq!(current_cleaning_type(&snap), None);
    }
}
