// ── Value projection ──
//
// Pure lookups over a capability snapshot. A missing path degrades to
// `None` — projection never raises. The peer-index fallback only runs
// when the capability tree yields nothing.

use serde_json::Value;

use crate::peers::PeerStateIndex;
use crate::snapshot::CapabilitySnapshot;

/// Role keywords for the peer-index fallback.
pub const BATTERY_KEYWORDS: &[&str] = &["battery"];
pub const CLEANING_MODE_KEYWORDS: &[&str] = &["cleaning", "mode"];
pub const OPERATING_STATE_KEYWORDS: &[&str] = &["operating", "state"];

/// Unwrap a `{ "value": ... }` wrapper; pass anything else through.
/// Objects without a `value` field are returned as-is.
fn unwrap_value(raw: &Value) -> &Value {
    match raw {
        Value::Object(map) => map.get("value").unwrap_or(raw),
        _ => raw,
    }
}

/// Extract the scalar at `components[component][capability][attribute]`,
/// unwrapping a value-wrapper object if present.
pub fn project<'a>(
    snapshot: &'a CapabilitySnapshot,
    component: &str,
    capability: &str,
    attribute: &str,
) -> Option<&'a Value> {
    snapshot
        .attribute(component, capability, attribute)
        .map(unwrap_value)
}

/// Projection narrowed to a string.
pub fn project_str<'a>(
    snapshot: &'a CapabilitySnapshot,
    component: &str,
    capability: &str,
    attribute: &str,
) -> Option<&'a str> {
    project(snapshot, component, capability, attribute)?.as_str()
}

/// Projection narrowed to an integer. Accepts integers, floats, and
/// numeric strings ("57", "57.0") — the API is not consistent about
/// which one a battery level arrives as.
pub fn project_i64(
    snapshot: &CapabilitySnapshot,
    component: &str,
    capability: &str,
    attribute: &str,
) -> Option<i64> {
    value_as_i64(project(snapshot, component, capability, attribute)?)
}

/// Projection narrowed to a list of strings. Accepts both shapes the
/// API serves: `["a", "b"]` and `[{"value": "a"}, {"value": "b"}]`.
pub fn project_str_list(
    snapshot: &CapabilitySnapshot,
    component: &str,
    capability: &str,
    attribute: &str,
) -> Option<Vec<String>> {
    let list = project(snapshot, component, capability, attribute)?.as_array()?;
    Some(
        list.iter()
            .filter_map(|item| unwrap_value(item).as_str().map(str::to_owned))
            .collect(),
    )
}

/// Projection with the peer-index fallback: capability tree first, then
/// a keyword scan over already-resolved peer entity states.
pub fn project_with_peers(
    snapshot: &CapabilitySnapshot,
    peers: Option<&PeerStateIndex>,
    component: &str,
    capability: &str,
    attribute: &str,
    role_keywords: &[&str],
) -> Option<Value> {
    if let Some(value) = project(snapshot, component, capability, attribute) {
        return Some(value.clone());
    }
    peers?
        .find(role_keywords)
        .map(|(_, state)| Value::String(state.to_owned()))
}

/// Coerce a projected value to an integer, tolerating numeric strings.
pub fn value_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.round() as i64)),
        Value::String(s) => s.parse::<f64>().ok().map(|f| f.round() as i64),
        _ => None,
    }
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

    #[test]
    fn wrapped_battery_value_projects() {
        let snap = snapshot(json!({
            "main": { "battery": { "battery": { "value": 57 } } }
        }));

        assert_eq!(project(&snap, "main", "battery", "battery"), Some(&json!(57)));
        assert_eq!(project_i64(&snap, "main", "battery", "battery"), Some(57));
    }

    #[test]
    fn bare_scalars_pass_through() {
        let snap = snapshot(json!({
            "main": { "battery": { "battery": 42 } }
        }));

        assert_eq!(project_i64(&snap, "main", "battery", "battery"), Some(42));
    }

    #[test]
    fn missing_paths_are_none_at_every_segment() {
        let snap = snapshot(json!({
            "main": { "battery": { "battery": { "value": 57 } } }
        }));

        assert!(project(&snap, "station", "battery", "battery").is_none());
        assert!(project(&snap, "main", "dustBag", "status").is_none());
        assert!(project(&snap, "main", "battery", "charge").is_none());
    }

    #[test]
    fn object_without_value_field_is_returned_raw() {
        let snap = snapshot(json!({
            "main": { "samsungce.robotCleanerMapCleaningInfo": { "area": { "unit": "m2" } } }
        }));

        let raw = project(&snap, "main", "samsungce.robotCleanerMapCleaningInfo", "area").unwrap();
        assert_eq!(raw, &json!({ "unit": "m2" }));
    }

    #[test]
    fn str_list_accepts_both_shapes() {
        let snap = snapshot(json!({
            "main": {
                "samsungce.robotCleanerCleaningMode": {
                    "supportedValues": ["auto", "spot"]
                },
                "samsungce.robotCleanerCleaningType": {
                    "supportedCleaningTypes": { "value": [{ "value": "vacuum" }, { "value": "mop" }] }
                }
            }
        }));

        assert_eq!(
            project_str_list(&snap, "main", "samsungce.robotCleanerCleaningMode", "supportedValues"),
            Some(vec!["auto".to_owned(), "spot".to_owned()])
        );
        assert_eq!(
            project_str_list(
                &snap,
                "main",
                "samsungce.robotCleanerCleaningType",
                "supportedCleaningTypes"
            ),
            Some(vec!["vacuum".to_owned(), "mop".to_owned()])
        );
    }

    #[test]
    fn numeric_strings_coerce() {
        assert_eq!(value_as_i64(&json!("57")), Some(57));
        assert_eq!(value_as_i64(&json!("56.7")), Some(57));
        assert_eq!(value_as_i64(&json!(56.7)), Some(57));
        assert_eq!(value_as_i64(&json!("full")), None);
        assert_eq!(value_as_i64(&json!(null)), None);
    }

    #[test]
    fn capability_tree_wins_over_peers() {
        let snap = snapshot(json!({
            "main": { "battery": { "battery": { "value": 57 } } }
        }));
        let mut peers = crate::peers::PeerStateIndex::new();
        peers.insert("sensor.jetbot_battery", "12");

        let value = project_with_peers(
            &snap,
            Some(&peers),
            "main",
            "battery",
            "battery",
            BATTERY_KEYWORDS,
        );
        assert_eq!(value, Some(json!(57)));
    }

    #[test]
    fn peer_fallback_fills_missing_capability() {
        let snap = snapshot(json!({ "main": {} }));
        let mut peers = crate::peers::PeerStateIndex::new();
        peers.insert("sensor.jetbot_battery", "88");

        let value = project_with_peers(
            &snap,
            Some(&peers),
            "main",
            "battery",
            "battery",
            BATTERY_KEYWORDS,
        );
        assert_eq!(value, Some(json!("88")));

        let none = project_with_peers(&snap, None, "main", "battery", "battery", BATTERY_KEYWORDS);
        assert_eq!(none, None);
    }
}
