// ── Peer-state index ──
//
// Some host platforms already expose the same device through other
// integrations. When the capability tree is missing a value, the
// projector can fall back to those already-resolved peer entity states.
// The index is an injected collaborator — the host fills it, core only
// reads it.

use std::collections::BTreeMap;

/// Resolved peer entity states, keyed by peer entity id.
///
/// Backed by a `BTreeMap` so keyword scans are deterministic: when
/// several peers match, the lexicographically smallest id wins.
#[derive(Debug, Clone, Default)]
pub struct PeerStateIndex {
    states: BTreeMap<String, String>,
}

impl PeerStateIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or replace) a peer's current state.
    pub fn insert(&mut self, entity_id: impl Into<String>, state: impl Into<String>) {
        self.states.insert(entity_id.into(), state.into());
    }

    pub fn get(&self, entity_id: &str) -> Option<&str> {
        self.states.get(entity_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Find the first peer whose id contains every keyword
    /// (case-insensitive substring match). Iteration order is the map's
    /// sorted key order, so the result is stable across calls.
    pub fn find(&self, keywords: &[&str]) -> Option<(&str, &str)> {
        self.states
            .iter()
            .find(|(id, _)| {
                let id = id.to_ascii_lowercase();
                keywords.iter().all(|kw| id.contains(kw))
            })
            .map(|(id, state)| (id.as_str(), state.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_requires_all_keywords() {
        let mut index = PeerStateIndex::new();
        index.insert("sensor.jetbot_cleaning_mode", "auto");
        index.insert("sensor.jetbot_operating_state", "cleaning");

        assert_eq!(
            index.find(&["cleaning", "mode"]),
            Some(("sensor.jetbot_cleaning_mode", "auto"))
        );
        assert_eq!(
            index.find(&["operating", "state"]),
            Some(("sensor.jetbot_operating_state", "cleaning"))
        );
        assert_eq!(index.find(&["dustbin"]), None);
    }

    #[test]
    fn ties_break_on_smallest_id() {
        let mut index = PeerStateIndex::new();
        index.insert("sensor.z_battery", "10");
        index.insert("sensor.a_battery", "90");

        assert_eq!(index.find(&["battery"]), Some(("sensor.a_battery", "90")));
    }
}
