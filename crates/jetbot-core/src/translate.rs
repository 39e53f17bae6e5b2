// ── Friendly-name translation ──
//
// Fixed bidirectional mapping between the API's cleaning-type enum
// values and their display strings. Total in both directions: values
// outside the table pass through unchanged, so an unknown cleaning
// type a future firmware adds still round-trips.

/// Known cleaning types: (raw API value, display string).
const CLEANING_TYPES: &[(&str, &str)] = &[
    ("vacuum", "Vacuum Only"),
    ("mop", "Mop Only"),
    ("vacuumAndMopTogether", "Vacuum & Mop Together"),
    ("mopAfterVacuum", "Vacuum Then Mop"),
];

/// Cleaning types Jet Bot Combo models support, used when the device
/// doesn't report `supportedCleaningTypes`.
pub const FALLBACK_CLEANING_TYPES: &[&str] =
    &["vacuum", "mop", "vacuumAndMopTogether", "mopAfterVacuum"];

/// Raw API value → display string; identity for unknown values.
pub fn to_friendly(raw: &str) -> &str {
    CLEANING_TYPES
        .iter()
        .find(|(r, _)| *r == raw)
        .map_or(raw, |(_, friendly)| *friendly)
}

/// Display string → raw API value; identity for unknown values.
pub fn to_raw(friendly: &str) -> &str {
    CLEANING_TYPES
        .iter()
        .find(|(_, f)| *f == friendly)
        .map_or(friendly, |(raw, _)| *raw)
}
