//! Status rendering over the entity views.

use serde::Serialize;
use serde_json::Value;
use tabled::Tabled;

use jetbot_core::views::{self, VacuumView};
use jetbot_core::{CapabilitySnapshot, SENSORS};

use crate::cli::{GlobalOpts, WatchArgs};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Report shape ────────────────────────────────────────────────────

#[derive(Serialize)]
struct StatusReport {
    device_id: String,
    label: String,
    operating_state: String,
    activity: &'static str,
    battery: Option<i64>,
    cleaning_mode: Option<String>,
    cleaning_type: Option<String>,
    sensors: serde_json::Map<String, Value>,
}

impl StatusReport {
    fn from_snapshot(snapshot: &CapabilitySnapshot) -> Self {
        let view = VacuumView::new(snapshot, None);

        let mut sensors = serde_json::Map::new();
        for (key, value) in view.attributes() {
            sensors.insert(key.to_owned(), value);
        }

        Self {
            device_id: snapshot.device_id.clone(),
            label: snapshot.label_or_default().to_owned(),
            operating_state: view.operating_state(),
            activity: view.activity().as_str(),
            battery: view.battery_level(),
            cleaning_mode: views::current_cleaning_mode(snapshot),
            cleaning_type: views::current_cleaning_type(snapshot),
            sensors,
        }
    }
}

#[derive(Tabled)]
struct SensorRow {
    #[tabled(rename = "Sensor")]
    name: String,
    #[tabled(rename = "Value")]
    value: String,
}

fn detail(report: &StatusReport) -> String {
    let mut lines = vec![
        format!("Device:   {} ({})", report.label, report.device_id),
        format!("State:    {}", report.operating_state),
        format!(
            "Battery:  {}",
            report
                .battery
                .map_or_else(|| "-".into(), |b| format!("{b}%"))
        ),
    ];
    if let Some(ref mode) = report.cleaning_mode {
        lines.push(format!("Mode:     {mode}"));
    }
    if let Some(ref cleaning_type) = report.cleaning_type {
        lines.push(format!("Type:     {cleaning_type}"));
    }

    let rows: Vec<SensorRow> = SENSORS
        .iter()
        .filter_map(|spec| {
            report.sensors.get(spec.key).map(|value| SensorRow {
                name: spec.name.to_owned(),
                value: render_value(value, spec.unit),
            })
        })
        .collect();

    if !rows.is_empty() {
        lines.push(String::new());
        lines.push(
            tabled::Table::new(&rows)
                .with(tabled::settings::Style::rounded())
                .to_string(),
        );
    }

    lines.join("\n")
}

fn render_value(value: &Value, unit: Option<&str>) -> String {
    let rendered = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    match unit {
        Some(unit) => format!("{rendered}{unit}"),
        None => rendered,
    }
}

// ── Handlers ────────────────────────────────────────────────────────

/// One refresh, one report.
pub async fn show(global: &GlobalOpts) -> Result<(), CliError> {
    let setup = util::setup(global, true)?;
    let coordinator = setup.coordinator();

    let snapshot = coordinator.request_refresh().await?;
    let report = StatusReport::from_snapshot(&snapshot);

    let rendered = output::render_single(global.output, &report, detail, |r| {
        r.operating_state.clone()
    });
    output::print_output(&rendered, global.quiet);
    Ok(())
}

/// Poll on an interval and print a line per update. Runs until killed.
pub async fn watch(args: &WatchArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let setup = util::setup(global, true)?;

    let mut config = setup.config.clone();
    config.refresh_interval_secs = args.interval.as_secs().max(1);
    let coordinator = jetbot_core::RefreshCoordinator::new(setup.client.clone(), config);

    let mut updates = coordinator.subscribe();

    // First refresh fails loudly; later failures keep the loop alive
    // with stale data, matching the coordinator's contract.
    let snapshot = coordinator.request_refresh().await?;
    print_watch_line(&snapshot, global.quiet);
    updates.mark_unchanged();

    let _poller = coordinator.spawn_polling();

    while updates.changed().await.is_ok() {
        let snapshot = updates.borrow_and_update().clone();
        if let Some(snapshot) = snapshot {
            print_watch_line(&snapshot, global.quiet);
        }
    }

    Ok(())
}

fn print_watch_line(snapshot: &CapabilitySnapshot, quiet: bool) {
    let view = VacuumView::new(snapshot, None);
    let battery = view
        .battery_level()
        .map_or_else(|| "-".into(), |b| format!("{b}%"));

    let line = format!(
        "{} state={} battery={}",
        snapshot.fetched_at.format("%H:%M:%S"),
        view.operating_state(),
        battery
    );
    output::print_output(&line, quiet);
}
