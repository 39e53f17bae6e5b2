//! Device listing.

use tabled::Tabled;

use jetbot_api::Device;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Location")]
    location: String,
}

impl From<&Device> for DeviceRow {
    fn from(d: &Device) -> Self {
        Self {
            id: d.device_id.clone(),
            label: d.display_label().to_owned(),
            location: d.location_id.clone().unwrap_or_default(),
        }
    }
}

/// List robot cleaner devices visible to the token.
pub async fn list(global: &GlobalOpts) -> Result<(), CliError> {
    let setup = util::setup(global, false)?;
    let devices = setup.client.list_robot_cleaners().await?;

    if devices.is_empty() && !global.quiet {
        eprintln!("No robot cleaner devices found on this account");
        return Ok(());
    }

    let rendered = output::render_list(global.output, &devices, |d| DeviceRow::from(d), |d| {
        d.device_id.clone()
    });
    output::print_output(&rendered, global.quiet);
    Ok(())
}
