//! Cleaning mode / cleaning type select handlers.
//!
//! With no argument, lists the device's options and marks the current
//! one. With an argument, dispatches the change and refreshes.

use serde::Serialize;

use jetbot_core::{VacuumCommand, translate, views};

use crate::cli::{CleaningTypeArgs, GlobalOpts, ModeArgs};
use crate::error::CliError;
use crate::output;

use super::{control, util};

#[derive(Serialize)]
struct SelectReport {
    options: Vec<String>,
    current: Option<String>,
}

fn render(report: &SelectReport, global: &GlobalOpts) {
    let rendered = output::render_single(global.output, report, |r| {
        r.options
            .iter()
            .map(|option| {
                let marker = if Some(option) == r.current.as_ref() {
                    "*"
                } else {
                    " "
                };
                format!("{marker} {option}")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }, |r| r.current.clone().unwrap_or_default());
    output::print_output(&rendered, global.quiet);
}

/// Show or set the cleaning mode (raw API values, e.g. "auto").
pub async fn mode(args: &ModeArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.mode {
        Some(ref mode) => control::run(VacuumCommand::SetCleaningMode(mode.clone()), global).await,
        None => {
            let setup = util::setup(global, true)?;
            let snapshot = setup.coordinator().request_refresh().await?;

            render(
                &SelectReport {
                    options: views::cleaning_mode_options(&snapshot),
                    current: views::current_cleaning_mode(&snapshot),
                },
                global,
            );
            Ok(())
        }
    }
}

/// Show or set the cleaning type. Accepts either the raw API value or
/// the display name; display names are translated back before dispatch.
pub async fn cleaning_type(args: &CleaningTypeArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.cleaning_type {
        Some(ref choice) => {
            let raw = translate::to_raw(choice).to_owned();
            control::run(VacuumCommand::SetCleaningType(raw), global).await
        }
        None => {
            let setup = util::setup(global, true)?;
            let snapshot = setup.coordinator().request_refresh().await?;

            render(
                &SelectReport {
                    options: views::cleaning_type_options(&snapshot),
                    current: views::current_cleaning_type(&snapshot),
                },
                global,
            );
            Ok(())
        }
    }
}
