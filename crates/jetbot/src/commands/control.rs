//! Motion command handlers (start/stop/pause/dock).

use owo_colors::OwoColorize;

use jetbot_core::{CommandDispatcher, VacuumCommand, views::VacuumView};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util;

/// Dispatch one command, then refresh to converge the read path.
pub async fn run(command: VacuumCommand, global: &GlobalOpts) -> Result<(), CliError> {
    let setup = util::setup(global, true)?;
    let dispatcher = CommandDispatcher::new(setup.client.clone(), setup.config.device_id.clone());

    dispatcher.dispatch(&command).await?;

    // The dispatcher never refreshes on its own; converge here.
    let coordinator = setup.coordinator();
    let snapshot = coordinator.request_refresh().await?;
    let view = VacuumView::new(&snapshot, None);

    let line = format!(
        "{} {} (state: {})",
        "✓".green(),
        describe(&command),
        view.operating_state()
    );
    output::print_output(&line, global.quiet);
    Ok(())
}

fn describe(command: &VacuumCommand) -> &'static str {
    match command {
        VacuumCommand::Start => "started cleaning",
        VacuumCommand::Stop => "stopped cleaning",
        VacuumCommand::Pause => "paused",
        VacuumCommand::ReturnToHome => "returning to dock",
        VacuumCommand::SetCleaningMode(_) => "cleaning mode set",
        VacuumCommand::SetCleaningType(_) => "cleaning type set",
    }
}
