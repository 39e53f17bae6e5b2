//! Command handlers.

pub mod config_cmd;
pub mod control;
pub mod devices;
pub mod select;
pub mod status;
pub mod util;

use jetbot_core::VacuumCommand;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Route a parsed command to its handler.
pub async fn dispatch(command: Command, global: &GlobalOpts) -> Result<(), CliError> {
    tracing::debug!(command = ?command, "dispatching command");

    match command {
        Command::Devices => devices::list(global).await,
        Command::Status => status::show(global).await,
        Command::Watch(args) => status::watch(&args, global).await,
        Command::Start => control::run(VacuumCommand::Start, global).await,
        Command::Stop => control::run(VacuumCommand::Stop, global).await,
        Command::Pause => control::run(VacuumCommand::Pause, global).await,
        Command::Dock => control::run(VacuumCommand::ReturnToHome, global).await,
        Command::Mode(args) => select::mode(&args, global).await,
        Command::CleaningType(args) => select::cleaning_type(&args, global).await,
        // No API client needed.
        Command::Config(args) => config_cmd::handle(&args, global),
    }
}
