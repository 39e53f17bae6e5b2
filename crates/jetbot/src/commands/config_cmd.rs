//! Config command handlers (no API connection needed).

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }
        ConfigCommand::Init(ref init) => {
            let path = config::config_path();
            if path.exists() && !init.force {
                return Err(CliError::Validation {
                    field: "config".into(),
                    reason: format!("{} already exists (pass --force to overwrite)", path.display()),
                });
            }

            let mut cfg = config::Config::default();
            cfg.profiles.insert(
                "default".into(),
                config::Profile {
                    device_id: init.device.clone(),
                    ..config::Profile::default()
                },
            );
            config::save_config(&cfg)?;

            output::print_output(&format!("Wrote {}", path.display()), global.quiet);
            Ok(())
        }
    }
}
