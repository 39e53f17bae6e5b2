//! Clap derive structures for the `jetbot` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// jetbot -- control Samsung Jet Bot vacuums from the command line
#[derive(Debug, Parser)]
#[command(
    name = "jetbot",
    version,
    about = "Manage Samsung Jet Bot robot vacuums via the SmartThings cloud API",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Device profile to use
    #[arg(long, short = 'p', env = "JETBOT_PROFILE", global = true)]
    pub profile: Option<String>,

    /// SmartThings device id (overrides profile)
    #[arg(long, short = 'd', env = "JETBOT_DEVICE", global = true)]
    pub device: Option<String>,

    /// Personal access token
    #[arg(long, env = "JETBOT_TOKEN", global = true, hide_env = true)]
    pub token: Option<String>,

    /// API base URL
    #[arg(long, env = "JETBOT_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "JETBOT_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table
    Table,
    /// Pretty-printed JSON
    Json,
    /// Single-line JSON
    JsonCompact,
    /// One identifier per line
    Plain,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List robot cleaner devices on the account
    Devices,

    /// Show the vacuum's current status
    Status,

    /// Poll status continuously and print updates
    Watch(WatchArgs),

    /// Start cleaning
    Start,

    /// Stop cleaning
    Stop,

    /// Pause cleaning
    Pause,

    /// Send the vacuum back to its dock
    Dock,

    /// Show or set the cleaning mode
    Mode(ModeArgs),

    /// Show or set the cleaning type (vacuum / mop / both)
    CleaningType(CleaningTypeArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Poll interval (e.g. "30s", "2m")
    #[arg(long, default_value = "30s", value_parser = humantime::parse_duration)]
    pub interval: Duration,
}

#[derive(Debug, Args)]
pub struct ModeArgs {
    /// Mode to set; omit to list the supported modes
    pub mode: Option<String>,
}

#[derive(Debug, Args)]
pub struct CleaningTypeArgs {
    /// Cleaning type, raw ("mopAfterVacuum") or display name
    /// ("Vacuum Then Mop"); omit to list the options
    pub cleaning_type: Option<String>,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file path
    Path,

    /// Write a starter config file
    Init(ConfigInitArgs),
}

#[derive(Debug, Args)]
pub struct ConfigInitArgs {
    /// Device id for the default profile
    #[arg(long)]
    pub device: Option<String>,

    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}
