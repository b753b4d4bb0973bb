//! dinewheel - a once-a-day restaurant wheel.
//!
//! This is the main entry point for the dinewheel CLI tool.

use clap::Parser;
use dinewheel::cli::{Cli, Commands, ConfigCommands, SpinCommand};
use dinewheel::config::WheelConfig;
use dinewheel::logging;

fn main() {
    let cli = Cli::parse();

    let _log_guard = if cli.writes_logs() {
        // A broken config is reported by the command itself
        let config = WheelConfig::load(None).unwrap_or_default();
        logging::init(&config.logging)
    } else {
        None
    };

    match cli.command {
        // No subcommand: open the wheel
        None => SpinCommand::default().execute(),
        Some(cmd) => match cmd {
            Commands::Spin(c) => c.execute(),
            Commands::Status(c) => c.execute(),
            Commands::Reset(c) => c.execute(),
            Commands::List(c) => c.execute(),
            Commands::Config(subcmd) => match subcmd {
                ConfigCommands::Show(c) => c.execute(),
                ConfigCommands::Get(c) => c.execute(),
                ConfigCommands::Set(c) => c.execute(),
                ConfigCommands::Reset(c) => c.execute(),
                ConfigCommands::Explain(c) => c.execute(),
                ConfigCommands::Keys(c) => c.execute(),
            },
            Commands::Completions(c) => c.execute(),
        },
    }
}
