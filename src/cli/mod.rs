//! CLI commands and argument handling.
//!
//! This module contains the clap CLI definitions and command implementations.

pub mod commands;
pub mod output;

use std::io::{self, Write};

use clap::{Args, Parser, Subcommand};

/// Spin the restaurant wheel once a day.
///
/// Picks a restaurant at random, shows a discount code for it, and locks the
/// wheel until tomorrow.
#[derive(Parser, Debug)]
#[command(name = "dinewheel")]
#[command(author, version = crate::VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Command to run. Defaults to opening the wheel.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Whether this invocation touches the wheel and so should write logs.
    ///
    /// Listing, config and completions stay read-only on disk.
    pub fn writes_logs(&self) -> bool {
        matches!(
            self.command,
            None | Some(Commands::Spin(_) | Commands::Status(_) | Commands::Reset(_))
        )
    }
}

/// Top-level commands for dinewheel.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Spin the wheel.
    ///
    /// Opens the wheel screen. With --headless, spins straight away and
    /// prints the winner.
    ///
    /// Examples:
    ///   dinewheel spin                 # Open the wheel screen
    ///   dinewheel spin --headless      # Spin and print the result
    ///   dinewheel spin --headless -m   # ...then open the winner on a map
    Spin(SpinCommand),

    /// Show whether the wheel can be spun and when it unlocks.
    Status(StatusCommand),

    /// Clear today's spin so the wheel can be spun again.
    Reset(ResetCommand),

    /// List the restaurants on the wheel.
    List(ListCommand),

    /// Manage configuration.
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions.
    Completions(CompletionsCommand),
}

/// Arguments for 'spin' command.
#[derive(Args, Debug, Default)]
pub struct SpinCommand {
    /// Spin without the wheel screen and print the result.
    #[arg(long)]
    pub headless: bool,

    /// Seed the random source for a reproducible spin.
    #[arg(long, env = "DINEWHEEL_SEED")]
    pub seed: Option<u64>,

    /// Open the winner on a map (headless only).
    #[arg(short = 'm', long, requires = "headless")]
    pub map: bool,

    /// Copy the share text to the clipboard (headless only).
    #[arg(short = 's', long, requires = "headless")]
    pub share: bool,
}

/// Arguments for 'status' command.
#[derive(Args, Debug)]
pub struct StatusCommand {}

/// Arguments for 'reset' command.
#[derive(Args, Debug)]
pub struct ResetCommand {
    /// Skip confirmation prompt.
    #[arg(short = 'y', long)]
    pub yes: bool,
}

/// Arguments for 'list' command.
#[derive(Args, Debug)]
pub struct ListCommand {}

/// Subcommands for config management.
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show all configuration values.
    ///
    /// Displays all config sections and their current values.
    Show(ConfigShowCommand),

    /// Get a specific config value.
    ///
    /// Use dot notation for nested keys (e.g., window.end_hour).
    Get(ConfigGetCommand),

    /// Set a config value.
    ///
    /// Use dot notation for keys. Values are validated before saving.
    Set(ConfigSetCommand),

    /// Reset config to defaults.
    ///
    /// Can reset a specific key, a section, or all config.
    Reset(ConfigResetCommand),

    /// Show documentation for config keys.
    ///
    /// Displays description, type, default value, and examples.
    Explain(ConfigExplainCommand),

    /// List all valid config keys.
    Keys(ConfigKeysCommand),
}

/// Arguments for 'config show' command.
#[derive(Args, Debug)]
pub struct ConfigShowCommand {
    /// Filter to a specific section (e.g., 'window', 'animation').
    #[arg(short = 's', long)]
    pub section: Option<String>,
}

/// Arguments for 'config get' command.
#[derive(Args, Debug)]
pub struct ConfigGetCommand {
    /// Config key in dot notation (e.g., window.end_hour).
    pub key: String,
}

/// Arguments for 'config set' command.
#[derive(Args, Debug)]
pub struct ConfigSetCommand {
    /// Config key in dot notation (e.g., window.end_hour).
    pub key: String,

    /// Value to set.
    pub value: String,
}

/// Arguments for 'config reset' command.
#[derive(Args, Debug)]
pub struct ConfigResetCommand {
    /// Key or section to reset. If omitted, resets all config.
    pub key: Option<String>,

    /// Skip confirmation prompt.
    #[arg(short = 'y', long)]
    pub yes: bool,
}

/// Arguments for 'config explain' command.
#[derive(Args, Debug)]
pub struct ConfigExplainCommand {
    /// Config key to explain. If omitted, lists all keys with brief descriptions.
    pub key: Option<String>,
}

/// Arguments for 'config keys' command.
#[derive(Args, Debug)]
pub struct ConfigKeysCommand {}

/// Arguments for 'completions' command.
#[derive(Args, Debug)]
pub struct CompletionsCommand {
    /// Shell to generate completions for.
    #[arg(value_parser = ["bash", "zsh", "fish"])]
    pub shell: String,
}

// ============================================================================
// Command implementations
// ============================================================================

/// Ask a yes/no question on stdin. Anything but "n" or "no" is a yes.
fn confirm(question: &str) -> bool {
    print!("{question} [Y/n]: ");
    let _ = io::stdout().flush();

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_ok() {
        let input = input.trim().to_lowercase();
        if input == "n" || input == "no" {
            return false;
        }
    }
    true
}

impl SpinCommand {
    /// Execute the spin command.
    pub fn execute(&self) {
        let options = commands::spin::SpinOptions {
            headless: self.headless,
            seed: self.seed,
            map: self.map,
            share: self.share,
        };
        if let Err(e) = commands::spin::spin(&options) {
            eprintln!("\x1b[31mError:\x1b[0m {e}");
            std::process::exit(1);
        }
    }
}

impl StatusCommand {
    /// Execute the status command.
    pub fn execute(&self) {
        if let Err(e) = commands::status::status() {
            eprintln!("\x1b[31mError:\x1b[0m {e}");
            std::process::exit(1);
        }
    }
}

impl ResetCommand {
    /// Execute the reset command.
    pub fn execute(&self) {
        if !self.yes && !confirm("Clear today's spin?") {
            println!("Cancelled.");
            return;
        }

        if let Err(e) = commands::reset::reset() {
            eprintln!("\x1b[31mError:\x1b[0m {e}");
            std::process::exit(1);
        }
    }
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(&self) {
        if let Err(e) = commands::list::list() {
            eprintln!("\x1b[31mError:\x1b[0m {e}");
            std::process::exit(1);
        }
    }
}

impl ConfigShowCommand {
    /// Execute the config show command.
    pub fn execute(&self) {
        match commands::config::config_show(self.section.as_deref()) {
            Ok(()) => {}
            Err(e) => {
                eprintln!("\x1b[31mError:\x1b[0m {e}");
                std::process::exit(1);
            }
        }
    }
}

impl ConfigGetCommand {
    /// Execute the config get command.
    pub fn execute(&self) {
        match commands::config::config_get(&self.key) {
            Ok(()) => {}
            Err(e) => {
                eprintln!("\x1b[31mError:\x1b[0m {e}");
                std::process::exit(1);
            }
        }
    }
}

impl ConfigSetCommand {
    /// Execute the config set command.
    pub fn execute(&self) {
        match commands::config::config_set(&self.key, &self.value) {
            Ok(()) => {}
            Err(e) => {
                eprintln!("\x1b[31mError:\x1b[0m {e}");
                std::process::exit(1);
            }
        }
    }
}

impl ConfigResetCommand {
    /// Execute the config reset command.
    pub fn execute(&self) {
        // Confirm unless --yes (for resetting all)
        if self.key.is_none() && !self.yes && !confirm("Reset all config to defaults?") {
            println!("Cancelled.");
            return;
        }

        match commands::config::config_reset(self.key.as_deref()) {
            Ok(()) => {}
            Err(e) => {
                eprintln!("\x1b[31mError:\x1b[0m {e}");
                std::process::exit(1);
            }
        }
    }
}

impl ConfigExplainCommand {
    /// Execute the config explain command.
    pub fn execute(&self) {
        match commands::config::config_explain(self.key.as_deref()) {
            Ok(()) => {}
            Err(e) => {
                eprintln!("\x1b[31mError:\x1b[0m {e}");
                std::process::exit(1);
            }
        }
    }
}

impl ConfigKeysCommand {
    /// Execute the config keys command.
    pub fn execute(&self) {
        match commands::config::config_keys() {
            Ok(()) => {}
            Err(e) => {
                eprintln!("\x1b[31mError:\x1b[0m {e}");
                std::process::exit(1);
            }
        }
    }
}

impl CompletionsCommand {
    /// Execute the completions command - generates shell completions.
    pub fn execute(&self) {
        if let Err(e) = commands::completions::completions(&self.shell) {
            eprintln!("\x1b[31mError:\x1b[0m {e}");
            std::process::exit(1);
        }
    }
}
