//! Reset command implementation.
//!
//! Clears the spin record so the wheel can be spun again today.

use crate::config::{ConfigError, WheelConfig};
use crate::gate::{local_now, EligibilityGate, JsonFileStore, StoreError, TimeWindow};

/// Result type for reset command operations.
pub type ResetCommandResult = Result<(), ResetCommandError>;

/// Error type for reset command operations.
#[derive(Debug, thiserror::Error)]
pub enum ResetCommandError {
    /// The config file could not be loaded.
    #[error("Config error: {0}")]
    ConfigError(#[from] ConfigError),

    /// The spin record could not be removed.
    #[error("{0}")]
    StoreError(#[from] StoreError),
}

/// Execute the reset command.
pub fn reset() -> ResetCommandResult {
    let config = WheelConfig::load(None)?;
    let mut gate = EligibilityGate::open(
        TimeWindow::from(&config.window),
        JsonFileStore::default(),
        local_now(),
    );

    let last_spin = gate.last_spin_date();
    gate.reset()?;
    match last_spin {
        Some(date) => println!("\x1b[32m✓\x1b[0m Cleared spin from {date}"),
        None => println!("\x1b[2mNo spin recorded.\x1b[0m"),
    }
    Ok(())
}
