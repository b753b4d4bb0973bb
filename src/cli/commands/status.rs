//! Status command implementation.
//!
//! This module implements the `dinewheel status` command for showing
//! whether the wheel can be spun right now.

use crate::config::{ConfigError, WheelConfig};
use crate::dataset::RestaurantDataset;
use crate::gate::{format_remaining, local_now, EligibilityGate, JsonFileStore, TimeWindow};

/// Result type for status command operations.
pub type StatusCommandResult = Result<(), StatusCommandError>;

/// Error type for status command operations.
#[derive(Debug, thiserror::Error)]
pub enum StatusCommandError {
    /// The config file could not be loaded.
    #[error("Config error: {0}")]
    ConfigError(#[from] ConfigError),
}

/// Execute the status command.
pub fn status() -> StatusCommandResult {
    let config = WheelConfig::load(None)?;
    let now = local_now();
    let gate = EligibilityGate::open(
        TimeWindow::from(&config.window),
        JsonFileStore::default(),
        now,
    );
    let state = gate.state();

    println!("\x1b[1m=== dinewheel status ===\x1b[0m");
    println!();

    println!("\x1b[1mWheel\x1b[0m");
    if state.is_locked() {
        println!("  State:     \x1b[31m{state}\x1b[0m");
    } else {
        println!("  State:     \x1b[32m{state}\x1b[0m");
    }
    if let (Some(until), Some(remaining)) = (state.unlocks_at(), state.remaining(now)) {
        println!(
            "  Unlocks:   {} \x1b[2m(in {})\x1b[0m",
            until.format("%Y-%m-%d %H:%M"),
            format_remaining(remaining.num_seconds().max(0) as u64)
        );
    }
    println!("  Window:    {}", gate.window());
    match gate.last_spin_date() {
        Some(date) => println!("  Last spin: {date}"),
        None => println!("  Last spin: \x1b[2mnever\x1b[0m"),
    }
    println!();

    println!("\x1b[1mRestaurants\x1b[0m");
    let source = config.dataset.path.as_deref().unwrap_or("bundled");
    match RestaurantDataset::from_config(&config.dataset) {
        Ok(dataset) => println!("  {} on the wheel \x1b[2m({source})\x1b[0m", dataset.len()),
        Err(e) => println!("  \x1b[33m{e}\x1b[0m"),
    }

    Ok(())
}
