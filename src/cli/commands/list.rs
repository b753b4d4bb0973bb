//! List command implementation.

use crate::config::{ConfigError, WheelConfig};
use crate::dataset::{DataLoadError, RestaurantDataset};

/// Result type for list command operations.
pub type ListCommandResult = Result<(), ListCommandError>;

/// Error type for list command operations.
#[derive(Debug, thiserror::Error)]
pub enum ListCommandError {
    /// The config file could not be loaded.
    #[error("Config error: {0}")]
    ConfigError(#[from] ConfigError),

    /// The restaurant dataset could not be loaded.
    #[error("{0}")]
    DataLoadError(#[from] DataLoadError),
}

/// Print the restaurants on the wheel, in wheel order.
pub fn list() -> ListCommandResult {
    let config = WheelConfig::load(None)?;
    let dataset = RestaurantDataset::from_config(&config.dataset)?;

    if dataset.is_empty() {
        println!("\x1b[33mNo restaurants on the wheel.\x1b[0m");
        return Ok(());
    }

    for (i, restaurant) in dataset.restaurants.iter().enumerate() {
        println!(
            "{:>3}. \x1b[1m{}\x1b[0m \x1b[2m{} · {:.1}★\x1b[0m",
            i + 1,
            restaurant.name,
            restaurant.cuisine,
            restaurant.rating
        );
        if !restaurant.discount.is_empty() {
            println!("     \x1b[32m{}\x1b[0m", restaurant.discount);
        }
    }
    Ok(())
}
