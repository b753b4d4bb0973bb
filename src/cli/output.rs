//! Output handlers for dinewheel.
//!
//! Clipboard and map launching for the share and map actions, plus the
//! console presenter used by headless spins.

use crate::dataset::{map_url, Restaurant};
use crate::gate::{format_remaining, LockState};
use crate::presenter::Presenter;
use crate::wheel::WheelItem;

/// Error type for output operations.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    /// Failed to copy content to the system clipboard.
    #[error("Failed to copy to clipboard: {0}")]
    ClipboardError(String),
    /// Failed to hand a map link to the system.
    #[error("Failed to open map: {0}")]
    MapError(#[from] std::io::Error),
}

/// Put `text` on the system clipboard without printing anything.
pub fn set_clipboard(text: &str) -> Result<(), OutputError> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| OutputError::ClipboardError(e.to_string()))?;
    clipboard
        .set_text(text.to_string())
        .map_err(|e| OutputError::ClipboardError(e.to_string()))
}

/// Copy text to system clipboard.
///
/// If clipboard access fails, falls back to stdout and returns an error.
pub fn copy_to_clipboard(text: &str) -> Result<(), OutputError> {
    match set_clipboard(text) {
        Ok(()) => {
            println!("\x1b[32mShare text copied to clipboard!\x1b[0m");
            println!("\x1b[2m({} characters)\x1b[0m", text.len());
            Ok(())
        }
        Err(e) => {
            eprintln!("\x1b[31m{e}\x1b[0m");
            eprintln!("\x1b[2mFalling back to stdout...\x1b[0m");
            print_to_stdout(text);
            Err(e)
        }
    }
}

/// Open a map centred on a coordinate in the default browser.
pub fn open_map(latitude: f64, longitude: f64) -> Result<(), OutputError> {
    open::that(map_url(latitude, longitude))?;
    Ok(())
}

/// Print text to stdout.
pub fn print_to_stdout(text: &str) {
    println!("{text}");
}

/// Presenter that prints to the terminal, for spins without the wheel screen.
#[derive(Debug, Clone, Default)]
pub struct ConsolePresenter {
    /// Open the map and copy share text for real. When off, the link and the
    /// text are printed instead.
    pub launch: bool,
}

impl ConsolePresenter {
    /// Create a console presenter.
    pub fn new(launch: bool) -> Self {
        Self { launch }
    }
}

impl Presenter for ConsolePresenter {
    fn display_wheel(&mut self, items: &[WheelItem]) {
        if items.is_empty() {
            println!("\x1b[33mNo restaurants on the wheel.\x1b[0m");
        } else {
            println!("\x1b[2m{} restaurants on the wheel\x1b[0m", items.len());
        }
    }

    fn display_winner(&mut self, restaurant: &Restaurant) {
        println!();
        println!("\x1b[1;32m★ {}\x1b[0m", restaurant.name);
        if !restaurant.cuisine.is_empty() {
            println!(
                "  \x1b[2mCuisine:\x1b[0m  {} ({:.1}★)",
                restaurant.cuisine, restaurant.rating
            );
        }
        if !restaurant.address.is_empty() {
            println!("  \x1b[2mAddress:\x1b[0m  {}", restaurant.address);
        }
        if !restaurant.open_until.is_empty() {
            println!("  \x1b[2mOpen until:\x1b[0m {}", restaurant.open_until);
        }
        if !restaurant.discount.is_empty() {
            println!("  \x1b[2mDeal:\x1b[0m     \x1b[32m{}\x1b[0m", restaurant.discount);
        }
    }

    fn display_spin_locked(&mut self, state: &LockState, remaining_secs: u64) {
        println!(
            "\x1b[31m{}\x1b[0m \x1b[2m({} left)\x1b[0m",
            state.message(),
            format_remaining(remaining_secs)
        );
    }

    fn display_discount_code(&mut self, code: &str) {
        println!("  \x1b[2mCode:\x1b[0m     \x1b[1;35m{code}\x1b[0m");
    }

    fn open_external_map(&mut self, latitude: f64, longitude: f64, name: &str) {
        let url = map_url(latitude, longitude);
        if self.launch {
            if let Err(e) = open_map(latitude, longitude) {
                eprintln!("\x1b[31m{e}\x1b[0m");
            } else {
                println!("\x1b[32mOpened {name} on the map.\x1b[0m");
                return;
            }
        }
        println!("\x1b[2mMap:\x1b[0m {url}");
    }

    fn share_text(&mut self, text: &str) {
        if self.launch {
            // Falls back to printing on its own
            let _ = copy_to_clipboard(text);
        } else {
            print_to_stdout(text);
        }
    }
}
