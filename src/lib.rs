//! dinewheel - a once-a-day restaurant wheel.
//!
//! Spin a wheel of restaurants, land on one at random and get a discount
//! code for it. The wheel can be spun once per local calendar day, inside
//! a configurable window of hours.
//!
//! The pieces, from the bottom up:
//! - [`wheel`]: segment geometry, winner selection and spin animation.
//! - [`gate`]: whether a spin is allowed right now, and the persisted
//!   record of the last spin.
//! - [`dataset`]: the restaurants on the wheel.
//! - [`session`]: one wheel screen, tying the above together and reporting
//!   through a [`presenter::Presenter`].
//! - [`tui`] and [`cli`]: the terminal front ends.

#![deny(missing_docs)]

/// Version string from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod config;
pub mod dataset;
pub mod gate;
pub mod logging;
pub mod presenter;
pub mod session;
pub mod tui;
pub mod wheel;

// Re-export key types for convenience
pub use dataset::{Restaurant, RestaurantDataset};
pub use session::{SessionOptions, SpinError, SpinSession};
pub use wheel::{SpinOutcome, WheelItem};
