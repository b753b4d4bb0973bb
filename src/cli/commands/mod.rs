//! Command implementations for the dinewheel CLI.
//!
//! This module contains the actual implementations of CLI commands,
//! separated from the argument parsing definitions in cli/mod.rs.

pub mod completions;
pub mod config;
pub mod list;
pub mod reset;
pub mod spin;
pub mod status;
