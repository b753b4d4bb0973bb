//! Terminal wheel screen.
//!
//! Draws the wheel with the pointer at the top, a list of the restaurants on
//! it, the lock countdown and the winner card. The session reports to the
//! screen through a [`ChannelPresenter`].

mod app;
mod ui;

pub use app::{channel, ChannelPresenter, TuiApp, TuiEvent, TuiState};
