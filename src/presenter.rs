//! Outbound presentation events.
//!
//! The session never draws anything itself. It reports what should be shown
//! through a [`Presenter`], which the terminal UI, the headless console and
//! the tests each implement.

use crate::dataset::Restaurant;
use crate::gate::LockState;
use crate::wheel::WheelItem;

/// Receiver of everything the session wants shown to the user.
pub trait Presenter {
    /// The items on the wheel changed.
    fn display_wheel(&mut self, items: &[WheelItem]);

    /// A spin finished on `restaurant`.
    fn display_winner(&mut self, restaurant: &Restaurant);

    /// Spinning is locked, with `remaining_secs` left on the countdown.
    fn display_spin_locked(&mut self, state: &LockState, remaining_secs: u64);

    /// Spinning is allowed again.
    fn display_unlocked(&mut self) {}

    /// A discount code was drawn for the winner.
    fn display_discount_code(&mut self, code: &str);

    /// Show a location on an external map.
    fn open_external_map(&mut self, latitude: f64, longitude: f64, name: &str);

    /// Hand text to the platform's share mechanism.
    fn share_text(&mut self, text: &str);
}

/// One call received by a [`RecordingPresenter`].
#[derive(Debug, Clone, PartialEq)]
pub enum PresenterEvent {
    /// `display_wheel` with the item labels.
    Wheel(Vec<String>),
    /// `display_winner` with the restaurant name.
    Winner(String),
    /// `display_spin_locked`.
    Locked(LockState, u64),
    /// `display_unlocked`.
    Unlocked,
    /// `display_discount_code`.
    DiscountCode(String),
    /// `open_external_map`.
    Map {
        /// Latitude in degrees.
        latitude: f64,
        /// Longitude in degrees.
        longitude: f64,
        /// Place name.
        name: String,
    },
    /// `share_text`.
    Share(String),
}

/// Presenter that records every call, for tests and scripted runs.
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    /// Calls in the order they were made.
    pub events: Vec<PresenterEvent>,
}

impl RecordingPresenter {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Winners displayed so far.
    pub fn winners(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                PresenterEvent::Winner(name) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Discount codes displayed so far.
    pub fn codes(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                PresenterEvent::DiscountCode(code) => Some(code.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Most recent event.
    pub fn last(&self) -> Option<&PresenterEvent> {
        self.events.last()
    }

    /// Forget recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Presenter for RecordingPresenter {
    fn display_wheel(&mut self, items: &[WheelItem]) {
        self.events.push(PresenterEvent::Wheel(
            items.iter().map(|i| i.label.clone()).collect(),
        ));
    }

    fn display_winner(&mut self, restaurant: &Restaurant) {
        self.events.push(PresenterEvent::Winner(restaurant.name.clone()));
    }

    fn display_spin_locked(&mut self, state: &LockState, remaining_secs: u64) {
        self.events.push(PresenterEvent::Locked(*state, remaining_secs));
    }

    fn display_unlocked(&mut self) {
        self.events.push(PresenterEvent::Unlocked);
    }

    fn display_discount_code(&mut self, code: &str) {
        self.events.push(PresenterEvent::DiscountCode(code.into()));
    }

    fn open_external_map(&mut self, latitude: f64, longitude: f64, name: &str) {
        self.events.push(PresenterEvent::Map {
            latitude,
            longitude,
            name: name.into(),
        });
    }

    fn share_text(&mut self, text: &str) {
        self.events.push(PresenterEvent::Share(text.into()));
    }
}
