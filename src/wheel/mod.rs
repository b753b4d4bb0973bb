//! The spinning wheel: segment geometry, winner selection and the rotation
//! animation.
//!
//! Selection and animation are deliberately separate. [`RandomSelector`]
//! decides the outcome (index and final rotation) before anything moves, and
//! [`WheelAnimationController`] only plays that outcome back over time.

pub mod animation;
pub mod geometry;
pub mod selector;

pub use animation::{
    ease_out, resting_orientation, AnimationEvent, AnimationHandle, WheelAnimationController,
    DEFAULT_SPIN_DURATION,
};
pub use selector::RandomSelector;

use serde::{Deserialize, Serialize};

/// One labelled segment of the wheel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WheelItem {
    /// Position of the segment, starting at the wheel's zero mark.
    pub index: usize,
    /// Text drawn on the segment.
    pub label: String,
}

impl WheelItem {
    /// Create a new wheel item.
    pub fn new(index: usize, label: impl Into<String>) -> Self {
        Self {
            index,
            label: label.into(),
        }
    }
}

/// Build wheel items from labels, indexing them in order.
pub fn items_from_labels<I, S>(labels: I) -> Vec<WheelItem>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    labels
        .into_iter()
        .enumerate()
        .map(|(index, label)| WheelItem::new(index, label))
        .collect()
}

/// The decided result of one spin.
///
/// Produced once per spin by the selector and never modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinOutcome {
    /// Index of the winning segment.
    pub selected_index: usize,
    /// The winning segment as it was when the spin started.
    pub selected_item: WheelItem,
    /// Absolute clockwise rotation at which the wheel comes to rest,
    /// including any extra full turns.
    pub rotation_radians: f64,
    /// Number of segments on the wheel when the spin started.
    pub segment_count: usize,
}

/// A spin request that cannot be honoured in the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidState {
    /// The wheel has no items to land on.
    #[error("Cannot spin an empty wheel")]
    EmptyWheel,
    /// Another spin is still animating.
    #[error("A spin is already in progress")]
    SpinInFlight,
}
