//! Random winner selection.
//!
//! Two strategies are supported:
//!
//! - **Index-first** (default): draw the winning index uniformly, then build a
//!   rotation that rests that segment under the pointer.
//! - **Angle-first**: draw a total rotation, then read the winner off the
//!   pointer with [`geometry::index_under_pointer`].
//!
//! Both produce a [`SpinOutcome`] whose rotation and index always agree.

use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::SelectionStrategy;

use super::geometry;
use super::{InvalidState, SpinOutcome, WheelItem};

/// Fewest extra full turns a spin makes before settling.
pub const MIN_FULL_TURNS: u32 = 3;

/// Largest landing offset from the segment centre, as a fraction of the
/// segment width. Keeps index-first landings visibly inside the segment.
const LANDING_JITTER: f64 = 0.4;

/// Picks the winning segment and the rotation that shows it.
#[derive(Debug, Clone)]
pub struct RandomSelector<R = StdRng> {
    rng: R,
    strategy: SelectionStrategy,
    min_turns: u32,
    max_turns: u32,
}

impl RandomSelector<StdRng> {
    /// Create a selector seeded from the operating system.
    pub fn from_os_rng(strategy: SelectionStrategy, min_turns: u32, max_turns: u32) -> Self {
        Self::with_rng(StdRng::from_os_rng(), strategy, min_turns, max_turns)
    }

    /// Create a selector with a fixed seed, for reproducible spins.
    pub fn seeded(seed: u64, strategy: SelectionStrategy, min_turns: u32, max_turns: u32) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), strategy, min_turns, max_turns)
    }
}

impl<R: Rng> RandomSelector<R> {
    /// Create a selector over any random source.
    ///
    /// `min_turns` is raised to [`MIN_FULL_TURNS`] and `max_turns` to at
    /// least `min_turns`.
    pub fn with_rng(rng: R, strategy: SelectionStrategy, min_turns: u32, max_turns: u32) -> Self {
        let min_turns = min_turns.max(MIN_FULL_TURNS);
        let max_turns = max_turns.max(min_turns);
        Self {
            rng,
            strategy,
            min_turns,
            max_turns,
        }
    }

    /// The configured selection strategy.
    pub fn strategy(&self) -> SelectionStrategy {
        self.strategy
    }

    /// Range of extra full turns, inclusive.
    pub fn turns(&self) -> (u32, u32) {
        (self.min_turns, self.max_turns)
    }

    /// Draw only a winning index in `[0, item_count)`.
    ///
    /// Returns `None` when there is nothing to choose from.
    pub fn select_index(&mut self, item_count: usize) -> Option<usize> {
        if item_count == 0 {
            return None;
        }
        match self.strategy {
            SelectionStrategy::IndexFirst => Some(self.rng.random_range(0..item_count)),
            SelectionStrategy::AngleFirst => {
                let rotation = self.draw_total_rotation();
                geometry::index_under_pointer(rotation, item_count)
            }
        }
    }

    /// Decide a full spin outcome for the given items.
    ///
    /// The returned outcome carries a copy of the winning item, so later
    /// changes to `items` cannot alter it.
    pub fn select(&mut self, items: &[WheelItem]) -> Result<SpinOutcome, InvalidState> {
        let segment_count = items.len();
        if segment_count == 0 {
            return Err(InvalidState::EmptyWheel);
        }

        let (selected_index, rotation_radians) = match self.strategy {
            SelectionStrategy::IndexFirst => {
                let index = self.rng.random_range(0..segment_count);
                let jitter = self.rng.random_range(-LANDING_JITTER..=LANDING_JITTER);
                let turns = self.draw_turns();
                let rotation = f64::from(turns) * TAU
                    + geometry::resting_rotation(index, segment_count, jitter);
                (index, rotation)
            }
            SelectionStrategy::AngleFirst => {
                let rotation = self.draw_total_rotation();
                let index = geometry::index_under_pointer(rotation, segment_count)
                    .ok_or(InvalidState::EmptyWheel)?;
                (index, rotation)
            }
        };

        let selected_item = items
            .get(selected_index)
            .cloned()
            .ok_or(InvalidState::EmptyWheel)?;

        Ok(SpinOutcome {
            selected_index,
            selected_item,
            rotation_radians,
            segment_count,
        })
    }

    fn draw_turns(&mut self) -> u32 {
        self.rng.random_range(self.min_turns..=self.max_turns)
    }

    fn draw_total_rotation(&mut self) -> f64 {
        let turns = self.draw_turns();
        let offset = self.rng.random_range(0.0..TAU);
        f64::from(turns) * TAU + offset
    }
}
