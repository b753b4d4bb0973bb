//! Spin session orchestration.
//!
//! [`SpinSession`] ties the pieces together for one wheel screen: the gate
//! says whether a spin is allowed, the selector decides the winner, the
//! animation controller plays it back, and the presenter is told about
//! everything worth showing.
//!
//! The session is driven cooperatively. The owner calls
//! [`SpinSession::tick`] every frame and [`SpinSession::tick_second`] once a
//! second; nothing runs in the background.

pub mod reward;

use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{info, warn};

use crate::config::{SelectionStrategy, WheelConfig};
use crate::dataset::{wheel_items, Restaurant};
use crate::gate::{
    CountdownTick, EligibilityGate, LockCountdown, LockState, SpinRecordStore, StoreError,
};
use crate::presenter::Presenter;
use crate::wheel::{
    AnimationEvent, AnimationHandle, InvalidState, RandomSelector, SpinOutcome,
    WheelAnimationController, WheelItem,
};

pub use reward::RewardCodes;

/// Why a spin request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SpinError {
    /// The gate does not allow spinning right now.
    #[error("{0}")]
    Locked(LockState),
    /// The wheel is empty or already spinning.
    #[error(transparent)]
    InvalidState(#[from] InvalidState),
}

/// Settings a session is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    /// Winner selection strategy.
    pub strategy: SelectionStrategy,
    /// Fewest extra full turns per spin.
    pub min_turns: u32,
    /// Most extra full turns per spin.
    pub max_turns: u32,
    /// Length of one spin.
    pub spin_duration: Duration,
    /// Discount codes to draw from.
    pub reward_codes: Vec<String>,
    /// Fixed seed for reproducible spins.
    pub seed: Option<u64>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self::from_config(&WheelConfig::default(), None)
    }
}

impl SessionOptions {
    /// Options taken from the config, with an optional fixed seed.
    pub fn from_config(config: &WheelConfig, seed: Option<u64>) -> Self {
        Self {
            strategy: config.selection.strategy,
            min_turns: config.animation.min_turns,
            max_turns: config.animation.max_turns,
            spin_duration: config.animation.spin_duration(),
            reward_codes: config.rewards.codes.clone(),
            seed,
        }
    }
}

/// One wheel screen's worth of state.
pub struct SpinSession<S, P> {
    restaurants: Vec<Restaurant>,
    items: Vec<WheelItem>,
    selector: RandomSelector,
    animation: WheelAnimationController,
    gate: EligibilityGate<S>,
    countdown: LockCountdown,
    rewards: RewardCodes,
    presenter: P,
    pending_winner: Option<Restaurant>,
    last_outcome: Option<SpinOutcome>,
    winner: Option<Restaurant>,
    discount_code: Option<String>,
}

impl<S: SpinRecordStore, P: Presenter> SpinSession<S, P> {
    /// Start a session showing `restaurants`, and report the initial wheel
    /// and lock state to the presenter.
    pub fn new(
        restaurants: Vec<Restaurant>,
        gate: EligibilityGate<S>,
        presenter: P,
        options: SessionOptions,
        now: NaiveDateTime,
    ) -> Self {
        let selector = match options.seed {
            Some(seed) => RandomSelector::seeded(
                seed,
                options.strategy,
                options.min_turns,
                options.max_turns,
            ),
            None => {
                RandomSelector::from_os_rng(options.strategy, options.min_turns, options.max_turns)
            }
        };
        let rewards = match options.seed {
            Some(seed) => RewardCodes::seeded(options.reward_codes, seed),
            None => RewardCodes::new(options.reward_codes),
        };

        let mut session = Self {
            items: wheel_items(&restaurants),
            restaurants,
            selector,
            animation: WheelAnimationController::new(options.spin_duration),
            gate,
            countdown: LockCountdown::new(),
            rewards,
            presenter,
            pending_winner: None,
            last_outcome: None,
            winner: None,
            discount_code: None,
        };
        session.presenter.display_wheel(&session.items);
        session.refresh(now);
        session
    }

    /// Replace the restaurants on the wheel.
    ///
    /// A spin already in flight still lands on the restaurant chosen when it
    /// started.
    pub fn set_items(&mut self, restaurants: Vec<Restaurant>) {
        self.items = wheel_items(&restaurants);
        self.restaurants = restaurants;
        self.presenter.display_wheel(&self.items);
    }

    /// Re-evaluate the gate from the wall clock, e.g. when the screen comes
    /// back to the foreground, and show the result.
    pub fn refresh(&mut self, now: NaiveDateTime) -> LockState {
        let state = self.gate.evaluate(now);
        self.show_lock_state(state, now);
        state
    }

    fn show_lock_state(&mut self, state: LockState, now: NaiveDateTime) {
        match state.unlocks_at() {
            Some(until) => {
                self.countdown.start(until);
                let remaining = state
                    .remaining(now)
                    .map(|d| d.num_seconds().max(0) as u64)
                    .unwrap_or(0);
                self.presenter.display_spin_locked(&state, remaining);
            }
            None => {
                self.countdown.stop();
                self.presenter.display_unlocked();
            }
        }
    }

    /// Ask for a spin at `now`.
    ///
    /// On success the day's spin is used up immediately, even if the
    /// animation is later cancelled.
    pub fn request_spin(&mut self, now: NaiveDateTime) -> Result<AnimationHandle, SpinError> {
        let state = self.gate.evaluate(now);
        if state.is_locked() {
            info!(?state, "Spin refused, wheel is locked");
            self.show_lock_state(state, now);
            return Err(SpinError::Locked(state));
        }
        if self.animation.is_spinning() {
            return Err(InvalidState::SpinInFlight.into());
        }

        let outcome = self.selector.select(&self.items)?;
        let winner = self
            .restaurants
            .get(outcome.selected_index)
            .cloned()
            .ok_or(InvalidState::EmptyWheel)?;
        let handle = self.animation.start_spin(outcome)?;

        if let Err(e) = self.gate.record_spin(now) {
            warn!(error = %e, "Could not persist spin record");
        }

        info!(
            handle = handle.id(),
            winner = %winner.name,
            strategy = %self.selector.strategy(),
            "Spin started"
        );
        self.pending_winner = Some(winner);
        self.winner = None;
        self.discount_code = None;
        Ok(handle)
    }

    /// Advance the animation by `dt`.
    ///
    /// When the spin completes, the winner and a discount code are shown and
    /// the gate is re-evaluated at `now`.
    pub fn tick(&mut self, now: NaiveDateTime, dt: Duration) -> AnimationEvent {
        let event = self.animation.advance(dt);
        if let AnimationEvent::Completed { outcome, .. } = &event {
            self.complete_spin(outcome.clone(), now);
        }
        event
    }

    fn complete_spin(&mut self, outcome: SpinOutcome, now: NaiveDateTime) {
        self.last_outcome = Some(outcome);
        if let Some(winner) = self.pending_winner.take() {
            info!(winner = %winner.name, "Spin completed");
            self.presenter.display_winner(&winner);
            self.discount_code = self.rewards.draw();
            if let Some(code) = &self.discount_code {
                self.presenter.display_discount_code(code);
            }
            self.winner = Some(winner);
        }
        self.refresh(now);
    }

    /// Once-a-second update: counts down while locked, and catches the
    /// window closing (or a reset outside it) while unlocked.
    pub fn tick_second(&mut self, now: NaiveDateTime) -> CountdownTick {
        let tick = self.countdown.tick(now);
        match tick {
            CountdownTick::Remaining(secs) => {
                let state = self.gate.state();
                self.presenter.display_spin_locked(&state, secs);
            }
            CountdownTick::Expired => {
                // The wall clock decides, the countdown only prompts a check
                self.refresh(now);
            }
            CountdownTick::Stopped => {
                let shown = self.gate.state();
                let state = self.gate.evaluate(now);
                if state != shown {
                    self.show_lock_state(state, now);
                }
            }
        }
        tick
    }

    /// Abandon the spin in flight. The spin stays used up.
    pub fn cancel_spin(&mut self) -> Option<AnimationHandle> {
        let cancelled = self.animation.cancel();
        if let Some(handle) = cancelled {
            info!(handle = handle.id(), "Spin cancelled");
            self.pending_winner = None;
        }
        cancelled
    }

    /// Clear the spin record and unlock.
    ///
    /// The session is unlocked afterwards even if the record could not be
    /// removed from storage.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        let result = self.gate.reset();
        if let Err(e) = &result {
            warn!(error = %e, "Could not clear spin record");
        }
        self.countdown.stop();
        self.winner = None;
        self.discount_code = None;
        self.presenter.display_unlocked();
        result
    }

    /// Show the last winner on a map. Returns `false` if there is no winner.
    pub fn open_winner_map(&mut self) -> bool {
        match &self.winner {
            Some(winner) => {
                self.presenter
                    .open_external_map(winner.latitude, winner.longitude, &winner.name);
                true
            }
            None => false,
        }
    }

    /// Share the last winner. Returns `false` if there is no winner.
    pub fn share_winner(&mut self) -> bool {
        match &self.winner {
            Some(winner) => {
                let text = winner.share_text(self.discount_code.as_deref());
                self.presenter.share_text(&text);
                true
            }
            None => false,
        }
    }

    /// Current lock state.
    pub fn lock_state(&self) -> LockState {
        self.gate.state()
    }

    /// Day of the last recorded spin.
    pub fn last_spin_date(&self) -> Option<NaiveDate> {
        self.gate.last_spin_date()
    }

    /// Whether a spin is animating.
    pub fn is_spinning(&self) -> bool {
        self.animation.is_spinning()
    }

    /// Current wheel orientation in radians.
    pub fn orientation(&self) -> f64 {
        self.animation.orientation()
    }

    /// Items on the wheel.
    pub fn items(&self) -> &[WheelItem] {
        &self.items
    }

    /// Restaurants on the wheel.
    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    /// Winner of the last completed spin.
    pub fn winner(&self) -> Option<&Restaurant> {
        self.winner.as_ref()
    }

    /// Discount code drawn for the last winner.
    pub fn discount_code(&self) -> Option<&str> {
        self.discount_code.as_deref()
    }

    /// Outcome of the last completed spin.
    pub fn last_outcome(&self) -> Option<&SpinOutcome> {
        self.last_outcome.as_ref()
    }

    /// The lock countdown.
    pub fn countdown(&self) -> &LockCountdown {
        &self.countdown
    }

    /// The eligibility gate.
    pub fn gate(&self) -> &EligibilityGate<S> {
        &self.gate
    }

    /// The presenter.
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// The presenter, mutably.
    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }
}
