//! Rotation animation for the wheel.
//!
//! The controller is driven cooperatively: the owner calls
//! [`WheelAnimationController::advance`] with the time elapsed since the last
//! frame and receives an [`AnimationEvent`] describing what to draw. A spin
//! that runs to the end yields exactly one [`AnimationEvent::Completed`].

use std::f64::consts::TAU;
use std::time::Duration;

use super::geometry::normalize_angle;
use super::{InvalidState, SpinOutcome};

/// Default length of a spin animation.
pub const DEFAULT_SPIN_DURATION: Duration = Duration::from_millis(3500);

/// Ease-out curve that decelerates into the stop: `1 - (1 - t)^4`.
///
/// `t` is clamped to `[0, 1]`.
pub fn ease_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(4)
}

/// Orientation the wheel rests at once `outcome` has played out.
///
/// Depends on nothing but the outcome, so redrawing a finished spin always
/// shows the same winner.
pub fn resting_orientation(outcome: &SpinOutcome) -> f64 {
    normalize_angle(outcome.rotation_radians)
}

/// Identifies one started spin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationHandle(u64);

impl AnimationHandle {
    /// Sequence number of the spin, starting at 1.
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// What the wheel looks like after a call to `advance`.
#[derive(Debug, Clone, PartialEq)]
pub enum AnimationEvent {
    /// No spin in flight; the wheel is resting at `angle`.
    Idle {
        /// Current resting orientation in radians.
        angle: f64,
    },
    /// A spin is in flight.
    Frame {
        /// Spin being animated.
        handle: AnimationHandle,
        /// Current rotation in radians.
        angle: f64,
        /// Time progress through the spin, in `[0, 1)`.
        progress: f64,
    },
    /// The spin reached its final orientation. Emitted once per spin.
    Completed {
        /// Spin that finished.
        handle: AnimationHandle,
        /// Final resting orientation in radians.
        angle: f64,
        /// The outcome the spin played out.
        outcome: SpinOutcome,
    },
}

#[derive(Debug, Clone)]
struct ActiveSpin {
    handle: AnimationHandle,
    outcome: SpinOutcome,
    from: f64,
    to: f64,
    elapsed: Duration,
}

impl ActiveSpin {
    fn progress(&self, duration: Duration) -> f64 {
        if duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / duration.as_secs_f64()).min(1.0)
    }

    fn angle_at(&self, progress: f64) -> f64 {
        self.from + (self.to - self.from) * ease_out(progress)
    }
}

/// Plays a [`SpinOutcome`] back as a decelerating rotation.
///
/// Only one spin can be in flight per controller.
#[derive(Debug, Clone)]
pub struct WheelAnimationController {
    duration: Duration,
    orientation: f64,
    active: Option<ActiveSpin>,
    next_handle: u64,
}

impl Default for WheelAnimationController {
    fn default() -> Self {
        Self::new(DEFAULT_SPIN_DURATION)
    }
}

impl WheelAnimationController {
    /// Create an idle controller resting at orientation zero.
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            orientation: 0.0,
            active: None,
            next_handle: 1,
        }
    }

    /// Length of one spin.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Whether a spin is currently in flight.
    pub fn is_spinning(&self) -> bool {
        self.active.is_some()
    }

    /// Handle of the spin in flight, if any.
    pub fn active_handle(&self) -> Option<AnimationHandle> {
        self.active.as_ref().map(|a| a.handle)
    }

    /// Current orientation of the wheel in radians.
    pub fn orientation(&self) -> f64 {
        self.orientation
    }

    /// Start animating towards `outcome`.
    ///
    /// Fails without touching the wheel if the outcome has no segments or a
    /// spin is already in flight.
    pub fn start_spin(&mut self, outcome: SpinOutcome) -> Result<AnimationHandle, InvalidState> {
        if outcome.segment_count == 0 {
            return Err(InvalidState::EmptyWheel);
        }
        if self.active.is_some() {
            return Err(InvalidState::SpinInFlight);
        }

        let from = normalize_angle(self.orientation);
        let mut to = outcome.rotation_radians;
        if !to.is_finite() {
            to = resting_orientation(&outcome);
        }
        // Always travel forward at least one full turn; whole turns keep
        // the final orientation unchanged.
        if to < from + TAU {
            to = from + TAU + normalize_angle(to - from);
        }

        let handle = AnimationHandle(self.next_handle);
        self.next_handle += 1;
        self.orientation = from;
        self.active = Some(ActiveSpin {
            handle,
            outcome,
            from,
            to,
            elapsed: Duration::ZERO,
        });
        Ok(handle)
    }

    /// Advance the animation by `dt` and report the resulting frame.
    pub fn advance(&mut self, dt: Duration) -> AnimationEvent {
        let Some(active) = self.active.as_mut() else {
            return AnimationEvent::Idle {
                angle: self.orientation,
            };
        };

        active.elapsed = active.elapsed.saturating_add(dt);
        let progress = active.progress(self.duration);

        if progress >= 1.0 {
            let finished = self.active.take();
            return match finished {
                Some(spin) => {
                    let angle = resting_orientation(&spin.outcome);
                    self.orientation = angle;
                    AnimationEvent::Completed {
                        handle: spin.handle,
                        angle,
                        outcome: spin.outcome,
                    }
                }
                None => AnimationEvent::Idle {
                    angle: self.orientation,
                },
            };
        }

        let angle = active.angle_at(progress);
        let handle = active.handle;
        self.orientation = angle;
        AnimationEvent::Frame {
            handle,
            angle,
            progress,
        }
    }

    /// Abandon the spin in flight without a completion event.
    ///
    /// The wheel stays where it was. Returns the cancelled handle.
    pub fn cancel(&mut self) -> Option<AnimationHandle> {
        let cancelled = self.active.take().map(|a| a.handle);
        self.orientation = normalize_angle(self.orientation);
        cancelled
    }

    /// Show a finished outcome without animating, e.g. after a resize.
    ///
    /// Ignored while a spin is in flight.
    pub fn rest_on(&mut self, outcome: &SpinOutcome) -> f64 {
        if self.active.is_none() {
            self.orientation = resting_orientation(outcome);
        }
        self.orientation
    }
}
