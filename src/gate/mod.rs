//! Daily spin eligibility.
//!
//! A spin is allowed once per local calendar day, and only while the local
//! hour is inside the configured window. The rules are checked in order:
//!
//! 1. Already spun today: locked until the next local midnight.
//! 2. Outside the window: locked until the window next opens.
//! 3. Otherwise unlocked.
//!
//! [`evaluate`] is the pure rule; [`EligibilityGate`] adds the persisted
//! last spin date around it.

pub mod countdown;
pub mod store;

use std::fmt;

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use tracing::{debug, info, warn};

use crate::config::WindowConfig;

pub use countdown::{format_remaining, CountdownTick, LockCountdown};
pub use store::{JsonFileStore, MemoryStore, SpinRecord, SpinRecordStore, StoreError};

/// Current local wall-clock time.
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Half-open range of local hours `[start_hour, end_hour)` in which
/// spinning is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start_hour: u32,
    end_hour: u32,
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self::new(0, 10)
    }
}

impl From<&WindowConfig> for TimeWindow {
    fn from(config: &WindowConfig) -> Self {
        Self::new(config.start_hour, config.end_hour)
    }
}

impl TimeWindow {
    /// Create a window. `end_hour` is capped at 24 and `start_hour` at
    /// `end_hour`; equal hours give a window that never opens.
    pub fn new(start_hour: u32, end_hour: u32) -> Self {
        let end_hour = end_hour.min(24);
        let start_hour = start_hour.min(end_hour);
        Self {
            start_hour,
            end_hour,
        }
    }

    /// First hour inside the window.
    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }

    /// First hour after the window.
    pub fn end_hour(&self) -> u32 {
        self.end_hour
    }

    /// Whether `hour` falls inside the window.
    pub fn contains(&self, hour: u32) -> bool {
        self.start_hour <= hour && hour < self.end_hour
    }

    /// Next time at or after `now` at which the window opens.
    ///
    /// Today's opening if `now` is before it, otherwise tomorrow's.
    pub fn next_opening(&self, now: NaiveDateTime) -> NaiveDateTime {
        if now.hour() < self.start_hour {
            at_hour(now.date(), self.start_hour)
        } else {
            at_hour(next_day(now.date()), self.start_hour)
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00-{:02}:00", self.start_hour, self.end_hour)
    }
}

fn next_day(date: NaiveDate) -> NaiveDate {
    date.succ_opt().unwrap_or(NaiveDate::MAX)
}

fn at_hour(date: NaiveDate, hour: u32) -> NaiveDateTime {
    if hour >= 24 {
        return next_day(date).and_time(NaiveTime::MIN);
    }
    date.and_time(NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN))
}

/// Start of the local day after `now`.
pub fn next_midnight(now: NaiveDateTime) -> NaiveDateTime {
    next_day(now.date()).and_time(NaiveTime::MIN)
}

/// Whether spinning is currently allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    /// A spin may be requested.
    Unlocked,
    /// The local hour is outside the spin window.
    LockedForWindow {
        /// When the window next opens.
        until: NaiveDateTime,
    },
    /// Today's spin has been used.
    LockedAlreadySpun {
        /// Next local midnight.
        until: NaiveDateTime,
    },
}

impl LockState {
    /// Whether spinning is blocked.
    pub fn is_locked(&self) -> bool {
        !matches!(self, LockState::Unlocked)
    }

    /// When the lock lifts, if locked.
    pub fn unlocks_at(&self) -> Option<NaiveDateTime> {
        match self {
            LockState::Unlocked => None,
            LockState::LockedForWindow { until } | LockState::LockedAlreadySpun { until } => {
                Some(*until)
            }
        }
    }

    /// Time left until the lock lifts, never negative.
    pub fn remaining(&self, now: NaiveDateTime) -> Option<TimeDelta> {
        self.unlocks_at()
            .map(|until| (until - now).max(TimeDelta::zero()))
    }

    /// Human-readable reason for the state.
    pub fn message(&self) -> String {
        match self {
            LockState::Unlocked => "Ready to spin!".to_string(),
            LockState::LockedForWindow { until } => format!(
                "The wheel is closed. Spinning opens at {}.",
                until.format("%H:%M")
            ),
            LockState::LockedAlreadySpun { .. } => {
                "You've already spun today. Come back tomorrow!".to_string()
            }
        }
    }
}

impl fmt::Display for LockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Decide the lock state at `now`.
pub fn evaluate(
    window: &TimeWindow,
    last_spin_date: Option<NaiveDate>,
    now: NaiveDateTime,
) -> LockState {
    if last_spin_date == Some(now.date()) {
        return LockState::LockedAlreadySpun {
            until: next_midnight(now),
        };
    }
    if !window.contains(now.hour()) {
        return LockState::LockedForWindow {
            until: window.next_opening(now),
        };
    }
    LockState::Unlocked
}

/// Lock state machine backed by a persisted spin record.
///
/// The record is read once when the gate opens. After that the in-memory
/// date is authoritative, and writes go through to the store.
#[derive(Debug)]
pub struct EligibilityGate<S> {
    window: TimeWindow,
    store: S,
    last_spin_date: Option<NaiveDate>,
    state: LockState,
}

impl<S: SpinRecordStore> EligibilityGate<S> {
    /// Load the spin record and compute the initial state at `now`.
    ///
    /// An unreadable record is logged and treated as no record.
    pub fn open(window: TimeWindow, store: S, now: NaiveDateTime) -> Self {
        let last_spin_date = match store.load() {
            Ok(record) => record.map(|r| r.last_spin_date),
            Err(e) => {
                warn!(error = %e, "Could not read spin record, treating as never spun");
                None
            }
        };
        let state = evaluate(&window, last_spin_date, now);
        debug!(?state, ?last_spin_date, %window, "Gate opened");
        Self {
            window,
            store,
            last_spin_date,
            state,
        }
    }

    /// Re-evaluate from the wall clock and return the new state.
    pub fn evaluate(&mut self, now: NaiveDateTime) -> LockState {
        let state = evaluate(&self.window, self.last_spin_date, now);
        if state != self.state {
            debug!(from = ?self.state, to = ?state, "Lock state changed");
        }
        self.state = state;
        state
    }

    /// Last evaluated state.
    pub fn state(&self) -> LockState {
        self.state
    }

    /// The spin window.
    pub fn window(&self) -> TimeWindow {
        self.window
    }

    /// Day of the last recorded spin.
    pub fn last_spin_date(&self) -> Option<NaiveDate> {
        self.last_spin_date
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Record a spin on `now`'s day and lock until the next midnight.
    ///
    /// The gate locks even when persisting fails; the error is returned so
    /// the caller can report it.
    pub fn record_spin(&mut self, now: NaiveDateTime) -> Result<(), StoreError> {
        let today = now.date();
        self.last_spin_date = Some(today);
        self.state = evaluate(&self.window, self.last_spin_date, now);
        info!(date = %today, "Recorded spin");
        self.store.save(&SpinRecord {
            last_spin_date: today,
        })
    }

    /// Forget the last spin and unlock, regardless of the window.
    ///
    /// The gate unlocks even when clearing the store fails.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.last_spin_date = None;
        self.state = LockState::Unlocked;
        info!("Spin record reset");
        self.store.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
        day(d).and_hms_opt(h, m, 0).unwrap()
    }

    fn record(d: u32) -> SpinRecord {
        SpinRecord {
            last_spin_date: day(d),
        }
    }

    #[test]
    fn test_window_contains_is_half_open() {
        let window = TimeWindow::new(0, 10);
        assert!(window.contains(0));
        assert!(window.contains(9));
        assert!(!window.contains(10));
        assert!(!window.contains(23));
    }

    #[test]
    fn test_window_new_caps_hours() {
        let window = TimeWindow::new(30, 40);
        assert_eq!(window.end_hour(), 24);
        assert_eq!(window.start_hour(), 24);
        assert!(!window.contains(23));
    }

    #[test]
    fn test_unlocked_inside_window() {
        let window = TimeWindow::default();
        assert_eq!(evaluate(&window, None, at(1, 3, 0)), LockState::Unlocked);
        assert_eq!(evaluate(&window, None, at(1, 0, 0)), LockState::Unlocked);
        assert_eq!(evaluate(&window, None, at(1, 9, 59)), LockState::Unlocked);
    }

    #[test]
    fn test_locked_after_window_until_tomorrow_midnight() {
        let window = TimeWindow::default();
        for hour in [10, 15, 23] {
            assert_eq!(
                evaluate(&window, None, at(1, hour, 30)),
                LockState::LockedForWindow {
                    until: at(2, 0, 0)
                },
                "hour {hour}"
            );
        }
    }

    #[test]
    fn test_locked_before_window_until_today_opening() {
        let window = TimeWindow::new(11, 14);
        assert_eq!(
            evaluate(&window, None, at(1, 8, 0)),
            LockState::LockedForWindow {
                until: at(1, 11, 0)
            }
        );
        assert_eq!(
            evaluate(&window, None, at(1, 14, 0)),
            LockState::LockedForWindow {
                until: at(2, 11, 0)
            }
        );
    }

    #[test]
    fn test_already_spun_today_wins_over_window() {
        let window = TimeWindow::default();
        for hour in [0, 3, 10, 23] {
            assert_eq!(
                evaluate(&window, Some(day(1)), at(1, hour, 0)),
                LockState::LockedAlreadySpun {
                    until: at(2, 0, 0)
                }
            );
        }
    }

    #[test]
    fn test_yesterdays_spin_does_not_lock() {
        let window = TimeWindow::default();
        assert_eq!(
            evaluate(&window, Some(day(1)), at(2, 3, 0)),
            LockState::Unlocked
        );
    }

    #[test]
    fn test_midnight_lifts_already_spun() {
        let window = TimeWindow::default();
        let just_before = day(1).and_hms_opt(23, 59, 59).unwrap();
        assert!(evaluate(&window, Some(day(1)), just_before).is_locked());
        assert_eq!(
            evaluate(&window, Some(day(1)), at(2, 0, 0)),
            LockState::Unlocked
        );
    }

    #[test]
    fn test_full_day_window_rolls_to_next_midnight() {
        let window = TimeWindow::new(0, 24);
        assert_eq!(evaluate(&window, None, at(1, 23, 0)), LockState::Unlocked);
    }

    #[test]
    fn test_month_end_rollover() {
        let window = TimeWindow::default();
        let now = NaiveDate::from_ymd_opt(2024, 6, 30)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let expected = NaiveDate::from_ymd_opt(2024, 7, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(
            evaluate(&window, None, now),
            LockState::LockedForWindow { until: expected }
        );
    }

    #[test]
    fn test_lock_state_accessors() {
        let now = at(1, 22, 0);
        let locked = LockState::LockedForWindow {
            until: at(2, 0, 0),
        };
        assert!(locked.is_locked());
        assert_eq!(locked.unlocks_at(), Some(at(2, 0, 0)));
        assert_eq!(locked.remaining(now), Some(TimeDelta::hours(2)));
        assert_eq!(locked.remaining(at(2, 1, 0)), Some(TimeDelta::zero()));
        assert!(locked.message().contains("00:00"));

        assert!(!LockState::Unlocked.is_locked());
        assert_eq!(LockState::Unlocked.remaining(now), None);
    }

    #[test]
    fn test_lock_state_display_matches_message() {
        let state = LockState::LockedAlreadySpun {
            until: at(2, 0, 0),
        };
        assert_eq!(state.to_string(), state.message());
        assert!(state.to_string().contains("already spun"));
    }

    #[test]
    fn test_gate_open_reads_record() {
        let gate = EligibilityGate::open(
            TimeWindow::default(),
            MemoryStore::with_record(record(1)),
            at(1, 3, 0),
        );
        assert_eq!(gate.last_spin_date(), Some(day(1)));
        assert!(matches!(gate.state(), LockState::LockedAlreadySpun { .. }));
    }

    #[test]
    fn test_gate_record_spin_locks_and_persists() {
        let mut gate =
            EligibilityGate::open(TimeWindow::default(), MemoryStore::default(), at(1, 3, 0));
        assert_eq!(gate.state(), LockState::Unlocked);

        gate.record_spin(at(1, 3, 0)).unwrap();
        assert_eq!(
            gate.state(),
            LockState::LockedAlreadySpun {
                until: at(2, 0, 0)
            }
        );
        assert_eq!(gate.store().record(), Some(record(1)));
    }

    #[test]
    fn test_gate_record_spin_locks_when_store_fails() {
        let mut gate =
            EligibilityGate::open(TimeWindow::default(), MemoryStore::failing(), at(1, 3, 0));
        assert!(gate.record_spin(at(1, 3, 0)).is_err());
        assert!(gate.state().is_locked());
        assert!(gate.evaluate(at(1, 4, 0)).is_locked());
    }

    #[test]
    fn test_gate_reset_always_unlocks() {
        let mut gate = EligibilityGate::open(
            TimeWindow::default(),
            MemoryStore::with_record(record(1)),
            at(1, 22, 0),
        );
        assert!(gate.state().is_locked());

        gate.reset().unwrap();
        assert_eq!(gate.state(), LockState::Unlocked);
        assert!(gate.last_spin_date().is_none());
        assert!(gate.store().record().is_none());

        // Outside the window the next evaluation locks again
        assert!(matches!(
            gate.evaluate(at(1, 22, 0)),
            LockState::LockedForWindow { .. }
        ));
    }

    #[test]
    fn test_gate_reset_unlocks_when_store_fails() {
        let mut gate =
            EligibilityGate::open(TimeWindow::default(), MemoryStore::failing(), at(1, 3, 0));
        gate.record_spin(at(1, 3, 0)).ok();
        assert!(gate.reset().is_err());
        assert_eq!(gate.state(), LockState::Unlocked);
    }

    #[test]
    fn test_gate_with_file_store_survives_restart() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("spin_record.json");

        let mut gate = EligibilityGate::open(
            TimeWindow::default(),
            JsonFileStore::new(&path),
            at(1, 3, 0),
        );
        gate.record_spin(at(1, 3, 0)).unwrap();

        let reopened = EligibilityGate::open(
            TimeWindow::default(),
            JsonFileStore::new(&path),
            at(1, 5, 0),
        );
        assert!(matches!(
            reopened.state(),
            LockState::LockedAlreadySpun { .. }
        ));
    }

    #[test]
    fn test_gate_with_corrupt_record_opens_unlocked() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("spin_record.json");
        std::fs::write(&path, "garbage").unwrap();

        let gate = EligibilityGate::open(
            TimeWindow::default(),
            JsonFileStore::new(&path),
            at(1, 3, 0),
        );
        assert_eq!(gate.state(), LockState::Unlocked);
    }
}
