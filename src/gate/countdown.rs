//! Once-per-second countdown shown while spinning is locked.

use chrono::NaiveDateTime;

/// Result of one countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownTick {
    /// The countdown is not running.
    Stopped,
    /// Whole seconds left, rounded up.
    Remaining(u64),
    /// The unlock time has been reached. The countdown stops itself; the
    /// owner must re-evaluate the gate rather than assume it is unlocked.
    Expired,
}

/// Countdown towards a lock's unlock time.
///
/// The owner starts it when the screen shows a locked state and stops it
/// when the screen goes away.
#[derive(Debug, Clone, Default)]
pub struct LockCountdown {
    until: Option<NaiveDateTime>,
}

impl LockCountdown {
    /// Create a stopped countdown.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count down towards `until`, replacing any running target.
    pub fn start(&mut self, until: NaiveDateTime) {
        self.until = Some(until);
    }

    /// Stop counting.
    pub fn stop(&mut self) {
        self.until = None;
    }

    /// Whether the countdown is running.
    pub fn is_running(&self) -> bool {
        self.until.is_some()
    }

    /// Target time, if running.
    pub fn target(&self) -> Option<NaiveDateTime> {
        self.until
    }

    /// Advance to `now`.
    pub fn tick(&mut self, now: NaiveDateTime) -> CountdownTick {
        let Some(until) = self.until else {
            return CountdownTick::Stopped;
        };
        let remaining = until - now;
        let millis = remaining.num_milliseconds();
        if millis <= 0 {
            self.until = None;
            return CountdownTick::Expired;
        }
        let secs = (millis as u64).div_ceil(1000);
        CountdownTick::Remaining(secs)
    }
}

/// Format a number of seconds as `1h 2m 3s`, dropping leading zero units.
pub fn format_remaining(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m {secs}s")
    } else if minutes > 0 {
        format!("{minutes}m {secs}s")
    } else {
        format!("{secs}s")
    }
}
