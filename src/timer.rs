use std::time::Duration;
use std::time::Instant;

/// Shortest allowed time between two generations, in milliseconds.
pub const MIN_INTERVAL_MS: u64 = 10;

/// Longest allowed time between two generations (one day), so deadlines never overflow.
pub const MAX_INTERVAL_MS: u64 = 24 * 60 * 60 * 1000;

/// Time between two generations, within [`MIN_INTERVAL_MS`] and [`MAX_INTERVAL_MS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Interval(Duration);

impl Interval {
    pub const MIN: Interval = Interval(Duration::from_millis(MIN_INTERVAL_MS));

    pub fn from_millis(ms: u64) -> Self {
        Self(Duration::from_millis(ms.clamp(MIN_INTERVAL_MS, MAX_INTERVAL_MS)))
    }

    /// Round a fractional millisecond count up, then clamp it.
    ///
    /// `NaN` and negative values end up at the minimum.
    pub fn from_millis_f64(ms: f64) -> Self {
        let ms = ms.ceil();

        if ms.is_nan() || ms < MIN_INTERVAL_MS as f64 {
            Self::MIN
        } else {
            // saturating float to int cast
            Self::from_millis(ms as u64)
        }
    }

    pub fn as_millis(&self) -> u64 {
        self.0.as_millis() as u64
    }

    pub fn as_duration(&self) -> Duration {
        self.0
    }
}

/// A repeating deadline.
///
/// Nothing fires on its own: the owner asks whether the timer is [`due`](Timer::due) and calls
/// [`fire`](Timer::fire) to schedule the next deadline.
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    interval: Interval,
    next: Instant,
}

impl Timer {
    /// Start a timer whose first deadline is one `interval` after `now`.
    pub fn start(interval: Interval, now: Instant) -> Self {
        Self {
            interval,
            next: now + interval.as_duration(),
        }
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub fn deadline(&self) -> Instant {
        self.next
    }

    pub fn due(&self, now: Instant) -> bool {
        now >= self.next
    }

    /// Move the deadline one interval past `now`.
    ///
    /// Ticks missed while the owner was busy are dropped rather than replayed.
    pub fn fire(&mut self, now: Instant) {
        self.next = now + self.interval.as_duration();
    }

    /// How long until the next deadline, zero if it already passed.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.next.saturating_duration_since(now)
    }
}
