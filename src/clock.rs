//! Wall-clock time source
//!
//! Session records carry wall-clock timestamps. The clock is injectable so
//! callers (and tests) can pin the times that end up on the wire.

use chrono::{DateTime, Utc};

/// Source of wall-clock timestamps.
pub trait Clock {
    /// Current time.
    fn now(&self) -> DateTime<Utc>;

    /// Current time as fractional seconds since the Unix epoch.
    fn now_secs(&self) -> f64 {
        unix_secs(self.now())
    }
}

/// The system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Fractional seconds since the Unix epoch, microsecond precision.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn unix_secs(time: DateTime<Utc>) -> f64 {
    time.timestamp_micros() as f64 / 1_000_000.0
}
