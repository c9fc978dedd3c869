//! Deterministic clock for rendering tests.

use std::{
    sync::{
        atomic::{AtomicI64, Ordering},
        Arc,
    },
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use chrono::{DateTime, TimeZone, Utc};
use relay_core::Clock;

/// Clock that reports a settable instant.
#[derive(Debug, Clone)]
pub struct TestClock {
    /// Milliseconds since UNIX_EPOCH
    millis: Arc<AtomicI64>,
}

impl TestClock {
    /// Creates a clock pinned to 2024-03-05 09:07:03 UTC.
    pub fn new() -> Self {
        Self::at(Utc.with_ymd_and_hms(2024, 3, 5, 9, 7, 3).single().unwrap_or_default())
    }

    /// Creates a clock pinned to `time`.
    pub fn at(time: DateTime<Utc>) -> Self {
        Self { millis: Arc::new(AtomicI64::new(time.timestamp_millis())) }
    }

    /// Moves the clock to `time`.
    pub fn set(&self, time: DateTime<Utc>) {
        self.millis.store(time.timestamp_millis(), Ordering::Release);
    }

    /// Advances the clock by `duration`.
    pub fn advance(&self, duration: Duration) {
        let delta = i64::try_from(duration.as_millis()).unwrap_or(i64::MAX);
        self.millis.fetch_add(delta, Ordering::AcqRel);
    }
}

impl Default for TestClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TestClock {
    fn now_system(&self) -> SystemTime {
        let millis = self.millis.load(Ordering::Acquire);
        let offset = Duration::from_millis(millis.unsigned_abs());
        if millis >= 0 {
            UNIX_EPOCH + offset
        } else {
            UNIX_EPOCH - offset
        }
    }
}
