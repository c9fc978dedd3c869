//! Time abstraction for testable rendering.
//!
//! Reports without a usable timestamp are stamped with the current time;
//! going through a `Clock` lets tests pin that value.

use std::time::SystemTime;

use chrono::{DateTime, Utc};

/// Clock abstraction for wall-clock reads.
///
/// Production code uses `RealClock`, tests can inject a fixed clock.
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// Returns the current system time.
    fn now_system(&self) -> SystemTime;

    /// Returns the current time as a UTC timestamp.
    fn now_utc(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from(self.now_system())
    }
}

/// Real clock implementation using system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealClock;

impl RealClock {
    /// Creates a new real clock instance.
    pub fn new() -> Self {
        Self
    }
}

impl Clock for RealClock {
    fn now_system(&self) -> SystemTime {
        SystemTime::now()
    }
}
