//! Time sources for lead-time comparisons.
//!
//! The calculator never reads the system clock itself. Callers hand it a
//! [`Clock`], and each operation reads it exactly once so every slot in a
//! result is judged against the same instant.

use chrono::{DateTime, Utc};

/// A source of the current instant.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the host clock. Production callers use this.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
