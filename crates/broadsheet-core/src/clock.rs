//! Source of "now" for article timestamps and relative ages.

use chrono::{DateTime, Utc};

/// Supplies the instant stamped on published articles and used to describe
/// how long ago they were written. Tests pin it with a fixed instant.
pub trait Clock: Send + Sync {
    /// Current instant in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time, used by the server binary.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
