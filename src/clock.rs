//! Time source abstraction

use chrono::{DateTime, Utc};

/// Source of the current time
///
/// The model resolver reads time only through this trait so cache expiry can
/// be driven by tests.
pub trait Clock: Send + Sync {
    /// Current wall-clock time
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
