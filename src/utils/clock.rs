use chrono::{DateTime, Utc};

/// Time source for every expiry comparison in the credential lifecycle.
///
/// Injectable so token and recovery-code expiry can be exercised against a
/// simulated clock in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
