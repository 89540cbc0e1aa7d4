use chrono::{DateTime, Utc};

/// Time source for phase derivation and cooldown expiry.
///
/// The engine never reads the wall clock directly; tests drive the lifecycle
/// with [`crate::testing::ManualClock`].
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
