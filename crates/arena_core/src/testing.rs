//! Test doubles for the injected ports. Compiled into the library so both
//! unit tests and the `tests/` integration suite can share them.

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::Mutex;

use crate::clock::Clock;
use crate::scheduler::{LifecycleJob, SchedulerPort};

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now: Mutex::new(now) }
    }

    /// Fixed baseline used across the test suite.
    pub fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().expect("clock lock poisoned") = now;
    }

    pub fn advance(&self, delta: Duration) {
        let mut now = self.now.lock().expect("clock lock poisoned");
        *now += delta;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock poisoned")
    }
}

/// A scheduler that records what would have been enqueued instead of
/// deferring anything; tests fire the jobs themselves.
#[derive(Debug, Default)]
pub struct RecordingScheduler {
    scheduled: Mutex<Vec<(LifecycleJob, DateTime<Utc>)>>,
}

impl RecordingScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scheduled(&self) -> Vec<(LifecycleJob, DateTime<Utc>)> {
        self.scheduled.lock().expect("scheduler lock poisoned").clone()
    }
}

impl SchedulerPort for RecordingScheduler {
    fn schedule(&self, job: LifecycleJob, at: DateTime<Utc>) {
        self.scheduled
            .lock()
            .expect("scheduler lock poisoned")
            .push((job, at));
    }
}
