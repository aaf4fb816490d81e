use chrono::{Local, NaiveDateTime, Utc};

/// Wall-clock source injected into every store operation that needs the
/// current time (creation timestamps, TTL eviction, submit-time checks).
pub trait Clock {
    /// Current instant as epoch milliseconds.
    fn now_ms(&self) -> i64;

    /// Current local wall-clock time, for comparing against user-entered
    /// date/time values.
    fn now_local(&self) -> NaiveDateTime;
}

/// The real clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }

    fn now_local(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Frozen clock for tests.
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

#[cfg(test)]
impl Clock for FixedClock {
    fn now_ms(&self) -> i64 {
        self.0
    }

    fn now_local(&self) -> NaiveDateTime {
        chrono::DateTime::from_timestamp_millis(self.0)
            .expect("valid test timestamp")
            .naive_utc()
    }
}
