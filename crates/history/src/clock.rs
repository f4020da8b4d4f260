use chrono::Utc;

/// Source of the current wall-clock time in epoch milliseconds.
///
/// The history operations take their notion of "now" from this seam so
/// tests can drive rotation with a virtual clock instead of sleeping.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> i64;
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}
