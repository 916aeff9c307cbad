// Clock Port
//
// Queue `created_at` and entry `joined_at` are epoch-millisecond
// stamps assigned by the repository, and join order is derived from
// them. Injecting the clock lets repository tests pin those stamps.

/// Source of epoch-millisecond timestamps.
pub trait TimeProvider: Send + Sync {
    /// Current time in milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;
}

/// Wall clock, used in production wiring.
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}
