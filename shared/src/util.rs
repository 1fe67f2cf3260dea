/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Milliseconds elapsed since `started_at` (as returned by [`now_millis`]).
///
/// Clamped to zero so a clock adjustment mid-run never yields a negative duration.
pub fn elapsed_millis(started_at: i64) -> u64 {
    (now_millis() - started_at).max(0) as u64
}
