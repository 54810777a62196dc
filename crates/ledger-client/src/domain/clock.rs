//! Wall-clock time for payload timestamps.

/// Milliseconds since the Unix epoch, or 0 before it.
pub(crate) fn now_ms() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
}
