//! Unix timestamp helpers.

use chrono::{TimeDelta, Utc};

/// Current time as Unix seconds.
pub fn now_timestamp() -> i64 {
    Utc::now().timestamp()
}

/// Unix seconds `delta` from now. Negative deltas land in the past.
///
/// Saturates at `i64::MIN`/`i64::MAX` instead of overflowing.
pub fn timestamp_in(delta: TimeDelta) -> i64 {
    now_timestamp().saturating_add(delta.num_seconds())
}
