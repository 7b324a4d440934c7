//! Wall-clock measurement helpers.
//!
//! Every check reports its own elapsed time; these helpers keep the
//! conversion in one place.

use std::time::{Duration, Instant};

/// Milliseconds elapsed since `start`.
pub fn elapsed_ms(start: Instant) -> u64 {
    duration_ms(start.elapsed())
}

/// Converts a `Duration` to whole milliseconds, saturating on overflow.
pub fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
