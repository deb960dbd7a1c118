//! Wall-clock helpers.

use std::time::{SystemTime, UNIX_EPOCH};

/// Current time as **milliseconds** since Unix epoch.
#[inline]
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()

}

/// Milliseconds elapsed between `earlier_ms` and now, saturating at zero.
#[inline]
pub fn age_ms(earlier_ms: u64) -> u64 {
    now_ms().saturating_sub(earlier_ms)
}
