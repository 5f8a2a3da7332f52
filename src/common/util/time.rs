use chrono::{Duration, Utc};

/// Current time as Unix epoch seconds. Document timestamps (`createdAt`,
/// `updatedAt`) use this resolution.
#[inline]
pub fn epoch_seconds() -> i64 {
    Utc::now().timestamp()
}

/// Current time as Unix epoch milliseconds. Id generation uses this
/// resolution.
#[inline]
pub fn epoch_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Epoch seconds a number of days from now. Negative values reach into the
/// past. Handy for building time-window filters:
///
/// ```text
/// let recent = Filter::new().gte("createdAt", epoch_seconds_after_days(-7));
/// ```
#[inline]
pub fn epoch_seconds_after_days(days: i64) -> i64 {
    (Utc::now() + Duration::days(days)).timestamp()
}
