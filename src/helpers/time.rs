use chrono::{DateTime, Duration, Utc};
use tokio::time::Instant;

use crate::utils::constants::{REFRESH_THRESHOLD_MINUTES, SAFETY_MARGIN_MINUTES};

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

pub fn get_instant() -> Instant {
    Instant::now()
}

/// `issued_at + (expires_in / 60 - 5)` minutes.
///
/// Lifetimes of five minutes or less give an offset of zero or below, so the
/// token is already stale when it lands in the cache. This is kept as is.
/// Offsets outside chrono's range saturate to `MAX_UTC` / `MIN_UTC`.
pub fn valid_until(issued_at: DateTime<Utc>, expires_in_seconds: i64) -> DateTime<Utc> {
    let offset_minutes = expires_in_seconds / 60 - SAFETY_MARGIN_MINUTES;
    Duration::try_minutes(offset_minutes)
        .and_then(|offset| issued_at.checked_add_signed(offset))
        .unwrap_or(if offset_minutes > 0 { DateTime::<Utc>::MAX_UTC } else { DateTime::<Utc>::MIN_UTC })
}

/// Whole minutes between `now` and `valid_until`, truncated toward zero.
pub fn remaining_minutes(valid_until: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (valid_until - now).num_minutes()
}

pub fn is_expired_at(valid_until: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    remaining_minutes(valid_until, now) <= REFRESH_THRESHOLD_MINUTES
}

pub fn is_expired(valid_until: DateTime<Utc>) -> bool {
    is_expired_at(valid_until, now())
}
