//! Time related utils.

use chrono::Utc;

/// DateTime is the alias for `chrono::DateTime<Utc>`.
pub type DateTime = chrono::DateTime<Utc>;

/// Create datetime of now.
pub fn now() -> DateTime {
    Utc::now()
}

/// Unix seconds of `time` reduced modulo 2^32.
///
/// Times before the epoch wrap around the same way.
pub fn unix_seconds_u32(time: DateTime) -> u32 {
    time.timestamp().rem_euclid(1 << 32) as u32
}
