//! Time utilities: calendar-day math and timezone-aware midnight deadlines.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::CoreError;

/// Signed number of calendar days from `from` to `to` (positive when `to` is
/// later).
pub fn day_diff(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Parse a `YYYY-MM-DD` calendar date. Garbage is fatal, not zeroed.
pub fn parse_calendar_date(s: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| CoreError::invalid(format!("bad calendar date '{s}': {e}")))
}

/// Resolve an IANA timezone name like "America/Chicago".
pub fn parse_timezone(tz: &str) -> Result<Tz, CoreError> {
    tz.parse()
        .map_err(|_| CoreError::invalid(format!("invalid timezone: {tz}")))
}

/// The agent-local calendar date at instant `now_utc`.
pub fn local_date(now_utc: DateTime<Utc>, tz: Tz) -> NaiveDate {
    now_utc.with_timezone(&tz).date_naive()
}

/// The next local midnight strictly after `now_utc`, as a UTC instant.
///
/// This is the streak-loss deadline. DST shifts can make the local day longer
/// or shorter than 24h; we resolve the ambiguous/skipped case by walking
/// forward hour-by-hour from the nominal midnight.
pub fn next_local_midnight(now_utc: DateTime<Utc>, tz: Tz) -> DateTime<Utc> {
    let local = now_utc.with_timezone(&tz);
    let tomorrow = local.date_naive() + Duration::days(1);
    let mut candidate = tomorrow.and_time(NaiveTime::MIN);

    loop {
        match tz.from_local_datetime(&candidate).earliest() {
            Some(dt) => return dt.with_timezone(&Utc),
            // Skipped by a DST jump; try the next hour of the same local day.
            None => candidate += Duration::hours(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone as _;

    #[test]
    fn test_day_diff() {
        let a = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let b = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(day_diff(a, b), 4);
        assert_eq!(day_diff(b, a), -4);
    }

    #[test]
    fn test_parse_calendar_date_fatal_on_garbage() {
        assert!(parse_calendar_date("2024-02-29").is_ok());
        let err = parse_calendar_date("not-a-date").unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }

    #[test]
    fn test_next_midnight_chicago() {
        // Feb is CST (UTC-6): local midnight Feb 21 = 06:00 UTC.
        let tz: Tz = "America/Chicago".parse().unwrap();
        let now = Utc.with_ymd_and_hms(2026, 2, 20, 20, 0, 0).unwrap();
        let deadline = next_local_midnight(now, tz);
        assert_eq!(deadline, Utc.with_ymd_and_hms(2026, 2, 21, 6, 0, 0).unwrap());
    }

    #[test]
    fn test_local_date_crosses_utc_day() {
        // 02:00 UTC is still the previous day in Chicago.
        let tz: Tz = "America/Chicago".parse().unwrap();
        let now = Utc.with_ymd_and_hms(2026, 2, 21, 2, 0, 0).unwrap();
        assert_eq!(local_date(now, tz), NaiveDate::from_ymd_opt(2026, 2, 20).unwrap());
    }
}
