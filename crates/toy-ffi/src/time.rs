//! Clock entry points.
//!
//! Calendar queries read the local time zone; month and day are 1-based.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Datelike, Local, TimeZone};

/// Milliseconds since the Unix epoch (negative before it).
pub fn ms_since_unix_epoch(now: SystemTime) -> i64 {
    match now.duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_millis() as i64,
        Err(e) => -(e.duration().as_millis() as i64),
    }
}

/// `(year, month, day)` of `now` in its own time zone.
pub fn calendar_date<Tz: TimeZone>(now: &DateTime<Tz>) -> (i64, i64, i64) {
    (
        i64::from(now.year()),
        i64::from(now.month()),
        i64::from(now.day()),
    )
}

/// Wall-clock milliseconds since the Unix epoch.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn toy_time_ms_since_unix_epoch() -> i64 {
    ms_since_unix_epoch(SystemTime::now())
}

/// Current local year, e.g. 2024.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn toy_time_current_year() -> i64 {
    calendar_date(&Local::now()).0
}

/// Current local month, 1 (January) to 12.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn toy_time_current_month() -> i64 {
    calendar_date(&Local::now()).1
}

/// Current local day of the month, 1 to 31.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn toy_time_current_day() -> i64 {
    calendar_date(&Local::now()).2
}

/// Sleep for `ms` milliseconds. Non-positive durations return at once.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn toy_time_sleep(ms: i64) {
    if ms > 0 {
        std::thread::sleep(Duration::from_millis(ms as u64));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn epoch_offsets() {
        assert_eq!(ms_since_unix_epoch(UNIX_EPOCH), 0);
        let later = UNIX_EPOCH + Duration::from_millis(1_500);
        assert_eq!(ms_since_unix_epoch(later), 1_500);
        let earlier = UNIX_EPOCH - Duration::from_millis(20);
        assert_eq!(ms_since_unix_epoch(earlier), -20);
    }

    #[test]
    fn calendar_fields_are_one_based() {
        let jan_first = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(calendar_date(&jan_first), (2024, 1, 1));
        let leap_day = Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap();
        assert_eq!(calendar_date(&leap_day), (2024, 2, 29));
    }

    #[test]
    fn calendar_follows_the_zone_offset() {
        let instant = Utc.with_ymd_and_hms(2023, 12, 31, 23, 30, 0).unwrap();
        assert_eq!(calendar_date(&instant), (2023, 12, 31));
        let ahead = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(calendar_date(&instant.with_timezone(&ahead)), (2024, 1, 1));
    }

    #[test]
    fn current_date_is_in_range() {
        let month = toy_time_current_month();
        let day = toy_time_current_day();
        assert!(toy_time_current_year() >= 2024);
        assert!((1..=12).contains(&month));
        assert!((1..=31).contains(&day));
    }

    #[test]
    fn sleep_ignores_negative() {
        toy_time_sleep(-5);
        toy_time_sleep(0);
    }
}
