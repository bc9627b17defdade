//! Gregorian date equations used to resolve rules into instants.
//!
//! Years are `i32`, epoch days and epoch milliseconds are `i64`, and months
//! are 1 based unless stated otherwise.

use crate::MS_PER_DAY;

// ==== Begin Date Equations ====

/// Mathematical leap year check for the proleptic Gregorian calendar.
pub const fn is_leap(y: i32) -> bool {
    (y % 4 == 0 && y % 100 != 0) || y % 400 == 0
}

/// Returns the epoch day number of January 1st of the given year.
pub const fn epoch_days_for_year(y: i32) -> i64 {
    let y = y as i64;
    365 * (y - 1970) + (y - 1969).div_euclid(4) - (y - 1901).div_euclid(100)
        + (y - 1601).div_euclid(400)
}

/// Days preceding the first of `month` (1 based) in a year.
pub(crate) const fn month_to_day(month: u8, leap: bool) -> u16 {
    let leap_day = leap as u16;
    match month {
        1 => 0,
        2 => 31,
        3 => 59 + leap_day,
        4 => 90 + leap_day,
        5 => 120 + leap_day,
        6 => 151 + leap_day,
        7 => 181 + leap_day,
        8 => 212 + leap_day,
        9 => 243 + leap_day,
        10 => 273 + leap_day,
        11 => 304 + leap_day,
        _ => 334 + leap_day,
    }
}

/// The number of days in `month` (1 based) of `year`.
pub const fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap(year) => 29,
        2 => 28,
        _ => 31,
    }
}

/// The number of days `month` (1 based) can have in any year.
pub(crate) const fn max_days_in_month(month: u8) -> u8 {
    match month {
        2 => 29,
        _ => days_in_month(1970, month),
    }
}

/// Calculates the epoch days of a Gregorian date.
pub const fn epoch_days_from_gregorian_date(year: i32, month: u8, day: u8) -> i64 {
    epoch_days_for_year(year) + month_to_day(month, is_leap(year)) as i64 + day as i64 - 1
}

/// Returns the Gregorian year containing `epoch_days`.
pub fn year_from_epoch_days(epoch_days: i64) -> i32 {
    // Estimate with the average year length, then correct the estimate.
    let mut year = 1970 + (epoch_days * 400).div_euclid(146_097);
    while epoch_days_for_year(year as i32) > epoch_days {
        year -= 1;
    }
    while epoch_days_for_year(year as i32 + 1) <= epoch_days {
        year += 1;
    }
    year as i32
}

/// Returns the year, month (1 based), and day of `epoch_days`.
pub fn ymd_from_epoch_days(epoch_days: i64) -> (i32, u8, u8) {
    let year = year_from_epoch_days(epoch_days);
    let day_of_year = (epoch_days - epoch_days_for_year(year)) as u16;
    let leap = is_leap(year);
    let mut month = 12;
    while month > 1 && month_to_day(month, leap) > day_of_year {
        month -= 1;
    }
    let day = (day_of_year - month_to_day(month, leap) + 1) as u8;
    (year, month, day)
}

/// Converts epoch milliseconds into epoch days.
pub const fn epoch_ms_to_epoch_days(ms: i64) -> i64 {
    ms.div_euclid(MS_PER_DAY)
}

/// Returns the milliseconds elapsed since the start of the day.
pub const fn epoch_ms_to_ms_in_day(ms: i64) -> i64 {
    ms.rem_euclid(MS_PER_DAY)
}

/// `EpochDaysToEpochMS`
pub const fn epoch_days_to_epoch_ms(day: i64, time: i64) -> i64 {
    day * MS_PER_DAY + time
}

/// Returns the Gregorian year containing `ms`.
pub fn year_from_epoch_ms(ms: i64) -> i32 {
    year_from_epoch_days(epoch_ms_to_epoch_days(ms))
}

/// Returns the year, month (1 based), and day of `ms`.
pub fn ymd_from_epoch_ms(ms: i64) -> (i32, u8, u8) {
    ymd_from_epoch_days(epoch_ms_to_epoch_days(ms))
}

// The weekday number for 1970-01-01, counting from Sunday = 0
const EPOCH_DAY_OF_WEEK_CONSTANT: i64 = 4;

/// Returns the day of week of `epoch_days`, Sunday = 1 through Saturday = 7.
pub const fn epoch_days_to_week_day(epoch_days: i64) -> u8 {
    (epoch_days + EPOCH_DAY_OF_WEEK_CONSTANT).rem_euclid(7) as u8 + 1
}

// ==== End Date Equations ====

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_years() {
        assert!(is_leap(2000));
        assert!(is_leap(2024));
        assert!(!is_leap(1900));
        assert!(!is_leap(2023));
        assert!(is_leap(-4));
        assert!(is_leap(0));
        assert!(!is_leap(-100));
    }

    #[test]
    fn epoch_days() {
        assert_eq!(epoch_days_for_year(1970), 0);
        assert_eq!(epoch_days_for_year(1971), 365);
        assert_eq!(epoch_days_for_year(1969), -365);
        assert_eq!(epoch_days_for_year(2000), 10_957);
        assert_eq!(epoch_days_from_gregorian_date(2024, 3, 10), 19_792);
        assert_eq!(epoch_days_from_gregorian_date(1980, 4, 27), 3_769);
        assert_eq!(epoch_days_from_gregorian_date(1969, 12, 31), -1);
    }

    #[test]
    fn days_to_ymd() {
        assert_eq!(ymd_from_epoch_days(0), (1970, 1, 1));
        assert_eq!(ymd_from_epoch_days(-1), (1969, 12, 31));
        assert_eq!(ymd_from_epoch_days(19_792), (2024, 3, 10));
        assert_eq!(ymd_from_epoch_days(11_016), (2000, 2, 29));
        assert_eq!(ymd_from_epoch_days(11_017), (2000, 3, 1));

        for days in [-800_000, -146_097, -1, 0, 59, 365, 10_957, 2_932_896] {
            let (y, m, d) = ymd_from_epoch_days(days);
            assert_eq!(epoch_days_from_gregorian_date(y, m, d), days);
        }
    }

    #[test]
    fn far_years() {
        let days = epoch_days_from_gregorian_date(1_000_000, 12, 31);
        assert_eq!(ymd_from_epoch_days(days), (1_000_000, 12, 31));
        let days = epoch_days_from_gregorian_date(-1_000_000, 1, 1);
        assert_eq!(ymd_from_epoch_days(days), (-1_000_000, 1, 1));
        assert!(year_from_epoch_ms(i64::MAX) > 1_000_000);
        assert!(year_from_epoch_ms(i64::MIN) < -1_000_000);
    }

    #[test]
    fn week_days() {
        // 1970-01-01 was a Thursday
        assert_eq!(epoch_days_to_week_day(0), 5);
        // 2024-03-10 was a Sunday
        assert_eq!(epoch_days_to_week_day(19_792), 1);
        // 1969-12-31 was a Wednesday
        assert_eq!(epoch_days_to_week_day(-1), 4);
    }

    #[test]
    fn ms_to_day_parts() {
        assert_eq!(epoch_ms_to_epoch_days(-1), -1);
        assert_eq!(epoch_ms_to_ms_in_day(-1), MS_PER_DAY - 1);
        assert_eq!(epoch_days_to_epoch_ms(1, 5), MS_PER_DAY + 5);
    }
}
