//! Translation of a TZif footer (a POSIX TZ string) into final rules.
//!
//! For more information, see the [POSIX tz string docs](https://sourceware.org/glibc/manual/2.40/html_node/Proleptic-TZ.html)

use tzif::data::posix::{PosixTzString, TransitionDate, TransitionDay};
use tzrules_rs::{
    AnnualTimeZoneRule, DateTimeRule, Month, TimeRuleType, Weekday, MAX_YEAR, MS_PER_SECOND,
};

use crate::{TzifError, TzifResult};

/// Days before the first of each month in a common year.
const DAYS_BEFORE_MONTH: [u16; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// The year final rules start in when the table has no transitions.
pub(crate) const DEFAULT_START_YEAR: i32 = 1970;

/// The standard and daylight saving UTC offsets of a footer, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FooterOffsets {
    pub(crate) standard: i64,
    pub(crate) daylight: Option<i64>,
}

impl FooterOffsets {
    pub(crate) fn new(footer: &PosixTzString) -> Self {
        // POSIX offsets are positive west of Greenwich.
        Self {
            standard: -footer.std_info.offset.0,
            daylight: footer
                .dst_info
                .as_ref()
                .map(|dst| -dst.variant_info.offset.0),
        }
    }

    /// Returns the raw offset and daylight saving amount, in seconds, of the
    /// footer state with this UTC offset and daylight saving flag.
    pub(crate) fn split(&self, utoff: i64, is_dst: bool) -> Option<(i64, i64)> {
        match self.daylight {
            _ if !is_dst && utoff == self.standard => Some((utoff, 0)),
            Some(daylight) if is_dst && utoff == daylight => {
                Some((self.standard, daylight - self.standard))
            }
            _ => None,
        }
    }
}

/// Converts a footer with a daylight saving part into its pair of final
/// rules starting in `start_year`: the rule entering daylight saving time,
/// then the rule leaving it.
///
/// `name_of` names the state with the given UTC offset in seconds and
/// daylight saving flag.
pub(crate) fn final_rules<F>(
    footer: &PosixTzString,
    start_year: i32,
    name_of: F,
) -> TzifResult<Option<(AnnualTimeZoneRule, AnnualTimeZoneRule)>>
where
    F: Fn(i64, bool) -> String,
{
    let Some(dst_info) = &footer.dst_info else {
        return Ok(None);
    };
    let offsets = FooterOffsets::new(footer);
    let daylight = offsets.daylight.unwrap_or(offsets.standard);

    let raw_offset = seconds_to_millis(offsets.standard)?;
    let dst_savings = seconds_to_millis(daylight - offsets.standard)?;
    let enter = AnnualTimeZoneRule::try_new(
        name_of(daylight, true),
        raw_offset,
        dst_savings,
        transition_rule(&dst_info.start_date)?,
        start_year,
        MAX_YEAR,
    )?;
    let leave = AnnualTimeZoneRule::try_new(
        name_of(offsets.standard, false),
        raw_offset,
        0,
        transition_rule(&dst_info.end_date)?,
        start_year,
        MAX_YEAR,
    )?;
    Ok(Some((enter, leave)))
}

/// Converts a POSIX transition date into a wall time `DateTimeRule`.
fn transition_rule(date: &TransitionDate) -> TzifResult<DateTimeRule> {
    let millis_in_day = seconds_to_millis(date.time.0)?;
    let rule = match date.day {
        // `Mm.w.d`: week 5 is the last week of the month and day 0 is Sunday.
        TransitionDay::Mwd(month, week, day) => {
            let month = month
                .checked_sub(1)
                .and_then(|month| u8::try_from(month).ok())
                .ok_or(TzifError::MalformedData("POSIX month is out of range."))?;
            let week = match week {
                5 => -1,
                week => i8::try_from(week)
                    .map_err(|_| TzifError::MalformedData("POSIX week is out of range."))?,
            };
            let weekday = u8::try_from(day)
                .ok()
                .and_then(|day| day.checked_add(1))
                .ok_or(TzifError::MalformedData("POSIX weekday is out of range."))?;
            DateTimeRule::weekday_in_month(
                Month::try_from(month)?,
                week,
                Weekday::try_from(weekday)?,
                millis_in_day,
                TimeRuleType::Wall,
            )?
        }
        // `Jn`: 1 based and never counts February 29.
        TransitionDay::NoLeap(day) => {
            if !(1..=365).contains(&day) {
                return Err(TzifError::MalformedData("POSIX Julian day is out of range."));
            }
            let month = DAYS_BEFORE_MONTH
                .partition_point(|&before| before < day)
                .saturating_sub(1);
            let day_of_month = day - DAYS_BEFORE_MONTH[month];
            DateTimeRule::day_of_month(
                Month::try_from(month as u8)?,
                day_of_month as u8,
                millis_in_day,
                TimeRuleType::Wall,
            )?
        }
        TransitionDay::WithLeap(_) => {
            return Err(TzifError::Unsupported(
                "Zero based Julian day rules have no annual equivalent.",
            ))
        }
    };
    Ok(rule)
}

pub(crate) fn seconds_to_millis(seconds: i64) -> TzifResult<i32> {
    seconds
        .checked_mul(MS_PER_SECOND)
        .and_then(|millis| i32::try_from(millis).ok())
        .ok_or(TzifError::Unsupported("Offset exceeds the supported range."))
}
