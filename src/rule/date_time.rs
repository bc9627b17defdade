//! The yearly recurrence of a transition: `DateTimeRule` and its parts.

use core::fmt;

use writeable::{impl_display_with_writeable, LengthHint, Writeable};

use crate::{
    error::ErrorMessage,
    utils::{self, epoch_days_to_week_day},
    TzRuleError, TzRuleResult, MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND,
};

/// The largest magnitude of a rule's time of day, matching the POSIX TZ
/// extension of +/-167 hours.
pub(crate) const MAX_MILLIS_IN_DAY: i64 = 7 * MS_PER_DAY;

/// A Gregorian month, numbered by its ordinal from 0.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Month {
    January = 0,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    /// Returns the ordinal of this month: 0 for January through 11 for December.
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Returns the 1 based month number.
    pub(crate) const fn number(self) -> u8 {
        self as u8 + 1
    }

    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::January => "Jan",
            Self::February => "Feb",
            Self::March => "Mar",
            Self::April => "Apr",
            Self::May => "May",
            Self::June => "Jun",
            Self::July => "Jul",
            Self::August => "Aug",
            Self::September => "Sep",
            Self::October => "Oct",
            Self::November => "Nov",
            Self::December => "Dec",
        }
    }
}

impl TryFrom<u8> for Month {
    type Error = TzRuleError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        let month = match value {
            0 => Self::January,
            1 => Self::February,
            2 => Self::March,
            3 => Self::April,
            4 => Self::May,
            5 => Self::June,
            6 => Self::July,
            7 => Self::August,
            8 => Self::September,
            9 => Self::October,
            10 => Self::November,
            11 => Self::December,
            _ => {
                return Err(TzRuleError::illegal_rule().with_enum(ErrorMessage::MonthOutOfRange))
            }
        };
        Ok(month)
    }
}

/// A day of the week, numbered from Sunday = 1 through Saturday = 7.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    Sunday = 1,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    pub const fn number(self) -> u8 {
        self as u8
    }

    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::Sunday => "Sun",
            Self::Monday => "Mon",
            Self::Tuesday => "Tue",
            Self::Wednesday => "Wed",
            Self::Thursday => "Thu",
            Self::Friday => "Fri",
            Self::Saturday => "Sat",
        }
    }

    /// Days to move forward from `from` to reach this weekday.
    const fn days_after(self, from: u8) -> u8 {
        (self as u8 + 7 - from) % 7
    }

    /// Days to move backward from `from` to reach this weekday.
    const fn days_before(self, from: u8) -> u8 {
        (from + 7 - self as u8) % 7
    }
}

impl TryFrom<u8> for Weekday {
    type Error = TzRuleError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        let weekday = match value {
            1 => Self::Sunday,
            2 => Self::Monday,
            3 => Self::Tuesday,
            4 => Self::Wednesday,
            5 => Self::Thursday,
            6 => Self::Friday,
            7 => Self::Saturday,
            _ => {
                return Err(TzRuleError::illegal_rule().with_enum(ErrorMessage::WeekdayOutOfRange))
            }
        };
        Ok(weekday)
    }
}

/// The day selection of a `DateTimeRule`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateRule {
    /// A fixed day of the month.
    DayOfMonth { day: u8 },
    /// The nth `weekday` of the month. A negative `week` counts from the end of
    /// the month, so -1 is the last `weekday` of the month.
    WeekdayInMonth { week: i8, weekday: Weekday },
    /// The first `weekday` on or after `day`.
    WeekdayOnOrAfter { day: u8, weekday: Weekday },
    /// The last `weekday` on or before `day`.
    WeekdayOnOrBefore { day: u8, weekday: Weekday },
}

/// How the time of a `DateTimeRule` is measured.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeRuleType {
    /// Local wall clock time, including any daylight saving.
    #[default]
    Wall,
    /// Local standard time.
    Standard,
    /// Universal time.
    Utc,
}

impl TimeRuleType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wall => "WALL",
            Self::Standard => "STD",
            Self::Utc => "UTC",
        }
    }

    /// Converts a local time measured by this type into UTC, given the offsets
    /// in effect before the transition.
    pub(crate) const fn to_utc(self, local: i64, prior_raw: i32, prior_dst: i32) -> i64 {
        match self {
            Self::Wall => local
                .saturating_sub(prior_raw as i64)
                .saturating_sub(prior_dst as i64),
            Self::Standard => local.saturating_sub(prior_raw as i64),
            Self::Utc => local,
        }
    }
}

/// `DateTimeRule` describes a point in time that recurs every year.
///
/// The rule is a month, a day selection within that month, and a time of day
/// that is interpreted as wall, standard, or universal time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateTimeRule {
    month: Month,
    date_rule: DateRule,
    millis_in_day: i32,
    time_rule_type: TimeRuleType,
}

impl DateTimeRule {
    /// Creates a new `DateTimeRule` after validating the date rule against the
    /// month.
    pub fn try_new(
        month: Month,
        date_rule: DateRule,
        millis_in_day: i32,
        time_rule_type: TimeRuleType,
    ) -> TzRuleResult<Self> {
        let max_days = utils::max_days_in_month(month.number());
        let day = match date_rule {
            DateRule::DayOfMonth { day }
            | DateRule::WeekdayOnOrAfter { day, .. }
            | DateRule::WeekdayOnOrBefore { day, .. } => Some(day),
            DateRule::WeekdayInMonth { week, .. } => {
                if week == 0 || !(-5..=5).contains(&week) {
                    return Err(
                        TzRuleError::illegal_rule().with_enum(ErrorMessage::WeekInMonthOutOfRange)
                    );
                }
                None
            }
        };
        if day.is_some_and(|day| day == 0 || day > max_days) {
            return Err(TzRuleError::illegal_rule().with_enum(ErrorMessage::DayOfMonthOutOfRange));
        }
        if i64::from(millis_in_day).abs() >= MAX_MILLIS_IN_DAY {
            return Err(TzRuleError::illegal_rule().with_enum(ErrorMessage::MillisInDayOutOfRange));
        }
        Ok(Self {
            month,
            date_rule,
            millis_in_day,
            time_rule_type,
        })
    }

    /// A rule for a fixed day of the month.
    pub fn day_of_month(
        month: Month,
        day: u8,
        millis_in_day: i32,
        time_rule_type: TimeRuleType,
    ) -> TzRuleResult<Self> {
        Self::try_new(
            month,
            DateRule::DayOfMonth { day },
            millis_in_day,
            time_rule_type,
        )
    }

    /// A rule for the nth weekday of the month, counting from the end of the
    /// month when `week` is negative.
    pub fn weekday_in_month(
        month: Month,
        week: i8,
        weekday: Weekday,
        millis_in_day: i32,
        time_rule_type: TimeRuleType,
    ) -> TzRuleResult<Self> {
        Self::try_new(
            month,
            DateRule::WeekdayInMonth { week, weekday },
            millis_in_day,
            time_rule_type,
        )
    }

    /// A rule for the first `weekday` on or after `day`.
    pub fn weekday_on_or_after(
        month: Month,
        day: u8,
        weekday: Weekday,
        millis_in_day: i32,
        time_rule_type: TimeRuleType,
    ) -> TzRuleResult<Self> {
        Self::try_new(
            month,
            DateRule::WeekdayOnOrAfter { day, weekday },
            millis_in_day,
            time_rule_type,
        )
    }

    /// A rule for the last `weekday` on or before `day`.
    pub fn weekday_on_or_before(
        month: Month,
        day: u8,
        weekday: Weekday,
        millis_in_day: i32,
        time_rule_type: TimeRuleType,
    ) -> TzRuleResult<Self> {
        Self::try_new(
            month,
            DateRule::WeekdayOnOrBefore { day, weekday },
            millis_in_day,
            time_rule_type,
        )
    }

    pub const fn month(&self) -> Month {
        self.month
    }

    pub const fn date_rule(&self) -> DateRule {
        self.date_rule
    }

    pub const fn millis_in_day(&self) -> i32 {
        self.millis_in_day
    }

    pub const fn time_rule_type(&self) -> TimeRuleType {
        self.time_rule_type
    }

    /// Returns the day of month of the rule, if the rule uses one.
    pub const fn day_of_month_value(&self) -> Option<u8> {
        match self.date_rule {
            DateRule::DayOfMonth { day }
            | DateRule::WeekdayOnOrAfter { day, .. }
            | DateRule::WeekdayOnOrBefore { day, .. } => Some(day),
            DateRule::WeekdayInMonth { .. } => None,
        }
    }

    /// Returns the weekday of the rule, if the rule uses one.
    pub const fn weekday(&self) -> Option<Weekday> {
        match self.date_rule {
            DateRule::DayOfMonth { .. } => None,
            DateRule::WeekdayInMonth { weekday, .. }
            | DateRule::WeekdayOnOrAfter { weekday, .. }
            | DateRule::WeekdayOnOrBefore { weekday, .. } => Some(weekday),
        }
    }

    /// Returns the week in month of the rule, if the rule uses one.
    pub const fn week_in_month(&self) -> Option<i8> {
        match self.date_rule {
            DateRule::WeekdayInMonth { week, .. } => Some(week),
            _ => None,
        }
    }

    /// Resolves the day this rule selects in `year` as epoch days.
    ///
    /// Returns `None` when the selected day falls outside of the rule's month,
    /// for example the fifth Monday of a month with four Mondays.
    pub fn epoch_days_in_year(&self, year: i32) -> Option<i64> {
        let month = self.month.number();
        let days_in_month = utils::days_in_month(year, month);
        let week_day =
            |day: u8| epoch_days_to_week_day(utils::epoch_days_from_gregorian_date(year, month, day));

        let day = match self.date_rule {
            DateRule::DayOfMonth { day } => i16::from(day),
            DateRule::WeekdayInMonth { week, weekday } if week > 0 => {
                let first = 1 + weekday.days_after(week_day(1));
                i16::from(first) + 7 * (i16::from(week) - 1)
            }
            DateRule::WeekdayInMonth { week, weekday } => {
                let last = days_in_month - weekday.days_before(week_day(days_in_month));
                i16::from(last) + 7 * (i16::from(week) + 1)
            }
            DateRule::WeekdayOnOrAfter { day, weekday } => {
                if day > days_in_month {
                    return None;
                }
                i16::from(day + weekday.days_after(week_day(day)))
            }
            DateRule::WeekdayOnOrBefore { day, weekday } => {
                // "On or before February 29th" means the end of February.
                let day = if month == 2 && day == 29 {
                    days_in_month
                } else {
                    day
                };
                if day > days_in_month {
                    return None;
                }
                i16::from(day) - i16::from(weekday.days_before(week_day(day)))
            }
        };

        if day < 1 || day > i16::from(days_in_month) {
            return None;
        }
        Some(utils::epoch_days_from_gregorian_date(
            year, month, day as u8,
        ))
    }

    /// Resolves this rule in `year` into local milliseconds measured by the
    /// rule's `TimeRuleType`.
    pub fn local_millis_in_year(&self, year: i32) -> Option<i64> {
        self.epoch_days_in_year(year)
            .map(|days| utils::epoch_days_to_epoch_ms(days, i64::from(self.millis_in_day)))
    }
}

impl Writeable for DateTimeRule {
    fn write_to<W: fmt::Write + ?Sized>(&self, sink: &mut W) -> fmt::Result {
        sink.write_str("month=")?;
        sink.write_str(self.month.abbreviation())?;
        sink.write_str(", date=")?;
        match self.date_rule {
            DateRule::DayOfMonth { day } => day.write_to(sink)?,
            DateRule::WeekdayInMonth { week, weekday } => {
                week.write_to(sink)?;
                sink.write_str(weekday.abbreviation())?;
            }
            DateRule::WeekdayOnOrAfter { day, weekday } => {
                sink.write_str(weekday.abbreviation())?;
                sink.write_str(">=")?;
                day.write_to(sink)?;
            }
            DateRule::WeekdayOnOrBefore { day, weekday } => {
                sink.write_str(weekday.abbreviation())?;
                sink.write_str("<=")?;
                day.write_to(sink)?;
            }
        }
        sink.write_str(", time=")?;
        write_millis_in_day(i64::from(self.millis_in_day), sink)?;
        sink.write_char('(')?;
        sink.write_str(self.time_rule_type.as_str())?;
        sink.write_char(')')
    }

    fn writeable_length_hint(&self) -> LengthHint {
        // "month=" + 3 + ", date=" + up to 6 + ", time=" + at least 11 + "(WALL)"
        LengthHint::between(33, 45)
    }
}

impl_display_with_writeable!(DateTimeRule);

/// Writes `H:MM:SS.mmm`, with a leading '-' for negative times.
fn write_millis_in_day<W: fmt::Write + ?Sized>(millis: i64, sink: &mut W) -> fmt::Result {
    if millis < 0 {
        sink.write_char('-')?;
    }
    let millis = millis.unsigned_abs();
    (millis / MS_PER_HOUR as u64).write_to(sink)?;
    sink.write_char(':')?;
    write_padded((millis / MS_PER_MINUTE as u64) % 60, 2, sink)?;
    sink.write_char(':')?;
    write_padded((millis / MS_PER_SECOND as u64) % 60, 2, sink)?;
    sink.write_char('.')?;
    write_padded(millis % 1000, 3, sink)
}

fn write_padded<W: fmt::Write + ?Sized>(num: u64, width: u32, sink: &mut W) -> fmt::Result {
    let mut bound = 10u64.pow(width - 1);
    while bound > 1 && num < bound {
        sink.write_char('0')?;
        bound /= 10;
    }
    num.write_to(sink)
}
