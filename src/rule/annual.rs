//! `AnnualTimeZoneRule`, a transition rule that recurs once a year.

use alloc::string::String;
use core::fmt;

use writeable::{impl_display_with_writeable, Writeable};

use crate::{
    error::ErrorMessage, rule::DateTimeRule, utils, TzRuleError, TzRuleResult, MAX_RULE_YEAR,
    MAX_YEAR, MIN_RULE_YEAR,
};

/// The Gregorian calendar repeats itself every 400 years.
const YEARS_IN_A_CYCLE: i32 = 400;

/// A transition rule that takes effect once a year, on the day and at the time
/// described by its `DateTimeRule`, for every year in `start_year..=end_year`.
///
/// An `end_year` of [`MAX_YEAR`] means the rule never expires.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnnualTimeZoneRule {
    name: String,
    raw_offset: i32,
    dst_savings: i32,
    rule: DateTimeRule,
    start_year: i32,
    end_year: i32,
}

impl AnnualTimeZoneRule {
    /// Creates a new `AnnualTimeZoneRule`.
    ///
    /// The rule is rejected when its years are out of order or out of range,
    /// or when `rule` selects a day outside of its month in any year of the
    /// range.
    pub fn try_new(
        name: impl Into<String>,
        raw_offset: i32,
        dst_savings: i32,
        rule: DateTimeRule,
        start_year: i32,
        end_year: i32,
    ) -> TzRuleResult<Self> {
        if !(MIN_RULE_YEAR..=MAX_RULE_YEAR).contains(&start_year)
            || (end_year != MAX_YEAR && end_year > MAX_RULE_YEAR)
        {
            return Err(TzRuleError::range().with_enum(ErrorMessage::YearOutOfRange));
        }
        if start_year > end_year {
            return Err(TzRuleError::illegal_rule().with_enum(ErrorMessage::StartYearAfterEndYear));
        }

        let last_checked = end_year.min(start_year + YEARS_IN_A_CYCLE - 1);
        if !(start_year..=last_checked).all(|year| rule.epoch_days_in_year(year).is_some()) {
            #[cfg(feature = "log")]
            log::trace!("Rejected annual rule that cannot be satisfied: {rule}");
            return Err(TzRuleError::illegal_rule().with_enum(ErrorMessage::RuleNeverSatisfied));
        }

        Ok(Self {
            name: name.into(),
            raw_offset,
            dst_savings,
            rule,
            start_year,
            end_year,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn raw_offset(&self) -> i32 {
        self.raw_offset
    }

    pub const fn dst_savings(&self) -> i32 {
        self.dst_savings
    }

    /// Returns the recurrence of this rule.
    pub const fn rule(&self) -> &DateTimeRule {
        &self.rule
    }

    pub const fn start_year(&self) -> i32 {
        self.start_year
    }

    pub const fn end_year(&self) -> i32 {
        self.end_year
    }

    /// Returns whether this rule never expires.
    pub const fn is_unbounded(&self) -> bool {
        self.end_year == MAX_YEAR
    }

    /// Returns the UTC instant this rule takes effect in `year`, given the
    /// offsets in effect right before it.
    pub fn start_in_year(&self, year: i32, prior_raw: i32, prior_dst: i32) -> Option<i64> {
        if year < self.start_year || year > self.end_year || year > MAX_RULE_YEAR {
            return None;
        }
        let local = self.rule.local_millis_in_year(year)?;
        Some(
            self.rule
                .time_rule_type()
                .to_utc(local, prior_raw, prior_dst),
        )
    }

    /// Returns the first instant this rule takes effect.
    pub fn first_start(&self, prior_raw: i32, prior_dst: i32) -> Option<i64> {
        self.start_in_year(self.start_year, prior_raw, prior_dst)
    }

    /// Returns the last instant this rule takes effect, or `None` for an
    /// unbounded rule.
    pub fn final_start(&self, prior_raw: i32, prior_dst: i32) -> Option<i64> {
        if self.is_unbounded() {
            return None;
        }
        self.start_in_year(self.end_year, prior_raw, prior_dst)
    }

    /// Returns the first instant after `base` (or at `base` when `inclusive`)
    /// at which this rule takes effect.
    pub fn next_start(
        &self,
        base: i64,
        prior_raw: i32,
        prior_dst: i32,
        inclusive: bool,
    ) -> Option<i64> {
        let year = utils::year_from_epoch_ms(base);
        if year < self.start_year.saturating_sub(1) {
            return self.first_start(prior_raw, prior_dst);
        }
        // A local date close to the year boundary may resolve into the
        // neighboring UTC year, so the adjacent years are checked as well.
        (year.saturating_sub(1)..=year.saturating_add(1))
            .filter_map(|y| self.start_in_year(y, prior_raw, prior_dst))
            .find(|&time| time > base || (inclusive && time == base))
    }

    /// Returns the last instant before `base` (or at `base` when `inclusive`)
    /// at which this rule takes effect.
    pub fn previous_start(
        &self,
        base: i64,
        prior_raw: i32,
        prior_dst: i32,
        inclusive: bool,
    ) -> Option<i64> {
        let year = utils::year_from_epoch_ms(base);
        if year > self.end_year.saturating_add(1) {
            return self.final_start(prior_raw, prior_dst);
        }
        let year = year.min(MAX_RULE_YEAR + 1);
        (year.saturating_sub(1)..=year.saturating_add(1))
            .rev()
            .filter_map(|y| self.start_in_year(y, prior_raw, prior_dst))
            .find(|&time| time < base || (inclusive && time == base))
    }
}

impl Writeable for AnnualTimeZoneRule {
    fn write_to<W: fmt::Write + ?Sized>(&self, sink: &mut W) -> fmt::Result {
        super::write_rule_header(&self.name, self.raw_offset, self.dst_savings, sink)?;
        sink.write_str(", rule={")?;
        self.rule.write_to(sink)?;
        sink.write_str("}, startYear=")?;
        self.start_year.write_to(sink)?;
        sink.write_str(", endYear=")?;
        if self.is_unbounded() {
            sink.write_str("max")
        } else {
            self.end_year.write_to(sink)
        }
    }
}

impl_display_with_writeable!(AnnualTimeZoneRule);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::ErrorKind,
        rule::{Month, TimeRuleType, Weekday},
        utils::epoch_days_from_gregorian_date,
        MS_PER_DAY, MS_PER_HOUR,
    };
    use alloc::string::ToString;

    const HOUR: i32 = MS_PER_HOUR as i32;

    fn utc(year: i32, month: u8, day: u8, hour: i64) -> i64 {
        epoch_days_from_gregorian_date(year, month, day) * MS_PER_DAY + hour * MS_PER_HOUR
    }

    fn new_york_dst_1967() -> AnnualTimeZoneRule {
        let rule = DateTimeRule::weekday_in_month(
            Month::April,
            -1,
            Weekday::Sunday,
            2 * HOUR,
            TimeRuleType::Wall,
        )
        .unwrap();
        AnnualTimeZoneRule::try_new("EDT", -5 * HOUR, HOUR, rule, 1967, 1986).unwrap()
    }

    #[test]
    fn start_in_year_converts_with_prior_offsets() {
        let rule = new_york_dst_1967();
        // 1980-04-27T02:00 EST is 1980-04-27T07:00Z
        let expected = utc(1980, 4, 27, 7);
        assert_eq!(expected, 325_666_800_000);
        assert_eq!(rule.start_in_year(1980, -5 * HOUR, 0), Some(expected));
        // Wall time includes the prior daylight savings.
        assert_eq!(
            rule.start_in_year(1980, -5 * HOUR, HOUR),
            Some(expected - MS_PER_HOUR)
        );
        assert_eq!(rule.start_in_year(1966, -5 * HOUR, 0), None);
        assert_eq!(rule.start_in_year(1987, -5 * HOUR, 0), None);
    }

    #[test]
    fn time_rule_types() {
        let date = |time_type| {
            DateTimeRule::day_of_month(Month::June, 1, 2 * HOUR, time_type).unwrap()
        };
        let make = |time_type| {
            AnnualTimeZoneRule::try_new("X", 0, HOUR, date(time_type), 2000, 2000).unwrap()
        };
        let base = utc(2000, 6, 1, 2);
        assert_eq!(
            make(TimeRuleType::Wall).start_in_year(2000, 3 * HOUR, HOUR),
            Some(base - 4 * MS_PER_HOUR)
        );
        assert_eq!(
            make(TimeRuleType::Standard).start_in_year(2000, 3 * HOUR, HOUR),
            Some(base - 3 * MS_PER_HOUR)
        );
        assert_eq!(
            make(TimeRuleType::Utc).start_in_year(2000, 3 * HOUR, HOUR),
            Some(base)
        );
    }

    #[test]
    fn construction_errors() {
        let rule = DateTimeRule::day_of_month(Month::June, 1, 0, TimeRuleType::Wall).unwrap();
        let err = AnnualTimeZoneRule::try_new("X", 0, 0, rule, 2001, 2000).map_err(|e| e.kind());
        assert_eq!(err, Err(ErrorKind::IllegalRule));
        let err = AnnualTimeZoneRule::try_new("X", 0, 0, rule, 2_000_000, MAX_YEAR)
            .map_err(|e| e.kind());
        assert_eq!(err, Err(ErrorKind::Range));
        assert!(AnnualTimeZoneRule::try_new("X", 0, 0, rule, 2000, MAX_YEAR).is_ok());

        // February 29th only exists in leap years.
        let leap_day =
            DateTimeRule::day_of_month(Month::February, 29, 0, TimeRuleType::Wall).unwrap();
        assert!(AnnualTimeZoneRule::try_new("X", 0, 0, leap_day, 2024, 2024).is_ok());
        assert!(AnnualTimeZoneRule::try_new("X", 0, 0, leap_day, 2024, 2025).is_err());

        // A fifth Monday of February only happens once in a while.
        let fifth_monday = DateTimeRule::weekday_in_month(
            Month::February,
            5,
            Weekday::Monday,
            0,
            TimeRuleType::Wall,
        )
        .unwrap();
        assert!(AnnualTimeZoneRule::try_new("X", 0, 0, fifth_monday, 2016, 2016).is_ok());
        let err = AnnualTimeZoneRule::try_new("X", 0, 0, fifth_monday, 2016, MAX_YEAR)
            .map_err(|e| e.kind());
        assert_eq!(err, Err(ErrorKind::IllegalRule));
    }

    #[test]
    fn first_and_final_start() {
        let rule = new_york_dst_1967();
        assert_eq!(
            rule.first_start(-5 * HOUR, 0),
            Some(utc(1967, 4, 30, 7))
        );
        assert_eq!(
            rule.final_start(-5 * HOUR, 0),
            Some(utc(1986, 4, 27, 7))
        );

        let date = *rule.rule();
        let unbounded =
            AnnualTimeZoneRule::try_new("EDT", -5 * HOUR, HOUR, date, 1967, MAX_YEAR).unwrap();
        assert_eq!(unbounded.final_start(-5 * HOUR, 0), None);
    }

    #[test]
    fn next_and_previous_start() {
        let rule = new_york_dst_1967();
        let start_1980 = utc(1980, 4, 27, 7);
        let start_1981 = utc(1981, 4, 26, 7);
        let raw = -5 * HOUR;

        assert_eq!(rule.next_start(start_1980, raw, 0, true), Some(start_1980));
        assert_eq!(rule.next_start(start_1980, raw, 0, false), Some(start_1981));
        assert_eq!(rule.next_start(start_1980 - 1, raw, 0, false), Some(start_1980));
        assert_eq!(rule.next_start(utc(1980, 1, 1, 0), raw, 0, false), Some(start_1980));
        // Before the rule's first year
        assert_eq!(
            rule.next_start(utc(1900, 1, 1, 0), raw, 0, false),
            Some(utc(1967, 4, 30, 7))
        );
        // After the rule's last year
        assert_eq!(rule.next_start(utc(1986, 5, 1, 0), raw, 0, false), None);
        assert_eq!(rule.next_start(i64::MAX, raw, 0, false), None);

        assert_eq!(rule.previous_start(start_1981, raw, 0, true), Some(start_1981));
        assert_eq!(rule.previous_start(start_1981, raw, 0, false), Some(start_1980));
        assert_eq!(rule.previous_start(start_1980 + 1, raw, 0, false), Some(start_1980));
        assert_eq!(
            rule.previous_start(utc(2020, 1, 1, 0), raw, 0, false),
            Some(utc(1986, 4, 27, 7))
        );
        assert_eq!(rule.previous_start(utc(1967, 4, 30, 6), raw, 0, false), None);
        assert_eq!(rule.previous_start(i64::MIN, raw, 0, false), None);
    }

    #[test]
    fn unbounded_rule_far_future() {
        let date = DateTimeRule::weekday_on_or_after(
            Month::November,
            1,
            Weekday::Sunday,
            2 * HOUR,
            TimeRuleType::Wall,
        )
        .unwrap();
        let rule =
            AnnualTimeZoneRule::try_new("EST", -5 * HOUR, 0, date, 2007, MAX_YEAR).unwrap();
        assert_eq!(rule.next_start(i64::MAX, -5 * HOUR, HOUR, false), None);
        let last = rule.previous_start(i64::MAX, -5 * HOUR, HOUR, false).unwrap();
        assert_eq!(utils::year_from_epoch_ms(last), MAX_RULE_YEAR);
    }

    #[test]
    fn utc_year_boundary() {
        // December 31st 23:00 wall time at UTC-5 is January 1st 04:00 UTC.
        let date =
            DateTimeRule::day_of_month(Month::December, 31, 23 * HOUR, TimeRuleType::Wall)
                .unwrap();
        let rule = AnnualTimeZoneRule::try_new("X", 0, 0, date, 2000, 2010).unwrap();
        let start_2004 = utc(2005, 1, 1, 4);
        assert_eq!(
            rule.next_start(utc(2005, 1, 1, 0), -5 * HOUR, 0, false),
            Some(start_2004)
        );
        assert_eq!(
            rule.previous_start(utc(2005, 1, 1, 5), -5 * HOUR, 0, false),
            Some(start_2004)
        );
    }

    #[test]
    fn display() {
        let rule = new_york_dst_1967();
        assert_eq!(
            rule.to_string(),
            "name=EDT, stdOffset=-18000000, dstSaving=3600000, \
             rule={month=Apr, date=-1Sun, time=2:00:00.000(WALL)}, startYear=1967, endYear=1986"
        );
    }
}
