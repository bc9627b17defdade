//! `TimeArrayTimeZoneRule`, a transition rule with explicit start times.

use alloc::{string::String, vec::Vec};
use core::fmt;

use writeable::{impl_display_with_writeable, Writeable};

use crate::{error::ErrorMessage, rule::TimeRuleType, TzRuleError, TzRuleResult};

/// A transition rule that takes effect at a fixed list of instants.
///
/// The start times are measured according to the rule's `TimeRuleType`, so
/// wall and standard times are resolved against the offsets in effect before
/// each transition, just like an annual rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimeArrayTimeZoneRule {
    name: String,
    raw_offset: i32,
    dst_savings: i32,
    start_times: Vec<i64>,
    time_type: TimeRuleType,
}

impl TimeArrayTimeZoneRule {
    /// Creates a new `TimeArrayTimeZoneRule`. The start times are sorted and
    /// deduplicated, and must not be empty.
    pub fn try_new(
        name: impl Into<String>,
        raw_offset: i32,
        dst_savings: i32,
        mut start_times: Vec<i64>,
        time_type: TimeRuleType,
    ) -> TzRuleResult<Self> {
        if start_times.is_empty() {
            return Err(TzRuleError::illegal_rule().with_enum(ErrorMessage::EmptyStartTimes));
        }
        start_times.sort_unstable();
        start_times.dedup();
        Ok(Self {
            name: name.into(),
            raw_offset,
            dst_savings,
            start_times,
            time_type,
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

    /// The start times in ascending order, measured by `time_type`.
    pub fn start_times(&self) -> &[i64] {
        &self.start_times
    }

    pub const fn time_type(&self) -> TimeRuleType {
        self.time_type
    }

    /// Resolves a start time of this rule into UTC.
    pub const fn utc_time(&self, time: i64, prior_raw: i32, prior_dst: i32) -> i64 {
        self.time_type.to_utc(time, prior_raw, prior_dst)
    }

    pub fn first_start(&self, prior_raw: i32, prior_dst: i32) -> Option<i64> {
        self.start_times
            .first()
            .map(|&time| self.utc_time(time, prior_raw, prior_dst))
    }

    pub fn final_start(&self, prior_raw: i32, prior_dst: i32) -> Option<i64> {
        self.start_times
            .last()
            .map(|&time| self.utc_time(time, prior_raw, prior_dst))
    }

    pub fn next_start(
        &self,
        base: i64,
        prior_raw: i32,
        prior_dst: i32,
        inclusive: bool,
    ) -> Option<i64> {
        let idx = self.start_times.partition_point(|&time| {
            let time = self.utc_time(time, prior_raw, prior_dst);
            time < base || (!inclusive && time == base)
        });
        self.start_times
            .get(idx)
            .map(|&time| self.utc_time(time, prior_raw, prior_dst))
    }

    pub fn previous_start(
        &self,
        base: i64,
        prior_raw: i32,
        prior_dst: i32,
        inclusive: bool,
    ) -> Option<i64> {
        let idx = self.start_times.partition_point(|&time| {
            let time = self.utc_time(time, prior_raw, prior_dst);
            time < base || (inclusive && time == base)
        });
        idx.checked_sub(1)
            .and_then(|idx| self.start_times.get(idx))
            .map(|&time| self.utc_time(time, prior_raw, prior_dst))
    }
}

impl Writeable for TimeArrayTimeZoneRule {
    fn write_to<W: fmt::Write + ?Sized>(&self, sink: &mut W) -> fmt::Result {
        super::write_rule_header(&self.name, self.raw_offset, self.dst_savings, sink)?;
        sink.write_str(", timeType=")?;
        sink.write_str(self.time_type.as_str())?;
        sink.write_str(", startTimes=[")?;
        for (idx, time) in self.start_times.iter().enumerate() {
            if idx > 0 {
                sink.write_str(", ")?;
            }
            time.write_to(sink)?;
        }
        sink.write_char(']')
    }
}

impl_display_with_writeable!(TimeArrayTimeZoneRule);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MS_PER_HOUR;
    use alloc::{string::ToString, vec};

    const HOUR: i32 = MS_PER_HOUR as i32;

    #[test]
    fn start_times_are_sorted() {
        let rule = TimeArrayTimeZoneRule::try_new(
            "X",
            0,
            0,
            vec![3_000, 1_000, 2_000, 1_000],
            TimeRuleType::Utc,
        )
        .unwrap();
        assert_eq!(rule.start_times(), &[1_000, 2_000, 3_000]);
        assert!(
            TimeArrayTimeZoneRule::try_new("X", 0, 0, vec![], TimeRuleType::Utc).is_err()
        );
    }

    #[test]
    fn navigation() {
        let rule =
            TimeArrayTimeZoneRule::try_new("X", 0, 0, vec![10, 20, 30], TimeRuleType::Utc)
                .unwrap();
        assert_eq!(rule.first_start(0, 0), Some(10));
        assert_eq!(rule.final_start(0, 0), Some(30));

        assert_eq!(rule.next_start(5, 0, 0, false), Some(10));
        assert_eq!(rule.next_start(10, 0, 0, false), Some(20));
        assert_eq!(rule.next_start(10, 0, 0, true), Some(10));
        assert_eq!(rule.next_start(30, 0, 0, false), None);

        assert_eq!(rule.previous_start(35, 0, 0, false), Some(30));
        assert_eq!(rule.previous_start(30, 0, 0, false), Some(20));
        assert_eq!(rule.previous_start(30, 0, 0, true), Some(30));
        assert_eq!(rule.previous_start(10, 0, 0, false), None);
    }

    #[test]
    fn wall_times_use_prior_offsets() {
        let hour = i64::from(HOUR);
        let rule = TimeArrayTimeZoneRule::try_new(
            "X",
            -5 * HOUR,
            HOUR,
            vec![10 * hour],
            TimeRuleType::Wall,
        )
        .unwrap();
        assert_eq!(rule.first_start(-5 * HOUR, 0), Some(15 * hour));
        assert_eq!(rule.next_start(15 * hour, -5 * HOUR, 0, true), Some(15 * hour));
        assert_eq!(rule.next_start(15 * hour, -5 * HOUR, 0, false), None);
    }

    #[test]
    fn display() {
        let rule = TimeArrayTimeZoneRule::try_new(
            "LMT",
            HOUR,
            0,
            vec![-100, 200],
            TimeRuleType::Standard,
        )
        .unwrap();
        assert_eq!(
            rule.to_string(),
            "name=LMT, stdOffset=3600000, dstSaving=0, timeType=STD, startTimes=[-100, 200]"
        );
    }
}
