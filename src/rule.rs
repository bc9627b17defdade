//! Time zone rules.
//!
//! A [`TimeZoneRule`] pairs a raw (standard) offset and a daylight saving
//! amount with the period in which they apply. The period is either
//! unbounded, for the zone's [`InitialTimeZoneRule`], or a set of transition
//! instants described by an [`AnnualTimeZoneRule`] or a
//! [`TimeArrayTimeZoneRule`].

use alloc::string::String;
use core::fmt;

use writeable::{impl_display_with_writeable, Writeable};

mod annual;
mod date_time;
mod time_array;

pub use annual::AnnualTimeZoneRule;
pub use date_time::{DateRule, DateTimeRule, Month, TimeRuleType, Weekday};
pub use time_array::TimeArrayTimeZoneRule;

/// The offsets from UTC in effect at an instant, in milliseconds.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZoneOffset {
    /// The standard time offset from UTC.
    pub raw_offset: i32,
    /// The additional daylight saving offset.
    pub dst_savings: i32,
}

impl ZoneOffset {
    pub const fn new(raw_offset: i32, dst_savings: i32) -> Self {
        Self {
            raw_offset,
            dst_savings,
        }
    }

    /// The total offset from UTC.
    pub const fn total(&self) -> i64 {
        self.raw_offset as i64 + self.dst_savings as i64
    }
}

/// The rule describing a zone before any of its transitions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InitialTimeZoneRule {
    name: String,
    raw_offset: i32,
    dst_savings: i32,
}

impl InitialTimeZoneRule {
    pub fn new(name: impl Into<String>, raw_offset: i32, dst_savings: i32) -> Self {
        Self {
            name: name.into(),
            raw_offset,
            dst_savings,
        }
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
}

impl Writeable for InitialTimeZoneRule {
    fn write_to<W: fmt::Write + ?Sized>(&self, sink: &mut W) -> fmt::Result {
        write_rule_header(&self.name, self.raw_offset, self.dst_savings, sink)
    }
}

impl_display_with_writeable!(InitialTimeZoneRule);

/// A time zone rule.
///
/// `Annual` and `TimeArray` rules are transition rules: they take effect at
/// computed instants and can be added to a `RuleBasedTimeZone`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TimeZoneRule {
    Initial(InitialTimeZoneRule),
    Annual(AnnualTimeZoneRule),
    TimeArray(TimeArrayTimeZoneRule),
}

impl TimeZoneRule {
    /// The display name of the rule.
    pub fn name(&self) -> &str {
        match self {
            Self::Initial(rule) => rule.name(),
            Self::Annual(rule) => rule.name(),
            Self::TimeArray(rule) => rule.name(),
        }
    }

    pub const fn raw_offset(&self) -> i32 {
        match self {
            Self::Initial(rule) => rule.raw_offset(),
            Self::Annual(rule) => rule.raw_offset(),
            Self::TimeArray(rule) => rule.raw_offset(),
        }
    }

    pub const fn dst_savings(&self) -> i32 {
        match self {
            Self::Initial(rule) => rule.dst_savings(),
            Self::Annual(rule) => rule.dst_savings(),
            Self::TimeArray(rule) => rule.dst_savings(),
        }
    }

    /// The offsets this rule puts into effect.
    pub const fn offset(&self) -> ZoneOffset {
        ZoneOffset::new(self.raw_offset(), self.dst_savings())
    }

    /// Returns whether this rule takes effect at computed transition instants.
    pub const fn is_transition_rule(&self) -> bool {
        !matches!(self, Self::Initial(_))
    }

    /// Returns whether this is an annual rule that never expires.
    pub const fn is_unbounded(&self) -> bool {
        matches!(self, Self::Annual(rule) if rule.is_unbounded())
    }

    /// Returns whether both rules describe the same offsets and the same
    /// transitions, ignoring their names.
    pub fn is_equivalent_to(&self, other: &Self) -> bool {
        if self.offset() != other.offset() {
            return false;
        }
        match (self, other) {
            (Self::Initial(_), Self::Initial(_)) => true,
            (Self::Annual(a), Self::Annual(b)) => {
                a.rule() == b.rule()
                    && a.start_year() == b.start_year()
                    && a.end_year() == b.end_year()
            }
            (Self::TimeArray(a), Self::TimeArray(b)) => {
                a.time_type() == b.time_type() && a.start_times() == b.start_times()
            }
            _ => false,
        }
    }

    /// Returns whether both rules put the same named state into effect.
    pub(crate) fn has_same_state(&self, other: &Self) -> bool {
        self.offset() == other.offset() && self.name() == other.name()
    }

    /// The first instant this rule takes effect, if it is a transition rule.
    pub fn first_start(&self, prior_raw: i32, prior_dst: i32) -> Option<i64> {
        match self {
            Self::Initial(_) => None,
            Self::Annual(rule) => rule.first_start(prior_raw, prior_dst),
            Self::TimeArray(rule) => rule.first_start(prior_raw, prior_dst),
        }
    }

    /// The last instant this rule takes effect, if it is a bounded transition
    /// rule.
    pub fn final_start(&self, prior_raw: i32, prior_dst: i32) -> Option<i64> {
        match self {
            Self::Initial(_) => None,
            Self::Annual(rule) => rule.final_start(prior_raw, prior_dst),
            Self::TimeArray(rule) => rule.final_start(prior_raw, prior_dst),
        }
    }

    /// The first instant after `base`, or at `base` when `inclusive`, at which
    /// this rule takes effect.
    pub fn next_start(
        &self,
        base: i64,
        prior_raw: i32,
        prior_dst: i32,
        inclusive: bool,
    ) -> Option<i64> {
        match self {
            Self::Initial(_) => None,
            Self::Annual(rule) => rule.next_start(base, prior_raw, prior_dst, inclusive),
            Self::TimeArray(rule) => rule.next_start(base, prior_raw, prior_dst, inclusive),
        }
    }

    /// The last instant before `base`, or at `base` when `inclusive`, at which
    /// this rule takes effect.
    pub fn previous_start(
        &self,
        base: i64,
        prior_raw: i32,
        prior_dst: i32,
        inclusive: bool,
    ) -> Option<i64> {
        match self {
            Self::Initial(_) => None,
            Self::Annual(rule) => rule.previous_start(base, prior_raw, prior_dst, inclusive),
            Self::TimeArray(rule) => rule.previous_start(base, prior_raw, prior_dst, inclusive),
        }
    }
}

impl From<InitialTimeZoneRule> for TimeZoneRule {
    fn from(value: InitialTimeZoneRule) -> Self {
        Self::Initial(value)
    }
}

impl From<AnnualTimeZoneRule> for TimeZoneRule {
    fn from(value: AnnualTimeZoneRule) -> Self {
        Self::Annual(value)
    }
}

impl From<TimeArrayTimeZoneRule> for TimeZoneRule {
    fn from(value: TimeArrayTimeZoneRule) -> Self {
        Self::TimeArray(value)
    }
}

impl Writeable for TimeZoneRule {
    fn write_to<W: fmt::Write + ?Sized>(&self, sink: &mut W) -> fmt::Result {
        match self {
            Self::Initial(rule) => rule.write_to(sink),
            Self::Annual(rule) => rule.write_to(sink),
            Self::TimeArray(rule) => rule.write_to(sink),
        }
    }
}

impl_display_with_writeable!(TimeZoneRule);

fn write_rule_header<W: fmt::Write + ?Sized>(
    name: &str,
    raw_offset: i32,
    dst_savings: i32,
    sink: &mut W,
) -> fmt::Result {
    sink.write_str("name=")?;
    sink.write_str(name)?;
    sink.write_str(", stdOffset=")?;
    raw_offset.write_to(sink)?;
    sink.write_str(", dstSaving=")?;
    dst_savings.write_to(sink)
}
