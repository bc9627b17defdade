//! This module implements `TimeZoneTransition`.

use core::fmt;

use writeable::{impl_display_with_writeable, Writeable};

use crate::rule::TimeZoneRule;

/// A change from one time zone rule to another at a UTC instant.
///
/// The rules are borrowed from the zone that produced the transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeZoneTransition<'a> {
    /// The instant of the transition in epoch milliseconds.
    pub time: i64,
    /// The rule in effect right before `time`.
    pub from: &'a TimeZoneRule,
    /// The rule in effect from `time` onward.
    pub to: &'a TimeZoneRule,
}

impl<'a> TimeZoneTransition<'a> {
    pub const fn new(time: i64, from: &'a TimeZoneRule, to: &'a TimeZoneRule) -> Self {
        Self { time, from, to }
    }

    /// Returns whether the transition changes neither the raw offset nor the
    /// daylight saving amount.
    pub fn is_offset_neutral(&self) -> bool {
        self.from.offset() == self.to.offset()
    }
}

impl Writeable for TimeZoneTransition<'_> {
    fn write_to<W: fmt::Write + ?Sized>(&self, sink: &mut W) -> fmt::Result {
        sink.write_str("time=")?;
        self.time.write_to(sink)?;
        sink.write_str(", from={")?;
        self.from.write_to(sink)?;
        sink.write_str("}, to={")?;
        self.to.write_to(sink)?;
        sink.write_char('}')
    }
}

impl_display_with_writeable!(TimeZoneTransition<'_>);
