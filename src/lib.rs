//! The `tzrules_rs` crate models time zones as a set of offset rules and
//! resolves them into concrete UTC offsets and transitions.
//!
//! ```rust
//! use tzrules_rs::{
//!     AnnualTimeZoneRule, BasicTimeZone, DateTimeRule, InitialTimeZoneRule, Month,
//!     RuleBasedTimeZone, TimeRuleType, Weekday, MAX_YEAR, MS_PER_HOUR,
//! };
//!
//! let hour = MS_PER_HOUR as i32;
//! let mut zone = RuleBasedTimeZone::new(
//!     "America/New_York",
//!     InitialTimeZoneRule::new("EST", -5 * hour, 0),
//! );
//!
//! // Second Sunday of March, 02:00 wall time.
//! let dst_start = DateTimeRule::weekday_on_or_after(
//!     Month::March, 8, Weekday::Sunday, 2 * hour, TimeRuleType::Wall,
//! ).unwrap();
//! // First Sunday of November, 02:00 wall time.
//! let dst_end = DateTimeRule::weekday_on_or_after(
//!     Month::November, 1, Weekday::Sunday, 2 * hour, TimeRuleType::Wall,
//! ).unwrap();
//!
//! zone.add_transition_rule(
//!     AnnualTimeZoneRule::try_new("EDT", -5 * hour, hour, dst_start, 2007, MAX_YEAR).unwrap(),
//! ).unwrap();
//! zone.add_transition_rule(
//!     AnnualTimeZoneRule::try_new("EST", -5 * hour, 0, dst_end, 2007, MAX_YEAR).unwrap(),
//! ).unwrap();
//!
//! // 2024-03-10T07:00:00Z
//! let transition = zone.next_transition(1_704_067_200_000, false).unwrap();
//! assert_eq!(transition.time, 1_710_054_000_000);
//! assert_eq!(transition.to.name(), "EDT");
//! assert_eq!(zone.offset(transition.time).dst_savings, hour);
//! ```
//!
//! Transition rules recur once per year (for example, "the last Sunday of
//! April at 02:00 wall time") or fire at an explicit list of instants. A
//! [`RuleBasedTimeZone`] merges all of its rules into a single step function
//! of UTC time that can be walked in both directions, and any two zones
//! implementing [`BasicTimeZone`] can be compared for equivalent transitions
//! over a time range.
//!
//! All instants are milliseconds since the Unix epoch, all offsets are
//! milliseconds, and all calendar computations use the proleptic Gregorian
//! calendar.
#![no_std]
#![cfg_attr(not(test), forbid(clippy::unwrap_used))]
#![allow(
    // Currently throws a false positive regarding dependencies that are only used in tests.
    unused_crate_dependencies,
    clippy::module_name_repetitions,
    clippy::redundant_pub_crate,
    clippy::too_many_lines,
    clippy::cognitive_complexity,
    clippy::missing_errors_doc,
    clippy::option_if_let_else,

    // It may be worth to look if we can fix the issues highlighted by these lints.
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
)]

extern crate alloc;
extern crate core;

#[cfg(feature = "std")]
extern crate std;

pub mod compare;
pub mod error;
pub mod rule;
pub mod utils;

mod rbtz;
mod transition;
mod zone;

#[cfg(feature = "sys")]
pub(crate) mod sys;

#[doc(inline)]
pub use error::TzRuleError;

/// The `tzrules_rs` result type
pub type TzRuleResult<T> = Result<T, TzRuleError>;

pub use crate::{
    compare::{first_transition_mismatch, has_equivalent_transitions},
    rbtz::RuleBasedTimeZone,
    rule::{
        AnnualTimeZoneRule, DateRule, DateTimeRule, InitialTimeZoneRule, Month,
        TimeArrayTimeZoneRule, TimeRuleType, TimeZoneRule, Weekday, ZoneOffset,
    },
    transition::TimeZoneTransition,
    zone::BasicTimeZone,
};

#[doc(hidden)]
#[macro_export]
macro_rules! tzrules_assert {
    ($condition:expr $(,)*) => {
        if !$condition {
            return Err(TzRuleError::assert());
        }
    };
    ($condition:expr, $($args:tt)+) => {
        if !$condition {
            #[cfg(feature = "log")]
            log::error!($($args)+);
            return Err(TzRuleError::assert());
        }
    };
}

// Relevant numeric constants
/// Milliseconds per second constant
pub const MS_PER_SECOND: i64 = 1_000;
/// Milliseconds per minute constant
pub const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
/// Milliseconds per hour constant
pub const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
/// Milliseconds per day constant: 8.64e+7
pub const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// The end year of a rule that never expires.
pub const MAX_YEAR: i32 = i32::MAX;
/// The earliest year a rule may start in.
pub const MIN_RULE_YEAR: i32 = -1_000_000;
/// The latest finite year a rule may start or end in.
pub const MAX_RULE_YEAR: i32 = 1_000_000;
