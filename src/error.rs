//! This module implements `TzRuleError`.

use core::fmt;

/// `TzRuleError`'s error type.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Error.
    #[default]
    Generic,
    /// TypeError
    Type,
    /// RangeError
    Range,
    /// A rule that is malformed or can never be satisfied.
    IllegalRule,
    /// SyntaxError
    Syntax,
    /// Data that is well formed but cannot be expressed as rules.
    Unsupported,
    /// Assert
    Assert,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic => "Error",
            Self::Type => "TypeError",
            Self::Range => "RangeError",
            Self::IllegalRule => "IllegalRuleError",
            Self::Syntax => "SyntaxError",
            Self::Unsupported => "UnsupportedError",
            Self::Assert => "ImplementationError",
        }
        .fmt(f)
    }
}

/// The error type for `tzrules_rs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TzRuleError {
    kind: ErrorKind,
    msg: ErrorMessage,
}

impl TzRuleError {
    #[inline]
    #[must_use]
    const fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            msg: ErrorMessage::None,
        }
    }

    /// Create a generic error
    #[inline]
    #[must_use]
    pub fn general(msg: &'static str) -> Self {
        Self::new(ErrorKind::Generic).with_message(msg)
    }

    /// Create a range error.
    #[inline]
    #[must_use]
    pub const fn range() -> Self {
        Self::new(ErrorKind::Range)
    }

    /// Create a type error.
    #[inline]
    #[must_use]
    pub const fn r#type() -> Self {
        Self::new(ErrorKind::Type)
    }

    /// Create an illegal rule error.
    #[inline]
    #[must_use]
    pub const fn illegal_rule() -> Self {
        Self::new(ErrorKind::IllegalRule)
    }

    /// Create a syntax error.
    #[inline]
    #[must_use]
    pub const fn syntax() -> Self {
        Self::new(ErrorKind::Syntax)
    }

    /// Create an unsupported data error.
    #[inline]
    #[must_use]
    pub const fn unsupported() -> Self {
        Self::new(ErrorKind::Unsupported)
    }

    /// Creates an assertion error
    #[inline]
    #[must_use]
    #[cfg_attr(debug_assertions, track_caller)]
    pub(crate) const fn assert() -> Self {
        #[cfg(not(debug_assertions))]
        {
            Self::new(ErrorKind::Assert)
        }
        #[cfg(debug_assertions)]
        Self {
            kind: ErrorKind::Assert,
            msg: ErrorMessage::String(core::panic::Location::caller().file()),
        }
    }

    /// Add a message to the error.
    #[inline]
    #[must_use]
    pub fn with_message(mut self, msg: &'static str) -> Self {
        self.msg = ErrorMessage::String(msg);
        self
    }

    /// Add a message enum to the error.
    #[inline]
    #[must_use]
    pub(crate) fn with_enum(mut self, msg: ErrorMessage) -> Self {
        self.msg = msg;
        self
    }

    /// Returns this error's kind.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Extracts the error message.
    #[inline]
    #[must_use]
    pub fn into_message(self) -> &'static str {
        self.msg.to_string()
    }
}

impl fmt::Display for TzRuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        let msg = self.msg.to_string();
        if !msg.is_empty() {
            write!(f, ": {msg}")?;
        }

        Ok(())
    }
}

impl core::error::Error for TzRuleError {}

/// The error message
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum ErrorMessage {
    // Rule construction
    MonthOutOfRange,
    WeekdayOutOfRange,
    DayOfMonthOutOfRange,
    WeekInMonthOutOfRange,
    MillisInDayOutOfRange,
    YearOutOfRange,
    StartYearAfterEndYear,
    RuleNeverSatisfied,
    EmptyStartTimes,

    // Zone construction
    NotATransitionRule,
    TooManyFinalRules,

    // Typed
    None,
    String(&'static str),
}

impl ErrorMessage {
    pub fn to_string(self) -> &'static str {
        match self {
            Self::MonthOutOfRange => "Month must be in the range 0..=11.",
            Self::WeekdayOutOfRange => "Day of week must be in the range 1..=7.",
            Self::DayOfMonthOutOfRange => "Day of month is not valid for the rule month.",
            Self::WeekInMonthOutOfRange => {
                "Week in month must be a non-zero value in the range -5..=5."
            }
            Self::MillisInDayOutOfRange => "Milliseconds in day exceeds the supported range.",
            Self::YearOutOfRange => "Rule year is outside of the supported range.",
            Self::StartYearAfterEndYear => "Rule start year must not be after its end year.",
            Self::RuleNeverSatisfied => {
                "Date rule cannot be satisfied in every year of the rule's range."
            }
            Self::EmptyStartTimes => "A time array rule requires at least one start time.",
            Self::NotATransitionRule => "Rule must be a transition rule.",
            Self::TooManyFinalRules => "A zone supports at most two final rules.",
            Self::None => "",
            Self::String(s) => s,
        }
    }
}
