//! The `TzifError` type.

use core::fmt;

use tzrules_rs::{error::ErrorKind, TzRuleError};

/// An error raised while loading a time zone from TZif data.
#[derive(Debug)]
pub enum TzifError {
    /// The `tzif` crate failed to read or parse the data.
    Tzif(tzif::error::Error),
    /// The data parsed but is internally inconsistent.
    MalformedData(&'static str),
    /// No bundled zone exists with this identifier.
    UnknownIdentifier,
    /// The data is valid but has no rule based equivalent.
    Unsupported(&'static str),
    /// A rule derived from the data was rejected.
    Rule(TzRuleError),
}

impl TzifError {
    /// Returns the `tzrules_rs` error kind closest to this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Tzif(_) | Self::MalformedData(_) => ErrorKind::Syntax,
            Self::UnknownIdentifier => ErrorKind::Range,
            Self::Unsupported(_) => ErrorKind::Unsupported,
            Self::Rule(err) => err.kind(),
        }
    }
}

impl From<tzif::error::Error> for TzifError {
    fn from(value: tzif::error::Error) -> Self {
        Self::Tzif(value)
    }
}

impl From<TzRuleError> for TzifError {
    fn from(value: TzRuleError) -> Self {
        Self::Rule(value)
    }
}

impl fmt::Display for TzifError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tzif(err) => write!(f, "Invalid TZif data: {err}"),
            Self::MalformedData(msg) => write!(f, "Malformed TZif data: {msg}"),
            Self::UnknownIdentifier => f.write_str("Unknown time zone identifier"),
            Self::Unsupported(msg) => write!(f, "Unsupported TZif data: {msg}"),
            Self::Rule(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for TzifError {}
