//! TZif backed time zones for `tzrules_rs`.
//!
//! This crate loads time zones from TZif data, whether from raw bytes, a file
//! on disk, or the IANA time zone database bundled by `jiff-tzdb`, and
//! exposes them as [`tzrules_rs::BasicTimeZone`]s. Their rules can be used to
//! build equivalent [`tzrules_rs::RuleBasedTimeZone`]s.
//!
//! ```rust
//! use tzrules_provider::TzdbProvider;
//!
//! let provider = TzdbProvider::default();
//! let zone = provider.get("America/New_York").unwrap();
//!
//! // 2024-03-10T07:00:00Z
//! let transition = zone.next_transition(1_704_067_200_000, false).unwrap();
//! assert_eq!(transition.time, 1_710_054_000_000);
//! assert_eq!(transition.to.name(), "EDT");
//! ```
#![cfg_attr(not(test), forbid(clippy::unwrap_used))]

mod error;
mod posix;
mod tzif;

#[cfg(feature = "tzdb")]
mod provider;

pub use error::TzifError;
pub use tzif::TzifTimeZone;

#[cfg(feature = "tzdb")]
pub use provider::TzdbProvider;

/// The `tzrules_provider` result type
pub type TzifResult<T> = Result<T, TzifError>;
