//! Transition equivalence checks between two time zones.
//!
//! Two zones are equivalent over a range when they agree on the offsets in
//! effect at its start and report the same transitions, at the same instants
//! and into the same offsets, up to and including its end. The zones may be
//! built from entirely different rules.

use core::fmt;

use writeable::{impl_display_with_writeable, Writeable};

use crate::{rule::ZoneOffset, transition::TimeZoneTransition, zone::BasicTimeZone};

/// The way two zones first disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MismatchKind {
    /// The offsets differ at the start of the range.
    InitialOffset,
    /// Only one of the zones has a transition at this instant.
    MissingTransition,
    /// The zones have their next transitions at different instants.
    TransitionTime,
    /// The zones transition at the same instant into different offsets.
    Offset,
}

impl MismatchKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InitialOffset => "initial offset",
            Self::MissingTransition => "missing transition",
            Self::TransitionTime => "transition time",
            Self::Offset => "offset",
        }
    }
}

/// The first instant at which two zones disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionMismatch {
    pub time: i64,
    pub kind: MismatchKind,
}

impl Writeable for TransitionMismatch {
    fn write_to<W: fmt::Write + ?Sized>(&self, sink: &mut W) -> fmt::Result {
        sink.write_str(self.kind.as_str())?;
        sink.write_str(" mismatch at ")?;
        self.time.write_to(sink)
    }
}

impl_display_with_writeable!(TransitionMismatch);

/// Returns whether `a` and `b` have equivalent transitions from `start` to
/// `end`, both inclusive.
///
/// When `ignore_dst` is set only the raw offsets are compared. Every
/// transition of either zone still needs a counterpart at the same instant.
pub fn has_equivalent_transitions<A, B>(
    a: &A,
    b: &B,
    start: i64,
    end: i64,
    ignore_dst: bool,
) -> bool
where
    A: BasicTimeZone + ?Sized,
    B: BasicTimeZone + ?Sized,
{
    first_transition_mismatch(a, b, start, end, ignore_dst).is_none()
}

/// Returns the first instant in `start..=end` at which `a` and `b` disagree,
/// or `None` if they are equivalent over the range.
pub fn first_transition_mismatch<A, B>(
    a: &A,
    b: &B,
    start: i64,
    end: i64,
    ignore_dst: bool,
) -> Option<TransitionMismatch>
where
    A: BasicTimeZone + ?Sized,
    B: BasicTimeZone + ?Sized,
{
    if !offsets_match(a.offset(start), b.offset(start), ignore_dst) {
        return Some(TransitionMismatch {
            time: start,
            kind: MismatchKind::InitialOffset,
        });
    }

    let mut time = start;
    loop {
        let next_a = next_in_range(a, time, end);
        let next_b = next_in_range(b, time, end);
        let (next_a, next_b) = match (next_a, next_b) {
            (None, None) => return None,
            (Some(transition), None) | (None, Some(transition)) => {
                return Some(TransitionMismatch {
                    time: transition.time,
                    kind: MismatchKind::MissingTransition,
                })
            }
            (Some(next_a), Some(next_b)) => (next_a, next_b),
        };

        if next_a.time != next_b.time {
            return Some(TransitionMismatch {
                time: next_a.time.min(next_b.time),
                kind: MismatchKind::TransitionTime,
            });
        }
        if !offsets_match(next_a.to.offset(), next_b.to.offset(), ignore_dst) {
            return Some(TransitionMismatch {
                time: next_a.time,
                kind: MismatchKind::Offset,
            });
        }
        time = next_a.time;
    }
}

fn offsets_match(a: ZoneOffset, b: ZoneOffset, ignore_dst: bool) -> bool {
    if ignore_dst {
        a.raw_offset == b.raw_offset
    } else {
        a == b
    }
}

/// Returns the next transition of `zone` after `base` and no later than `end`.
fn next_in_range<Z: BasicTimeZone + ?Sized>(
    zone: &Z,
    base: i64,
    end: i64,
) -> Option<TimeZoneTransition<'_>> {
    zone.next_transition(base, false).filter(|transition| transition.time <= end)
}
