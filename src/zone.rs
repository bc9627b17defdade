//! The `BasicTimeZone` trait.

use alloc::vec::Vec;

use crate::{
    compare,
    rule::{AnnualTimeZoneRule, InitialTimeZoneRule, TimeArrayTimeZoneRule, TimeZoneRule, ZoneOffset},
    transition::TimeZoneTransition,
    utils, TzRuleError, TzRuleResult,
};

/// A time zone that can report its offsets, walk its transitions, and
/// describe itself as a set of `TimeZoneRule`s.
///
/// All instants are milliseconds since the Unix epoch.
pub trait BasicTimeZone {
    /// The identifier of this zone.
    fn id(&self) -> &str;

    /// Returns the offsets in effect at the UTC instant `utc`.
    fn offset(&self, utc: i64) -> ZoneOffset;

    /// Returns the offsets in effect at the local wall time `local`.
    fn local_offset(&self, local: i64) -> ZoneOffset;

    /// Returns the first transition after `base`, or at `base` when
    /// `inclusive`.
    fn next_transition(&self, base: i64, inclusive: bool) -> Option<TimeZoneTransition<'_>>;

    /// Returns the last transition before `base`, or at `base` when
    /// `inclusive`.
    fn previous_transition(&self, base: i64, inclusive: bool) -> Option<TimeZoneTransition<'_>>;

    /// Returns the initial rule and the transition rules of this zone.
    fn time_zone_rules(&self) -> (&TimeZoneRule, Vec<&TimeZoneRule>);

    fn raw_offset_at(&self, utc: i64) -> i32 {
        self.offset(utc).raw_offset
    }

    fn in_daylight_time(&self, utc: i64) -> bool {
        self.offset(utc).dst_savings != 0
    }

    /// Returns whether daylight saving time is in effect at `utc` or will be
    /// after the next transition.
    fn uses_daylight_time_at(&self, utc: i64) -> bool {
        self.in_daylight_time(utc)
            || self
                .next_transition(utc, false)
                .is_some_and(|transition| transition.to.dst_savings() != 0)
    }

    /// Returns whether daylight saving time is in effect now or will be after
    /// the next transition.
    #[cfg(feature = "sys")]
    fn uses_daylight_time(&self) -> TzRuleResult<bool> {
        let now = crate::sys::get_system_milliseconds()?;
        Ok(self.uses_daylight_time_at(now))
    }

    /// Returns whether both zones have the same offsets at `start` and the
    /// same transitions in `(start, end]`.
    ///
    /// When `ignore_dst` is set, only the raw offsets are compared.
    fn has_equivalent_transitions(
        &self,
        other: &dyn BasicTimeZone,
        start: i64,
        end: i64,
        ignore_dst: bool,
    ) -> bool {
        compare::has_equivalent_transitions(self, other, start, end, ignore_dst)
    }

    /// Returns the rules describing this zone from `start` onward.
    ///
    /// The returned initial rule is the state in effect at `start`. Time
    /// array rules only keep their start times after `start`, and annual
    /// rules that began before `start` are moved to the year of their first
    /// transition after it.
    fn time_zone_rules_since(
        &self,
        start: i64,
    ) -> TzRuleResult<(InitialTimeZoneRule, Vec<TimeZoneRule>)> {
        let (initial, rules) = self.time_zone_rules();

        let Some(previous) = self.previous_transition(start, true) else {
            let initial = match initial {
                TimeZoneRule::Initial(rule) => rule.clone(),
                rule => InitialTimeZoneRule::new(rule.name(), rule.raw_offset(), rule.dst_savings()),
            };
            return Ok((initial, rules.into_iter().cloned().collect()));
        };

        let offset = self.offset(start);
        let initial =
            InitialTimeZoneRule::new(previous.to.name(), offset.raw_offset, offset.dst_savings);

        // Rules that no longer fire after `start` are never needed.
        let mut done = rules
            .iter()
            .map(|rule| {
                rule.next_start(
                    start,
                    previous.from.raw_offset(),
                    previous.from.dst_savings(),
                    false,
                )
                .is_none()
            })
            .collect::<Vec<_>>();

        let mut filtered = Vec::new();
        let (mut final_std, mut final_dst) = (false, false);
        let mut time = start;
        while !(final_std && final_dst) && !done.iter().all(|done| *done) {
            let Some(transition) = self.next_transition(time, false) else {
                break;
            };
            time = transition.time;

            let Some(idx) = rules.iter().position(|rule| *rule == transition.to) else {
                #[cfg(feature = "log")]
                log::error!("{} transitions into an unknown rule at {time}", self.id());
                return Err(TzRuleError::assert());
            };
            if done[idx] {
                continue;
            }
            done[idx] = true;

            let prior = transition.from.offset();
            match transition.to {
                TimeZoneRule::TimeArray(rule) => {
                    if let Some(rule) = time_array_since(rule, prior, start)? {
                        filtered.push(rule);
                    }
                }
                TimeZoneRule::Annual(rule) => {
                    filtered.push(annual_since(rule, prior, transition.time)?);
                    if rule.is_unbounded() {
                        if rule.dst_savings() == 0 {
                            final_std = true;
                        } else {
                            final_dst = true;
                        }
                    }
                }
                TimeZoneRule::Initial(_) => {}
            }
        }

        Ok((initial, filtered))
    }
}

/// Keeps the start times of `rule` that come after `start`.
fn time_array_since(
    rule: &TimeArrayTimeZoneRule,
    prior: ZoneOffset,
    start: i64,
) -> TzRuleResult<Option<TimeZoneRule>> {
    let first = rule.first_start(prior.raw_offset, prior.dst_savings);
    if first.is_some_and(|first| first > start) {
        return Ok(Some(rule.clone().into()));
    }
    let times = rule
        .start_times()
        .iter()
        .copied()
        .filter(|&time| rule.utc_time(time, prior.raw_offset, prior.dst_savings) > start)
        .collect::<Vec<_>>();
    if times.is_empty() {
        return Ok(None);
    }
    let rule = TimeArrayTimeZoneRule::try_new(
        rule.name(),
        rule.raw_offset(),
        rule.dst_savings(),
        times,
        rule.time_type(),
    )?;
    Ok(Some(rule.into()))
}

/// Moves the start of `rule` to the year it takes effect at `time`.
fn annual_since(
    rule: &AnnualTimeZoneRule,
    prior: ZoneOffset,
    time: i64,
) -> TzRuleResult<TimeZoneRule> {
    if rule.first_start(prior.raw_offset, prior.dst_savings) == Some(time) {
        return Ok(rule.clone().into());
    }
    // The local date of the transition may fall in the neighboring UTC year.
    let year = utils::year_from_epoch_ms(time);
    let year = [year, year.saturating_sub(1), year.saturating_add(1)]
        .into_iter()
        .find(|&y| rule.start_in_year(y, prior.raw_offset, prior.dst_savings) == Some(time))
        .unwrap_or(year);
    let rule = AnnualTimeZoneRule::try_new(
        rule.name(),
        rule.raw_offset(),
        rule.dst_savings(),
        *rule.rule(),
        year,
        rule.end_year(),
    )?;
    Ok(rule.into())
}
