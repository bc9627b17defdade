//! This module implements `RuleBasedTimeZone`.

use alloc::{string::String, vec, vec::Vec};

use crate::{
    error::ErrorMessage,
    rule::{InitialTimeZoneRule, TimeZoneRule, ZoneOffset},
    transition::TimeZoneTransition,
    tzrules_assert,
    zone::BasicTimeZone,
    TzRuleError, TzRuleResult,
};


/// The most final rules a zone may hold.
const MAX_FINAL_RULES: usize = 2;

/// A resolved transition, referencing rules by their index in the zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HistoricTransition {
    time: i64,
    from: usize,
    to: usize,
}

/// A time zone defined by an initial rule and a set of transition rules.
///
/// Transitions are ordered by the instant they compute, not by the order their
/// rules were added. Annual rules that never expire are the zone's final
/// rules. When two of them are present they alternate forever once every
/// other rule is exhausted, otherwise every rule is resolved into a fixed
/// table of historic transitions.
///
/// When two rules take effect at the same instant, the rule added last wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleBasedTimeZone {
    id: String,
    /// The initial rule followed by the transition rules in insertion order.
    rules: Vec<TimeZoneRule>,
    /// Indexes into `rules` of the unbounded annual rules.
    finals: Vec<usize>,
    transitions: Vec<HistoricTransition>,
}

impl RuleBasedTimeZone {
    /// Creates a zone that stays in the state of `initial` until transition
    /// rules are added.
    pub fn new(id: impl Into<String>, initial: InitialTimeZoneRule) -> Self {
        Self {
            id: id.into(),
            rules: vec![TimeZoneRule::Initial(initial)],
            finals: Vec::new(),
            transitions: Vec::new(),
        }
    }

    /// Creates a zone from an initial rule and its transition rules.
    ///
    /// The transition table is built once, after every rule is accepted.
    pub fn try_from_rules<I>(
        id: impl Into<String>,
        initial: InitialTimeZoneRule,
        rules: I,
    ) -> TzRuleResult<Self>
    where
        I: IntoIterator,
        I::Item: Into<TimeZoneRule>,
    {
        let mut zone = Self::new(id, initial);
        for rule in rules {
            zone.push_rule(rule.into())?;
        }
        zone.transitions = build_transitions(&zone.rules, zone.final_pair())?;
        #[cfg(feature = "log")]
        log::debug!(
            "Built {} historic transitions for {}",
            zone.transitions.len(),
            zone.id
        );
        Ok(zone)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the initial rule of this zone.
    pub fn initial_rule(&self) -> &TimeZoneRule {
        &self.rules[0]
    }

    /// Returns the transition rules in the order they were added.
    pub fn transition_rules(&self) -> &[TimeZoneRule] {
        &self.rules[1..]
    }

    /// Adds a transition rule to this zone.
    ///
    /// Initial rules are rejected with a type error, and a third rule that
    /// never expires is rejected with a range error. The zone is left unchanged
    /// when an error is returned.
    pub fn add_transition_rule(&mut self, rule: impl Into<TimeZoneRule>) -> TzRuleResult<()> {
        let finals = self.finals.len();
        self.push_rule(rule.into())?;
        match build_transitions(&self.rules, self.final_pair()) {
            Ok(transitions) => {
                #[cfg(feature = "log")]
                log::debug!(
                    "Rebuilt {} historic transitions for {}",
                    transitions.len(),
                    self.id
                );
                self.transitions = transitions;
                Ok(())
            }
            Err(err) => {
                self.rules.pop();
                self.finals.truncate(finals);
                Err(err)
            }
        }
    }

    /// Validates `rule` and appends it without touching the transition table.
    fn push_rule(&mut self, rule: TimeZoneRule) -> TzRuleResult<()> {
        if !rule.is_transition_rule() {
            return Err(TzRuleError::r#type().with_enum(ErrorMessage::NotATransitionRule));
        }
        if rule.is_unbounded() {
            if self.finals.len() >= MAX_FINAL_RULES {
                return Err(TzRuleError::range().with_enum(ErrorMessage::TooManyFinalRules));
            }
            self.finals.push(self.rules.len());
        }
        self.rules.push(rule);
        Ok(())
    }

    /// Returns whether both zones are made of the same rules.
    ///
    /// Rule names are ignored, the final rules may be in either order, and the
    /// other transition rules may have been added in any order.
    pub fn has_same_rules(&self, other: &Self) -> bool {
        if !self.rules[0].is_equivalent_to(&other.rules[0]) {
            return false;
        }
        match (self.final_pair(), other.final_pair()) {
            (None, None) => {}
            (Some((a0, a1)), Some((b0, b1))) => {
                let (a0, a1) = (&self.rules[a0], &self.rules[a1]);
                let (b0, b1) = (&other.rules[b0], &other.rules[b1]);
                let same_order = a0.is_equivalent_to(b0) && a1.is_equivalent_to(b1);
                let swapped = a0.is_equivalent_to(b1) && a1.is_equivalent_to(b0);
                if !same_order && !swapped {
                    return false;
                }
            }
            _ => return false,
        }

        let historic = self.historic_rules().collect::<Vec<_>>();
        let mut remaining = other.historic_rules().collect::<Vec<_>>();
        if historic.len() != remaining.len() {
            return false;
        }
        historic.iter().all(|rule| {
            match remaining
                .iter()
                .position(|candidate| rule.is_equivalent_to(candidate))
            {
                Some(idx) => {
                    remaining.swap_remove(idx);
                    true
                }
                None => false,
            }
        })
    }

    /// Returns the offsets in effect at the UTC instant `utc`.
    pub fn offset(&self, utc: i64) -> ZoneOffset {
        self.rule_at(utc, false).offset()
    }

    /// Returns the offsets in effect at the local wall time `local`.
    pub fn local_offset(&self, local: i64) -> ZoneOffset {
        self.rule_at(local, true).offset()
    }

    /// Returns the first transition after `base`, or at `base` when
    /// `inclusive`. Transitions that do not change the offsets are skipped.
    pub fn next_transition(&self, base: i64, inclusive: bool) -> Option<TimeZoneTransition<'_>> {
        let mut base = base;
        let mut inclusive = inclusive;
        loop {
            let (transition, is_final) = self.find_next(base, inclusive)?;
            if !transition.is_offset_neutral() {
                return Some(transition);
            }
            // A neutral final pair stays neutral forever.
            if is_final {
                return None;
            }
            base = transition.time;
            inclusive = false;
        }
    }

    /// Returns the last transition before `base`, or at `base` when
    /// `inclusive`. Transitions that do not change the offsets are skipped.
    pub fn previous_transition(
        &self,
        base: i64,
        inclusive: bool,
    ) -> Option<TimeZoneTransition<'_>> {
        let mut base = base;
        let mut inclusive = inclusive;
        loop {
            let (transition, is_final) = self.find_previous(base, inclusive)?;
            if !transition.is_offset_neutral() {
                return Some(transition);
            }
            if is_final {
                // Resume from the end of the table rather than walking a
                // neutral final pair back one year at a time.
                base = self.transitions.last()?.time;
                inclusive = true;
            } else {
                base = transition.time;
                inclusive = false;
            }
        }
    }

    /// Returns the initial rule and the transition rules of this zone.
    pub fn time_zone_rules(&self) -> (&TimeZoneRule, Vec<&TimeZoneRule>) {
        (&self.rules[0], self.rules[1..].iter().collect())
    }
}

// ==== Private lookups ====

impl RuleBasedTimeZone {
    fn final_pair(&self) -> Option<(usize, usize)> {
        final_pair(&self.finals)
    }

    fn historic_rules(&self) -> impl Iterator<Item = &TimeZoneRule> {
        let pair = self.final_pair();
        self.rules
            .iter()
            .enumerate()
            .skip(1)
            .filter(move |(idx, _)| !is_in_pair(pair, *idx))
            .map(|(_, rule)| rule)
    }

    fn resolve(&self, transition: HistoricTransition) -> TimeZoneTransition<'_> {
        TimeZoneTransition::new(
            transition.time,
            &self.rules[transition.from],
            &self.rules[transition.to],
        )
    }

    /// The instant a table entry takes effect, in UTC or in local wall time.
    fn transition_time(&self, transition: &HistoricTransition, local: bool) -> i64 {
        if local {
            let from = self.rules[transition.from].offset().total();
            transition.time.saturating_add(from)
        } else {
            transition.time
        }
    }

    fn rule_at(&self, time: i64, local: bool) -> &TimeZoneRule {
        let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) else {
            return &self.rules[0];
        };
        if time < self.transition_time(first, local) {
            return &self.rules[0];
        }
        if time >= self.transition_time(last, local) {
            return match self.final_rule_at(time, local) {
                Some((start, idx)) if start >= last.time => &self.rules[idx],
                _ => &self.rules[last.to],
            };
        }
        let idx = self
            .transitions
            .partition_point(|transition| self.transition_time(transition, local) <= time);
        // `idx` is at least one, since the first transition is at or before `time`.
        self.transitions
            .get(idx.saturating_sub(1))
            .map_or(&self.rules[0], |transition| &self.rules[transition.to])
    }

    /// Returns the latest start of the final pair at or before `time`, and the
    /// index of the rule taking effect then.
    fn final_rule_at(&self, time: i64, local: bool) -> Option<(i64, usize)> {
        let (a, b) = self.final_pair()?;
        let (rule_a, rule_b) = (&self.rules[a], &self.rules[b]);
        let base_for = |prior: &TimeZoneRule| {
            if local {
                time.saturating_sub(prior.offset().total())
            } else {
                time
            }
        };
        let start_a = rule_a.previous_start(
            base_for(rule_b),
            rule_b.raw_offset(),
            rule_b.dst_savings(),
            true,
        );
        let start_b = rule_b.previous_start(
            base_for(rule_a),
            rule_a.raw_offset(),
            rule_a.dst_savings(),
            true,
        );
        match (start_a, start_b) {
            (Some(start_a), Some(start_b)) if start_a > start_b => Some((start_a, a)),
            (_, Some(start_b)) => Some((start_b, b)),
            (Some(start_a), None) => Some((start_a, a)),
            (None, None) => None,
        }
    }

    /// Finds the next table or final transition, reporting whether it came
    /// from the final pair.
    fn find_next(&self, base: i64, inclusive: bool) -> Option<(TimeZoneTransition<'_>, bool)> {
        let last = self.transitions.last()?;
        let is_after = |time: i64| time > base || (inclusive && time == base);
        if is_after(last.time) {
            let idx = self
                .transitions
                .partition_point(|transition| !is_after(transition.time));
            let transition = self.transitions.get(idx)?;
            return Some((self.resolve(*transition), false));
        }

        let (a, b) = self.final_pair()?;
        let (rule_a, rule_b) = (&self.rules[a], &self.rules[b]);
        let start_a = rule_a.next_start(base, rule_b.raw_offset(), rule_b.dst_savings(), inclusive);
        let start_b = rule_b.next_start(base, rule_a.raw_offset(), rule_a.dst_savings(), inclusive);
        let transition = match (start_a, start_b) {
            (Some(start_a), Some(start_b)) if start_a < start_b => {
                TimeZoneTransition::new(start_a, rule_b, rule_a)
            }
            (_, Some(start_b)) => TimeZoneTransition::new(start_b, rule_a, rule_b),
            (Some(start_a), None) => TimeZoneTransition::new(start_a, rule_b, rule_a),
            (None, None) => return None,
        };
        Some((transition, true))
    }

    /// Finds the previous table or final transition, reporting whether it came
    /// from the final pair.
    fn find_previous(
        &self,
        base: i64,
        inclusive: bool,
    ) -> Option<(TimeZoneTransition<'_>, bool)> {
        let is_before = |time: i64| time < base || (inclusive && time == base);
        let first = self.transitions.first()?;
        if !is_before(first.time) {
            return None;
        }
        let last = self.transitions.last()?;
        if !is_before(last.time) {
            let idx = self
                .transitions
                .partition_point(|transition| is_before(transition.time));
            let transition = self.transitions.get(idx.checked_sub(1)?)?;
            return Some((self.resolve(*transition), false));
        }

        let table_end = (self.resolve(*last), false);
        let Some((a, b)) = self.final_pair() else {
            return Some(table_end);
        };
        let (rule_a, rule_b) = (&self.rules[a], &self.rules[b]);
        let start_a =
            rule_a.previous_start(base, rule_b.raw_offset(), rule_b.dst_savings(), inclusive);
        let start_b =
            rule_b.previous_start(base, rule_a.raw_offset(), rule_a.dst_savings(), inclusive);
        let transition = match (start_a, start_b) {
            (Some(start_a), Some(start_b)) if start_a > start_b => {
                TimeZoneTransition::new(start_a, rule_b, rule_a)
            }
            (_, Some(start_b)) => TimeZoneTransition::new(start_b, rule_a, rule_b),
            (Some(start_a), None) => TimeZoneTransition::new(start_a, rule_b, rule_a),
            (None, None) => return Some(table_end),
        };
        if transition.time <= last.time {
            return Some(table_end);
        }
        Some((transition, true))
    }
}

// ==== Transition table ====

fn final_pair(finals: &[usize]) -> Option<(usize, usize)> {
    match *finals {
        [a, b] => Some((a, b)),
        _ => None,
    }
}

fn is_in_pair(pair: Option<(usize, usize)>, idx: usize) -> bool {
    pair.is_some_and(|(a, b)| idx == a || idx == b)
}

/// Resolves `rules` into the table of historic transitions.
///
/// The table ends with the first two transitions of the final pair, if there
/// is one. Later transitions are computed from the final pair on demand.
fn build_transitions(
    rules: &[TimeZoneRule],
    pair: Option<(usize, usize)>,
) -> TzRuleResult<Vec<HistoricTransition>> {
    let mut transitions = Vec::new();
    let mut exhausted = vec![false; rules.len()];
    let mut current = 0;
    let mut last_time = i64::MIN;

    loop {
        let prior = &rules[current];
        let mut next: Option<(i64, usize)> = None;
        let mut historic_pending = false;

        for (idx, rule) in rules.iter().enumerate().skip(1) {
            let is_final = is_in_pair(pair, idx);
            if exhausted[idx] || idx == current || rule.has_same_state(prior) {
                historic_pending |= !is_final && !exhausted[idx];
                continue;
            }
            let Some(time) =
                rule.next_start(last_time, prior.raw_offset(), prior.dst_savings(), false)
            else {
                if !is_final {
                    exhausted[idx] = true;
                }
                continue;
            };
            historic_pending |= !is_final;
            // Ties go to the rule added last.
            if next.is_none_or(|(next_time, _)| time <= next_time) {
                next = Some((time, idx));
            }
        }

        let Some((time, idx)) = next else {
            break;
        };
        if !historic_pending {
            break;
        }
        tzrules_assert!(
            time > last_time,
            "Transition table is not increasing at {time} for rule {idx}"
        );
        transitions.push(HistoricTransition {
            time,
            from: current,
            to: idx,
        });
        last_time = time;
        current = idx;
    }

    if let Some(pair) = pair {
        append_final_pair(rules, pair, current, last_time, &mut transitions);
    }
    Ok(transitions)
}

/// Appends the first transition of each final rule after `last_time`.
fn append_final_pair(
    rules: &[TimeZoneRule],
    (a, b): (usize, usize),
    current: usize,
    last_time: i64,
    transitions: &mut Vec<HistoricTransition>,
) {
    let prior = &rules[current];
    let next_of = |idx: usize, base: i64, prior: &TimeZoneRule| {
        rules[idx].next_start(base, prior.raw_offset(), prior.dst_savings(), false)
    };

    let (first, second) = if current == a || current == b {
        let other = if current == a { b } else { a };
        (other, current)
    } else {
        match (next_of(a, last_time, prior), next_of(b, last_time, prior)) {
            (Some(start_a), Some(start_b)) if start_a < start_b => (a, b),
            (_, Some(_)) => (b, a),
            (Some(_), None) => (a, b),
            (None, None) => return,
        }
    };

    let Some(first_time) = next_of(first, last_time, prior) else {
        return;
    };
    transitions.push(HistoricTransition {
        time: first_time,
        from: current,
        to: first,
    });
    if let Some(second_time) = next_of(second, first_time, &rules[first]) {
        transitions.push(HistoricTransition {
            time: second_time,
            from: first,
            to: second,
        });
    }
}

impl BasicTimeZone for RuleBasedTimeZone {
    fn id(&self) -> &str {
        self.id()
    }

    fn offset(&self, utc: i64) -> ZoneOffset {
        self.offset(utc)
    }

    fn local_offset(&self, local: i64) -> ZoneOffset {
        self.local_offset(local)
    }

    fn next_transition(&self, base: i64, inclusive: bool) -> Option<TimeZoneTransition<'_>> {
        self.next_transition(base, inclusive)
    }

    fn previous_transition(&self, base: i64, inclusive: bool) -> Option<TimeZoneTransition<'_>> {
        self.previous_transition(base, inclusive)
    }

    fn time_zone_rules(&self) -> (&TimeZoneRule, Vec<&TimeZoneRule>) {
        self.time_zone_rules()
    }
}
