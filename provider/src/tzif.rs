//! `TzifTimeZone`, a `BasicTimeZone` backed by TZif data.
//!
//! `TZif` stands for Time zone information format and is laid out by
//! [RFC 8536][rfc8536]. The data is parsed by the `tzif` [crate][tzif-crate]
//! and then expressed as `tzrules_rs` rules:
//!
//! - the first local time type becomes the initial rule,
//! - every state reached by the transition table becomes a
//!   `TimeArrayTimeZoneRule` holding the UTC instants it takes effect at,
//! - a footer with a daylight saving part becomes a pair of unbounded
//!   `AnnualTimeZoneRule`s that take over the year after the table ends.
//!
//! The footer transitions left in the last year of the table are resolved
//! into UTC instants and join the table, so the annual rules always start
//! from one of the footer's own states.
//!
//! [rfc8536]: https://datatracker.ietf.org/doc/html/rfc8536
//! [tzif-crate]: https://docs.rs/tzif/latest/tzif/

use std::path::Path;

use combine::Parser;
use tzif::data::{
    posix::PosixTzString,
    tzif::{DataBlock, LocalTimeTypeRecord, TzifData},
};
use tzrules_rs::{
    utils, AnnualTimeZoneRule, BasicTimeZone, InitialTimeZoneRule, RuleBasedTimeZone,
    TimeArrayTimeZoneRule, TimeRuleType, TimeZoneRule, TimeZoneTransition, ZoneOffset,
    MS_PER_SECOND,
};

use crate::{
    posix::{self, seconds_to_millis, FooterOffsets, DEFAULT_START_YEAR},
    TzifError, TzifResult,
};

const SECONDS_PER_HOUR: i64 = 3_600;

/// A time zone loaded from TZif data.
///
/// Queries are answered by the `RuleBasedTimeZone` made of the zone's own
/// rules, so the rules returned by [`TzifTimeZone::time_zone_rules`] rebuild
/// an equivalent zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TzifTimeZone {
    zone: RuleBasedTimeZone,
}

/// The UTC instants each named state takes effect at, in order of first use.
#[derive(Debug, Default)]
struct TableStates(Vec<(String, ZoneOffset, Vec<i64>)>);

impl TableStates {
    fn push(&mut self, name: &str, offset: ZoneOffset, time: i64) {
        match self
            .0
            .iter_mut()
            .find(|(state_name, state_offset, _)| state_name == name && *state_offset == offset)
        {
            Some((_, _, times)) => times.push(time),
            None => self.0.push((name.to_string(), offset, vec![time])),
        }
    }

    fn into_rules(self) -> TzifResult<Vec<TimeZoneRule>> {
        self.0
            .into_iter()
            .map(|(name, offset, times)| {
                let rule = TimeArrayTimeZoneRule::try_new(
                    name,
                    offset.raw_offset,
                    offset.dst_savings,
                    times,
                    TimeRuleType::Utc,
                )?;
                Ok(rule.into())
            })
            .collect()
    }
}

// ==== Construction ====

impl TzifTimeZone {
    /// Creates a zone from parsed TZif data.
    ///
    /// The version 2+ data block is used when present, otherwise the version
    /// 1 block.
    pub fn from_tzif(id: impl Into<String>, data: &TzifData) -> TzifResult<Self> {
        let id = id.into();
        let block = data.data_block2.as_ref().unwrap_or(&data.data_block1);
        let records = &block.local_time_type_records;
        if records.is_empty() {
            return Err(TzifError::MalformedData("Missing local time type records."));
        }

        let mut initial_type = 0;
        let mut entries = Vec::with_capacity(block.transition_times.len());
        for (time, &ty) in block.transition_times.iter().zip(&block.transition_types) {
            if ty >= records.len() {
                return Err(TzifError::MalformedData("Transition type is out of range."));
            }
            match time.0.checked_mul(MS_PER_SECOND) {
                Some(millis) => entries.push((millis, ty)),
                // Earlier than any millisecond instant, so it only sets the
                // initial state.
                None if time.0 < 0 => initial_type = ty,
                None => break,
            }
        }
        let sequence = entries.iter().map(|&(_, ty)| ty).collect::<Vec<_>>();

        let initial = &records[initial_type];
        let offset = split_offset(initial, nearest_standard(records, initial_type, &sequence, None))?;
        let initial = InitialTimeZoneRule::new(
            designation(block, initial),
            offset.raw_offset,
            offset.dst_savings,
        );

        // The entries leading into the footer take their split from it.
        let footer_offsets = data.footer.as_ref().map(FooterOffsets::new);
        let footer_run_start = footer_offsets.map_or(entries.len(), |offsets| {
            let run = entries
                .iter()
                .rev()
                .take_while(|&&(_, ty)| {
                    let record = &records[ty];
                    offsets.split(record.utoff.0, record.is_dst).is_some()
                })
                .count();
            entries.len() - run
        });

        let mut states = TableStates::default();
        let mut last = None;
        for (position, &(time, ty)) in entries.iter().enumerate() {
            let record = &records[ty];
            let footer_split = footer_offsets
                .filter(|_| position >= footer_run_start)
                .and_then(|offsets| offsets.split(record.utoff.0, record.is_dst));
            let offset = match footer_split {
                Some((raw, dst)) => {
                    ZoneOffset::new(seconds_to_millis(raw)?, seconds_to_millis(dst)?)
                }
                None => split_offset(
                    record,
                    nearest_standard(records, initial_type, &sequence, Some(position)),
                )?,
            };
            states.push(designation(block, record), offset, time);
            last = Some((time, offset));
        }

        let mut finals = None;
        if let Some(footer) = &data.footer {
            let name_of = |utoff, is_dst| footer_name(block, &sequence, utoff, is_dst);
            let start_year = match last {
                Some((time, offset)) => {
                    let year = utils::year_from_epoch_ms(time.saturating_add(offset.total()));
                    push_footer_transitions(&mut states, footer, year, time, &name_of)?;
                    year.saturating_add(1)
                }
                None => DEFAULT_START_YEAR,
            };
            finals = posix::final_rules(footer, start_year, &name_of)?;
        }

        let mut rules = states.into_rules()?;
        if let Some((enter, leave)) = finals {
            rules.push(enter.into());
            rules.push(leave.into());
        }

        #[cfg(feature = "log")]
        log::debug!(
            "Loaded {id} with {} table transitions and {} rules",
            entries.len(),
            rules.len()
        );

        let zone = RuleBasedTimeZone::try_from_rules(id, initial, rules)?;
        Ok(Self { zone })
    }

    /// Parses `data` as a TZif file.
    pub fn from_bytes(id: impl Into<String>, data: &[u8]) -> TzifResult<Self> {
        let Ok((parse_result, _)) = tzif::parse::tzif::tzif().parse(data) else {
            return Err(TzifError::MalformedData("Illformed TZif data."));
        };
        Self::from_tzif(id, &parse_result)
    }

    /// Reads and parses the TZif file at `path`.
    pub fn from_path<P: AsRef<Path>>(id: impl Into<String>, path: P) -> TzifResult<Self> {
        let data = tzif::parse_tzif_file(path.as_ref())?;
        Self::from_tzif(id, &data)
    }

    /// Loads `identifier` from the bundled IANA time zone database.
    ///
    /// Identifiers are matched case insensitively. The zone is named by its
    /// canonical identifier.
    #[cfg(feature = "tzdb")]
    pub fn from_tzdb(identifier: &str) -> TzifResult<Self> {
        let Some((canonical_name, data)) = jiff_tzdb::get(identifier) else {
            return Err(TzifError::UnknownIdentifier);
        };
        Self::from_bytes(canonical_name, data)
    }
}

/// Adds the footer transitions of `year` that come after the last table entry
/// at `after`.
fn push_footer_transitions<F>(
    states: &mut TableStates,
    footer: &PosixTzString,
    year: i32,
    after: i64,
    name_of: F,
) -> TzifResult<()>
where
    F: Fn(i64, bool) -> String,
{
    let Some((enter, leave)) = posix::final_rules(footer, year, name_of)? else {
        return Ok(());
    };
    let (raw, dst) = (enter.raw_offset(), enter.dst_savings());
    let in_year = |rule: &AnnualTimeZoneRule, prior_dst: i32| {
        rule.start_in_year(year, raw, prior_dst).filter(|&time| time > after)
    };
    if let Some(time) = in_year(&enter, 0) {
        states.push(enter.name(), ZoneOffset::new(raw, dst), time);
    }
    if let Some(time) = in_year(&leave, dst) {
        states.push(leave.name(), ZoneOffset::new(raw, 0), time);
    }
    Ok(())
}

/// Returns the UTC offset of the standard time type closest to `position` in
/// the transition sequence, searching backwards first. `None` stands for the
/// initial state.
fn nearest_standard(
    records: &[LocalTimeTypeRecord],
    initial_type: usize,
    sequence: &[usize],
    position: Option<usize>,
) -> Option<i64> {
    let (before, after) = match position {
        Some(position) => (
            sequence.get(..position).unwrap_or_default(),
            sequence.get(position + 1..).unwrap_or_default(),
        ),
        None => (&[][..], sequence),
    };
    let initial = position.map(|_| initial_type);
    before
        .iter()
        .rev()
        .copied()
        .chain(initial)
        .chain(after.iter().copied())
        .filter_map(|ty| records.get(ty))
        .find(|record| !record.is_dst)
        .map(|record| record.utoff.0)
}

/// Splits the UTC offset of `record` into its raw offset and daylight saving
/// amount.
fn split_offset(record: &LocalTimeTypeRecord, standard: Option<i64>) -> TzifResult<ZoneOffset> {
    let utoff = record.utoff.0;
    let (raw, dst) = if record.is_dst {
        match standard {
            Some(raw) if utoff > raw => (raw, utoff - raw),
            _ => (utoff - SECONDS_PER_HOUR, SECONDS_PER_HOUR),
        }
    } else {
        (utoff, 0)
    };
    Ok(ZoneOffset::new(seconds_to_millis(raw)?, seconds_to_millis(dst)?))
}

/// Returns the time zone designation of `record`.
fn designation<'a>(block: &'a DataBlock, record: &LocalTimeTypeRecord) -> &'a str {
    // `idx` is a byte offset into the NUL separated designations.
    let mut start = 0;
    for name in &block.time_zone_designations {
        let end = start + name.len();
        if (start..=end).contains(&record.idx) {
            return name.get(record.idx - start..).unwrap_or_default();
        }
        start = end + 1;
    }
    ""
}

/// Names a footer state after the latest table type with the same offset.
fn footer_name(block: &DataBlock, sequence: &[usize], utoff: i64, is_dst: bool) -> String {
    let records = &block.local_time_type_records;
    sequence
        .iter()
        .rev()
        .filter_map(|&ty| records.get(ty))
        .chain(records.iter())
        .find(|record| record.utoff.0 == utoff && record.is_dst == is_dst)
        .map_or_else(
            || numeric_designation(utoff),
            |record| designation(block, record).to_string(),
        )
}

/// Formats an offset the way numeric designations such as `-05` or `+0530`
/// are written.
fn numeric_designation(utoff: i64) -> String {
    let sign = if utoff < 0 { '-' } else { '+' };
    let minutes = utoff.abs() / 60;
    match (minutes / 60, minutes % 60) {
        (hours, 0) => format!("{sign}{hours:02}"),
        (hours, minutes) => format!("{sign}{hours:02}{minutes:02}"),
    }
}

// ==== Queries ====

impl TzifTimeZone {
    pub fn id(&self) -> &str {
        self.zone.id()
    }

    /// Returns the offsets in effect at the UTC instant `utc`.
    pub fn offset(&self, utc: i64) -> ZoneOffset {
        self.zone.offset(utc)
    }

    /// Returns the offsets in effect at the local wall time `local`.
    pub fn local_offset(&self, local: i64) -> ZoneOffset {
        self.zone.local_offset(local)
    }

    /// Returns the first transition after `base`, or at `base` when
    /// `inclusive`.
    pub fn next_transition(&self, base: i64, inclusive: bool) -> Option<TimeZoneTransition<'_>> {
        self.zone.next_transition(base, inclusive)
    }

    /// Returns the last transition before `base`, or at `base` when
    /// `inclusive`.
    pub fn previous_transition(
        &self,
        base: i64,
        inclusive: bool,
    ) -> Option<TimeZoneTransition<'_>> {
        self.zone.previous_transition(base, inclusive)
    }

    /// Returns the initial rule and the transition rules of this zone.
    pub fn time_zone_rules(&self) -> (&TimeZoneRule, Vec<&TimeZoneRule>) {
        self.zone.time_zone_rules()
    }

    /// The rule based zone answering this zone's queries.
    pub fn as_rule_based(&self) -> &RuleBasedTimeZone {
        &self.zone
    }
}

impl From<TzifTimeZone> for RuleBasedTimeZone {
    fn from(value: TzifTimeZone) -> Self {
        value.zone
    }
}

impl BasicTimeZone for TzifTimeZone {
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

#[cfg(test)]
mod tests {
    use super::*;
    use tzrules_rs::{DateRule, Month, Weekday, MS_PER_HOUR};

    const HOUR: i32 = MS_PER_HOUR as i32;

    /// Writes a TZif version 2 file with an empty version 1 block.
    fn tzif_bytes(
        transitions: &[(i64, u8)],
        types: &[(i32, bool, u8)],
        designations: &str,
        footer: &str,
    ) -> Vec<u8> {
        let header = |out: &mut Vec<u8>, timecnt: usize, typecnt: usize, charcnt: usize| {
            out.extend_from_slice(b"TZif2");
            out.extend_from_slice(&[0; 15]);
            // isutcnt, isstdcnt, leapcnt, timecnt, typecnt, charcnt
            for count in [0, 0, 0, timecnt, typecnt, charcnt] {
                out.extend_from_slice(&(count as u32).to_be_bytes());
            }
        };
        let local_time_types = |out: &mut Vec<u8>| {
            for &(utoff, is_dst, idx) in types {
                out.extend_from_slice(&utoff.to_be_bytes());
                out.push(u8::from(is_dst));
                out.push(idx);
            }
            out.extend_from_slice(designations.as_bytes());
        };

        let mut out = Vec::new();
        header(&mut out, 0, types.len(), designations.len());
        local_time_types(&mut out);

        header(&mut out, transitions.len(), types.len(), designations.len());
        for (time, _) in transitions {
            out.extend_from_slice(&time.to_be_bytes());
        }
        for (_, ty) in transitions {
            out.push(*ty);
        }
        local_time_types(&mut out);
        out.push(b'\n');
        out.extend_from_slice(footer.as_bytes());
        out.push(b'\n');
        out
    }

    /// A zone in the shape of `America/New_York` since 2007.
    fn eastern() -> TzifTimeZone {
        let bytes = tzif_bytes(
            // 2007-03-11T07:00:00Z and 2007-11-04T06:00:00Z
            &[(1_173_596_400, 1), (1_194_156_000, 0)],
            &[(-18_000, false, 0), (-14_400, true, 4)],
            "EST\0EDT\0",
            "EST5EDT,M3.2.0,M11.1.0",
        );
        TzifTimeZone::from_bytes("Test/Eastern", &bytes).unwrap()
    }

    #[test]
    fn table_and_footer_rules() {
        let zone = eastern();
        let (initial, rules) = zone.time_zone_rules();
        assert_eq!(initial.name(), "EST");
        assert_eq!(rules.len(), 4);

        let TimeZoneRule::TimeArray(daylight) = rules[0] else {
            panic!("expected a time array rule, got {}", rules[0]);
        };
        assert_eq!(daylight.name(), "EDT");
        assert_eq!(daylight.raw_offset(), -5 * HOUR);
        assert_eq!(daylight.dst_savings(), HOUR);
        assert_eq!(daylight.start_times(), &[1_173_596_400_000]);

        let TimeZoneRule::Annual(enter) = rules[2] else {
            panic!("expected an annual rule, got {}", rules[2]);
        };
        assert_eq!(enter.name(), "EDT");
        // Both 2007 footer transitions are already in the table.
        assert_eq!(enter.start_year(), 2008);
        assert_eq!(
            enter.rule().date_rule(),
            DateRule::WeekdayInMonth {
                week: 2,
                weekday: Weekday::Sunday
            }
        );
        let TimeZoneRule::Annual(leave) = rules[3] else {
            panic!("expected an annual rule, got {}", rules[3]);
        };
        assert_eq!(leave.name(), "EST");
        assert_eq!(leave.rule().month(), Month::November);
    }

    #[test]
    fn queries_cross_into_the_footer() {
        let zone = eastern();
        let transition = zone.next_transition(1_173_596_400_000, true).unwrap();
        assert_eq!(transition.time, 1_173_596_400_000);
        assert_eq!(transition.to.name(), "EDT");

        // 2008-03-09T07:00:00Z, the first footer transition.
        let transition = zone.next_transition(1_194_156_000_000, false).unwrap();
        assert_eq!(transition.time, 1_205_046_000_000);
        assert_eq!(transition.from.name(), "EST");
        assert_eq!(transition.to.name(), "EDT");

        let transition = zone.previous_transition(1_205_046_000_000, false).unwrap();
        assert_eq!(transition.time, 1_194_156_000_000);

        // 2024-07-01T00:00:00Z
        assert_eq!(zone.offset(1_719_792_000_000), ZoneOffset::new(-5 * HOUR, HOUR));
        assert_eq!(zone.offset(0), ZoneOffset::new(-5 * HOUR, 0));
    }

    #[test]
    fn local_offsets() {
        let zone = eastern();
        // 2008-03-09T02:00 local, the first footer transition in standard time.
        let start = 1_205_028_000_000;
        assert_eq!(zone.local_offset(start).dst_savings, HOUR);
        assert_eq!(zone.local_offset(start - 1).dst_savings, 0);
        // 2007-03-11T02:00 local, from the table.
        let start = 1_173_578_400_000;
        assert_eq!(zone.local_offset(start).dst_savings, HOUR);
        assert_eq!(zone.local_offset(start - 1).dst_savings, 0);
    }

    /// Collects the next `count` transitions from the start of time.
    fn walk(zone: &TzifTimeZone, count: usize) -> Vec<TimeZoneTransition<'_>> {
        let mut transitions = Vec::new();
        let mut time = i64::MIN;
        while transitions.len() < count {
            let transition = zone.next_transition(time, false).unwrap();
            time = transition.time;
            transitions.push(transition);
        }
        transitions
    }

    #[test]
    fn table_ending_in_another_standard_offset() {
        // In the shape of `Europe/Lisbon`, which left CET for WEST in 1996.
        let bytes = tzif_bytes(
            // 1996-03-31T01:00:00Z
            &[(828_234_000, 1)],
            &[(3_600, false, 0), (3_600, true, 4), (0, false, 9)],
            "CET\0WEST\0WET\0",
            "WET0WEST,M3.5.0/1,M10.5.0",
        );
        let zone = TzifTimeZone::from_bytes("Test/Lisbon", &bytes).unwrap();

        let transitions = walk(&zone, 3);
        assert_eq!(transitions[0].time, 828_234_000_000);
        assert_eq!(transitions[0].from.offset(), ZoneOffset::new(HOUR, 0));
        assert_eq!(transitions[0].to.offset(), ZoneOffset::new(0, HOUR));
        // 1996-10-27T01:00:00Z, left in the year of the last table entry.
        assert_eq!(transitions[1].time, 846_378_000_000);
        assert_eq!(transitions[1].to.name(), "WET");
        // 1997-03-30T01:00:00Z, the first transition of the annual rules.
        assert_eq!(transitions[2].time, 859_683_600_000);
        assert_eq!(transitions[2].from.offset(), ZoneOffset::new(0, 0));

        let (_, rules) = zone.time_zone_rules();
        let TimeZoneRule::Annual(enter) = rules[rules.len() - 2] else {
            panic!("expected an annual rule, got {}", rules[rules.len() - 2]);
        };
        assert_eq!(enter.start_year(), 1997);

        let (initial, rules) = zone.time_zone_rules();
        let TimeZoneRule::Initial(initial) = initial else {
            panic!("expected an initial rule, got {initial}");
        };
        let rebuilt = RuleBasedTimeZone::try_from_rules(
            "Rebuilt",
            initial.clone(),
            rules.into_iter().cloned(),
        )
        .unwrap();
        // 2040-01-01T00:00:00Z
        assert!(zone.has_equivalent_transitions(&rebuilt, i64::MIN / 2, 2_208_988_800_000, false));
    }

    #[test]
    fn table_ending_in_another_daylight_offset() {
        // In the shape of `America/Indiana/Winamac`, which moved from Central
        // to Eastern time in 2007.
        let bytes = tzif_bytes(
            // 2006-04-02T08:00:00Z, 2006-10-29T07:00:00Z, 2007-03-11T08:00:00Z
            &[(1_143_964_800, 1), (1_162_105_200, 0), (1_173_600_000, 2)],
            &[
                (-21_600, false, 0),
                (-18_000, true, 4),
                (-14_400, true, 8),
                (-18_000, false, 12),
            ],
            "CST\0CDT\0EDT\0EST\0",
            "EST5EDT,M3.2.0,M11.1.0",
        );
        let zone = TzifTimeZone::from_bytes("Test/Winamac", &bytes).unwrap();

        let transitions = walk(&zone, 5);
        let times = transitions.iter().map(|t| t.time).collect::<Vec<_>>();
        assert_eq!(
            times,
            [
                1_143_964_800_000,
                1_162_105_200_000,
                1_173_600_000_000,
                // 2007-11-04T06:00:00Z, left in the year of the last table entry.
                1_194_156_000_000,
                // 2008-03-09T07:00:00Z
                1_205_046_000_000,
            ]
        );
        for pair in transitions.windows(2) {
            assert_eq!(pair[0].to.offset(), pair[1].from.offset());
        }
        // Central daylight time keeps the Central raw offset.
        assert_eq!(transitions[0].to.offset(), ZoneOffset::new(-6 * HOUR, HOUR));
        // Eastern daylight time is split the way the footer splits it.
        assert_eq!(transitions[2].to.offset(), ZoneOffset::new(-5 * HOUR, HOUR));
        assert_eq!(transitions[3].to.name(), "EST");
        // 2007-07-01T00:00:00Z
        assert_eq!(zone.raw_offset_at(1_183_248_000_000), -5 * HOUR);
    }

    #[test]
    fn julian_day_footer() {
        let bytes = tzif_bytes(&[], &[(-10_800, false, 0)], "XST\0", "XST3XDT,J60/2,J300/2");
        let zone = TzifTimeZone::from_bytes("Test/Julian", &bytes).unwrap();
        let (_, rules) = zone.time_zone_rules();
        let TimeZoneRule::Annual(enter) = rules[0] else {
            panic!("expected an annual rule, got {}", rules[0]);
        };
        assert_eq!(enter.start_year(), 1970);
        assert_eq!(enter.rule().month(), Month::March);
        assert_eq!(enter.rule().day_of_month_value(), Some(1));
        // No XDT type in the table, so the name is derived from the offset.
        assert_eq!(enter.name(), "-02");
        let TimeZoneRule::Annual(leave) = rules[1] else {
            panic!("expected an annual rule, got {}", rules[1]);
        };
        assert_eq!(leave.rule().month(), Month::October);
        assert_eq!(leave.rule().day_of_month_value(), Some(27));

        // 1970-03-01T05:00:00Z
        let transition = zone.next_transition(i64::MIN, false).unwrap();
        assert_eq!(transition.time, 5_115_600_000);
        assert_eq!(transition.to.dst_savings(), HOUR);
    }

    #[test]
    fn zero_based_julian_days_are_unsupported() {
        let bytes = tzif_bytes(&[], &[(-10_800, false, 0)], "XST\0", "XST3XDT,60/2,300/2");
        let err = TzifTimeZone::from_bytes("Test/Julian", &bytes).unwrap_err();
        assert!(matches!(err, TzifError::Unsupported(_)));
        assert_eq!(err.kind(), tzrules_rs::error::ErrorKind::Unsupported);
    }

    #[test]
    fn standard_only_zone() {
        let bytes = tzif_bytes(&[], &[(-18_000, false, 0)], "-05\0", "<-05>5");
        let zone = TzifTimeZone::from_bytes("Etc/GMT+5", &bytes).unwrap();
        assert_eq!(zone.time_zone_rules().1.len(), 0);
        assert_eq!(zone.offset(0), ZoneOffset::new(-5 * HOUR, 0));
        assert_eq!(zone.next_transition(i64::MIN, true), None);
        assert_eq!(zone.previous_transition(i64::MAX, true), None);
    }

    #[test]
    fn malformed_data() {
        let err = TzifTimeZone::from_bytes("Test/Empty", b"not a tzif file").unwrap_err();
        assert_eq!(err.kind(), tzrules_rs::error::ErrorKind::Syntax);
    }

    #[test]
    fn numeric_designations() {
        assert_eq!(numeric_designation(-18_000), "-05");
        assert_eq!(numeric_designation(19_800), "+0530");
        assert_eq!(numeric_designation(0), "+00");
    }
}
