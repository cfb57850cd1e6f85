//! Canonicalization of broken-down fields under a representation.
//!
//! Normalization first cascades denormal fields, then interprets the
//! result in a zone. Constructors use [`Mode::Strict`], where a wall
//! time inside a spring-forward gap is an error; arithmetic uses
//! [`Mode::AdjustForward`], where the fields shift past the gap by the
//! missing amount. Fall-back overlaps are disambiguated by the DST
//! hint, defaulting to the pre-transition instant.

use crate::{
    epoch::EpochSeconds,
    fields::CivilDateTime,
    provider::{ResolvedWallTime, WallCandidates, ZoneProvider, ZoneRecord},
    TimeError, TimeResult,
};

/// How the normalizer resolves wall times inside a gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    /// A wall time in a gap is invalid input.
    Strict,
    /// A wall time in a gap shifts forward by the missing amount.
    AdjustForward,
}

/// The caller's request for overlap disambiguation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DstHint {
    /// Let the zone rules decide; overlaps pick the pre-transition
    /// instant.
    Auto,
    /// Prefer the standard-time instant of an overlap.
    Off,
    /// Prefer the daylight instant of an overlap.
    On,
}

/// The outcome of normalization: canonical fields, the absolute time
/// they denote, and the zone regime in effect.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Normalized {
    pub(crate) fields: CivilDateTime,
    pub(crate) epoch: EpochSeconds,
    pub(crate) record: ZoneRecord,
}

/// Normalizes raw fields under UTC representation. UTC is trivial: no
/// zone consultation, offset zero, daylight saving never in effect.
pub(crate) fn normalize_utc(
    year: i64,
    month: i64,
    day: i64,
    hour: i64,
    minute: i64,
    second: i64,
) -> TimeResult<Normalized> {
    let fields = CivilDateTime::balance(year, month, day, hour, minute, second)?;
    let epoch = EpochSeconds(fields.wall_seconds());
    epoch.check_validity()?;
    Ok(Normalized {
        fields,
        epoch,
        record: ZoneRecord::utc(),
    })
}

/// Normalizes raw fields as civil time in the named zone.
pub(crate) fn normalize_local(
    zone: &str,
    year: i64,
    month: i64,
    day: i64,
    hour: i64,
    minute: i64,
    second: i64,
    hint: DstHint,
    mode: Mode,
    provider: &impl ZoneProvider,
) -> TimeResult<Normalized> {
    let fields = CivilDateTime::balance(year, month, day, hour, minute, second)?;
    match provider.candidates_for_civil(zone, fields)? {
        WallCandidates::Unique(resolved) => from_resolved(fields, resolved),
        WallCandidates::Overlap([earlier, later]) => {
            let resolved = match hint {
                DstHint::Auto => earlier,
                DstHint::On => {
                    if earlier.record.is_dst {
                        earlier
                    } else {
                        later
                    }
                }
                DstHint::Off => {
                    if later.record.is_dst {
                        earlier
                    } else {
                        later
                    }
                }
            };
            from_resolved(fields, resolved)
        }
        WallCandidates::Gap { before, after } => match mode {
            Mode::Strict => Err(TimeError::invalid_input()
                .with_message("wall time does not exist in this zone")),
            Mode::AdjustForward => {
                let epoch = EpochSeconds(fields.wall_seconds() - before.offset);
                epoch.check_validity()?;
                Ok(Normalized {
                    fields: CivilDateTime::from_epoch(epoch, after.offset),
                    epoch,
                    record: after,
                })
            }
        },
    }
}

fn from_resolved(fields: CivilDateTime, resolved: ResolvedWallTime) -> TimeResult<Normalized> {
    resolved.epoch.check_validity()?;
    Ok(Normalized {
        fields,
        epoch: resolved.epoch,
        record: resolved.record,
    })
}
