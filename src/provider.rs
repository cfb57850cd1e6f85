//! The `ZoneProvider` trait and the records it returns.
//!
//! The provider is the boundary between calendar arithmetic and the
//! zone database. Both operations take the zone name as an explicit
//! argument, so implementations need no process-global state and all
//! zone-sensitive operations stay re-entrant.

use tinystr::{tinystr, TinyAsciiStr};

use crate::{epoch::EpochSeconds, fields::CivilDateTime, TimeResult};

/// A zone designation such as "UTC", "CET" or "AEDT".
pub type ZoneAbbreviation = TinyAsciiStr<8>;

pub(crate) const UTC_ABBREVIATION: ZoneAbbreviation = tinystr!(8, "UTC");

/// The offset regime a zone applies at some instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneRecord {
    /// Seconds to add to UTC to reach the zone's wall clock.
    pub offset: i64,
    /// Whether daylight saving time is in effect.
    pub is_dst: bool,
    /// The designation of the regime.
    pub abbreviation: ZoneAbbreviation,
}

impl ZoneRecord {
    /// The trivial regime of the UTC zone.
    pub(crate) const fn utc() -> Self {
        Self {
            offset: 0,
            is_dst: false,
            abbreviation: UTC_ABBREVIATION,
        }
    }
}

/// A wall time resolved to a unique position on the absolute timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedWallTime {
    pub epoch: EpochSeconds,
    pub record: ZoneRecord,
}

/// The interpretations a zone admits for a civil wall time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallCandidates {
    /// The wall time exists exactly once.
    Unique(ResolvedWallTime),
    /// The wall time falls in a spring-forward gap and does not exist.
    /// The regimes on both sides of the transition are provided so
    /// callers can shift past the missing interval.
    Gap {
        before: ZoneRecord,
        after: ZoneRecord,
    },
    /// The wall time falls in a fall-back overlap and occurs twice;
    /// the pre-transition (daylight) instant comes first.
    Overlap([ResolvedWallTime; 2]),
}

/// Zone database access with the zone name as an explicit argument.
pub trait ZoneProvider {
    /// Resolves a civil wall time in the named zone to its possible
    /// positions on the absolute timeline.
    fn candidates_for_civil(
        &self,
        zone: &str,
        civil: CivilDateTime,
    ) -> TimeResult<WallCandidates>;

    /// Returns the regime the named zone applies at an absolute instant.
    fn offset_at(&self, zone: &str, epoch: EpochSeconds) -> TimeResult<ZoneRecord>;

    /// Reports whether the named zone has daylight saving rules at any
    /// point, past, present or future.
    fn has_transition_rules(&self, zone: &str) -> TimeResult<bool>;
}
