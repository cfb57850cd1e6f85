//! A calendar and clock toolbox over the proleptic Gregorian calendar
//! with one-second resolution.
//!
//! The central type is [`Instant`]: a point in time carried as
//! broken-down civil fields under a [`Representation`] tag. The tag
//! declares whether the fields read as UTC or as civil time in the
//! process's local zone; switching it re-projects the fields without
//! moving the instant on the absolute timeline.
//!
//! Daylight saving time is taken into account under Local
//! representation: days carrying a transition are 23 or 25 wall-clock
//! hours long when added or compared, wall times inside a
//! spring-forward gap are rejected by constructors and shifted past
//! the gap by arithmetic, and the two instants sharing a wall time at
//! a fall-back overlap are told apart by the daylight flag and the
//! fold operations.
//!
//! Zone data reaches the crate through the [`ZoneProvider`] trait,
//! which takes the zone name as an explicit argument; the shipped
//! [`FsZoneProvider`] reads TZif files from the system zoneinfo
//! directory and falls back to a bundled copy of the IANA database.
//!
//! ```no_run
//! use civil_time::{FsZoneProvider, Instant, Month};
//!
//! let provider = FsZoneProvider::default();
//! let mut instant = Instant::from_local(2016, Month::March, 14, 9, 0, 0, &provider)?;
//! instant.add_days(14, &provider)?;
//! assert_eq!(instant.day(), 28);
//! assert_eq!(instant.hour(), 9);
//! # Ok::<(), civil_time::TimeError>(())
//! ```
#![cfg_attr(not(test), forbid(clippy::unwrap_used))]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap
)]

pub mod calendar;
pub mod error;
pub mod locale;
pub mod provider;
pub mod sys;
pub mod tzdb;

pub(crate) mod epoch;
pub(crate) mod fields;
pub(crate) mod normalize;
pub(crate) mod utils;

mod diff;
mod instant;

/// Re-export of `TinyAsciiStr` from `tinystr`, the backing type of
/// zone abbreviations.
pub use tinystr::TinyAsciiStr;

#[doc(inline)]
pub use error::{ErrorKind, TimeError};

/// The crate's result type.
pub type TimeResult<T> = Result<T, TimeError>;

pub use diff::{DaySpan, MonthSpan, WeekSpan, YearSpan};
pub use epoch::EpochSeconds;
pub use fields::{CivilDate, CivilDateTime, Month, Representation, TimeOfDay, Weekday};
pub use instant::{Instant, ZoneProjection};
pub use locale::{LocaleFormatter, PatternLocale};
pub use provider::{
    ResolvedWallTime, WallCandidates, ZoneAbbreviation, ZoneProvider, ZoneRecord,
};
pub use tzdb::{FsZoneProvider, Tzif};

/// Seconds per day constant: 8.64e+4.
pub const SECS_PER_DAY: i64 = 24 * 60 * 60;
/// Max instant second constant, 100 million days from the epoch.
pub(crate) const SECS_MAX_INSTANT: i64 = SECS_PER_DAY * 100_000_000;
/// Min instant second constant.
pub(crate) const SECS_MIN_INSTANT: i64 = -SECS_MAX_INSTANT;
