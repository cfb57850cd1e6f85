//! Broken-down civil field records and the overflow-closed cascade.
//!
//! A [`CivilDateTime`] carries the year/month/day and hour/minute/second
//! fields of an instant without any zone interpretation. The cascade in
//! [`CivilDateTime::balance`] folds denormal fields (month 13, day 40,
//! second 3600, day 0, negative values) into the canonical ranges using
//! epoch-day arithmetic; zone interpretation happens afterwards in the
//! normalizer.

use crate::{epoch::EpochSeconds, utils, TimeError, TimeResult, SECS_PER_DAY};

/// Kinds of representation for an instant in time.
///
/// The representation is display metadata: switching it re-projects
/// the broken-down fields without moving the instant on the absolute
/// timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Representation {
    /// Civil time in the process's local zone.
    Local,
    /// Coordinated universal time.
    Utc,
}

/// Months of the Gregorian calendar, numbered 1 through 12.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Month {
    January = 1,
    February = 2,
    March = 3,
    April = 4,
    May = 5,
    June = 6,
    July = 7,
    August = 8,
    September = 9,
    October = 10,
    November = 11,
    December = 12,
}

impl Month {
    /// Returns the month number, 1 through 12.
    #[inline]
    #[must_use]
    pub fn number(self) -> u8 {
        self as u8
    }

    /// Returns the month with the given number, if it is in range.
    #[must_use]
    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Self::January),
            2 => Some(Self::February),
            3 => Some(Self::March),
            4 => Some(Self::April),
            5 => Some(Self::May),
            6 => Some(Self::June),
            7 => Some(Self::July),
            8 => Some(Self::August),
            9 => Some(Self::September),
            10 => Some(Self::October),
            11 => Some(Self::November),
            12 => Some(Self::December),
            _ => None,
        }
    }

    pub(crate) fn from_valid_number(number: u8) -> Self {
        Self::from_number(number).unwrap_or_else(|| {
            unreachable!("month numbers are validated by normalization")
        })
    }
}

impl TryFrom<u8> for Month {
    type Error = TimeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_number(value)
            .ok_or_else(|| TimeError::invalid_input().with_message("month number out of range"))
    }
}

/// Days of the week, Monday=1 through Sunday=7.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Weekday {
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
    Sunday = 7,
}

impl Weekday {
    /// Returns the ISO weekday number, 1 through 7.
    #[inline]
    #[must_use]
    pub fn number(self) -> u8 {
        self as u8
    }

    /// Returns the weekday with the given ISO number, if it is in range.
    #[must_use]
    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Self::Monday),
            2 => Some(Self::Tuesday),
            3 => Some(Self::Wednesday),
            4 => Some(Self::Thursday),
            5 => Some(Self::Friday),
            6 => Some(Self::Saturday),
            7 => Some(Self::Sunday),
            _ => None,
        }
    }

    pub(crate) fn from_valid_number(number: u8) -> Self {
        Self::from_number(number).unwrap_or_else(|| {
            unreachable!("weekday numbers are validated by normalization")
        })
    }
}

impl TryFrom<u8> for Weekday {
    type Error = TimeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_number(value)
            .ok_or_else(|| TimeError::invalid_input().with_message("weekday number out of range"))
    }
}

/// Year bound applied before epoch-day arithmetic so the day math
/// cannot overflow an `i64` even for absurd month counts.
const YEAR_CASCADE_LIMIT: i64 = 3_000_000_000;

/// Day bound of the cascade, slightly wider than the instant range so
/// zone offsets applied later stay representable.
const DAY_CASCADE_LIMIT: i64 = 100_000_002;

/// A Gregorian calendar date.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CivilDate {
    pub year: i32,
    /// 1 = January .. 12 = December.
    pub month: u8,
    pub day: u8,
}

impl CivilDate {
    pub(crate) const fn new_unchecked(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Returns the epoch day number of this date.
    pub(crate) fn to_epoch_days(self) -> i64 {
        utils::days_from_civil(i64::from(self.year), self.month, i64::from(self.day))
    }

    /// Returns the ISO weekday number (Monday=1 .. Sunday=7).
    pub(crate) fn weekday_number(self) -> u8 {
        utils::weekday_from_days(self.to_epoch_days())
    }

    /// Returns the 1-based day of the year.
    pub(crate) fn day_of_year(self) -> u16 {
        utils::day_of_year(i64::from(self.year), self.month, self.day)
    }
}

/// A wall-clock time of day.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeOfDay {
    /// 0..=23
    pub hour: u8,
    /// 0..=59
    pub minute: u8,
    /// 0..=59
    pub second: u8,
}

impl TimeOfDay {
    pub(crate) fn from_seconds_of_day(seconds: i64) -> Self {
        Self {
            hour: (seconds / utils::SECS_PER_HOUR) as u8,
            minute: (seconds / utils::SECS_PER_MINUTE % 60) as u8,
            second: (seconds % 60) as u8,
        }
    }

    /// Returns the elapsed wall seconds since the start of the day.
    pub(crate) fn seconds_of_day(self) -> i64 {
        i64::from(self.hour) * utils::SECS_PER_HOUR
            + i64::from(self.minute) * utils::SECS_PER_MINUTE
            + i64::from(self.second)
    }
}

/// A civil date and time of day, not yet tied to any zone.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CivilDateTime {
    pub date: CivilDate,
    pub time: TimeOfDay,
}

impl CivilDateTime {
    pub(crate) const fn new_unchecked(date: CivilDate, time: TimeOfDay) -> Self {
        Self { date, time }
    }

    /// Cascades possibly denormal fields into canonical ranges.
    ///
    /// Month overflow folds into the year, day overflow walks the
    /// calendar (40 October becomes 9 November, day 0 the last day of
    /// the previous month), and second overflow carries through
    /// minutes, hours and days. Fails with `Overflow` when the result
    /// leaves the representable range.
    pub(crate) fn balance(
        year: i64,
        month: i64,
        day: i64,
        hour: i64,
        minute: i64,
        second: i64,
    ) -> TimeResult<Self> {
        let month_index = month.checked_sub(1).ok_or_else(TimeError::overflow)?;
        let year = year
            .checked_add(month_index.div_euclid(12))
            .ok_or_else(TimeError::overflow)?;
        if year.abs() > YEAR_CASCADE_LIMIT {
            return Err(TimeError::overflow());
        }
        let month = (month_index.rem_euclid(12) + 1) as u8;

        let day_seconds = second
            .checked_add(
                minute
                    .checked_mul(utils::SECS_PER_MINUTE)
                    .ok_or_else(TimeError::overflow)?,
            )
            .ok_or_else(TimeError::overflow)?
            .checked_add(
                hour.checked_mul(utils::SECS_PER_HOUR)
                    .ok_or_else(TimeError::overflow)?,
            )
            .ok_or_else(TimeError::overflow)?;

        let days = utils::days_from_civil(year, month, 1)
            .checked_add(day.checked_sub(1).ok_or_else(TimeError::overflow)?)
            .ok_or_else(TimeError::overflow)?
            .checked_add(day_seconds.div_euclid(SECS_PER_DAY))
            .ok_or_else(TimeError::overflow)?;
        if days.abs() > DAY_CASCADE_LIMIT {
            return Err(TimeError::overflow());
        }

        let (year, month, day) = utils::civil_from_days(days);
        Ok(Self {
            date: CivilDate::new_unchecked(year as i32, month, day),
            time: TimeOfDay::from_seconds_of_day(day_seconds.rem_euclid(SECS_PER_DAY)),
        })
    }

    /// Projects an absolute instant through a fixed UTC offset.
    pub(crate) fn from_epoch(epoch: EpochSeconds, offset: i64) -> Self {
        let local = epoch.0 + offset;
        let (year, month, day) = utils::civil_from_days(local.div_euclid(SECS_PER_DAY));
        Self {
            date: CivilDate::new_unchecked(year as i32, month, day),
            time: TimeOfDay::from_seconds_of_day(local.rem_euclid(SECS_PER_DAY)),
        }
    }

    /// Returns the wall fields counted as seconds from the epoch, as if
    /// the fields were UTC. This is the input to zone resolution.
    pub(crate) fn wall_seconds(self) -> i64 {
        self.date.to_epoch_days() * SECS_PER_DAY + self.time.seconds_of_day()
    }
}
