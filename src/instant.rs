//! The tagged civil instant and its mutating operations.
//!
//! An [`Instant`] is a point in time held as broken-down Gregorian
//! fields together with a representation tag. The tag is display
//! metadata: switching between Local and UTC re-projects the fields
//! but never moves the instant on the absolute timeline. Every public
//! operation leaves the value normalized, so the absolute time, the
//! weekday, and the day of the year are always coherent with the
//! visible fields.

use core::cmp::Ordering;

use crate::{
    calendar,
    epoch::EpochSeconds,
    fields::{CivilDate, CivilDateTime, Month, Representation, TimeOfDay, Weekday},
    normalize::{self, DstHint, Mode, Normalized},
    provider::{ResolvedWallTime, WallCandidates, ZoneAbbreviation, ZoneProvider, ZoneRecord},
    sys, TimeError, TimeResult,
};

/// A point in time with one-second resolution, carried as civil fields
/// under a Local or UTC representation tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instant {
    date: CivilDate,
    time: TimeOfDay,
    day_of_week: Weekday,
    day_of_year: u16,
    is_dst: bool,
    offset_seconds: i64,
    abbreviation: ZoneAbbreviation,
    representation: Representation,
    epoch: EpochSeconds,
}

/// An instant's broken-down civil time in another zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneProjection {
    pub year: i32,
    pub month: Month,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub is_dst: bool,
}

impl Instant {
    pub(crate) fn from_normalized(normalized: Normalized, representation: Representation) -> Self {
        let fields = normalized.fields;
        Self {
            date: fields.date,
            time: fields.time,
            day_of_week: Weekday::from_valid_number(fields.date.weekday_number()),
            day_of_year: fields.date.day_of_year(),
            is_dst: normalized.record.is_dst,
            offset_seconds: normalized.record.offset,
            abbreviation: normalized.record.abbreviation,
            representation,
            epoch: normalized.epoch,
        }
    }

    // ==== Constructors ====

    /// Creates an instant from the current wall clock, in Local
    /// representation.
    #[cfg(feature = "sys")]
    pub fn now(provider: &impl ZoneProvider) -> TimeResult<Self> {
        Self::from_binary(sys::epoch_now(), provider)
    }

    /// Creates an instant at the beginning of the current local day.
    #[cfg(feature = "sys")]
    pub fn today(provider: &impl ZoneProvider) -> TimeResult<Self> {
        let mut instant = Self::now(provider)?;
        instant.trim_time(provider)?;
        Ok(instant)
    }

    /// Creates an instant from civil fields in the process's local
    /// zone.
    ///
    /// Fails with `InvalidInput` when any field is out of range or the
    /// wall time falls in a spring-forward gap. A wall time in a
    /// fall-back overlap resolves to the earlier, pre-transition
    /// instant.
    pub fn from_local(
        year: i32,
        month: Month,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        provider: &impl ZoneProvider,
    ) -> TimeResult<Self> {
        let normalized = normalize::normalize_local(
            &sys::local_zone_id(),
            i64::from(year),
            i64::from(month.number()),
            i64::from(day),
            i64::from(hour),
            i64::from(minute),
            i64::from(second),
            DstHint::Auto,
            Mode::Strict,
            provider,
        )?;
        check_fields_unchanged(&normalized, year, month, day, hour, minute, second)?;
        Ok(Self::from_normalized(normalized, Representation::Local))
    }

    /// Creates an instant from civil fields interpreted as UTC.
    pub fn from_utc(
        year: i32,
        month: Month,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> TimeResult<Self> {
        let normalized = normalize::normalize_utc(
            i64::from(year),
            i64::from(month.number()),
            i64::from(day),
            i64::from(hour),
            i64::from(minute),
            i64::from(second),
        )?;
        check_fields_unchanged(&normalized, year, month, day, hour, minute, second)?;
        Ok(Self::from_normalized(normalized, Representation::Utc))
    }

    /// Reconstructs an instant from its binary form, in Local
    /// representation. The result denotes the same absolute time that
    /// [`Instant::to_binary`] recorded.
    pub fn from_binary(seconds: i64, provider: &impl ZoneProvider) -> TimeResult<Self> {
        let epoch = EpochSeconds(seconds);
        epoch.check_validity()?;
        let record = provider.offset_at(&sys::local_zone_id(), epoch)?;
        let fields = CivilDateTime::from_epoch(epoch, record.offset);
        Ok(Self::from_normalized(
            Normalized {
                fields,
                epoch,
                record,
            },
            Representation::Local,
        ))
    }

    /// Serializes the instant to seconds from the epoch. The value
    /// identifies the instant unambiguously, whatever the
    /// representation.
    #[must_use]
    pub fn to_binary(&self) -> i64 {
        self.epoch.as_i64()
    }

    // ==== Setters ====

    /// Replaces the civil fields, interpreted under the current
    /// representation. The representation is kept unchanged.
    pub fn set(
        &mut self,
        year: i32,
        month: Month,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        provider: &impl ZoneProvider,
    ) -> TimeResult<()> {
        let replacement = match self.representation {
            Representation::Local => {
                Self::from_local(year, month, day, hour, minute, second, provider)?
            }
            Representation::Utc => Self::from_utc(year, month, day, hour, minute, second)?,
        };
        *self = replacement;
        Ok(())
    }

    // ==== Representation ====

    /// Returns the current representation tag.
    #[must_use]
    pub fn representation(&self) -> Representation {
        self.representation
    }

    #[must_use]
    pub fn is_utc_representation(&self) -> bool {
        self.representation == Representation::Utc
    }

    #[must_use]
    pub fn is_local_representation(&self) -> bool {
        self.representation == Representation::Local
    }

    /// Switches to UTC representation. Has no effect when the instant
    /// is represented in UTC already.
    pub fn to_utc_representation(&mut self) {
        if self.representation == Representation::Utc {
            return;
        }
        let fields = CivilDateTime::from_epoch(self.epoch, 0);
        *self = Self::from_normalized(
            Normalized {
                fields,
                epoch: self.epoch,
                record: ZoneRecord::utc(),
            },
            Representation::Utc,
        );
    }

    /// Switches to Local representation. Has no effect when the
    /// instant is represented in local time already.
    pub fn to_local_representation(&mut self, provider: &impl ZoneProvider) -> TimeResult<()> {
        if self.representation == Representation::Local {
            return Ok(());
        }
        let record = provider.offset_at(&sys::local_zone_id(), self.epoch)?;
        let fields = CivilDateTime::from_epoch(self.epoch, record.offset);
        *self = Self::from_normalized(
            Normalized {
                fields,
                epoch: self.epoch,
                record,
            },
            Representation::Local,
        );
        Ok(())
    }

    // ==== Getters ====

    #[must_use]
    pub fn year(&self) -> i32 {
        self.date.year
    }

    #[must_use]
    pub fn month(&self) -> Month {
        Month::from_valid_number(self.date.month)
    }

    #[must_use]
    pub fn day(&self) -> u8 {
        self.date.day
    }

    #[must_use]
    pub fn hour(&self) -> u8 {
        self.time.hour
    }

    #[must_use]
    pub fn minute(&self) -> u8 {
        self.time.minute
    }

    #[must_use]
    pub fn second(&self) -> u8 {
        self.time.second
    }

    /// Returns the 1-based day of the year, 1 through 366.
    #[must_use]
    pub fn day_of_year(&self) -> u16 {
        self.day_of_year
    }

    #[must_use]
    pub fn day_of_week(&self) -> Weekday {
        self.day_of_week
    }

    /// Returns the ISO 8601 week number of the instant's date.
    #[must_use]
    pub fn iso_week(&self) -> u8 {
        calendar::iso_week_of(self.date)
    }

    /// Returns the ISO 8601 year the instant's week belongs to.
    #[must_use]
    pub fn iso_year(&self) -> i32 {
        calendar::iso_year_of(self.date)
    }

    /// Returns the offset, in seconds, between UTC and the instant's
    /// representation. Zero under UTC representation.
    #[must_use]
    pub fn utc_offset(&self) -> i64 {
        self.offset_seconds
    }

    /// Returns the designation of the zone regime in effect, such as
    /// "UTC", "CET" or "CEST".
    #[must_use]
    pub fn zone_abbreviation(&self) -> &str {
        self.abbreviation.as_str()
    }

    /// Returns the elapsed seconds since the beginning of the
    /// instant's day. On days with a daylight saving transition this
    /// differs from the wall-clock second count.
    pub fn seconds_of_day(&self, provider: &impl ZoneProvider) -> TimeResult<i64> {
        let midnight = self.normalized_midnight(provider)?;
        Ok(self.epoch.as_i64() - midnight.epoch.as_i64())
    }

    /// Reports whether daylight saving time is in effect. Always
    /// `false` under UTC representation.
    #[must_use]
    pub fn is_daylight_saving_time(&self) -> bool {
        self.is_dst
    }

    // ==== Arithmetic ====

    /// Adds seconds on the absolute timeline and re-derives the civil
    /// fields. A local day carrying a transition receives 23 or 25
    /// wall-clock hours' worth of seconds between its midnights.
    pub fn add_seconds(&mut self, seconds: i64, provider: &impl ZoneProvider) -> TimeResult<()> {
        let epoch = self.epoch.checked_add(seconds)?;
        self.reproject(epoch, provider)
    }

    /// Adds calendar days, preserving the wall-clock time of day where
    /// it exists. A result inside a spring-forward gap shifts forward
    /// by the missing amount; a result inside a fall-back overlap
    /// lands on the pre-transition instant.
    pub fn add_days(&mut self, days: i64, provider: &impl ZoneProvider) -> TimeResult<()> {
        let day = i64::from(self.date.day)
            .checked_add(days)
            .ok_or_else(TimeError::overflow)?;
        self.renormalize(
            i64::from(self.date.year),
            i64::from(self.date.month),
            day,
            i64::from(self.time.hour),
            i64::from(self.time.minute),
            i64::from(self.time.second),
            provider,
        )
    }

    /// Adds calendar months, clamping to the last day of the target
    /// month when the current day of the month does not exist there.
    pub fn add_months(&mut self, months: i64, provider: &impl ZoneProvider) -> TimeResult<()> {
        let day = self.date.day;
        let month = i64::from(self.date.month)
            .checked_add(months)
            .ok_or_else(TimeError::overflow)?;
        self.renormalize(
            i64::from(self.date.year),
            month,
            i64::from(day),
            i64::from(self.time.hour),
            i64::from(self.time.minute),
            i64::from(self.time.second),
            provider,
        )?;
        if self.date.day != day {
            // The cascade walked into the next month; day zero
            // addresses the last day of the intended one.
            self.renormalize(
                i64::from(self.date.year),
                i64::from(self.date.month),
                0,
                i64::from(self.time.hour),
                i64::from(self.time.minute),
                i64::from(self.time.second),
                provider,
            )?;
        }
        Ok(())
    }

    /// Adds calendar years. Equivalent to adding twelve times as many
    /// months.
    pub fn add_years(&mut self, years: i64, provider: &impl ZoneProvider) -> TimeResult<()> {
        let months = years.checked_mul(12).ok_or_else(TimeError::overflow)?;
        self.add_months(months, provider)
    }

    /// Sets the time of day to midnight, keeping the date.
    pub fn trim_time(&mut self, provider: &impl ZoneProvider) -> TimeResult<()> {
        self.renormalize(
            i64::from(self.date.year),
            i64::from(self.date.month),
            i64::from(self.date.day),
            0,
            0,
            0,
            provider,
        )
    }

    // ==== Daylight saving folds ====

    /// Reports whether the instant lies in a fall-back overlap on its
    /// pre-transition (daylight) side, so its wall time will occur
    /// again.
    pub fn is_extra_summer_time(&self, provider: &impl ZoneProvider) -> TimeResult<bool> {
        Ok(self
            .overlap_candidates(provider)?
            .is_some_and(|[earlier, _]| self.is_dst && earlier.epoch == self.epoch))
    }

    /// Reports whether the instant lies in a fall-back overlap on its
    /// post-transition (standard) side, so its wall time has already
    /// occurred.
    pub fn is_extra_winter_time(&self, provider: &impl ZoneProvider) -> TimeResult<bool> {
        Ok(self
            .overlap_candidates(provider)?
            .is_some_and(|[_, later]| !self.is_dst && later.epoch == self.epoch))
    }

    /// Shifts to the later of the two instants sharing this wall time
    /// at a fall-back overlap. Fails with `NotApplicable` outside an
    /// overlap, on the later instant already, or under UTC
    /// representation.
    pub fn to_extra_winter_time(&mut self, provider: &impl ZoneProvider) -> TimeResult<()> {
        let Some([earlier, later]) = self.overlap_candidates(provider)? else {
            return Err(TimeError::not_applicable()
                .with_message("wall time is not inside a fall-back overlap"));
        };
        if self.epoch != earlier.epoch {
            return Err(TimeError::not_applicable()
                .with_message("instant is already on the post-transition side"));
        }
        self.apply_overlap_side(later);
        Ok(())
    }

    /// Shifts to the earlier of the two instants sharing this wall
    /// time at a fall-back overlap. Fails with `NotApplicable` outside
    /// an overlap, on the earlier instant already, or under UTC
    /// representation.
    pub fn to_extra_summer_time(&mut self, provider: &impl ZoneProvider) -> TimeResult<()> {
        let Some([earlier, later]) = self.overlap_candidates(provider)? else {
            return Err(TimeError::not_applicable()
                .with_message("wall time is not inside a fall-back overlap"));
        };
        if self.epoch != later.epoch {
            return Err(TimeError::not_applicable()
                .with_message("instant is already on the pre-transition side"));
        }
        self.apply_overlap_side(earlier);
        Ok(())
    }

    // ==== Projection ====

    /// Returns the instant's civil fields in the named zone. The
    /// instant itself is not affected.
    pub fn in_time_zone(
        &self,
        zone: &str,
        provider: &impl ZoneProvider,
    ) -> TimeResult<ZoneProjection> {
        let record = provider.offset_at(zone, self.epoch)?;
        let fields = CivilDateTime::from_epoch(self.epoch, record.offset);
        Ok(ZoneProjection {
            year: fields.date.year,
            month: Month::from_valid_number(fields.date.month),
            day: fields.date.day,
            hour: fields.time.hour,
            minute: fields.time.minute,
            second: fields.time.second,
            is_dst: record.is_dst,
        })
    }

    // ==== Internals ====

    pub(crate) fn epoch(&self) -> EpochSeconds {
        self.epoch
    }

    pub(crate) fn civil_date(&self) -> CivilDate {
        self.date
    }

    pub(crate) fn time_of_day(&self) -> TimeOfDay {
        self.time
    }

    fn renormalize(
        &mut self,
        year: i64,
        month: i64,
        day: i64,
        hour: i64,
        minute: i64,
        second: i64,
        provider: &impl ZoneProvider,
    ) -> TimeResult<()> {
        let normalized = match self.representation {
            Representation::Utc => {
                normalize::normalize_utc(year, month, day, hour, minute, second)?
            }
            Representation::Local => normalize::normalize_local(
                &sys::local_zone_id(),
                year,
                month,
                day,
                hour,
                minute,
                second,
                DstHint::Auto,
                Mode::AdjustForward,
                provider,
            )?,
        };
        *self = Self::from_normalized(normalized, self.representation);
        Ok(())
    }

    fn reproject(&mut self, epoch: EpochSeconds, provider: &impl ZoneProvider) -> TimeResult<()> {
        let record = match self.representation {
            Representation::Utc => ZoneRecord::utc(),
            Representation::Local => provider.offset_at(&sys::local_zone_id(), epoch)?,
        };
        let fields = CivilDateTime::from_epoch(epoch, record.offset);
        *self = Self::from_normalized(
            Normalized {
                fields,
                epoch,
                record,
            },
            self.representation,
        );
        Ok(())
    }

    fn normalized_midnight(&self, provider: &impl ZoneProvider) -> TimeResult<Normalized> {
        match self.representation {
            Representation::Utc => normalize::normalize_utc(
                i64::from(self.date.year),
                i64::from(self.date.month),
                i64::from(self.date.day),
                0,
                0,
                0,
            ),
            Representation::Local => normalize::normalize_local(
                &sys::local_zone_id(),
                i64::from(self.date.year),
                i64::from(self.date.month),
                i64::from(self.date.day),
                0,
                0,
                0,
                DstHint::Auto,
                Mode::AdjustForward,
                provider,
            ),
        }
    }

    fn overlap_candidates(
        &self,
        provider: &impl ZoneProvider,
    ) -> TimeResult<Option<[ResolvedWallTime; 2]>> {
        if self.representation != Representation::Local {
            return Ok(None);
        }
        let civil = CivilDateTime::new_unchecked(self.date, self.time);
        match provider.candidates_for_civil(&sys::local_zone_id(), civil)? {
            WallCandidates::Overlap(pair) => Ok(Some(pair)),
            _ => Ok(None),
        }
    }

    fn apply_overlap_side(&mut self, side: ResolvedWallTime) {
        let fields = CivilDateTime::new_unchecked(self.date, self.time);
        *self = Self::from_normalized(
            Normalized {
                fields,
                epoch: side.epoch,
                record: side.record,
            },
            Representation::Local,
        );
    }
}

/// Constructors fail when normalization alters any user-supplied
/// field, which covers out-of-range input and impossible dates.
fn check_fields_unchanged(
    normalized: &Normalized,
    year: i32,
    month: Month,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
) -> TimeResult<()> {
    let fields = normalized.fields;
    let unchanged = fields.date.year == year
        && fields.date.month == month.number()
        && fields.date.day == day
        && fields.time.hour == hour
        && fields.time.minute == minute
        && fields.time.second == second;
    if unchanged {
        Ok(())
    } else {
        Err(TimeError::invalid_input().with_message("fields were altered by normalization"))
    }
}

impl PartialOrd for Instant {
    /// Orders instants on the absolute timeline. Instants with
    /// different representation tags are unordered.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.representation != other.representation {
            return None;
        }
        if self == other {
            return Some(Ordering::Equal);
        }
        match self.epoch.cmp(&other.epoch) {
            Ordering::Equal => None,
            ordering => Some(ordering),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sys;
    use crate::tzdb::FsZoneProvider;

    const HOUR: i64 = 3_600;

    fn paris() -> FsZoneProvider {
        sys::set_local_zone("Europe/Paris");
        FsZoneProvider::default()
    }

    fn fields(instant: &Instant) -> (i32, u8, u8, u8, u8, u8) {
        (
            instant.year(),
            instant.month().number(),
            instant.day(),
            instant.hour(),
            instant.minute(),
            instant.second(),
        )
    }

    #[test]
    fn local_constructor_validates_fields() {
        let provider = paris();
        assert!(Instant::from_local(2010, Month::May, 30, 17, 55, 21, &provider).is_ok());
        assert!(Instant::from_local(2010, Month::April, 31, 17, 55, 21, &provider).is_err());
        assert!(Instant::from_local(2015, Month::February, 29, 17, 55, 21, &provider).is_err());
        assert!(Instant::from_local(2016, Month::February, 29, 17, 55, 21, &provider).is_ok());
        assert!(Instant::from_local(2016, Month::February, 29, 17, 65, 21, &provider).is_err());
        // The wall hour skipped by the spring transition does not exist.
        assert!(Instant::from_local(2016, Month::March, 27, 2, 12, 21, &provider).is_err());

        let instant = Instant::from_local(2016, Month::October, 30, 2, 22, 21, &provider).unwrap();
        assert!(instant.is_local_representation());
        assert_eq!(instant.representation(), Representation::Local);
    }

    #[test]
    fn utc_constructor_knows_no_transitions() {
        assert!(Instant::from_utc(1969, Month::December, 31, 23, 59, 59).is_ok());
        assert!(Instant::from_utc(2010, Month::April, 31, 17, 55, 21).is_err());
        assert!(Instant::from_utc(2015, Month::February, 29, 17, 55, 21).is_err());
        assert!(Instant::from_utc(2016, Month::February, 29, 17, 65, 21).is_err());
        // No gap under UTC.
        let instant = Instant::from_utc(2016, Month::March, 27, 2, 12, 21).unwrap();
        assert!(instant.is_utc_representation());
        assert_eq!(instant.utc_offset(), 0);
        assert!(!instant.is_daylight_saving_time());
        assert_eq!(instant.zone_abbreviation(), "UTC");
    }

    #[test]
    fn getters_read_the_broken_down_fields() {
        let provider = paris();
        let local = Instant::from_local(2012, Month::December, 31, 23, 59, 58, &provider).unwrap();
        assert_eq!(fields(&local), (2012, 12, 31, 23, 59, 58));
        assert_eq!(local.day_of_year(), 366);
        assert_eq!(local.day_of_week(), Weekday::Monday);
        assert_eq!(local.utc_offset(), HOUR);
        assert_eq!(local.zone_abbreviation(), "CET");

        let utc = Instant::from_utc(2013, Month::November, 30, 22, 58, 57).unwrap();
        assert_eq!(utc.day_of_year(), 334);
        assert_eq!(utc.day_of_week(), Weekday::Saturday);
        assert_eq!(utc.iso_week(), 48);
    }

    #[test]
    fn representation_switching_keeps_the_absolute_time() {
        let provider = paris();
        let mut winter = Instant::from_local(2003, Month::December, 28, 12, 0, 0, &provider).unwrap();
        let recorded = winter.to_binary();

        winter.to_utc_representation();
        assert_eq!(fields(&winter), (2003, 12, 28, 11, 0, 0));
        assert_eq!(winter.utc_offset(), 0);
        assert_eq!(winter.to_binary(), recorded);
        winter.to_utc_representation();
        assert_eq!(fields(&winter), (2003, 12, 28, 11, 0, 0));

        winter.to_local_representation(&provider).unwrap();
        assert_eq!(fields(&winter), (2003, 12, 28, 12, 0, 0));
        assert_eq!(winter.to_binary(), recorded);

        let mut summer = Instant::from_local(2003, Month::June, 28, 12, 0, 0, &provider).unwrap();
        summer.to_utc_representation();
        assert_eq!(fields(&summer), (2003, 6, 28, 10, 0, 0));
    }

    #[test]
    fn add_seconds_through_the_spring_gap() {
        let provider = paris();
        let mut instant = Instant::from_local(2016, Month::March, 27, 1, 30, 0, &provider).unwrap();
        assert!(!instant.is_daylight_saving_time());
        assert_eq!(instant.seconds_of_day(&provider).unwrap(), HOUR + 1_800);

        instant.add_seconds(HOUR, &provider).unwrap();
        assert_eq!(instant.hour(), 3);
        assert!(instant.is_daylight_saving_time());
        assert_eq!(instant.utc_offset(), 2 * HOUR);
        assert_eq!(instant.zone_abbreviation(), "CEST");
        assert_eq!(instant.seconds_of_day(&provider).unwrap(), 2 * HOUR + 1_800);
    }

    #[test]
    fn add_seconds_through_the_fall_overlap() {
        let provider = paris();
        let mut instant =
            Instant::from_local(2002, Month::October, 27, 1, 30, 0, &provider).unwrap();
        assert!(instant.is_daylight_saving_time());
        assert!(!instant.is_extra_summer_time(&provider).unwrap());
        assert!(!instant.is_extra_winter_time(&provider).unwrap());
        let offset = instant.utc_offset();

        instant.add_seconds(HOUR, &provider).unwrap();
        assert_eq!(instant.hour(), 2);
        assert!(instant.is_daylight_saving_time());
        assert!(instant.is_extra_summer_time(&provider).unwrap());
        assert!(!instant.is_extra_winter_time(&provider).unwrap());
        assert_eq!(instant.utc_offset(), offset);

        instant.add_seconds(HOUR, &provider).unwrap();
        assert_eq!(instant.hour(), 2);
        assert!(!instant.is_daylight_saving_time());
        assert!(instant.is_extra_winter_time(&provider).unwrap());
        assert_eq!(instant.utc_offset(), offset - HOUR);
        assert_eq!(instant.seconds_of_day(&provider).unwrap(), 3 * HOUR + 1_800);

        instant.add_seconds(HOUR, &provider).unwrap();
        assert_eq!(instant.hour(), 3);
        assert!(!instant.is_extra_winter_time(&provider).unwrap());

        for _ in 0..3 {
            instant.add_seconds(-HOUR, &provider).unwrap();
        }
        assert_eq!(instant.hour(), 1);
        assert!(instant.is_daylight_saving_time());
        assert_eq!(instant.utc_offset(), offset);
    }

    #[test]
    fn add_days_preserves_the_wall_clock() {
        let provider = paris();
        let mut instant = Instant::from_local(2016, Month::May, 27, 1, 12, 21, &provider).unwrap();
        instant.add_days(6, &provider).unwrap();
        assert_eq!((instant.day(), instant.hour()), (2, 1));

        // Fourteen days across the spring transition keep 9 o'clock
        // even though only 335 hours elapse.
        let start = Instant::from_local(2016, Month::March, 14, 9, 0, 0, &provider).unwrap();
        let mut end = start;
        end.add_days(14, &provider).unwrap();
        assert_eq!(fields(&end), (2016, 3, 28, 9, 0, 0));
        assert_eq!(start.diff_seconds(&end).unwrap(), 335 * HOUR);

        let utc_start = Instant::from_utc(2016, Month::March, 14, 9, 0, 0).unwrap();
        let mut utc_end = utc_start;
        utc_end.add_days(14, &provider).unwrap();
        assert_eq!(fields(&utc_end), (2016, 3, 28, 9, 0, 0));
        assert_eq!(utc_start.diff_seconds(&utc_end).unwrap(), 336 * HOUR);
    }

    #[test]
    fn add_days_shifts_out_of_the_gap() {
        let provider = paris();
        let mut instant = Instant::from_local(2016, Month::March, 26, 2, 12, 21, &provider).unwrap();
        instant.add_days(1, &provider).unwrap();
        assert_eq!((instant.day(), instant.hour()), (27, 3));
        instant.add_days(-1, &provider).unwrap();
        assert_eq!((instant.day(), instant.hour()), (26, 3));
    }

    #[test]
    fn add_months_clamps_to_the_target_month() {
        let provider = paris();
        let mut instant =
            Instant::from_local(2016, Month::October, 31, 1, 12, 21, &provider).unwrap();
        instant.add_months(1, &provider).unwrap();
        assert_eq!((instant.month(), instant.day()), (Month::November, 30));
        instant.add_months(3, &provider).unwrap();
        assert_eq!((instant.month(), instant.day()), (Month::February, 28));
        instant.add_months(-4, &provider).unwrap();
        assert_eq!((instant.month(), instant.day()), (Month::October, 28));
    }

    #[test]
    fn add_months_resolves_gap_wall_times() {
        let provider = paris();
        let mut instant =
            Instant::from_local(2016, Month::February, 27, 2, 12, 21, &provider).unwrap();
        instant.add_months(1, &provider).unwrap();
        assert_eq!(
            (instant.month(), instant.day(), instant.hour()),
            (Month::March, 27, 3)
        );

        let mut unaffected =
            Instant::from_local(2016, Month::March, 27, 1, 12, 21, &provider).unwrap();
        unaffected.add_months(9, &provider).unwrap();
        assert_eq!(
            (unaffected.month(), unaffected.day(), unaffected.hour()),
            (Month::December, 27, 1)
        );
    }

    #[test]
    fn add_months_twelve_equals_add_years_one() {
        let provider = paris();
        let mut by_months =
            Instant::from_local(2016, Month::February, 29, 10, 30, 0, &provider).unwrap();
        let mut by_years = by_months;
        by_months.add_months(12, &provider).unwrap();
        by_years.add_years(1, &provider).unwrap();
        assert_eq!(by_months, by_years);
        assert_eq!((by_years.month(), by_years.day()), (Month::February, 28));
    }

    #[test]
    fn trim_time_keeps_the_date() {
        let provider = paris();
        let mut instant = Instant::from_local(2010, Month::June, 30, 10, 40, 5, &provider).unwrap();
        instant.trim_time(&provider).unwrap();
        assert_eq!(fields(&instant), (2010, 6, 30, 0, 0, 0));
        assert!(instant.is_local_representation());
    }

    #[test]
    fn fold_operations_switch_overlap_sides() {
        let provider = paris();
        let mut instant =
            Instant::from_local(2002, Month::October, 27, 2, 30, 0, &provider).unwrap();
        // Strict construction lands on the earlier, daylight instant.
        assert!(instant.is_daylight_saving_time());
        assert!(instant.is_extra_summer_time(&provider).unwrap());
        let earlier_binary = instant.to_binary();

        instant.to_extra_winter_time(&provider).unwrap();
        assert_eq!(instant.to_binary(), earlier_binary + HOUR);
        assert!(!instant.is_daylight_saving_time());
        assert!(instant.is_extra_winter_time(&provider).unwrap());
        assert_eq!((instant.hour(), instant.minute()), (2, 30));
        // Already on the later side.
        assert!(instant.to_extra_winter_time(&provider).is_err());

        instant.to_extra_summer_time(&provider).unwrap();
        assert_eq!(instant.to_binary(), earlier_binary);
        assert!(instant.is_daylight_saving_time());

        let mut plain = Instant::from_local(2002, Month::October, 27, 5, 0, 0, &provider).unwrap();
        assert_eq!(
            plain.to_extra_winter_time(&provider).unwrap_err().kind(),
            crate::ErrorKind::NotApplicable
        );
        let mut utc = Instant::from_utc(2002, Month::October, 27, 2, 30, 0).unwrap();
        assert!(utc.to_extra_summer_time(&provider).is_err());
    }

    #[test]
    fn binary_round_trip_preserves_the_instant() {
        let provider = paris();
        let local = Instant::from_local(2016, Month::January, 1, 18, 0, 0, &provider).unwrap();
        let restored = Instant::from_binary(local.to_binary(), &provider).unwrap();
        assert!(restored.is_local_representation());
        assert_eq!(local.diff_seconds(&restored).unwrap(), 0);
        assert_eq!(local, restored);

        let utc = Instant::from_utc(2016, Month::January, 1, 18, 0, 0).unwrap();
        let reloaded = Instant::from_binary(utc.to_binary(), &provider).unwrap();
        assert_eq!(reloaded.to_binary(), utc.to_binary());
        // Same instant, different representation.
        assert_ne!(reloaded, utc);
        assert_eq!(fields(&reloaded), (2016, 1, 1, 19, 0, 0));
    }

    #[cfg(feature = "sys")]
    #[test]
    fn today_is_a_local_midnight() {
        let provider = paris();
        let today = Instant::today(&provider).unwrap();
        assert!(today.is_local_representation());
        assert_eq!((today.hour(), today.minute(), today.second()), (0, 0, 0));

        let now = Instant::now(&provider).unwrap();
        assert!(now.is_local_representation());
        assert!(today.diff_seconds(&now).unwrap() >= 0);
    }
}
