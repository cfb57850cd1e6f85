//! Differences between instants.
//!
//! Calendar variants count a partial unit as one; full variants count
//! it as zero and expose the remainder. All functions require both
//! operands to share the same representation tag and operate on the
//! absolute timeline, so under Local representation a day carrying a
//! daylight saving transition counts as one day even though it is 23
//! or 25 hours long.

use core::cmp::Ordering;

use crate::{instant::Instant, provider::ZoneProvider, TimeError, TimeResult};

/// Full days between two instants, with the seconds remainder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySpan {
    pub days: i64,
    pub seconds: i64,
}

/// Full weeks between two instants, with day and second remainders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekSpan {
    pub weeks: i64,
    pub days: i64,
    pub seconds: i64,
}

/// Full months between two instants, with day and second remainders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthSpan {
    pub months: i64,
    pub days: i64,
    pub seconds: i64,
}

/// Full years between two instants, with month, day and second
/// remainders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearSpan {
    pub years: i64,
    pub months: i64,
    pub days: i64,
    pub seconds: i64,
}

impl Instant {
    fn check_same_representation(&self, other: &Instant) -> TimeResult<()> {
        if self.representation() != other.representation() {
            return Err(TimeError::representation_mismatch()
                .with_message("operands use different representations"));
        }
        Ok(())
    }

    /// Orders the operands on the absolute timeline; the sign restores
    /// the caller's direction on the way out.
    fn ordered<'a>(&'a self, other: &'a Instant) -> (&'a Instant, &'a Instant, i64) {
        if self.epoch() <= other.epoch() {
            (self, other, 1)
        } else {
            (other, self, -1)
        }
    }

    /// Returns the signed number of seconds from `self` to `other` on
    /// the absolute timeline.
    pub fn diff_seconds(&self, other: &Instant) -> TimeResult<i64> {
        self.check_same_representation(other)?;
        Ok(other.to_binary() - self.to_binary())
    }

    /// Compares two instants on the absolute timeline.
    pub fn compare(&self, other: &Instant) -> TimeResult<Ordering> {
        self.check_same_representation(other)?;
        Ok(self.epoch().cmp(&other.epoch()))
    }

    /// Returns the signed number of date changes from `self` to
    /// `other`, independent of the wall clock. Partial days count as
    /// one.
    pub fn diff_calendar_days(&self, other: &Instant) -> TimeResult<i64> {
        self.check_same_representation(other)?;
        Ok(other.civil_date().to_epoch_days() - self.civil_date().to_epoch_days())
    }

    /// Returns the number of full days from `self` to `other` and the
    /// seconds remaining after adding them back to the earlier
    /// operand. Both values are non-negative when `self` is not after
    /// `other`, and both negate otherwise.
    pub fn diff_days(
        &self,
        other: &Instant,
        provider: &impl ZoneProvider,
    ) -> TimeResult<DaySpan> {
        self.check_same_representation(other)?;
        let (earlier, later, sign) = self.ordered(other);
        let mut days = earlier.diff_calendar_days(later)?;
        if later.time_of_day() < earlier.time_of_day() && days > 0 {
            days -= 1;
        }
        let mut base = *earlier;
        base.add_days(days, provider)?;
        let seconds = later.to_binary() - base.to_binary();
        Ok(DaySpan {
            days: sign * days,
            seconds: sign * seconds,
        })
    }

    /// Returns the number of full weeks from `self` to `other` with
    /// day and second remainders.
    pub fn diff_weeks(
        &self,
        other: &Instant,
        provider: &impl ZoneProvider,
    ) -> TimeResult<WeekSpan> {
        let span = self.diff_days(other, provider)?;
        Ok(WeekSpan {
            weeks: span.days / 7,
            days: span.days % 7,
            seconds: span.seconds,
        })
    }

    /// Returns the signed number of month boundaries from `self` to
    /// `other`. Partial months count as one.
    pub fn diff_calendar_months(&self, other: &Instant) -> TimeResult<i64> {
        self.check_same_representation(other)?;
        Ok(12 * (i64::from(other.year()) - i64::from(self.year()))
            + (i64::from(other.month().number()) - i64::from(self.month().number())))
    }

    /// Returns the number of full months from `self` to `other` with
    /// day and second remainders.
    pub fn diff_months(
        &self,
        other: &Instant,
        provider: &impl ZoneProvider,
    ) -> TimeResult<MonthSpan> {
        self.check_same_representation(other)?;
        let (earlier, later, sign) = self.ordered(other);
        let mut months = earlier.diff_calendar_months(later)?;
        let earlier_key = (earlier.civil_date().day, earlier.time_of_day());
        let later_key = (later.civil_date().day, later.time_of_day());
        if later_key < earlier_key && months > 0 {
            months -= 1;
        }
        let mut base = *earlier;
        base.add_months(months, provider)?;
        let inner = base.diff_days(later, provider)?;
        Ok(MonthSpan {
            months: sign * months,
            days: sign * inner.days,
            seconds: sign * inner.seconds,
        })
    }

    /// Returns the signed number of year boundaries from `self` to
    /// `other`. Partial years count as one.
    pub fn diff_calendar_years(&self, other: &Instant) -> TimeResult<i64> {
        self.check_same_representation(other)?;
        Ok(i64::from(other.year()) - i64::from(self.year()))
    }

    /// Returns the number of full years from `self` to `other` with
    /// month, day and second remainders.
    pub fn diff_years(
        &self,
        other: &Instant,
        provider: &impl ZoneProvider,
    ) -> TimeResult<YearSpan> {
        let span = self.diff_months(other, provider)?;
        Ok(YearSpan {
            years: span.months / 12,
            months: span.months % 12,
            days: span.days,
            seconds: span.seconds,
        })
    }

    /// Returns the signed number of ISO year boundaries from `self` to
    /// `other`.
    pub fn diff_iso_years(&self, other: &Instant) -> TimeResult<i64> {
        self.check_same_representation(other)?;
        Ok(i64::from(other.iso_year()) - i64::from(self.iso_year()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::Month;
    use crate::sys;
    use crate::tzdb::FsZoneProvider;

    const DAY: i64 = 86_400;
    const HOUR: i64 = 3_600;

    fn paris() -> FsZoneProvider {
        sys::set_local_zone("Europe/Paris");
        FsZoneProvider::default()
    }

    #[test]
    fn local_differences_account_for_transitions() {
        let provider = paris();
        let start = Instant::from_local(2015, Month::November, 28, 11, 20, 0, &provider).unwrap();
        let end = Instant::from_local(2016, Month::July, 16, 9, 20, 0, &provider).unwrap();

        // 231 calendar days, two hours short on the wall clock plus
        // one hour swallowed by the spring transition.
        assert_eq!(
            start.diff_seconds(&end).unwrap(),
            231 * DAY - 2 * HOUR - HOUR
        );
        assert_eq!(start.diff_calendar_days(&end).unwrap(), 231);

        let days = start.diff_days(&end, &provider).unwrap();
        assert_eq!(days.days, 230);
        assert_eq!(days.seconds, 22 * HOUR);

        let weeks = start.diff_weeks(&end, &provider).unwrap();
        assert_eq!(weeks.weeks, 32);
        assert_eq!(weeks.days, 6);
        assert_eq!(weeks.seconds, 22 * HOUR);

        assert_eq!(start.diff_calendar_months(&end).unwrap(), 8);
        let months = start.diff_months(&end, &provider).unwrap();
        assert_eq!(months.months, 7);
        assert_eq!(months.days, 17);
        assert_eq!(months.seconds, 22 * HOUR);

        assert_eq!(start.diff_calendar_years(&end).unwrap(), 1);
        let years = start.diff_years(&end, &provider).unwrap();
        assert_eq!(years.years, 0);
        assert_eq!(years.months, 7);
        assert_eq!(start.diff_iso_years(&end).unwrap(), 1);
    }

    #[test]
    fn utc_differences_have_no_transition() {
        let provider = paris();
        let start = Instant::from_utc(2015, Month::November, 28, 11, 20, 0).unwrap();
        let end = Instant::from_utc(2016, Month::July, 16, 9, 20, 0).unwrap();

        assert_eq!(start.diff_seconds(&end).unwrap(), 231 * DAY - 2 * HOUR);
        assert_eq!(start.diff_calendar_days(&end).unwrap(), 231);
        let days = start.diff_days(&end, &provider).unwrap();
        assert_eq!(days.days, 230);
        assert_eq!(days.seconds, 22 * HOUR);
        let months = start.diff_months(&end, &provider).unwrap();
        assert_eq!(months.months, 7);
        assert_eq!(months.days, 17);
        assert_eq!(months.seconds, 22 * HOUR);
    }

    #[test]
    fn differences_negate_with_reversed_operands() {
        let provider = paris();
        let start = Instant::from_utc(2015, Month::November, 28, 11, 20, 0).unwrap();
        let end = Instant::from_utc(2016, Month::July, 16, 9, 20, 0).unwrap();

        assert_eq!(
            start.diff_seconds(&end).unwrap(),
            -end.diff_seconds(&start).unwrap()
        );
        assert_eq!(start.diff_calendar_days(&end).unwrap(), 231);
        assert_eq!(end.diff_calendar_days(&start).unwrap(), -231);

        let forward = start.diff_days(&end, &provider).unwrap();
        let backward = end.diff_days(&start, &provider).unwrap();
        assert_eq!(backward.days, -forward.days);
        assert_eq!(backward.seconds, -forward.seconds);

        let forward = start.diff_months(&end, &provider).unwrap();
        let backward = end.diff_months(&start, &provider).unwrap();
        assert_eq!(backward.months, -forward.months);
        assert_eq!(backward.days, -forward.days);
        assert_eq!(backward.seconds, -forward.seconds);
    }

    #[test]
    fn comparisons_follow_the_absolute_timeline() {
        let provider = paris();
        let start = Instant::from_local(2016, Month::May, 27, 1, 12, 21, &provider).unwrap();
        let end = Instant::from_local(2016, Month::May, 27, 1, 12, 22, &provider).unwrap();

        assert_eq!(start.compare(&end).unwrap(), Ordering::Less);
        assert_eq!(end.compare(&start).unwrap(), Ordering::Greater);
        assert_eq!(start.compare(&start).unwrap(), Ordering::Equal);
        assert_eq!(start.diff_seconds(&start).unwrap(), 0);
        assert!(start < end);
        assert_eq!(start, start);
    }

    #[test]
    fn mixed_representations_are_rejected() {
        let provider = paris();
        let local = Instant::from_local(2016, Month::May, 27, 1, 12, 21, &provider).unwrap();
        let utc = Instant::from_utc(2016, Month::May, 27, 1, 12, 21).unwrap();

        assert!(local.diff_seconds(&utc).is_err());
        assert!(local.compare(&utc).is_err());
        assert!(local.diff_days(&utc, &provider).is_err());
        assert!(local.diff_calendar_months(&utc).is_err());
        assert_eq!(local.partial_cmp(&utc), None);
        assert_ne!(local, utc);
    }
}
