//! Stateless calendar queries: leap years, month lengths, weekday
//! positions, and ISO 8601 week numbering.

use crate::{
    fields::{CivilDate, Month, Weekday},
    normalize::{self, DstHint, Mode},
    provider::ZoneProvider,
    sys, utils, TimeResult,
};

/// Returns `true` if the year is a leap year of the proleptic
/// Gregorian calendar.
#[must_use]
pub fn is_leap_year(year: i32) -> bool {
    utils::in_leap_year(i64::from(year))
}

/// Returns the number of days in the given month.
#[must_use]
pub fn days_in_month(year: i32, month: Month) -> u8 {
    utils::days_in_month(i64::from(year), month.number())
}

/// Returns the number of wall-clock seconds in the given local day,
/// the difference between its midnight and the next.
///
/// Days carrying a daylight saving transition yield 82800 or 90000
/// seconds instead of 86400.
pub fn seconds_in_local_day(
    year: i32,
    month: Month,
    day: u8,
    provider: &impl ZoneProvider,
) -> TimeResult<i64> {
    let zone = sys::local_zone_id();
    let start = normalize::normalize_local(
        &zone,
        i64::from(year),
        i64::from(month.number()),
        i64::from(day),
        0,
        0,
        0,
        DstHint::Auto,
        Mode::AdjustForward,
        provider,
    )?;
    let end = normalize::normalize_local(
        &zone,
        i64::from(year),
        i64::from(month.number()),
        i64::from(day) + 1,
        0,
        0,
        0,
        DstHint::Auto,
        Mode::AdjustForward,
        provider,
    )?;
    Ok(end.epoch.as_i64() - start.epoch.as_i64())
}

/// Returns the day of the month of the first `weekday` in the month.
#[must_use]
pub fn first_weekday_in_month(year: i32, month: Month, weekday: Weekday) -> u8 {
    let first = CivilDate::new_unchecked(year, month.number(), 1).weekday_number();
    ((i16::from(weekday.number()) - i16::from(first)).rem_euclid(7) + 1) as u8
}

/// Returns the day of the month of the last `weekday` in the month.
#[must_use]
pub fn last_weekday_in_month(year: i32, month: Month, weekday: Weekday) -> u8 {
    let last = days_in_month(year, month);
    let last_weekday = CivilDate::new_unchecked(year, month.number(), last).weekday_number();
    let diff = i16::from(weekday.number()) - i16::from(last_weekday);
    (i16::from(last) + diff + if diff > 0 { -7 } else { 0 }) as u8
}

/// Returns the day in January of the first `weekday` of the ISO year.
///
/// The value may be zero or negative when the ISO year begins in the
/// previous calendar December.
#[must_use]
pub fn first_weekday_in_iso_year(iso_year: i32, weekday: Weekday) -> i32 {
    let in_second_week = i32::from(first_weekday_in_month(iso_year, Month::January, weekday)) + 7;
    let date = CivilDate::new_unchecked(iso_year, 1, in_second_week as u8);
    in_second_week + 7 - 7 * i32::from(iso_week_of(date))
}

/// Returns the number of ISO 8601 weeks in the ISO year, 52 or 53.
#[must_use]
pub fn weeks_in_iso_year(iso_year: i32) -> u8 {
    // January 4 always lies in week 1, so a week earlier lies in the
    // last week of the previous ISO year.
    let days = utils::days_from_civil(i64::from(iso_year) + 1, 1, 4) - 7;
    let (year, month, day) = utils::civil_from_days(days);
    iso_week_of(CivilDate::new_unchecked(year as i32, month, day))
}

/// Returns the ISO 8601 week number of a date.
pub(crate) fn iso_week_of(date: CivilDate) -> u8 {
    let year = i64::from(date.year);
    let day_index = i64::from(date.day_of_year()) - 1;
    let monday_index = i64::from(date.weekday_number()) - 1;
    let week = (day_index - monday_index + 10) / 7;
    if week == 0 {
        // The date belongs to the last week of the previous ISO year.
        ((day_index + utils::days_in_year(year - 1) - monday_index + 10) / 7) as u8
    } else if week > 52 {
        let in_next_year = (day_index - utils::days_in_year(year) - monday_index + 10) / 7;
        if in_next_year > 0 {
            in_next_year as u8
        } else {
            week as u8
        }
    } else {
        week as u8
    }
}

/// Returns the ISO 8601 year a date's week belongs to.
pub(crate) fn iso_year_of(date: CivilDate) -> i32 {
    let year = i64::from(date.year);
    let day_index = i64::from(date.day_of_year()) - 1;
    let monday_index = i64::from(date.weekday_number()) - 1;
    let week = (day_index - monday_index + 10) / 7;
    if week == 0 {
        date.year - 1
    } else if week > 52 && (day_index - utils::days_in_year(year) - monday_index + 10) / 7 > 0 {
        date.year + 1
    } else {
        date.year
    }
}
