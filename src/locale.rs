//! Locale-driven parsing and formatting of date and time strings.
//!
//! The crate does not carry locale data; it consumes a
//! [`LocaleFormatter`] that names the locale's preferred patterns over
//! a small strptime-style token set (`%d %m %y %Y %H %M %S` plus
//! literals). [`PatternLocale`] is the shipped implementation.

use core::fmt::Write as _;
use core::iter::Peekable;
use core::str::Chars;

use crate::{
    fields::Month,
    instant::Instant,
    provider::ZoneProvider,
    TimeError, TimeResult,
};

#[cfg(feature = "sys")]
use crate::{epoch::EpochSeconds, fields::CivilDateTime, sys};

/// The locale boundary: preferred and alternative patterns for dates
/// and times of day.
pub trait LocaleFormatter {
    /// The locale's preferred date pattern, such as `%d/%m/%Y`.
    fn date_format(&self) -> &str;

    /// An alternative date pattern, tried after the preferred one.
    fn date_format_alt(&self) -> Option<&str> {
        None
    }

    /// The locale's preferred time pattern, such as `%H:%M:%S`.
    fn time_format(&self) -> &str;

    /// An alternative time pattern, tried after the preferred one.
    fn time_format_alt(&self) -> Option<&str> {
        None
    }
}

/// A [`LocaleFormatter`] holding its patterns as plain strings.
#[derive(Debug, Clone)]
pub struct PatternLocale {
    date: String,
    date_alt: Option<String>,
    time: String,
    time_alt: Option<String>,
}

impl PatternLocale {
    pub fn new(
        date: impl Into<String>,
        date_alt: Option<String>,
        time: impl Into<String>,
        time_alt: Option<String>,
    ) -> Self {
        Self {
            date: date.into(),
            date_alt,
            time: time.into(),
            time_alt,
        }
    }

    /// Day/month/year dates with colon-separated times.
    #[must_use]
    pub fn dmy() -> Self {
        Self::new("%d/%m/%Y", None, "%H:%M:%S", None)
    }

    /// Month/day/year dates with colon-separated times.
    #[must_use]
    pub fn mdy() -> Self {
        Self::new("%m/%d/%Y", None, "%H:%M:%S", None)
    }

    /// ISO 8601 dates and times.
    #[must_use]
    pub fn iso() -> Self {
        Self::new("%Y-%m-%d", None, "%H:%M:%S", None)
    }
}

impl LocaleFormatter for PatternLocale {
    fn date_format(&self) -> &str {
        &self.date
    }

    fn date_format_alt(&self) -> Option<&str> {
        self.date_alt.as_deref()
    }

    fn time_format(&self) -> &str {
        &self.time
    }

    fn time_format_alt(&self) -> Option<&str> {
        self.time_alt.as_deref()
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct ParsedFields {
    year: Option<i32>,
    month: Option<u8>,
    day: Option<u8>,
    hour: Option<u8>,
    minute: Option<u8>,
    second: Option<u8>,
}

/// Parses `input` against a pattern. Numeric fields accept one to two
/// digits (years up to four) and are range-checked; the whole input
/// must be consumed for the parse to succeed.
fn parse_pattern(pattern: &str, input: &str) -> Option<ParsedFields> {
    let mut fields = ParsedFields::default();
    let mut cursor = input.chars().peekable();
    let mut tokens = pattern.chars();
    while let Some(token) = tokens.next() {
        if token != '%' {
            if cursor.next() != Some(token) {
                return None;
            }
            continue;
        }
        match tokens.next()? {
            'd' => fields.day = Some(parse_number(&mut cursor, 2, 1, 31)? as u8),
            'm' => fields.month = Some(parse_number(&mut cursor, 2, 1, 12)? as u8),
            'y' => fields.year = Some(parse_number(&mut cursor, 2, 0, 99)?),
            'Y' => fields.year = Some(parse_number(&mut cursor, 4, 0, 9_999)?),
            'H' => fields.hour = Some(parse_number(&mut cursor, 2, 0, 23)? as u8),
            'M' => fields.minute = Some(parse_number(&mut cursor, 2, 0, 59)? as u8),
            'S' => fields.second = Some(parse_number(&mut cursor, 2, 0, 59)? as u8),
            '%' => {
                if cursor.next() != Some('%') {
                    return None;
                }
            }
            _ => return None,
        }
    }
    // Trailing characters reject the parse.
    if cursor.next().is_some() {
        return None;
    }
    Some(fields)
}

fn parse_number(
    cursor: &mut Peekable<Chars<'_>>,
    max_digits: u8,
    min: i32,
    max: i32,
) -> Option<i32> {
    let mut value = 0i32;
    let mut digits = 0u8;
    while digits < max_digits {
        match cursor.peek() {
            Some(ch) if ch.is_ascii_digit() => {
                value = value * 10 + ch.to_digit(10)? as i32;
                cursor.next();
                digits += 1;
            }
            _ => break,
        }
    }
    if digits == 0 {
        return None;
    }
    (min..=max).contains(&value).then_some(value)
}

/// Maps a two-digit year onto the century nearest the current year,
/// rounding half away from zero.
pub(crate) fn resolve_two_digit_year(year: i32, current_year: i32) -> i32 {
    year + (f64::from(current_year - year) / 100.0).round() as i32 * 100
}

fn write_pattern(pattern: &str, instant: &Instant, out: &mut String) {
    let mut tokens = pattern.chars();
    while let Some(token) = tokens.next() {
        if token != '%' {
            out.push(token);
            continue;
        }
        let Some(directive) = tokens.next() else {
            out.push('%');
            break;
        };
        // The write target is a String, so formatting cannot fail.
        let _ = match directive {
            'd' => write!(out, "{:02}", instant.day()),
            'm' => write!(out, "{:02}", instant.month().number()),
            'y' => write!(out, "{:02}", instant.year().rem_euclid(100)),
            'Y' => write!(out, "{}", instant.year()),
            'H' => write!(out, "{:02}", instant.hour()),
            'M' => write!(out, "{:02}", instant.minute()),
            'S' => write!(out, "{:02}", instant.second()),
            '%' => {
                out.push('%');
                Ok(())
            }
            other => {
                out.push('%');
                out.push(other);
                Ok(())
            }
        };
    }
}

fn into_buffer<'b>(rendered: &str, buffer: &'b mut [u8]) -> TimeResult<&'b str> {
    let bytes = rendered.as_bytes();
    if bytes.len() > buffer.len() {
        return Err(TimeError::buffer_too_small()
            .with_message("formatted text does not fit the buffer"));
    }
    buffer[..bytes.len()].copy_from_slice(bytes);
    core::str::from_utf8(&buffer[..bytes.len()])
        .map_err(|_| TimeError::invalid_input().with_message("formatted text is not UTF-8"))
}

impl Instant {
    /// Sets the date from a string, keeping the time of day and the
    /// representation.
    ///
    /// Tries the locale's date format, its alternative, then ISO 8601
    /// `YYYY-MM-DD`. Trailing characters reject the input. Two-digit
    /// years map onto the century nearest the current year.
    #[cfg(feature = "sys")]
    pub fn set_date_from_str(
        &mut self,
        input: &str,
        locale: &impl LocaleFormatter,
        provider: &impl ZoneProvider,
    ) -> TimeResult<()> {
        let parsed = parse_pattern(locale.date_format(), input)
            .or_else(|| {
                locale
                    .date_format_alt()
                    .and_then(|alt| parse_pattern(alt, input))
            })
            .or_else(|| parse_pattern("%Y-%m-%d", input))
            .ok_or_else(|| {
                TimeError::invalid_input().with_message("unrecognized date string")
            })?;
        let (Some(mut year), Some(month), Some(day)) = (parsed.year, parsed.month, parsed.day)
        else {
            return Err(TimeError::invalid_input().with_message("date pattern is incomplete"));
        };
        if (0..100).contains(&year) {
            year = resolve_two_digit_year(year, self.current_local_year(provider)?);
        }
        self.set(
            year,
            Month::try_from(month)?,
            day,
            self.hour(),
            self.minute(),
            self.second(),
            provider,
        )
    }

    /// Sets the time of day from a string, keeping the date and the
    /// representation.
    ///
    /// Tries the locale's time format, its alternative, `HH:MM:SS`,
    /// then `HH:MM`; the hour must be 0 through 23. A date string is
    /// not a time and is rejected.
    pub fn set_time_from_str(
        &mut self,
        input: &str,
        locale: &impl LocaleFormatter,
        provider: &impl ZoneProvider,
    ) -> TimeResult<()> {
        let parsed = parse_pattern(locale.time_format(), input)
            .or_else(|| {
                locale
                    .time_format_alt()
                    .and_then(|alt| parse_pattern(alt, input))
            })
            .or_else(|| parse_pattern("%H:%M:%S", input))
            .or_else(|| parse_pattern("%H:%M", input))
            .ok_or_else(|| {
                TimeError::invalid_input().with_message("unrecognized time string")
            })?;
        let (Some(hour), Some(minute)) = (parsed.hour, parsed.minute) else {
            return Err(TimeError::invalid_input().with_message("time pattern is incomplete"));
        };
        self.set(
            self.year(),
            self.month(),
            self.day(),
            hour,
            minute,
            parsed.second.unwrap_or(0),
            provider,
        )
    }

    /// Formats the date with the locale's preferred pattern.
    #[must_use]
    pub fn format_date(&self, locale: &impl LocaleFormatter) -> String {
        let mut out = String::new();
        write_pattern(locale.date_format(), self, &mut out);
        out
    }

    /// Formats the time of day with the locale's preferred pattern.
    #[must_use]
    pub fn format_time(&self, locale: &impl LocaleFormatter) -> String {
        let mut out = String::new();
        write_pattern(locale.time_format(), self, &mut out);
        out
    }

    /// Writes the formatted date into `buffer`, failing with
    /// `BufferTooSmall` when it does not fit; the buffer contents are
    /// unspecified on error.
    pub fn date_into_str<'b>(
        &self,
        locale: &impl LocaleFormatter,
        buffer: &'b mut [u8],
    ) -> TimeResult<&'b str> {
        into_buffer(&self.format_date(locale), buffer)
    }

    /// Writes the formatted time into `buffer`, failing with
    /// `BufferTooSmall` when it does not fit; the buffer contents are
    /// unspecified on error.
    pub fn time_into_str<'b>(
        &self,
        locale: &impl LocaleFormatter,
        buffer: &'b mut [u8],
    ) -> TimeResult<&'b str> {
        into_buffer(&self.format_time(locale), buffer)
    }

    #[cfg(feature = "sys")]
    fn current_local_year(&self, provider: &impl ZoneProvider) -> TimeResult<i32> {
        let epoch = EpochSeconds::from(sys::epoch_now());
        let record = provider.offset_at(&sys::local_zone_id(), epoch)?;
        Ok(CivilDateTime::from_epoch(epoch, record.offset).date.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sys;
    use crate::tzdb::FsZoneProvider;

    fn paris() -> FsZoneProvider {
        sys::set_local_zone("Europe/Paris");
        FsZoneProvider::default()
    }

    #[test]
    fn two_digit_years_map_to_the_nearest_century() {
        assert_eq!(resolve_two_digit_year(4, 2026), 2004);
        assert_eq!(resolve_two_digit_year(3, 2002), 2003);
        assert_eq!(resolve_two_digit_year(80, 2026), 1980);
        assert_eq!(resolve_two_digit_year(99, 2050), 1999);
        // Half a century away rounds away from zero.
        assert_eq!(resolve_two_digit_year(50, 2000), 2050);
    }

    #[test]
    fn patterns_parse_flexible_digit_counts() {
        let fields = parse_pattern("%d/%m/%Y", "3/4/3").unwrap();
        assert_eq!(
            (fields.day, fields.month, fields.year),
            (Some(3), Some(4), Some(3))
        );
        let fields = parse_pattern("%d/%m/%Y", "23/4/1987").unwrap();
        assert_eq!(
            (fields.day, fields.month, fields.year),
            (Some(23), Some(4), Some(1987))
        );
        assert!(parse_pattern("%d/%m/%Y", "33/4/1987").is_none());
        assert!(parse_pattern("%d/%m/%Y", "23/4").is_none());
        assert!(parse_pattern("%d/%m/%Y", "23/4/1987x").is_none());
        assert!(parse_pattern("%H:%M:%S", "25:04:00").is_none());
    }

    #[cfg(feature = "sys")]
    #[test]
    fn date_strings_replace_the_date_only() {
        let provider = paris();
        let locale = PatternLocale::dmy();
        let mut instant =
            crate::Instant::from_local(2012, Month::December, 31, 23, 59, 59, &provider).unwrap();

        instant
            .set_date_from_str("23/4/1987", &locale, &provider)
            .unwrap();
        assert_eq!(instant.year(), 1987);
        assert_eq!(instant.month(), Month::April);
        assert_eq!(instant.day(), 23);
        assert_eq!(instant.hour(), 23);
        assert!(instant.is_local_representation());

        assert!(instant
            .set_date_from_str("33/4/1987", &locale, &provider)
            .is_err());
        assert!(instant
            .set_date_from_str("23/4", &locale, &provider)
            .is_err());

        // The ISO fallback is always recognized.
        instant
            .set_date_from_str("2002-02-01", &locale, &provider)
            .unwrap();
        assert_eq!(instant.year(), 2002);
        assert_eq!(instant.month(), Month::February);
        assert_eq!(instant.day(), 1);
    }

    #[test]
    fn time_strings_replace_the_time_only() {
        let provider = paris();
        let locale = PatternLocale::dmy();
        let mut instant =
            crate::Instant::from_local(2012, Month::December, 31, 23, 59, 59, &provider).unwrap();

        instant
            .set_time_from_str("13:02:45", &locale, &provider)
            .unwrap();
        assert_eq!(
            (instant.hour(), instant.minute(), instant.second()),
            (13, 2, 45)
        );
        assert_eq!(instant.day(), 31);

        instant
            .set_time_from_str("23:04", &locale, &provider)
            .unwrap();
        assert_eq!(
            (instant.hour(), instant.minute(), instant.second()),
            (23, 4, 0)
        );

        assert!(instant
            .set_time_from_str("25:04", &locale, &provider)
            .is_err());
        // A date is not a time.
        assert!(instant
            .set_time_from_str("33/4/1987", &locale, &provider)
            .is_err());
        assert!(instant
            .set_time_from_str("05/06/2006", &locale, &provider)
            .is_err());
        assert!(instant.is_local_representation());
    }

    #[test]
    fn setters_keep_utc_representation() {
        let provider = paris();
        let locale = PatternLocale::dmy();
        let mut instant = crate::Instant::from_utc(2013, Month::November, 30, 22, 58, 57).unwrap();

        instant
            .set_time_from_str("11:32:05", &locale, &provider)
            .unwrap();
        assert!(instant.is_utc_representation());
        assert_eq!(instant.utc_offset(), 0);
        assert_eq!(
            (instant.hour(), instant.minute(), instant.second()),
            (11, 32, 5)
        );
    }

    #[test]
    fn formatting_matches_the_locale_patterns() {
        let provider = paris();
        let locale = PatternLocale::dmy();
        let instant =
            crate::Instant::from_local(2012, Month::December, 31, 23, 59, 59, &provider).unwrap();

        assert_eq!(instant.format_date(&locale), "31/12/2012");
        assert_eq!(instant.format_time(&locale), "23:59:59");

        let mut buffer = [0u8; 100];
        assert_eq!(
            instant.date_into_str(&locale, &mut buffer).unwrap(),
            "31/12/2012"
        );
        assert_eq!(
            instant.time_into_str(&locale, &mut buffer).unwrap(),
            "23:59:59"
        );

        let mut too_short = [0u8; 2];
        assert!(instant.date_into_str(&locale, &mut too_short).is_err());
    }
}
