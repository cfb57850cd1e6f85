//! TZif-backed zone data.
//!
//! `TZif` is the time zone information format laid out by
//! [RFC 8536][rfc8536] and compiled by `zic` from the IANA database.
//! The [`Tzif`] wrapper extends the parsed type of the `tzif` crate
//! with wall-time resolution: given a civil wall time it reports the
//! unique matching instant, the spring-forward gap it falls into, or
//! the two instants of a fall-back overlap. Wall times beyond the
//! transition table are resolved through the POSIX tz string in the
//! file footer, with transition days computed on the calendar
//! (including "week 5 means the last such weekday" rules).
//!
//! [rfc8536]: https://datatracker.ietf.org/doc/html/rfc8536

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::Path;
#[cfg(not(target_os = "windows"))]
use std::path::PathBuf;

use combine::Parser;
use tzif::{
    self,
    data::{
        posix::{PosixTzString, TransitionDate, TransitionDay, TimeZoneVariantInfo},
        tzif::{DataBlock, LocalTimeTypeRecord, TzifData, TzifHeader},
    },
};

use crate::{
    epoch::EpochSeconds,
    fields::CivilDateTime,
    provider::{ResolvedWallTime, WallCandidates, ZoneAbbreviation, ZoneProvider, ZoneRecord},
    utils, TimeError, TimeResult, SECS_PER_DAY,
};

#[cfg(not(target_os = "windows"))]
const ZONEINFO_DIR: &str = "/usr/share/zoneinfo/";

/// A parsed TZif file with wall-time and instant resolution on top.
#[derive(Debug, Clone)]
pub struct Tzif {
    pub header1: TzifHeader,
    pub data_block1: DataBlock,
    pub header2: Option<TzifHeader>,
    pub data_block2: Option<DataBlock>,
    pub footer: Option<PosixTzString>,
}

impl From<TzifData> for Tzif {
    fn from(value: TzifData) -> Self {
        let TzifData {
            header1,
            data_block1,
            header2,
            data_block2,
            footer,
        } = value;
        Self {
            header1,
            data_block1,
            header2,
            data_block2,
            footer,
        }
    }
}

impl Tzif {
    pub fn from_bytes(data: &[u8]) -> TimeResult<Self> {
        let Ok((parse_result, _)) = tzif::parse::tzif::tzif().parse(data) else {
            return Err(TimeError::zone_data().with_message("illformed TZif data"));
        };
        Ok(Self::from(parse_result))
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> TimeResult<Self> {
        tzif::parse_tzif_file(path.as_ref())
            .map(Into::into)
            .map_err(|e| TimeError::zone_data().with_message(e.to_string()))
    }

    /// Reads zone data for an IANA identifier, preferring the system
    /// zoneinfo directory and falling back to the bundled database.
    pub fn read(identifier: &str) -> TimeResult<Self> {
        if identifier.starts_with('/') || identifier.contains("..") {
            return Err(TimeError::zone_data().with_message("invalid time zone identifier"));
        }
        #[cfg(not(target_os = "windows"))]
        {
            let mut path = PathBuf::from(ZONEINFO_DIR);
            path.push(identifier);
            if let Ok(data) = tzif::parse_tzif_file(&path) {
                return Ok(Self::from(data));
            }
            log::debug!("no readable tzif file for {identifier}, using bundled data");
        }
        let Some((_, data)) = jiff_tzdb::get(identifier) else {
            return Err(TimeError::zone_data()
                .with_message(format!("unknown time zone identifier {identifier}")));
        };
        Self::from_bytes(data)
    }

    pub fn posix_tz_string(&self) -> Option<&PosixTzString> {
        self.footer.as_ref()
    }

    fn data_block(&self) -> TimeResult<&DataBlock> {
        self.data_block2
            .as_ref()
            .ok_or(TimeError::zone_data().with_message("only TZif V2+ is supported"))
    }

    /// Resolves a civil wall time, detecting gaps and overlaps.
    ///
    /// `wall` counts the wall fields as seconds from the epoch as if
    /// they were UTC.
    pub(crate) fn candidates(&self, wall: i64) -> TimeResult<WallCandidates> {
        let db = self.data_block()?;
        let times = &db.transition_times;
        let approx = times.partition_point(|t| t.0 <= wall);

        if approx == times.len() {
            if let Some(posix) = self.posix_tz_string() {
                return footer_candidates(posix, wall);
            }
        }

        // A transition shifts the wall clock by the offset difference;
        // wall values inside that window either do not exist (offset
        // grows) or occur twice (offset shrinks). The search index is
        // epoch-based while `wall` is not, so inspect a small window of
        // transitions around it.
        let len = times.len();
        for index in approx.saturating_sub(2)..len.min(approx + 2) {
            let transition = times[index].0;
            let before = record_before(db, index)?;
            let after = record_after(db, index)?;
            let (prev_offset, next_offset) = (before.utoff.0, after.utoff.0);
            if next_offset > prev_offset
                && (transition + prev_offset..transition + next_offset).contains(&wall)
            {
                return Ok(WallCandidates::Gap {
                    before: zone_record(db, before)?,
                    after: zone_record(db, after)?,
                });
            }
            if next_offset < prev_offset
                && (transition + next_offset..transition + prev_offset).contains(&wall)
            {
                return Ok(WallCandidates::Overlap([
                    ResolvedWallTime {
                        epoch: EpochSeconds(wall - prev_offset),
                        record: zone_record(db, before)?,
                    },
                    ResolvedWallTime {
                        epoch: EpochSeconds(wall - next_offset),
                        record: zone_record(db, after)?,
                    },
                ]));
            }
        }

        // Unique: the regime whose interval contains wall - offset.
        for regime in (approx as i64 - 2)..=(approx as i64) {
            if regime < -1 || regime >= len as i64 {
                continue;
            }
            let record = if regime < 0 {
                initial_record(db)?
            } else {
                record_after(db, regime as usize)?
            };
            let epoch = wall - record.utoff.0;
            let lower = if regime < 0 {
                i64::MIN
            } else {
                times[regime as usize].0
            };
            let upper = if regime + 1 < len as i64 {
                times[(regime + 1) as usize].0
            } else {
                i64::MAX
            };
            if lower <= epoch && epoch < upper {
                return Ok(WallCandidates::Unique(ResolvedWallTime {
                    epoch: EpochSeconds(epoch),
                    record: zone_record(db, record)?,
                }));
            }
        }

        Err(TimeError::zone_data().with_message("wall time did not resolve to any regime"))
    }

    /// Returns the regime in effect at an absolute instant.
    pub(crate) fn record_at(&self, epoch: i64) -> TimeResult<ZoneRecord> {
        let db = self.data_block()?;
        let times = &db.transition_times;
        let index = times.partition_point(|t| t.0 <= epoch);
        if index == 0 {
            return zone_record(db, initial_record(db)?);
        }
        if index == times.len() {
            if let Some(posix) = self.posix_tz_string() {
                return footer_record_at(posix, epoch);
            }
        }
        zone_record(db, record_after(db, index - 1)?)
    }

    /// Reports whether the zone carries daylight saving rules anywhere
    /// in its data.
    pub(crate) fn has_dst(&self) -> TimeResult<bool> {
        let db = self.data_block()?;
        if db.local_time_type_records.iter().any(|r| r.is_dst) {
            return Ok(true);
        }
        Ok(self
            .posix_tz_string()
            .is_some_and(|posix| posix.dst_info.is_some()))
    }
}

fn initial_record(db: &DataBlock) -> TimeResult<LocalTimeTypeRecord> {
    db.local_time_type_records
        .first()
        .copied()
        .ok_or(TimeError::zone_data().with_message("TZif data has no local time records"))
}

/// The regime in effect before transition `index`.
fn record_before(db: &DataBlock, index: usize) -> TimeResult<LocalTimeTypeRecord> {
    if index == 0 {
        return initial_record(db);
    }
    record_after(db, index - 1)
}

/// The regime in effect from transition `index` on.
fn record_after(db: &DataBlock, index: usize) -> TimeResult<LocalTimeTypeRecord> {
    let type_index = db.transition_types.get(index).copied().unwrap_or(0);
    db.local_time_type_records
        .get(type_index)
        .copied()
        .ok_or(TimeError::zone_data().with_message("transition type index out of range"))
}

/// Builds a [`ZoneRecord`], resolving the designation the record's
/// byte index addresses in the NUL-joined designation list.
fn zone_record(db: &DataBlock, record: LocalTimeTypeRecord) -> TimeResult<ZoneRecord> {
    let mut cursor = 0usize;
    for name in &db.time_zone_designations {
        let end = cursor + name.len();
        if record.idx >= cursor && record.idx < end {
            return Ok(ZoneRecord {
                offset: record.utoff.0,
                is_dst: record.is_dst,
                abbreviation: abbreviation_from(&name[record.idx - cursor..])?,
            });
        }
        cursor = end + 1;
    }
    Err(TimeError::zone_data().with_message("designation index out of range"))
}

fn abbreviation_from(name: &str) -> TimeResult<ZoneAbbreviation> {
    let name = name.trim_start_matches('<').trim_end_matches('>');
    name.parse()
        .map_err(|_| TimeError::zone_data().with_message("zone designation is not representable"))
}

fn variant_record(info: &TimeZoneVariantInfo, is_dst: bool) -> TimeResult<ZoneRecord> {
    // POSIX tz strings store the offset inverted: seconds that must be
    // added to local time to reach UTC.
    Ok(ZoneRecord {
        offset: -info.offset.0,
        is_dst,
        abbreviation: abbreviation_from(&info.name)?,
    })
}

/// Resolves a wall time through the file's POSIX tz string.
fn footer_candidates(posix: &PosixTzString, wall: i64) -> TimeResult<WallCandidates> {
    let std_record = variant_record(&posix.std_info, false)?;
    let Some(dst_info) = &posix.dst_info else {
        return Ok(WallCandidates::Unique(ResolvedWallTime {
            epoch: EpochSeconds(wall - std_record.offset),
            record: std_record,
        }));
    };
    let dst_record = variant_record(&dst_info.variant_info, true)?;

    let (year, _, _) = utils::civil_from_days(wall.div_euclid(SECS_PER_DAY));
    let start_wall = rule_wall_seconds(year, &dst_info.start_date);
    let end_wall = rule_wall_seconds(year, &dst_info.end_date);
    let delta = dst_record.offset - std_record.offset;

    if delta > 0 {
        // The rule times are pre-transition wall clock values, so the
        // gap opens at the start rule and the overlap closes at the
        // end rule.
        if (start_wall..start_wall + delta).contains(&wall) {
            return Ok(WallCandidates::Gap {
                before: std_record,
                after: dst_record,
            });
        }
        if (end_wall - delta..end_wall).contains(&wall) {
            return Ok(WallCandidates::Overlap([
                ResolvedWallTime {
                    epoch: EpochSeconds(wall - dst_record.offset),
                    record: dst_record,
                },
                ResolvedWallTime {
                    epoch: EpochSeconds(wall - std_record.offset),
                    record: std_record,
                },
            ]));
        }
    }

    let dst_active = if start_wall <= end_wall {
        (start_wall..end_wall).contains(&wall)
    } else {
        // Southern hemisphere: daylight saving spans the year end.
        wall < end_wall || start_wall <= wall
    };
    let record = if dst_active { dst_record } else { std_record };
    Ok(WallCandidates::Unique(ResolvedWallTime {
        epoch: EpochSeconds(wall - record.offset),
        record,
    }))
}

/// Resolves an absolute instant through the file's POSIX tz string.
fn footer_record_at(posix: &PosixTzString, epoch: i64) -> TimeResult<ZoneRecord> {
    let std_record = variant_record(&posix.std_info, false)?;
    let Some(dst_info) = &posix.dst_info else {
        return Ok(std_record);
    };
    let dst_record = variant_record(&dst_info.variant_info, true)?;

    let (year, _, _) =
        utils::civil_from_days((epoch + std_record.offset).div_euclid(SECS_PER_DAY));
    let start_epoch = rule_wall_seconds(year, &dst_info.start_date) - std_record.offset;
    let end_epoch = rule_wall_seconds(year, &dst_info.end_date) - dst_record.offset;

    let dst_active = if start_epoch <= end_epoch {
        (start_epoch..end_epoch).contains(&epoch)
    } else {
        epoch < end_epoch || start_epoch <= epoch
    };
    Ok(if dst_active { dst_record } else { std_record })
}

/// Computes the wall-clock second count of a transition rule in the
/// given year.
fn rule_wall_seconds(year: i64, date: &TransitionDate) -> i64 {
    let days = match &date.day {
        TransitionDay::NoLeap(day) => {
            // 1-based and never counting February 29.
            let day = i64::from(*day);
            let leap_shift = i64::from(utils::in_leap_year(year) && day >= 60);
            utils::days_from_civil(year, 1, 1) + day - 1 + leap_shift
        }
        TransitionDay::WithLeap(day) => utils::days_from_civil(year, 1, 1) + i64::from(*day),
        TransitionDay::Mwd(month, week, weekday) => {
            month_week_day_epoch_days(year, *month, *week, *weekday)
        }
    };
    days * SECS_PER_DAY + date.time.0
}

/// Epoch day of the `week`-th `weekday` of `month`, where week 5 means
/// the last occurrence and weekday 0 is Sunday.
fn month_week_day_epoch_days(year: i64, month: u16, week: u16, weekday: u16) -> i64 {
    let month = month as u8;
    let month_start = utils::days_from_civil(year, month, 1);
    let first_weekday = i64::from(utils::weekday_sun0_from_days(month_start));
    let weekday = i64::from(weekday);
    let mut day_offset =
        (i64::from(week) - i64::from(first_weekday <= weekday)) * 7 + weekday - first_weekday;
    if day_offset >= i64::from(utils::days_in_month(year, month)) {
        day_offset -= 7;
    }
    month_start + day_offset
}

/// A caching [`ZoneProvider`] over TZif files.
///
/// "UTC" short-circuits to the trivial record without touching the
/// database; every other identifier is loaded once and cached.
#[derive(Debug, Default)]
pub struct FsZoneProvider {
    cache: RefCell<BTreeMap<String, Tzif>>,
}

impl FsZoneProvider {
    pub fn get(&self, identifier: &str) -> TimeResult<Tzif> {
        if let Some(tzif) = self.cache.borrow().get(identifier) {
            return Ok(tzif.clone());
        }
        let tzif = Tzif::read(identifier)?;
        log::debug!("loaded zone data for {identifier}");
        Ok(self
            .cache
            .borrow_mut()
            .entry(identifier.into())
            .or_insert(tzif)
            .clone())
    }
}

impl ZoneProvider for FsZoneProvider {
    fn candidates_for_civil(
        &self,
        zone: &str,
        civil: CivilDateTime,
    ) -> TimeResult<WallCandidates> {
        let wall = civil.wall_seconds();
        if zone == "UTC" {
            return Ok(WallCandidates::Unique(ResolvedWallTime {
                epoch: EpochSeconds(wall),
                record: ZoneRecord::utc(),
            }));
        }
        self.get(zone)?.candidates(wall)
    }

    fn offset_at(&self, zone: &str, epoch: EpochSeconds) -> TimeResult<ZoneRecord> {
        if zone == "UTC" {
            return Ok(ZoneRecord::utc());
        }
        self.get(zone)?.record_at(epoch.as_i64())
    }

    fn has_transition_rules(&self, zone: &str) -> TimeResult<bool> {
        if zone == "UTC" {
            return Ok(false);
        }
        self.get(zone)?.has_dst()
    }
}
