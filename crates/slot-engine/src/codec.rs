//! Conversion between local wall-clock entry and canonical storage form.
//!
//! The user enters a date and a time in their own timezone; storage keeps a
//! UTC-normalized projection of each field. The two fields are normalized
//! **independently** — the date against its own midnight, the time against a
//! fixed epoch day — mirroring the behavior the rest of the system was built
//! around. The canonical pair is therefore not guaranteed to describe one
//! consistent UTC instant; it is a per-axis shift. Callers must not recombine
//! canonical date and canonical time and treat the result as UTC. A future
//! combined-instant codec can replace this module without touching the
//! overlap or reschedule logic, which never look inside the canonical pair.
//!
//! Offsets are whole minutes east of UTC (`FixedOffset::east` convention:
//! offset = local − UTC).

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::error::{EngineError, Result};

const MINUTES_PER_DAY: i64 = 1440;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

pub(crate) fn parse_date(s: &str) -> Result<NaiveDate> {
    let date = NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| {
        EngineError::Validation(format!("malformed date {:?}, expected YYYY-MM-DD", s))
    })?;
    // chrono accepts unpadded components; the stored form is strict.
    if date.format(DATE_FORMAT).to_string() != s {
        return Err(EngineError::Validation(format!(
            "malformed date {:?}, expected YYYY-MM-DD",
            s
        )));
    }
    Ok(date)
}

pub(crate) fn parse_time(s: &str) -> Result<NaiveTime> {
    let time = NaiveTime::parse_from_str(s, TIME_FORMAT).map_err(|_| {
        EngineError::Validation(format!("malformed time {:?}, expected HH:mm", s))
    })?;
    if time.format(TIME_FORMAT).to_string() != s {
        return Err(EngineError::Validation(format!(
            "malformed time {:?}, expected HH:mm",
            s
        )));
    }
    Ok(time)
}

fn minute_of_day(time: NaiveTime) -> i64 {
    time.hour() as i64 * 60 + time.minute() as i64
}

fn format_minute(minute: i64) -> String {
    format!("{:02}:{:02}", minute / 60, minute % 60)
}

/// Project a local (date, time) pair entered at `tz_offset_minutes` east of
/// UTC into canonical storage form.
///
/// The date is interpreted as local midnight and shifted westward by the
/// offset; only the day carry survives into the canonical date string. The
/// time is shifted as a bare minute-of-day, wrapping mod 24 h.
///
/// # Errors
/// `EngineError::Validation` on any malformed or out-of-range component. The
/// codec never clamps.
pub fn to_canonical(
    local_date: &str,
    local_time: &str,
    tz_offset_minutes: i32,
) -> Result<(String, String)> {
    let date = parse_date(local_date)?;
    let time = parse_time(local_time)?;
    let offset = tz_offset_minutes as i64;

    let day_carry = (-offset).div_euclid(MINUTES_PER_DAY);
    let canonical_date = date + Duration::days(day_carry);

    let canonical_minute = (minute_of_day(time) - offset).rem_euclid(MINUTES_PER_DAY);

    Ok((
        canonical_date.format(DATE_FORMAT).to_string(),
        format_minute(canonical_minute),
    ))
}

/// Inverse of [`to_canonical`]: project a stored canonical pair back into the
/// user's wall clock at `tz_offset_minutes`.
///
/// The date axis re-anchors at the minute-of-day where the local midnight
/// landed after the canonical shift, so
/// `to_local(to_canonical(d, t, z), z) == (d, t)` holds for every valid pair
/// and every whole-minute offset.
///
/// # Errors
/// `EngineError::Validation` on malformed input.
pub fn to_local(
    canonical_date: &str,
    canonical_time: &str,
    tz_offset_minutes: i32,
) -> Result<(String, String)> {
    let date = parse_date(canonical_date)?;
    let time = parse_time(canonical_time)?;
    let offset = tz_offset_minutes as i64;

    let anchor = (-offset).rem_euclid(MINUTES_PER_DAY);
    let day_carry = (anchor + offset).div_euclid(MINUTES_PER_DAY);
    let local_date = date + Duration::days(day_carry);

    let local_minute = (minute_of_day(time) + offset).rem_euclid(MINUTES_PER_DAY);

    Ok((
        local_date.format(DATE_FORMAT).to_string(),
        format_minute(local_minute),
    ))
}

/// Combine a stored (date, time) pair into the wall-clock-plane instant the
/// calendar places the event at. This is how a record enters overlap checks.
pub fn slot_start(date: &str, time: &str) -> Result<NaiveDateTime> {
    let date = parse_date(date)?;
    let time = parse_time(time)?;
    Ok(date.and_time(time))
}
