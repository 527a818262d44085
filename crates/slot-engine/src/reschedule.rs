//! Classification and correction of drag/resize changes.
//!
//! The calendar represents an interview as a single instant, while storage
//! keeps date and time as independently-normalized fields. Recombining them
//! after a drag requires knowing which axis the user actually meant to change,
//! so rescheduling runs in two phases: [`plan`] is pure and speculative
//! (validate + classify + compute the pair to persist, no mutation), and the
//! store commits a confirmed plan separately.

use chrono::{Duration, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::codec;
use crate::conflict::{self, Slot};
use crate::error::{EngineError, Result};
use crate::interview::Interview;

/// Which axis a drag or resize actually altered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Date,
    Time,
    Both,
}

impl std::fmt::Display for ChangeType {
    /// Phrasing used in the confirm dialog ("update the date and time of...").
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            ChangeType::Date => "date",
            ChangeType::Time => "time",
            ChangeType::Both => "date and time",
        };
        f.write_str(text)
    }
}

/// Compare only hour+minute for the time axis and only day/month/year for the
/// date axis. A drag that lands exactly where it started classifies as
/// `Both`, matching the source behavior.
pub fn classify(original_start: NaiveDateTime, new_start: NaiveDateTime) -> ChangeType {
    let same_time = original_start.hour() == new_start.hour()
        && original_start.minute() == new_start.minute();
    let same_date = original_start.date() == new_start.date();

    match (same_time, same_date) {
        (true, false) => ChangeType::Date,
        (false, true) => ChangeType::Time,
        _ => ChangeType::Both,
    }
}

/// A validated, ready-to-commit reschedule. `date` and `time` are already in
/// canonical storage form; committing is a plain field replace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReschedulePlan {
    pub change_type: ChangeType,
    pub date: String,
    pub time: String,
}

/// Phase 1 of a reschedule: validate the proposed interval, classify the
/// change, and compute the canonical pair to persist. Never mutates anything.
///
/// Correction rule:
/// - `Time` — the stored date string is kept verbatim (it is already
///   canonical and must not pass through the codec again); only the new
///   time-of-day is canonicalized.
/// - `Date` / `Both` — the new start's date is advanced by one calendar day
///   before canonicalization. This compensates for the independent-axis UTC
///   shift in the codec and is kept exactly as the source system behaves;
///   changing it silently would move every persisted reschedule by a day.
///
/// # Errors
/// `NotFound` for an unknown id, `PastSlot` when `new_start` precedes `now`,
/// `Overlap` when the interval hits another interview.
pub fn plan(
    interviews: &[Interview],
    id: &str,
    original_start: NaiveDateTime,
    new_start: NaiveDateTime,
    new_end: Option<NaiveDateTime>,
    tz_offset_minutes: i32,
    now: NaiveDateTime,
) -> Result<ReschedulePlan> {
    let interview = interviews
        .iter()
        .find(|i| i.id == id)
        .ok_or_else(|| EngineError::NotFound(id.to_string()))?;

    let candidate = match new_end {
        Some(end) => Slot::new(new_start, end),
        None => Slot::from_start(new_start),
    };
    conflict::check_slot(interviews, candidate, Some(id), now)?;

    let change_type = classify(original_start, new_start);

    let new_time = new_start.format("%H:%M").to_string();
    let (date, time) = match change_type {
        ChangeType::Time => {
            let (_, canonical_time) = codec::to_canonical(
                &new_start.date().format("%Y-%m-%d").to_string(),
                &new_time,
                tz_offset_minutes,
            )?;
            (interview.date.clone(), canonical_time)
        }
        ChangeType::Date | ChangeType::Both => {
            let corrected = new_start.date() + Duration::days(1);
            codec::to_canonical(
                &corrected.format("%Y-%m-%d").to_string(),
                &new_time,
                tz_offset_minutes,
            )?
        }
    };

    Ok(ReschedulePlan {
        change_type,
        date,
        time,
    })
}
