//! Overlap detection and the past-slot guard.
//!
//! Slots are half-open `[start, end)` intervals on the wall-clock plane.
//! Adjacent slots (one ending exactly when another starts) are NOT conflicts.

use chrono::{Duration, NaiveDateTime};

use crate::codec;
use crate::error::{EngineError, Result};
use crate::interview::Interview;

/// Duration assumed when only a start instant is known.
pub const DEFAULT_SLOT_MINUTES: i64 = 60;

/// A candidate `[start, end)` interval being validated before commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Slot {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Slot { start, end }
    }

    /// Slot with the default one-hour duration.
    pub fn from_start(start: NaiveDateTime) -> Self {
        Slot {
            start,
            end: start + Duration::minutes(DEFAULT_SLOT_MINUTES),
        }
    }

    /// Two intervals overlap iff `a.start < b.end && b.start < a.end`.
    /// This excludes the adjacent case where `a.end == b.start`.
    pub fn overlaps(&self, other: &Slot) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// The interval an existing record occupies on the calendar: its stored pair
/// combined into an instant, plus the default duration.
fn record_slot(interview: &Interview) -> Result<Slot> {
    Ok(Slot::from_start(codec::slot_start(
        &interview.date,
        &interview.time,
    )?))
}

/// Find the first interview conflicting with `candidate`, skipping
/// `exclude_id` (the event being moved; `None` when creating).
///
/// Ties break by store iteration order — stable, not priority-based.
pub fn find_overlap<'a>(
    interviews: &'a [Interview],
    candidate: Slot,
    exclude_id: Option<&str>,
) -> Result<Option<&'a Interview>> {
    for interview in interviews {
        if exclude_id == Some(interview.id.as_str()) {
            continue;
        }
        if candidate.overlaps(&record_slot(interview)?) {
            return Ok(Some(interview));
        }
    }
    Ok(None)
}

/// Reject a start instant strictly before `now`, regardless of overlap state.
pub fn ensure_future(start: NaiveDateTime, now: NaiveDateTime) -> Result<()> {
    if start < now {
        return Err(EngineError::PastSlot);
    }
    Ok(())
}

/// Full candidate validation: past guard first, then overlap. The overlap
/// error carries the conflicting candidate's name for the user message.
pub fn check_slot(
    interviews: &[Interview],
    candidate: Slot,
    exclude_id: Option<&str>,
    now: NaiveDateTime,
) -> Result<()> {
    ensure_future(candidate.start, now)?;
    if let Some(existing) = find_overlap(interviews, candidate, exclude_id)? {
        return Err(EngineError::Overlap {
            candidate: existing.candidate_name.clone(),
        });
    }
    Ok(())
}
