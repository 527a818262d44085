//! The authoritative in-memory schedule and its sole writer.
//!
//! Every write passes through the past-slot guard, overlap detection, and the
//! codec before anything mutates. Operations are synchronous and atomic from
//! the caller's perspective: a rejected call leaves the set untouched, and a
//! successful one is fully committed before observers hear about it.

use chrono::{Local, NaiveDateTime};
use uuid::Uuid;

use crate::codec;
use crate::conflict::{self, Slot};
use crate::error::{EngineError, Result};
use crate::interview::{Interview, InterviewDraft};
use crate::reschedule::{self, ChangeType, ReschedulePlan};
use crate::snapshot::Snapshot;

/// Change notification handed to subscribers after a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    Scheduled(Interview),
    /// Carries the updated record for notification simulation.
    Rescheduled(Interview),
    Deleted(String),
}

type Clock = Box<dyn Fn() -> NaiveDateTime>;
type Observer = Box<dyn Fn(&StoreEvent)>;

pub struct ScheduleStore {
    interviews: Vec<Interview>,
    tz_offset_minutes: i32,
    clock: Clock,
    snapshot: Option<Snapshot>,
    observers: Vec<Observer>,
}

impl ScheduleStore {
    /// Store with no persistence, using the host clock.
    pub fn in_memory(tz_offset_minutes: i32) -> Self {
        ScheduleStore {
            interviews: Vec::new(),
            tz_offset_minutes,
            clock: Box::new(|| Local::now().naive_local()),
            snapshot: None,
            observers: Vec::new(),
        }
    }

    /// Store backed by a snapshot file, loaded now and rewritten after every
    /// mutation.
    pub fn open(tz_offset_minutes: i32, snapshot: Snapshot) -> Result<Self> {
        let interviews = snapshot.load()?;
        Ok(ScheduleStore {
            interviews,
            tz_offset_minutes,
            clock: Box::new(|| Local::now().naive_local()),
            snapshot: Some(snapshot),
            observers: Vec::new(),
        })
    }

    /// Replace the clock. Tests pin "now" with this.
    pub fn with_clock(mut self, clock: impl Fn() -> NaiveDateTime + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Register a change observer. Observers run synchronously after each
    /// commit; they never gate or roll back the commit.
    pub fn subscribe(&mut self, observer: impl Fn(&StoreEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn now(&self) -> NaiveDateTime {
        (self.clock)()
    }

    fn emit(&self, event: StoreEvent) {
        for observer in &self.observers {
            observer(&event);
        }
    }

    /// Snapshot persistence is best-effort: an I/O failure after a commit is
    /// logged, not surfaced, so the in-memory set never disagrees with what
    /// the caller was told succeeded.
    fn persist(&self) {
        if let Some(snapshot) = &self.snapshot {
            if let Err(err) = snapshot.store(&self.interviews) {
                tracing::warn!(error = %err, "failed to rewrite schedule snapshot");
            }
        }
    }

    /// Book a new interview. The draft's date/time are on the local plane;
    /// they are guarded, overlap-checked, then canonicalized. A draft without
    /// an id gets a fresh v4 uuid.
    pub fn create(&mut self, draft: InterviewDraft) -> Result<Interview> {
        draft.validate()?;
        let start = codec::slot_start(&draft.date, &draft.time)?;
        conflict::check_slot(&self.interviews, Slot::from_start(start), None, self.now())?;
        let (date, time) = codec::to_canonical(&draft.date, &draft.time, self.tz_offset_minutes)?;

        let interview = Interview {
            id: draft.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            candidate_name: draft.candidate_name,
            interviewer_name: draft.interviewer_name,
            kind: draft.kind,
            date,
            time,
        };
        self.interviews.push(interview.clone());
        self.persist();
        tracing::debug!(id = %interview.id, "interview scheduled");
        self.emit(StoreEvent::Scheduled(interview.clone()));
        Ok(interview)
    }

    /// Replace an interview's fields wholesale.
    ///
    /// With `change_type` (the drag/resize path) the time-axis rule applies:
    /// `Time` keeps the stored date untouched and canonicalizes only the new
    /// time; `Date`/`Both` canonicalize the supplied (already corrected)
    /// pair. Without `change_type` (a form edit) the full local pair is
    /// guarded, overlap-checked against everything but this id, and
    /// canonicalized directly.
    pub fn update(
        &mut self,
        id: &str,
        draft: InterviewDraft,
        change_type: Option<ChangeType>,
    ) -> Result<Interview> {
        draft.validate()?;
        let index = self
            .interviews
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| EngineError::NotFound(id.to_string()))?;

        let (date, time) = match change_type {
            Some(ChangeType::Time) => {
                let (_, canonical_time) =
                    codec::to_canonical(&draft.date, &draft.time, self.tz_offset_minutes)?;
                (self.interviews[index].date.clone(), canonical_time)
            }
            Some(ChangeType::Date) | Some(ChangeType::Both) => {
                codec::to_canonical(&draft.date, &draft.time, self.tz_offset_minutes)?
            }
            None => {
                let start = codec::slot_start(&draft.date, &draft.time)?;
                conflict::check_slot(
                    &self.interviews,
                    Slot::from_start(start),
                    Some(id),
                    self.now(),
                )?;
                codec::to_canonical(&draft.date, &draft.time, self.tz_offset_minutes)?
            }
        };

        let updated = Interview {
            id: id.to_string(),
            candidate_name: draft.candidate_name,
            interviewer_name: draft.interviewer_name,
            kind: draft.kind,
            date,
            time,
        };
        self.interviews[index] = updated.clone();
        self.persist();
        tracing::debug!(id = %updated.id, change_type = ?change_type, "interview updated");
        self.emit(StoreEvent::Rescheduled(updated.clone()));
        Ok(updated)
    }

    /// Phase 1 of a drag/resize: validate and classify without mutating.
    /// The result is held while the user confirms.
    pub fn plan_reschedule(
        &self,
        id: &str,
        original_start: NaiveDateTime,
        new_start: NaiveDateTime,
        new_end: Option<NaiveDateTime>,
    ) -> Result<ReschedulePlan> {
        reschedule::plan(
            &self.interviews,
            id,
            original_start,
            new_start,
            new_end,
            self.tz_offset_minutes,
            self.now(),
        )
    }

    /// Phase 2: commit a confirmed plan. The plan's pair is already
    /// canonical, so this is a plain field replace.
    pub fn commit_reschedule(&mut self, id: &str, plan: &ReschedulePlan) -> Result<Interview> {
        let index = self
            .interviews
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| EngineError::NotFound(id.to_string()))?;

        let mut updated = self.interviews[index].clone();
        updated.date = plan.date.clone();
        updated.time = plan.time.clone();
        self.interviews[index] = updated.clone();
        self.persist();
        tracing::debug!(id = %updated.id, change_type = %plan.change_type, "interview rescheduled");
        self.emit(StoreEvent::Rescheduled(updated.clone()));
        Ok(updated)
    }

    /// Remove by id. Deleting an absent id is a no-op, not an error; returns
    /// whether anything was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.interviews.len();
        self.interviews.retain(|i| i.id != id);
        if self.interviews.len() == before {
            return false;
        }
        self.persist();
        tracing::debug!(id = %id, "interview deleted");
        self.emit(StoreEvent::Deleted(id.to_string()));
        true
    }

    /// The interview re-localized for display.
    pub fn get_by_id(&self, id: &str) -> Result<Interview> {
        let interview = self
            .interviews
            .iter()
            .find(|i| i.id == id)
            .ok_or_else(|| EngineError::NotFound(id.to_string()))?;
        let (date, time) =
            codec::to_local(&interview.date, &interview.time, self.tz_offset_minutes)?;
        Ok(Interview {
            date,
            time,
            ..interview.clone()
        })
    }

    /// Canonical records in stable insertion order.
    pub fn list(&self) -> &[Interview] {
        &self.interviews
    }

    pub fn len(&self) -> usize {
        self.interviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interviews.is_empty()
    }
}
