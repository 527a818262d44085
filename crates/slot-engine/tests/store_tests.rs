//! End-to-end tests for the schedule store: booking, rescheduling, deletion,
//! persistence, and change notification.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{NaiveDate, NaiveDateTime};
use slot_engine::error::EngineError;
use slot_engine::{
    ChangeType, InterviewDraft, InterviewKind, ScheduleStore, Snapshot, StoreEvent,
};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

/// Store with a pinned clock well before the test dates.
fn store(tz_offset_minutes: i32) -> ScheduleStore {
    ScheduleStore::in_memory(tz_offset_minutes).with_clock(|| at(2025, 1, 1, 0, 0))
}

fn draft(candidate: &str, date: &str, time: &str) -> InterviewDraft {
    InterviewDraft {
        id: None,
        candidate_name: candidate.to_string(),
        interviewer_name: "Grace".to_string(),
        kind: InterviewKind::Technical,
        date: date.to_string(),
        time: time.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Booking
// ---------------------------------------------------------------------------

#[test]
fn booking_scenario_overlap_then_boundary() {
    let mut store = store(0);

    // A at 09:00-10:00.
    store.create(draft("Ada", "2025-01-21", "09:00")).unwrap();

    // B at 09:30 → rejected, naming A's candidate.
    let err = store
        .create(draft("Barbara", "2025-01-21", "09:30"))
        .unwrap_err();
    match err {
        EngineError::Overlap { candidate } => assert_eq!(candidate, "Ada"),
        other => panic!("expected Overlap, got {:?}", other),
    }
    assert_eq!(store.len(), 1, "rejected create must not mutate");

    // B at 10:00 → boundary touch, succeeds.
    store
        .create(draft("Barbara", "2025-01-21", "10:00"))
        .unwrap();
    assert_eq!(store.len(), 2);
}

#[test]
fn create_assigns_id_when_draft_has_none() {
    let mut store = store(0);
    let a = store.create(draft("Ada", "2025-01-21", "09:00")).unwrap();
    assert!(!a.id.is_empty());

    let mut with_id = draft("Barbara", "2025-01-21", "11:00");
    with_id.id = Some("fixed-id".to_string());
    let b = store.create(with_id).unwrap();
    assert_eq!(b.id, "fixed-id");
}

#[test]
fn create_canonicalizes_and_get_by_id_relocalizes() {
    // UTC+2: local 2025-01-21 09:00 stores as (2025-01-20, 07:00).
    let mut store = store(120);
    let created = store.create(draft("Ada", "2025-01-21", "09:00")).unwrap();
    assert_eq!(created.date, "2025-01-20");
    assert_eq!(created.time, "07:00");

    let shown = store.get_by_id(&created.id).unwrap();
    assert_eq!(shown.date, "2025-01-21");
    assert_eq!(shown.time, "09:00");
}

#[test]
fn create_rejects_past_slot() {
    let mut store = store(0);
    let err = store.create(draft("Ada", "2024-12-31", "09:00")).unwrap_err();
    assert!(matches!(err, EngineError::PastSlot));
    assert!(store.is_empty());
}

#[test]
fn create_rejects_blank_candidate() {
    let mut store = store(0);
    let err = store.create(draft("  ", "2025-01-21", "09:00")).unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));
}

// ---------------------------------------------------------------------------
// Rescheduling (two-phase drag path)
// ---------------------------------------------------------------------------

#[test]
fn drag_to_new_time_keeps_stored_date() {
    let mut store = store(0);
    let a = store.create(draft("Ada", "2025-01-21", "09:00")).unwrap();

    let plan = store
        .plan_reschedule(&a.id, at(2025, 1, 21, 9, 0), at(2025, 1, 21, 14, 0), None)
        .unwrap();
    assert_eq!(plan.change_type, ChangeType::Time);

    // Phase 1 is speculative: nothing committed yet.
    assert_eq!(store.get_by_id(&a.id).unwrap().time, "09:00");

    let updated = store.commit_reschedule(&a.id, &plan).unwrap();
    assert_eq!(updated.date, "2025-01-21", "stored date unchanged");
    assert_eq!(updated.time, "14:00");
}

#[test]
fn drag_to_new_date_commits_corrected_date() {
    let mut store = store(0);
    let a = store.create(draft("Ada", "2025-01-21", "09:00")).unwrap();

    let plan = store
        .plan_reschedule(&a.id, at(2025, 1, 21, 9, 0), at(2025, 1, 22, 9, 0), None)
        .unwrap();
    assert_eq!(plan.change_type, ChangeType::Date);

    let updated = store.commit_reschedule(&a.id, &plan).unwrap();
    assert_eq!(updated.date, "2025-01-23");
    assert_eq!(updated.time, "09:00");
}

#[test]
fn plan_rejects_overlap_and_store_stays_intact() {
    let mut store = store(0);
    let a = store.create(draft("Ada", "2025-01-21", "09:00")).unwrap();
    store
        .create(draft("Barbara", "2025-01-21", "14:00"))
        .unwrap();

    let err = store
        .plan_reschedule(&a.id, at(2025, 1, 21, 9, 0), at(2025, 1, 21, 14, 30), None)
        .unwrap_err();
    assert!(matches!(err, EngineError::Overlap { .. }));
    assert_eq!(store.get_by_id(&a.id).unwrap().time, "09:00");
}

#[test]
fn commit_on_deleted_interview_is_not_found() {
    let mut store = store(0);
    let a = store.create(draft("Ada", "2025-01-21", "09:00")).unwrap();
    let plan = store
        .plan_reschedule(&a.id, at(2025, 1, 21, 9, 0), at(2025, 1, 21, 14, 0), None)
        .unwrap();

    store.delete(&a.id);
    let err = store.commit_reschedule(&a.id, &plan).unwrap_err();
    assert!(matches!(err, EngineError::NotFound(_)));
}

// ---------------------------------------------------------------------------
// Form edits
// ---------------------------------------------------------------------------

#[test]
fn form_edit_replaces_fields_and_canonicalizes() {
    let mut store = store(120);
    let a = store.create(draft("Ada", "2025-01-21", "09:00")).unwrap();

    let mut edit = draft("Ada Lovelace", "2025-01-22", "11:30");
    edit.kind = InterviewKind::Behavioral;
    let updated = store.update(&a.id, edit, None).unwrap();

    assert_eq!(updated.candidate_name, "Ada Lovelace");
    assert_eq!(updated.kind, InterviewKind::Behavioral);
    assert_eq!(updated.date, "2025-01-21"); // canonical of local 2025-01-22
    assert_eq!(updated.time, "09:30"); // canonical of local 11:30
}

#[test]
fn form_edit_excludes_own_slot_from_overlap() {
    let mut store = store(0);
    let a = store.create(draft("Ada", "2025-01-21", "09:00")).unwrap();

    // Re-saving the same slot must not conflict with itself.
    let updated = store.update(&a.id, draft("Ada", "2025-01-21", "09:00"), None);
    assert!(updated.is_ok());
}

#[test]
fn form_edit_rejects_overlap_with_other() {
    let mut store = store(0);
    let a = store.create(draft("Ada", "2025-01-21", "09:00")).unwrap();
    store
        .create(draft("Barbara", "2025-01-21", "11:00"))
        .unwrap();

    let err = store
        .update(&a.id, draft("Ada", "2025-01-21", "11:30"), None)
        .unwrap_err();
    assert!(matches!(err, EngineError::Overlap { .. }));
}

#[test]
fn update_with_time_change_type_keeps_stored_date() {
    let mut store = store(120);
    let a = store.create(draft("Ada", "2025-01-21", "09:00")).unwrap();
    assert_eq!(a.date, "2025-01-20");

    // Drag-path surface: caller supplies the new local time, Time semantics.
    let updated = store
        .update(&a.id, draft("Ada", "2025-01-21", "14:00"), Some(ChangeType::Time))
        .unwrap();
    assert_eq!(updated.date, "2025-01-20", "stored date untouched");
    assert_eq!(updated.time, "12:00");
}

#[test]
fn update_unknown_id_is_not_found() {
    let mut store = store(0);
    let err = store
        .update("ghost", draft("Ada", "2025-01-21", "09:00"), None)
        .unwrap_err();
    assert!(matches!(err, EngineError::NotFound(_)));
}

// ---------------------------------------------------------------------------
// Deletion and lookup
// ---------------------------------------------------------------------------

#[test]
fn delete_is_idempotent() {
    let mut store = store(0);
    let a = store.create(draft("Ada", "2025-01-21", "09:00")).unwrap();

    assert!(!store.delete("ghost"));
    assert_eq!(store.len(), 1);

    assert!(store.delete(&a.id));
    assert!(!store.delete(&a.id));
    assert!(store.is_empty());
}

#[test]
fn get_by_id_unknown_is_not_found() {
    let store = store(0);
    assert!(matches!(
        store.get_by_id("ghost").unwrap_err(),
        EngineError::NotFound(_)
    ));
}

#[test]
fn list_preserves_insertion_order() {
    let mut store = store(0);
    let a = store.create(draft("Ada", "2025-01-21", "09:00")).unwrap();
    let b = store.create(draft("Barbara", "2025-01-21", "11:00")).unwrap();

    let ids: Vec<&str> = store.list().iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec![a.id.as_str(), b.id.as_str()]);
}

// ---------------------------------------------------------------------------
// Observers
// ---------------------------------------------------------------------------

#[test]
fn observers_receive_events_after_commit() {
    let mut store = store(0);
    let events: Rc<RefCell<Vec<StoreEvent>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    store.subscribe(move |event| sink.borrow_mut().push(event.clone()));

    let a = store.create(draft("Ada", "2025-01-21", "09:00")).unwrap();
    let plan = store
        .plan_reschedule(&a.id, at(2025, 1, 21, 9, 0), at(2025, 1, 21, 14, 0), None)
        .unwrap();
    store.commit_reschedule(&a.id, &plan).unwrap();
    store.delete(&a.id);

    let events = events.borrow();
    assert_eq!(events.len(), 3);
    assert!(matches!(events[0], StoreEvent::Scheduled(_)));
    match &events[1] {
        StoreEvent::Rescheduled(updated) => assert_eq!(updated.time, "14:00"),
        other => panic!("expected Rescheduled, got {:?}", other),
    }
    assert_eq!(events[2], StoreEvent::Deleted(a.id.clone()));
}

#[test]
fn rejected_operations_emit_nothing() {
    let mut store = store(0);
    let count = Rc::new(RefCell::new(0usize));
    let sink = Rc::clone(&count);
    store.subscribe(move |_| *sink.borrow_mut() += 1);

    store.create(draft("Ada", "2025-01-21", "09:00")).unwrap();
    let _ = store.create(draft("Barbara", "2025-01-21", "09:30"));
    store.delete("ghost");

    assert_eq!(*count.borrow(), 1);
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

#[test]
fn snapshot_round_trips_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("interview-store.json");

    let mut store = ScheduleStore::open(0, Snapshot::new(&path))
        .unwrap()
        .with_clock(|| at(2025, 1, 1, 0, 0));
    assert!(store.is_empty(), "absent snapshot is an empty set");

    let a = store.create(draft("Ada", "2025-01-21", "09:00")).unwrap();
    drop(store);

    let reopened = ScheduleStore::open(0, Snapshot::new(&path)).unwrap();
    assert_eq!(reopened.len(), 1);
    assert_eq!(reopened.list()[0], a);
}

#[test]
fn snapshot_tolerates_empty_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("interview-store.json");
    std::fs::write(&path, "").unwrap();

    let loaded = Snapshot::new(&path).load().unwrap();
    assert!(loaded.is_empty());
}

#[test]
fn snapshot_skips_records_with_malformed_stamps() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("interview-store.json");
    std::fs::write(
        &path,
        r#"[
            {"id":"bad","candidateName":"Eve","interviewerName":"Grace",
             "type":"HR","date":"2025-01-21","time":"nonsense"},
            {"id":"good","candidateName":"Ada","interviewerName":"Grace",
             "type":"Technical","date":"2025-01-21","time":"09:00"}
        ]"#,
    )
    .unwrap();

    let loaded = Snapshot::new(&path).load().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id, "good");
}

#[test]
fn snapshot_rewritten_after_each_mutation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("interview-store.json");

    let mut store = ScheduleStore::open(0, Snapshot::new(&path))
        .unwrap()
        .with_clock(|| at(2025, 1, 1, 0, 0));
    let a = store.create(draft("Ada", "2025-01-21", "09:00")).unwrap();
    store.delete(&a.id);

    let loaded = Snapshot::new(&path).load().unwrap();
    assert!(loaded.is_empty(), "delete must be reflected on disk");
}
