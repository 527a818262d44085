//! # slot-engine
//!
//! Deterministic scheduling engine for an interview-booking calendar.
//!
//! The presentation layer (calendar grid, forms, toasts) hands this crate
//! proposed slots and drag/resize events; the engine decides whether a slot
//! is valid, which axis of an event a drag actually changed, and how the
//! user's wall-clock entry maps to the canonical stored form. It owns the
//! authoritative schedule and notifies subscribers after each commit.
//!
//! ## Modules
//!
//! - [`codec`] — local wall-clock ↔ canonical storage conversion
//! - [`conflict`] — half-open interval overlap detection + past-slot guard
//! - [`reschedule`] — drag/resize classification and correction
//! - [`store`] — the schedule itself: create/update/delete/lookup
//! - [`snapshot`] — JSON snapshot persistence
//! - [`interview`] — the interview record and submission draft
//! - [`error`] — error types

pub mod codec;
pub mod conflict;
pub mod error;
pub mod interview;
pub mod reschedule;
pub mod snapshot;
pub mod store;

pub use codec::{to_canonical, to_local};
pub use conflict::{find_overlap, Slot, DEFAULT_SLOT_MINUTES};
pub use error::EngineError;
pub use interview::{Interview, InterviewDraft, InterviewKind};
pub use reschedule::{classify, ChangeType, ReschedulePlan};
pub use snapshot::Snapshot;
pub use store::{ScheduleStore, StoreEvent};
