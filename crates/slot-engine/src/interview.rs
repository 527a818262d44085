//! The interview record and the draft form the presentation layer submits.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Closed set of interview kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterviewKind {
    Technical,
    #[serde(rename = "HR")]
    Hr,
    Behavioral,
}

impl std::fmt::Display for InterviewKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            InterviewKind::Technical => "Technical",
            InterviewKind::Hr => "HR",
            InterviewKind::Behavioral => "Behavioral",
        };
        f.write_str(name)
    }
}

/// A scheduled interview as persisted. Identity is `id`; all other fields are
/// replaced wholesale on update.
///
/// `date` and `time` hold the **canonical** (UTC-normalized) projection of
/// what the user entered, as `YYYY-MM-DD` and `HH:mm` strings. The
/// presentation layer must re-localize through [`crate::codec`] before
/// display. Serde names match the snapshot format the original client
/// persisted, so existing snapshots load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interview {
    pub id: String,
    pub candidate_name: String,
    pub interviewer_name: String,
    #[serde(rename = "type")]
    pub kind: InterviewKind,
    pub date: String,
    pub time: String,
}

/// What a booking form or slot-select hands to the store. `date` and `time`
/// are on the **local** wall-clock plane; the store canonicalizes them before
/// committing. A draft without an id gets a fresh v4 uuid on create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterviewDraft {
    pub id: Option<String>,
    pub candidate_name: String,
    pub interviewer_name: String,
    pub kind: InterviewKind,
    pub date: String,
    pub time: String,
}

impl InterviewDraft {
    /// Reject empty display names. Date/time format checking happens in the
    /// codec, not here.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.candidate_name.trim().is_empty() {
            return Err(EngineError::Validation(
                "candidate name must not be empty".to_string(),
            ));
        }
        if self.interviewer_name.trim().is_empty() {
            return Err(EngineError::Validation(
                "interviewer name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
