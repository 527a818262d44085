//! Error types for slot-engine operations.

use thiserror::Error;

/// Errors surfaced by the scheduling engine.
///
/// Every variant maps to a user-recoverable condition: the presentation layer
/// shows the display string and the store is left untouched. None of these are
/// fatal to the process.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Malformed date/time string or empty required field. The engine never
    /// clamps or repairs input.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The proposed start instant is strictly before "now".
    #[error("Cannot schedule interviews in the past")]
    PastSlot,

    /// The proposed slot intersects an existing interview. Carries the
    /// conflicting candidate's name for the user message.
    #[error("This time slot overlaps with {candidate}'s interview")]
    Overlap { candidate: String },

    /// Update or lookup on an id the store does not hold.
    #[error("No interview with id {0}")]
    NotFound(String),

    /// Snapshot file could not be read or written.
    #[error("Snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot contents were not a valid interview array.
    #[error("Snapshot decode error: {0}")]
    Snapshot(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
