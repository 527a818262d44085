//! Keyed JSON snapshot of the full schedule.
//!
//! One file, one array of interview records, rewritten after every mutating
//! store operation. No schema versioning; an absent or empty file is an empty
//! set. Records whose stored date/time do not parse are skipped on load with
//! a warning rather than failing the whole snapshot.

use std::fs;
use std::path::PathBuf;

use crate::codec;
use crate::error::Result;
use crate::interview::Interview;

pub struct Snapshot {
    path: PathBuf,
}

impl Snapshot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Snapshot { path: path.into() }
    }

    /// Load the persisted schedule. Absent or empty file → empty set.
    ///
    /// # Errors
    /// `Io` when the file exists but cannot be read; `Snapshot` when the
    /// contents are not a JSON array of records.
    pub fn load(&self) -> Result<Vec<Interview>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        let records: Vec<Interview> = serde_json::from_str(&raw)?;
        let mut interviews = Vec::with_capacity(records.len());
        for interview in records {
            if codec::slot_start(&interview.date, &interview.time).is_err() {
                tracing::warn!(
                    id = %interview.id,
                    date = %interview.date,
                    time = %interview.time,
                    "skipping snapshot record with malformed date/time"
                );
                continue;
            }
            interviews.push(interview);
        }
        Ok(interviews)
    }

    /// Rewrite the snapshot with the full current set.
    pub fn store(&self, interviews: &[Interview]) -> Result<()> {
        let json = serde_json::to_string_pretty(interviews)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
