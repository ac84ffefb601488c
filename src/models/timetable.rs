//! Timetable record model.
//!
//! A timetable row ties a set of slots to the school configuration it
//! was generated for and tracks the generation lifecycle:
//! `Generating → Completed | Failed`. A run that places only some
//! lessons still finishes `Completed`; unplaced lessons are reported,
//! not treated as failure.

use serde::{Deserialize, Serialize};

/// Generation lifecycle state of a timetable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimetableStatus {
    /// A generation run is in progress.
    Generating,
    /// Generation finished (possibly with unplaced lessons).
    Completed,
    /// Generation aborted on a fatal error.
    Failed,
}

/// A stored timetable record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timetable {
    /// Store-assigned identifier.
    pub id: String,
    /// The school configuration this timetable was generated for.
    pub school_config_id: String,
    /// Current lifecycle state.
    pub status: TimetableStatus,
    /// Candidate placements rejected and retried during generation.
    pub conflicts_resolved: u32,
}

impl Timetable {
    /// Creates a fresh record in the `Generating` state.
    pub fn new(id: impl Into<String>, school_config_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            school_config_id: school_config_id.into(),
            status: TimetableStatus::Generating,
            conflicts_resolved: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_timetable_is_generating() {
        let tt = Timetable::new("tt1", "cfg1");
        assert_eq!(tt.status, TimetableStatus::Generating);
        assert_eq!(tt.conflicts_resolved, 0);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&TimetableStatus::Completed).unwrap();
        assert_eq!(json, "\"completed\"");
        let back: TimetableStatus = serde_json::from_str("\"failed\"").unwrap();
        assert_eq!(back, TimetableStatus::Failed);
    }
}
