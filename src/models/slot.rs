//! Slot model: the committed scheduling fact.
//!
//! A slot places one lesson unit at a specific (day, period) with an
//! assigned teacher, class, and classroom. Within one timetable no two
//! slots may share (day, period, teacher), (day, period, class), or
//! (day, period, classroom).
//!
//! Slots created or altered by hand carry `manual_override = true`;
//! regeneration never silently overwrites them.

use serde::{Deserialize, Serialize};

use super::Weekday;

/// A committed placement of one lesson unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// Day of the week.
    pub day: Weekday,
    /// Period number (1-based).
    pub period: u32,
    /// Subject taught.
    pub subject: String,
    /// Assigned teacher.
    pub teacher_id: String,
    /// Attending class.
    pub class_id: String,
    /// Assigned classroom label ("CR1", "CR2", ...).
    pub classroom: String,
    /// Whether a human created or last edited this slot.
    pub manual_override: bool,
}

/// A slot together with its store-assigned identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSlot {
    /// Store-assigned slot identifier.
    pub id: String,
    /// Timetable this slot belongs to.
    pub timetable_id: String,
    /// The slot payload.
    pub slot: Slot,
}

impl Slot {
    /// Creates a generator-produced slot (no manual override).
    pub fn new(
        day: Weekday,
        period: u32,
        subject: impl Into<String>,
        teacher_id: impl Into<String>,
        class_id: impl Into<String>,
        classroom: impl Into<String>,
    ) -> Self {
        Self {
            day,
            period,
            subject: subject.into(),
            teacher_id: teacher_id.into(),
            class_id: class_id.into(),
            classroom: classroom.into(),
            manual_override: false,
        }
    }

    /// Marks this slot as human-edited.
    pub fn with_manual_override(mut self) -> Self {
        self.manual_override = true;
        self
    }

    /// Whether this slot occupies the given (day, period).
    #[inline]
    pub fn is_at(&self, day: Weekday, period: u32) -> bool {
        self.day == day && self.period == period
    }
}

impl StoredSlot {
    /// Pairs a slot with its store-assigned identity.
    pub fn new(id: impl Into<String>, timetable_id: impl Into<String>, slot: Slot) -> Self {
        Self {
            id: id.into(),
            timetable_id: timetable_id.into(),
            slot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_construction() {
        let slot = Slot::new(Weekday::Monday, 1, "Math", "t1", "c1", "CR1");
        assert_eq!(slot.day, Weekday::Monday);
        assert_eq!(slot.period, 1);
        assert_eq!(slot.subject, "Math");
        assert!(!slot.manual_override);

        let edited = slot.clone().with_manual_override();
        assert!(edited.manual_override);
    }

    #[test]
    fn test_slot_is_at() {
        let slot = Slot::new(Weekday::Tuesday, 3, "Science", "t1", "c1", "CR2");
        assert!(slot.is_at(Weekday::Tuesday, 3));
        assert!(!slot.is_at(Weekday::Tuesday, 4));
        assert!(!slot.is_at(Weekday::Monday, 3));
    }

    #[test]
    fn test_slot_serde_round_trip() {
        let slot = Slot::new(Weekday::Friday, 8, "History", "t2", "c3", "CR5");
        let json = serde_json::to_string(&slot).unwrap();
        let back: Slot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, slot);
    }
}
