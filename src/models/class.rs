//! Student class model.
//!
//! A class owns an ordered list of subject requirements; each requirement
//! names a weekly frequency and whether the subject needs a dedicated room
//! (labs, gyms). Requirements expand into individual lesson units at
//! generation time.

use serde::{Deserialize, Serialize};

/// A group of students that attends lessons together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentClass {
    /// Unique class identifier.
    pub id: String,
    /// Display name (e.g. "Grade 6A").
    pub name: String,
    /// Required subjects, in setup order.
    pub requirements: Vec<SubjectRequirement>,
}

/// One subject a class must take, with its weekly frequency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectRequirement {
    /// Subject name.
    pub subject: String,
    /// Lessons per week.
    pub weekly_frequency: u32,
    /// Whether the subject needs a dedicated room type.
    pub requires_specific_room: bool,
}

impl StudentClass {
    /// Creates a class with the given id and name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            requirements: Vec::new(),
        }
    }

    /// Adds a subject requirement.
    pub fn with_subject(mut self, subject: impl Into<String>, weekly_frequency: u32) -> Self {
        self.requirements.push(SubjectRequirement {
            subject: subject.into(),
            weekly_frequency,
            requires_specific_room: false,
        });
        self
    }

    /// Adds a subject requirement that needs a dedicated room.
    pub fn with_room_bound_subject(
        mut self,
        subject: impl Into<String>,
        weekly_frequency: u32,
    ) -> Self {
        self.requirements.push(SubjectRequirement {
            subject: subject.into(),
            weekly_frequency,
            requires_specific_room: true,
        });
        self
    }

    /// Total lesson units this class needs per week.
    pub fn weekly_lesson_count(&self) -> u32 {
        self.requirements.iter().map(|r| r.weekly_frequency).sum()
    }

    /// The requirement for a subject, if any.
    pub fn requirement(&self, subject: &str) -> Option<&SubjectRequirement> {
        self.requirements.iter().find(|r| r.subject == subject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_builder() {
        let class = StudentClass::new("c1", "Grade 6A")
            .with_subject("Math", 5)
            .with_room_bound_subject("Science", 4)
            .with_subject("English", 5);

        assert_eq!(class.id, "c1");
        assert_eq!(class.name, "Grade 6A");
        assert_eq!(class.requirements.len(), 3);
        assert!(!class.requirements[0].requires_specific_room);
        assert!(class.requirements[1].requires_specific_room);
    }

    #[test]
    fn test_weekly_lesson_count() {
        let class = StudentClass::new("c1", "Grade 6A")
            .with_subject("Math", 5)
            .with_subject("English", 3);
        assert_eq!(class.weekly_lesson_count(), 8);

        let empty = StudentClass::new("c2", "Grade 6B");
        assert_eq!(empty.weekly_lesson_count(), 0);
    }

    #[test]
    fn test_requirement_lookup() {
        let class = StudentClass::new("c1", "Grade 6A").with_subject("Math", 5);
        assert_eq!(class.requirement("Math").map(|r| r.weekly_frequency), Some(5));
        assert!(class.requirement("History").is_none());
    }
}
