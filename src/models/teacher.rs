//! Teacher model.
//!
//! A teacher has a set of subjects they are qualified to teach, a daily
//! hour cap, optional preferred days (rewarded during teacher selection),
//! and explicit (day, period) unavailability markers (hard constraint).

use serde::{Deserialize, Serialize};

use super::Weekday;

/// A teacher in the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    /// Unique teacher identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Subjects this teacher is qualified to teach.
    pub subjects: Vec<String>,
    /// Maximum lessons on any single day.
    pub max_hours_per_day: u32,
    /// Days this teacher prefers to work. Empty = no preference.
    pub preferred_days: Vec<Weekday>,
    /// Periods this teacher cannot teach.
    pub unavailable: Vec<UnavailablePeriod>,
}

/// A (day, period) a teacher is explicitly unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnavailablePeriod {
    pub day: Weekday,
    pub period: u32,
}

impl Teacher {
    /// Creates a teacher with the given id and name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            subjects: Vec::new(),
            max_hours_per_day: 6,
            preferred_days: Vec::new(),
            unavailable: Vec::new(),
        }
    }

    /// Adds a subject qualification.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subjects.push(subject.into());
        self
    }

    /// Sets the daily hour cap.
    pub fn with_max_hours_per_day(mut self, hours: u32) -> Self {
        self.max_hours_per_day = hours;
        self
    }

    /// Adds a preferred day.
    pub fn with_preferred_day(mut self, day: Weekday) -> Self {
        self.preferred_days.push(day);
        self
    }

    /// Marks a (day, period) as unavailable.
    pub fn with_unavailable(mut self, day: Weekday, period: u32) -> Self {
        self.unavailable.push(UnavailablePeriod { day, period });
        self
    }

    /// Whether this teacher is qualified for a subject.
    pub fn teaches(&self, subject: &str) -> bool {
        self.subjects.iter().any(|s| s == subject)
    }

    /// Whether this teacher prefers the given day.
    #[inline]
    pub fn prefers(&self, day: Weekday) -> bool {
        self.preferred_days.contains(&day)
    }

    /// Whether this teacher is unavailable at (day, period).
    pub fn is_unavailable(&self, day: Weekday, period: u32) -> bool {
        self.unavailable
            .iter()
            .any(|u| u.day == day && u.period == period)
    }
}
