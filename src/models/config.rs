//! School configuration model.
//!
//! Defines the weekly scheduling frame: which days school runs, how many
//! periods fit in a day, and how many classrooms exist. Policy flags
//! collected at setup time ride along; only `allow_subject_repetition`
//! is enforced during placement, the rest are recorded for future use.
//!
//! # Time Representation
//! Day times are minutes since midnight (08:00 = 480). Periods are
//! numbered from 1.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A school day.
///
/// Variant order matches the calendar week, so deriving `Ord` sorts
/// Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All seven days in calendar order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// The English day name ("Monday", "Tuesday", ...).
    pub fn name(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The weekly scheduling frame plus setup-time policy flags.
///
/// Immutable once a generation run starts: the generator works against
/// a read-only snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolConfig {
    /// Days on which lessons may be scheduled, in week order.
    pub working_days: Vec<Weekday>,
    /// First period start (minutes since midnight).
    pub start_minutes: u32,
    /// Last period end (minutes since midnight).
    pub end_minutes: u32,
    /// Length of one period (minutes).
    pub period_duration_minutes: u32,
    /// Number of periods per day, numbered 1..=periods_per_day.
    pub periods_per_day: u32,
    /// Number of classrooms, labeled "CR1".."CR{n}".
    pub total_classrooms: u32,
    /// When `true`, a class may take the same subject twice on one day.
    pub allow_subject_repetition: bool,
    /// Collected at setup but not yet consulted anywhere.
    pub allow_co_teaching: bool,
    /// Upper bound on back-to-back classes. Recorded, not enforced;
    /// `TeacherWorkload::back_to_back_count` is the matching metric.
    pub max_consecutive_classes: u32,
    /// Lower bound on daily free periods. Recorded, not enforced;
    /// `TeacherWorkload::free_periods_per_day` is the matching metric.
    pub min_free_periods_per_day: u32,
}

impl SchoolConfig {
    /// Creates a config with the given working days and period count.
    ///
    /// Remaining fields start from the common defaults (08:00-15:00,
    /// 45-minute periods, 10 classrooms, repetition disallowed).
    pub fn new(working_days: Vec<Weekday>, periods_per_day: u32) -> Self {
        Self {
            working_days,
            periods_per_day,
            ..Self::default()
        }
    }

    /// Sets the daily start and end times (minutes since midnight).
    pub fn with_day_bounds(mut self, start_minutes: u32, end_minutes: u32) -> Self {
        self.start_minutes = start_minutes;
        self.end_minutes = end_minutes;
        self
    }

    /// Sets the period duration.
    pub fn with_period_duration(mut self, minutes: u32) -> Self {
        self.period_duration_minutes = minutes;
        self
    }

    /// Sets the classroom count.
    pub fn with_classrooms(mut self, total: u32) -> Self {
        self.total_classrooms = total;
        self
    }

    /// Allows or forbids same-day subject repetition for a class.
    pub fn with_subject_repetition(mut self, allow: bool) -> Self {
        self.allow_subject_repetition = allow;
        self
    }

    /// Sets the co-teaching flag.
    pub fn with_co_teaching(mut self, allow: bool) -> Self {
        self.allow_co_teaching = allow;
        self
    }

    /// Whether a day is a working day.
    pub fn is_working_day(&self, day: Weekday) -> bool {
        self.working_days.contains(&day)
    }

    /// Total schedulable slots per week per classroom: days × periods.
    #[inline]
    pub fn periods_per_week(&self) -> u32 {
        self.working_days.len() as u32 * self.periods_per_day
    }

    /// Total weekly room capacity: days × periods × classrooms.
    #[inline]
    pub fn weekly_capacity(&self) -> u32 {
        self.periods_per_week() * self.total_classrooms
    }

    /// The label of classroom `n` (1-based): "CR1", "CR2", ...
    pub fn classroom_label(n: u32) -> String {
        format!("CR{n}")
    }
}

impl Default for SchoolConfig {
    fn default() -> Self {
        Self {
            working_days: vec![
                Weekday::Monday,
                Weekday::Tuesday,
                Weekday::Wednesday,
                Weekday::Thursday,
                Weekday::Friday,
            ],
            start_minutes: 8 * 60,
            end_minutes: 15 * 60,
            period_duration_minutes: 45,
            periods_per_day: 8,
            total_classrooms: 10,
            allow_subject_repetition: false,
            allow_co_teaching: false,
            max_consecutive_classes: 3,
            min_free_periods_per_day: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = SchoolConfig::new(vec![Weekday::Monday, Weekday::Tuesday], 6)
            .with_day_bounds(9 * 60, 14 * 60)
            .with_period_duration(50)
            .with_classrooms(4)
            .with_subject_repetition(true);

        assert_eq!(config.working_days.len(), 2);
        assert_eq!(config.periods_per_day, 6);
        assert_eq!(config.start_minutes, 540);
        assert_eq!(config.end_minutes, 840);
        assert_eq!(config.period_duration_minutes, 50);
        assert_eq!(config.total_classrooms, 4);
        assert!(config.allow_subject_repetition);
        assert!(!config.allow_co_teaching);
    }

    #[test]
    fn test_config_capacity() {
        let config = SchoolConfig::default();
        assert_eq!(config.periods_per_week(), 40); // 5 days × 8 periods
        assert_eq!(config.weekly_capacity(), 400); // × 10 classrooms
    }

    #[test]
    fn test_working_day_membership() {
        let config = SchoolConfig::default();
        assert!(config.is_working_day(Weekday::Monday));
        assert!(!config.is_working_day(Weekday::Saturday));
    }

    #[test]
    fn test_classroom_label() {
        assert_eq!(SchoolConfig::classroom_label(1), "CR1");
        assert_eq!(SchoolConfig::classroom_label(12), "CR12");
    }

    #[test]
    fn test_weekday_order_and_names() {
        assert!(Weekday::Monday < Weekday::Friday);
        assert_eq!(Weekday::Wednesday.name(), "Wednesday");
        assert_eq!(Weekday::ALL.len(), 7);
        assert_eq!(format!("{}", Weekday::Friday), "Friday");
    }

    #[test]
    fn test_weekday_serde_as_map_key() {
        use std::collections::HashMap;
        let mut hours: HashMap<Weekday, u32> = HashMap::new();
        hours.insert(Weekday::Monday, 3);

        let json = serde_json::to_string(&hours).unwrap();
        assert!(json.contains("\"Monday\":3"));

        let back: HashMap<Weekday, u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.get(&Weekday::Monday), Some(&3));
    }
}
