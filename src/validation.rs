//! Input validation for school setups.
//!
//! Checks structural integrity of the configuration and rosters
//! before generation or manual editing. Detects:
//! - Duplicate IDs
//! - Out-of-range school parameters
//! - Teachers without subjects or with impossible hour caps
//! - Classes without requirements or with zero frequencies
//! - Availability entries pointing outside the school week
//!
//! Subject coverage is deliberately not checked here; a subject no
//! teacher covers is a valid setup that the bottleneck analysis
//! reports instead.

use std::collections::HashSet;

use crate::models::{SchoolConfig, StudentClass, Teacher};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A roster that must not be empty is empty.
    EmptyRoster,
    /// A school parameter is out of range.
    InvalidConfig,
    /// A teacher profile is incomplete or contradictory.
    InvalidTeacher,
    /// A class definition is incomplete or contradictory.
    InvalidClass,
    /// A preference or unavailability points outside the school week.
    InvalidAvailability,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a school setup.
///
/// Checks:
/// 1. At least one working day, no day listed twice
/// 2. Day starts before it ends; period duration, periods per day and
///    classroom count are positive
/// 3. Consecutive-class and free-period limits within their ranges
/// 4. At least one teacher; unique IDs, usable names, at least one
///    subject each, positive hour caps
/// 5. Preferred days and unavailability confined to the school week
/// 6. At least one class; unique IDs, usable names, at least one
///    requirement each, positive frequencies
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    config: &SchoolConfig,
    teachers: &[Teacher],
    classes: &[StudentClass],
) -> ValidationResult {
    let mut errors = Vec::new();

    validate_config(config, &mut errors);
    validate_teachers(config, teachers, &mut errors);
    validate_classes(classes, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_config(config: &SchoolConfig, errors: &mut Vec<ValidationError>) {
    if config.working_days.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidConfig,
            "At least one working day is required",
        ));
    }
    let mut seen_days = HashSet::new();
    for &day in &config.working_days {
        if !seen_days.insert(day) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidConfig,
                format!("Working day listed twice: {day}"),
            ));
        }
    }

    if config.start_minutes >= config.end_minutes {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidConfig,
            "School day must start before it ends",
        ));
    }
    if config.period_duration_minutes == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidConfig,
            "Period duration must be a positive number",
        ));
    }
    if config.periods_per_day == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidConfig,
            "Periods per day must be a positive number",
        ));
    }
    if config.total_classrooms == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidConfig,
            "Number of classrooms must be a positive number",
        ));
    }
    if config.max_consecutive_classes < 1 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidConfig,
            "Max consecutive classes must be at least 1",
        ));
    }
    if config.max_consecutive_classes > 10 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidConfig,
            "Max consecutive classes must be 10 or less",
        ));
    }
    if config.min_free_periods_per_day > 5 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidConfig,
            "Min free periods per day must be 5 or less",
        ));
    }
}

fn validate_teachers(
    config: &SchoolConfig,
    teachers: &[Teacher],
    errors: &mut Vec<ValidationError>,
) {
    if teachers.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyRoster,
            "At least one teacher is required",
        ));
    }

    let mut teacher_ids = HashSet::new();
    for teacher in teachers {
        if !teacher_ids.insert(teacher.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate teacher ID: {}", teacher.id),
            ));
        }

        if teacher.name.chars().count() < 2 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidTeacher,
                format!("Teacher '{}' needs a name of at least 2 characters", teacher.id),
            ));
        }
        if teacher.subjects.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidTeacher,
                format!("Teacher '{}' has no subjects", teacher.id),
            ));
        }
        for subject in &teacher.subjects {
            if subject.is_empty() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidTeacher,
                    format!("Teacher '{}' has an empty subject name", teacher.id),
                ));
            }
        }
        if teacher.max_hours_per_day == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidTeacher,
                format!("Teacher '{}' max hours per day must be positive", teacher.id),
            ));
        }

        for &day in &teacher.preferred_days {
            if !config.is_working_day(day) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidAvailability,
                    format!("Teacher '{}' prefers {day}, which is not a working day", teacher.id),
                ));
            }
        }
        for entry in &teacher.unavailable {
            if !config.is_working_day(entry.day) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidAvailability,
                    format!(
                        "Teacher '{}' is marked unavailable on {}, which is not a working day",
                        teacher.id, entry.day
                    ),
                ));
            }
            if entry.period < 1 || entry.period > config.periods_per_day {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidAvailability,
                    format!(
                        "Teacher '{}' is marked unavailable in period {}, but the school day has {} periods",
                        teacher.id, entry.period, config.periods_per_day
                    ),
                ));
            }
        }
    }
}

fn validate_classes(classes: &[StudentClass], errors: &mut Vec<ValidationError>) {
    if classes.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyRoster,
            "At least one class is required",
        ));
    }

    let mut class_ids = HashSet::new();
    for class in classes {
        if !class_ids.insert(class.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate class ID: {}", class.id),
            ));
        }

        if class.name.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidClass,
                format!("Class '{}' needs a name", class.id),
            ));
        }
        if class.requirements.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidClass,
                format!("Class '{}' has no subject requirements", class.id),
            ));
        }
        for req in &class.requirements {
            if req.subject.is_empty() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidClass,
                    format!("Class '{}' has an empty subject name", class.id),
                ));
            }
            if req.weekly_frequency == 0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidClass,
                    format!(
                        "Class '{}' has zero weekly frequency for '{}'",
                        class.id, req.subject
                    ),
                ));
            }
        }
    }
}
