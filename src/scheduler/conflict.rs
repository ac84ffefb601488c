//! Conflict rules for placing a lesson into the schedule.
//!
//! One rule set serves generation, manual edits, and swap previews.
//! Rules run in a fixed order and the first hit is reported, so the
//! same clash always yields the same message:
//!
//! 1. teacher double-booking
//! 2. class double-booking
//! 3. teacher unavailability
//! 4. subject repetition for the class on the day (skipped when the
//!    school allows repetition)
//! 5. teacher daily hour limit
//!
//! Checking never fails and never mutates anything; a conflict is an
//! ordinary answer, not an error.

use std::fmt;

use crate::models::{StoredSlot, Teacher, Weekday};
use crate::scheduler::grid::ScheduleGrid;

/// Which rule a placement ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    TeacherDoubleBooked,
    ClassDoubleBooked,
    TeacherUnavailable,
    SubjectRepeated,
    DailyHourLimit,
}

/// A rejected placement: the rule that fired plus a human-readable
/// reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub kind: ConflictKind,
    pub message: String,
}

impl Conflict {
    fn teacher_double_booked() -> Self {
        Conflict {
            kind: ConflictKind::TeacherDoubleBooked,
            message: "Teacher is already booked for this period.".into(),
        }
    }

    fn class_double_booked() -> Self {
        Conflict {
            kind: ConflictKind::ClassDoubleBooked,
            message: "Class is already booked for this period.".into(),
        }
    }

    fn teacher_unavailable() -> Self {
        Conflict {
            kind: ConflictKind::TeacherUnavailable,
            message: "Teacher is marked as unavailable for this period.".into(),
        }
    }

    fn subject_repeated() -> Self {
        Conflict {
            kind: ConflictKind::SubjectRepeated,
            message: "Subject is already scheduled for this class on this day.".into(),
        }
    }

    fn daily_hour_limit(max: u32) -> Self {
        Conflict {
            kind: ConflictKind::DailyHourLimit,
            message: format!("Teacher would exceed maximum daily hours ({max})."),
        }
    }

    fn for_swap(self, subject: &str) -> Self {
        Conflict {
            kind: self.kind,
            message: format!("Swapping causes conflict for '{subject}': {}", self.message),
        }
    }
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A candidate assignment to test against the grid.
#[derive(Debug, Clone, Copy)]
pub struct Placement<'a> {
    pub day: Weekday,
    pub period: u32,
    pub subject: &'a str,
    pub teacher: &'a Teacher,
    pub class_id: &'a str,
}

/// Tests a placement against the occupied grid.
///
/// `exclude` names a stored row to leave out of every occupancy query,
/// so an edited slot does not clash with its own current position.
/// Returns the first conflict in rule order, or `None` when the
/// placement is clean.
pub fn check_placement(
    grid: &ScheduleGrid,
    placement: &Placement<'_>,
    allow_subject_repetition: bool,
    exclude: Option<&str>,
) -> Option<Conflict> {
    let Placement {
        day,
        period,
        subject,
        teacher,
        class_id,
    } = *placement;

    if grid.is_teacher_booked(day, period, &teacher.id, exclude) {
        return Some(Conflict::teacher_double_booked());
    }
    if grid.is_class_booked(day, period, class_id, exclude) {
        return Some(Conflict::class_double_booked());
    }
    if teacher.is_unavailable(day, period) {
        return Some(Conflict::teacher_unavailable());
    }
    if !allow_subject_repetition && grid.has_subject_on_day(day, class_id, subject, exclude) {
        return Some(Conflict::subject_repeated());
    }
    if grid.teacher_hours_on(day, &teacher.id, exclude) >= teacher.max_hours_per_day {
        return Some(Conflict::daily_hour_limit(teacher.max_hours_per_day));
    }
    None
}

/// Tests a content swap between two stored slots.
///
/// Each row keeps its day and period and receives the other row's
/// lesson, so the first slot's lesson is checked at the second slot's
/// time and vice versa. Each direction excludes only its own original
/// row; the partner row stays visible to the scans. The first slot's
/// move is checked first; a conflict names the subject that could not
/// move.
pub fn check_swap(
    all_slots: &[StoredSlot],
    first: &StoredSlot,
    second: &StoredSlot,
    first_teacher: &Teacher,
    second_teacher: &Teacher,
    allow_subject_repetition: bool,
) -> Option<Conflict> {
    let grid = ScheduleGrid::from_stored(all_slots);

    let first_moved = Placement {
        day: second.slot.day,
        period: second.slot.period,
        subject: &first.slot.subject,
        teacher: first_teacher,
        class_id: &first.slot.class_id,
    };
    if let Some(conflict) =
        check_placement(&grid, &first_moved, allow_subject_repetition, Some(&first.id))
    {
        return Some(conflict.for_swap(&first.slot.subject));
    }

    let second_moved = Placement {
        day: first.slot.day,
        period: first.slot.period,
        subject: &second.slot.subject,
        teacher: second_teacher,
        class_id: &second.slot.class_id,
    };
    if let Some(conflict) =
        check_placement(&grid, &second_moved, allow_subject_repetition, Some(&second.id))
    {
        return Some(conflict.for_swap(&second.slot.subject));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Slot;

    fn make_teacher(id: &str) -> Teacher {
        Teacher::new(id, format!("Teacher {id}")).with_subject("Math")
    }

    fn make_slot(day: Weekday, period: u32, teacher_id: &str, class_id: &str) -> Slot {
        Slot::new(day, period, "Math", teacher_id, class_id, "CR1")
    }

    fn placement<'a>(teacher: &'a Teacher, day: Weekday, period: u32) -> Placement<'a> {
        Placement {
            day,
            period,
            subject: "Math",
            teacher,
            class_id: "c1",
        }
    }

    #[test]
    fn test_clean_placement() {
        let teacher = make_teacher("t1");
        let grid = ScheduleGrid::new();
        assert!(check_placement(&grid, &placement(&teacher, Weekday::Monday, 1), false, None).is_none());
    }

    #[test]
    fn test_teacher_double_booking_wins_rule_order() {
        // The same blocking slot trips both double-booking rules; the
        // teacher rule is reported because it runs first.
        let teacher = make_teacher("t1");
        let mut grid = ScheduleGrid::new();
        grid.insert(make_slot(Weekday::Monday, 1, "t1", "c1"));

        let conflict =
            check_placement(&grid, &placement(&teacher, Weekday::Monday, 1), false, None)
                .unwrap();
        assert_eq!(conflict.kind, ConflictKind::TeacherDoubleBooked);
        assert_eq!(conflict.message, "Teacher is already booked for this period.");
    }

    #[test]
    fn test_class_double_booking() {
        let teacher = make_teacher("t2");
        let mut grid = ScheduleGrid::new();
        grid.insert(make_slot(Weekday::Monday, 1, "t1", "c1"));

        // Different subject so only the class clash fires.
        let p = Placement {
            day: Weekday::Monday,
            period: 1,
            subject: "English",
            teacher: &teacher,
            class_id: "c1",
        };
        let conflict = check_placement(&grid, &p, false, None).unwrap();
        assert_eq!(conflict.kind, ConflictKind::ClassDoubleBooked);
        assert_eq!(conflict.message, "Class is already booked for this period.");
    }

    #[test]
    fn test_teacher_unavailability() {
        let teacher = make_teacher("t1").with_unavailable(Weekday::Monday, 1);
        let grid = ScheduleGrid::new();

        let conflict =
            check_placement(&grid, &placement(&teacher, Weekday::Monday, 1), false, None)
                .unwrap();
        assert_eq!(conflict.kind, ConflictKind::TeacherUnavailable);
        assert!(check_placement(&grid, &placement(&teacher, Weekday::Monday, 2), false, None).is_none());
    }

    #[test]
    fn test_subject_repetition() {
        let teacher = make_teacher("t1");
        let mut grid = ScheduleGrid::new();
        grid.insert(make_slot(Weekday::Monday, 1, "t2", "c1"));

        let conflict =
            check_placement(&grid, &placement(&teacher, Weekday::Monday, 3), false, None)
                .unwrap();
        assert_eq!(conflict.kind, ConflictKind::SubjectRepeated);
        assert_eq!(
            conflict.message,
            "Subject is already scheduled for this class on this day."
        );
    }

    #[test]
    fn test_repetition_rule_switched_off() {
        let teacher = make_teacher("t1");
        let mut grid = ScheduleGrid::new();
        grid.insert(make_slot(Weekday::Monday, 1, "t2", "c1"));

        assert!(check_placement(&grid, &placement(&teacher, Weekday::Monday, 3), true, None).is_none());
    }

    #[test]
    fn test_daily_hour_limit_boundary() {
        let teacher = Teacher::new("t1", "Cap").with_subject("Math").with_max_hours_per_day(2);
        let mut grid = ScheduleGrid::new();
        grid.insert(Slot::new(Weekday::Monday, 1, "English", "t1", "c2", "CR1"));

        // One hour booked, limit two: still fits.
        assert!(check_placement(&grid, &placement(&teacher, Weekday::Monday, 3), false, None).is_none());

        grid.insert(Slot::new(Weekday::Monday, 5, "English", "t1", "c3", "CR1"));
        let conflict =
            check_placement(&grid, &placement(&teacher, Weekday::Monday, 3), false, None)
                .unwrap();
        assert_eq!(conflict.kind, ConflictKind::DailyHourLimit);
        assert_eq!(conflict.message, "Teacher would exceed maximum daily hours (2).");
    }

    #[test]
    fn test_exclusion_reaches_every_rule() {
        let teacher = Teacher::new("t1", "Cap").with_subject("Math").with_max_hours_per_day(1);
        let grid = ScheduleGrid::from_stored(&[StoredSlot::new(
            "s1",
            "tt1",
            make_slot(Weekday::Monday, 1, "t1", "c1"),
        )]);

        // Without exclusion the row blocks itself three ways over.
        assert!(check_placement(&grid, &placement(&teacher, Weekday::Monday, 1), false, None).is_some());
        // Excluded, the identical placement is clean.
        assert!(
            check_placement(&grid, &placement(&teacher, Weekday::Monday, 1), false, Some("s1"))
                .is_none()
        );
    }

    #[test]
    fn test_swap_rejects_booked_target() {
        // Teacher t1's lesson would move to Tuesday period 2, where t1
        // already teaches a third class.
        let slots = vec![
            StoredSlot::new("a", "tt1", make_slot(Weekday::Monday, 1, "t1", "c1")),
            StoredSlot::new("b", "tt1", Slot::new(Weekday::Tuesday, 2, "English", "t2", "c2", "CR2")),
            StoredSlot::new("c", "tt1", Slot::new(Weekday::Tuesday, 2, "History", "t1", "c3", "CR3")),
        ];
        let t1 = make_teacher("t1");
        let t2 = make_teacher("t2");

        let conflict = check_swap(&slots, &slots[0], &slots[1], &t1, &t2, false).unwrap();
        assert_eq!(conflict.kind, ConflictKind::TeacherDoubleBooked);
        assert_eq!(
            conflict.message,
            "Swapping causes conflict for 'Math': Teacher is already booked for this period."
        );
    }

    #[test]
    fn test_swap_between_unrelated_rows_is_clean() {
        let slots = vec![
            StoredSlot::new("a", "tt1", make_slot(Weekday::Monday, 1, "t1", "c1")),
            StoredSlot::new("b", "tt1", Slot::new(Weekday::Tuesday, 2, "English", "t2", "c2", "CR2")),
        ];
        let t1 = make_teacher("t1");
        let t2 = make_teacher("t2");

        assert!(check_swap(&slots, &slots[0], &slots[1], &t1, &t2, false).is_none());
    }

    #[test]
    fn test_swap_leaves_partner_row_visible() {
        // Only the moving slot is excluded per direction, so two
        // lessons of the same class cannot trade times: the partner
        // row still occupies its slot during the check.
        let slots = vec![
            StoredSlot::new("a", "tt1", make_slot(Weekday::Monday, 1, "t1", "c1")),
            StoredSlot::new("b", "tt1", Slot::new(Weekday::Tuesday, 2, "English", "t2", "c1", "CR2")),
        ];
        let t1 = make_teacher("t1");
        let t2 = make_teacher("t2");

        let conflict = check_swap(&slots, &slots[0], &slots[1], &t1, &t2, false).unwrap();
        assert_eq!(conflict.kind, ConflictKind::ClassDoubleBooked);
        assert_eq!(
            conflict.message,
            "Swapping causes conflict for 'Math': Class is already booked for this period."
        );
    }

    #[test]
    fn test_swap_reports_second_lesson_too() {
        // The first lesson moves cleanly; the second lands on a day
        // where its class already takes English.
        let slots = vec![
            StoredSlot::new("a", "tt1", make_slot(Weekday::Monday, 1, "t1", "c1")),
            StoredSlot::new("b", "tt1", Slot::new(Weekday::Tuesday, 2, "English", "t2", "c2", "CR2")),
            StoredSlot::new("c", "tt1", Slot::new(Weekday::Monday, 5, "English", "t2", "c2", "CR3")),
        ];
        let t1 = make_teacher("t1");
        let t2 = make_teacher("t2");

        let conflict = check_swap(&slots, &slots[0], &slots[1], &t1, &t2, false).unwrap();
        assert_eq!(conflict.kind, ConflictKind::SubjectRepeated);
        assert_eq!(
            conflict.message,
            "Swapping causes conflict for 'English': Subject is already scheduled for this class on this day."
        );
    }
}
