//! Lesson expansion and placement-difficulty ordering.
//!
//! Expands each (class, subject, weekly frequency) requirement into
//! individual lesson units and orders them so the hardest-to-place
//! lessons are attempted first, while the schedule is still empty.
//!
//! # Difficulty
//!
//! | Factor | Contribution |
//! |--------|-------------|
//! | Qualified teachers | `10 / max(1, count)` (scarcity dominates) |
//! | Dedicated room needed | `+5` |
//! | Weekly frequency | `+2 × frequency` (frequent subjects compete for days) |
//!
//! Ordering is descending by difficulty and otherwise stable: equal
//! scores keep their enumeration order, so runs are reproducible.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::{StudentClass, Teacher};

/// One weekly occurrence of a (class, subject) requirement, waiting to
/// be placed. Created fresh per generation run and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    /// The class taking the lesson.
    pub class_id: String,
    /// Subject to teach.
    pub subject: String,
    /// Whether the subject needs a dedicated room type.
    pub requires_specific_room: bool,
}

/// Estimated placement difficulty for one lesson.
///
/// Higher means harder to place. Scarce teacher supply weighs heaviest;
/// room requirements and high weekly frequency add on top.
pub fn placement_difficulty(
    lesson: &Lesson,
    teachers: &[Teacher],
    classes: &[StudentClass],
) -> f64 {
    let mut difficulty = 0.0;

    let qualified = teachers.iter().filter(|t| t.teaches(&lesson.subject)).count();
    difficulty += 10.0 / qualified.max(1) as f64;

    if lesson.requires_specific_room {
        difficulty += 5.0;
    }

    let frequency = classes
        .iter()
        .find(|c| c.id == lesson.class_id)
        .and_then(|c| c.requirement(&lesson.subject))
        .map(|r| r.weekly_frequency)
        .unwrap_or(1);
    difficulty += frequency as f64 * 2.0;

    difficulty
}

/// Expands class requirements into lesson units, hardest first.
///
/// A requirement with weekly frequency `f` yields `f` identical units;
/// each is placed independently. Empty inputs yield an empty list.
pub fn expand_and_prioritize(classes: &[StudentClass], teachers: &[Teacher]) -> Vec<Lesson> {
    let mut lessons = Vec::new();
    for class in classes {
        for req in &class.requirements {
            for _ in 0..req.weekly_frequency {
                lessons.push(Lesson {
                    class_id: class.id.clone(),
                    subject: req.subject.clone(),
                    requires_specific_room: req.requires_specific_room,
                });
            }
        }
    }

    let mut scored: Vec<(Lesson, f64)> = lessons
        .into_iter()
        .map(|lesson| {
            let difficulty = placement_difficulty(&lesson, teachers, classes);
            (lesson, difficulty)
        })
        .collect();

    // Stable sort keeps enumeration order on ties.
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    scored.into_iter().map(|(lesson, _)| lesson).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_teacher(id: &str, subjects: &[&str]) -> Teacher {
        let mut t = Teacher::new(id, format!("Teacher {id}"));
        for s in subjects {
            t = t.with_subject(*s);
        }
        t
    }

    #[test]
    fn test_expansion_count() {
        let classes = vec![StudentClass::new("c1", "6A")
            .with_subject("Math", 5)
            .with_subject("English", 3)];
        let teachers = vec![make_teacher("t1", &["Math", "English"])];

        let lessons = expand_and_prioritize(&classes, &teachers);
        assert_eq!(lessons.len(), 8);
        assert_eq!(lessons.iter().filter(|l| l.subject == "Math").count(), 5);
        assert_eq!(lessons.iter().filter(|l| l.subject == "English").count(), 3);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(expand_and_prioritize(&[], &[]).is_empty());

        let classes = vec![StudentClass::new("c1", "6A")];
        assert!(expand_and_prioritize(&classes, &[]).is_empty());
    }

    #[test]
    fn test_difficulty_formula() {
        let classes = vec![StudentClass::new("c1", "6A")
            .with_subject("Math", 3)
            .with_room_bound_subject("Chemistry", 2)];
        let teachers = vec![
            make_teacher("t1", &["Math", "Chemistry"]),
            make_teacher("t2", &["Math"]),
        ];

        let math = Lesson {
            class_id: "c1".into(),
            subject: "Math".into(),
            requires_specific_room: false,
        };
        // 10/2 qualified + 2×3 frequency
        assert!((placement_difficulty(&math, &teachers, &classes) - 11.0).abs() < 1e-10);

        let chemistry = Lesson {
            class_id: "c1".into(),
            subject: "Chemistry".into(),
            requires_specific_room: true,
        };
        // 10/1 qualified + 5 room + 2×2 frequency
        assert!((placement_difficulty(&chemistry, &teachers, &classes) - 19.0).abs() < 1e-10);
    }

    #[test]
    fn test_unknown_requirement_defaults_frequency_to_one() {
        let orphan = Lesson {
            class_id: "missing".into(),
            subject: "Math".into(),
            requires_specific_room: false,
        };
        let teachers = vec![make_teacher("t1", &["Math"])];
        // 10/1 + 2×1
        assert!((placement_difficulty(&orphan, &teachers, &[]) - 12.0).abs() < 1e-10);
    }

    #[test]
    fn test_scarce_subject_ordered_first() {
        // History has one qualified teacher, Math has three.
        let classes = vec![StudentClass::new("c1", "6A")
            .with_subject("Math", 2)
            .with_subject("History", 2)];
        let teachers = vec![
            make_teacher("t1", &["Math", "History"]),
            make_teacher("t2", &["Math"]),
            make_teacher("t3", &["Math"]),
        ];

        let lessons = expand_and_prioritize(&classes, &teachers);
        // History: 10/1 + 4 = 14.0; Math: 10/3 + 4 ≈ 7.33
        assert_eq!(lessons[0].subject, "History");
        assert_eq!(lessons[1].subject, "History");
        assert_eq!(lessons[2].subject, "Math");
    }

    #[test]
    fn test_tie_preserves_enumeration_order() {
        // Identical requirements in two classes score identically; the
        // first class's units must stay ahead.
        let classes = vec![
            StudentClass::new("c1", "6A").with_subject("Math", 2),
            StudentClass::new("c2", "6B").with_subject("Math", 2),
        ];
        let teachers = vec![make_teacher("t1", &["Math"])];

        let lessons = expand_and_prioritize(&classes, &teachers);
        assert_eq!(
            lessons.iter().map(|l| l.class_id.as_str()).collect::<Vec<_>>(),
            vec!["c1", "c1", "c2", "c2"]
        );
    }

    #[test]
    fn test_room_requirement_breaks_even_scores() {
        let classes = vec![StudentClass::new("c1", "6A")
            .with_subject("Math", 2)
            .with_room_bound_subject("Art", 2)];
        let teachers = vec![make_teacher("t1", &["Math", "Art"])];

        let lessons = expand_and_prioritize(&classes, &teachers);
        // Art: 10 + 5 + 4 = 19 beats Math: 10 + 4 = 14.
        assert_eq!(lessons[0].subject, "Art");
    }
}
