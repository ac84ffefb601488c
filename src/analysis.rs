//! Read-only diagnostics over a configuration and its schedule.
//!
//! [`analyze_bottlenecks`] inspects the rosters and the committed
//! slots and reports structural problems: subjects nobody can teach,
//! weekly demand beyond classroom capacity, per-day teacher overload,
//! workload outliers, and under-scheduled subjects. Analysis never
//! mutates anything and never fails; an impossible setup simply
//! produces findings.
//!
//! Checks run in a fixed order and walk the rosters in their given
//! order, so the same inputs always yield the same report.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{SchoolConfig, Slot, StudentClass, Teacher};
use crate::scheduler::WorkloadStats;

/// How urgent a finding is. `Critical` findings make a usable
/// timetable impossible; `Info` findings are advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

/// Category of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BottleneckKind {
    #[serde(rename = "Teacher Shortage")]
    TeacherShortage,
    #[serde(rename = "Classroom Shortage")]
    ClassroomShortage,
    #[serde(rename = "Overloaded Teacher")]
    OverloadedTeacher,
    #[serde(rename = "Workload Imbalance")]
    WorkloadImbalance,
    #[serde(rename = "Subject Frequency Mismatch")]
    SubjectFrequencyMismatch,
}

impl BottleneckKind {
    pub fn name(&self) -> &'static str {
        match self {
            BottleneckKind::TeacherShortage => "Teacher Shortage",
            BottleneckKind::ClassroomShortage => "Classroom Shortage",
            BottleneckKind::OverloadedTeacher => "Overloaded Teacher",
            BottleneckKind::WorkloadImbalance => "Workload Imbalance",
            BottleneckKind::SubjectFrequencyMismatch => "Subject Frequency Mismatch",
        }
    }
}

impl fmt::Display for BottleneckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Entities a finding points at, for cross-linking in reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BottleneckRelated {
    pub teacher_ids: Vec<String>,
    pub class_ids: Vec<String>,
    pub subjects: Vec<String>,
}

/// One diagnostic finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bottleneck {
    /// Stable identifier, unique within one report.
    pub id: String,
    pub kind: BottleneckKind,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub suggestion: String,
    pub related: BottleneckRelated,
}

/// Runs every diagnostic check over the given setup and schedule.
///
/// Findings are appended check by check: teacher shortages, classroom
/// capacity, daily overload, workload imbalance, then frequency
/// mismatches.
pub fn analyze_bottlenecks(
    config: &SchoolConfig,
    teachers: &[Teacher],
    classes: &[StudentClass],
    slots: &[Slot],
) -> Vec<Bottleneck> {
    let mut findings = Vec::new();
    check_teacher_shortages(teachers, classes, &mut findings);
    check_classroom_capacity(config, classes, &mut findings);

    let stats = WorkloadStats::calculate(teachers, slots, config);
    check_daily_overload(config, teachers, &stats, &mut findings);
    check_workload_imbalance(teachers, &stats, &mut findings);
    check_frequency_mismatches(classes, slots, &mut findings);
    findings
}

/// Subjects demanded by at least one class but taught by no one.
/// Reported once per subject, in first-encounter order.
fn check_teacher_shortages(
    teachers: &[Teacher],
    classes: &[StudentClass],
    findings: &mut Vec<Bottleneck>,
) {
    let mut demanded: Vec<&str> = Vec::new();
    for class in classes {
        for req in &class.requirements {
            if !demanded.contains(&req.subject.as_str()) {
                demanded.push(&req.subject);
            }
        }
    }

    for subject in demanded {
        if teachers.iter().any(|t| t.teaches(subject)) {
            continue;
        }
        findings.push(Bottleneck {
            id: format!("teacher-shortage-{subject}"),
            kind: BottleneckKind::TeacherShortage,
            severity: Severity::Critical,
            title: format!("No teachers for {subject}"),
            description: format!(
                "The subject \"{subject}\" is required by one or more classes but no teachers are qualified to teach it."
            ),
            suggestion:
                "Assign the subject to at least one teacher or remove it from class requirements."
                    .into(),
            related: BottleneckRelated {
                subjects: vec![subject.to_string()],
                ..BottleneckRelated::default()
            },
        });
    }
}

/// Weekly lesson demand against total classroom-period capacity.
fn check_classroom_capacity(
    config: &SchoolConfig,
    classes: &[StudentClass],
    findings: &mut Vec<Bottleneck>,
) {
    let demand: u32 = classes.iter().map(StudentClass::weekly_lesson_count).sum();
    let capacity = config.weekly_capacity();
    if demand <= capacity {
        return;
    }
    findings.push(Bottleneck {
        id: "classroom-shortage-overall".into(),
        kind: BottleneckKind::ClassroomShortage,
        severity: Severity::Critical,
        title: "Insufficient Classrooms for Required Lessons".into(),
        description: format!(
            "The total number of required lessons ({demand}) exceeds the total available classroom slots ({capacity}) for the week."
        ),
        suggestion:
            "Increase the number of classrooms, reduce subject frequencies, or extend school hours/days."
                .into(),
        related: BottleneckRelated::default(),
    });
}

/// Days where a teacher's scheduled hours exceed their personal cap.
fn check_daily_overload(
    config: &SchoolConfig,
    teachers: &[Teacher],
    stats: &WorkloadStats,
    findings: &mut Vec<Bottleneck>,
) {
    for teacher in teachers {
        let Some(workload) = stats.workload(&teacher.id) else {
            continue;
        };
        for &day in &config.working_days {
            let hours = workload.hours_on(day);
            if hours <= teacher.max_hours_per_day {
                continue;
            }
            findings.push(Bottleneck {
                id: format!("overload-day-{}-{day}", teacher.id),
                kind: BottleneckKind::OverloadedTeacher,
                severity: Severity::Warning,
                title: format!("{} is overloaded on {day}", teacher.name),
                description: format!(
                    "{} is scheduled for {hours} hours on {day}, but their maximum is {}.",
                    teacher.name, teacher.max_hours_per_day
                ),
                suggestion: format!(
                    "Reassign some of {}'s classes on {day} to other qualified teachers.",
                    teacher.name
                ),
                related: BottleneckRelated {
                    teacher_ids: vec![teacher.id.clone()],
                    ..BottleneckRelated::default()
                },
            });
        }
    }
}

/// Teachers whose total hours sit more than 1.5 standard deviations
/// from the roster average.
fn check_workload_imbalance(
    teachers: &[Teacher],
    stats: &WorkloadStats,
    findings: &mut Vec<Bottleneck>,
) {
    let average = stats.average_hours_per_teacher;
    if average <= 0.0 {
        return;
    }
    let threshold = 1.5 * stats.workload_std_dev;

    for teacher in teachers {
        let Some(workload) = stats.workload(&teacher.id) else {
            continue;
        };
        let total = f64::from(workload.total_hours);
        if (total - average).abs() <= threshold {
            continue;
        }
        let direction = if total > average { "High" } else { "Low" };
        findings.push(Bottleneck {
            id: format!("imbalance-{}", teacher.id),
            kind: BottleneckKind::WorkloadImbalance,
            severity: Severity::Info,
            title: format!("{direction} workload for {}", teacher.name),
            description: format!(
                "{} has a total workload of {} hours, which significantly deviates from the average of {average:.1} hours.",
                teacher.name, workload.total_hours
            ),
            suggestion:
                "Consider rebalancing the schedule to distribute classes more evenly among teachers."
                    .into(),
            related: BottleneckRelated {
                teacher_ids: vec![teacher.id.clone()],
                ..BottleneckRelated::default()
            },
        });
    }
}

/// Requirements whose scheduled lesson count falls short of the weekly
/// frequency.
fn check_frequency_mismatches(
    classes: &[StudentClass],
    slots: &[Slot],
    findings: &mut Vec<Bottleneck>,
) {
    for class in classes {
        for req in &class.requirements {
            let scheduled = slots
                .iter()
                .filter(|s| s.class_id == class.id && s.subject == req.subject)
                .count() as u32;
            if scheduled >= req.weekly_frequency {
                continue;
            }
            let missing = req.weekly_frequency - scheduled;
            findings.push(Bottleneck {
                id: format!("freq-mismatch-{}-{}", class.id, req.subject),
                kind: BottleneckKind::SubjectFrequencyMismatch,
                severity: Severity::Warning,
                title: format!("\"{}\" is underscheduled for {}", req.subject, class.name),
                description: format!(
                    "{} requires {} lessons of {} per week, but only {scheduled} are scheduled.",
                    class.name, req.weekly_frequency, req.subject
                ),
                suggestion: format!(
                    "Schedule {missing} more lesson(s) for this subject and class."
                ),
                related: BottleneckRelated {
                    class_ids: vec![class.id.clone()],
                    subjects: vec![req.subject.clone()],
                    ..BottleneckRelated::default()
                },
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Weekday;

    fn make_config() -> SchoolConfig {
        SchoolConfig::default()
    }

    fn make_teacher(id: &str, subjects: &[&str]) -> Teacher {
        let mut t = Teacher::new(id, format!("Teacher {id}"));
        for s in subjects {
            t = t.with_subject(*s);
        }
        t
    }

    fn make_slot(day: Weekday, period: u32, subject: &str, teacher_id: &str, class_id: &str) -> Slot {
        Slot::new(day, period, subject, teacher_id, class_id, "CR1")
    }

    #[test]
    fn test_teacher_shortage_reported_once_per_subject() {
        let teachers = vec![make_teacher("t1", &["Math"])];
        let classes = vec![
            StudentClass::new("c1", "6A").with_subject("Latin", 2).with_subject("Math", 2),
            StudentClass::new("c2", "6B").with_subject("Latin", 3),
        ];

        let findings = analyze_bottlenecks(&make_config(), &teachers, &classes, &[]);
        let shortages: Vec<&Bottleneck> = findings
            .iter()
            .filter(|b| b.kind == BottleneckKind::TeacherShortage)
            .collect();

        assert_eq!(shortages.len(), 1);
        let shortage = shortages[0];
        assert_eq!(shortage.id, "teacher-shortage-Latin");
        assert_eq!(shortage.severity, Severity::Critical);
        assert_eq!(shortage.title, "No teachers for Latin");
        assert_eq!(
            shortage.description,
            "The subject \"Latin\" is required by one or more classes but no teachers are qualified to teach it."
        );
        assert_eq!(shortage.related.subjects, vec!["Latin"]);
    }

    #[test]
    fn test_no_findings_for_covered_setup() {
        let teachers = vec![make_teacher("t1", &["Math"])];
        let classes = vec![StudentClass::new("c1", "6A").with_subject("Math", 2)];
        let slots = vec![
            make_slot(Weekday::Monday, 1, "Math", "t1", "c1"),
            make_slot(Weekday::Tuesday, 1, "Math", "t1", "c1"),
        ];

        let findings = analyze_bottlenecks(&make_config(), &teachers, &classes, &slots);
        assert!(findings.is_empty());
    }

    #[test]
    fn test_classroom_shortage_cites_demand_and_capacity() {
        // Capacity 5 days x 6 periods x 5 rooms = 150; demand 200.
        let config = SchoolConfig::new(
            vec![
                Weekday::Monday,
                Weekday::Tuesday,
                Weekday::Wednesday,
                Weekday::Thursday,
                Weekday::Friday,
            ],
            6,
        )
        .with_classrooms(5);
        let teachers = vec![make_teacher("t1", &["Math", "English"])];
        let classes: Vec<StudentClass> = (0..10)
            .map(|i| {
                StudentClass::new(format!("c{i}"), format!("Class {i}"))
                    .with_subject("Math", 10)
                    .with_subject("English", 10)
            })
            .collect();

        let findings = analyze_bottlenecks(&config, &teachers, &classes, &[]);
        let shortages: Vec<&Bottleneck> = findings
            .iter()
            .filter(|b| b.kind == BottleneckKind::ClassroomShortage)
            .collect();

        assert_eq!(shortages.len(), 1);
        let shortage = shortages[0];
        assert_eq!(shortage.id, "classroom-shortage-overall");
        assert_eq!(shortage.severity, Severity::Critical);
        assert_eq!(
            shortage.description,
            "The total number of required lessons (200) exceeds the total available classroom slots (150) for the week."
        );
    }

    #[test]
    fn test_demand_at_capacity_is_fine() {
        // 1 day x 2 periods x 1 room = 2 capacity, exactly 2 demanded.
        let config = SchoolConfig::new(vec![Weekday::Monday], 2).with_classrooms(1);
        let teachers = vec![make_teacher("t1", &["Math"])];
        let classes = vec![StudentClass::new("c1", "6A").with_subject("Math", 2)];

        let findings = analyze_bottlenecks(&config, &teachers, &classes, &[]);
        assert!(findings
            .iter()
            .all(|b| b.kind != BottleneckKind::ClassroomShortage));
    }

    #[test]
    fn test_daily_overload_warning() {
        let teachers = vec![Teacher::new("t1", "Kim")
            .with_subject("Math")
            .with_max_hours_per_day(2)];
        let classes = vec![StudentClass::new("c1", "6A").with_subject("Math", 3)];
        let slots = vec![
            make_slot(Weekday::Monday, 1, "Math", "t1", "c1"),
            make_slot(Weekday::Monday, 2, "Math", "t1", "c2"),
            make_slot(Weekday::Monday, 3, "Math", "t1", "c3"),
        ];

        let findings = analyze_bottlenecks(&make_config(), &teachers, &classes, &slots);
        let overloads: Vec<&Bottleneck> = findings
            .iter()
            .filter(|b| b.kind == BottleneckKind::OverloadedTeacher)
            .collect();

        assert_eq!(overloads.len(), 1);
        let overload = overloads[0];
        assert_eq!(overload.id, "overload-day-t1-Monday");
        assert_eq!(overload.severity, Severity::Warning);
        assert_eq!(overload.title, "Kim is overloaded on Monday");
        assert_eq!(
            overload.description,
            "Kim is scheduled for 3 hours on Monday, but their maximum is 2."
        );
        assert_eq!(
            overload.suggestion,
            "Reassign some of Kim's classes on Monday to other qualified teachers."
        );
        assert_eq!(overload.related.teacher_ids, vec!["t1"]);
    }

    #[test]
    fn test_hours_at_cap_are_not_overload() {
        let teachers = vec![Teacher::new("t1", "Kim")
            .with_subject("Math")
            .with_max_hours_per_day(2)];
        let classes = vec![StudentClass::new("c1", "6A").with_subject("Math", 2)];
        let slots = vec![
            make_slot(Weekday::Monday, 1, "Math", "t1", "c1"),
            make_slot(Weekday::Monday, 2, "Math", "t1", "c1"),
        ];

        let findings = analyze_bottlenecks(&make_config(), &teachers, &classes, &slots);
        assert!(findings
            .iter()
            .all(|b| b.kind != BottleneckKind::OverloadedTeacher));
    }

    #[test]
    fn test_workload_imbalance_flags_outlier() {
        // Hours [8, 0, 0, 0]: average 2.0, std dev ~3.46. Only the
        // 8-hour teacher deviates beyond 1.5 sigma.
        let teachers = vec![
            Teacher::new("t1", "Kim").with_subject("Math"),
            Teacher::new("t2", "Lee").with_subject("Math"),
            Teacher::new("t3", "Park").with_subject("Math"),
            Teacher::new("t4", "Choi").with_subject("Math"),
        ];
        let classes = vec![StudentClass::new("c1", "6A").with_subject("Math", 8)];
        let slots: Vec<Slot> = (1..=4)
            .map(|p| make_slot(Weekday::Monday, p, "Math", "t1", "c1"))
            .chain((1..=4).map(|p| make_slot(Weekday::Tuesday, p, "Math", "t1", "c1")))
            .collect();

        let findings = analyze_bottlenecks(&make_config(), &teachers, &classes, &slots);
        let imbalances: Vec<&Bottleneck> = findings
            .iter()
            .filter(|b| b.kind == BottleneckKind::WorkloadImbalance)
            .collect();

        assert_eq!(imbalances.len(), 1);
        let imbalance = imbalances[0];
        assert_eq!(imbalance.id, "imbalance-t1");
        assert_eq!(imbalance.severity, Severity::Info);
        assert_eq!(imbalance.title, "High workload for Kim");
        assert_eq!(
            imbalance.description,
            "Kim has a total workload of 8 hours, which significantly deviates from the average of 2.0 hours."
        );
    }

    #[test]
    fn test_two_teacher_rosters_never_imbalanced() {
        // With two teachers each deviation equals exactly one standard
        // deviation, inside the 1.5 sigma threshold.
        let teachers = vec![
            Teacher::new("t1", "Kim").with_subject("Math"),
            Teacher::new("t2", "Lee").with_subject("Math"),
        ];
        let classes = vec![StudentClass::new("c1", "6A").with_subject("Math", 6)];
        let slots: Vec<Slot> = (1..=6)
            .map(|p| make_slot(Weekday::Monday, p, "Math", "t1", "c1"))
            .collect();

        let findings = analyze_bottlenecks(&make_config(), &teachers, &classes, &slots);
        assert!(findings
            .iter()
            .all(|b| b.kind != BottleneckKind::WorkloadImbalance));
    }

    #[test]
    fn test_empty_schedule_skips_imbalance() {
        let teachers = vec![make_teacher("t1", &["Math"]), make_teacher("t2", &["Math"])];
        let classes = vec![StudentClass::new("c1", "6A").with_subject("Math", 2)];

        let findings = analyze_bottlenecks(&make_config(), &teachers, &classes, &[]);
        assert!(findings
            .iter()
            .all(|b| b.kind != BottleneckKind::WorkloadImbalance));
    }

    #[test]
    fn test_frequency_mismatch_counts_missing_lessons() {
        let teachers = vec![make_teacher("t1", &["Math"])];
        let classes = vec![StudentClass::new("c1", "Grade 6A").with_subject("Math", 3)];
        let slots = vec![make_slot(Weekday::Monday, 1, "Math", "t1", "c1")];

        let findings = analyze_bottlenecks(&make_config(), &teachers, &classes, &slots);
        let mismatches: Vec<&Bottleneck> = findings
            .iter()
            .filter(|b| b.kind == BottleneckKind::SubjectFrequencyMismatch)
            .collect();

        assert_eq!(mismatches.len(), 1);
        let mismatch = mismatches[0];
        assert_eq!(mismatch.id, "freq-mismatch-c1-Math");
        assert_eq!(mismatch.title, "\"Math\" is underscheduled for Grade 6A");
        assert_eq!(
            mismatch.description,
            "Grade 6A requires 3 lessons of Math per week, but only 1 are scheduled."
        );
        assert_eq!(mismatch.suggestion, "Schedule 2 more lesson(s) for this subject and class.");
        assert_eq!(mismatch.related.class_ids, vec!["c1"]);
        assert_eq!(mismatch.related.subjects, vec!["Math"]);
    }

    #[test]
    fn test_checks_report_in_fixed_order() {
        // One setup tripping all five checks at once.
        let config = SchoolConfig::new(vec![Weekday::Monday], 2).with_classrooms(1);
        let teachers = vec![
            Teacher::new("t1", "Kim").with_subject("Math").with_max_hours_per_day(1),
            make_teacher("t2", &["English"]),
            make_teacher("t3", &["English"]),
            make_teacher("t4", &["English"]),
        ];
        let classes = vec![StudentClass::new("c1", "6A")
            .with_subject("Latin", 1)
            .with_subject("Math", 3)];
        let slots = vec![
            make_slot(Weekday::Monday, 1, "Math", "t1", "c1"),
            make_slot(Weekday::Monday, 2, "Math", "t1", "c1"),
        ];

        let findings = analyze_bottlenecks(&config, &teachers, &classes, &slots);
        let kinds: Vec<BottleneckKind> = findings.iter().map(|b| b.kind).collect();
        assert_eq!(
            kinds,
            vec![
                BottleneckKind::TeacherShortage,
                BottleneckKind::ClassroomShortage,
                BottleneckKind::OverloadedTeacher,
                BottleneckKind::WorkloadImbalance,
                BottleneckKind::SubjectFrequencyMismatch,
                BottleneckKind::SubjectFrequencyMismatch,
            ]
        );
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let config = SchoolConfig::new(vec![Weekday::Monday], 2).with_classrooms(1);
        let teachers = vec![make_teacher("t1", &["Math"]), make_teacher("t2", &["Art"])];
        let classes = vec![StudentClass::new("c1", "6A")
            .with_subject("Latin", 2)
            .with_subject("Greek", 2)];

        let first = analyze_bottlenecks(&config, &teachers, &classes, &[]);
        let second = analyze_bottlenecks(&config, &teachers, &classes, &[]);
        assert_eq!(first, second);
        assert_eq!(first[0].id, "teacher-shortage-Latin");
        assert_eq!(first[1].id, "teacher-shortage-Greek");
    }
}
