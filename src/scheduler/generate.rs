//! Greedy timetable generation.
//!
//! Lessons are expanded and ordered hardest-first, then each lesson
//! sweeps the week in configured day order and ascending periods. At
//! every candidate time the workload snapshot is recomputed, the
//! best-balanced qualified teacher is picked, and the placement is
//! checked against the conflict rules. The first clean time wins; a
//! rejected time bumps the conflict counter and the sweep moves on.
//!
//! A lesson that survives the whole sweep without a home is recorded
//! as unplaced. Unplaced lessons are a reportable outcome, not a
//! failure; the run only fails when a roster is empty.
//!
//! # Reference
//!
//! The hardest-first ordering follows the classic most-constrained-
//! variable heuristic for list scheduling; see Pinedo (2016),
//! *Scheduling: Theory, Algorithms, and Systems*, ch. 14 on
//! educational timetabling heuristics.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{SchoolConfig, Slot, StudentClass, Teacher, Weekday};
use crate::scheduler::conflict::{check_placement, Placement};
use crate::scheduler::grid::ScheduleGrid;
use crate::scheduler::lessons::{expand_and_prioritize, Lesson};
use crate::scheduler::workload::{select_optimal_teacher, WorkloadStats};

/// Lifecycle of a single generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationState {
    NotStarted,
    Running,
    Completed,
    Failed,
}

/// Fatal generation failures. Anything short of these is reported in
/// the outcome instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("no teachers available for scheduling")]
    EmptyTeacherRoster,
    #[error("no classes require scheduling")]
    EmptyClassRoster,
}

/// Everything a finished run produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationOutcome {
    /// Committed slots, in placement order.
    pub slots: Vec<Slot>,
    /// Candidate times rejected by a conflict rule or by classroom
    /// exhaustion before each lesson found its home. Informational.
    pub conflicts_resolved: u32,
    /// Workload snapshot of the final schedule.
    pub workload: WorkloadStats,
    /// Lessons no clean time could be found for.
    pub unplaced: Vec<Lesson>,
}

/// One-shot greedy scheduler over a config and its rosters.
///
/// # Example
///
/// ```
/// use timetabler::models::{SchoolConfig, StudentClass, Teacher, Weekday};
/// use timetabler::scheduler::Generator;
///
/// let config = SchoolConfig::new(vec![Weekday::Monday, Weekday::Tuesday], 6);
/// let teachers = vec![Teacher::new("t1", "John Doe").with_subject("Math")];
/// let classes = vec![StudentClass::new("c1", "Grade 6A").with_subject("Math", 2)];
///
/// let mut generator = Generator::new(&config, &teachers, &classes);
/// let outcome = generator.run().unwrap();
///
/// // One Math lesson per day: the repetition rule pushes the second
/// // lesson to Tuesday.
/// assert_eq!(outcome.slots.len(), 2);
/// assert!(outcome.unplaced.is_empty());
/// assert_ne!(outcome.slots[0].day, outcome.slots[1].day);
/// ```
#[derive(Debug)]
pub struct Generator<'a> {
    config: &'a SchoolConfig,
    teachers: &'a [Teacher],
    classes: &'a [StudentClass],
    state: GenerationState,
}

impl<'a> Generator<'a> {
    pub fn new(
        config: &'a SchoolConfig,
        teachers: &'a [Teacher],
        classes: &'a [StudentClass],
    ) -> Self {
        Generator {
            config,
            teachers,
            classes,
            state: GenerationState::NotStarted,
        }
    }

    /// Lifecycle state of the most recent `run` call.
    #[inline]
    pub fn state(&self) -> GenerationState {
        self.state
    }

    /// Runs the generation to completion.
    pub fn run(&mut self) -> Result<GenerationOutcome, GenerationError> {
        self.state = GenerationState::Running;
        match self.execute() {
            Ok(outcome) => {
                self.state = GenerationState::Completed;
                Ok(outcome)
            }
            Err(err) => {
                self.state = GenerationState::Failed;
                Err(err)
            }
        }
    }

    fn execute(&self) -> Result<GenerationOutcome, GenerationError> {
        if self.teachers.is_empty() {
            return Err(GenerationError::EmptyTeacherRoster);
        }
        if self.classes.is_empty() {
            return Err(GenerationError::EmptyClassRoster);
        }

        let lessons = expand_and_prioritize(self.classes, self.teachers);
        info!(
            "generating timetable: {} lessons, {} teachers, {} classes",
            lessons.len(),
            self.teachers.len(),
            self.classes.len()
        );

        let mut committed: Vec<Slot> = Vec::new();
        let mut grid = ScheduleGrid::new();
        let mut unplaced: Vec<Lesson> = Vec::new();
        let mut conflicts_resolved = 0u32;

        for lesson in lessons {
            let candidates: Vec<&Teacher> = self
                .teachers
                .iter()
                .filter(|t| t.teaches(&lesson.subject))
                .collect();
            if candidates.is_empty() {
                warn!(
                    "no qualified teachers for {} ({}), lesson left unplaced",
                    lesson.subject, lesson.class_id
                );
                unplaced.push(lesson);
                continue;
            }

            let placed =
                self.place_lesson(&lesson, &candidates, &mut grid, &mut committed, &mut conflicts_resolved);
            if !placed {
                warn!(
                    "no free period for {} ({}) this week, lesson left unplaced",
                    lesson.subject, lesson.class_id
                );
                unplaced.push(lesson);
            }
        }

        let workload = WorkloadStats::calculate(self.teachers, &committed, self.config);
        info!(
            "generation finished: {} placed, {} unplaced, {} rejected candidates, std dev {:.2}",
            committed.len(),
            unplaced.len(),
            conflicts_resolved,
            workload.workload_std_dev
        );

        Ok(GenerationOutcome {
            slots: committed,
            conflicts_resolved,
            workload,
            unplaced,
        })
    }

    /// Sweeps the week for the first clean time. Returns whether the
    /// lesson was committed.
    fn place_lesson(
        &self,
        lesson: &Lesson,
        candidates: &[&Teacher],
        grid: &mut ScheduleGrid,
        committed: &mut Vec<Slot>,
        conflicts_resolved: &mut u32,
    ) -> bool {
        for &day in &self.config.working_days {
            for period in 1..=self.config.periods_per_day {
                // Balance against what is already committed, so every
                // pick sees the hours placed moments ago.
                let stats = WorkloadStats::calculate(self.teachers, committed, self.config);
                let Some(teacher) = select_optimal_teacher(candidates, day, &stats) else {
                    continue;
                };

                let placement = Placement {
                    day,
                    period,
                    subject: &lesson.subject,
                    teacher,
                    class_id: &lesson.class_id,
                };
                if check_placement(grid, &placement, self.config.allow_subject_repetition, None)
                    .is_some()
                {
                    *conflicts_resolved += 1;
                    continue;
                }

                let Some(classroom) = self.free_classroom(grid, day, period) else {
                    // Every classroom is taken; the time is as blocked
                    // as any rule conflict.
                    *conflicts_resolved += 1;
                    continue;
                };

                debug!(
                    "placed {} for {}: {} period {}, teacher {}, {}",
                    lesson.subject, lesson.class_id, day, period, teacher.id, classroom
                );
                let slot = Slot::new(
                    day,
                    period,
                    lesson.subject.clone(),
                    teacher.id.clone(),
                    lesson.class_id.clone(),
                    classroom,
                );
                grid.insert(slot.clone());
                committed.push(slot);
                return true;
            }
        }
        false
    }

    /// Lowest-numbered classroom free at the given time, or `None`
    /// when all are taken.
    fn free_classroom(&self, grid: &ScheduleGrid, day: Weekday, period: u32) -> Option<String> {
        let used = grid.used_classrooms_at(day, period);
        (1..=self.config.total_classrooms)
            .map(SchoolConfig::classroom_label)
            .find(|label| !used.contains(label.as_str()))
    }
}
