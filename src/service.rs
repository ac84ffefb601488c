//! Scheduling operations over a [`TimetableStore`].
//!
//! [`SchedulingService`] ties the layers together: it validates and
//! saves school setups, drives generation runs while keeping the
//! timetable record's status in step, and funnels every manual edit
//! through the same conflict rules the generator obeys.
//!
//! Manual edits are content edits. A slot's day and period only ever
//! change by swapping two slots, which exchanges their lessons and
//! leaves both times where they were. Every manual write marks the
//! row as an override so regeneration tooling can tell hand-placed
//! lessons from generated ones.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analysis::{analyze_bottlenecks, Bottleneck};
use crate::models::{
    SchoolConfig, Slot, StoredSlot, StudentClass, Teacher, Timetable, TimetableStatus, Weekday,
};
use crate::scheduler::{
    check_placement, check_swap, GenerationError, GenerationOutcome, Generator, Placement,
    ScheduleGrid,
};
use crate::store::{StoreError, TimetableStore};
use crate::validation::{validate_input, ValidationError};
use crate::views::{
    class_view, full_view, teacher_view, ClassScheduleView, ScheduleRow, TeacherScheduleView,
};

/// Failures surfaced by [`SchedulingService`] operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    /// The setup failed validation; the list holds every problem found.
    #[error("Invalid school setup ({} problems)", .0.len())]
    InvalidSetup(Vec<ValidationError>),
    /// A manual edit would break a scheduling rule.
    #[error("Conflict detected: {0}")]
    Conflict(String),
    #[error("One or both slots not found.")]
    SwapSlotMissing,
    #[error("Slots must belong to the same timetable.")]
    SwapAcrossTimetables,
    #[error("At least one field to update must be provided.")]
    EmptyUpdate,
    #[error("Teacher not found.")]
    UnknownTeacher,
    #[error("Class not found.")]
    UnknownClass,
}

/// What a generation run produced, with the ids the store minted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub timetable_id: String,
    /// Stored row ids, in the order the slots were placed.
    pub slot_ids: Vec<String>,
    pub outcome: GenerationOutcome,
}

/// Partial update for one slot's content. Fields left `None` keep
/// their stored value; the slot's day and period never change through
/// this type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotPatch {
    pub teacher_id: Option<String>,
    pub class_id: Option<String>,
    pub subject: Option<String>,
    pub classroom: Option<String>,
}

impl SlotPatch {
    pub fn new() -> Self {
        SlotPatch::default()
    }

    pub fn with_teacher(mut self, teacher_id: impl Into<String>) -> Self {
        self.teacher_id = Some(teacher_id.into());
        self
    }

    pub fn with_class(mut self, class_id: impl Into<String>) -> Self {
        self.class_id = Some(class_id.into());
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_classroom(mut self, classroom: impl Into<String>) -> Self {
        self.classroom = Some(classroom.into());
        self
    }

    fn is_empty(&self) -> bool {
        self.teacher_id.is_none()
            && self.class_id.is_none()
            && self.subject.is_none()
            && self.classroom.is_none()
    }
}

/// High-level scheduling facade over a [`TimetableStore`].
///
/// # Example
///
/// ```
/// use timetabler::models::{SchoolConfig, StudentClass, Teacher, Weekday};
/// use timetabler::service::SchedulingService;
/// use timetabler::store::MemoryStore;
///
/// let config = SchoolConfig::new(
///     vec![Weekday::Monday, Weekday::Tuesday, Weekday::Wednesday],
///     6,
/// );
/// let teachers = vec![
///     Teacher::new("t1", "John Doe").with_subject("Math"),
///     Teacher::new("t2", "Jane Roe").with_subject("English"),
/// ];
/// let classes = vec![StudentClass::new("c1", "Grade 6A")
///     .with_subject("Math", 3)
///     .with_subject("English", 2)];
///
/// let mut service = SchedulingService::new(MemoryStore::new());
/// service.save_setup(config, teachers, classes).unwrap();
///
/// let report = service.run_generation().unwrap();
/// assert_eq!(report.outcome.slots.len(), 5);
/// assert!(report.outcome.unplaced.is_empty());
///
/// let schedules = service
///     .class_schedules(&report.timetable_id, None)
///     .unwrap();
/// assert_eq!(schedules[0].total_hours, 5);
/// ```
#[derive(Debug)]
pub struct SchedulingService<S> {
    store: S,
}

impl<S: TimetableStore> SchedulingService<S> {
    pub fn new(store: S) -> Self {
        SchedulingService { store }
    }

    /// Read access to the backing store.
    #[inline]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validates and persists a school setup. Nothing is written when
    /// validation fails.
    pub fn save_setup(
        &mut self,
        config: SchoolConfig,
        teachers: Vec<Teacher>,
        classes: Vec<StudentClass>,
    ) -> Result<String, ServiceError> {
        if let Err(problems) = validate_input(&config, &teachers, &classes) {
            return Err(ServiceError::InvalidSetup(problems));
        }
        let config_id = self.store.save_setup(config, teachers, classes)?;
        info!("saved school setup {config_id}");
        Ok(config_id)
    }

    /// Generates a timetable for the most recent setup.
    ///
    /// A timetable record is created in `Generating` state before the
    /// run and finalized afterwards: `Completed` with its conflict
    /// count on success, `Failed` when the generator rejects the
    /// rosters. A run with unplaced lessons still completes; the
    /// leftovers are reported, not fatal.
    pub fn run_generation(&mut self) -> Result<GenerationReport, ServiceError> {
        let (config_id, config) = self.store.load_school_config()?;
        let teachers = self.store.load_teachers(&config_id)?;
        let classes = self.store.load_classes(&config_id)?;

        let timetable = self.store.create_timetable(&config_id)?;
        debug!("created timetable {} for config {config_id}", timetable.id);

        let mut generator = Generator::new(&config, &teachers, &classes);
        let outcome = match generator.run() {
            Ok(outcome) => outcome,
            Err(err) => {
                self.store
                    .update_timetable_status(&timetable.id, TimetableStatus::Failed, 0)?;
                warn!("timetable {} marked failed: {err}", timetable.id);
                return Err(err.into());
            }
        };

        let stored = self.store.insert_slots(&timetable.id, outcome.slots.clone())?;
        self.store.update_timetable_status(
            &timetable.id,
            TimetableStatus::Completed,
            outcome.conflicts_resolved,
        )?;
        info!(
            "timetable {} stored with {} slots",
            timetable.id,
            stored.len()
        );

        Ok(GenerationReport {
            timetable_id: timetable.id,
            slot_ids: stored.into_iter().map(|row| row.id).collect(),
            outcome,
        })
    }

    /// Adds a hand-placed slot after checking it against the full
    /// timetable.
    pub fn create_slot(
        &mut self,
        timetable_id: &str,
        slot: Slot,
    ) -> Result<StoredSlot, ServiceError> {
        let (config, teachers, classes) = self.config_context(timetable_id)?;
        let teacher = Self::roster_teacher(&teachers, &slot.teacher_id)?;
        Self::ensure_class(&classes, &slot.class_id)?;

        let rows = self.store.load_slots(timetable_id)?;
        let grid = ScheduleGrid::from_stored(&rows);
        let placement = Placement {
            day: slot.day,
            period: slot.period,
            subject: &slot.subject,
            teacher,
            class_id: &slot.class_id,
        };
        if let Some(conflict) =
            check_placement(&grid, &placement, config.allow_subject_repetition, None)
        {
            warn!(
                "slot rejected for timetable {timetable_id}: {}",
                conflict.message
            );
            return Err(ServiceError::Conflict(conflict.message));
        }

        let stored = self
            .store
            .insert_slot(timetable_id, slot.with_manual_override())?;
        debug!("slot {} added to timetable {timetable_id}", stored.id);
        Ok(stored)
    }

    /// Rewrites a slot's content in place, keeping its day and period.
    ///
    /// The merged result is checked against every other slot of the
    /// timetable; the edited row itself is excluded so an unchanged
    /// field never clashes with its own current value.
    pub fn update_slot(
        &mut self,
        slot_id: &str,
        patch: SlotPatch,
    ) -> Result<StoredSlot, ServiceError> {
        if patch.is_empty() {
            return Err(ServiceError::EmptyUpdate);
        }

        let existing = self.store.get_slot(slot_id)?;
        let (config, teachers, classes) = self.config_context(&existing.timetable_id)?;

        let current = existing.slot;
        let updated = Slot::new(
            current.day,
            current.period,
            patch.subject.unwrap_or(current.subject),
            patch.teacher_id.unwrap_or(current.teacher_id),
            patch.class_id.unwrap_or(current.class_id),
            patch.classroom.unwrap_or(current.classroom),
        )
        .with_manual_override();

        let teacher = Self::roster_teacher(&teachers, &updated.teacher_id)?;
        Self::ensure_class(&classes, &updated.class_id)?;

        let rows = self.store.load_slots(&existing.timetable_id)?;
        let grid = ScheduleGrid::from_stored(&rows);
        let placement = Placement {
            day: updated.day,
            period: updated.period,
            subject: &updated.subject,
            teacher,
            class_id: &updated.class_id,
        };
        if let Some(conflict) = check_placement(
            &grid,
            &placement,
            config.allow_subject_repetition,
            Some(slot_id),
        ) {
            warn!("update of slot {slot_id} rejected: {}", conflict.message);
            return Err(ServiceError::Conflict(conflict.message));
        }

        let stored = self.store.update_slot(slot_id, updated)?;
        debug!("slot {} updated", stored.id);
        Ok(stored)
    }

    /// Exchanges the lessons of two slots of the same timetable. Each
    /// row keeps its day and period and receives the other's teacher,
    /// class, subject, and classroom. Both rows are rewritten in one
    /// store write; a failure swaps neither.
    pub fn swap_slots(
        &mut self,
        first_id: &str,
        second_id: &str,
    ) -> Result<(StoredSlot, StoredSlot), ServiceError> {
        let first = self.swap_target(first_id)?;
        let second = self.swap_target(second_id)?;
        if first.timetable_id != second.timetable_id {
            return Err(ServiceError::SwapAcrossTimetables);
        }

        let (config, teachers, _) = self.config_context(&first.timetable_id)?;
        let first_teacher = Self::roster_teacher(&teachers, &first.slot.teacher_id)?;
        let second_teacher = Self::roster_teacher(&teachers, &second.slot.teacher_id)?;

        let rows = self.store.load_slots(&first.timetable_id)?;
        if let Some(conflict) = check_swap(
            &rows,
            &first,
            &second,
            first_teacher,
            second_teacher,
            config.allow_subject_repetition,
        ) {
            warn!(
                "swap of {first_id} and {second_id} rejected: {}",
                conflict.message
            );
            return Err(ServiceError::Conflict(conflict.message));
        }

        let first_content = Slot::new(
            first.slot.day,
            first.slot.period,
            second.slot.subject.clone(),
            second.slot.teacher_id.clone(),
            second.slot.class_id.clone(),
            second.slot.classroom.clone(),
        )
        .with_manual_override();
        let second_content = Slot::new(
            second.slot.day,
            second.slot.period,
            first.slot.subject.clone(),
            first.slot.teacher_id.clone(),
            first.slot.class_id.clone(),
            first.slot.classroom.clone(),
        )
        .with_manual_override();

        let (updated_first, updated_second) =
            self.store
                .update_slot_pair(first_id, first_content, second_id, second_content)?;
        debug!("slots {first_id} and {second_id} swapped");
        Ok((updated_first, updated_second))
    }

    /// Removes a slot. Deletions never conflict, so no rules run.
    pub fn delete_slot(&mut self, slot_id: &str) -> Result<(), ServiceError> {
        self.store.delete_slot(slot_id)?;
        debug!("slot {slot_id} deleted");
        Ok(())
    }

    /// A timetable record with its slots in chronological order.
    pub fn timetable(
        &self,
        timetable_id: &str,
    ) -> Result<(Timetable, Vec<StoredSlot>), ServiceError> {
        let timetable = self.store.get_timetable(timetable_id)?;
        let mut rows = self.store.load_slots(timetable_id)?;
        rows.sort_by_key(|row| (row.slot.day, row.slot.period));
        Ok((timetable, rows))
    }

    /// Per-class schedules, optionally restricted to one day.
    pub fn class_schedules(
        &self,
        timetable_id: &str,
        day: Option<Weekday>,
    ) -> Result<Vec<ClassScheduleView>, ServiceError> {
        let (_, teachers, classes) = self.config_context(timetable_id)?;
        let slots = self.plain_slots(timetable_id)?;
        Ok(class_view(&slots, &teachers, &classes, day))
    }

    /// Per-teacher schedules, optionally restricted to one day.
    pub fn teacher_schedules(
        &self,
        timetable_id: &str,
        day: Option<Weekday>,
    ) -> Result<Vec<TeacherScheduleView>, ServiceError> {
        let (_, teachers, classes) = self.config_context(timetable_id)?;
        let slots = self.plain_slots(timetable_id)?;
        Ok(teacher_view(&slots, &teachers, &classes, day))
    }

    /// The whole week as flat resolved rows.
    pub fn full_schedule(&self, timetable_id: &str) -> Result<Vec<ScheduleRow>, ServiceError> {
        let (_, teachers, classes) = self.config_context(timetable_id)?;
        let slots = self.plain_slots(timetable_id)?;
        Ok(full_view(&slots, &teachers, &classes))
    }

    /// Structural problems of a timetable and its setup.
    pub fn bottlenecks(&self, timetable_id: &str) -> Result<Vec<Bottleneck>, ServiceError> {
        let (config, teachers, classes) = self.config_context(timetable_id)?;
        let slots = self.plain_slots(timetable_id)?;
        Ok(analyze_bottlenecks(&config, &teachers, &classes, &slots))
    }

    /// The setup a timetable was generated from.
    fn config_context(
        &self,
        timetable_id: &str,
    ) -> Result<(SchoolConfig, Vec<Teacher>, Vec<StudentClass>), ServiceError> {
        let timetable = self.store.get_timetable(timetable_id)?;
        let config = self.store.get_school_config(&timetable.school_config_id)?;
        let teachers = self.store.load_teachers(&timetable.school_config_id)?;
        let classes = self.store.load_classes(&timetable.school_config_id)?;
        Ok((config, teachers, classes))
    }

    fn plain_slots(&self, timetable_id: &str) -> Result<Vec<Slot>, ServiceError> {
        Ok(self
            .store
            .load_slots(timetable_id)?
            .into_iter()
            .map(|row| row.slot)
            .collect())
    }

    fn swap_target(&self, slot_id: &str) -> Result<StoredSlot, ServiceError> {
        self.store.get_slot(slot_id).map_err(|err| match err {
            StoreError::SlotNotFound => ServiceError::SwapSlotMissing,
            other => ServiceError::Store(other),
        })
    }

    fn roster_teacher<'a>(
        teachers: &'a [Teacher],
        teacher_id: &str,
    ) -> Result<&'a Teacher, ServiceError> {
        teachers
            .iter()
            .find(|t| t.id == teacher_id)
            .ok_or(ServiceError::UnknownTeacher)
    }

    fn ensure_class(classes: &[StudentClass], class_id: &str) -> Result<(), ServiceError> {
        if classes.iter().any(|c| c.id == class_id) {
            Ok(())
        } else {
            Err(ServiceError::UnknownClass)
        }
    }
}
