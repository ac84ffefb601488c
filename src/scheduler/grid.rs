//! Occupancy view over a set of timetable slots.
//!
//! [`ScheduleGrid`] answers the questions the conflict rules ask:
//! who is booked when, which subjects a class already has on a day,
//! and which classrooms are taken in a given period. The two
//! double-booking axes are hash-indexed by structured (day, period)
//! keys, so the hottest checks cost one lookup instead of a scan.
//! Entries loaded from storage keep their row id so a slot being
//! edited can be excluded from every query and not collide with
//! itself.

use std::collections::{HashMap, HashSet};

use crate::models::{Slot, StoredSlot, Weekday};

#[derive(Debug, Clone)]
struct GridEntry {
    /// Storage row id, when known. Freshly generated slots have none.
    id: Option<String>,
    slot: Slot,
}

fn excluded(row_id: Option<&str>, exclude: Option<&str>) -> bool {
    matches!((row_id, exclude), (Some(own), Some(skip)) if own == skip)
}

/// Occupant of one (day, period) on one booking axis, holding the
/// storage row id when the entry has one. The no-double-booking
/// invariant keeps at most one occupant per key.
type Occupancy = HashMap<(Weekday, u32), HashMap<String, Option<String>>>;

/// Occupancy index over committed slots.
///
/// Queries take an optional `exclude` row id; the matching entry is
/// invisible to that query. Entries without an id are never excluded.
#[derive(Debug, Clone, Default)]
pub struct ScheduleGrid {
    entries: Vec<GridEntry>,
    teacher_busy: Occupancy,
    class_busy: Occupancy,
}

impl ScheduleGrid {
    /// An empty grid.
    pub fn new() -> Self {
        ScheduleGrid::default()
    }

    /// Builds a grid from stored rows, keeping their ids for
    /// exclusion.
    pub fn from_stored(slots: &[StoredSlot]) -> Self {
        let mut grid = ScheduleGrid::new();
        for stored in slots {
            grid.add(GridEntry {
                id: Some(stored.id.clone()),
                slot: stored.slot.clone(),
            });
        }
        grid
    }

    /// Adds a slot with no storage identity.
    pub fn insert(&mut self, slot: Slot) {
        self.add(GridEntry { id: None, slot });
    }

    fn add(&mut self, entry: GridEntry) {
        let at = (entry.slot.day, entry.slot.period);
        self.teacher_busy
            .entry(at)
            .or_default()
            .insert(entry.slot.teacher_id.clone(), entry.id.clone());
        self.class_busy
            .entry(at)
            .or_default()
            .insert(entry.slot.class_id.clone(), entry.id.clone());
        self.entries.push(entry);
    }

    /// Number of slots held.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the grid holds no slots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn visible<'a>(&'a self, exclude: Option<&'a str>) -> impl Iterator<Item = &'a Slot> {
        self.entries
            .iter()
            .filter(move |entry| !excluded(entry.id.as_deref(), exclude))
            .map(|entry| &entry.slot)
    }

    fn booked(index: &Occupancy, day: Weekday, period: u32, key: &str, exclude: Option<&str>) -> bool {
        index
            .get(&(day, period))
            .and_then(|occupants| occupants.get(key))
            .map_or(false, |row| !excluded(row.as_deref(), exclude))
    }

    /// Whether the teacher already holds a slot at this time.
    pub fn is_teacher_booked(
        &self,
        day: Weekday,
        period: u32,
        teacher_id: &str,
        exclude: Option<&str>,
    ) -> bool {
        Self::booked(&self.teacher_busy, day, period, teacher_id, exclude)
    }

    /// Whether the class already holds a slot at this time.
    pub fn is_class_booked(
        &self,
        day: Weekday,
        period: u32,
        class_id: &str,
        exclude: Option<&str>,
    ) -> bool {
        Self::booked(&self.class_busy, day, period, class_id, exclude)
    }

    /// Whether the class already takes this subject on this day.
    pub fn has_subject_on_day(
        &self,
        day: Weekday,
        class_id: &str,
        subject: &str,
        exclude: Option<&str>,
    ) -> bool {
        self.visible(exclude)
            .any(|s| s.day == day && s.class_id == class_id && s.subject == subject)
    }

    /// Hours the teacher already holds on this day.
    pub fn teacher_hours_on(&self, day: Weekday, teacher_id: &str, exclude: Option<&str>) -> u32 {
        self.visible(exclude)
            .filter(|s| s.day == day && s.teacher_id == teacher_id)
            .count() as u32
    }

    /// Classrooms occupied at this time.
    pub fn used_classrooms_at(&self, day: Weekday, period: u32) -> HashSet<&str> {
        self.visible(None)
            .filter(|s| s.is_at(day, period))
            .map(|s| s.classroom.as_str())
            .collect()
    }
}
