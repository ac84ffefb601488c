//! Export-oriented projections of a slot list.
//!
//! Three shapes cover the usual hand-outs: per-class schedules,
//! per-teacher schedules, and the flat week. All of them join roster
//! names onto the slots; a slot whose teacher or class is missing
//! from the rosters is silently dropped rather than exported half
//! resolved.
//!
//! Slots are ordered by calendar day then period before grouping, so
//! every view lists lessons chronologically and repeated calls
//! produce identical output.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{Slot, StudentClass, Teacher, Weekday};

/// One lesson in a class hand-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassScheduleEntry {
    pub period: u32,
    pub subject: String,
    pub teacher_name: String,
}

/// Weekly (or single-day) schedule of one class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassScheduleView {
    pub class_name: String,
    pub schedule: Vec<ClassScheduleEntry>,
    pub total_hours: u32,
}

/// One lesson in a teacher hand-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherScheduleEntry {
    pub period: u32,
    pub subject: String,
    pub class_name: String,
}

/// Weekly (or single-day) schedule of one teacher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherScheduleView {
    pub teacher_name: String,
    pub schedule: Vec<TeacherScheduleEntry>,
    pub total_hours: u32,
}

/// One fully resolved row of the flat week view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub day: Weekday,
    pub period: u32,
    pub subject: String,
    pub classroom: String,
    pub teacher_id: String,
    pub teacher_name: String,
    pub class_id: String,
    pub class_name: String,
}

/// Slots with both names resolvable, chronological.
fn resolved<'a>(
    slots: &'a [Slot],
    teachers: &'a [Teacher],
    classes: &'a [StudentClass],
    day: Option<Weekday>,
) -> Vec<(&'a Slot, &'a str, &'a str)> {
    let teacher_names: HashMap<&str, &str> = teachers
        .iter()
        .map(|t| (t.id.as_str(), t.name.as_str()))
        .collect();
    let class_names: HashMap<&str, &str> = classes
        .iter()
        .map(|c| (c.id.as_str(), c.name.as_str()))
        .collect();

    let mut rows: Vec<(&Slot, &str, &str)> = slots
        .iter()
        .filter(|s| day.map_or(true, |d| s.day == d))
        .filter_map(|s| {
            let teacher_name = teacher_names.get(s.teacher_id.as_str())?;
            let class_name = class_names.get(s.class_id.as_str())?;
            Some((s, *teacher_name, *class_name))
        })
        .collect();
    rows.sort_by_key(|(s, _, _)| (s.day, s.period));
    rows
}

/// Groups slots per class, optionally restricted to one day.
///
/// Classes appear in the order their first lesson occurs; classes
/// without any resolvable lesson are absent.
pub fn class_view(
    slots: &[Slot],
    teachers: &[Teacher],
    classes: &[StudentClass],
    day: Option<Weekday>,
) -> Vec<ClassScheduleView> {
    let mut views: Vec<ClassScheduleView> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (slot, teacher_name, class_name) in resolved(slots, teachers, classes, day) {
        let at = *index.entry(slot.class_id.clone()).or_insert_with(|| {
            views.push(ClassScheduleView {
                class_name: class_name.to_string(),
                schedule: Vec::new(),
                total_hours: 0,
            });
            views.len() - 1
        });
        views[at].schedule.push(ClassScheduleEntry {
            period: slot.period,
            subject: slot.subject.clone(),
            teacher_name: teacher_name.to_string(),
        });
        views[at].total_hours += 1;
    }
    views
}

/// Groups slots per teacher, optionally restricted to one day.
pub fn teacher_view(
    slots: &[Slot],
    teachers: &[Teacher],
    classes: &[StudentClass],
    day: Option<Weekday>,
) -> Vec<TeacherScheduleView> {
    let mut views: Vec<TeacherScheduleView> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (slot, teacher_name, class_name) in resolved(slots, teachers, classes, day) {
        let at = *index.entry(slot.teacher_id.clone()).or_insert_with(|| {
            views.push(TeacherScheduleView {
                teacher_name: teacher_name.to_string(),
                schedule: Vec::new(),
                total_hours: 0,
            });
            views.len() - 1
        });
        views[at].schedule.push(TeacherScheduleEntry {
            period: slot.period,
            subject: slot.subject.clone(),
            class_name: class_name.to_string(),
        });
        views[at].total_hours += 1;
    }
    views
}

/// The whole week as flat, fully resolved rows. Always unfiltered.
pub fn full_view(
    slots: &[Slot],
    teachers: &[Teacher],
    classes: &[StudentClass],
) -> Vec<ScheduleRow> {
    resolved(slots, teachers, classes, None)
        .into_iter()
        .map(|(slot, teacher_name, class_name)| ScheduleRow {
            day: slot.day,
            period: slot.period,
            subject: slot.subject.clone(),
            classroom: slot.classroom.clone(),
            teacher_id: slot.teacher_id.clone(),
            teacher_name: teacher_name.to_string(),
            class_id: slot.class_id.clone(),
            class_name: class_name.to_string(),
        })
        .collect()
}
