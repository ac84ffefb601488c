//! Workload accounting and balance-driven teacher selection.
//!
//! [`WorkloadStats`] is a pure snapshot of a slot list: per-teacher
//! hour counts plus population variance across the whole roster.
//! Teachers with no assigned hours still appear, so an idle teacher
//! pulls the average down and shows up as a balancing target.
//!
//! [`select_optimal_teacher`] turns a snapshot into a pick: among
//! qualified candidates, the one whose placement keeps the schedule
//! most balanced. Lower score wins.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{SchoolConfig, Slot, Teacher, Weekday};

/// Scheduled-hour accounting for a single teacher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherWorkload {
    /// Teacher this record belongs to.
    pub teacher_id: String,
    /// Total scheduled hours across the week.
    pub total_hours: u32,
    /// Scheduled hours per day. Working days are always present, even
    /// when zero.
    pub hours_per_day: HashMap<Weekday, u32>,
    /// Lesson count per subject taught.
    pub subjects_taught: HashMap<String, u32>,
    /// Number of adjacent same-day period pairs taught consecutively.
    pub back_to_back_count: u32,
    /// Unscheduled periods per working day.
    pub free_periods_per_day: HashMap<Weekday, u32>,
}

impl TeacherWorkload {
    fn empty(teacher: &Teacher, config: &SchoolConfig) -> Self {
        let mut hours_per_day = HashMap::new();
        let mut free_periods_per_day = HashMap::new();
        for &day in &config.working_days {
            hours_per_day.insert(day, 0);
            free_periods_per_day.insert(day, config.periods_per_day);
        }
        TeacherWorkload {
            teacher_id: teacher.id.clone(),
            total_hours: 0,
            hours_per_day,
            subjects_taught: HashMap::new(),
            back_to_back_count: 0,
            free_periods_per_day,
        }
    }

    /// Scheduled hours on one day.
    #[inline]
    pub fn hours_on(&self, day: Weekday) -> u32 {
        self.hours_per_day.get(&day).copied().unwrap_or(0)
    }
}

/// Roster-wide workload snapshot for one slot list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadStats {
    /// Per-teacher accounting, keyed by teacher id. One entry per
    /// roster teacher regardless of assigned hours.
    pub teacher_workloads: HashMap<String, TeacherWorkload>,
    /// Sum of all scheduled hours held by roster teachers.
    pub total_scheduled_hours: u32,
    /// Mean hours per roster teacher. Zero for an empty roster.
    pub average_hours_per_teacher: f64,
    /// Population variance of total hours across the roster.
    pub workload_variance: f64,
    /// Square root of the variance.
    pub workload_std_dev: f64,
}

impl WorkloadStats {
    /// Computes a snapshot from scratch.
    ///
    /// Slots referencing teachers outside the roster are ignored. The
    /// slot list is read once per call; nothing is cached between
    /// calls.
    pub fn calculate(teachers: &[Teacher], slots: &[Slot], config: &SchoolConfig) -> Self {
        let mut workloads: HashMap<String, TeacherWorkload> = teachers
            .iter()
            .map(|t| (t.id.clone(), TeacherWorkload::empty(t, config)))
            .collect();

        for slot in slots {
            let Some(workload) = workloads.get_mut(&slot.teacher_id) else {
                continue;
            };
            workload.total_hours += 1;
            *workload.hours_per_day.entry(slot.day).or_insert(0) += 1;
            *workload
                .subjects_taught
                .entry(slot.subject.clone())
                .or_insert(0) += 1;
            if let Some(free) = workload.free_periods_per_day.get_mut(&slot.day) {
                *free = free.saturating_sub(1);
            }
        }

        // Back-to-back pairs are adjacent periods on the same day.
        let mut periods: HashMap<(&str, Weekday), Vec<u32>> = HashMap::new();
        for slot in slots {
            if workloads.contains_key(&slot.teacher_id) {
                periods
                    .entry((slot.teacher_id.as_str(), slot.day))
                    .or_default()
                    .push(slot.period);
            }
        }
        for ((teacher_id, _), mut day_periods) in periods {
            day_periods.sort_unstable();
            let adjacent = day_periods.windows(2).filter(|w| w[1] == w[0] + 1).count();
            if let Some(workload) = workloads.get_mut(teacher_id) {
                workload.back_to_back_count += adjacent as u32;
            }
        }

        let total_scheduled_hours: u32 = workloads.values().map(|w| w.total_hours).sum();
        let count = teachers.len();
        let average_hours_per_teacher = if count == 0 {
            0.0
        } else {
            f64::from(total_scheduled_hours) / count as f64
        };
        let workload_variance = if count == 0 {
            0.0
        } else {
            workloads
                .values()
                .map(|w| {
                    let deviation = f64::from(w.total_hours) - average_hours_per_teacher;
                    deviation * deviation
                })
                .sum::<f64>()
                / count as f64
        };

        WorkloadStats {
            teacher_workloads: workloads,
            total_scheduled_hours,
            average_hours_per_teacher,
            workload_variance,
            workload_std_dev: workload_variance.sqrt(),
        }
    }

    /// Accounting record for one teacher, if on the roster.
    #[inline]
    pub fn workload(&self, teacher_id: &str) -> Option<&TeacherWorkload> {
        self.teacher_workloads.get(teacher_id)
    }
}

/// Picks the candidate whose placement on `day` keeps workloads most
/// balanced.
///
/// Candidates are scored and the lowest score wins; ties keep the
/// earliest candidate. Scoring penalises hours above the roster
/// average (double weight), hours already scheduled on the target day,
/// and existing back-to-back pairs; a candidate who prefers the day
/// gets a flat bonus.
///
/// A lone candidate is returned without scoring, and if no candidate
/// has a workload record the first one is returned as a fallback.
/// Returns `None` only for an empty candidate list.
pub fn select_optimal_teacher<'a>(
    candidates: &[&'a Teacher],
    day: Weekday,
    stats: &WorkloadStats,
) -> Option<&'a Teacher> {
    if candidates.is_empty() {
        return None;
    }
    if candidates.len() == 1 {
        return Some(candidates[0]);
    }

    let mut best: Option<(&Teacher, f64)> = None;
    for &teacher in candidates {
        let Some(workload) = stats.workload(&teacher.id) else {
            continue;
        };

        let mut score = 0.0;
        let above_average = f64::from(workload.total_hours) - stats.average_hours_per_teacher;
        if above_average > 0.0 {
            score += above_average * 2.0;
        }
        score += f64::from(workload.hours_on(day)) * 1.5;
        if teacher.prefers(day) {
            score -= 2.0;
        }
        score += f64::from(workload.back_to_back_count) * 0.5;

        match best {
            Some((_, best_score)) if score >= best_score => {}
            _ => best = Some((teacher, score)),
        }
    }

    best.map(|(teacher, _)| teacher)
        .or_else(|| candidates.first().copied())
}
