//! Timetable construction: lesson ordering, workload balancing,
//! conflict rules, and the greedy generator.
//!
//! # Algorithm
//!
//! Generation is a single greedy pass. Lessons are expanded from class
//! requirements and sorted hardest-first; each takes the first
//! conflict-free (day, period, teacher, classroom) combination found
//! by sweeping the week, with the teacher picked per candidate time by
//! workload balance. Not optimal, but fast and reproducible.
//!
//! # Conflict rules
//!
//! [`check_placement`] is the single rule set shared by generation and
//! manual editing, so a hand-placed slot obeys exactly the constraints
//! the generator does.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 14
//! - Baker & Trietsch (2019), "Principles of Sequencing and Scheduling"

mod conflict;
mod generate;
mod grid;
mod lessons;
mod workload;

pub use conflict::{check_placement, check_swap, Conflict, ConflictKind, Placement};
pub use generate::{GenerationError, GenerationOutcome, GenerationState, Generator};
pub use grid::ScheduleGrid;
pub use lessons::{expand_and_prioritize, placement_difficulty, Lesson};
pub use workload::{select_optimal_teacher, TeacherWorkload, WorkloadStats};
