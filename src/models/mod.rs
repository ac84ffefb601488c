//! Timetabling domain models.
//!
//! Core data types for school timetable generation: the weekly frame
//! (`SchoolConfig`), the roster (`Teacher`, `StudentClass`), the
//! committed schedule (`Slot`, `StoredSlot`), and the stored timetable
//! record with its generation lifecycle (`Timetable`).
//!
//! Derived quantities (workload metrics, bottleneck findings) live next
//! to the code that computes them, not here; they are recomputed on
//! demand and never stored.

mod class;
mod config;
mod slot;
mod teacher;
mod timetable;

pub use class::{StudentClass, SubjectRequirement};
pub use config::{SchoolConfig, Weekday};
pub use slot::{Slot, StoredSlot};
pub use teacher::{Teacher, UnavailablePeriod};
pub use timetable::{Timetable, TimetableStatus};
