//! School timetable generation engine.
//!
//! Builds weekly timetables from a school configuration and its
//! teacher and class rosters: lessons are expanded from per-class
//! subject requirements, ordered hardest-first, and placed greedily
//! while workload statistics steer teacher choice and a shared
//! conflict checker guards every placement, manual edit, and swap.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `SchoolConfig`, `Weekday`, `Teacher`,
//!   `StudentClass`, `Slot`, `Timetable`
//! - **`validation`**: Input integrity checks for a school setup
//! - **`scheduler`**: Lesson expansion, workload statistics, the
//!   conflict rules, and the greedy generator
//! - **`analysis`**: Bottleneck diagnostics over a finished timetable
//! - **`views`**: Per-class, per-teacher, and flat week read models
//! - **`store`**: The persistence trait and its in-memory store
//! - **`service`**: The facade gluing storage, generation, and manual
//!   editing together
//!
//! # Architecture
//!
//! The scheduler, analyzer, and views are pure functions over the
//! domain types; nothing below `store` performs IO. [`service`] is
//! the only layer that writes, so status bookkeeping and conflict
//! policy stay in one place.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Baker & Trietsch (2019), "Principles of Sequencing and Scheduling"

pub mod analysis;
pub mod models;
pub mod scheduler;
pub mod service;
pub mod store;
pub mod validation;
pub mod views;
