//! Persistence boundary for school setups and timetables.
//!
//! [`TimetableStore`] is the narrow surface the service layer works
//! against: read the latest school setup, create timetable records,
//! and manage slot rows. Everything above it stays storage-agnostic;
//! [`MemoryStore`] is the bundled in-memory implementation used in
//! tests and single-process deployments.
//!
//! Stores are deliberately dumb. Conflict checking, validation, and
//! status bookkeeping live in the service layer; a store only holds
//! rows and enforces referential integrity between them.

mod memory;

use thiserror::Error;

use crate::models::{
    SchoolConfig, Slot, StoredSlot, StudentClass, Teacher, Timetable, TimetableStatus,
};

pub use memory::MemoryStore;

/// Storage failures. Every variant is a missing row; IO-free stores
/// have nothing else to report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("No school configuration found.")]
    ConfigNotFound,
    #[error("Timetable not found.")]
    TimetableNotFound,
    #[error("Slot not found.")]
    SlotNotFound,
}

/// Storage operations the scheduling service relies on.
///
/// Every mutating method is one atomic step: it either applies fully
/// or leaves the store unchanged. Swaps rewrite two rows at once, so
/// they go through [`TimetableStore::update_slot_pair`] instead of
/// two single-row updates a failure could split.
pub trait TimetableStore {
    /// Persists a complete school setup and returns its minted id.
    /// The newest setup becomes the one `load_school_config` serves.
    fn save_setup(
        &mut self,
        config: SchoolConfig,
        teachers: Vec<Teacher>,
        classes: Vec<StudentClass>,
    ) -> Result<String, StoreError>;

    /// The most recently saved school configuration and its id.
    fn load_school_config(&self) -> Result<(String, SchoolConfig), StoreError>;

    /// Looks up a configuration by id, however old.
    fn get_school_config(&self, config_id: &str) -> Result<SchoolConfig, StoreError>;

    /// Teacher roster of a configuration. Unknown ids yield an empty
    /// roster, mirroring a filtered table scan.
    fn load_teachers(&self, config_id: &str) -> Result<Vec<Teacher>, StoreError>;

    /// Class roster of a configuration.
    fn load_classes(&self, config_id: &str) -> Result<Vec<StudentClass>, StoreError>;

    /// Creates a new timetable record in `Generating` state.
    fn create_timetable(&mut self, config_id: &str) -> Result<Timetable, StoreError>;

    /// Looks up a timetable record.
    fn get_timetable(&self, timetable_id: &str) -> Result<Timetable, StoreError>;

    /// Records the outcome of a generation run.
    fn update_timetable_status(
        &mut self,
        timetable_id: &str,
        status: TimetableStatus,
        conflicts_resolved: u32,
    ) -> Result<(), StoreError>;

    /// Bulk-inserts generated slots, returning the stored rows with
    /// their minted ids.
    fn insert_slots(
        &mut self,
        timetable_id: &str,
        slots: Vec<Slot>,
    ) -> Result<Vec<StoredSlot>, StoreError>;

    /// All slots of a timetable, in insertion order.
    fn load_slots(&self, timetable_id: &str) -> Result<Vec<StoredSlot>, StoreError>;

    /// Looks up a single slot row.
    fn get_slot(&self, slot_id: &str) -> Result<StoredSlot, StoreError>;

    /// Inserts one slot row.
    fn insert_slot(&mut self, timetable_id: &str, slot: Slot) -> Result<StoredSlot, StoreError>;

    /// Replaces the payload of an existing slot row, keeping its
    /// identity.
    fn update_slot(&mut self, slot_id: &str, slot: Slot) -> Result<StoredSlot, StoreError>;

    /// Replaces the payloads of two slot rows as one write. Both rows
    /// change or neither does; a missing id fails the call before
    /// anything is touched.
    fn update_slot_pair(
        &mut self,
        first_id: &str,
        first: Slot,
        second_id: &str,
        second: Slot,
    ) -> Result<(StoredSlot, StoredSlot), StoreError>;

    /// Removes a slot row.
    fn delete_slot(&mut self, slot_id: &str) -> Result<(), StoreError>;
}
