//! In-memory store backed by plain vectors.
//!
//! Rows keep their insertion order and ids are minted from per-table
//! counters, so a sequence of operations always produces the same
//! ids. Setups are versioned: saving again leaves earlier
//! configurations readable by id while `load_school_config` returns
//! the newest one.

use std::collections::HashMap;

use crate::models::{
    SchoolConfig, Slot, StoredSlot, StudentClass, Teacher, Timetable, TimetableStatus,
};
use crate::store::{StoreError, TimetableStore};

/// Vector-backed [`TimetableStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    configs: Vec<(String, SchoolConfig)>,
    teachers: HashMap<String, Vec<Teacher>>,
    classes: HashMap<String, Vec<StudentClass>>,
    timetables: Vec<Timetable>,
    slots: Vec<StoredSlot>,
    next_config: u32,
    next_timetable: u32,
    next_slot: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    fn has_config(&self, config_id: &str) -> bool {
        self.configs.iter().any(|(id, _)| id == config_id)
    }

    fn has_timetable(&self, timetable_id: &str) -> bool {
        self.timetables.iter().any(|t| t.id == timetable_id)
    }

    fn mint_slot(&mut self, timetable_id: &str, slot: Slot) -> StoredSlot {
        self.next_slot += 1;
        let stored = StoredSlot::new(format!("slot-{}", self.next_slot), timetable_id, slot);
        self.slots.push(stored.clone());
        stored
    }
}

impl TimetableStore for MemoryStore {
    fn save_setup(
        &mut self,
        config: SchoolConfig,
        teachers: Vec<Teacher>,
        classes: Vec<StudentClass>,
    ) -> Result<String, StoreError> {
        self.next_config += 1;
        let config_id = format!("cfg-{}", self.next_config);
        self.configs.push((config_id.clone(), config));
        self.teachers.insert(config_id.clone(), teachers);
        self.classes.insert(config_id.clone(), classes);
        Ok(config_id)
    }

    fn load_school_config(&self) -> Result<(String, SchoolConfig), StoreError> {
        self.configs
            .last()
            .map(|(id, config)| (id.clone(), config.clone()))
            .ok_or(StoreError::ConfigNotFound)
    }

    fn get_school_config(&self, config_id: &str) -> Result<SchoolConfig, StoreError> {
        self.configs
            .iter()
            .find(|(id, _)| id == config_id)
            .map(|(_, config)| config.clone())
            .ok_or(StoreError::ConfigNotFound)
    }

    fn load_teachers(&self, config_id: &str) -> Result<Vec<Teacher>, StoreError> {
        Ok(self.teachers.get(config_id).cloned().unwrap_or_default())
    }

    fn load_classes(&self, config_id: &str) -> Result<Vec<StudentClass>, StoreError> {
        Ok(self.classes.get(config_id).cloned().unwrap_or_default())
    }

    fn create_timetable(&mut self, config_id: &str) -> Result<Timetable, StoreError> {
        if !self.has_config(config_id) {
            return Err(StoreError::ConfigNotFound);
        }
        self.next_timetable += 1;
        let timetable = Timetable::new(format!("tt-{}", self.next_timetable), config_id);
        self.timetables.push(timetable.clone());
        Ok(timetable)
    }

    fn get_timetable(&self, timetable_id: &str) -> Result<Timetable, StoreError> {
        self.timetables
            .iter()
            .find(|t| t.id == timetable_id)
            .cloned()
            .ok_or(StoreError::TimetableNotFound)
    }

    fn update_timetable_status(
        &mut self,
        timetable_id: &str,
        status: TimetableStatus,
        conflicts_resolved: u32,
    ) -> Result<(), StoreError> {
        let timetable = self
            .timetables
            .iter_mut()
            .find(|t| t.id == timetable_id)
            .ok_or(StoreError::TimetableNotFound)?;
        timetable.status = status;
        timetable.conflicts_resolved = conflicts_resolved;
        Ok(())
    }

    fn insert_slots(
        &mut self,
        timetable_id: &str,
        slots: Vec<Slot>,
    ) -> Result<Vec<StoredSlot>, StoreError> {
        if !self.has_timetable(timetable_id) {
            return Err(StoreError::TimetableNotFound);
        }
        Ok(slots
            .into_iter()
            .map(|slot| self.mint_slot(timetable_id, slot))
            .collect())
    }

    fn load_slots(&self, timetable_id: &str) -> Result<Vec<StoredSlot>, StoreError> {
        Ok(self
            .slots
            .iter()
            .filter(|s| s.timetable_id == timetable_id)
            .cloned()
            .collect())
    }

    fn get_slot(&self, slot_id: &str) -> Result<StoredSlot, StoreError> {
        self.slots
            .iter()
            .find(|s| s.id == slot_id)
            .cloned()
            .ok_or(StoreError::SlotNotFound)
    }

    fn insert_slot(&mut self, timetable_id: &str, slot: Slot) -> Result<StoredSlot, StoreError> {
        if !self.has_timetable(timetable_id) {
            return Err(StoreError::TimetableNotFound);
        }
        Ok(self.mint_slot(timetable_id, slot))
    }

    fn update_slot(&mut self, slot_id: &str, slot: Slot) -> Result<StoredSlot, StoreError> {
        let stored = self
            .slots
            .iter_mut()
            .find(|s| s.id == slot_id)
            .ok_or(StoreError::SlotNotFound)?;
        stored.slot = slot;
        Ok(stored.clone())
    }

    fn update_slot_pair(
        &mut self,
        first_id: &str,
        first: Slot,
        second_id: &str,
        second: Slot,
    ) -> Result<(StoredSlot, StoredSlot), StoreError> {
        // Resolve both rows before touching either.
        let first_at = self
            .slots
            .iter()
            .position(|s| s.id == first_id)
            .ok_or(StoreError::SlotNotFound)?;
        let second_at = self
            .slots
            .iter()
            .position(|s| s.id == second_id)
            .ok_or(StoreError::SlotNotFound)?;

        self.slots[first_at].slot = first;
        self.slots[second_at].slot = second;
        Ok((self.slots[first_at].clone(), self.slots[second_at].clone()))
    }

    fn delete_slot(&mut self, slot_id: &str) -> Result<(), StoreError> {
        let at = self
            .slots
            .iter()
            .position(|s| s.id == slot_id)
            .ok_or(StoreError::SlotNotFound)?;
        self.slots.remove(at);
        Ok(())
    }
}
