//! In-memory schedule collection.
//!
//! The store is the single source of truth for the views. It holds only
//! canonical records; raw proxy values must go through `RawRecord::into_record`
//! first. The collection is flat and unordered: display ordering belongs to
//! the renderer, not here.

use std::sync::{Arc, Mutex};

use crate::record::ScheduleRecord;

/// Store handle shared between the controller, the reconciler and renderers.
pub type SharedStore = Arc<Mutex<ScheduleStore>>;

#[derive(Debug, Default)]
pub struct ScheduleStore {
    records: Vec<ScheduleRecord>,
}

impl ScheduleStore {
    pub fn new() -> Self {
        ScheduleStore::default()
    }

    pub fn shared() -> SharedStore {
        Arc::new(Mutex::new(ScheduleStore::new()))
    }

    /// Wholesale replace, used after an authoritative fetch from the proxy.
    pub fn replace_all(&mut self, records: Vec<ScheduleRecord>) {
        self.records = records;
    }

    /// Insert if the id is unseen, otherwise replace in place, keeping the
    /// record's position in the collection.
    pub fn upsert(&mut self, record: ScheduleRecord) {
        match self.records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record,
            None => self.records.push(record),
        }
    }

    /// Remove the matching record. No-op when the id is absent.
    pub fn remove_by_id(&mut self, id: &str) {
        self.records.retain(|r| r.id != id);
    }

    pub fn find_by_id(&self, id: &str) -> Option<&ScheduleRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn records(&self) -> &[ScheduleRecord] {
        &self.records
    }

    pub fn snapshot(&self) -> Vec<ScheduleRecord> {
        self.records.clone()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
