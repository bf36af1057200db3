//! In-process session store backed by a shared hash map.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;

use super::{SessionRecord, SessionStore};
use crate::error::StoreResult;

/// In-memory store.
///
/// Cloning yields another handle to the same records, so separate facade
/// instances can share one store within a process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<Mutex<HashMap<String, SessionRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }

    fn records(&self) -> MutexGuard<'_, HashMap<String, SessionRecord>> {
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SessionStore for MemoryStore {
    fn load(&self, id: &str) -> StoreResult<Option<SessionRecord>> {
        Ok(self.records().get(id).cloned())
    }

    fn save(&self, id: &str, record: &SessionRecord) -> StoreResult<()> {
        self.records().insert(id.to_string(), record.clone());
        Ok(())
    }

    fn delete(&self, id: &str) -> StoreResult<()> {
        self.records().remove(id);
        Ok(())
    }

    fn sweep(&self, max_idle_secs: u64) -> StoreResult<usize> {
        let now = Utc::now();
        let mut records = self.records();
        let before = records.len();
        records.retain(|_, record| record.idle_secs(now) <= max_idle_secs as i64);
        Ok(before - records.len())
    }
}
