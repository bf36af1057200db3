//! Session persistence: the store seam and the shipped backends.

pub mod file;
pub mod memory;

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StoreResult;

pub use file::FileStore;
pub use memory::MemoryStore;

/// One session's persisted state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Key-value data owned by the session.
    pub values: HashMap<String, Value>,
    /// When the session was first created.
    pub created: DateTime<Utc>,
    /// Last time the record was written back.
    pub touched: DateTime<Utc>,
}

impl SessionRecord {
    /// Fresh, empty record stamped with the current time.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            values: HashMap::new(),
            created: now,
            touched: now,
        }
    }

    /// Seconds since the record was last written back, as of `now`.
    pub fn idle_secs(&self, now: DateTime<Utc>) -> i64 {
        (now - self.touched).num_seconds()
    }
}

impl Default for SessionRecord {
    fn default() -> Self {
        Self::new()
    }
}

/// Persistence seam between the facade and a storage backend.
///
/// Implementations own durability, cross-request locking, and expiry. The
/// facade issues at most one store call per operation and never retries;
/// a failed call is logged and degraded at the facade layer.
pub trait SessionStore: Send + Sync {
    /// Fetch the record for `id`, if one exists.
    fn load(&self, id: &str) -> StoreResult<Option<SessionRecord>>;

    /// Write the record for `id`, creating or replacing it.
    fn save(&self, id: &str, record: &SessionRecord) -> StoreResult<()>;

    /// Remove the record for `id`. Removing an absent record is not an
    /// error.
    fn delete(&self, id: &str) -> StoreResult<()>;

    /// Garbage-collect records that have been idle for longer than
    /// `max_idle_secs`. Returns how many records were removed.
    fn sweep(&self, max_idle_secs: u64) -> StoreResult<usize>;
}
