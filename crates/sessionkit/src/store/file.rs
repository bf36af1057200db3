//! File-based session store: one JSON document per session.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, info, warn};

use super::{SessionRecord, SessionStore};
use crate::error::{StoreError, StoreResult};

const FILE_PREFIX: &str = "sess_";
const FILE_SUFFIX: &str = ".json";

/// Stores each session as `sess_<id>.json` under a root directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        if !root.exists() {
            info!("creating session directory: {}", root.display());
            fs::create_dir_all(&root)?;
        }
        Ok(Self { root })
    }

    /// Root directory holding the session files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_path(&self, id: &str) -> StoreResult<PathBuf> {
        validate_id(id)?;
        Ok(self.root.join(format!("{FILE_PREFIX}{id}{FILE_SUFFIX}")))
    }
}

/// Identifiers are restricted to `[A-Za-z0-9,-]` so an id can never name a
/// path outside the store root.
fn validate_id(id: &str) -> StoreResult<()> {
    if id.is_empty() {
        return Err(StoreError::InvalidId {
            id: id.to_string(),
            reason: "empty",
        });
    }
    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == ',' || c == '-')
    {
        return Err(StoreError::InvalidId {
            id: id.to_string(),
            reason: "allowed characters are [A-Za-z0-9,-]",
        });
    }
    Ok(())
}

impl SessionStore for FileStore {
    fn load(&self, id: &str) -> StoreResult<Option<SessionRecord>> {
        let path = self.record_path(id)?;
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let record = serde_json::from_slice(&bytes)?;
        Ok(Some(record))
    }

    fn save(&self, id: &str, record: &SessionRecord) -> StoreResult<()> {
        let path = self.record_path(id)?;
        fs::write(&path, serde_json::to_vec(record)?)?;
        debug!("saved session file: {}", path.display());
        Ok(())
    }

    fn delete(&self, id: &str) -> StoreResult<()> {
        let path = self.record_path(id)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn sweep(&self, max_idle_secs: u64) -> StoreResult<usize> {
        let now = Utc::now();
        let mut removed = 0;
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if !name.starts_with(FILE_PREFIX) || !name.ends_with(FILE_SUFFIX) {
                continue;
            }

            let path = entry.path();
            let expired = match fs::read(&path) {
                Ok(bytes) => match serde_json::from_slice::<SessionRecord>(&bytes) {
                    Ok(record) => record.idle_secs(now) > max_idle_secs as i64,
                    Err(e) => {
                        // Unreadable records are collected too.
                        warn!("corrupt session file {}: {e}", path.display());
                        true
                    }
                },
                Err(e) => {
                    warn!("unreadable session file {}: {e}", path.display());
                    continue;
                }
            };

            if expired && fs::remove_file(&path).is_ok() {
                removed += 1;
            }
        }
        if removed > 0 {
            info!("swept {removed} expired session(s)");
        }
        Ok(removed)
    }
}
