use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Storage key for the bearer token.
pub const TOKEN_KEY: &str = "token";

/// Storage key for the serialized user profile.
pub const USER_INFO_KEY: &str = "userInfo";

/// Session file name in the cache directory
const SESSION_FILE: &str = "session.json";

#[derive(Error, Debug)]
#[error("session store: {0}")]
pub struct StoreError(pub String);

/// Persistent key/value store for session entries.
///
/// Entries survive process restarts in the file-backed implementation.
/// Implementations must tolerate concurrent access from in-flight
/// requests; removing an absent key is a no-op.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// On-disk session file layout.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(default)]
    entries: HashMap<String, String>,
    saved_at: Option<DateTime<Utc>>,
}

/// Session store persisted as JSON in the cache directory.
/// Every mutation is flushed to disk so a restart resumes the session.
pub struct FileSessionStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileSessionStore {
    /// Open (or create) the session file under `cache_dir`.
    pub fn open(cache_dir: PathBuf) -> Result<Self, StoreError> {
        let path = cache_dir.join(SESSION_FILE);
        let entries = if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| StoreError(format!("failed to read session file: {}", e)))?;
            serde_json::from_str::<SessionFile>(&contents)
                .map_err(|e| StoreError(format!("failed to parse session file: {}", e)))?
                .entries
        } else {
            HashMap::new()
        };
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    fn flush(&self, entries: &HashMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError(format!("failed to create session directory: {}", e)))?;
        }
        let file = SessionFile {
            entries: entries.clone(),
            saved_at: Some(Utc::now()),
        };
        let contents = serde_json::to_string_pretty(&file)
            .map_err(|e| StoreError(format!("failed to serialize session: {}", e)))?;
        std::fs::write(&self.path, contents)
            .map_err(|e| StoreError(format!("failed to write session file: {}", e)))
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StoreError> {
        self.entries
            .lock()
            .map_err(|_| StoreError("session store lock poisoned".to_string()))
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.lock()?;
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.lock()?;
        if entries.remove(key).is_some() {
            self.flush(&entries)?;
        }
        Ok(())
    }
}

/// In-memory session store for tests and embedded use.
#[derive(Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StoreError> {
        self.entries
            .lock()
            .map_err(|_| StoreError("session store lock poisoned".to_string()))
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.lock()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let store = MemorySessionStore::new();
        assert!(store.get(TOKEN_KEY).unwrap().is_none());

        store.set(TOKEN_KEY, "abc123").unwrap();
        assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("abc123"));

        store.remove(TOKEN_KEY).unwrap();
        assert!(store.get(TOKEN_KEY).unwrap().is_none());
    }

    #[test]
    fn removing_absent_key_is_noop() {
        let store = MemorySessionStore::new();
        store.remove(USER_INFO_KEY).unwrap();
        assert!(store.get(USER_INFO_KEY).unwrap().is_none());
    }

    #[test]
    fn file_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();

        let store = FileSessionStore::open(dir.path().to_path_buf()).unwrap();
        store.set(TOKEN_KEY, "abc123").unwrap();
        store.set(USER_INFO_KEY, r#"{"id":1}"#).unwrap();
        drop(store);

        let reopened = FileSessionStore::open(dir.path().to_path_buf()).unwrap();
        assert_eq!(reopened.get(TOKEN_KEY).unwrap().as_deref(), Some("abc123"));
        assert_eq!(
            reopened.get(USER_INFO_KEY).unwrap().as_deref(),
            Some(r#"{"id":1}"#)
        );
    }

    #[test]
    fn file_store_remove_reaches_disk() {
        let dir = tempfile::tempdir().unwrap();

        let store = FileSessionStore::open(dir.path().to_path_buf()).unwrap();
        store.set(TOKEN_KEY, "abc123").unwrap();
        store.remove(TOKEN_KEY).unwrap();
        drop(store);

        let reopened = FileSessionStore::open(dir.path().to_path_buf()).unwrap();
        assert!(reopened.get(TOKEN_KEY).unwrap().is_none());
    }
}
