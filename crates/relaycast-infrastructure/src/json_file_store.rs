//! File-backed key/value store with atomic writes.
//!
//! Backs the durable preference surface. The whole store is a single JSON
//! object on disk; entries are cached in memory and every write is
//! mirrored back through an atomic temp-file + rename save.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write as IoWrite;
use std::path::PathBuf;
use std::sync::Mutex;

use relaycast_core::store::KvStore;

/// A durable [`KvStore`] persisted as one JSON file.
///
/// Guarantees:
/// - **Atomicity**: saves go through a temp file and an atomic rename
/// - **Durability**: explicit fsync before the rename
/// - **Corruption tolerance**: an unreadable or malformed file is logged
///   and treated as empty; it is overwritten by the next write
///
/// `write_raw` never fails the caller: I/O errors are logged and dropped,
/// leaving the in-memory entry in place so the session keeps working.
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl JsonFileStore {
    /// Opens the store at `path`, loading any existing entries.
    pub fn new(path: PathBuf) -> Self {
        let entries = Self::load(&path);
        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    fn load(path: &PathBuf) -> HashMap<String, String> {
        if !path.exists() {
            return HashMap::new();
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read store file, starting empty");
                return HashMap::new();
            }
        };

        if content.trim().is_empty() {
            return HashMap::new();
        }

        match serde_json::from_str(&content) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "store file is corrupt, starting empty");
                HashMap::new()
            }
        }
    }

    /// Saves a snapshot atomically via temp file + rename.
    fn save(&self, snapshot: &HashMap<String, String>) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(snapshot)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        let tmp_path = self.temp_path();
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(json.as_bytes())?;

        // Ensure data is on disk before the rename makes it visible
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "store".to_string());
        self.path.with_file_name(format!(".{}.tmp", file_name))
    }
}

impl KvStore for JsonFileStore {
    fn read_raw(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn write_raw(&self, key: &str, value: &str) {
        let snapshot = {
            let mut entries = self.entries.lock().unwrap();
            entries.insert(key.to_string(), value.to_string());
            entries.clone()
        };

        if let Err(e) = self.save(&snapshot) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to persist store file");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relaycast_core::store::KvStoreExt;
    use tempfile::TempDir;

    #[test]
    fn test_round_trip_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("prefs.json");

        let store = JsonFileStore::new(path.clone());
        store.write("provider", &"anthropic".to_string());

        let reopened = JsonFileStore::new(path);
        assert_eq!(
            reopened.read("provider", String::new()),
            "anthropic".to_string()
        );
    }

    #[test]
    fn test_missing_file_starts_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path().join("absent.json"));
        assert!(store.read_raw("anything").is_none());
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("prefs.json");
        fs::write(&path, "{{{ definitely not json").unwrap();

        let store = JsonFileStore::new(path.clone());
        assert!(store.read_raw("provider").is_none());

        // The next write replaces the corrupt file with valid content
        store.write_raw("provider", "\"ollama\"");
        let reopened = JsonFileStore::new(path);
        assert_eq!(reopened.read_raw("provider").as_deref(), Some("\"ollama\""));
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("prefs.json");

        let store = JsonFileStore::new(path.clone());
        store.write_raw("k", "\"v\"");

        assert!(path.exists());
        assert!(!temp_dir.path().join(".prefs.json.tmp").exists());
    }

    #[test]
    fn test_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("prefs.json");

        let store = JsonFileStore::new(path.clone());
        store.write_raw("k", "\"v\"");

        assert!(path.exists());
    }
}
