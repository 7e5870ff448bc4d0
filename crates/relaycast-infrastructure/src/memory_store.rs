//! In-memory key/value store.
//!
//! Backs the transient surface: state scoped to the current UI lifetime
//! (active session id, message timeline). Nothing survives the process.

use std::collections::HashMap;
use std::sync::Mutex;

use relaycast_core::store::KvStore;

/// A transient [`KvStore`] held entirely in memory.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn read_raw(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn write_raw(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relaycast_core::store::KvStoreExt;

    #[test]
    fn test_read_write() {
        let store = MemoryStore::new();
        assert!(store.read_raw("k").is_none());
        store.write("k", &1u8);
        assert_eq!(store.read("k", 0u8), 1);
    }

    #[test]
    fn test_overwrite() {
        let store = MemoryStore::new();
        store.write_raw("k", "\"a\"");
        store.write_raw("k", "\"b\"");
        assert_eq!(store.read_raw("k").as_deref(), Some("\"b\""));
    }
}
