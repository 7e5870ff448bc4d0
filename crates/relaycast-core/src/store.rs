//! Key/value store abstraction.
//!
//! Two independent text-keyed surfaces share this shape: a durable store
//! for user preferences (survives restarts) and a transient store scoped
//! to the current UI lifetime (active session id, message timeline).
//!
//! Both surfaces are fully tolerant of corrupt or missing underlying
//! storage: malformed stored data is treated as absent and logged, never
//! surfaced to the caller. Writes are fire-and-forget side effects and
//! must never fail the primary operation.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Well-known store keys.
pub mod keys {
    /// Durable: selected provider
    pub const PREFERENCE_PROVIDER: &str = "preference-provider";
    /// Durable: selected model
    pub const PREFERENCE_MODEL: &str = "preference-model";
    /// Transient: currently bound session id
    pub const TRANSIENT_CURRENT_SESSION_ID: &str = "transient-current-session-id";
    /// Transient: JSON-serialized message timeline
    pub const TRANSIENT_MESSAGE_LIST: &str = "transient-message-list";
}

/// A text-keyed store of JSON-encoded values.
///
/// Implementations own durability and error swallowing: `write_raw` has no
/// failure channel by contract, so an implementation logs and drops I/O
/// errors instead of propagating them.
pub trait KvStore: Send + Sync {
    /// Returns the raw stored text for `key`, if present.
    fn read_raw(&self, key: &str) -> Option<String>;

    /// Stores raw text under `key`, overwriting any previous value.
    fn write_raw(&self, key: &str, value: &str);
}

/// Typed read/write helpers over any [`KvStore`].
///
/// `read` falls back to the provided default whenever the key is absent or
/// the stored value fails to deserialize; the corrupt value is logged and
/// left in place until the next write.
pub trait KvStoreExt {
    fn read<T: DeserializeOwned>(&self, key: &str, default: T) -> T;
    fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T);
}

impl<S: KvStore + ?Sized> KvStoreExt for S {
    fn read<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.read_raw(key) {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(e) => {
                    tracing::warn!(key, error = %e, "discarding corrupt stored value");
                    default
                }
            },
            None => default,
        }
    }

    fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(raw) => self.write_raw(key, &raw),
            Err(e) => tracing::warn!(key, error = %e, "failed to serialize value for store"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct MapStore {
        entries: Mutex<HashMap<String, String>>,
    }

    impl MapStore {
        fn new() -> Self {
            Self {
                entries: Mutex::new(HashMap::new()),
            }
        }
    }

    impl KvStore for MapStore {
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

    #[test]
    fn test_typed_round_trip() {
        let store = MapStore::new();
        store.write("answer", &42u32);
        assert_eq!(store.read("answer", 0u32), 42);
    }

    #[test]
    fn test_missing_key_falls_back_to_default() {
        let store = MapStore::new();
        assert_eq!(store.read("absent", 7u32), 7);
    }

    #[test]
    fn test_corrupt_value_falls_back_to_default() {
        let store = MapStore::new();
        store.write_raw("broken", "{not json");
        assert_eq!(store.read("broken", "fallback".to_string()), "fallback");
    }

    #[test]
    fn test_works_through_dyn_store() {
        let store: Box<dyn KvStore> = Box::new(MapStore::new());
        store.write("k", &Some("v".to_string()));
        assert_eq!(
            store.read::<Option<String>>("k", None),
            Some("v".to_string())
        );
    }
}
