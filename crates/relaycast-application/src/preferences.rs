//! Durable user preference accessors.

use std::sync::Arc;

use relaycast_core::session::ProviderType;
use relaycast_core::store::{keys, KvStore, KvStoreExt};

/// Provider and model selection over the durable store.
///
/// Preference fields persist independently of session lifecycle: changing
/// them never implicitly destroys the active session. Corrupt stored
/// values degrade to the default provider / no model override.
#[derive(Clone)]
pub struct Preferences {
    store: Arc<dyn KvStore>,
}

impl Preferences {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Returns the selected provider, defaulting when unset.
    pub fn provider(&self) -> ProviderType {
        self.store
            .read(keys::PREFERENCE_PROVIDER, ProviderType::default())
    }

    pub fn set_provider(&self, provider: ProviderType) {
        self.store.write(keys::PREFERENCE_PROVIDER, &provider);
    }

    /// Returns the selected model override, if any.
    pub fn model(&self) -> Option<String> {
        self.store.read(keys::PREFERENCE_MODEL, None)
    }

    pub fn set_model(&self, model: Option<String>) {
        self.store.write(keys::PREFERENCE_MODEL, &model);
    }
}
