//! Topic registry.
//!
//! A derived view of the backend-held session list. The list is rebuilt
//! wholesale on each refresh, never incrementally patched, and keeps
//! whatever order the backend returned.

use std::sync::Arc;

use tokio::sync::RwLock;

use relaycast_core::backend::AgentBackend;
use relaycast_core::error::Result;
use relaycast_core::topic::Topic;

/// Read-mostly projection of backend sessions into user-facing topics.
///
/// The orchestrator refreshes it on restore and whenever the current
/// session id rebinds to a non-null value, not on every timeline
/// mutation.
pub struct TopicRegistry {
    backend: Arc<dyn AgentBackend>,
    topics: RwLock<Vec<Topic>>,
}

impl TopicRegistry {
    pub fn new(backend: Arc<dyn AgentBackend>) -> Self {
        Self {
            backend,
            topics: RwLock::new(Vec::new()),
        }
    }

    /// Rebuilds the topic list from the backend session list.
    ///
    /// On failure the previous snapshot is left intact.
    pub async fn refresh(&self) -> Result<()> {
        let records = self.backend.list_sessions().await?;
        let rebuilt: Vec<Topic> = records.iter().map(Topic::from_record).collect();

        let mut topics = self.topics.write().await;
        *topics = rebuilt;
        tracing::debug!(count = topics.len(), "topic registry refreshed");

        Ok(())
    }

    /// Returns a snapshot of the current topic list.
    pub async fn topics(&self) -> Vec<Topic> {
        self.topics.read().await.clone()
    }

    /// Drops a topic locally after a confirmed backend deletion.
    pub(crate) async fn remove(&self, topic_id: &str) {
        let mut topics = self.topics.write().await;
        topics.retain(|topic| topic.id != topic_id);
    }
}
