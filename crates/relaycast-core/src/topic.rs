//! Topic domain model.
//!
//! A topic is the user-facing label for a backend conversation. The topic
//! list is a read-mostly projection of backend session records, rebuilt
//! wholesale on each registry refresh.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::backend::SessionRecord;

/// Title used for a conversation that has no messages yet.
pub const UNTITLED_TOPIC: &str = "New conversation";

/// A user-facing conversation entry derived from a backend session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    /// Equals the backend session id
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub message_count: u64,
}

impl Topic {
    /// Projects a backend session record into a topic.
    ///
    /// An empty session is labeled as a fresh topic; otherwise the title
    /// is synthesized from the creation timestamp.
    pub fn from_record(record: &SessionRecord) -> Self {
        let title = if record.message_count == 0 {
            UNTITLED_TOPIC.to_string()
        } else {
            record.created_at.format("%b %e, %Y %H:%M").to_string()
        };

        Self {
            id: record.session_id.clone(),
            title,
            created_at: record.created_at,
            message_count: record.message_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::ProviderType;
    use chrono::TimeZone;

    fn record(message_count: u64) -> SessionRecord {
        SessionRecord {
            session_id: "s1".to_string(),
            provider_type: ProviderType::Anthropic,
            model: None,
            created_at: Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap(),
            last_activity: Utc.with_ymd_and_hms(2024, 3, 9, 15, 0, 0).unwrap(),
            message_count,
        }
    }

    #[test]
    fn test_empty_session_is_untitled() {
        let topic = Topic::from_record(&record(0));
        assert_eq!(topic.title, UNTITLED_TOPIC);
        assert_eq!(topic.id, "s1");
    }

    #[test]
    fn test_title_from_creation_timestamp() {
        let topic = Topic::from_record(&record(4));
        assert_eq!(topic.title, "Mar  9, 2024 14:05");
        assert_eq!(topic.message_count, 4);
    }
}
