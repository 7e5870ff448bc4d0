//! Conversation message domain model.
//!
//! This module contains the timeline `Message` entity and its lifecycle
//! helpers. A user message is created once and never mutated; an assistant
//! message starts as a thinking placeholder and is resolved in place
//! exactly once when the final response arrives.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of a message author in the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    User,
    Assistant,
}

/// An inline image attached to a user message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAttachment {
    /// Base64-encoded image bytes
    pub data: String,
    /// MIME type, e.g. "image/png"
    pub media_type: String,
}

/// A single entry in the conversation timeline.
///
/// Ordering in the timeline is insertion order and is never re-sorted.
/// The `id` is stable for the lifetime of the message; the UI replaces
/// content by id, never by position, so a resolved placeholder keeps its
/// identity and does not remount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique message identifier (UUID format)
    pub id: String,
    /// Author role
    pub role: MessageRole,
    /// Message text; empty while a placeholder is waiting
    pub content: String,
    /// Attached images, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<ImageAttachment>>,
    /// Creation instant, serialized as RFC 3339 text
    pub timestamp: DateTime<Utc>,
    /// True while the assistant response is still pending
    #[serde(default)]
    pub is_thinking: bool,
    /// Waiting label shown while `is_thinking` is true
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thinking_label: Option<String>,
}

impl Message {
    /// Creates a user message from submitted content.
    pub fn user(content: impl Into<String>, images: Option<Vec<ImageAttachment>>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: MessageRole::User,
            content: content.into(),
            images,
            timestamp: Utc::now(),
            is_thinking: false,
            thinking_label: None,
        }
    }

    /// Creates an assistant placeholder inserted ahead of the real response.
    ///
    /// The waiting label encodes which of web-search / extended-thinking
    /// modes were requested for the pending send.
    pub fn placeholder(web_search: bool, thinking: bool) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: MessageRole::Assistant,
            content: String::new(),
            images: None,
            timestamp: Utc::now(),
            is_thinking: true,
            thinking_label: Some(waiting_label(web_search, thinking).to_string()),
        }
    }

    /// Attaches the final response content to a placeholder.
    ///
    /// This is the single permitted mutation of an assistant message: it
    /// clears the thinking state and label while preserving the id.
    pub fn resolve(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.is_thinking = false;
        self.thinking_label = None;
    }
}

/// Synthesizes the waiting label for a pending assistant placeholder.
fn waiting_label(web_search: bool, thinking: bool) -> &'static str {
    match (thinking, web_search) {
        (true, true) => "Thinking and searching the web...",
        (true, false) => "Thinking...",
        (false, true) => "Searching the web...",
        (false, false) => "Waiting for response...",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_user_message() {
        let msg = Message::user("hello", None);
        assert_eq!(msg.role, MessageRole::User);
        assert_eq!(msg.content, "hello");
        assert!(!msg.is_thinking);
        assert!(msg.thinking_label.is_none());
        assert!(!msg.id.is_empty());
    }

    #[test]
    fn test_placeholder_labels() {
        assert_eq!(
            Message::placeholder(false, false).thinking_label.as_deref(),
            Some("Waiting for response...")
        );
        assert_eq!(
            Message::placeholder(true, false).thinking_label.as_deref(),
            Some("Searching the web...")
        );
        assert_eq!(
            Message::placeholder(false, true).thinking_label.as_deref(),
            Some("Thinking...")
        );
        assert_eq!(
            Message::placeholder(true, true).thinking_label.as_deref(),
            Some("Thinking and searching the web...")
        );
    }

    #[test]
    fn test_resolve_preserves_id() {
        let mut msg = Message::placeholder(false, false);
        let id = msg.id.clone();
        assert!(msg.is_thinking);

        msg.resolve("final answer");

        assert_eq!(msg.id, id);
        assert_eq!(msg.content, "final answer");
        assert!(!msg.is_thinking);
        assert!(msg.thinking_label.is_none());
    }

    #[test]
    fn test_timestamp_round_trip() {
        // Stored messages serialize instants as RFC 3339 text and must
        // reconstitute them as proper instants on load.
        let ts = Utc.with_ymd_and_hms(2024, 5, 17, 9, 30, 0).unwrap();
        let msg = Message {
            id: "a".to_string(),
            role: MessageRole::User,
            content: "hi".to_string(),
            images: None,
            timestamp: ts,
            is_thinking: false,
            thinking_label: None,
        };

        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("2024-05-17T09:30:00Z"));

        let loaded: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.timestamp, ts);
        assert_eq!(loaded, msg);
    }

    #[test]
    fn test_images_serialize_with_media_type() {
        let msg = Message::user(
            "look",
            Some(vec![ImageAttachment {
                data: "aGVsbG8=".to_string(),
                media_type: "image/png".to_string(),
            }]),
        );
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"mediaType\":\"image/png\""));
    }
}
