//! Chat session orchestrator.
//!
//! The state machine behind the conversation UI. It owns session-id
//! selection, lazy session creation, optimistic send/receive sequencing,
//! and the reconciliation between three independent lifetimes: durable
//! preferences, the transient UI-lifetime state, and the backend-held
//! session records.
//!
//! States: `Idle` (no session id), `Active` (session id bound, backend
//! presumed to hold a matching record), and transiently `Sending` while a
//! send is in flight. Every mutation mirrors the session id and timeline
//! into the transient store before returning (write-through, not
//! write-back).

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{error, info};

use relaycast_core::backend::{
    AgentBackend, CreateSessionRequest, ProcessStatus, SendMessageRequest,
};
use relaycast_core::error::{RelaycastError, Result};
use relaycast_core::message::{ImageAttachment, Message};
use relaycast_core::notify::Notifier;
use relaycast_core::store::{keys, KvStore, KvStoreExt};

use crate::preferences::Preferences;
use crate::topic_registry::TopicRegistry;
use relaycast_infrastructure::{JsonFileStore, MemoryStore, RelaycastPaths};

/// In-memory orchestrator state: the bound session id and the timeline.
#[derive(Default)]
struct TimelineState {
    /// At most one session id is current at any instant
    session_id: Option<String>,
    /// Ordered conversation timeline, insertion order, never re-sorted
    messages: Vec<Message>,
}

/// Orchestrates the active conversation against the agent backend.
///
/// `ChatOrchestrator` is responsible for:
/// - Lazy session creation on the first send after a clean state
/// - Optimistic timeline updates with in-place reconciliation by id
/// - Topic switching, deletion, and registry bookkeeping
/// - Write-through mirroring into the transient store
///
/// Failure semantics: every backend-facing operation catches failures at
/// this boundary, reports them through the notifier, and never retries
/// automatically.
pub struct ChatOrchestrator {
    backend: Arc<dyn AgentBackend>,
    transient: Arc<dyn KvStore>,
    notifier: Arc<dyn Notifier>,
    preferences: Preferences,
    topics: TopicRegistry,
    state: RwLock<TimelineState>,
    /// Single-flight guard: serializes the backend phase of overlapping
    /// sends so completions cannot interleave. The optimistic insert
    /// happens before acquiring it and stays immediate.
    send_guard: Mutex<()>,
}

impl ChatOrchestrator {
    /// Creates an orchestrator over injected stores and collaborators.
    ///
    /// # Arguments
    ///
    /// * `backend` - The agent backend interface
    /// * `durable` - Key/value store surviving restarts (preferences)
    /// * `transient` - Key/value store scoped to the UI lifetime
    /// * `notifier` - User-visible toast channel
    pub fn new(
        backend: Arc<dyn AgentBackend>,
        durable: Arc<dyn KvStore>,
        transient: Arc<dyn KvStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            backend: backend.clone(),
            transient,
            notifier,
            preferences: Preferences::new(durable),
            topics: TopicRegistry::new(backend),
            state: RwLock::new(TimelineState::default()),
            send_guard: Mutex::new(()),
        }
    }

    /// Creates an orchestrator over the default stores: durable
    /// preferences in the platform config directory and an in-memory
    /// transient surface.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be resolved.
    pub fn with_default_stores(
        backend: Arc<dyn AgentBackend>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        let durable = Arc::new(JsonFileStore::new(RelaycastPaths::preferences_file()?));
        let transient = Arc::new(MemoryStore::new());
        Ok(Self::new(backend, durable, transient, notifier))
    }

    /// Returns the durable preference accessors.
    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Returns the topic registry.
    pub fn topics(&self) -> &TopicRegistry {
        &self.topics
    }

    /// Returns a snapshot of the conversation timeline.
    pub async fn messages(&self) -> Vec<Message> {
        self.state.read().await.messages.clone()
    }

    /// Returns the currently bound session id, if any.
    pub async fn current_session_id(&self) -> Option<String> {
        self.state.read().await.session_id.clone()
    }

    /// Reloads the persisted session id and timeline from the transient
    /// store, reconstituting message timestamps as instants.
    pub async fn restore(&self) {
        let session_id: Option<String> = self
            .transient
            .read(keys::TRANSIENT_CURRENT_SESSION_ID, None);
        let messages: Vec<Message> = self.transient.read(keys::TRANSIENT_MESSAGE_LIST, Vec::new());

        let mut state = self.state.write().await;
        state.session_id = session_id;
        state.messages = messages;
        info!(
            restored = state.messages.len(),
            session_id = ?state.session_id,
            "transient state restored"
        );
        drop(state);

        self.refresh_topics().await;
    }

    /// Returns the bound session id, creating a backend session lazily.
    ///
    /// A cached id is returned unchanged without re-validation against the
    /// backend. When unset, a session is created from the current
    /// preference values; the returned id is bound and persisted.
    ///
    /// # Errors
    ///
    /// Returns `SessionEstablishment` if the backend create fails; the
    /// orchestrator stays `Idle` and the user is notified.
    pub async fn ensure_session(&self) -> Result<String> {
        if let Some(id) = self.state.read().await.session_id.clone() {
            return Ok(id);
        }

        let request = CreateSessionRequest {
            provider_type: self.preferences.provider(),
            model: self.preferences.model(),
            system_prompt: None,
            skills: None,
        };

        match self.backend.create_session(request).await {
            Ok(created) => {
                let mut state = self.state.write().await;
                state.session_id = Some(created.session_id.clone());
                self.persist(&state);
                info!(session_id = %created.session_id, provider = %created.provider_type, "session established");
                drop(state);

                self.refresh_topics().await;
                Ok(created.session_id)
            }
            Err(e) => {
                error!(error = %e, "session establishment failed");
                self.notifier
                    .error(&format!("Failed to create session: {}", e));
                Err(RelaycastError::SessionEstablishment(e.to_string()))
            }
        }
    }

    /// Sends a user message and resolves the assistant response.
    ///
    /// The user message and an assistant placeholder are appended to the
    /// timeline before any backend call, so the UI reflects the action
    /// immediately regardless of network latency. On success the
    /// placeholder is resolved in place by its stable id. On failure the
    /// placeholder (never the user message) is rolled back.
    ///
    /// # Errors
    ///
    /// - `SessionEstablishment` when no session id could be obtained
    /// - the backend error when message delivery fails
    pub async fn send_message(
        &self,
        content: impl Into<String>,
        images: Vec<ImageAttachment>,
        web_search: bool,
        thinking: bool,
    ) -> Result<String> {
        let content = content.into();
        let images = if images.is_empty() { None } else { Some(images) };

        let placeholder = Message::placeholder(web_search, thinking);
        let placeholder_id = placeholder.id.clone();
        {
            let mut state = self.state.write().await;
            state.messages.push(Message::user(content.clone(), images.clone()));
            state.messages.push(placeholder);
            self.persist(&state);
        }

        // Serialize the backend phase only; overlapping callers queue here
        // with their optimistic messages already visible.
        let _flight = self.send_guard.lock().await;

        let session_id = match self.ensure_session().await {
            Ok(id) => id,
            Err(e) => {
                self.remove_by_id(&placeholder_id).await;
                return Err(e);
            }
        };

        let request = SendMessageRequest {
            session_id: Some(session_id),
            message: content,
            images,
            model: self.preferences.model(),
            web_search,
            thinking,
        };

        match self.backend.send_message(request).await {
            Ok(text) => {
                let mut state = self.state.write().await;
                if let Some(message) = state
                    .messages
                    .iter_mut()
                    .find(|message| message.id == placeholder_id)
                {
                    message.resolve(text.clone());
                }
                self.persist(&state);
                Ok(text)
            }
            Err(e) => {
                self.remove_by_id(&placeholder_id).await;
                error!(error = %e, "message send failed");
                self.notifier
                    .error(&format!("Failed to send message: {}", e));
                Err(e)
            }
        }
    }

    /// Empties the timeline and unbinds the session, starting a new topic.
    ///
    /// The prior backend session record is left in place.
    pub async fn clear_messages(&self) {
        let mut state = self.state.write().await;
        state.messages.clear();
        state.session_id = None;
        self.persist(&state);
        info!("timeline cleared, orchestrator idle");
    }

    /// Rebinds the orchestrator to another topic.
    ///
    /// No-op when `topic_id` is already current. Otherwise the timeline is
    /// emptied: message history is not fetched from the backend, so
    /// switching is lossy for local display.
    pub async fn switch_topic(&self, topic_id: &str) {
        let mut state = self.state.write().await;
        if state.session_id.as_deref() == Some(topic_id) {
            return;
        }

        state.messages.clear();
        state.session_id = Some(topic_id.to_string());
        self.persist(&state);
        info!(topic_id, "switched topic");
        drop(state);

        self.refresh_topics().await;
    }

    /// Deletes a topic's backend session and updates local state.
    ///
    /// On success the topic is dropped from the registry and, if it was
    /// current, the orchestrator resets to `Idle` with an empty timeline.
    /// On failure the registry and session state are left unchanged.
    pub async fn delete_topic(&self, topic_id: &str) -> Result<()> {
        if let Err(e) = self.backend.delete_session(topic_id).await {
            error!(topic_id, error = %e, "topic deletion failed");
            self.notifier
                .error(&format!("Failed to delete conversation: {}", e));
            return Err(e);
        }

        self.topics.remove(topic_id).await;

        let mut state = self.state.write().await;
        if state.session_id.as_deref() == Some(topic_id) {
            state.messages.clear();
            state.session_id = None;
            self.persist(&state);
        }
        drop(state);

        self.notifier.success("Conversation deleted");
        Ok(())
    }

    /// Replaces the content of a timeline message. Local only; the backend
    /// has no per-message mutation endpoint.
    ///
    /// Returns false when no message with `id` exists.
    pub async fn edit_message(&self, id: &str, new_content: impl Into<String>) -> bool {
        let mut state = self.state.write().await;
        let Some(message) = state.messages.iter_mut().find(|message| message.id == id) else {
            return false;
        };
        message.content = new_content.into();
        self.persist(&state);
        true
    }

    /// Removes a timeline message. Local only.
    ///
    /// Returns false when no message with `id` exists.
    pub async fn delete_message(&self, id: &str) -> bool {
        let mut state = self.state.write().await;
        let before = state.messages.len();
        state.messages.retain(|message| message.id != id);
        if state.messages.len() == before {
            return false;
        }
        self.persist(&state);
        true
    }

    /// Starts the backend agent process.
    pub async fn start_process(&self) -> Result<ProcessStatus> {
        match self.backend.start_process().await {
            Ok(status) => {
                info!(running = status.running, port = ?status.port, "agent process started");
                Ok(status)
            }
            Err(e) => {
                error!(error = %e, "agent process start failed");
                self.notifier
                    .error(&format!("Failed to start agent process: {}", e));
                Err(e)
            }
        }
    }

    /// Stops the backend agent process and destroys the local session.
    pub async fn stop_process(&self) -> Result<()> {
        match self.backend.stop_process().await {
            Ok(()) => {
                let mut state = self.state.write().await;
                state.messages.clear();
                state.session_id = None;
                self.persist(&state);
                info!("agent process stopped");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "agent process stop failed");
                self.notifier
                    .error(&format!("Failed to stop agent process: {}", e));
                Err(e)
            }
        }
    }

    /// Queries the backend process lifecycle status.
    pub async fn process_status(&self) -> Result<ProcessStatus> {
        self.backend.process_status().await
    }

    /// Rebuilds the topic registry. Invoked on restore and after every
    /// rebind of the session id to a non-null value.
    ///
    /// Refresh failures notify and keep the previous snapshot; they never
    /// fail the operation that triggered the refresh.
    async fn refresh_topics(&self) {
        if let Err(e) = self.topics.refresh().await {
            error!(error = %e, "topic refresh failed");
            self.notifier
                .error(&format!("Failed to refresh conversations: {}", e));
        }
    }

    /// Removes a message by id and persists, used for placeholder rollback.
    async fn remove_by_id(&self, id: &str) {
        let mut state = self.state.write().await;
        state.messages.retain(|message| message.id != id);
        self.persist(&state);
    }

    /// Mirrors the session id and timeline into the transient store.
    ///
    /// Write failures are swallowed by the store contract; persistence
    /// never blocks or fails the primary operation.
    fn persist(&self, state: &TimelineState) {
        self.transient
            .write(keys::TRANSIENT_CURRENT_SESSION_ID, &state.session_id);
        self.transient
            .write(keys::TRANSIENT_MESSAGE_LIST, &state.messages);
    }
}
