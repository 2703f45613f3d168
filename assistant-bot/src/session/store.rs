//! Per-conversation sessions keyed by chat id.

use dashmap::DashMap;
use llm_client::LlmClient;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

use super::conversation::ConversationSession;

/// Key used for every chat in [`SessionScope::Shared`].
pub const SHARED_SESSION_KEY: i64 = 0;

/// How chats map to sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionScope {
    /// One session per chat.
    #[default]
    Chat,
    /// All chats share one session.
    Shared,
}

impl FromStr for SessionScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chat" => Ok(SessionScope::Chat),
            "shared" => Ok(SessionScope::Shared),
            other => Err(format!("unknown session scope '{}'", other)),
        }
    }
}

/// Settings every new session is created with.
#[derive(Clone)]
pub struct SessionFactory {
    pub llm_client: Arc<dyn LlmClient>,
    pub system_prompt: String,
    pub max_turns: Option<usize>,
}

impl SessionFactory {
    fn create(&self) -> ConversationSession {
        ConversationSession::new(self.llm_client.clone(), self.system_prompt.clone())
            .with_max_turns(self.max_turns)
    }
}

/// Concurrent map of sessions. Each session sits behind its own async mutex, held across
/// the chat-completion call, so one conversation handles one request at a time.
pub struct SessionStore {
    sessions: DashMap<i64, Arc<Mutex<ConversationSession>>>,
    factory: SessionFactory,
    scope: SessionScope,
}

impl SessionStore {
    pub fn new(factory: SessionFactory, scope: SessionScope) -> Self {
        Self {
            sessions: DashMap::new(),
            factory,
            scope,
        }
    }

    pub fn scope(&self) -> SessionScope {
        self.scope
    }

    /// Session key for a chat under the configured scope.
    pub fn key_for(&self, chat_id: i64) -> i64 {
        match self.scope {
            SessionScope::Chat => chat_id,
            SessionScope::Shared => SHARED_SESSION_KEY,
        }
    }

    /// Returns the chat's session, creating it on first use.
    pub fn session(&self, chat_id: i64) -> Arc<Mutex<ConversationSession>> {
        let key = self.key_for(chat_id);
        self.sessions
            .entry(key)
            .or_insert_with(|| {
                debug!(chat_id, key, "Creating conversation session");
                Arc::new(Mutex::new(self.factory.create()))
            })
            .value()
            .clone()
    }

    /// Resets the chat's session if one exists. Returns whether one did.
    pub async fn reset(&self, chat_id: i64) -> bool {
        let key = self.key_for(chat_id);
        let session = self.sessions.get(&key).map(|s| s.value().clone());
        match session {
            Some(session) => {
                session.lock().await.reset();
                true
            }
            None => false,
        }
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
