//! # Conversation sessions
//!
//! [`ConversationSession`] owns one transcript and mediates every chat-completion call for it.
//! [`SessionStore`] hands out one session per conversation key, created on first use.

mod conversation;
mod store;
mod transcript;

pub use conversation::ConversationSession;
pub use store::{SessionFactory, SessionScope, SessionStore, SHARED_SESSION_KEY};
pub use transcript::ChatTranscript;
