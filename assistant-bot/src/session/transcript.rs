//! Ordered list of chat turns that always starts with the system turn.

use prompt::{ChatMessage, MessageRole};

/// Transcript replayed in full on every chat-completion request.
///
/// The first element is the system turn and is never removed.
#[derive(Debug, Clone)]
pub struct ChatTranscript {
    turns: Vec<ChatMessage>,
}

impl ChatTranscript {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            turns: vec![ChatMessage::system(system_prompt)],
        }
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.turns.push(ChatMessage::user(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.turns.push(ChatMessage::assistant(content));
    }

    /// Removes the last turn unless it is the system turn.
    pub fn pop(&mut self) -> Option<ChatMessage> {
        if self.turns.len() > 1 {
            self.turns.pop()
        } else {
            None
        }
    }

    /// Truncates back to the system turn.
    pub fn reset(&mut self) {
        self.turns.truncate(1);
    }

    /// Drops the oldest non-system turns until at most `max_turns` of them remain.
    /// The cut never leaves an assistant turn directly after the system turn, so a bound
    /// below 2 clears every exchange; config rejects such windows.
    pub fn trim_to(&mut self, max_turns: usize) {
        let non_system = self.turns.len() - 1;
        if non_system <= max_turns {
            return;
        }
        let mut cut = non_system - max_turns;
        while cut < non_system && self.turns[1 + cut].role == MessageRole::Assistant {
            cut += 1;
        }
        self.turns.drain(1..1 + cut);
    }

    pub fn turns(&self) -> &[ChatMessage] {
        &self.turns
    }

    pub fn system(&self) -> &ChatMessage {
        &self.turns[0]
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// True when only the system turn is present.
    pub fn is_empty(&self) -> bool {
        self.turns.len() == 1
    }
}
