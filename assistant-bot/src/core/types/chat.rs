//! Chat identity type for core messages.

use serde::{Deserialize, Serialize};

/// Chat identity. Its id is also the conversation key in chat scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    /// `private` or `group`
    pub chat_type: String,
}

impl Chat {
    pub fn is_private(&self) -> bool {
        self.chat_type == "private"
    }
}
