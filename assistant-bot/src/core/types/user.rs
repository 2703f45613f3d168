//! User identity type for core messages.

use serde::{Deserialize, Serialize};

/// User identity (id, username, names, client language).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// IETF language tag reported by the client (e.g. `en`, `pt-br`).
    pub language_code: Option<String>,
}

impl User {
    /// First and last name joined by a space; falls back to the username, then "there".
    pub fn full_name(&self) -> String {
        let name = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if !name.is_empty() {
            return name;
        }
        self.username
            .clone()
            .unwrap_or_else(|| "there".to_string())
    }
}
