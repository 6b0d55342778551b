use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::MessageRole;

/// One entry in a chat transcript.
///
/// Unlike the CRUD records, ids are client-generated (the transcript never
/// leaves the session) and messages are append-only: never mutated, never
/// deleted, strictly ordered by creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(id: String, content: impl Into<String>) -> Self {
        Self {
            id,
            role: MessageRole::User,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn assistant(id: String, content: impl Into<String>) -> Self {
        Self {
            id,
            role: MessageRole::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}
