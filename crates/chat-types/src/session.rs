use serde::{Deserialize, Serialize};
use crate::message::{Message, Role};

/// Title length before truncation
const TITLE_MAX: usize = 50;

/// An archived conversation, created when a non-empty chat is cleared.
/// Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: String,
    /// Truncated first user message, or "New Chat"
    pub title: String,
    pub messages: Vec<Message>,
    pub generated_code: String,
    /// RFC 3339 archive time
    pub timestamp: String,
}

impl ChatSession {
    /// Snapshot a transcript into an archive entry. `id` falls back to a
    /// fresh v4 UUID when the conversation never obtained a server id.
    pub fn snapshot(
        id: Option<String>,
        messages: Vec<Message>,
        generated_code: String,
    ) -> Self {
        let title = messages
            .iter()
            .find(|m| m.role == Role::User)
            .map(|m| truncate_title(&m.content))
            .unwrap_or_else(|| "New Chat".to_string());

        Self {
            id: id.unwrap_or_else(|| format!("session-{}", uuid::Uuid::new_v4())),
            title,
            messages,
            generated_code,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

fn truncate_title(content: &str) -> String {
    if content.chars().count() > TITLE_MAX {
        let head: String = content.chars().take(TITLE_MAX).collect();
        format!("{}...", head)
    } else {
        content.to_string()
    }
}

/// Bounded, newest-first list of archived sessions. Pushing past the cap
/// evicts the oldest entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatHistory {
    entries: Vec<ChatSession>,
    cap: usize,
}

impl ChatHistory {
    pub fn new(cap: usize) -> Self {
        Self {
            entries: Vec::new(),
            cap,
        }
    }

    pub fn push(&mut self, session: ChatSession) {
        self.entries.insert(0, session);
        self.entries.truncate(self.cap);
    }

    pub fn get(&self, index: usize) -> Option<&ChatSession> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChatSession> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }
}

impl Default for ChatHistory {
    fn default() -> Self {
        Self::new(20)
    }
}
