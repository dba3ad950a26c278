use serde::{Deserialize, Serialize};

/// Role in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single message in a conversation.
///
/// Messages are immutable once appended, with one exception: the assistant
/// message currently receiving a streamed response grows by repeated
/// content appends until its cycle terminates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    /// RFC 3339 creation time; empty when the backend omits one
    #[serde(default)]
    pub timestamp: String,
    /// Set when the message carries an error notice rather than a reply
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_error: bool,
}

fn is_false(b: &bool) -> bool {
    !b
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: text.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            is_error: false,
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: text.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            is_error: false,
        }
    }

    /// An assistant-role message flagged as an error notice
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: text.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            is_error: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}
