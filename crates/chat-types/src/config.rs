use serde::{Deserialize, Serialize};

/// Top-level client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Base URL of the backend API, e.g. `/api/v1`
    pub api_base: String,
    /// Which streaming endpoint to drive
    pub endpoint: StreamEndpoint,
    /// Maximum number of archived sessions kept in history
    pub history_cap: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_base: "/api/v1".to_string(),
            endpoint: StreamEndpoint::Prompt,
            history_cap: 20,
        }
    }
}

/// The two wire-compatible streaming endpoints exposed by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StreamEndpoint {
    /// `POST {base}/stream` — carries the prompt plus prior message history
    Prompt,
    /// `POST {base}/chat/stream` — carries the prompt plus a server-side
    /// session id; history lives on the server
    Session,
}

impl StreamEndpoint {
    pub fn path(&self) -> &'static str {
        match self {
            StreamEndpoint::Prompt => "/stream",
            StreamEndpoint::Session => "/chat/stream",
        }
    }

    pub fn all() -> &'static [StreamEndpoint] {
        &[StreamEndpoint::Prompt, StreamEndpoint::Session]
    }

    pub fn label(&self) -> &'static str {
        match self {
            StreamEndpoint::Prompt => "Stateless (/stream)",
            StreamEndpoint::Session => "Server session (/chat/stream)",
        }
    }
}
