//! Port traits — the hexagonal architecture boundary.
//!
//! Defined here in `chat-core` (pure Rust); implemented in
//! `chat-platform` (browser adapters). The core never imports platform
//! code, only these traits.

use std::pin::Pin;
use async_trait::async_trait;
use futures::Stream;
use chat_types::{message::Message, Result};

// ─── Stream transport ────────────────────────────────────────

/// One streaming request: the prompt plus whatever context the active
/// endpoint needs (prior history for the stateless endpoint, a server
/// session id for the session endpoint).
#[derive(Debug, Clone)]
pub struct StreamRequest {
    pub prompt: String,
    pub history: Vec<Message>,
    pub session_id: Option<String>,
}

/// Raw response body as a pull-based sequence of text fragments.
/// Fragment boundaries are arbitrary; the frame decoder reassembles.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<String>>>>;

#[async_trait(?Send)]
pub trait StreamTransport {
    /// Open one streaming response. Resolves once headers have arrived;
    /// connection and HTTP-status failures surface here, not mid-stream.
    async fn open_stream(&self, req: StreamRequest) -> Result<ByteStream>;

    /// Ask the backend for a fresh session id.
    async fn create_session(&self) -> Result<String>;

    /// Fetch the persisted transcript of a server-side session.
    async fn fetch_messages(&self, session_id: &str) -> Result<Vec<Message>>;
}

// ─── Key-value store ─────────────────────────────────────────

/// Injected client-side persistence for history and config. String
/// values — callers serialize with serde_json.
#[async_trait(?Send)]
pub trait KvStore {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> Result<()>;

    async fn remove(&self, key: &str) -> Result<()>;

    async fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get(key).await?.is_some())
    }

    /// Name of this backend (for logging/debug)
    fn backend_name(&self) -> &str;
}
