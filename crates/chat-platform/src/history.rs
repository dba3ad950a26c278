//! Chat history persistence over the key-value store.
//!
//! History is one JSON document under a fixed key. Load failures
//! degrade to an empty history rather than blocking startup.

use std::rc::Rc;

use chat_core::ports::KvStore;
use chat_types::session::ChatHistory;
use chat_types::Result;

pub const HISTORY_KEY: &str = "chat:history";
pub const CONFIG_KEY: &str = "chat:config";

/// Load the archived history, or a fresh one if absent or corrupt.
pub async fn load_history(store: &Rc<dyn KvStore>) -> ChatHistory {
    match store.get(HISTORY_KEY).await {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(history) => history,
            Err(e) => {
                log::warn!("Discarding corrupt chat history: {}", e);
                ChatHistory::default()
            }
        },
        Ok(None) => ChatHistory::default(),
        Err(e) => {
            log::warn!("Failed to load chat history: {}", e);
            ChatHistory::default()
        }
    }
}

pub async fn save_history(store: &Rc<dyn KvStore>, history: &ChatHistory) -> Result<()> {
    let raw = serde_json::to_string(history)?;
    store.set(HISTORY_KEY, &raw).await
}
