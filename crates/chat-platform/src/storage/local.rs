//! localStorage-backed storage.
//! Persistent across page reloads; unavailable in some embedded or
//! privacy-restricted contexts, in which case `open()` fails and the
//! caller falls back to memory.

use async_trait::async_trait;
use web_sys::Storage;

use chat_core::ports::KvStore;
use chat_types::{ChatError, Result};

pub struct LocalStorageStore {
    storage: Storage,
}

impl LocalStorageStore {
    pub fn open() -> Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| ChatError::Other("no window object".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|_| ChatError::Other("localStorage access denied".to_string()))?
            .ok_or_else(|| ChatError::Other("localStorage not available".to_string()))?;
        Ok(Self { storage })
    }
}

#[async_trait(?Send)]
impl KvStore for LocalStorageStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|_| ChatError::Other(format!("localStorage read failed: {}", key)))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        // Fails when the quota is exhausted.
        self.storage
            .set_item(key, value)
            .map_err(|_| ChatError::Other(format!("localStorage write failed: {}", key)))
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.storage
            .remove_item(key)
            .map_err(|_| ChatError::Other(format!("localStorage remove failed: {}", key)))
    }

    fn backend_name(&self) -> &str {
        "localStorage"
    }
}
