pub mod local;
pub mod memory;

pub use local::LocalStorageStore;
pub use memory::MemoryStore;

use std::rc::Rc;
use chat_core::ports::KvStore;

/// Open the best available store. Priority: localStorage (persistent
/// across reloads) with in-memory fallback for restricted contexts.
pub fn auto_detect_store() -> Rc<dyn KvStore> {
    match LocalStorageStore::open() {
        Ok(local) => {
            log::info!("Storage backend: localStorage");
            Rc::new(local)
        }
        Err(e) => {
            log::warn!("localStorage unavailable ({}), falling back to memory", e);
            Rc::new(MemoryStore::new())
        }
    }
}
