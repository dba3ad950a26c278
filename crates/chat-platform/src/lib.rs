//! Browser adapters for the chat-core ports.
//!
//! Everything wasm-bindgen lives here; chat-core stays pure Rust.

pub mod download;
pub mod history;
pub mod storage;
pub mod transport;

pub use storage::{auto_detect_store, LocalStorageStore, MemoryStore};
pub use transport::HttpTransport;
