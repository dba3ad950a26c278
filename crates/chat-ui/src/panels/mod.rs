pub mod chat;
pub mod code;
pub mod history;

pub use chat::chat_panel;
pub use code::{code_panel, CodeAction};
pub use history::{history_panel, HistoryAction};
