use serde::{Deserialize, Serialize};

/// Language used for blocks without a recognized tag
pub const PLAINTEXT: &str = "plaintext";

/// A fenced code region extracted from assistant text.
///
/// Derived data — recomputed from message text on demand, never stored
/// as its own entity. Only the selected primary block's text survives a
/// cycle, as the conversation's `generated_code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlock {
    /// Lowercase language identifier, or `plaintext`
    pub language: String,
    /// Cleaned block content (blank edges trimmed, tabs normalized)
    pub code: String,
    /// Byte offsets of the fenced region in the origin text,
    /// including both fence lines
    pub span: (usize, usize),
}

impl CodeBlock {
    pub fn is_plaintext(&self) -> bool {
        self.language == PLAINTEXT
    }
}
