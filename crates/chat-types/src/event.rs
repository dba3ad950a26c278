use serde::{Deserialize, Serialize};

/// Events emitted by the conversation reducer as a streaming cycle
/// progresses. The UI drains these each frame for repaints and
/// side effects; the transcript itself is read straight off the
/// conversation state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ChatEvent {
    /// A streaming cycle was dispatched and is awaiting its first byte
    CycleStarted,

    /// A content chunk was applied to the transcript
    Delta { chunk: String },

    /// The cycle finished; `text` is the full assistant response
    Completed { text: String },

    /// A primary code block was found in the completed response.
    /// `reveal` asks the presentation layer to open the code panel.
    CodeDetected { language: String, reveal: bool },

    /// The cycle failed; partial assistant content is preserved
    Failed { message: String },

    /// The active conversation was archived and reset
    SessionCleared,

    /// A past session snapshot was restored
    SessionLoaded { id: String },
}
