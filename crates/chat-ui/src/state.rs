//! UI-level state that drives rendering.
//! A projection over the conversation reducer, updated each frame by
//! draining the EventBus. The transcript itself renders straight off
//! the conversation; only presentation concerns live here.

use chat_types::code::PLAINTEXT;
use chat_types::event::ChatEvent;

/// Which tab of the code panel is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeTab {
    Edit,
    Preview,
}

/// State visible to UI panels
pub struct UiState {
    /// Input field content
    pub input_text: String,
    /// Status line text
    pub status_text: String,
    /// Whether the code workspace panel is open
    pub show_code_panel: bool,
    /// Whether the session history panel is open
    pub show_history_panel: bool,
    /// Active code panel tab
    pub code_tab: CodeTab,
    /// Editable copy of the generated code
    pub edited_code: String,
    /// Language tag of the code in the workspace
    pub code_language: String,
    /// Set when a completed cycle produced fresh code; the app layer
    /// copies the reducer's `generated_code` into `edited_code` and
    /// clears the flag, so in-progress edits are only replaced by a
    /// newer generation.
    code_refresh_requested: bool,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            input_text: String::new(),
            status_text: "Ready".to_string(),
            show_code_panel: false,
            show_history_panel: false,
            code_tab: CodeTab::Edit,
            edited_code: String::new(),
            code_language: PLAINTEXT.to_string(),
            code_refresh_requested: false,
        }
    }

    /// Process events from the EventBus and update UI state
    pub fn process_events(&mut self, events: Vec<ChatEvent>) {
        for event in events {
            match event {
                ChatEvent::CycleStarted => {
                    self.status_text = "Thinking...".to_string();
                }
                ChatEvent::Delta { .. } => {
                    self.status_text = "Streaming...".to_string();
                }
                ChatEvent::Completed { .. } => {
                    self.status_text = "Ready".to_string();
                }
                ChatEvent::CodeDetected { language, reveal } => {
                    self.code_language = language;
                    self.code_refresh_requested = true;
                    if reveal {
                        self.show_code_panel = true;
                        self.code_tab = CodeTab::Edit;
                    }
                }
                ChatEvent::Failed { message } => {
                    self.status_text = format!("Error: {}", message);
                }
                ChatEvent::SessionCleared => {
                    self.edited_code.clear();
                    self.code_language = PLAINTEXT.to_string();
                    self.show_code_panel = false;
                    self.status_text = "Ready".to_string();
                }
                ChatEvent::SessionLoaded { .. } => {
                    self.status_text = "Ready".to_string();
                }
            }
        }
    }

    /// Consume the pending code-refresh request, if any.
    pub fn take_code_refresh(&mut self) -> bool {
        std::mem::take(&mut self.code_refresh_requested)
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}
