//! Conversation reducer — sole owner of conversation state.
//!
//! All mutation goes through the named transitions below, so concurrent
//! readers (the rendering layer) always observe a consistent transcript.
//! Transitions never interleave: the single-threaded cooperative
//! execution model suspends only at network boundaries, and every
//! transition runs to completion between suspension points.
//!
//! Per-cycle state machine:
//! Idle → Loading → Streaming → (Completing | Erroring) → Idle

use chat_types::{
    event::ChatEvent,
    message::{Message, Role},
    session::ChatSession,
    ChatError, Result,
};
use crate::event_bus::EventBus;
use crate::extract;

/// Observable conversation state plus its transitions.
///
/// Invariants held across every transition:
/// - at most one message is in flight, and it is always the last one;
/// - `is_streaming` implies the last message has the Assistant role;
/// - `streaming_buffer` is cleared on cycle start and on every terminal
///   transition, never left stale across cycles.
pub struct Conversation {
    pub messages: Vec<Message>,
    /// Text accumulated by the in-flight cycle
    pub streaming_buffer: String,
    /// Primary code block from the most recent completed response
    pub generated_code: String,
    pub is_loading: bool,
    pub is_streaming: bool,
    pub error: Option<String>,
    pub session_id: Option<String>,
    event_bus: EventBus,
}

impl Conversation {
    pub fn new(event_bus: EventBus) -> Self {
        Self {
            messages: Vec::new(),
            streaming_buffer: String::new(),
            generated_code: String::new(),
            is_loading: false,
            is_streaming: false,
            error: None,
            session_id: None,
            event_bus,
        }
    }

    /// Whether a streaming cycle is in flight (Loading or Streaming).
    pub fn is_busy(&self) -> bool {
        self.is_loading || self.is_streaming
    }

    /// Idle → Loading. Appends the user message and arms the cycle.
    /// Rejected without any mutation while a cycle is in flight.
    pub fn begin_cycle(&mut self, prompt: &str) -> Result<()> {
        if self.is_busy() {
            return Err(ChatError::Busy);
        }
        self.error = None;
        self.streaming_buffer.clear();
        self.is_loading = true;
        self.messages.push(Message::user(prompt));
        self.event_bus.emit(ChatEvent::CycleStarted);
        Ok(())
    }

    /// Loading → Streaming. Appends the empty assistant message that
    /// subsequent chunks grow.
    pub fn begin_streaming(&mut self) {
        self.messages.push(Message::assistant(""));
        self.is_streaming = true;
    }

    /// Apply one content chunk to the streaming buffer and the in-flight
    /// assistant message atomically, in arrival order.
    pub fn append_chunk(&mut self, chunk: &str) {
        debug_assert!(
            self.messages.last().map(|m| m.role) == Some(Role::Assistant),
            "chunk applied with no in-flight assistant message"
        );
        self.streaming_buffer.push_str(chunk);
        if let Some(last) = self.messages.last_mut() {
            last.content.push_str(chunk);
        }
        self.event_bus.emit(ChatEvent::Delta {
            chunk: chunk.to_string(),
        });
    }

    /// Streaming → Completing → Idle. Freezes the buffer, runs code
    /// extraction over it, updates `generated_code` when a primary block
    /// exists (signalling the panel-reveal side effect only then), and
    /// resets the cycle flags. Returns the full assistant text.
    pub fn complete(&mut self) -> String {
        let text = std::mem::take(&mut self.streaming_buffer);

        if extract::has_code(&text) {
            let blocks = extract::find_all_blocks(&text);
            if let Some(primary) = extract::select_primary(&blocks) {
                log::info!("Generated code detected: {}", primary.language);
                self.generated_code = primary.code.clone();
                self.event_bus.emit(ChatEvent::CodeDetected {
                    language: primary.language.clone(),
                    reveal: true,
                });
            }
        }

        self.is_streaming = false;
        self.is_loading = false;
        self.event_bus.emit(ChatEvent::Completed { text: text.clone() });
        text
    }

    /// (Loading | Streaming) → Erroring → Idle. Partial assistant
    /// content is preserved; partial failure must not destroy partial
    /// progress. A cycle that dies before streaming has no partial
    /// message to keep, so the transcript gets an error notice instead.
    pub fn fail(&mut self, message: &str) {
        log::error!("Streaming cycle failed: {}", message);
        self.error = Some(message.to_string());
        let has_partial = self.is_streaming
            && self
                .messages
                .last()
                .map(|m| m.role == Role::Assistant)
                .unwrap_or(false);
        if !has_partial {
            self.messages.push(Message::error(message));
        }
        self.streaming_buffer.clear();
        self.is_streaming = false;
        self.is_loading = false;
        self.event_bus.emit(ChatEvent::Failed {
            message: message.to_string(),
        });
    }

    /// Drop a surfaced error (next user action clears the banner).
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn set_generated_code(&mut self, code: impl Into<String>) {
        self.generated_code = code.into();
    }

    pub fn set_session_id(&mut self, id: impl Into<String>) {
        self.session_id = Some(id.into());
    }

    /// Reset to initial state. When the outgoing transcript is non-empty
    /// a snapshot is returned for the caller to archive first.
    pub fn clear_session(&mut self) -> Option<ChatSession> {
        let snapshot = if self.messages.is_empty() {
            None
        } else {
            Some(ChatSession::snapshot(
                self.session_id.take(),
                std::mem::take(&mut self.messages),
                std::mem::take(&mut self.generated_code),
            ))
        };

        self.messages.clear();
        self.streaming_buffer.clear();
        self.generated_code.clear();
        self.is_loading = false;
        self.is_streaming = false;
        self.error = None;
        self.session_id = None;
        self.event_bus.emit(ChatEvent::SessionCleared);
        snapshot
    }

    /// Wholesale replace state from an archived session.
    pub fn load_session(&mut self, session: &ChatSession) {
        self.messages = session.messages.clone();
        self.session_id = Some(session.id.clone());
        self.generated_code = session.generated_code.clone();
        self.streaming_buffer.clear();
        self.is_loading = false;
        self.is_streaming = false;
        self.error = None;
        self.event_bus.emit(ChatEvent::SessionLoaded {
            id: session.id.clone(),
        });
    }

    /// Replace the transcript with one fetched from the backend and
    /// re-run extraction over the last assistant message, so a restored
    /// conversation regains its code workspace content.
    pub fn adopt_transcript(&mut self, messages: Vec<Message>, session_id: impl Into<String>) {
        self.messages = messages;
        self.session_id = Some(session_id.into());
        self.streaming_buffer.clear();
        self.is_loading = false;
        self.is_streaming = false;
        self.error = None;

        let last_assistant = self
            .messages
            .iter()
            .rev()
            .find(|m| m.role == Role::Assistant && !m.is_error)
            .map(|m| m.content.clone());

        if let Some(text) = last_assistant {
            let blocks = extract::find_all_blocks(&text);
            if let Some(primary) = extract::select_primary(&blocks) {
                self.generated_code = primary.code.clone();
                self.event_bus.emit(ChatEvent::CodeDetected {
                    language: primary.language.clone(),
                    reveal: true,
                });
            }
        }
    }
}
