//! Stream orchestrator — drives one request/response cycle end to end.
//!
//! The only component that touches the network. Opens the stream, feeds
//! transport chunks through a frame decoder, and applies every decoded
//! frame to the conversation reducer synchronously before pulling the
//! next chunk — backpressure is inherited from the transport's
//! pull-based reads, and chunk-apply order equals arrival order.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::StreamExt;

use chat_types::{frame::StreamFrame, message::Message, ChatError, Result};
use crate::conversation::Conversation;
use crate::decoder::FrameDecoder;
use crate::ports::{StreamRequest, StreamTransport};

/// Cooperative cancellation flag bound to one streaming cycle. An
/// already-issued read is allowed to finish, but its result is
/// discarded once the flag is set.
#[derive(Clone)]
pub struct CancelHandle(Rc<Cell<bool>>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// One orchestrator per conversation instance; nothing is shared across
/// conversations.
pub struct StreamOrchestrator {
    /// Token of the cycle currently in flight. Every run installs a
    /// fresh token, so cancelling an abandoned cycle can never carry
    /// over into a later one.
    active: RefCell<Rc<Cell<bool>>>,
}

impl StreamOrchestrator {
    pub fn new() -> Self {
        Self {
            active: RefCell::new(Rc::new(Cell::new(false))),
        }
    }

    /// Handle for abandoning the in-flight cycle (new chat, navigation).
    /// Targets whichever cycle is active when the handle is taken.
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle(self.active.borrow().clone())
    }

    /// Run one complete streaming cycle. Returns the final assistant
    /// text on success; on failure the conversation is left Idle with
    /// its error field set and partial content preserved.
    pub async fn run(
        &self,
        conversation: &RefCell<Conversation>,
        transport: &dyn StreamTransport,
        prompt: &str,
    ) -> Result<String> {
        let request = {
            let mut conv = conversation.borrow_mut();
            // Prior history excludes the message begin_cycle appends,
            // and drops empty placeholders left by failed cycles.
            let history: Vec<Message> = conv
                .messages
                .iter()
                .filter(|m| !m.is_empty())
                .cloned()
                .collect();
            conv.begin_cycle(prompt)?;
            StreamRequest {
                prompt: prompt.to_string(),
                history,
                session_id: conv.session_id.clone(),
            }
        };

        // This cycle owns the conversation from here on. Its token is
        // installed only after begin_cycle succeeds, so a Busy-rejected
        // call never displaces the running cycle's token.
        let token = Rc::new(Cell::new(false));
        *self.active.borrow_mut() = token.clone();

        let mut stream = match transport.open_stream(request).await {
            Ok(s) => s,
            Err(e) => {
                conversation.borrow_mut().fail(&e.to_string());
                return Err(e);
            }
        };

        conversation.borrow_mut().begin_streaming();
        let mut decoder = FrameDecoder::new();

        loop {
            if token.get() {
                log::info!("Streaming cycle cancelled");
                return Err(ChatError::Cancelled);
            }

            let item = stream.next().await;

            // A cancel may have landed while the read was parked, in
            // which case the conversation may belong to a newer cycle
            // by now and the stale result must not be applied.
            if token.get() {
                log::info!("Streaming cycle cancelled");
                return Err(ChatError::Cancelled);
            }

            match item {
                // Transport closed without a terminal frame: some
                // servers omit the trailer, so synthesize completion
                // from whatever accumulated.
                None => break,
                Some(Err(e)) => {
                    conversation.borrow_mut().fail(&e.to_string());
                    return Err(e);
                }
                Some(Ok(chunk)) => {
                    for frame in decoder.feed(&chunk) {
                        match frame {
                            StreamFrame::Chunk(text) => {
                                conversation.borrow_mut().append_chunk(&text);
                            }
                            StreamFrame::Error(message) => {
                                conversation.borrow_mut().fail(&message);
                                return Err(ChatError::Stream(message));
                            }
                            StreamFrame::Done => {
                                return Ok(conversation.borrow_mut().complete());
                            }
                        }
                    }
                }
            }
        }

        Ok(conversation.borrow_mut().complete())
    }
}

impl Default for StreamOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}
