//! Frame decoder — turns raw transport chunks into stream frames.
//!
//! The transport delivers opaque text fragments cut at arbitrary byte
//! offsets; a protocol frame is one newline-terminated line prefixed
//! `data: `. The decoder buffers any trailing partial line across feed
//! calls, so frame boundaries never depend on how the network happened
//! to fragment the response.

use chat_types::frame::StreamFrame;

/// Line prefix marking an event frame
const EVENT_MARKER: &str = "data: ";

/// Single-use push decoder, bound to one response stream.
///
/// After the first terminal frame (`error` or `done`) the decoder goes
/// inert: further input is discarded without parsing.
pub struct FrameDecoder {
    buffer: String,
    finished: bool,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            finished: false,
        }
    }

    /// Feed one transport chunk, returning every frame completed by it.
    ///
    /// A chunk with no complete line just extends the held buffer and
    /// returns nothing. Lines that are blank, unprefixed, or fail to
    /// parse are logged and skipped — the protocol is best-effort.
    pub fn feed(&mut self, input: &str) -> Vec<StreamFrame> {
        let mut frames = Vec::new();
        if self.finished {
            return frames;
        }

        self.buffer.push_str(input);

        while let Some(pos) = self.buffer.find('\n') {
            let line: String = self.buffer.drain(..=pos).collect();
            let line = line.trim_end_matches(['\r', '\n']);

            let Some(payload) = line.strip_prefix(EVENT_MARKER) else {
                continue;
            };

            match StreamFrame::parse(payload) {
                Ok(Some(frame)) => {
                    let terminal = frame.is_terminal();
                    frames.push(frame);
                    if terminal {
                        self.finished = true;
                        self.buffer.clear();
                        return frames;
                    }
                }
                Ok(None) => {
                    log::warn!("Unrecognized event payload, skipping: {}", payload);
                }
                Err(e) => {
                    log::warn!("Malformed event frame, skipping: {}", e);
                }
            }
        }

        frames
    }

    /// True once a terminal frame has been decoded
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new()
    }
}
