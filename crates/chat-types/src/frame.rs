use serde::Deserialize;

/// A decoded server-sent event frame from the streaming endpoint.
///
/// The wire payload is one JSON object per `data: ` line, shaped as
/// `{"chunk": text}`, `{"error": text}` or `{"done": true}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamFrame {
    /// Incremental response content
    Chunk(String),
    /// Terminal failure reported by the server
    Error(String),
    /// Terminal success marker
    Done,
}

impl StreamFrame {
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamFrame::Error(_) | StreamFrame::Done)
    }
}

/// Raw payload shape, before classification. `chunk` wins over `error`
/// wins over `done`, matching the order the server emits them.
#[derive(Debug, Deserialize)]
struct RawFrame {
    #[serde(default)]
    chunk: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    done: Option<bool>,
}

impl StreamFrame {
    /// Parse a frame payload (the part after the `data: ` marker).
    /// Returns None for payloads that parse as JSON but match none of
    /// the three known shapes.
    pub fn parse(payload: &str) -> Result<Option<StreamFrame>, serde_json::Error> {
        let raw: RawFrame = serde_json::from_str(payload)?;
        if let Some(chunk) = raw.chunk {
            return Ok(Some(StreamFrame::Chunk(chunk)));
        }
        if let Some(error) = raw.error {
            return Ok(Some(StreamFrame::Error(error)));
        }
        if raw.done == Some(true) {
            return Ok(Some(StreamFrame::Done));
        }
        Ok(None)
    }
}
