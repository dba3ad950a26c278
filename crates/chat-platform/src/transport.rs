//! HTTP/SSE transport adapter.
//!
//! Talks to the backend over browser `fetch()` via gloo-net and exposes
//! the streaming response body as a pull-based text stream. Frame
//! reassembly is not done here; raw fragments go to the core decoder.

use async_trait::async_trait;
use futures::stream;
use gloo_net::http::{Request, Response};
use serde::Deserialize;
use serde_json::{json, Value};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::ReadableStreamDefaultReader;

use chat_core::ports::{ByteStream, StreamRequest, StreamTransport};
use chat_types::{
    config::{ChatConfig, StreamEndpoint},
    message::Message,
    ChatError, Result,
};

/// Backend client bound to one [`ChatConfig`].
pub struct HttpTransport {
    config: ChatConfig,
}

impl HttpTransport {
    pub fn new(config: ChatConfig) -> Self {
        Self { config }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_base.trim_end_matches('/'), path)
    }

    /// Request body shape differs per endpoint: the stateless endpoint
    /// carries the prior transcript inline, the session endpoint only a
    /// server-side session id.
    fn stream_body(&self, req: &StreamRequest) -> Value {
        match self.config.endpoint {
            StreamEndpoint::Prompt => {
                let messages: Vec<Value> = req
                    .history
                    .iter()
                    .map(|m| json!({ "role": m.role, "content": m.content }))
                    .collect();
                json!({ "messages": messages, "prompt": req.prompt })
            }
            StreamEndpoint::Session => json!({
                "message": req.prompt,
                "session_id": req.session_id,
                "stream": true,
            }),
        }
    }
}

#[async_trait(?Send)]
impl StreamTransport for HttpTransport {
    async fn open_stream(&self, req: StreamRequest) -> Result<ByteStream> {
        let url = self.url(self.config.endpoint.path());
        let body = self.stream_body(&req);
        log::debug!("POST {} ({})", url, self.config.endpoint.label());

        let response = Request::post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .map_err(|e| ChatError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        check_status(&response).await?;
        body_stream(&response)
    }

    async fn create_session(&self) -> Result<String> {
        let url = self.url("/sessions");

        let response = Request::post(&url)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        check_status(&response).await?;

        let created: SessionCreated = response
            .json()
            .await
            .map_err(|e| ChatError::Session(e.to_string()))?;
        Ok(created.session_id)
    }

    async fn fetch_messages(&self, session_id: &str) -> Result<Vec<Message>> {
        let url = self.url(&format!("/sessions/{}/messages", session_id));

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        check_status(&response).await?;

        let data: MessagesResponse = response
            .json()
            .await
            .map_err(|e| ChatError::Session(e.to_string()))?;
        Ok(data.messages)
    }
}

/// Map a non-2xx response to an error carrying the body text.
async fn check_status(response: &Response) -> Result<()> {
    if response.ok() {
        return Ok(());
    }
    let status = response.status();
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "unknown error".to_string());
    Err(ChatError::Http { status, message })
}

/// Wrap the fetch response body as a stream of decoded text fragments.
///
/// Fragment boundaries are whatever the browser delivers, so a
/// multi-byte character may be split across reads; the incomplete tail
/// of each read is carried into the next so characters survive intact.
fn body_stream(response: &Response) -> Result<ByteStream> {
    let body = response
        .body()
        .ok_or_else(|| ChatError::Stream("response body is not readable".to_string()))?;

    let reader: ReadableStreamDefaultReader = body
        .get_reader()
        .dyn_into()
        .map_err(|_| ChatError::Stream("failed to acquire stream reader".to_string()))?;

    let stream = stream::unfold(Some((reader, Vec::new())), |state| async move {
        let (reader, mut carry) = state?;
        match JsFuture::from(reader.read()).await {
            Ok(chunk) => {
                let done = js_sys::Reflect::get(&chunk, &JsValue::from_str("done"))
                    .ok()
                    .and_then(|v| v.as_bool())
                    .unwrap_or(true);
                if done {
                    // Flush any held-back bytes at end of stream.
                    if carry.is_empty() {
                        return None;
                    }
                    let text = String::from_utf8_lossy(&carry).into_owned();
                    return Some((Ok(text), None));
                }
                let value = js_sys::Reflect::get(&chunk, &JsValue::from_str("value"))
                    .unwrap_or(JsValue::UNDEFINED);
                let bytes = js_sys::Uint8Array::new(&value).to_vec();
                let text = decode_utf8_fragment(&mut carry, &bytes);
                Some((Ok(text), Some((reader, carry))))
            }
            Err(e) => Some((Err(ChatError::Stream(js_error(&e))), None)),
        }
    });

    Ok(Box::pin(stream))
}

/// Decode one transport read, holding back a trailing incomplete UTF-8
/// sequence in `carry` so it can complete with the next read's bytes.
/// Genuinely invalid bytes decode lossily rather than stalling.
pub fn decode_utf8_fragment(carry: &mut Vec<u8>, incoming: &[u8]) -> String {
    carry.extend_from_slice(incoming);
    let split = match std::str::from_utf8(carry) {
        Ok(_) => carry.len(),
        // error_len() is None only for an incomplete trailing sequence
        Err(e) if e.error_len().is_none() => e.valid_up_to(),
        Err(_) => carry.len(),
    };
    let rest = carry.split_off(split);
    let complete = std::mem::replace(carry, rest);
    String::from_utf8_lossy(&complete).into_owned()
}

fn js_error(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}

// ─── API response types ──────────────────────────────────────

#[derive(Deserialize)]
struct SessionCreated {
    session_id: String,
}

#[derive(Deserialize)]
struct MessagesResponse {
    messages: Vec<Message>,
}
