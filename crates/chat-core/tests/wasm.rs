//! Browser-side checks for the streaming pipeline. The native suite in
//! src/tests.rs is the primary one; this verifies the same behavior
//! holds under wasm32.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

use chat_core::conversation::Conversation;
use chat_core::decoder::FrameDecoder;
use chat_core::event_bus::EventBus;
use chat_core::extract;
use chat_types::frame::StreamFrame;
use chat_types::message::Role;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn wasm_decoder_reassembles_split_frames() {
    let mut decoder = FrameDecoder::new();
    assert!(decoder.feed("data: {\"ch").is_empty());
    let frames = decoder.feed("unk\":\"ab\"}\n");
    assert_eq!(frames, vec![StreamFrame::Chunk("ab".to_string())]);
}

#[wasm_bindgen_test]
fn wasm_decoder_terminal_frame() {
    let mut decoder = FrameDecoder::new();
    let frames = decoder.feed("data: {\"done\": true}\n");
    assert_eq!(frames, vec![StreamFrame::Done]);
    assert!(decoder.is_finished());
}

#[wasm_bindgen_test]
fn wasm_extract_primary_block() {
    let text = "Here:\n```javascript\nfunction add(a,b){return a+b}\n```\n";
    let blocks = extract::find_all_blocks(text);
    let primary = extract::select_primary(&blocks).unwrap();
    assert_eq!(primary.language, "javascript");
    assert_eq!(primary.code, "function add(a,b){return a+b}");
}

#[wasm_bindgen_test]
fn wasm_conversation_full_cycle() {
    let mut conv = Conversation::new(EventBus::new());
    conv.begin_cycle("write add").unwrap();
    conv.begin_streaming();
    conv.append_chunk("```js\nlet add = (a,b) => a+b;\n```");
    conv.complete();

    assert_eq!(conv.messages.len(), 2);
    assert_eq!(conv.messages[0].role, Role::User);
    assert_eq!(conv.generated_code, "let add = (a,b) => a+b;");
    assert!(!conv.is_busy());
}

#[wasm_bindgen_test]
fn wasm_conversation_failure_preserves_partial() {
    let mut conv = Conversation::new(EventBus::new());
    conv.begin_cycle("q").unwrap();
    conv.begin_streaming();
    conv.append_chunk("Hello wor");
    conv.fail("connection reset");

    assert_eq!(conv.messages.last().unwrap().content, "Hello wor");
    assert!(conv.error.is_some());
    assert!(!conv.is_busy());
}
