//! Save generated code as a file download.
//!
//! Standard browser pattern: wrap the text in a Blob, mint an object
//! URL, click a synthetic anchor, revoke the URL.

use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use chat_types::{ChatError, Result};

/// File extension for a language tag produced by the extractor.
pub fn extension_for(language: &str) -> &'static str {
    match language {
        "javascript" | "js" => "js",
        "typescript" | "ts" => "ts",
        "html" | "htm" => "html",
        "css" => "css",
        "python" | "py" => "py",
        "java" => "java",
        "cpp" | "c++" => "cpp",
        "c" => "c",
        "json" => "json",
        "xml" => "xml",
        "sql" => "sql",
        "bash" | "sh" | "shell" => "sh",
        "rust" => "rs",
        "go" => "go",
        "ruby" => "rb",
        "php" => "php",
        "yaml" => "yaml",
        "toml" => "toml",
        "markdown" | "md" => "md",
        _ => "txt",
    }
}

/// Trigger a download of `content` as `filename`.
pub fn download_text(content: &str, filename: &str) -> Result<()> {
    let window =
        web_sys::window().ok_or_else(|| ChatError::Other("no window object".to_string()))?;
    let document = window
        .document()
        .ok_or_else(|| ChatError::Other("no document object".to_string()))?;

    let parts = js_sys::Array::of1(&content.into());
    let options = BlobPropertyBag::new();
    options.set_type("text/plain;charset=utf-8");
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)
        .map_err(|_| ChatError::Other("failed to create blob".to_string()))?;

    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|_| ChatError::Other("failed to create object URL".to_string()))?;

    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|_| ChatError::Other("failed to create anchor".to_string()))?
        .dyn_into()
        .map_err(|_| ChatError::Other("anchor element cast failed".to_string()))?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();

    let _ = Url::revoke_object_url(&url);
    Ok(())
}
