//! Code block extraction — pure text analysis over assistant responses.
//!
//! One tokenizing pass finds fence markers; language classification is a
//! separate, independent step. All functions here are deterministic,
//! I/O-free, and safe to call on partial text at any time.

use chat_types::code::{CodeBlock, PLAINTEXT};

/// Fence marker opening and closing a code region
const FENCE: &str = "```";

/// Blocks at or below this cleaned length never qualify as primary
const PRIMARY_MIN_LEN: usize = 10;

/// Language tags accepted verbatim from an opening fence. Anything else
/// falls back to content-based detection.
const KNOWN_TAGS: &[&str] = &[
    "plaintext", "text", "javascript", "js", "typescript", "ts", "html", "htm",
    "css", "python", "py", "java", "cpp", "c++", "c", "csharp", "json", "xml",
    "sql", "bash", "sh", "shell", "rust", "go", "ruby", "php", "yaml", "toml",
    "markdown", "md",
];

/// Find all non-overlapping fenced code regions, left to right.
///
/// A fence marker opens a region at any offset, not just at line start
/// ("Here: ```js" still opens a block). The language tag is the run of
/// word characters immediately after the opening marker; the region
/// closes at the next fence marker. An unterminated trailing fence
/// yields no block — an in-progress stream that has only emitted an
/// opening fence must not produce code. Regions whose cleaned content
/// is empty are dropped.
pub fn find_all_blocks(text: &str) -> Vec<CodeBlock> {
    let mut blocks = Vec::new();
    let mut cursor = 0;

    while let Some(rel) = text[cursor..].find(FENCE) {
        let start = cursor + rel;
        let tag_start = start + FENCE.len();
        let tag_len = text[tag_start..]
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '+'))
            .unwrap_or(text.len() - tag_start);
        let tag = text[tag_start..tag_start + tag_len].to_lowercase();
        let content_start = tag_start + tag_len;

        let Some(close_rel) = text[content_start..].find(FENCE) else {
            break;
        };
        let close_start = content_start + close_rel;
        let end = close_start + FENCE.len();

        let code = clean_code(&text[content_start..close_start]);
        if !code.is_empty() {
            let language = resolve_language(&tag, &code);
            blocks.push(CodeBlock {
                language,
                code,
                span: (start, end),
            });
        }
        cursor = end;
    }

    blocks
}

/// Select the block that populates the code workspace.
///
/// First block in document order whose cleaned content exceeds
/// [`PRIMARY_MIN_LEN`] and whose language is not plaintext; failing
/// that, the first block of any kind. Short or untagged blocks are
/// usually inline illustration rather than the deliverable.
pub fn select_primary(blocks: &[CodeBlock]) -> Option<&CodeBlock> {
    blocks
        .iter()
        .find(|b| b.code.trim().len() > PRIMARY_MIN_LEN && !b.is_plaintext())
        .or_else(|| blocks.first())
}

/// Cheap gate: true iff at least one complete fenced region exists.
pub fn has_code(text: &str) -> bool {
    text.matches(FENCE).count() >= 2
}

/// Normalize raw block content: blank edges trimmed, tabs widened to
/// two spaces.
pub fn clean_code(code: &str) -> String {
    code.trim().replace('\t', "  ")
}

fn resolve_language(tag: &str, code: &str) -> String {
    if !tag.is_empty() && KNOWN_TAGS.contains(&tag) {
        tag.to_string()
    } else {
        detect_language(code).to_string()
    }
}

/// Best-effort language guess from content alone.
///
/// Check order matters: markup before script before data formats,
/// because some heuristics are substrings of others — a JSON object
/// inside an HTML snippet must still read as html. The result is a
/// hint, not ground truth.
pub fn detect_language(code: &str) -> &'static str {
    let lower = code.to_lowercase();

    if lower.contains("<html")
        || lower.contains("<!doctype")
        || lower.contains("<div")
        || lower.contains("<span")
    {
        return "html";
    }

    if lower.contains('{')
        && lower.contains('}')
        && (lower.contains("color:") || lower.contains("margin:") || lower.contains("padding:"))
    {
        return "css";
    }

    if lower.contains("function")
        || lower.contains("const ")
        || lower.contains("let ")
        || lower.contains("=>")
        || lower.contains("console.log")
    {
        if lower.contains("interface ")
            || lower.contains("type ")
            || lower.contains(": string")
            || lower.contains(": number")
        {
            return "typescript";
        }
        return "javascript";
    }

    if lower.contains("def ")
        || lower.contains("import ")
        || lower.contains("print(")
        || lower.contains("if __name__")
    {
        return "python";
    }

    if lower.contains("public class")
        || lower.contains("system.out.println")
        || lower.contains("public static void main")
    {
        return "java";
    }

    if lower.contains("#include")
        || lower.contains("int main")
        || lower.contains("std::")
        || lower.contains("cout")
    {
        return "cpp";
    }

    let trimmed = code.trim();
    if (trimmed.starts_with('{') && trimmed.ends_with('}'))
        || (trimmed.starts_with('[') && trimmed.ends_with(']'))
    {
        if serde_json::from_str::<serde_json::Value>(trimmed).is_ok() {
            return "json";
        }
    }

    if lower.contains("select ")
        || lower.contains("insert ")
        || lower.contains("update ")
        || lower.contains("delete ")
    {
        return "sql";
    }

    PLAINTEXT
}

/// Extract inline code snippets (single-backtick spans on one line).
/// Fenced regions are not matched; neither are backtick runs.
pub fn find_inline_code(text: &str) -> Vec<String> {
    let bytes = text.as_bytes();
    let mut out = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'`' {
            i += 1;
            continue;
        }

        // Measure the backtick run; only single backticks open a span.
        let mut j = i + 1;
        while j < bytes.len() && bytes[j] == b'`' {
            j += 1;
        }
        if j - i != 1 {
            i = j;
            continue;
        }

        match text[j..].find(['`', '\n']) {
            Some(rel) => {
                let k = j + rel;
                let closes = bytes[k] == b'`' && bytes.get(k + 1) != Some(&b'`');
                if closes {
                    let snippet = text[j..k].trim();
                    if !snippet.is_empty() {
                        out.push(snippet.to_string());
                    }
                    i = k + 1;
                } else {
                    i = k + 1;
                }
            }
            None => break,
        }
    }

    out
}
