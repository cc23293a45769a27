//! Input sources and the flat JSON record shape

use std::fs;
use std::io::Read;
use std::path::Path;

use gongwen_ast::Block;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{CoreError, Result};

/// Path that means "read standard input"
pub const STDIN_MARKER: &str = "-";

/// File extensions treated as controlled Markdown
pub const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Input dialect of a source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Markdown,
}

impl InputFormat {
    /// Pick the format from a path's extension; stdin and unknown
    /// extensions are JSON
    pub fn detect(path: &str) -> Self {
        if path == STDIN_MARKER {
            return InputFormat::Json;
        }
        let is_markdown = Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| {
                MARKDOWN_EXTENSIONS
                    .iter()
                    .any(|m| e.eq_ignore_ascii_case(m))
            })
            .unwrap_or(false);
        if is_markdown {
            InputFormat::Markdown
        } else {
            InputFormat::Json
        }
    }
}

/// Read a whole source as UTF-8 text, `-` meaning standard input
pub fn read_source(path: &str) -> Result<String> {
    if path == STDIN_MARKER {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        debug!(bytes = content.len(), "read standard input");
        return Ok(content);
    }

    let path = Path::new(path);
    if !path.exists() {
        return Err(CoreError::MissingFile(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = content.len(), "read input file");
    Ok(content)
}

/// The flat JSON document shape
///
/// Every key is optional and values are kept loosely typed: strings,
/// numbers and lists are all accepted and stringified on use.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FlatRecord {
    pub title: Option<Value>,
    pub recipients: Option<Value>,
    pub body: Option<Value>,
    pub attachments: Option<Value>,
    pub signer: Option<Value>,
    pub date: Option<Value>,
    /// Pre-parsed blocks: `[{"type": "h2", "text": "..."}]`
    pub blocks: Option<Value>,
}

impl FlatRecord {
    /// Parse a JSON object; anything else is malformed input
    pub fn from_json(text: &str) -> Result<Self> {
        let record: FlatRecord = serde_json::from_str(text)?;
        Ok(record)
    }

    /// Blocks carried by the record, skipping entries without text
    pub fn parsed_blocks(&self) -> Option<Vec<Block>> {
        let Some(Value::Array(items)) = &self.blocks else {
            return None;
        };
        Some(items.iter().filter_map(json_block).collect())
    }
}

/// `{"type": "h3", "text": "..."}` -> heading level 3; any type not
/// starting with `h` is a paragraph; `h` with a non-numeric suffix is an
/// out-of-range heading
fn json_block(value: &Value) -> Option<Block> {
    let text = value.get("text").map(value_to_text)?;
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let kind = value.get("type").and_then(Value::as_str).unwrap_or("p");
    match kind.strip_prefix('h') {
        Some(level) => Some(Block::heading(level.parse().unwrap_or(0), text)),
        None => Some(Block::paragraph(text)),
    }
}

/// Stringify a loosely typed JSON value
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
