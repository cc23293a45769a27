//! Controlled Markdown parser
//!
//! The dialect is deliberately small:
//!
//! - every non-blank line is its own block (no soft-wrap joining);
//! - a leading run of 1-5 `#` followed by text is a heading of that level;
//! - everything else, including `######` lines and bare `#` runs, is a
//!   paragraph holding the whole line.
//!
//! `#` characters after the first non-`#` character are never special.
//!
//! # Example
//!
//! ```
//! use gongwen_core::parser::parse_markdown;
//!
//! let doc = parse_markdown("---\nsigner: 某某局\n---\n# 通知\n## 一、总体要求\n正文");
//! assert_eq!(doc.title.as_deref(), Some("通知"));
//! assert_eq!(doc.blocks.len(), 3);
//! ```

use gongwen_ast::{Block, Metadata};
use tracing::debug;

use crate::frontmatter::parse_front_matter;

/// Deepest heading level the dialect recognises
pub const MAX_HEADING_LEVEL: usize = 5;

/// A parsed controlled-Markdown source
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MarkdownDocument {
    /// Front-matter metadata
    pub metadata: Metadata,
    /// Body blocks in reading order
    pub blocks: Vec<Block>,
    /// Text of the first `h1` block, if any
    pub title: Option<String>,
}

/// Parse a full source: front matter, then body blocks
pub fn parse_markdown(text: &str) -> MarkdownDocument {
    let (metadata, body) = parse_front_matter(text);
    let blocks = parse_blocks(&body);
    let title = blocks
        .iter()
        .find(|b| b.is_h1())
        .map(|b| b.text().to_string());

    debug!(
        blocks = blocks.len(),
        has_title = title.is_some(),
        "markdown parsed"
    );

    MarkdownDocument {
        metadata,
        blocks,
        title,
    }
}

/// Classify each non-blank line of `text` into a block
pub fn parse_blocks(text: &str) -> Vec<Block> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    text.lines().filter_map(classify_line).collect()
}

fn classify_line(raw: &str) -> Option<Block> {
    let line = raw.trim_end();
    if line.trim().is_empty() {
        return None;
    }

    if let Some(heading) = try_parse_heading(line) {
        return Some(heading);
    }

    Some(Block::paragraph(line.trim()))
}

/// Try to parse a heading line
fn try_parse_heading(line: &str) -> Option<Block> {
    // Count leading '#' characters
    let level = line.bytes().take_while(|&b| b == b'#').count();
    if !(1..=MAX_HEADING_LEVEL).contains(&level) {
        return None;
    }

    let content = line[level..].trim();
    if content.is_empty() {
        return None;
    }

    Some(Block::heading(level as u8, content))
}
