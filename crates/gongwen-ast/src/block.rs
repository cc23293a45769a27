//! Block-level elements of a document body
//!
//! The controlled Markdown dialect only knows two kinds of block: a heading
//! with a level and a plain paragraph. Every non-blank source line becomes
//! exactly one block, so block order is reading order.

use serde::{Deserialize, Serialize};

/// Block-level content element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Block {
    /// A section heading
    Heading(Heading),
    /// A paragraph of text
    Paragraph(Paragraph),
}

/// A section heading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Heading level (1-5 when produced by the parser)
    pub level: u8,
    /// Heading text, never empty
    pub text: String,
}

/// A paragraph block
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Paragraph {
    /// Paragraph text, never empty
    pub text: String,
}

impl Block {
    /// Create a heading block
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Block::Heading(Heading {
            level,
            text: text.into(),
        })
    }

    /// Create a paragraph block
    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph(Paragraph { text: text.into() })
    }

    /// Text content of the block
    pub fn text(&self) -> &str {
        match self {
            Block::Heading(h) => &h.text,
            Block::Paragraph(p) => &p.text,
        }
    }

    /// Heading level, or `None` for paragraphs
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            Block::Heading(h) => Some(h.level),
            Block::Paragraph(_) => None,
        }
    }

    /// Whether this block is a level-1 heading (a title candidate)
    pub fn is_h1(&self) -> bool {
        self.heading_level() == Some(1)
    }
}
