//! gongwen-core - Controlled document model compiler
//!
//! Turns loosely structured input (flat JSON records, controlled
//! Markdown with front matter, per-field overrides) into the ordered
//! sequence of styled segments that make up an official notice.
//!
//! # Example
//!
//! ```
//! use gongwen_ast::Role;
//! use gongwen_core::{compile_markdown, Typography};
//!
//! let text = "---\nsigner: 某某局\n---\n# 关于开展检查的通知\n\n## 一、总体要求\n\n请\"按时\"报送。\n";
//! let segments = compile_markdown(text, &Typography::default());
//!
//! assert_eq!(segments[0].role, Role::Title);
//! assert_eq!(segments[0].text(), "关于开展检查的通知");
//! assert!(segments.iter().any(|s| s.text() == "请“按时”报送。"));
//! assert_eq!(segments.last().unwrap().role, Role::Footer);
//! ```

pub mod assemble;
pub mod error;
pub mod frontmatter;
pub mod input;
pub mod normalize;
pub mod parser;
pub mod quotes;
pub mod typography;

// Re-export main types and functions
pub use assemble::{assemble, classify_paragraph, Assembler};
pub use error::{CoreError, Result};
pub use frontmatter::parse_front_matter;
pub use input::{read_source, FlatRecord, InputFormat};
pub use normalize::{default_record, merge, BodyInput, FieldLayer, Sources, TextList};
pub use parser::{parse_blocks, parse_markdown, MarkdownDocument};
pub use quotes::normalize_quotes;
pub use typography::{Face, FaceOverride, FaceRule, Typography, TypographyOverride};

use gongwen_ast::StyledSegment;

/// Resolve all sources and assemble the styled segment sequence
pub fn compile(sources: &Sources, typography: &Typography) -> Vec<StyledSegment> {
    let record = sources.resolve();
    Assembler::new(typography).assemble(&record)
}

/// Compile a controlled Markdown text with no overrides
pub fn compile_markdown(text: &str, typography: &Typography) -> Vec<StyledSegment> {
    let sources = Sources {
        markdown: Some(parse_markdown(text)),
        ..Default::default()
    };
    compile(&sources, typography)
}

/// Compile a flat JSON record with no overrides
pub fn compile_json(text: &str, typography: &Typography) -> Result<Vec<StyledSegment>> {
    let sources = Sources {
        flat: Some(FlatRecord::from_json(text)?),
        ..Default::default()
    };
    Ok(compile(&sources, typography))
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;
    use gongwen_ast::Role;

    #[test]
    fn test_version() {
        assert_eq!(VERSION, "0.1.0");
    }

    #[test]
    fn test_compile_json_rejects_garbage() {
        let err = compile_json("{not json", &Typography::default()).unwrap_err();
        assert!(matches!(err, CoreError::Json(_)));
    }

    #[test]
    fn test_compile_nothing_uses_default() {
        let segments = compile(&Sources::default(), &Typography::default());
        assert_eq!(segments[0].text(), "关于开展年度工作总结的通知");
        assert!(segments
            .iter()
            .any(|s| s.role == Role::AttachmentSingle));
    }
}
