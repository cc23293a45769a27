//! gongwen-ast - Document model definitions
//!
//! This crate provides the types shared by every stage of the gongwen
//! pipeline: parsed body blocks, front-matter metadata, the canonical
//! document record and the styled segments handed to a renderer.

pub mod block;
pub mod document;
pub mod render;
pub mod segment;

pub use block::{Block, Heading, Paragraph};
pub use document::{BodyContent, CanonicalRecord, MetaValue, Metadata};
pub use render::Renderer;
pub use segment::{Alignment, Field, Font, Inline, Role, StyledSegment};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(VERSION, "0.1.0");
    }
}
