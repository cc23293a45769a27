//! Renderer contract
//!
//! A renderer consumes the styled segment sequence in emission order and
//! produces the bytes of a persisted document. Pagination, page margins and
//! line spacing are renderer policy; segments only carry per-paragraph
//! rules.

use crate::segment::StyledSegment;

/// Turns styled segments into a document
pub trait Renderer {
    /// Error type of the concrete backend
    type Error;

    /// Render the segments into the bytes of one document
    ///
    /// `title` is document-level metadata for backends that record it
    /// (e.g. package properties); it is never rendered as a paragraph.
    fn render(&self, title: &str, segments: &[StyledSegment]) -> Result<Vec<u8>, Self::Error>;
}
