//! gongwen-ooxml - DOCX rendering for official documents
//!
//! This crate provides:
//! - An in-memory OOXML archive with deterministic ZIP output
//! - Relationship and content-type part builders
//! - [`DocxWriter`], the [`gongwen_ast::Renderer`] producing `.docx` bytes

pub mod archive;
pub mod content_types;
pub mod error;
pub mod page;
pub mod relationships;
pub mod styles;
pub mod writer;
pub mod xml;

pub use archive::OoxmlArchive;
pub use error::{OoxmlError, Result};
pub use page::{Margins, PageSetup};
pub use relationships::Relationships;
pub use writer::DocxWriter;
