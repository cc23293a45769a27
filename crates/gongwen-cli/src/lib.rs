//! gongwen CLI - Command-line interface library
//!
//! Reads a flat JSON record or a controlled Markdown file, applies any
//! per-field flag overrides, and writes a `.docx` laid out by the
//! official-document convention.
//!
//! # Binary Usage
//!
//! ```bash
//! # Built-in sample notice
//! gongwen
//!
//! # Controlled Markdown with an overridden title
//! gongwen --md notice.md --title "关于开展检查的通知" -o out/notice.docx
//!
//! # JSON on stdin
//! cat record.json | gongwen --input - -o notice.docx
//! ```

pub mod app;
pub mod config;
pub mod logging;

// Re-export main entry point and types
pub use app::{build_sources, generate_command, run_cli, Cli, DEFAULT_OUTPUT};
pub use config::Settings;
