//! Configuration file
//!
//! Settings are loaded from the file passed with `--config`:
//!
//! ```toml
//! [typography]
//! indent_pt = 32
//!
//! [typography.title]
//! font = "fangzheng_xiaobiaosong"
//! size_pt = 22
//!
//! [page]
//! line_spacing_pt = 28
//!
//! [page.margins]
//! top_cm = 3.7
//! left_cm = 2.8
//! ```
//!
//! Every key is optional, including the keys of a single face table;
//! missing keys keep the built-in convention.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use gongwen_core::Typography;
use gongwen_ooxml::PageSetup;
use serde::{Deserialize, Serialize};

/// Top-level settings structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Faces and indent used by the assembler
    pub typography: Typography,
    /// Line spacing and margins used by the renderer
    pub page: PageSetup,
}

impl Settings {
    /// Parse settings from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Load settings from a file, or the defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}
