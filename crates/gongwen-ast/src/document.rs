//! Document record and metadata definitions
//!
//! `Metadata` is what the front-matter header yields; `CanonicalRecord` is
//! the merged document model the assembly engine walks.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::block::Block;

/// A single front-matter value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    /// `key: value`
    Scalar(String),
    /// `key:` followed by dash items, or `key: [a, b]`
    List(Vec<String>),
}

impl MetaValue {
    /// Items of the value; a scalar counts as one item
    pub fn items(&self) -> Vec<&str> {
        match self {
            MetaValue::Scalar(s) => vec![s.as_str()],
            MetaValue::List(items) => items.iter().map(|s| s.as_str()).collect(),
        }
    }
}

/// Front-matter metadata, keyed by whatever keys appeared
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Metadata {
    entries: BTreeMap<String, MetaValue>,
}

impl Metadata {
    /// Create empty metadata
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value, replacing any previous value for the key
    pub fn insert(&mut self, key: impl Into<String>, value: MetaValue) {
        self.entries.insert(key.into(), value);
    }

    /// Append an item to a list value, creating the list if needed
    ///
    /// A scalar already stored under the key is replaced by a list.
    pub fn push_item(&mut self, key: &str, item: impl Into<String>) {
        let entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| MetaValue::List(Vec::new()));
        match entry {
            MetaValue::List(items) => items.push(item.into()),
            MetaValue::Scalar(_) => *entry = MetaValue::List(vec![item.into()]),
        }
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.entries.get(key)
    }

    /// Check whether any key was captured
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate over entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetaValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Serialize back into a front-matter header
    ///
    /// Scalars and list items are always double-quoted so that values
    /// which look like inline lists, or carry edge whitespace, survive a
    /// re-parse unchanged. Lists with an item containing `,` or `"` fall
    /// back to dash items.
    pub fn to_front_matter(&self) -> String {
        let mut out = String::from("---\n");
        for (key, value) in &self.entries {
            match value {
                MetaValue::Scalar(s) => {
                    out.push_str(&format!("{}: \"{}\"\n", key, s));
                }
                MetaValue::List(items) if items.is_empty() => {
                    out.push_str(&format!("{}: []\n", key));
                }
                MetaValue::List(items) if items.iter().any(|i| i.contains([',', '"'])) => {
                    out.push_str(&format!("{}:\n", key));
                    for item in items {
                        out.push_str(&format!("  - {}\n", item));
                    }
                }
                MetaValue::List(items) => {
                    let quoted: Vec<String> =
                        items.iter().map(|item| format!("\"{}\"", item)).collect();
                    out.push_str(&format!("{}: [{}]\n", key, quoted.join(", ")));
                }
            }
        }
        out.push_str("---\n");
        out
    }
}

/// Which representation drives body rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyContent {
    /// Classified blocks from the controlled Markdown dialect
    Blocks(Vec<Block>),
    /// Flat paragraphs, classified per line by the assembly engine
    Paragraphs(Vec<String>),
}

impl Default for BodyContent {
    fn default() -> Self {
        BodyContent::Paragraphs(Vec::new())
    }
}

/// The merged document model
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CanonicalRecord {
    /// Document title (may be empty)
    pub title: String,
    /// Recipient line, already joined with `、`
    pub recipients: String,
    /// Body content
    pub body: BodyContent,
    /// Attachment names, trimmed and non-empty
    pub attachments: Vec<String>,
    /// Issuing organisation
    pub signer: String,
    /// Issue date
    pub date: String,
}

impl CanonicalRecord {
    /// Blocks driving the body, if any
    pub fn blocks(&self) -> Option<&[Block]> {
        match &self.body {
            BodyContent::Blocks(blocks) => Some(blocks),
            BodyContent::Paragraphs(_) => None,
        }
    }
}
