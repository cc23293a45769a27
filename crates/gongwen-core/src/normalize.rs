//! Input normalizer
//!
//! Every input shape is first turned into a [`FieldLayer`]: one provider's
//! view of the document with `None` for "not supplied". Layers are then
//! consulted first-to-last per field:
//!
//! 1. caller overrides (CLI flags)
//! 2. parsed controlled Markdown (blocks, first-`h1` title, front matter)
//! 3. flat JSON record
//! 4. built-in default record, only when nothing else was supplied
//!
//! A non-empty block sequence from any layer always drives the body.

use gongwen_ast::{Block, BodyContent, CanonicalRecord, MetaValue, Metadata};
use serde_json::Value;
use tracing::{debug, warn};

use crate::input::{value_to_text, FlatRecord};
use crate::parser::MarkdownDocument;

/// Separator used to join a recipient list
pub const RECIPIENT_SEPARATOR: &str = "、";

/// A value that may be given as one string or as a list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextList {
    One(String),
    Many(Vec<String>),
}

impl TextList {
    fn from_meta(value: &MetaValue) -> Self {
        match value {
            MetaValue::Scalar(s) => TextList::One(s.clone()),
            MetaValue::List(items) => TextList::Many(items.clone()),
        }
    }

    fn from_json(value: &Value) -> Self {
        match value {
            Value::Array(items) => TextList::Many(items.iter().map(value_to_text).collect()),
            other => TextList::One(value_to_text(other)),
        }
    }

    /// Trimmed, non-empty items
    pub fn items(&self) -> Vec<String> {
        let raw: Vec<&str> = match self {
            TextList::One(s) => vec![s.as_str()],
            TextList::Many(items) => items.iter().map(|s| s.as_str()).collect(),
        };
        raw.into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Body text as a provider supplied it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyInput {
    /// Free text, one paragraph per non-blank line
    Text(String),
    /// Already split paragraphs
    Paragraphs(Vec<String>),
}

impl BodyInput {
    /// Trimmed, non-empty paragraphs; no `#` interpretation
    pub fn paragraphs(&self) -> Vec<String> {
        match self {
            BodyInput::Text(text) => split_body(text),
            BodyInput::Paragraphs(items) => items
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Split free text into one paragraph per non-blank line
pub fn split_body(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// One provider's optional view of every record field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldLayer {
    pub title: Option<String>,
    pub recipients: Option<TextList>,
    pub body: Option<BodyInput>,
    pub blocks: Option<Vec<Block>>,
    pub attachments: Option<TextList>,
    pub signer: Option<String>,
    pub date: Option<String>,
}

impl FieldLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_recipients(mut self, recipients: TextList) -> Self {
        self.recipients = Some(recipients);
        self
    }

    pub fn with_body(mut self, body: BodyInput) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_blocks(mut self, blocks: Vec<Block>) -> Self {
        self.blocks = Some(blocks);
        self
    }

    pub fn with_attachments(mut self, attachments: TextList) -> Self {
        self.attachments = Some(attachments);
        self
    }

    pub fn with_signer(mut self, signer: impl Into<String>) -> Self {
        self.signer = Some(signer.into());
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Whether the layer supplies no field at all
    pub fn is_empty(&self) -> bool {
        *self == FieldLayer::default()
    }

    /// Layer for a parsed controlled-Markdown source
    pub fn from_markdown(doc: &MarkdownDocument) -> Self {
        let meta = &doc.metadata;
        Self {
            title: doc.title.clone(),
            recipients: meta.get("recipients").map(TextList::from_meta),
            body: None,
            blocks: Some(doc.blocks.clone()),
            attachments: meta.get("attachments").map(TextList::from_meta),
            signer: meta_scalar(meta, "signer"),
            date: meta_scalar(meta, "date"),
        }
    }

    /// Layer for a flat JSON record
    ///
    /// A record carrying blocks takes its title from the first `h1` block
    /// ahead of its own `title` key.
    pub fn from_flat(record: &FlatRecord) -> Self {
        let blocks = record.parsed_blocks();
        let block_title = blocks
            .as_ref()
            .and_then(|b| b.iter().find(|b| b.is_h1()))
            .map(|b| b.text().to_string());

        let body = match &record.body {
            Some(Value::String(text)) => Some(BodyInput::Text(text.clone())),
            Some(Value::Array(items)) => Some(BodyInput::Paragraphs(
                items.iter().map(value_to_text).collect(),
            )),
            _ => None,
        };

        Self {
            title: block_title.or_else(|| record.title.as_ref().map(value_to_text)),
            recipients: record.recipients.as_ref().map(TextList::from_json),
            body,
            blocks,
            attachments: record.attachments.as_ref().map(TextList::from_json),
            signer: record.signer.as_ref().map(value_to_text),
            date: record.date.as_ref().map(value_to_text),
        }
    }

    /// The built-in sample notice
    pub fn builtin_default() -> Self {
        FieldLayer::new()
            .with_title("关于开展年度工作总结的通知")
            .with_recipients(TextList::Many(vec!["各相关单位".to_string()]))
            .with_body(BodyInput::Paragraphs(
                [
                    "为全面总结年度工作成果，梳理经验做法，现就有关事项通知如下。",
                    "一、总体要求",
                    "（一）突出重点。各单位要围绕中心任务，突出亮点工作。",
                    "1. 做到数据准确、材料完整。",
                    "（1）按时报送，总结材料不超过三页。",
                    "请于2月15日前报送电子版材料。",
                ]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            ))
            .with_attachments(TextList::Many(vec!["年度工作总结模板".to_string()]))
    }
}

fn meta_scalar(meta: &Metadata, key: &str) -> Option<String> {
    meta.get(key)
        .map(|value| value.items().join(RECIPIENT_SEPARATOR))
}

/// All inputs of one conversion run
#[derive(Debug, Clone, Default)]
pub struct Sources {
    /// Explicit per-field overrides
    pub overrides: FieldLayer,
    /// Parsed Markdown input, if the run is in Markdown mode
    pub markdown: Option<MarkdownDocument>,
    /// Flat JSON input, if the run is in JSON mode
    pub flat: Option<FlatRecord>,
}

impl Sources {
    /// Providers in precedence order
    pub fn providers(&self) -> Vec<FieldLayer> {
        let nothing_supplied =
            self.markdown.is_none() && self.flat.is_none() && self.overrides.is_empty();
        let mut layers = vec![self.overrides.clone()];
        if let Some(doc) = &self.markdown {
            layers.push(FieldLayer::from_markdown(doc));
        }
        if let Some(record) = &self.flat {
            layers.push(FieldLayer::from_flat(record));
        }
        if nothing_supplied {
            debug!("no input supplied, using built-in default record");
            layers.push(FieldLayer::builtin_default());
        }
        layers
    }

    /// Merge all providers into the canonical record
    pub fn resolve(&self) -> CanonicalRecord {
        merge(&self.providers())
    }
}

/// Merge layers, taking each field from the first layer that supplies it
pub fn merge(layers: &[FieldLayer]) -> CanonicalRecord {
    let blocks = layers
        .iter()
        .find_map(|l| l.blocks.as_ref().filter(|b| !b.is_empty()));
    let body_input = layers.iter().find_map(|l| l.body.as_ref());

    let body = match blocks {
        Some(blocks) => {
            if body_input.is_some() {
                warn!("body text ignored because the document carries heading blocks");
            }
            BodyContent::Blocks(blocks.clone())
        }
        None => BodyContent::Paragraphs(
            body_input.map(BodyInput::paragraphs).unwrap_or_default(),
        ),
    };

    CanonicalRecord {
        title: first_text(layers, |l| l.title.as_ref()),
        recipients: layers
            .iter()
            .find_map(|l| l.recipients.as_ref())
            .map(|r| r.items().join(RECIPIENT_SEPARATOR))
            .unwrap_or_default(),
        body,
        attachments: layers
            .iter()
            .find_map(|l| l.attachments.as_ref())
            .map(TextList::items)
            .unwrap_or_default(),
        signer: first_text(layers, |l| l.signer.as_ref()),
        date: first_text(layers, |l| l.date.as_ref()),
    }
}

fn first_text<F>(layers: &[FieldLayer], field: F) -> String
where
    F: Fn(&FieldLayer) -> Option<&String>,
{
    layers
        .iter()
        .find_map(field)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// A fresh copy of the built-in default record
pub fn default_record() -> CanonicalRecord {
    merge(&[FieldLayer::builtin_default()])
}
