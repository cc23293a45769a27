//! Styled segments handed to a renderer
//!
//! A segment is one rendered paragraph: its content runs, a fully resolved
//! typographic rule and the structural role it plays in the layout.

use serde::{Deserialize, Serialize};

/// Fonts of the official-document convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Font {
    /// 方正小标宋简体, used for the document title
    FangzhengXiaobiaosong,
    /// 仿宋_GB2312, the body face
    FangsongGb2312,
    /// 黑体, first-level headings
    Heiti,
    /// 楷体_GB2312, second-level headings
    KaitiGb2312,
    /// 宋体, page numbers
    Songti,
}

impl Font {
    /// Font family name as installed on the target system
    pub fn family(self) -> &'static str {
        match self {
            Font::FangzhengXiaobiaosong => "方正小标宋简体",
            Font::FangsongGb2312 => "仿宋_GB2312",
            Font::Heiti => "黑体",
            Font::KaitiGb2312 => "楷体_GB2312",
            Font::Songti => "宋体",
        }
    }
}

/// Paragraph alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

/// A dynamic field evaluated by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Field {
    /// Current page number
    PageNumber,
}

/// One run of segment content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Inline {
    /// Literal text
    Text(String),
    /// Field marker, never a literal value
    Field(Field),
}

/// Structural role of a segment in the layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Title,
    Recipient,
    Heading2,
    Heading3,
    Heading4,
    Heading5,
    BodyParagraph,
    AttachmentSingle,
    AttachmentItem,
    Signer,
    Date,
    Footer,
    /// Empty separator paragraph
    Blank,
}

/// A paragraph with its resolved typographic rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyledSegment {
    pub role: Role,
    pub content: Vec<Inline>,
    pub font: Font,
    pub size_pt: f32,
    pub bold: bool,
    pub align: Alignment,
    pub first_line_indent_pt: Option<f32>,
    pub left_indent_pt: Option<f32>,
}

impl StyledSegment {
    /// Create an empty, left-aligned, non-bold segment
    pub fn new(role: Role, font: Font, size_pt: f32) -> Self {
        Self {
            role,
            content: Vec::new(),
            font,
            size_pt,
            bold: false,
            align: Alignment::Left,
            first_line_indent_pt: None,
            left_indent_pt: None,
        }
    }

    /// Append a text run
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.content.push(Inline::Text(text.into()));
        self
    }

    /// Append a field marker run
    pub fn with_field(mut self, field: Field) -> Self {
        self.content.push(Inline::Field(field));
        self
    }

    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn with_align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    pub fn with_first_line_indent(mut self, pt: f32) -> Self {
        self.first_line_indent_pt = Some(pt);
        self
    }

    pub fn with_left_indent(mut self, pt: f32) -> Self {
        self.left_indent_pt = Some(pt);
        self
    }

    /// Concatenated literal text; field markers contribute nothing
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|inline| match inline {
                Inline::Text(t) => Some(t.as_str()),
                Inline::Field(_) => None,
            })
            .collect()
    }

    /// Whether the segment carries a field marker
    pub fn has_field(&self, field: Field) -> bool {
        self.content.contains(&Inline::Field(field))
    }

    /// Whether this is an empty separator paragraph
    pub fn is_blank(&self) -> bool {
        self.role == Role::Blank
    }
}
