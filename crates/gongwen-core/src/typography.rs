//! Typographic rules of the official-document convention
//!
//! | Face        | Font            | Size           | Bold |
//! |-------------|-----------------|----------------|------|
//! | title       | 方正小标宋简体  | 22pt (二号)    | no   |
//! | heading     | 黑体            | 16pt (三号)    | no   |
//! | subheading  | 楷体_GB2312     | 16pt (三号)    | yes  |
//! | body        | 仿宋_GB2312     | 16pt (三号)    | no   |
//! | footer      | 宋体            | 14pt (四号)    | no   |
//!
//! Indented paragraphs use a two-character (32pt) first-line indent.

use gongwen_ast::{Alignment, Font, Role, StyledSegment};
use serde::{Deserialize, Serialize};

/// Typeface slots a segment can be set in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    Title,
    Heading,
    Subheading,
    Body,
    Footer,
}

/// Font, size and weight of one face
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceRule {
    pub font: Font,
    pub size_pt: f32,
    #[serde(default)]
    pub bold: bool,
}

impl FaceRule {
    pub const fn new(font: Font, size_pt: f32, bold: bool) -> Self {
        Self {
            font,
            size_pt,
            bold,
        }
    }
}

/// A face as written in configuration; absent keys keep the default
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FaceOverride {
    pub font: Option<Font>,
    pub size_pt: Option<f32>,
    pub bold: Option<bool>,
}

impl FaceOverride {
    /// Lay the given keys over `base`
    pub fn apply(self, base: FaceRule) -> FaceRule {
        FaceRule {
            font: self.font.unwrap_or(base.font),
            size_pt: self.size_pt.unwrap_or(base.size_pt),
            bold: self.bold.unwrap_or(base.bold),
        }
    }
}

/// Configuration shape of [`Typography`]
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TypographyOverride {
    pub title: FaceOverride,
    pub heading: FaceOverride,
    pub subheading: FaceOverride,
    pub body: FaceOverride,
    pub footer: FaceOverride,
    pub indent_pt: Option<f32>,
}

impl From<TypographyOverride> for Typography {
    fn from(o: TypographyOverride) -> Self {
        let base = Typography::default();
        Self {
            title: o.title.apply(base.title),
            heading: o.heading.apply(base.heading),
            subheading: o.subheading.apply(base.subheading),
            body: o.body.apply(base.body),
            footer: o.footer.apply(base.footer),
            indent_pt: o.indent_pt.unwrap_or(base.indent_pt),
        }
    }
}

/// Full typography table, overridable from configuration
///
/// Deserializes through [`TypographyOverride`], so any key may be left
/// out, including keys inside a face table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "TypographyOverride")]
pub struct Typography {
    pub title: FaceRule,
    pub heading: FaceRule,
    pub subheading: FaceRule,
    pub body: FaceRule,
    pub footer: FaceRule,
    /// Two-character indent in points
    pub indent_pt: f32,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            title: FaceRule::new(Font::FangzhengXiaobiaosong, 22.0, false),
            heading: FaceRule::new(Font::Heiti, 16.0, false),
            subheading: FaceRule::new(Font::KaitiGb2312, 16.0, true),
            body: FaceRule::new(Font::FangsongGb2312, 16.0, false),
            footer: FaceRule::new(Font::Songti, 14.0, false),
            indent_pt: 32.0,
        }
    }
}

impl Typography {
    /// Rule for a face
    pub fn face(&self, face: Face) -> FaceRule {
        match face {
            Face::Title => self.title,
            Face::Heading => self.heading,
            Face::Subheading => self.subheading,
            Face::Body => self.body,
            Face::Footer => self.footer,
        }
    }

    /// Start an empty segment set in `face`
    pub fn segment(&self, role: Role, face: Face) -> StyledSegment {
        let rule = self.face(face);
        StyledSegment::new(role, rule.font, rule.size_pt).with_bold(rule.bold)
    }
}

/// How a body block of a given heading level is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRule {
    pub role: Role,
    pub face: Face,
    pub align: Alignment,
}

/// Rule for plain paragraphs, demoted `h1` blocks and unknown levels
pub const BODY_RULE: BlockRule = BlockRule {
    role: Role::BodyParagraph,
    face: Face::Body,
    align: Alignment::Justify,
};

/// Heading level -> layout. Level 1 is the title and is absent on purpose.
const HEADING_TABLE: [(u8, BlockRule); 4] = [
    (
        2,
        BlockRule {
            role: Role::Heading2,
            face: Face::Heading,
            align: Alignment::Left,
        },
    ),
    (
        3,
        BlockRule {
            role: Role::Heading3,
            face: Face::Subheading,
            align: Alignment::Left,
        },
    ),
    (
        4,
        BlockRule {
            role: Role::Heading4,
            face: Face::Body,
            align: Alignment::Justify,
        },
    ),
    (
        5,
        BlockRule {
            role: Role::Heading5,
            face: Face::Body,
            align: Alignment::Justify,
        },
    ),
];

/// Look up the layout of a heading level, falling back to body text
pub fn heading_rule(level: u8) -> BlockRule {
    HEADING_TABLE
        .iter()
        .find(|(l, _)| *l == level)
        .map(|(_, rule)| *rule)
        .unwrap_or(BODY_RULE)
}
