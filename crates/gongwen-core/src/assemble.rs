//! Style resolution and assembly
//!
//! Walks a [`CanonicalRecord`] and emits the styled segment sequence in
//! the fixed layout order:
//!
//! ```text
//! title, blank
//! recipient line
//! body
//! blank, attachments
//! blank, signer, date
//! footer
//! ```
//!
//! Optional parts are skipped together with their separator.

use gongwen_ast::{Alignment, Block, BodyContent, CanonicalRecord, Field, Role, StyledSegment};
use tracing::debug;

use crate::quotes::normalize_quotes;
use crate::typography::{heading_rule, BlockRule, Face, Typography, BODY_RULE};

/// Label in front of the attachment list
pub const ATTACHMENT_LABEL: &str = "附件：";

/// Full-width colon closing the recipient line
pub const RECIPIENT_SUFFIX: &str = "：";

const CJK_NUMERALS: [char; 10] = ['一', '二', '三', '四', '五', '六', '七', '八', '九', '十'];

/// Assemble a record using the default typography
pub fn assemble(record: &CanonicalRecord) -> Vec<StyledSegment> {
    Assembler::new(&Typography::default()).assemble(record)
}

/// Segment builder for one record
pub struct Assembler<'a> {
    typography: &'a Typography,
    output: Vec<StyledSegment>,
}

impl<'a> Assembler<'a> {
    pub fn new(typography: &'a Typography) -> Self {
        Self {
            typography,
            output: Vec::new(),
        }
    }

    /// Emit every segment of `record` in layout order
    pub fn assemble(mut self, record: &CanonicalRecord) -> Vec<StyledSegment> {
        self.generate_title(&record.title);
        self.generate_recipients(&record.recipients);

        match &record.body {
            BodyContent::Blocks(blocks) => self.generate_blocks(blocks),
            BodyContent::Paragraphs(paragraphs) => self.generate_paragraphs(paragraphs),
        }

        self.generate_attachments(&record.attachments);
        self.generate_signature(&record.signer, &record.date);
        self.generate_footer();

        debug!(segments = self.output.len(), "document assembled");
        self.output
    }

    fn push_text(&mut self, segment: StyledSegment, text: &str) {
        self.output
            .push(segment.with_text(normalize_quotes(text).into_owned()));
    }

    fn push_blank(&mut self) {
        let blank = self.typography.segment(Role::Blank, Face::Body);
        self.output.push(blank);
    }

    fn generate_title(&mut self, title: &str) {
        if title.is_empty() {
            return;
        }
        let segment = self
            .typography
            .segment(Role::Title, Face::Title)
            .with_align(Alignment::Center);
        self.push_text(segment, title);
        self.push_blank();
    }

    fn generate_recipients(&mut self, recipients: &str) {
        if recipients.is_empty() {
            return;
        }
        let segment = self.typography.segment(Role::Recipient, Face::Body);
        self.push_text(segment, &format!("{}{}", recipients, RECIPIENT_SUFFIX));
    }

    /// Body from classified blocks; the first `h1` is the title and is
    /// skipped, later ones are demoted to body paragraphs
    fn generate_blocks(&mut self, blocks: &[Block]) {
        let mut title_skipped = false;
        for block in blocks {
            let rule = match block {
                Block::Heading(h) if h.level == 1 => {
                    if !title_skipped {
                        title_skipped = true;
                        continue;
                    }
                    BODY_RULE
                }
                Block::Heading(h) => heading_rule(h.level),
                Block::Paragraph(_) => BODY_RULE,
            };
            self.generate_indented(rule, block.text());
        }
    }

    /// Body from flat paragraphs, classified by their leading characters
    fn generate_paragraphs(&mut self, paragraphs: &[String]) {
        for text in paragraphs {
            self.generate_indented(classify_paragraph(text), text);
        }
    }

    fn generate_indented(&mut self, rule: BlockRule, text: &str) {
        let segment = self
            .typography
            .segment(rule.role, rule.face)
            .with_align(rule.align)
            .with_first_line_indent(self.typography.indent_pt);
        self.push_text(segment, text);
    }

    fn generate_attachments(&mut self, attachments: &[String]) {
        if attachments.is_empty() {
            return;
        }
        self.push_blank();

        let indent = self.typography.indent_pt;
        if let [only] = attachments {
            let segment = self
                .typography
                .segment(Role::AttachmentSingle, Face::Body)
                .with_left_indent(indent);
            self.push_text(segment, &format!("{}{}", ATTACHMENT_LABEL, only));
            return;
        }

        // Continuation lines are padded so the numbers line up under the
        // first one.
        let padding = " ".repeat(4);
        for (idx, name) in attachments.iter().enumerate() {
            let prefix = if idx == 0 { ATTACHMENT_LABEL } else { padding.as_str() };
            let segment = self
                .typography
                .segment(Role::AttachmentItem, Face::Body)
                .with_left_indent(indent);
            self.push_text(segment, &format!("{}{}. {}", prefix, idx + 1, name));
        }
    }

    fn generate_signature(&mut self, signer: &str, date: &str) {
        if signer.is_empty() && date.is_empty() {
            return;
        }
        self.push_blank();
        for (role, text) in [(Role::Signer, signer), (Role::Date, date)] {
            if text.is_empty() {
                continue;
            }
            let segment = self
                .typography
                .segment(role, Face::Body)
                .with_align(Alignment::Right);
            self.push_text(segment, text);
        }
    }

    fn generate_footer(&mut self) {
        let footer = self
            .typography
            .segment(Role::Footer, Face::Footer)
            .with_align(Alignment::Center)
            .with_text("— ")
            .with_field(Field::PageNumber)
            .with_text(" —");
        self.output.push(footer);
    }
}

/// Guess the heading level of a flat-body paragraph
///
/// `一、…` reads as a first-level heading and `（一）…` as a second-level
/// one. Only used when the record carries no blocks.
pub fn classify_paragraph(text: &str) -> BlockRule {
    let text = text.trim();
    if text.starts_with(CJK_NUMERALS) && text.chars().take(3).any(|c| c == '、') {
        return heading_rule(2);
    }
    if text.starts_with('（') && text.chars().take(4).any(|c| c == '）') {
        return heading_rule(3);
    }
    BODY_RULE
}
