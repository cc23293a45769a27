//! DOCX Writer
//!
//! Renders a styled segment sequence into a complete DOCX package built
//! from scratch. Each segment becomes one paragraph with direct
//! formatting; footer segments go to `word/footer1.xml`, which the
//! section properties reference.
//!
//! # Example
//!
//! ```
//! use gongwen_ast::{Alignment, Font, Renderer, Role, StyledSegment};
//! use gongwen_ooxml::DocxWriter;
//!
//! let title = StyledSegment::new(Role::Title, Font::FangzhengXiaobiaosong, 22.0)
//!     .with_align(Alignment::Center)
//!     .with_text("关于开展检查的通知");
//!
//! let bytes = DocxWriter::default().render("关于开展检查的通知", &[title]).unwrap();
//! assert_eq!(&bytes[..2], b"PK");
//! ```

use gongwen_ast::{Alignment, Field, Font, Inline, Renderer, Role, StyledSegment};
use tracing::debug;

use crate::archive::{OoxmlArchive, DOCUMENT_PART};
use crate::content_types::{
    ContentTypes, CONTENT_TYPES_PART, CT_CORE_PROPERTIES, CT_DOCUMENT, CT_FOOTER, CT_STYLES,
};
use crate::error::{OoxmlError, Result};
use crate::page::{pt_to_half_points, pt_to_twips, PageSetup};
use crate::relationships::Relationships;
use crate::styles::styles_xml;
use crate::xml::{escape_xml, R_NS, W_NS, XML_DECLARATION};

const STYLES_PART: &str = "word/styles.xml";
const FOOTER_PART: &str = "word/footer1.xml";
const DOCUMENT_RELS_PART: &str = "word/_rels/document.xml.rels";
const PACKAGE_RELS_PART: &str = "_rels/.rels";
const CORE_PART: &str = "docProps/core.xml";

/// Face used for document defaults when no body paragraph is present
const FALLBACK_FACE: (Font, f32) = (Font::FangsongGb2312, 16.0);

/// DOCX renderer
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxWriter {
    page: PageSetup,
}

impl DocxWriter {
    pub fn new(page: PageSetup) -> Self {
        Self { page }
    }

    pub fn page(&self) -> &PageSetup {
        &self.page
    }

    /// Build the in-memory package for a segment sequence
    pub fn build_archive(&self, title: &str, segments: &[StyledSegment]) -> OoxmlArchive {
        let (body, footer): (Vec<&StyledSegment>, Vec<&StyledSegment>) =
            segments.iter().partition(|s| s.role != Role::Footer);

        let mut archive = OoxmlArchive::new();
        let mut content_types = ContentTypes::new();
        let mut doc_rels = Relationships::new();

        let (font, size) = body
            .iter()
            .find(|s| s.role == Role::BodyParagraph)
            .map(|s| (s.font, s.size_pt))
            .unwrap_or(FALLBACK_FACE);
        archive.set_string(STYLES_PART, styles_xml(font, size, &self.page));
        content_types.add_override(STYLES_PART, CT_STYLES);
        doc_rels.add("styles.xml", Relationships::TYPE_STYLES);

        let footer_id = if footer.is_empty() {
            None
        } else {
            let mut part = PartBuilder::new(&self.page);
            for segment in &footer {
                part.paragraph(segment);
            }
            archive.set_string(FOOTER_PART, part.finish_footer());
            content_types.add_override(FOOTER_PART, CT_FOOTER);
            Some(doc_rels.add("footer1.xml", Relationships::TYPE_FOOTER))
        };

        let mut part = PartBuilder::new(&self.page);
        for segment in &body {
            part.paragraph(segment);
        }
        archive.set_string(DOCUMENT_PART, part.finish_document(footer_id.as_deref()));
        content_types.add_override(DOCUMENT_PART, CT_DOCUMENT);
        archive.set_string(DOCUMENT_RELS_PART, doc_rels.to_xml());

        archive.set_string(CORE_PART, core_properties_xml(title));
        content_types.add_override(CORE_PART, CT_CORE_PROPERTIES);

        let mut package_rels = Relationships::new();
        package_rels.add(DOCUMENT_PART, Relationships::TYPE_OFFICE_DOCUMENT);
        package_rels.add(CORE_PART, Relationships::TYPE_CORE_PROPERTIES);
        archive.set_string(PACKAGE_RELS_PART, package_rels.to_xml());

        archive.set_string(CONTENT_TYPES_PART, content_types.to_xml());

        debug!(
            paragraphs = body.len(),
            footer = footer_id.is_some(),
            "docx package built"
        );
        archive
    }

    /// Build the package and serialize it to bytes
    pub fn generate(&self, title: &str, segments: &[StyledSegment]) -> Result<Vec<u8>> {
        self.build_archive(title, segments).to_bytes()
    }
}

impl Renderer for DocxWriter {
    type Error = OoxmlError;

    fn render(&self, title: &str, segments: &[StyledSegment]) -> Result<Vec<u8>> {
        self.generate(title, segments)
    }
}

/// XML buffer for one story part (document body or footer)
struct PartBuilder<'a> {
    output: String,
    page: &'a PageSetup,
}

impl<'a> PartBuilder<'a> {
    fn new(page: &'a PageSetup) -> Self {
        Self {
            output: String::new(),
            page,
        }
    }

    fn paragraph(&mut self, segment: &StyledSegment) {
        self.output.push_str("<w:p>\n<w:pPr>\n");
        self.output.push_str(&format!(
            "<w:spacing w:before=\"0\" w:after=\"0\" w:line=\"{}\" w:lineRule=\"exact\"/>\n",
            pt_to_twips(self.page.line_spacing_pt)
        ));

        let mut indent = String::new();
        if let Some(left) = segment.left_indent_pt {
            indent.push_str(&format!(" w:left=\"{}\"", pt_to_twips(left)));
        }
        if let Some(first) = segment.first_line_indent_pt {
            indent.push_str(&format!(" w:firstLine=\"{}\"", pt_to_twips(first)));
        }
        if !indent.is_empty() {
            self.output.push_str(&format!("<w:ind{}/>\n", indent));
        }

        self.output
            .push_str(&format!("<w:jc w:val=\"{}\"/>\n", jc_value(segment.align)));
        // Paragraph mark formatting keeps blank separators at body height
        self.output.push_str(&run_properties(segment));
        self.output.push_str("</w:pPr>\n");

        for inline in &segment.content {
            match inline {
                Inline::Text(text) => self.text_run(segment, text),
                Inline::Field(field) => self.field_runs(segment, *field),
            }
        }

        self.output.push_str("</w:p>\n");
    }

    fn text_run(&mut self, segment: &StyledSegment, text: &str) {
        if text.is_empty() {
            return;
        }
        self.output.push_str("<w:r>\n");
        self.output.push_str(&run_properties(segment));
        self.output.push_str(&format!(
            "<w:t xml:space=\"preserve\">{}</w:t>\n",
            escape_xml(text)
        ));
        self.output.push_str("</w:r>\n");
    }

    /// Complex field: begin, instruction, separate, cached result, end
    fn field_runs(&mut self, segment: &StyledSegment, field: Field) {
        let (instruction, placeholder) = match field {
            Field::PageNumber => (" PAGE ", "1"),
        };
        let rpr = run_properties(segment);
        let mut push_run = |inner: String| {
            self.output
                .push_str(&format!("<w:r>\n{}{}\n</w:r>\n", rpr, inner));
        };

        push_run("<w:fldChar w:fldCharType=\"begin\"/>".to_string());
        push_run(format!(
            "<w:instrText xml:space=\"preserve\">{}</w:instrText>",
            instruction
        ));
        push_run("<w:fldChar w:fldCharType=\"separate\"/>".to_string());
        push_run(format!("<w:t>{}</w:t>", placeholder));
        push_run("<w:fldChar w:fldCharType=\"end\"/>".to_string());
    }

    fn finish_document(self, footer_id: Option<&str>) -> String {
        let mut xml = String::from(XML_DECLARATION);
        xml.push('\n');
        xml.push_str(&format!(
            "<w:document xmlns:w=\"{}\" xmlns:r=\"{}\">\n<w:body>\n",
            W_NS, R_NS
        ));
        xml.push_str(&self.output);
        xml.push_str("<w:sectPr>\n");
        if let Some(id) = footer_id {
            xml.push_str(&format!(
                "<w:footerReference w:type=\"default\" r:id=\"{}\"/>\n",
                escape_xml(id)
            ));
        }
        xml.push_str(&self.page.page_xml());
        xml.push_str("</w:sectPr>\n</w:body>\n</w:document>");
        xml
    }

    fn finish_footer(self) -> String {
        let mut xml = String::from(XML_DECLARATION);
        xml.push('\n');
        xml.push_str(&format!("<w:ftr xmlns:w=\"{}\" xmlns:r=\"{}\">\n", W_NS, R_NS));
        xml.push_str(&self.output);
        xml.push_str("</w:ftr>");
        xml
    }
}

/// `w:rPr` for every run of a segment
fn run_properties(segment: &StyledSegment) -> String {
    let family = escape_xml(segment.font.family());
    let size = pt_to_half_points(segment.size_pt);

    let mut rpr = String::from("<w:rPr>\n");
    rpr.push_str(&format!(
        "<w:rFonts w:ascii=\"{0}\" w:hAnsi=\"{0}\" w:eastAsia=\"{0}\"/>\n",
        family
    ));
    if segment.bold {
        rpr.push_str("<w:b/>\n<w:bCs/>\n");
    }
    rpr.push_str(&format!(
        "<w:sz w:val=\"{0}\"/>\n<w:szCs w:val=\"{0}\"/>\n",
        size
    ));
    rpr.push_str("</w:rPr>\n");
    rpr
}

fn jc_value(align: Alignment) -> &'static str {
    match align {
        Alignment::Left => "left",
        Alignment::Center => "center",
        Alignment::Right => "right",
        Alignment::Justify => "both",
    }
}

/// `docProps/core.xml` carrying the document title
fn core_properties_xml(title: &str) -> String {
    let mut xml = String::from(XML_DECLARATION);
    xml.push('\n');
    xml.push_str(
        r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
    );
    if !title.is_empty() {
        xml.push_str(&format!("<dc:title>{}</dc:title>", escape_xml(title)));
    }
    xml.push_str("</cp:coreProperties>");
    xml
}
