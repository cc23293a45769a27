//! `word/styles.xml`
//!
//! Every paragraph carries direct formatting, so the styles part only
//! sets document defaults: the body face and the exact line height.

use gongwen_ast::Font;

use crate::page::{pt_to_half_points, pt_to_twips, PageSetup};
use crate::xml::{escape_xml, W_NS, XML_DECLARATION};

/// Build the styles part with `font` at `size_pt` as the default face
pub fn styles_xml(font: Font, size_pt: f32, page: &PageSetup) -> String {
    let family = escape_xml(font.family());
    let size = pt_to_half_points(size_pt);
    let line = pt_to_twips(page.line_spacing_pt);

    let mut xml = String::from(XML_DECLARATION);
    xml.push('\n');
    xml.push_str(&format!("<w:styles xmlns:w=\"{}\">\n", W_NS));
    xml.push_str("<w:docDefaults>\n<w:rPrDefault>\n<w:rPr>\n");
    xml.push_str(&format!(
        "<w:rFonts w:ascii=\"{0}\" w:hAnsi=\"{0}\" w:eastAsia=\"{0}\" w:cs=\"{0}\"/>\n",
        family
    ));
    xml.push_str(&format!(
        "<w:sz w:val=\"{0}\"/>\n<w:szCs w:val=\"{0}\"/>\n",
        size
    ));
    xml.push_str("<w:lang w:val=\"en-US\" w:eastAsia=\"zh-CN\"/>\n");
    xml.push_str("</w:rPr>\n</w:rPrDefault>\n<w:pPrDefault>\n<w:pPr>\n");
    xml.push_str(&format!(
        "<w:spacing w:before=\"0\" w:after=\"0\" w:line=\"{}\" w:lineRule=\"exact\"/>\n",
        line
    ));
    xml.push_str("</w:pPr>\n</w:pPrDefault>\n</w:docDefaults>\n");

    xml.push_str(
        "<w:style w:type=\"paragraph\" w:default=\"1\" w:styleId=\"Normal\">\n<w:name w:val=\"Normal\"/>\n<w:qFormat/>\n</w:style>\n",
    );
    xml.push_str(
        "<w:style w:type=\"paragraph\" w:styleId=\"Footer\">\n<w:name w:val=\"footer\"/>\n<w:basedOn w:val=\"Normal\"/>\n</w:style>\n",
    );
    xml.push_str("</w:styles>");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_carry_body_face() {
        let xml = styles_xml(Font::FangsongGb2312, 16.0, &PageSetup::default());
        assert!(xml.contains(r#"w:eastAsia="仿宋_GB2312""#));
        assert!(xml.contains(r#"<w:sz w:val="32"/>"#));
        assert!(xml.contains(r#"w:line="580" w:lineRule="exact""#));
        assert!(xml.contains(r#"w:styleId="Normal""#));
    }
}
