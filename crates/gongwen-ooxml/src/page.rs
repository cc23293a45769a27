//! Page geometry and line spacing
//!
//! Lengths are configured in the units typesetters use (points and
//! centimetres) and converted to twips (1/20 pt) when written.

use serde::{Deserialize, Serialize};

/// A4 width in twips
pub const A4_WIDTH_TWIPS: u32 = 11906;
/// A4 height in twips
pub const A4_HEIGHT_TWIPS: u32 = 16838;

/// Header distance from the page edge (1.5cm)
pub const HEADER_DISTANCE_TWIPS: u32 = 851;
/// Footer distance from the page edge (1.75cm)
pub const FOOTER_DISTANCE_TWIPS: u32 = 992;

/// Convert points to twips
pub fn pt_to_twips(pt: f32) -> u32 {
    (pt * 20.0).round().max(0.0) as u32
}

/// Convert centimetres to twips
pub fn cm_to_twips(cm: f32) -> u32 {
    (cm * 1440.0 / 2.54).round().max(0.0) as u32
}

/// Convert points to half-points (the unit of `w:sz`)
pub fn pt_to_half_points(pt: f32) -> u32 {
    (pt * 2.0).round().max(0.0) as u32
}

/// Page margins in centimetres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top_cm: f32,
    pub bottom_cm: f32,
    pub left_cm: f32,
    pub right_cm: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top_cm: 3.7,
            bottom_cm: 3.5,
            left_cm: 2.5,
            right_cm: 2.5,
        }
    }
}

/// Document-wide layout policy of the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSetup {
    /// Exact line height of every paragraph
    pub line_spacing_pt: f32,
    pub margins: Margins,
}

impl Default for PageSetup {
    fn default() -> Self {
        Self {
            line_spacing_pt: 29.0,
            margins: Margins::default(),
        }
    }
}

impl PageSetup {
    /// `w:sectPr` children describing page size and margins
    pub fn page_xml(&self) -> String {
        let m = &self.margins;
        format!(
            "<w:pgSz w:w=\"{}\" w:h=\"{}\"/>\n<w:pgMar w:top=\"{}\" w:right=\"{}\" w:bottom=\"{}\" w:left=\"{}\" w:header=\"{}\" w:footer=\"{}\" w:gutter=\"0\"/>\n",
            A4_WIDTH_TWIPS,
            A4_HEIGHT_TWIPS,
            cm_to_twips(m.top_cm),
            cm_to_twips(m.right_cm),
            cm_to_twips(m.bottom_cm),
            cm_to_twips(m.left_cm),
            HEADER_DISTANCE_TWIPS,
            FOOTER_DISTANCE_TWIPS,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_conversions() {
        assert_eq!(pt_to_twips(29.0), 580);
        assert_eq!(pt_to_twips(32.0), 640);
        assert_eq!(cm_to_twips(3.7), 2098);
        assert_eq!(cm_to_twips(3.5), 1984);
        assert_eq!(cm_to_twips(2.5), 1417);
        assert_eq!(pt_to_half_points(22.0), 44);
        assert_eq!(pt_to_half_points(15.5), 31);
    }

    #[test]
    fn test_default_margins_in_page_xml() {
        let xml = PageSetup::default().page_xml();
        assert!(xml.contains(r#"w:w="11906" w:h="16838""#));
        assert!(xml.contains(r#"w:top="2098" w:right="1417" w:bottom="1984" w:left="1417""#));
    }

    #[test]
    fn test_partial_override() {
        let setup: PageSetup =
            serde_json::from_str(r#"{"line_spacing_pt": 28, "margins": {"top_cm": 3.0}}"#)
                .unwrap();
        assert_eq!(setup.line_spacing_pt, 28.0);
        assert_eq!(setup.margins.top_cm, 3.0);
        assert_eq!(setup.margins.bottom_cm, 3.5);
    }
}
