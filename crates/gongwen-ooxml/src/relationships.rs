//! Relationship parts (`_rels/*.rels`)
//!
//! OOXML maps relationship IDs to part targets through these files. The
//! writer only ever creates internal targets, numbered from `rId1`.
//!
//! # Example
//!
//! ```
//! use gongwen_ooxml::relationships::Relationships;
//!
//! let mut rels = Relationships::new();
//! let id = rels.add("footer1.xml", Relationships::TYPE_FOOTER);
//! assert_eq!(id, "rId1");
//! assert!(rels.to_xml().contains(r#"Target="footer1.xml""#));
//! ```

use std::collections::HashMap;

use crate::xml::{escape_xml, XML_DECLARATION};

/// OOXML namespace for relationships
pub const RELATIONSHIPS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

/// Relationship type URIs used by the package
impl Relationships {
    /// Main document relationship type
    pub const TYPE_OFFICE_DOCUMENT: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    /// Core properties relationship type
    pub const TYPE_CORE_PROPERTIES: &'static str =
        "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
    /// Styles relationship type
    pub const TYPE_STYLES: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
    /// Footer relationship type
    pub const TYPE_FOOTER: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/footer";
}

/// A relationship target with its type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipTarget {
    /// Target part path, relative to the source part
    pub target: String,
    /// The relationship type URI
    pub rel_type: String,
}

/// Relationships of one source part, in insertion order
#[derive(Debug, Clone)]
pub struct Relationships {
    order: Vec<String>,
    map: HashMap<String, RelationshipTarget>,
    /// Counter for generating unique IDs (starts at 1)
    next_id_counter: u32,
}

impl Default for Relationships {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            map: HashMap::new(),
            next_id_counter: 1,
        }
    }
}

impl Relationships {
    /// Create an empty relationships map
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a relationship and return the generated ID (e.g. "rId3")
    pub fn add(&mut self, target: impl Into<String>, rel_type: impl Into<String>) -> String {
        let id = format!("rId{}", self.next_id_counter);
        self.next_id_counter += 1;

        self.order.push(id.clone());
        self.map.insert(
            id.clone(),
            RelationshipTarget {
                target: target.into(),
                rel_type: rel_type.into(),
            },
        );

        id
    }

    /// Serialize to a `.rels` part
    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str(XML_DECLARATION);
        xml.push('\n');
        xml.push_str(&format!(r#"<Relationships xmlns="{}">"#, RELATIONSHIPS_NS));
        xml.push('\n');

        for (id, rel) in self.iter() {
            xml.push_str(&format!(
                "  <Relationship Id=\"{}\" Type=\"{}\" Target=\"{}\"/>\n",
                escape_xml(id),
                escape_xml(&rel.rel_type),
                escape_xml(&rel.target)
            ));
        }

        xml.push_str("</Relationships>");
        xml
    }

    /// Get the target for a relationship ID
    pub fn get(&self, id: &str) -> Option<&str> {
        self.map.get(id).map(|r| r.target.as_str())
    }

    /// Get the number of relationships
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if there are no relationships
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate over relationships in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RelationshipTarget)> {
        self.order
            .iter()
            .filter_map(|id| self.map.get(id).map(|rel| (id.as_str(), rel)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_generates_sequential_ids() {
        let mut rels = Relationships::new();
        assert!(rels.is_empty());
        assert_eq!(rels.add("styles.xml", Relationships::TYPE_STYLES), "rId1");
        assert_eq!(rels.add("footer1.xml", Relationships::TYPE_FOOTER), "rId2");
        assert_eq!(rels.len(), 2);
        assert_eq!(rels.get("rId2"), Some("footer1.xml"));
    }

    #[test]
    fn test_xml_in_insertion_order() {
        let mut rels = Relationships::new();
        rels.add("styles.xml", Relationships::TYPE_STYLES);
        rels.add("footer1.xml", Relationships::TYPE_FOOTER);

        let ids: Vec<&str> = rels.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["rId1", "rId2"]);

        let xml = rels.to_xml();
        let styles = xml.find(r#"Target="styles.xml""#).unwrap();
        let footer = xml.find(r#"Target="footer1.xml""#).unwrap();
        assert!(styles < footer);
        assert!(xml.contains(&format!(
            r#"<Relationship Id="rId2" Type="{}" Target="footer1.xml"/>"#,
            Relationships::TYPE_FOOTER
        )));
    }

    #[test]
    fn test_target_escaped() {
        let mut rels = Relationships::new();
        rels.add("a&b.xml", "t");
        assert!(rels.to_xml().contains("a&amp;b.xml"));
    }
}
