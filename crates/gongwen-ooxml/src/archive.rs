//! Archive handling for DOCX packages
//!
//! A DOCX file is a ZIP archive of XML parts. The archive is kept fully
//! in memory and written with sorted part names so that identical input
//! produces identical bytes.

use std::collections::HashMap;
use std::fs::File;
use std::io::{Cursor, Seek, Write};
use std::path::Path;

use zip::write::ZipWriter;
use zip::{CompressionMethod, DateTime};

use crate::error::Result;

/// Main document part
pub const DOCUMENT_PART: &str = "word/document.xml";

/// An in-memory OOXML package
#[derive(Debug, Default)]
pub struct OoxmlArchive {
    /// All parts in the archive, keyed by path
    files: HashMap<String, Vec<u8>>,
}

impl OoxmlArchive {
    /// Create an empty package
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a part's contents as a string
    pub fn get_string(&self, path: &str) -> Option<String> {
        self.files
            .get(path)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// Check if a part exists in the archive
    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    /// List all parts, sorted
    pub fn file_list(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.files.keys().map(|s| s.as_str()).collect();
        paths.sort_unstable();
        paths
    }

    /// Set a part's contents from a string
    pub fn set_string(&mut self, path: impl Into<String>, contents: impl Into<String>) {
        self.files.insert(path.into(), contents.into().into_bytes());
    }

    /// Write the archive to a file
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.write_to(file)
    }

    /// Write the archive to any writer
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<()> {
        let mut zip = ZipWriter::new(writer);
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default());

        // [Content_Types].xml sorts first, which is where readers expect it
        for path in self.file_list() {
            zip.start_file(path, options)?;
            zip.write_all(&self.files[path])?;
        }

        zip.finish()?;
        Ok(())
    }

    /// Serialize the archive into a byte buffer
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());
        self.write_to(&mut buffer)?;
        Ok(buffer.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn unzip(bytes: Vec<u8>) -> Vec<(String, String)> {
        let mut zip = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        (0..zip.len())
            .map(|i| {
                let mut entry = zip.by_index(i).unwrap();
                let mut content = String::new();
                entry.read_to_string(&mut content).unwrap();
                (entry.name().to_string(), content)
            })
            .collect()
    }

    #[test]
    fn test_file_operations() {
        let mut archive = OoxmlArchive::new();

        archive.set_string("test.xml", "<root/>");
        assert!(archive.contains("test.xml"));
        assert_eq!(archive.get_string("test.xml"), Some("<root/>".to_string()));
        assert_eq!(archive.get_string("missing.xml"), None);
    }

    #[test]
    fn test_zip_entries_sorted() {
        let mut archive = OoxmlArchive::new();
        archive.set_string(DOCUMENT_PART, "<w:document/>");
        archive.set_string("[Content_Types].xml", "<Types/>");

        let entries = unzip(archive.to_bytes().unwrap());
        assert_eq!(
            entries,
            vec![
                ("[Content_Types].xml".to_string(), "<Types/>".to_string()),
                (DOCUMENT_PART.to_string(), "<w:document/>".to_string()),
            ]
        );
    }

    #[test]
    fn test_output_is_deterministic() {
        let mut archive = OoxmlArchive::new();
        archive.set_string("b.xml", "<b/>");
        archive.set_string("a.xml", "<a/>");
        assert_eq!(archive.to_bytes().unwrap(), archive.to_bytes().unwrap());
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.docx");

        let mut archive = OoxmlArchive::new();
        archive.set_string(DOCUMENT_PART, "<w:document/>");
        archive.write_to_file(&path).unwrap();

        let entries = unzip(std::fs::read(&path).unwrap());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, DOCUMENT_PART);
    }
}
