//! ZIP container access for word-processing documents.

use crate::error::{Error, Result};
use crate::model::{DocumentPackage, PartContent};
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

/// Reads every part of a document container.
pub trait Container {
    /// Read all parts of the container at `path`.
    fn read_all(&self, path: &Path) -> Result<DocumentPackage>;
}

/// [`Container`] backed by a ZIP archive.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipContainer;

impl ZipContainer {
    /// Create a new ZIP container reader.
    pub fn new() -> Self {
        Self
    }

    /// Read all parts from an in-memory archive.
    pub fn read_bytes(&self, data: Vec<u8>) -> Result<DocumentPackage> {
        read_archive(Cursor::new(data))
    }
}

impl Container for ZipContainer {
    fn read_all(&self, path: &Path) -> Result<DocumentPackage> {
        let file = File::open(path)?;
        read_archive(BufReader::new(file))
    }
}

/// Drain every entry of the archive into a package.
///
/// The archive (and the reader it owns) is dropped when this returns, on
/// success and on error alike.
fn read_archive<R: Read + Seek>(reader: R) -> Result<DocumentPackage> {
    let mut archive = zip::ZipArchive::new(reader)?;
    let mut package = DocumentPackage::new();

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        if entry.is_dir() {
            continue;
        }

        let name = entry.name().to_string();
        // Declared entry sizes are not used for allocation
        let mut bytes = Vec::new();
        entry
            .read_to_end(&mut bytes)
            .map_err(|e| Error::Container(format!("failed to read {}: {}", name, e)))?;

        let content = if is_xml_part(&name) {
            PartContent::Xml(decode_xml_bytes(&bytes)?)
        } else {
            PartContent::Binary(bytes)
        };
        package.insert(name, content);
    }

    log::debug!("read {} parts from container", package.len());
    Ok(package)
}

fn is_xml_part(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    lower.ends_with(".xml") || lower.ends_with(".rels")
}

/// Fix XML encoding declaration from UTF-16 to UTF-8.
///
/// Once UTF-16 bytes are decoded into a Rust string the declaration no longer
/// matches the content, and quick-xml would try to decode it again.
fn fix_xml_encoding_declaration(content: &str) -> String {
    if content.starts_with("<?xml") {
        if let Some(end_decl) = content.find("?>") {
            let (decl, rest) = content.split_at(end_decl + 2);
            let fixed_decl = decl
                .replace("encoding=\"UTF-16\"", "encoding=\"UTF-8\"")
                .replace("encoding='UTF-16'", "encoding='UTF-8'")
                .replace("encoding=\"utf-16\"", "encoding=\"UTF-8\"")
                .replace("encoding='utf-16'", "encoding='UTF-8'");
            return format!("{}{}", fixed_decl, rest);
        }
    }
    content.to_string()
}

/// Decode XML bytes handling different encodings (UTF-8, UTF-16 LE/BE).
///
/// Parts are normally UTF-8, but some producers write UTF-16.
pub fn decode_xml_bytes(bytes: &[u8]) -> Result<String> {
    if let Some(rest) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        return String::from_utf8(rest.to_vec())
            .map_err(|e| Error::XmlParse(format!("invalid UTF-8: {}", e)));
    }

    if let Some(rest) = bytes.strip_prefix(&[0xFF, 0xFE]) {
        let content = decode_utf16(rest, u16::from_le_bytes)?;
        return Ok(fix_xml_encoding_declaration(&content));
    }

    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let content = decode_utf16(rest, u16::from_be_bytes)?;
        return Ok(fix_xml_encoding_declaration(&content));
    }

    match String::from_utf8(bytes.to_vec()) {
        Ok(s) => Ok(s),
        Err(_) => {
            // UTF-16 without BOM: ASCII markup leaves every other byte zero
            if bytes.len() >= 4 && bytes[1] == 0 && bytes[3] == 0 {
                decode_utf16(bytes, u16::from_le_bytes).map(|s| fix_xml_encoding_declaration(&s))
            } else if bytes.len() >= 4 && bytes[0] == 0 && bytes[2] == 0 {
                decode_utf16(bytes, u16::from_be_bytes).map(|s| fix_xml_encoding_declaration(&s))
            } else {
                Ok(String::from_utf8_lossy(bytes).into_owned())
            }
        }
    }
}

fn decode_utf16(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> Result<String> {
    let units = bytes
        .chunks_exact(2)
        .map(|pair| to_unit([pair[0], pair[1]]));

    char::decode_utf16(units)
        .collect::<std::result::Result<String, _>>()
        .map_err(|e| Error::XmlParse(format!("invalid UTF-16: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn build_archive() -> Vec<u8> {
        let mut buffer = Vec::new();
        {
            let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
            let options = SimpleFileOptions::default();
            zip.add_directory("word/", options).unwrap();
            zip.start_file("word/document.xml", options).unwrap();
            zip.write_all(b"<w:document/>").unwrap();
            zip.start_file("_rels/.rels", options).unwrap();
            zip.write_all(b"<Relationships/>").unwrap();
            zip.start_file("word/media/image1.png", options).unwrap();
            zip.write_all(b"\x89PNG\r\n\x1a\n").unwrap();
            zip.finish().unwrap();
        }
        buffer
    }

    /// Overwrite the uncompressed size of the first entry in both headers.
    fn inflate_declared_size(archive: &mut [u8], size: u32) {
        for (signature, offset) in [(b"PK\x03\x04", 22), (b"PK\x01\x02", 24)] {
            let start = archive
                .windows(4)
                .position(|w| w == signature)
                .unwrap();
            archive[start + offset..start + offset + 4].copy_from_slice(&size.to_le_bytes());
        }
    }

    #[test]
    fn test_declared_entry_size_is_not_trusted() {
        let mut buffer = Vec::new();
        {
            let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
            let options = SimpleFileOptions::default()
                .compression_method(zip::CompressionMethod::Deflated);
            zip.start_file("word/document.xml", options).unwrap();
            zip.write_all(b"<w:document/>").unwrap();
            zip.finish().unwrap();
        }
        inflate_declared_size(&mut buffer, 0x7FFF_FFF0);

        // Either outcome is fine as long as nothing is sized from the header
        if let Ok(package) = ZipContainer::new().read_bytes(buffer) {
            assert_eq!(package.xml("word/document.xml"), Some("<w:document/>"));
        }
    }

    #[test]
    fn test_read_bytes_classifies_parts() {
        let package = ZipContainer::new().read_bytes(build_archive()).unwrap();
        assert_eq!(package.len(), 3);
        assert_eq!(package.xml("word/document.xml"), Some("<w:document/>"));
        assert_eq!(package.xml("_rels/.rels"), Some("<Relationships/>"));
        assert!(matches!(
            package.get("word/media/image1.png"),
            Some(PartContent::Binary(_))
        ));
        assert!(!package.contains("word/"));
    }

    #[test]
    fn test_not_a_zip() {
        let err = ZipContainer::new()
            .read_bytes(b"{\\rtf1 hello}".to_vec())
            .unwrap_err();
        assert!(matches!(err, Error::Container(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ZipContainer::new()
            .read_all(Path::new("does/not/exist.docx"))
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_utf16_decoding_function() {
        let utf16_le = b"\xFF\xFE<\0?\0x\0m\0l\0>\0";
        assert_eq!(decode_xml_bytes(utf16_le).unwrap(), "<?xml>");

        let utf16_be = b"\xFE\xFF\0<\0?\0x\0m\0l\0>";
        assert_eq!(decode_xml_bytes(utf16_be).unwrap(), "<?xml>");

        let utf8_bom = b"\xEF\xBB\xBF<?xml>";
        assert_eq!(decode_xml_bytes(utf8_bom).unwrap(), "<?xml>");

        assert_eq!(decode_xml_bytes(b"<?xml>").unwrap(), "<?xml>");
    }

    #[test]
    fn test_utf16_declaration_is_rewritten() {
        let decl = "<?xml version=\"1.0\" encoding=\"UTF-16\"?><a/>";
        let mut bytes = vec![0xFF, 0xFE];
        for unit in decl.encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        let decoded = decode_xml_bytes(&bytes).unwrap();
        assert_eq!(decoded, "<?xml version=\"1.0\" encoding=\"UTF-8\"?><a/>");
    }
}
