//! Embedded image model.

use serde::{Deserialize, Serialize};

/// An image payload taken from the document's media folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResource {
    /// Part name inside the container (e.g. `word/media/image1.png`)
    pub name: String,

    /// MIME type detected from the payload
    pub mime_type: String,

    /// Binary data
    #[serde(skip)]
    pub data: Vec<u8>,

    /// Size in bytes
    pub size: usize,
}

impl ImageResource {
    /// Create an image resource.
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        let size = data.len();
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            data,
            size,
        }
    }

    /// File name without the folder part.
    pub fn file_name(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }

    /// Get the file extension for this image.
    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/png" => "png",
            "image/jpeg" => "jpg",
            "image/gif" => "gif",
            "image/bmp" => "bmp",
            "image/tiff" => "tiff",
            "image/webp" => "webp",
            "image/x-emf" => "emf",
            "image/x-wmf" => "wmf",
            "image/svg+xml" => "svg",
            _ => "bin",
        }
    }

    /// Sniff the MIME type of an image payload from its leading bytes.
    pub fn sniff_mime_type(data: &[u8]) -> Option<&'static str> {
        let mime = if data.starts_with(b"\x89PNG\r\n\x1a\n") {
            "image/png"
        } else if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            "image/jpeg"
        } else if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            "image/gif"
        } else if data.starts_with(b"BM") && data.len() > 14 {
            "image/bmp"
        } else if data.starts_with(b"II*\0") || data.starts_with(b"MM\0*") {
            "image/tiff"
        } else if data.len() >= 12 && &data[..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            "image/webp"
        } else if data.len() >= 44 && data[..4] == [0x01, 0x00, 0x00, 0x00] && &data[40..44] == b" EMF"
        {
            "image/x-emf"
        } else if data.starts_with(&[0xD7, 0xCD, 0xC6, 0x9A])
            || data.starts_with(&[0x01, 0x00, 0x09, 0x00])
        {
            "image/x-wmf"
        } else if is_svg(data) {
            "image/svg+xml"
        } else {
            return None;
        };
        Some(mime)
    }
}

fn is_svg(data: &[u8]) -> bool {
    let head = &data[..data.len().min(512)];
    let head = String::from_utf8_lossy(head);
    let head = head.trim_start();
    (head.starts_with("<?xml") || head.starts_with("<svg")) && head.contains("<svg")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_common_formats() {
        assert_eq!(
            ImageResource::sniff_mime_type(b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR"),
            Some("image/png")
        );
        assert_eq!(
            ImageResource::sniff_mime_type(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00]),
            Some("image/jpeg")
        );
        assert_eq!(ImageResource::sniff_mime_type(b"GIF89a...."), Some("image/gif"));
        assert_eq!(
            ImageResource::sniff_mime_type(br#"<svg xmlns="http://www.w3.org/2000/svg"/>"#),
            Some("image/svg+xml")
        );
        assert_eq!(ImageResource::sniff_mime_type(b"not an image"), None);
        assert_eq!(ImageResource::sniff_mime_type(&[]), None);
    }

    #[test]
    fn test_file_name_and_extension() {
        let image = ImageResource::new("word/media/image1.jpeg", "image/jpeg", vec![0; 4]);
        assert_eq!(image.file_name(), "image1.jpeg");
        assert_eq!(image.extension(), "jpg");
        assert_eq!(image.size, 4);
    }
}
