//! Input kind detection for word-processing documents.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// ZIP file magic bytes: PK\x03\x04
pub const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// Document kinds accepted by extension.
///
/// Only [`InputKind::Docx`] is actually parsed; the others are accepted so the
/// container stage can report a precise error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Office Open XML word-processing document (.docx)
    Docx,
    /// Legacy binary Word document (.doc)
    Doc,
    /// Rich Text Format (.rtf)
    Rtf,
    /// OpenDocument text (.odt)
    Odt,
}

impl InputKind {
    /// All accepted kinds.
    pub const ALL: [InputKind; 4] = [
        InputKind::Docx,
        InputKind::Doc,
        InputKind::Rtf,
        InputKind::Odt,
    ];

    /// Returns the file extension for this kind.
    pub fn extension(&self) -> &'static str {
        match self {
            InputKind::Docx => "docx",
            InputKind::Doc => "doc",
            InputKind::Rtf => "rtf",
            InputKind::Odt => "odt",
        }
    }

    /// Returns a human-readable name for this kind.
    pub fn name(&self) -> &'static str {
        match self {
            InputKind::Docx => "Word Document",
            InputKind::Doc => "Word 97-2003 Document",
            InputKind::Rtf => "Rich Text Document",
            InputKind::Odt => "OpenDocument Text",
        }
    }

    /// Map a file extension (without dot, any case) to a kind.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        Self::ALL.into_iter().find(|kind| kind.extension() == ext)
    }

    /// Whether the kind is stored as a ZIP container.
    pub fn is_zip_based(&self) -> bool {
        matches!(self, InputKind::Docx | InputKind::Odt)
    }
}

impl std::fmt::Display for InputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Detect the input kind from a path's extension.
///
/// # Example
///
/// ```
/// use docxtext::detect::{detect_kind_from_path, InputKind};
///
/// assert_eq!(detect_kind_from_path("report.DOCX")?, InputKind::Docx);
/// assert!(detect_kind_from_path("notes.txt").is_err());
/// # Ok::<(), docxtext::Error>(())
/// ```
pub fn detect_kind_from_path(path: impl AsRef<Path>) -> Result<InputKind> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    InputKind::from_extension(ext)
        .ok_or_else(|| Error::UnsupportedFormat(format!("extension {:?}", ext)))
}

/// Check whether a byte slice starts with the ZIP magic.
pub fn has_zip_magic(data: &[u8]) -> bool {
    data.len() >= ZIP_MAGIC.len() && data[..ZIP_MAGIC.len()] == ZIP_MAGIC
}

/// Check whether the file at `path` starts with the ZIP magic.
pub fn file_has_zip_magic(path: impl AsRef<Path>) -> Result<bool> {
    let mut file = File::open(path.as_ref())?;
    let mut head = [0u8; 4];
    let mut read = 0;
    while read < head.len() {
        let n = file.read(&mut head[read..])?;
        if n == 0 {
            break;
        }
        read += n;
    }
    Ok(has_zip_magic(&head[..read]))
}
