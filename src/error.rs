//! Error types for the docxtext library.

use std::io;
use thiserror::Error;

/// Result type alias for docxtext operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during document processing.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file failed one or more safety checks.
    #[error("Safety check failed: {}", .0.join("; "))]
    SafetyViolation(Vec<String>),

    /// The container could not be opened or enumerated.
    #[error("Container error: {0}")]
    Container(String),

    /// A required part is missing from the container.
    #[error("Missing document part: {0}")]
    MissingPart(String),

    /// Error parsing XML content.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// The file format is recognized but not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A single metadata field could not be interpreted.
    #[error("Invalid metadata field {field}: {value:?}")]
    MetadataField {
        /// Field name
        field: &'static str,
        /// Raw value found in the source
        value: String,
    },

    /// An embedded image could not be recognized.
    #[error("Could not decode image {0}")]
    ImageDecode(String),

    /// The configuration could not be loaded.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Error during rendering.
    #[error("Render error: {0}")]
    Render(String),
}

impl Error {
    /// Human-readable messages for the `errors` list of a processing result.
    ///
    /// A safety violation reports each issue on its own.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Error::SafetyViolation(issues) if !issues.is_empty() => issues.clone(),
            other => vec![other.to_string()],
        }
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::Container(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::XmlParse(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Render(format!("JSON serialization error: {}", err))
    }
}
