//! # docxtext
//!
//! Text, metadata and image extraction from Word (DOCX) documents.
//!
//! A document goes through safety validation, is opened as a ZIP package,
//! its main part is parsed into a generic node tree, and text is pulled out
//! of that tree with a structured walk (falling back to a permissive leaf scan
//! for odd layouts). The result can be rendered as plain text, Markdown, HTML
//! or JSON.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docxtext::{parse_document, ProcessorConfig};
//!
//! // Simple text extraction
//! let text = docxtext::extract_text("document.docx")?;
//! println!("{}", text);
//!
//! // Full processing with metadata and a structured result
//! let result = parse_document("document.docx", &ProcessorConfig::default());
//! if let Some(meta) = &result.metadata {
//!     println!("Title: {:?}", meta.title);
//! }
//! # Ok::<(), docxtext::Error>(())
//! ```
//!
//! ## Working on Parsed Trees
//!
//! ```
//! use docxtext::{docx, xml};
//!
//! let tree = xml::parse(
//!     "<w:document><w:body><w:p><w:r><w:t>Quarterly summary</w:t></w:r></w:p></w:body></w:document>",
//! )?;
//! assert_eq!(docx::extract_text(&tree), "Quarterly summary");
//! # Ok::<(), docxtext::Error>(())
//! ```

pub mod config;
pub mod container;
pub mod detect;
pub mod docx;
pub mod error;
pub mod model;
pub mod processor;
pub mod render;
pub mod safety;
pub mod xml;

// Re-exports
pub use config::ProcessorConfig;
pub use container::{Container, ZipContainer};
pub use detect::{detect_kind_from_path, InputKind};
pub use error::{Error, Result};
pub use model::{
    DocumentMetadata, DocumentPackage, Element, ImageResource, NodeValue, ParsedNode,
    PartContent, ProcessingResult,
};
pub use processor::DocumentProcessor;
pub use render::{convert_to_format, OutputFormat};
pub use safety::{FileSafetyValidator, SafetyLimits, SafetyReport, SafetyValidator};

use std::path::Path;

/// Process a document with the default collaborators.
///
/// # Example
///
/// ```no_run
/// use docxtext::{parse_document, ProcessorConfig, OutputFormat};
///
/// let config = ProcessorConfig::new().with_output_format(OutputFormat::Json);
/// let result = parse_document("document.docx", &config);
/// println!("{}", result.content.unwrap_or_default());
/// ```
pub fn parse_document(path: impl AsRef<Path>, config: &ProcessorConfig) -> ProcessingResult {
    DocumentProcessor::new(config.clone()).parse_document(path)
}

/// Extract plain text from a document.
///
/// Metadata and images are skipped; the first fatal error is returned.
///
/// # Example
///
/// ```no_run
/// let text = docxtext::extract_text("document.docx")?;
/// println!("{}", text);
/// # Ok::<(), docxtext::Error>(())
/// ```
pub fn extract_text(path: impl AsRef<Path>) -> Result<String> {
    let config = ProcessorConfig::new()
        .with_metadata(false)
        .with_output_format(OutputFormat::Text);
    let result = DocumentProcessor::new(config).try_parse_document(path)?;
    Ok(result.content.unwrap_or_default())
}
