//! Document processing pipeline.
//!
//! Safety validation, container read and document part parsing run in that
//! order; text, metadata and image extraction follow on the parsed parts.

use crate::config::ProcessorConfig;
use crate::container::{Container, ZipContainer};
use crate::docx;
use crate::error::{Error, Result};
use crate::model::{
    DocumentMetadata, DocumentPackage, ParsedNode, ProcessingResult, APP_PROPERTIES_PART,
    CORE_PROPERTIES_PART, DOCUMENT_PART,
};
use crate::render;
use crate::safety::{FileSafetyValidator, SafetyReport, SafetyValidator};
use crate::xml;
use std::path::{Path, PathBuf};

/// Extracts text, metadata and images from word-processing documents.
///
/// # Example
///
/// ```no_run
/// use docxtext::{DocumentProcessor, ProcessorConfig};
/// use docxtext::render::OutputFormat;
///
/// let processor = DocumentProcessor::new(
///     ProcessorConfig::new().with_output_format(OutputFormat::Markdown),
/// );
/// let result = processor.parse_document("report.docx");
/// if result.success {
///     println!("{}", result.content.unwrap_or_default());
/// } else {
///     eprintln!("{}", result.errors.join("\n"));
/// }
/// ```
pub struct DocumentProcessor {
    config: ProcessorConfig,
    safety: Box<dyn SafetyValidator + Send + Sync>,
    container: Box<dyn Container + Send + Sync>,
}

impl DocumentProcessor {
    /// Create a processor with the filesystem validator and ZIP container.
    pub fn new(config: ProcessorConfig) -> Self {
        Self::with_collaborators(config, FileSafetyValidator::new(), ZipContainer::new())
    }

    /// Create a processor with custom collaborators.
    pub fn with_collaborators(
        config: ProcessorConfig,
        safety: impl SafetyValidator + Send + Sync + 'static,
        container: impl Container + Send + Sync + 'static,
    ) -> Self {
        Self {
            config,
            safety: Box::new(safety),
            container: Box::new(container),
        }
    }

    /// The configuration in effect.
    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Process one document.
    ///
    /// Never fails: fatal problems come back as `success == false` with the
    /// messages in `errors`.
    pub fn parse_document(&self, path: impl AsRef<Path>) -> ProcessingResult {
        let path = path.as_ref();
        let mut warnings = Vec::new();

        match self.process(path, &mut warnings) {
            Ok(result) => result,
            Err(e) => {
                log::debug!("{}: {}", path.display(), e);
                ProcessingResult::failure(&e, warnings)
            }
        }
    }

    /// Process one document, returning the first fatal error as `Err`.
    pub fn try_parse_document(&self, path: impl AsRef<Path>) -> Result<ProcessingResult> {
        let mut warnings = Vec::new();
        self.process(path.as_ref(), &mut warnings)
    }

    /// Copy the input next to itself through the safety collaborator.
    pub fn create_backup(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        self.safety.create_backup(path.as_ref())
    }

    fn process(&self, path: &Path, warnings: &mut Vec<String>) -> Result<ProcessingResult> {
        let report = if self.config.safety_checks {
            Some(self.check_safety(path)?)
        } else {
            None
        };

        let package = self.container.read_all(path)?;
        log::debug!("{}: {} parts", path.display(), package.len());

        let document_xml = package
            .xml(DOCUMENT_PART)
            .ok_or_else(|| Error::MissingPart(DOCUMENT_PART.to_string()))?;
        let document = xml::parse(document_xml)?;
        let text = docx::extract_text(&document);
        log::debug!("{}: extracted {} chars", path.display(), text.chars().count());

        let metadata = if self.config.include_metadata {
            Some(read_metadata(&package, warnings))
        } else {
            None
        };

        let images = if self.config.extract_images {
            let scan = docx::collect_images(&package);
            warnings.extend(scan.failures.iter().map(ToString::to_string));
            Some(scan.images)
        } else {
            None
        };

        let content = render::render(&text, self.config.output_format, metadata.as_ref())?;

        Ok(ProcessingResult {
            success: true,
            content: Some(content),
            metadata,
            images,
            file_hash: report.as_ref().map(|r| r.hash.clone()),
            file_size: report.as_ref().map(|r| r.file_size),
            warnings: std::mem::take(warnings),
            errors: Vec::new(),
        })
    }

    fn check_safety(&self, path: &Path) -> Result<SafetyReport> {
        let report = self.safety.validate(path)?;
        if !report.is_safe {
            return Err(Error::SafetyViolation(report.issues));
        }
        Ok(report)
    }
}

impl std::fmt::Debug for DocumentProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentProcessor")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Parse the property parts and build metadata; failures only add warnings.
fn read_metadata(package: &DocumentPackage, warnings: &mut Vec<String>) -> DocumentMetadata {
    let core = parse_auxiliary(package, CORE_PROPERTIES_PART, warnings);
    let app = parse_auxiliary(package, APP_PROPERTIES_PART, warnings);
    docx::extract_metadata(core.as_ref(), app.as_ref())
}

fn parse_auxiliary(
    package: &DocumentPackage,
    part: &str,
    warnings: &mut Vec<String>,
) -> Option<ParsedNode> {
    let xml = package.xml(part)?;
    match xml::parse(xml) {
        Ok(node) => Some(node),
        Err(e) => {
            log::warn!("ignoring {}: {}", part, e);
            warnings.push(format!("Could not read {}: {}", part, e));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PartContent;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    struct StubSafety {
        report: SafetyReport,
    }

    impl SafetyValidator for StubSafety {
        fn validate(&self, _path: &Path) -> Result<SafetyReport> {
            Ok(self.report.clone())
        }

        fn create_backup(&self, path: &Path) -> Result<PathBuf> {
            Ok(path.with_extension("bak"))
        }
    }

    struct StubContainer {
        parts: Vec<(&'static str, PartContent)>,
        called: Arc<AtomicBool>,
    }

    impl StubContainer {
        fn new(parts: Vec<(&'static str, PartContent)>) -> Self {
            Self {
                parts,
                called: Arc::new(AtomicBool::new(false)),
            }
        }
    }

    impl Container for StubContainer {
        fn read_all(&self, _path: &Path) -> Result<DocumentPackage> {
            self.called.store(true, Ordering::SeqCst);
            let mut package = DocumentPackage::new();
            for (name, content) in &self.parts {
                package.insert(*name, content.clone());
            }
            Ok(package)
        }
    }

    fn xml_part(name: &'static str, xml: &str) -> (&'static str, PartContent) {
        (name, PartContent::Xml(xml.to_string()))
    }

    fn hello_document() -> (&'static str, PartContent) {
        xml_part(
            DOCUMENT_PART,
            "<w:document><w:body><w:p><w:r><w:t>Hello</w:t></w:r></w:p></w:body></w:document>",
        )
    }

    fn safe() -> StubSafety {
        StubSafety {
            report: SafetyReport::safe("abc123", 42),
        }
    }

    #[test]
    fn test_unsafe_file_skips_container() {
        let container = StubContainer::new(vec![hello_document()]);
        let called = Arc::clone(&container.called);
        let safety = StubSafety {
            report: SafetyReport::unsafe_with(vec!["Unsupported file extension".to_string()]),
        };
        let processor =
            DocumentProcessor::with_collaborators(ProcessorConfig::default(), safety, container);

        let result = processor.parse_document("notes.exe");
        assert!(!result.success);
        assert!(result.content.is_none());
        assert_eq!(result.errors, vec!["Unsupported file extension"]);
        assert!(!called.load(Ordering::SeqCst));
    }

    #[test]
    fn test_safety_checks_disabled() {
        let safety = StubSafety {
            report: SafetyReport::unsafe_with(vec!["never consulted".to_string()]),
        };
        let config = ProcessorConfig::default().with_safety_checks(false);
        let container = StubContainer::new(vec![hello_document()]);
        let processor = DocumentProcessor::with_collaborators(config, safety, container);

        let result = processor.parse_document("in.docx");
        assert!(result.success);
        assert_eq!(result.content.as_deref(), Some("Hello"));
        assert!(result.file_hash.is_none());
    }

    #[test]
    fn test_missing_document_part() {
        let container = StubContainer::new(vec![xml_part(CORE_PROPERTIES_PART, "<x/>")]);
        let processor =
            DocumentProcessor::with_collaborators(ProcessorConfig::default(), safe(), container);

        let result = processor.parse_document("in.docx");
        assert!(!result.success);
        assert_eq!(result.errors, vec!["Missing document part: word/document.xml"]);
    }

    #[test]
    fn test_malformed_document_part_is_fatal() {
        let container = StubContainer::new(vec![xml_part(DOCUMENT_PART, "<w:document><w:body>")]);
        let processor =
            DocumentProcessor::with_collaborators(ProcessorConfig::default(), safe(), container);

        let result = processor.parse_document("in.docx");
        assert!(!result.success);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].starts_with("XML parse error"));
    }

    #[test]
    fn test_metadata_failures_are_warnings() {
        let container = StubContainer::new(vec![
            hello_document(),
            xml_part(CORE_PROPERTIES_PART, "<cp:coreProperties><dc:title>"),
            xml_part(APP_PROPERTIES_PART, "<Properties><Pages>3</Pages></Properties>"),
        ]);
        let processor =
            DocumentProcessor::with_collaborators(ProcessorConfig::default(), safe(), container);

        let result = processor.parse_document("in.docx");
        assert!(result.success);
        assert!(result.errors.is_empty());
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].starts_with("Could not read docProps/core.xml"));

        let meta = result.metadata.unwrap();
        assert_eq!(meta.pages, Some(3));
        assert!(meta.title.is_none());
        assert_eq!(result.file_hash.as_deref(), Some("abc123"));
        assert_eq!(result.file_size, Some(42));
    }

    #[test]
    fn test_metadata_and_images_respect_config() {
        let container = StubContainer::new(vec![
            hello_document(),
            ("word/media/image1.gif", PartContent::Binary(b"GIF89a\x01\x00".to_vec())),
            ("word/media/broken.png", PartContent::Binary(b"nope".to_vec())),
        ]);
        let config = ProcessorConfig::default()
            .with_metadata(false)
            .with_extract_images(true);
        let processor = DocumentProcessor::with_collaborators(config, safe(), container);

        let result = processor.parse_document("in.docx");
        assert!(result.success);
        assert!(result.metadata.is_none());
        let images = result.images.unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].mime_type, "image/gif");
        assert_eq!(
            result.warnings,
            vec!["Could not decode image word/media/broken.png"]
        );
    }

    #[test]
    fn test_output_format_applied() {
        let config = ProcessorConfig::default().with_output_format(render::OutputFormat::Html);
        let container = StubContainer::new(vec![hello_document()]);
        let processor = DocumentProcessor::with_collaborators(config, safe(), container);

        let content = processor.parse_document("in.docx").content.unwrap();
        assert!(content.starts_with("<!DOCTYPE html>"));
        assert!(content.contains("<p>Hello</p>"));
    }

    #[test]
    fn test_try_parse_document_surfaces_error() {
        let processor = DocumentProcessor::with_collaborators(
            ProcessorConfig::default(),
            safe(),
            StubContainer::new(Vec::new()),
        );
        let err = processor.try_parse_document("in.docx").unwrap_err();
        assert!(matches!(err, Error::MissingPart(ref part) if part == DOCUMENT_PART));
    }

    #[test]
    fn test_create_backup_delegates() {
        let processor = DocumentProcessor::with_collaborators(
            ProcessorConfig::default(),
            safe(),
            StubContainer::new(Vec::new()),
        );
        let backup = processor.create_backup("dir/in.docx").unwrap();
        assert_eq!(backup, PathBuf::from("dir/in.bak"));
    }
}
