//! Processor configuration.

use crate::error::{Error, Result};
use crate::render::OutputFormat;
use serde::{Deserialize, Serialize};

/// Options for a [`DocumentProcessor`](crate::DocumentProcessor).
///
/// Built once and read-only afterwards. Unknown keys are rejected when the
/// configuration is loaded from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct ProcessorConfig {
    /// Collect embedded images from the media folder
    pub extract_images: bool,

    /// Keep formatting hints (currently advisory only)
    pub preserve_formatting: bool,

    /// Read core and application properties
    pub include_metadata: bool,

    /// Encoding of the extracted content
    pub output_format: OutputFormat,

    /// Run safety validation before opening the file
    pub safety_checks: bool,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            extract_images: false,
            preserve_formatting: true,
            include_metadata: true,
            output_format: OutputFormat::Text,
            safety_checks: true,
        }
    }
}

impl ProcessorConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from JSON; absent keys keep their defaults.
    ///
    /// # Example
    ///
    /// ```
    /// use docxtext::{ProcessorConfig, render::OutputFormat};
    ///
    /// let config = ProcessorConfig::from_json(r#"{"outputFormat": "markdown"}"#)?;
    /// assert_eq!(config.output_format, OutputFormat::Markdown);
    /// assert!(config.safety_checks);
    /// # Ok::<(), docxtext::Error>(())
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidConfig(e.to_string()))
    }

    /// Enable or disable image extraction.
    pub fn with_extract_images(mut self, extract: bool) -> Self {
        self.extract_images = extract;
        self
    }

    /// Enable or disable formatting preservation.
    pub fn with_preserve_formatting(mut self, preserve: bool) -> Self {
        self.preserve_formatting = preserve;
        self
    }

    /// Enable or disable metadata extraction.
    pub fn with_metadata(mut self, include: bool) -> Self {
        self.include_metadata = include;
        self
    }

    /// Set the output format.
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Enable or disable safety checks.
    pub fn with_safety_checks(mut self, enabled: bool) -> Self {
        self.safety_checks = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ProcessorConfig::default();
        assert!(!config.extract_images);
        assert!(config.preserve_formatting);
        assert!(config.include_metadata);
        assert_eq!(config.output_format, OutputFormat::Text);
        assert!(config.safety_checks);
    }

    #[test]
    fn test_builder_pattern() {
        let config = ProcessorConfig::new()
            .with_extract_images(true)
            .with_metadata(false)
            .with_output_format(OutputFormat::Html)
            .with_safety_checks(false);

        assert!(config.extract_images);
        assert!(!config.include_metadata);
        assert_eq!(config.output_format, OutputFormat::Html);
        assert!(!config.safety_checks);
    }

    #[test]
    fn test_from_json_rejects_unknown_options() {
        let config = ProcessorConfig::from_json(r#"{"extractImages": true}"#).unwrap();
        assert!(config.extract_images);
        assert!(config.include_metadata);

        let err = ProcessorConfig::from_json(r#"{"extractTables": true}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_unrecognized_format_name_falls_back_to_text() {
        let config = ProcessorConfig::from_json(r#"{"outputFormat": "docbook"}"#).unwrap();
        assert_eq!(config.output_format, OutputFormat::Text);
    }
}
