//! Output format selection.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Output encoding for extracted text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OutputFormat {
    /// Plain text, unchanged
    #[default]
    Text,
    /// Markdown with heading detection
    Markdown,
    /// Minimal HTML document
    Html,
    /// JSON object with content and metadata
    Json,
}

impl OutputFormat {
    /// Select a format by name, ignoring case.
    ///
    /// Unrecognized names select [`OutputFormat::Text`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "markdown" | "md" => OutputFormat::Markdown,
            "html" | "htm" => OutputFormat::Html,
            "json" => OutputFormat::Json,
            _ => OutputFormat::Text,
        }
    }

    /// Canonical name of the format.
    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Markdown => "markdown",
            OutputFormat::Html => "html",
            OutputFormat::Json => "json",
        }
    }

    /// Conventional file extension for the format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Markdown => "md",
            OutputFormat::Html => "html",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for OutputFormat {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<OutputFormat> for String {
    fn from(format: OutputFormat) -> Self {
        format.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_is_case_insensitive() {
        assert_eq!(OutputFormat::from_name("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::from_name("Markdown"), OutputFormat::Markdown);
        assert_eq!(OutputFormat::from_name("md"), OutputFormat::Markdown);
        assert_eq!(OutputFormat::from_name("HTML"), OutputFormat::Html);
        assert_eq!(OutputFormat::from_name("plain"), OutputFormat::Text);
        assert_eq!(OutputFormat::from_name("pdf"), OutputFormat::Text);
    }

    #[test]
    fn test_serde_uses_names() {
        let json = serde_json::to_string(&OutputFormat::Html).unwrap();
        assert_eq!(json, "\"html\"");
        let format: OutputFormat = serde_json::from_str("\"MD\"").unwrap();
        assert_eq!(format, OutputFormat::Markdown);
    }
}
