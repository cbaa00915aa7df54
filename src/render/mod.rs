//! Output rendering for extracted text.
//!
//! This module converts extracted text (plus optional metadata) to plain
//! text, Markdown, HTML, or JSON.
//!
//! # Example
//!
//! ```
//! use docxtext::render::{convert_to_format, render, OutputFormat};
//!
//! let html = render("Hello", OutputFormat::Html, None)?;
//! assert!(html.contains("<p>Hello</p>"));
//!
//! // Unknown format names fall back to plain text
//! assert_eq!(convert_to_format("Hello", "rtf", None)?, "Hello");
//! # Ok::<(), docxtext::Error>(())
//! ```

mod html;
mod json;
mod markdown;
mod options;
mod text;

pub use html::{escape_html, to_html};
pub use json::{to_json, JsonFormat};
pub use markdown::to_markdown;
pub use options::OutputFormat;
pub use text::to_text;

use crate::error::Result;
use crate::model::DocumentMetadata;

/// Render text in the given format.
pub fn render(
    text: &str,
    format: OutputFormat,
    metadata: Option<&DocumentMetadata>,
) -> Result<String> {
    let output = match format {
        OutputFormat::Text => to_text(text),
        OutputFormat::Markdown => to_markdown(text, metadata),
        OutputFormat::Html => to_html(text, metadata),
        OutputFormat::Json => to_json(text, metadata, JsonFormat::Pretty)?,
    };
    Ok(output)
}

/// Render text in the format named by `format` (case-insensitive).
///
/// Unrecognized names render plain text.
pub fn convert_to_format(
    text: &str,
    format: &str,
    metadata: Option<&DocumentMetadata>,
) -> Result<String> {
    render(text, OutputFormat::from_name(format), metadata)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_format_is_identity() {
        let text = "Some  text\n\nwith <markup> & breaks";
        assert_eq!(convert_to_format(text, "docbook", None).unwrap(), text);
        assert_eq!(convert_to_format(text, "", None).unwrap(), text);
    }

    #[test]
    fn test_dispatch_by_name() {
        let json = convert_to_format("Hi", "Json", None).unwrap();
        assert!(json.contains("\"format\": \"json\""));

        let md = convert_to_format("Hi there.", "MARKDOWN", None).unwrap();
        assert_eq!(md, "Hi there.");

        let html = convert_to_format("Hi", "html", None).unwrap();
        assert!(html.contains("<p>Hi</p>"));
    }
}
