//! JSON renderer implementation.

use crate::error::Result;
use crate::model::DocumentMetadata;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// JSON output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonFormat {
    /// Compact single-line JSON
    Compact,
    /// Pretty-printed with 2-space indentation
    #[default]
    Pretty,
}

/// Shape of the rendered JSON document.
#[derive(Serialize)]
struct JsonOutput<'a> {
    content: &'a str,
    metadata: Option<&'a DocumentMetadata>,
    format: &'static str,
    timestamp: String,
}

/// Render extracted text and metadata as a JSON object.
///
/// The object always has the keys `content`, `metadata` (null when absent),
/// `format` and `timestamp`.
pub fn to_json(
    text: &str,
    metadata: Option<&DocumentMetadata>,
    format: JsonFormat,
) -> Result<String> {
    let output = JsonOutput {
        content: text,
        metadata,
        format: "json",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    };

    let json = match format {
        JsonFormat::Compact => serde_json::to_string(&output)?,
        JsonFormat::Pretty => serde_json::to_string_pretty(&output)?,
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_field_set_is_fixed() {
        let mut meta = DocumentMetadata::new();
        meta.title = Some("Report".to_string());
        meta.pages = Some(12);

        let json = to_json("Hello", Some(&meta), JsonFormat::Pretty).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        let object = value.as_object().unwrap();

        let mut keys: Vec<_> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["content", "format", "metadata", "timestamp"]);
        assert_eq!(object["content"], "Hello");
        assert_eq!(object["format"], "json");
        assert_eq!(object["metadata"]["title"], "Report");
        assert_eq!(object["metadata"]["pages"], 12);
        assert!(object["metadata"].get("author").is_none());
    }

    #[test]
    fn test_absent_metadata_is_null() {
        let json = to_json("x", None, JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        let value: Value = serde_json::from_str(&json).unwrap();
        assert!(value["metadata"].is_null());
        assert!(value["timestamp"].as_str().unwrap().ends_with('Z'));
    }
}
