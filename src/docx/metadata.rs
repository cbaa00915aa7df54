//! Metadata extraction from core and application properties.

use crate::error::{Error, Result};
use crate::model::{DocumentMetadata, NodeValue, ParsedNode};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Build metadata from the parsed property parts.
///
/// Either part may be absent. Fields that are missing or malformed stay
/// `None`; this never fails.
pub fn extract_metadata(core: Option<&ParsedNode>, app: Option<&ParsedNode>) -> DocumentMetadata {
    let mut meta = DocumentMetadata::new();
    if let Some(core) = core {
        apply_core_properties(&mut meta, core);
    }
    if let Some(app) = app {
        apply_app_properties(&mut meta, app);
    }
    meta
}

/// Read `docProps/core.xml` fields into `meta`.
pub fn apply_core_properties(meta: &mut DocumentMetadata, root: &ParsedNode) {
    let Some(props) = properties_root(root) else {
        return;
    };

    meta.title = field_text(props, "title");
    meta.creator = field_text(props, "creator");
    meta.author = meta.creator.clone();
    meta.subject = field_text(props, "subject");
    meta.description = field_text(props, "description");
    meta.last_modified_by = field_text(props, "lastModifiedBy");
    meta.keywords = field_text(props, "keywords")
        .map(|text| {
            text.split([',', ';'])
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default();
    meta.revision = field_number(props, "revision");
    meta.created = field_date(props, "created");
    meta.modified = field_date(props, "modified");
}

/// Read `docProps/app.xml` fields into `meta`.
pub fn apply_app_properties(meta: &mut DocumentMetadata, root: &ParsedNode) {
    let Some(props) = properties_root(root) else {
        return;
    };

    meta.application = field_text(props, "Application");
    meta.pages = field_number(props, "Pages");
    meta.words = field_number(props, "Words");
    meta.characters = field_number(props, "Characters");
    meta.paragraphs = field_number(props, "Paragraphs");
    meta.lines = field_number(props, "Lines");
}

/// The properties element below the parsed root (`cp:coreProperties`,
/// `Properties`, ...). Accepts the element itself as well.
fn properties_root(root: &ParsedNode) -> Option<&ParsedNode> {
    let element = root.as_element()?;
    let mut entries = element.entries();
    match (entries.next(), entries.next()) {
        (Some((tag, value)), None) if tag.ends_with("Properties") => value.first(),
        _ => Some(root),
    }
}

fn field_text(props: &ParsedNode, local: &str) -> Option<String> {
    let text = props
        .as_element()?
        .get_local(local)
        .and_then(NodeValue::first)?
        .text_content()?
        .trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn field_number(props: &ParsedNode, local: &'static str) -> Option<u32> {
    let raw = field_text(props, local)?;
    match parse_count(local, &raw) {
        Ok(n) => Some(n),
        Err(e) => {
            log::warn!("{}", e);
            None
        }
    }
}

fn field_date(props: &ParsedNode, local: &str) -> Option<DateTime<Utc>> {
    let raw = field_text(props, local)?;
    match parse_date(&raw) {
        Some(date) => Some(date),
        None => {
            log::warn!("dropping unparseable {} date {:?}", local, raw);
            None
        }
    }
}

/// Parse a count field; only plain digit strings are accepted.
fn parse_count(field: &'static str, raw: &str) -> Result<u32> {
    let invalid = || Error::MetadataField {
        field,
        value: raw.to_string(),
    };
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    raw.parse().map_err(|_| invalid())
}

/// Parse a W3CDTF timestamp, a naive date-time (taken as UTC) or a bare date.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, pattern) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml;
    use chrono::{Datelike, Timelike};

    const CORE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <dc:title>Annual Report</dc:title>
  <dc:subject>Finance</dc:subject>
  <dc:creator>Jane Roe</dc:creator>
  <cp:keywords>budget; forecast, 2024</cp:keywords>
  <cp:lastModifiedBy>John Doe</cp:lastModifiedBy>
  <cp:revision>7</cp:revision>
  <dcterms:created xsi:type="dcterms:W3CDTF">2024-01-15T09:30:00Z</dcterms:created>
  <dcterms:modified xsi:type="dcterms:W3CDTF">not a date</dcterms:modified>
</cp:coreProperties>"#;

    const APP_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties">
  <Application>Microsoft Office Word</Application>
  <Pages>12</Pages>
  <Words>n/a</Words>
  <Characters>20480</Characters>
  <Lines>-3</Lines>
</Properties>"#;

    #[test]
    fn test_core_properties() {
        let core = xml::parse(CORE_XML).unwrap();
        let meta = extract_metadata(Some(&core), None);

        assert_eq!(meta.title.as_deref(), Some("Annual Report"));
        assert_eq!(meta.author.as_deref(), Some("Jane Roe"));
        assert_eq!(meta.creator.as_deref(), Some("Jane Roe"));
        assert_eq!(meta.subject.as_deref(), Some("Finance"));
        assert_eq!(meta.keywords, vec!["budget", "forecast", "2024"]);
        assert_eq!(meta.last_modified_by.as_deref(), Some("John Doe"));
        assert_eq!(meta.revision, Some(7));

        let created = meta.created.unwrap();
        assert_eq!((created.year(), created.month(), created.day()), (2024, 1, 15));
        assert_eq!(created.hour(), 9);
        assert!(meta.modified.is_none());
        assert!(meta.pages.is_none());
    }

    #[test]
    fn test_app_properties_drop_non_numeric() {
        let app = xml::parse(APP_XML).unwrap();
        let meta = extract_metadata(None, Some(&app));

        assert_eq!(meta.application.as_deref(), Some("Microsoft Office Word"));
        assert_eq!(meta.pages, Some(12));
        assert_eq!(meta.words, None);
        assert_eq!(meta.characters, Some(20480));
        assert_eq!(meta.lines, None);
        assert!(meta.title.is_none());
    }

    #[test]
    fn test_title_and_pages_only() {
        let core = xml::parse(
            r#"<cp:coreProperties xmlns:dc="http://purl.org/dc/elements/1.1/"><dc:title>Report</dc:title></cp:coreProperties>"#,
        )
        .unwrap();
        let app = xml::parse("<Properties><Pages>12</Pages></Properties>").unwrap();

        let meta = extract_metadata(Some(&core), Some(&app));
        let expected = DocumentMetadata {
            title: Some("Report".to_string()),
            pages: Some(12),
            ..Default::default()
        };
        assert_eq!(meta, expected);
    }

    #[test]
    fn test_absent_parts() {
        assert!(extract_metadata(None, None).is_empty());
        let unrelated = ParsedNode::text("stray");
        assert!(extract_metadata(Some(&unrelated), Some(&unrelated)).is_empty());
    }

    #[test]
    fn test_parse_date_variants() {
        assert!(parse_date("2024-03-01T12:00:00+02:00").is_some());
        assert!(parse_date("2024-03-01T12:00:00").is_some());
        assert_eq!(
            parse_date("2024-03-01").unwrap().to_rfc3339(),
            "2024-03-01T00:00:00+00:00"
        );
        assert!(parse_date("yesterday").is_none());
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("Pages", "42").unwrap(), 42);
        assert!(matches!(
            parse_count("Pages", "4 2"),
            Err(Error::MetadataField { field: "Pages", .. })
        ));
        assert!(parse_count("Words", "99999999999").is_err());
    }
}
