//! HTML renderer implementation.

use crate::model::DocumentMetadata;

/// Render extracted text as a minimal HTML document.
///
/// Every non-blank line becomes one `<p>` element.
pub fn to_html(text: &str, metadata: Option<&DocumentMetadata>) -> String {
    let title = metadata.and_then(|m| m.title.as_deref());

    let mut output = String::from("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n");
    if let Some(title) = title {
        output.push_str(&format!("<title>{}</title>\n", escape_html(title)));
    }
    output.push_str("</head>\n<body>\n");

    if let Some(title) = title {
        output.push_str(&format!("<h1>{}</h1>\n", escape_html(title)));
    }

    for line in text.split('\n').map(str::trim).filter(|l| !l.is_empty()) {
        output.push_str(&format!("<p>{}</p>\n", escape_html(line)));
    }

    output.push_str("</body>\n</html>");
    output
}

/// Escape the five HTML-significant characters.
pub fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_paragraph_per_line() {
        let html = to_html("First line\n\nSecond <line>\n   \n", None);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<meta charset=\"UTF-8\">"));
        assert!(!html.contains("<title>"));
        assert!(!html.contains("<h1>"));
        assert_eq!(html.matches("<p>").count(), 2);
        assert!(html.contains("<p>First line</p>"));
        assert!(html.contains("<p>Second &lt;line&gt;</p>"));
        assert!(html.ends_with("</html>"));
    }

    #[test]
    fn test_title_is_escaped() {
        let meta = DocumentMetadata {
            title: Some("Q&A".to_string()),
            ..Default::default()
        };
        let html = to_html("Body", Some(&meta));
        assert!(html.contains("<title>Q&amp;A</title>"));
        assert!(html.contains("<h1>Q&amp;A</h1>"));
    }
}
