//! Text extraction from the parsed main document part.
//!
//! The walk recognises a small vocabulary of WordprocessingML tags and skips
//! property subtrees. When the strict walk yields almost nothing, a permissive
//! scan of every text leaf is tried instead.

use super::fallback::fallback_text;
use super::normalize::normalize;
use crate::model::{is_attribute_key, Element, NodeValue, ParsedNode, TEXT_KEY};

/// Literal text run content.
pub const TEXT_TAG: &str = "w:t";
/// Paragraph.
pub const PARAGRAPH_TAG: &str = "w:p";
/// Run (inline formatting container).
pub const RUN_TAG: &str = "w:r";
/// Tab character.
pub const TAB_TAG: &str = "w:tab";
/// Explicit line break.
pub const BREAK_TAG: &str = "w:br";
/// Document root.
pub const DOCUMENT_TAG: &str = "w:document";
/// Document body.
pub const BODY_TAG: &str = "w:body";
/// Prefix of the WordprocessingML markup namespace.
pub const MARKUP_PREFIX: &str = "w:";

/// Attribute marking whitespace-preserving text.
const PRESERVE_SPACE_ATTR: &str = "xml:space";

/// Tag-name substrings that mark property, style, font and settings subtrees.
pub const EXCLUDED_TAG_MARKERS: [&str; 5] = ["Pr", "Style", "Properties", "Fonts", "Settings"];

/// Leaves containing this are namespace URIs, not document text.
const NAMESPACE_URI_MARKER: &str = "http://schemas";

/// Results shorter than this trigger the fallback scan.
pub const MIN_PRIMARY_CHARS: usize = 10;

const PARAGRAPH_BREAK: &str = "\n\n";

/// Whether a tag names a property/style/font/settings subtree.
///
/// A tag matching several markers is still a single exclusion.
pub fn is_excluded_tag(tag: &str) -> bool {
    EXCLUDED_TAG_MARKERS.iter().any(|marker| tag.contains(marker))
}

/// Whether an entry is a child tag the generic walk descends into: markup
/// namespace, not literal text, not an attribute, not an excluded subtree.
fn is_markup_child(tag: &str) -> bool {
    !is_attribute_key(tag)
        && tag.starts_with(MARKUP_PREFIX)
        && tag != TEXT_TAG
        && !is_excluded_tag(tag)
}

/// Whether text looks like a namespace URI rather than content.
pub fn is_namespace_uri(text: &str) -> bool {
    text.contains(NAMESPACE_URI_MARKER)
}

/// Extract normalized text from a parsed main document part.
///
/// # Example
///
/// ```
/// use docxtext::docx::extract_text;
/// use docxtext::xml;
///
/// let tree = xml::parse(
///     "<w:document><w:body><w:p><w:r><w:t>Hello</w:t></w:r></w:p></w:body></w:document>",
/// )?;
/// assert_eq!(extract_text(&tree), "Hello");
/// # Ok::<(), docxtext::Error>(())
/// ```
pub fn extract_text(root: &ParsedNode) -> String {
    let primary = TextExtractor::new().extract(root);
    if primary.chars().count() >= MIN_PRIMARY_CHARS {
        return primary;
    }

    let fallback = fallback_text(root);
    if fallback.chars().count() > primary.chars().count() {
        log::debug!(
            "primary walk produced {} chars, using fallback scan ({} chars)",
            primary.chars().count(),
            fallback.chars().count()
        );
        fallback
    } else {
        primary
    }
}

/// Structured walk over a document tree.
///
/// Collects text fragments in reading order; [`TextExtractor::extract`] joins
/// and normalizes them.
#[derive(Debug, Default)]
pub struct TextExtractor {
    fragments: Vec<String>,
}

impl TextExtractor {
    /// Create an extractor with no fragments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk `root` and return the normalized text of the strict pass.
    pub fn extract(mut self, root: &ParsedNode) -> String {
        self.walk(root);
        normalize(&self.fragments.join(" "))
    }

    /// Walk `root` and return the raw fragments, before normalization.
    pub fn fragments(mut self, root: &ParsedNode) -> Vec<String> {
        self.walk(root);
        self.fragments
    }

    fn walk(&mut self, node: &ParsedNode) {
        match node {
            ParsedNode::Text(text) => {
                let text = text.trim();
                if !text.is_empty() && !is_namespace_uri(text) {
                    self.fragments.push(text.to_string());
                }
            }
            ParsedNode::Element(element) => self.walk_element(element),
        }
    }

    fn walk_value(&mut self, value: &NodeValue) {
        for node in value {
            self.walk(node);
        }
    }

    /// Dispatch on the first structural tag present; the rest of the element
    /// is then skipped.
    fn walk_element(&mut self, element: &Element) {
        if let Some(texts) = element.get(TEXT_TAG) {
            for node in texts {
                self.push_literal(node);
            }
        } else if let Some(paragraphs) = element.get(PARAGRAPH_TAG) {
            for paragraph in paragraphs {
                self.paragraph_break();
                self.walk(paragraph);
            }
        } else if let Some(runs) = element.get(RUN_TAG) {
            self.walk_value(runs);
        } else if element.contains(TAB_TAG) {
            self.fragments.push("\t".to_string());
        } else if element.contains(BREAK_TAG) {
            self.fragments.push("\n".to_string());
        } else if let Some(document) = element.get(DOCUMENT_TAG) {
            self.walk_value(document);
        } else if let Some(body) = element.get(BODY_TAG) {
            self.walk_value(body);
        } else {
            for (tag, value) in element.entries() {
                if is_markup_child(tag) {
                    self.walk_value(value);
                }
            }
        }
    }

    /// Append the content of one literal-text node.
    fn push_literal(&mut self, node: &ParsedNode) {
        let text = match node {
            ParsedNode::Text(text) => text.as_str(),
            ParsedNode::Element(element) if element.attribute(PRESERVE_SPACE_ATTR).is_some() => {
                match element.get(TEXT_KEY).and_then(NodeValue::first) {
                    Some(ParsedNode::Text(text)) => text.as_str(),
                    _ => return,
                }
            }
            ParsedNode::Element(_) => return,
        };

        if !text.trim().is_empty() && !is_namespace_uri(text) {
            self.fragments.push(text.to_string());
        }
    }

    /// Start a paragraph unless the previous fragment already ends a line.
    fn paragraph_break(&mut self) {
        match self.fragments.last() {
            Some(last) if !last.ends_with('\n') => {
                self.fragments.push(PARAGRAPH_BREAK.to_string());
            }
            _ => {}
        }
    }
}
