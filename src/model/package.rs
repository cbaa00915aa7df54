//! Raw parts read from a document container.

use std::collections::BTreeMap;

/// Path of the main document part inside a `.docx` container.
pub const DOCUMENT_PART: &str = "word/document.xml";

/// Path of the core properties part.
pub const CORE_PROPERTIES_PART: &str = "docProps/core.xml";

/// Path of the application properties part.
pub const APP_PROPERTIES_PART: &str = "docProps/app.xml";

/// Folder holding embedded media.
pub const MEDIA_PREFIX: &str = "word/media/";

/// Content of one part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartContent {
    /// Decoded XML markup
    Xml(String),
    /// Binary payload (media and other non-XML parts)
    Binary(Vec<u8>),
}

impl PartContent {
    /// Borrow the markup, if this is an XML part.
    pub fn as_xml(&self) -> Option<&str> {
        match self {
            PartContent::Xml(text) => Some(text),
            PartContent::Binary(_) => None,
        }
    }

    /// Borrow the raw bytes of the part.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            PartContent::Xml(text) => text.as_bytes(),
            PartContent::Binary(data) => data,
        }
    }
}

/// All parts of a container, keyed by their path.
#[derive(Debug, Clone, Default)]
pub struct DocumentPackage {
    parts: BTreeMap<String, PartContent>,
}

impl DocumentPackage {
    /// Create an empty package.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a part.
    pub fn insert(&mut self, name: impl Into<String>, content: PartContent) {
        self.parts.insert(name.into(), content);
    }

    /// Get a part by name.
    pub fn get(&self, name: &str) -> Option<&PartContent> {
        self.parts.get(name)
    }

    /// Get the markup of an XML part.
    pub fn xml(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(PartContent::as_xml)
    }

    /// Check if a part exists.
    pub fn contains(&self, name: &str) -> bool {
        self.parts.contains_key(name)
    }

    /// Iterate parts whose name starts with `prefix`.
    pub fn parts_with_prefix<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a PartContent)> + 'a {
        self.parts
            .range(prefix.to_string()..)
            .take_while(move |(name, _)| name.starts_with(prefix))
            .map(|(name, content)| (name.as_str(), content))
    }

    /// Number of parts.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Whether the package has no parts.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}
