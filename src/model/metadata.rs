//! Document metadata model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Document metadata extracted from docProps/core.xml and docProps/app.xml.
///
/// Every field is independently optional; `None` means the source did not
/// carry the field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Document title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Document author
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Raw creator field (same source as `author`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,

    /// Document subject
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// Document description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Keywords/tags
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub keywords: Vec<String>,

    /// Last modified by
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified_by: Option<String>,

    /// Revision number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<u32>,

    /// Creation date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,

    /// Last modification date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,

    /// Application that created the document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application: Option<String>,

    /// Number of pages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,

    /// Word count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub words: Option<u32>,

    /// Character count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub characters: Option<u32>,

    /// Paragraph count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paragraphs: Option<u32>,

    /// Line count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines: Option<u32>,
}

impl DocumentMetadata {
    /// Create empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether no field is present.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
