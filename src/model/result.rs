//! Outcome of processing one document.

use super::{DocumentMetadata, ImageResource};
use crate::error::Error;
use serde::Serialize;

/// Result of a single `parse_document` call.
///
/// A failed call has `success == false`, no content and at least one entry in
/// `errors`. Warnings may accompany a successful result.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProcessingResult {
    /// Whether extraction completed
    pub success: bool,

    /// Extracted text in the configured output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Document metadata, when requested and available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<DocumentMetadata>,

    /// Embedded images, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<ImageResource>>,

    /// SHA-256 of the input file, when safety checks ran
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_hash: Option<String>,

    /// Input file size in bytes, when safety checks ran
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,

    /// Non-fatal problems
    pub warnings: Vec<String>,

    /// Fatal problems
    pub errors: Vec<String>,
}

impl ProcessingResult {
    /// Build a failed result from a fatal error.
    pub fn failure(error: &Error, warnings: Vec<String>) -> Self {
        Self {
            success: false,
            errors: error.messages(),
            warnings,
            ..Default::default()
        }
    }

    /// Check whether the call succeeded.
    pub fn is_success(&self) -> bool {
        self.success
    }
}
