//! DOCX (Word) content extraction.
//!
//! Works on parsed parts of an Office Open XML word-processing package:
//! text from `word/document.xml`, metadata from `docProps/`, images from
//! `word/media/`.

mod extract;
mod fallback;
mod images;
mod metadata;
mod normalize;

pub use extract::{
    extract_text, is_excluded_tag, is_namespace_uri, TextExtractor, EXCLUDED_TAG_MARKERS,
    MIN_PRIMARY_CHARS,
};
pub use fallback::fallback_text;
pub use images::{collect_images, ImageScan};
pub use metadata::{apply_app_properties, apply_core_properties, extract_metadata, parse_date};
pub use normalize::normalize;
