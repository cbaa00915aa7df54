//! Data model shared by the extraction pipeline.
//!
//! The container produces a [`DocumentPackage`], the XML parser turns parts into
//! [`ParsedNode`] trees, and the processor assembles a [`ProcessingResult`].

mod image;
mod metadata;
mod node;
mod package;
mod result;

pub use image::*;
pub use metadata::*;
pub use node::*;
pub use package::*;
pub use result::*;
