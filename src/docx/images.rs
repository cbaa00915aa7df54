//! Embedded image collection.

use crate::error::Error;
use crate::model::{DocumentPackage, ImageResource, PartContent, MEDIA_PREFIX};

/// Images found in the media folder, plus the parts that could not be read.
#[derive(Debug, Default)]
pub struct ImageScan {
    /// Recognized images, in part-name order
    pub images: Vec<ImageResource>,
    /// One `ImageDecode` error per skipped part
    pub failures: Vec<Error>,
}

/// Collect every recognizable image under `word/media/`.
///
/// Unrecognized payloads are reported in [`ImageScan::failures`] and skipped;
/// the scan itself never fails.
pub fn collect_images(package: &DocumentPackage) -> ImageScan {
    let mut scan = ImageScan::default();

    for (name, content) in package.parts_with_prefix(MEDIA_PREFIX) {
        let data = match content {
            PartContent::Binary(data) => data.as_slice(),
            PartContent::Xml(text) => text.as_bytes(),
        };
        match decode_image(name, data) {
            Ok(image) => scan.images.push(image),
            Err(e) => {
                log::warn!("{}", e);
                scan.failures.push(e);
            }
        }
    }

    log::debug!(
        "collected {} images ({} skipped)",
        scan.images.len(),
        scan.failures.len()
    );
    scan
}

fn decode_image(name: &str, data: &[u8]) -> Result<ImageResource, Error> {
    let mime = ImageResource::sniff_mime_type(data)
        .ok_or_else(|| Error::ImageDecode(name.to_string()))?;
    Ok(ImageResource::new(name, mime, data.to_vec()))
}
