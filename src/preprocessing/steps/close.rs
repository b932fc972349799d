use crate::error::OcrError;
use image::DynamicImage;
use imageproc::distance_transform::Norm;
use imageproc::morphology::close;

/// Structuring element radius. The minimal element keeps the close a
/// near-identity cleanup pass.
const CLOSE_RADIUS: u8 = 0;

/// Apply a morphological closing to clean up the binarized image
pub fn apply(image: DynamicImage) -> Result<DynamicImage, OcrError> {
    let gray = image.to_luma8();
    let cleaned = close(&gray, Norm::LInf, CLOSE_RADIUS);
    Ok(DynamicImage::ImageLuma8(cleaned))
}
