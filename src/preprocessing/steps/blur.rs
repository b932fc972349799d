use crate::error::OcrError;
use image::DynamicImage;
use imageproc::filter::gaussian_blur_f32;

/// Sigma matching a 3x3 Gaussian kernel
const BLUR_SIGMA: f32 = 0.8;

/// Apply small-kernel Gaussian smoothing to suppress noise before
/// binarization
pub fn apply(image: DynamicImage) -> Result<DynamicImage, OcrError> {
    let gray = image.to_luma8();
    let blurred = gaussian_blur_f32(&gray, BLUR_SIGMA);
    Ok(DynamicImage::ImageLuma8(blurred))
}
