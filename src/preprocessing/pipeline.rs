use crate::error::OcrError;
use image::DynamicImage;
use std::time::Instant;

use super::steps;

/// Preprocess an image for recognition, falling back to a plain grayscale
/// rendition of the original if any step fails.
///
/// The fallback discards the partially processed result; there is no retry.
pub fn preprocess(image: &DynamicImage) -> DynamicImage {
    match run(image.clone()) {
        Ok(processed) => processed,
        Err(err) => {
            tracing::error!("Error preprocessing image: {}", err);
            DynamicImage::ImageLuma8(image.to_luma8())
        }
    }
}

/// The fixed step sequence: grayscale, blur, adaptive threshold, close.
fn run(image: DynamicImage) -> Result<DynamicImage, OcrError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(OcrError::Preprocessing("image has zero size".to_string()));
    }

    let mut img = image;
    img = run_step("grayscale", img, steps::grayscale::apply)?;
    img = run_step("blur", img, steps::blur::apply)?;
    img = run_step("threshold", img, steps::threshold::apply)?;
    img = run_step("close", img, steps::close::apply)?;

    Ok(img)
}

fn run_step<F>(name: &str, img: DynamicImage, step_fn: F) -> Result<DynamicImage, OcrError>
where
    F: FnOnce(DynamicImage) -> Result<DynamicImage, OcrError>,
{
    let step_start = Instant::now();
    let result = step_fn(img)?;
    tracing::debug!(
        "preprocessing step {} took {}ms",
        name,
        step_start.elapsed().as_millis()
    );
    Ok(result)
}
