use crate::error::OcrError;
use image::{DynamicImage, GrayImage, Luma};

/// Adaptive threshold parameters
const WINDOW_SIZE: u32 = 11;
const OFFSET: f32 = 2.0;

/// Apply adaptive binarization against a neighborhood mean
/// Handles uneven lighting better than a single global threshold
pub fn apply(image: DynamicImage) -> Result<DynamicImage, OcrError> {
    let gray = image.to_luma8();
    let binarized = adaptive_mean_threshold(&gray, WINDOW_SIZE, OFFSET);
    Ok(DynamicImage::ImageLuma8(binarized))
}

/// Adaptive mean thresholding
///
/// For each pixel, threshold = window mean - offset. Pixels above the
/// threshold become white, the rest black. Windows are clamped at the
/// image borders.
fn adaptive_mean_threshold(img: &GrayImage, window_size: u32, offset: f32) -> GrayImage {
    let (width, height) = img.dimensions();
    let half = window_size as i32 / 2;

    // Integral image for constant-time window sums
    let integral = integral_image(img);
    let stride = width as usize + 1;

    GrayImage::from_fn(width, height, |x, y| {
        let x1 = (x as i32 - half).max(0) as usize;
        let y1 = (y as i32 - half).max(0) as usize;
        let x2 = ((x as i32 + half).min(width as i32 - 1) + 1) as usize;
        let y2 = ((y as i32 + half).min(height as i32 - 1) + 1) as usize;

        let area = ((x2 - x1) * (y2 - y1)) as f32;
        let sum = integral[y2 * stride + x2] + integral[y1 * stride + x1]
            - integral[y1 * stride + x2]
            - integral[y2 * stride + x1];
        let mean = sum as f32 / area;

        if img.get_pixel(x, y).0[0] as f32 > mean - offset {
            Luma([255u8])
        } else {
            Luma([0u8])
        }
    })
}

/// Summed-area table with a zeroed first row and column
fn integral_image(img: &GrayImage) -> Vec<u64> {
    let (width, height) = img.dimensions();
    let stride = width as usize + 1;
    let mut integral = vec![0u64; stride * (height as usize + 1)];

    for y in 0..height as usize {
        let mut row_sum = 0u64;
        for x in 0..width as usize {
            row_sum += img.get_pixel(x as u32, y as u32).0[0] as u64;
            integral[(y + 1) * stride + x + 1] = integral[y * stride + x + 1] + row_sum;
        }
    }

    integral
}
