use crate::error::OcrError;
use image::DynamicImage;
use serde::Serialize;

/// Axis-aligned bounding box in pixel coordinates, with x0 <= x1 and y0 <= y1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoundingBox {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl BoundingBox {
    /// Normalize a bounding polygon to its top-left and bottom-right integer
    /// corners. Accepts the corners in any order or rotation.
    pub fn from_corner_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = (f32, f32)>,
    {
        let mut min_x = f32::INFINITY;
        let mut min_y = f32::INFINITY;
        let mut max_x = f32::NEG_INFINITY;
        let mut max_y = f32::NEG_INFINITY;

        for (x, y) in points {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }

        if !min_x.is_finite() {
            return Self {
                x0: 0,
                y0: 0,
                x1: 0,
                y1: 0,
            };
        }

        Self {
            x0: min_x as i32,
            y0: min_y as i32,
            x1: max_x as i32,
            y1: max_y as i32,
        }
    }
}

/// One recognized text region
#[derive(Debug, Clone, Serialize)]
pub struct Detection {
    pub text: String,
    pub confidence: f32,
    pub bbox: BoundingBox,
}

/// Trait that all OCR engines must implement
pub trait OcrEngine: Send + Sync {
    /// Returns the engine identifier (e.g., "ocrs")
    fn name(&self) -> &'static str;

    /// Returns a human-readable description of the engine
    fn description(&self) -> &'static str;

    /// Recognize text regions in an image
    fn recognize(&self, image: &DynamicImage) -> Result<Vec<Detection>, OcrError>;

    /// Get supported languages
    fn supported_languages(&self) -> Vec<String>;
}
