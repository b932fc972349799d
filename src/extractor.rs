use std::path::Path;
use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use image::ImageFormat;

use crate::engine::{Detection, OcrEngine};
use crate::error::OcrError;
use crate::preprocessing;

/// Detections at or below this confidence are discarded
const MIN_CONFIDENCE: f32 = 0.1;

/// Runs the preprocessing pipeline and the OCR engine over one image source.
///
/// The public methods never fail: recoverable errors are logged and replaced
/// with an empty detection list so the CLI always terminates normally.
pub struct Extractor {
    engine: Arc<dyn OcrEngine>,
}

impl Extractor {
    pub fn new(engine: Arc<dyn OcrEngine>) -> Self {
        Self { engine }
    }

    /// Extract text regions from an image file
    pub fn extract_from_path(&self, path: &Path, preprocess: bool) -> Vec<Detection> {
        match self.try_extract_from_path(path, preprocess) {
            Ok(detections) => detections,
            Err(err) => {
                tracing::error!("Error extracting text: {}", err);
                Vec::new()
            }
        }
    }

    /// Extract text regions from a base64-encoded image
    pub fn extract_from_base64(&self, data: &str, preprocess: bool) -> Vec<Detection> {
        match self.try_extract_from_base64(data, preprocess) {
            Ok(detections) => detections,
            Err(err) => {
                tracing::error!("Error processing base64 image: {}", err);
                Vec::new()
            }
        }
    }

    fn try_extract_from_path(
        &self,
        path: &Path,
        preprocess: bool,
    ) -> Result<Vec<Detection>, OcrError> {
        tracing::info!("Processing image: {}", path.display());

        let image = image::open(path)
            .map_err(|e| OcrError::Load(format!("{}: {}", path.display(), e)))?;

        let input = if preprocess {
            preprocessing::preprocess(&image)
        } else {
            image
        };

        let detections: Vec<Detection> = self
            .engine
            .recognize(&input)?
            .into_iter()
            .filter(|d| d.confidence > MIN_CONFIDENCE)
            .collect();

        tracing::info!("Extracted {} text elements", detections.len());

        Ok(detections)
    }

    fn try_extract_from_base64(
        &self,
        data: &str,
        preprocess: bool,
    ) -> Result<Vec<Detection>, OcrError> {
        let bytes = BASE64
            .decode(data.trim())
            .map_err(|e| OcrError::Decode(e.to_string()))?;

        let image = image::load_from_memory(&bytes).map_err(|e| OcrError::Decode(e.to_string()))?;

        // Spool to a uniquely named temp file; the guard removes it on every
        // exit path, including extraction failure.
        let temp_file = tempfile::Builder::new()
            .prefix("ocr-extract-")
            .suffix(".png")
            .tempfile()
            .map_err(|e| OcrError::Internal(format!("failed to create temp file: {}", e)))?;

        image
            .to_rgb8()
            .save_with_format(temp_file.path(), ImageFormat::Png)
            .map_err(|e| OcrError::Internal(format!("failed to write temp file: {}", e)))?;

        self.try_extract_from_path(temp_file.path(), preprocess)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::BoundingBox;
    use image::{DynamicImage, GrayImage, Luma};
    use std::io::Cursor;
    use std::io::Write;

    /// Test engine returning a canned detection list
    struct FixedEngine {
        detections: Vec<Detection>,
    }

    impl OcrEngine for FixedEngine {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn description(&self) -> &'static str {
            "canned detections for tests"
        }

        fn recognize(&self, _image: &DynamicImage) -> Result<Vec<Detection>, OcrError> {
            Ok(self.detections.clone())
        }

        fn supported_languages(&self) -> Vec<String> {
            vec!["eng".to_string()]
        }
    }

    /// Test engine that always fails
    struct FailingEngine;

    impl OcrEngine for FailingEngine {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn description(&self) -> &'static str {
            "always errors"
        }

        fn recognize(&self, _image: &DynamicImage) -> Result<Vec<Detection>, OcrError> {
            Err(OcrError::Engine("model exploded".to_string()))
        }

        fn supported_languages(&self) -> Vec<String> {
            vec![]
        }
    }

    fn detection(text: &str, confidence: f32) -> Detection {
        Detection {
            text: text.to_string(),
            confidence,
            bbox: BoundingBox {
                x0: 0,
                y0: 0,
                x1: 10,
                y1: 10,
            },
        }
    }

    fn extractor_with(detections: Vec<Detection>) -> Extractor {
        Extractor::new(Arc::new(FixedEngine { detections }))
    }

    fn sample_image_file() -> tempfile::NamedTempFile {
        let img = GrayImage::from_pixel(16, 16, Luma([200]));
        let mut buf = Vec::new();
        DynamicImage::ImageLuma8(img)
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();

        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        file.write_all(&buf).unwrap();
        file.flush().unwrap();
        file
    }

    fn sample_image_base64() -> String {
        let img = GrayImage::from_pixel(16, 16, Luma([200]));
        let mut buf = Vec::new();
        DynamicImage::ImageLuma8(img)
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        BASE64.encode(&buf)
    }

    #[test]
    fn test_confidence_filter_is_strictly_greater() {
        let extractor = extractor_with(vec![
            detection("at the boundary", 0.1),
            detection("just above", 0.100001),
            detection("well above", 0.5),
            detection("below", 0.05),
        ]);

        let file = sample_image_file();
        let results = extractor.extract_from_path(file.path(), false);

        let texts: Vec<&str> = results.iter().map(|d| d.text.as_str()).collect();
        assert_eq!(texts, vec!["just above", "well above"]);
    }

    #[test]
    fn test_unreadable_path_returns_empty_list() {
        let extractor = extractor_with(vec![detection("never seen", 0.9)]);

        let results =
            extractor.extract_from_path(Path::new("/nonexistent/image.png"), true);

        assert!(results.is_empty());
    }

    #[test]
    fn test_engine_failure_returns_empty_list() {
        let extractor = Extractor::new(Arc::new(FailingEngine));

        let file = sample_image_file();
        let results = extractor.extract_from_path(file.path(), false);

        assert!(results.is_empty());
    }

    #[test]
    fn test_invalid_base64_returns_empty_list() {
        let extractor = extractor_with(vec![detection("never seen", 0.9)]);

        assert!(extractor.extract_from_base64("not base64 at all!", false).is_empty());
    }

    #[test]
    fn test_base64_of_non_image_returns_empty_list() {
        let extractor = extractor_with(vec![detection("never seen", 0.9)]);
        let payload = BASE64.encode(b"plain text, not an image");

        assert!(extractor.extract_from_base64(&payload, false).is_empty());
    }

    #[test]
    fn test_base64_matches_path_extraction() {
        let canned = vec![detection("Hello", 0.9), detection("World", 0.8)];
        let extractor = extractor_with(canned);

        let file = sample_image_file();
        let from_path = extractor.extract_from_path(file.path(), false);
        let from_base64 = extractor.extract_from_base64(&sample_image_base64(), false);

        let path_texts: Vec<&str> = from_path.iter().map(|d| d.text.as_str()).collect();
        let base64_texts: Vec<&str> = from_base64.iter().map(|d| d.text.as_str()).collect();
        assert_eq!(path_texts, base64_texts);
    }

    #[test]
    fn test_base64_with_preprocessing_enabled() {
        let extractor = extractor_with(vec![detection("processed", 0.9)]);

        let results = extractor.extract_from_base64(&sample_image_base64(), true);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].text, "processed");
    }
}
