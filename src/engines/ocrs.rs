//! OCRS engine implementation
//!
//! Pure Rust OCR engine using the ocrs library. No system dependencies
//! required. Downloads neural network models automatically on first use.
//! English-only and CPU-only.

use crate::engine::{BoundingBox, Detection, OcrEngine};
use crate::error::OcrError;
use image::DynamicImage;
use ocrs::{DecodeMethod, ImageSource, OcrEngine as OcrsOcrEngine, OcrEngineParams, TextItem};
use rten::Model;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Default model URLs from the ocrs project
const DETECTION_MODEL_URL: &str =
    "https://ocrs-models.s3-accelerate.amazonaws.com/text-detection.rten";
const RECOGNITION_MODEL_URL: &str =
    "https://ocrs-models.s3-accelerate.amazonaws.com/text-recognition.rten";

/// OCR engine wrapping the ocrs library
pub struct OcrsEngine {
    engine: OcrsOcrEngine,
}

impl OcrsEngine {
    /// Create a new engine, downloading models if needed
    pub fn new() -> Result<Self, OcrError> {
        tracing::info!("Initializing ocrs OCR engine...");

        let detection_model_path =
            ensure_model_downloaded(DETECTION_MODEL_URL, "text-detection.rten")?;
        let recognition_model_path =
            ensure_model_downloaded(RECOGNITION_MODEL_URL, "text-recognition.rten")?;

        let detection_model = Model::load_file(&detection_model_path).map_err(|e| {
            OcrError::Initialization(format!("failed to load detection model: {}", e))
        })?;
        let recognition_model = Model::load_file(&recognition_model_path).map_err(|e| {
            OcrError::Initialization(format!("failed to load recognition model: {}", e))
        })?;

        let engine = OcrsOcrEngine::new(OcrEngineParams {
            detection_model: Some(detection_model),
            recognition_model: Some(recognition_model),
            decode_method: DecodeMethod::Greedy,
            ..Default::default()
        })
        .map_err(|e| OcrError::Initialization(format!("failed to create OCR engine: {}", e)))?;

        tracing::info!("ocrs engine initialized successfully");

        Ok(Self { engine })
    }
}

impl OcrEngine for OcrsEngine {
    fn name(&self) -> &'static str {
        "ocrs"
    }

    fn description(&self) -> &'static str {
        "Pure Rust OCR engine - fast, no system dependencies required"
    }

    fn recognize(&self, image: &DynamicImage) -> Result<Vec<Detection>, OcrError> {
        // HWC format, which is what ImageSource::from_bytes expects
        let rgb_img = image.to_rgb8();
        let dimensions = rgb_img.dimensions();

        let img_source = ImageSource::from_bytes(rgb_img.as_raw(), dimensions)
            .map_err(|e| OcrError::Engine(format!("failed to create image source: {}", e)))?;

        let ocr_input = self
            .engine
            .prepare_input(img_source)
            .map_err(|e| OcrError::Engine(format!("failed to prepare input: {}", e)))?;

        let word_rects = self
            .engine
            .detect_words(&ocr_input)
            .map_err(|e| OcrError::Engine(format!("failed to detect words: {}", e)))?;

        let line_rects = self.engine.find_text_lines(&ocr_input, &word_rects);

        let line_texts = self
            .engine
            .recognize_text(&ocr_input, &line_rects)
            .map_err(|e| OcrError::Engine(format!("failed to recognize text: {}", e)))?;

        let mut detections = Vec::new();
        for line in line_texts.iter().flatten() {
            let text = line.to_string().trim().to_string();
            if text.is_empty() {
                continue;
            }

            let corners = line.rotated_rect().corners();
            let bbox = BoundingBox::from_corner_points(corners.iter().map(|p| (p.x, p.y)));

            detections.push(Detection {
                confidence: score_confidence(&text),
                text,
                bbox,
            });
        }

        Ok(detections)
    }

    fn supported_languages(&self) -> Vec<String> {
        // ocrs currently only supports English/Latin alphabet
        vec!["eng".to_string()]
    }
}

/// Score recognition quality for one line of text.
///
/// ocrs does not report per-line confidence, so the score is derived from
/// the shape of the recognized text itself: mostly letters and digits with
/// ordinary word lengths scores high, garbled output scores low.
fn score_confidence(text: &str) -> f32 {
    let total = text.chars().count();
    if total == 0 {
        return 0.0;
    }
    if total < 4 {
        // Too short to judge
        return 0.5;
    }

    let alnum = text.chars().filter(|c| c.is_alphanumeric()).count();
    let odd = text
        .chars()
        .filter(|c| !c.is_alphanumeric() && !c.is_whitespace() && !c.is_ascii_punctuation())
        .count();

    let alnum_score = ((alnum as f32 / total as f32) * 1.4).min(1.0);
    let odd_penalty = 1.0 - ((odd as f32 / total as f32) * 8.0).min(1.0);
    let word_score = word_length_score(text);

    let score = 0.45 * alnum_score + 0.35 * word_score + 0.20 * odd_penalty;

    (score * repeated_run_penalty(text)).clamp(0.0, 1.0)
}

/// Garbled OCR tends to produce single-character "words" or very long runs
/// of glyphs with no spacing.
fn word_length_score(text: &str) -> f32 {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return 0.0;
    }

    let total_len: usize = words.iter().map(|w| w.chars().count()).sum();
    let avg_len = total_len as f32 / words.len() as f32;

    if avg_len < 2.0 {
        0.3
    } else if avg_len <= 9.0 {
        1.0
    } else if avg_len <= 14.0 {
        0.7
    } else {
        0.4
    }
}

/// Long runs of one repeated character ("aaaa", "####") indicate confusion.
fn repeated_run_penalty(text: &str) -> f32 {
    let mut longest = 0u32;
    let mut run = 0u32;
    let mut prev: Option<char> = None;

    for c in text.chars() {
        if prev == Some(c) && !c.is_whitespace() {
            run += 1;
        } else {
            run = 1;
        }
        longest = longest.max(run);
        prev = Some(c);
    }

    match longest {
        0..=3 => 1.0,
        4..=6 => 0.7,
        _ => 0.4,
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Ensure a model is downloaded and return its path
fn ensure_model_downloaded(url: &str, filename: &str) -> Result<std::path::PathBuf, OcrError> {
    let cache_dir = dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("ocr-extract");

    std::fs::create_dir_all(&cache_dir).map_err(|e| {
        OcrError::Initialization(format!("failed to create cache directory: {}", e))
    })?;

    let model_path = cache_dir.join(filename);

    if !model_path.exists() {
        tracing::info!("Downloading {} (this may take a moment)...", filename);
        download_file(url, &model_path)?;
        tracing::info!("Downloaded {} to {:?}", filename, model_path);
    } else {
        tracing::debug!("Using cached model from {:?}", model_path);
    }

    Ok(model_path)
}

/// Download a file from URL to path using ureq
fn download_file(url: &str, path: &Path) -> Result<(), OcrError> {
    let response = ureq::get(url)
        .call()
        .map_err(|e| OcrError::Initialization(format!("failed to download model: {}", e)))?;

    let mut file = File::create(path)
        .map_err(|e| OcrError::Initialization(format!("failed to create model file: {}", e)))?;

    let buffer = response
        .into_body()
        .read_to_vec()
        .map_err(|e| OcrError::Initialization(format!("failed to read response body: {}", e)))?;

    file.write_all(&buffer)
        .map_err(|e| OcrError::Initialization(format!("failed to write model file: {}", e)))?;

    Ok(())
}
