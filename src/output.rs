use clap::ValueEnum;

use crate::engine::Detection;
use crate::error::OcrError;

/// Output encoding for the detection list
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON array of detections
    Json,
    /// One detection text per line
    Text,
}

/// Render the detection list in the selected format
pub fn render(detections: &[Detection], format: OutputFormat) -> Result<String, OcrError> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(detections)
            .map_err(|e| OcrError::Internal(format!("failed to serialize detections: {}", e))),
        OutputFormat::Text => Ok(detections
            .iter()
            .map(|d| d.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")),
    }
}
