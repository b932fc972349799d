use thiserror::Error;

#[derive(Error, Debug)]
pub enum OcrError {
    #[error("failed to initialize OCR engine: {0}")]
    Initialization(String),

    #[error("failed to load image: {0}")]
    Load(String),

    #[error("failed to decode base64 image: {0}")]
    Decode(String),

    #[error("preprocessing failed: {0}")]
    Preprocessing(String),

    #[error("OCR engine error: {0}")]
    Engine(String),

    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("internal error: {0}")]
    Internal(String),
}
