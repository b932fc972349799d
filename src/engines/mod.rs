//! OCR engine implementations
//!
//! Engines are conditionally compiled based on feature flags. The wrapper
//! uses a single engine per process, constructed once at startup.

#[cfg(feature = "engine-ocrs")]
pub mod ocrs;

use crate::engine::OcrEngine;
use crate::error::OcrError;
use std::sync::Arc;

/// Construct the compiled-in OCR engine
pub fn create() -> Result<Arc<dyn OcrEngine>, OcrError> {
    #[cfg(feature = "engine-ocrs")]
    {
        let engine = ocrs::OcrsEngine::new()?;
        Ok(Arc::new(engine))
    }

    #[cfg(not(feature = "engine-ocrs"))]
    {
        Err(OcrError::Initialization(
            "no OCR engine available; build with --features engine-ocrs".to_string(),
        ))
    }
}
