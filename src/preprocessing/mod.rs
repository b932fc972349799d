//! Image preprocessing module for OCR enhancement
//!
//! Provides the fixed preprocessing pipeline applied before recognition.

pub mod pipeline;
pub mod steps;

pub use pipeline::preprocess;
