use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LprError {
    #[error("Failed to decode image {}: {source}", .path.display())]
    DecodeError {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("OCR engine failed: {0}")]
    OcrEngineError(String),

    #[error("Failed to initialize OCR engine: {0}")]
    InitializationError(String),

    #[error("Failed to store crop {}: {reason}", .path.display())]
    StorageError { path: PathBuf, reason: String },

    #[error("Region lies outside the image: {0}")]
    RegionOutOfBounds(String),
}

impl LprError {
    /// Short machine-readable code, used by callers that report errors as JSON
    pub fn code(&self) -> &'static str {
        match self {
            LprError::DecodeError { .. } => "DECODE_ERROR",
            LprError::UnsupportedFormat(_) => "UNSUPPORTED_FORMAT",
            LprError::OcrEngineError(_) => "OCR_ENGINE_ERROR",
            LprError::InitializationError(_) => "INIT_ERROR",
            LprError::StorageError { .. } => "STORAGE_ERROR",
            LprError::RegionOutOfBounds(_) => "REGION_OUT_OF_BOUNDS",
        }
    }
}
