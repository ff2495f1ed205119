//! OCR engine implementations
//!
//! This module contains implementations of the TextRecognizer trait for
//! different OCR backends. The tesseract executable engine is always built;
//! the in-process engines are conditionally compiled based on feature flags.

#[cfg(feature = "engine-ocrs")]
pub mod ocrs;

#[cfg(feature = "engine-leptess")]
pub mod leptess;

pub mod tesseract;

use crate::config::{EngineKind, EngineSettings};
use crate::engine::TextRecognizer;
use crate::error::LprError;

/// Engines compiled into this build
pub fn available() -> Vec<EngineKind> {
    let mut kinds = vec![EngineKind::Tesseract];
    if cfg!(feature = "engine-leptess") {
        kinds.push(EngineKind::Leptess);
    }
    if cfg!(feature = "engine-ocrs") {
        kinds.push(EngineKind::Ocrs);
    }
    kinds
}

/// Build the engine selected in `settings`
pub fn create(settings: &EngineSettings) -> Result<Box<dyn TextRecognizer>, LprError> {
    tracing::info!("Initializing {} engine...", settings.kind.as_str());

    match settings.kind {
        EngineKind::Tesseract => Ok(Box::new(tesseract::TesseractEngine::new(settings))),

        #[cfg(feature = "engine-leptess")]
        EngineKind::Leptess => Ok(Box::new(leptess::LeptessEngine::new(settings)?)),

        #[cfg(feature = "engine-ocrs")]
        EngineKind::Ocrs => Ok(Box::new(ocrs::OcrsEngine::new(settings)?)),

        #[allow(unreachable_patterns)]
        other => Err(LprError::InitializationError(format!(
            "Engine '{}' is not available. Build with --features engine-{}",
            other.as_str(),
            other.as_str()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tesseract_is_always_available() {
        assert_eq!(available()[0], EngineKind::Tesseract);
        let engine = create(&EngineSettings::default()).unwrap();
        assert_eq!(engine.name(), "tesseract");
    }

    #[cfg(not(feature = "engine-ocrs"))]
    #[test]
    fn test_missing_feature_is_initialization_error() {
        let settings = EngineSettings {
            kind: EngineKind::Ocrs,
            ..EngineSettings::default()
        };
        assert!(matches!(
            create(&settings),
            Err(LprError::InitializationError(_))
        ));
    }
}
