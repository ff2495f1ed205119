use crate::error::LprError;
use std::path::Path;

/// Trait that all OCR engines must implement
pub trait TextRecognizer: Send + Sync {
    /// Returns the engine identifier (e.g., "tesseract", "ocrs")
    fn name(&self) -> &'static str;

    /// Returns a human-readable description of the engine
    fn description(&self) -> &'static str;

    /// Read the raw text in an image file
    ///
    /// `engine_config` is passed through untouched, e.g. `--psm 13`.
    fn read_text(&self, path: &Path, engine_config: &str) -> Result<String, LprError>;
}

/// Run `engine` on a persisted crop and keep only plate characters
pub fn recognize(
    engine: &dyn TextRecognizer,
    crop_path: &Path,
    engine_config: &str,
) -> Result<String, LprError> {
    let raw = engine.read_text(crop_path, engine_config)?;
    let text = sanitize(&raw);
    tracing::debug!(engine = engine.name(), raw = %raw.trim(), %text, "OCR finished");
    Ok(text)
}

/// Keep ASCII uppercase letters and digits, drop everything else
pub fn sanitize(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        .collect()
}
