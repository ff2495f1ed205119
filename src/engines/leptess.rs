//! Leptess/Tesseract engine implementation
//!
//! In-process Tesseract via the tesseract-static crate (no system install).
//! Trained data comes from TESSDATA_PREFIX, or is downloaded once into the
//! cache directory when no tessdata path is configured.

use crate::config::EngineSettings;
use crate::engine::TextRecognizer;
use crate::error::LprError;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tesseract_static::tesseract::Tesseract;

/// Tesseract OCR Engine
pub struct LeptessEngine {
    /// Path to tessdata directory
    tessdata_path: String,
    /// Language for OCR
    language: String,
}

impl LeptessEngine {
    pub fn new(settings: &EngineSettings) -> Result<Self, LprError> {
        let language = settings.language.clone();

        let tessdata_path = match settings
            .tessdata_path
            .clone()
            .or_else(|| std::env::var_os("TESSDATA_PREFIX").map(PathBuf::from))
        {
            Some(path) => path.to_str().map(|s| s.to_string()).ok_or_else(|| {
                LprError::InitializationError("Invalid tessdata path".to_string())
            })?,
            None => ensure_tessdata_available(&language)?,
        };

        // Validate that tessdata is accessible by doing a test initialization
        let test_tess = Tesseract::new(Some(&tessdata_path), Some(&language)).map_err(|e| {
            LprError::InitializationError(format!("Failed to initialize Tesseract: {}", e))
        })?;
        drop(test_tess);

        tracing::info!(
            "Leptess engine initialized (tessdata: {}, language: {})",
            tessdata_path,
            language
        );

        Ok(Self {
            tessdata_path,
            language,
        })
    }
}

impl TextRecognizer for LeptessEngine {
    fn name(&self) -> &'static str {
        "leptess"
    }

    fn description(&self) -> &'static str {
        "In-process Tesseract OCR engine (statically linked)"
    }

    fn read_text(&self, path: &Path, engine_config: &str) -> Result<String, LprError> {
        let image_path = path
            .to_str()
            .ok_or_else(|| LprError::OcrEngineError(format!("Non UTF-8 path: {:?}", path)))?;

        let mut tess = Tesseract::new(Some(&self.tessdata_path), Some(&self.language))
            .map_err(|e| LprError::OcrEngineError(format!("Failed to create Tesseract: {}", e)))?;

        for (name, value) in config_variables(engine_config) {
            tess = tess.set_variable(&name, &value).map_err(|e| {
                LprError::OcrEngineError(format!("Failed to set {}={}: {}", name, value, e))
            })?;
        }

        tess = tess
            .set_image(image_path)
            .map_err(|e| LprError::OcrEngineError(format!("Failed to set image: {}", e)))?;

        tess = tess
            .recognize()
            .map_err(|e| LprError::OcrEngineError(format!("Failed to recognize text: {}", e)))?;

        tess.get_text()
            .map_err(|e| LprError::OcrEngineError(format!("Failed to get text: {}", e)))
    }
}

/// Translate command line style options into Tesseract variables
///
/// Understands `--psm N` and `-c name=value`. Options that only make sense
/// at initialization (`--oem`, `-l`) or are unknown are skipped with a warning.
fn config_variables(engine_config: &str) -> Vec<(String, String)> {
    let mut variables = Vec::new();
    let mut tokens = engine_config.split_whitespace();

    while let Some(token) = tokens.next() {
        match token {
            "--psm" => match tokens.next() {
                Some(mode) => {
                    variables.push(("tessedit_pageseg_mode".to_string(), mode.to_string()))
                }
                None => tracing::warn!("--psm without a value ignored"),
            },
            "-c" => match tokens.next().and_then(|kv| kv.split_once('=')) {
                Some((name, value)) => variables.push((name.to_string(), value.to_string())),
                None => tracing::warn!("-c without name=value ignored"),
            },
            "--oem" | "-l" => {
                let value = tokens.next().unwrap_or_default();
                tracing::warn!("{} {} ignored by the leptess engine", token, value);
            }
            other => tracing::warn!("Unknown engine option {:?} ignored", other),
        }
    }

    variables
}

// ============================================================================
// Tessdata download helpers
// ============================================================================

/// Ensure tessdata is available, downloading if needed
fn ensure_tessdata_available(language: &str) -> Result<String, LprError> {
    let cache_dir = dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("plate-reader")
        .join("tessdata");

    std::fs::create_dir_all(&cache_dir).map_err(|e| {
        LprError::InitializationError(format!("Failed to create tessdata directory: {}", e))
    })?;

    let traineddata_path = cache_dir.join(format!("{}.traineddata", language));

    if !traineddata_path.exists() {
        tracing::info!(
            "Downloading tessdata for '{}' (this may take a moment)...",
            language
        );
        download_file(&tessdata_url(language), &traineddata_path)?;
        tracing::info!("Downloaded tessdata to {:?}", traineddata_path);
    } else {
        tracing::info!("Using cached tessdata from {:?}", cache_dir);
    }

    // Tesseract expects the directory, not the file
    cache_dir
        .to_str()
        .map(|s| s.to_string())
        .ok_or_else(|| LprError::InitializationError("Invalid tessdata path".to_string()))
}

fn tessdata_url(language: &str) -> String {
    format!(
        "https://github.com/tesseract-ocr/tessdata_fast/raw/main/{}.traineddata",
        language
    )
}

fn download_file(url: &str, path: &Path) -> Result<(), LprError> {
    let response = ureq::get(url).call().map_err(|e| {
        LprError::InitializationError(format!("Failed to download tessdata: {}", e))
    })?;

    let buffer = response.into_body().read_to_vec().map_err(|e| {
        LprError::InitializationError(format!("Failed to read tessdata response: {}", e))
    })?;

    let mut file = File::create(path).map_err(|e| {
        LprError::InitializationError(format!("Failed to create tessdata file: {}", e))
    })?;
    file.write_all(&buffer).map_err(|e| {
        LprError::InitializationError(format!("Failed to write tessdata file: {}", e))
    })?;

    Ok(())
}
