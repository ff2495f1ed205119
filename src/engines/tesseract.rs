//! Tesseract executable engine
//!
//! Runs the system `tesseract` binary once per crop, the same way the
//! command line tool is used by hand: `tesseract <image> stdout -l <lang>`
//! followed by the caller's engine configuration (e.g. `--psm 13`).
//! Trained data is located through `TESSDATA_PREFIX`.

use crate::config::EngineSettings;
use crate::engine::TextRecognizer;
use crate::error::LprError;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Tesseract OCR engine backed by the command line tool
pub struct TesseractEngine {
    /// Executable to run
    binary: PathBuf,
    /// Language passed with `-l`
    language: String,
    /// Overrides TESSDATA_PREFIX for the child process when set
    tessdata_path: Option<PathBuf>,
}

impl TesseractEngine {
    /// Create the engine. The executable is not checked until first use, so a
    /// missing installation surfaces as `OcrEngineError` on the first crop.
    pub fn new(settings: &EngineSettings) -> Self {
        tracing::info!(
            "Tesseract engine configured (binary: {:?}, language: {}, tessdata: {:?})",
            settings.tesseract_bin,
            settings.language,
            settings.tessdata_path
        );

        Self {
            binary: settings.tesseract_bin.clone(),
            language: settings.language.clone(),
            tessdata_path: settings.tessdata_path.clone(),
        }
    }

    fn command(&self, path: &Path, engine_config: &str) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.arg(path)
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .args(engine_config.split_whitespace());
        if let Some(tessdata) = &self.tessdata_path {
            cmd.env("TESSDATA_PREFIX", tessdata);
        }
        cmd
    }
}

impl TextRecognizer for TesseractEngine {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    fn description(&self) -> &'static str {
        "Tesseract command line tool - configured through TESSDATA_PREFIX"
    }

    fn read_text(&self, path: &Path, engine_config: &str) -> Result<String, LprError> {
        let output = self.command(path, engine_config).output().map_err(|e| {
            LprError::OcrEngineError(format!("Failed to run {:?}: {}", self.binary, e))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(LprError::OcrEngineError(format!(
                "{:?} exited with {}: {}",
                self.binary,
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
