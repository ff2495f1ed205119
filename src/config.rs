use crate::preprocessing::{BinarizationStrategy, BlurStrategy};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Page segmentation mode 13 treats the crop as a single raw text line
pub const DEFAULT_ENGINE_CONFIG: &str = "--psm 13";

/// Settings for one recognition run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Exact (width, height) to resize the source to before preprocessing
    pub target_size: Option<(u32, u32)>,
    pub blur: BlurStrategy,
    pub binarization: BinarizationStrategy,
    /// Opaque string handed to the OCR engine
    pub engine_config: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            target_size: None,
            blur: BlurStrategy::Median,
            binarization: BinarizationStrategy::AdaptiveGaussian,
            engine_config: DEFAULT_ENGINE_CONFIG.to_string(),
        }
    }
}

/// OCR backends this crate knows how to drive
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum EngineKind {
    /// The `tesseract` executable
    #[default]
    Tesseract,
    /// In-process Tesseract (feature `engine-leptess`)
    Leptess,
    /// Pure Rust ocrs engine (feature `engine-ocrs`)
    Ocrs,
}

impl EngineKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tesseract => "tesseract",
            Self::Leptess => "leptess",
            Self::Ocrs => "ocrs",
        }
    }
}

/// OCR engine settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    pub kind: EngineKind,
    /// Tesseract language (e.g., "eng")
    pub language: String,
    /// Path to tessdata directory (uses TESSDATA_PREFIX env var if not set)
    pub tessdata_path: Option<PathBuf>,
    /// Tesseract executable used by the `tesseract` engine
    pub tesseract_bin: PathBuf,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            kind: EngineKind::default(),
            language: "eng".to_string(),
            tessdata_path: None,
            tesseract_bin: PathBuf::from("tesseract"),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub pipeline: PipelineConfig,
    pub engine: EngineSettings,
}
