use super::{edges, threshold};
use image::GrayImage;
use serde::{Deserialize, Serialize};

/// Rule turning the blurred grayscale image into a binary one
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum BinarizationStrategy {
    /// Global Otsu threshold
    Otsu,
    /// Gaussian-weighted local threshold (block 11, C = 2)
    #[default]
    AdaptiveGaussian,
    /// Canny edges with fixed 100/200 thresholds
    Canny,
    /// Canny edges with thresholds at median -/+ 33%
    AutoCanny,
}

impl BinarizationStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Otsu => "otsu",
            Self::AdaptiveGaussian => "adaptive-gaussian",
            Self::Canny => "canny",
            Self::AutoCanny => "auto-canny",
        }
    }

    pub fn apply(&self, gray: &GrayImage) -> GrayImage {
        match self {
            Self::Otsu => threshold::otsu(gray),
            Self::AdaptiveGaussian => threshold::adaptive_gaussian(gray),
            Self::Canny => edges::fixed(gray),
            Self::AutoCanny => edges::auto(gray),
        }
    }
}
