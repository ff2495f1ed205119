use super::bilateral;
use image::GrayImage;
use imageproc::filter::{filter3x3, median_filter};
use serde::{Deserialize, Serialize};

/// Noise reduction applied to the grayscale image before binarization
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum BlurStrategy {
    /// Fixed 3x3 Gaussian kernel
    Gaussian,
    /// Median filter with aperture 3, good against salt-and-pepper noise
    #[default]
    Median,
    /// Bilateral filter (window 11, sigma 17/17), keeps edges sharp
    Bilateral,
}

impl BlurStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gaussian => "gaussian",
            Self::Median => "median",
            Self::Bilateral => "bilateral",
        }
    }

    pub fn apply(&self, gray: &GrayImage) -> GrayImage {
        match self {
            Self::Gaussian => gaussian_3x3(gray),
            // 3x3 median filter (radius 1)
            Self::Median => median_filter(gray, 1, 1),
            Self::Bilateral => bilateral::gray(gray),
        }
    }
}

fn gaussian_3x3(gray: &GrayImage) -> GrayImage {
    // Binomial approximation of a Gaussian, weights sum to 1
    let kernel: [f32; 9] = [
        0.0625, 0.125, 0.0625, //
        0.125, 0.25, 0.125, //
        0.0625, 0.125, 0.0625,
    ];
    filter3x3(gray, &kernel)
}
