use crate::error::LprError;
use image::{DynamicImage, GrayImage};
use std::time::Instant;

use super::steps;
use super::{BinarizationStrategy, BlurStrategy};

/// Timing information for a single preprocessing step
#[derive(Debug, Clone)]
pub struct StepTiming {
    pub name: String,
    pub time_ms: u64,
}

/// Result of preprocessing including timing stats
#[derive(Debug, Clone)]
pub struct PreprocessingResult {
    /// Binary image
    pub image: GrayImage,
    /// Total preprocessing time in milliseconds
    pub total_time_ms: u64,
    /// Individual step timings
    pub steps: Vec<StepTiming>,
}

/// Resize, grayscale, blur and binarize, in that order
#[derive(Debug, Clone, Copy)]
pub struct Preprocessor {
    target_size: Option<(u32, u32)>,
    blur: BlurStrategy,
    binarization: BinarizationStrategy,
}

impl Preprocessor {
    pub fn new(
        target_size: Option<(u32, u32)>,
        blur: BlurStrategy,
        binarization: BinarizationStrategy,
    ) -> Self {
        Self {
            target_size,
            blur,
            binarization,
        }
    }

    /// Produce the binary image for `image`. The input is left untouched.
    pub fn process(&self, image: &DynamicImage) -> Result<PreprocessingResult, LprError> {
        let start = Instant::now();
        let mut timings = Vec::new();

        let resized = match self.target_size {
            Some((width, height)) => Some(run_step("resize", &mut timings, || {
                steps::resize::apply(image.clone(), width, height)
            })?),
            None => None,
        };
        let source = resized.as_ref().unwrap_or(image);

        let gray = run_step("grayscale", &mut timings, || steps::grayscale::apply(source))?;
        let blurred = run_step(self.blur.as_str(), &mut timings, || Ok(self.blur.apply(&gray)))?;
        let binary = run_step(self.binarization.as_str(), &mut timings, || {
            Ok(self.binarization.apply(&blurred))
        })?;

        let total_time_ms = start.elapsed().as_millis() as u64;
        tracing::debug!(
            total_time_ms,
            steps = ?timings,
            "Preprocessed {}x{} image",
            binary.width(),
            binary.height()
        );

        Ok(PreprocessingResult {
            image: binary,
            total_time_ms,
            steps: timings,
        })
    }
}

/// Convenience wrapper returning only the binary image
pub fn preprocess(
    image: &DynamicImage,
    target_size: Option<(u32, u32)>,
    blur: BlurStrategy,
    binarization: BinarizationStrategy,
) -> Result<GrayImage, LprError> {
    Preprocessor::new(target_size, blur, binarization)
        .process(image)
        .map(|result| result.image)
}

fn run_step<T, F>(name: &str, timings: &mut Vec<StepTiming>, step_fn: F) -> Result<T, LprError>
where
    F: FnOnce() -> Result<T, LprError>,
{
    let step_start = Instant::now();
    let result = step_fn()?;
    timings.push(StepTiming {
        name: name.to_string(),
        time_ms: step_start.elapsed().as_millis() as u64,
    });
    Ok(result)
}
