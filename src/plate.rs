//! License plate recognition
//!
//! Decodes the photograph, finds plate-shaped regions and tries them largest
//! first. Each tried region is written next to the source image and handed
//! to the OCR engine; the first one that yields text wins and the remaining
//! regions are never extracted.

use crate::config::PipelineConfig;
use crate::detection::{find_candidates, CandidateRegion};
use crate::engine::{recognize, TextRecognizer};
use crate::error::LprError;
use crate::extraction::extract;
use crate::preprocessing::{steps, Preprocessor};
use crate::storage;
use image::DynamicImage;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::instrument;

/// What a recognition run hands back to its caller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecognitionOutcome {
    /// Sanitized plate text, empty when nothing was read
    pub text: String,
    /// Persisted crops in candidate rank order
    pub crops: Vec<PathBuf>,
}

/// How a recognition run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// No quadrilateral region was found
    NoCandidates,
    /// Candidate `index` produced text
    Success { index: usize },
    /// Every candidate was tried without reading any text
    Exhausted,
}

/// A configured pipeline bound to an OCR engine
pub struct PlateReader {
    config: PipelineConfig,
    engine: Box<dyn TextRecognizer>,
}

impl PlateReader {
    pub fn new(config: PipelineConfig, engine: Box<dyn TextRecognizer>) -> Self {
        Self { config, engine }
    }

    pub fn engine(&self) -> &dyn TextRecognizer {
        self.engine.as_ref()
    }

    /// Recognize the plate in the image at `path`
    pub fn read(&self, path: &Path) -> Result<RecognitionOutcome, LprError> {
        recognize_plate(path, &self.config, self.engine.as_ref())
    }
}

/// Decode an image file
pub fn load_image(path: &Path) -> Result<DynamicImage, LprError> {
    image::open(path).map_err(|source| LprError::DecodeError {
        path: path.to_path_buf(),
        source,
    })
}

/// Run the whole pipeline on the image at `image_path`
///
/// Crops are written as `<stem>_<index>.jpg` in the image's directory.
/// "No region found" and "no region yielded text" both come back as an
/// empty `text`; only decode, format, storage and engine failures are errors.
#[instrument(skip(config, engine), fields(engine = engine.name()))]
pub fn recognize_plate(
    image_path: &Path,
    config: &PipelineConfig,
    engine: &dyn TextRecognizer,
) -> Result<RecognitionOutcome, LprError> {
    let start = Instant::now();

    let original = load_image(image_path)?;
    // Contours are traced in the resized geometry, so crops come from it too
    let source = match config.target_size {
        Some((width, height)) => steps::resize::apply(original, width, height)?,
        None => original,
    };

    let preprocessor = Preprocessor::new(None, config.blur, config.binarization);
    let binary = preprocessor.process(&source)?.image;
    let candidates = find_candidates(&binary);

    let (outcome, termination) = try_candidates(
        &source,
        &candidates,
        image_path,
        &config.engine_config,
        engine,
    )?;

    tracing::info!(
        ?termination,
        candidates = candidates.len(),
        crops = outcome.crops.len(),
        text = %outcome.text,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Recognition finished"
    );

    Ok(outcome)
}

/// Walk the candidates in rank order until one yields text
fn try_candidates(
    source: &DynamicImage,
    candidates: &[CandidateRegion],
    image_path: &Path,
    engine_config: &str,
    engine: &dyn TextRecognizer,
) -> Result<(RecognitionOutcome, Termination), LprError> {
    if candidates.is_empty() {
        return Ok((RecognitionOutcome::default(), Termination::NoCandidates));
    }

    let mut crops = Vec::new();
    for (index, candidate) in candidates.iter().enumerate() {
        let crop_path = storage::crop_path(image_path, index);
        let crop = extract(source, candidate, index)?.persist(&crop_path)?;
        let text = recognize(engine, &crop_path, engine_config)?;
        tracing::debug!(
            index = crop.index,
            area = candidate.area,
            path = ?crop.path,
            %text,
            "Candidate tried"
        );
        crops.push(crop_path);

        if !text.is_empty() {
            return Ok((RecognitionOutcome { text, crops }, Termination::Success { index }));
        }
    }

    Ok((
        RecognitionOutcome {
            text: String::new(),
            crops,
        },
        Termination::Exhausted,
    ))
}
