//! License plate extraction and recognition
//!
//! The pipeline binarizes a photograph, traces plate-shaped quadrilaterals,
//! crops them out of the original image and reads them with an OCR engine,
//! stopping at the first region that yields text.
//!
//! ```no_run
//! use plate_reader::{engines, recognize_plate, EngineSettings, PipelineConfig};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), plate_reader::LprError> {
//! let engine = engines::create(&EngineSettings::default())?;
//! let outcome = recognize_plate(Path::new("car.jpg"), &PipelineConfig::default(), engine.as_ref())?;
//! println!("{} ({} crops)", outcome.text, outcome.crops.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod detection;
pub mod engine;
pub mod engines;
pub mod error;
pub mod extraction;
pub mod plate;
pub mod preprocessing;
pub mod storage;

pub use config::{Config, EngineKind, EngineSettings, PipelineConfig};
pub use detection::{find_candidates, CandidateRegion};
pub use engine::{recognize, sanitize, TextRecognizer};
pub use error::LprError;
pub use extraction::{extract, ExtractedCrop};
pub use plate::{load_image, recognize_plate, PlateReader, RecognitionOutcome};
pub use preprocessing::{preprocess, BinarizationStrategy, BlurStrategy};
