//! Image preprocessing for plate detection
//!
//! Turns a decoded photograph into a binary image whose foreground marks the
//! structure (ink or edges) that the region detector traces.

pub mod pipeline;
pub mod steps;

pub use pipeline::{preprocess, PreprocessingResult, Preprocessor, StepTiming};
pub use steps::binarize::BinarizationStrategy;
pub use steps::blur::BlurStrategy;
