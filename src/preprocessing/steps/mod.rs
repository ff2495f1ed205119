//! Individual preprocessing steps

pub mod bilateral;
pub mod binarize;
pub mod blur;
pub mod edges;
pub mod grayscale;
pub mod resize;
pub mod threshold;
