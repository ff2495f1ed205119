use crate::error::LprError;
use image::{imageops::FilterType, DynamicImage, GenericImageView};

/// Resize image to exactly `width x height`
/// The caller supplies both dimensions; aspect ratio is not preserved
pub fn apply(image: DynamicImage, width: u32, height: u32) -> Result<DynamicImage, LprError> {
    if width == 0 || height == 0 {
        return Err(LprError::UnsupportedFormat(format!(
            "Target size must be non-zero, got {}x{}",
            width, height
        )));
    }

    // Skip resize if dimensions already match
    if image.dimensions() == (width, height) {
        return Ok(image);
    }

    Ok(image.resize_exact(width, height, FilterType::CatmullRom))
}
