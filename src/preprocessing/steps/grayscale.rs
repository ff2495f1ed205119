use crate::error::LprError;
use image::{ColorType, DynamicImage, GrayImage};

/// Convert image to single-channel 8-bit grayscale
/// Floating point buffers have no defined 8-bit luma mapping and are rejected
pub fn apply(image: &DynamicImage) -> Result<GrayImage, LprError> {
    match image.color() {
        ColorType::Rgb32F | ColorType::Rgba32F => Err(LprError::UnsupportedFormat(format!(
            "Cannot convert {:?} to grayscale",
            image.color()
        ))),
        _ => Ok(image.to_luma8()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, Rgb32FImage, RgbImage};

    #[test]
    fn test_grayscale_converts_color() {
        let mut img = RgbImage::new(10, 10);
        img.put_pixel(0, 0, Rgb([255, 0, 0])); // Red
        img.put_pixel(1, 0, Rgb([0, 255, 0])); // Green
        img.put_pixel(2, 0, Rgb([0, 0, 255])); // Blue

        let gray = apply(&DynamicImage::ImageRgb8(img)).unwrap();

        assert!(gray.get_pixel(0, 0).0[0] > 0);
        assert!(gray.get_pixel(1, 0).0[0] > 0);
        assert!(gray.get_pixel(2, 0).0[0] > 0);
        assert_eq!(gray.get_pixel(3, 0).0[0], 0);
    }

    #[test]
    fn test_grayscale_preserves_dimensions() {
        let img = RgbImage::new(100, 50);
        let gray = apply(&DynamicImage::ImageRgb8(img)).unwrap();
        assert_eq!(gray.dimensions(), (100, 50));
    }

    #[test]
    fn test_grayscale_rejects_float_buffers() {
        let img = Rgb32FImage::new(4, 4);
        let result = apply(&DynamicImage::ImageRgb32F(img));
        assert!(matches!(result, Err(LprError::UnsupportedFormat(_))));
    }
}
