//! Candidate region extraction and OCR preparation

use crate::detection::CandidateRegion;
use crate::error::LprError;
use crate::preprocessing::steps::bilateral;
use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage};
use imageproc::rect::Rect;
use std::path::{Path, PathBuf};

/// Upscale factor applied to every crop before OCR
const UPSCALE: u32 = 2;

/// A prepared crop of the original photograph
#[derive(Debug, Clone)]
pub struct ExtractedCrop {
    /// Upscaled, filtered crop ready for OCR
    pub image: DynamicImage,
    /// 0-based rank of the candidate it came from
    pub index: usize,
    /// Where the crop was written, once persisted
    pub path: Option<PathBuf>,
}

impl ExtractedCrop {
    /// Write the crop as JPEG and return it with its path recorded
    pub fn persist(self, path: &Path) -> Result<Self, LprError> {
        crate::storage::save_crop(&self.image, path)?;
        Ok(Self {
            path: Some(path.to_path_buf()),
            ..self
        })
    }
}

/// Crop the candidate's bounding rectangle out of `original` and prepare it for OCR
pub fn extract(
    original: &DynamicImage,
    candidate: &CandidateRegion,
    index: usize,
) -> Result<ExtractedCrop, LprError> {
    let rect = clamped_rect(original, candidate)?;
    let cropped = crop(original, rect);
    let prepared = prepare_for_ocr(&cropped);

    tracing::debug!(
        index,
        x = rect.left(),
        y = rect.top(),
        width = rect.width(),
        height = rect.height(),
        "Extracted candidate region"
    );

    Ok(ExtractedCrop {
        image: DynamicImage::ImageRgb8(prepared),
        index,
        path: None,
    })
}

/// Bounding rectangle of the candidate intersected with the image bounds
pub fn clamped_rect(image: &DynamicImage, candidate: &CandidateRegion) -> Result<Rect, LprError> {
    let bounds = candidate
        .bounding_rect()
        .ok_or_else(|| LprError::RegionOutOfBounds("candidate has no points".to_string()))?;
    if image.width() == 0 || image.height() == 0 {
        return Err(LprError::RegionOutOfBounds("image is empty".to_string()));
    }
    let frame = Rect::at(0, 0).of_size(image.width(), image.height());

    bounds.intersect(frame).ok_or_else(|| {
        LprError::RegionOutOfBounds(format!(
            "({}, {}) {}x{} misses {}x{} image",
            bounds.left(),
            bounds.top(),
            bounds.width(),
            bounds.height(),
            image.width(),
            image.height()
        ))
    })
}

/// Copy `rect` out of the image as RGB8. `rect` must lie inside the image.
fn crop(image: &DynamicImage, rect: Rect) -> RgbImage {
    image
        .crop_imm(
            rect.left() as u32,
            rect.top() as u32,
            rect.width(),
            rect.height(),
        )
        .to_rgb8()
}

/// Upscale 2x with cubic interpolation, then smooth noise while keeping edges
pub fn prepare_for_ocr(crop: &RgbImage) -> RgbImage {
    let upscaled = imageops::resize(
        crop,
        crop.width() * UPSCALE,
        crop.height() * UPSCALE,
        FilterType::CatmullRom,
    );
    bilateral::rgb(&upscaled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use imageproc::point::Point;

    fn quad(x0: i32, y0: i32, x1: i32, y1: i32) -> CandidateRegion {
        CandidateRegion::new(
            vec![
                Point::new(x0, y0),
                Point::new(x1, y0),
                Point::new(x1, y1),
                Point::new(x0, y1),
            ],
            ((x1 - x0) * (y1 - y0)) as f64,
        )
    }

    fn photo() -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(80, 50, |x, y| {
            Rgb([(x * 3) as u8, (y * 5) as u8, 90])
        }))
    }

    #[test]
    fn test_extract_upscales_bounding_rect() {
        let crop = extract(&photo(), &quad(10, 5, 39, 24), 3).unwrap();
        assert_eq!(crop.index, 3);
        assert_eq!(crop.path, None);
        assert_eq!((crop.image.width(), crop.image.height()), (60, 40));
    }

    #[test]
    fn test_extract_clamps_to_image_bounds() {
        let rect = clamped_rect(&photo(), &quad(-20, -10, 200, 30)).unwrap();
        assert_eq!((rect.left(), rect.top()), (0, 0));
        assert_eq!((rect.width(), rect.height()), (80, 31));

        let crop = extract(&photo(), &quad(60, 40, 500, 400), 0).unwrap();
        assert_eq!((crop.image.width(), crop.image.height()), (40, 20));
    }

    #[test]
    fn test_extract_rejects_region_outside_image() {
        let result = extract(&photo(), &quad(100, 100, 120, 120), 0);
        assert!(matches!(result, Err(LprError::RegionOutOfBounds(_))));
    }

    #[test]
    fn test_crop_comes_from_original_colors() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(30, 30, Rgb([200, 40, 10])));
        let crop = extract(&img, &quad(5, 5, 14, 14), 0).unwrap();
        let rgb = crop.image.to_rgb8();
        assert!(rgb.pixels().all(|p| *p == Rgb([200, 40, 10])));
    }
}
