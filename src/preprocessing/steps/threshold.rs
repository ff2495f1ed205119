use image::{GrayImage, Luma};
use imageproc::contrast::otsu_level;
use imageproc::filter::separable_filter_equal;

/// Adaptive threshold parameters
const BLOCK_SIZE: usize = 11;
const C: i32 = 2;

/// Pixel value marking foreground (ink) in the binary image
pub const FOREGROUND: u8 = 255;
/// Pixel value marking background in the binary image
pub const BACKGROUND: u8 = 0;

/// Global Otsu threshold
///
/// Pixels at or below the Otsu level are ink and become foreground.
/// An image with a single intensity has nothing to separate and
/// yields an all-background result.
pub fn otsu(gray: &GrayImage) -> GrayImage {
    let (min_val, max_val) = find_min_max(gray);
    if max_val <= min_val {
        return GrayImage::from_pixel(gray.width(), gray.height(), Luma([BACKGROUND]));
    }

    let level = otsu_level(gray);
    GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        if gray.get_pixel(x, y).0[0] <= level {
            Luma([FOREGROUND])
        } else {
            Luma([BACKGROUND])
        }
    })
}

/// Adaptive Gaussian-weighted threshold (block size 11, constant 2)
///
/// For each pixel, threshold = gaussian_mean(block) - C. Pixels that are not
/// brighter than their local threshold are ink and become foreground.
pub fn adaptive_gaussian(gray: &GrayImage) -> GrayImage {
    let kernel = gaussian_kernel(BLOCK_SIZE);
    let local_mean: GrayImage = separable_filter_equal(gray, &kernel);

    GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        let pixel = gray.get_pixel(x, y).0[0] as i32;
        let mean = local_mean.get_pixel(x, y).0[0] as i32;
        if pixel - mean > -C {
            Luma([BACKGROUND])
        } else {
            Luma([FOREGROUND])
        }
    })
}

/// Normalized 1-D Gaussian kernel with the sigma conventionally derived
/// from the kernel size: 0.3 * ((size - 1) * 0.5 - 1) + 0.8
fn gaussian_kernel(size: usize) -> Vec<f32> {
    let sigma = 0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8;
    let center = (size / 2) as f32;
    let weights: Vec<f32> = (0..size)
        .map(|i| {
            let d = i as f32 - center;
            (-(d * d) / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let total: f32 = weights.iter().sum();
    weights.into_iter().map(|w| w / total).collect()
}

fn find_min_max(img: &GrayImage) -> (u8, u8) {
    let mut min = 255u8;
    let mut max = 0u8;

    for pixel in img.pixels() {
        let val = pixel.0[0];
        min = min.min(val);
        max = max.max(val);
    }

    (min, max)
}
