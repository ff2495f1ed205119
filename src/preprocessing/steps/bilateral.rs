use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::filter::bilateral_filter;
use imageproc::map::{map_colors, map_colors2};

/// Window size shared by the blur step and crop preparation
pub const DIAMETER: u32 = 11;
/// Filter sigma in colour space
pub const SIGMA_COLOR: f32 = 17.0;
/// Filter sigma in coordinate space
pub const SIGMA_SPACE: f32 = 17.0;

/// Edge-preserving smoothing of a grayscale image
pub fn gray(image: &GrayImage) -> GrayImage {
    bilateral_filter(image, DIAMETER, SIGMA_COLOR, SIGMA_SPACE)
}

/// Edge-preserving smoothing of a colour image, one channel at a time
pub fn rgb(image: &RgbImage) -> RgbImage {
    let [r, g, b] = [0, 1, 2].map(|c| gray(&map_colors(image, |p| Luma([p.0[c]]))));
    let rg = map_colors2(&r, &g, |r, g| Rgb([r.0[0], g.0[0], 0]));
    map_colors2(&rg, &b, |rg, b| Rgb([rg.0[0], rg.0[1], b.0[0]]))
}
