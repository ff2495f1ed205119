use image::GrayImage;
use imageproc::edges::canny;

/// Fixed Canny hysteresis thresholds
pub const CANNY_LOW: f32 = 100.0;
pub const CANNY_HIGH: f32 = 200.0;

/// Spread around the median used to derive automatic thresholds
const AUTO_SIGMA: f32 = 0.33;

/// Canny edge detection with fixed thresholds. Edges become foreground.
pub fn fixed(gray: &GrayImage) -> GrayImage {
    canny(gray, CANNY_LOW, CANNY_HIGH)
}

/// Canny edge detection with thresholds derived from the image median
pub fn auto(gray: &GrayImage) -> GrayImage {
    let (low, high) = auto_thresholds(median(gray));
    canny(gray, low, high)
}

fn auto_thresholds(median: f32) -> (f32, f32) {
    let low = ((1.0 - AUTO_SIGMA) * median).max(0.0).floor();
    let high = ((1.0 + AUTO_SIGMA) * median).min(255.0).floor();
    (low, high)
}

/// Median intensity; the two middle values are averaged for even counts
fn median(gray: &GrayImage) -> f32 {
    let mut histogram = [0u64; 256];
    for pixel in gray.pixels() {
        histogram[pixel.0[0] as usize] += 1;
    }

    let total: u64 = histogram.iter().sum();
    if total == 0 {
        return 0.0;
    }

    let nth = |rank: u64| -> f32 {
        let mut seen = 0u64;
        for (value, count) in histogram.iter().enumerate() {
            seen += count;
            if seen > rank {
                return value as f32;
            }
        }
        255.0
    };

    if total % 2 == 1 {
        nth(total / 2)
    } else {
        (nth(total / 2 - 1) + nth(total / 2)) / 2.0
    }
}
