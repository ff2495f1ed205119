//! Candidate plate region detection
//!
//! Traces every contour of the binary image, ranks them by enclosed area and
//! keeps the largest ones whose polygon approximation has four corners.

use image::GrayImage;
use imageproc::contours::find_contours;
use imageproc::geometry::{arc_length, contour_area};
use imageproc::point::Point;
use imageproc::rect::Rect;
use std::cmp::Ordering;

/// Upper bound on contours examined per image, largest first
pub const MAX_CANDIDATES: usize = 10;

/// Polygon approximation tolerance as a fraction of the contour perimeter
const APPROX_EPSILON_RATIO: f64 = 0.02;

/// A quadrilateral hypothesized to be a license plate
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateRegion {
    /// Polygon corners in contour order
    pub points: Vec<Point<i32>>,
    /// Area enclosed by the source contour, in pixels
    pub area: f64,
}

impl CandidateRegion {
    pub fn new(points: Vec<Point<i32>>, area: f64) -> Self {
        Self { points, area }
    }

    /// Smallest axis-aligned rectangle covering every corner
    /// (inclusive of the extreme pixels). `None` for an empty polygon.
    pub fn bounding_rect(&self) -> Option<Rect> {
        let first = self.points.first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in &self.points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        let width = (max_x - min_x + 1) as u32;
        let height = (max_y - min_y + 1) as u32;
        Some(Rect::at(min_x, min_y).of_size(width, height))
    }
}

/// Find plate-shaped regions, largest first
///
/// Returns an empty vector when no quadrilateral survives, which is a
/// normal outcome. Contours of equal area keep their discovery order.
pub fn find_candidates(binary: &GrayImage) -> Vec<CandidateRegion> {
    let contours = find_contours::<i32>(binary);
    let found = contours.len();

    let mut ranked: Vec<(Vec<Point<i32>>, f64)> = contours
        .into_iter()
        .map(|contour| {
            let area = contour_area(&contour.points).abs();
            (contour.points, area)
        })
        .collect();

    // sort_by is stable, so ties keep discovery order
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    let candidates: Vec<CandidateRegion> = ranked
        .into_iter()
        .take(MAX_CANDIDATES)
        .filter_map(|(points, area)| {
            let perimeter = arc_length(&points, true);
            let approx = approximate_closed_polygon(&points, APPROX_EPSILON_RATIO * perimeter);
            (approx.len() == 4).then(|| CandidateRegion::new(approx, area))
        })
        .collect();

    tracing::debug!(
        contours = found,
        candidates = candidates.len(),
        "Region detection finished"
    );

    candidates
}

/// Douglas-Peucker simplification of a closed curve
///
/// `imageproc::geometry::approximate_polygon_dp` treats the first and last
/// points as a fixed closing segment and panics on a zero epsilon.
///
/// The curve is split at the point farthest from its first point and each
/// half is simplified on its own, so the result does not depend on an
/// arbitrary closing segment. Vertices keep their order along the curve.
pub fn approximate_closed_polygon(points: &[Point<i32>], epsilon: f64) -> Vec<Point<i32>> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let first = points[0];
    let far = points
        .iter()
        .enumerate()
        .max_by_key(|(_, p)| {
            let dx = (p.x - first.x) as i64;
            let dy = (p.y - first.y) as i64;
            dx * dx + dy * dy
        })
        .map(|(i, _)| i)
        .unwrap_or(0);
    if far == 0 {
        return vec![first];
    }

    // Close the ring so the second half ends back at the first point
    let n = points.len();
    let at = |i: usize| points[i % n];

    let mut keep = vec![false; n + 1];
    keep[0] = true;
    keep[far] = true;

    let mut stack = vec![(0usize, far), (far, n)];
    while let Some((start, end)) = stack.pop() {
        if end <= start + 1 {
            continue;
        }
        let (a, b) = (at(start), at(end));
        let mut max_distance = 0.0;
        let mut index = start;
        for i in start + 1..end {
            let d = perpendicular_distance(at(i), a, b);
            if d > max_distance {
                max_distance = d;
                index = i;
            }
        }
        if max_distance > epsilon {
            keep[index] = true;
            stack.push((start, index));
            stack.push((index, end));
        }
    }

    (0..n).filter(|&i| keep[i]).map(at).collect()
}

/// Distance from `p` to the line through `a` and `b` (or to `a` if they coincide)
fn perpendicular_distance(p: Point<i32>, a: Point<i32>, b: Point<i32>) -> f64 {
    let (px, py) = (p.x as f64, p.y as f64);
    let (ax, ay) = (a.x as f64, a.y as f64);
    let (bx, by) = (b.x as f64, b.y as f64);
    let dx = bx - ax;
    let dy = by - ay;
    let length = (dx * dx + dy * dy).sqrt();
    if length == 0.0 {
        return ((px - ax).powi(2) + (py - ay).powi(2)).sqrt();
    }
    ((px - ax) * dy - (py - ay) * dx).abs() / length
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;
    use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut};

    fn canvas(width: u32, height: u32) -> GrayImage {
        GrayImage::from_pixel(width, height, Luma([0]))
    }

    fn fill(img: &mut GrayImage, x: i32, y: i32, w: u32, h: u32) {
        draw_filled_rect_mut(img, Rect::at(x, y).of_size(w, h), Luma([255]));
    }

    #[test]
    fn test_area_is_enclosed_by_boundary_pixels() {
        let mut img = canvas(100, 60);
        fill(&mut img, 20, 15, 50, 20);
        let candidates = find_candidates(&img);
        // Boundary runs through pixel centres: 49 x 19
        assert_eq!(candidates[0].area, 931.0);
    }

    #[test]
    fn test_approximation_reduces_rectangle_outline_to_corners() {
        let mut outline = Vec::new();
        for x in 0..20 {
            outline.push(Point::new(x, 0));
        }
        for y in 0..10 {
            outline.push(Point::new(20, y));
        }
        for x in (1..=20).rev() {
            outline.push(Point::new(x, 10));
        }
        for y in (1..=10).rev() {
            outline.push(Point::new(0, y));
        }
        let perimeter = arc_length(&outline, true);
        let approx = approximate_closed_polygon(&outline, 0.02 * perimeter);
        assert_eq!(
            approx,
            vec![
                Point::new(0, 0),
                Point::new(20, 0),
                Point::new(20, 10),
                Point::new(0, 10),
            ]
        );
    }

    #[test]
    fn test_blank_image_has_no_candidates() {
        assert!(find_candidates(&canvas(50, 50)).is_empty());
    }

    #[test]
    fn test_all_foreground_image_has_no_candidates() {
        let img = GrayImage::from_pixel(50, 50, Luma([255]));
        assert!(find_candidates(&img).is_empty());
    }

    #[test]
    fn test_single_rectangle_is_found() {
        let mut img = canvas(100, 60);
        fill(&mut img, 20, 15, 50, 20);
        let candidates = find_candidates(&img);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].points.len(), 4);

        let rect = candidates[0].bounding_rect().unwrap();
        assert_eq!((rect.left(), rect.top()), (20, 15));
        assert_eq!((rect.width(), rect.height()), (50, 20));
    }

    #[test]
    fn test_non_quadrilateral_shapes_are_dropped() {
        let mut img = canvas(100, 100);
        draw_filled_circle_mut(&mut img, (50, 50), 30, Luma([255]));
        assert!(find_candidates(&img).is_empty());
    }

    #[test]
    fn test_candidates_ordered_by_area() {
        let mut img = canvas(200, 120);
        fill(&mut img, 5, 5, 20, 10);
        fill(&mut img, 40, 5, 60, 30);
        fill(&mut img, 120, 5, 40, 20);
        fill(&mut img, 5, 60, 80, 40);

        let candidates = find_candidates(&img);
        assert_eq!(candidates.len(), 4);
        for pair in candidates.windows(2) {
            assert!(pair[0].area >= pair[1].area);
        }
        let widest = candidates[0].bounding_rect().unwrap();
        assert_eq!(widest.width(), 80);
    }

    #[test]
    fn test_at_most_ten_candidates_considered() {
        // 15 rectangles with distinct areas
        let mut img = canvas(400, 300);
        for i in 0..15 {
            let x = 10 + (i % 5) * 78;
            let y = 10 + (i / 5) * 95;
            fill(&mut img, x, y, 20 + i as u32 * 3, 15 + i as u32 * 4);
        }
        let candidates = find_candidates(&img);
        assert!(candidates.len() <= MAX_CANDIDATES);
        assert_eq!(candidates.len(), MAX_CANDIDATES);
        for pair in candidates.windows(2) {
            assert!(pair[0].area > pair[1].area);
        }
    }

    #[test]
    fn test_ring_yields_outer_and_hole_candidates() {
        let mut img = canvas(120, 80);
        fill(&mut img, 10, 10, 100, 60);
        draw_filled_rect_mut(&mut img, Rect::at(16, 16).of_size(88, 48), Luma([0]));

        let candidates = find_candidates(&img);
        assert_eq!(candidates.len(), 2);
        // The hole is traced in the opposite direction but still has positive area
        assert_eq!(candidates[0].area, 99.0 * 59.0);
        assert!(candidates[1].area > 0.0);
        assert!(candidates[0].area > candidates[1].area);
    }
}
