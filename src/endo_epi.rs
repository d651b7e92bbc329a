//! Splitting a single heart-chamber component into epicardium and
//! endocardium masks.

use std::collections::VecDeque;

use image::{GrayImage, Luma};
use imageproc::{geometry::convex_hull, point::Point, region_labelling::Connectivity};
use log::warn;

use crate::components::{Centroid, extract_largest_component_with};
use crate::config::MaskConfig;
use crate::error::Result;
use crate::mask::{FOREGROUND, foreground_points, is_empty, is_foreground};
use crate::rect::points_bounding_box;

const FOUR_NEIGHBOURS: [(i64, i64); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

const EIGHT_NEIGHBOURS: [(i64, i64); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// Computes the epicardium and endocardium masks of a single component.
///
/// The epicardium approximates the outer wall by the convex hull of the
/// component: every pixel whose center lies inside or on the hull of the
/// foreground pixel centers is set, so concave notches are filled in. The
/// endocardium is the part of the component reachable from `centroid` by an
/// 8-connected flood fill over foreground pixels.
///
/// The mask is expected to hold a single connected component, as produced by
/// [`extract_largest_component`](crate::components::extract_largest_component).
/// No further filtering happens here. For a filled convex shape both outputs
/// equal the input.
///
/// If `centroid` lies on background, which happens for ring-shaped or
/// strongly concave components, the endocardium is empty. This is a valid
/// result: it is logged at `warn` level and callers check it with
/// [`is_empty`](crate::mask::is_empty).
///
/// # Arguments
///
/// * `mask`: A single-component binary mask.
/// * `centroid`: The flood-fill seed as `(row, column)`, usually the
///   component's rounded centroid.
///
/// # Returns
///
/// A tuple `(epicardium, endocardium)` of `{0, 1}` masks with the same
/// dimensions as `mask`.
///
/// # Examples
///
/// ```
/// use image::{GrayImage, Luma};
/// use cardiac_masks::{Centroid, split_into_endo_epi_masks};
///
/// let mask = GrayImage::from_fn(12, 12, |x, y| {
///     Luma([((2..10).contains(&x) && (3..9).contains(&y)) as u8])
/// });
///
/// let (epicardium, endocardium) = split_into_endo_epi_masks(&mask, Centroid::new(6, 6));
/// assert_eq!(epicardium, mask);
/// assert_eq!(endocardium, mask);
/// ```
pub fn split_into_endo_epi_masks(mask: &GrayImage, centroid: Centroid) -> (GrayImage, GrayImage) {
    split_into_endo_epi_masks_with(mask, centroid, &MaskConfig::default())
}

/// [`split_into_endo_epi_masks`] with an explicit configuration.
pub fn split_into_endo_epi_masks_with(
    mask: &GrayImage,
    centroid: Centroid,
    config: &MaskConfig,
) -> (GrayImage, GrayImage) {
    let epicardium = convex_hull_mask(mask);
    let endocardium = flood(mask, centroid, config.fill_connectivity);

    if is_empty(&endocardium) {
        warn!(
            "seed ({}, {}) is not on the foreground, endocardium mask is empty",
            centroid.row, centroid.column
        );
    }

    (epicardium, endocardium)
}

/// Extracts epicardium and endocardium masks from an arbitrary mask.
///
/// Runs [`extract_largest_component`](crate::components::extract_largest_component)
/// first and splits the result.
///
/// # Errors
///
/// [`MaskError::EmptyMask`](crate::error::MaskError::EmptyMask) if `mask`
/// has no foreground.
pub fn get_endo_epi_masks(mask: &GrayImage) -> Result<(GrayImage, GrayImage)> {
    get_endo_epi_masks_with(mask, &MaskConfig::default())
}

/// [`get_endo_epi_masks`] with an explicit configuration.
pub fn get_endo_epi_masks_with(
    mask: &GrayImage,
    config: &MaskConfig,
) -> Result<(GrayImage, GrayImage)> {
    let (component, centroid) = extract_largest_component_with(mask, config)?;
    Ok(split_into_endo_epi_masks_with(&component, centroid, config))
}

/// Rasterizes the convex hull of the foreground pixel centers.
///
/// A pixel is set when its center lies inside or on the hull.
pub fn convex_hull_mask(mask: &GrayImage) -> GrayImage {
    let (width, height) = mask.dimensions();
    let mut out = GrayImage::new(width, height);

    let points = foreground_points(mask);
    if points.is_empty() {
        return out;
    }
    let hull = convex_hull(points.as_slice());
    let Some(bounds) = points_bounding_box(&hull) else {
        return out;
    };

    let inside = hull_test(&hull);
    for y in bounds.y..bounds.y + bounds.height {
        for x in bounds.x..bounds.x + bounds.width {
            if inside(Point::new(x as i64, y as i64)) {
                out.put_pixel(x, y, Luma([FOREGROUND]));
            }
        }
    }
    out
}

#[inline]
fn cross(o: Point<i64>, a: Point<i64>, b: Point<i64>) -> i64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

/// Builds a containment test for a convex polygon. The caller only queries
/// points inside the hull's bounding box.
fn hull_test(hull: &[Point<i32>]) -> impl Fn(Point<i64>) -> bool {
    let vertices: Vec<Point<i64>> = hull
        .iter()
        .map(|p| Point::new(i64::from(p.x), i64::from(p.y)))
        .collect();

    let n = vertices.len();
    let doubled_area: i64 = (0..n)
        .map(|i| {
            let (a, b) = (vertices[i], vertices[(i + 1) % n]);
            a.x * b.y - b.x * a.y
        })
        .sum();

    move |p| {
        if doubled_area == 0 {
            // Collinear (or single-point) hull: only points on the line.
            let a = vertices[0];
            return match vertices.iter().find(|v| **v != a) {
                Some(&b) => cross(a, b, p) == 0,
                None => p == a,
            };
        }
        (0..n).all(|i| {
            let c = cross(vertices[i], vertices[(i + 1) % n], p);
            if doubled_area > 0 { c >= 0 } else { c <= 0 }
        })
    }
}

/// Flood fills the foreground region connected to `seed`.
///
/// Growth is breadth-first and never leaves the foreground of `mask`.
/// `connectivity` decides whether diagonal neighbours are reachable.
///
/// # Arguments
///
/// * `mask`: The region to fill within. Any non-zero pixel is foreground.
/// * `seed`: Start pixel as `(row, column)`.
/// * `connectivity`: `Four` for edge neighbours only, `Eight` to also step
///   diagonally.
///
/// # Returns
///
/// A `{0, 1}` mask of the filled region. It is empty if `seed` is out of
/// bounds or on background.
pub fn flood(mask: &GrayImage, seed: Centroid, connectivity: Connectivity) -> GrayImage {
    let (width, height) = mask.dimensions();
    let mut out = GrayImage::new(width, height);

    let (Ok(x), Ok(y)) = (u32::try_from(seed.column), u32::try_from(seed.row)) else {
        return out;
    };
    if x >= width || y >= height || !is_foreground(mask, x, y) {
        return out;
    }

    let neighbours: &[(i64, i64)] = match connectivity {
        Connectivity::Four => &FOUR_NEIGHBOURS,
        Connectivity::Eight => &EIGHT_NEIGHBOURS,
    };

    let mut queue = VecDeque::from([(x, y)]);
    out.put_pixel(x, y, Luma([FOREGROUND]));
    while let Some((cx, cy)) = queue.pop_front() {
        for &(dx, dy) in neighbours {
            let nx = i64::from(cx) + dx;
            let ny = i64::from(cy) + dy;
            if nx < 0 || ny < 0 || nx >= i64::from(width) || ny >= i64::from(height) {
                continue;
            }
            let (nx, ny) = (nx as u32, ny as u32);
            if is_foreground(mask, nx, ny) && !is_foreground(&out, nx, ny) {
                out.put_pixel(nx, ny, Luma([FOREGROUND]));
                queue.push_back((nx, ny));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MaskError;
    use crate::mask::{BACKGROUND, foreground_count};

    fn square(size: u32, x0: u32, y0: u32, side: u32) -> GrayImage {
        GrayImage::from_fn(size, size, |x, y| {
            let inside = (x0..x0 + side).contains(&x) && (y0..y0 + side).contains(&y);
            Luma([if inside { FOREGROUND } else { BACKGROUND }])
        })
    }

    fn disk(size: u32, cx: i64, cy: i64, r: i64) -> GrayImage {
        GrayImage::from_fn(size, size, |x, y| {
            let (dx, dy) = (x as i64 - cx, y as i64 - cy);
            Luma([if dx * dx + dy * dy <= r * r {
                FOREGROUND
            } else {
                BACKGROUND
            }])
        })
    }

    /// A ring whose centroid falls into the hole.
    fn ring(size: u32, cx: i64, cy: i64, inner: i64, outer: i64) -> GrayImage {
        GrayImage::from_fn(size, size, |x, y| {
            let (dx, dy) = (x as i64 - cx, y as i64 - cy);
            let d = dx * dx + dy * dy;
            Luma([if d <= outer * outer && d > inner * inner {
                FOREGROUND
            } else {
                BACKGROUND
            }])
        })
    }

    #[test]
    fn test_convex_square_splits_into_itself() {
        let mask = square(20, 4, 6, 10);
        let (epi, endo) = split_into_endo_epi_masks(&mask, Centroid::new(11, 9));
        assert_eq!(epi, mask);
        assert_eq!(endo, mask);
    }

    #[test]
    fn test_convex_disk_splits_into_itself() {
        let mask = disk(31, 15, 15, 9);
        let (epi, endo) = get_endo_epi_masks(&mask).unwrap();
        assert_eq!(epi, mask);
        assert_eq!(endo, mask);
    }

    #[test]
    fn test_hull_fills_concave_notch() {
        // A "U" shape: the notch between the arms belongs to the hull.
        let mut mask = square(12, 2, 2, 8);
        for y in 2..6 {
            for x in 5..7 {
                mask.put_pixel(x, y, Luma([BACKGROUND]));
            }
        }
        let epi = convex_hull_mask(&mask);
        assert_eq!(epi, square(12, 2, 2, 8));
        assert_eq!(foreground_count(&mask), 64 - 8);
    }

    #[test]
    fn test_degenerate_hulls_rasterize_their_segment() {
        let mut mask = GrayImage::new(10, 10);
        mask.put_pixel(4, 4, Luma([FOREGROUND]));
        assert_eq!(convex_hull_mask(&mask), mask);

        let mut line = GrayImage::new(10, 10);
        line.put_pixel(1, 1, Luma([FOREGROUND]));
        line.put_pixel(7, 7, Luma([FOREGROUND]));
        let epi = convex_hull_mask(&line);
        assert_eq!(foreground_count(&epi), 7);
        assert!((1..=7).all(|i| is_foreground(&epi, i, i)));
        assert!(!is_foreground(&epi, 2, 1));
    }

    #[test]
    fn test_empty_mask_has_empty_hull() {
        let mask = GrayImage::new(6, 6);
        assert!(is_empty(&convex_hull_mask(&mask)));
    }

    #[test]
    fn test_centroid_in_hole_yields_empty_endocardium() {
        let mask = ring(41, 20, 20, 8, 14);
        let (component, centroid) = crate::components::extract_largest_component(&mask).unwrap();
        assert_eq!(centroid, Centroid::new(20, 20));

        let (epi, endo) = split_into_endo_epi_masks(&component, centroid);
        assert!(is_empty(&endo));
        assert_eq!(epi, convex_hull_mask(&disk(41, 20, 20, 14)));
    }

    #[test]
    fn test_flood_stays_inside_its_component() {
        let mut mask = square(20, 1, 1, 5);
        for y in 10..15 {
            for x in 10..15 {
                mask.put_pixel(x, y, Luma([FOREGROUND]));
            }
        }
        let filled = flood(&mask, Centroid::new(12, 12), Connectivity::Eight);
        assert_eq!(foreground_count(&filled), 25);
        assert!(!is_foreground(&filled, 1, 1));
    }

    #[test]
    fn test_flood_connectivity_controls_diagonal_steps() {
        let mut mask = GrayImage::new(4, 4);
        mask.put_pixel(0, 0, Luma([FOREGROUND]));
        mask.put_pixel(1, 1, Luma([FOREGROUND]));

        let seed = Centroid::new(0, 0);
        assert_eq!(foreground_count(&flood(&mask, seed, Connectivity::Eight)), 2);
        assert_eq!(foreground_count(&flood(&mask, seed, Connectivity::Four)), 1);
    }

    #[test]
    fn test_out_of_bounds_seed_yields_empty_mask() {
        let mask = square(8, 0, 0, 8);
        assert!(is_empty(&flood(&mask, Centroid::new(8, 0), Connectivity::Eight)));
    }

    #[test]
    fn test_pipeline_propagates_empty_mask() {
        let mask = GrayImage::new(5, 5);
        assert_eq!(get_endo_epi_masks(&mask), Err(MaskError::EmptyMask));
    }
}
