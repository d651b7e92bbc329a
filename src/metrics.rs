//! Shape agreement between masks.

use image::GrayImage;
use imageproc::point::Point;
use log::warn;
use num_traits::AsPrimitive;

use crate::mask::foreground_points;

fn distance_squared<T: AsPrimitive<f64>>(a: Point<T>, b: Point<T>) -> f64 {
    let dx: f64 = a.x.as_() - b.x.as_();
    let dy: f64 = a.y.as_() - b.y.as_();
    dx * dx + dy * dy
}

/// Largest distance from a point of `from` to its nearest point of `to`.
fn directed_squared(from: &[Point<i32>], to: &[Point<i32>]) -> f64 {
    from.iter()
        .map(|&a| {
            to.iter()
                .map(|&b| distance_squared(a, b))
                .fold(f64::INFINITY, f64::min)
        })
        .fold(0.0, f64::max)
}

/// Symmetric Hausdorff distance, in pixels, between the foreground pixel
/// sets of two masks.
///
/// Two empty masks are `0.0` apart. If only one of them is empty the
/// distance is infinite.
///
/// Runs in `O(n * m)` over the foreground pixel counts.
///
/// # Examples
///
/// ```
/// use image::{GrayImage, Luma};
/// use cardiac_masks::metrics::hausdorff_distance;
///
/// let mut a = GrayImage::new(10, 10);
/// let mut b = GrayImage::new(10, 10);
/// a.put_pixel(1, 1, Luma([1]));
/// b.put_pixel(4, 5, Luma([1]));
///
/// assert_eq!(hausdorff_distance(&a, &b), 5.0);
/// ```
pub fn hausdorff_distance(a: &GrayImage, b: &GrayImage) -> f64 {
    let a = foreground_points(a);
    let b = foreground_points(b);

    match (a.is_empty(), b.is_empty()) {
        (true, true) => 0.0,
        (true, false) | (false, true) => {
            warn!("hausdorff distance against an empty mask is infinite");
            f64::INFINITY
        }
        (false, false) => directed_squared(&a, &b)
            .max(directed_squared(&b, &a))
            .sqrt(),
    }
}
