use image::math::Rect;
use imageproc::point::Point;
use num_traits::{Num, ToPrimitive};

/// Calculates the inclusive axis-aligned bounding box of a set of points.
///
/// Generic over numeric types that implement `PartialOrd`, so it works for
/// both integer pixel positions and floating-point vertices. Negative
/// coordinates clamp to `0`. Returns `None` for an empty slice.
///
/// `width` and `height` count pixels, so a single point yields a `1×1` box.
///
/// # Examples
///
/// ```
/// use image::math::Rect;
/// use imageproc::point::Point;
/// use cardiac_masks::rect::points_bounding_box;
///
/// let hull = [Point::new(5, 2), Point::new(9, 2), Point::new(7, 6)];
/// let bounding_box = points_bounding_box(&hull).unwrap();
///
/// assert_eq!(bounding_box, Rect { x: 5, y: 2, width: 5, height: 5 });
/// ```
pub fn points_bounding_box<T>(points: &[Point<T>]) -> Option<Rect>
where
    T: Copy + PartialOrd + Num + ToPrimitive,
{
    let (first, rest) = points.split_first()?;
    let mut min_x = first.x;
    let mut max_x = first.x;
    let mut min_y = first.y;
    let mut max_y = first.y;

    // `T` is only `PartialOrd`, so no `min`/`max` helpers.
    for p in rest {
        if p.x < min_x {
            min_x = p.x;
        }
        if p.x > max_x {
            max_x = p.x;
        }
        if p.y < min_y {
            min_y = p.y;
        }
        if p.y > max_y {
            max_y = p.y;
        }
    }

    let x = min_x.to_u32().unwrap_or(0);
    let y = min_y.to_u32().unwrap_or(0);

    let width = max_x.to_u32().unwrap_or(0).saturating_sub(x) + 1;
    let height = max_y.to_u32().unwrap_or(0).saturating_sub(y) + 1;

    Some(Rect {
        x,
        y,
        width,
        height,
    })
}
