//! Binary mask helpers.
//!
//! A mask is a [`GrayImage`] holding only [`FOREGROUND`] and [`BACKGROUND`].
//! The image width is the column count and the height is the row count.

use image::{GrayImage, ImageBuffer, Luma, Primitive};
use imageproc::point::Point;
use num::Num;
use std::ops::Deref;

use crate::error::{MaskError, Result};

/// Pixel value of foreground pixels.
pub const FOREGROUND: u8 = 1;

/// Pixel value of background pixels.
pub const BACKGROUND: u8 = 0;

/// Normalizes any single-channel image to a `{0, 1}` mask. Every non-zero
/// pixel becomes foreground.
///
/// # Examples
///
/// ```
/// use image::{ImageBuffer, Luma};
/// use cardiac_masks::mask::binarize;
///
/// let probabilities: ImageBuffer<Luma<f32>, Vec<f32>> =
///     ImageBuffer::from_raw(3, 1, vec![0.0, 0.7, 1.0]).unwrap();
/// assert_eq!(binarize(&probabilities).into_raw(), vec![0, 1, 1]);
/// ```
pub fn binarize<T, C>(image: &ImageBuffer<Luma<T>, C>) -> GrayImage
where
    T: Primitive + Num,
    C: Deref<Target = [T]>,
{
    let (width, height) = image.dimensions();
    GrayImage::from_fn(width, height, |x, y| {
        if image.get_pixel(x, y).0[0].is_zero() {
            Luma([BACKGROUND])
        } else {
            Luma([FOREGROUND])
        }
    })
}

/// Builds a mask from a row-major buffer and its array shape `[rows, columns]`.
///
/// Non-zero values become foreground.
///
/// # Errors
///
/// [`MaskError::Dimensionality`] if `shape` does not have exactly two axes,
/// [`MaskError::ShapeMismatch`] if `data` does not hold `rows * columns`
/// elements, or if either axis does not fit an image dimension.
pub fn mask_from_raw(shape: &[usize], data: &[u8]) -> Result<GrayImage> {
    let &[rows, columns] = shape else {
        return Err(MaskError::Dimensionality { ndim: shape.len() });
    };
    let mismatch = |expected| MaskError::ShapeMismatch {
        expected,
        actual: data.len(),
    };
    let expected = rows
        .checked_mul(columns)
        .ok_or_else(|| mismatch(usize::MAX))?;
    if data.len() != expected {
        return Err(mismatch(expected));
    }
    // `GrayImage` dimensions are `u32`.
    let (Ok(width), Ok(height)) = (u32::try_from(columns), u32::try_from(rows)) else {
        return Err(mismatch(expected));
    };
    let pixels: Vec<u8> = data
        .iter()
        .map(|&v| if v == 0 { BACKGROUND } else { FOREGROUND })
        .collect();
    ImageBuffer::from_raw(width, height, pixels).ok_or_else(|| mismatch(expected))
}

#[inline]
pub(crate) fn is_foreground(mask: &GrayImage, x: u32, y: u32) -> bool {
    mask.get_pixel(x, y).0[0] != BACKGROUND
}

/// Number of foreground pixels.
pub fn foreground_count(mask: &GrayImage) -> usize {
    mask.pixels().filter(|p| p.0[0] != BACKGROUND).count()
}

/// Whether the mask has no foreground pixel at all.
pub fn is_empty(mask: &GrayImage) -> bool {
    mask.pixels().all(|p| p.0[0] == BACKGROUND)
}

/// Foreground pixel positions in raster order, as `(x, y)` = `(column, row)`.
pub fn foreground_points(mask: &GrayImage) -> Vec<Point<i32>> {
    mask.enumerate_pixels()
        .filter(|(_, _, p)| p.0[0] != BACKGROUND)
        .map(|(x, y, _)| Point::new(x as i32, y as i32))
        .collect()
}
