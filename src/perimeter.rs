use image::{GrayImage, Luma};
use imageproc::morphology::erode;

use crate::config::MaskConfig;
use crate::mask::{BACKGROUND, FOREGROUND};

/// Returns the one-pixel-wide boundary ring of a mask: foreground pixels with
/// at least one background neighbour under the erosion kernel.
///
/// The ring is computed as the mask minus a single erosion of itself. The
/// erosion removes every foreground pixel within distance 1 of background,
/// which under the default `L1` norm is the 4-neighbour cross. The
/// subtraction can never go negative, because erosion only removes pixels.
///
/// Pixels outside the image are treated as foreground, so a region touching
/// the image edge has no perimeter along that edge. A filled `s×s` square
/// away from the border yields `4 * (s - 1)` perimeter pixels.
///
/// # Arguments
///
/// * `mask`: A binary mask. Any non-zero pixel counts as foreground.
///
/// # Returns
///
/// A `{0, 1}` mask with the same dimensions as `mask` holding only the
/// boundary ring. A blank or fully set mask yields a blank result.
///
/// # Examples
///
/// ```
/// use image::{GrayImage, Luma};
/// use cardiac_masks::{mask::foreground_count, perimeter::get_perimeter};
///
/// let mask = GrayImage::from_fn(12, 12, |x, y| {
///     Luma([((1..11).contains(&x) && (1..11).contains(&y)) as u8])
/// });
///
/// assert_eq!(foreground_count(&get_perimeter(&mask)), 4 * (10 - 1));
/// ```
pub fn get_perimeter(mask: &GrayImage) -> GrayImage {
    get_perimeter_with(mask, &MaskConfig::default())
}

/// [`get_perimeter`] with an explicit configuration.
///
/// `config.erosion_norm` selects the kernel: `Norm::L1` is the 4-neighbour
/// cross, `Norm::LInf` the full 3×3 square, which also marks pixels that only
/// touch background diagonally.
pub fn get_perimeter_with(mask: &GrayImage, config: &MaskConfig) -> GrayImage {
    // `erode` treats any non-zero pixel as foreground and outputs 0/255.
    let eroded = erode(mask, config.erosion_norm, 1);

    let (width, height) = mask.dimensions();
    GrayImage::from_fn(width, height, |x, y| {
        let inside = mask.get_pixel(x, y).0[0] != BACKGROUND;
        let interior = eroded.get_pixel(x, y).0[0] != 0;
        Luma([if inside && !interior {
            FOREGROUND
        } else {
            BACKGROUND
        }])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask::{foreground_count, is_empty, is_foreground};
    use imageproc::distance_transform::Norm;

    fn square(size: u32, x0: u32, y0: u32, side: u32) -> GrayImage {
        GrayImage::from_fn(size, size, |x, y| {
            let inside = (x0..x0 + side).contains(&x) && (y0..y0 + side).contains(&y);
            Luma([inside as u8])
        })
    }

    #[test]
    fn test_square_perimeter_is_a_ring() {
        for side in [2, 3, 5, 10] {
            let mask = square(16, 3, 3, side);
            let perimeter = get_perimeter(&mask);
            assert_eq!(foreground_count(&perimeter), 4 * (side as usize - 1));

            for y in 3..3 + side {
                for x in 3..3 + side {
                    let on_edge = x == 3 || y == 3 || x == 2 + side || y == 2 + side;
                    assert_eq!(is_foreground(&perimeter, x, y), on_edge);
                }
            }
        }
    }

    #[test]
    fn test_single_pixel_is_its_own_perimeter() {
        let mask = square(5, 2, 2, 1);
        assert_eq!(get_perimeter(&mask), mask);
    }

    #[test]
    fn test_cross_kernel_ignores_diagonal_notches() {
        // A 5x5 square missing one corner pixel: the diagonal neighbour of the
        // notch stays interior under the cross but not under the 3x3 square.
        let mut mask = square(9, 2, 2, 5);
        mask.put_pixel(2, 2, Luma([0]));

        let cross = get_perimeter(&mask);
        assert!(!is_foreground(&cross, 3, 3));

        let config = MaskConfig::default().with_erosion_norm(Norm::LInf);
        let full = get_perimeter_with(&mask, &config);
        assert!(is_foreground(&full, 3, 3));
    }

    #[test]
    fn test_image_border_counts_as_foreground() {
        let full = square(6, 0, 0, 6);
        assert!(is_empty(&get_perimeter(&full)));

        // Touching the left edge: no ring along column 0 except top/bottom rows.
        let mask = GrayImage::from_fn(8, 8, |x, y| Luma([(x < 4 && (2..6).contains(&y)) as u8]));
        let perimeter = get_perimeter(&mask);
        assert!(!is_foreground(&perimeter, 0, 3));
        assert!(is_foreground(&perimeter, 0, 2));
        assert!(is_foreground(&perimeter, 3, 4));
    }

    #[test]
    fn test_blank_mask_has_no_perimeter() {
        assert!(is_empty(&get_perimeter(&GrayImage::new(7, 7))));
    }
}
