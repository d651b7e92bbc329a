//! Connected-component analysis and largest-component extraction.

use std::collections::HashMap;

use image::{GrayImage, Luma};
use imageproc::region_labelling::connected_components;
use log::debug;

use crate::config::MaskConfig;
use crate::error::{MaskError, Result};
use crate::mask::{BACKGROUND, FOREGROUND, binarize};

/// An integer pixel position, `(row, column)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Centroid {
    pub row: usize,
    pub column: usize,
}

impl Centroid {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl From<(usize, usize)> for Centroid {
    fn from((row, column): (usize, usize)) -> Self {
        Self { row, column }
    }
}

/// Statistics of one labelled component.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionProps {
    /// Label in the labelled grid. Never `0`.
    pub label: u32,
    /// Number of pixels.
    pub area: usize,
    /// Mean `(row, column)` of the component's pixels.
    pub centroid: (f64, f64),
}

impl RegionProps {
    /// Centroid rounded to the nearest pixel, ties to even.
    pub fn rounded_centroid(&self) -> Centroid {
        let (row, column) = self.centroid;
        Centroid {
            row: row.round_ties_even() as usize,
            column: column.round_ties_even() as usize,
        }
    }
}

/// Labels the mask's foreground and returns per-component statistics.
///
/// Components are listed in the raster order of their first pixel.
pub fn region_properties(mask: &GrayImage, config: &MaskConfig) -> Vec<RegionProps> {
    let labels = connected_components(
        &binarize(mask),
        config.label_connectivity,
        Luma([BACKGROUND]),
    );
    collect_regions(&labels)
}

fn collect_regions(labels: &image::ImageBuffer<Luma<u32>, Vec<u32>>) -> Vec<RegionProps> {
    // (label, area, row sum, column sum)
    let mut sums: Vec<(u32, usize, u64, u64)> = Vec::new();
    let mut index_of: HashMap<u32, usize> = HashMap::new();

    for (x, y, p) in labels.enumerate_pixels() {
        let label = p.0[0];
        if label == 0 {
            continue;
        }
        let i = *index_of.entry(label).or_insert_with(|| {
            sums.push((label, 0, 0, 0));
            sums.len() - 1
        });
        let entry = &mut sums[i];
        entry.1 += 1;
        entry.2 += u64::from(y);
        entry.3 += u64::from(x);
    }

    sums.into_iter()
        .map(|(label, area, row_sum, column_sum)| RegionProps {
            label,
            area,
            centroid: (
                row_sum as f64 / area as f64,
                column_sum as f64 / area as f64,
            ),
        })
        .collect()
}

/// Finds the component with the largest area and returns a mask holding only
/// that component, together with its centroid.
///
/// Foreground pixels are labelled 8-connected, per-component area and mean
/// position are gathered with [`region_properties`], and the component with
/// the most pixels is kept. Equal areas are resolved in favour of the
/// component seen first in raster order. The centroid is the mean row and
/// column rounded half-to-even, so `2.5` becomes `2` and `3.5` becomes `4`.
///
/// # Arguments
///
/// * `mask`: A binary mask. Any non-zero pixel counts as foreground.
///
/// # Returns
///
/// A tuple of a `{0, 1}` mask holding only the largest component, with the
/// same dimensions as `mask`, and its [`Centroid`].
///
/// # Errors
///
/// [`MaskError::EmptyMask`] if the mask has no foreground pixels.
///
/// # Examples
///
/// ```
/// use image::{GrayImage, Luma};
/// use cardiac_masks::components::{Centroid, extract_largest_component};
///
/// let mut mask = GrayImage::new(10, 10);
/// mask.put_pixel(0, 0, Luma([1]));
/// for y in 4..7 {
///     for x in 5..8 {
///         mask.put_pixel(x, y, Luma([1]));
///     }
/// }
///
/// let (largest, centroid) = extract_largest_component(&mask).unwrap();
/// assert_eq!(largest.get_pixel(0, 0).0[0], 0);
/// assert_eq!(centroid, Centroid::new(5, 6));
/// ```
pub fn extract_largest_component(mask: &GrayImage) -> Result<(GrayImage, Centroid)> {
    extract_largest_component_with(mask, &MaskConfig::default())
}

/// [`extract_largest_component`] with an explicit configuration.
pub fn extract_largest_component_with(
    mask: &GrayImage,
    config: &MaskConfig,
) -> Result<(GrayImage, Centroid)> {
    let labels = connected_components(
        &binarize(mask),
        config.label_connectivity,
        Luma([BACKGROUND]),
    );
    let regions = collect_regions(&labels);
    debug!("labelled {} connected components", regions.len());

    // `max_by_key` keeps the last maximum; the first one must win.
    let largest = regions
        .iter()
        .reduce(|best, r| if r.area > best.area { r } else { best })
        .ok_or(MaskError::EmptyMask)?;

    let (width, height) = labels.dimensions();
    let component = GrayImage::from_fn(width, height, |x, y| {
        if labels.get_pixel(x, y).0[0] == largest.label {
            Luma([FOREGROUND])
        } else {
            Luma([BACKGROUND])
        }
    });

    Ok((component, largest.rounded_centroid()))
}
