//! Tracing mask boundaries into polygons.
//!
//! Contours are traced with marching squares over pixel centers, so a
//! boundary between a foreground and a background pixel produces a vertex
//! halfway between them. Saddle cells keep the high corners apart, which
//! leaves low (background) regions fully connected.

use std::collections::{HashMap, HashSet};

use image::GrayImage;
use log::debug;

use crate::config::MaskConfig;
use crate::error::Result;
use crate::mask::{binarize, mask_from_raw};

/// Flat interleaved vertex list `[x0, y0, x1, y1, ...]`.
pub type Polygon = Vec<f64>;

/// A cell edge between two neighbouring pixel centers.
///
/// `Horizontal(r, c)` joins `(r, c)` and `(r, c + 1)`, `Vertical(r, c)`
/// joins `(r, c)` and `(r + 1, c)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Edge {
    Horizontal(u32, u32),
    Vertical(u32, u32),
}

/// Axis-aligned extents of a polygon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extents {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

/// Converts a mask into polygons, one per traced boundary.
///
/// The mask is first normalized so that every non-zero pixel is foreground,
/// which makes 0/1 and 0/255 masks trace identically. Iso-contours are then
/// traced at the configured level (halfway between background and foreground
/// by default) with marching squares over pixel centers, and each traced
/// `(row, column)` point is flipped to `(x, y)`.
///
/// Each polygon is flattened to `[x0, y0, x1, y1, ...]` with `x` the column
/// and `y` the row. Closed boundaries repeat their first vertex at the end.
/// Boundaries that run into the image edge stay open. Holes produce their own
/// polygons.
///
/// The order of the polygons is the raster order in which their boundaries
/// are first met. It carries no further meaning.
///
/// # Arguments
///
/// * `mask`: A binary mask. Any non-zero pixel counts as foreground.
///
/// # Returns
///
/// A `Vec<Polygon>` with one flat vertex list per boundary. A blank mask, a
/// fully set mask or a mask narrower than two pixels yields no polygons.
///
/// # Examples
///
/// ```
/// use image::{GrayImage, Luma};
/// use cardiac_masks::contours::{mask_to_polygons, polygon_extents};
///
/// let mask = GrayImage::from_fn(20, 20, |x, y| {
///     Luma([((5..15).contains(&x) && (5..15).contains(&y)) as u8])
/// });
///
/// let polygons = mask_to_polygons(&mask);
/// assert_eq!(polygons.len(), 1);
///
/// let extents = polygon_extents(&polygons[0]).unwrap();
/// assert_eq!((extents.min_x, extents.max_x), (4.5, 14.5));
/// ```
pub fn mask_to_polygons(mask: &GrayImage) -> Vec<Polygon> {
    mask_to_polygons_with(mask, &MaskConfig::default())
}

/// [`mask_to_polygons`] with an explicit configuration.
pub fn mask_to_polygons_with(mask: &GrayImage, config: &MaskConfig) -> Vec<Polygon> {
    let polygons: Vec<Polygon> = find_iso_contours(&binarize(mask), config.contour_level)
        .into_iter()
        .map(|contour| {
            contour
                .into_iter()
                .flat_map(|(row, column)| [column, row])
                .collect()
        })
        .collect();
    debug!("traced {} polygons", polygons.len());
    polygons
}

/// [`mask_to_polygons`] for a raw row-major buffer with an array shape.
///
/// # Errors
///
/// [`MaskError::Dimensionality`](crate::error::MaskError::Dimensionality) if
/// `shape` is not two-dimensional,
/// [`MaskError::ShapeMismatch`](crate::error::MaskError::ShapeMismatch) if
/// `data` does not fit `shape`.
pub fn raw_mask_to_polygons(shape: &[usize], data: &[u8]) -> Result<Vec<Polygon>> {
    let mask = mask_from_raw(shape, data)?;
    Ok(mask_to_polygons(&mask))
}

/// Traces the iso-contours of `mask` at `level`.
///
/// Points are `(row, column)` and interpolated linearly along cell edges.
/// A pixel counts as high when its value is strictly greater than `level`.
pub fn find_iso_contours(mask: &GrayImage, level: f64) -> Vec<Vec<(f64, f64)>> {
    let (width, height) = mask.dimensions();
    if width < 2 || height < 2 {
        return Vec::new();
    }

    let value = |r: u32, c: u32| f64::from(mask.get_pixel(c, r).0[0]);

    let point = |edge: Edge| -> (f64, f64) {
        let ((r0, c0), (r1, c1)) = match edge {
            Edge::Horizontal(r, c) => ((r, c), (r, c + 1)),
            Edge::Vertical(r, c) => ((r, c), (r + 1, c)),
        };
        let (v0, v1) = (value(r0, c0), value(r1, c1));
        let t = (level - v0) / (v1 - v0);
        (
            f64::from(r0) + t * f64::from(r1 - r0),
            f64::from(c0) + t * f64::from(c1 - c0),
        )
    };

    let segments = cell_segments(width, height, |r, c| value(r, c) > level);

    let mut next: HashMap<Edge, Edge> = HashMap::with_capacity(segments.len());
    let mut prev: HashMap<Edge, Edge> = HashMap::with_capacity(segments.len());
    for &(from, to) in &segments {
        next.insert(from, to);
        prev.insert(to, from);
    }

    let mut visited: HashSet<Edge> = HashSet::with_capacity(segments.len());
    let mut contours = Vec::new();
    for &(start, _) in &segments {
        if visited.contains(&start) {
            continue;
        }

        // Rewind to the head of an open chain, or stay put on a loop.
        let mut head = start;
        while let Some(&before) = prev.get(&head) {
            if before == start {
                head = start;
                break;
            }
            head = before;
        }

        let mut contour = vec![point(head)];
        let mut current = head;
        while let Some(&following) = next.get(&current) {
            visited.insert(current);
            contour.push(point(following));
            if following == head {
                break;
            }
            current = following;
        }
        contours.push(contour);
    }

    contours
}

/// Emits the oriented boundary segments of every cell in raster order.
///
/// Cell edges are walked clockwise (top, right, bottom, left). A segment
/// starts on an edge that goes from a low to a high corner and ends on the
/// next crossing edge.
fn cell_segments(
    width: u32,
    height: u32,
    is_high: impl Fn(u32, u32) -> bool,
) -> Vec<(Edge, Edge)> {
    let mut segments = Vec::new();
    for r in 0..height - 1 {
        for c in 0..width - 1 {
            let corners = [
                is_high(r, c),
                is_high(r, c + 1),
                is_high(r + 1, c + 1),
                is_high(r + 1, c),
            ];
            if corners.iter().all(|&h| h) || corners.iter().all(|&h| !h) {
                continue;
            }
            let edges = [
                Edge::Horizontal(r, c),
                Edge::Vertical(r, c + 1),
                Edge::Horizontal(r + 1, c),
                Edge::Vertical(r, c),
            ];
            for i in 0..4 {
                let entering = !corners[i] && corners[(i + 1) % 4];
                if !entering {
                    continue;
                }
                let exit = (1..4)
                    .map(|k| (i + k) % 4)
                    .find(|&j| corners[j] != corners[(j + 1) % 4]);
                if let Some(j) = exit {
                    segments.push((edges[i], edges[j]));
                }
            }
        }
    }
    segments
}

/// Minimum and maximum coordinates of a flat polygon, or `None` when it has
/// no complete vertex.
pub fn polygon_extents(polygon: &[f64]) -> Option<Extents> {
    let mut vertices = polygon.chunks_exact(2);
    let first = vertices.next()?;
    let init = Extents {
        min_x: first[0],
        min_y: first[1],
        max_x: first[0],
        max_y: first[1],
    };
    Some(vertices.fold(init, |e, v| Extents {
        min_x: e.min_x.min(v[0]),
        min_y: e.min_y.min(v[1]),
        max_x: e.max_x.max(v[0]),
        max_y: e.max_y.max(v[1]),
    }))
}
