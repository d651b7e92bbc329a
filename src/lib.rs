//! Heart-chamber mask utilities built on [imageproc].
//!
//! Masks are [`image::GrayImage`]s holding `0` (background) and `1`
//! (foreground). The crate isolates the largest component of a segmentation
//! mask, splits it into epicardium and endocardium masks, extracts
//! perimeters and traces boundaries into flat polygons.
//!
//! ```
//! use image::{GrayImage, Luma};
//! use cardiac_masks::{get_endo_epi_masks, get_perimeter, mask_to_polygons};
//!
//! let mask = GrayImage::from_fn(32, 32, |x, y| {
//!     let (dx, dy) = (x as i32 - 16, y as i32 - 16);
//!     Luma([(dx * dx + dy * dy <= 100) as u8])
//! });
//!
//! let (epicardium, endocardium) = get_endo_epi_masks(&mask)?;
//! assert_eq!(epicardium, mask);
//! assert_eq!(endocardium, mask);
//!
//! let outline = mask_to_polygons(&get_perimeter(&mask));
//! assert!(!outline.is_empty());
//! # Ok::<(), cardiac_masks::MaskError>(())
//! ```

pub mod components;
pub mod config;
pub mod contours;
pub mod endo_epi;
pub mod error;
pub mod mask;
pub mod metrics;
pub mod perimeter;
pub mod rect;

pub use components::{Centroid, extract_largest_component};
pub use config::MaskConfig;
pub use contours::{Polygon, mask_to_polygons};
pub use endo_epi::{get_endo_epi_masks, split_into_endo_epi_masks};
pub use error::{MaskError, Result};
pub use perimeter::get_perimeter;
