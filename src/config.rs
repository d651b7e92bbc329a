//! Tunable parameters of the mask operations.
//!
//! Every operation has a plain form that uses [`MaskConfig::default`] and a
//! `*_with` form that takes an explicit configuration.

use imageproc::{distance_transform::Norm, region_labelling::Connectivity};

/// Connectivity used when labelling connected components.
pub const DEFAULT_LABEL_CONNECTIVITY: Connectivity = Connectivity::Eight;

/// Connectivity used when flood filling the endocardium from its seed.
pub const DEFAULT_FILL_CONNECTIVITY: Connectivity = Connectivity::Eight;

/// Erosion kernel for perimeter extraction. `L1` with radius 1 is the
/// 4-neighbour cross.
pub const DEFAULT_EROSION_NORM: Norm = Norm::L1;

/// Iso-value at which mask contours are traced, halfway between background
/// and foreground.
pub const DEFAULT_CONTOUR_LEVEL: f64 = 0.5;

/// Parameters shared by the extraction, splitting, perimeter and tracing
/// operations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaskConfig {
    pub label_connectivity: Connectivity,
    pub fill_connectivity: Connectivity,
    pub erosion_norm: Norm,
    pub contour_level: f64,
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            label_connectivity: DEFAULT_LABEL_CONNECTIVITY,
            fill_connectivity: DEFAULT_FILL_CONNECTIVITY,
            erosion_norm: DEFAULT_EROSION_NORM,
            contour_level: DEFAULT_CONTOUR_LEVEL,
        }
    }
}

impl MaskConfig {
    pub fn with_label_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.label_connectivity = connectivity;
        self
    }

    pub fn with_fill_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.fill_connectivity = connectivity;
        self
    }

    pub fn with_erosion_norm(mut self, norm: Norm) -> Self {
        self.erosion_norm = norm;
        self
    }

    /// # Panics
    ///
    /// Panics if `level` is not finite.
    pub fn with_contour_level(mut self, level: f64) -> Self {
        assert!(level.is_finite(), "contour level must be finite");
        self.contour_level = level;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pins_library_conventions() {
        let config = MaskConfig::default();
        assert_eq!(config.label_connectivity, Connectivity::Eight);
        assert_eq!(config.fill_connectivity, Connectivity::Eight);
        assert_eq!(config.erosion_norm, Norm::L1);
        assert_eq!(config.contour_level, 0.5);
    }

    #[test]
    fn test_builder_overrides_single_fields() {
        let config = MaskConfig::default()
            .with_fill_connectivity(Connectivity::Four)
            .with_contour_level(0.25);
        assert_eq!(config.fill_connectivity, Connectivity::Four);
        assert_eq!(config.label_connectivity, Connectivity::Eight);
        assert_eq!(config.contour_level, 0.25);
    }

    #[test]
    #[should_panic(expected = "contour level must be finite")]
    fn test_rejects_nan_level() {
        let _ = MaskConfig::default().with_contour_level(f64::NAN);
    }
}
