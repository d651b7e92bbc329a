/// Errors raised by mask operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MaskError {
    /// The mask has no foreground pixel where at least one is required.
    #[error("mask has no foreground pixels")]
    EmptyMask,

    /// The mask is not two-dimensional.
    #[error("mask must be 2D, not {ndim}D")]
    Dimensionality { ndim: usize },

    /// Raw mask data does not match its declared shape.
    #[error("mask data has {actual} elements but its shape requires {expected}")]
    ShapeMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, MaskError>;
