use thiserror::Error;

/// Errors raised by the index and its loaders.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreeError {
    /// Delete of a point that is not stored.
    #[error("cityDoesNotExist: no point at ({x}, {y})")]
    PointNotFound { x: f64, y: f64 },

    /// Nearest-neighbor query on an empty tree.
    #[error("tree is empty")]
    EmptyTree,

    /// Internal invariant violation. Not a user error.
    #[error("invalid tree state: {0}")]
    InvalidState(String),

    /// Balance ratio outside [2/3, 1).
    #[error("invalid balance ratio {numerator}/{denominator}: must lie in [2/3, 1)")]
    InvalidConfig { numerator: usize, denominator: usize },

    #[error("invalid WKT: {0}")]
    Wkt(String),
}

pub type Result<T> = std::result::Result<T, TreeError>;
