//! Error types for Kshetra

use crate::tensor::DType;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Kshetra error types
///
/// Every error is raised before any mutation takes place, so a failed call
/// leaves tensors and grid maps untouched.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Zero-size axis, empty shape, or dimensionality/element count mismatch
    #[error("Invalid shape: {0}")]
    InvalidShape(String),

    /// Inverted, degenerate or non-finite metric bounds (or resolution)
    #[error("Invalid bounds: {0}")]
    InvalidBounds(String),

    /// Multi-index or linear index outside the valid range
    #[error("Index out of bounds: {0}")]
    IndexOutOfBounds(String),

    /// Non-finite metric coordinate
    #[error("Invalid coordinate on axis {axis}: {value}")]
    InvalidCoordinate {
        /// Axis holding the offending value
        axis: usize,
        /// The offending value
        value: f64,
    },

    /// An external view was reinterpreted as a different scalar type
    #[error("Element type mismatch: expected {expected}, found {found}")]
    DTypeMismatch {
        /// Type requested by the caller
        expected: DType,
        /// Type the buffer actually holds
        found: DType,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed binary dump
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Configuration could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Error::Config(e.to_string())
    }
}
