//! Error types for census-util core operations

use crate::format::MatrixFormat;

/// Errors that can occur while building, validating or chunking matrices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CensusError {
    /// The matrix representation cannot be sliced into chunks
    UnsupportedType(MatrixFormat),
    /// Array lengths do not agree with the declared shape
    ShapeMismatch,
    /// Compressed pointer array is malformed
    InvalidIndptr,
    /// Index out of bounds
    IndexOutOfBounds,
    /// Chunks do not partition the source matrix
    PartitionViolation,
}

impl core::fmt::Display for CensusError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CensusError::UnsupportedType(format) => {
                write!(f, "array_chunker: unsupported array type {format}")
            }
            CensusError::ShapeMismatch => write!(f, "Array length does not match matrix shape"),
            CensusError::InvalidIndptr => write!(f, "Invalid compressed index pointer array"),
            CensusError::IndexOutOfBounds => write!(f, "Index out of bounds"),
            CensusError::PartitionViolation => write!(f, "Chunks do not partition the matrix"),
        }
    }
}

/// Result type for census-util core operations
pub type Result<T> = core::result::Result<T, CensusError>;
