//! Structural validation for matrix storage arrays
//!
//! Pure checks on array lengths, index bounds and compressed pointer
//! layout. Constructors in [`crate::matrix`] run these before accepting
//! caller-provided buffers.

use crate::CensusError;

/// Validate that a dense buffer holds exactly `nrows * ncols` values
pub const fn validate_dense_len(nrows: usize, ncols: usize, len: usize) -> Result<(), CensusError> {
    match nrows.checked_mul(ncols) {
        Some(expected) if expected == len => Ok(()),
        _ => Err(CensusError::ShapeMismatch),
    }
}

/// Validate a compressed (CSR/CSC) layout
///
/// `major` is the compressed axis length (rows for CSR, columns for CSC)
/// and `minor` the length of the axis `indices` point into.
pub fn validate_compressed(
    major: usize,
    minor: usize,
    indptr: &[usize],
    indices: &[usize],
    data_len: usize,
) -> Result<(), CensusError> {
    if major.checked_add(1) != Some(indptr.len()) || indptr[0] != 0 {
        return Err(CensusError::InvalidIndptr);
    }

    if indptr.windows(2).any(|w| w[0] > w[1]) {
        return Err(CensusError::InvalidIndptr);
    }

    if indices.len() != data_len {
        return Err(CensusError::ShapeMismatch);
    }

    if indptr[major] != indices.len() {
        return Err(CensusError::InvalidIndptr);
    }

    if indices.iter().any(|&index| index >= minor) {
        return Err(CensusError::IndexOutOfBounds);
    }

    Ok(())
}

/// Validate coordinate arrays against a shape
pub fn validate_coordinates(
    nrows: usize,
    ncols: usize,
    row: &[usize],
    col: &[usize],
    data_len: usize,
) -> Result<(), CensusError> {
    if row.len() != data_len || col.len() != data_len {
        return Err(CensusError::ShapeMismatch);
    }

    if row.iter().any(|&r| r >= nrows) || col.iter().any(|&c| c >= ncols) {
        return Err(CensusError::IndexOutOfBounds);
    }

    Ok(())
}
