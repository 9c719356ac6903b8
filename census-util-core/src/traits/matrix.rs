//! Core matrix abstraction traits
//!
//! Every matrix representation in this crate implements these traits,
//! so callers can inspect shape and values without caring about layout.

use core::ops::Range;

use super::element::MatrixElement;
use crate::chunking::CooChunk;
use crate::format::{Axis, MatrixFormat};

/// Representation-agnostic matrix access
pub trait SparseMatrix {
    /// The element type stored in this matrix
    type Element: MatrixElement;

    /// Get an element at the specified position
    ///
    /// Returns `None` if the element is zero (not stored) or if the
    /// position is out of bounds.
    fn get_element(&self, row: usize, col: usize) -> Option<Self::Element>;

    /// Get matrix dimensions as (rows, cols)
    fn dimensions(&self) -> (usize, usize);

    /// Get number of non-zero elements stored
    ///
    /// For dense matrices this counts the positions holding a nonzero value.
    fn nnz(&self) -> usize;

    /// Values held by the representation
    ///
    /// Dense matrices expose every position; sparse ones expose only
    /// stored entries, explicit zeros included.
    fn stored_values(&self) -> &[Self::Element];
}

/// Representations that can be cut into contiguous line ranges
///
/// Implemented by dense, CSR and CSC matrices. Each implementation slices
/// along the axis it stores contiguously.
pub trait MajorAxisSlice: SparseMatrix {
    /// Representation tag
    const FORMAT: MatrixFormat;

    /// Axis this representation slices along
    const AXIS: Axis;

    /// Length of the slicing axis
    fn major_len(&self) -> usize;

    /// Average nonzeros per line along the slicing axis, truncated
    fn average_density(&self) -> usize;

    /// Convert the lines in `lines` to coordinate triples in full-matrix
    /// coordinates
    fn slice_to_coo(&self, lines: Range<usize>) -> CooChunk<Self::Element>;
}
