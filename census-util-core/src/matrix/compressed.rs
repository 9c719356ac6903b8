//! Compressed sparse row and column matrices
//!
//! Both layouts share the same three arrays: `indptr` partitions `indices`
//! and `data` into one lane per major-axis line. CSR lanes are rows and
//! `indices` holds column numbers; CSC lanes are columns and `indices` holds
//! row numbers. Indices within a lane need not be sorted.

use alloc::vec::Vec;
use core::ops::Range;

use crate::chunking::CooChunk;
use crate::format::{Axis, MatrixFormat};
use crate::traits::{MajorAxisSlice, MatrixElement, SparseMatrix};
use crate::validation::validate_compressed;
use crate::Result;

/// Compressed Sparse Row matrix
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "crate::matrix::raw::CompressedParts<T>", bound(deserialize = "T: MatrixElement + serde::Deserialize<'de>"))
)]
pub struct CsrMatrix<T> {
    nrows: usize,
    ncols: usize,
    data: Vec<T>,
    indices: Vec<usize>,
    indptr: Vec<usize>,
}

/// Compressed Sparse Column matrix
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "crate::matrix::raw::CompressedParts<T>", bound(deserialize = "T: MatrixElement + serde::Deserialize<'de>"))
)]
pub struct CscMatrix<T> {
    nrows: usize,
    ncols: usize,
    data: Vec<T>,
    indices: Vec<usize>,
    indptr: Vec<usize>,
}

/// Stored value at `(major, minor)` within a compressed layout
fn lane_lookup<T: Copy>(
    indptr: &[usize],
    indices: &[usize],
    data: &[T],
    major: usize,
    minor: usize,
) -> Option<T> {
    let lane = indptr[major]..indptr[major + 1];
    indices[lane.clone()]
        .iter()
        .position(|&index| index == minor)
        .map(|offset| data[lane.start + offset])
}

/// Emit the lanes in `lines` as `(major, minor, value)` arrays
///
/// Major coordinates are the absolute lane numbers, so the output needs no
/// offset correction.
fn lanes_to_triples<T: Copy>(
    indptr: &[usize],
    indices: &[usize],
    data: &[T],
    lines: &Range<usize>,
) -> (Vec<u64>, Vec<u64>, Vec<T>) {
    let start = indptr[lines.start];
    let end = indptr[lines.end];

    let mut major = Vec::with_capacity(end - start);
    for lane in lines.clone() {
        let width = indptr[lane + 1] - indptr[lane];
        major.extend(core::iter::repeat(lane as u64).take(width));
    }
    let minor = indices[start..end].iter().map(|&i| i as u64).collect();

    (major, minor, data[start..end].to_vec())
}

macro_rules! impl_compressed_common {
    ($name:ident, $major:ident, $minor:ident) => {
        impl<T: MatrixElement> $name<T> {
            /// Create a matrix from its raw arrays, validating the layout
            pub fn try_new(
                nrows: usize,
                ncols: usize,
                data: Vec<T>,
                indices: Vec<usize>,
                indptr: Vec<usize>,
            ) -> Result<Self> {
                let matrix = Self {
                    nrows,
                    ncols,
                    data,
                    indices,
                    indptr,
                };
                matrix.validate()?;
                Ok(matrix)
            }

            /// Re-check the layout
            pub fn validate(&self) -> Result<()> {
                validate_compressed(
                    self.$major,
                    self.$minor,
                    &self.indptr,
                    &self.indices,
                    self.data.len(),
                )
            }

            pub fn nrows(&self) -> usize {
                self.nrows
            }

            pub fn ncols(&self) -> usize {
                self.ncols
            }

            pub fn data(&self) -> &[T] {
                &self.data
            }

            pub fn indices(&self) -> &[usize] {
                &self.indices
            }

            pub fn indptr(&self) -> &[usize] {
                &self.indptr
            }

            /// Number of stored entries in one lane, `None` past the last lane
            pub fn lane_nnz(&self, lane: usize) -> Option<usize> {
                let end = *self.indptr.get(lane.checked_add(1)?)?;
                Some(end - self.indptr[lane])
            }
        }

        impl<T: MatrixElement> SparseMatrix for $name<T> {
            type Element = T;

            fn dimensions(&self) -> (usize, usize) {
                (self.nrows, self.ncols)
            }

            fn nnz(&self) -> usize {
                self.data.len()
            }

            fn stored_values(&self) -> &[T] {
                &self.data
            }

            fn get_element(&self, row: usize, col: usize) -> Option<T> {
                if row >= self.nrows || col >= self.ncols {
                    return None;
                }
                let (major, minor) = Self::to_lane(row, col);
                lane_lookup(&self.indptr, &self.indices, &self.data, major, minor)
            }
        }
    };
}

impl_compressed_common!(CsrMatrix, nrows, ncols);
impl_compressed_common!(CscMatrix, ncols, nrows);

impl<T: MatrixElement> CsrMatrix<T> {
    const fn to_lane(row: usize, col: usize) -> (usize, usize) {
        (row, col)
    }

    /// All stored entries as `(row, col, value)`
    pub(crate) fn triples(&self) -> impl Iterator<Item = (u64, u64, T)> + '_ {
        let (row, col, data) = lanes_to_triples(&self.indptr, &self.indices, &self.data, &(0..self.nrows));
        row.into_iter()
            .zip(col)
            .zip(data)
            .map(|((r, c), v)| (r, c, v))
    }
}

impl<T: MatrixElement> CscMatrix<T> {
    const fn to_lane(row: usize, col: usize) -> (usize, usize) {
        (col, row)
    }

    /// All stored entries as `(row, col, value)`
    pub(crate) fn triples(&self) -> impl Iterator<Item = (u64, u64, T)> + '_ {
        let (col, row, data) = lanes_to_triples(&self.indptr, &self.indices, &self.data, &(0..self.ncols));
        row.into_iter()
            .zip(col)
            .zip(data)
            .map(|((r, c), v)| (r, c, v))
    }
}

impl<T: MatrixElement> MajorAxisSlice for CsrMatrix<T> {
    const FORMAT: MatrixFormat = MatrixFormat::Csr;
    const AXIS: Axis = Axis::Rows;

    fn major_len(&self) -> usize {
        self.nrows
    }

    fn average_density(&self) -> usize {
        self.data.len().checked_div(self.nrows).unwrap_or(0)
    }

    fn slice_to_coo(&self, lines: Range<usize>) -> CooChunk<T> {
        let (row, col, data) = lanes_to_triples(&self.indptr, &self.indices, &self.data, &lines);
        CooChunk::from_parts((self.nrows, self.ncols), Axis::Rows, lines, row, col, data)
    }
}

impl<T: MatrixElement> MajorAxisSlice for CscMatrix<T> {
    const FORMAT: MatrixFormat = MatrixFormat::Csc;
    const AXIS: Axis = Axis::Columns;

    fn major_len(&self) -> usize {
        self.ncols
    }

    fn average_density(&self) -> usize {
        self.data.len().checked_div(self.ncols).unwrap_or(0)
    }

    fn slice_to_coo(&self, lines: Range<usize>) -> CooChunk<T> {
        let (col, row, data) = lanes_to_triples(&self.indptr, &self.indices, &self.data, &lines);
        CooChunk::from_parts((self.nrows, self.ncols), Axis::Columns, lines, row, col, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use crate::CensusError;

    // [[1, 0, 2],
    //  [0, 0, 0],
    //  [0, 3, 0]]
    fn csr() -> CsrMatrix<f64> {
        CsrMatrix::try_new(3, 3, vec![1.0, 2.0, 3.0], vec![0, 2, 1], vec![0, 2, 2, 3]).unwrap()
    }

    fn csc() -> CscMatrix<f64> {
        CscMatrix::try_new(3, 3, vec![1.0, 3.0, 2.0], vec![0, 2, 0], vec![0, 1, 2, 3]).unwrap()
    }

    #[test]
    fn test_get_element_matches_across_layouts() {
        let (r, c) = (csr(), csc());
        for row in 0..3 {
            for col in 0..3 {
                assert_eq!(r.get_element(row, col), c.get_element(row, col));
            }
        }
        assert_eq!(r.get_element(0, 2), Some(2.0));
        assert_eq!(c.get_element(2, 1), Some(3.0));
        assert_eq!(r.get_element(1, 1), None);
        assert_eq!(c.get_element(3, 0), None);
    }

    #[test]
    fn test_invalid_layouts() {
        assert_eq!(
            CsrMatrix::try_new(2, 2, vec![1.0], vec![0], vec![0, 1]).unwrap_err(),
            CensusError::InvalidIndptr
        );
        assert_eq!(
            CscMatrix::try_new(2, 2, vec![1.0], vec![2], vec![0, 1, 1]).unwrap_err(),
            CensusError::IndexOutOfBounds
        );
    }

    #[test]
    fn test_triples_are_absolute() {
        let rows: Vec<_> = csr().triples().collect();
        assert_eq!(rows, vec![(0, 0, 1.0), (0, 2, 2.0), (2, 1, 3.0)]);

        let cols: Vec<_> = csc().triples().collect();
        assert_eq!(cols, vec![(0, 0, 1.0), (2, 1, 3.0), (0, 2, 2.0)]);
    }

    #[test]
    fn test_density_and_lane_sizes() {
        let m = csr();
        assert_eq!(m.average_density(), 1);
        assert_eq!(m.lane_nnz(0), Some(2));
        assert_eq!(m.lane_nnz(1), Some(0));
        assert_eq!(m.lane_nnz(3), None);
        assert_eq!(m.lane_nnz(usize::MAX), None);
        assert_eq!(m.nnz(), 3);
    }

    #[test]
    fn test_slice_middle_lanes() {
        let chunk = csc().slice_to_coo(1..3);
        assert_eq!(chunk.cols(), &[1, 2]);
        assert_eq!(chunk.rows(), &[2, 0]);
        assert_eq!(chunk.values(), &[3.0, 2.0]);
        assert_eq!(chunk.lines(), 1..3);
    }
}
