use alloc::vec;
use alloc::vec::Vec;
use core::ops::Range;

use crate::chunking::CooChunk;
use crate::format::{Axis, MatrixFormat};
use crate::traits::{MajorAxisSlice, MatrixElement, SparseMatrix};
use crate::validation::validate_dense_len;
use crate::{CensusError, Result};

/// Dense row-major matrix
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "crate::matrix::raw::DenseParts<T>", bound(deserialize = "T: MatrixElement + serde::Deserialize<'de>"))
)]
pub struct DenseMatrix<T> {
    nrows: usize,
    ncols: usize,
    data: Vec<T>,
}

impl<T: MatrixElement> DenseMatrix<T> {
    /// Create a dense matrix from row-major values
    pub fn try_new(nrows: usize, ncols: usize, data: Vec<T>) -> Result<Self> {
        validate_dense_len(nrows, ncols, data.len())?;
        Ok(Self { nrows, ncols, data })
    }

    /// Create a matrix with every position zero
    pub fn zeros(nrows: usize, ncols: usize) -> Result<Self> {
        let len = nrows.checked_mul(ncols).ok_or(CensusError::ShapeMismatch)?;
        Ok(Self {
            nrows,
            ncols,
            data: vec![T::zero(); len],
        })
    }

    /// Values of one row
    pub fn row(&self, row: usize) -> &[T] {
        let start = row * self.ncols;
        &self.data[start..start + self.ncols]
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Re-check the buffer length
    pub fn validate(&self) -> Result<()> {
        validate_dense_len(self.nrows, self.ncols, self.data.len())
    }

    /// Nonzero positions as `(row, col, value)`
    pub(crate) fn triples(&self) -> impl Iterator<Item = (u64, u64, T)> + '_ {
        self.data
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.is_zero())
            .map(move |(i, &v)| ((i / self.ncols) as u64, (i % self.ncols) as u64, v))
    }
}

impl<T: MatrixElement> SparseMatrix for DenseMatrix<T> {
    type Element = T;

    fn get_element(&self, row: usize, col: usize) -> Option<T> {
        if row >= self.nrows || col >= self.ncols {
            return None;
        }
        let value = self.data[row * self.ncols + col];
        (!value.is_zero()).then_some(value)
    }

    fn dimensions(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    fn nnz(&self) -> usize {
        self.data.iter().filter(|v| !v.is_zero()).count()
    }

    fn stored_values(&self) -> &[T] {
        &self.data
    }
}

impl<T: MatrixElement> MajorAxisSlice for DenseMatrix<T> {
    const FORMAT: MatrixFormat = MatrixFormat::Dense;
    const AXIS: Axis = Axis::Rows;

    fn major_len(&self) -> usize {
        self.nrows
    }

    // Dense input is sized as if every position were populated
    fn average_density(&self) -> usize {
        self.ncols
    }

    fn slice_to_coo(&self, lines: Range<usize>) -> CooChunk<T> {
        let mut row = Vec::new();
        let mut col = Vec::new();
        let mut data = Vec::new();

        for r in lines.clone() {
            for (c, &value) in self.row(r).iter().enumerate() {
                if !value.is_zero() {
                    row.push(r as u64);
                    col.push(c as u64);
                    data.push(value);
                }
            }
        }

        CooChunk::from_parts(
            (self.nrows, self.ncols),
            Axis::Rows,
            lines,
            row,
            col,
            data,
        )
    }
}
