use alloc::vec::Vec;

use crate::traits::{MatrixElement, SparseMatrix};
use crate::{CensusError, Result};

/// Diagonal-storage matrix
///
/// `data` is a row-major `[offsets.len(), length]` array. Entry `j` of
/// diagonal `k` sits at column `j` and row `j - offsets[k]`; negative
/// offsets are below the main diagonal. Positions that fall outside the
/// matrix are padding.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "crate::matrix::raw::DiaParts<T>", bound(deserialize = "T: MatrixElement + serde::Deserialize<'de>"))
)]
pub struct DiaMatrix<T> {
    nrows: usize,
    ncols: usize,
    data: Vec<T>,
    offsets: Vec<i64>,
    length: usize,
}

impl<T: MatrixElement> DiaMatrix<T> {
    pub fn try_new(
        nrows: usize,
        ncols: usize,
        data: Vec<T>,
        offsets: Vec<i64>,
        length: usize,
    ) -> Result<Self> {
        let matrix = Self {
            nrows,
            ncols,
            data,
            offsets,
            length,
        };
        matrix.validate()?;
        Ok(matrix)
    }

    pub fn validate(&self) -> Result<()> {
        if self.length > self.ncols {
            return Err(CensusError::IndexOutOfBounds);
        }
        match self.offsets.len().checked_mul(self.length) {
            Some(expected) if expected == self.data.len() => Ok(()),
            _ => Err(CensusError::ShapeMismatch),
        }
    }

    /// Row holding entry `col` of the diagonal at `offset`, if inside the matrix
    fn row_of(&self, offset: i64, col: usize) -> Option<usize> {
        let row = col as i64 - offset;
        (0..self.nrows as i64).contains(&row).then_some(row as usize)
    }

    /// Nonzero in-bounds entries as `(row, col, value)`
    pub(crate) fn triples(&self) -> impl Iterator<Item = (u64, u64, T)> + '_ {
        self.offsets.iter().enumerate().flat_map(move |(k, &offset)| {
            (0..self.length).filter_map(move |col| {
                let value = self.data[k * self.length + col];
                let row = self.row_of(offset, col)?;
                (!value.is_zero()).then_some((row as u64, col as u64, value))
            })
        })
    }
}

impl<T: MatrixElement> SparseMatrix for DiaMatrix<T> {
    type Element = T;

    fn get_element(&self, row: usize, col: usize) -> Option<T> {
        if row >= self.nrows || col >= self.length {
            return None;
        }
        let offset = col as i64 - row as i64;
        let k = self.offsets.iter().position(|&o| o == offset)?;
        let value = self.data[k * self.length + col];
        (!value.is_zero()).then_some(value)
    }

    fn dimensions(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    fn nnz(&self) -> usize {
        self.triples().count()
    }

    fn stored_values(&self) -> &[T] {
        &self.data
    }
}
