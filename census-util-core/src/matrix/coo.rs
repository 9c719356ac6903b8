use alloc::vec::Vec;

use crate::traits::{MatrixElement, SparseMatrix};
use crate::validation::validate_coordinates;
use crate::Result;

/// Coordinate-list matrix
///
/// Accepted by the integrity check and by partition validation, but not
/// by the chunker: entries are unordered, so there is no axis to slice.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "crate::matrix::raw::CooParts<T>", bound(deserialize = "T: MatrixElement + serde::Deserialize<'de>"))
)]
pub struct CooMatrix<T> {
    nrows: usize,
    ncols: usize,
    row: Vec<usize>,
    col: Vec<usize>,
    data: Vec<T>,
}

impl<T: MatrixElement> CooMatrix<T> {
    pub fn try_new(
        nrows: usize,
        ncols: usize,
        row: Vec<usize>,
        col: Vec<usize>,
        data: Vec<T>,
    ) -> Result<Self> {
        validate_coordinates(nrows, ncols, &row, &col, data.len())?;
        Ok(Self {
            nrows,
            ncols,
            row,
            col,
            data,
        })
    }

    pub fn validate(&self) -> Result<()> {
        validate_coordinates(self.nrows, self.ncols, &self.row, &self.col, self.data.len())
    }

    pub(crate) fn triples(&self) -> impl Iterator<Item = (u64, u64, T)> + '_ {
        self.row
            .iter()
            .zip(&self.col)
            .zip(&self.data)
            .map(|((&r, &c), &v)| (r as u64, c as u64, v))
    }
}

impl<T: MatrixElement> SparseMatrix for CooMatrix<T> {
    type Element = T;

    fn get_element(&self, row: usize, col: usize) -> Option<T> {
        self.row
            .iter()
            .zip(&self.col)
            .position(|(&r, &c)| r == row && c == col)
            .map(|i| self.data[i])
    }

    fn dimensions(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    fn nnz(&self) -> usize {
        self.data.len()
    }

    fn stored_values(&self) -> &[T] {
        &self.data
    }
}
