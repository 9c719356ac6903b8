//! In-memory matrix representations
//!
//! [`Matrix`] is a tagged union over the supported storage layouts. Each
//! variant owns its buffers and validates them on construction.

use alloc::vec::Vec;

mod compressed;
mod coo;
mod dense;
mod dia;
#[cfg(feature = "serde")]
mod raw;

pub use compressed::{CscMatrix, CsrMatrix};
pub use coo::CooMatrix;
pub use dense::DenseMatrix;
pub use dia::DiaMatrix;

use crate::format::{DataType, MatrixFormat};
use crate::traits::{MatrixElement, SparseMatrix};
use crate::Result;

/// A 2-D numeric matrix in one of the supported representations
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(bound(deserialize = "T: MatrixElement + serde::Deserialize<'de>")))]
pub enum Matrix<T> {
    Dense(DenseMatrix<T>),
    Csr(CsrMatrix<T>),
    Csc(CscMatrix<T>),
    Coo(CooMatrix<T>),
    Dia(DiaMatrix<T>),
}

macro_rules! dispatch {
    ($self:ident, $m:ident => $body:expr) => {
        match $self {
            Matrix::Dense($m) => $body,
            Matrix::Csr($m) => $body,
            Matrix::Csc($m) => $body,
            Matrix::Coo($m) => $body,
            Matrix::Dia($m) => $body,
        }
    };
}

impl<T: MatrixElement> Matrix<T> {
    /// Representation tag
    pub fn format(&self) -> MatrixFormat {
        match self {
            Matrix::Dense(_) => MatrixFormat::Dense,
            Matrix::Csr(_) => MatrixFormat::Csr,
            Matrix::Csc(_) => MatrixFormat::Csc,
            Matrix::Coo(_) => MatrixFormat::Coo,
            Matrix::Dia(_) => MatrixFormat::Dia,
        }
    }

    /// Element type tag
    pub fn data_type(&self) -> DataType {
        T::data_type()
    }

    /// Re-check structural invariants
    pub fn validate(&self) -> Result<()> {
        dispatch!(self, m => m.validate())
    }

    /// Every nonzero (sparse: every stored) entry as `(row, col, value)`
    pub fn to_triples(&self) -> Vec<(u64, u64, T)> {
        dispatch!(self, m => m.triples().collect())
    }
}

impl<T: MatrixElement> SparseMatrix for Matrix<T> {
    type Element = T;

    fn get_element(&self, row: usize, col: usize) -> Option<T> {
        dispatch!(self, m => m.get_element(row, col))
    }

    fn dimensions(&self) -> (usize, usize) {
        dispatch!(self, m => m.dimensions())
    }

    fn nnz(&self) -> usize {
        dispatch!(self, m => m.nnz())
    }

    fn stored_values(&self) -> &[T] {
        dispatch!(self, m => m.stored_values())
    }
}

impl<T> From<DenseMatrix<T>> for Matrix<T> {
    fn from(m: DenseMatrix<T>) -> Self {
        Matrix::Dense(m)
    }
}

impl<T> From<CsrMatrix<T>> for Matrix<T> {
    fn from(m: CsrMatrix<T>) -> Self {
        Matrix::Csr(m)
    }
}

impl<T> From<CscMatrix<T>> for Matrix<T> {
    fn from(m: CscMatrix<T>) -> Self {
        Matrix::Csc(m)
    }
}

impl<T> From<CooMatrix<T>> for Matrix<T> {
    fn from(m: CooMatrix<T>) -> Self {
        Matrix::Coo(m)
    }
}

impl<T> From<DiaMatrix<T>> for Matrix<T> {
    fn from(m: DiaMatrix<T>) -> Self {
        Matrix::Dia(m)
    }
}
