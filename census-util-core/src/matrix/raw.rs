//! Unchecked wire forms of the matrix types
//!
//! Deserialization goes through these and then the validating
//! constructors, so a decoded matrix always satisfies its layout checks.

use alloc::vec::Vec;

use serde::Deserialize;

use super::{CooMatrix, CscMatrix, CsrMatrix, DenseMatrix, DiaMatrix};
use crate::traits::MatrixElement;
use crate::CensusError;

#[derive(Deserialize)]
pub(crate) struct DenseParts<T> {
    nrows: usize,
    ncols: usize,
    data: Vec<T>,
}

impl<T: MatrixElement> TryFrom<DenseParts<T>> for DenseMatrix<T> {
    type Error = CensusError;

    fn try_from(parts: DenseParts<T>) -> Result<Self, CensusError> {
        DenseMatrix::try_new(parts.nrows, parts.ncols, parts.data)
    }
}

#[derive(Deserialize)]
pub(crate) struct CompressedParts<T> {
    nrows: usize,
    ncols: usize,
    data: Vec<T>,
    indices: Vec<usize>,
    indptr: Vec<usize>,
}

impl<T: MatrixElement> TryFrom<CompressedParts<T>> for CsrMatrix<T> {
    type Error = CensusError;

    fn try_from(parts: CompressedParts<T>) -> Result<Self, CensusError> {
        CsrMatrix::try_new(parts.nrows, parts.ncols, parts.data, parts.indices, parts.indptr)
    }
}

impl<T: MatrixElement> TryFrom<CompressedParts<T>> for CscMatrix<T> {
    type Error = CensusError;

    fn try_from(parts: CompressedParts<T>) -> Result<Self, CensusError> {
        CscMatrix::try_new(parts.nrows, parts.ncols, parts.data, parts.indices, parts.indptr)
    }
}

#[derive(Deserialize)]
pub(crate) struct CooParts<T> {
    nrows: usize,
    ncols: usize,
    row: Vec<usize>,
    col: Vec<usize>,
    data: Vec<T>,
}

impl<T: MatrixElement> TryFrom<CooParts<T>> for CooMatrix<T> {
    type Error = CensusError;

    fn try_from(parts: CooParts<T>) -> Result<Self, CensusError> {
        CooMatrix::try_new(parts.nrows, parts.ncols, parts.row, parts.col, parts.data)
    }
}

#[derive(Deserialize)]
pub(crate) struct DiaParts<T> {
    nrows: usize,
    ncols: usize,
    data: Vec<T>,
    offsets: Vec<i64>,
    length: usize,
}

impl<T: MatrixElement> TryFrom<DiaParts<T>> for DiaMatrix<T> {
    type Error = CensusError;

    fn try_from(parts: DiaParts<T>) -> Result<Self, CensusError> {
        DiaMatrix::try_new(parts.nrows, parts.ncols, parts.data, parts.offsets, parts.length)
    }
}

#[cfg(test)]
mod tests {
    use crate::chunking::ChunkConfig;
    use crate::matrix::{CsrMatrix, Matrix};
    use crate::traits::{Chunkable, SparseMatrix};
    use alloc::string::ToString;
    use alloc::vec;

    #[test]
    fn test_bad_indptr_is_rejected() {
        let json = r#"{"Csr":{"nrows":2,"ncols":2,"data":[1.0],"indices":[0],"indptr":[0,5,9]}}"#;
        let err = serde_json::from_str::<Matrix<f64>>(json).unwrap_err();
        assert!(err.to_string().contains("index pointer"));
    }

    #[test]
    fn test_each_layout_is_checked() {
        // Dense buffer too short
        assert!(serde_json::from_str::<Matrix<f32>>(
            r#"{"Dense":{"nrows":2,"ncols":2,"data":[1.0,2.0,3.0]}}"#
        )
        .is_err());
        // Row index out of range
        assert!(serde_json::from_str::<Matrix<f32>>(
            r#"{"Csc":{"nrows":2,"ncols":1,"data":[1.0],"indices":[4],"indptr":[0,1]}}"#
        )
        .is_err());
        assert!(serde_json::from_str::<Matrix<f32>>(
            r#"{"Coo":{"nrows":1,"ncols":1,"row":[1],"col":[0],"data":[1.0]}}"#
        )
        .is_err());
        assert!(serde_json::from_str::<Matrix<f32>>(
            r#"{"Dia":{"nrows":2,"ncols":2,"data":[1.0],"offsets":[0],"length":2}}"#
        )
        .is_err());
    }

    #[test]
    fn test_valid_matrix_round_trips_and_chunks() {
        let matrix: Matrix<f64> =
            CsrMatrix::try_new(2, 2, vec![1.0, 2.0], vec![1, 0], vec![0, 1, 2]).unwrap().into();
        let json = serde_json::to_string(&matrix).unwrap();
        let decoded: Matrix<f64> = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded, matrix);
        assert_eq!(decoded.get_element(1, 0), Some(2.0));
        assert_eq!(
            decoded.chunks(&ChunkConfig::with_target_nnz(1)).unwrap().count(),
            2
        );
    }
}
