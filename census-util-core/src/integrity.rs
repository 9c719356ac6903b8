//! Non-negative integral value checks
//!
//! Count matrices must hold only non-negative whole numbers. For dense
//! input every position is checked; for sparse input only stored values.

use crate::traits::{MatrixElement, SparseMatrix};

/// Whether a single value is a non-negative whole number
///
/// Values with the sign bit set fail, including `-0.0`. NaN and the
/// infinities fail because they have no zero fractional part.
pub fn is_nonnegative_integral_value<T: MatrixElement>(value: T) -> bool {
    let value = value.to_f64();
    !value.is_sign_negative() && value % 1.0 == 0.0
}

/// Return true if the matrix contains only non-negative integral values
pub fn is_nonnegative_integral<M: SparseMatrix + ?Sized>(matrix: &M) -> bool {
    matrix
        .stored_values()
        .iter()
        .all(|&value| is_nonnegative_integral_value(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{CsrMatrix, DenseMatrix, Matrix};
    use alloc::vec;

    #[test]
    fn test_value_predicate() {
        assert!(is_nonnegative_integral_value(0.0f64));
        assert!(is_nonnegative_integral_value(3.0f32));
        assert!(is_nonnegative_integral_value(7u64));
        assert!(!is_nonnegative_integral_value(-0.0f64));
        assert!(!is_nonnegative_integral_value(0.5f64));
        assert!(!is_nonnegative_integral_value(-2i32));
        assert!(!is_nonnegative_integral_value(f64::NAN));
        assert!(!is_nonnegative_integral_value(f64::INFINITY));
    }

    #[test]
    fn test_dense_checks_every_position() {
        let counts = DenseMatrix::try_new(2, 2, vec![0.0, 1.0, 2.0, 30.0]).unwrap();
        assert!(is_nonnegative_integral(&counts));

        let normalized = DenseMatrix::try_new(2, 2, vec![0.0, 1.5, 2.0, 3.0]).unwrap();
        assert!(!is_nonnegative_integral(&normalized));
    }

    #[test]
    fn test_sparse_checks_stored_values() {
        let counts: Matrix<f32> =
            CsrMatrix::try_new(2, 3, vec![1.0, 4.0], vec![0, 2], vec![0, 1, 2]).unwrap().into();
        assert!(is_nonnegative_integral(&counts));

        let negative: Matrix<f32> =
            CsrMatrix::try_new(2, 3, vec![1.0, -4.0], vec![0, 2], vec![0, 1, 2]).unwrap().into();
        assert!(!is_nonnegative_integral(&negative));
    }
}
