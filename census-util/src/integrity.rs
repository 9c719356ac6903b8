//! Parallel value checks for large count matrices

use census_util_core::{is_nonnegative_integral_value, MatrixElement, SparseMatrix};
use rayon::prelude::*;

/// Below this many values the sequential check is faster
const PARALLEL_THRESHOLD: usize = 1 << 16;

/// Return true if every stored value is a non-negative whole number
///
/// Same result as [`census_util_core::is_nonnegative_integral`], evaluated
/// on the rayon pool once the input is large enough to benefit.
pub fn par_is_nonnegative_integral<M>(matrix: &M) -> bool
where
    M: SparseMatrix + ?Sized,
{
    let values = matrix.stored_values();
    if values.len() < PARALLEL_THRESHOLD {
        return values.iter().all(|&v| is_nonnegative_integral_value(v));
    }

    let chunk_size = values.len().div_ceil(rayon::current_num_threads() * 4);
    values
        .par_chunks(chunk_size)
        .all(|chunk| chunk.iter().all(|&v| is_nonnegative_integral_value(v)))
}

/// Count of stored values that fail the non-negative integral check
pub fn count_non_integral<T: MatrixElement>(values: &[T]) -> usize {
    values
        .par_iter()
        .filter(|&&v| !is_nonnegative_integral_value(v))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use census_util_core::{is_nonnegative_integral, CsrMatrix, DenseMatrix, Matrix};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_matches_sequential_check_on_large_input() {
        let mut rng = StdRng::seed_from_u64(3);
        let n = PARALLEL_THRESHOLD * 2;
        let mut values: Vec<f32> = (0..n).map(|_| rng.gen_range(0..50) as f32).collect();
        let matrix = DenseMatrix::try_new(n / 8, 8, values.clone()).unwrap();
        assert!(par_is_nonnegative_integral(&matrix));
        assert_eq!(count_non_integral(matrix.stored_values()), 0);

        values[n - 3] = 0.25;
        let matrix = DenseMatrix::try_new(n / 8, 8, values).unwrap();
        assert!(!par_is_nonnegative_integral(&matrix));
        assert_eq!(
            par_is_nonnegative_integral(&matrix),
            is_nonnegative_integral(&matrix)
        );
        assert_eq!(count_non_integral(matrix.stored_values()), 1);
    }

    #[test]
    fn test_small_sparse_input() {
        let matrix: Matrix<f64> =
            CsrMatrix::try_new(2, 2, vec![2.0, -1.0], vec![0, 1], vec![0, 1, 2]).unwrap().into();
        assert!(!par_is_nonnegative_integral(&matrix));
    }
}
