//! Partition checks for chunk sequences
//!
//! A chunk sequence is valid for a matrix when every chunk keeps the
//! matrix's shape, every line of the slicing axis belongs to exactly one
//! chunk, and the chunks' entries are exactly the matrix's entries.

use hashbrown::HashMap;

use crate::chunking::CooChunk;
use crate::format::Axis;
use crate::matrix::Matrix;
use crate::traits::{MatrixElement, SparseMatrix};
use crate::CensusError;

/// Bit pattern of a value, so NaN payloads compare equal to themselves
fn value_key<T: MatrixElement>(value: &T) -> [u8; 8] {
    let mut key = [0u8; 8];
    let bytes = bytemuck::bytes_of(value);
    key[..bytes.len()].copy_from_slice(bytes);
    key
}

/// Check that `chunks` partition `matrix` exactly
pub fn validate_partition<T: MatrixElement>(
    matrix: &Matrix<T>,
    chunks: &[CooChunk<T>],
) -> Result<(), CensusError> {
    let shape = matrix.dimensions();

    // Multiset difference between source entries and chunk entries
    let mut balance: HashMap<(u64, u64, [u8; 8]), isize> = HashMap::new();
    for (row, col, value) in matrix.to_triples() {
        *balance.entry((row, col, value_key(&value))).or_insert(0) += 1;
    }

    let mut line_owner: HashMap<u64, usize> = HashMap::new();

    for (index, chunk) in chunks.iter().enumerate() {
        if chunk.shape() != shape {
            return Err(CensusError::PartitionViolation);
        }

        let lines = chunk.lines();
        for (row, col, value) in chunk.iter() {
            let line = match chunk.axis() {
                Axis::Rows => row,
                Axis::Columns => col,
            };

            if !lines.contains(&(line as usize)) {
                return Err(CensusError::PartitionViolation);
            }
            if *line_owner.entry(line).or_insert(index) != index {
                return Err(CensusError::PartitionViolation);
            }

            *balance.entry((row, col, value_key(&value))).or_insert(0) -= 1;
        }
    }

    if balance.values().any(|&count| count != 0) {
        return Err(CensusError::PartitionViolation);
    }

    Ok(())
}
