//! Matrix representation and element type tags
//!
//! This module defines the enums used to describe how a matrix is stored
//! and which numeric type its values have.

/// Default goal for nonzero entries per chunk (~2.4GiB for a 32-bit COO)
pub const DEFAULT_TARGET_NNZ: usize = 256 * 1024 * 1024;

/// Matrix storage representations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum MatrixFormat {
    /// Dense row-major array
    Dense = 0,
    /// Compressed Sparse Row (CSR)
    Csr = 1,
    /// Compressed Sparse Column (CSC)
    Csc = 2,
    /// Coordinate format (COO)
    Coo = 3,
    /// Diagonal format (DIA)
    Dia = 4,
}

impl core::fmt::Display for MatrixFormat {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MatrixFormat::Dense => write!(f, "dense"),
            MatrixFormat::Csr => write!(f, "CSR"),
            MatrixFormat::Csc => write!(f, "CSC"),
            MatrixFormat::Coo => write!(f, "COO"),
            MatrixFormat::Dia => write!(f, "DIA"),
        }
    }
}

/// Data types supported as matrix values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum DataType {
    F32 = 0,
    F64 = 1,
    I32 = 2,
    I64 = 3,
    U32 = 4,
    U64 = 5,
}

impl core::fmt::Display for DataType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DataType::F32 => write!(f, "f32"),
            DataType::F64 => write!(f, "f64"),
            DataType::I32 => write!(f, "i32"),
            DataType::I64 => write!(f, "i64"),
            DataType::U32 => write!(f, "u32"),
            DataType::U64 => write!(f, "u64"),
        }
    }
}

/// Axis along which a matrix is sliced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    Rows,
    Columns,
}

impl core::fmt::Display for Axis {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Axis::Rows => write!(f, "rows"),
            Axis::Columns => write!(f, "columns"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use alloc::string::ToString;

    #[test]
    fn test_display() {
        assert_eq!(MatrixFormat::Csc.to_string(), "CSC");
        assert_eq!(DataType::U64.to_string(), "u64");
        assert_eq!(Axis::Columns.to_string(), "columns");
    }

    #[test]
    fn test_default_target() {
        assert_eq!(DEFAULT_TARGET_NNZ, 268_435_456);
    }
}
