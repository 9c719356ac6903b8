#![no_std]

//! census-util core - matrix chunking and table helpers
//!
//! This crate holds the pure parts of the census build utilities: the
//! in-memory matrix model, the chunk slicer, the non-negative integral
//! check, and the categorical flag normalizer. Nothing here performs I/O.

extern crate alloc;

pub mod chunking;
pub mod error;
pub mod format;
pub mod frame;
pub mod integrity;
pub mod matrix;
pub mod traits;
pub mod validation;

pub use chunking::{array_chunker, stride_for, ArrayChunks, ChunkConfig, ChunkPlan, CooChunk};
pub use error::*;
pub use format::*;
pub use frame::{normalize_ordered_flags, CategoricalColumn, Column, DataFrame, OrderedFlag};
pub use integrity::{is_nonnegative_integral, is_nonnegative_integral_value};
pub use matrix::{CooMatrix, CscMatrix, CsrMatrix, DenseMatrix, DiaMatrix, Matrix};
pub use traits::*;
pub use validation::validate_partition;
