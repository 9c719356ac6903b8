//! Validation utilities
//!
//! Pure checks on matrix layout and on chunk partitions, with no I/O.

pub mod bounds;
pub mod partition;

pub use bounds::{validate_compressed, validate_coordinates, validate_dense_len};
pub use partition::validate_partition;
