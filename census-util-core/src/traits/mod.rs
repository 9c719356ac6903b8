//! Abstract interfaces shared by every matrix representation
//!
//! Traits are pure interfaces; implementations live next to the types.

pub mod backend;
pub mod element;
pub mod matrix;

pub use backend::{ChunkProcessor, Chunkable};
pub use element::MatrixElement;
pub use matrix::{MajorAxisSlice, SparseMatrix};
