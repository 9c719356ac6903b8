//! census-util - building blocks for census data builds
//!
//! This library streams large count matrices in bounded-size chunks, checks
//! that they hold raw counts, fetches JSON release manifests, and records
//! which commit a build came from.
//!
//! ## Architecture
//!
//! The crate follows a pure/effectful split:
//!
//! - **census-util-core**: matrix model, chunk slicer, validation and table helpers (no I/O)
//! - **census-util**: chunk processing driver, parallel checks, HTTP fetch and git provenance
//!
//! ## Quick Start
//!
//! ```rust
//! use census_util::{ChunkConfig, ChunkStatsSink, ChunkedProcessor, CsrMatrix, Matrix};
//!
//! fn example() -> census_util::Result<()> {
//!     let matrix: Matrix<f32> =
//!         CsrMatrix::try_new(3, 2, vec![1.0, 4.0], vec![0, 1], vec![0, 1, 1, 2])?.into();
//!
//!     let summary = ChunkedProcessor::new(&matrix, ChunkConfig::with_target_nnz(1))
//!         .run(ChunkStatsSink::new())?;
//!     assert_eq!(summary.total_nnz, 2);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! ## Features
//!
//! - **serde**: serialization of the matrix model and run summaries
//! - **http**: async JSON fetch over reqwest and tokio

// Re-export core abstractions
pub use census_util_core::{
    // Chunk slicing
    array_chunker, stride_for, ArrayChunks, ChunkConfig, ChunkPlan, CooChunk,
    DEFAULT_TARGET_NNZ,
    // Matrix model
    Axis, CooMatrix, CscMatrix, CsrMatrix, DataType, DenseMatrix, DiaMatrix, Matrix, MatrixFormat,
    // Traits
    ChunkProcessor, Chunkable, MajorAxisSlice, MatrixElement, SparseMatrix,
    // Checks and table helpers
    is_nonnegative_integral, normalize_ordered_flags, validate_partition, CategoricalColumn,
    Column, DataFrame, OrderedFlag,
    // Error handling
    CensusError,
};

// Implementation modules
pub mod chunked_backend;
pub mod error;
pub mod http_backend;
pub mod integrity;
pub mod provenance;

// Public exports
pub use chunked_backend::{
    ChunkStats, ChunkStatsSink, ChunkSummary, ChunkedProcessor, CollectingSink, FnSink,
};
pub use error::{Error, FetchError, ProvenanceError, Result};
pub use integrity::{count_non_integral, par_is_nonnegative_integral};
pub use provenance::{
    git_commit_sha, is_git_repo_dirty, BuildProvenance, GitCli, SourceControl, COMMIT_SHA_ENV,
};

// HTTP backend features
pub use http_backend::JsonFetcher;
#[cfg(feature = "serde")]
pub use http_backend::fetch_json;
