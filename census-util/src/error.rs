//! Error types for census-util operations

use std::path::PathBuf;

use census_util_core::CensusError;
use thiserror::Error;

/// Simplified `Result` using [`Error`] as error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while fetching a JSON document
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with a non-success status
    #[error("HTTP {status} for {url}")]
    Http { status: u16, url: String },
    /// The body was not valid JSON for the requested type
    #[cfg(feature = "serde")]
    #[error("invalid JSON body: {0}")]
    Parse(#[from] serde_json::Error),
    /// The request could not be sent or the body could not be read
    #[cfg(feature = "http")]
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The crate was built without the `http` feature
    #[error("HTTP support not enabled. Build with --features http")]
    Disabled,
}

/// Errors raised while reading source-control metadata
#[derive(Debug, Error)]
pub enum ProvenanceError {
    /// No `.git` entry in the start directory or any ancestor
    #[error("no git repository found from {}", start.display())]
    RepositoryNotFound { start: PathBuf },
    /// The git executable exited unsuccessfully
    #[error("`git {command}` failed: {stderr}")]
    GitCommand { command: String, stderr: String },
    #[error("git I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Umbrella error for the crate
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Core(CensusError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Provenance(#[from] ProvenanceError),
    /// A chunk sink rejected a chunk
    #[error("chunk sink failed: {0}")]
    Sink(String),
}

impl From<CensusError> for Error {
    fn from(err: CensusError) -> Self {
        Error::Core(err)
    }
}
