//! Chunk processing traits
//!
//! These interfaces let a consumer stream a matrix chunk by chunk without
//! ever holding more than one chunk at a time.

use crate::chunking::{ArrayChunks, ChunkConfig, ChunkPlan, CooChunk};
use crate::CensusError;

/// Trait for consumers of matrix chunks
pub trait ChunkProcessor<T> {
    /// Result produced once every chunk has been seen
    type Output;

    /// Error type for processing operations
    type Error;

    /// Process one chunk
    ///
    /// Chunks arrive in slicing-axis order. Returning an error stops the
    /// iteration; no further chunks are produced.
    fn process_chunk(&mut self, chunk: CooChunk<T>) -> Result<(), Self::Error>;

    /// Finalize processing and return results
    fn finalize(self) -> Result<Self::Output, Self::Error>;
}

/// Trait for matrices that can be sliced into chunks
pub trait Chunkable<T> {
    /// Compute the slicing layout without producing any chunk
    fn chunk_plan(&self, config: &ChunkConfig) -> Result<ChunkPlan, CensusError>;

    /// Lazy sequence of chunks
    fn chunks(&self, config: &ChunkConfig) -> Result<ArrayChunks<'_, T>, CensusError>;

    /// Feed every chunk to a processor and return its final result
    fn process_chunks<P>(&self, config: &ChunkConfig, processor: P) -> Result<P::Output, P::Error>
    where
        P: ChunkProcessor<T>,
        P::Error: From<CensusError>;
}
