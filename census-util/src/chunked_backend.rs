//! Chunked processing driver for large matrices
//!
//! This module streams a matrix through a [`ChunkProcessor`] one chunk at a
//! time, so a writer never needs more than a single chunk in memory.

use std::ops::Range;
use std::time::Instant;

use census_util_core::{
    ArrayChunks, CensusError, ChunkConfig, ChunkPlan, ChunkProcessor, Chunkable, CooChunk, Matrix,
    MatrixElement, SparseMatrix,
};

use crate::error::{Error, Result};

/// Chunked processor for stream processing
pub struct ChunkedProcessor<'a, T> {
    matrix: &'a Matrix<T>,
    config: ChunkConfig,
}

impl<'a, T: MatrixElement> ChunkedProcessor<'a, T> {
    /// Create a new chunked processor
    pub fn new(matrix: &'a Matrix<T>, config: ChunkConfig) -> Self {
        Self { matrix, config }
    }

    /// Get matrix dimensions
    pub fn dimensions(&self) -> (usize, usize) {
        self.matrix.dimensions()
    }

    /// Get the chunk configuration
    pub fn config(&self) -> &ChunkConfig {
        &self.config
    }

    /// Slicing layout for the wrapped matrix
    pub fn plan(&self) -> Result<ChunkPlan> {
        Ok(self.matrix.chunk_plan(&self.config)?)
    }

    /// Lazy chunk iterator over the wrapped matrix
    pub fn chunks(&self) -> Result<ArrayChunks<'a, T>> {
        Ok(census_util_core::array_chunker(self.matrix, &self.config)?)
    }

    /// Feed every chunk to `processor`, stopping at the first error
    pub fn run<P>(&self, mut processor: P) -> std::result::Result<P::Output, P::Error>
    where
        P: ChunkProcessor<T>,
        P::Error: From<CensusError>,
    {
        let start = Instant::now();
        let chunks = census_util_core::array_chunker(self.matrix, &self.config)?;
        let plan = *chunks.plan();
        log::info!(
            "slicing {}x{} {} matrix into {} chunks of {} {}",
            self.dimensions().0,
            self.dimensions().1,
            plan.format,
            plan.chunk_count,
            plan.stride,
            plan.axis
        );

        for (index, chunk) in chunks.enumerate() {
            log::debug!(
                "chunk {}/{}: {} {:?}, nnz={}",
                index + 1,
                plan.chunk_count,
                plan.axis,
                chunk.lines(),
                chunk.nnz()
            );
            processor.process_chunk(chunk)?;
        }

        let output = processor.finalize()?;
        log::info!("processed {} chunks in {:.2?}", plan.chunk_count, start.elapsed());
        Ok(output)
    }
}

/// Keeps every chunk it receives
#[derive(Debug)]
pub struct CollectingSink<T> {
    chunks: Vec<CooChunk<T>>,
}

impl<T> Default for CollectingSink<T> {
    fn default() -> Self {
        Self { chunks: Vec::new() }
    }
}

impl<T> CollectingSink<T> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: MatrixElement> ChunkProcessor<T> for CollectingSink<T> {
    type Output = Vec<CooChunk<T>>;
    type Error = Error;

    fn process_chunk(&mut self, chunk: CooChunk<T>) -> Result<()> {
        self.chunks.push(chunk);
        Ok(())
    }

    fn finalize(self) -> Result<Self::Output> {
        Ok(self.chunks)
    }
}

/// Size of one processed chunk
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ChunkStats {
    pub index: usize,
    pub lines: Range<usize>,
    pub nnz: usize,
}

/// Per-chunk sizes and totals for a whole run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ChunkSummary {
    pub chunks: Vec<ChunkStats>,
    pub total_nnz: usize,
    pub max_chunk_nnz: usize,
}

/// Records chunk sizes and discards the chunk data
#[derive(Debug, Default)]
pub struct ChunkStatsSink {
    summary: ChunkSummary,
}

impl ChunkStatsSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: MatrixElement> ChunkProcessor<T> for ChunkStatsSink {
    type Output = ChunkSummary;
    type Error = Error;

    fn process_chunk(&mut self, chunk: CooChunk<T>) -> Result<()> {
        let nnz = chunk.nnz();
        self.summary.chunks.push(ChunkStats {
            index: self.summary.chunks.len(),
            lines: chunk.lines(),
            nnz,
        });
        self.summary.total_nnz += nnz;
        self.summary.max_chunk_nnz = self.summary.max_chunk_nnz.max(nnz);
        Ok(())
    }

    fn finalize(self) -> Result<Self::Output> {
        Ok(self.summary)
    }
}

/// Adapts a closure into a chunk processor
pub struct FnSink<F> {
    f: F,
    processed: usize,
}

impl<F> FnSink<F> {
    pub fn new(f: F) -> Self {
        Self { f, processed: 0 }
    }
}

impl<T, F> ChunkProcessor<T> for FnSink<F>
where
    T: MatrixElement,
    F: FnMut(CooChunk<T>) -> Result<()>,
{
    /// Number of chunks handed to the closure
    type Output = usize;
    type Error = Error;

    fn process_chunk(&mut self, chunk: CooChunk<T>) -> Result<()> {
        (self.f)(chunk)?;
        self.processed += 1;
        Ok(())
    }

    fn finalize(self) -> Result<usize> {
        Ok(self.processed)
    }
}
