//! Chunked slicing of large matrices
//!
//! A matrix is cut along its natural major axis (rows for dense and CSR
//! inputs, columns for CSC inputs) into contiguous line ranges. Each range
//! is converted to coordinate triples in the coordinates of the full
//! matrix, so a consumer can write chunks independently without any
//! re-basing. A row (or column) never straddles two chunks.
//!
//! The number of lines per chunk (the stride) is derived from the average
//! number of nonzeros per line, so the per-chunk nonzero count is a target
//! rather than a cap.

use alloc::vec::Vec;
use core::iter::FusedIterator;
use core::ops::Range;

use crate::format::{Axis, MatrixFormat, DEFAULT_TARGET_NNZ};
use crate::matrix::{CscMatrix, CsrMatrix, DenseMatrix, Matrix};
use crate::traits::{ChunkProcessor, Chunkable, MajorAxisSlice, MatrixElement};
use crate::{CensusError, Result};

/// Configuration for chunked slicing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkConfig {
    /// Goal for the number of nonzero entries per chunk
    pub target_nnz: usize,
}

impl ChunkConfig {
    /// Create config with a nonzero target per chunk
    pub fn with_target_nnz(target_nnz: usize) -> Self {
        Self { target_nnz }
    }

    /// Get the nonzero target per chunk
    pub fn target_nnz(&self) -> usize {
        self.target_nnz
    }
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            target_nnz: DEFAULT_TARGET_NNZ,
        }
    }
}

/// Number of lines per chunk for a given target and average line density
///
/// Computes `max(1, round(target_nnz / density))` with halves rounded up,
/// in integer arithmetic. A density of zero is treated as one.
pub const fn stride_for(target_nnz: usize, density: usize) -> usize {
    let density = if density == 0 { 1 } else { density };
    let stride = target_nnz.saturating_add(density / 2) / density;
    if stride == 0 {
        1
    } else {
        stride
    }
}

/// Precomputed slicing layout for one matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChunkPlan {
    /// Representation of the source matrix
    pub format: MatrixFormat,
    /// Axis the matrix is sliced along
    pub axis: Axis,
    /// Length of the slicing axis
    pub axis_len: usize,
    /// Average nonzeros per line used to size chunks (never zero)
    pub density: usize,
    /// Lines per chunk
    pub stride: usize,
    /// Number of chunks the iterator will yield
    pub chunk_count: usize,
}

impl ChunkPlan {
    /// Build the plan for a chunkable source
    pub fn for_source<S: MajorAxisSlice>(source: &S, config: &ChunkConfig) -> Self {
        let (nrows, ncols) = source.dimensions();
        let axis_len = source.major_len();
        let density = source.average_density().max(1);
        let stride = stride_for(config.target_nnz, density);

        // A matrix without rows or without columns has nothing to slice
        let chunk_count = if nrows == 0 || ncols == 0 {
            0
        } else {
            axis_len.div_ceil(stride)
        };

        Self {
            format: S::FORMAT,
            axis: S::AXIS,
            axis_len,
            density,
            stride,
            chunk_count,
        }
    }

    /// Line range covered by the chunk at `chunk_index`
    pub fn line_range(&self, chunk_index: usize) -> Option<Range<usize>> {
        if chunk_index >= self.chunk_count {
            return None;
        }
        let start = chunk_index * self.stride;
        let end = start.saturating_add(self.stride).min(self.axis_len);
        Some(start..end)
    }
}

/// A slice of a matrix as coordinate triples in full-matrix coordinates
///
/// The chunk keeps the shape of its source matrix; positions outside the
/// covered lines are implicitly zero.
#[derive(Debug, Clone, PartialEq)]
pub struct CooChunk<T> {
    shape: (usize, usize),
    axis: Axis,
    lines: Range<usize>,
    row: Vec<u64>,
    col: Vec<u64>,
    data: Vec<T>,
}

impl<T: MatrixElement> CooChunk<T> {
    pub(crate) fn from_parts(
        shape: (usize, usize),
        axis: Axis,
        lines: Range<usize>,
        row: Vec<u64>,
        col: Vec<u64>,
        data: Vec<T>,
    ) -> Self {
        debug_assert_eq!(row.len(), data.len());
        debug_assert_eq!(col.len(), data.len());
        Self {
            shape,
            axis,
            lines,
            row,
            col,
            data,
        }
    }

    /// Shape of the source matrix
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    /// Axis the source was sliced along
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Lines of the slicing axis covered by this chunk
    pub fn lines(&self) -> Range<usize> {
        self.lines.clone()
    }

    /// Number of entries in the chunk
    pub fn nnz(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Row coordinate of each entry
    pub fn rows(&self) -> &[u64] {
        &self.row
    }

    /// Column coordinate of each entry
    pub fn cols(&self) -> &[u64] {
        &self.col
    }

    /// Value of each entry
    pub fn values(&self) -> &[T] {
        &self.data
    }

    /// Iterate `(row, col, value)` triples
    pub fn iter(&self) -> impl Iterator<Item = (u64, u64, T)> + '_ {
        self.row
            .iter()
            .zip(&self.col)
            .zip(&self.data)
            .map(|((&r, &c), &v)| (r, c, v))
    }

    /// Row coordinates as native-endian bytes, for writers
    pub fn row_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.row)
    }

    /// Column coordinates as native-endian bytes, for writers
    pub fn col_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.col)
    }

    /// Values as native-endian bytes, for writers
    pub fn value_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    /// Take ownership of the row, column and value arrays
    pub fn into_parts(self) -> (Vec<u64>, Vec<u64>, Vec<T>) {
        (self.row, self.col, self.data)
    }
}

/// Borrowed chunkable representation
#[derive(Debug, Clone, Copy)]
enum ChunkSource<'a, T> {
    Dense(&'a DenseMatrix<T>),
    Csr(&'a CsrMatrix<T>),
    Csc(&'a CscMatrix<T>),
}

impl<'a, T: MatrixElement> ChunkSource<'a, T> {
    fn from_matrix(matrix: &'a Matrix<T>) -> Result<Self> {
        match matrix {
            Matrix::Dense(m) => Ok(ChunkSource::Dense(m)),
            Matrix::Csr(m) => Ok(ChunkSource::Csr(m)),
            Matrix::Csc(m) => Ok(ChunkSource::Csc(m)),
            Matrix::Coo(_) | Matrix::Dia(_) => Err(CensusError::UnsupportedType(matrix.format())),
        }
    }

    fn plan(&self, config: &ChunkConfig) -> ChunkPlan {
        match self {
            ChunkSource::Dense(m) => ChunkPlan::for_source(*m, config),
            ChunkSource::Csr(m) => ChunkPlan::for_source(*m, config),
            ChunkSource::Csc(m) => ChunkPlan::for_source(*m, config),
        }
    }

    fn slice_to_coo(&self, lines: Range<usize>) -> CooChunk<T> {
        match self {
            ChunkSource::Dense(m) => m.slice_to_coo(lines),
            ChunkSource::Csr(m) => m.slice_to_coo(lines),
            ChunkSource::Csc(m) => m.slice_to_coo(lines),
        }
    }
}

/// Lazy iterator over the chunks of a matrix
///
/// Holds a shared borrow of the source and the current offset on the
/// slicing axis. Dropping it early releases nothing but the borrow.
#[derive(Debug, Clone)]
pub struct ArrayChunks<'a, T> {
    source: ChunkSource<'a, T>,
    plan: ChunkPlan,
    offset: usize,
    end: usize,
}

impl<'a, T: MatrixElement> ArrayChunks<'a, T> {
    fn new(source: ChunkSource<'a, T>, config: &ChunkConfig) -> Self {
        let plan = source.plan(config);
        let end = if plan.chunk_count == 0 { 0 } else { plan.axis_len };
        log::debug!(
            "chunking {} matrix along {}: {} lines, density {}, stride {}, {} chunks",
            plan.format,
            plan.axis,
            plan.axis_len,
            plan.density,
            plan.stride,
            plan.chunk_count
        );
        Self {
            source,
            plan,
            offset: 0,
            end,
        }
    }

    /// The slicing layout this iterator follows
    pub fn plan(&self) -> &ChunkPlan {
        &self.plan
    }
}

impl<'a, T: MatrixElement> Iterator for ArrayChunks<'a, T> {
    type Item = CooChunk<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.end {
            return None;
        }

        let start = self.offset;
        let stop = start.saturating_add(self.plan.stride).min(self.end);
        self.offset = stop;

        Some(self.source.slice_to_coo(start..stop))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end - self.offset).div_ceil(self.plan.stride);
        (remaining, Some(remaining))
    }
}

impl<'a, T: MatrixElement> ExactSizeIterator for ArrayChunks<'a, T> {}

impl<'a, T: MatrixElement> FusedIterator for ArrayChunks<'a, T> {}

/// Return the matrix as a lazy sequence of coordinate chunks
///
/// Dense and CSR matrices are sliced by row, CSC matrices by column.
/// Any other representation fails with [`CensusError::UnsupportedType`]
/// before a single chunk is produced.
pub fn array_chunker<'a, T: MatrixElement>(
    matrix: &'a Matrix<T>,
    config: &ChunkConfig,
) -> Result<ArrayChunks<'a, T>> {
    let source = ChunkSource::from_matrix(matrix)?;
    Ok(ArrayChunks::new(source, config))
}

impl<T: MatrixElement> Chunkable<T> for Matrix<T> {
    fn chunk_plan(&self, config: &ChunkConfig) -> Result<ChunkPlan> {
        Ok(ChunkSource::from_matrix(self)?.plan(config))
    }

    fn chunks(&self, config: &ChunkConfig) -> Result<ArrayChunks<'_, T>> {
        array_chunker(self, config)
    }

    fn process_chunks<P>(&self, config: &ChunkConfig, mut processor: P) -> core::result::Result<P::Output, P::Error>
    where
        P: ChunkProcessor<T>,
        P::Error: From<CensusError>,
    {
        for chunk in self.chunks(config)? {
            processor.process_chunk(chunk)?;
        }
        processor.finalize()
    }
}
