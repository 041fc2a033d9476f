//! Chunked block source over an in-memory matrix.
//!
//! [`InMemoryData`] is the in-memory counterpart of
//! [`DataFile`](crate::blocks::data_file::DataFile): the whole matrix is held once (behind an
//! `Arc`, so opening a pass is cheap) and handed out in chunks of at most `max_chunk_rows`
//! rows, in row order.
use std::sync::Arc;

use nalgebra::DMatrix;

use crate::{
    blocks::{BlockSource, OpenBlocks},
    constants::Block,
    stats_errors::StatsError,
};

/// An observation matrix kept in memory and streamed in chunks.
#[derive(Debug, Clone)]
pub struct InMemoryData {
    data: Arc<Block>,
    max_chunk_rows: usize,
}

impl InMemoryData {
    /// Wrap a matrix (rows = samples, columns = variables).
    ///
    /// A `max_chunk_rows` of zero is treated as one row per chunk.
    pub fn new(data: Block, max_chunk_rows: usize) -> Self {
        Self {
            data: Arc::new(data),
            max_chunk_rows: max_chunk_rows.max(1),
        }
    }

    /// Build the matrix from a list of rows.
    ///
    /// Return
    /// ----------
    /// * `Err(StatsError::MalformedInput)` if a row does not have the width of the first row
    ///   (`row` is the 0-based index of the offending row).
    pub fn from_rows(rows: &[Vec<f64>], max_chunk_rows: usize) -> Result<Self, StatsError> {
        let n_cols = rows.first().map_or(0, Vec::len);
        if let Some((row, bad)) = rows.iter().enumerate().find(|(_, r)| r.len() != n_cols) {
            return Err(StatsError::MalformedInput {
                row,
                expected: n_cols,
                found: bad.len(),
            });
        }

        let data = DMatrix::from_row_iterator(rows.len(), n_cols, rows.iter().flatten().copied());
        Ok(Self::new(data, max_chunk_rows))
    }

    /// Build a single-column dataset.
    pub fn from_column(values: &[f64], max_chunk_rows: usize) -> Self {
        Self::new(DMatrix::from_column_slice(values.len(), 1, values), max_chunk_rows)
    }

    pub fn data(&self) -> &Block {
        &self.data
    }

    pub fn max_chunk_rows(&self) -> usize {
        self.max_chunk_rows
    }
}

impl OpenBlocks for InMemoryData {
    type Source = MatrixBlocks;

    fn open(&self) -> Result<MatrixBlocks, StatsError> {
        Ok(MatrixBlocks {
            data: Arc::clone(&self.data),
            cursor: 0,
            max_chunk_rows: self.max_chunk_rows,
        })
    }
}

/// One streaming pass over an [`InMemoryData`].
#[derive(Debug)]
pub struct MatrixBlocks {
    data: Arc<Block>,
    cursor: usize,
    max_chunk_rows: usize,
}

impl BlockSource for MatrixBlocks {
    fn n_cols(&self) -> usize {
        self.data.ncols()
    }

    fn next_block(&mut self) -> Result<Block, StatsError> {
        let n = self.max_chunk_rows.min(self.data.nrows() - self.cursor);
        if n == 0 {
            return Ok(Block::zeros(0, self.data.ncols()));
        }
        let block = self.data.rows(self.cursor, n).into_owned();
        self.cursor += n;
        Ok(block)
    }
}
