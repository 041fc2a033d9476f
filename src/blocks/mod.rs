//! # Block sources and streaming accumulation
//!
//! Every statistic of this crate is a **fold over a stream of blocks**: a block source
//! yields successive chunks of the observation matrix, an accumulator ingests each chunk
//! and is finalized once the source is exhausted.
//!
//! Traits
//! -----------------
//! * [`BlockSource`] – Pull interface: column count + `next_block`, an **empty block**
//!   (zero rows) signals the end of the stream.
//! * [`OpenBlocks`] – Something that can open a fresh [`BlockSource`]. Each statistics pass
//!   opens its own source, so multi-pass statistics (sigmas after means, the two passes of
//!   the shift estimator) never share a half-consumed stream.
//! * [`BlockAccumulator`] – `ingest(block)` once per chunk, `finalize(self)` once at the end.
//!
//! Sources
//! -----------------
//! * [`data_file::DataFile`] – Chunked reader for delimited text files.
//! * [`in_memory::InMemoryData`] – Chunked view over an in-memory matrix.
//!
//! Blocks are `nalgebra::DMatrix<f64>`, stored column-major: column `j` of a block with
//! `n` rows is `block.as_slice()[j*n..(j+1)*n]`. [`for_each_column`] hands these disjoint
//! column slices, together with the matching per-column accumulator state, to `rayon`
//! workers; each worker owns its columns exclusively so no locking is involved.
use log::{debug, trace};
use rayon::prelude::*;

use crate::{constants::Block, stats_errors::StatsError};

pub mod data_file;
pub mod in_memory;

/// Synchronous pull interface over a chunked observation matrix.
pub trait BlockSource {
    /// Number of columns of every block of the stream.
    fn n_cols(&self) -> usize;

    /// Next chunk of rows, in stream order. A block with zero rows marks the end of the stream.
    fn next_block(&mut self) -> Result<Block, StatsError>;
}

/// A dataset that can be streamed several times, each time through a fresh [`BlockSource`].
pub trait OpenBlocks {
    type Source: BlockSource;

    fn open(&self) -> Result<Self::Source, StatsError>;
}

/// Streaming statistic: folded over the blocks of one pass, finalized exactly once.
pub trait BlockAccumulator {
    type Output;

    /// Fold one non-empty block into the running state.
    fn ingest(&mut self, block: Block) -> Result<(), StatsError>;

    /// Turn the running state into the statistic. Consumes the accumulator.
    fn finalize(self) -> Result<Self::Output, StatsError>;
}

/// Drive an accumulator over every block of a source until exhaustion.
///
/// Arguments
/// -----------------
/// * `source` – The opened block source, consumed in stream order.
/// * `acc` – A fresh accumulator sized for `source.n_cols()` columns.
///
/// Return
/// ----------
/// * The finalized statistic.
/// * `Err(StatsError::MalformedInput)` if a block does not have `source.n_cols()` columns;
///   `row` is the index (in the stream) of the first row of the offending block.
/// * Any error raised by the source or by the accumulator. The accumulator is dropped,
///   partial results are never returned.
pub fn accumulate<S, A>(source: &mut S, mut acc: A) -> Result<A::Output, StatsError>
where
    S: BlockSource + ?Sized,
    A: BlockAccumulator,
{
    let n_cols = source.n_cols();
    let mut n_rows = 0;
    let mut n_blocks = 0;

    loop {
        let block = source.next_block()?;
        if block.nrows() == 0 {
            break;
        }
        if block.ncols() != n_cols {
            return Err(StatsError::MalformedInput {
                row: n_rows,
                expected: n_cols,
                found: block.ncols(),
            });
        }

        n_blocks += 1;
        n_rows += block.nrows();
        trace!("block #{n_blocks}: {} rows ({n_rows} so far)", block.nrows());

        acc.ingest(block)?;
    }

    debug!("stream exhausted after {n_blocks} block(s), {n_rows} row(s), {n_cols} column(s)");
    acc.finalize()
}

/// Check a caller-supplied per-column vector against the stream's column count.
pub(crate) fn check_columns(n_cols: usize, found: usize) -> Result<(), StatsError> {
    if n_cols != found {
        return Err(StatsError::DimensionMismatch {
            expected: n_cols,
            found,
        });
    }
    Ok(())
}

/// Call `f(column_values, column_state)` for every column of `block`.
///
/// `states` must hold exactly one state per column (`states.len() == block.ncols()`).
/// With `parallel`, columns are distributed over the `rayon` pool; each state is borrowed
/// mutably by a single worker.
pub(crate) fn for_each_column<S, F>(block: &Block, states: &mut [S], parallel: bool, f: F)
where
    S: Send,
    F: Fn(&[f64], &mut S) + Sync + Send,
{
    debug_assert_eq!(block.ncols(), states.len(), "one state per column");

    let n_rows = block.nrows();
    if n_rows == 0 {
        return;
    }

    if parallel {
        block
            .as_slice()
            .par_chunks_exact(n_rows)
            .zip(states.par_iter_mut())
            .for_each(|(column, state)| f(column, state));
    } else {
        block
            .as_slice()
            .chunks_exact(n_rows)
            .zip(states.iter_mut())
            .for_each(|(column, state)| f(column, state));
    }
}
