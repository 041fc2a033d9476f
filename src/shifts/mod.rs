//! # Optimal periodic boundary shifts
//!
//! For every angular column, find the shift that moves the seam of the circle (where
//! `+180°` meets `-180°`) into the emptiest region of the column's distribution, so that
//! wrapping the data does not introduce spurious jumps into later linear statistics
//! (covariance, PCA).
//!
//! ## Algorithm
//! -----------------
//! 1. **Histogram pass** ([`histogram`]) – stream the data once and fill a 72-bin
//!    histogram (5° bins) per column.
//! 2. **Candidates** ([`candidates`]) – pick the sparsest bins with a greedy scan and
//!    derive 5 candidate barriers per bin, 1° apart (25 candidates with default params).
//! 3. **Jump pass** ([`jumps`]) – stream the data again, in order, and count for every
//!    candidate how often consecutive rows cross that barrier.
//! 4. **Selection** – per column, the candidate with the fewest jumps wins; ties go to the
//!    first candidate (lowest slot, then lowest value).
//! 5. **Correction** – the winning candidate is the barrier; the exported shift is the
//!    centre of the frame, opposite the barrier: `barrier + 180°` wrapped into
//!    `(-180°, 180°]`, returned in **radians**.
//!
//! Input data are **degrees**; every intermediate value of the search is in degrees.
//!
//! ## Chunk boundaries
//! -----------------
//! With [`JumpBoundary::CarryOver`](crate::params::JumpBoundary::CarryOver) the jump
//! counts do not depend on the chunk size. With
//! [`JumpBoundary::WithinChunk`](crate::params::JumpBoundary::WithinChunk) only pairs inside
//! a chunk are compared, which may undercount by at most `n_chunks - 1` per candidate.
//!
//! ## Example
//! -----------------
//! ```rust
//! use dihedral_stats::{ColumnStatistics, InMemoryData, StatsParams};
//!
//! // a column living around ±180° ...
//! let data = InMemoryData::from_column(&[178.0, -179.0, 176.5, -177.0, 179.5], 2);
//! let report = data.shift_report(&StatsParams::default()).unwrap();
//!
//! // ... is re-centred so that it no longer straddles the seam
//! assert_eq!(report.columns[0].min_jumps(), 0);
//! println!("{report:#}");
//! ```
use std::fmt;

use itertools::{izip, Itertools};
use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::{
    blocks::{accumulate, check_columns, BlockSource, OpenBlocks},
    constants::{Degree, Radian},
    conversion::wrap_deg,
    params::StatsParams,
    shifts::{
        candidates::{candidate_values, sparse_bins},
        histogram::HistogramPass,
        jumps::JumpPass,
    },
    stats_errors::StatsError,
};

pub mod candidates;
pub mod histogram;
pub mod jumps;

/// Centre of the frame whose seam sits at `barrier`: `barrier + 180°`, in `(-180°, 180°]`.
#[inline]
pub fn barrier_to_shift_deg(barrier: Degree) -> Degree {
    wrap_deg(barrier + 180.0)
}

/// Outcome of the shift search for one column.
///
/// `candidates` and `jumps` are index-aligned; `best` indexes both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnShift {
    /// Counts of the 72 histogram bins.
    pub histogram: Vec<u64>,
    /// Sparse bins selected by the greedy scan, in slot order.
    pub sparse_bins: Vec<usize>,
    /// Candidate barriers, in degrees.
    pub candidates: Vec<Degree>,
    /// Number of jumps for each candidate.
    pub jumps: Vec<u64>,
    /// Index of the winning candidate.
    pub best: usize,
    /// Winning barrier, in degrees.
    pub barrier: Degree,
    /// Exported shift, in radians.
    pub shift: Radian,
}

impl ColumnShift {
    pub fn min_jumps(&self) -> u64 {
        self.jumps[self.best]
    }

    pub fn shift_deg(&self) -> Degree {
        barrier_to_shift_deg(self.barrier)
    }
}

/// Per-column results of the shift search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftReport {
    pub n_rows: usize,
    pub columns: Vec<ColumnShift>,
}

impl ShiftReport {
    /// One shift per column, in radians.
    pub fn shifts(&self) -> Vec<Radian> {
        self.columns.iter().map(|c| c.shift).collect()
    }
}

impl fmt::Display for ShiftReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(
                f,
                "Periodic shifts ({} rows, {} columns)",
                self.n_rows,
                self.columns.len()
            )?;
            writeln!(
                f,
                "{:>6}  {:>12}  {:>12}  {:>12}  {:>9}",
                "column", "barrier[deg]", "shift[deg]", "shift[rad]", "min jumps"
            )?;
            for (j, column) in self.columns.iter().enumerate() {
                writeln!(
                    f,
                    "{:>6}  {:>12.1}  {:>12.1}  {:>12.6}  {:>9}",
                    j,
                    column.barrier,
                    column.shift_deg(),
                    column.shift,
                    column.min_jumps()
                )?;
            }
            Ok(())
        } else {
            write!(
                f,
                "ShiftReport(n_rows={}, n_cols={})",
                self.n_rows,
                self.columns.len()
            )
        }
    }
}

/// Run the full shift search (two streaming passes) over angular data in degrees.
///
/// Arguments
/// -----------------
/// * `data` – Angular data in **degrees**, opened twice (histogram pass, jump pass).
/// * `params` – Candidate layout, chunk boundary policy and parallelism.
///
/// Return
/// ----------
/// * A [`ShiftReport`] with one [`ColumnShift`] per column.
/// * `Err(StatsError::InvalidParameter)` if `params` breaks a builder rule.
/// * `Err(StatsError::DimensionMismatch)` if the second pass sees another column count.
/// * Any error of the underlying source.
///
/// An empty stream is not an error: every column then keeps its first candidate.
pub fn estimate_shifts<O>(data: &O, params: &StatsParams) -> Result<ShiftReport, StatsError>
where
    O: OpenBlocks + ?Sized,
{
    params.validate()?;

    let mut source = data.open()?;
    let n_cols = source.n_cols();
    debug!("shift search over {n_cols} column(s): histogram pass");
    let (n_rows, hists) = accumulate(&mut source, HistogramPass::new(n_cols, params.parallel))?;
    if n_rows == 0 {
        warn!("shift search on an empty stream, every column keeps its first candidate");
    }

    let sparse: Vec<Vec<usize>> = hists
        .iter()
        .map(|h| sparse_bins(h.counts(), params.n_sparse_bins))
        .collect();
    let candidates: Vec<Vec<Degree>> = sparse
        .iter()
        .map(|bins| candidate_values(bins, params.values_per_bin))
        .collect();
    for (j, (bins, values)) in sparse.iter().zip(&candidates).enumerate() {
        trace!("column {j}: sparse bins {bins:?}, candidates {values:?}");
    }

    let mut source = data.open()?;
    check_columns(n_cols, source.n_cols())?;
    debug!("shift search over {n_cols} column(s): jump pass");
    let jumps = accumulate(
        &mut source,
        JumpPass::new(candidates, params.jump_boundary, params.parallel),
    )?;

    let columns = izip!(hists, sparse, jumps)
        .enumerate()
        .map(|(j, (hist, sparse_bins, column_jumps))| {
            let best = column_jumps.jumps.iter().position_min().unwrap_or(0);
            let barrier = column_jumps.candidates[best];
            let shift = barrier_to_shift_deg(barrier).to_radians();
            trace!("column {j}: jumps {:?}", column_jumps.jumps);
            debug!(
                "column {j}: barrier {barrier:.1}°, shift {:.1}° ({} jump(s))",
                barrier_to_shift_deg(barrier),
                column_jumps.jumps[best]
            );
            ColumnShift {
                histogram: hist.counts().to_vec(),
                sparse_bins,
                candidates: column_jumps.candidates,
                jumps: column_jumps.jumps,
                best,
                barrier,
                shift,
            }
        })
        .collect();

    Ok(ShiftReport { n_rows, columns })
}

/// One shift per column, in radians. See [`estimate_shifts`].
pub fn angular_shifts<O>(data: &O, params: &StatsParams) -> Result<Vec<Radian>, StatsError>
where
    O: OpenBlocks + ?Sized,
{
    Ok(estimate_shifts(data, params)?.shifts())
}
