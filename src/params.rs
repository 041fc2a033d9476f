//! # Statistics parameters
//!
//! [`StatsParams`] and its builder control how the streaming passes are executed
//! (parallel or sequential column processing) and how the column shift estimator
//! searches for its barrier (number of sparse bins, candidates per bin, and the
//! treatment of jumps that straddle two consecutive chunks).
//!
//! ## Example
//!
//! ```rust
//! use dihedral_stats::params::{JumpBoundary, StatsParams};
//!
//! let params = StatsParams::builder()
//!     .parallel(false)
//!     .jump_boundary(JumpBoundary::WithinChunk)
//!     .build()
//!     .unwrap();
//!
//! println!("{params:#}");
//! ```
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    constants::{BIN_WIDTH_DEG, CANDIDATE_STEP_DEG, N_BINS, N_SPARSE_BINS, N_VALUES_PER_BIN},
    stats_errors::StatsError,
};

/// How the jump counter treats the transition between the last row of a chunk
/// and the first row of the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JumpBoundary {
    /// Only pairs of rows inside the same chunk are compared. A jump straddling two
    /// chunks is not counted, so the jump counts may be lower than on a single chunk
    /// by at most `n_chunks - 1`, and shift quality degrades slightly with small chunks.
    WithinChunk,
    /// The last value of every column is carried over to the next chunk; jump counts
    /// do not depend on the chunking.
    CarryOver,
}

impl fmt::Display for JumpBoundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JumpBoundary::WithinChunk => write!(f, "within-chunk"),
            JumpBoundary::CarryOver => write!(f, "carry-over"),
        }
    }
}

/// Configuration of the statistics passes.
///
/// Fields
/// -----------------
/// * `parallel` – Process the columns of each chunk with `rayon` (results are identical
///   to the sequential run).
/// * `jump_boundary` – Chunk boundary policy of the jump counter, see [`JumpBoundary`].
/// * `n_sparse_bins` – Number of sparsest histogram bins turned into shift candidates.
/// * `values_per_bin` – Number of candidates per sparse bin, 1° apart from the lower edge.
///
/// Validation rules (see [`StatsParamsBuilder::build`])
/// -----------------
/// * `1 ≤ n_sparse_bins ≤ 72`
/// * `1 ≤ values_per_bin ≤ 5` (candidates stay inside their 5° bin)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsParams {
    pub parallel: bool,
    pub jump_boundary: JumpBoundary,
    pub n_sparse_bins: usize,
    pub values_per_bin: usize,
}

impl StatsParams {
    /// Construct a new [`StatsParams`] with the default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new [`StatsParamsBuilder`] initialized with the default values.
    pub fn builder() -> StatsParamsBuilder {
        StatsParamsBuilder::new()
    }

    /// Total number of shift candidates evaluated per column.
    pub fn n_candidates(&self) -> usize {
        self.n_sparse_bins.saturating_mul(self.values_per_bin)
    }

    /// Check the validation rules of the builder.
    ///
    /// Fields are public, so consumers of a hand-built [`StatsParams`] call this before use.
    ///
    /// Return
    /// ----------
    /// * `Err(StatsError::InvalidParameter)` naming the first violated rule.
    pub fn validate(&self) -> Result<(), StatsError> {
        if self.n_sparse_bins == 0 || self.n_sparse_bins > N_BINS {
            return Err(StatsError::InvalidParameter(format!(
                "n_sparse_bins must be in [1, {N_BINS}]"
            )));
        }

        let max_values = (BIN_WIDTH_DEG / CANDIDATE_STEP_DEG) as usize;
        if self.values_per_bin == 0 || self.values_per_bin > max_values {
            return Err(StatsError::InvalidParameter(format!(
                "values_per_bin must be in [1, {max_values}]"
            )));
        }

        Ok(())
    }
}

impl Default for StatsParams {
    fn default() -> Self {
        StatsParams {
            parallel: true,
            jump_boundary: JumpBoundary::CarryOver,
            n_sparse_bins: N_SPARSE_BINS,
            values_per_bin: N_VALUES_PER_BIN,
        }
    }
}

/// Builder for [`StatsParams`], with validation.
#[derive(Debug, Clone, Default)]
pub struct StatsParamsBuilder {
    params: StatsParams,
}

impl StatsParamsBuilder {
    pub fn new() -> Self {
        Self {
            params: StatsParams::default(),
        }
    }

    pub fn parallel(mut self, v: bool) -> Self {
        self.params.parallel = v;
        self
    }

    pub fn jump_boundary(mut self, v: JumpBoundary) -> Self {
        self.params.jump_boundary = v;
        self
    }

    pub fn n_sparse_bins(mut self, v: usize) -> Self {
        self.params.n_sparse_bins = v;
        self
    }

    pub fn values_per_bin(mut self, v: usize) -> Self {
        self.params.values_per_bin = v;
        self
    }

    /// Finalize the builder and produce a [`StatsParams`] instance.
    ///
    /// Return
    /// ----------
    /// * `Ok(StatsParams)` if all values are valid.
    /// * `Err(StatsError::InvalidParameter)` naming the first violated rule.
    pub fn build(self) -> Result<StatsParams, StatsError> {
        self.params.validate()?;
        Ok(self.params)
    }
}

impl fmt::Display for StatsParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            const PARAM_COL: usize = 32;
            writeln!(f, "Column Statistics Parameters")?;
            writeln!(f, "----------------------------")?;

            macro_rules! line {
                ($fmt:expr, $val:expr, $comment:expr) => {{
                    let s = format!($fmt, $val);
                    let pad = if s.len() < PARAM_COL {
                        " ".repeat(PARAM_COL - s.len())
                    } else {
                        " ".to_string()
                    };
                    writeln!(f, "  {}{}# {}", s, pad, $comment)
                }};
            }

            line!(
                "parallel       = {}",
                self.parallel,
                "Process the columns of a chunk in parallel"
            )?;
            line!(
                "jump_boundary  = {}",
                self.jump_boundary,
                "Jumps across chunk boundaries"
            )?;
            line!(
                "n_sparse_bins  = {}",
                self.n_sparse_bins,
                "Sparsest bins kept as candidates"
            )?;
            line!(
                "values_per_bin = {}",
                self.values_per_bin,
                "Candidates per sparse bin (1° apart)"
            )?;
            Ok(())
        } else {
            write!(
                f,
                "StatsParams(parallel={}, jump_boundary={}, candidates={}x{})",
                self.parallel, self.jump_boundary, self.n_sparse_bins, self.values_per_bin
            )
        }
    }
}

#[cfg(test)]
mod params_test {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = StatsParams::default();
        assert!(params.parallel);
        assert_eq!(params.jump_boundary, JumpBoundary::CarryOver);
        assert_eq!(params.n_candidates(), 25);
        assert_eq!(StatsParams::builder().build().unwrap(), params);
    }

    #[test]
    fn test_builder_validation() {
        assert_eq!(
            StatsParams::builder().n_sparse_bins(0).build(),
            Err(StatsError::InvalidParameter(
                "n_sparse_bins must be in [1, 72]".into()
            ))
        );
        assert!(StatsParams::builder().n_sparse_bins(73).build().is_err());
        assert_eq!(
            StatsParams::builder().values_per_bin(6).build(),
            Err(StatsError::InvalidParameter(
                "values_per_bin must be in [1, 5]".into()
            ))
        );

        let params = StatsParams::builder()
            .n_sparse_bins(3)
            .values_per_bin(2)
            .parallel(false)
            .build()
            .unwrap();
        assert_eq!(params.n_candidates(), 6);
    }

    #[test]
    fn test_validate_hand_built_params() {
        let huge = StatsParams {
            n_sparse_bins: usize::MAX,
            values_per_bin: usize::MAX,
            ..StatsParams::default()
        };
        assert_eq!(huge.n_candidates(), usize::MAX);
        assert_eq!(
            huge.validate(),
            Err(StatsError::InvalidParameter(
                "n_sparse_bins must be in [1, 72]".into()
            ))
        );
        assert_eq!(StatsParams::default().validate(), Ok(()));
    }

    #[test]
    fn test_display() {
        let params = StatsParams::default();
        assert_eq!(
            format!("{params}"),
            "StatsParams(parallel=true, jump_boundary=carry-over, candidates=5x5)"
        );
        let table = format!("{params:#}");
        assert!(table.starts_with("Column Statistics Parameters\n"));
        assert!(table.contains("jump_boundary  = carry-over"));
    }
}
