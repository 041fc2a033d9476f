//! # Streaming first and second moments
//!
//! Per-column means and standard deviations computed block by block, for ordinary
//! ([`linear`]) and angular ([`circular`]) columns.
//!
//! Both flavours share the sigma pass implemented here by [`SigmaAccumulator`]: the
//! supplied means are subtracted from every block (plainly, or through the periodic
//! column shift for angles), squared residuals are summed per column, and the
//! Bessel-corrected standard deviation `sqrt(Σr² / (N-1))` is returned.
use serde::{Deserialize, Serialize};

use crate::{
    blocks::{for_each_column, BlockAccumulator},
    constants::Block,
    conversion::{deg2rad_inplace, periodic_shift_columns_rad_inplace, shift_columns_inplace},
    stats_errors::StatsError,
};

pub mod circular;
pub mod linear;

/// Result of a means pass: number of observations, number of columns, one value per column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Moments {
    pub n_rows: usize,
    pub n_cols: usize,
    pub values: Vec<f64>,
}

/// How the residual of a value with respect to its column mean is formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Residual {
    /// `x - mean`, same unit as the data.
    Linear,
    /// Data in degrees, means in radians: the block is converted to radians and
    /// `x - mean` is folded into `(-π, π]`.
    Periodic,
}

impl Residual {
    fn statistic(self) -> &'static str {
        match self {
            Residual::Linear => "linear sigmas",
            Residual::Periodic => "circular sigmas",
        }
    }
}

/// Sum of squared residuals per column, finalized into sample standard deviations.
pub(crate) struct SigmaAccumulator {
    means: Vec<f64>,
    sum_sq: Vec<f64>,
    n_rows: usize,
    residual: Residual,
    parallel: bool,
}

impl SigmaAccumulator {
    pub(crate) fn new(means: Vec<f64>, residual: Residual, parallel: bool) -> Self {
        let n_cols = means.len();
        Self {
            means,
            sum_sq: vec![0.0; n_cols],
            n_rows: 0,
            residual,
            parallel,
        }
    }
}

impl BlockAccumulator for SigmaAccumulator {
    type Output = Vec<f64>;

    fn ingest(&mut self, mut block: Block) -> Result<(), StatsError> {
        match self.residual {
            Residual::Linear => shift_columns_inplace(&mut block, &self.means)?,
            Residual::Periodic => {
                deg2rad_inplace(&mut block);
                periodic_shift_columns_rad_inplace(&mut block, &self.means)?;
            }
        }

        self.n_rows += block.nrows();
        for_each_column(&block, &mut self.sum_sq, self.parallel, |column, sum_sq| {
            *sum_sq += column.iter().map(|r| r * r).sum::<f64>();
        });
        Ok(())
    }

    fn finalize(self) -> Result<Vec<f64>, StatsError> {
        if self.n_rows <= 1 {
            return Err(StatsError::InsufficientData {
                statistic: self.residual.statistic(),
                n_rows: self.n_rows,
                required: 2,
            });
        }
        let dof = (self.n_rows - 1) as f64;
        Ok(self.sum_sq.iter().map(|s| (s / dof).sqrt()).collect())
    }
}
