//! Means and standard deviations of ordinary (non-periodic) columns.
use log::debug;

use crate::{
    blocks::{accumulate, check_columns, for_each_column, BlockAccumulator, BlockSource, OpenBlocks},
    constants::Block,
    moments::{Moments, Residual, SigmaAccumulator},
    params::StatsParams,
    stats_errors::StatsError,
};

/// Running per-column sums.
pub struct LinearMeans {
    sums: Vec<f64>,
    n_rows: usize,
    parallel: bool,
}

impl LinearMeans {
    pub fn new(n_cols: usize, parallel: bool) -> Self {
        Self {
            sums: vec![0.0; n_cols],
            n_rows: 0,
            parallel,
        }
    }
}

impl BlockAccumulator for LinearMeans {
    type Output = Moments;

    fn ingest(&mut self, block: Block) -> Result<(), StatsError> {
        self.n_rows += block.nrows();
        for_each_column(&block, &mut self.sums, self.parallel, |column, sum| {
            *sum += column.iter().sum::<f64>();
        });
        Ok(())
    }

    fn finalize(self) -> Result<Moments, StatsError> {
        if self.n_rows == 0 {
            return Err(StatsError::InsufficientData {
                statistic: "linear means",
                n_rows: 0,
                required: 1,
            });
        }
        let n = self.n_rows as f64;
        Ok(Moments {
            n_rows: self.n_rows,
            n_cols: self.sums.len(),
            values: self.sums.into_iter().map(|s| s / n).collect(),
        })
    }
}

/// Arithmetic mean of every column of the stream.
///
/// Return
/// ----------
/// * [`Moments`] with the total row count, the column count and one mean per column.
/// * `Err(StatsError::InsufficientData)` if the stream holds no row.
pub fn linear_means<O>(data: &O, params: &StatsParams) -> Result<Moments, StatsError>
where
    O: OpenBlocks + ?Sized,
{
    let mut source = data.open()?;
    let n_cols = source.n_cols();
    debug!("linear means over {n_cols} column(s)");
    accumulate(&mut source, LinearMeans::new(n_cols, params.parallel))
}

/// Sample standard deviation (Bessel-corrected) of every column, given the column means.
///
/// Return
/// ----------
/// * One sigma per column, `sqrt(Σ(x - mean)² / (N - 1))`.
/// * `Err(StatsError::DimensionMismatch)` if `means.len()` differs from the column count,
///   before any block is read.
/// * `Err(StatsError::InsufficientData)` if the stream holds fewer than two rows.
pub fn linear_sigmas<O>(data: &O, means: &[f64], params: &StatsParams) -> Result<Vec<f64>, StatsError>
where
    O: OpenBlocks + ?Sized,
{
    let mut source = data.open()?;
    check_columns(source.n_cols(), means.len())?;
    debug!("linear sigmas over {} column(s)", means.len());
    accumulate(
        &mut source,
        SigmaAccumulator::new(means.to_vec(), Residual::Linear, params.parallel),
    )
}
