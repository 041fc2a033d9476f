//! # Circular statistics
//!
//! Means and standard deviations of angular columns, correct under wraparound.
//!
//! A plain arithmetic mean of `{179°, -179°}` is `0°`, the opposite side of the circle.
//! The circular mean instead averages the unit vectors `(cos θ, sin θ)` and resolves the
//! mean direction with `atan2`, giving `180°` for that example.
//!
//! Units
//! -----------------
//! * Input blocks are in **degrees** (as read from data files).
//! * Means, sigmas and the distance helper work in **radians**.
use log::debug;

use crate::{
    blocks::{accumulate, check_columns, for_each_column, BlockAccumulator, BlockSource, OpenBlocks},
    constants::{Block, Radian, DPI},
    conversion::deg2rad_inplace,
    moments::{Moments, Residual, SigmaAccumulator},
    params::StatsParams,
    stats_errors::StatsError,
};

/// Wrapped difference of two angles (radians).
///
/// Returns `|θ1 - θ2|` when it does not exceed π, and `|θ1 - θ2| - 2π` otherwise.
/// For inputs in `[-π, π]` the result is the signed residual measured the short way around
/// the circle: it is **negative** when the plain difference exceeds π, so callers needing a
/// magnitude must take `abs()` themselves.
pub fn circular_distance(theta1: Radian, theta2: Radian) -> Radian {
    let abs_diff = (theta1 - theta2).abs();
    if abs_diff <= std::f64::consts::PI {
        abs_diff
    } else {
        abs_diff - DPI
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct SinCos {
    sin: f64,
    cos: f64,
}

/// Running per-column sums of `sin θ` and `cos θ`.
pub struct CircularMeans {
    sums: Vec<SinCos>,
    n_rows: usize,
    parallel: bool,
}

impl CircularMeans {
    pub fn new(n_cols: usize, parallel: bool) -> Self {
        Self {
            sums: vec![SinCos::default(); n_cols],
            n_rows: 0,
            parallel,
        }
    }
}

impl BlockAccumulator for CircularMeans {
    type Output = Moments;

    fn ingest(&mut self, mut block: Block) -> Result<(), StatsError> {
        deg2rad_inplace(&mut block);
        self.n_rows += block.nrows();
        for_each_column(&block, &mut self.sums, self.parallel, |column, acc| {
            for theta in column {
                let (sin, cos) = theta.sin_cos();
                acc.sin += sin;
                acc.cos += cos;
            }
        });
        Ok(())
    }

    fn finalize(self) -> Result<Moments, StatsError> {
        if self.n_rows == 0 {
            return Err(StatsError::InsufficientData {
                statistic: "circular means",
                n_rows: 0,
                required: 1,
            });
        }
        let n = self.n_rows as f64;
        Ok(Moments {
            n_rows: self.n_rows,
            n_cols: self.sums.len(),
            values: self
                .sums
                .iter()
                .map(|sc| (sc.sin / n).atan2(sc.cos / n))
                .collect(),
        })
    }
}

/// Circular mean direction of every column.
///
/// Arguments
/// -----------------
/// * `data` – Angular data in **degrees**.
/// * `params` – Only `parallel` is used.
///
/// Return
/// ----------
/// * [`Moments`] whose values are the mean directions in **radians**, in `[-π, π]`.
/// * `Err(StatsError::InsufficientData)` if the stream holds no row.
///
/// See also
/// ------------
/// * [`circular_sigmas`] – Spread around these means.
pub fn circular_means<O>(data: &O, params: &StatsParams) -> Result<Moments, StatsError>
where
    O: OpenBlocks + ?Sized,
{
    let mut source = data.open()?;
    let n_cols = source.n_cols();
    debug!("circular means over {n_cols} column(s)");
    accumulate(&mut source, CircularMeans::new(n_cols, params.parallel))
}

/// Circular standard deviation of every column, given the circular means.
///
/// Each value is converted to radians, the column mean is subtracted and the residual is
/// folded into `(-π, π]` before squaring; the result is `sqrt(Σr² / (N - 1))`.
///
/// Arguments
/// -----------------
/// * `data` – Angular data in **degrees**.
/// * `means` – One mean per column, in **radians** (see [`circular_means`]).
/// * `params` – Only `parallel` is used.
///
/// Return
/// ----------
/// * One sigma per column, in **radians**.
/// * `Err(StatsError::DimensionMismatch)` if `means.len()` differs from the column count.
/// * `Err(StatsError::InsufficientData)` if the stream holds fewer than two rows.
pub fn circular_sigmas<O>(
    data: &O,
    means: &[Radian],
    params: &StatsParams,
) -> Result<Vec<Radian>, StatsError>
where
    O: OpenBlocks + ?Sized,
{
    let mut source = data.open()?;
    check_columns(source.n_cols(), means.len())?;
    debug!("circular sigmas over {} column(s)", means.len());
    accumulate(
        &mut source,
        SigmaAccumulator::new(means.to_vec(), Residual::Periodic, params.parallel),
    )
}
