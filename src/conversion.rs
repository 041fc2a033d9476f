//! # Angular unit conversion and column transforms
//!
//! Elementwise degrees ↔ radians conversion for blocks and vectors, periodic
//! normalization, and the in-place column transforms (shift, scale, periodic shift)
//! used by the sigma passes and by downstream centering/scaling.
//!
//! All functions work **in place** and are pure apart from the mutation of their
//! argument. Column transforms split a block into disjoint column slices and process
//! them with `rayon`.
use rayon::prelude::*;

use crate::{
    blocks::check_columns,
    constants::{Block, Degree, Radian, DEGRAD, DPI, PERIOD_DEG, RADEG},
    stats_errors::StatsError,
};

/// Convert every entry of a block from degrees to radians.
pub fn deg2rad_inplace(m: &mut Block) {
    m.scale_mut(RADEG);
}

/// Convert every entry of a block from radians to degrees.
pub fn rad2deg_inplace(m: &mut Block) {
    m.scale_mut(DEGRAD);
}

/// Convert a vector of angles from degrees to radians.
pub fn deg2rad_vec_inplace(v: &mut [f64]) {
    v.iter_mut().for_each(|x| *x *= RADEG);
}

/// Convert a vector of angles from radians to degrees.
pub fn rad2deg_vec_inplace(v: &mut [f64]) {
    v.iter_mut().for_each(|x| *x *= DEGRAD);
}

/// Fold a value into the half-open interval `(-period/2, period/2]`.
///
/// Arguments
/// -----------------
/// * `var`: the value to fold (any magnitude, any sign).
/// * `period`: the periodicity of the variable (e.g. `2π` for radians, `360` for degrees).
///
/// Return
/// ----------
/// * The representative of `var` modulo `period` lying in `(-period/2, period/2]`.
///
/// See also
/// ------------
/// * [`periodic_shift_columns_inplace`] – Applies this folding after a column shift.
#[inline]
pub fn periodic_normalized(var: f64, period: f64) -> f64 {
    let half = 0.5 * period;
    half - (half - var).rem_euclid(period)
}

/// Wrap an angle in degrees into `(-180°, 180°]`.
#[inline]
pub fn wrap_deg(theta: Degree) -> Degree {
    periodic_normalized(theta, PERIOD_DEG)
}

/// Apply `f(value, j)` to every entry of column `j`, columns in parallel.
fn map_columns_inplace<F>(m: &mut Block, f: F)
where
    F: Fn(f64, usize) -> f64 + Sync + Send,
{
    let n_rows = m.nrows();
    if n_rows == 0 {
        return;
    }
    m.as_mut_slice()
        .par_chunks_exact_mut(n_rows)
        .enumerate()
        .for_each(|(j, column)| {
            for x in column.iter_mut() {
                *x = f(*x, j);
            }
        });
}

/// Subtract `shifts[j]` from every entry of column `j`.
///
/// Return
/// ----------
/// * `Err(StatsError::DimensionMismatch)` if `shifts.len() != m.ncols()`.
pub fn shift_columns_inplace(m: &mut Block, shifts: &[f64]) -> Result<(), StatsError> {
    check_columns(m.ncols(), shifts.len())?;
    map_columns_inplace(m, |x, j| x - shifts[j]);
    Ok(())
}

/// Multiply every entry of column `j` by `factors[j]`.
///
/// Typically used with `1/σ_j` to scale centred data to unit variance.
///
/// Return
/// ----------
/// * `Err(StatsError::DimensionMismatch)` if `factors.len() != m.ncols()`.
pub fn scale_columns_inplace(m: &mut Block, factors: &[f64]) -> Result<(), StatsError> {
    check_columns(m.ncols(), factors.len())?;
    map_columns_inplace(m, |x, j| x * factors[j]);
    Ok(())
}

/// Subtract `shifts[j]` from column `j` and fold the result into `(-p_j/2, p_j/2]`.
///
/// Arguments
/// -----------------
/// * `m`: the block to transform in place.
/// * `shifts`: one shift per column, in the same unit as the block.
/// * `periods`: one periodicity per column, in the same unit as the block.
///
/// Return
/// ----------
/// * `Err(StatsError::DimensionMismatch)` if either vector length differs from `m.ncols()`.
///
/// See also
/// ------------
/// * [`periodic_shift_columns_rad_inplace`] – Same with a `2π` period on every column.
/// * [`periodic_normalized`] – The folding applied to every shifted value.
pub fn periodic_shift_columns_inplace(
    m: &mut Block,
    shifts: &[f64],
    periods: &[f64],
) -> Result<(), StatsError> {
    check_columns(m.ncols(), shifts.len())?;
    check_columns(m.ncols(), periods.len())?;
    map_columns_inplace(m, |x, j| periodic_normalized(x - shifts[j], periods[j]));
    Ok(())
}

/// Periodic column shift for a block in radians (period `2π` on every column).
pub fn periodic_shift_columns_rad_inplace(
    m: &mut Block,
    shifts: &[Radian],
) -> Result<(), StatsError> {
    let periods = vec![DPI; shifts.len()];
    periodic_shift_columns_inplace(m, shifts, &periods)
}
