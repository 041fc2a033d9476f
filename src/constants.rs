//! # Constants and type definitions
//!
//! This module centralizes the **angular constants**, the **shift-search geometry**
//! (histogram layout, candidate counts) and the **type aliases** used throughout the crate.
//!
//! ## Overview
//!
//! - Unit conversions (degrees ↔ radians)
//! - Histogram layout used by the column shift estimator (72 bins of 5° over [-180°, 180°))
//! - Type aliases making the angular unit of every value explicit
//!
//! Angles read from data files are always **degrees**; every finalized circular statistic
//! (means, sigmas, shifts) is returned in **radians**.

use nalgebra::DMatrix;

// -------------------------------------------------------------------------------------------------
// Angular constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, the period of an angle expressed in radians
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Period of an angle expressed in degrees
pub const PERIOD_DEG: f64 = 360.0;

/// Half period in degrees, i.e. the position of the seam of a centred circle
pub const HALF_PERIOD_DEG: f64 = 180.0;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Radians → degrees
pub const DEGRAD: f64 = 180.0 / std::f64::consts::PI;

// -------------------------------------------------------------------------------------------------
// Shift search geometry
// -------------------------------------------------------------------------------------------------

/// Number of histogram bins covering [-180°, 180°)
pub const N_BINS: usize = 72;

/// Width of one histogram bin, in degrees
pub const BIN_WIDTH_DEG: f64 = 5.0;

/// Lower edge of the first histogram bin, in degrees
pub const HIST_MIN_DEG: f64 = -180.0;

/// Default number of sparse bins kept as shift candidates
pub const N_SPARSE_BINS: usize = 5;

/// Default number of candidate values per sparse bin (1° apart)
pub const N_VALUES_PER_BIN: usize = 5;

/// Spacing between two candidates of the same bin, in degrees
pub const CANDIDATE_STEP_DEG: f64 = 1.0;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;

/// One chunk of the observation matrix (rows = samples, columns = variables).
///
/// Stored column-major, so each column is a contiguous slice of `block.as_slice()`.
pub type Block = DMatrix<f64>;
