//! # Column statistics entry points
//!
//! [`ColumnStatistics`] is implemented for every [`OpenBlocks`] dataset, so the same calls
//! work on a [`DataFile`](crate::blocks::data_file::DataFile) streamed from disk and on an
//! [`InMemoryData`](crate::blocks::in_memory::InMemoryData) matrix.
//!
//! Every method opens its own stream: sigmas re-read the data after the means were computed,
//! and the shift search reads it twice.
//!
//! Units
//! -----------------
//! | Method             | Input data | Means argument | Output   |
//! |--------------------|------------|----------------|----------|
//! | `linear_means`     | any        |                | same     |
//! | `linear_sigmas`    | any        | same as data   | same     |
//! | `circular_means`   | degrees    |                | radians  |
//! | `circular_sigmas`  | degrees    | radians        | radians  |
//! | `angular_shifts`   | degrees    |                | radians  |
use crate::{
    blocks::OpenBlocks,
    constants::Radian,
    moments::{circular, linear, Moments},
    params::StatsParams,
    shifts::{estimate_shifts, ShiftReport},
    stats_errors::StatsError,
};

pub trait ColumnStatistics {
    /// Arithmetic mean of every column.
    ///
    /// Return
    /// ----------
    /// * `Err(StatsError::InsufficientData)` if the stream holds no row.
    fn linear_means(&self, params: &StatsParams) -> Result<Moments, StatsError>;

    /// Sample standard deviation `sqrt(Σ(x - mean)² / (N - 1))` of every column.
    ///
    /// Return
    /// ----------
    /// * `Err(StatsError::DimensionMismatch)` if `means.len()` is not the column count.
    /// * `Err(StatsError::InsufficientData)` if the stream holds fewer than two rows.
    fn linear_sigmas(&self, means: &[f64], params: &StatsParams) -> Result<Vec<f64>, StatsError>;

    /// Circular mean direction of every column (degrees in, radians out).
    fn circular_means(&self, params: &StatsParams) -> Result<Moments, StatsError>;

    /// Circular standard deviation of every column around `means` (radians).
    fn circular_sigmas(
        &self,
        means: &[Radian],
        params: &StatsParams,
    ) -> Result<Vec<Radian>, StatsError>;

    /// Full outcome of the shift search: histograms, candidates, jump counts and shifts.
    fn shift_report(&self, params: &StatsParams) -> Result<ShiftReport, StatsError>;

    /// Optimal recentring shift of every angular column, in radians.
    ///
    /// See also
    /// ------------
    /// * [`ColumnStatistics::shift_report`] – Same search, with every intermediate result.
    fn angular_shifts(&self, params: &StatsParams) -> Result<Vec<Radian>, StatsError> {
        Ok(self.shift_report(params)?.shifts())
    }
}

impl<T> ColumnStatistics for T
where
    T: OpenBlocks + ?Sized,
{
    fn linear_means(&self, params: &StatsParams) -> Result<Moments, StatsError> {
        linear::linear_means(self, params)
    }

    fn linear_sigmas(&self, means: &[f64], params: &StatsParams) -> Result<Vec<f64>, StatsError> {
        linear::linear_sigmas(self, means, params)
    }

    fn circular_means(&self, params: &StatsParams) -> Result<Moments, StatsError> {
        circular::circular_means(self, params)
    }

    fn circular_sigmas(
        &self,
        means: &[Radian],
        params: &StatsParams,
    ) -> Result<Vec<Radian>, StatsError> {
        circular::circular_sigmas(self, means, params)
    }

    fn shift_report(&self, params: &StatsParams) -> Result<ShiftReport, StatsError> {
        estimate_shifts(self, params)
    }
}

#[cfg(test)]
mod statistics_test {
    use approx::assert_relative_eq;

    use super::*;
    use crate::blocks::in_memory::InMemoryData;

    #[test]
    fn test_dispatch_to_module_functions() {
        let data = InMemoryData::from_rows(
            &[vec![1.0, 170.0], vec![2.0, -170.0], vec![3.0, 180.0]],
            2,
        )
        .unwrap();
        let params = StatsParams::default();

        let means = data.linear_means(&params).unwrap();
        assert_eq!(means.values[0], 2.0);
        let sigmas = data.linear_sigmas(&means.values, &params).unwrap();
        assert_relative_eq!(sigmas[0], 1.0);

        let circ = data.circular_means(&params).unwrap();
        assert_relative_eq!(circ.values[1].abs(), std::f64::consts::PI, epsilon = 1e-12);

        let shifts = data.angular_shifts(&params).unwrap();
        assert_eq!(shifts, data.shift_report(&params).unwrap().shifts());
        assert_eq!(shifts.len(), 2);
    }

    #[test]
    fn test_unsized_receiver() {
        fn shifts_of(data: &dyn ColumnStatistics) -> Vec<Radian> {
            data.angular_shifts(&StatsParams::default()).unwrap()
        }
        let data = InMemoryData::from_column(&[10.0, 20.0, 30.0], 2);
        assert_eq!(shifts_of(&data).len(), 1);
    }
}
