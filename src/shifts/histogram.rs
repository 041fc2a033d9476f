//! Coarse angular histograms (72 bins of 5° over [-180°, 180°)), first pass of the
//! shift estimator.
use crate::{
    blocks::{for_each_column, BlockAccumulator},
    constants::{Block, Degree, BIN_WIDTH_DEG, HIST_MIN_DEG, N_BINS},
    stats_errors::StatsError,
};

/// Lower edge of bin `i`, in degrees.
#[inline]
pub fn lower_edge(i_bin: usize) -> Degree {
    HIST_MIN_DEG + i_bin as f64 * BIN_WIDTH_DEG
}

/// Upper edge of bin `i`, in degrees.
#[inline]
pub fn upper_edge(i_bin: usize) -> Degree {
    HIST_MIN_DEG + (i_bin + 1) as f64 * BIN_WIDTH_DEG
}

/// Bin receiving `theta`: the first bin, in ascending order, whose upper edge is ≥ `theta`.
///
/// Values at or below `-175°` land in bin 0. Values matching no bin (above `+180°`, NaN)
/// are counted in the last bin so that the counts always add up to the number of values.
pub fn bin_index(theta: Degree) -> usize {
    let last = N_BINS - 1;
    if theta.is_nan() || theta > upper_edge(last) {
        return last;
    }

    let estimate = ((theta - HIST_MIN_DEG) / BIN_WIDTH_DEG).ceil() as isize - 1;
    let mut i_bin = estimate.clamp(0, last as isize) as usize;
    // the estimate can be one bin off when theta sits on an edge
    while i_bin > 0 && theta <= upper_edge(i_bin - 1) {
        i_bin -= 1;
    }
    while theta > upper_edge(i_bin) {
        i_bin += 1;
    }
    i_bin
}

/// Counts of one column over the 72 bins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AngleHistogram {
    counts: [u64; N_BINS],
}

impl Default for AngleHistogram {
    fn default() -> Self {
        Self {
            counts: [0; N_BINS],
        }
    }
}

impl AngleHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, theta: Degree) {
        self.counts[bin_index(theta)] += 1;
    }

    pub fn add_all(&mut self, values: &[Degree]) {
        values.iter().for_each(|&theta| self.add(theta));
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// Histogram pass: one [`AngleHistogram`] per column, plus the total row count.
pub(crate) struct HistogramPass {
    hists: Vec<AngleHistogram>,
    n_rows: usize,
    parallel: bool,
}

impl HistogramPass {
    pub(crate) fn new(n_cols: usize, parallel: bool) -> Self {
        Self {
            hists: vec![AngleHistogram::default(); n_cols],
            n_rows: 0,
            parallel,
        }
    }
}

impl BlockAccumulator for HistogramPass {
    type Output = (usize, Vec<AngleHistogram>);

    fn ingest(&mut self, block: Block) -> Result<(), StatsError> {
        self.n_rows += block.nrows();
        for_each_column(&block, &mut self.hists, self.parallel, |column, hist| {
            hist.add_all(column)
        });
        Ok(())
    }

    fn finalize(self) -> Result<Self::Output, StatsError> {
        Ok((self.n_rows, self.hists))
    }
}
