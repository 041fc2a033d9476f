//! Jump counting, second pass of the shift estimator.
//!
//! For a candidate barrier `c`, every angle is re-centred as `θ - (c + 180°)` and wrapped
//! into `[-180°, 180°]`: the seam of the new frame sits exactly at `θ = c`. Two consecutive
//! rows form a **jump** when their re-centred values differ by more than 180°, i.e. when
//! the short way between them crosses the barrier. A good barrier is one the trajectory
//! rarely crosses.
use crate::{
    blocks::{for_each_column, BlockAccumulator},
    constants::{Block, Degree, HALF_PERIOD_DEG},
    conversion::wrap_deg,
    params::JumpBoundary,
    stats_errors::StatsError,
};

/// Re-centre `theta` for the barrier `candidate`: `theta - (candidate + 180°)`, wrapped.
#[inline]
pub fn shift_to_barrier_deg(theta: Degree, candidate: Degree) -> Degree {
    let shifted = theta - (candidate + HALF_PERIOD_DEG);
    if (-HALF_PERIOD_DEG..=HALF_PERIOD_DEG).contains(&shifted) {
        shifted
    } else {
        wrap_deg(shifted)
    }
}

/// Count jumps along `values`, starting from the (raw) value `previous` if any.
fn count_from(previous: Option<Degree>, values: &[Degree], candidate: Degree) -> u64 {
    let mut prev = previous.map(|theta| shift_to_barrier_deg(theta, candidate));
    let mut n_jumps = 0;
    for &theta in values {
        let current = shift_to_barrier_deg(theta, candidate);
        if let Some(p) = prev {
            if (current - p).abs() > HALF_PERIOD_DEG {
                n_jumps += 1;
            }
        }
        prev = Some(current);
    }
    n_jumps
}

/// Number of consecutive pairs of `values` (degrees) crossing the barrier `candidate`.
pub fn count_jumps_deg(values: &[Degree], candidate: Degree) -> u64 {
    count_from(None, values, candidate)
}

/// Jump counters of one column, one per candidate.
#[derive(Debug, Clone)]
pub(crate) struct ColumnJumps {
    pub(crate) candidates: Vec<Degree>,
    pub(crate) jumps: Vec<u64>,
    last: Option<Degree>,
}

impl ColumnJumps {
    pub(crate) fn new(candidates: Vec<Degree>) -> Self {
        let n = candidates.len();
        Self {
            candidates,
            jumps: vec![0; n],
            last: None,
        }
    }

    fn ingest_column(&mut self, column: &[Degree], boundary: JumpBoundary) {
        let previous = match boundary {
            JumpBoundary::CarryOver => self.last,
            JumpBoundary::WithinChunk => None,
        };
        for (candidate, n_jumps) in self.candidates.iter().zip(self.jumps.iter_mut()) {
            *n_jumps += count_from(previous, column, *candidate);
        }
        if let Some(&last) = column.last() {
            self.last = Some(last);
        }
    }
}

/// Jump pass over all columns. Row order matters: blocks must arrive in stream order.
pub(crate) struct JumpPass {
    columns: Vec<ColumnJumps>,
    boundary: JumpBoundary,
    parallel: bool,
}

impl JumpPass {
    pub(crate) fn new(candidates: Vec<Vec<Degree>>, boundary: JumpBoundary, parallel: bool) -> Self {
        Self {
            columns: candidates.into_iter().map(ColumnJumps::new).collect(),
            boundary,
            parallel,
        }
    }
}

impl BlockAccumulator for JumpPass {
    type Output = Vec<ColumnJumps>;

    fn ingest(&mut self, block: Block) -> Result<(), StatsError> {
        let boundary = self.boundary;
        for_each_column(&block, &mut self.columns, self.parallel, |column, jumps| {
            jumps.ingest_column(column, boundary)
        });
        Ok(())
    }

    fn finalize(self) -> Result<Vec<ColumnJumps>, StatsError> {
        Ok(self.columns)
    }
}

#[cfg(test)]
mod jumps_test {
    use super::*;

    #[test]
    fn test_shift_to_barrier() {
        assert_eq!(shift_to_barrier_deg(10.0, -180.0), 10.0);
        assert_eq!(shift_to_barrier_deg(-179.0, 0.0), 1.0);
        assert_eq!(shift_to_barrier_deg(179.0, 0.0), -1.0);
        assert_eq!(shift_to_barrier_deg(-178.5, -175.0), 176.5);
        assert_eq!(shift_to_barrier_deg(180.0, -180.0), 180.0);
    }

    #[test]
    fn test_pair_across_the_seam() {
        let pair = [179.0, -179.0];
        // frame centred on 0°: the pair straddles ±180°
        assert_eq!(count_jumps_deg(&pair, -180.0), 1);
        // frame centred on 180°: the pair sits in the middle
        assert_eq!(count_jumps_deg(&pair, 0.0), 0);
    }

    #[test]
    fn test_counts_every_crossing() {
        let series = [170.0, -170.0, 175.0, 10.0, -175.0];
        assert_eq!(count_jumps_deg(&series, 180.0), 3);
        // barrier at 90°: crossed by 175 → 10 and by 10 → -175 (the short way passes 90°)
        assert_eq!(count_jumps_deg(&series, 90.0), 2);
        assert_eq!(count_jumps_deg(&[], 0.0), 0);
        assert_eq!(count_jumps_deg(&[42.0], 0.0), 0);
    }

    #[test]
    fn test_chunk_boundary_policy() {
        let mut carry = ColumnJumps::new(vec![-180.0, 0.0]);
        let mut within = carry.clone();
        for chunk in [&[179.0][..], &[-179.0, 178.0][..]] {
            carry.ingest_column(chunk, JumpBoundary::CarryOver);
            within.ingest_column(chunk, JumpBoundary::WithinChunk);
        }
        assert_eq!(carry.jumps, vec![2, 0]);
        // the 179 → -179 transition straddles the two chunks
        assert_eq!(within.jumps, vec![1, 0]);
    }
}
