//! Shift candidates drawn from the sparsest histogram bins.
use crate::{
    constants::{Degree, CANDIDATE_STEP_DEG},
    shifts::histogram::lower_edge,
};

/// Pick `n_slots` sparse bins with a greedy ascending scan.
///
/// All slots start at bin 0. Every following bin, in ascending order, replaces the first
/// slot (in slot order) whose bin has a strictly larger count, and the scan moves on to the
/// next bin. This is not a sort: ties keep the bin found first, a slot can be overwritten
/// several times, and slots never reached keep bin 0 (so the same bin may appear twice).
///
/// Arguments
/// -----------------
/// * `counts` – Histogram counts, bin 0 first.
/// * `n_slots` – Number of bins to select.
///
/// Return
/// ----------
/// * The selected bin indices, in slot order.
pub fn sparse_bins(counts: &[u64], n_slots: usize) -> Vec<usize> {
    let mut slots = vec![0usize; n_slots];
    for (i_bin, &count) in counts.iter().enumerate().skip(1) {
        if let Some(slot) = slots.iter_mut().find(|slot| count < counts[**slot]) {
            *slot = i_bin;
        }
    }
    slots
}

/// Candidate barriers: `values_per_bin` values 1° apart from the lower edge of each bin.
///
/// Candidates are ordered by slot, then by increasing value; this order is the tie-break
/// order of the minimal-jump selection.
pub fn candidate_values(bins: &[usize], values_per_bin: usize) -> Vec<Degree> {
    bins.iter()
        .flat_map(|&i_bin| {
            (0..values_per_bin).map(move |k| lower_edge(i_bin) + k as f64 * CANDIDATE_STEP_DEG)
        })
        .collect()
}
