#![allow(dead_code)]

use approx::assert_relative_eq;
use dihedral_stats::{Block, Degree};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn assert_vec_close(actual: &[f64], expected: &[f64], epsilon: f64) {
    assert_eq!(actual.len(), expected.len(), "length mismatch");
    for (a, e) in actual.iter().zip(expected) {
        assert_relative_eq!(a, e, epsilon = epsilon);
    }
}

/// Fold an angle into `[-180°, 180°)`.
pub fn fold_deg(theta: Degree) -> Degree {
    (theta + 180.0).rem_euclid(360.0) - 180.0
}

/// Gaussian cluster around `centre` with `sd` spread, wrapped onto the circle.
pub fn wrapped_cluster(rng: &mut StdRng, n: usize, centre: Degree, sd: Degree) -> Vec<Degree> {
    let normal = Normal::new(centre, sd).unwrap();
    (0..n).map(|_| fold_deg(normal.sample(rng))).collect()
}

/// Random walk on the circle, with Gaussian steps of `step_sd` degrees.
pub fn wrapped_walk(rng: &mut StdRng, n: usize, start: Degree, step_sd: Degree) -> Vec<Degree> {
    let step = Normal::new(0.0, step_sd).unwrap();
    let mut theta = start;
    (0..n)
        .map(|_| {
            theta += step.sample(rng);
            fold_deg(theta)
        })
        .collect()
}

/// Sparse uniform background over the full circle plus a tight cluster, interleaved.
pub fn background_with_cluster(seed: u64, n_background: usize, n_cluster: usize) -> Vec<Degree> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut values = wrapped_cluster(&mut rng, n_cluster, 175.0, 8.0);
    for _ in 0..n_background {
        let i = rng.random_range(0..=values.len());
        values.insert(i, rng.random_range(-180.0..180.0));
    }
    values
}

/// `n_rows x columns.len()` block, column `j` generated as a random walk.
pub fn angular_block(seed: u64, n_rows: usize, starts: &[Degree]) -> Block {
    let mut rng = StdRng::seed_from_u64(seed);
    let columns: Vec<Vec<Degree>> = starts
        .iter()
        .map(|&start| wrapped_walk(&mut rng, n_rows, start, 15.0))
        .collect();
    Block::from_fn(n_rows, starts.len(), |i, j| columns[j][i])
}

/// Independent jump counter: recentre on `candidate + 180°`, count adjacent differences
/// larger than half a turn.
pub fn brute_force_jumps(values: &[Degree], candidate: Degree) -> u64 {
    let recentred: Vec<f64> = values
        .iter()
        .map(|&theta| fold_deg(theta - candidate - 180.0))
        .collect();
    recentred
        .windows(2)
        .filter(|pair| (pair[1] - pair[0]).abs() > 180.0)
        .count() as u64
}
