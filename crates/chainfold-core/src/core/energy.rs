use super::geometry::distance;
use super::potentials::{PotentialParams, pair_energy};
use itertools::iproduct;
use nalgebra::Point3;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Smallest index separation that contributes to the chain energy. Bonded neighbours
/// sit at a fixed distance and are excluded.
pub const MIN_PAIR_SEPARATION: usize = 2;

fn row_energy(positions: &[Point3<f64>], i: usize, params: &PotentialParams) -> f64 {
    let anchor = &positions[i];
    positions
        .iter()
        .skip(i + MIN_PAIR_SEPARATION)
        .map(|other| pair_energy(distance(anchor, other), params))
        .sum()
}

/// Total pair energy of a chain: the sum of the pair potential over every residue pair
/// `(i, k)` with `k >= i + 2`.
///
/// With the `parallel` feature the rows of the pair matrix are evaluated on the rayon
/// pool. Row sums are always reduced in index order, so the result is bit-identical
/// regardless of feature flags or thread count.
pub fn total_energy(positions: &[Point3<f64>], params: &PotentialParams) -> f64 {
    let n = positions.len();

    #[cfg(not(feature = "parallel"))]
    let row_energies: Vec<f64> = (0..n).map(|i| row_energy(positions, i, params)).collect();

    #[cfg(feature = "parallel")]
    let row_energies: Vec<f64> = (0..n)
        .into_par_iter()
        .map(|i| row_energy(positions, i, params))
        .collect();

    row_energies.iter().sum()
}

/// Energy of the non-bonded pairs that straddle the joint after residue `split`, i.e.
/// every pair `(i, k)` with `i <= split < k` and `k >= i + 2`.
///
/// Changing the angle pair stored at `split` translates every residue after it by a
/// common vector, so these are the only pairs whose energy can change.
pub fn cross_energy(positions: &[Point3<f64>], split: usize, params: &PotentialParams) -> f64 {
    let n = positions.len();
    if split + 1 >= n {
        return 0.0;
    }
    iproduct!(0..=split, split + 1..n)
        .filter(|&(i, k)| k >= i + MIN_PAIR_SEPARATION)
        .map(|(i, k)| pair_energy(distance(&positions[i], &positions[k]), params))
        .sum()
}
