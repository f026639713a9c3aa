//! Instance fixtures.
//!
//! Random instances are drawn from a seeded ChaCha generator so every test
//! run sees the same points and tours.

use ktsp_core::{CostModel, Tour};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic generator for fixtures.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Complete instance whose cost is the ring distance between vertices.
///
/// On 5 vertices the tour `0 -> 1 -> 2 -> 3 -> 4` costs 5 and the star
/// `0 -> 2 -> 4 -> 1 -> 3` costs 10.
pub fn ring_costs(n: usize) -> CostModel {
    let mut costs = CostModel::new(n);
    for i in 0..n {
        for j in 0..i {
            let d = i - j;
            costs
                .insert(i, j, d.min(n - d) as f64)
                .expect("ring distances are valid costs");
        }
    }
    costs
}

/// Complete Euclidean instance over `n` points drawn uniformly from the
/// unit square.
pub fn random_euclidean(n: usize, seed: u64) -> CostModel {
    let mut rng = seeded_rng(seed);
    let points: Vec<(f64, f64)> = (0..n)
        .map(|_| (rng.random::<f64>(), rng.random::<f64>()))
        .collect();
    CostModel::euclidean(&points).expect("unit-square points give finite costs")
}

/// Uniformly shuffled permutation of `0..n`.
pub fn random_tour<R: Rng>(n: usize, rng: &mut R) -> Tour {
    let mut vertices: Vec<usize> = (0..n).collect();
    vertices.shuffle(rng);
    Tour::new(vertices)
}

/// `k` independent random tours over `n` vertices.
pub fn random_tours(n: usize, k: usize, seed: u64) -> Vec<Tour> {
    let mut rng = seeded_rng(seed);
    (0..k).map(|_| random_tour(n, &mut rng)).collect()
}
