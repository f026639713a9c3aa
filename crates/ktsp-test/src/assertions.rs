//! Assertions on repaired batches.

use std::collections::HashMap;

use ktsp_core::{Edge, Tour};

/// Edges used by more than one tour, with their use counts.
pub fn shared_edges(tours: &[Tour]) -> Vec<(Edge, usize)> {
    let mut uses: HashMap<Edge, usize> = HashMap::new();
    for tour in tours {
        for edge in tour.edges() {
            *uses.entry(edge).or_insert(0) += 1;
        }
    }
    let mut shared: Vec<_> = uses.into_iter().filter(|&(_, c)| c > 1).collect();
    shared.sort();
    shared
}

/// Panics unless `tour` visits every vertex of `0..n` exactly once.
#[track_caller]
pub fn assert_hamiltonian(tour: &Tour, n: usize) {
    assert!(
        tour.is_permutation_of(n),
        "tour {:?} is not a permutation of 0..{n}",
        tour.vertices()
    );
}

/// Panics if two tours share an edge.
#[track_caller]
pub fn assert_disjoint(tours: &[Tour]) {
    let shared = shared_edges(tours);
    assert!(shared.is_empty(), "tours share edges: {shared:?}");
}

/// Panics unless the batch is K Hamiltonian, pairwise edge-disjoint tours.
#[track_caller]
pub fn assert_valid_batch(tours: &[Tour], n: usize) {
    for tour in tours {
        assert_hamiltonian(tour, n);
    }
    assert_disjoint(tours);
}
