//! Tests for the repair module.

use super::*;
use ktsp_core::{Edge, KtspError, Tour};
use ktsp_test::{assert_disjoint, assert_hamiltonian, random_euclidean, random_tours, ring_costs};

mod queue;

/// Fixed-edge set holding the edges of the given tours.
fn fixed_from(tours: &[Vec<usize>]) -> FixedEdgeSet {
    let mut fixed = FixedEdgeSet::new();
    for tour in tours {
        fixed.extend_from_tour(&Tour::new(tour.clone()));
    }
    fixed
}

fn sorted_edges(tour: &Tour) -> Vec<Edge> {
    let mut edges: Vec<Edge> = tour.edges().collect();
    edges.sort();
    edges
}

#[test]
fn test_fixed_edge_set_tracks_tour_edges() {
    let fixed = fixed_from(&[vec![0, 1, 2, 3, 4]]);
    assert_eq!(fixed.len(), 5);
    assert!(fixed.contains(Edge::new(4, 0)));
    assert!(!fixed.contains(Edge::new(0, 2)));

    let other = Tour::new(vec![0, 2, 4, 1, 3]);
    assert_eq!(fixed.first_shared_edge(&other), None);
    let overlapping = Tour::new(vec![0, 1, 3, 2, 4]);
    assert_eq!(fixed.first_shared_edge(&overlapping), Some(Edge::new(0, 1)));
}

#[test]
fn test_strategy_from_kind() {
    use ktsp_config::RepairStrategyKind;

    assert_eq!(Strategy::from(RepairStrategyKind::Exchange).name(), "exchange");
    assert_eq!(Strategy::from(RepairStrategyKind::UnionFind).name(), "union_find");
    assert_eq!(Strategy::default().name(), "exchange");
}
