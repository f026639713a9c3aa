//! Tests for the core data model.

use super::*;

fn ring(n: usize) -> CostModel {
    CostModel::from_fn(n, |i, j| {
        let d = i.abs_diff(j);
        d.min(n - d) as f64
    })
    .unwrap()
}

#[test]
fn test_edge_is_canonical() {
    let e = Edge::new(1, 4);
    assert_eq!(e.endpoints(), (4, 1));
    assert_eq!(e, Edge::from((4, 1)));
    assert!(e.contains(1));
    assert!(!e.contains(2));
    assert_eq!(e.to_string(), "(4, 1)");
}

#[test]
fn test_edge_shares_vertex() {
    assert!(Edge::new(0, 1).shares_vertex(&Edge::new(1, 2)));
    assert!(!Edge::new(0, 1).shares_vertex(&Edge::new(2, 3)));
}

#[test]
fn test_tour_edges_wrap_around() {
    let tour = Tour::new(vec![0, 1, 2, 3, 4]);
    let edges: Vec<Edge> = tour.edges().collect();
    assert_eq!(edges.len(), 5);
    assert_eq!(edges[4], Edge::new(4, 0));
}

#[test]
fn test_tour_validate() {
    assert!(Tour::new(vec![2, 0, 1]).validate(3, 0).is_ok());

    let err = Tour::new(vec![0, 1, 1]).validate(3, 2).unwrap_err();
    match err {
        KtspError::RepairInvariant { tour, detail } => {
            assert_eq!(tour, 2);
            assert!(detail.contains("twice"));
        }
        other => panic!("unexpected error: {other}"),
    }

    assert!(!Tour::new(vec![0, 1]).is_permutation_of(3));
    assert!(!Tour::new(vec![0, 1, 3]).is_permutation_of(3));
}

#[test]
fn test_ring_costs() {
    let costs = ring(5);
    assert!(costs.is_complete());
    assert_eq!(costs.edge_count(), 10);
    assert_eq!(costs.edge_cost(0, 4).unwrap(), 1.0);
    assert_eq!(costs.edge_cost(0, 2).unwrap(), 2.0);
}

#[test]
fn test_tour_set_cost() {
    let costs = ring(5);
    let tours = vec![Tour::new(vec![0, 1, 2, 3, 4]), Tour::new(vec![0, 2, 4, 1, 3])];
    assert_eq!(costs.tour_cost(&tours[0]).unwrap(), 5.0);
    assert_eq!(costs.tour_set_cost(&tours).unwrap(), 15.0);
}

#[test]
fn test_missing_edge_is_lookup_error() {
    let mut costs = CostModel::new(3);
    costs.insert(1, 0, 1.0).unwrap();
    assert!(!costs.is_complete());
    match costs.edge_cost(2, 1) {
        Err(KtspError::Lookup { edge }) => assert_eq!(edge, Edge::new(2, 1)),
        other => panic!("expected lookup error, got {other:?}"),
    }
    assert!(costs.tour_cost(&Tour::new(vec![0, 1, 2])).is_err());
}

#[test]
fn test_insert_rejects_bad_costs() {
    let mut costs = CostModel::new(3);
    assert!(costs.insert(1, 1, 1.0).is_err());
    assert!(costs.insert(3, 0, 1.0).is_err());
    assert!(costs.insert(1, 0, -1.0).is_err());
    assert!(costs.insert(1, 0, f64::NAN).is_err());
}

#[test]
fn test_euclidean() {
    let costs = CostModel::euclidean(&[(0.0, 0.0), (3.0, 4.0), (0.0, 4.0)]).unwrap();
    assert_eq!(costs.edge_cost(0, 1).unwrap(), 5.0);
    assert_eq!(costs.edge_cost(2, 1).unwrap(), 3.0);
}

#[test]
fn test_edges_by_cost_ties_follow_edge_order() {
    let costs = ring(4);
    let sorted = costs.edges_by_cost();
    assert_eq!(
        sorted,
        vec![
            Edge::new(1, 0),
            Edge::new(2, 1),
            Edge::new(3, 0),
            Edge::new(3, 2),
            Edge::new(2, 0),
            Edge::new(3, 1),
        ]
    );
}
