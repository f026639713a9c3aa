//! Tests for processing-order search.

use super::*;
use ktsp_config::{EnvironmentMode, RepairStrategyKind};
use ktsp_test::{assert_valid_batch, random_euclidean, random_tours, ring_costs};

#[test]
fn test_permutations_are_lexicographic() {
    let all: Vec<Vec<usize>> = Permutations::new(3).collect();
    assert_eq!(
        all,
        vec![
            vec![0, 1, 2],
            vec![0, 2, 1],
            vec![1, 0, 2],
            vec![1, 2, 0],
            vec![2, 0, 1],
            vec![2, 1, 0],
        ]
    );
    assert_eq!(Permutations::new(4).count(), 24);
}

#[test]
fn test_permutations_of_small_sets() {
    assert_eq!(Permutations::new(0).collect::<Vec<_>>(), vec![Vec::<usize>::new()]);
    assert_eq!(Permutations::new(1).collect::<Vec<_>>(), vec![vec![0]]);
}

#[test]
fn test_next_permutation_handles_repeats() {
    let mut items = [1, 1, 2];
    assert!(next_permutation(&mut items));
    assert_eq!(items, [1, 2, 1]);
    assert!(next_permutation(&mut items));
    assert_eq!(items, [2, 1, 1]);
    assert!(!next_permutation(&mut items));
}

#[test]
fn test_selector_matches_best_order() {
    let n = 10;
    for seed in 0..5 {
        let costs = random_euclidean(n, seed);
        let tours = random_tours(n, 3, seed + 7);
        let engine = TourRepairEngine::new(&costs);

        let mut expected: Option<RepairResult> = None;
        for order in Permutations::new(3) {
            if let Ok(result) = engine.repair(&tours, &order) {
                if expected
                    .as_ref()
                    .map_or(true, |b| result.total_cost < b.total_cost)
                {
                    expected = Some(result);
                }
            }
        }

        match (OrderSelector::new(&costs).solve(&tours), expected) {
            (Ok(result), Some(best)) => {
                assert_eq!(result, best);
                assert_valid_batch(&result.tours, n);
            }
            (Err(err), None) => assert!(err.is_infeasible()),
            (got, want) => panic!("selector returned {got:?}, best order gave {want:?}"),
        }
    }
}

#[test]
fn test_disjoint_batch_keeps_its_cost() {
    let costs = ring_costs(5);
    let tours = vec![Tour::new(vec![0, 1, 2, 3, 4]), Tour::new(vec![0, 2, 4, 1, 3])];

    let result = OrderSelector::new(&costs).solve(&tours).unwrap();
    assert_eq!(result.tours, tours);
    assert_eq!(result.total_cost, 15.0);
    // Every order ties, so the identity wins.
    assert_eq!(result.order, vec![0, 1]);
}

#[test]
fn test_selector_output_is_a_fixed_point() {
    let n = 9;
    let costs = random_euclidean(n, 11);
    let tours = random_tours(n, 2, 12);
    let selector = OrderSelector::new(&costs);

    if let Ok(first) = selector.solve(&tours) {
        let second = selector.solve(&first.tours).unwrap();
        assert_eq!(second.tours, first.tours);
        assert!((second.total_cost - first.total_cost).abs() < 1e-9);
    }
}

#[test]
fn test_as_given_uses_identity_order() {
    let costs = ring_costs(5);
    let tours = vec![Tour::new(vec![0, 1, 2, 3, 4]), Tour::new(vec![0, 1, 3, 2, 4])];

    let result = OrderSelector::new(&costs)
        .with_order_search(OrderSearch::AsGiven)
        .solve(&tours)
        .unwrap();
    assert_eq!(result.order, vec![0, 1]);
    assert_eq!(result.tours[0], tours[0]);
}

#[test]
fn test_all_orders_infeasible() {
    let costs = ring_costs(4);
    let tours = vec![
        Tour::new(vec![0, 1, 2, 3]),
        Tour::new(vec![0, 2, 1, 3]),
        Tour::new(vec![0, 3, 1, 2]),
    ];

    let err = OrderSelector::new(&costs).solve(&tours).unwrap_err();
    assert!(matches!(err, KtspError::InfeasibleRepair { .. }));
}

#[test]
fn test_exhaustive_limit() {
    let costs = ring_costs(7);
    let mut config = HeuristicConfig::default();
    config.max_exhaustive_tours = 2;
    let tours = random_tours(7, 3, 1);

    let err = OrderSelector::from_config(&costs, &config)
        .solve(&tours)
        .unwrap_err();
    assert!(matches!(err, KtspError::Config(_)));

    let as_given = config.with_order_search(OrderSearch::AsGiven);
    let result = OrderSelector::from_config(&costs, &as_given).solve(&tours);
    assert!(!matches!(result, Err(KtspError::Config(_))));
}

#[test]
fn test_from_config_union_find() {
    let costs = ring_costs(5);
    let config = HeuristicConfig::default()
        .with_strategy(RepairStrategyKind::UnionFind)
        .with_environment_mode(EnvironmentMode::FullAssert);
    let tours = vec![Tour::new(vec![0, 1, 2, 3, 4]), Tour::new(vec![0, 1, 3, 2, 4])];

    let selector = OrderSelector::from_config(&costs, &config);
    assert_eq!(selector.engine().strategy().name(), "union_find");

    let result = selector.solve(&tours).unwrap();
    assert_valid_batch(&result.tours, 5);
    assert_eq!(result.total_cost, 15.0);
}

#[test]
fn test_invalid_input_aborts_search() {
    let costs = ring_costs(5);
    let tours = vec![Tour::new(vec![0, 1, 2, 3, 4]), Tour::new(vec![0, 1, 2])];

    assert!(matches!(
        OrderSelector::new(&costs).solve(&tours),
        Err(KtspError::InvalidInput(_))
    ));
}
