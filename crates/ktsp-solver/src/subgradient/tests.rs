//! Tests for the subgradient driver.

use super::*;
use ktsp_test::ring_costs;

fn ring() -> Tour {
    Tour::new(vec![0, 1, 2, 3, 4])
}

fn star() -> Tour {
    Tour::new(vec![0, 2, 4, 1, 3])
}

fn overlapping() -> Tour {
    Tour::new(vec![0, 1, 3, 2, 4])
}

/// Returns fixed tours and prices them with the penalized objective.
struct PenalizedSolver<'a> {
    costs: &'a CostModel,
    tours: Vec<Tour>,
    seen: Vec<Multipliers>,
}

impl RelaxationSolver for PenalizedSolver<'_> {
    fn solve(&mut self, multipliers: &Multipliers) -> Result<Relaxation> {
        self.seen.push(multipliers.clone());
        let g = subgradient(&self.tours, self.costs);
        let penalty: f64 = g.iter().map(|(e, g_e)| multipliers.get(*e) * g_e).sum();
        Ok(Relaxation {
            tours: self.tours.clone(),
            objective: self.costs.tour_set_cost(&self.tours)? + penalty,
        })
    }
}

/// Reports a constant objective whatever the multipliers.
struct ConstantSolver {
    tours: Vec<Tour>,
    objective: f64,
    calls: u32,
}

impl RelaxationSolver for ConstantSolver {
    fn solve(&mut self, _multipliers: &Multipliers) -> Result<Relaxation> {
        self.calls += 1;
        Ok(Relaxation {
            tours: self.tours.clone(),
            objective: self.objective,
        })
    }
}

struct FailingSolver;

impl RelaxationSolver for FailingSolver {
    fn solve(&mut self, _multipliers: &Multipliers) -> Result<Relaxation> {
        Err(KtspError::Relaxation("model is infeasible".to_string()))
    }
}

#[test]
fn test_subgradient_counts_uses() {
    let costs = ring_costs(5);
    let g = subgradient(&[ring(), overlapping()], &costs);

    assert_eq!(g.len(), 10);
    assert_eq!(g[&Edge::new(1, 0)], 1.0);
    assert_eq!(g[&Edge::new(2, 1)], 0.0);
    assert_eq!(g[&Edge::new(2, 0)], -1.0);
}

#[test]
fn test_multiplier_step_is_projected() {
    let costs = ring_costs(5);
    let mut multipliers = Multipliers::zeros(&costs);
    assert_eq!(multipliers.total(), 0.0);

    let g = subgradient(&[ring(), overlapping()], &costs);
    multipliers.step(&g, 0.5);
    assert_eq!(multipliers.get(Edge::new(1, 0)), 0.5);
    assert_eq!(multipliers.get(Edge::new(2, 0)), 0.0);
    assert_eq!(multipliers.total(), 1.5);
    assert!(multipliers.iter().all(|(_, u)| u >= 0.0));
}

#[test]
fn test_relative_gap() {
    assert_eq!(relative_gap(10.0, 8.0), 0.2);
    assert_eq!(relative_gap(0.0, 0.0), 0.0);
}

#[test]
fn test_disjoint_relaxation_closes_gap_at_once() {
    let costs = ring_costs(5);
    let mut solver = PenalizedSolver {
        costs: &costs,
        tours: vec![ring(), star()],
        seen: Vec::new(),
    };

    let report = SubgradientLoop::new(&costs).run(&mut solver).unwrap();
    assert_eq!(report.iterations, 1);
    assert_eq!(report.best_lower_bound, 15.0);
    assert_eq!(report.best_upper_bound.total_cost, 15.0);
    assert_eq!(report.gap, 0.0);
    assert_eq!(report.lower_bound_tours, vec![ring(), star()]);
}

#[test]
fn test_shared_edges_are_penalized() {
    let costs = ring_costs(5);
    let mut solver = PenalizedSolver {
        costs: &costs,
        tours: vec![ring(), overlapping()],
        seen: Vec::new(),
    };

    let report = SubgradientLoop::new(&costs).run(&mut solver).unwrap();

    // Bounds 12 and 15 give a unit step on the three shared edges.
    assert_eq!(report.iterations, 2);
    assert_eq!(solver.seen.len(), 2);
    let second = &solver.seen[1];
    for edge in [Edge::new(1, 0), Edge::new(3, 2), Edge::new(4, 0)] {
        assert_eq!(second.get(edge), 1.0);
    }
    assert_eq!(second.get(Edge::new(2, 0)), 0.0);
    assert_eq!(report.best_lower_bound, 15.0);
    assert_eq!(report.best_upper_bound.total_cost, 15.0);
    ktsp_test::assert_valid_batch(&report.best_upper_bound.tours, 5);
}

#[test]
fn test_iteration_cap() {
    let costs = ring_costs(5);
    let config = SubgradientConfig {
        max_iterations: 5,
        ..SubgradientConfig::default()
    };
    let mut solver = ConstantSolver {
        tours: vec![ring(), overlapping()],
        objective: 12.0,
        calls: 0,
    };

    let report = SubgradientLoop::with_selector(OrderSelector::new(&costs), config)
        .run(&mut solver)
        .unwrap();
    assert_eq!(report.iterations, 5);
    assert_eq!(solver.calls, 5);
    assert_eq!(report.best_lower_bound, 12.0);
    assert!((report.gap - 0.2).abs() < 1e-12);
}

#[test]
fn test_vanishing_subgradient_stops() {
    // Ring and star cover every edge of K5 exactly once.
    let costs = ring_costs(5);
    let mut solver = ConstantSolver {
        tours: vec![ring(), star()],
        objective: 10.0,
        calls: 0,
    };

    let report = SubgradientLoop::new(&costs).run(&mut solver).unwrap();
    assert_eq!(report.iterations, 1);
    assert_eq!(solver.calls, 1);
    assert!(report.gap > 0.3);
}

#[test]
fn test_relaxation_errors_propagate() {
    let costs = ring_costs(5);
    let err = SubgradientLoop::new(&costs).run(&mut FailingSolver).unwrap_err();
    assert!(matches!(err, KtspError::Relaxation(_)));
}

#[test]
fn test_from_config_reads_subgradient_section() {
    let costs = ring_costs(5);
    let config = HeuristicConfig::default().with_max_iterations(7);
    let driver = SubgradientLoop::from_config(&costs, &config);
    assert_eq!(driver.config().max_iterations, 7);
}
