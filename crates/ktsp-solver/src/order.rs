//! Processing-order search.
//!
//! The tour processed first is never modified and every later tour is
//! repaired against the ones before it, so the outcome depends on the
//! order. [`OrderSelector`] tries every permutation (or only the given
//! order) and keeps the cheapest batch.

use std::time::Instant;

use ktsp_config::{HeuristicConfig, OrderSearch, DEFAULT_MAX_EXHAUSTIVE_TOURS};
use ktsp_core::{CostModel, KtspError, Result, Tour};
use tracing::{debug, info};

use crate::engine::{RepairResult, TourRepairEngine};
use crate::repair::{RepairStrategy, Strategy};

/// Rearranges `items` into the next lexicographic permutation.
///
/// Returns false, leaving `items` untouched, if they already are in their
/// last permutation.
///
/// # Example
///
/// ```
/// use ktsp_solver::order::next_permutation;
///
/// let mut items = [0, 2, 1];
/// assert!(next_permutation(&mut items));
/// assert_eq!(items, [1, 0, 2]);
///
/// let mut last = [2, 1, 0];
/// assert!(!next_permutation(&mut last));
/// ```
pub fn next_permutation<T: Ord>(items: &mut [T]) -> bool {
    if items.len() < 2 {
        return false;
    }
    let Some(pivot) = (0..items.len() - 1).rev().find(|&i| items[i] < items[i + 1]) else {
        return false;
    };
    let successor = (pivot + 1..items.len())
        .rev()
        .find(|&k| items[pivot] < items[k])
        .unwrap_or(pivot + 1);
    items.swap(pivot, successor);
    items[pivot + 1..].reverse();
    true
}

/// Iterator over all permutations of `0..k` in lexicographic order,
/// starting with the identity.
#[derive(Debug, Clone)]
pub struct Permutations {
    current: Vec<usize>,
    exhausted: bool,
}

impl Permutations {
    pub fn new(k: usize) -> Self {
        Self {
            current: (0..k).collect(),
            exhausted: false,
        }
    }
}

impl Iterator for Permutations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let out = self.current.clone();
        self.exhausted = !next_permutation(&mut self.current);
        Some(out)
    }
}

/// Evaluates the repair engine over processing orders and keeps the best.
///
/// # Example
///
/// ```
/// use ktsp_core::{CostModel, Tour};
/// use ktsp_solver::OrderSelector;
///
/// let costs = CostModel::from_fn(5, |i, j| {
///     let d = i.abs_diff(j);
///     d.min(5 - d) as f64
/// }).unwrap();
/// let tours = vec![Tour::new(vec![0, 1, 2, 3, 4]), Tour::new(vec![0, 2, 4, 1, 3])];
///
/// let result = OrderSelector::new(&costs).solve(&tours).unwrap();
/// assert_eq!(result.total_cost, 15.0);
/// assert_eq!(result.tours, tours);
/// ```
#[derive(Debug, Clone)]
pub struct OrderSelector<'a, R = Strategy> {
    engine: TourRepairEngine<'a, R>,
    order_search: OrderSearch,
    max_exhaustive_tours: usize,
}

impl<'a> OrderSelector<'a, Strategy> {
    /// Exhaustive order search with the exchange strategy.
    pub fn new(costs: &'a CostModel) -> Self {
        Self::with_engine(TourRepairEngine::new(costs))
    }

    /// Builds the selector described by `config`.
    pub fn from_config(costs: &'a CostModel, config: &HeuristicConfig) -> Self {
        let engine = TourRepairEngine::with_strategy(costs, Strategy::from(config.strategy))
            .with_environment_mode(config.environment_mode);
        Self {
            engine,
            order_search: config.order_search,
            max_exhaustive_tours: config.max_exhaustive_tours,
        }
    }
}

impl<'a, R: RepairStrategy> OrderSelector<'a, R> {
    pub fn with_engine(engine: TourRepairEngine<'a, R>) -> Self {
        Self {
            engine,
            order_search: OrderSearch::default(),
            max_exhaustive_tours: DEFAULT_MAX_EXHAUSTIVE_TOURS,
        }
    }

    pub fn with_order_search(mut self, order_search: OrderSearch) -> Self {
        self.order_search = order_search;
        self
    }

    pub fn engine(&self) -> &TourRepairEngine<'a, R> {
        &self.engine
    }

    /// Repairs `tours` under every configured processing order and returns
    /// the cheapest result. Ties keep the earliest order.
    ///
    /// An infeasible order is skipped; if every order is infeasible the last
    /// [`KtspError::InfeasibleRepair`] is returned. Any other error aborts
    /// the search.
    pub fn solve(&self, tours: &[Tour]) -> Result<RepairResult> {
        let k = tours.len();
        let orders: Box<dyn Iterator<Item = Vec<usize>>> = match self.order_search {
            OrderSearch::AsGiven => Box::new(std::iter::once((0..k).collect::<Vec<_>>())),
            OrderSearch::Exhaustive => {
                if k > self.max_exhaustive_tours {
                    return Err(KtspError::Config(format!(
                        "exhaustive order search over {k} tours exceeds the limit of {}",
                        self.max_exhaustive_tours
                    )));
                }
                Box::new(Permutations::new(k))
            }
        };

        let start = Instant::now();
        info!(
            event = "heuristic_start",
            tours = k,
            vertices = self.engine.costs().vertex_count(),
            strategy = self.engine.strategy().name(),
        );

        let mut best: Option<RepairResult> = None;
        let mut infeasible: Option<KtspError> = None;
        let mut evaluated = 0u64;

        for order in orders {
            evaluated += 1;
            match self.engine.repair(tours, &order) {
                Ok(result) => {
                    debug!(event = "order_evaluated", order = ?order, cost = result.total_cost);
                    if best
                        .as_ref()
                        .map_or(true, |b| result.total_cost < b.total_cost)
                    {
                        best = Some(result);
                    }
                }
                Err(err) if err.is_infeasible() => {
                    debug!(event = "order_infeasible", order = ?order, error = %err);
                    infeasible = Some(err);
                }
                Err(err) => return Err(err),
            }
        }

        info!(
            event = "heuristic_end",
            orders = evaluated,
            duration_ms = start.elapsed().as_millis() as u64,
            feasible = best.is_some(),
            cost = best.as_ref().map_or(f64::INFINITY, |b| b.total_cost),
        );

        match (best, infeasible) {
            (Some(result), _) => Ok(result),
            (None, Some(err)) => Err(err),
            (None, None) => Err(KtspError::InvariantViolation(
                "no processing order was evaluated".to_string(),
            )),
        }
    }
}

#[cfg(test)]
#[path = "order_tests.rs"]
mod tests;
