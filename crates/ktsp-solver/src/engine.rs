//! Repair of a whole tour batch for one processing order.

use std::collections::HashMap;

use ktsp_config::EnvironmentMode;
use ktsp_core::{CostModel, Edge, KtspError, Result, Tour};
use tracing::debug;

use crate::repair::{FixedEdgeSet, RepairStrategy, Strategy};

/// Pairwise edge-disjoint tours and their total cost.
///
/// `tours[i]` is the repaired version of input tour `i`; `order` is the
/// processing order that produced the batch, `order[0]` being the tour kept
/// unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct RepairResult {
    pub total_cost: f64,
    pub tours: Vec<Tour>,
    pub order: Vec<usize>,
}

/// Repairs tours left to right against an accumulating fixed-edge set.
///
/// # Example
///
/// ```
/// use ktsp_core::{CostModel, Tour};
/// use ktsp_solver::TourRepairEngine;
///
/// let costs = CostModel::from_fn(5, |i, j| {
///     let d = i.abs_diff(j);
///     d.min(5 - d) as f64
/// }).unwrap();
/// let tours = vec![Tour::new(vec![0, 1, 2, 3, 4]), Tour::new(vec![0, 1, 3, 2, 4])];
///
/// let engine = TourRepairEngine::new(&costs);
/// let result = engine.repair(&tours, &[0, 1]).unwrap();
/// assert_eq!(result.tours[0], tours[0]);
/// assert_eq!(result.total_cost, 15.0);
/// ```
#[derive(Debug, Clone)]
pub struct TourRepairEngine<'a, R = Strategy> {
    costs: &'a CostModel,
    strategy: R,
    environment_mode: EnvironmentMode,
}

impl<'a> TourRepairEngine<'a, Strategy> {
    /// Creates an engine using the exchange strategy.
    pub fn new(costs: &'a CostModel) -> Self {
        Self::with_strategy(costs, Strategy::default())
    }
}

impl<'a, R: RepairStrategy> TourRepairEngine<'a, R> {
    pub fn with_strategy(costs: &'a CostModel, strategy: R) -> Self {
        Self {
            costs,
            strategy,
            environment_mode: EnvironmentMode::default(),
        }
    }

    pub fn with_environment_mode(mut self, mode: EnvironmentMode) -> Self {
        self.environment_mode = mode;
        self
    }

    pub fn costs(&self) -> &'a CostModel {
        self.costs
    }

    pub fn strategy(&self) -> &R {
        &self.strategy
    }

    /// Checks that the batch is shaped for this instance and returns the
    /// vertex count.
    ///
    /// Every tour must have the same length `n >= 3`, matching the cost
    /// model, with all vertices in range. In full-assert mode each tour must
    /// also be a permutation.
    pub fn check_inputs(&self, tours: &[Tour]) -> Result<usize> {
        let n = self.costs.vertex_count();
        if n < 3 {
            return Err(KtspError::InvalidInput(format!(
                "instance has {n} vertices, at least 3 are needed"
            )));
        }
        for (index, tour) in tours.iter().enumerate() {
            if tour.len() != n {
                return Err(KtspError::InvalidInput(format!(
                    "tour {index} has {} vertices, instance has {n}",
                    tour.len()
                )));
            }
            if let Some(&v) = tour.iter().find(|&&v| v >= n) {
                return Err(KtspError::InvalidInput(format!(
                    "tour {index} visits vertex {v}, out of range for {n} vertices"
                )));
            }
            if self.environment_mode == EnvironmentMode::FullAssert
                && !tour.is_permutation_of(n)
            {
                return Err(KtspError::InvalidInput(format!(
                    "tour {index} is not a permutation of 0..{n}"
                )));
            }
        }
        Ok(n)
    }

    /// Repairs `tours` processing them in `order`.
    ///
    /// The first tour of the order is kept unchanged; each following tour is
    /// repaired against the edges of all tours before it, verified, and its
    /// edges are then fixed.
    ///
    /// # Errors
    ///
    /// - [`KtspError::InvalidInput`] for a malformed batch or order
    /// - [`KtspError::InfeasibleRepair`] when a tour cannot be made disjoint
    /// - [`KtspError::RepairInvariant`] when a repaired tour fails verification
    pub fn repair(&self, tours: &[Tour], order: &[usize]) -> Result<RepairResult> {
        check_order(order, tours.len())?;
        if tours.is_empty() {
            return Ok(RepairResult {
                total_cost: 0.0,
                tours: Vec::new(),
                order: Vec::new(),
            });
        }
        let n = self.check_inputs(tours)?;

        let mut fixed = FixedEdgeSet::new();
        let mut repaired: Vec<Option<Tour>> = vec![None; tours.len()];

        for (pos, &index) in order.iter().enumerate() {
            let tour = if pos == 0 {
                tours[index].clone()
            } else {
                let tour =
                    self.strategy
                        .repair_one_tour(&tours[index], index, &fixed, self.costs)?;
                tour.validate(n, index)?;
                if let Some(edge) = fixed.first_shared_edge(&tour) {
                    return Err(KtspError::RepairInvariant {
                        tour: index,
                        detail: format!("edge {edge} is already used by a finalized tour"),
                    });
                }
                tour
            };
            debug!(
                event = "tour_fixed",
                position = pos,
                tour = index,
                changed = tour != tours[index],
            );
            fixed.extend_from_tour(&tour);
            repaired[index] = Some(tour);
        }

        let tours: Vec<Tour> = repaired.into_iter().collect::<Option<_>>().ok_or_else(|| {
            KtspError::InvariantViolation("processing order skipped a tour".to_string())
        })?;

        if self.environment_mode == EnvironmentMode::FullAssert {
            verify_disjoint(&tours, n)?;
        }

        Ok(RepairResult {
            total_cost: self.costs.tour_set_cost(&tours)?,
            tours,
            order: order.to_vec(),
        })
    }
}

/// Checks that every tour is a permutation of `[0, n)` and that no edge is
/// used by two tours.
pub fn verify_disjoint(tours: &[Tour], n: usize) -> Result<()> {
    let mut owner: HashMap<Edge, usize> = HashMap::with_capacity(tours.len() * n);
    for (index, tour) in tours.iter().enumerate() {
        tour.validate(n, index)?;
        for edge in tour.edges() {
            if let Some(&first) = owner.get(&edge) {
                return Err(KtspError::RepairInvariant {
                    tour: index,
                    detail: format!("edge {edge} is also used by tour {first}"),
                });
            }
            owner.insert(edge, index);
        }
    }
    Ok(())
}

fn check_order(order: &[usize], k: usize) -> Result<()> {
    let mut seen = vec![false; k];
    if order.len() != k {
        return Err(KtspError::InvalidInput(format!(
            "processing order has {} entries for {k} tours",
            order.len()
        )));
    }
    for &index in order {
        if index >= k || seen[index] {
            return Err(KtspError::InvalidInput(format!(
                "processing order {order:?} is not a permutation of 0..{k}"
            )));
        }
        seen[index] = true;
    }
    Ok(())
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
