//! Subgradient driver for the Lagrangian dual.
//!
//! The edge-disjointness constraints `sum_k x_e^k <= 1` are dualized with
//! multipliers `u_e >= 0`. Each iteration asks a [`RelaxationSolver`] for K
//! individually Hamiltonian tours under the current penalties (a lower
//! bound), repairs them with an [`OrderSelector`] (an upper bound), and moves
//! the multipliers along the subgradient.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use ktsp_config::{HeuristicConfig, SubgradientConfig};
use ktsp_core::{CostModel, Edge, KtspError, Result, Tour};
use tracing::info;

use crate::engine::RepairResult;
use crate::order::OrderSelector;
use crate::repair::{RepairStrategy, Strategy};

/// Tours and objective of one relaxed solve.
#[derive(Debug, Clone)]
pub struct Relaxation {
    /// K tours, each a Hamiltonian cycle; they may share edges.
    pub tours: Vec<Tour>,
    /// Objective of the penalized relaxation, a lower bound.
    pub objective: f64,
}

/// Solver of the relaxed K-TSP under edge penalties.
///
/// Implementations typically wrap a MIP solver with degree constraints and
/// lazy subtour-elimination cuts.
pub trait RelaxationSolver {
    /// Solves the relaxation with objective `sum c_e x_e + sum u_e (sum_k x_e^k - 1)`.
    fn solve(&mut self, multipliers: &Multipliers) -> Result<Relaxation>;
}

/// Lagrange multipliers, one per edge of the instance.
#[derive(Debug, Clone, Default)]
pub struct Multipliers {
    values: HashMap<Edge, f64>,
}

impl Multipliers {
    /// All-zero multipliers over every edge of `costs`.
    pub fn zeros(costs: &CostModel) -> Self {
        Self {
            values: costs.iter().map(|(edge, _)| (edge, 0.0)).collect(),
        }
    }

    /// Multiplier of `edge`; zero if the edge is unknown.
    pub fn get(&self, edge: Edge) -> f64 {
        self.values.get(&edge).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Edge, f64)> + '_ {
        self.values.iter().map(|(&e, &u)| (e, u))
    }

    /// Sum of all multipliers.
    pub fn total(&self) -> f64 {
        self.values.values().sum()
    }

    /// Projected step `u_e = max(0, u_e + step * g_e)`.
    pub fn step(&mut self, subgradient: &HashMap<Edge, f64>, step: f64) {
        for (edge, u) in self.values.iter_mut() {
            let g = subgradient.get(edge).copied().unwrap_or(0.0);
            *u = (*u + step * g).max(0.0);
        }
    }
}

/// Subgradient `g_e = (number of tours using e) - 1` over every edge.
pub fn subgradient(tours: &[Tour], costs: &CostModel) -> HashMap<Edge, f64> {
    let mut uses: HashMap<Edge, usize> = HashMap::new();
    for tour in tours {
        for edge in tour.edges() {
            *uses.entry(edge).or_insert(0) += 1;
        }
    }
    costs
        .iter()
        .map(|(edge, _)| (edge, uses.get(&edge).copied().unwrap_or(0) as f64 - 1.0))
        .collect()
}

/// Relative gap `(ub - lb) / ub`, zero when the upper bound is zero.
pub fn relative_gap(upper: f64, lower: f64) -> f64 {
    if upper > 0.0 {
        (upper - lower) / upper
    } else {
        0.0
    }
}

/// Outcome of a subgradient run.
#[derive(Debug, Clone)]
pub struct SubgradientReport {
    /// Best relaxed objective seen.
    pub best_lower_bound: f64,
    /// Relaxed tours that produced `best_lower_bound`.
    pub lower_bound_tours: Vec<Tour>,
    /// Cheapest repaired batch seen.
    pub best_upper_bound: RepairResult,
    pub iterations: u32,
    /// Relative gap between the two best bounds.
    pub gap: f64,
    pub duration: Duration,
}

/// Drives a [`RelaxationSolver`] and the repair heuristic to convergence.
#[derive(Debug, Clone)]
pub struct SubgradientLoop<'a, R = Strategy> {
    selector: OrderSelector<'a, R>,
    config: SubgradientConfig,
}

impl<'a> SubgradientLoop<'a, Strategy> {
    pub fn new(costs: &'a CostModel) -> Self {
        Self::with_selector(OrderSelector::new(costs), SubgradientConfig::default())
    }

    pub fn from_config(costs: &'a CostModel, config: &HeuristicConfig) -> Self {
        Self::with_selector(
            OrderSelector::from_config(costs, config),
            config.subgradient.clone(),
        )
    }
}

impl<'a, R: RepairStrategy> SubgradientLoop<'a, R> {
    pub fn with_selector(selector: OrderSelector<'a, R>, config: SubgradientConfig) -> Self {
        Self { selector, config }
    }

    pub fn config(&self) -> &SubgradientConfig {
        &self.config
    }

    /// Runs until the gap closes below the tolerance, the iteration cap is
    /// reached, or the subgradient vanishes.
    ///
    /// # Errors
    ///
    /// Propagates errors of the relaxation solver and of the heuristic,
    /// including [`KtspError::InfeasibleRepair`].
    pub fn run<S: RelaxationSolver>(&self, solver: &mut S) -> Result<SubgradientReport> {
        let costs = self.selector.engine().costs();
        let mut multipliers = Multipliers::zeros(costs);
        let mut best_upper: Option<RepairResult> = None;
        let mut best_lower = f64::NEG_INFINITY;
        let mut lower_tours = Vec::new();
        let mut iterations = 0;

        let start = Instant::now();
        info!(
            event = "subgradient_start",
            max_iterations = self.config.max_iterations,
            step_scale = self.config.step_scale,
            gap_tolerance = self.config.gap_tolerance,
        );

        for iteration in 0..self.config.max_iterations {
            iterations = iteration + 1;

            let relaxation = solver.solve(&multipliers)?;
            let lower = relaxation.objective;
            if lower > best_lower {
                best_lower = lower;
                lower_tours = relaxation.tours.clone();
            }

            let candidate = self.selector.solve(&relaxation.tours)?;
            let upper = match best_upper {
                Some(ref best) if best.total_cost <= candidate.total_cost => best.total_cost,
                _ => {
                    let cost = candidate.total_cost;
                    best_upper = Some(candidate);
                    cost
                }
            };

            let gap = relative_gap(upper, lower);
            info!(
                event = "subgradient_iteration",
                iteration = iterations,
                lower_bound = lower,
                upper_bound = upper,
                gap = gap,
            );
            if gap < self.config.gap_tolerance {
                break;
            }

            let g = subgradient(&relaxation.tours, costs);
            let norm: f64 = g.values().map(|v| v * v).sum();
            if norm == 0.0 {
                break;
            }
            let step = self.config.step_scale * (upper - lower) / norm;
            multipliers.step(&g, step);
        }

        let best_upper_bound = best_upper.ok_or_else(|| {
            KtspError::InvariantViolation("subgradient loop ran no iteration".to_string())
        })?;
        let gap = relative_gap(best_upper_bound.total_cost, best_lower);
        let duration = start.elapsed();

        info!(
            event = "subgradient_end",
            iterations = iterations,
            lower_bound = best_lower,
            upper_bound = best_upper_bound.total_cost,
            gap = gap,
            duration_ms = duration.as_millis() as u64,
        );

        Ok(SubgradientReport {
            best_lower_bound: best_lower,
            lower_bound_tours: lower_tours,
            best_upper_bound,
            iterations,
            gap,
            duration,
        })
    }
}

#[cfg(test)]
mod tests;
