//! Single-tour repair against a fixed-edge set.
//!
//! A repair strategy receives one tour that is individually Hamiltonian but
//! may reuse edges of tours already finalized, and returns a Hamiltonian
//! cycle over the same vertices that avoids every fixed edge.
//!
//! Two strategies are available:
//! - [`ExchangeRepair`]: cost-ordered exchanges of invalid edge pairs
//! - [`UnionFindRepair`]: greedy joining of the valid fragments

mod exchange;
mod fixed;
mod fragment;
mod queue;
mod union_find;

#[cfg(test)]
mod tests;

use std::fmt::Debug;

use ktsp_config::RepairStrategyKind;
use ktsp_core::{CostModel, Result, Tour};

pub use exchange::ExchangeRepair;
pub use fixed::FixedEdgeSet;
pub use fragment::{EdgeClass, FragmentGraph, PathEnd};
pub use queue::{CandidateQueue, CandidateSwap};
pub use union_find::{DisjointSet, UnionFindRepair};

/// Repairs one tour so that it shares no edge with `fixed`.
pub trait RepairStrategy: Send + Sync + Debug {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Returns a Hamiltonian cycle disjoint from `fixed`.
    ///
    /// `index` is the position of `tour` in the caller's input and is only
    /// used for error context. A tour without fixed edges is returned as is.
    ///
    /// # Errors
    ///
    /// [`KtspError::InfeasibleRepair`](ktsp_core::KtspError::InfeasibleRepair)
    /// when some fixed edge cannot be removed.
    fn repair_one_tour(
        &self,
        tour: &Tour,
        index: usize,
        fixed: &FixedEdgeSet,
        costs: &CostModel,
    ) -> Result<Tour>;
}

/// Configured repair strategy.
#[derive(Debug, Clone, Copy)]
pub enum Strategy {
    Exchange(ExchangeRepair),
    UnionFind(UnionFindRepair),
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::Exchange(ExchangeRepair)
    }
}

impl From<RepairStrategyKind> for Strategy {
    fn from(kind: RepairStrategyKind) -> Self {
        match kind {
            RepairStrategyKind::Exchange => Strategy::Exchange(ExchangeRepair),
            RepairStrategyKind::UnionFind => Strategy::UnionFind(UnionFindRepair),
        }
    }
}

impl RepairStrategy for Strategy {
    fn name(&self) -> &'static str {
        match self {
            Strategy::Exchange(s) => s.name(),
            Strategy::UnionFind(s) => s.name(),
        }
    }

    fn repair_one_tour(
        &self,
        tour: &Tour,
        index: usize,
        fixed: &FixedEdgeSet,
        costs: &CostModel,
    ) -> Result<Tour> {
        match self {
            Strategy::Exchange(s) => s.repair_one_tour(tour, index, fixed, costs),
            Strategy::UnionFind(s) => s.repair_one_tour(tour, index, fixed, costs),
        }
    }
}
