//! Cost-greedy exchange repair.
//!
//! Every fixed ("invalid") edge of the tour is paired with another invalid
//! edge and both are replaced by the cheaper of the two 2-opt reconnections
//! that keeps the tour a single cycle. Candidates live in a
//! [`CandidateQueue`] and are invalidated lazily. Invalid edges left over
//! once the queue runs dry are exchanged against valid edges, which trades
//! cost for feasibility.

use std::collections::HashSet;

use ktsp_core::{CostModel, Edge, KtspError, Result, Tour};
use tracing::{debug, trace};

use super::fixed::FixedEdgeSet;
use super::fragment::{EdgeClass, FragmentGraph};
use super::queue::{CandidateQueue, CandidateSwap};
use super::RepairStrategy;

/// Exchange-based repair strategy.
///
/// # Example
///
/// ```
/// use ktsp_core::{CostModel, Tour};
/// use ktsp_solver::repair::{ExchangeRepair, FixedEdgeSet, RepairStrategy};
///
/// let costs = CostModel::from_fn(5, |i, j| {
///     let d = i.abs_diff(j);
///     d.min(5 - d) as f64
/// }).unwrap();
///
/// let mut fixed = FixedEdgeSet::new();
/// fixed.extend_from_tour(&Tour::new(vec![0, 1, 2, 3, 4]));
///
/// let repaired = ExchangeRepair
///     .repair_one_tour(&Tour::new(vec![0, 1, 3, 2, 4]), 1, &fixed, &costs)
///     .unwrap();
/// assert!(repaired.is_permutation_of(5));
/// assert!(fixed.first_shared_edge(&repaired).is_none());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ExchangeRepair;

impl RepairStrategy for ExchangeRepair {
    fn name(&self) -> &'static str {
        "exchange"
    }

    fn repair_one_tour(
        &self,
        tour: &Tour,
        index: usize,
        fixed: &FixedEdgeSet,
        costs: &CostModel,
    ) -> Result<Tour> {
        if fixed.first_shared_edge(tour).is_none() {
            return Ok(tour.clone());
        }

        let mut search = ExchangeSearch::new(tour.len(), fixed, costs);
        for edge in tour.edges() {
            search.load(edge)?;
        }
        let initial_invalid = search.graph.invalid_count();

        search.drain_queue()?;
        search.resolve_leftovers()?;

        let unresolved = search.graph.invalid_count();
        debug!(
            event = "tour_exchanges",
            tour = index,
            invalid = initial_invalid,
            unresolved = unresolved,
            committed = search.stats.committed,
            deferred = search.stats.deferred,
            stale = search.stats.stale,
            fallback = search.stats.fallback,
        );
        if unresolved > 0 {
            return Err(KtspError::InfeasibleRepair {
                tour: index,
                unresolved,
            });
        }
        search.graph.to_tour(index)
    }
}

#[derive(Debug, Default)]
struct ExchangeStats {
    committed: u64,
    deferred: u64,
    stale: u64,
    fallback: u64,
}

/// State of one tour's exchange search.
struct ExchangeSearch<'a> {
    graph: FragmentGraph<'a>,
    costs: &'a CostModel,
    queue: CandidateQueue,
    deferred: HashSet<(Edge, Edge)>,
    stats: ExchangeStats,
}

impl<'a> ExchangeSearch<'a> {
    fn new(n: usize, fixed: &'a FixedEdgeSet, costs: &'a CostModel) -> Self {
        Self {
            graph: FragmentGraph::new(n, fixed),
            costs,
            queue: CandidateQueue::new(),
            deferred: HashSet::new(),
            stats: ExchangeStats::default(),
        }
    }

    /// Adds an original tour edge, queueing exchanges if it is invalid.
    fn load(&mut self, edge: Edge) -> Result<()> {
        let (i, j) = edge.endpoints();
        if self.graph.add_edge(i, j)? == EdgeClass::Invalid {
            self.enqueue_against_invalid(edge)?;
        }
        Ok(())
    }

    /// Queues both orientations of `edge` paired with every current invalid
    /// edge that shares no vertex with it.
    fn enqueue_against_invalid(&mut self, edge: Edge) -> Result<()> {
        let partners: Vec<Edge> = self
            .graph
            .invalid_edges()
            .filter(|other| *other != edge && !other.shares_vertex(&edge))
            .collect();

        for other in partners {
            for flipped in [false, true] {
                let swap = CandidateSwap::priced(edge, other, flipped, self.costs)?;
                // An exchange that inserts two fixed edges resolves nothing.
                let resolves = swap
                    .new_edges()
                    .iter()
                    .any(|&e| self.graph.classify(e) == EdgeClass::Valid);
                if resolves {
                    self.queue.push(swap);
                }
            }
        }
        Ok(())
    }

    fn drain_queue(&mut self) -> Result<()> {
        while let Some(swap) = self.queue.pop() {
            if !(self.graph.is_invalid(swap.first) && self.graph.is_invalid(swap.second)) {
                self.stats.stale += 1;
                continue;
            }

            self.remove_sources(&swap)?;

            if self.is_feasible(&swap)? {
                self.commit(&swap)?;
                continue;
            }
            if self.deferred.insert(swap.pair_key()) {
                trace!(
                    event = "exchange_deferred",
                    first = %swap.first,
                    second = %swap.second,
                    flipped = swap.flipped,
                );
                self.stats.deferred += 1;
                self.restore_sources(&swap)?;
                continue;
            }

            let flipped = swap.flip();
            if self.is_feasible(&flipped)? {
                self.commit(&flipped)?;
            } else {
                self.restore_sources(&swap)?;
            }
        }
        Ok(())
    }

    /// Pairs each leftover invalid edge with a valid one, accepting only
    /// reconnections made of two valid edges. Repeats while progress is made.
    fn resolve_leftovers(&mut self) -> Result<()> {
        while self.graph.invalid_count() > 0 {
            let pending: Vec<Edge> = self.graph.invalid_edges().collect();
            let mut progress = false;
            for edge in pending {
                if self.graph.is_invalid(edge) && self.resolve_with_valid(edge)? {
                    self.stats.fallback += 1;
                    progress = true;
                }
            }
            if !progress {
                break;
            }
        }
        Ok(())
    }

    fn resolve_with_valid(&mut self, edge: Edge) -> Result<bool> {
        let partners: Vec<Edge> = self
            .graph
            .valid_edges()
            .filter(|other| !other.shares_vertex(&edge))
            .collect();

        for other in partners {
            let straight = CandidateSwap {
                first: edge,
                second: other,
                flipped: false,
                cost: 0.0,
            };
            self.remove_sources(&straight)?;
            for swap in [straight, straight.flip()] {
                let all_valid = swap
                    .new_edges()
                    .iter()
                    .all(|&e| self.graph.classify(e) == EdgeClass::Valid);
                if all_valid && self.is_feasible(&swap)? {
                    self.commit(&swap)?;
                    return Ok(true);
                }
            }
            self.restore_sources(&straight)?;
        }
        Ok(false)
    }

    /// Tests a reconnection with both source edges already removed.
    fn is_feasible(&mut self, swap: &CandidateSwap) -> Result<bool> {
        let [(a, b), (c, d)] = swap.reconnection();
        if self.graph.contains(Edge::new(a, b)) || self.graph.contains(Edge::new(c, d)) {
            return Ok(false);
        }
        if self.graph.closes_premature_cycle(a, b)? {
            return Ok(false);
        }
        self.graph.add_edge(a, b)?;
        let closes = self.graph.closes_premature_cycle(c, d);
        self.graph.remove_edge(a, b)?;
        Ok(!closes?)
    }

    fn commit(&mut self, swap: &CandidateSwap) -> Result<()> {
        trace!(
            event = "exchange_committed",
            first = %swap.first,
            second = %swap.second,
            flipped = swap.flipped,
            cost = swap.cost,
        );
        self.stats.committed += 1;
        for (a, b) in swap.reconnection() {
            if self.graph.add_edge(a, b)? == EdgeClass::Invalid {
                self.enqueue_against_invalid(Edge::new(a, b))?;
            }
        }
        Ok(())
    }

    fn remove_sources(&mut self, swap: &CandidateSwap) -> Result<()> {
        let (i, j) = swap.first.endpoints();
        let (k, l) = swap.second.endpoints();
        self.graph.remove_edge(i, j)?;
        self.graph.remove_edge(k, l)
    }

    fn restore_sources(&mut self, swap: &CandidateSwap) -> Result<()> {
        let (i, j) = swap.first.endpoints();
        let (k, l) = swap.second.endpoints();
        self.graph.add_edge(i, j)?;
        self.graph.add_edge(k, l)?;
        Ok(())
    }
}
