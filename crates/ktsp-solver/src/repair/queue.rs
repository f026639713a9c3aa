//! Cost-ordered queue of 2-edge exchanges.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ktsp_core::{CostModel, Edge, Result, Vertex};

/// A prospective exchange of two edges of the tour under repair.
///
/// With `first = (i, j)` and `second = (k, l)` in canonical order, the
/// non-flipped reconnection inserts `(i, k)` and `(j, l)`, the flipped one
/// inserts `(i, l)` and `(j, k)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateSwap {
    pub first: Edge,
    pub second: Edge,
    pub flipped: bool,
    /// Summed cost of the two inserted edges.
    pub cost: f64,
}

impl CandidateSwap {
    /// Builds the candidate for one orientation, pricing its new edges.
    pub fn priced(first: Edge, second: Edge, flipped: bool, costs: &CostModel) -> Result<Self> {
        let mut swap = Self {
            first,
            second,
            flipped,
            cost: 0.0,
        };
        let [(a, b), (c, d)] = swap.reconnection();
        swap.cost = costs.edge_cost(a, b)? + costs.edge_cost(c, d)?;
        Ok(swap)
    }

    /// Endpoint pairs of the two inserted edges.
    pub fn reconnection(&self) -> [(Vertex, Vertex); 2] {
        let (i, j) = self.first.endpoints();
        let (k, l) = self.second.endpoints();
        if self.flipped {
            [(i, l), (j, k)]
        } else {
            [(i, k), (j, l)]
        }
    }

    /// The two inserted edges.
    pub fn new_edges(&self) -> [Edge; 2] {
        let [(a, b), (c, d)] = self.reconnection();
        [Edge::new(a, b), Edge::new(c, d)]
    }

    /// The same edge pair with the other orientation. The cost is kept, as it
    /// only matters for queue order.
    pub fn flip(self) -> Self {
        Self {
            flipped: !self.flipped,
            ..self
        }
    }

    /// Unordered key of the removed edge pair.
    pub fn pair_key(&self) -> (Edge, Edge) {
        if self.first <= self.second {
            (self.first, self.second)
        } else {
            (self.second, self.first)
        }
    }
}

/// Heap entry; cheaper first, then earlier insertion first.
#[derive(Debug)]
struct QueuedSwap {
    swap: CandidateSwap,
    seq: u64,
}

impl PartialEq for QueuedSwap {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueuedSwap {}

impl PartialOrd for QueuedSwap {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedSwap {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap, so both keys are reversed.
        other
            .swap
            .cost
            .total_cmp(&self.swap.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Min-priority queue of [`CandidateSwap`]s keyed by new-edge cost.
///
/// Entries are never removed eagerly; consumers skip stale entries on pop.
#[derive(Debug, Default)]
pub struct CandidateQueue {
    heap: BinaryHeap<QueuedSwap>,
    next_seq: u64,
}

impl CandidateQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, swap: CandidateSwap) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(QueuedSwap { swap, seq });
    }

    /// Removes the cheapest candidate; ties go to the earliest pushed.
    pub fn pop(&mut self) -> Option<CandidateSwap> {
        self.heap.pop().map(|entry| entry.swap)
    }

    pub fn peek(&self) -> Option<&CandidateSwap> {
        self.heap.peek().map(|entry| &entry.swap)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Total number of candidates ever pushed.
    pub fn pushed(&self) -> u64 {
        self.next_seq
    }
}
