//! Edges committed by tours already finalized in a processing order.

use std::collections::HashSet;

use ktsp_core::{Edge, Tour};

/// Set of edges belonging to finalized tours.
///
/// Grows monotonically during one processing-order trial and is created
/// fresh for every trial.
#[derive(Debug, Clone, Default)]
pub struct FixedEdgeSet {
    edges: HashSet<Edge>,
}

impl FixedEdgeSet {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn contains(&self, edge: Edge) -> bool {
        self.edges.contains(&edge)
    }

    /// Adds every edge of `tour`.
    pub fn extend_from_tour(&mut self, tour: &Tour) {
        self.edges.extend(tour.edges());
    }

    /// Returns the first edge of `tour` already present in the set.
    pub fn first_shared_edge(&self, tour: &Tour) -> Option<Edge> {
        tour.edges().find(|&e| self.contains(e))
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

impl FromIterator<Edge> for FixedEdgeSet {
    fn from_iter<I: IntoIterator<Item = Edge>>(iter: I) -> Self {
        Self {
            edges: iter.into_iter().collect(),
        }
    }
}
