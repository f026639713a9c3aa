//! Adjacency of the tour under repair.
//!
//! A [`FragmentGraph`] holds the open path fragments (and, transiently,
//! closed sub-cycles) of one tour while its shared edges are being replaced.
//! Each vertex keeps at most two neighbors; edges are classified against the
//! [`FixedEdgeSet`] of the current processing order as they are added.

use std::collections::BTreeSet;

use ktsp_core::{Edge, KtspError, Result, Tour, Vertex};
use smallvec::SmallVec;

use super::fixed::FixedEdgeSet;

/// Classification of an edge against the fixed-edge set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeClass {
    /// Not used by any finalized tour.
    Valid,
    /// Already used by a finalized tour.
    Invalid,
}

/// Far end of a path fragment, as found by [`FragmentGraph::path_endpoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathEnd {
    /// The open end reached by the walk.
    pub vertex: Vertex,
    /// Number of vertices on the fragment, both ends included.
    pub length: usize,
}

/// Per-repair adjacency structure with valid/invalid edge bookkeeping.
#[derive(Debug, Clone)]
pub struct FragmentGraph<'a> {
    neighbors: Vec<SmallVec<[Vertex; 2]>>,
    fixed: &'a FixedEdgeSet,
    valid: BTreeSet<Edge>,
    invalid: BTreeSet<Edge>,
}

impl<'a> FragmentGraph<'a> {
    /// Creates an edgeless graph over `n` vertices.
    pub fn new(n: usize, fixed: &'a FixedEdgeSet) -> Self {
        Self {
            neighbors: vec![SmallVec::new(); n],
            fixed,
            valid: BTreeSet::new(),
            invalid: BTreeSet::new(),
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.neighbors.len()
    }

    #[inline]
    pub fn degree(&self, v: Vertex) -> usize {
        self.neighbors[v].len()
    }

    #[inline]
    pub fn neighbors(&self, v: Vertex) -> &[Vertex] {
        &self.neighbors[v]
    }

    /// Valid iff the edge is not in the fixed-edge set.
    #[inline]
    pub fn classify(&self, edge: Edge) -> EdgeClass {
        if self.fixed.contains(edge) {
            EdgeClass::Invalid
        } else {
            EdgeClass::Valid
        }
    }

    /// Returns true if the edge is currently part of the graph.
    #[inline]
    pub fn contains(&self, edge: Edge) -> bool {
        self.valid.contains(&edge) || self.invalid.contains(&edge)
    }

    /// Returns true if the edge is currently part of the graph and fixed.
    #[inline]
    pub fn is_invalid(&self, edge: Edge) -> bool {
        self.invalid.contains(&edge)
    }

    /// Invalid edges present in the graph, in edge order.
    pub fn invalid_edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.invalid.iter().copied()
    }

    /// Valid edges present in the graph, in edge order.
    pub fn valid_edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.valid.iter().copied()
    }

    #[inline]
    pub fn invalid_count(&self) -> usize {
        self.invalid.len()
    }

    /// Connects `i` and `j` and records the edge as valid or invalid.
    ///
    /// # Errors
    ///
    /// [`KtspError::InvariantViolation`] if a vertex is out of range, the
    /// edge is already present, or either endpoint already has two neighbors.
    pub fn add_edge(&mut self, i: Vertex, j: Vertex) -> Result<EdgeClass> {
        let n = self.vertex_count();
        if i == j || i >= n || j >= n {
            return Err(KtspError::InvariantViolation(format!(
                "cannot add edge ({i}, {j}) to a graph over {n} vertices"
            )));
        }
        let edge = Edge::new(i, j);
        if self.contains(edge) {
            return Err(KtspError::InvariantViolation(format!(
                "edge {edge} is already part of the tour"
            )));
        }
        for v in [i, j] {
            if self.degree(v) >= 2 {
                return Err(KtspError::InvariantViolation(format!(
                    "vertex {v} already has neighbors {:?}, cannot add edge {edge}",
                    self.neighbors[v].as_slice()
                )));
            }
        }

        self.neighbors[i].push(j);
        self.neighbors[j].push(i);
        let class = self.classify(edge);
        match class {
            EdgeClass::Valid => self.valid.insert(edge),
            EdgeClass::Invalid => self.invalid.insert(edge),
        };
        Ok(class)
    }

    /// Disconnects `i` and `j`; the edge must have been added before.
    pub fn remove_edge(&mut self, i: Vertex, j: Vertex) -> Result<()> {
        let edge = Edge::new(i, j);
        if !self.valid.remove(&edge) && !self.invalid.remove(&edge) {
            return Err(KtspError::InvariantViolation(format!(
                "edge {edge} is not part of the tour"
            )));
        }
        for (from, to) in [(i, j), (j, i)] {
            if let Some(pos) = self.neighbors[from].iter().position(|&w| w == to) {
                self.neighbors[from].remove(pos);
            }
        }
        Ok(())
    }

    /// Walks the fragment starting at `v` until an open end is reached.
    ///
    /// `v` is expected to be a fragment end (degree below two). At each step
    /// the walk takes the neighbor it did not arrive from.
    ///
    /// # Errors
    ///
    /// [`KtspError::InvariantViolation`] if the walk returns to `v`, i.e. `v`
    /// lies on a closed sub-cycle.
    pub fn path_endpoint(&self, v: Vertex) -> Result<PathEnd> {
        let n = self.vertex_count();
        let mut prev = v;
        let mut cur = v;
        let mut length = 1;

        loop {
            let next = match self.neighbors[cur].as_slice() {
                [] => return Ok(PathEnd { vertex: cur, length }),
                [only] if cur == v => *only,
                [_] => return Ok(PathEnd { vertex: cur, length }),
                [first, _] if cur == v => *first,
                [first, second] => {
                    if *first == prev {
                        *second
                    } else {
                        *first
                    }
                }
                more => {
                    return Err(KtspError::InvariantViolation(format!(
                        "vertex {cur} has {} neighbors",
                        more.len()
                    )))
                }
            };
            if next == v || length > n {
                return Err(KtspError::InvariantViolation(format!(
                    "vertex {v} lies on a closed sub-cycle"
                )));
            }
            prev = cur;
            cur = next;
            length += 1;
        }
    }

    /// Returns true if connecting `a` to `b` would close a cycle over fewer
    /// than all vertices.
    pub fn closes_premature_cycle(&self, a: Vertex, b: Vertex) -> Result<bool> {
        let end = self.path_endpoint(a)?;
        Ok(end.vertex == b && end.length < self.vertex_count())
    }

    /// Reads the repaired cyclic order, starting from vertex 0.
    ///
    /// `index` identifies the tour in error messages.
    ///
    /// # Errors
    ///
    /// [`KtspError::RepairInvariant`] if some vertex does not have exactly
    /// two neighbors or the walk from vertex 0 closes before visiting all
    /// vertices.
    pub fn to_tour(&self, index: usize) -> Result<Tour> {
        let n = self.vertex_count();
        if let Some(v) = (0..n).find(|&v| self.degree(v) != 2) {
            return Err(KtspError::RepairInvariant {
                tour: index,
                detail: format!("vertex {v} has degree {}", self.degree(v)),
            });
        }
        if n == 0 {
            return Ok(Tour::default());
        }

        let mut order = Vec::with_capacity(n);
        order.push(0);
        let mut prev = 0;
        let mut cur = self.neighbors[0][0];
        while cur != 0 && order.len() < n {
            order.push(cur);
            let nbrs = &self.neighbors[cur];
            let next = if nbrs[0] == prev { nbrs[1] } else { nbrs[0] };
            prev = cur;
            cur = next;
        }

        if cur != 0 || order.len() != n {
            return Err(KtspError::RepairInvariant {
                tour: index,
                detail: format!(
                    "walk from vertex 0 covers {} of {n} vertices",
                    order.len()
                ),
            });
        }
        Ok(Tour::new(order))
    }
}
