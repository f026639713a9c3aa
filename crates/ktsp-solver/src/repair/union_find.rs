//! Greedy fragment-joining repair guarded by a disjoint set.
//!
//! The tour's fixed edges are dropped, leaving valid path fragments. Edges
//! of the whole instance are then scanned in ascending cost and accepted when
//! they are valid, join two fragment ends and do not close a cycle. Simpler
//! than the exchange search and usually costlier, since it discards the
//! tour's structure around every shared edge.

use ktsp_core::{CostModel, Edge, KtspError, Result, Tour, Vertex};
use tracing::debug;

use super::fixed::FixedEdgeSet;
use super::fragment::{EdgeClass, FragmentGraph};
use super::RepairStrategy;

/// Disjoint-set forest over vertices tracking fragment membership and size.
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl DisjointSet {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    /// Returns the representative of `x`, compressing the path to it.
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut cur = x;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    /// Merges the sets of `a` and `b`; returns false if they were already one.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let mut root_a = self.find(a);
        let mut root_b = self.find(b);
        if root_a == root_b {
            return false;
        }
        if self.size[root_a] < self.size[root_b] {
            std::mem::swap(&mut root_a, &mut root_b);
        }
        self.parent[root_b] = root_a;
        self.size[root_a] += self.size[root_b];
        true
    }

    pub fn same(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }

    /// Number of vertices in the set containing `x`.
    pub fn size_of(&mut self, x: usize) -> usize {
        let root = self.find(x);
        self.size[root]
    }
}

/// Union-find repair strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnionFindRepair;

impl RepairStrategy for UnionFindRepair {
    fn name(&self) -> &'static str {
        "union_find"
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

        let n = tour.len();
        let mut graph = FragmentGraph::new(n, fixed);
        let mut fragments = DisjointSet::new(n);
        let mut edge_count = 0;

        for edge in tour.edges() {
            if graph.classify(edge) == EdgeClass::Valid {
                let (i, j) = edge.endpoints();
                graph.add_edge(i, j)?;
                fragments.union(i, j);
                edge_count += 1;
            }
        }
        let kept = edge_count;

        for edge in costs.edges_by_cost() {
            if edge_count + 1 >= n {
                break;
            }
            let (i, j) = edge.endpoints();
            if i >= n
                || graph.classify(edge) == EdgeClass::Invalid
                || graph.degree(i) >= 2
                || graph.degree(j) >= 2
                || fragments.same(i, j)
            {
                continue;
            }
            graph.add_edge(i, j)?;
            fragments.union(i, j);
            edge_count += 1;
        }

        debug!(
            event = "tour_joined",
            tour = index,
            kept = kept,
            joined = edge_count - kept,
            spanning = fragments.size_of(0),
        );

        if edge_count + 1 < n {
            return Err(KtspError::InfeasibleRepair {
                tour: index,
                unresolved: n - 1 - edge_count,
            });
        }

        let (a, b) = open_ends(&graph)?;
        if graph.classify(Edge::new(a, b)) == EdgeClass::Invalid {
            return Err(KtspError::InfeasibleRepair {
                tour: index,
                unresolved: 1,
            });
        }
        graph.add_edge(a, b)?;
        graph.to_tour(index)
    }
}

/// The two ends of a Hamiltonian path.
fn open_ends(graph: &FragmentGraph<'_>) -> Result<(Vertex, Vertex)> {
    let mut ends = (0..graph.vertex_count()).filter(|&v| graph.degree(v) < 2);
    match (ends.next(), ends.next(), ends.next()) {
        (Some(a), Some(b), None) => Ok((a, b)),
        _ => Err(KtspError::InvariantViolation(
            "joined fragments do not form a single path".to_string(),
        )),
    }
}
