//! Symmetric edge-cost lookup.

use std::collections::HashMap;

use crate::edge::{Edge, Vertex};
use crate::error::{KtspError, Result};
use crate::tour::Tour;

/// Read-only cost table over unordered vertex pairs.
///
/// Costs are symmetric, finite and non-negative. A complete instance over
/// `n` vertices stores all `n * (n - 1) / 2` pairs.
///
/// # Example
///
/// ```
/// use ktsp_core::{CostModel, Tour};
///
/// let costs = CostModel::from_fn(4, |i, j| (i + j) as f64).unwrap();
/// assert_eq!(costs.edge_cost(3, 1).unwrap(), 4.0);
///
/// let tour = Tour::new(vec![0, 1, 2, 3]);
/// assert_eq!(costs.tour_cost(&tour).unwrap(), 1.0 + 3.0 + 5.0 + 3.0);
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostModel {
    n: usize,
    #[cfg_attr(feature = "serde", serde(with = "edge_table"))]
    costs: HashMap<Edge, f64>,
}

impl CostModel {
    /// Creates an empty cost table over `n` vertices.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            costs: HashMap::with_capacity(n * n.saturating_sub(1) / 2),
        }
    }

    /// Builds a complete instance by evaluating `cost(i, j)` for every `i > j`.
    pub fn from_fn<F>(n: usize, mut cost: F) -> Result<Self>
    where
        F: FnMut(Vertex, Vertex) -> f64,
    {
        let mut model = Self::new(n);
        for i in 0..n {
            for j in 0..i {
                model.insert(i, j, cost(i, j))?;
            }
        }
        Ok(model)
    }

    /// Builds a complete instance from planar points with Euclidean costs.
    pub fn euclidean(points: &[(f64, f64)]) -> Result<Self> {
        Self::from_fn(points.len(), |i, j| {
            let (xi, yi) = points[i];
            let (xj, yj) = points[j];
            (xi - xj).hypot(yi - yj)
        })
    }

    /// Records the cost of `{i, j}`, replacing any previous value.
    pub fn insert(&mut self, i: Vertex, j: Vertex, cost: f64) -> Result<()> {
        if i == j {
            return Err(KtspError::InvalidInput(format!("self-loop on vertex {i}")));
        }
        if i >= self.n || j >= self.n {
            return Err(KtspError::InvalidInput(format!(
                "edge ({i}, {j}) is out of range for {} vertices",
                self.n
            )));
        }
        if !cost.is_finite() || cost < 0.0 {
            return Err(KtspError::InvalidInput(format!(
                "edge ({i}, {j}) has invalid cost {cost}"
            )));
        }
        self.costs.insert(Edge::new(i, j), cost);
        Ok(())
    }

    /// Number of vertices in the instance.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.n
    }

    /// Number of edges with a recorded cost.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.costs.len()
    }

    /// Returns true if every pair of distinct vertices has a cost.
    pub fn is_complete(&self) -> bool {
        self.costs.len() == self.n * self.n.saturating_sub(1) / 2
    }

    /// Returns the cost of edge `{i, j}`.
    ///
    /// # Errors
    ///
    /// Returns [`KtspError::Lookup`] if the pair is absent.
    #[inline]
    pub fn edge_cost(&self, i: Vertex, j: Vertex) -> Result<f64> {
        self.cost(Edge::new(i, j))
    }

    /// Returns the cost of a canonical edge.
    #[inline]
    pub fn cost(&self, edge: Edge) -> Result<f64> {
        self.costs
            .get(&edge)
            .copied()
            .ok_or(KtspError::Lookup { edge })
    }

    /// Sums the cost of every edge of a cyclic tour.
    pub fn tour_cost(&self, tour: &Tour) -> Result<f64> {
        tour.edges().try_fold(0.0, |sum, edge| Ok(sum + self.cost(edge)?))
    }

    /// Sums [`tour_cost`](Self::tour_cost) over a batch of tours.
    pub fn tour_set_cost(&self, tours: &[Tour]) -> Result<f64> {
        tours
            .iter()
            .try_fold(0.0, |sum, tour| Ok(sum + self.tour_cost(tour)?))
    }

    /// Returns every stored edge in ascending cost, ties broken by edge order.
    pub fn edges_by_cost(&self) -> Vec<Edge> {
        let mut edges: Vec<(Edge, f64)> = self.costs.iter().map(|(&e, &c)| (e, c)).collect();
        edges.sort_unstable_by(|lhs, rhs| lhs.1.total_cmp(&rhs.1).then(lhs.0.cmp(&rhs.0)));
        edges.into_iter().map(|(edge, _)| edge).collect()
    }

    /// Iterates stored edges with their costs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (Edge, f64)> + '_ {
        self.costs.iter().map(|(&e, &c)| (e, c))
    }
}

#[cfg(feature = "serde")]
mod edge_table {
    //! Serializes the cost table as a list of `[i, j, cost]` triples, since
    //! JSON-like formats need string map keys.

    use std::collections::HashMap;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::edge::Edge;

    pub fn serialize<S: Serializer>(
        costs: &HashMap<Edge, f64>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut triples: Vec<(usize, usize, f64)> = costs
            .iter()
            .map(|(e, &c)| (e.larger(), e.smaller(), c))
            .collect();
        triples.sort_unstable_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));
        triples.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<HashMap<Edge, f64>, D::Error> {
        let triples = Vec::<(usize, usize, f64)>::deserialize(deserializer)?;
        Ok(triples
            .into_iter()
            .map(|(i, j, c)| (Edge::new(i, j), c))
            .collect())
    }
}
