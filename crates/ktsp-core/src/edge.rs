//! Canonical undirected edges.

use std::fmt;

/// Vertex identifier in `[0, n)`.
pub type Vertex = usize;

/// An unordered pair of distinct vertices, stored as `(max, min)`.
///
/// Ordering is lexicographic on the canonical pair, so sets and queues of
/// edges iterate deterministically.
///
/// # Example
///
/// ```
/// use ktsp_core::Edge;
///
/// let e = Edge::new(2, 7);
/// assert_eq!(e, Edge::new(7, 2));
/// assert_eq!((e.larger(), e.smaller()), (7, 2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge(Vertex, Vertex);

impl Edge {
    /// Creates the canonical edge between `a` and `b`.
    #[inline]
    pub fn new(a: Vertex, b: Vertex) -> Self {
        debug_assert_ne!(a, b, "self-loop edge ({a}, {b})");
        if a >= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }

    #[inline]
    pub fn larger(&self) -> Vertex {
        self.0
    }

    #[inline]
    pub fn smaller(&self) -> Vertex {
        self.1
    }

    /// Returns both endpoints as `(max, min)`.
    #[inline]
    pub fn endpoints(&self) -> (Vertex, Vertex) {
        (self.0, self.1)
    }

    #[inline]
    pub fn contains(&self, v: Vertex) -> bool {
        self.0 == v || self.1 == v
    }

    /// Returns true if the two edges have an endpoint in common.
    #[inline]
    pub fn shares_vertex(&self, other: &Edge) -> bool {
        self.contains(other.0) || self.contains(other.1)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

impl From<(Vertex, Vertex)> for Edge {
    fn from((a, b): (Vertex, Vertex)) -> Self {
        Edge::new(a, b)
    }
}
