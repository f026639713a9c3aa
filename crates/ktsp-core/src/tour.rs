//! Cyclic tours over all vertices.

use std::ops::Deref;

use crate::edge::{Edge, Vertex};
use crate::error::{KtspError, Result};

/// An ordered sequence of vertices interpreted as a cycle.
///
/// The last vertex connects back to the first. A well-formed tour over an
/// `n`-vertex instance is a permutation of `[0, n)`; see [`Tour::validate`].
///
/// # Example
///
/// ```
/// use ktsp_core::{Edge, Tour};
///
/// let tour = Tour::new(vec![0, 2, 1]);
/// let edges: Vec<Edge> = tour.edges().collect();
/// assert_eq!(edges, vec![Edge::new(0, 2), Edge::new(2, 1), Edge::new(1, 0)]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Tour {
    vertices: Vec<Vertex>,
}

impl Tour {
    pub fn new(vertices: Vec<Vertex>) -> Self {
        Self { vertices }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn into_vertices(self) -> Vec<Vertex> {
        self.vertices
    }

    /// Iterates consecutive pairs, including the wrap-around edge.
    ///
    /// Tours with fewer than two vertices have no edges.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        let len = if self.vertices.len() < 2 {
            0
        } else {
            self.vertices.len()
        };
        (0..len).map(move |pos| {
            let next = (pos + 1) % self.vertices.len();
            Edge::new(self.vertices[pos], self.vertices[next])
        })
    }

    /// Returns true if the tour visits every vertex of `[0, n)` exactly once.
    pub fn is_permutation_of(&self, n: usize) -> bool {
        self.first_defect(n).is_none()
    }

    /// Checks that this tour is a permutation of `[0, n)`.
    ///
    /// `index` identifies the tour in error messages.
    pub fn validate(&self, n: usize, index: usize) -> Result<()> {
        match self.first_defect(n) {
            None => Ok(()),
            Some(detail) => Err(KtspError::RepairInvariant {
                tour: index,
                detail,
            }),
        }
    }

    fn first_defect(&self, n: usize) -> Option<String> {
        if self.vertices.len() != n {
            return Some(format!(
                "tour has {} vertices, expected {n}",
                self.vertices.len()
            ));
        }
        let mut seen = vec![false; n];
        for &v in &self.vertices {
            if v >= n {
                return Some(format!("vertex {v} is out of range for {n} vertices"));
            }
            if seen[v] {
                return Some(format!("vertex {v} is visited twice"));
            }
            seen[v] = true;
        }
        None
    }
}

impl Deref for Tour {
    type Target = [Vertex];

    fn deref(&self) -> &Self::Target {
        &self.vertices
    }
}

impl From<Vec<Vertex>> for Tour {
    fn from(vertices: Vec<Vertex>) -> Self {
        Self::new(vertices)
    }
}

impl FromIterator<Vertex> for Tour {
    fn from_iter<I: IntoIterator<Item = Vertex>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
