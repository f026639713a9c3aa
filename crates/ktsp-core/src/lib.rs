//! KTSP Core - Core types for the K-way disjoint traveling salesman problem
//!
//! This crate provides the data model shared by every other KTSP crate:
//! - [`Edge`] for canonical undirected vertex pairs
//! - [`Tour`] for cyclic vertex permutations
//! - [`CostModel`] for symmetric edge-cost lookup
//! - [`KtspError`] for the error taxonomy of the repair heuristic

pub mod cost;
pub mod edge;
pub mod error;
pub mod tour;

#[cfg(test)]
mod tests;

pub use cost::CostModel;
pub use edge::{Edge, Vertex};
pub use error::{KtspError, Result};
pub use tour::Tour;
