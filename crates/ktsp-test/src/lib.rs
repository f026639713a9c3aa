//! Shared test fixtures for KTSP crates.
//!
//! - [`instances`] - deterministic cost models and tour generators
//! - [`assertions`] - checks on repaired tour batches
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! ktsp-test = { workspace = true }
//! ```

pub mod assertions;
pub mod instances;

pub use assertions::{assert_disjoint, assert_hamiltonian, assert_valid_batch, shared_edges};
pub use instances::{random_euclidean, random_tour, random_tours, ring_costs, seeded_rng};
