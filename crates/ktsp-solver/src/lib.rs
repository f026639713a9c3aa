//! KTSP Solver - Tour-repair heuristic for the K-way disjoint TSP
//!
//! This crate turns K individually Hamiltonian tours into K pairwise
//! edge-disjoint Hamiltonian cycles:
//! - Single-tour repair strategies (exchange search, union-find joining)
//! - The repair engine processing tours against an accumulating fixed-edge set
//! - Processing-order search keeping the cheapest batch
//! - A subgradient driver pairing the heuristic with a Lagrangian relaxation

pub mod engine;
pub mod order;
pub mod repair;
pub mod subgradient;

pub use engine::{verify_disjoint, RepairResult, TourRepairEngine};
pub use order::{next_permutation, OrderSelector, Permutations};
pub use repair::{
    CandidateQueue, CandidateSwap, DisjointSet, EdgeClass, ExchangeRepair, FixedEdgeSet,
    FragmentGraph, PathEnd, RepairStrategy, Strategy, UnionFindRepair,
};
pub use subgradient::{
    Multipliers, Relaxation, RelaxationSolver, SubgradientLoop, SubgradientReport,
};

