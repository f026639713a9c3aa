//! KTSP - K-way edge-disjoint traveling salesman tours
//!
//! Turns K individually optimal tours into K pairwise edge-disjoint
//! Hamiltonian cycles with a cost-greedy repair heuristic, and drives a
//! Lagrangian relaxation towards a certified gap.
//!
//! # Example
//!
//! ```rust
//! use ktsp::prelude::*;
//!
//! let costs = CostModel::from_fn(5, |i, j| {
//!     let d = i.abs_diff(j);
//!     d.min(5 - d) as f64
//! }).unwrap();
//! let tours = vec![Tour::new(vec![0, 1, 2, 3, 4]), Tour::new(vec![0, 1, 3, 2, 4])];
//!
//! let result = solve_with_config(&tours, &costs, &HeuristicConfig::default()).unwrap();
//! assert_eq!(result.total_cost, 15.0);
//! ```

// Data model
pub use ktsp_core::{CostModel, Edge, KtspError, Result, Tour, Vertex};

// Configuration
pub use ktsp_config::{
    ConfigError, EnvironmentMode, HeuristicConfig, OrderSearch, RepairStrategyKind,
    SubgradientConfig,
};

// Heuristic
pub use ktsp_solver::{
    verify_disjoint, ExchangeRepair, Multipliers, OrderSelector, Relaxation, RelaxationSolver,
    RepairResult, RepairStrategy, Strategy, SubgradientLoop, SubgradientReport,
    TourRepairEngine, UnionFindRepair,
};

#[cfg(feature = "console")]
pub mod console;

mod solver;
pub use solver::{run_subgradient, solve, solve_with_config, CONFIG_FILE};

pub mod prelude {
    pub use super::{solve, solve_with_config};
    pub use super::{CostModel, Edge, KtspError, Tour};
    pub use super::{HeuristicConfig, OrderSearch, RepairStrategyKind};
    pub use super::{OrderSelector, RepairResult, TourRepairEngine};
    pub use super::{RelaxationSolver, SubgradientLoop};
}
