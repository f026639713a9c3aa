//! Entry points that hide the engine wiring.

use ktsp_config::HeuristicConfig;
use ktsp_core::{CostModel, Result, Tour};
use ktsp_solver::{OrderSelector, RelaxationSolver, RepairResult, SubgradientLoop, SubgradientReport};
use tracing::warn;

/// Configuration file read by [`solve`] and [`run_subgradient`].
pub const CONFIG_FILE: &str = "ktsp.toml";

fn load_config() -> HeuristicConfig {
    match HeuristicConfig::load(CONFIG_FILE) {
        Ok(config) => config,
        Err(ktsp_config::ConfigError::Io(_)) => HeuristicConfig::default(),
        Err(err) => {
            warn!(event = "config_ignored", file = CONFIG_FILE, error = %err);
            HeuristicConfig::default()
        }
    }
}

/// Repairs `tours` into a pairwise edge-disjoint batch.
///
/// Settings come from `ktsp.toml` in the working directory, falling back to
/// defaults when the file is absent or unreadable.
pub fn solve(tours: &[Tour], costs: &CostModel) -> Result<RepairResult> {
    solve_with_config(tours, costs, &load_config())
}

/// Repairs `tours` with explicit settings.
pub fn solve_with_config(
    tours: &[Tour],
    costs: &CostModel,
    config: &HeuristicConfig,
) -> Result<RepairResult> {
    #[cfg(feature = "console")]
    crate::console::init();

    OrderSelector::from_config(costs, config).solve(tours)
}

/// Runs the subgradient loop with settings from `ktsp.toml`.
pub fn run_subgradient<S: RelaxationSolver>(
    costs: &CostModel,
    relaxation: &mut S,
) -> Result<SubgradientReport> {
    #[cfg(feature = "console")]
    crate::console::init();

    SubgradientLoop::from_config(costs, &load_config()).run(relaxation)
}
