//! Configuration system for KTSP.
//!
//! Load heuristic configuration from TOML or YAML files to choose the repair
//! strategy, the processing-order search and the subgradient parameters
//! without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use ktsp_config::{HeuristicConfig, RepairStrategyKind};
//!
//! let config = HeuristicConfig::from_toml_str(r#"
//!     strategy = "union_find"
//!     order_search = "as_given"
//!
//!     [subgradient]
//!     max_iterations = 50
//! "#).unwrap();
//!
//! assert_eq!(config.strategy, RepairStrategyKind::UnionFind);
//! assert_eq!(config.subgradient.max_iterations, 50);
//! assert_eq!(config.subgradient.step_scale, 2.0);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use ktsp_config::HeuristicConfig;
//!
//! let config = HeuristicConfig::load("ktsp.toml").unwrap_or_default();
//! assert_eq!(config.max_exhaustive_tours, 8);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Largest tour count searched exhaustively by default (8! = 40320 orders).
pub const DEFAULT_MAX_EXHAUSTIVE_TOURS: usize = 8;

/// Main heuristic configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct HeuristicConfig {
    /// Assertion level applied to inputs and outputs.
    #[serde(default)]
    pub environment_mode: EnvironmentMode,

    /// Strategy used to repair each non-baseline tour.
    #[serde(default)]
    pub strategy: RepairStrategyKind,

    /// How processing orders are explored.
    #[serde(default)]
    pub order_search: OrderSearch,

    /// Largest tour count for which every processing order is tried.
    #[serde(default = "default_max_exhaustive_tours")]
    pub max_exhaustive_tours: usize,

    /// Subgradient driver parameters.
    #[serde(default)]
    pub subgradient: SubgradientConfig,
}

fn default_max_exhaustive_tours() -> usize {
    DEFAULT_MAX_EXHAUSTIVE_TOURS
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            environment_mode: EnvironmentMode::default(),
            strategy: RepairStrategyKind::default(),
            order_search: OrderSearch::default(),
            max_exhaustive_tours: DEFAULT_MAX_EXHAUSTIVE_TOURS,
            subgradient: SubgradientConfig::default(),
        }
    }
}

impl HeuristicConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.subgradient.validate()
    }

    /// Sets the repair strategy.
    pub fn with_strategy(mut self, strategy: RepairStrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the order search mode.
    pub fn with_order_search(mut self, order_search: OrderSearch) -> Self {
        self.order_search = order_search;
        self
    }

    /// Sets the environment mode.
    pub fn with_environment_mode(mut self, mode: EnvironmentMode) -> Self {
        self.environment_mode = mode;
        self
    }

    /// Sets the subgradient iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.subgradient.max_iterations = max_iterations;
        self
    }

    /// Returns true when inputs should be fully validated.
    pub fn is_full_assert(&self) -> bool {
        self.environment_mode == EnvironmentMode::FullAssert
    }
}

/// Environment mode affecting how much checking the heuristic does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentMode {
    /// Verify every repaired tour; trust input tours to be Hamiltonian.
    #[default]
    FastAssert,

    /// Additionally validate input tours and re-verify the final batch.
    FullAssert,
}

/// Repair strategy selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RepairStrategyKind {
    /// Cost-ordered exchange of invalid edge pairs with a fallback pass.
    #[default]
    Exchange,

    /// Greedy reconnection of valid fragments guarded by a disjoint set.
    UnionFind,
}

/// Processing-order search mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderSearch {
    /// Try every permutation of the tours.
    #[default]
    Exhaustive,

    /// Process tours in the order given.
    AsGiven,
}

/// Subgradient driver configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SubgradientConfig {
    /// Step scale `pi` in `pi * (ub - lb) / |g|^2`.
    #[serde(default = "default_step_scale")]
    pub step_scale: f64,

    /// Iteration cap.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Relative gap `(ub - lb) / ub` below which the loop stops.
    #[serde(default = "default_gap_tolerance")]
    pub gap_tolerance: f64,
}

fn default_step_scale() -> f64 {
    2.0
}

fn default_max_iterations() -> u32 {
    100
}

fn default_gap_tolerance() -> f64 {
    1e-5
}

impl Default for SubgradientConfig {
    fn default() -> Self {
        Self {
            step_scale: default_step_scale(),
            max_iterations: default_max_iterations(),
            gap_tolerance: default_gap_tolerance(),
        }
    }
}

impl SubgradientConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.step_scale.is_finite() && self.step_scale > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "subgradient.step_scale must be positive, got {}",
                self.step_scale
            )));
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::Invalid(
                "subgradient.max_iterations must be at least 1".to_string(),
            ));
        }
        if !(self.gap_tolerance.is_finite() && self.gap_tolerance >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "subgradient.gap_tolerance must be non-negative, got {}",
                self.gap_tolerance
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
