//! Tests for heuristic configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        environment_mode = "full_assert"
        strategy = "union_find"
        order_search = "as_given"
        max_exhaustive_tours = 4

        [subgradient]
        step_scale = 1.5
        max_iterations = 20
        gap_tolerance = 0.001
    "#;

    let config = HeuristicConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.environment_mode, EnvironmentMode::FullAssert);
    assert_eq!(config.strategy, RepairStrategyKind::UnionFind);
    assert_eq!(config.order_search, OrderSearch::AsGiven);
    assert_eq!(config.max_exhaustive_tours, 4);
    assert_eq!(config.subgradient.step_scale, 1.5);
    assert_eq!(config.subgradient.max_iterations, 20);
    assert_eq!(config.subgradient.gap_tolerance, 0.001);
    assert!(config.is_full_assert());
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        strategy: exchange
        order_search: exhaustive
        subgradient:
          max_iterations: 10
    "#;

    let config = HeuristicConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.strategy, RepairStrategyKind::Exchange);
    assert_eq!(config.order_search, OrderSearch::Exhaustive);
    assert_eq!(config.subgradient.max_iterations, 10);
    assert_eq!(config.subgradient.gap_tolerance, 1e-5);
}

#[test]
fn test_empty_toml_is_default() {
    let config = HeuristicConfig::from_toml_str("").unwrap();
    assert_eq!(config, HeuristicConfig::default());
    assert_eq!(config.environment_mode, EnvironmentMode::FastAssert);
    assert_eq!(config.subgradient.step_scale, 2.0);
    assert_eq!(config.subgradient.max_iterations, 100);
}

#[test]
fn test_builder() {
    let config = HeuristicConfig::new()
        .with_strategy(RepairStrategyKind::UnionFind)
        .with_order_search(OrderSearch::AsGiven)
        .with_environment_mode(EnvironmentMode::FullAssert)
        .with_max_iterations(7);

    assert_eq!(config.strategy, RepairStrategyKind::UnionFind);
    assert_eq!(config.order_search, OrderSearch::AsGiven);
    assert_eq!(config.subgradient.max_iterations, 7);
    assert!(config.validate().is_ok());
}

#[test]
fn test_invalid_values_rejected() {
    let err = HeuristicConfig::from_toml_str("[subgradient]\nmax_iterations = 0\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));

    let err = HeuristicConfig::from_toml_str("[subgradient]\nstep_scale = -1.0\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));

    let err = HeuristicConfig::from_yaml_str("subgradient:\n  gap_tolerance: -0.5\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_unknown_strategy_rejected() {
    let err = HeuristicConfig::from_toml_str(r#"strategy = "simulated_annealing""#).unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn test_missing_file() {
    let err = HeuristicConfig::load("/nonexistent/ktsp.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}
