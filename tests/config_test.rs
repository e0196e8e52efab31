// ABOUTME: Integration tests for engine configuration loading and environment overrides
// ABOUTME: Serialized because they mutate process environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use std::env;

use coachplan::config::{ConfigError, EngineConfig};
use coachplan::{ErrorCode, PlanError};
use serial_test::serial;

const OVERRIDES: [&str; 5] = [
    "COACHPLAN_MAX_DEFICIT_FRACTION",
    "COACHPLAN_ENERGY_CONFIDENCE_CAP",
    "COACHPLAN_SOLVER_MAX_ITERATIONS",
    "COACHPLAN_ADVISORY_ENABLED",
    "COACHPLAN_RECOVERY_HEADROOM",
];

fn clear_overrides() {
    for name in OVERRIDES {
        env::remove_var(name);
    }
}

#[test]
#[serial]
fn test_defaults_load_without_overrides() {
    clear_overrides();
    let config = EngineConfig::load().unwrap();
    let defaults = EngineConfig::default();
    assert_eq!(
        config.calories.max_deficit_fraction,
        defaults.calories.max_deficit_fraction
    );
    assert!(!config.advisory.enabled);
}

#[test]
#[serial]
fn test_env_overrides_applied() {
    clear_overrides();
    env::set_var("COACHPLAN_MAX_DEFICIT_FRACTION", "0.15");
    env::set_var("COACHPLAN_SOLVER_MAX_ITERATIONS", "250");
    env::set_var("COACHPLAN_ADVISORY_ENABLED", "true");
    env::set_var("COACHPLAN_RECOVERY_HEADROOM", "3");

    let result = EngineConfig::load();
    clear_overrides();

    let config = result.unwrap();
    assert_eq!(config.calories.max_deficit_fraction, 0.15);
    assert_eq!(config.feasibility.max_iterations, 250);
    assert!(config.advisory.enabled);
    assert_eq!(config.modality.recovery_headroom, 3);
}

#[test]
#[serial]
fn test_unparseable_override_names_variable() {
    clear_overrides();
    env::set_var("COACHPLAN_SOLVER_MAX_ITERATIONS", "lots");

    let result = EngineConfig::load();
    clear_overrides();

    let Err(ConfigError::Parse(message)) = result else {
        panic!("expected a parse error, got {result:?}");
    };
    assert!(message.contains("COACHPLAN_SOLVER_MAX_ITERATIONS"));
}

#[test]
#[serial]
fn test_out_of_range_override_fails_validation() {
    clear_overrides();
    env::set_var("COACHPLAN_ENERGY_CONFIDENCE_CAP", "1.5");

    let result = EngineConfig::load();
    clear_overrides();

    assert!(matches!(result, Err(ConfigError::ValueOutOfRange(_))));
}

#[test]
fn test_config_error_maps_to_plan_error() {
    let error = PlanError::from(ConfigError::InvalidRange("min must be below max"));
    assert_eq!(error.code(), ErrorCode::ConfigInvalid);
    assert_eq!(error.http_status(), 500);
    assert!(!error.is_hard_stop());
    assert!(error.to_string().contains("min must be below max"));
}

#[test]
fn test_config_serializes_for_inspection() {
    let value = serde_json::to_value(EngineConfig::default()).unwrap();
    for section in [
        "energy",
        "calories",
        "macros",
        "safety",
        "feasibility",
        "training",
        "meals",
        "modality",
        "grocery",
        "advisory",
    ] {
        assert!(value.get(section).is_some(), "missing section {section}");
    }
}
