// ABOUTME: Configuration management module for plan generation settings
// ABOUTME: Exposes the validated engine configuration and its per-component sections
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//! Configuration module for the plan generation engine
//!
//! - **Intelligence**: per-stage algorithm constants with environment overrides

/// Engine configuration for every generation stage
pub mod intelligence;

pub use intelligence::{ConfigError, EngineConfig};
