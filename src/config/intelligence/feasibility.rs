// ABOUTME: Feasibility solver configuration: search budget, rate limits and schedule bounds
// ABOUTME: Caps on weekly loss/gain, session capacity by tier, timeline slack and trade-off count
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Feasibility Solver Configuration
//!
//! # Scientific References
//!
//! - Rate of loss: Garthe et al. (2011) DOI: 10.1123/ijsnem.21.2.97
//! - Rate of gain: Iraki et al. (2019) DOI: 10.3390/sports7070154

use serde::{Deserialize, Serialize};

/// Feasibility solver configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeasibilityConfig {
    /// Maximum candidate assignments examined
    pub max_iterations: u32,
    /// Wall-clock budget for the search (milliseconds)
    pub timeout_ms: u64,
    /// Fastest safe weekly loss (% of body weight)
    pub max_loss_percent_per_week: f64,
    /// Fastest productive weekly gain for beginners (% of body weight)
    pub max_gain_percent_beginner: f64,
    /// Fastest productive weekly gain for intermediates (% of body weight)
    pub max_gain_percent_intermediate: f64,
    /// Fastest productive weekly gain for advanced lifters (% of body weight)
    pub max_gain_percent_advanced: f64,
    /// Shortest productive session (minutes)
    pub min_session_minutes: u32,
    /// Longest productive session (minutes)
    pub max_session_minutes: u32,
    /// Step between session-length candidates (minutes)
    pub session_minutes_step: u32,
    /// Recoverable sessions per week for beginners
    pub max_sessions_beginner: u8,
    /// Recoverable sessions per week for intermediates
    pub max_sessions_intermediate: u8,
    /// Recoverable sessions per week for advanced lifters
    pub max_sessions_advanced: u8,
    /// Largest accepted timeline stretch before the goal is infeasible
    pub max_timeline_extension: f64,
    /// Practical protein ceiling on plant-only diets (g/kg)
    pub plant_protein_ceiling_g_per_kg: f64,
    /// Intake ceiling as a fraction above TDEE
    pub calorie_ceiling_fraction: f64,
    /// Most trade-off options returned for an infeasible request
    pub max_trade_offs: usize,
    /// Step between weekly rate candidates (kg)
    pub rate_step_kg: f64,
}

impl Default for FeasibilityConfig {
    fn default() -> Self {
        Self {
            max_iterations: 5_000,
            timeout_ms: 250,
            max_loss_percent_per_week: 1.0,
            max_gain_percent_beginner: 0.5,
            max_gain_percent_intermediate: 0.4,
            max_gain_percent_advanced: 0.25,
            min_session_minutes: 30,
            max_session_minutes: 120,
            session_minutes_step: 15,
            max_sessions_beginner: 5,
            max_sessions_intermediate: 6,
            max_sessions_advanced: 7,
            max_timeline_extension: 1.5,
            plant_protein_ceiling_g_per_kg: 2.2,
            calorie_ceiling_fraction: 0.20,
            max_trade_offs: 3,
            rate_step_kg: 0.05,
        }
    }
}
