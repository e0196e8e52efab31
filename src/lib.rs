// ABOUTME: Main library entry point for the coachplan training and nutrition plan engine
// ABOUTME: Wires intake adaptation, safety and feasibility gates and plan assembly stages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

// Crate-level attributes:
// - deny(unsafe_code): Zero-tolerance unsafe policy.
#![deny(unsafe_code)]

//! # Coachplan
//!
//! Deterministic generator of a 14-day training and nutrition plan from a
//! client intake profile.
//!
//! ## Pipeline
//!
//! 1. **Safety**: medical and demographic gate that can block generation
//! 2. **Energy**: ensemble resting and total energy estimate with confidence
//! 3. **Calories and macros**: goal-adjusted target and priority-ordered allocation
//! 4. **Feasibility**: bounded search over rate, timeline, sessions and protein
//! 5. **Training**: periodized resistance program for the first two weeks
//! 6. **Meals**: per-day meal plans honoring diet and allergies
//! 7. **Modality**: supplementary cardio and sport sessions without collisions
//! 8. **Grocery**: aggregated shopping list with cost estimate
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use coachplan::intake::{IntakeAdapter, IntakeRecord};
//! use coachplan::{generate, GenerationOptions};
//!
//! fn main() -> anyhow::Result<()> {
//!     let record = IntakeRecord {
//!         age: Some(28),
//!         sex: Some("male".to_owned()),
//!         weight_kg: Some(82.0),
//!         height_cm: Some(178.0),
//!         goal: Some("build muscle".to_owned()),
//!         ..IntakeRecord::default()
//!     };
//!     let (profile, _warnings) = IntakeAdapter::new().adapt(&record)?;
//!     let (bundle, warnings) = generate(&profile, &GenerationOptions::seeded(7))?;
//!     println!("{} meal days, {} warnings", bundle.meal_plans.len(), warnings.len());
//!     Ok(())
//! }
//! ```

/// Optional advisory text service with caching, timeouts and sanitization
pub mod advisory;

/// Static food, exercise and cost catalogs
pub mod catalog;

/// Engine configuration with environment overrides
pub mod config;

/// Conversational intake translation
pub mod intake;

/// Plan generation stages
pub mod intelligence;

/// Structured logging setup
pub mod logging;

/// End-to-end plan generation
pub mod orchestrator;

pub use coachplan_core::{errors, models};
pub use coachplan_core::{ErrorCode, PlanError, PlanResult};
pub use intake::{IntakeAdapter, IntakeRecord};
pub use orchestrator::{generate, GenerationOptions, PlanOrchestrator};
