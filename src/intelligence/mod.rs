// ABOUTME: Plan generation stages: energy, calories, macros, safety, feasibility and scheduling
// ABOUTME: Re-exports each stage's entry points for the orchestrator and integration tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Intelligence Module
//!
//! Every algorithmic stage of plan generation. Each stage is a pure function
//! (or a small struct borrowing its config and catalogs) that consumes the
//! previous stage's immutable output.

/// Calorie target and rate-of-change derivation
pub mod calorie_target;
/// Ensemble resting and total energy estimation
pub mod energy_estimator;
/// Constraint search over goal, schedule and diet
pub mod feasibility_solver;
/// Shopping list aggregation
pub mod grocery_aggregator;
/// Priority-ordered macro allocation
pub mod macro_allocator;
/// Daily meal assembly
pub mod meal_assembler;
/// Supplementary session placement
pub mod modality_planner;
/// Medical and demographic safety gate
pub mod safety_validator;
/// Periodized resistance program generation
pub mod training_generator;

pub use calorie_target::{derive_calorie_target, proposed_weekly_change_percent};
pub use energy_estimator::{activity_multiplier, estimate_energy, EnergyInput};
pub use feasibility_solver::{FeasibilityRequest, FeasibilitySolver};
pub use grocery_aggregator::GroceryAggregator;
pub use macro_allocator::{allocate_macros, MacroInput};
pub use meal_assembler::{MealAssembler, MealRequest};
pub use modality_planner::{ModalityPlanner, ModalityRequest};
pub use safety_validator::validate_safety;
pub use training_generator::{select_split, TrainingGenerator, TrainingRequest};
