// ABOUTME: Injected lookup catalogs for foods, exercises and grocery prices
// ABOUTME: Traits the engine depends on plus immutable built-in implementations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Catalogs
//!
//! The engine never reads global lookup tables directly. Each stage receives a
//! catalog through one of the traits below, so tests can substitute small
//! fixture catalogs and deployments can plug in their own food or exercise data.

/// Grocery price table
pub mod costs;
/// Exercise database with substitutions
pub mod exercises;
/// Food composition database
pub mod foods;

pub use costs::{CostCatalog, CostTable};
pub use exercises::{Exercise, ExerciseCatalog, ExerciseDatabase};
pub use foods::{DisplayUnit, FoodCatalog, FoodDatabase, FoodItem, FoodSource};
