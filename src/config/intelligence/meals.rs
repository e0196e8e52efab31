// ABOUTME: Meal assembler configuration: calorie fractions per meal slot and portion rules
// ABOUTME: Training-day and rest-day layouts, vegetable serving, fat top-up threshold, rounding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use coachplan_core::models::MealType;
use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Meal slot with its share of the daily target
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MealSlot {
    /// Slot
    pub meal_type: MealType,
    /// Share of daily calories (0-1)
    pub fraction: f64,
}

/// Meal assembler configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealConfig {
    /// Slots on training days, in serving order
    pub training_day_slots: Vec<MealSlot>,
    /// Slots on rest days, in serving order
    pub rest_day_slots: Vec<MealSlot>,
    /// Fixed vegetable serving at lunch and dinner (g)
    pub vegetable_serving_g: f64,
    /// Fat shortfall that triggers a fat source (g)
    pub fat_shortfall_threshold_g: f64,
    /// Portion rounding step (g)
    pub portion_step_g: f64,
    /// Smallest portion served (g)
    pub min_portion_g: f64,
    /// Largest protein-source portion (g)
    pub max_protein_portion_g: f64,
    /// Largest carbohydrate-source portion (g)
    pub max_carb_portion_g: f64,
    /// Largest fat-source portion (g)
    pub max_fat_portion_g: f64,
}

impl Default for MealConfig {
    fn default() -> Self {
        let slot = |meal_type, fraction| MealSlot {
            meal_type,
            fraction,
        };
        Self {
            training_day_slots: vec![
                slot(MealType::Breakfast, 0.25),
                slot(MealType::PreWorkout, 0.10),
                slot(MealType::Lunch, 0.25),
                slot(MealType::PostWorkout, 0.15),
                slot(MealType::Dinner, 0.25),
            ],
            rest_day_slots: vec![
                slot(MealType::Breakfast, 0.25),
                slot(MealType::Lunch, 0.30),
                slot(MealType::Snack, 0.15),
                slot(MealType::Dinner, 0.30),
            ],
            vegetable_serving_g: 150.0,
            fat_shortfall_threshold_g: 5.0,
            portion_step_g: 5.0,
            min_portion_g: 10.0,
            max_protein_portion_g: 400.0,
            max_carb_portion_g: 500.0,
            max_fat_portion_g: 60.0,
        }
    }
}

impl MealConfig {
    /// Validate that each layout's fractions sum to 1
    ///
    /// # Errors
    ///
    /// Returns an error if a layout is empty or its fractions do not sum to 1.0
    pub fn validate(&self) -> Result<(), ConfigError> {
        for slots in [&self.training_day_slots, &self.rest_day_slots] {
            if slots.is_empty() {
                return Err(ConfigError::MissingField("meal slots"));
            }
            let total: f64 = slots.iter().map(|s| s.fraction).sum();
            if (total - 1.0).abs() > 0.01 {
                return Err(ConfigError::InvalidWeights(
                    "meal slot fractions must sum to 1.0",
                ));
            }
        }
        if self.portion_step_g <= 0.0 || self.min_portion_g <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "portion step and minimum must be positive",
            ));
        }
        Ok(())
    }
}
