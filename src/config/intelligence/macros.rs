// ABOUTME: Calorie target and macro allocation configuration for the nutrition stages
// ABOUTME: Goal deficits and surpluses, protein g/kg bands, hormonal fat floors, nutrient timing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Calorie Target and Macronutrient Configuration
//!
//! # Scientific References
//!
//! - Protein: Morton et al. (2018) DOI: 10.1136/bjsports-2017-097608
//! - Protein in deficit: Helms et al. (2014) DOI: 10.1186/1550-2783-11-20
//! - Older adults: Bauer et al. (2013) DOI: 10.1016/j.jamda.2013.05.021
//! - Timing: Kerksick et al. (2017) DOI: 10.1186/s12970-017-0189-4

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Calorie target derivation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalorieConfig {
    /// Weekly loss rate used when no target weight is given (% of body weight)
    pub default_loss_rate_percent: f64,
    /// Largest deficit as a fraction of TDEE (0.25)
    pub max_deficit_fraction: f64,
    /// Beginner surplus as a fraction of TDEE
    pub surplus_beginner: f64,
    /// Intermediate surplus as a fraction of TDEE
    pub surplus_intermediate: f64,
    /// Advanced surplus as a fraction of TDEE
    pub surplus_advanced: f64,
    /// Largest surplus as a fraction of TDEE (0.15)
    pub max_surplus_fraction: f64,
    /// Recomposition deficit as a fraction of TDEE
    pub recomposition_deficit_fraction: f64,
    /// Performance fuelling surplus as a fraction of TDEE
    pub performance_surplus_fraction: f64,
    /// Minimum daily intake for males (kcal)
    pub calorie_floor_male: f64,
    /// Minimum daily intake for females (kcal)
    pub calorie_floor_female: f64,
}

impl Default for CalorieConfig {
    fn default() -> Self {
        Self {
            default_loss_rate_percent: 0.5,
            max_deficit_fraction: 0.25,
            surplus_beginner: 0.12,
            surplus_intermediate: 0.08,
            surplus_advanced: 0.05,
            max_surplus_fraction: 0.15,
            recomposition_deficit_fraction: 0.10,
            performance_surplus_fraction: 0.05,
            calorie_floor_male: 1500.0,
            calorie_floor_female: 1200.0,
        }
    }
}

/// Goal-specific protein targets (g/kg body weight)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProteinTargets {
    /// Fat loss
    pub fat_loss: f64,
    /// Muscle gain
    pub muscle_gain: f64,
    /// Maintenance
    pub maintenance: f64,
    /// Recomposition
    pub recomposition: f64,
    /// Performance
    pub performance: f64,
}

/// Goal-specific fat share of calories (0-1)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FatShares {
    /// Fat loss
    pub fat_loss: f64,
    /// Muscle gain
    pub muscle_gain: f64,
    /// Maintenance
    pub maintenance: f64,
    /// Recomposition
    pub recomposition: f64,
    /// Performance
    pub performance: f64,
}

/// Macro allocation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacroConfig {
    /// Baseline protein by goal
    pub protein_g_per_kg: ProteinTargets,
    /// Protein boost for a deficit of at least `large_deficit_fraction`
    pub large_deficit_protein_boost: f64,
    /// Deficit treated as large
    pub large_deficit_fraction: f64,
    /// Protein boost for a deficit of at least `moderate_deficit_fraction`
    pub moderate_deficit_protein_boost: f64,
    /// Deficit treated as moderate
    pub moderate_deficit_fraction: f64,
    /// Protein boost from age 50
    pub age_50_protein_boost: f64,
    /// Protein boost from age 65 (replaces the age-50 boost)
    pub age_65_protein_boost: f64,
    /// Protein boost at or above `high_frequency_sessions`
    pub high_frequency_protein_boost: f64,
    /// Sessions per week treated as high frequency
    pub high_frequency_sessions: u8,
    /// Protein safety band minimum (g/kg)
    pub protein_min_g_per_kg: f64,
    /// Protein safety band maximum (g/kg)
    pub protein_max_g_per_kg: f64,
    /// Hormonal fat floor for males (g/kg)
    pub fat_floor_male_g_per_kg: f64,
    /// Hormonal fat floor for females (g/kg)
    pub fat_floor_female_g_per_kg: f64,
    /// Absolute fat minimum regardless of sex (g/kg)
    pub fat_min_g_per_kg: f64,
    /// BMI above which protein and fat g/kg use a reference weight (30)
    pub reference_weight_bmi_threshold: f64,
    /// BMI defining the reference weight when body fat is unknown (25)
    pub reference_bmi: f64,
    /// Preferred fat share of calories by goal
    pub fat_share: FatShares,
    /// Allowed relative drift between macro calories and the target (0.02)
    pub reconciliation_tolerance: f64,
    /// Protein flexibility band (fraction)
    pub protein_flex: f64,
    /// Carbohydrate flexibility band (fraction)
    pub carbs_flex: f64,
    /// Fat flexibility band (fraction)
    pub fat_flex: f64,
    /// Meals on rest days
    pub rest_day_meals: u8,
    /// Meals on training days
    pub training_day_meals: u8,
    /// Peri-workout carbohydrate timing
    pub nutrient_timing: NutrientTimingConfig,
}

impl Default for MacroConfig {
    fn default() -> Self {
        Self {
            protein_g_per_kg: ProteinTargets {
                fat_loss: 2.0,
                muscle_gain: 1.8,
                maintenance: 1.6,
                recomposition: 2.0,
                performance: 1.7,
            },
            large_deficit_protein_boost: 0.3,
            large_deficit_fraction: 0.20,
            moderate_deficit_protein_boost: 0.15,
            moderate_deficit_fraction: 0.10,
            age_50_protein_boost: 0.2,
            age_65_protein_boost: 0.3,
            high_frequency_protein_boost: 0.1,
            high_frequency_sessions: 5,
            protein_min_g_per_kg: 1.2,
            protein_max_g_per_kg: 2.5,
            fat_floor_male_g_per_kg: 0.6,
            fat_floor_female_g_per_kg: 0.8,
            fat_min_g_per_kg: 0.5,
            reference_weight_bmi_threshold: 30.0,
            reference_bmi: 25.0,
            fat_share: FatShares {
                fat_loss: 0.25,
                muscle_gain: 0.25,
                maintenance: 0.30,
                recomposition: 0.27,
                performance: 0.25,
            },
            reconciliation_tolerance: 0.02,
            protein_flex: 0.10,
            carbs_flex: 0.15,
            fat_flex: 0.10,
            rest_day_meals: 4,
            training_day_meals: 5,
            nutrient_timing: NutrientTimingConfig::default(),
        }
    }
}

/// Nutrient timing configuration
///
/// Reference: Kerksick et al. (2017) ISSN position stand: nutrient timing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutrientTimingConfig {
    /// Pre-workout carbs (g/kg): 0.5-1.0
    pub pre_workout_carbs_g_per_kg: f64,
    /// Post-workout carbs (g/kg): 0.8-1.2
    pub post_workout_carbs_g_per_kg: f64,
    /// Largest share of daily carbs the pre/post split may claim
    pub max_share_of_daily_carbs: f64,
}

impl Default for NutrientTimingConfig {
    fn default() -> Self {
        Self {
            pre_workout_carbs_g_per_kg: 0.5,
            post_workout_carbs_g_per_kg: 0.8,
            max_share_of_daily_carbs: 0.4,
        }
    }
}

impl MacroConfig {
    /// Validate bands and shares
    ///
    /// # Errors
    ///
    /// Returns an error if bands are inverted or shares fall outside (0, 1)
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.protein_min_g_per_kg >= self.protein_max_g_per_kg {
            return Err(ConfigError::InvalidRange(
                "protein_min_g_per_kg must be < protein_max_g_per_kg",
            ));
        }
        if self.fat_min_g_per_kg > self.fat_floor_male_g_per_kg
            || self.fat_min_g_per_kg > self.fat_floor_female_g_per_kg
        {
            return Err(ConfigError::InvalidRange(
                "fat_min_g_per_kg must not exceed the sex-specific fat floors",
            ));
        }
        if self.reference_bmi <= 0.0 || self.reference_bmi > self.reference_weight_bmi_threshold {
            return Err(ConfigError::InvalidRange(
                "reference_bmi must be positive and <= reference_weight_bmi_threshold",
            ));
        }
        let shares = [
            self.fat_share.fat_loss,
            self.fat_share.muscle_gain,
            self.fat_share.maintenance,
            self.fat_share.recomposition,
            self.fat_share.performance,
        ];
        if shares.iter().any(|s| *s <= 0.0 || *s >= 1.0) {
            return Err(ConfigError::ValueOutOfRange(
                "fat shares must be between 0 and 1",
            ));
        }
        if self.reconciliation_tolerance <= 0.0 || self.reconciliation_tolerance > 0.1 {
            return Err(ConfigError::ValueOutOfRange(
                "reconciliation_tolerance must be in (0, 0.1]",
            ));
        }
        if self.rest_day_meals == 0 || self.training_day_meals == 0 {
            return Err(ConfigError::ValueOutOfRange("meal counts must be positive"));
        }
        Ok(())
    }
}
