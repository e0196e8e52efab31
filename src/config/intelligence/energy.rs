// ABOUTME: Energy estimator configuration: resting energy equations, activity factors, uncertainty
// ABOUTME: Coefficients for four REE equations, TDEE multipliers, CI width and confidence scoring
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Energy Estimation Configuration
//!
//! # Scientific References
//!
//! - Mifflin-St Jeor: Mifflin et al. (1990) DOI: 10.1093/ajcn/51.2.241
//! - Harris-Benedict (revised): Roza & Shizgal (1984) DOI: 10.1093/ajcn/40.1.168
//! - Katch-McArdle: `McArdle`, Katch & Katch (2010), Exercise Physiology
//! - Cunningham: Cunningham (1980) DOI: 10.1093/ajcn/33.11.2372

use coachplan_core::constants::limits::{
    MAX_AGE_YEARS, MAX_BODY_FAT_PERCENT, MAX_HEIGHT_CM, MAX_WEIGHT_KG, MIN_AGE_YEARS,
    MIN_BODY_FAT_PERCENT, MIN_HEIGHT_CM, MIN_WEIGHT_KG,
};
use serde::{Deserialize, Serialize};

/// Energy estimator configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnergyConfig {
    /// Resting energy equation coefficients
    pub bmr: BmrConfig,
    /// Activity factor multipliers for TDEE calculation
    pub activity_factors: ActivityFactorsConfig,
    /// Confidence interval and confidence score tuning
    pub uncertainty: UncertaintyConfig,
    /// Hard input bounds
    pub bounds: InputBounds,
}

/// Harris-Benedict coefficient set for one sex
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarrisBenedictCoefficients {
    /// Constant term
    pub constant: f64,
    /// Weight coefficient (per kg)
    pub weight_coef: f64,
    /// Height coefficient (per cm)
    pub height_coef: f64,
    /// Age coefficient (per year, negative)
    pub age_coef: f64,
}

/// Resting energy equation coefficients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmrConfig {
    /// Mifflin-St Jeor weight coefficient (10.0)
    pub msj_weight_coef: f64,
    /// Mifflin-St Jeor height coefficient (6.25)
    pub msj_height_coef: f64,
    /// Mifflin-St Jeor age coefficient (-5.0)
    pub msj_age_coef: f64,
    /// Mifflin-St Jeor male constant (+5)
    pub msj_male_constant: f64,
    /// Mifflin-St Jeor female constant (-161)
    pub msj_female_constant: f64,
    /// Revised Harris-Benedict, male
    pub harris_benedict_male: HarrisBenedictCoefficients,
    /// Revised Harris-Benedict, female
    pub harris_benedict_female: HarrisBenedictCoefficients,
    /// Katch-McArdle intercept (370)
    pub katch_mcardle_intercept: f64,
    /// Katch-McArdle lean-mass coefficient (21.6)
    pub katch_mcardle_lean_coef: f64,
    /// Cunningham intercept (500)
    pub cunningham_intercept: f64,
    /// Cunningham lean-mass coefficient (22.0)
    pub cunningham_lean_coef: f64,
    /// Lowest resting estimate any equation may report (kcal/day)
    pub minimum_bmr_kcal: f64,
}

impl Default for BmrConfig {
    fn default() -> Self {
        Self {
            msj_weight_coef: 10.0,
            msj_height_coef: 6.25,
            msj_age_coef: -5.0,
            msj_male_constant: 5.0,
            msj_female_constant: -161.0,
            harris_benedict_male: HarrisBenedictCoefficients {
                constant: 88.362,
                weight_coef: 13.397,
                height_coef: 4.799,
                age_coef: -5.677,
            },
            harris_benedict_female: HarrisBenedictCoefficients {
                constant: 447.593,
                weight_coef: 9.247,
                height_coef: 3.098,
                age_coef: -4.330,
            },
            katch_mcardle_intercept: 370.0,
            katch_mcardle_lean_coef: 21.6,
            cunningham_intercept: 500.0,
            cunningham_lean_coef: 22.0,
            minimum_bmr_kcal: 800.0,
        }
    }
}

/// Activity factor multipliers for TDEE calculation
///
/// Reference: `McArdle`, W.D., Katch, F.I., & Katch, V.L. (2010). Exercise Physiology
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityFactorsConfig {
    /// Sedentary (little/no exercise): 1.2
    pub sedentary: f64,
    /// Lightly active (1-2 sessions/week): 1.375
    pub lightly_active: f64,
    /// Moderately active (3-4 sessions/week): 1.55
    pub moderately_active: f64,
    /// Very active (5-6 sessions/week): 1.725
    pub very_active: f64,
    /// Extra active (7+ sessions/week): 1.9
    pub extra_active: f64,
}

impl Default for ActivityFactorsConfig {
    fn default() -> Self {
        Self {
            sedentary: 1.2,
            lightly_active: 1.375,
            moderately_active: 1.55,
            very_active: 1.725,
            extra_active: 1.9,
        }
    }
}

/// Confidence interval and confidence score tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UncertaintyConfig {
    /// Widest half-width of the CI as a fraction of the mean (0.15)
    pub ci_base_width: f64,
    /// Narrowest half-width of the CI as a fraction of the mean
    pub ci_min_width: f64,
    /// Coefficient of variation treated as full disagreement
    pub agreement_reference_cv: f64,
    /// Confidence with two equations in perfect disagreement
    pub confidence_base: f64,
    /// Confidence added per equation beyond two
    pub confidence_per_extra_equation: f64,
    /// Confidence added for perfect agreement
    pub confidence_agreement_weight: f64,
    /// Confidence added when body composition is known
    pub confidence_body_composition_bonus: f64,
    /// Confidence ceiling (never certain)
    pub confidence_cap: f64,
}

impl Default for UncertaintyConfig {
    fn default() -> Self {
        Self {
            ci_base_width: 0.15,
            ci_min_width: 0.03,
            agreement_reference_cv: 0.08,
            confidence_base: 0.5,
            confidence_per_extra_equation: 0.1,
            confidence_agreement_weight: 0.2,
            confidence_body_composition_bonus: 0.05,
            confidence_cap: 0.95,
        }
    }
}

/// Hard bounds on estimator inputs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputBounds {
    /// Youngest age accepted (years)
    pub min_age: u32,
    /// Oldest age accepted (years)
    pub max_age: u32,
    /// Lightest weight accepted (kg)
    pub min_weight_kg: f64,
    /// Heaviest weight accepted (kg)
    pub max_weight_kg: f64,
    /// Shortest height accepted (cm)
    pub min_height_cm: f64,
    /// Tallest height accepted (cm)
    pub max_height_cm: f64,
    /// Lowest body fat accepted (%)
    pub min_body_fat_percent: f64,
    /// Highest body fat accepted (%)
    pub max_body_fat_percent: f64,
}

impl Default for InputBounds {
    fn default() -> Self {
        Self {
            min_age: MIN_AGE_YEARS,
            max_age: MAX_AGE_YEARS,
            min_weight_kg: MIN_WEIGHT_KG,
            max_weight_kg: MAX_WEIGHT_KG,
            min_height_cm: MIN_HEIGHT_CM,
            max_height_cm: MAX_HEIGHT_CM,
            min_body_fat_percent: MIN_BODY_FAT_PERCENT,
            max_body_fat_percent: MAX_BODY_FAT_PERCENT,
        }
    }
}
