// ABOUTME: Engine configuration for every plan generation stage with env overrides and validation
// ABOUTME: Groups per-component configs and provides a process-wide validated singleton
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Engine Configuration Module
//!
//! Provides validated configuration for all plan generation stages.
//!
//! # Module Structure
//!
//! - `energy` - Resting energy equations, activity factors and uncertainty
//! - `macros` - Calorie target derivation and macro allocation
//! - `safety` - Safety gate thresholds
//! - `feasibility` - Solver search budget and constraint bounds
//! - `training` - Volume landmarks, rep schemes and deload cadence
//! - `meals` - Meal slot layouts and portion rules
//! - `modality` - Supplementary session placement
//! - `grocery` - Shopping list pricing
//! - `advisory` - Optional advisory integration

pub mod advisory;
pub mod energy;
pub mod error;
pub mod feasibility;
pub mod grocery;
pub mod macros;
pub mod meals;
pub mod modality;
pub mod safety;
pub mod training;

pub use advisory::AdvisoryConfig;
pub use energy::{
    ActivityFactorsConfig, BmrConfig, EnergyConfig, HarrisBenedictCoefficients, InputBounds,
    UncertaintyConfig,
};
pub use error::ConfigError;
pub use feasibility::FeasibilityConfig;
pub use grocery::GroceryConfig;
pub use macros::{CalorieConfig, FatShares, MacroConfig, NutrientTimingConfig, ProteinTargets};
pub use meals::{MealConfig, MealSlot};
pub use modality::ModalityConfig;
pub use safety::{MedicationAdvisory, SafetyConfig};
pub use training::{FocusSchemes, RepScheme, TrainingConfig, VolumeLandmarks};

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::warn;

/// Global configuration singleton
static ENGINE_CONFIG: OnceLock<EngineConfig> = OnceLock::new();

/// Main engine configuration container
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Energy estimator
    pub energy: EnergyConfig,
    /// Calorie target derivation
    pub calories: CalorieConfig,
    /// Macro allocator
    pub macros: MacroConfig,
    /// Safety validator
    pub safety: SafetyConfig,
    /// Feasibility solver
    pub feasibility: FeasibilityConfig,
    /// Training generator
    pub training: TrainingConfig,
    /// Meal assembler
    pub meals: MealConfig,
    /// Modality planner
    pub modality: ModalityConfig,
    /// Grocery aggregator
    pub grocery: GroceryConfig,
    /// Advisory integration
    pub advisory: AdvisoryConfig,
}

impl EngineConfig {
    /// Get the global configuration instance
    pub fn global() -> &'static Self {
        ENGINE_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                warn!("Failed to load engine config: {}, using defaults", e);
                Self::default()
            })
        })
    }

    /// Load configuration from defaults plus environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found across component configs
    pub fn validate(&self) -> Result<(), ConfigError> {
        let unc = &self.energy.uncertainty;
        if unc.ci_min_width <= 0.0 || unc.ci_min_width > unc.ci_base_width {
            return Err(ConfigError::InvalidRange(
                "ci_min_width must be in (0, ci_base_width]",
            ));
        }
        if unc.confidence_cap <= 0.0 || unc.confidence_cap > 0.95 {
            return Err(ConfigError::ValueOutOfRange(
                "confidence_cap must be in (0, 0.95]",
            ));
        }
        if unc.agreement_reference_cv <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "agreement_reference_cv must be positive",
            ));
        }

        let factors = &self.energy.activity_factors;
        if factors.sedentary >= factors.lightly_active
            || factors.lightly_active >= factors.moderately_active
            || factors.moderately_active >= factors.very_active
            || factors.very_active >= factors.extra_active
        {
            return Err(ConfigError::InvalidRange(
                "Activity factors must be in ascending order",
            ));
        }

        let cal = &self.calories;
        if !(0.0..=0.5).contains(&cal.max_deficit_fraction)
            || !(0.0..=0.5).contains(&cal.max_surplus_fraction)
        {
            return Err(ConfigError::ValueOutOfRange(
                "deficit and surplus caps must be in [0, 0.5]",
            ));
        }
        if cal.calorie_floor_female <= 0.0 || cal.calorie_floor_male <= 0.0 {
            return Err(ConfigError::ValueOutOfRange("calorie floors must be positive"));
        }

        self.macros.validate()?;

        let safety = &self.safety;
        if safety.min_unsupervised_age > safety.adult_age
            || safety.adult_age >= safety.max_unsupervised_age
        {
            return Err(ConfigError::InvalidRange(
                "min_unsupervised_age <= adult_age < max_unsupervised_age required",
            ));
        }
        if safety.weekly_loss_warning_percent >= safety.weekly_loss_block_percent {
            return Err(ConfigError::InvalidRange(
                "weekly_loss_warning_percent must be < weekly_loss_block_percent",
            ));
        }

        let feas = &self.feasibility;
        if feas.min_session_minutes >= feas.max_session_minutes
            || feas.session_minutes_step == 0
        {
            return Err(ConfigError::InvalidRange(
                "min_session_minutes must be < max_session_minutes with a positive step",
            ));
        }
        if feas.max_timeline_extension < 1.0 {
            return Err(ConfigError::ValueOutOfRange(
                "max_timeline_extension must be >= 1.0",
            ));
        }
        if feas.rate_step_kg <= 0.0 || feas.max_iterations == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "rate_step_kg and max_iterations must be positive",
            ));
        }

        self.training.validate()?;
        self.meals.validate()?;

        if self.modality.preferred_start_hours.iter().any(|h| *h > 23) {
            return Err(ConfigError::ValueOutOfRange(
                "preferred_start_hours must be 0-23",
            ));
        }
        if self.advisory.cache_capacity == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "advisory cache_capacity must be positive",
            ));
        }
        Ok(())
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        // Energy overrides
        Self::apply_env_var(
            "COACHPLAN_ENERGY_CI_BASE_WIDTH",
            &mut self.energy.uncertainty.ci_base_width,
        )?;
        Self::apply_env_var(
            "COACHPLAN_ENERGY_CONFIDENCE_CAP",
            &mut self.energy.uncertainty.confidence_cap,
        )?;

        // Calorie target overrides
        Self::apply_env_var(
            "COACHPLAN_MAX_DEFICIT_FRACTION",
            &mut self.calories.max_deficit_fraction,
        )?;
        Self::apply_env_var(
            "COACHPLAN_MAX_SURPLUS_FRACTION",
            &mut self.calories.max_surplus_fraction,
        )?;
        Self::apply_env_var(
            "COACHPLAN_CALORIE_FLOOR_MALE",
            &mut self.calories.calorie_floor_male,
        )?;
        Self::apply_env_var(
            "COACHPLAN_CALORIE_FLOOR_FEMALE",
            &mut self.calories.calorie_floor_female,
        )?;

        // Macro overrides
        Self::apply_env_var(
            "COACHPLAN_PROTEIN_MIN_G_PER_KG",
            &mut self.macros.protein_min_g_per_kg,
        )?;
        Self::apply_env_var(
            "COACHPLAN_PROTEIN_MAX_G_PER_KG",
            &mut self.macros.protein_max_g_per_kg,
        )?;

        // Solver overrides
        Self::apply_env_var(
            "COACHPLAN_SOLVER_MAX_ITERATIONS",
            &mut self.feasibility.max_iterations,
        )?;
        Self::apply_env_var(
            "COACHPLAN_SOLVER_TIMEOUT_MS",
            &mut self.feasibility.timeout_ms,
        )?;
        Self::apply_env_var(
            "COACHPLAN_MAX_TRADE_OFFS",
            &mut self.feasibility.max_trade_offs,
        )?;

        // Modality overrides
        Self::apply_env_var(
            "COACHPLAN_RECOVERY_HEADROOM",
            &mut self.modality.recovery_headroom,
        )?;
        Self::apply_env_var(
            "COACHPLAN_TAPER_WINDOW_DAYS",
            &mut self.modality.taper_window_days,
        )?;

        // Grocery overrides
        Self::apply_env_var(
            "COACHPLAN_BULK_BUY_THRESHOLD",
            &mut self.grocery.bulk_buy_threshold,
        )?;

        // Advisory overrides
        Self::apply_env_var("COACHPLAN_ADVISORY_ENABLED", &mut self.advisory.enabled)?;
        Self::apply_env_var(
            "COACHPLAN_ADVISORY_TIMEOUT_MS",
            &mut self.advisory.timeout_ms,
        )?;
        Self::apply_env_var(
            "COACHPLAN_ADVISORY_MAX_CALLS_PER_MINUTE",
            &mut self.advisory.max_calls_per_minute,
        )?;

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_protein_band_rejected() {
        let mut config = EngineConfig::default();
        config.macros.protein_min_g_per_kg = 3.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_meal_fractions_must_sum_to_one() {
        let mut config = EngineConfig::default();
        config.meals.rest_day_slots[0].fraction = 0.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidWeights(_))
        ));
    }

    #[test]
    fn test_confidence_cap_cannot_exceed_ceiling() {
        let mut config = EngineConfig::default();
        config.energy.uncertainty.confidence_cap = 0.99;
        assert!(config.validate().is_err());
    }
}
