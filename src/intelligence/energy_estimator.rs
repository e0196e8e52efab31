// ABOUTME: Ensemble resting energy estimation with a confidence interval and confidence score
// ABOUTME: Mifflin-St Jeor, Harris-Benedict, Katch-McArdle and Cunningham equations, TDEE scaling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Energy Estimator Module
//!
//! Runs two to four independent resting energy equations and combines them:
//! the general-population equations always run, the lean-mass equations run
//! when body composition is known. The mean drives TDEE; the spread between
//! equations and their count drive the uncertainty.
//!
//! # Scientific References
//!
//! - Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
//!   *American Journal of Clinical Nutrition*, 51(2), 241-247.
//!   <https://doi.org/10.1093/ajcn/51.2.241>
//!
//! - Roza, A.M., & Shizgal, H.M. (1984). The Harris Benedict equation reevaluated.
//!   *American Journal of Clinical Nutrition*, 40(1), 168-182.
//!   <https://doi.org/10.1093/ajcn/40.1.168>
//!
//! - Cunningham, J.J. (1980). A reanalysis of the factors influencing basal metabolic rate.
//!   *American Journal of Clinical Nutrition*, 33(11), 2372-2374.
//!   <https://doi.org/10.1093/ajcn/33.11.2372>

use coachplan_core::errors::{PlanError, PlanResult};
use coachplan_core::models::{
    BiologicalSex, BmrEquation, Demographics, EnergyEstimate, EquationEstimate,
};
use tracing::debug;

use crate::config::intelligence::{
    ActivityFactorsConfig, BmrConfig, EnergyConfig, InputBounds, UncertaintyConfig,
};

/// Inputs to the energy estimator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyInput {
    /// Age in years
    pub age: u32,
    /// Biological sex
    pub sex: BiologicalSex,
    /// Body weight (kg)
    pub weight_kg: f64,
    /// Height (cm)
    pub height_cm: f64,
    /// Body-fat percentage when known
    pub body_fat_percent: Option<f64>,
    /// Lean mass (kg) when measured directly; takes precedence over body fat
    pub lean_mass_kg: Option<f64>,
    /// Activity multiplier applied to the resting mean
    pub activity_multiplier: f64,
}

impl EnergyInput {
    /// Build from demographics and an activity multiplier
    #[must_use]
    pub const fn from_demographics(demo: &Demographics, activity_multiplier: f64) -> Self {
        Self {
            age: demo.age,
            sex: demo.sex,
            weight_kg: demo.weight_kg,
            height_cm: demo.height_cm,
            body_fat_percent: demo.body_fat_percent,
            lean_mass_kg: None,
            activity_multiplier,
        }
    }

    fn lean_mass(&self) -> Option<f64> {
        self.lean_mass_kg.or_else(|| {
            self.body_fat_percent
                .map(|bf| self.weight_kg * (1.0 - bf / 100.0))
        })
    }
}

/// Activity multiplier for a weekly session count
///
/// Bands: none, 1-2, 3-4, 5-6, 7+ sessions.
#[must_use]
pub fn activity_multiplier(weekly_sessions: u32, factors: &ActivityFactorsConfig) -> f64 {
    match weekly_sessions {
        0 => factors.sedentary,
        1..=2 => factors.lightly_active,
        3..=4 => factors.moderately_active,
        5..=6 => factors.very_active,
        _ => factors.extra_active,
    }
}

/// Estimate resting and total energy expenditure
///
/// # Errors
///
/// Returns `PlanError::Validation` when age, weight, height, body fat, lean
/// mass or the activity multiplier fall outside their hard bounds
pub fn estimate_energy(input: &EnergyInput, config: &EnergyConfig) -> PlanResult<EnergyEstimate> {
    validate_input(input, &config.bounds)?;

    let bmr = &config.bmr;
    let mut equations = vec![
        EquationEstimate {
            equation: BmrEquation::MifflinStJeor,
            kcal: mifflin_st_jeor(input, bmr),
        },
        EquationEstimate {
            equation: BmrEquation::HarrisBenedict,
            kcal: harris_benedict(input, bmr),
        },
    ];
    let lean_mass = input.lean_mass();
    if let Some(lbm) = lean_mass {
        equations.push(EquationEstimate {
            equation: BmrEquation::KatchMcArdle,
            kcal: bmr
                .katch_mcardle_lean_coef
                .mul_add(lbm, bmr.katch_mcardle_intercept),
        });
        equations.push(EquationEstimate {
            equation: BmrEquation::Cunningham,
            kcal: bmr.cunningham_lean_coef.mul_add(lbm, bmr.cunningham_intercept),
        });
    }
    for estimate in &mut equations {
        estimate.kcal = estimate.kcal.max(bmr.minimum_bmr_kcal);
    }

    let values: Vec<f64> = equations.iter().map(|e| e.kcal).collect();
    let bmr_mean = mean(&values);
    let cv = coefficient_of_variation(&values, bmr_mean);
    let half_width = interval_half_width(cv, values.len(), &config.uncertainty);
    let confidence = confidence_score(cv, values.len(), lean_mass.is_some(), &config.uncertainty);
    let tdee_mean = bmr_mean * input.activity_multiplier;

    let mut notes = Vec::new();
    if lean_mass.is_some() {
        notes.push("Lean-mass equations included from body composition".to_owned());
    } else {
        notes.push(
            "Body composition unknown; adding body-fat % would narrow the estimate".to_owned(),
        );
    }
    if cv > config.uncertainty.agreement_reference_cv {
        notes.push(format!(
            "Equations disagree by {:.1}% (coefficient of variation)",
            cv * 100.0
        ));
    }

    debug!(
        bmr_mean,
        tdee_mean,
        cv,
        equations = values.len(),
        "energy estimate computed"
    );

    Ok(EnergyEstimate {
        bmr_mean: round1(bmr_mean),
        tdee_mean: round1(tdee_mean),
        ci_lower: round1(tdee_mean * (1.0 - half_width)),
        ci_upper: round1(tdee_mean * (1.0 + half_width)),
        confidence,
        equations_used: equations
            .into_iter()
            .map(|e| EquationEstimate {
                equation: e.equation,
                kcal: round1(e.kcal),
            })
            .collect(),
        activity_multiplier: input.activity_multiplier,
        notes,
    })
}

fn validate_input(input: &EnergyInput, bounds: &InputBounds) -> PlanResult<()> {
    if !(bounds.min_age..=bounds.max_age).contains(&input.age) {
        return Err(PlanError::validation(
            "age",
            format!(
                "{} is outside {}-{} years",
                input.age, bounds.min_age, bounds.max_age
            ),
        ));
    }
    check_bound("weight_kg", input.weight_kg, bounds.min_weight_kg, bounds.max_weight_kg)?;
    check_bound("height_cm", input.height_cm, bounds.min_height_cm, bounds.max_height_cm)?;
    if let Some(bf) = input.body_fat_percent {
        check_bound(
            "body_fat_percent",
            bf,
            bounds.min_body_fat_percent,
            bounds.max_body_fat_percent,
        )?;
    }
    if let Some(lbm) = input.lean_mass_kg {
        if !lbm.is_finite() || lbm <= 0.0 || lbm > input.weight_kg {
            return Err(PlanError::validation(
                "lean_mass_kg",
                format!("{lbm} must be positive and not exceed body weight"),
            ));
        }
    }
    check_bound("activity_multiplier", input.activity_multiplier, 1.0, 2.5)
}

fn check_bound(field: &str, value: f64, min: f64, max: f64) -> PlanResult<()> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(PlanError::validation(
            field,
            format!("{value} is outside {min}-{max}"),
        ))
    }
}

fn mifflin_st_jeor(input: &EnergyInput, config: &BmrConfig) -> f64 {
    let constant = match input.sex {
        BiologicalSex::Male => config.msj_male_constant,
        BiologicalSex::Female => config.msj_female_constant,
    };
    config.msj_age_coef.mul_add(
        f64::from(input.age),
        config
            .msj_weight_coef
            .mul_add(input.weight_kg, config.msj_height_coef * input.height_cm),
    ) + constant
}

fn harris_benedict(input: &EnergyInput, config: &BmrConfig) -> f64 {
    let c = match input.sex {
        BiologicalSex::Male => &config.harris_benedict_male,
        BiologicalSex::Female => &config.harris_benedict_female,
    };
    c.age_coef.mul_add(
        f64::from(input.age),
        c.weight_coef
            .mul_add(input.weight_kg, c.height_coef.mul_add(input.height_cm, c.constant)),
    )
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn coefficient_of_variation(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 || mean <= 0.0 {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>()
        / (values.len() - 1) as f64;
    variance.sqrt() / mean
}

/// CI half-width as a fraction of the mean
///
/// Shrinks with agreement (low CV) and with equation count, never exceeding
/// the base width nor dropping below the configured minimum.
fn interval_half_width(cv: f64, count: usize, config: &UncertaintyConfig) -> f64 {
    let disagreement = (cv / config.agreement_reference_cv).min(1.0);
    let count_factor = (2.0 / count.max(1) as f64).sqrt().min(1.0);
    let width = config.ci_base_width * 0.5_f64.mul_add(disagreement, 0.5) * count_factor;
    width.clamp(config.ci_min_width, config.ci_base_width)
}

fn confidence_score(
    cv: f64,
    count: usize,
    has_composition: bool,
    config: &UncertaintyConfig,
) -> f64 {
    let extra_equations = count.saturating_sub(2) as f64;
    let agreement = 1.0 - (cv / config.agreement_reference_cv).min(1.0);
    let composition = if has_composition {
        config.confidence_body_composition_bonus
    } else {
        0.0
    };
    let score = config.confidence_agreement_weight.mul_add(
        agreement,
        config
            .confidence_per_extra_equation
            .mul_add(extra_equations, config.confidence_base),
    ) + composition;
    (score.min(config.confidence_cap) * 1000.0).round() / 1000.0
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn male_input() -> EnergyInput {
        EnergyInput {
            age: 28,
            sex: BiologicalSex::Male,
            weight_kg: 82.0,
            height_cm: 178.0,
            body_fat_percent: None,
            lean_mass_kg: None,
            activity_multiplier: 1.55,
        }
    }

    #[test]
    fn test_mifflin_matches_reference_value() {
        // 10*82 + 6.25*178 - 5*28 + 5 = 1797.5
        let value = mifflin_st_jeor(&male_input(), &BmrConfig::default());
        assert!((value - 1797.5).abs() < 1e-9);
    }

    #[test]
    fn test_two_equations_without_composition() {
        let estimate = estimate_energy(&male_input(), &EnergyConfig::default()).unwrap();
        assert_eq!(estimate.equations_used.len(), 2);
        assert!(estimate.ci_lower < estimate.tdee_mean);
        assert!(estimate.tdee_mean < estimate.ci_upper);
    }

    #[test]
    fn test_body_fat_adds_lean_mass_equations_and_confidence() {
        let config = EnergyConfig::default();
        let without = estimate_energy(&male_input(), &config).unwrap();
        let with = estimate_energy(
            &EnergyInput {
                body_fat_percent: Some(15.0),
                ..male_input()
            },
            &config,
        )
        .unwrap();
        assert_eq!(with.equations_used.len(), 4);
        assert!(with.confidence > without.confidence);
        assert!(with.confidence <= 0.95);
    }

    #[test]
    fn test_half_width_capped_and_floored() {
        let config = UncertaintyConfig::default();
        assert!((interval_half_width(1.0, 2, &config) - 0.15).abs() < 1e-12);
        assert!(interval_half_width(0.0, 4, &config) >= config.ci_min_width);
    }

    #[test]
    fn test_out_of_range_age_rejected() {
        let result = estimate_energy(
            &EnergyInput {
                age: 8,
                ..male_input()
            },
            &EnergyConfig::default(),
        );
        assert!(matches!(result, Err(PlanError::Validation { .. })));
    }

    #[test]
    fn test_activity_bands() {
        let factors = ActivityFactorsConfig::default();
        assert!((activity_multiplier(0, &factors) - 1.2).abs() < 1e-12);
        assert!((activity_multiplier(4, &factors) - 1.55).abs() < 1e-12);
        assert!((activity_multiplier(9, &factors) - 1.9).abs() < 1e-12);
    }
}
