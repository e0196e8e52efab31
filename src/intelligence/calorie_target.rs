// ABOUTME: Goal-specific calorie target derivation from the energy estimate
// ABOUTME: Capped deficits and surpluses, sex-specific floors and expected weekly rate of change
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Calorie target derivation
//!
//! Turns maintenance energy into an intake prescription. Fat loss derives its
//! deficit from the requested (or default) rate of loss and caps it at a
//! fraction of maintenance; muscle gain applies an experience-dependent
//! surplus, also capped. Every goal is floored at the sex-specific minimum.
//!
//! # Scientific References
//!
//! - Helms, E.R., Aragon, A.A., & Fitschen, P.J. (2014). Evidence-based recommendations for
//!   natural bodybuilding contest preparation. *JISSN*, 11, 20.
//!   <https://doi.org/10.1186/1550-2783-11-20>
//! - Hall, K.D. (2008). What is the required energy deficit per unit weight loss?
//!   *International Journal of Obesity*, 32(3), 573-576.

use coachplan_core::constants::energy::KCAL_PER_KG_BODY_MASS;
use coachplan_core::models::{
    BiologicalSex, CalorieTarget, EnergyEstimate, ExperienceLevel, IntakeProfile, PrimaryGoal,
};
use tracing::debug;

use crate::config::intelligence::CalorieConfig;

/// Daily energy change for a weekly body-mass change (kcal/day, signed)
#[must_use]
pub fn daily_delta_for_rate(weekly_rate_kg: f64) -> f64 {
    weekly_rate_kg * KCAL_PER_KG_BODY_MASS / 7.0
}

/// Weekly body-mass change implied by a daily energy change (kg/week, signed)
#[must_use]
pub fn weekly_rate_for_delta(daily_delta: f64) -> f64 {
    daily_delta * 7.0 / KCAL_PER_KG_BODY_MASS
}

/// Sex-specific calorie floor
#[must_use]
pub const fn calorie_floor(sex: BiologicalSex, config: &CalorieConfig) -> f64 {
    match sex {
        BiologicalSex::Male => config.calorie_floor_male,
        BiologicalSex::Female => config.calorie_floor_female,
    }
}

/// Requested weekly loss rate for a fat-loss profile (kg/week, positive)
///
/// Uses the target weight and timeline when both are present and the target
/// is below current weight; otherwise the configured default percentage of
/// body weight.
#[must_use]
pub fn requested_loss_rate(profile: &IntakeProfile, config: &CalorieConfig) -> f64 {
    let weight = profile.demographics.weight_kg;
    match (profile.goal.target_weight_kg, profile.goal.timeline_weeks) {
        (Some(target), Some(weeks)) if target < weight && weeks > 0 => {
            (weight - target) / f64::from(weeks)
        }
        _ => weight * config.default_loss_rate_percent / 100.0,
    }
}

/// Weekly loss the plan would prescribe, as a percentage of body weight
///
/// Used by the safety gate, which runs before the energy estimate exists.
/// Zero for goals that do not lose weight.
#[must_use]
pub fn proposed_weekly_change_percent(profile: &IntakeProfile, config: &CalorieConfig) -> f64 {
    let weight = profile.demographics.weight_kg;
    match profile.goal.primary {
        PrimaryGoal::FatLoss => -requested_loss_rate(profile, config) / weight * 100.0,
        PrimaryGoal::Recomposition | PrimaryGoal::MuscleGain | PrimaryGoal::Maintenance
        | PrimaryGoal::Performance => 0.0,
    }
}

const fn surplus_fraction(experience: ExperienceLevel, config: &CalorieConfig) -> f64 {
    match experience {
        ExperienceLevel::Beginner => config.surplus_beginner,
        ExperienceLevel::Intermediate => config.surplus_intermediate,
        ExperienceLevel::Advanced => config.surplus_advanced,
    }
}

/// Derive the calorie target for the profile's goal
///
/// Returns the target and any warnings raised while deriving it.
#[must_use]
pub fn derive_calorie_target(
    profile: &IntakeProfile,
    energy: &EnergyEstimate,
    config: &CalorieConfig,
) -> (CalorieTarget, Vec<String>) {
    let maintenance = energy.tdee_mean;
    let mut warnings = Vec::new();
    let mut rationale = Vec::new();

    let mut delta = match profile.goal.primary {
        PrimaryGoal::FatLoss => {
            if let Some(target) = profile.goal.target_weight_kg {
                if target >= profile.demographics.weight_kg {
                    warnings.push(format!(
                        "Target weight {target:.1} kg is not below current weight for a fat-loss goal; using the default loss rate"
                    ));
                }
            }
            let rate = requested_loss_rate(profile, config);
            let wanted = -daily_delta_for_rate(rate);
            let cap = -maintenance * config.max_deficit_fraction;
            rationale.push(format!("Fat loss at {rate:.2} kg/week requested"));
            if wanted < cap {
                rationale.push(format!(
                    "Deficit capped at {:.0}% of maintenance",
                    config.max_deficit_fraction * 100.0
                ));
                cap
            } else {
                wanted
            }
        }
        PrimaryGoal::MuscleGain => {
            let fraction = surplus_fraction(profile.schedule.experience, config)
                .min(config.max_surplus_fraction);
            rationale.push(format!(
                "Muscle gain surplus of {:.0}% for {:?} lifters",
                fraction * 100.0,
                profile.schedule.experience
            ));
            maintenance * fraction
        }
        PrimaryGoal::Maintenance => {
            rationale.push("Maintenance intake at estimated TDEE".to_owned());
            0.0
        }
        PrimaryGoal::Recomposition => {
            rationale.push(format!(
                "Recomposition deficit of {:.0}%",
                config.recomposition_deficit_fraction * 100.0
            ));
            -maintenance * config.recomposition_deficit_fraction
        }
        PrimaryGoal::Performance => {
            rationale.push(format!(
                "Performance fuelling surplus of {:.0}%",
                config.performance_surplus_fraction * 100.0
            ));
            maintenance * config.performance_surplus_fraction
        }
    };

    let floor = calorie_floor(profile.demographics.sex, config);
    let mut calories = maintenance + delta;
    if calories < floor {
        warnings.push(format!(
            "Calorie target raised from {calories:.0} to the {floor:.0} kcal floor"
        ));
        calories = floor;
        delta = calories - maintenance;
    }
    let calories = calories.round();
    let delta = (delta * 10.0).round() / 10.0;
    let weekly_rate_kg = (weekly_rate_for_delta(delta) * 1000.0).round() / 1000.0;
    rationale.push(format!(
        "Target {calories:.0} kcal/day ({delta:+.0} vs maintenance, {weekly_rate_kg:+.2} kg/week)"
    ));

    debug!(calories, delta, weekly_rate_kg, "calorie target derived");

    (
        CalorieTarget {
            calories,
            maintenance_calories: maintenance,
            daily_delta: delta,
            delta_fraction: if maintenance > 0.0 { delta / maintenance } else { 0.0 },
            weekly_rate_kg,
            rationale,
        },
        warnings,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use coachplan_core::models::{
        Demographics, GoalSpec, MedicalProfile, NutritionPreferences, TrainingFocus,
        TrainingIntensity, TrainingSchedule,
    };

    fn energy(tdee: f64) -> EnergyEstimate {
        EnergyEstimate {
            bmr_mean: tdee / 1.55,
            tdee_mean: tdee,
            ci_lower: tdee * 0.9,
            ci_upper: tdee * 1.1,
            confidence: 0.7,
            equations_used: Vec::new(),
            activity_multiplier: 1.55,
            notes: Vec::new(),
        }
    }

    fn profile(goal: PrimaryGoal, sex: BiologicalSex, weight_kg: f64) -> IntakeProfile {
        IntakeProfile {
            user_id: None,
            demographics: Demographics {
                age: 30,
                sex,
                weight_kg,
                height_cm: 170.0,
                body_fat_percent: None,
            },
            goal: GoalSpec {
                primary: goal,
                target_weight_kg: None,
                timeline_weeks: None,
            },
            schedule: TrainingSchedule {
                sessions_per_week: 4,
                available_days: vec![Weekday::Mon, Weekday::Wed, Weekday::Fri, Weekday::Sat],
                session_minutes: 60,
                experience: ExperienceLevel::Beginner,
                training_years: 0.5,
                focus: TrainingFocus::Hypertrophy,
                intensity: TrainingIntensity::Moderate,
            },
            nutrition: NutritionPreferences::default(),
            medical: MedicalProfile::default(),
            modality: None,
        }
    }

    #[test]
    fn test_rate_conversions_are_inverse() {
        let delta = daily_delta_for_rate(-0.5);
        assert!((delta + 550.0).abs() < 1e-9);
        assert!((weekly_rate_for_delta(delta) + 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_default_fat_loss_rate_is_half_percent() {
        let config = CalorieConfig::default();
        let p = profile(PrimaryGoal::FatLoss, BiologicalSex::Male, 100.0);
        assert!((requested_loss_rate(&p, &config) - 0.5).abs() < 1e-9);
        assert!((proposed_weekly_change_percent(&p, &config) + 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_fat_loss_deficit_capped() {
        let config = CalorieConfig::default();
        let mut p = profile(PrimaryGoal::FatLoss, BiologicalSex::Male, 100.0);
        p.goal.target_weight_kg = Some(80.0);
        p.goal.timeline_weeks = Some(10);
        let (target, _) = derive_calorie_target(&p, &energy(2800.0), &config);
        assert!((target.calories - 2100.0).abs() < 1.0);
        assert!(target.weekly_rate_kg < 0.0);
    }

    #[test]
    fn test_muscle_gain_is_surplus() {
        let (target, warnings) = derive_calorie_target(
            &profile(PrimaryGoal::MuscleGain, BiologicalSex::Male, 82.0),
            &energy(2800.0),
            &CalorieConfig::default(),
        );
        assert!(target.calories > 2800.0);
        assert!(target.daily_delta > 0.0);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_floor_applied_with_warning() {
        let (target, warnings) = derive_calorie_target(
            &profile(PrimaryGoal::FatLoss, BiologicalSex::Female, 50.0),
            &energy(1300.0),
            &CalorieConfig::default(),
        );
        assert!((target.calories - 1200.0).abs() < f64::EPSILON);
        assert_eq!(warnings.len(), 1);
    }
}
