// ABOUTME: Priority-ordered macronutrient allocation reconciled to the calorie target
// ABOUTME: Protein first, hormonal fat floor second, carbohydrate remainder, nutrient timing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Macro Allocator Module
//!
//! Allocates the calorie target in strict priority order:
//!
//! 1. **Protein** from a goal-specific g/kg target, boosted for large
//!    deficits, age and training frequency, clamped to a global safety band.
//!    Above a BMI threshold the g/kg targets apply to a reference weight
//!    (lean mass when body fat is known, otherwise the weight at a reference
//!    BMI) instead of total body weight.
//! 2. **Fat** as a goal-specific share of calories, never below the
//!    sex-specific hormonal floor.
//! 3. **Carbohydrate** from whatever calories remain.
//!
//! Rounding is reconciled on carbohydrate grams so the 4/4/9 total stays
//! within tolerance of the target.
//!
//! # Scientific References
//!
//! - Morton, R.W., et al. (2018). A systematic review, meta-analysis and meta-regression
//!   of the effect of protein supplementation on resistance training-induced gains.
//!   *British Journal of Sports Medicine*, 52(6), 376-384.
//!   <https://doi.org/10.1136/bjsports-2017-097608>
//! - Helms, E.R., et al. (2014). A systematic review of dietary protein during caloric
//!   restriction in resistance trained lean athletes. *IJSNEM*, 24(2), 127-138.
//!   <https://doi.org/10.1123/ijsnem.2013-0054>
//! - Kerksick, C.M., et al. (2017). ISSN position stand: nutrient timing.
//!   *JISSN*, 14, 33. <https://doi.org/10.1186/s12970-017-0189-4>

use coachplan_core::constants::energy::{
    KCAL_PER_GRAM_CARBS, KCAL_PER_GRAM_FAT, KCAL_PER_GRAM_PROTEIN,
};
use coachplan_core::errors::{PlanError, PlanResult};
use coachplan_core::models::{
    BiologicalSex, CalorieTarget, IntakeProfile, MacroAmount, MacroTargetSet, PeriWorkoutCarbs,
    PrimaryGoal,
};
use tracing::debug;

use crate::config::intelligence::MacroConfig;

/// Inputs to macro allocation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroInput {
    /// Calorie target (kcal/day)
    pub calories: f64,
    /// Primary goal
    pub goal: PrimaryGoal,
    /// Body weight (kg)
    pub weight_kg: f64,
    /// Height (cm), used for the reference weight
    pub height_cm: f64,
    /// Body fat percentage, when known
    pub body_fat_percent: Option<f64>,
    /// Age (years)
    pub age: u32,
    /// Biological sex
    pub sex: BiologicalSex,
    /// Resistance sessions per week
    pub sessions_per_week: u8,
    /// Deficit as a positive fraction of maintenance (0 at or above maintenance)
    pub deficit_fraction: f64,
    /// Hard ceiling on protein g/kg (plant-only diets)
    pub protein_ceiling_g_per_kg: Option<f64>,
}

impl MacroInput {
    /// Build from a profile and its calorie target
    #[must_use]
    pub fn from_profile(profile: &IntakeProfile, target: &CalorieTarget) -> Self {
        Self {
            calories: target.calories,
            goal: profile.goal.primary,
            weight_kg: profile.demographics.weight_kg,
            height_cm: profile.demographics.height_cm,
            body_fat_percent: profile.demographics.body_fat_percent,
            age: profile.demographics.age,
            sex: profile.demographics.sex,
            sessions_per_week: profile.schedule.sessions_per_week,
            deficit_fraction: (-target.delta_fraction).max(0.0),
            protein_ceiling_g_per_kg: None,
        }
    }
}

/// Protein target in g/kg for the input, after boosts, clamp and ceiling
#[must_use]
pub fn protein_g_per_kg(input: &MacroInput, config: &MacroConfig) -> f64 {
    let baseline = baseline_protein_g_per_kg(input, config);
    input
        .protein_ceiling_g_per_kg
        .map_or(baseline, |ceiling| baseline.min(ceiling))
}

/// Weight the protein and fat g/kg targets are multiplied by
///
/// Equals body weight up to `reference_weight_bmi_threshold`. Above it, lean
/// mass when body fat is known, otherwise the weight at `reference_bmi`,
/// whichever is larger, never above body weight.
#[must_use]
pub fn reference_weight_kg(input: &MacroInput, config: &MacroConfig) -> f64 {
    let height_m = input.height_cm / 100.0;
    if !height_m.is_finite() || height_m <= 0.0 {
        return input.weight_kg;
    }
    let bmi = input.weight_kg / (height_m * height_m);
    if bmi <= config.reference_weight_bmi_threshold {
        return input.weight_kg;
    }
    let bmi_weight = config.reference_bmi * height_m * height_m;
    let reference = input
        .body_fat_percent
        .filter(|bf| (0.0..100.0).contains(bf))
        .map_or(bmi_weight, |bf| {
            (input.weight_kg * (1.0 - bf / 100.0)).max(bmi_weight)
        });
    reference.min(input.weight_kg)
}

fn baseline_protein_g_per_kg(input: &MacroInput, config: &MacroConfig) -> f64 {
    let targets = &config.protein_g_per_kg;
    let mut g_per_kg = match input.goal {
        PrimaryGoal::FatLoss => targets.fat_loss,
        PrimaryGoal::MuscleGain => targets.muscle_gain,
        PrimaryGoal::Maintenance => targets.maintenance,
        PrimaryGoal::Recomposition => targets.recomposition,
        PrimaryGoal::Performance => targets.performance,
    };

    if input.deficit_fraction >= config.large_deficit_fraction {
        g_per_kg += config.large_deficit_protein_boost;
    } else if input.deficit_fraction >= config.moderate_deficit_fraction {
        g_per_kg += config.moderate_deficit_protein_boost;
    }

    if input.age >= 65 {
        g_per_kg += config.age_65_protein_boost;
    } else if input.age >= 50 {
        g_per_kg += config.age_50_protein_boost;
    }

    if input.sessions_per_week >= config.high_frequency_sessions {
        g_per_kg += config.high_frequency_protein_boost;
    }

    g_per_kg.clamp(config.protein_min_g_per_kg, config.protein_max_g_per_kg)
}

/// Hormonal fat floor in g/kg
#[must_use]
pub fn fat_floor_g_per_kg(sex: BiologicalSex, config: &MacroConfig) -> f64 {
    let floor = match sex {
        BiologicalSex::Male => config.fat_floor_male_g_per_kg,
        BiologicalSex::Female => config.fat_floor_female_g_per_kg,
    };
    floor.max(config.fat_min_g_per_kg)
}

const fn fat_share(goal: PrimaryGoal, config: &MacroConfig) -> f64 {
    match goal {
        PrimaryGoal::FatLoss => config.fat_share.fat_loss,
        PrimaryGoal::MuscleGain => config.fat_share.muscle_gain,
        PrimaryGoal::Maintenance => config.fat_share.maintenance,
        PrimaryGoal::Recomposition => config.fat_share.recomposition,
        PrimaryGoal::Performance => config.fat_share.performance,
    }
}

/// Allocate macros for the input
///
/// # Errors
///
/// Returns `PlanError::Validation` for non-positive calories or weight, and
/// `PlanError::InternalConsistency` when protein plus the fat floor already
/// exceed the calorie target
pub fn allocate_macros(input: &MacroInput, config: &MacroConfig) -> PlanResult<MacroTargetSet> {
    if !input.calories.is_finite() || input.calories <= 0.0 {
        return Err(PlanError::validation(
            "calories",
            format!("{} must be a positive number", input.calories),
        ));
    }
    if !input.weight_kg.is_finite() || input.weight_kg <= 0.0 {
        return Err(PlanError::validation(
            "weight_kg",
            format!("{} must be a positive number", input.weight_kg),
        ));
    }

    let mut rationale = Vec::new();
    let weight = input.weight_kg;
    let reference = reference_weight_kg(input, config);
    if reference < weight {
        rationale.push(format!(
            "Protein and fat floor scaled to a {reference:.1} kg reference weight"
        ));
    }

    // Protein; the ceiling is expressed per kg of body weight
    let protein_per_kg = baseline_protein_g_per_kg(input, config);
    let mut protein_g = (protein_per_kg * reference).round();
    if let Some(ceiling) = input.protein_ceiling_g_per_kg {
        protein_g = protein_g.min((ceiling * weight).round());
    }
    let protein_kcal = protein_g * KCAL_PER_GRAM_PROTEIN;
    rationale.push(format!(
        "Protein {protein_g:.0} g ({:.2} g/kg) for {}",
        protein_g / weight,
        input.goal.label()
    ));

    // Fat
    let floor_g = (fat_floor_g_per_kg(input.sex, config) * reference).round();
    if protein_kcal + floor_g * KCAL_PER_GRAM_FAT > input.calories {
        return Err(PlanError::internal(format!(
            "protein ({protein_kcal:.0} kcal) and fat floor ({:.0} kcal) exceed the {:.0} kcal target",
            floor_g * KCAL_PER_GRAM_FAT,
            input.calories
        )));
    }
    let mut fat_g = (fat_share(input.goal, config) * input.calories / KCAL_PER_GRAM_FAT)
        .round()
        .max(floor_g);
    let remaining_for_fat = ((input.calories - protein_kcal) / KCAL_PER_GRAM_FAT).floor();
    if fat_g > remaining_for_fat {
        fat_g = remaining_for_fat.max(floor_g);
    }
    rationale.push(format!(
        "Fat {fat_g:.0} g (floor {floor_g:.0} g)"
    ));

    // Carbohydrate
    let mut carbs_g = ((input.calories - protein_kcal - fat_g * KCAL_PER_GRAM_FAT)
        / KCAL_PER_GRAM_CARBS)
        .round()
        .max(0.0);
    rationale.push(format!("Carbohydrate {carbs_g:.0} g from remaining calories"));

    let macro_kcal = |carbs: f64| {
        fat_g.mul_add(
            KCAL_PER_GRAM_FAT,
            carbs.mul_add(KCAL_PER_GRAM_CARBS, protein_kcal),
        )
    };
    let drift = (macro_kcal(carbs_g) - input.calories).abs() / input.calories;
    if drift > config.reconciliation_tolerance {
        let correction = ((input.calories - macro_kcal(carbs_g)) / KCAL_PER_GRAM_CARBS).round();
        carbs_g = (carbs_g + correction).max(0.0);
        rationale.push(format!(
            "Reconciled carbohydrate by {correction:+.0} g to stay within {:.0}% of target",
            config.reconciliation_tolerance * 100.0
        ));
    }

    let peri_workout = nutrient_timing(input, carbs_g, config);
    let rest_day_meals = config.rest_day_meals.max(1);

    debug!(
        protein_g,
        fat_g,
        carbs_g,
        calories = input.calories,
        "macros allocated"
    );

    Ok(MacroTargetSet {
        calories: input.calories,
        protein: amount(protein_g, weight, config.protein_flex),
        carbs: amount(carbs_g, weight, config.carbs_flex),
        fat: amount(fat_g, weight, config.fat_flex),
        meals_per_day: rest_day_meals,
        training_day_meals: config.training_day_meals,
        protein_per_meal_g: (protein_g / f64::from(rest_day_meals) * 10.0).round() / 10.0,
        peri_workout,
        rationale,
    })
}

fn nutrient_timing(
    input: &MacroInput,
    carbs_g: f64,
    config: &MacroConfig,
) -> Option<PeriWorkoutCarbs> {
    if input.sessions_per_week == 0 {
        return None;
    }
    let timing = &config.nutrient_timing;
    let mut pre = timing.pre_workout_carbs_g_per_kg * input.weight_kg;
    let mut post = timing.post_workout_carbs_g_per_kg * input.weight_kg;
    let budget = carbs_g * timing.max_share_of_daily_carbs;
    if pre + post > budget {
        let scale = if pre + post > 0.0 { budget / (pre + post) } else { 0.0 };
        pre *= scale;
        post *= scale;
    }
    Some(PeriWorkoutCarbs {
        pre_session_g: pre.floor(),
        post_session_g: post.floor(),
    })
}

fn amount(grams: f64, weight_kg: f64, flex: f64) -> MacroAmount {
    MacroAmount {
        grams,
        min_grams: (grams * (1.0 - flex) * 10.0).round() / 10.0,
        max_grams: (grams * (1.0 + flex) * 10.0).round() / 10.0,
        grams_per_kg: (grams / weight_kg * 100.0).round() / 100.0,
    }
}
