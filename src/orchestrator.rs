// ABOUTME: Plan orchestrator sequencing safety, energy, macros, feasibility, training, meals and groceries
// ABOUTME: Single documented entry point returning a plan bundle with accumulated warnings or a typed failure
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Plan Orchestrator
//!
//! [`PlanOrchestrator::generate`] runs the stages in a fixed order:
//!
//! 1. Safety gate (a blocked verdict stops here)
//! 2. Energy estimate
//! 3. Calorie target
//! 4. Macro allocation
//! 5. Feasibility search (an infeasible verdict stops here)
//! 6. Training program
//! 7. Meal plans
//! 8. Supplementary sessions
//! 9. Grocery list and bundle assembly
//!
//! Each stage consumes the previous stage's immutable output. Warnings from
//! every stage are concatenated in stage order and returned with the bundle.

use std::sync::{Arc, OnceLock};

use chrono::{DateTime, Duration, NaiveDate, Utc};
use coachplan_core::constants::plan::{
    DEFAULT_DURATION_WEEKS, MAX_DURATION_WEEKS, MIN_DURATION_WEEKS, PLAN_DAYS,
    REASSESSMENT_INTERVAL_DAYS,
};
use coachplan_core::errors::{PlanError, PlanResult};
use coachplan_core::models::{
    CalorieTarget, DietaryPreference, Equipment, FeasibilityVerdict, IntakeProfile, PlanBundle,
    SafetyLevel, SafetyVerdict, SolvedParameters,
};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::advisory::{AdvisoryProvider, GuardedAdvisor, NoAdvisor};
use crate::catalog::{
    CostCatalog, CostTable, ExerciseCatalog, ExerciseDatabase, FoodCatalog, FoodDatabase,
};
use crate::config::EngineConfig;
use crate::intelligence::calorie_target::weekly_rate_for_delta;
use crate::intelligence::{
    activity_multiplier, allocate_macros, derive_calorie_target, estimate_energy,
    proposed_weekly_change_percent, validate_safety, EnergyInput, FeasibilityRequest,
    FeasibilitySolver, GroceryAggregator, MacroInput, MealAssembler, MealRequest,
    ModalityPlanner, ModalityRequest, TrainingGenerator, TrainingRequest,
};

/// Caller-supplied generation options
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOptions {
    /// Length of the periodized program (4-52 weeks)
    pub duration_weeks: u32,
    /// Equipment on hand
    pub equipment: Vec<Equipment>,
    /// Dietary pattern overriding the profile's preference
    pub dietary_mode: Option<DietaryPreference>,
    /// Weekly grocery budget; exceeding it produces a warning
    pub budget_ceiling_per_week: Option<f64>,
    /// Seed for identifiers and food rotation
    pub seed: Option<u64>,
    /// Skip the safety gate. Escape hatch for supervised settings only.
    pub skip_safety: bool,
    /// Fixed generation timestamp
    pub reference_time: Option<DateTime<Utc>>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            duration_weeks: DEFAULT_DURATION_WEEKS,
            equipment: Equipment::FULL_GYM.to_vec(),
            dietary_mode: None,
            budget_ceiling_per_week: None,
            seed: None,
            skip_safety: false,
            reference_time: None,
        }
    }
}

impl GenerationOptions {
    /// Options with a fixed seed, everything else default
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Validate option ranges
    ///
    /// # Errors
    ///
    /// Returns `PlanError::Validation` for an out-of-range duration or a
    /// non-positive budget
    pub fn validate(&self) -> PlanResult<()> {
        if !(MIN_DURATION_WEEKS..=MAX_DURATION_WEEKS).contains(&self.duration_weeks) {
            return Err(PlanError::validation(
                "options.duration_weeks",
                format!(
                    "{} is outside {MIN_DURATION_WEEKS}-{MAX_DURATION_WEEKS} weeks",
                    self.duration_weeks
                ),
            ));
        }
        if let Some(budget) = self.budget_ceiling_per_week {
            if !budget.is_finite() || budget <= 0.0 {
                return Err(PlanError::validation(
                    "options.budget_ceiling_per_week",
                    "budget must be a positive amount",
                ));
            }
        }
        Ok(())
    }
}

/// Sequences every generation stage over injected catalogs
pub struct PlanOrchestrator {
    config: EngineConfig,
    foods: Arc<dyn FoodCatalog>,
    exercises: Arc<dyn ExerciseCatalog>,
    costs: Arc<dyn CostCatalog>,
    advisor: Arc<dyn AdvisoryProvider>,
}

impl PlanOrchestrator {
    /// Orchestrator over the built-in catalogs without an advisor
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            foods: Arc::new(FoodDatabase::builtin().clone()),
            exercises: Arc::new(ExerciseDatabase::builtin().clone()),
            costs: Arc::new(CostTable::builtin().clone()),
            advisor: Arc::new(NoAdvisor),
        }
    }

    /// Replace the lookup catalogs
    #[must_use]
    pub fn with_catalogs(
        mut self,
        foods: Arc<dyn FoodCatalog>,
        exercises: Arc<dyn ExerciseCatalog>,
        costs: Arc<dyn CostCatalog>,
    ) -> Self {
        self.foods = foods;
        self.exercises = exercises;
        self.costs = costs;
        self
    }

    /// Attach an advisor; ignored unless advisory is enabled in config
    #[must_use]
    pub fn with_advisor(mut self, advisor: Arc<dyn AdvisoryProvider>) -> Self {
        if self.config.advisory.enabled {
            self.advisor = Arc::new(GuardedAdvisor::new(advisor, &self.config.advisory));
        } else {
            debug!("advisory disabled in config; advisor not attached");
        }
        self
    }

    /// Engine configuration in use
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Advisor in use (the guarded wrapper when one is attached)
    #[must_use]
    pub fn advisor(&self) -> &dyn AdvisoryProvider {
        self.advisor.as_ref()
    }

    /// Generate a complete plan
    ///
    /// # Errors
    ///
    /// - `PlanError::Validation` for malformed profile or options
    /// - `PlanError::SafetyBlocked` when the safety gate blocks
    /// - `PlanError::Infeasible` when no relaxation makes the goal reachable
    /// - `PlanError::InternalConsistency` when stage outputs contradict each other
    #[instrument(skip_all, fields(goal = ?profile.goal.primary, seed = ?options.seed))]
    pub fn generate(
        &self,
        profile: &IntakeProfile,
        options: &GenerationOptions,
    ) -> PlanResult<(PlanBundle, Vec<String>)> {
        options.validate()?;
        profile.validate()?;
        let config = &self.config;
        let mut warnings = Vec::new();
        let mut notes = Vec::new();

        // Safety
        let safety = self.safety_gate(profile, options, &mut warnings)?;

        // Energy
        let multiplier = activity_multiplier(
            weekly_activity_sessions(profile),
            &config.energy.activity_factors,
        );
        let energy = estimate_energy(
            &EnergyInput::from_demographics(&profile.demographics, multiplier),
            &config.energy,
        )?;
        notes.extend(energy.notes.iter().cloned());
        debug!(tdee = energy.tdee_mean, confidence = energy.confidence, "energy estimated");

        // Calorie target
        let (mut calorie_target, calorie_warnings) =
            derive_calorie_target(profile, &energy, &config.calories);
        warnings.extend(calorie_warnings);

        // Macros
        let dietary_preference = options
            .dietary_mode
            .unwrap_or(profile.nutrition.preference);
        let mut macro_input = MacroInput::from_profile(profile, &calorie_target);
        let mut macros = allocate_macros(&macro_input, &config.macros)?;

        // Feasibility
        let solver =
            FeasibilitySolver::new(&config.feasibility, &config.calories, self.foods.as_ref())
                .with_advisor(self.advisor.as_ref(), config.advisory.max_response_chars);
        let feasibility = solver.solve(&FeasibilityRequest {
            profile,
            energy: &energy,
            calorie_target: &calorie_target,
            protein_g_per_kg: macros.protein.grams_per_kg,
            dietary_preference,
            duration_weeks: options.duration_weeks,
        });
        let solution = match &feasibility {
            FeasibilityVerdict::Infeasible {
                violations,
                trade_offs,
                ..
            } => {
                info!(violations = violations.len(), "generation stopped: infeasible goal");
                return Err(PlanError::Infeasible {
                    violations: violations.clone(),
                    trade_offs: trade_offs.clone(),
                });
            }
            FeasibilityVerdict::Suboptimal {
                solution, relaxed, ..
            } => {
                warnings.extend(relaxed.iter().map(|r| {
                    format!(
                        "Adjusted {}: requested {}, planned {}",
                        r.constraint.label(),
                        r.requested,
                        r.applied
                    )
                }));
                solution.clone()
            }
            FeasibilityVerdict::Feasible { solution, .. } => solution.clone(),
        };

        let calories_moved = (solution.calorie_target - calorie_target.calories).abs() > 0.5;
        let protein_capped = solution.protein_g_per_kg + 1e-9 < macros.protein.grams_per_kg;
        let sessions_moved = solution.sessions_per_week != macro_input.sessions_per_week;
        if calories_moved || protein_capped || sessions_moved {
            if calories_moved {
                calorie_target = adjusted_target(&calorie_target, &solution);
            }
            macro_input = MacroInput {
                calories: calorie_target.calories,
                sessions_per_week: solution.sessions_per_week,
                deficit_fraction: (-calorie_target.delta_fraction).max(0.0),
                protein_ceiling_g_per_kg: protein_capped.then_some(solution.protein_g_per_kg),
                ..macro_input
            };
            macros = allocate_macros(&macro_input, &config.macros)?;
            warnings.push(format!(
                "Macros re-allocated for the adjusted plan: {:.0} kcal, {:.0} g protein",
                macros.calories, macros.protein.grams
            ));
        }

        let mut rng = ChaCha8Rng::seed_from_u64(
            options.seed.unwrap_or_else(|| rand::thread_rng().gen()),
        );
        let plan_id = next_uuid(&mut rng);
        let rotation_offset = rng.gen_range(0..PLAN_DAYS as usize);
        let created_at = creation_time(options);
        let valid_from = created_at.date_naive();

        // Training
        let training = TrainingGenerator::new(&config.training, self.exercises.as_ref())
            .with_advisor(self.advisor.as_ref())
            .generate(&TrainingRequest {
                profile,
                sessions_per_week: solution.sessions_per_week,
                session_minutes: solution.session_minutes,
                experience: solution.experience,
                equipment: &options.equipment,
                duration_weeks: options.duration_weeks,
            });
        let training_days = training.training_days();

        // Meals
        let (meal_plans, meal_warnings) = MealAssembler::new(&config.meals, self.foods.as_ref())
            .assemble(&MealRequest {
                macros: &macros,
                training_days: &training_days,
                valid_from,
                days: PLAN_DAYS,
                dietary_preference,
                allergies: &profile.nutrition.allergies,
                rotation_offset,
            })?;
        warnings.extend(meal_warnings);

        // Supplementary sessions
        let (modality_sessions, modality_warnings) = ModalityPlanner::new(&config.modality)
            .plan(&ModalityRequest {
                preferences: profile.modality.as_ref(),
                resistance_days: &training_days,
                valid_from,
            });
        warnings.extend(modality_warnings);

        // Groceries
        let grocery_list =
            GroceryAggregator::new(&config.grocery, self.foods.as_ref(), self.costs.as_ref())
                .aggregate(&meal_plans);
        if let Some(budget) = options.budget_ceiling_per_week {
            let weekly = grocery_list.cost_per_day * 7.0;
            if weekly > budget {
                warnings.push(format!(
                    "Estimated grocery cost {sym}{weekly:.2}/week exceeds the {sym}{budget:.2} budget",
                    sym = config.grocery.currency_symbol
                ));
            }
        }

        let next_reassessment = valid_from + Duration::days(REASSESSMENT_INTERVAL_DAYS);
        notes.push(format!("Reassess progress on {next_reassessment}"));

        let bundle = PlanBundle {
            plan_id,
            user_id: profile.user_id,
            created_at,
            valid_from,
            valid_until: valid_from + Duration::days(i64::from(PLAN_DAYS) - 1),
            program_duration_weeks: options.duration_weeks,
            goal: profile.goal.primary,
            energy,
            calorie_target,
            macros,
            safety,
            feasibility,
            training,
            meal_plans,
            modality_sessions,
            grocery_list,
            notes,
            next_reassessment,
        };
        info!(
            plan_id = %bundle.plan_id,
            calories = bundle.macros.calories,
            warnings = warnings.len(),
            "plan generated"
        );
        Ok((bundle, warnings))
    }

    fn safety_gate(
        &self,
        profile: &IntakeProfile,
        options: &GenerationOptions,
        warnings: &mut Vec<String>,
    ) -> PlanResult<SafetyVerdict> {
        if options.skip_safety {
            warn!("safety validation skipped by caller option");
            warnings.push(
                "Safety validation was skipped; this plan has not been screened for medical risk"
                    .to_owned(),
            );
            return Ok(SafetyVerdict::Ok {
                message: "Safety validation skipped by caller".to_owned(),
            });
        }

        let change = proposed_weekly_change_percent(profile, &self.config.calories);
        let verdict = validate_safety(profile, change, &self.config.safety);
        match verdict.level() {
            SafetyLevel::Blocked => {
                info!(
                    findings = verdict.findings().len(),
                    "generation stopped: safety blocked"
                );
                Err(PlanError::SafetyBlocked { verdict })
            }
            SafetyLevel::Warning => {
                warnings.extend(
                    verdict
                        .findings()
                        .iter()
                        .map(|f| format!("Safety: {} ({})", f.detail, f.modification)),
                );
                Ok(verdict)
            }
            SafetyLevel::Ok => Ok(verdict),
        }
    }
}

/// Generate with the global config and built-in catalogs
///
/// # Errors
///
/// See [`PlanOrchestrator::generate`]
pub fn generate(
    profile: &IntakeProfile,
    options: &GenerationOptions,
) -> PlanResult<(PlanBundle, Vec<String>)> {
    static DEFAULT: OnceLock<PlanOrchestrator> = OnceLock::new();
    DEFAULT
        .get_or_init(|| PlanOrchestrator::new(EngineConfig::global().clone()))
        .generate(profile, options)
}

/// Resistance sessions plus every planned supplementary session
fn weekly_activity_sessions(profile: &IntakeProfile) -> u32 {
    let supplementary = profile.modality.as_ref().map_or(0, |m| {
        m.targets
            .iter()
            .map(|t| u32::from(t.sessions_per_week))
            .sum::<u32>()
            + u32::try_from(m.fixed_sessions.len()).unwrap_or(u32::MAX)
    });
    u32::from(profile.schedule.sessions_per_week).saturating_add(supplementary)
}

fn adjusted_target(original: &CalorieTarget, solution: &SolvedParameters) -> CalorieTarget {
    let maintenance = original.maintenance_calories;
    let delta = solution.calorie_target - maintenance;
    let mut rationale = original.rationale.clone();
    rationale.push(format!(
        "Adjusted to {:.0} kcal ({:+.2} kg/week) to satisfy feasibility constraints",
        solution.calorie_target, solution.weekly_rate_kg
    ));
    CalorieTarget {
        calories: solution.calorie_target,
        maintenance_calories: maintenance,
        daily_delta: delta,
        delta_fraction: if maintenance > 0.0 {
            delta / maintenance
        } else {
            0.0
        },
        weekly_rate_kg: weekly_rate_for_delta(delta),
        rationale,
    }
}

fn next_uuid(rng: &mut ChaCha8Rng) -> Uuid {
    let mut bytes = [0_u8; 16];
    rng.fill_bytes(&mut bytes);
    uuid::Builder::from_random_bytes(bytes).into_uuid()
}

/// Reference time, else start of the current UTC day for seeded runs, else now
fn creation_time(options: &GenerationOptions) -> DateTime<Utc> {
    if let Some(time) = options.reference_time {
        return time;
    }
    let now = Utc::now();
    if options.seed.is_some() {
        start_of_day(now.date_naive()).unwrap_or(now)
    } else {
        now
    }
}

fn start_of_day(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0).map(|t| t.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_reject_out_of_range_duration() {
        let options = GenerationOptions {
            duration_weeks: 60,
            ..GenerationOptions::default()
        };
        assert!(matches!(
            options.validate(),
            Err(PlanError::Validation { .. })
        ));
    }

    #[test]
    fn test_options_reject_non_positive_budget() {
        let options = GenerationOptions {
            budget_ceiling_per_week: Some(0.0),
            ..GenerationOptions::default()
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_seeded_uuid_is_stable() {
        let a = next_uuid(&mut ChaCha8Rng::seed_from_u64(7));
        let b = next_uuid(&mut ChaCha8Rng::seed_from_u64(7));
        let c = next_uuid(&mut ChaCha8Rng::seed_from_u64(8));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.get_version_num(), 4);
    }

    #[test]
    fn test_seeded_creation_time_is_midnight() {
        let time = creation_time(&GenerationOptions::seeded(1));
        assert_eq!(time.time(), chrono::NaiveTime::MIN);
    }

    #[test]
    fn test_advisor_ignored_when_disabled() {
        let orchestrator = PlanOrchestrator::new(EngineConfig::default()).with_advisor(Arc::new(
            |_: &str, _: &str, _: &str| Some("anything".to_owned()),
        ));
        assert!(orchestrator.advisor().infer("t", "p", "k").is_none());
    }
}
