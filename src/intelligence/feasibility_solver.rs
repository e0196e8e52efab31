// ABOUTME: Bounded backtracking search over goal, schedule and diet constraints
// ABOUTME: Returns feasible, suboptimal with relaxations, or infeasible with ranked trade-offs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Feasibility Solver Module
//!
//! Checks whether the requested goal, schedule and dietary filters can hold
//! together. The search assigns four variables in order of how disruptive a
//! change would be:
//!
//! 1. experience tier (declared, then downgraded toward training history)
//! 2. weekly rate of change (requested, then smaller magnitudes)
//! 3. sessions per week (requested, then nearest alternatives)
//! 4. minutes per session (requested, then nearest configured step)
//!
//! Each level prunes on the constraints it owns, so the first complete
//! assignment is the least-relaxed one. The search is capped by an iteration
//! budget and a wall-clock deadline.

use std::time::{Duration, Instant};

use coachplan_core::models::{
    CalorieTarget, ConstraintKind, ConstraintViolation, DietaryPreference, EnergyEstimate,
    ExperienceLevel, FeasibilityVerdict, FoodGroup, IntakeProfile, RelaxedConstraint,
    SolvedParameters, TradeOffOption,
};
use tracing::{debug, info, warn};

use crate::advisory::{consult, sanitize_text, AdvisoryProvider, NoAdvisor, TASK_TRADE_OFF_EXPLANATION};
use crate::catalog::FoodCatalog;
use crate::config::intelligence::{CalorieConfig, FeasibilityConfig};
use crate::intelligence::calorie_target::{calorie_floor, daily_delta_for_rate};

static NO_ADVISOR: NoAdvisor = NoAdvisor;

/// Everything the solver needs to know about one request
#[derive(Debug, Clone, Copy)]
pub struct FeasibilityRequest<'a> {
    /// Normalized profile
    pub profile: &'a IntakeProfile,
    /// Energy estimate
    pub energy: &'a EnergyEstimate,
    /// Calorie target derived for the goal
    pub calorie_target: &'a CalorieTarget,
    /// Protein target from macro allocation (g/kg)
    pub protein_g_per_kg: f64,
    /// Effective dietary pattern
    pub dietary_preference: DietaryPreference,
    /// Program duration (weeks), used when no timeline was given
    pub duration_weeks: u32,
}

/// Constraint-satisfaction search over goal and schedule
pub struct FeasibilitySolver<'a> {
    config: &'a FeasibilityConfig,
    calories: &'a CalorieConfig,
    foods: &'a dyn FoodCatalog,
    advisor: &'a dyn AdvisoryProvider,
    max_explanation_chars: usize,
}

#[derive(Debug, Clone, Copy)]
struct GoalOutcome {
    calories: f64,
    timeline_weeks: u32,
    timeline_extended: bool,
}

#[derive(Debug, Clone, Copy)]
struct Assignment {
    experience: ExperienceLevel,
    rate_index: usize,
    sessions: u8,
    minutes: u32,
    goal: GoalOutcome,
}

enum SearchOutcome {
    Found(Assignment),
    Exhausted,
    BudgetSpent,
}

struct SearchSpace {
    experiences: Vec<ExperienceLevel>,
    rates: Vec<f64>,
    sessions: Vec<u8>,
    minutes: Vec<u32>,
    available_days: u8,
}

impl<'a> FeasibilitySolver<'a> {
    /// Create a solver without an advisor
    #[must_use]
    pub fn new(
        config: &'a FeasibilityConfig,
        calories: &'a CalorieConfig,
        foods: &'a dyn FoodCatalog,
    ) -> Self {
        Self {
            config,
            calories,
            foods,
            advisor: &NO_ADVISOR,
            max_explanation_chars: 500,
        }
    }

    /// Attach an advisor used to explain trade-offs
    #[must_use]
    pub fn with_advisor(mut self, advisor: &'a dyn AdvisoryProvider, max_chars: usize) -> Self {
        self.advisor = advisor;
        self.max_explanation_chars = max_chars;
        self
    }

    /// Run the search
    #[must_use]
    pub fn solve(&self, request: &FeasibilityRequest<'_>) -> FeasibilityVerdict {
        let profile = request.profile;
        let mut diagnostics = Vec::new();

        let proteins = self.foods.allowed(
            FoodGroup::Protein,
            request.dietary_preference,
            &profile.nutrition.allergies,
        );
        if proteins.is_empty() {
            let violations = vec![ConstraintViolation {
                constraint: ConstraintKind::ProteinSources,
                detail: format!(
                    "no protein source remains after the {:?} filter and {} allerg(ies)",
                    request.dietary_preference,
                    profile.nutrition.allergies.len()
                ),
            }];
            return self.infeasible(request, violations, None, diagnostics);
        }

        let space = self.search_space(request);
        let deadline = Instant::now() + Duration::from_millis(self.config.timeout_ms);
        let mut iterations = 0_u32;
        let outcome = self.search(request, &space, deadline, &mut iterations);
        diagnostics.push(format!("explored {iterations} candidate assignment(s)"));
        debug!(iterations, "feasibility search finished");

        match outcome {
            SearchOutcome::Found(assignment) => {
                self.solved(request, &space, assignment, diagnostics)
            }
            SearchOutcome::Exhausted => {
                let violations = self.diagnose(request, &space);
                let best_rate = self.best_admissible_rate(request, &space);
                self.infeasible(request, violations, best_rate, diagnostics)
            }
            SearchOutcome::BudgetSpent => {
                warn!(iterations, "feasibility search budget spent");
                diagnostics.push(format!(
                    "search stopped at the {} iteration / {} ms budget",
                    self.config.max_iterations, self.config.timeout_ms
                ));
                let mut violations = self.diagnose(request, &space);
                violations.push(ConstraintViolation {
                    constraint: ConstraintKind::SearchBudget,
                    detail: format!(
                        "no assignment confirmed within {iterations} iteration(s) or {} ms",
                        self.config.timeout_ms
                    ),
                });
                let best_rate = self.best_admissible_rate(request, &space);
                self.infeasible(request, violations, best_rate, diagnostics)
            }
        }
    }

    fn search_space(&self, request: &FeasibilityRequest<'_>) -> SearchSpace {
        let schedule = &request.profile.schedule;

        let mut experiences = vec![schedule.experience];
        let mut tier = schedule.experience;
        while tier != ExperienceLevel::Beginner {
            tier = tier.downgrade();
            experiences.push(tier);
        }

        let requested_rate = request.calorie_target.weekly_rate_kg;
        let mut rates = vec![requested_rate];
        if requested_rate.abs() > f64::EPSILON {
            let sign = requested_rate.signum();
            let mut magnitude = requested_rate.abs() - self.config.rate_step_kg;
            while magnitude >= self.config.rate_step_kg - 1e-9 {
                rates.push(sign * (magnitude * 1000.0).round() / 1000.0);
                magnitude -= self.config.rate_step_kg;
            }
        }

        let requested_sessions = schedule.sessions_per_week;
        let lowest = u8::from(requested_sessions > 0);
        let mut sessions: Vec<u8> = (lowest..=7).collect();
        sessions.sort_by_key(|s| (s.abs_diff(requested_sessions), *s));

        let requested_minutes = schedule.session_minutes;
        let step = self.config.session_minutes_step.max(1);
        let mut minutes = vec![requested_minutes];
        let mut value = self.config.min_session_minutes;
        while value <= self.config.max_session_minutes {
            if value != requested_minutes {
                minutes.push(value);
            }
            value += step;
        }
        minutes.sort_by_key(|m| (m.abs_diff(requested_minutes), *m));

        let available_days = match request.profile.ordered_available_days().len() {
            0 => 7,
            n => u8::try_from(n).unwrap_or(7),
        };

        SearchSpace {
            experiences,
            rates,
            sessions,
            minutes,
            available_days,
        }
    }

    fn search(
        &self,
        request: &FeasibilityRequest<'_>,
        space: &SearchSpace,
        deadline: Instant,
        iterations: &mut u32,
    ) -> SearchOutcome {
        let years = request.profile.schedule.training_years;
        for &experience in &space.experiences {
            if !self.tick(iterations, deadline) {
                return SearchOutcome::BudgetSpent;
            }
            if experience_violation(experience, years).is_some() {
                continue;
            }
            for (rate_index, &rate) in space.rates.iter().enumerate() {
                if !self.tick(iterations, deadline) {
                    return SearchOutcome::BudgetSpent;
                }
                let Ok(goal) = self.check_goal(request, experience, rate, rate_index == 0) else {
                    continue;
                };
                for &sessions in &space.sessions {
                    if !self.tick(iterations, deadline) {
                        return SearchOutcome::BudgetSpent;
                    }
                    if self
                        .session_violation(sessions, experience, space.available_days)
                        .is_some()
                    {
                        continue;
                    }
                    for &minutes in &space.minutes {
                        if !self.tick(iterations, deadline) {
                            return SearchOutcome::BudgetSpent;
                        }
                        if self.duration_violation(minutes).is_none() {
                            return SearchOutcome::Found(Assignment {
                                experience,
                                rate_index,
                                sessions,
                                minutes,
                                goal,
                            });
                        }
                    }
                }
            }
        }
        SearchOutcome::Exhausted
    }

    fn tick(&self, iterations: &mut u32, deadline: Instant) -> bool {
        *iterations += 1;
        *iterations <= self.config.max_iterations && Instant::now() < deadline
    }

    fn max_rate_for(&self, request: &FeasibilityRequest<'_>, experience: ExperienceLevel, rate: f64) -> f64 {
        let weight = request.profile.demographics.weight_kg;
        let percent = if rate < 0.0 {
            self.config.max_loss_percent_per_week
        } else {
            match experience {
                ExperienceLevel::Beginner => self.config.max_gain_percent_beginner,
                ExperienceLevel::Intermediate => self.config.max_gain_percent_intermediate,
                ExperienceLevel::Advanced => self.config.max_gain_percent_advanced,
            }
        };
        weight * percent / 100.0
    }

    /// Calorie bounds and rate of change, ignoring the goal timeline
    fn check_energy(
        &self,
        request: &FeasibilityRequest<'_>,
        experience: ExperienceLevel,
        rate: f64,
        requested: bool,
    ) -> Result<f64, ConstraintViolation> {
        let calories = calories_for(request, rate, requested);
        let maintenance = request.energy.tdee_mean;
        let floor = calorie_floor(request.profile.demographics.sex, self.calories)
            .min(maintenance.round());
        if calories < floor - 0.5 {
            return Err(ConstraintViolation {
                constraint: ConstraintKind::CalorieFloor,
                detail: format!("{calories:.0} kcal is below the {floor:.0} kcal floor"),
            });
        }
        let ceiling = maintenance * (1.0 + self.config.calorie_ceiling_fraction);
        if calories > ceiling + 0.5 {
            return Err(ConstraintViolation {
                constraint: ConstraintKind::CalorieCeiling,
                detail: format!("{calories:.0} kcal exceeds the {ceiling:.0} kcal ceiling"),
            });
        }
        let max_rate = self.max_rate_for(request, experience, rate);
        if rate.abs() > max_rate + 1e-9 {
            return Err(ConstraintViolation {
                constraint: ConstraintKind::RateOfChange,
                detail: format!(
                    "{:.2} kg/week exceeds the {max_rate:.2} kg/week limit",
                    rate.abs()
                ),
            });
        }
        Ok(calories)
    }

    fn check_goal(
        &self,
        request: &FeasibilityRequest<'_>,
        experience: ExperienceLevel,
        rate: f64,
        requested: bool,
    ) -> Result<GoalOutcome, ConstraintViolation> {
        let calories = self.check_energy(request, experience, rate, requested)?;
        let goal = &request.profile.goal;
        let fallback_weeks = goal.timeline_weeks.unwrap_or(request.duration_weeks);

        let (Some(target), Some(timeline)) = (goal.target_weight_kg, goal.timeline_weeks) else {
            return Ok(GoalOutcome {
                calories,
                timeline_weeks: fallback_weeks,
                timeline_extended: false,
            });
        };
        let change = target - request.profile.demographics.weight_kg;
        let direction = goal.primary.weight_direction();
        let wanted = if change > 0.05 {
            1
        } else if change < -0.05 {
            -1
        } else {
            0
        };
        if wanted == 0 || wanted != direction {
            return Ok(GoalOutcome {
                calories,
                timeline_weeks: fallback_weeks,
                timeline_extended: false,
            });
        }
        if rate.abs() < f64::EPSILON || rate.signum() as i8 != wanted {
            return Err(ConstraintViolation {
                constraint: ConstraintKind::GoalTimeline,
                detail: format!(
                    "a {rate:+.2} kg/week rate never reaches {target:.1} kg"
                ),
            });
        }
        let needed = (change.abs() / rate.abs()).ceil() as u32;
        let allowed = (f64::from(timeline) * self.config.max_timeline_extension).floor() as u32;
        if needed <= timeline {
            Ok(GoalOutcome {
                calories,
                timeline_weeks: timeline,
                timeline_extended: false,
            })
        } else if needed <= allowed {
            Ok(GoalOutcome {
                calories,
                timeline_weeks: needed,
                timeline_extended: true,
            })
        } else {
            Err(ConstraintViolation {
                constraint: ConstraintKind::GoalTimeline,
                detail: format!(
                    "{:.1} kg at {:.2} kg/week needs {needed} weeks, more than {allowed}",
                    change.abs(),
                    rate.abs()
                ),
            })
        }
    }

    fn session_violation(
        &self,
        sessions: u8,
        experience: ExperienceLevel,
        available_days: u8,
    ) -> Option<ConstraintViolation> {
        if sessions > available_days {
            return Some(ConstraintViolation {
                constraint: ConstraintKind::SessionAvailability,
                detail: format!("{sessions} sessions but only {available_days} available day(s)"),
            });
        }
        let capacity = match experience {
            ExperienceLevel::Beginner => self.config.max_sessions_beginner,
            ExperienceLevel::Intermediate => self.config.max_sessions_intermediate,
            ExperienceLevel::Advanced => self.config.max_sessions_advanced,
        };
        if sessions > capacity {
            return Some(ConstraintViolation {
                constraint: ConstraintKind::SessionCapacity,
                detail: format!(
                    "{sessions} sessions exceeds the {capacity} a {experience:?} lifter recovers from"
                ),
            });
        }
        None
    }

    fn duration_violation(&self, minutes: u32) -> Option<ConstraintViolation> {
        let (min, max) = (self.config.min_session_minutes, self.config.max_session_minutes);
        if (min..=max).contains(&minutes) {
            None
        } else {
            Some(ConstraintViolation {
                constraint: ConstraintKind::SessionDuration,
                detail: format!("{minutes} minutes is outside {min}-{max}"),
            })
        }
    }

    fn solved(
        &self,
        request: &FeasibilityRequest<'_>,
        space: &SearchSpace,
        found: Assignment,
        diagnostics: Vec<String>,
    ) -> FeasibilityVerdict {
        let profile = request.profile;
        let schedule = &profile.schedule;
        let mut relaxed = Vec::new();

        if found.experience != schedule.experience {
            relaxed.push(RelaxedConstraint {
                constraint: ConstraintKind::ExperienceConsistency,
                requested: format!(
                    "{:?} with {:.1} training years",
                    schedule.experience, schedule.training_years
                ),
                applied: format!("{:?}", found.experience),
            });
        }

        let rate = space.rates.get(found.rate_index).copied().unwrap_or_default();
        let requested_rate = request.calorie_target.weekly_rate_kg;
        if found.rate_index != 0 {
            let constraint = self
                .check_goal(request, schedule.experience, requested_rate, true)
                .err()
                .map_or(ConstraintKind::RateOfChange, |v| v.constraint);
            relaxed.push(RelaxedConstraint {
                constraint,
                requested: format!("{requested_rate:+.2} kg/week"),
                applied: format!("{rate:+.2} kg/week"),
            });
        }
        if found.goal.timeline_extended {
            relaxed.push(RelaxedConstraint {
                constraint: ConstraintKind::GoalTimeline,
                requested: format!("{} weeks", profile.goal.timeline_weeks.unwrap_or_default()),
                applied: format!("{} weeks", found.goal.timeline_weeks),
            });
        }

        if found.sessions != schedule.sessions_per_week {
            let constraint = self
                .session_violation(schedule.sessions_per_week, found.experience, space.available_days)
                .map_or(ConstraintKind::SessionAvailability, |v| v.constraint);
            relaxed.push(RelaxedConstraint {
                constraint,
                requested: format!("{} sessions/week", schedule.sessions_per_week),
                applied: format!("{} sessions/week", found.sessions),
            });
        }
        if found.minutes != schedule.session_minutes {
            relaxed.push(RelaxedConstraint {
                constraint: ConstraintKind::SessionDuration,
                requested: format!("{} minutes", schedule.session_minutes),
                applied: format!("{} minutes", found.minutes),
            });
        }

        let mut protein = request.protein_g_per_kg;
        if request.dietary_preference == DietaryPreference::Vegan
            && protein > self.config.plant_protein_ceiling_g_per_kg
        {
            relaxed.push(RelaxedConstraint {
                constraint: ConstraintKind::PlantProteinCeiling,
                requested: format!("{protein:.2} g/kg"),
                applied: format!("{:.2} g/kg", self.config.plant_protein_ceiling_g_per_kg),
            });
            protein = self.config.plant_protein_ceiling_g_per_kg;
        }

        let solution = SolvedParameters {
            calorie_target: found.goal.calories,
            daily_energy_delta: found.goal.calories - request.energy.tdee_mean,
            weekly_rate_kg: rate,
            timeline_weeks: found.goal.timeline_weeks,
            target_weight_kg: profile.goal.target_weight_kg,
            sessions_per_week: found.sessions,
            session_minutes: found.minutes,
            experience: found.experience,
            protein_g_per_kg: protein,
        };

        if relaxed.is_empty() {
            info!("request feasible as stated");
            FeasibilityVerdict::Feasible {
                solution,
                diagnostics,
            }
        } else {
            info!(relaxed = relaxed.len(), "request feasible after relaxation");
            FeasibilityVerdict::Suboptimal {
                solution,
                relaxed,
                diagnostics,
            }
        }
    }

    /// Violations explaining why no assignment exists
    fn diagnose(
        &self,
        request: &FeasibilityRequest<'_>,
        space: &SearchSpace,
    ) -> Vec<ConstraintViolation> {
        let mut violations: Vec<ConstraintViolation> = Vec::new();
        let mut push = |violation: ConstraintViolation| {
            if !violations.iter().any(|v| v.constraint == violation.constraint) {
                violations.push(violation);
            }
        };

        let years = request.profile.schedule.training_years;
        let experience = space
            .experiences
            .iter()
            .copied()
            .find(|e| experience_violation(*e, years).is_none())
            .unwrap_or(ExperienceLevel::Beginner);

        let rate_results: Vec<Result<GoalOutcome, ConstraintViolation>> = space
            .rates
            .iter()
            .enumerate()
            .map(|(i, rate)| self.check_goal(request, experience, *rate, i == 0))
            .collect();
        if rate_results.iter().all(Result::is_err) {
            if let Some(Err(first)) = rate_results.first() {
                push(first.clone());
            }
            if let Some(Err(last)) = rate_results.last() {
                push(last.clone());
            }
        }

        if space
            .sessions
            .iter()
            .all(|s| self.session_violation(*s, experience, space.available_days).is_some())
        {
            if let Some(v) = self.session_violation(
                request.profile.schedule.sessions_per_week,
                experience,
                space.available_days,
            ) {
                push(v);
            }
        }
        if space.minutes.iter().all(|m| self.duration_violation(*m).is_some()) {
            if let Some(v) = self.duration_violation(request.profile.schedule.session_minutes) {
                push(v);
            }
        }
        violations
    }

    /// Largest-magnitude rate passing calorie and rate-of-change checks
    fn best_admissible_rate(
        &self,
        request: &FeasibilityRequest<'_>,
        space: &SearchSpace,
    ) -> Option<f64> {
        let experience = request.profile.schedule.experience;
        space
            .rates
            .iter()
            .enumerate()
            .find(|(i, rate)| {
                self.check_energy(request, experience, **rate, *i == 0).is_ok()
                    && rate.abs() > f64::EPSILON
            })
            .map(|(_, rate)| *rate)
    }

    fn infeasible(
        &self,
        request: &FeasibilityRequest<'_>,
        violations: Vec<ConstraintViolation>,
        best_rate: Option<f64>,
        mut diagnostics: Vec<String>,
    ) -> FeasibilityVerdict {
        let mut trade_offs = self.trade_offs(request, &violations, best_rate);
        for option in &mut trade_offs {
            let prompt = format!(
                "In one or two sentences, explain to the user why this change helps. Change: {}. Impact: {}.",
                option.relaxation, option.expected_impact
            );
            option.explanation = consult(self.advisor, TASK_TRADE_OFF_EXPLANATION, &prompt)
                .and_then(|text| sanitize_text(&text, self.max_explanation_chars));
        }
        diagnostics.push(format!(
            "{} hard constraint(s) violated",
            violations.len()
        ));
        info!(violations = violations.len(), "request infeasible");
        FeasibilityVerdict::Infeasible {
            violations,
            trade_offs,
            diagnostics,
        }
    }

    fn trade_offs(
        &self,
        request: &FeasibilityRequest<'_>,
        violations: &[ConstraintViolation],
        best_rate: Option<f64>,
    ) -> Vec<TradeOffOption> {
        let profile = request.profile;
        let weight = profile.demographics.weight_kg;
        let mut options: Vec<(ConstraintKind, String, String)> = Vec::new();

        for violation in violations {
            match violation.constraint {
                ConstraintKind::GoalTimeline => {
                    if let (Some(target), Some(timeline), Some(rate)) =
                        (profile.goal.target_weight_kg, profile.goal.timeline_weeks, best_rate)
                    {
                        let change = (target - weight).abs();
                        let weeks = (change / rate.abs()).ceil() as u32;
                        options.push((
                            ConstraintKind::GoalTimeline,
                            format!("Extend the timeline from {timeline} to {weeks} weeks"),
                            format!("Reach {target:.1} kg at about {:.2} kg/week", rate.abs()),
                        ));
                        let reachable = (rate.mul_add(f64::from(timeline), weight) * 10.0).round() / 10.0;
                        options.push((
                            ConstraintKind::GoalTimeline,
                            format!("Adjust the target weight to {reachable:.1} kg"),
                            format!("Reachable within the original {timeline} weeks"),
                        ));
                    }
                }
                ConstraintKind::ProteinSources | ConstraintKind::PlantProteinCeiling => {
                    options.push((
                        violation.constraint,
                        "Relax the dietary restriction or shorten the allergy list".to_owned(),
                        "At least one protein source becomes available for meal planning"
                            .to_owned(),
                    ));
                }
                ConstraintKind::RateOfChange
                | ConstraintKind::CalorieFloor
                | ConstraintKind::CalorieCeiling => {
                    if let Some(rate) = best_rate {
                        options.push((
                            violation.constraint,
                            format!("Change the weekly rate to {rate:+.2} kg/week"),
                            "Keeps intake within safe calorie bounds".to_owned(),
                        ));
                    }
                }
                ConstraintKind::SessionAvailability
                | ConstraintKind::SessionCapacity
                | ConstraintKind::SessionDuration
                | ConstraintKind::ExperienceConsistency => {
                    options.push((
                        violation.constraint,
                        format!("Revise the training schedule: {}", violation.detail),
                        "Brings the schedule within recoverable limits".to_owned(),
                    ));
                }
                ConstraintKind::SearchBudget => {}
            }
        }
        if let Some(first) = violations.first() {
            options.push((
                first.constraint,
                "Switch the goal to maintenance".to_owned(),
                "No weight change is targeted; training and nutrition quality continue"
                    .to_owned(),
            ));
        }

        options
            .into_iter()
            .take(self.config.max_trade_offs)
            .enumerate()
            .map(|(index, (constraint, relaxation, expected_impact))| TradeOffOption {
                rank: u8::try_from(index + 1).unwrap_or(u8::MAX),
                constraint,
                relaxation,
                expected_impact,
                explanation: None,
            })
            .collect()
    }
}

/// Intake for a rate; the requested rate keeps the derived target as-is
fn calories_for(request: &FeasibilityRequest<'_>, rate: f64, requested: bool) -> f64 {
    if requested {
        request.calorie_target.calories
    } else {
        (request.energy.tdee_mean + daily_delta_for_rate(rate)).round()
    }
}

fn experience_violation(experience: ExperienceLevel, years: f64) -> Option<ConstraintViolation> {
    if years + 1e-9 >= experience.min_training_years() {
        None
    } else {
        Some(ConstraintViolation {
            constraint: ConstraintKind::ExperienceConsistency,
            detail: format!(
                "{experience:?} expects {:.0}+ years but {years:.1} were reported",
                experience.min_training_years()
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FoodDatabase;
    use chrono::Weekday;
    use coachplan_core::models::{
        BiologicalSex, Demographics, GoalSpec, MedicalProfile, NutritionPreferences, PrimaryGoal,
        TrainingFocus, TrainingIntensity, TrainingSchedule,
    };

    fn profile() -> IntakeProfile {
        IntakeProfile {
            user_id: None,
            demographics: Demographics {
                age: 35,
                sex: BiologicalSex::Male,
                weight_kg: 100.0,
                height_cm: 180.0,
                body_fat_percent: None,
            },
            goal: GoalSpec {
                primary: PrimaryGoal::FatLoss,
                target_weight_kg: None,
                timeline_weeks: None,
            },
            schedule: TrainingSchedule {
                sessions_per_week: 4,
                available_days: vec![Weekday::Mon, Weekday::Tue, Weekday::Thu, Weekday::Fri],
                session_minutes: 60,
                experience: ExperienceLevel::Intermediate,
                training_years: 2.0,
                focus: TrainingFocus::Hypertrophy,
                intensity: TrainingIntensity::Moderate,
            },
            nutrition: NutritionPreferences::default(),
            medical: MedicalProfile::default(),
            modality: None,
        }
    }

    fn energy() -> EnergyEstimate {
        EnergyEstimate {
            bmr_mean: 1900.0,
            tdee_mean: 2900.0,
            ci_lower: 2600.0,
            ci_upper: 3200.0,
            confidence: 0.7,
            equations_used: Vec::new(),
            activity_multiplier: 1.55,
            notes: Vec::new(),
        }
    }

    fn target(rate: f64) -> CalorieTarget {
        let delta = daily_delta_for_rate(rate);
        CalorieTarget {
            calories: (2900.0 + delta).round(),
            maintenance_calories: 2900.0,
            daily_delta: delta,
            delta_fraction: delta / 2900.0,
            weekly_rate_kg: rate,
            rationale: Vec::new(),
        }
    }

    fn solve(profile: &IntakeProfile, rate: f64, preference: DietaryPreference) -> FeasibilityVerdict {
        solve_with_protein(profile, rate, preference, 2.0)
    }

    fn solve_with_protein(
        profile: &IntakeProfile,
        rate: f64,
        preference: DietaryPreference,
        protein_g_per_kg: f64,
    ) -> FeasibilityVerdict {
        let config = FeasibilityConfig::default();
        let calories = CalorieConfig::default();
        let energy = energy();
        let target = target(rate);
        FeasibilitySolver::new(&config, &calories, FoodDatabase::builtin()).solve(
            &FeasibilityRequest {
                profile,
                energy: &energy,
                calorie_target: &target,
                protein_g_per_kg,
                dietary_preference: preference,
                duration_weeks: 12,
            },
        )
    }

    #[test]
    fn test_plain_request_is_feasible() {
        let verdict = solve(&profile(), -0.5, DietaryPreference::Omnivore);
        assert!(matches!(verdict, FeasibilityVerdict::Feasible { .. }));
        assert_eq!(verdict.solution().unwrap().sessions_per_week, 4);
    }

    #[test]
    fn test_sessions_beyond_available_days_relaxed() {
        let mut p = profile();
        p.schedule.sessions_per_week = 6;
        let verdict = solve(&p, -0.5, DietaryPreference::Omnivore);
        let FeasibilityVerdict::Suboptimal { solution, relaxed, .. } = verdict else {
            panic!("expected suboptimal verdict");
        };
        assert_eq!(solution.sessions_per_week, 4);
        assert!(relaxed
            .iter()
            .any(|r| r.constraint == ConstraintKind::SessionAvailability));
    }

    #[test]
    fn test_inconsistent_experience_downgraded() {
        let mut p = profile();
        p.schedule.experience = ExperienceLevel::Advanced;
        p.schedule.training_years = 0.5;
        let verdict = solve(&p, -0.5, DietaryPreference::Omnivore);
        assert_eq!(
            verdict.solution().unwrap().experience,
            ExperienceLevel::Beginner
        );
    }

    #[test]
    fn test_unreachable_timeline_is_infeasible_with_trade_offs() {
        let mut p = profile();
        p.goal.target_weight_kg = Some(80.0);
        p.goal.timeline_weeks = Some(8);
        let verdict = solve(&p, -0.66, DietaryPreference::Omnivore);
        let FeasibilityVerdict::Infeasible { violations, trade_offs, .. } = verdict else {
            panic!("expected infeasible verdict");
        };
        assert!(violations
            .iter()
            .any(|v| v.constraint == ConstraintKind::GoalTimeline));
        assert!(!trade_offs.is_empty() && trade_offs.len() <= 3);
        assert_eq!(trade_offs[0].rank, 1);
        assert!(trade_offs[0].relaxation.contains("Extend the timeline"));
    }

    #[test]
    fn test_slightly_long_timeline_is_suboptimal() {
        let mut p = profile();
        p.goal.target_weight_kg = Some(90.0);
        p.goal.timeline_weeks = Some(12);
        let verdict = solve(&p, -0.66, DietaryPreference::Omnivore);
        let FeasibilityVerdict::Suboptimal { solution, relaxed, .. } = verdict else {
            panic!("expected suboptimal verdict");
        };
        assert_eq!(solution.timeline_weeks, 16);
        assert_eq!(relaxed[0].constraint, ConstraintKind::GoalTimeline);
    }

    #[test]
    fn test_no_protein_source_is_infeasible() {
        let mut p = profile();
        p.nutrition.allergies = vec!["soy".to_owned(), "gluten".to_owned()];
        let verdict = solve(&p, -0.5, DietaryPreference::Vegan);
        let FeasibilityVerdict::Infeasible { violations, .. } = verdict else {
            panic!("expected infeasible verdict");
        };
        assert_eq!(violations[0].constraint, ConstraintKind::ProteinSources);
    }

    #[test]
    fn test_vegan_protein_capped() {
        let verdict = solve_with_protein(&profile(), -0.5, DietaryPreference::Vegan, 2.4);
        let FeasibilityVerdict::Suboptimal { solution, relaxed, .. } = verdict else {
            panic!("expected suboptimal verdict");
        };
        assert!((solution.protein_g_per_kg - 2.2).abs() < 1e-9);
        assert_eq!(relaxed[0].constraint, ConstraintKind::PlantProteinCeiling);
    }

    fn solve_with_config(profile: &IntakeProfile, config: &FeasibilityConfig) -> FeasibilityVerdict {
        let calories = CalorieConfig::default();
        let energy = energy();
        let target = target(-0.5);
        FeasibilitySolver::new(config, &calories, FoodDatabase::builtin()).solve(
            &FeasibilityRequest {
                profile,
                energy: &energy,
                calorie_target: &target,
                protein_g_per_kg: 2.0,
                dietary_preference: DietaryPreference::Omnivore,
                duration_weeks: 12,
            },
        )
    }

    #[test]
    fn test_iteration_cap_stops_search_as_infeasible() {
        let mut p = profile();
        p.schedule.sessions_per_week = 6;
        let config = FeasibilityConfig {
            max_iterations: 1,
            ..FeasibilityConfig::default()
        };
        let FeasibilityVerdict::Infeasible {
            violations,
            diagnostics,
            ..
        } = solve_with_config(&p, &config)
        else {
            panic!("expected infeasible verdict");
        };
        assert_eq!(
            violations.last().map(|v| v.constraint),
            Some(ConstraintKind::SearchBudget)
        );
        assert!(diagnostics
            .iter()
            .any(|d| d.contains("search stopped at the 1 iteration")));
    }

    #[test]
    fn test_zero_timeout_stops_search_as_infeasible() {
        let config = FeasibilityConfig {
            timeout_ms: 0,
            ..FeasibilityConfig::default()
        };
        let verdict = solve_with_config(&profile(), &config);
        assert!(verdict.solution().is_none());
        let FeasibilityVerdict::Infeasible { violations, .. } = verdict else {
            panic!("expected infeasible verdict");
        };
        assert!(violations
            .iter()
            .any(|v| v.constraint == ConstraintKind::SearchBudget));
    }

    #[test]
    fn test_advisor_explanations_attached() {
        let mut p = profile();
        p.goal.target_weight_kg = Some(80.0);
        p.goal.timeline_weeks = Some(8);
        let config = FeasibilityConfig::default();
        let calories = CalorieConfig::default();
        let energy = energy();
        let target = target(-0.66);
        let advisor = |_: &str, _: &str, _: &str| Some("  Slower change preserves muscle.  ".to_owned());
        let verdict = FeasibilitySolver::new(&config, &calories, FoodDatabase::builtin())
            .with_advisor(&advisor, 100)
            .solve(&FeasibilityRequest {
                profile: &p,
                energy: &energy,
                calorie_target: &target,
                protein_g_per_kg: 2.0,
                dietary_preference: DietaryPreference::Omnivore,
                duration_weeks: 12,
            });
        let FeasibilityVerdict::Infeasible { trade_offs, .. } = verdict else {
            panic!("expected infeasible verdict");
        };
        assert_eq!(
            trade_offs[0].explanation.as_deref(),
            Some("Slower change preserves muscle.")
        );
    }
}
