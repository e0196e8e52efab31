// ABOUTME: Final plan bundle assembled by the orchestrator and handed to persistence
// ABOUTME: Identifiers, validity window, every stage output and the reassessment date
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::modality::MultimodalSession;
use super::nutrition::{CalorieTarget, DailyMealPlan, EnergyEstimate, GroceryList, MacroTargetSet};
use super::profile::PrimaryGoal;
use super::training::TrainingProgram;
use super::verdict::{FeasibilityVerdict, SafetyVerdict};

/// Complete generated program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanBundle {
    /// Plan identifier
    pub plan_id: Uuid,
    /// Owning user, when known
    pub user_id: Option<Uuid>,
    /// Generation timestamp
    pub created_at: DateTime<Utc>,
    /// First day covered
    pub valid_from: NaiveDate,
    /// Last day covered
    pub valid_until: NaiveDate,
    /// Length of the periodized program (weeks)
    pub program_duration_weeks: u32,
    /// Primary goal
    pub goal: PrimaryGoal,
    /// Energy estimate
    pub energy: EnergyEstimate,
    /// Calorie prescription
    pub calorie_target: CalorieTarget,
    /// Macro prescription
    pub macros: MacroTargetSet,
    /// Safety verdict
    pub safety: SafetyVerdict,
    /// Feasibility verdict
    pub feasibility: FeasibilityVerdict,
    /// Resistance program
    pub training: TrainingProgram,
    /// One plan per day
    pub meal_plans: Vec<DailyMealPlan>,
    /// Supplementary sessions
    pub modality_sessions: Vec<MultimodalSession>,
    /// Shopping list
    pub grocery_list: GroceryList,
    /// Plan notes
    pub notes: Vec<String>,
    /// Date the plan should be reviewed
    pub next_reassessment: NaiveDate,
}
