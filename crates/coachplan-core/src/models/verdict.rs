// ABOUTME: Safety and feasibility verdicts as tagged outcomes with attached payloads
// ABOUTME: Ok/warning/blocked and feasible/suboptimal/infeasible with diagnostics and trade-offs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::profile::ExperienceLevel;

/// Severity of a safety outcome, ordered from least to most restrictive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyLevel {
    /// No concerns
    Ok,
    /// Proceed with surfaced modifications
    Warning,
    /// No plan may be generated
    Blocked,
}

/// One rule that fired during safety validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyFinding {
    /// Stable rule identifier
    pub rule: String,
    /// Severity contributed by this rule
    pub severity: SafetyLevel,
    /// What was detected
    pub detail: String,
    /// Modification the user or plan must adopt
    pub modification: String,
}

/// Outcome of the safety gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "level", rename_all = "snake_case")]
pub enum SafetyVerdict {
    /// Nothing of concern
    Ok {
        /// Summary
        message: String,
    },
    /// Non-blocking concerns
    Warning {
        /// Summary
        message: String,
        /// Modifications applied or advised
        required_modifications: Vec<String>,
        /// Rules that fired
        findings: Vec<SafetyFinding>,
    },
    /// Hard stop
    Blocked {
        /// Summary
        message: String,
        /// Steps needed before a plan can be generated
        required_modifications: Vec<String>,
        /// Rules that fired
        findings: Vec<SafetyFinding>,
    },
}

impl SafetyVerdict {
    /// Severity of this verdict
    #[must_use]
    pub const fn level(&self) -> SafetyLevel {
        match self {
            Self::Ok { .. } => SafetyLevel::Ok,
            Self::Warning { .. } => SafetyLevel::Warning,
            Self::Blocked { .. } => SafetyLevel::Blocked,
        }
    }

    /// Summary message
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Ok { message } | Self::Warning { message, .. } | Self::Blocked { message, .. } => {
                message
            }
        }
    }

    /// Required modifications (empty for `Ok`)
    #[must_use]
    pub fn required_modifications(&self) -> &[String] {
        match self {
            Self::Ok { .. } => &[],
            Self::Warning {
                required_modifications,
                ..
            }
            | Self::Blocked {
                required_modifications,
                ..
            } => required_modifications,
        }
    }

    /// Rules that fired (empty for `Ok`)
    #[must_use]
    pub fn findings(&self) -> &[SafetyFinding] {
        match self {
            Self::Ok { .. } => &[],
            Self::Warning { findings, .. } | Self::Blocked { findings, .. } => findings,
        }
    }

    /// Whether generation must stop
    #[must_use]
    pub const fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked { .. })
    }
}

/// Solver outcome category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeasibilityStatus {
    /// Request satisfied as stated
    Feasible,
    /// Satisfied after relaxing soft constraints
    Suboptimal,
    /// No assignment satisfies the hard constraints
    Infeasible,
}

/// Constraint checked by the feasibility solver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    /// Intake must stay above the sex-specific floor
    CalorieFloor,
    /// Intake must stay below the TDEE-relative ceiling
    CalorieCeiling,
    /// Sessions cannot exceed available days
    SessionAvailability,
    /// Sessions cannot exceed what the experience tier recovers from
    SessionCapacity,
    /// Session length within configured bounds
    SessionDuration,
    /// Declared tier must match training history
    ExperienceConsistency,
    /// Dietary filters must leave at least one protein source
    ProteinSources,
    /// Plant-only diets cap practical protein intake
    PlantProteinCeiling,
    /// Weekly weight change within safe rates
    RateOfChange,
    /// Target reachable within the timeline
    GoalTimeline,
    /// Search stopped at its iteration or time budget before deciding
    SearchBudget,
}

impl ConstraintKind {
    /// Human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::CalorieFloor => "calorie floor",
            Self::CalorieCeiling => "calorie ceiling",
            Self::SessionAvailability => "session availability",
            Self::SessionCapacity => "session capacity",
            Self::SessionDuration => "session duration",
            Self::ExperienceConsistency => "experience consistency",
            Self::ProteinSources => "protein sources",
            Self::PlantProteinCeiling => "plant protein ceiling",
            Self::RateOfChange => "rate of change",
            Self::GoalTimeline => "goal timeline",
            Self::SearchBudget => "search budget",
        }
    }
}

/// Parameters the solver settled on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolvedParameters {
    /// Daily calorie target (kcal)
    pub calorie_target: f64,
    /// Signed daily energy balance (kcal)
    pub daily_energy_delta: f64,
    /// Signed weekly body-weight change (kg)
    pub weekly_rate_kg: f64,
    /// Timeline to reach the target (weeks)
    pub timeline_weeks: u32,
    /// Target weight, when one was requested
    pub target_weight_kg: Option<f64>,
    /// Resistance sessions per week
    pub sessions_per_week: u8,
    /// Minutes per session
    pub session_minutes: u32,
    /// Experience tier used for programming
    pub experience: ExperienceLevel,
    /// Protein target (g/kg)
    pub protein_g_per_kg: f64,
}

/// Soft constraint the solver had to relax
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelaxedConstraint {
    /// Constraint relaxed
    pub constraint: ConstraintKind,
    /// Requested value
    pub requested: String,
    /// Value applied
    pub applied: String,
}

/// Hard constraint no assignment could satisfy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintViolation {
    /// Constraint violated
    pub constraint: ConstraintKind,
    /// Explanation with the offending numbers
    pub detail: String,
}

/// Ranked option the user can accept to make the request feasible
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeOffOption {
    /// 1-based rank, lower is less disruptive
    pub rank: u8,
    /// Constraint this option relaxes
    pub constraint: ConstraintKind,
    /// What to change
    pub relaxation: String,
    /// Expected effect of accepting the change
    pub expected_impact: String,
    /// Optional advisory explanation
    pub explanation: Option<String>,
}

/// Outcome of the feasibility solver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FeasibilityVerdict {
    /// Request satisfied as stated
    Feasible {
        /// Assignment found
        solution: SolvedParameters,
        /// Solver notes
        diagnostics: Vec<String>,
    },
    /// Satisfied after relaxation
    Suboptimal {
        /// Assignment found
        solution: SolvedParameters,
        /// Constraints relaxed
        relaxed: Vec<RelaxedConstraint>,
        /// Solver notes
        diagnostics: Vec<String>,
    },
    /// No assignment exists
    Infeasible {
        /// Hard constraints that could not be met
        violations: Vec<ConstraintViolation>,
        /// Ranked ways forward
        trade_offs: Vec<TradeOffOption>,
        /// Solver notes
        diagnostics: Vec<String>,
    },
}

impl FeasibilityVerdict {
    /// Outcome category
    #[must_use]
    pub const fn status(&self) -> FeasibilityStatus {
        match self {
            Self::Feasible { .. } => FeasibilityStatus::Feasible,
            Self::Suboptimal { .. } => FeasibilityStatus::Suboptimal,
            Self::Infeasible { .. } => FeasibilityStatus::Infeasible,
        }
    }

    /// Solved parameters when a solution exists
    #[must_use]
    pub const fn solution(&self) -> Option<&SolvedParameters> {
        match self {
            Self::Feasible { solution, .. } | Self::Suboptimal { solution, .. } => Some(solution),
            Self::Infeasible { .. } => None,
        }
    }

    /// Solver notes
    #[must_use]
    pub fn diagnostics(&self) -> &[String] {
        match self {
            Self::Feasible { diagnostics, .. }
            | Self::Suboptimal { diagnostics, .. }
            | Self::Infeasible { diagnostics, .. } => diagnostics,
        }
    }
}
