// ABOUTME: Resistance training program models: splits, sessions, prescriptions and volume
// ABOUTME: Weekly structure, per-muscle volume bands and the periodized mesocycle
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Muscle group tracked for weekly volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MuscleGroup {
    /// Pectorals
    Chest,
    /// Lats, traps and rhomboids
    Back,
    /// Deltoids
    Shoulders,
    /// Elbow flexors
    Biceps,
    /// Elbow extensors
    Triceps,
    /// Knee extensors
    Quads,
    /// Knee flexors
    Hamstrings,
    /// Hip extensors
    Glutes,
    /// Plantar flexors
    Calves,
    /// Trunk
    Core,
}

impl MuscleGroup {
    /// Every tracked group in canonical order
    pub const ALL: [Self; 10] = [
        Self::Chest,
        Self::Back,
        Self::Shoulders,
        Self::Biceps,
        Self::Triceps,
        Self::Quads,
        Self::Hamstrings,
        Self::Glutes,
        Self::Calves,
        Self::Core,
    ];

    /// Human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Chest => "chest",
            Self::Back => "back",
            Self::Shoulders => "shoulders",
            Self::Biceps => "biceps",
            Self::Triceps => "triceps",
            Self::Quads => "quads",
            Self::Hamstrings => "hamstrings",
            Self::Glutes => "glutes",
            Self::Calves => "calves",
            Self::Core => "core",
        }
    }
}

/// Weekly split layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitType {
    /// Every session trains the whole body
    FullBody,
    /// Alternating upper and lower sessions
    UpperLower,
    /// Push, pull and legs rotation
    PushPullLegs,
}

/// Training equipment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Equipment {
    /// Olympic barbell and plates
    Barbell,
    /// Dumbbells
    Dumbbell,
    /// Selectorized or plate-loaded machines
    Machine,
    /// Cable stack
    Cable,
    /// Kettlebells
    Kettlebell,
    /// Resistance bands
    Bands,
    /// No equipment
    Bodyweight,
}

impl Equipment {
    /// Commercial-gym equipment set
    pub const FULL_GYM: [Self; 7] = [
        Self::Barbell,
        Self::Dumbbell,
        Self::Machine,
        Self::Cable,
        Self::Kettlebell,
        Self::Bands,
        Self::Bodyweight,
    ];
}

/// Prescription for one exercise within a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExercisePrescription {
    /// Exercise name
    pub name: String,
    /// Group credited with the sets
    pub primary_muscle: MuscleGroup,
    /// Working sets
    pub sets: u32,
    /// Lowest target reps
    pub rep_min: u8,
    /// Highest target reps
    pub rep_max: u8,
    /// Rest between sets (seconds)
    pub rest_seconds: u32,
    /// Reps in reserve at the end of each set
    pub rir: u8,
    /// Exercise this one replaced, when a substitution was applied
    pub substituted_for: Option<String>,
    /// Coaching notes
    #[serde(default)]
    pub notes: Vec<String>,
}

/// One resistance session of the weekly template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSession {
    /// Session name (e.g. "Upper A")
    pub name: String,
    /// Scheduled day
    pub day: Weekday,
    /// Exercises in order
    pub exercises: Vec<ExercisePrescription>,
    /// Estimated duration including warm-up (minutes)
    pub estimated_minutes: u32,
    /// Session notes
    #[serde(default)]
    pub notes: Vec<String>,
}

/// Age-adjusted weekly set landmarks for one muscle group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeBand {
    /// Minimum effective volume (sets/week)
    pub minimum_effective: u32,
    /// Maximum adaptive volume (sets/week)
    pub maximum_adaptive: u32,
    /// Maximum recoverable volume (sets/week)
    pub maximum_recoverable: u32,
}

impl VolumeBand {
    /// Whether `sets` lies within `[minimum_effective, maximum_recoverable]`
    #[must_use]
    pub const fn contains(&self, sets: u32) -> bool {
        sets >= self.minimum_effective && sets <= self.maximum_recoverable
    }
}

/// Mesocycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingPhase {
    /// Volume builds from the baseline
    Accumulation,
    /// Volume plateaus while effort rises
    Intensification,
    /// Planned recovery week
    Deload,
}

/// One week of the periodized program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionWeek {
    /// 1-based week number
    pub week: u32,
    /// Phase
    pub phase: TrainingPhase,
    /// Multiplier applied to the weekly set template
    pub volume_multiplier: f64,
    /// Target reps in reserve
    pub target_rir: u8,
}

/// Weekly resistance-training structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingProgram {
    /// Split layout
    pub split: SplitType,
    /// Sessions per week
    pub sessions_per_week: u8,
    /// Sessions in weekly order
    pub sessions: Vec<TrainingSession>,
    /// Sets per muscle group per week
    pub weekly_volume: BTreeMap<MuscleGroup, u32>,
    /// Age-adjusted volume bands per muscle group
    pub volume_bands: BTreeMap<MuscleGroup, VolumeBand>,
    /// Weeks between deloads
    pub deload_interval_weeks: u32,
    /// Week-by-week mesocycle
    pub progression: Vec<ProgressionWeek>,
    /// Progression guidance
    pub progression_notes: Vec<String>,
    /// Medical or equipment modifications applied
    pub safety_modifications: Vec<String>,
}

impl TrainingProgram {
    /// Days carrying a resistance session
    #[must_use]
    pub fn training_days(&self) -> Vec<Weekday> {
        self.sessions.iter().map(|s| s.day).collect()
    }
}
