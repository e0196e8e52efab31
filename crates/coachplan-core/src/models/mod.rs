// ABOUTME: Data models shared by every stage of plan generation
// ABOUTME: Re-exports intake, verdict, nutrition, training, modality and bundle types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Multimodal preferences and sessions
pub mod modality;
/// Energy, macros, meals and groceries
pub mod nutrition;
/// Final plan bundle
pub mod plan;
/// Normalized intake profile
pub mod profile;
/// Resistance-training program
pub mod training;
/// Safety and feasibility verdicts
pub mod verdict;

pub use modality::{
    FacilityType, FixedModalitySession, IntensityTarget, IntervalStructure, Modality,
    ModalityKind, ModalityPreferences, ModalityTarget, MultimodalSession, TimeOfDay, TimeWindow,
    UpcomingEvent,
};
pub use nutrition::{
    BmrEquation, CalorieTarget, DailyMealPlan, EnergyEstimate, EquationEstimate, FoodGroup,
    FoodPortion, GroceryItem, GroceryList, MacroAdherence, MacroAmount, MacroTargetSet,
    MacroTotals, Meal, MealType, PeriWorkoutCarbs, StoreCategory,
};
pub use plan::PlanBundle;
pub use profile::{
    BiologicalSex, BodyRegion, Demographics, DietaryPreference, ExperienceLevel, GoalSpec,
    IntakeProfile, MedicalCondition, MedicalProfile, NutritionPreferences, PrimaryGoal,
    TrainingFocus, TrainingIntensity, TrainingSchedule,
};
pub use training::{
    Equipment, ExercisePrescription, MuscleGroup, ProgressionWeek, SplitType, TrainingPhase,
    TrainingProgram, TrainingSession, VolumeBand,
};
pub use verdict::{
    ConstraintKind, ConstraintViolation, FeasibilityStatus, FeasibilityVerdict,
    RelaxedConstraint, SafetyFinding, SafetyLevel, SafetyVerdict, SolvedParameters,
    TradeOffOption,
};
