// ABOUTME: Normalized intake profile consumed by the plan generation pipeline
// ABOUTME: Demographics, goal, schedule, dietary and medical state plus profile validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::modality::ModalityPreferences;
use crate::constants::limits::{
    MAX_AGE_YEARS, MAX_BODY_FAT_PERCENT, MAX_HEIGHT_CM, MAX_SESSIONS_PER_WEEK,
    MAX_SESSION_MINUTES, MAX_WEIGHT_KG, MIN_AGE_YEARS, MIN_BODY_FAT_PERCENT, MIN_HEIGHT_CM,
    MIN_SESSION_MINUTES, MIN_WEIGHT_KG,
};
use crate::errors::{PlanError, PlanResult};

/// Biological sex used by energy equations and hormonal fat floors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiologicalSex {
    /// Male reference equations
    Male,
    /// Female reference equations
    Female,
}

/// Primary outcome the user is training toward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryGoal {
    /// Reduce body fat through a calorie deficit
    FatLoss,
    /// Add lean mass through a calorie surplus
    MuscleGain,
    /// Hold body weight steady
    #[default]
    Maintenance,
    /// Lose fat while gaining muscle at a small deficit
    Recomposition,
    /// Improve sport or event performance
    Performance,
}

impl PrimaryGoal {
    /// Human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::FatLoss => "fat loss",
            Self::MuscleGain => "muscle gain",
            Self::Maintenance => "maintenance",
            Self::Recomposition => "recomposition",
            Self::Performance => "performance",
        }
    }

    /// Sign of the intended body-weight change (-1 loss, 0 hold, +1 gain)
    #[must_use]
    pub const fn weight_direction(&self) -> i8 {
        match self {
            Self::FatLoss | Self::Recomposition => -1,
            Self::MuscleGain => 1,
            Self::Maintenance | Self::Performance => 0,
        }
    }
}

/// Resistance-training experience tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    /// Less than one year of consistent training
    #[default]
    Beginner,
    /// One to three years of consistent training
    Intermediate,
    /// More than three years of consistent training
    Advanced,
}

impl ExperienceLevel {
    /// Classify experience from years of consistent training
    #[must_use]
    pub fn from_training_years(years: f64) -> Self {
        if years < 1.0 {
            Self::Beginner
        } else if years < 3.0 {
            Self::Intermediate
        } else {
            Self::Advanced
        }
    }

    /// Minimum years of training expected for this tier
    #[must_use]
    pub const fn min_training_years(&self) -> f64 {
        match self {
            Self::Beginner => 0.0,
            Self::Intermediate => 1.0,
            Self::Advanced => 3.0,
        }
    }

    /// Position of the tier on a 0..1 scale used for landmark interpolation
    #[must_use]
    pub const fn tier_position(&self) -> f64 {
        match self {
            Self::Beginner => 0.0,
            Self::Intermediate => 0.5,
            Self::Advanced => 1.0,
        }
    }

    /// One tier lower, saturating at beginner
    #[must_use]
    pub const fn downgrade(&self) -> Self {
        match self {
            Self::Beginner | Self::Intermediate => Self::Beginner,
            Self::Advanced => Self::Intermediate,
        }
    }
}

/// Adaptation the resistance program emphasises
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingFocus {
    /// Low reps, long rest, heavy loads
    Strength,
    /// Moderate reps and rest
    Hypertrophy,
    /// High reps, short rest
    Endurance,
    /// Balanced general fitness
    General,
}

impl TrainingFocus {
    /// Focus implied by a goal when the user did not state one
    #[must_use]
    pub const fn default_for_goal(goal: PrimaryGoal) -> Self {
        match goal {
            PrimaryGoal::MuscleGain | PrimaryGoal::Recomposition | PrimaryGoal::FatLoss => {
                Self::Hypertrophy
            }
            PrimaryGoal::Performance => Self::Strength,
            PrimaryGoal::Maintenance => Self::General,
        }
    }
}

/// Self-reported training intensity preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TrainingIntensity {
    /// RPE 5 and below
    Low,
    /// RPE 6-7
    #[default]
    Moderate,
    /// RPE 8 and above
    High,
}

/// Dietary pattern filter applied to the food catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DietaryPreference {
    /// No restriction
    #[default]
    Omnivore,
    /// No meat, poultry or fish
    Vegetarian,
    /// No animal products
    Vegan,
    /// Fish allowed, no meat or poultry
    Pescatarian,
}

/// Medical condition relevant to exercise or nutrition safety
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MedicalCondition {
    /// Coronary, valvular or rhythm disorders
    CardiovascularDisease,
    /// Elevated blood pressure
    Hypertension,
    /// Insulin-dependent diabetes
    Type1Diabetes,
    /// Non insulin-dependent diabetes
    Type2Diabetes,
    /// Current pregnancy
    Pregnancy,
    /// History of disordered eating
    EatingDisorderHistory,
    /// Chronic kidney disease
    KidneyDisease,
    /// Exercise-induced or chronic asthma
    Asthma,
    /// Low bone mineral density
    Osteoporosis,
    /// Any condition not covered above, free text
    Other(String),
}

impl MedicalCondition {
    /// Whether the condition requires medical clearance before unsupervised training
    #[must_use]
    pub const fn is_contraindicating(&self) -> bool {
        matches!(
            self,
            Self::CardiovascularDisease
                | Self::Type1Diabetes
                | Self::Pregnancy
                | Self::EatingDisorderHistory
                | Self::KidneyDisease
        )
    }

    /// Human-readable label
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::CardiovascularDisease => "cardiovascular disease",
            Self::Hypertension => "hypertension",
            Self::Type1Diabetes => "type 1 diabetes",
            Self::Type2Diabetes => "type 2 diabetes",
            Self::Pregnancy => "pregnancy",
            Self::EatingDisorderHistory => "eating disorder history",
            Self::KidneyDisease => "kidney disease",
            Self::Asthma => "asthma",
            Self::Osteoporosis => "osteoporosis",
            Self::Other(text) => text,
        }
    }
}

/// Body region affected by an injury or restriction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyRegion {
    /// Knee joint
    Knee,
    /// Shoulder joint
    Shoulder,
    /// Lumbar spine
    LowerBack,
    /// Hip joint
    Hip,
    /// Ankle joint
    Ankle,
    /// Wrist joint
    Wrist,
    /// Elbow joint
    Elbow,
    /// Cervical spine
    Neck,
}

impl BodyRegion {
    /// Human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Knee => "knee",
            Self::Shoulder => "shoulder",
            Self::LowerBack => "lower back",
            Self::Hip => "hip",
            Self::Ankle => "ankle",
            Self::Wrist => "wrist",
            Self::Elbow => "elbow",
            Self::Neck => "neck",
        }
    }
}

/// Demographic and anthropometric data (mandatory)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Demographics {
    /// Age in years
    pub age: u32,
    /// Biological sex
    pub sex: BiologicalSex,
    /// Body weight in kilograms
    pub weight_kg: f64,
    /// Height in centimeters
    pub height_cm: f64,
    /// Body-fat percentage when known
    pub body_fat_percent: Option<f64>,
}

impl Demographics {
    /// Body-mass index (kg/m²)
    #[must_use]
    pub fn bmi(&self) -> f64 {
        let height_m = self.height_cm / 100.0;
        self.weight_kg / (height_m * height_m)
    }

    /// Fat-free mass in kilograms when body fat is known
    #[must_use]
    pub fn lean_mass_kg(&self) -> Option<f64> {
        self.body_fat_percent
            .map(|bf| self.weight_kg * (1.0 - bf / 100.0))
    }
}

/// Goal with optional quantitative target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GoalSpec {
    /// Primary goal
    pub primary: PrimaryGoal,
    /// Target body weight in kilograms
    pub target_weight_kg: Option<f64>,
    /// Weeks available to reach the target
    pub timeline_weeks: Option<u32>,
}

/// Weekly resistance-training availability and background
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSchedule {
    /// Resistance sessions requested per week
    pub sessions_per_week: u8,
    /// Days the user can train
    pub available_days: Vec<Weekday>,
    /// Minutes available per session
    pub session_minutes: u32,
    /// Declared experience tier
    pub experience: ExperienceLevel,
    /// Years of consistent resistance training
    pub training_years: f64,
    /// Adaptation emphasis
    pub focus: TrainingFocus,
    /// Preferred intensity
    #[serde(default)]
    pub intensity: TrainingIntensity,
}

/// Dietary pattern and allergens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct NutritionPreferences {
    /// Dietary pattern
    pub preference: DietaryPreference,
    /// Allergen or excluded-food keywords, lower case
    #[serde(default)]
    pub allergies: Vec<String>,
}

/// Medical history relevant to the safety gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MedicalProfile {
    /// Diagnosed conditions
    #[serde(default)]
    pub conditions: Vec<MedicalCondition>,
    /// Current medications, free text
    #[serde(default)]
    pub medications: Vec<String>,
    /// Injured or restricted body regions
    #[serde(default)]
    pub injuries: Vec<BodyRegion>,
    /// Whether a physician cleared the user for exercise
    #[serde(default)]
    pub doctor_clearance: bool,
}

/// Normalized user state used for plan generation
///
/// Built once per request by the intake adapter and treated as immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeProfile {
    /// Owning user, when known
    pub user_id: Option<Uuid>,
    /// Mandatory demographics
    pub demographics: Demographics,
    /// Goal and target
    pub goal: GoalSpec,
    /// Resistance-training schedule
    pub schedule: TrainingSchedule,
    /// Dietary constraints
    pub nutrition: NutritionPreferences,
    /// Medical flags
    pub medical: MedicalProfile,
    /// Supplementary modality preferences and facility access
    pub modality: Option<ModalityPreferences>,
}

impl IntakeProfile {
    /// Validate hard input bounds
    ///
    /// # Errors
    ///
    /// Returns `PlanError::Validation` for the first out-of-range field
    pub fn validate(&self) -> PlanResult<()> {
        let demo = &self.demographics;
        if !(MIN_AGE_YEARS..=MAX_AGE_YEARS).contains(&demo.age) {
            return Err(PlanError::validation(
                "demographics.age",
                format!(
                    "{} is outside {MIN_AGE_YEARS}-{MAX_AGE_YEARS} years",
                    demo.age
                ),
            ));
        }
        check_range(
            "demographics.weight_kg",
            demo.weight_kg,
            MIN_WEIGHT_KG,
            MAX_WEIGHT_KG,
        )?;
        check_range(
            "demographics.height_cm",
            demo.height_cm,
            MIN_HEIGHT_CM,
            MAX_HEIGHT_CM,
        )?;
        if let Some(bf) = demo.body_fat_percent {
            check_range(
                "demographics.body_fat_percent",
                bf,
                MIN_BODY_FAT_PERCENT,
                MAX_BODY_FAT_PERCENT,
            )?;
        }

        if let Some(target) = self.goal.target_weight_kg {
            check_range("goal.target_weight_kg", target, MIN_WEIGHT_KG, MAX_WEIGHT_KG)?;
        }
        if self.goal.timeline_weeks == Some(0) {
            return Err(PlanError::validation(
                "goal.timeline_weeks",
                "timeline must be at least one week",
            ));
        }

        let schedule = &self.schedule;
        if schedule.sessions_per_week > MAX_SESSIONS_PER_WEEK {
            return Err(PlanError::validation(
                "schedule.sessions_per_week",
                format!(
                    "{} exceeds {MAX_SESSIONS_PER_WEEK} sessions per week",
                    schedule.sessions_per_week
                ),
            ));
        }
        if !(MIN_SESSION_MINUTES..=MAX_SESSION_MINUTES).contains(&schedule.session_minutes) {
            return Err(PlanError::validation(
                "schedule.session_minutes",
                format!(
                    "{} is outside {MIN_SESSION_MINUTES}-{MAX_SESSION_MINUTES} minutes",
                    schedule.session_minutes
                ),
            ));
        }
        if !schedule.training_years.is_finite() || schedule.training_years < 0.0 {
            return Err(PlanError::validation(
                "schedule.training_years",
                "training years must be a non-negative number",
            ));
        }

        if let Some(modality) = &self.modality {
            modality.validate()?;
        }
        Ok(())
    }

    /// Available days deduplicated and ordered Monday first
    #[must_use]
    pub fn ordered_available_days(&self) -> Vec<Weekday> {
        let mut days: Vec<Weekday> = Vec::with_capacity(7);
        for day in &self.schedule.available_days {
            if !days.contains(day) {
                days.push(*day);
            }
        }
        days.sort_by_key(Weekday::num_days_from_monday);
        days
    }
}

fn check_range(field: &str, value: f64, min: f64, max: f64) -> PlanResult<()> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(PlanError::validation(
            field,
            format!("{value} is outside {min}-{max}"),
        ))
    }
}
