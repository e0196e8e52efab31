// ABOUTME: Energy, calorie target, macro prescription, meal plan and grocery list models
// ABOUTME: Immutable outputs of the energy, macro, meal and grocery stages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;
use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

use crate::constants::energy::{KCAL_PER_GRAM_CARBS, KCAL_PER_GRAM_FAT, KCAL_PER_GRAM_PROTEIN};

/// Resting energy equation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmrEquation {
    /// Mifflin-St Jeor (1990), general population
    MifflinStJeor,
    /// Harris-Benedict revised by Roza & Shizgal (1984)
    HarrisBenedict,
    /// Katch-McArdle, lean-mass based
    KatchMcArdle,
    /// Cunningham (1980), lean-mass based
    Cunningham,
}

/// Output of a single resting energy equation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquationEstimate {
    /// Equation used
    pub equation: BmrEquation,
    /// Resting energy expenditure (kcal/day)
    pub kcal: f64,
}

/// Resting and total energy expenditure with uncertainty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyEstimate {
    /// Mean resting energy expenditure across equations (kcal/day)
    pub bmr_mean: f64,
    /// Mean total daily energy expenditure (kcal/day)
    pub tdee_mean: f64,
    /// Lower confidence bound on TDEE (kcal/day)
    pub ci_lower: f64,
    /// Upper confidence bound on TDEE (kcal/day)
    pub ci_upper: f64,
    /// Confidence score in (0, 0.95]
    pub confidence: f64,
    /// Per-equation estimates
    pub equations_used: Vec<EquationEstimate>,
    /// Activity multiplier applied to the resting mean
    pub activity_multiplier: f64,
    /// Advisory notes
    pub notes: Vec<String>,
}

/// Daily calorie prescription derived from the energy estimate and goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalorieTarget {
    /// Prescribed intake (kcal/day)
    pub calories: f64,
    /// Estimated maintenance intake (kcal/day)
    pub maintenance_calories: f64,
    /// Signed difference from maintenance (kcal/day)
    pub daily_delta: f64,
    /// Signed difference as a fraction of maintenance
    pub delta_fraction: f64,
    /// Expected signed body-weight change (kg/week)
    pub weekly_rate_kg: f64,
    /// Derivation log
    pub rationale: Vec<String>,
}

/// One macro prescription with its flexibility band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroAmount {
    /// Target grams per day
    pub grams: f64,
    /// Lower edge of the flexibility band
    pub min_grams: f64,
    /// Upper edge of the flexibility band
    pub max_grams: f64,
    /// Grams per kilogram of body weight
    pub grams_per_kg: f64,
}

/// Carbohydrate split around resistance sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriWorkoutCarbs {
    /// Carbohydrate 1-3 hours before training (g)
    pub pre_session_g: f64,
    /// Carbohydrate within 2 hours after training (g)
    pub post_session_g: f64,
}

/// Daily macro prescription
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroTargetSet {
    /// Calorie target the macros reconcile to (kcal/day)
    pub calories: f64,
    /// Protein prescription
    pub protein: MacroAmount,
    /// Carbohydrate prescription
    pub carbs: MacroAmount,
    /// Fat prescription
    pub fat: MacroAmount,
    /// Meals on rest days
    pub meals_per_day: u8,
    /// Meals on training days
    pub training_day_meals: u8,
    /// Protein per rest-day meal (g)
    pub protein_per_meal_g: f64,
    /// Pre/post-session carbohydrate split
    pub peri_workout: Option<PeriWorkoutCarbs>,
    /// Allocation log in priority order
    pub rationale: Vec<String>,
}

impl MacroTargetSet {
    /// Calories implied by the macro grams
    #[must_use]
    pub fn macro_calories(&self) -> f64 {
        self.fat.grams.mul_add(
            KCAL_PER_GRAM_FAT,
            self.protein
                .grams
                .mul_add(KCAL_PER_GRAM_PROTEIN, self.carbs.grams * KCAL_PER_GRAM_CARBS),
        )
    }

    /// Relative drift between macro calories and the calorie target
    #[must_use]
    pub fn calorie_drift(&self) -> f64 {
        if self.calories <= 0.0 {
            return 0.0;
        }
        (self.macro_calories() - self.calories).abs() / self.calories
    }
}

/// Meal slot within a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    /// First meal
    Breakfast,
    /// Fuel 1-3 hours before training
    PreWorkout,
    /// Midday meal
    Lunch,
    /// Recovery meal after training
    PostWorkout,
    /// Between-meal snack
    Snack,
    /// Evening meal
    Dinner,
}

impl MealType {
    /// Whether a vegetable serving belongs in this meal
    #[must_use]
    pub const fn includes_vegetables(&self) -> bool {
        matches!(self, Self::Lunch | Self::Dinner)
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::PreWorkout => "pre-workout",
            Self::Lunch => "lunch",
            Self::PostWorkout => "post-workout",
            Self::Snack => "snack",
            Self::Dinner => "dinner",
        }
    }
}

/// Role a food plays in a meal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodGroup {
    /// Protein-dense source
    Protein,
    /// Carbohydrate-dense source
    Carbohydrate,
    /// Vegetable serving
    Vegetable,
    /// Fat-dense source
    Fat,
}

/// Calories and macros of a food portion, meal or day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct MacroTotals {
    /// Energy (kcal)
    pub calories: f64,
    /// Protein (g)
    pub protein_g: f64,
    /// Carbohydrate (g)
    pub carbs_g: f64,
    /// Fat (g)
    pub fat_g: f64,
}

impl MacroTotals {
    /// Round every field to one decimal for stable presentation
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            calories: round1(self.calories),
            protein_g: round1(self.protein_g),
            carbs_g: round1(self.carbs_g),
            fat_g: round1(self.fat_g),
        }
    }
}

impl AddAssign for MacroTotals {
    fn add_assign(&mut self, rhs: Self) {
        self.calories += rhs.calories;
        self.protein_g += rhs.protein_g;
        self.carbs_g += rhs.carbs_g;
        self.fat_g += rhs.fat_g;
    }
}

/// Quantity of one food within a meal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodPortion {
    /// Catalog food name
    pub food: String,
    /// Role in the meal
    pub group: FoodGroup,
    /// Quantity (g)
    pub grams: f64,
    /// Macros contributed
    pub macros: MacroTotals,
}

/// One meal of a day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    /// Slot
    pub meal_type: MealType,
    /// Share of the daily calorie target
    pub calorie_fraction: f64,
    /// Foods in serving order
    pub items: Vec<FoodPortion>,
    /// Realized macros
    pub totals: MacroTotals,
}

/// Percentage deviation of realized intake from targets
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct MacroAdherence {
    /// Calories deviation (%)
    pub calories_pct: f64,
    /// Protein deviation (%)
    pub protein_pct: f64,
    /// Carbohydrate deviation (%)
    pub carbs_pct: f64,
    /// Fat deviation (%)
    pub fat_pct: f64,
}

/// Nutrition plan for one program day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMealPlan {
    /// 1-based day number
    pub day: u32,
    /// Whether a resistance session falls on this day
    pub is_training_day: bool,
    /// Meals in order
    pub meals: Vec<Meal>,
    /// Realized totals
    pub totals: MacroTotals,
    /// Deviation from targets
    pub adherence: MacroAdherence,
}

/// Store aisle grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreCategory {
    /// Fresh fruit and vegetables
    Produce,
    /// Meat, poultry and seafood counter
    MeatAndSeafood,
    /// Dairy case and eggs
    DairyAndEggs,
    /// Tofu, tempeh, legumes
    PlantProtein,
    /// Rice, pasta, bread, oats
    GrainsAndBakery,
    /// Oils, nuts, shelf-stable goods
    Pantry,
    /// Frozen aisle
    Frozen,
}

/// Aggregated shopping line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroceryItem {
    /// Food name
    pub name: String,
    /// Aisle
    pub category: StoreCategory,
    /// Total grams across the plan
    pub total_grams: f64,
    /// Total pounds
    pub pounds: f64,
    /// Total kilograms
    pub kilograms: f64,
    /// Quantity in the display unit
    pub display_quantity: f64,
    /// Display unit (lb, eggs, tubs, ...)
    pub display_unit: String,
    /// Estimated cost
    pub estimated_cost: f64,
    /// Bulk purchase advice when the item is expensive enough
    pub bulk_buy_note: Option<String>,
}

/// Category-grouped shopping plan for the whole meal plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroceryList {
    /// Items grouped by aisle, sorted by name
    pub categories: BTreeMap<StoreCategory, Vec<GroceryItem>>,
    /// Number of distinct items
    pub total_items: usize,
    /// Total estimated cost
    pub total_cost: f64,
    /// Cost per plan day
    pub cost_per_day: f64,
    /// Days covered
    pub days: u32,
    /// Estimation notes
    pub notes: Vec<String>,
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
