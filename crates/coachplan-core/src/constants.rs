// ABOUTME: Physiological, unit and input-limit constants shared by every engine component
// ABOUTME: Energy density of macronutrients, plan horizon, and hard demographic bounds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Energy density of macronutrients (Atwater general factors)
pub mod energy {
    /// Protein energy density (kcal per gram)
    pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
    /// Carbohydrate energy density (kcal per gram)
    pub const KCAL_PER_GRAM_CARBS: f64 = 4.0;
    /// Fat energy density (kcal per gram)
    pub const KCAL_PER_GRAM_FAT: f64 = 9.0;
    /// Approximate energy stored in one kilogram of body mass change
    ///
    /// Reference: Hall, K.D. (2008). What is the required energy deficit per unit weight loss?
    /// International Journal of Obesity, 32(3), 573-576.
    pub const KCAL_PER_KG_BODY_MASS: f64 = 7700.0;
}

/// Plan horizon and cadence
pub mod plan {
    /// Number of days covered by the meal plan and grocery list
    pub const PLAN_DAYS: u32 = 14;
    /// Days until the next reassessment is due
    pub const REASSESSMENT_INTERVAL_DAYS: i64 = 14;
    /// Shortest program duration accepted by the generator (weeks)
    pub const MIN_DURATION_WEEKS: u32 = 4;
    /// Longest program duration accepted by the generator (weeks)
    pub const MAX_DURATION_WEEKS: u32 = 52;
    /// Program duration used when the caller does not request one (weeks)
    pub const DEFAULT_DURATION_WEEKS: u32 = 12;
    /// Days in a training week
    pub const DAYS_PER_WEEK: u8 = 7;
}

/// Hard bounds on demographic inputs
///
/// Values outside these ranges are rejected with a validation error rather
/// than clamped.
pub mod limits {
    /// Youngest supported age (years)
    pub const MIN_AGE_YEARS: u32 = 13;
    /// Oldest supported age (years)
    pub const MAX_AGE_YEARS: u32 = 100;
    /// Lightest supported body weight (kg)
    pub const MIN_WEIGHT_KG: f64 = 30.0;
    /// Heaviest supported body weight (kg)
    pub const MAX_WEIGHT_KG: f64 = 300.0;
    /// Shortest supported height (cm)
    pub const MIN_HEIGHT_CM: f64 = 120.0;
    /// Tallest supported height (cm)
    pub const MAX_HEIGHT_CM: f64 = 250.0;
    /// Lowest plausible body-fat percentage
    pub const MIN_BODY_FAT_PERCENT: f64 = 3.0;
    /// Highest plausible body-fat percentage
    pub const MAX_BODY_FAT_PERCENT: f64 = 60.0;
    /// Most resistance sessions that fit in a week
    pub const MAX_SESSIONS_PER_WEEK: u8 = 7;
    /// Shortest accepted session length (minutes)
    pub const MIN_SESSION_MINUTES: u32 = 15;
    /// Longest accepted session length (minutes)
    pub const MAX_SESSION_MINUTES: u32 = 240;
}

/// Unit conversions
pub mod units {
    /// Grams in one avoirdupois pound
    pub const GRAMS_PER_POUND: f64 = 453.592;
    /// Grams in one kilogram
    pub const GRAMS_PER_KILOGRAM: f64 = 1000.0;
    /// Kilograms in one pound
    pub const KG_PER_POUND: f64 = 0.453_592;
    /// Centimeters in one inch
    pub const CM_PER_INCH: f64 = 2.54;
}
