// ABOUTME: Greedy daily meal assembly from macro targets and a filtered food catalog
// ABOUTME: Protein, vegetable, carbohydrate and fat portions per meal with adherence reporting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Meal assembly
//!
//! Each day's targets are split across meal slots by calorie fraction. On
//! training days the pre- and post-session slots carry the nutrient-timing
//! carbohydrate and the rest is spread over the other meals. Foods rotate by
//! day and slot so consecutive days differ. Adherence is reported, not
//! corrected.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use coachplan_core::errors::{PlanError, PlanResult};
use coachplan_core::models::{
    DailyMealPlan, DietaryPreference, FoodGroup, FoodPortion, MacroAdherence, MacroTargetSet,
    MacroTotals, Meal, MealType,
};
use tracing::debug;

use crate::catalog::{FoodCatalog, FoodItem};
use crate::config::intelligence::{MealConfig, MealSlot};

/// Inputs to meal assembly
#[derive(Debug, Clone, Copy)]
pub struct MealRequest<'a> {
    /// Daily macro targets
    pub macros: &'a MacroTargetSet,
    /// Weekdays carrying a resistance session
    pub training_days: &'a [Weekday],
    /// First plan day
    pub valid_from: NaiveDate,
    /// Number of days to plan
    pub days: u32,
    /// Dietary pattern
    pub dietary_preference: DietaryPreference,
    /// Allergy keywords
    pub allergies: &'a [String],
    /// Rotation offset applied to food selection
    pub rotation_offset: usize,
}

/// Builds daily meal plans
pub struct MealAssembler<'a> {
    config: &'a MealConfig,
    foods: &'a dyn FoodCatalog,
}

struct Pools<'f> {
    protein: Vec<&'f FoodItem>,
    carbs: Vec<&'f FoodItem>,
    vegetables: Vec<&'f FoodItem>,
    fats: Vec<&'f FoodItem>,
}

#[derive(Debug, Clone, Copy)]
struct MealTargets {
    protein_g: f64,
    carbs_g: f64,
    fat_g: f64,
}

impl<'a> MealAssembler<'a> {
    /// Create an assembler over a food catalog
    #[must_use]
    pub fn new(config: &'a MealConfig, foods: &'a dyn FoodCatalog) -> Self {
        Self { config, foods }
    }

    /// Assemble one plan per day
    ///
    /// # Errors
    ///
    /// Returns `PlanError::InternalConsistency` when the dietary filters leave
    /// no protein source; feasibility should have rejected such requests
    pub fn assemble(
        &self,
        request: &MealRequest<'_>,
    ) -> PlanResult<(Vec<DailyMealPlan>, Vec<String>)> {
        let pools = Pools {
            protein: self.pool(FoodGroup::Protein, request),
            carbs: self.pool(FoodGroup::Carbohydrate, request),
            vegetables: self.pool(FoodGroup::Vegetable, request),
            fats: self.pool(FoodGroup::Fat, request),
        };
        if pools.protein.is_empty() {
            return Err(PlanError::internal(
                "no protein source passes the dietary filters",
            ));
        }
        let mut warnings = Vec::new();
        if pools.carbs.is_empty() {
            warnings.push("No carbohydrate source passes the dietary filters; meals omit carbohydrate".to_owned());
        }
        if pools.vegetables.is_empty() {
            warnings.push("No vegetable passes the dietary filters; meals omit vegetables".to_owned());
        }
        if pools.fats.is_empty() {
            warnings.push("No fat source passes the dietary filters; fat comes from other foods only".to_owned());
        }

        let mut plans = Vec::with_capacity(request.days as usize);
        for day in 0..request.days {
            let date = request.valid_from + Duration::days(i64::from(day));
            let is_training_day = request.training_days.contains(&date.weekday());
            plans.push(self.plan_day(day, is_training_day, &pools, request));
        }
        debug!(days = plans.len(), "meal plans assembled");
        Ok((plans, warnings))
    }

    fn pool<'f>(&'f self, group: FoodGroup, request: &MealRequest<'_>) -> Vec<&'f FoodItem> {
        self.foods
            .allowed(group, request.dietary_preference, request.allergies)
    }

    fn plan_day(
        &self,
        day: u32,
        is_training_day: bool,
        pools: &Pools<'_>,
        request: &MealRequest<'_>,
    ) -> DailyMealPlan {
        let slots = if is_training_day {
            &self.config.training_day_slots
        } else {
            &self.config.rest_day_slots
        };
        let targets = slot_targets(slots, request.macros, is_training_day);

        let mut meals = Vec::with_capacity(slots.len());
        let mut totals = MacroTotals::default();
        for (index, (slot, target)) in slots.iter().zip(targets).enumerate() {
            let rotation = day as usize + index + request.rotation_offset;
            let meal = self.build_meal(slot, target, rotation, pools);
            totals += meal.totals;
            meals.push(meal);
        }

        let macros = request.macros;
        DailyMealPlan {
            day: day + 1,
            is_training_day,
            meals,
            totals: totals.rounded(),
            adherence: MacroAdherence {
                calories_pct: deviation(totals.calories, macros.calories),
                protein_pct: deviation(totals.protein_g, macros.protein.grams),
                carbs_pct: deviation(totals.carbs_g, macros.carbs.grams),
                fat_pct: deviation(totals.fat_g, macros.fat.grams),
            },
        }
    }

    fn build_meal(
        &self,
        slot: &MealSlot,
        target: MealTargets,
        rotation: usize,
        pools: &Pools<'_>,
    ) -> Meal {
        let mut items = Vec::new();
        let mut realized = MacroTotals::default();

        if let Some(food) = pick(&pools.protein, rotation) {
            let grams = self.portion(
                target.protein_g,
                food.protein_per_100g,
                self.config.min_portion_g,
                self.config.max_protein_portion_g,
            );
            push_item(&mut items, &mut realized, food, grams);
        }

        if slot.meal_type.includes_vegetables() {
            if let Some(food) = pick(&pools.vegetables, rotation) {
                push_item(&mut items, &mut realized, food, self.config.vegetable_serving_g);
            }
        }

        let carbs_remaining = target.carbs_g - realized.carbs_g;
        if carbs_remaining > 0.0 {
            if let Some(food) = pick(&pools.carbs, rotation) {
                let grams = self.portion(
                    carbs_remaining,
                    food.carbs_per_100g,
                    self.config.min_portion_g,
                    self.config.max_carb_portion_g,
                );
                push_item(&mut items, &mut realized, food, grams);
            }
        }

        let fat_shortfall = target.fat_g - realized.fat_g;
        if fat_shortfall > self.config.fat_shortfall_threshold_g {
            if let Some(food) = pick(&pools.fats, rotation) {
                let grams = self.portion(
                    fat_shortfall,
                    food.fat_per_100g,
                    self.config.portion_step_g,
                    self.config.max_fat_portion_g,
                );
                push_item(&mut items, &mut realized, food, grams);
            }
        }

        Meal {
            meal_type: slot.meal_type,
            calorie_fraction: slot.fraction,
            items,
            totals: realized,
        }
    }

    /// Grams of a food delivering `needed` grams of a nutrient, stepped and bounded
    ///
    /// Returns zero when the nutrient is absent or the portion would be
    /// smaller than `min`.
    fn portion(&self, needed: f64, per_100g: f64, min: f64, max: f64) -> f64 {
        if per_100g <= 0.0 || needed <= 0.0 {
            return 0.0;
        }
        let step = self.config.portion_step_g;
        let raw = needed / (per_100g / 100.0);
        let stepped = (raw / step).round() * step;
        if stepped < min {
            if raw < min / 2.0 {
                return 0.0;
            }
            return min;
        }
        stepped.min(max)
    }
}

fn pick<'f>(pool: &[&'f FoodItem], rotation: usize) -> Option<&'f FoodItem> {
    if pool.is_empty() {
        None
    } else {
        Some(pool[rotation % pool.len()])
    }
}

fn push_item(items: &mut Vec<FoodPortion>, realized: &mut MacroTotals, food: &FoodItem, grams: f64) {
    if grams <= 0.0 {
        return;
    }
    let macros = food.macros_for(grams);
    *realized += macros;
    items.push(FoodPortion {
        food: food.name.clone(),
        group: food.group,
        grams,
        macros: macros.rounded(),
    });
}

/// Per-slot macro targets for a day
fn slot_targets(
    slots: &[MealSlot],
    macros: &MacroTargetSet,
    is_training_day: bool,
) -> Vec<MealTargets> {
    let peri = macros.peri_workout.as_ref().filter(|_| is_training_day);
    let is_peri = |t: MealType| matches!(t, MealType::PreWorkout | MealType::PostWorkout);
    let (reserved, other_fraction) = peri.map_or((0.0, 1.0), |p| {
        let reserved: f64 = slots
            .iter()
            .map(|s| match s.meal_type {
                MealType::PreWorkout => p.pre_session_g,
                MealType::PostWorkout => p.post_session_g,
                _ => 0.0,
            })
            .sum();
        let other: f64 = slots
            .iter()
            .filter(|s| !is_peri(s.meal_type))
            .map(|s| s.fraction)
            .sum();
        (reserved, other)
    });
    let shared_carbs = (macros.carbs.grams - reserved).max(0.0);

    slots
        .iter()
        .map(|slot| {
            let carbs_g = match (peri, slot.meal_type) {
                (Some(p), MealType::PreWorkout) => p.pre_session_g,
                (Some(p), MealType::PostWorkout) => p.post_session_g,
                (Some(_), _) if other_fraction > 0.0 => {
                    shared_carbs * slot.fraction / other_fraction
                }
                _ => macros.carbs.grams * slot.fraction,
            };
            MealTargets {
                protein_g: macros.protein.grams * slot.fraction,
                carbs_g,
                fat_g: macros.fat.grams * slot.fraction,
            }
        })
        .collect()
}

fn deviation(realized: f64, target: f64) -> f64 {
    if target <= 0.0 {
        return 0.0;
    }
    ((realized - target) / target * 1000.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FoodDatabase;
    use coachplan_core::models::{MacroAmount, PeriWorkoutCarbs};

    fn amount(grams: f64) -> MacroAmount {
        MacroAmount {
            grams,
            min_grams: grams * 0.9,
            max_grams: grams * 1.1,
            grams_per_kg: grams / 80.0,
        }
    }

    fn macros() -> MacroTargetSet {
        MacroTargetSet {
            calories: 2600.0,
            protein: amount(160.0),
            carbs: amount(300.0),
            fat: amount(84.0),
            meals_per_day: 4,
            training_day_meals: 5,
            protein_per_meal_g: 40.0,
            peri_workout: Some(PeriWorkoutCarbs {
                pre_session_g: 40.0,
                post_session_g: 64.0,
            }),
            rationale: Vec::new(),
        }
    }

    fn assemble(preference: DietaryPreference, allergies: &[String]) -> Vec<DailyMealPlan> {
        let config = MealConfig::default();
        let macros = macros();
        // 2025-01-06 is a Monday
        let start = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        MealAssembler::new(&config, FoodDatabase::builtin())
            .assemble(&MealRequest {
                macros: &macros,
                training_days: &[Weekday::Mon, Weekday::Wed, Weekday::Fri],
                valid_from: start,
                days: 14,
                dietary_preference: preference,
                allergies,
                rotation_offset: 0,
            })
            .unwrap()
            .0
    }

    #[test]
    fn test_fourteen_days_with_training_layouts() {
        let plans = assemble(DietaryPreference::Omnivore, &[]);
        assert_eq!(plans.len(), 14);
        assert!(plans[0].is_training_day);
        assert_eq!(plans[0].meals.len(), 5);
        assert!(!plans[1].is_training_day);
        assert_eq!(plans[1].meals.len(), 4);
    }

    #[test]
    fn test_peri_workout_slots_carry_timing_carbs() {
        let targets = slot_targets(&MealConfig::default().training_day_slots, &macros(), true);
        assert!((targets[1].carbs_g - 40.0).abs() < 1e-9);
        assert!((targets[3].carbs_g - 64.0).abs() < 1e-9);
        let total: f64 = targets.iter().map(|t| t.carbs_g).sum();
        assert!((total - 300.0).abs() < 1e-6);
    }

    #[test]
    fn test_vegetables_only_at_lunch_and_dinner() {
        let plans = assemble(DietaryPreference::Omnivore, &[]);
        for meal in plans.iter().flat_map(|p| &p.meals) {
            let has_veg = meal.items.iter().any(|i| i.group == FoodGroup::Vegetable);
            assert_eq!(has_veg, meal.meal_type.includes_vegetables());
        }
    }

    #[test]
    fn test_vegan_filter_respected() {
        let plans = assemble(DietaryPreference::Vegan, &["peanut".to_owned()]);
        let catalog = FoodDatabase::builtin();
        for item in plans.iter().flat_map(|p| &p.meals).flat_map(|m| &m.items) {
            let food = catalog.find(&item.food).unwrap();
            assert!(food.is_allowed(DietaryPreference::Vegan, &["peanut".to_owned()]));
        }
    }

    #[test]
    fn test_rotation_varies_days() {
        let plans = assemble(DietaryPreference::Omnivore, &[]);
        let first = &plans[0].meals[0].items[0].food;
        let second = &plans[1].meals[0].items[0].food;
        assert_ne!(first, second);
    }

    #[test]
    fn test_adherence_reasonable() {
        let plans = assemble(DietaryPreference::Omnivore, &[]);
        for plan in &plans {
            assert!(plan.adherence.protein_pct > -15.0, "{:?}", plan.adherence);
            assert!(plan.adherence.calories_pct.abs() < 25.0, "{:?}", plan.adherence);
        }
    }
}
