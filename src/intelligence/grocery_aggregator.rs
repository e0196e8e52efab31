// ABOUTME: Rolls daily meal plans into a category-grouped, cost-estimated shopping list
// ABOUTME: Gram totals per food, pound/kilogram conversion, display units and bulk-buy notes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;

use coachplan_core::constants::units::{GRAMS_PER_KILOGRAM, GRAMS_PER_POUND};
use coachplan_core::models::{DailyMealPlan, GroceryItem, GroceryList, StoreCategory};
use tracing::debug;

use crate::catalog::{CostCatalog, DisplayUnit, FoodCatalog};
use crate::config::intelligence::GroceryConfig;

/// Shopping list builder
pub struct GroceryAggregator<'a> {
    config: &'a GroceryConfig,
    foods: &'a dyn FoodCatalog,
    costs: &'a dyn CostCatalog,
}

impl<'a> GroceryAggregator<'a> {
    /// Create an aggregator over food and price catalogs
    #[must_use]
    pub fn new(
        config: &'a GroceryConfig,
        foods: &'a dyn FoodCatalog,
        costs: &'a dyn CostCatalog,
    ) -> Self {
        Self {
            config,
            foods,
            costs,
        }
    }

    /// Aggregate every portion of every meal into one list
    #[must_use]
    pub fn aggregate(&self, plans: &[DailyMealPlan]) -> GroceryList {
        let mut grams: BTreeMap<&str, f64> = BTreeMap::new();
        for item in plans
            .iter()
            .flat_map(|plan| &plan.meals)
            .flat_map(|meal| &meal.items)
        {
            *grams.entry(item.food.as_str()).or_insert(0.0) += item.grams;
        }

        let mut notes = Vec::new();
        let mut categories: BTreeMap<StoreCategory, Vec<GroceryItem>> = BTreeMap::new();
        for (name, total_grams) in grams {
            let item = self.line_item(name, total_grams, &mut notes);
            categories.entry(item.category).or_default().push(item);
        }
        for items in categories.values_mut() {
            items.sort_by(|a, b| a.name.cmp(&b.name));
        }

        let total_items: usize = categories.values().map(Vec::len).sum();
        let total_cost = round_cents(
            categories
                .values()
                .flatten()
                .map(|item| item.estimated_cost)
                .sum(),
        );
        let days = u32::try_from(plans.len()).unwrap_or(u32::MAX);
        let cost_per_day = if days == 0 {
            0.0
        } else {
            round_cents(total_cost / f64::from(days))
        };
        debug!(total_items, total_cost, "grocery list aggregated");

        GroceryList {
            categories,
            total_items,
            total_cost,
            cost_per_day,
            days,
            notes,
        }
    }

    fn line_item(&self, name: &str, total_grams: f64, notes: &mut Vec<String>) -> GroceryItem {
        let pounds = total_grams / GRAMS_PER_POUND;
        let food = self.foods.find(name);
        let category = food.map_or(StoreCategory::Pantry, |f| f.category);

        let (display_quantity, display_unit) = match food.map(|f| &f.display_unit) {
            Some(DisplayUnit::Count { grams_each, label } | DisplayUnit::Container { grams_each, label })
                if *grams_each > 0.0 =>
            {
                ((total_grams / grams_each).ceil(), label.clone())
            }
            _ => ((pounds * 10.0).round() / 10.0, "lb".to_owned()),
        };

        let price = self.costs.price_per_pound(name).unwrap_or_else(|| {
            notes.push(format!(
                "No price on file for {name}; estimated at {}{:.2}/lb",
                self.config.currency_symbol, self.config.default_price_per_pound
            ));
            self.config.default_price_per_pound
        });
        let estimated_cost = round_cents(pounds * price);
        let bulk_buy_note = (estimated_cost > self.config.bulk_buy_threshold).then(|| {
            format!(
                "Buying {name} in bulk or family packs usually lowers the {}{estimated_cost:.2} estimate",
                self.config.currency_symbol
            )
        });

        GroceryItem {
            name: name.to_owned(),
            category,
            total_grams: total_grams.round(),
            pounds: (pounds * 100.0).round() / 100.0,
            kilograms: (total_grams / GRAMS_PER_KILOGRAM * 100.0).round() / 100.0,
            display_quantity,
            display_unit,
            estimated_cost,
            bulk_buy_note,
        }
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
