// ABOUTME: Grocery price table (USD per pound) consumed by the grocery list aggregator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Price lookup by food name
pub trait CostCatalog: Send + Sync {
    /// Price per pound, when known
    fn price_per_pound(&self, food: &str) -> Option<f64>;
}

/// In-memory price table
#[derive(Debug, Clone, Default)]
pub struct CostTable {
    prices: BTreeMap<String, f64>,
}

static BUILTIN_COSTS: OnceLock<CostTable> = OnceLock::new();

impl CostTable {
    /// Table from explicit `(food, price per pound)` pairs
    #[must_use]
    pub fn new<I, S>(prices: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            prices: prices.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Shared built-in table of average US retail prices
    pub fn builtin() -> &'static Self {
        BUILTIN_COSTS.get_or_init(|| {
            Self::new([
                ("Chicken Breast", 3.99),
                ("Turkey Breast", 5.49),
                ("Lean Ground Beef", 6.99),
                ("Salmon", 10.99),
                ("Cod", 8.99),
                ("Shrimp", 9.99),
                ("Eggs", 2.65),
                ("Greek Yogurt", 3.00),
                ("Cottage Cheese", 2.80),
                ("Firm Tofu", 2.50),
                ("Tempeh", 6.00),
                ("Seitan", 8.00),
                ("Edamame", 3.50),
                ("White Rice", 1.20),
                ("Rolled Oats", 1.60),
                ("Sweet Potato", 1.30),
                ("Quinoa", 4.50),
                ("Whole Wheat Pasta", 1.80),
                ("Brown Rice", 1.50),
                ("Banana", 0.65),
                ("Potato", 0.90),
                ("Whole Wheat Bread", 2.80),
                ("Lentils", 1.60),
                ("Broccoli", 2.20),
                ("Spinach", 4.00),
                ("Green Beans", 2.00),
                ("Bell Pepper", 2.50),
                ("Mixed Vegetables", 1.90),
                ("Zucchini", 1.70),
                ("Olive Oil", 7.50),
                ("Avocado", 3.00),
                ("Almonds", 7.00),
                ("Peanut Butter", 3.50),
                ("Chia Seeds", 7.50),
                ("Walnuts", 8.00),
            ])
        })
    }
}

impl CostCatalog for CostTable {
    fn price_per_pound(&self, food: &str) -> Option<f64> {
        self.prices.get(food).copied()
    }
}
