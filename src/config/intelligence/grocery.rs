// ABOUTME: Grocery aggregation configuration: bulk-buy threshold and fallback pricing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Grocery aggregation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroceryConfig {
    /// Item cost above which a bulk-buy note is attached (USD)
    pub bulk_buy_threshold: f64,
    /// Price used when a food has no cost entry (USD per pound)
    pub default_price_per_pound: f64,
    /// Currency symbol used in notes
    pub currency_symbol: String,
}

impl Default for GroceryConfig {
    fn default() -> Self {
        Self {
            bulk_buy_threshold: 15.0,
            default_price_per_pound: 4.0,
            currency_symbol: "$".to_owned(),
        }
    }
}
