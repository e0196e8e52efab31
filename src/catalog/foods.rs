// ABOUTME: Food composition catalog with per-100 g macros, allergen tags and store categories
// ABOUTME: Dietary-pattern and allergy filtering used by the meal assembler and solver
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Food composition values per 100 g edible portion, rounded from USDA
//! `FoodData` Central SR Legacy entries (cooked weights for meats and grains).

use std::sync::OnceLock;

use coachplan_core::models::{DietaryPreference, FoodGroup, MacroTotals, StoreCategory};
use serde::{Deserialize, Serialize};

/// Origin of a food, used by dietary-pattern filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodSource {
    /// Red meat
    Meat,
    /// Chicken, turkey
    Poultry,
    /// Fish and shellfish
    Fish,
    /// Milk products
    Dairy,
    /// Eggs
    Egg,
    /// Plant foods
    Plant,
}

impl FoodSource {
    /// Whether a dietary pattern allows this source
    #[must_use]
    pub const fn allowed_by(&self, preference: DietaryPreference) -> bool {
        match preference {
            DietaryPreference::Omnivore => true,
            DietaryPreference::Pescatarian => !matches!(self, Self::Meat | Self::Poultry),
            DietaryPreference::Vegetarian => !matches!(self, Self::Meat | Self::Poultry | Self::Fish),
            DietaryPreference::Vegan => matches!(self, Self::Plant),
        }
    }
}

/// Unit used when presenting a shopping quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisplayUnit {
    /// Sold by weight
    Pound,
    /// Sold by the piece (eggs, bananas)
    Count {
        /// Grams per piece
        grams_each: f64,
        /// Plural label
        label: String,
    },
    /// Sold in containers (tubs, blocks, jars)
    Container {
        /// Grams per container
        grams_each: f64,
        /// Plural label
        label: String,
    },
}

/// One catalog food
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    /// Display name, unique within a catalog
    pub name: String,
    /// Role in a meal
    pub group: FoodGroup,
    /// Origin
    pub source: FoodSource,
    /// Energy per 100 g (kcal)
    pub calories_per_100g: f64,
    /// Protein per 100 g
    pub protein_per_100g: f64,
    /// Carbohydrate per 100 g
    pub carbs_per_100g: f64,
    /// Fat per 100 g
    pub fat_per_100g: f64,
    /// Allergen tags (dairy, egg, fish, shellfish, soy, gluten, wheat, peanut, tree_nut, sesame)
    pub allergens: Vec<String>,
    /// Store aisle
    pub category: StoreCategory,
    /// Shopping unit
    pub display_unit: DisplayUnit,
}

impl FoodItem {
    /// Macros contributed by `grams` of this food
    #[must_use]
    pub fn macros_for(&self, grams: f64) -> MacroTotals {
        let scale = grams / 100.0;
        MacroTotals {
            calories: self.calories_per_100g * scale,
            protein_g: self.protein_per_100g * scale,
            carbs_g: self.carbs_per_100g * scale,
            fat_g: self.fat_per_100g * scale,
        }
    }

    /// Whether an allergy keyword excludes this food
    ///
    /// Keywords match an allergen tag exactly or appear in the food name.
    #[must_use]
    pub fn matches_allergen(&self, keyword: &str) -> bool {
        let keyword = keyword.trim().to_lowercase();
        if keyword.is_empty() {
            return false;
        }
        self.allergens.iter().any(|tag| *tag == keyword)
            || self.name.to_lowercase().contains(&keyword)
    }

    /// Whether the food passes a dietary pattern and an allergy list
    #[must_use]
    pub fn is_allowed(&self, preference: DietaryPreference, allergies: &[String]) -> bool {
        self.source.allowed_by(preference) && !allergies.iter().any(|a| self.matches_allergen(a))
    }
}

/// Read access to food composition data
pub trait FoodCatalog: Send + Sync {
    /// Every food in stable catalog order
    fn foods(&self) -> &[FoodItem];

    /// Look up a food by exact name
    fn find(&self, name: &str) -> Option<&FoodItem> {
        self.foods().iter().find(|f| f.name == name)
    }

    /// Foods of `group` allowed by the dietary filters, in catalog order
    fn allowed(
        &self,
        group: FoodGroup,
        preference: DietaryPreference,
        allergies: &[String],
    ) -> Vec<&FoodItem> {
        self.foods()
            .iter()
            .filter(|f| f.group == group && f.is_allowed(preference, allergies))
            .collect()
    }
}

/// In-memory food catalog
#[derive(Debug, Clone, Default)]
pub struct FoodDatabase {
    foods: Vec<FoodItem>,
}

static BUILTIN_FOODS: OnceLock<FoodDatabase> = OnceLock::new();

impl FoodDatabase {
    /// Catalog from explicit items (fixtures, custom deployments)
    #[must_use]
    pub const fn new(foods: Vec<FoodItem>) -> Self {
        Self { foods }
    }

    /// Shared built-in catalog, built once per process
    pub fn builtin() -> &'static Self {
        BUILTIN_FOODS.get_or_init(|| Self::new(builtin_foods()))
    }
}

impl FoodCatalog for FoodDatabase {
    fn foods(&self) -> &[FoodItem] {
        &self.foods
    }
}

fn food(
    name: &str,
    group: FoodGroup,
    source: FoodSource,
    macros: (f64, f64, f64, f64),
    allergens: &[&str],
    category: StoreCategory,
    display_unit: DisplayUnit,
) -> FoodItem {
    let (calories, protein, carbs, fat) = macros;
    FoodItem {
        name: name.to_owned(),
        group,
        source,
        calories_per_100g: calories,
        protein_per_100g: protein,
        carbs_per_100g: carbs,
        fat_per_100g: fat,
        allergens: allergens.iter().map(|a| (*a).to_owned()).collect(),
        category,
        display_unit,
    }
}

fn count(grams_each: f64, label: &str) -> DisplayUnit {
    DisplayUnit::Count {
        grams_each,
        label: label.to_owned(),
    }
}

fn container(grams_each: f64, label: &str) -> DisplayUnit {
    DisplayUnit::Container {
        grams_each,
        label: label.to_owned(),
    }
}

fn builtin_foods() -> Vec<FoodItem> {
    use DisplayUnit::Pound;
    use FoodGroup::{Carbohydrate, Fat, Protein, Vegetable};
    use FoodSource::{Dairy, Egg, Fish, Meat, Plant, Poultry};
    use StoreCategory::{
        DairyAndEggs, Frozen, GrainsAndBakery, MeatAndSeafood, Pantry, PlantProtein, Produce,
    };

    vec![
        // ====================================================================
        // Protein sources
        // ====================================================================
        food("Chicken Breast", Protein, Poultry, (165.0, 31.0, 0.0, 3.6), &[], MeatAndSeafood, Pound),
        food("Turkey Breast", Protein, Poultry, (135.0, 30.0, 0.0, 1.0), &[], MeatAndSeafood, Pound),
        food("Lean Ground Beef", Protein, Meat, (170.0, 26.0, 0.0, 7.0), &[], MeatAndSeafood, Pound),
        food("Salmon", Protein, Fish, (208.0, 20.0, 0.0, 13.0), &["fish"], MeatAndSeafood, Pound),
        food("Cod", Protein, Fish, (105.0, 23.0, 0.0, 0.9), &["fish"], MeatAndSeafood, Pound),
        food("Shrimp", Protein, Fish, (99.0, 24.0, 0.2, 0.3), &["shellfish"], Frozen, Pound),
        food("Eggs", Protein, Egg, (143.0, 12.6, 0.7, 9.5), &["egg"], DairyAndEggs, count(50.0, "eggs")),
        food("Greek Yogurt", Protein, Dairy, (59.0, 10.0, 3.6, 0.4), &["dairy"], DairyAndEggs, container(907.0, "tubs")),
        food("Cottage Cheese", Protein, Dairy, (81.0, 11.0, 3.4, 2.3), &["dairy"], DairyAndEggs, container(454.0, "tubs")),
        food("Firm Tofu", Protein, Plant, (144.0, 17.3, 2.8, 8.7), &["soy"], PlantProtein, container(397.0, "blocks")),
        food("Tempeh", Protein, Plant, (192.0, 20.3, 7.6, 10.8), &["soy"], PlantProtein, container(227.0, "packs")),
        food("Seitan", Protein, Plant, (370.0, 75.0, 14.0, 1.9), &["gluten", "wheat"], PlantProtein, container(227.0, "packs")),
        food("Edamame", Protein, Plant, (121.0, 11.9, 8.9, 5.2), &["soy"], Frozen, container(340.0, "bags")),
        // ====================================================================
        // Carbohydrate sources
        // ====================================================================
        food("White Rice", Carbohydrate, Plant, (130.0, 2.7, 28.2, 0.3), &[], GrainsAndBakery, Pound),
        food("Rolled Oats", Carbohydrate, Plant, (389.0, 16.9, 66.3, 6.9), &[], GrainsAndBakery, Pound),
        food("Sweet Potato", Carbohydrate, Plant, (90.0, 2.0, 20.7, 0.2), &[], Produce, Pound),
        food("Quinoa", Carbohydrate, Plant, (120.0, 4.4, 21.3, 1.9), &[], GrainsAndBakery, Pound),
        food("Whole Wheat Pasta", Carbohydrate, Plant, (124.0, 5.3, 26.5, 0.5), &["gluten", "wheat"], GrainsAndBakery, Pound),
        food("Brown Rice", Carbohydrate, Plant, (123.0, 2.7, 25.6, 1.0), &[], GrainsAndBakery, Pound),
        food("Banana", Carbohydrate, Plant, (89.0, 1.1, 22.8, 0.3), &[], Produce, count(118.0, "bananas")),
        food("Potato", Carbohydrate, Plant, (93.0, 2.5, 21.2, 0.1), &[], Produce, Pound),
        food("Whole Wheat Bread", Carbohydrate, Plant, (247.0, 13.0, 41.0, 3.4), &["gluten", "wheat"], GrainsAndBakery, container(680.0, "loaves")),
        food("Lentils", Carbohydrate, Plant, (116.0, 9.0, 20.1, 0.4), &[], Pantry, Pound),
        // ====================================================================
        // Vegetables
        // ====================================================================
        food("Broccoli", Vegetable, Plant, (34.0, 2.8, 6.6, 0.4), &[], Produce, Pound),
        food("Spinach", Vegetable, Plant, (23.0, 2.9, 3.6, 0.4), &[], Produce, Pound),
        food("Green Beans", Vegetable, Plant, (31.0, 1.8, 7.0, 0.2), &[], Produce, Pound),
        food("Bell Pepper", Vegetable, Plant, (31.0, 1.0, 6.0, 0.3), &[], Produce, count(120.0, "peppers")),
        food("Mixed Vegetables", Vegetable, Plant, (65.0, 2.6, 13.0, 0.2), &[], Frozen, container(454.0, "bags")),
        food("Zucchini", Vegetable, Plant, (17.0, 1.2, 3.1, 0.3), &[], Produce, Pound),
        // ====================================================================
        // Fat sources
        // ====================================================================
        food("Olive Oil", Fat, Plant, (884.0, 0.0, 0.0, 100.0), &[], Pantry, container(500.0, "bottles")),
        food("Avocado", Fat, Plant, (160.0, 2.0, 8.5, 14.7), &[], Produce, count(150.0, "avocados")),
        food("Almonds", Fat, Plant, (579.0, 21.2, 21.6, 49.9), &["tree_nut"], Pantry, Pound),
        food("Peanut Butter", Fat, Plant, (588.0, 25.1, 20.0, 50.4), &["peanut"], Pantry, container(454.0, "jars")),
        food("Chia Seeds", Fat, Plant, (486.0, 16.5, 42.1, 30.7), &[], Pantry, Pound),
        food("Walnuts", Fat, Plant, (654.0, 15.2, 13.7, 65.2), &["tree_nut"], Pantry, Pound),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vegan_filter_leaves_plant_proteins_only() {
        let catalog = FoodDatabase::builtin();
        let proteins = catalog.allowed(FoodGroup::Protein, DietaryPreference::Vegan, &[]);
        assert!(!proteins.is_empty());
        assert!(proteins.iter().all(|f| f.source == FoodSource::Plant));
    }

    #[test]
    fn test_allergen_matches_tag_or_name() {
        let catalog = FoodDatabase::builtin();
        let shrimp = catalog.find("Shrimp").unwrap();
        assert!(shrimp.matches_allergen("shellfish"));
        assert!(shrimp.matches_allergen("Shrimp"));
        assert!(!shrimp.matches_allergen("dairy"));
    }

    #[test]
    fn test_pescatarian_allows_fish_not_poultry() {
        assert!(FoodSource::Fish.allowed_by(DietaryPreference::Pescatarian));
        assert!(!FoodSource::Poultry.allowed_by(DietaryPreference::Pescatarian));
        assert!(!FoodSource::Fish.allowed_by(DietaryPreference::Vegetarian));
        assert!(FoodSource::Egg.allowed_by(DietaryPreference::Vegetarian));
    }

    #[test]
    fn test_macros_scale_linearly() {
        let rice = FoodDatabase::builtin().find("White Rice").unwrap();
        let m = rice.macros_for(200.0);
        assert!((m.carbs_g - 56.4).abs() < 1e-9);
        assert!((m.calories - 260.0).abs() < 1e-9);
    }
}
