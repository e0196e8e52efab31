// ABOUTME: Safety validator configuration: age gates, BMI limits and rate-of-loss thresholds
// ABOUTME: Medication keyword advisories surfaced as warnings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Safety Gate Configuration
//!
//! # References
//!
//! - ACSM's Guidelines for Exercise Testing and Prescription (11th ed.), pre-participation screening
//! - WHO BMI classification (underweight < 18.5, severe thinness < 17)

use serde::{Deserialize, Serialize};

/// Medication keyword and the advisory it triggers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicationAdvisory {
    /// Lower-case substring matched against reported medications
    pub keyword: String,
    /// Modification surfaced to the user
    pub advisory: String,
}

/// Safety gate thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyConfig {
    /// Below this age training without clearance is blocked
    pub min_unsupervised_age: u32,
    /// Below this age a minor-supervision warning is raised
    pub adult_age: u32,
    /// At or above this age training without clearance is blocked
    pub max_unsupervised_age: u32,
    /// At or above this age high intensity raises a warning
    pub high_intensity_warning_age: u32,
    /// BMI below which any plan is blocked
    pub bmi_block: f64,
    /// BMI below which a fat-loss plan is blocked
    pub bmi_fat_loss_block: f64,
    /// Weekly loss above this share of body weight warns (%)
    pub weekly_loss_warning_percent: f64,
    /// Weekly loss above this share of body weight blocks (%)
    pub weekly_loss_block_percent: f64,
    /// Medication advisories
    pub medication_advisories: Vec<MedicationAdvisory>,
}

impl Default for SafetyConfig {
    fn default() -> Self {
        let advisory = |keyword: &str, advisory: &str| MedicationAdvisory {
            keyword: keyword.to_owned(),
            advisory: advisory.to_owned(),
        };
        Self {
            min_unsupervised_age: 16,
            adult_age: 18,
            max_unsupervised_age: 70,
            high_intensity_warning_age: 60,
            bmi_block: 17.0,
            bmi_fat_loss_block: 18.5,
            weekly_loss_warning_percent: 1.0,
            weekly_loss_block_percent: 1.5,
            medication_advisories: vec![
                advisory(
                    "beta blocker",
                    "Beta blockers blunt heart rate; use RPE rather than heart-rate zones",
                ),
                advisory(
                    "metoprolol",
                    "Beta blockers blunt heart rate; use RPE rather than heart-rate zones",
                ),
                advisory(
                    "insulin",
                    "Insulin users should monitor glucose before and after sessions",
                ),
                advisory(
                    "warfarin",
                    "Anticoagulants raise bruising risk; avoid contact drills and max-effort lifts",
                ),
                advisory(
                    "diuretic",
                    "Diuretics affect hydration; increase fluid intake around training",
                ),
            ],
        }
    }
}
