// ABOUTME: Training generator configuration: volume landmarks, rep schemes and deload cadence
// ABOUTME: MEV/MAV/MRV per muscle group, age reductions, set timing and progression steps
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Resistance Training Configuration
//!
//! # Scientific References
//!
//! - Volume landmarks: Israetel, Hoffmann & Smith (2021), Scientific Principles of Hypertrophy Training
//! - Dose-response: Schoenfeld et al. (2017) DOI: 10.1080/02640414.2016.1210197
//! - Rep ranges: Schoenfeld et al. (2021) DOI: 10.3390/sports9020032

use std::collections::BTreeMap;

use coachplan_core::models::MuscleGroup;
use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Weekly set landmarks for one muscle group before age adjustment
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VolumeLandmarks {
    /// Minimum effective volume
    pub mev: u32,
    /// Maximum adaptive volume
    pub mav: u32,
    /// Maximum recoverable volume
    pub mrv: u32,
}

/// Rep range, rest and effort for one exercise class
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RepScheme {
    /// Lowest target reps
    pub rep_min: u8,
    /// Highest target reps
    pub rep_max: u8,
    /// Rest between sets (seconds)
    pub rest_seconds: u32,
    /// Reps in reserve
    pub rir: u8,
}

/// Compound and isolation schemes for one training focus
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FocusSchemes {
    /// Multi-joint lifts
    pub compound: RepScheme,
    /// Single-joint lifts
    pub isolation: RepScheme,
}

/// Training generator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Landmarks per muscle group
    pub landmarks: BTreeMap<MuscleGroup, VolumeLandmarks>,
    /// Volume multiplier from age 50
    pub age_50_volume_factor: f64,
    /// Volume multiplier from age 65
    pub age_65_volume_factor: f64,
    /// Strength schemes
    pub strength: FocusSchemes,
    /// Hypertrophy schemes
    pub hypertrophy: FocusSchemes,
    /// Endurance schemes
    pub endurance: FocusSchemes,
    /// General fitness schemes
    pub general: FocusSchemes,
    /// Most working sets assigned to one exercise in a session
    pub max_sets_per_exercise: u32,
    /// Warm-up added to each session (minutes)
    pub warmup_minutes: u32,
    /// Time under tension per set (seconds)
    pub seconds_per_set: u32,
    /// Weeks between deloads for beginners
    pub deload_interval_beginner: u32,
    /// Weeks between deloads for intermediates
    pub deload_interval_intermediate: u32,
    /// Weeks between deloads for advanced lifters
    pub deload_interval_advanced: u32,
    /// Shortest deload interval after age adjustment
    pub min_deload_interval: u32,
    /// Weekly volume increase during accumulation
    pub weekly_volume_step: f64,
    /// Volume multiplier during a deload week
    pub deload_volume_multiplier: f64,
    /// Reps in reserve during a deload week
    pub deload_rir: u8,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        let landmarks = [
            (MuscleGroup::Chest, 8, 16, 22),
            (MuscleGroup::Back, 10, 18, 25),
            (MuscleGroup::Shoulders, 8, 16, 22),
            (MuscleGroup::Biceps, 6, 14, 20),
            (MuscleGroup::Triceps, 6, 12, 18),
            (MuscleGroup::Quads, 8, 15, 20),
            (MuscleGroup::Hamstrings, 6, 12, 16),
            (MuscleGroup::Glutes, 4, 10, 16),
            (MuscleGroup::Calves, 8, 12, 16),
            (MuscleGroup::Core, 4, 10, 16),
        ]
        .into_iter()
        .map(|(group, mev, mav, mrv)| (group, VolumeLandmarks { mev, mav, mrv }))
        .collect();

        let scheme = |rep_min, rep_max, rest_seconds, rir| RepScheme {
            rep_min,
            rep_max,
            rest_seconds,
            rir,
        };

        Self {
            landmarks,
            age_50_volume_factor: 0.85,
            age_65_volume_factor: 0.75,
            strength: FocusSchemes {
                compound: scheme(3, 6, 180, 2),
                isolation: scheme(6, 10, 120, 2),
            },
            hypertrophy: FocusSchemes {
                compound: scheme(8, 12, 90, 2),
                isolation: scheme(10, 15, 60, 2),
            },
            endurance: FocusSchemes {
                compound: scheme(15, 20, 45, 3),
                isolation: scheme(15, 20, 45, 3),
            },
            general: FocusSchemes {
                compound: scheme(8, 12, 90, 2),
                isolation: scheme(10, 15, 60, 3),
            },
            max_sets_per_exercise: 4,
            warmup_minutes: 10,
            seconds_per_set: 40,
            deload_interval_beginner: 6,
            deload_interval_intermediate: 5,
            deload_interval_advanced: 4,
            min_deload_interval: 4,
            weekly_volume_step: 0.05,
            deload_volume_multiplier: 0.5,
            deload_rir: 4,
        }
    }
}

impl TrainingConfig {
    /// Validate landmark ordering and coverage
    ///
    /// # Errors
    ///
    /// Returns an error if a group is missing or its landmarks are not ascending
    pub fn validate(&self) -> Result<(), ConfigError> {
        for group in MuscleGroup::ALL {
            let Some(l) = self.landmarks.get(&group) else {
                return Err(ConfigError::MissingField("training.landmarks"));
            };
            if l.mev == 0 || l.mev > l.mav || l.mav > l.mrv {
                return Err(ConfigError::InvalidRange(
                    "volume landmarks must satisfy 0 < mev <= mav <= mrv",
                ));
            }
        }
        if !(0.0..=1.0).contains(&self.age_50_volume_factor)
            || !(0.0..=1.0).contains(&self.age_65_volume_factor)
        {
            return Err(ConfigError::ValueOutOfRange(
                "age volume factors must be in [0, 1]",
            ));
        }
        if self.max_sets_per_exercise == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "max_sets_per_exercise must be positive",
            ));
        }
        if self.min_deload_interval < 2 {
            return Err(ConfigError::ValueOutOfRange(
                "min_deload_interval must be at least 2 weeks",
            ));
        }
        Ok(())
    }
}
