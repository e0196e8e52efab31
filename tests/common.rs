// ABOUTME: Shared test utilities and fixture profiles for integration tests
// ABOUTME: Provides quiet logging setup, canonical intake profiles and fixed generation options
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions,
    clippy::too_many_lines
)]
//! Shared test utilities for `coachplan`
//!
//! Fixture profiles mirror the scenarios the engine is specified against.

use std::collections::BTreeMap;
use std::sync::Once;

use chrono::{DateTime, NaiveDate, TimeZone, Utc, Weekday};
use coachplan::models::{
    BiologicalSex, Demographics, DietaryPreference, ExperienceLevel, FacilityType,
    FixedModalitySession, GoalSpec, IntakeProfile, MedicalCondition, MedicalProfile, Modality,
    ModalityPreferences, ModalityTarget, NutritionPreferences, PrimaryGoal, TrainingFocus,
    TrainingIntensity, TrainingSchedule, UpcomingEvent,
};
use coachplan::GenerationOptions;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

pub const WEEKDAYS: [Weekday; 5] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
];

pub const ALL_DAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Monday 2025-03-03 00:00 UTC
pub fn reference_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 3, 0, 0, 0).unwrap()
}

pub fn reference_date() -> NaiveDate {
    reference_time().date_naive()
}

/// Seeded options anchored at [`reference_time`]
pub fn fixed_options(seed: u64) -> GenerationOptions {
    GenerationOptions {
        reference_time: Some(reference_time()),
        ..GenerationOptions::seeded(seed)
    }
}

pub fn schedule(sessions: u8, days: &[Weekday], experience: ExperienceLevel) -> TrainingSchedule {
    TrainingSchedule {
        sessions_per_week: sessions,
        available_days: days.to_vec(),
        session_minutes: 60,
        experience,
        training_years: experience.min_training_years() + 0.5,
        focus: TrainingFocus::Hypertrophy,
        intensity: TrainingIntensity::Moderate,
    }
}

pub fn profile(
    age: u32,
    sex: BiologicalSex,
    weight_kg: f64,
    height_cm: f64,
    goal: PrimaryGoal,
) -> IntakeProfile {
    IntakeProfile {
        user_id: None,
        demographics: Demographics {
            age,
            sex,
            weight_kg,
            height_cm,
            body_fat_percent: None,
        },
        goal: GoalSpec {
            primary: goal,
            target_weight_kg: None,
            timeline_weeks: None,
        },
        schedule: schedule(4, &ALL_DAYS, ExperienceLevel::Intermediate),
        nutrition: NutritionPreferences::default(),
        medical: MedicalProfile::default(),
        modality: None,
    }
}

/// 28-year-old male, 82 kg / 178 cm, five sessions a week, gaining muscle
pub fn muscle_gain_profile() -> IntakeProfile {
    let mut p = profile(28, BiologicalSex::Male, 82.0, 178.0, PrimaryGoal::MuscleGain);
    p.schedule = schedule(
        5,
        &[
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
        ],
        ExperienceLevel::Intermediate,
    );
    p
}

/// 35-year-old female losing 7 kg over 16 weeks
pub fn fat_loss_profile() -> IntakeProfile {
    let mut p = profile(35, BiologicalSex::Female, 75.0, 168.0, PrimaryGoal::FatLoss);
    p.demographics.body_fat_percent = Some(32.0);
    p.goal.target_weight_kg = Some(68.0);
    p.goal.timeline_weeks = Some(16);
    p.schedule = schedule(3, &[Weekday::Mon, Weekday::Wed, Weekday::Fri], ExperienceLevel::Beginner);
    p
}

/// 70-year-old with an uncleared cardiac condition chasing aggressive fat loss
pub fn blocked_profile() -> IntakeProfile {
    let mut p = profile(70, BiologicalSex::Male, 95.0, 175.0, PrimaryGoal::FatLoss);
    p.goal.target_weight_kg = Some(80.0);
    p.goal.timeline_weeks = Some(8);
    p.medical.conditions = vec![MedicalCondition::CardiovascularDisease];
    p.medical.doctor_clearance = false;
    p
}

/// Vegetarian runner with a fixed club run, a pool and a race in ten days
pub fn runner_profile() -> IntakeProfile {
    let mut p = profile(31, BiologicalSex::Female, 61.0, 166.0, PrimaryGoal::Performance);
    p.schedule = schedule(3, &[Weekday::Mon, Weekday::Wed, Weekday::Fri], ExperienceLevel::Intermediate);
    p.nutrition = NutritionPreferences {
        preference: DietaryPreference::Vegetarian,
        allergies: vec!["peanut".to_owned()],
    };
    p.modality = Some(runner_modality());
    p
}

pub fn runner_modality() -> ModalityPreferences {
    let mut facility_access = BTreeMap::new();
    facility_access.insert(FacilityType::Pool, vec![Weekday::Tue, Weekday::Thu]);
    ModalityPreferences {
        targets: vec![
            ModalityTarget {
                modality: Modality::Running,
                sessions_per_week: 2,
                duration_minutes: 45,
            },
            ModalityTarget {
                modality: Modality::Swimming,
                sessions_per_week: 1,
                duration_minutes: 40,
            },
        ],
        fixed_sessions: vec![FixedModalitySession {
            modality: Modality::Running,
            day: Weekday::Sat,
            start_hour: 8,
            duration_minutes: 90,
        }],
        commitments: Vec::new(),
        facility_access,
        upcoming_event: Some(UpcomingEvent {
            name: "Spring 10K".to_owned(),
            date: reference_date() + chrono::Duration::days(10),
            modality: Some(Modality::Running),
        }),
        cardio_opt_out: false,
    }
}
