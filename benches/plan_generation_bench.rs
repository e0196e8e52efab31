// ABOUTME: Criterion benchmarks for plan generation and its most expensive stages
// ABOUTME: Measures the full pipeline, the feasibility search and transcript intake adaptation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for plan generation.
//!
//! The full pipeline is measured for a few representative profiles; the
//! feasibility solver is measured separately on a reachable and an
//! unreachable goal because the unreachable case walks the whole relaxation
//! order.

#![allow(
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    missing_docs
)]

use chrono::{TimeZone, Utc, Weekday};
use coachplan::catalog::FoodDatabase;
use coachplan::config::EngineConfig;
use coachplan::intelligence::{
    activity_multiplier, allocate_macros, derive_calorie_target, estimate_energy, EnergyInput,
    FeasibilityRequest, FeasibilitySolver, MacroInput,
};
use coachplan::models::{
    BiologicalSex, Demographics, DietaryPreference, ExperienceLevel, GoalSpec, IntakeProfile,
    MedicalProfile, NutritionPreferences, PrimaryGoal, TrainingFocus, TrainingIntensity,
    TrainingSchedule,
};
use coachplan::{GenerationOptions, IntakeAdapter, IntakeRecord, PlanOrchestrator};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const TRANSCRIPT: &str = "I'm 42 and a guy, about 200 lbs and 5'11\". I want to lose weight, \
    ideally get down to 180 lbs in four months. I can train Monday, Wednesday and Friday for \
    45 minutes. I'm vegetarian and allergic to peanuts. My knee hurts after running.";

fn bench_profile(goal: PrimaryGoal, sessions: u8) -> IntakeProfile {
    IntakeProfile {
        user_id: None,
        demographics: Demographics {
            age: 34,
            sex: BiologicalSex::Male,
            weight_kg: 84.0,
            height_cm: 179.0,
            body_fat_percent: Some(20.0),
        },
        goal: GoalSpec {
            primary: goal,
            target_weight_kg: None,
            timeline_weeks: None,
        },
        schedule: TrainingSchedule {
            sessions_per_week: sessions,
            available_days: vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
                Weekday::Sat,
            ],
            session_minutes: 60,
            experience: ExperienceLevel::Intermediate,
            training_years: 2.0,
            focus: TrainingFocus::Hypertrophy,
            intensity: TrainingIntensity::Moderate,
        },
        nutrition: NutritionPreferences::default(),
        medical: MedicalProfile {
            doctor_clearance: true,
            ..MedicalProfile::default()
        },
        modality: None,
    }
}

fn bench_options() -> GenerationOptions {
    GenerationOptions {
        reference_time: Some(Utc.with_ymd_and_hms(2025, 3, 3, 0, 0, 0).unwrap()),
        ..GenerationOptions::seeded(42)
    }
}

fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pipeline");
    let orchestrator = PlanOrchestrator::new(EngineConfig::default());
    let options = bench_options();

    for (name, goal, sessions) in [
        ("maintenance_3x", PrimaryGoal::Maintenance, 3),
        ("muscle_gain_5x", PrimaryGoal::MuscleGain, 5),
        ("recomposition_6x", PrimaryGoal::Recomposition, 6),
    ] {
        let profile = bench_profile(goal, sessions);
        group.bench_with_input(BenchmarkId::new("generate", name), &profile, |b, profile| {
            b.iter(|| orchestrator.generate(black_box(profile), black_box(&options)));
        });
    }

    group.finish();
}

fn bench_feasibility_solver(c: &mut Criterion) {
    let mut group = c.benchmark_group("solver");
    let config = EngineConfig::default();
    let solver = FeasibilitySolver::new(
        &config.feasibility,
        &config.calories,
        FoodDatabase::builtin(),
    );

    let reachable = {
        let mut p = bench_profile(PrimaryGoal::FatLoss, 4);
        p.goal.target_weight_kg = Some(78.0);
        p.goal.timeline_weeks = Some(16);
        p
    };
    let unreachable = {
        let mut p = bench_profile(PrimaryGoal::FatLoss, 2);
        p.goal.target_weight_kg = Some(64.0);
        p.goal.timeline_weeks = Some(6);
        p.nutrition.preference = DietaryPreference::Vegan;
        p
    };

    for (name, profile) in [("reachable", reachable), ("unreachable", unreachable)] {
        let multiplier = activity_multiplier(
            u32::from(profile.schedule.sessions_per_week),
            &config.energy.activity_factors,
        );
        let energy = estimate_energy(
            &EnergyInput::from_demographics(&profile.demographics, multiplier),
            &config.energy,
        )
        .unwrap();
        let (target, _) = derive_calorie_target(&profile, &energy, &config.calories);
        let macros =
            allocate_macros(&MacroInput::from_profile(&profile, &target), &config.macros).unwrap();
        let request = FeasibilityRequest {
            profile: &profile,
            energy: &energy,
            calorie_target: &target,
            protein_g_per_kg: macros.protein.grams_per_kg,
            dietary_preference: profile.nutrition.preference,
            duration_weeks: 12,
        };

        group.bench_function(BenchmarkId::new("solve", name), |b| {
            b.iter(|| solver.solve(black_box(&request)));
        });
    }

    group.finish();
}

fn bench_intake_adaptation(c: &mut Criterion) {
    let record = IntakeRecord {
        transcript: Some(TRANSCRIPT.to_owned()),
        ..IntakeRecord::default()
    };
    let adapter = IntakeAdapter::new();

    c.bench_function("intake/adapt_transcript", |b| {
        b.iter(|| adapter.adapt(black_box(&record)));
    });
}

criterion_group!(
    benches,
    bench_full_pipeline,
    bench_feasibility_solver,
    bench_intake_adaptation,
);
criterion_main!(benches);
