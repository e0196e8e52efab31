// ABOUTME: Integration tests for end-to-end plan generation through the orchestrator
// ABOUTME: Covers the muscle gain, minimal intake and blocked scenarios plus determinism and bundle shape
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]
#![allow(clippy::float_cmp, clippy::too_many_lines)]

mod common;

use std::sync::Arc;

use chrono::Duration;
use coachplan::advisory::AdvisoryProvider;
use coachplan::catalog::{FoodCatalog, FoodDatabase, FoodSource};
use coachplan::config::EngineConfig;
use coachplan::models::{
    BiologicalSex, BodyRegion, ConstraintKind, FeasibilityVerdict, PrimaryGoal, SafetyLevel,
    SplitType,
};
use coachplan::{GenerationOptions, IntakeAdapter, IntakeRecord, PlanError, PlanOrchestrator};
use common::{
    blocked_profile, fat_loss_profile, fixed_options, init_test_logging, muscle_gain_profile,
    profile, reference_date, runner_profile,
};

fn orchestrator() -> PlanOrchestrator {
    init_test_logging();
    PlanOrchestrator::new(EngineConfig::default())
}

#[test]
fn test_muscle_gain_scenario() {
    let (bundle, _warnings) = orchestrator()
        .generate(&muscle_gain_profile(), &fixed_options(42))
        .unwrap();

    assert_eq!(bundle.goal, PrimaryGoal::MuscleGain);
    assert!(
        bundle.calorie_target.calories > bundle.energy.tdee_mean,
        "surplus {} should exceed TDEE {}",
        bundle.calorie_target.calories,
        bundle.energy.tdee_mean
    );
    let protein_per_kg = bundle.macros.protein.grams / 82.0;
    assert!(
        (1.6..=2.4).contains(&protein_per_kg),
        "protein {protein_per_kg:.2} g/kg outside 1.6-2.4"
    );
    assert!(matches!(
        bundle.training.split,
        SplitType::UpperLower | SplitType::PushPullLegs
    ));
    assert_eq!(bundle.training.sessions_per_week, 5);
    assert_eq!(bundle.meal_plans.len(), 14);
    assert!(bundle.meal_plans.iter().all(|day| !day.meals.is_empty()));
    assert!(bundle.grocery_list.total_items > 0);
}

#[test]
fn test_minimal_intake_scenario() {
    let record = IntakeRecord {
        age: Some(40),
        sex: Some("female".to_owned()),
        weight_kg: Some(70.0),
        height_cm: Some(165.0),
        ..IntakeRecord::default()
    };
    let (profile, intake_warnings) = IntakeAdapter::new().adapt(&record).unwrap();
    assert!(intake_warnings.len() >= 5, "{intake_warnings:?}");
    assert_eq!(profile.goal.primary, PrimaryGoal::Maintenance);
    assert_eq!(profile.schedule.sessions_per_week, 4);

    let (bundle, _) = orchestrator()
        .generate(&profile, &fixed_options(1))
        .unwrap();
    assert_eq!(bundle.goal, PrimaryGoal::Maintenance);
    assert_eq!(bundle.training.sessions.len(), 4);
    assert_eq!(bundle.meal_plans.len(), 14);
}

#[test]
fn test_blocked_safety_scenario() {
    let result = orchestrator().generate(&blocked_profile(), &fixed_options(3));
    let Err(PlanError::SafetyBlocked { verdict }) = result else {
        panic!("expected a safety block, got {result:?}");
    };
    assert_eq!(verdict.level(), SafetyLevel::Blocked);
    assert!(!verdict.required_modifications().is_empty());
    assert!(verdict
        .findings()
        .iter()
        .any(|f| f.rule == "contraindicated_condition"));
}

#[test]
fn test_blocked_error_maps_to_hard_stop_code() {
    let error = orchestrator()
        .generate(&blocked_profile(), &fixed_options(3))
        .unwrap_err();
    assert!(error.is_hard_stop());
    assert_eq!(error.http_status(), 422);
}

#[test]
fn test_identical_seed_produces_identical_bundle() {
    let orchestrator = orchestrator();
    let profile = runner_profile();
    let (first, first_warnings) = orchestrator.generate(&profile, &fixed_options(99)).unwrap();
    let (second, second_warnings) = orchestrator.generate(&profile, &fixed_options(99)).unwrap();

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
    assert_eq!(first_warnings, second_warnings);
}

#[test]
fn test_different_seed_changes_identity_only() {
    let orchestrator = orchestrator();
    let profile = fat_loss_profile();
    let (a, _) = orchestrator.generate(&profile, &fixed_options(1)).unwrap();
    let (b, _) = orchestrator.generate(&profile, &fixed_options(2)).unwrap();

    assert_ne!(a.plan_id, b.plan_id);
    assert_eq!(a.macros, b.macros);
    assert_eq!(a.training, b.training);
}

#[test]
fn test_bundle_validity_window() {
    let (bundle, _) = orchestrator()
        .generate(&fat_loss_profile(), &fixed_options(5))
        .unwrap();

    assert_eq!(bundle.valid_from, reference_date());
    assert_eq!(bundle.valid_until, reference_date() + Duration::days(13));
    assert_eq!(bundle.next_reassessment, reference_date() + Duration::days(14));
    assert_eq!(bundle.program_duration_weeks, 12);
    assert!(bundle.notes.iter().any(|n| n.starts_with("Reassess progress")));
    assert_eq!(
        bundle.meal_plans.iter().map(|d| d.day).collect::<Vec<_>>(),
        (1..=14).collect::<Vec<_>>()
    );
}

#[test]
fn test_fat_loss_targets_deficit() {
    let (bundle, _) = orchestrator()
        .generate(&fat_loss_profile(), &fixed_options(8))
        .unwrap();
    assert!(bundle.calorie_target.calories < bundle.energy.tdee_mean);
    assert!(bundle.calorie_target.weekly_rate_kg < 0.0);
    assert!(matches!(
        bundle.feasibility,
        FeasibilityVerdict::Feasible { .. } | FeasibilityVerdict::Suboptimal { .. }
    ));
}

#[test]
fn test_unreachable_goal_is_infeasible() {
    let mut p = profile(30, BiologicalSex::Male, 100.0, 180.0, PrimaryGoal::FatLoss);
    p.goal.target_weight_kg = Some(80.0);
    p.goal.timeline_weeks = Some(8);
    let options = GenerationOptions {
        skip_safety: true,
        ..fixed_options(4)
    };

    let result = orchestrator().generate(&p, &options);
    let Err(PlanError::Infeasible {
        violations,
        trade_offs,
    }) = result
    else {
        panic!("expected an infeasible goal, got {result:?}");
    };
    assert!(violations
        .iter()
        .any(|v| v.constraint == ConstraintKind::GoalTimeline));
    assert!(!trade_offs.is_empty());
}

#[test]
fn test_skip_safety_is_reported() {
    let mut p = profile(75, BiologicalSex::Female, 62.0, 160.0, PrimaryGoal::Maintenance);
    p.medical.doctor_clearance = false;
    assert!(orchestrator().generate(&p, &fixed_options(6)).is_err());

    let options = GenerationOptions {
        skip_safety: true,
        ..fixed_options(6)
    };
    let (bundle, warnings) = orchestrator().generate(&p, &options).unwrap();
    assert_eq!(bundle.safety.level(), SafetyLevel::Ok);
    assert!(warnings.iter().any(|w| w.contains("skipped")));
}

#[test]
fn test_budget_ceiling_warns_without_failing() {
    let options = GenerationOptions {
        budget_ceiling_per_week: Some(1.0),
        ..fixed_options(9)
    };
    let (_, warnings) = orchestrator()
        .generate(&muscle_gain_profile(), &options)
        .unwrap();
    assert!(warnings.iter().any(|w| w.contains("budget")));
}

#[test]
fn test_dietary_restrictions_respected_in_meals() {
    let (bundle, _) = orchestrator()
        .generate(&runner_profile(), &fixed_options(11))
        .unwrap();
    let foods = FoodDatabase::builtin();

    for day in &bundle.meal_plans {
        for item in day.meals.iter().flat_map(|m| &m.items) {
            let food = foods.find(&item.food).unwrap();
            assert!(
                !matches!(food.source, FoodSource::Meat | FoodSource::Poultry | FoodSource::Fish),
                "{} is not vegetarian",
                food.name
            );
            assert!(!food.matches_allergen("peanut"), "{} contains peanut", food.name);
        }
    }
}

#[test]
fn test_runner_sessions_tapered_for_event() {
    let (bundle, warnings) = orchestrator()
        .generate(&runner_profile(), &fixed_options(12))
        .unwrap();

    assert!(!bundle.modality_sessions.is_empty());
    assert!(bundle.modality_sessions.len() <= 3);
    for session in &bundle.modality_sessions {
        assert!(session.intervals.is_none());
        assert!(session.intensity.heart_rate_zone <= 2);
        assert!(session.notes.iter().any(|n| n.contains("Spring 10K")));
    }
    assert!(warnings.iter().any(|w| w.contains("Placed") || w.contains("Skipped")));
}

#[test]
fn test_global_generate_entry_point() {
    init_test_logging();
    let (bundle, _) = coachplan::generate(&muscle_gain_profile(), &fixed_options(42)).unwrap();
    assert_eq!(bundle.meal_plans.len(), 14);
}

#[test]
fn test_high_bmi_fat_loss_generates_reconciled_macros() {
    let orchestrator = orchestrator();
    let mut generated = 0;

    for sex in [BiologicalSex::Male, BiologicalSex::Female] {
        for age in [18, 30, 55, 70] {
            for height in [150.0, 165.0, 180.0] {
                for bmi in [35.0, 40.0, 45.0, 50.0, 55.0] {
                    for body_fat in [None, Some(45.0)] {
                        for sessions in [1, 3] {
                            let metres: f64 = height / 100.0;
                            let weight = (bmi * metres * metres * 10.0_f64).round() / 10.0;
                            let mut p = profile(age, sex, weight, height, PrimaryGoal::FatLoss);
                            p.demographics.body_fat_percent = body_fat;
                            p.schedule.sessions_per_week = sessions;
                            p.medical.doctor_clearance = true;

                            match orchestrator.generate(&p, &fixed_options(5)) {
                                Ok((bundle, _)) => {
                                    assert!(
                                        bundle.macros.calorie_drift() <= 0.02,
                                        "{sex:?} {age}y {weight}kg {height}cm"
                                    );
                                    generated += 1;
                                }
                                Err(PlanError::SafetyBlocked { .. } | PlanError::Infeasible { .. }) => {}
                                Err(error) => panic!(
                                    "{sex:?} {age}y {weight}kg {height}cm bf={body_fat:?} {sessions}x: {error:?}"
                                ),
                            }
                        }
                    }
                }
            }
        }
    }
    assert!(generated > 0);
}

#[test]
fn test_fixed_session_past_midnight_rejected() {
    let mut p = runner_profile();
    if let Some(modality) = p.modality.as_mut() {
        modality.fixed_sessions[0].start_hour = 23;
        modality.fixed_sessions[0].duration_minutes = 90;
    }
    let error = orchestrator().generate(&p, &fixed_options(8)).unwrap_err();
    assert!(
        matches!(&error, PlanError::Validation { field, .. } if field == "modality.fixed_sessions"),
        "{error:?}"
    );
}

#[test]
fn test_panicking_advisor_never_fails_generation() {
    let mut config = EngineConfig::default();
    config.advisory.enabled = true;
    let advisor: Arc<dyn AdvisoryProvider> =
        Arc::new(|_: &str, _: &str, _: &str| -> Option<String> { panic!("provider bug") });
    let orchestrator = PlanOrchestrator::new(config).with_advisor(advisor);

    let mut p = muscle_gain_profile();
    p.medical.injuries.push(BodyRegion::Knee);
    let (bundle, _) = orchestrator.generate(&p, &fixed_options(42)).unwrap();
    assert!(bundle
        .training
        .safety_modifications
        .iter()
        .any(|m| m.starts_with("Barbell Back Squat replaced by")));
}
