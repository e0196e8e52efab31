// ABOUTME: Property-style tests sweeping profile grids through individual planning stages
// ABOUTME: Checks macro reconciliation, energy confidence, safety monotonicity, volume bands and collisions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::collections::BTreeMap;

use chrono::Weekday;
use coachplan::catalog::{ExerciseCatalog, ExerciseDatabase};
use coachplan::config::EngineConfig;
use coachplan::intelligence::{
    activity_multiplier, allocate_macros, derive_calorie_target, estimate_energy,
    proposed_weekly_change_percent, validate_safety, EnergyInput, MacroInput, ModalityPlanner,
    ModalityRequest, TrainingGenerator, TrainingRequest,
};
use coachplan::models::{
    BiologicalSex, BodyRegion, Equipment, ExperienceLevel, FacilityType, FixedModalitySession,
    MedicalCondition, Modality, ModalityPreferences, ModalityTarget, MuscleGroup, PrimaryGoal,
    TimeWindow, TrainingProgram,
};
use coachplan::PlanError;
use common::{init_test_logging, profile, reference_date, runner_modality, schedule, ALL_DAYS};

const GOALS: [PrimaryGoal; 5] = [
    PrimaryGoal::FatLoss,
    PrimaryGoal::MuscleGain,
    PrimaryGoal::Maintenance,
    PrimaryGoal::Recomposition,
    PrimaryGoal::Performance,
];

const SEXES: [BiologicalSex; 2] = [BiologicalSex::Male, BiologicalSex::Female];

const EXPERIENCE: [ExperienceLevel; 3] = [
    ExperienceLevel::Beginner,
    ExperienceLevel::Intermediate,
    ExperienceLevel::Advanced,
];

fn macro_kcal(protein: f64, carbs: f64, fat: f64) -> f64 {
    protein * 4.0 + carbs * 4.0 + fat * 9.0
}

#[test]
fn test_macros_reconcile_for_pipeline_targets() {
    init_test_logging();
    let config = EngineConfig::default();
    let mut checked = 0;

    for goal in GOALS {
        for sex in SEXES {
            for age in [22, 38, 54, 66] {
                for weight in [52.0, 68.0, 85.0, 110.0] {
                    let p = profile(age, sex, weight, 172.0, goal);
                    let multiplier = activity_multiplier(
                        u32::from(p.schedule.sessions_per_week),
                        &config.energy.activity_factors,
                    );
                    let energy = estimate_energy(
                        &EnergyInput::from_demographics(&p.demographics, multiplier),
                        &config.energy,
                    )
                    .unwrap();
                    let (target, _) = derive_calorie_target(&p, &energy, &config.calories);
                    let macros =
                        allocate_macros(&MacroInput::from_profile(&p, &target), &config.macros)
                            .unwrap();

                    let total = macro_kcal(
                        macros.protein.grams,
                        macros.carbs.grams,
                        macros.fat.grams,
                    );
                    let drift = (total - macros.calories).abs() / macros.calories;
                    assert!(
                        drift <= 0.02,
                        "{goal:?} {sex:?} {age}y {weight}kg: {total:.0} kcal vs {:.0} target",
                        macros.calories
                    );
                    checked += 1;
                }
            }
        }
    }
    assert_eq!(checked, 160);
}

#[test]
fn test_macros_reconcile_or_report_inconsistency() {
    let config = EngineConfig::default();
    let mut allocated = 0;

    for goal in GOALS {
        for sex in SEXES {
            for calories in (1200..=4000).step_by(400) {
                for weight in [50.0, 80.0, 120.0] {
                    let input = MacroInput {
                        calories: f64::from(calories),
                        goal,
                        weight_kg: weight,
                        height_cm: 175.0,
                        body_fat_percent: None,
                        age: 35,
                        sex,
                        sessions_per_week: 4,
                        deficit_fraction: if goal == PrimaryGoal::FatLoss { 0.2 } else { 0.0 },
                        protein_ceiling_g_per_kg: None,
                    };
                    match allocate_macros(&input, &config.macros) {
                        Ok(macros) => {
                            let total = macro_kcal(
                                macros.protein.grams,
                                macros.carbs.grams,
                                macros.fat.grams,
                            );
                            assert!(
                                (total - input.calories).abs() / input.calories <= 0.02,
                                "{input:?} reconciled to {total:.0} kcal"
                            );
                            assert!(macros.carbs.grams >= 0.0);
                            allocated += 1;
                        }
                        Err(error) => assert!(
                            matches!(error, PlanError::InternalConsistency(_)),
                            "{input:?} failed with {error:?}"
                        ),
                    }
                }
            }
        }
    }
    assert!(allocated > 150, "only {allocated} allocations succeeded");
}

#[test]
fn test_energy_confidence_bounded_and_interval_brackets_mean() {
    let config = EngineConfig::default();

    for sex in SEXES {
        for age in (18..=90).step_by(12) {
            for weight in [45.0, 70.0, 95.0, 140.0] {
                for height in [152.0, 170.0, 195.0] {
                    for body_fat in [None, Some(12.0), Some(35.0)] {
                        for sessions in [0, 3, 6] {
                            let input = EnergyInput {
                                age,
                                sex,
                                weight_kg: weight,
                                height_cm: height,
                                body_fat_percent: body_fat,
                                lean_mass_kg: None,
                                activity_multiplier: activity_multiplier(
                                    sessions,
                                    &config.energy.activity_factors,
                                ),
                            };
                            let estimate = estimate_energy(&input, &config.energy).unwrap();
                            assert!(
                                estimate.confidence > 0.0 && estimate.confidence <= 0.95,
                                "{input:?} confidence {}",
                                estimate.confidence
                            );
                            assert!(estimate.ci_lower < estimate.tdee_mean, "{input:?}");
                            assert!(estimate.tdee_mean < estimate.ci_upper, "{input:?}");
                            assert!(estimate.tdee_mean > estimate.bmr_mean);
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn test_contraindication_never_lowers_safety_level() {
    let config = EngineConfig::default();

    for goal in GOALS {
        for age in [25, 45, 62, 68, 72] {
            for cleared in [false, true] {
                let mut base = profile(age, BiologicalSex::Female, 80.0, 165.0, goal);
                base.goal.target_weight_kg = match goal {
                    PrimaryGoal::FatLoss => Some(70.0),
                    PrimaryGoal::MuscleGain => Some(84.0),
                    _ => None,
                };
                base.goal.timeline_weeks = base.goal.target_weight_kg.map(|_| 12);
                base.medical.doctor_clearance = cleared;
                let change = proposed_weekly_change_percent(&base, &config.calories);
                let before = validate_safety(&base, change, &config.safety).level();

                for condition in [
                    MedicalCondition::CardiovascularDisease,
                    MedicalCondition::Pregnancy,
                    MedicalCondition::EatingDisorderHistory,
                ] {
                    let mut worse = base.clone();
                    worse.medical.conditions.push(condition.clone());
                    let after = validate_safety(&worse, change, &config.safety).level();
                    assert!(
                        after >= before,
                        "{goal:?} age {age} cleared={cleared}: {condition:?} moved {before:?} to {after:?}"
                    );
                }
            }
        }
    }
}

fn prescribed_sets(program: &TrainingProgram, muscle: MuscleGroup) -> u32 {
    program
        .sessions
        .iter()
        .flat_map(|s| &s.exercises)
        .filter(|e| e.primary_muscle == muscle)
        .map(|e| e.sets)
        .sum()
}

#[test]
fn test_prescribed_volume_stays_inside_bands() {
    init_test_logging();
    let config = EngineConfig::default();
    let catalog = ExerciseDatabase::builtin();
    let generator = TrainingGenerator::new(&config.training, catalog);
    let kits: [&[Equipment]; 3] = [
        &Equipment::FULL_GYM,
        &[Equipment::Bodyweight],
        &[Equipment::Dumbbell, Equipment::Bands],
    ];
    let injury_sets: [&[BodyRegion]; 4] = [
        &[],
        &[BodyRegion::Knee],
        &[BodyRegion::Shoulder, BodyRegion::LowerBack],
        &[BodyRegion::Ankle, BodyRegion::Wrist, BodyRegion::Elbow],
    ];

    for sessions in 2..=6_u8 {
        for experience in EXPERIENCE {
            for age in [25, 55, 68] {
                for minutes in [30, 60, 90] {
                    for equipment in kits {
                        for injuries in injury_sets {
                            let mut p = profile(
                                age,
                                BiologicalSex::Male,
                                80.0,
                                180.0,
                                PrimaryGoal::MuscleGain,
                            );
                            p.schedule = schedule(sessions, &ALL_DAYS, experience);
                            p.schedule.session_minutes = minutes;
                            p.medical.injuries = injuries.to_vec();
                            let program = generator.generate(&TrainingRequest {
                                profile: &p,
                                sessions_per_week: sessions,
                                session_minutes: minutes,
                                experience,
                                equipment,
                                duration_weeks: 12,
                            });
                            let case = format!(
                                "{sessions}x{minutes}min {experience:?} age {age} {equipment:?} {injuries:?}"
                            );

                            assert_eq!(program.sessions.len(), usize::from(sessions), "{case}");
                            for (muscle, target) in &program.weekly_volume {
                                let band = &program.volume_bands[muscle];
                                let sets = prescribed_sets(&program, *muscle);
                                assert_eq!(sets, *target, "{case}: {muscle:?}");
                                assert!(
                                    band.contains(sets),
                                    "{case}: {muscle:?} {sets} sets outside {band:?}"
                                );
                            }
                            for exercise in program.sessions.iter().flat_map(|s| &s.exercises) {
                                let entry = catalog.find(&exercise.name).unwrap();
                                assert!(entry.usable_with(equipment), "{case}: {}", exercise.name);
                                if entry.contraindicated_for(injuries) {
                                    assert!(
                                        exercise.notes.iter().any(|n| n.contains("reduced load")),
                                        "{case}: {} loads an injured region",
                                        exercise.name
                                    );
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn crowded_preferences() -> ModalityPreferences {
    ModalityPreferences {
        targets: vec![
            ModalityTarget {
                modality: Modality::Cycling,
                sessions_per_week: 3,
                duration_minutes: 60,
            },
            ModalityTarget {
                modality: Modality::Tennis,
                sessions_per_week: 2,
                duration_minutes: 90,
            },
            ModalityTarget {
                modality: Modality::IntervalCircuit,
                sessions_per_week: 2,
                duration_minutes: 30,
            },
        ],
        fixed_sessions: vec![
            FixedModalitySession {
                modality: Modality::Soccer,
                day: Weekday::Wed,
                start_hour: 18,
                duration_minutes: 120,
            },
            FixedModalitySession {
                modality: Modality::Running,
                day: Weekday::Sun,
                start_hour: 9,
                duration_minutes: 75,
            },
        ],
        commitments: ALL_DAYS
            .iter()
            .map(|day| TimeWindow {
                day: *day,
                start_hour: 9,
                end_hour: 17,
            })
            .collect(),
        facility_access: BTreeMap::new(),
        upcoming_event: None,
        cardio_opt_out: false,
    }
}

fn swimmer_preferences() -> ModalityPreferences {
    let mut facility_access = BTreeMap::new();
    facility_access.insert(FacilityType::Pool, vec![Weekday::Mon]);
    ModalityPreferences {
        targets: vec![
            ModalityTarget {
                modality: Modality::Swimming,
                sessions_per_week: 4,
                duration_minutes: 45,
            },
            ModalityTarget {
                modality: Modality::Rowing,
                sessions_per_week: 2,
                duration_minutes: 40,
            },
        ],
        facility_access,
        ..ModalityPreferences::default()
    }
}

#[test]
fn test_modality_sessions_never_collide() {
    init_test_logging();
    let config = EngineConfig::default();
    let planner = ModalityPlanner::new(&config.modality);
    let setups = [
        None,
        Some(runner_modality()),
        Some(crowded_preferences()),
        Some(swimmer_preferences()),
        Some(ModalityPreferences {
            cardio_opt_out: true,
            ..ModalityPreferences::default()
        }),
    ];
    let resistance_patterns: [&[Weekday]; 4] = [
        &[],
        &[Weekday::Mon, Weekday::Wed, Weekday::Fri],
        &[Weekday::Mon, Weekday::Tue, Weekday::Thu, Weekday::Fri, Weekday::Sat],
        &[Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri, Weekday::Sat],
    ];

    for preferences in &setups {
        for resistance_days in resistance_patterns {
            let (sessions, _warnings) = planner.plan(&ModalityRequest {
                preferences: preferences.as_ref(),
                resistance_days,
                valid_from: reference_date(),
            });
            let headroom =
                usize::from(config.modality.recovery_headroom).saturating_sub(resistance_days.len());
            assert!(sessions.len() <= headroom, "{} sessions over a cap of {headroom}", sessions.len());

            for (i, a) in sessions.iter().enumerate() {
                assert!(a.start_hour < a.end_hour, "{a:?}");
                for b in &sessions[i + 1..] {
                    assert!(
                        !a.window().overlaps(&b.window()),
                        "{:?} {}-{} overlaps {:?} {}-{}",
                        a.day,
                        a.start_hour,
                        a.end_hour,
                        b.day,
                        b.start_hour,
                        b.end_hour
                    );
                }
                if let Some(prefs) = preferences {
                    assert!(
                        prefs.commitments.iter().all(|c| !c.overlaps(&a.window())),
                        "{a:?} collides with a commitment"
                    );
                }
            }
        }
    }
}
