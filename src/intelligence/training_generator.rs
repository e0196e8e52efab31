// ABOUTME: Weekly resistance program generation from schedule, experience, focus and restrictions
// ABOUTME: Split selection, landmark-based volume, exercise rotation, substitutions and periodization
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Training Generator Module
//!
//! Builds the weekly session template and the mesocycle around it.
//!
//! Volume per muscle group is interpolated between the minimum effective
//! (MEV) and maximum adaptive (MAV) landmarks by experience tier, scaled
//! down for older lifters, then trimmed toward MEV if the week does not fit
//! the available session time. Exercises rotate through the catalog so
//! repeated sessions differ, and any movement that needs missing equipment
//! or loads an injured region is swapped for a safer substitute.
//!
//! # Scientific References
//!
//! - Schoenfeld, B.J., Ogborn, D., & Krieger, J.W. (2017). Dose-response relationship between
//!   weekly resistance training volume and increases in muscle mass.
//!   *Journal of Sports Sciences*, 35(11), 1073-1082.
//!   <https://doi.org/10.1080/02640414.2016.1210197>
//! - Israetel, M., Hoffmann, J., & Smith, C.W. (2021). *Scientific Principles of Hypertrophy
//!   Training*. Renaissance Periodization.
//! - Helms, E.R., et al. (2016). Application of the repetitions in reserve-based rating of
//!   perceived exertion scale for resistance training. *Strength & Conditioning Journal*,
//!   38(4), 42-49.

use std::collections::BTreeMap;

use chrono::Weekday;
use coachplan_core::models::{
    Equipment, ExercisePrescription, ExperienceLevel, IntakeProfile, MuscleGroup,
    ProgressionWeek, SplitType, TrainingFocus, TrainingIntensity, TrainingPhase,
    TrainingProgram, TrainingSession, VolumeBand,
};
use tracing::{debug, info};

use crate::advisory::{
    consult, pick_candidate, AdvisoryProvider, NoAdvisor, TASK_EXERCISE_SUBSTITUTION,
};
use crate::catalog::{Exercise, ExerciseCatalog};
use crate::config::intelligence::{RepScheme, TrainingConfig};

static NO_ADVISOR: NoAdvisor = NoAdvisor;

const ALL_DAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Session template type within a split
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionKind {
    FullBody,
    Upper,
    Lower,
    Push,
    Pull,
    Legs,
}

impl SessionKind {
    const fn label(self) -> &'static str {
        match self {
            Self::FullBody => "Full Body",
            Self::Upper => "Upper",
            Self::Lower => "Lower",
            Self::Push => "Push",
            Self::Pull => "Pull",
            Self::Legs => "Legs",
        }
    }

    fn muscles(self) -> &'static [MuscleGroup] {
        use MuscleGroup::{
            Back, Biceps, Calves, Chest, Core, Glutes, Hamstrings, Quads, Shoulders, Triceps,
        };
        match self {
            Self::FullBody => &MuscleGroup::ALL,
            Self::Upper => &[Chest, Back, Shoulders, Biceps, Triceps, Core],
            Self::Lower | Self::Legs => &[Quads, Hamstrings, Glutes, Calves, Core],
            Self::Push => &[Chest, Shoulders, Triceps],
            Self::Pull => &[Back, Biceps, Core],
        }
    }
}

/// Parameters for one program
#[derive(Debug, Clone, Copy)]
pub struct TrainingRequest<'a> {
    /// Normalized profile (age, focus, intensity, injuries, available days)
    pub profile: &'a IntakeProfile,
    /// Sessions per week after feasibility
    pub sessions_per_week: u8,
    /// Minutes per session after feasibility
    pub session_minutes: u32,
    /// Experience tier after feasibility
    pub experience: ExperienceLevel,
    /// Equipment on hand
    pub equipment: &'a [Equipment],
    /// Program length (weeks)
    pub duration_weeks: u32,
}

/// Resistance program generator
pub struct TrainingGenerator<'a> {
    config: &'a TrainingConfig,
    exercises: &'a dyn ExerciseCatalog,
    advisor: &'a dyn AdvisoryProvider,
}

/// Swap applied to one catalog exercise; `name` is `None` when the slot is dropped
#[derive(Debug, Clone)]
struct Resolution {
    name: Option<String>,
    reason: Option<String>,
}

impl<'a> TrainingGenerator<'a> {
    /// Create a generator over an exercise catalog
    #[must_use]
    pub fn new(config: &'a TrainingConfig, exercises: &'a dyn ExerciseCatalog) -> Self {
        Self {
            config,
            exercises,
            advisor: &NO_ADVISOR,
        }
    }

    /// Rank substitutes with an advisor; failures fall back to catalog order
    #[must_use]
    pub fn with_advisor(mut self, advisor: &'a dyn AdvisoryProvider) -> Self {
        self.advisor = advisor;
        self
    }

    /// Generate the program
    #[must_use]
    pub fn generate(&self, request: &TrainingRequest<'_>) -> TrainingProgram {
        let profile = request.profile;
        let age = profile.demographics.age;
        let sessions = request.sessions_per_week;

        let split = select_split(sessions, request.experience);
        let kinds = session_kinds(split, sessions, request.experience);
        let bands = self.volume_bands(age);
        let focus = profile.schedule.focus;
        let schemes = self.schemes(focus);
        let weekly_volume = if kinds.is_empty() {
            BTreeMap::new()
        } else {
            self.weekly_volume(&bands, request, &kinds, schemes.0.rest_seconds)
        };

        let days = assign_days(&profile.ordered_available_days(), kinds.len());
        let mut memo: BTreeMap<String, Resolution> = BTreeMap::new();
        let mut safety_modifications = Vec::new();
        let mut occurrences: BTreeMap<MuscleGroup, usize> = BTreeMap::new();
        let mut kind_counts: BTreeMap<&'static str, u8> = BTreeMap::new();
        let mut built = Vec::with_capacity(kinds.len());

        for (index, kind) in kinds.iter().enumerate() {
            let letter_index = kind_counts.entry(kind.label()).or_insert(0);
            let name = format!("{} {}", kind.label(), char::from(b'A' + *letter_index));
            *letter_index += 1;

            let mut exercises: Vec<ExercisePrescription> = Vec::new();
            for muscle in kind.muscles() {
                let sets = sets_for_session(&weekly_volume, &kinds, *muscle, index);
                if sets == 0 {
                    continue;
                }
                let count = sets.div_ceil(self.config.max_sets_per_exercise).max(1);
                let occurrence = occurrences.entry(*muscle).or_insert(0);
                for slot in 0..count {
                    let slot_sets = sets / count + u32::from(slot < sets % count);
                    let Some(prescription) = self.prescribe(
                        *muscle,
                        *occurrence,
                        slot_sets,
                        request,
                        &exercises,
                        &mut memo,
                        &mut safety_modifications,
                    ) else {
                        continue;
                    };
                    *occurrence += 1;
                    if let Some(existing) =
                        exercises.iter_mut().find(|e| e.name == prescription.name)
                    {
                        existing.sets += prescription.sets;
                    } else {
                        exercises.push(prescription);
                    }
                }
            }

            let working_seconds: u32 = exercises
                .iter()
                .map(|e| e.sets * (self.config.seconds_per_set + e.rest_seconds))
                .sum();
            let estimated_minutes = self.config.warmup_minutes + working_seconds.div_ceil(60);
            let mut notes = Vec::new();
            if estimated_minutes > request.session_minutes {
                notes.push(format!(
                    "Estimated {estimated_minutes} minutes exceeds the {} available; trim rest periods or supersets",
                    request.session_minutes
                ));
            }
            built.push(TrainingSession {
                name,
                day: days.get(index).copied().unwrap_or(Weekday::Mon),
                exercises,
                estimated_minutes,
                notes,
            });
        }

        let interval = self.deload_interval(request.experience, age);
        let base_rir = adjust_rir(schemes.0.rir, profile.schedule.intensity);
        let progression = self.progression(request.duration_weeks, interval, base_rir);
        let progression_notes = progression_notes(focus, interval, request.duration_weeks);

        info!(
            split = ?split,
            sessions = built.len(),
            substitutions = safety_modifications.len(),
            "training program generated"
        );

        TrainingProgram {
            split,
            sessions_per_week: sessions,
            sessions: built,
            weekly_volume,
            volume_bands: bands,
            deload_interval_weeks: interval,
            progression,
            progression_notes,
            safety_modifications,
        }
    }

    /// Age-adjusted landmark bands per muscle group
    fn volume_bands(&self, age: u32) -> BTreeMap<MuscleGroup, VolumeBand> {
        let factor = if age >= 65 {
            self.config.age_65_volume_factor
        } else if age >= 50 {
            self.config.age_50_volume_factor
        } else {
            1.0
        };
        self.config
            .landmarks
            .iter()
            .map(|(group, l)| {
                let mev = ((f64::from(l.mev) * factor).round() as u32).max(1);
                let mav = ((f64::from(l.mav) * factor).round() as u32).max(mev);
                let mrv = ((f64::from(l.mrv) * factor).round() as u32).max(mav);
                (
                    *group,
                    VolumeBand {
                        minimum_effective: mev,
                        maximum_adaptive: mav,
                        maximum_recoverable: mrv,
                    },
                )
            })
            .collect()
    }

    fn weekly_volume(
        &self,
        bands: &BTreeMap<MuscleGroup, VolumeBand>,
        request: &TrainingRequest<'_>,
        kinds: &[SessionKind],
        rest_seconds: u32,
    ) -> BTreeMap<MuscleGroup, u32> {
        let position = request.experience.tier_position();
        let mut volume: BTreeMap<MuscleGroup, u32> = bands
            .iter()
            .filter(|(group, _)| kinds.iter().any(|k| k.muscles().contains(group)))
            .map(|(group, band)| {
                let span = f64::from(band.maximum_adaptive - band.minimum_effective);
                let target = (f64::from(band.minimum_effective) + position * span).round() as u32;
                (
                    *group,
                    target.clamp(band.minimum_effective, band.maximum_recoverable),
                )
            })
            .collect();

        let usable_minutes = request
            .session_minutes
            .saturating_sub(self.config.warmup_minutes);
        let budget = u32::from(request.sessions_per_week) * usable_minutes * 60;
        let per_set = self.config.seconds_per_set + rest_seconds;
        let mut total: u32 = volume.values().sum::<u32>() * per_set;
        while total > budget {
            let candidate = volume
                .iter()
                .filter_map(|(group, sets)| {
                    let mev = bands.get(group).map_or(1, |b| b.minimum_effective);
                    (*sets > mev).then_some((*group, *sets - mev))
                })
                .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)));
            let Some((group, _)) = candidate else {
                break;
            };
            if let Some(sets) = volume.get_mut(&group) {
                *sets -= 1;
                total -= per_set;
            }
        }
        debug!(total_sets = volume.values().sum::<u32>(), budget, "weekly volume set");
        volume
    }

    fn schemes(&self, focus: TrainingFocus) -> (RepScheme, RepScheme) {
        let schemes = match focus {
            TrainingFocus::Strength => &self.config.strength,
            TrainingFocus::Hypertrophy => &self.config.hypertrophy,
            TrainingFocus::Endurance => &self.config.endurance,
            TrainingFocus::General => &self.config.general,
        };
        (schemes.compound.clone(), schemes.isolation.clone())
    }

    #[allow(clippy::too_many_arguments)]
    fn prescribe(
        &self,
        muscle: MuscleGroup,
        occurrence: usize,
        sets: u32,
        request: &TrainingRequest<'_>,
        session: &[ExercisePrescription],
        memo: &mut BTreeMap<String, Resolution>,
        safety_modifications: &mut Vec<String>,
    ) -> Option<ExercisePrescription> {
        let candidates = self.exercises.for_muscle(muscle);
        if candidates.is_empty() || sets == 0 {
            return None;
        }
        let already = |name: &str| session.iter().any(|e| e.name == name);

        let mut repeated = None;
        for offset in 0..candidates.len() {
            let original = candidates[(occurrence + offset) % candidates.len()];
            let resolution = if let Some(cached) = memo.get(&original.name) {
                cached.clone()
            } else {
                let resolved = self.resolve(original, request);
                match (&resolved.name, &resolved.reason) {
                    (Some(name), Some(reason)) => safety_modifications.push(format!(
                        "{} replaced by {name} ({reason})",
                        original.name
                    )),
                    (None, Some(reason)) => safety_modifications.push(format!(
                        "{} dropped ({reason}); no usable {} alternative",
                        original.name,
                        muscle.label()
                    )),
                    _ => {}
                }
                memo.insert(original.name.clone(), resolved.clone());
                resolved
            };
            let Some(name) = &resolution.name else {
                continue;
            };
            let prescription = self.build_prescription(
                original,
                name,
                resolution.reason.is_some(),
                muscle,
                sets,
                request,
            );
            if !already(name.as_str()) {
                return Some(prescription);
            }
            if repeated.is_none() {
                repeated = Some(prescription);
            }
        }
        repeated
    }

    fn build_prescription(
        &self,
        original: &Exercise,
        name: &str,
        restricted: bool,
        muscle: MuscleGroup,
        sets: u32,
        request: &TrainingRequest<'_>,
    ) -> ExercisePrescription {
        let performed = self.exercises.find(name).unwrap_or(original);
        let (compound, isolation) = self.schemes(request.profile.schedule.focus);
        let scheme = if performed.compound { compound } else { isolation };
        let mut notes = Vec::new();
        if name == original.name && restricted {
            notes.push(
                "No safe substitute available; use reduced load and pain-free range".to_owned(),
            );
        }
        ExercisePrescription {
            name: name.to_owned(),
            primary_muscle: muscle,
            sets,
            rep_min: scheme.rep_min,
            rep_max: scheme.rep_max,
            rest_seconds: scheme.rest_seconds,
            rir: adjust_rir(scheme.rir, request.profile.schedule.intensity),
            substituted_for: (name != original.name).then(|| original.name.clone()),
            notes,
        }
    }

    /// Decide which exercise to perform in place of `original`
    fn resolve(&self, original: &Exercise, request: &TrainingRequest<'_>) -> Resolution {
        let injuries = &request.profile.medical.injuries;
        let equipment_ok = original.usable_with(request.equipment);
        let injury_ok = !original.contraindicated_for(injuries);
        if equipment_ok && injury_ok {
            return Resolution {
                name: Some(original.name.clone()),
                reason: None,
            };
        }
        let reason = if injury_ok {
            "equipment unavailable".to_owned()
        } else {
            let regions: Vec<&str> = original
                .contraindications
                .iter()
                .filter(|r| injuries.contains(r))
                .map(|r| r.label())
                .collect();
            format!("{} restriction", regions.join(", "))
        };
        let safe = |e: &Exercise| {
            e.name != original.name
                && e.usable_with(request.equipment)
                && !e.contraindicated_for(injuries)
        };

        let substitutes: Vec<&Exercise> = original
            .substitutes
            .iter()
            .filter_map(|name| self.exercises.find(name))
            .filter(|e| safe(e))
            .collect();
        if let Some(first) = substitutes.first() {
            let chosen = if substitutes.len() > 1 {
                let names: Vec<&str> = substitutes.iter().map(|e| e.name.as_str()).collect();
                let prompt = format!(
                    "Pick the best replacement for {} given a {reason}. Answer with one name from: {}",
                    original.name,
                    names.join(", ")
                );
                consult(self.advisor, TASK_EXERCISE_SUBSTITUTION, &prompt)
                    .and_then(|answer| pick_candidate(&answer, &names))
                    .and_then(|i| substitutes.get(i).copied())
                    .unwrap_or(first)
            } else {
                first
            };
            return Resolution {
                name: Some(chosen.name.clone()),
                reason: Some(reason),
            };
        }

        // Same-muscle movement that fits, else the original under reduced load
        // when only an injury blocks it, else nothing
        let pool = self.exercises.for_muscle(original.primary);
        let name = pool
            .iter()
            .copied()
            .find(|e| safe(e))
            .map(|e| e.name.clone())
            .or_else(|| equipment_ok.then(|| original.name.clone()));
        Resolution {
            name,
            reason: Some(reason),
        }
    }

    fn deload_interval(&self, experience: ExperienceLevel, age: u32) -> u32 {
        let base = match experience {
            ExperienceLevel::Beginner => self.config.deload_interval_beginner,
            ExperienceLevel::Intermediate => self.config.deload_interval_intermediate,
            ExperienceLevel::Advanced => self.config.deload_interval_advanced,
        };
        let adjusted = if age >= 50 { base.saturating_sub(1) } else { base };
        adjusted.max(self.config.min_deload_interval)
    }

    fn progression(&self, weeks: u32, interval: u32, base_rir: u8) -> Vec<ProgressionWeek> {
        (1..=weeks)
            .map(|week| {
                let position = (week - 1) % interval;
                if position == interval - 1 {
                    ProgressionWeek {
                        week,
                        phase: TrainingPhase::Deload,
                        volume_multiplier: self.config.deload_volume_multiplier,
                        target_rir: self.config.deload_rir,
                    }
                } else {
                    let phase = if position + 2 == interval {
                        TrainingPhase::Intensification
                    } else {
                        TrainingPhase::Accumulation
                    };
                    let step = self.config.weekly_volume_step * f64::from(position);
                    let rir = i64::from(base_rir) + 1 - i64::from(position);
                    ProgressionWeek {
                        week,
                        phase,
                        volume_multiplier: ((1.0 + step) * 100.0).round() / 100.0,
                        target_rir: rir.clamp(1, 4) as u8,
                    }
                }
            })
            .collect()
    }
}

/// Split for a session count and experience tier
#[must_use]
pub fn select_split(sessions: u8, experience: ExperienceLevel) -> SplitType {
    match sessions {
        0..=3 => SplitType::FullBody,
        4 => SplitType::UpperLower,
        5 if experience == ExperienceLevel::Beginner => SplitType::UpperLower,
        5 => SplitType::PushPullLegs,
        _ if experience == ExperienceLevel::Advanced => SplitType::PushPullLegs,
        _ => SplitType::UpperLower,
    }
}

fn session_kinds(split: SplitType, sessions: u8, experience: ExperienceLevel) -> Vec<SessionKind> {
    let rotation: &[SessionKind] = match split {
        SplitType::FullBody => &[SessionKind::FullBody],
        SplitType::UpperLower => &[SessionKind::Upper, SessionKind::Lower],
        SplitType::PushPullLegs if sessions == 5 && experience != ExperienceLevel::Advanced => &[
            SessionKind::Push,
            SessionKind::Pull,
            SessionKind::Legs,
            SessionKind::Upper,
            SessionKind::Lower,
        ],
        SplitType::PushPullLegs => &[SessionKind::Push, SessionKind::Pull, SessionKind::Legs],
    };
    (0..usize::from(sessions))
        .map(|i| rotation[i % rotation.len()])
        .collect()
}

/// Sets of `muscle` in session `index`; remainders go to earlier sessions
fn sets_for_session(
    weekly: &BTreeMap<MuscleGroup, u32>,
    kinds: &[SessionKind],
    muscle: MuscleGroup,
    index: usize,
) -> u32 {
    let Some(total) = weekly.get(&muscle).copied() else {
        return 0;
    };
    let training: Vec<usize> = kinds
        .iter()
        .enumerate()
        .filter(|(_, k)| k.muscles().contains(&muscle))
        .map(|(i, _)| i)
        .collect();
    let Some(position) = training.iter().position(|i| *i == index) else {
        return 0;
    };
    let count = training.len() as u32;
    total / count + u32::from((position as u32) < total % count)
}

/// Spread `sessions` over the available days, Monday-first when none are given
fn assign_days(available: &[Weekday], sessions: usize) -> Vec<Weekday> {
    let days: &[Weekday] = if available.is_empty() {
        &ALL_DAYS
    } else {
        available
    };
    if sessions == 0 {
        return Vec::new();
    }
    (0..sessions)
        .map(|i| {
            if sessions <= days.len() {
                days[i * days.len() / sessions]
            } else {
                days[i % days.len()]
            }
        })
        .collect()
}

fn adjust_rir(rir: u8, intensity: TrainingIntensity) -> u8 {
    match intensity {
        TrainingIntensity::Low => rir.saturating_add(1),
        TrainingIntensity::Moderate => rir,
        TrainingIntensity::High => rir.saturating_sub(1).max(1),
    }
}

fn progression_notes(focus: TrainingFocus, interval: u32, weeks: u32) -> Vec<String> {
    let mut notes = vec![
        "Add a rep each week until the top of the range is reached at the target RIR, then add load"
            .to_owned(),
        format!("Deload every {interval} weeks: half the sets, RIR 4"),
    ];
    match focus {
        TrainingFocus::Strength => {
            notes.push("Add 2.5-5 kg to compound lifts when all sets hit the top of the range".to_owned());
        }
        TrainingFocus::Hypertrophy => {
            notes.push("Keep weekly sets within the adaptive band; add sets before adding load".to_owned());
        }
        TrainingFocus::Endurance => {
            notes.push("Shorten rest by 5-10 seconds before adding load".to_owned());
        }
        TrainingFocus::General => {
            notes.push("Progress whichever of reps or load feels most sustainable".to_owned());
        }
    }
    if weeks < interval {
        notes.push(format!(
            "Program ends before the first scheduled deload at week {interval}"
        ));
    }
    notes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ExerciseDatabase;
    use coachplan_core::models::{
        BiologicalSex, BodyRegion, Demographics, GoalSpec, MedicalProfile, NutritionPreferences,
        TrainingSchedule,
    };

    fn profile(sessions: u8, experience: ExperienceLevel) -> IntakeProfile {
        IntakeProfile {
            user_id: None,
            demographics: Demographics {
                age: 30,
                sex: BiologicalSex::Male,
                weight_kg: 80.0,
                height_cm: 180.0,
                body_fat_percent: None,
            },
            goal: GoalSpec::default(),
            schedule: TrainingSchedule {
                sessions_per_week: sessions,
                available_days: Vec::new(),
                session_minutes: 75,
                experience,
                training_years: 4.0,
                focus: TrainingFocus::Hypertrophy,
                intensity: TrainingIntensity::Moderate,
            },
            nutrition: NutritionPreferences::default(),
            medical: MedicalProfile::default(),
            modality: None,
        }
    }

    fn generate(profile: &IntakeProfile, equipment: &[Equipment]) -> TrainingProgram {
        let config = TrainingConfig::default();
        TrainingGenerator::new(&config, ExerciseDatabase::builtin()).generate(&TrainingRequest {
            profile,
            sessions_per_week: profile.schedule.sessions_per_week,
            session_minutes: profile.schedule.session_minutes,
            experience: profile.schedule.experience,
            equipment,
            duration_weeks: 12,
        })
    }

    #[test]
    fn test_split_selection() {
        assert_eq!(select_split(3, ExperienceLevel::Advanced), SplitType::FullBody);
        assert_eq!(select_split(4, ExperienceLevel::Beginner), SplitType::UpperLower);
        assert_eq!(select_split(5, ExperienceLevel::Beginner), SplitType::UpperLower);
        assert_eq!(select_split(5, ExperienceLevel::Intermediate), SplitType::PushPullLegs);
        assert_eq!(select_split(6, ExperienceLevel::Advanced), SplitType::PushPullLegs);
        assert_eq!(select_split(6, ExperienceLevel::Intermediate), SplitType::UpperLower);
    }

    #[test]
    fn test_days_spread_across_week() {
        let days = assign_days(&[], 3);
        assert_eq!(days, vec![Weekday::Mon, Weekday::Wed, Weekday::Fri]);
    }

    #[test]
    fn test_prescribed_sets_match_weekly_volume() {
        let program = generate(&profile(4, ExperienceLevel::Intermediate), &Equipment::FULL_GYM);
        for (group, weekly) in &program.weekly_volume {
            let prescribed: u32 = program
                .sessions
                .iter()
                .flat_map(|s| &s.exercises)
                .filter(|e| e.primary_muscle == *group)
                .map(|e| e.sets)
                .sum();
            assert_eq!(prescribed, *weekly, "{group:?}");
            assert!(program.volume_bands[group].contains(*weekly));
        }
    }

    #[test]
    fn test_knee_injury_swaps_squat() {
        let mut p = profile(4, ExperienceLevel::Intermediate);
        p.medical.injuries.push(BodyRegion::Knee);
        let program = generate(&p, &Equipment::FULL_GYM);
        let names: Vec<&str> = program
            .sessions
            .iter()
            .flat_map(|s| &s.exercises)
            .map(|e| e.name.as_str())
            .collect();
        assert!(!names.contains(&"Barbell Back Squat"));
        assert!(!program.safety_modifications.is_empty());
    }

    #[test]
    fn test_bodyweight_only_avoids_barbell_work() {
        let program = generate(&profile(3, ExperienceLevel::Beginner), &[Equipment::Bodyweight]);
        let catalog = ExerciseDatabase::builtin();
        for exercise in program.sessions.iter().flat_map(|s| &s.exercises) {
            let entry = catalog.find(&exercise.name).unwrap();
            assert!(entry.usable_with(&[Equipment::Bodyweight]), "{}", exercise.name);
        }
    }

    #[test]
    fn test_no_usable_alternative_drops_slot() {
        let exercises: Vec<Exercise> = ExerciseDatabase::builtin()
            .exercises()
            .iter()
            .filter(|e| e.name != "Bodyweight Calf Raise")
            .cloned()
            .collect();
        let catalog = ExerciseDatabase::new(exercises);
        let config = TrainingConfig::default();
        let p = profile(3, ExperienceLevel::Beginner);
        let program = TrainingGenerator::new(&config, &catalog).generate(&TrainingRequest {
            profile: &p,
            sessions_per_week: 3,
            session_minutes: 75,
            experience: ExperienceLevel::Beginner,
            equipment: &[Equipment::Bodyweight],
            duration_weeks: 8,
        });

        for exercise in program.sessions.iter().flat_map(|s| &s.exercises) {
            let entry = catalog.find(&exercise.name).unwrap();
            assert!(entry.usable_with(&[Equipment::Bodyweight]), "{}", exercise.name);
        }
        assert!(program
            .sessions
            .iter()
            .flat_map(|s| &s.exercises)
            .all(|e| e.primary_muscle != MuscleGroup::Calves));
        assert!(program
            .safety_modifications
            .iter()
            .any(|m| m.contains("dropped") && m.contains("calves")));
    }

    #[test]
    fn test_injury_without_alternative_keeps_movement_with_note() {
        let mut p = profile(3, ExperienceLevel::Beginner);
        p.medical.injuries.push(BodyRegion::Ankle);
        let program = generate(&p, &[Equipment::Bodyweight]);
        let calf_work: Vec<&ExercisePrescription> = program
            .sessions
            .iter()
            .flat_map(|s| &s.exercises)
            .filter(|e| e.primary_muscle == MuscleGroup::Calves)
            .collect();
        assert!(!calf_work.is_empty());
        for exercise in calf_work {
            assert_eq!(exercise.name, "Bodyweight Calf Raise");
            assert!(exercise.notes.iter().any(|n| n.contains("reduced load")));
        }
    }

    #[test]
    fn test_older_lifter_bands_reduced() {
        let mut p = profile(4, ExperienceLevel::Intermediate);
        p.demographics.age = 66;
        let program = generate(&p, &Equipment::FULL_GYM);
        assert_eq!(program.volume_bands[&MuscleGroup::Back].maximum_recoverable, 19);
        assert_eq!(program.deload_interval_weeks, 4);
    }

    #[test]
    fn test_progression_has_deloads() {
        let program = generate(&profile(4, ExperienceLevel::Advanced), &Equipment::FULL_GYM);
        assert_eq!(program.progression.len(), 12);
        assert_eq!(program.progression[3].phase, TrainingPhase::Deload);
        assert_eq!(program.progression[2].phase, TrainingPhase::Intensification);
        assert!(program.progression.iter().all(|w| (1..=4).contains(&w.target_rir)));
    }

    #[test]
    fn test_advisor_ranks_substitutes() {
        let mut p = profile(4, ExperienceLevel::Intermediate);
        p.medical.injuries.push(BodyRegion::Knee);
        let config = TrainingConfig::default();
        let advisor = |_: &str, _: &str, _: &str| Some("leg press".to_owned());
        let program = TrainingGenerator::new(&config, ExerciseDatabase::builtin())
            .with_advisor(&advisor)
            .generate(&TrainingRequest {
                profile: &p,
                sessions_per_week: 4,
                session_minutes: 75,
                experience: ExperienceLevel::Intermediate,
                equipment: &Equipment::FULL_GYM,
                duration_weeks: 8,
            });
        assert!(program
            .safety_modifications
            .iter()
            .any(|m| m.starts_with("Barbell Back Squat replaced by Leg Press")));
    }
}
