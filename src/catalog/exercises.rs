// ABOUTME: Exercise catalog with muscle targets, equipment needs and contraindications
// ABOUTME: Substitution lists used for injury and equipment swaps by the training generator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::OnceLock;

use coachplan_core::models::{BodyRegion, Equipment, MuscleGroup};
use serde::{Deserialize, Serialize};

/// One catalog exercise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    /// Display name, unique within a catalog
    pub name: String,
    /// Group credited with the working sets
    pub primary: MuscleGroup,
    /// Multi-joint movement
    pub compound: bool,
    /// Equipment required (all of it)
    pub equipment: Vec<Equipment>,
    /// Regions for which the movement is unsuitable
    pub contraindications: Vec<BodyRegion>,
    /// Preferred replacements, best first
    pub substitutes: Vec<String>,
}

impl Exercise {
    /// Whether the listed equipment covers this exercise; bodyweight is always available
    #[must_use]
    pub fn usable_with(&self, available: &[Equipment]) -> bool {
        self.equipment
            .iter()
            .all(|e| *e == Equipment::Bodyweight || available.contains(e))
    }

    /// Whether the exercise loads any injured region
    #[must_use]
    pub fn contraindicated_for(&self, injuries: &[BodyRegion]) -> bool {
        self.contraindications.iter().any(|r| injuries.contains(r))
    }
}

/// Read access to exercise data
pub trait ExerciseCatalog: Send + Sync {
    /// Every exercise in stable catalog order
    fn exercises(&self) -> &[Exercise];

    /// Look up an exercise by exact name
    fn find(&self, name: &str) -> Option<&Exercise> {
        self.exercises().iter().find(|e| e.name == name)
    }

    /// Exercises for `group`, compound movements first, otherwise catalog order
    fn for_muscle(&self, group: MuscleGroup) -> Vec<&Exercise> {
        let mut matching: Vec<&Exercise> = self
            .exercises()
            .iter()
            .filter(|e| e.primary == group)
            .collect();
        matching.sort_by_key(|e| !e.compound);
        matching
    }
}

/// In-memory exercise catalog
#[derive(Debug, Clone, Default)]
pub struct ExerciseDatabase {
    exercises: Vec<Exercise>,
}

static BUILTIN_EXERCISES: OnceLock<ExerciseDatabase> = OnceLock::new();

impl ExerciseDatabase {
    /// Catalog from explicit exercises
    #[must_use]
    pub const fn new(exercises: Vec<Exercise>) -> Self {
        Self { exercises }
    }

    /// Shared built-in catalog, built once per process
    pub fn builtin() -> &'static Self {
        BUILTIN_EXERCISES.get_or_init(|| Self::new(builtin_exercises()))
    }
}

impl ExerciseCatalog for ExerciseDatabase {
    fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }
}

fn exercise(
    name: &str,
    primary: MuscleGroup,
    compound: bool,
    equipment: &[Equipment],
    contraindications: &[BodyRegion],
    substitutes: &[&str],
) -> Exercise {
    Exercise {
        name: name.to_owned(),
        primary,
        compound,
        equipment: equipment.to_vec(),
        contraindications: contraindications.to_vec(),
        substitutes: substitutes.iter().map(|s| (*s).to_owned()).collect(),
    }
}

fn builtin_exercises() -> Vec<Exercise> {
    use BodyRegion::{Ankle, Elbow, Knee, LowerBack, Shoulder, Wrist};
    use Equipment::{Bands, Barbell, Bodyweight, Cable, Dumbbell, Kettlebell, Machine};
    use MuscleGroup::{
        Back, Biceps, Calves, Chest, Core, Glutes, Hamstrings, Quads, Shoulders, Triceps,
    };

    vec![
        // Chest
        exercise("Barbell Bench Press", Chest, true, &[Barbell], &[Shoulder], &["Dumbbell Bench Press", "Machine Chest Press", "Push-Up"]),
        exercise("Incline Dumbbell Press", Chest, true, &[Dumbbell], &[Shoulder], &["Machine Chest Press", "Push-Up"]),
        exercise("Dumbbell Bench Press", Chest, true, &[Dumbbell], &[], &["Machine Chest Press", "Push-Up"]),
        exercise("Machine Chest Press", Chest, true, &[Machine], &[], &["Push-Up", "Band Chest Press"]),
        exercise("Push-Up", Chest, true, &[Bodyweight], &[Wrist], &["Band Chest Press", "Machine Chest Press"]),
        exercise("Band Chest Press", Chest, true, &[Bands], &[], &["Push-Up"]),
        exercise("Cable Fly", Chest, false, &[Cable], &[], &["Dumbbell Fly", "Band Chest Press"]),
        exercise("Dumbbell Fly", Chest, false, &[Dumbbell], &[Shoulder], &["Cable Fly", "Band Chest Press"]),
        // Back
        exercise("Barbell Row", Back, true, &[Barbell], &[LowerBack], &["Chest-Supported Row", "Seated Cable Row", "Inverted Row"]),
        exercise("Lat Pulldown", Back, true, &[Cable], &[], &["Band Pulldown", "Pull-Up"]),
        exercise("Pull-Up", Back, true, &[Bodyweight], &[Shoulder, Elbow], &["Lat Pulldown", "Band Pulldown"]),
        exercise("Seated Cable Row", Back, true, &[Cable], &[], &["Chest-Supported Row", "Band Row"]),
        exercise("Chest-Supported Row", Back, true, &[Dumbbell], &[], &["Seated Cable Row", "Band Row"]),
        exercise("Inverted Row", Back, true, &[Bodyweight], &[], &["Band Row"]),
        exercise("Band Row", Back, true, &[Bands], &[], &["Inverted Row"]),
        exercise("Band Pulldown", Back, true, &[Bands], &[], &["Inverted Row"]),
        // Shoulders
        exercise("Overhead Press", Shoulders, true, &[Barbell], &[Shoulder, LowerBack], &["Seated Dumbbell Press", "Machine Shoulder Press", "Pike Push-Up"]),
        exercise("Seated Dumbbell Press", Shoulders, true, &[Dumbbell], &[Shoulder], &["Machine Shoulder Press", "Pike Push-Up"]),
        exercise("Machine Shoulder Press", Shoulders, true, &[Machine], &[Shoulder], &["Pike Push-Up"]),
        exercise("Pike Push-Up", Shoulders, true, &[Bodyweight], &[Shoulder, Wrist], &["Band Lateral Raise"]),
        exercise("Lateral Raise", Shoulders, false, &[Dumbbell], &[], &["Cable Lateral Raise", "Band Lateral Raise"]),
        exercise("Face Pull", Shoulders, false, &[Cable], &[], &["Band Face Pull"]),
        exercise("Cable Lateral Raise", Shoulders, false, &[Cable], &[], &["Lateral Raise", "Band Lateral Raise"]),
        exercise("Band Lateral Raise", Shoulders, false, &[Bands], &[], &["Band Face Pull"]),
        exercise("Band Face Pull", Shoulders, false, &[Bands], &[], &["Band Lateral Raise"]),
        // Biceps
        exercise("Chin-Up", Biceps, true, &[Bodyweight], &[Shoulder, Elbow], &["Dumbbell Curl", "Band Curl"]),
        exercise("Barbell Curl", Biceps, false, &[Barbell], &[Elbow, Wrist], &["Dumbbell Curl", "Cable Curl", "Band Curl"]),
        exercise("Dumbbell Curl", Biceps, false, &[Dumbbell], &[], &["Cable Curl", "Band Curl"]),
        exercise("Hammer Curl", Biceps, false, &[Dumbbell], &[], &["Cable Curl", "Band Curl"]),
        exercise("Cable Curl", Biceps, false, &[Cable], &[], &["Dumbbell Curl", "Band Curl"]),
        exercise("Band Curl", Biceps, false, &[Bands], &[], &["Towel Curl"]),
        exercise("Towel Curl", Biceps, false, &[Bodyweight], &[], &["Band Curl"]),
        // Triceps
        exercise("Close-Grip Bench Press", Triceps, true, &[Barbell], &[Shoulder, Elbow], &["Cable Pushdown", "Diamond Push-Up"]),
        exercise("Diamond Push-Up", Triceps, true, &[Bodyweight], &[Wrist, Elbow], &["Band Pushdown", "Cable Pushdown"]),
        exercise("Cable Pushdown", Triceps, false, &[Cable], &[], &["Band Pushdown", "Overhead Dumbbell Extension"]),
        exercise("Overhead Dumbbell Extension", Triceps, false, &[Dumbbell], &[Elbow, Shoulder], &["Cable Pushdown", "Band Pushdown"]),
        exercise("Band Pushdown", Triceps, false, &[Bands], &[], &["Bench Dip"]),
        exercise("Bench Dip", Triceps, false, &[Bodyweight], &[Shoulder], &["Band Pushdown"]),
        // Quads
        exercise("Barbell Back Squat", Quads, true, &[Barbell], &[Knee, LowerBack], &["Box Squat", "Leg Press", "Goblet Squat"]),
        exercise("Leg Press", Quads, true, &[Machine], &[], &["Goblet Squat", "Box Squat"]),
        exercise("Goblet Squat", Quads, true, &[Dumbbell], &[Knee], &["Box Squat", "Leg Press"]),
        exercise("Bulgarian Split Squat", Quads, true, &[Dumbbell], &[Knee], &["Box Squat", "Reverse Lunge"]),
        exercise("Box Squat", Quads, true, &[Bodyweight], &[], &["Wall Sit"]),
        exercise("Reverse Lunge", Quads, true, &[Bodyweight], &[Knee], &["Box Squat"]),
        exercise("Leg Extension", Quads, false, &[Machine], &[Knee], &["Wall Sit"]),
        exercise("Wall Sit", Quads, false, &[Bodyweight], &[], &["Box Squat"]),
        // Hamstrings
        exercise("Romanian Deadlift", Hamstrings, true, &[Barbell], &[LowerBack], &["Lying Leg Curl", "Dumbbell Romanian Deadlift", "Band Leg Curl"]),
        exercise("Dumbbell Romanian Deadlift", Hamstrings, true, &[Dumbbell], &[LowerBack], &["Lying Leg Curl", "Band Leg Curl"]),
        exercise("Lying Leg Curl", Hamstrings, false, &[Machine], &[], &["Band Leg Curl", "Swiss Ball Leg Curl"]),
        exercise("Nordic Curl", Hamstrings, false, &[Bodyweight], &[Knee], &["Swiss Ball Leg Curl", "Band Leg Curl"]),
        exercise("Band Leg Curl", Hamstrings, false, &[Bands], &[], &["Swiss Ball Leg Curl"]),
        exercise("Swiss Ball Leg Curl", Hamstrings, false, &[Bodyweight], &[], &["Band Leg Curl"]),
        // Glutes
        exercise("Barbell Hip Thrust", Glutes, true, &[Barbell], &[], &["Glute Bridge", "Cable Kickback"]),
        exercise("Kettlebell Swing", Glutes, true, &[Kettlebell], &[LowerBack], &["Glute Bridge"]),
        exercise("Glute Bridge", Glutes, false, &[Bodyweight], &[], &["Band Hip Abduction"]),
        exercise("Cable Kickback", Glutes, false, &[Cable], &[], &["Glute Bridge", "Band Hip Abduction"]),
        exercise("Band Hip Abduction", Glutes, false, &[Bands], &[], &["Glute Bridge"]),
        // Calves
        exercise("Standing Calf Raise", Calves, false, &[Machine], &[Ankle], &["Dumbbell Calf Raise", "Bodyweight Calf Raise"]),
        exercise("Seated Calf Raise", Calves, false, &[Machine], &[], &["Bodyweight Calf Raise"]),
        exercise("Dumbbell Calf Raise", Calves, false, &[Dumbbell], &[Ankle], &["Seated Calf Raise", "Bodyweight Calf Raise"]),
        exercise("Bodyweight Calf Raise", Calves, false, &[Bodyweight], &[Ankle], &["Seated Calf Raise"]),
        // Core
        exercise("Hanging Leg Raise", Core, false, &[Bodyweight], &[Shoulder], &["Dead Bug", "Plank"]),
        exercise("Cable Crunch", Core, false, &[Cable], &[LowerBack], &["Dead Bug"]),
        exercise("Pallof Press", Core, false, &[Cable], &[], &["Band Pallof Press", "Dead Bug"]),
        exercise("Plank", Core, false, &[Bodyweight], &[], &["Dead Bug"]),
        exercise("Dead Bug", Core, false, &[Bodyweight], &[], &["Plank"]),
        exercise("Band Pallof Press", Core, false, &[Bands], &[], &["Dead Bug"]),
    ]
}
