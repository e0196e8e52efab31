// ABOUTME: Static keyword tables mapping conversational phrases to intake enums
// ABOUTME: Goals, days, diets, allergens, conditions, injuries, experience, focus, intensity and sex
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Keyword tables
//!
//! Tables are ordered: the first phrase found wins, so more specific phrases
//! ("body recomposition", "vegan") precede the general ones they contain.
//! Matching is on whole words after [`normalize`].

use chrono::Weekday;
use coachplan_core::models::{
    BiologicalSex, BodyRegion, DietaryPreference, ExperienceLevel, MedicalCondition, PrimaryGoal,
    TrainingFocus, TrainingIntensity,
};

/// Goal phrases
pub static GOAL_KEYWORDS: &[(&str, PrimaryGoal)] = &[
    ("body recomposition", PrimaryGoal::Recomposition),
    ("recomposition", PrimaryGoal::Recomposition),
    ("recomp", PrimaryGoal::Recomposition),
    ("lose fat and build muscle", PrimaryGoal::Recomposition),
    ("lose fat and gain muscle", PrimaryGoal::Recomposition),
    ("fat loss", PrimaryGoal::FatLoss),
    ("lose fat", PrimaryGoal::FatLoss),
    ("lose weight", PrimaryGoal::FatLoss),
    ("weight loss", PrimaryGoal::FatLoss),
    ("slim down", PrimaryGoal::FatLoss),
    ("get lean", PrimaryGoal::FatLoss),
    ("cut", PrimaryGoal::FatLoss),
    ("cutting", PrimaryGoal::FatLoss),
    ("muscle gain", PrimaryGoal::MuscleGain),
    ("gain muscle", PrimaryGoal::MuscleGain),
    ("build muscle", PrimaryGoal::MuscleGain),
    ("bulk", PrimaryGoal::MuscleGain),
    ("bulking", PrimaryGoal::MuscleGain),
    ("get bigger", PrimaryGoal::MuscleGain),
    ("put on size", PrimaryGoal::MuscleGain),
    ("performance", PrimaryGoal::Performance),
    ("race", PrimaryGoal::Performance),
    ("marathon", PrimaryGoal::Performance),
    ("compete", PrimaryGoal::Performance),
    ("competition", PrimaryGoal::Performance),
    ("maintenance", PrimaryGoal::Maintenance),
    ("maintain", PrimaryGoal::Maintenance),
    ("stay healthy", PrimaryGoal::Maintenance),
    ("stay in shape", PrimaryGoal::Maintenance),
];

/// Day names and abbreviations accepted in structured fields
pub static DAY_KEYWORDS: &[(&str, Weekday)] = &[
    ("monday", Weekday::Mon),
    ("mondays", Weekday::Mon),
    ("mon", Weekday::Mon),
    ("tuesday", Weekday::Tue),
    ("tuesdays", Weekday::Tue),
    ("tues", Weekday::Tue),
    ("tue", Weekday::Tue),
    ("wednesday", Weekday::Wed),
    ("wednesdays", Weekday::Wed),
    ("weds", Weekday::Wed),
    ("wed", Weekday::Wed),
    ("thursday", Weekday::Thu),
    ("thursdays", Weekday::Thu),
    ("thurs", Weekday::Thu),
    ("thur", Weekday::Thu),
    ("thu", Weekday::Thu),
    ("friday", Weekday::Fri),
    ("fridays", Weekday::Fri),
    ("fri", Weekday::Fri),
    ("saturday", Weekday::Sat),
    ("saturdays", Weekday::Sat),
    ("sat", Weekday::Sat),
    ("sunday", Weekday::Sun),
    ("sundays", Weekday::Sun),
    ("sun", Weekday::Sun),
];

/// Phrases naming several days at once
pub static DAY_GROUP_KEYWORDS: &[(&str, &[Weekday])] = &[
    (
        "weekdays",
        &[Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri],
    ),
    ("weekends", &[Weekday::Sat, Weekday::Sun]),
    ("weekend", &[Weekday::Sat, Weekday::Sun]),
    ("every day", &ALL_DAYS),
    ("everyday", &ALL_DAYS),
    ("daily", &ALL_DAYS),
];

/// Every day of the week, Monday first
pub const ALL_DAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Dietary pattern phrases
pub static DIET_KEYWORDS: &[(&str, DietaryPreference)] = &[
    ("vegan", DietaryPreference::Vegan),
    ("plant based", DietaryPreference::Vegan),
    ("vegetarian", DietaryPreference::Vegetarian),
    ("veggie", DietaryPreference::Vegetarian),
    ("pescatarian", DietaryPreference::Pescatarian),
    ("pescetarian", DietaryPreference::Pescatarian),
    ("omnivore", DietaryPreference::Omnivore),
    ("eat everything", DietaryPreference::Omnivore),
    ("eat anything", DietaryPreference::Omnivore),
];

/// Allergy phrases and the catalog allergen tag they map to
pub static ALLERGEN_KEYWORDS: &[(&str, &str)] = &[
    ("peanuts", "peanut"),
    ("peanut", "peanut"),
    ("tree nuts", "tree_nut"),
    ("tree nut", "tree_nut"),
    ("nuts", "tree_nut"),
    ("almonds", "tree_nut"),
    ("walnuts", "tree_nut"),
    ("dairy", "dairy"),
    ("lactose", "dairy"),
    ("milk", "dairy"),
    ("eggs", "egg"),
    ("egg", "egg"),
    ("shellfish", "shellfish"),
    ("shrimp", "shellfish"),
    ("fish", "fish"),
    ("soy", "soy"),
    ("gluten", "gluten"),
    ("celiac", "gluten"),
    ("wheat", "wheat"),
    ("sesame", "sesame"),
];

/// Medical condition phrases
pub static CONDITION_KEYWORDS: &[(&str, MedicalCondition)] = &[
    ("heart disease", MedicalCondition::CardiovascularDisease),
    ("heart condition", MedicalCondition::CardiovascularDisease),
    ("heart attack", MedicalCondition::CardiovascularDisease),
    ("cardiac", MedicalCondition::CardiovascularDisease),
    ("cardiovascular", MedicalCondition::CardiovascularDisease),
    ("arrhythmia", MedicalCondition::CardiovascularDisease),
    ("high blood pressure", MedicalCondition::Hypertension),
    ("hypertension", MedicalCondition::Hypertension),
    ("type 1 diabetes", MedicalCondition::Type1Diabetes),
    ("type 1", MedicalCondition::Type1Diabetes),
    ("type 2 diabetes", MedicalCondition::Type2Diabetes),
    ("type 2", MedicalCondition::Type2Diabetes),
    ("diabetes", MedicalCondition::Type2Diabetes),
    ("diabetic", MedicalCondition::Type2Diabetes),
    ("pregnant", MedicalCondition::Pregnancy),
    ("pregnancy", MedicalCondition::Pregnancy),
    ("eating disorder", MedicalCondition::EatingDisorderHistory),
    ("anorexia", MedicalCondition::EatingDisorderHistory),
    ("bulimia", MedicalCondition::EatingDisorderHistory),
    ("kidney disease", MedicalCondition::KidneyDisease),
    ("kidney", MedicalCondition::KidneyDisease),
    ("asthma", MedicalCondition::Asthma),
    ("osteoporosis", MedicalCondition::Osteoporosis),
];

/// Injury phrases and the body region they restrict
pub static INJURY_KEYWORDS: &[(&str, BodyRegion)] = &[
    ("lower back", BodyRegion::LowerBack),
    ("back pain", BodyRegion::LowerBack),
    ("herniated disc", BodyRegion::LowerBack),
    ("bad back", BodyRegion::LowerBack),
    ("knee", BodyRegion::Knee),
    ("knees", BodyRegion::Knee),
    ("acl", BodyRegion::Knee),
    ("meniscus", BodyRegion::Knee),
    ("rotator cuff", BodyRegion::Shoulder),
    ("shoulder", BodyRegion::Shoulder),
    ("shoulders", BodyRegion::Shoulder),
    ("hip", BodyRegion::Hip),
    ("hips", BodyRegion::Hip),
    ("ankle", BodyRegion::Ankle),
    ("ankles", BodyRegion::Ankle),
    ("wrist", BodyRegion::Wrist),
    ("wrists", BodyRegion::Wrist),
    ("tennis elbow", BodyRegion::Elbow),
    ("elbow", BodyRegion::Elbow),
    ("neck", BodyRegion::Neck),
];

/// Words that mark a sentence as describing an injury
pub static INJURY_CUES: &[&str] = &[
    "injury", "injured", "pain", "hurt", "hurts", "surgery", "sore", "tear", "torn", "strain",
    "sprain", "bad", "tendinitis", "tendonitis", "issues", "problem", "problems", "injuries",
];

/// Words that mark a sentence as describing allergies
pub static ALLERGY_CUES: &[&str] = &[
    "allergic", "allergy", "allergies", "intolerant", "intolerance", "avoid", "can't eat",
    "cannot eat",
];

/// Words that negate a medical statement within its sentence
pub static NEGATION_CUES: &[&str] = &["no", "not", "never", "without", "don't", "dont", "none"];

/// Phrases indicating a physician has cleared exercise
pub static CLEARANCE_KEYWORDS: &[&str] = &[
    "doctor cleared",
    "cleared by my doctor",
    "cleared by a doctor",
    "medical clearance",
    "physician cleared",
    "physician approved",
    "doctor approved",
    "doctor says it's fine",
    "doctor said it's fine",
];

/// Experience phrases
pub static EXPERIENCE_KEYWORDS: &[(&str, ExperienceLevel)] = &[
    ("complete beginner", ExperienceLevel::Beginner),
    ("beginner", ExperienceLevel::Beginner),
    ("novice", ExperienceLevel::Beginner),
    ("new to lifting", ExperienceLevel::Beginner),
    ("new to the gym", ExperienceLevel::Beginner),
    ("never lifted", ExperienceLevel::Beginner),
    ("intermediate", ExperienceLevel::Intermediate),
    ("advanced", ExperienceLevel::Advanced),
    ("experienced", ExperienceLevel::Advanced),
    ("competitive lifter", ExperienceLevel::Advanced),
];

/// Training focus phrases
pub static FOCUS_KEYWORDS: &[(&str, TrainingFocus)] = &[
    ("powerlifting", TrainingFocus::Strength),
    ("strength", TrainingFocus::Strength),
    ("stronger", TrainingFocus::Strength),
    ("hypertrophy", TrainingFocus::Hypertrophy),
    ("bodybuilding", TrainingFocus::Hypertrophy),
    ("aesthetics", TrainingFocus::Hypertrophy),
    ("endurance", TrainingFocus::Endurance),
    ("stamina", TrainingFocus::Endurance),
    ("conditioning", TrainingFocus::Endurance),
    ("general fitness", TrainingFocus::General),
    ("general", TrainingFocus::General),
    ("overall health", TrainingFocus::General),
];

/// Intensity phrases; the exact labels come first
pub static INTENSITY_KEYWORDS: &[(&str, TrainingIntensity)] = &[
    ("low", TrainingIntensity::Low),
    ("moderate", TrainingIntensity::Moderate),
    ("high", TrainingIntensity::High),
    ("easy", TrainingIntensity::Low),
    ("light", TrainingIntensity::Low),
    ("gentle", TrainingIntensity::Low),
    ("medium", TrainingIntensity::Moderate),
    ("normal", TrainingIntensity::Moderate),
    ("hard", TrainingIntensity::High),
    ("intense", TrainingIntensity::High),
    ("extreme", TrainingIntensity::High),
    ("max", TrainingIntensity::High),
];

/// Number of leading [`INTENSITY_KEYWORDS`] entries that are canonical labels
pub const CANONICAL_INTENSITY_LABELS: usize = 3;

/// Sex phrases; female terms first since "female" contains "male"
pub static SEX_KEYWORDS: &[(&str, BiologicalSex)] = &[
    ("female", BiologicalSex::Female),
    ("woman", BiologicalSex::Female),
    ("f", BiologicalSex::Female),
    ("male", BiologicalSex::Male),
    ("man", BiologicalSex::Male),
    ("guy", BiologicalSex::Male),
    ("m", BiologicalSex::Male),
];

/// Lowercase, strip punctuation except apostrophes, collapse whitespace, pad with spaces
///
/// The padding lets phrase lookups match whole words with a plain substring
/// search.
#[must_use]
pub fn normalize(text: &str) -> String {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '\'' { c } else { ' ' })
        .collect();
    let mut out = String::with_capacity(cleaned.len() + 2);
    out.push(' ');
    for word in cleaned.split_whitespace() {
        out.push_str(word);
        out.push(' ');
    }
    out
}

/// Whether normalized text contains `phrase` as whole words
#[must_use]
pub fn contains_phrase(normalized: &str, phrase: &str) -> bool {
    normalized.contains(&format!(" {phrase} "))
}

/// First table entry whose phrase appears in the text
#[must_use]
pub fn lookup<T: Clone>(table: &[(&str, T)], text: &str) -> Option<T> {
    let normalized = normalize(text);
    table
        .iter()
        .find(|(phrase, _)| contains_phrase(&normalized, phrase))
        .map(|(_, value)| value.clone())
}

/// Every distinct value whose phrase appears in the text, in table order
#[must_use]
pub fn lookup_all<T: Clone + PartialEq>(table: &[(&str, T)], text: &str) -> Vec<T> {
    let normalized = normalize(text);
    let mut found: Vec<T> = Vec::new();
    for (phrase, value) in table {
        if contains_phrase(&normalized, phrase) && !found.contains(value) {
            found.push(value.clone());
        }
    }
    found
}

/// Whether any cue word appears in the text
#[must_use]
pub fn has_cue(cues: &[&str], text: &str) -> bool {
    let normalized = normalize(text);
    cues.iter().any(|cue| contains_phrase(&normalized, cue))
}

/// Days named in the text, Monday first
///
/// `allow_abbreviations` admits short forms like "sat" and "sun", which are
/// too ambiguous to trust in free-form prose.
#[must_use]
pub fn days_in(text: &str, allow_abbreviations: bool) -> Vec<Weekday> {
    let normalized = normalize(text);
    let mut days: Vec<Weekday> = Vec::new();
    for (phrase, group) in DAY_GROUP_KEYWORDS {
        if contains_phrase(&normalized, phrase) {
            days.extend(group.iter().copied());
        }
    }
    for (phrase, day) in DAY_KEYWORDS {
        let full_name = phrase.len() >= 6;
        if (allow_abbreviations || full_name) && contains_phrase(&normalized, phrase) {
            days.push(*day);
        }
    }
    let mut unique: Vec<Weekday> = Vec::with_capacity(days.len());
    for day in days {
        if !unique.contains(&day) {
            unique.push(day);
        }
    }
    unique.sort_by_key(Weekday::num_days_from_monday);
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_pads_and_strips() {
        assert_eq!(normalize("Lose-Weight, FAST!"), " lose weight fast ");
    }

    #[test]
    fn test_recomposition_beats_fat_loss() {
        assert_eq!(
            lookup(GOAL_KEYWORDS, "I want to lose fat and build muscle"),
            Some(PrimaryGoal::Recomposition)
        );
        assert_eq!(
            lookup(GOAL_KEYWORDS, "mainly want to lose weight"),
            Some(PrimaryGoal::FatLoss)
        );
    }

    #[test]
    fn test_whole_word_matching() {
        assert_eq!(lookup(GOAL_KEYWORDS, "I execute plans well"), None);
        assert_eq!(lookup(SEX_KEYWORDS, "female"), Some(BiologicalSex::Female));
        assert_eq!(lookup(SEX_KEYWORDS, "Male"), Some(BiologicalSex::Male));
    }

    #[test]
    fn test_snake_case_structured_values() {
        assert_eq!(lookup(GOAL_KEYWORDS, "fat_loss"), Some(PrimaryGoal::FatLoss));
        assert_eq!(lookup(GOAL_KEYWORDS, "muscle_gain"), Some(PrimaryGoal::MuscleGain));
    }

    #[test]
    fn test_days_with_and_without_abbreviations() {
        assert_eq!(
            days_in("Mon, Wed and Fri", true),
            vec![Weekday::Mon, Weekday::Wed, Weekday::Fri]
        );
        assert!(days_in("I sat down", false).is_empty());
        assert_eq!(
            days_in("weekends and Tuesday", false),
            vec![Weekday::Tue, Weekday::Sat, Weekday::Sun]
        );
    }

    #[test]
    fn test_allergen_tags() {
        assert_eq!(
            lookup_all(ALLERGEN_KEYWORDS, "allergic to peanuts and shellfish"),
            vec!["peanut", "shellfish"]
        );
    }

    #[test]
    fn test_every_table_entry_is_normalized() {
        let phrases = GOAL_KEYWORDS
            .iter()
            .map(|(p, _)| *p)
            .chain(DIET_KEYWORDS.iter().map(|(p, _)| *p))
            .chain(CONDITION_KEYWORDS.iter().map(|(p, _)| *p))
            .chain(INJURY_KEYWORDS.iter().map(|(p, _)| *p))
            .chain(FOCUS_KEYWORDS.iter().map(|(p, _)| *p));
        for phrase in phrases {
            assert_eq!(normalize(phrase).trim(), phrase, "{phrase} is not normalized");
        }
    }
}
