// ABOUTME: Resolves a loose intake record into a validated profile with a warning per inference or default
// ABOUTME: Structured fields first, then transcript keywords and patterns, then advisory goal inference
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::Debug;
use std::ops::Range;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::Weekday;
use coachplan_core::constants::units::{CM_PER_INCH, KG_PER_POUND};
use coachplan_core::errors::{PlanError, PlanResult};
use coachplan_core::models::{
    BodyRegion, Demographics, DietaryPreference, ExperienceLevel, GoalSpec,
    IntakeProfile, MedicalCondition, MedicalProfile, NutritionPreferences, PrimaryGoal,
    TrainingFocus, TrainingIntensity, TrainingSchedule,
};
use regex::Regex;
use tracing::{debug, info};

use super::keywords::{
    contains_phrase, days_in, has_cue, lookup, lookup_all, normalize, ALLERGEN_KEYWORDS, ALLERGY_CUES, ALL_DAYS,
    CANONICAL_INTENSITY_LABELS, CLEARANCE_KEYWORDS, CONDITION_KEYWORDS, DIET_KEYWORDS,
    EXPERIENCE_KEYWORDS, FOCUS_KEYWORDS, GOAL_KEYWORDS, INJURY_CUES, INJURY_KEYWORDS,
    INTENSITY_KEYWORDS, NEGATION_CUES, SEX_KEYWORDS,
};
use super::IntakeRecord;
use crate::advisory::{consult, pick_candidate, AdvisoryProvider, NoAdvisor, TASK_GOAL_INFERENCE};

static NO_ADVISOR: NoAdvisor = NoAdvisor;

/// Sessions per week when none are stated
pub const DEFAULT_SESSIONS_PER_WEEK: u8 = 4;
/// Session length when none is stated (minutes)
pub const DEFAULT_SESSION_MINUTES: u32 = 60;

const GOALS: [PrimaryGoal; 5] = [
    PrimaryGoal::FatLoss,
    PrimaryGoal::MuscleGain,
    PrimaryGoal::Maintenance,
    PrimaryGoal::Recomposition,
    PrimaryGoal::Performance,
];

/// Words after "I'm 82" that mean the number is not an age
const NON_AGE_UNITS: &[&str] = &[
    "kg", "kgs", "kilos", "lb", "lbs", "pounds", "cm", "percent", "minutes", "min", "mins",
];

// ============================================================================
// Transcript patterns
// ============================================================================

static AGE_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: 28 years old, 34-year-old, 41 yo
    Regex::new(r"(?i)\b(\d{2})\s*(?:-\s*)?(?:years?|yrs?)[\s-]*old\b|\b(\d{2})\s*(?:yo|y/o)\b").ok()
});

static AGE_INTRO_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: I'm 28, I am a 45, age: 52
    Regex::new(r"(?i)\b(?:i am|i'm|im|aged?)\s*:?\s*(?:a\s+)?(\d{2})\b\s*([a-z]*)").ok()
});

static WEIGHT_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: 82 kg, 180 lbs, 95.5 kilos
    Regex::new(r"(?i)\b(\d{2,3}(?:\.\d+)?)\s*(kg|kgs|kilos?|kilograms?|lbs?|pounds?)\b").ok()
});

static TARGET_WEIGHT_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: get down to 75 kg, reach 160 lbs, goal weight of 70
    Regex::new(
        r"(?i)\b(?:get (?:down |up )?to|reach|down to|up to|goal weight(?: of| is)?|target weight(?: of| is)?)\s*(\d{2,3}(?:\.\d+)?)\s*(kg|kgs|kilos?|kilograms?|lbs?|pounds?)?",
    )
    .ok()
});

static HEIGHT_CM_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: 178 cm, 165.5 centimeters
    Regex::new(r"(?i)\b(\d{3}(?:\.\d+)?)\s*(?:cm|centimeters?|centimetres?)\b").ok()
});

static HEIGHT_FT_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: 5'10, 5 ft 10 in, 6 feet
    Regex::new(r#"(?i)\b([4-7])\s*(?:'|ft|feet|foot)\s*(?:(\d{1,2})\s*(?:"|in\b|inches\b)?)?"#).ok()
});

static BODY_FAT_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: 18% body fat, body fat is around 22 %
    Regex::new(
        r"(?i)\b(\d{1,2}(?:\.\d+)?)\s*(?:%|percent)\s*(?:body\s*fat|bf)\b|\bbody\s*fat\s*(?:is|of|at)?\s*(?:around|about)?\s*(\d{1,2}(?:\.\d+)?)\s*(?:%|percent)",
    )
    .ok()
});

static SESSIONS_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: 4 days a week, 3x per week, 5 sessions/week
    Regex::new(
        r"(?i)\b([1-7])\s*(?:x|times|days|sessions|workouts)\s*(?:a|per|each|every|/)\s*week\b",
    )
    .ok()
});

static MINUTES_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: 45 minutes, 60 min, 90-minute
    Regex::new(r"(?i)\b(\d{2,3})\s*-?\s*(?:min|mins|minutes?)\b").ok()
});

static HOURS_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: an hour, 1.5 hours, two hours
    Regex::new(r"(?i)\b(an|one|1|1\.5|two|2)\s*-?\s*hours?\b").ok()
});

static TIMELINE_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: in 12 weeks, within 3 months
    Regex::new(r"(?i)\b(?:in|within|over|by)\s+(\d{1,2})\s*(weeks?|months?)\b").ok()
});

static TRAINING_YEARS_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: 3 years of lifting, training for 2 years
    Regex::new(
        r"(?i)\b(\d{1,2}(?:\.\d+)?)\s*(?:years?|yrs?)\s+(?:of\s+)?(?:training|lifting|experience)|\b(?:lifting|training)\s+(?:for\s+)?(\d{1,2}(?:\.\d+)?)\s*(?:years?|yrs?)",
    )
    .ok()
});

// ============================================================================
// Warnings
// ============================================================================

#[derive(Debug, Default)]
struct Warnings(Vec<String>);

impl Warnings {
    fn inferred(&mut self, field: &str, value: impl Debug) {
        self.0
            .push(format!("{field} inferred from conversation: {value:?}"));
    }

    fn defaulted(&mut self, field: &str, value: impl Debug) {
        self.0
            .push(format!("{field} not provided; defaulting to {value:?}"));
    }

    fn unrecognized(&mut self, field: &str, raw: &str) {
        self.0
            .push(format!("Could not interpret {field} \"{}\"; ignoring it", raw.trim()));
    }

    fn push(&mut self, message: String) {
        self.0.push(message);
    }
}

/// Free-text transcript split into sentences
struct Transcript {
    text: String,
    sentences: Vec<String>,
}

impl Transcript {
    fn new(text: Option<&str>) -> Self {
        let text = text.unwrap_or_default().trim().to_owned();
        let sentences = text
            .split(['.', '!', '?', ';', '\n'])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect();
        Self { text, sentences }
    }

    fn text(&self) -> Option<&str> {
        (!self.text.is_empty()).then_some(self.text.as_str())
    }

    /// Sentences containing one of `cues` and, when `affirmative`, no negation
    fn sentences_with<'t>(
        &'t self,
        cues: &'t [&'t str],
        affirmative: bool,
    ) -> impl Iterator<Item = &'t str> {
        self.sentences.iter().map(String::as_str).filter(move |s| {
            (cues.is_empty() || has_cue(cues, s)) && !(affirmative && has_cue(NEGATION_CUES, s))
        })
    }
}

// ============================================================================
// Adapter
// ============================================================================

/// Translates loosely structured intake into a normalized profile
pub struct IntakeAdapter<'a> {
    advisor: &'a dyn AdvisoryProvider,
}

impl Default for IntakeAdapter<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl IntakeAdapter<'static> {
    /// Adapter without advisory inference
    #[must_use]
    pub const fn new() -> Self {
        Self {
            advisor: &NO_ADVISOR,
        }
    }
}

impl<'a> IntakeAdapter<'a> {
    /// Adapter consulting `advisor` when the goal cannot be read from the record
    #[must_use]
    pub const fn with_advisor(advisor: &'a dyn AdvisoryProvider) -> Self {
        Self { advisor }
    }

    /// Resolve a record into a profile plus warnings
    ///
    /// # Errors
    ///
    /// - `PlanError::MissingField` when age, sex, weight or height cannot be found
    /// - `PlanError::Validation` when a resolved value is out of range
    pub fn adapt(&self, record: &IntakeRecord) -> PlanResult<(IntakeProfile, Vec<String>)> {
        let transcript = Transcript::new(record.transcript.as_deref());
        let mut warnings = Warnings::default();

        let demographics = resolve_demographics(record, &transcript, &mut warnings)?;
        let goal = self.resolve_goal(record, &transcript, &mut warnings);
        let schedule = resolve_schedule(record, &transcript, goal.primary, &mut warnings);
        let nutrition = resolve_nutrition(record, &transcript, &mut warnings);
        let medical = resolve_medical(record, &transcript, &mut warnings);

        let profile = IntakeProfile {
            user_id: record.user_id,
            demographics,
            goal,
            schedule,
            nutrition,
            medical,
            modality: record.modality.clone(),
        };
        profile.validate()?;

        info!(
            goal = ?profile.goal.primary,
            warnings = warnings.0.len(),
            "intake adapted"
        );
        Ok((profile, warnings.0))
    }

    fn resolve_goal(
        &self,
        record: &IntakeRecord,
        transcript: &Transcript,
        warnings: &mut Warnings,
    ) -> GoalSpec {
        let primary = resolve_keyword(
            "Primary goal",
            record.goal.as_deref(),
            GOAL_KEYWORDS,
            transcript.text(),
            warnings,
        )
        .or_else(|| {
            let context = [record.goal.as_deref(), transcript.text()]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join("\n");
            let goal = self.advise_goal(&context)?;
            warnings.push(format!(
                "Primary goal inferred by advisory service: {}",
                goal.label()
            ));
            Some(goal)
        })
        .unwrap_or_else(|| {
            warnings.defaulted("Primary goal", PrimaryGoal::Maintenance);
            PrimaryGoal::Maintenance
        });

        let target_weight_kg = record.target_weight_kg.or_else(|| {
            let target = transcript.text().and_then(|t| weights_in(t).1)?;
            warnings.inferred("Target weight (kg)", target);
            Some(target)
        });
        let timeline_weeks = record.timeline_weeks.or_else(|| {
            let weeks = transcript.text().and_then(timeline_from)?;
            warnings.inferred("Timeline (weeks)", weeks);
            Some(weeks)
        });

        GoalSpec {
            primary,
            target_weight_kg,
            timeline_weeks,
        }
    }

    fn advise_goal(&self, context: &str) -> Option<PrimaryGoal> {
        if context.trim().is_empty() {
            return None;
        }
        let labels: Vec<&str> = GOALS.iter().map(PrimaryGoal::label).collect();
        let prompt = format!(
            "Classify the client's primary fitness goal. Answer with exactly one of: {}.\n\nClient statements:\n{context}",
            labels.join(", ")
        );
        let response = consult(self.advisor, TASK_GOAL_INFERENCE, &prompt)?;
        let index = pick_candidate(&response, &labels);
        if index.is_none() {
            debug!("advisory goal response did not name a known goal");
        }
        GOALS.get(index?).copied()
    }
}

/// Structured value through the keyword table, then the transcript
fn resolve_keyword<T: Clone + Debug>(
    field: &str,
    structured: Option<&str>,
    table: &[(&str, T)],
    transcript: Option<&str>,
    warnings: &mut Warnings,
) -> Option<T> {
    if let Some(raw) = structured {
        if let Some(value) = lookup(table, raw) {
            return Some(value);
        }
        warnings.unrecognized(field, raw);
    }
    let value = lookup(table, transcript?)?;
    warnings.inferred(field, &value);
    Some(value)
}

// ============================================================================
// Demographics
// ============================================================================

fn resolve_demographics(
    record: &IntakeRecord,
    transcript: &Transcript,
    warnings: &mut Warnings,
) -> PlanResult<Demographics> {
    let text = transcript.text();

    let age = match record.age {
        Some(age) => age,
        None => {
            let age = text
                .and_then(age_from)
                .ok_or_else(|| PlanError::missing("demographics.age"))?;
            warnings.inferred("Age", age);
            age
        }
    };

    let sex = resolve_keyword("Sex", record.sex.as_deref(), SEX_KEYWORDS, text, warnings)
        .ok_or_else(|| PlanError::missing("demographics.sex"))?;

    let weight_kg = match record
        .weight_kg
        .or_else(|| record.weight_lb.map(|lb| round1(lb * KG_PER_POUND)))
    {
        Some(weight) => weight,
        None => {
            let weight = text
                .and_then(|t| weights_in(t).0)
                .ok_or_else(|| PlanError::missing("demographics.weight_kg"))?;
            warnings.inferred("Weight (kg)", weight);
            weight
        }
    };

    let height_cm = match record
        .height_cm
        .or_else(|| record.height_in.map(|inches| round1(inches * CM_PER_INCH)))
    {
        Some(height) => height,
        None => {
            let height = text
                .and_then(height_from)
                .ok_or_else(|| PlanError::missing("demographics.height_cm"))?;
            warnings.inferred("Height (cm)", height);
            height
        }
    };

    let body_fat_percent = record.body_fat_percent.or_else(|| {
        let bf = text.and_then(body_fat_from)?;
        warnings.inferred("Body fat (%)", bf);
        Some(bf)
    });

    Ok(Demographics {
        age,
        sex,
        weight_kg,
        height_cm,
        body_fat_percent,
    })
}

// ============================================================================
// Schedule
// ============================================================================

fn resolve_schedule(
    record: &IntakeRecord,
    transcript: &Transcript,
    goal: PrimaryGoal,
    warnings: &mut Warnings,
) -> TrainingSchedule {
    let text = transcript.text();

    let sessions_per_week = record.sessions_per_week.unwrap_or_else(|| {
        if let Some(sessions) = text.and_then(|t| first_capture::<u8>(&SESSIONS_PATTERN, t)) {
            warnings.inferred("Sessions per week", sessions);
            sessions
        } else {
            warnings.defaulted("Sessions per week", DEFAULT_SESSIONS_PER_WEEK);
            DEFAULT_SESSIONS_PER_WEEK
        }
    });

    let session_minutes = record.session_minutes.unwrap_or_else(|| {
        if let Some(minutes) = text.and_then(minutes_from) {
            warnings.inferred("Session length (minutes)", minutes);
            minutes
        } else {
            warnings.defaulted("Session length (minutes)", DEFAULT_SESSION_MINUTES);
            DEFAULT_SESSION_MINUTES
        }
    });

    let available_days = resolve_days(&record.available_days, text, warnings);

    let transcript_years = text.and_then(|t| first_capture::<f64>(&TRAINING_YEARS_PATTERN, t));
    let experience = resolve_experience(record, text, transcript_years, warnings);
    let training_years = record
        .training_years
        .or(transcript_years)
        .unwrap_or_else(|| {
            let years = experience.min_training_years();
            warnings.defaulted("Training years", years);
            years
        });
    if let (None, Some(years)) = (record.training_years, transcript_years) {
        warnings.inferred("Training years", years);
    }

    let focus = resolve_keyword(
        "Training focus",
        record.focus.as_deref(),
        FOCUS_KEYWORDS,
        text,
        warnings,
    )
    .unwrap_or_else(|| {
        let focus = TrainingFocus::default_for_goal(goal);
        warnings.defaulted("Training focus", focus);
        focus
    });

    let intensity = resolve_intensity(record.intensity.as_deref(), warnings);

    TrainingSchedule {
        sessions_per_week,
        available_days,
        session_minutes,
        experience,
        training_years,
        focus,
        intensity,
    }
}

fn resolve_days(structured: &[String], text: Option<&str>, warnings: &mut Warnings) -> Vec<Weekday> {
    let mut days: Vec<Weekday> = Vec::new();
    for raw in structured {
        let found = days_in(raw, true);
        if found.is_empty() {
            warnings.unrecognized("available day", raw);
        }
        for day in found {
            push_unique(&mut days, day);
        }
    }
    if !days.is_empty() {
        days.sort_by_key(Weekday::num_days_from_monday);
        return days;
    }

    if let Some(found) = text.map(|t| days_in(t, false)).filter(|d| !d.is_empty()) {
        warnings.inferred("Available days", &found);
        return found;
    }
    warnings.defaulted("Available days", "every day");
    ALL_DAYS.to_vec()
}

fn resolve_experience(
    record: &IntakeRecord,
    text: Option<&str>,
    transcript_years: Option<f64>,
    warnings: &mut Warnings,
) -> ExperienceLevel {
    if let Some(raw) = record.experience.as_deref() {
        if let Some(level) = lookup(EXPERIENCE_KEYWORDS, raw) {
            return level;
        }
        warnings.unrecognized("experience", raw);
    }
    if let Some(years) = record.training_years {
        return ExperienceLevel::from_training_years(years);
    }
    if let Some(level) = text.and_then(|t| lookup(EXPERIENCE_KEYWORDS, t)) {
        warnings.inferred("Experience", level);
        return level;
    }
    if let Some(years) = transcript_years {
        let level = ExperienceLevel::from_training_years(years);
        warnings.inferred("Experience", level);
        return level;
    }
    warnings.defaulted("Experience", ExperienceLevel::Beginner);
    ExperienceLevel::Beginner
}

fn resolve_intensity(structured: Option<&str>, warnings: &mut Warnings) -> TrainingIntensity {
    let Some(raw) = structured else {
        warnings.defaulted("Training intensity", TrainingIntensity::Moderate);
        return TrainingIntensity::Moderate;
    };
    let normalized = normalize(raw);
    let found = INTENSITY_KEYWORDS
        .iter()
        .enumerate()
        .find(|(_, (phrase, _))| contains_phrase(&normalized, phrase));
    match found {
        Some((index, &(_, intensity))) => {
            if index >= CANONICAL_INTENSITY_LABELS {
                warnings.push(format!(
                    "Unusual intensity \"{}\" interpreted as {intensity:?}",
                    raw.trim()
                ));
            }
            intensity
        }
        None => {
            warnings.unrecognized("intensity", raw);
            warnings.defaulted("Training intensity", TrainingIntensity::Moderate);
            TrainingIntensity::Moderate
        }
    }
}

// ============================================================================
// Nutrition and medical
// ============================================================================

fn resolve_nutrition(
    record: &IntakeRecord,
    transcript: &Transcript,
    warnings: &mut Warnings,
) -> NutritionPreferences {
    let preference = resolve_keyword(
        "Dietary preference",
        record.dietary_preference.as_deref(),
        DIET_KEYWORDS,
        transcript.text(),
        warnings,
    )
    .unwrap_or_else(|| {
        warnings.defaulted("Dietary preference", DietaryPreference::Omnivore);
        DietaryPreference::Omnivore
    });

    let mut allergies: Vec<String> = Vec::new();
    for raw in &record.allergies {
        let tags = lookup_all(ALLERGEN_KEYWORDS, raw);
        if tags.is_empty() {
            let keyword = raw.trim().to_lowercase();
            if !keyword.is_empty() {
                push_unique(&mut allergies, keyword);
            }
        }
        for tag in tags {
            push_unique(&mut allergies, tag.to_owned());
        }
    }
    let mut inferred = Vec::new();
    for tag in transcript
        .sentences_with(ALLERGY_CUES, false)
        .flat_map(|s| lookup_all(ALLERGEN_KEYWORDS, s))
    {
        if push_unique(&mut allergies, tag.to_owned()) {
            inferred.push(tag);
        }
    }
    if !inferred.is_empty() {
        warnings.inferred("Allergies", &inferred);
    }

    NutritionPreferences {
        preference,
        allergies,
    }
}

fn resolve_medical(
    record: &IntakeRecord,
    transcript: &Transcript,
    warnings: &mut Warnings,
) -> MedicalProfile {
    let mut conditions: Vec<MedicalCondition> = record
        .conditions
        .iter()
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| {
            lookup(CONDITION_KEYWORDS, raw)
                .unwrap_or_else(|| MedicalCondition::Other(raw.trim().to_owned()))
        })
        .collect();
    let mut inferred_conditions = Vec::new();
    for condition in transcript
        .sentences_with(&[], true)
        .flat_map(|s| lookup_all(CONDITION_KEYWORDS, s))
    {
        let label = condition.label().to_owned();
        if push_unique(&mut conditions, condition) {
            inferred_conditions.push(label);
        }
    }
    if !inferred_conditions.is_empty() {
        warnings.inferred("Medical conditions", &inferred_conditions);
    }

    let mut injuries: Vec<BodyRegion> = Vec::new();
    for raw in &record.injuries {
        match lookup(INJURY_KEYWORDS, raw) {
            Some(region) if !injuries.contains(&region) => injuries.push(region),
            Some(_) => {}
            None => warnings.unrecognized("injury", raw),
        }
    }
    let mut inferred_injuries = Vec::new();
    for region in transcript
        .sentences_with(INJURY_CUES, true)
        .flat_map(|s| lookup_all(INJURY_KEYWORDS, s))
    {
        if push_unique(&mut injuries, region) {
            inferred_injuries.push(region);
        }
    }
    if !inferred_injuries.is_empty() {
        warnings.inferred("Injuries", &inferred_injuries);
    }

    let doctor_clearance = record.doctor_clearance.unwrap_or_else(|| {
        if transcript.text().is_some_and(|t| has_cue(CLEARANCE_KEYWORDS, t)) {
            warnings.inferred("Doctor clearance", true);
            true
        } else {
            warnings.defaulted("Doctor clearance", false);
            false
        }
    });

    MedicalProfile {
        conditions,
        medications: record
            .medications
            .iter()
            .map(|m| m.trim().to_owned())
            .filter(|m| !m.is_empty())
            .collect(),
        injuries,
        doctor_clearance,
    }
}

// ============================================================================
// Pattern extraction
// ============================================================================

fn first_capture<T: FromStr>(pattern: &LazyLock<Option<Regex>>, text: &str) -> Option<T> {
    let caps = pattern.as_ref()?.captures(text)?;
    caps.iter()
        .skip(1)
        .flatten()
        .find_map(|m| m.as_str().parse().ok())
}

fn age_from(text: &str) -> Option<u32> {
    if let Some(age) = first_capture::<u32>(&AGE_PATTERN, text) {
        return Some(age);
    }
    AGE_INTRO_PATTERN.as_ref()?.captures_iter(text).find_map(|caps| {
        let unit = caps.get(2).map_or("", |m| m.as_str()).to_lowercase();
        if NON_AGE_UNITS.contains(&unit.as_str()) {
            return None;
        }
        caps.get(1)?.as_str().parse().ok()
    })
}

fn to_kg(value: f64, unit: &str) -> f64 {
    let unit = unit.to_lowercase();
    if unit.starts_with("lb") || unit.starts_with("pound") {
        round1(value * KG_PER_POUND)
    } else {
        value
    }
}

/// Current and target body weight (kg) mentioned in the text
fn weights_in(text: &str) -> (Option<f64>, Option<f64>) {
    let mut target_span: Option<Range<usize>> = None;
    let target = TARGET_WEIGHT_PATTERN
        .as_ref()
        .and_then(|re| re.captures(text))
        .and_then(|caps| {
            let whole = caps.get(0)?;
            let value: f64 = caps.get(1)?.as_str().parse().ok()?;
            target_span = Some(whole.range());
            Some(to_kg(value, caps.get(2).map_or("kg", |m| m.as_str())))
        });

    let current = WEIGHT_PATTERN.as_ref().and_then(|re| {
        re.captures_iter(text).find_map(|caps| {
            let whole = caps.get(0)?;
            if target_span
                .as_ref()
                .is_some_and(|span| span.start <= whole.start() && whole.start() < span.end)
            {
                return None;
            }
            let value: f64 = caps.get(1)?.as_str().parse().ok()?;
            Some(to_kg(value, caps.get(2)?.as_str()))
        })
    });
    (current, target)
}

fn height_from(text: &str) -> Option<f64> {
    if let Some(cm) = first_capture::<f64>(&HEIGHT_CM_PATTERN, text) {
        return Some(cm);
    }
    let caps = HEIGHT_FT_PATTERN.as_ref()?.captures(text)?;
    let feet: f64 = caps.get(1)?.as_str().parse().ok()?;
    let inches: f64 = caps
        .get(2)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0.0);
    Some(round1(feet.mul_add(12.0, inches) * CM_PER_INCH))
}

fn body_fat_from(text: &str) -> Option<f64> {
    first_capture::<f64>(&BODY_FAT_PATTERN, text)
}

fn minutes_from(text: &str) -> Option<u32> {
    if let Some(minutes) = first_capture::<u32>(&MINUTES_PATTERN, text) {
        return Some(minutes);
    }
    let caps = HOURS_PATTERN.as_ref()?.captures(text)?;
    match caps.get(1)?.as_str().to_lowercase().as_str() {
        "an" | "one" | "1" => Some(60),
        "1.5" => Some(90),
        "two" | "2" => Some(120),
        _ => None,
    }
}

fn timeline_from(text: &str) -> Option<u32> {
    let caps = TIMELINE_PATTERN.as_ref()?.captures(text)?;
    let amount: u32 = caps.get(1)?.as_str().parse().ok()?;
    let unit = caps.get(2)?.as_str().to_lowercase();
    if unit.starts_with("month") {
        Some((f64::from(amount) * 4.345).round() as u32)
    } else {
        Some(amount)
    }
}

/// Append unless already present; reports whether it was added
fn push_unique<T: PartialEq>(items: &mut Vec<T>, item: T) -> bool {
    if items.contains(&item) {
        return false;
    }
    items.push(item);
    true
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
