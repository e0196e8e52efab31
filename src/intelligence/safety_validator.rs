// ABOUTME: Pre-participation safety gate producing an ok, warning or blocked verdict
// ABOUTME: Age, medical history, clearance, BMI, proposed rate of loss and intensity rules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Safety validation
//!
//! A pure function of the profile and the proposed weekly change. Rules only
//! ever add findings and the verdict takes the most severe one, so adding a
//! risk factor can never relax the outcome.

use coachplan_core::models::{
    IntakeProfile, MedicalCondition, PrimaryGoal, SafetyFinding, SafetyLevel, SafetyVerdict,
    TrainingIntensity,
};
use tracing::{debug, info};

use crate::config::intelligence::SafetyConfig;

const CLEARANCE: &str = "Obtain physician clearance before starting the program";

#[derive(Default)]
struct Findings(Vec<SafetyFinding>);

impl Findings {
    fn add(&mut self, rule: &str, severity: SafetyLevel, detail: String, modification: &str) {
        self.0.push(SafetyFinding {
            rule: rule.to_owned(),
            severity,
            detail,
            modification: modification.to_owned(),
        });
    }

    fn level(&self) -> SafetyLevel {
        self.0
            .iter()
            .map(|f| f.severity)
            .max()
            .unwrap_or(SafetyLevel::Ok)
    }
}

/// Validate the profile against the safety rules
///
/// `proposed_weekly_change_percent` is the signed weekly body-weight change
/// the plan would prescribe, as a percentage of current weight.
#[must_use]
pub fn validate_safety(
    profile: &IntakeProfile,
    proposed_weekly_change_percent: f64,
    config: &SafetyConfig,
) -> SafetyVerdict {
    let mut findings = Findings::default();
    let demo = &profile.demographics;
    let medical = &profile.medical;
    let cleared = medical.doctor_clearance;
    let in_deficit = proposed_weekly_change_percent < 0.0
        || matches!(
            profile.goal.primary,
            PrimaryGoal::FatLoss | PrimaryGoal::Recomposition
        );

    check_age(&mut findings, demo.age, cleared, config);

    for condition in &medical.conditions {
        if condition.is_contraindicating() {
            let severity = if cleared {
                SafetyLevel::Warning
            } else {
                SafetyLevel::Blocked
            };
            findings.add(
                "contraindicated_condition",
                severity,
                format!("{} requires medical oversight", condition.label()),
                if cleared {
                    "Follow the limits set by your physician"
                } else {
                    CLEARANCE
                },
            );
        } else {
            findings.add(
                "medical_condition",
                SafetyLevel::Warning,
                format!("{} reported", condition.label()),
                condition_modification(condition),
            );
        }
        if in_deficit
            && matches!(
                condition,
                MedicalCondition::Pregnancy | MedicalCondition::EatingDisorderHistory
            )
        {
            findings.add(
                "deficit_contraindicated",
                SafetyLevel::Blocked,
                format!("a calorie deficit is not appropriate with {}", condition.label()),
                "Choose a maintenance goal under clinical supervision",
            );
        }
    }

    let bmi = demo.bmi();
    if bmi < config.bmi_block {
        findings.add(
            "bmi_underweight",
            SafetyLevel::Blocked,
            format!("BMI {bmi:.1} is below {:.1}", config.bmi_block),
            "Seek medical and dietetic assessment before training",
        );
    } else if bmi < config.bmi_fat_loss_block && profile.goal.primary == PrimaryGoal::FatLoss {
        findings.add(
            "bmi_fat_loss",
            SafetyLevel::Blocked,
            format!(
                "BMI {bmi:.1} is below {:.1}; further fat loss is unsafe",
                config.bmi_fat_loss_block
            ),
            "Choose a maintenance or muscle gain goal",
        );
    }

    let weekly_loss = -proposed_weekly_change_percent;
    if weekly_loss > config.weekly_loss_block_percent {
        findings.add(
            "rate_of_loss",
            SafetyLevel::Blocked,
            format!(
                "{weekly_loss:.2}% of body weight per week exceeds {:.1}%",
                config.weekly_loss_block_percent
            ),
            "Extend the timeline or raise the target weight",
        );
    } else if weekly_loss > config.weekly_loss_warning_percent {
        findings.add(
            "rate_of_loss",
            SafetyLevel::Warning,
            format!("{weekly_loss:.2}% of body weight per week is aggressive"),
            "Monitor energy, sleep and strength; slow the rate if they decline",
        );
    }

    let hypertensive = medical
        .conditions
        .iter()
        .any(|c| *c == MedicalCondition::Hypertension);
    if profile.schedule.intensity == TrainingIntensity::High
        && !cleared
        && (demo.age >= config.high_intensity_warning_age || hypertensive)
    {
        findings.add(
            "high_intensity",
            SafetyLevel::Warning,
            "high intensity requested without clearance".to_owned(),
            "Keep sessions at moderate intensity until cleared",
        );
    }

    for medication in &medical.medications {
        let lowered = medication.to_lowercase();
        for advisory in &config.medication_advisories {
            if lowered.contains(&advisory.keyword) {
                findings.add(
                    "medication",
                    SafetyLevel::Warning,
                    format!("{medication} reported"),
                    &advisory.advisory,
                );
            }
        }
    }

    for region in &medical.injuries {
        findings.add(
            "injury",
            SafetyLevel::Warning,
            format!("{} injury reported", region.label()),
            "Exercises loading the injured area are substituted",
        );
    }

    let level = findings.level();
    debug!(?level, findings = findings.0.len(), "safety rules evaluated");
    build_verdict(level, findings.0)
}

fn check_age(findings: &mut Findings, age: u32, cleared: bool, config: &SafetyConfig) {
    if age < config.min_unsupervised_age {
        findings.add(
            "age_minor",
            if cleared {
                SafetyLevel::Warning
            } else {
                SafetyLevel::Blocked
            },
            format!("age {age} is below {}", config.min_unsupervised_age),
            "Train only under qualified supervision with guardian and physician approval",
        );
    } else if age < config.adult_age {
        findings.add(
            "age_adolescent",
            SafetyLevel::Warning,
            format!("age {age} is under {}", config.adult_age),
            "Train under qualified supervision and prioritise technique",
        );
    } else if age >= config.max_unsupervised_age {
        findings.add(
            "age_senior",
            if cleared {
                SafetyLevel::Warning
            } else {
                SafetyLevel::Blocked
            },
            format!("age {age} is {} or older", config.max_unsupervised_age),
            CLEARANCE,
        );
    }
}

fn condition_modification(condition: &MedicalCondition) -> &'static str {
    match condition {
        MedicalCondition::Hypertension => "Avoid breath holding and monitor blood pressure",
        MedicalCondition::Type2Diabetes => "Monitor blood glucose around sessions",
        MedicalCondition::Asthma => "Keep a reliever inhaler at hand and warm up gradually",
        MedicalCondition::Osteoporosis => "Avoid high-impact and spinal-flexion loading",
        _ => "Discuss the program with your physician",
    }
}

fn build_verdict(level: SafetyLevel, findings: Vec<SafetyFinding>) -> SafetyVerdict {
    let mut modifications: Vec<String> = Vec::new();
    for finding in &findings {
        if finding.severity >= level && !modifications.contains(&finding.modification) {
            modifications.push(finding.modification.clone());
        }
    }
    for finding in &findings {
        if !modifications.contains(&finding.modification) {
            modifications.push(finding.modification.clone());
        }
    }
    match level {
        SafetyLevel::Ok => SafetyVerdict::Ok {
            message: "No safety concerns identified".to_owned(),
        },
        SafetyLevel::Warning => SafetyVerdict::Warning {
            message: format!("{} safety consideration(s) apply", findings.len()),
            required_modifications: modifications,
            findings,
        },
        SafetyLevel::Blocked => {
            let blocking: Vec<&str> = findings
                .iter()
                .filter(|f| f.severity == SafetyLevel::Blocked)
                .map(|f| f.detail.as_str())
                .collect();
            info!(reasons = blocking.len(), "safety validation blocked generation");
            SafetyVerdict::Blocked {
                message: format!("Plan generation blocked: {}", blocking.join("; ")),
                required_modifications: modifications,
                findings,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use coachplan_core::models::{
        BiologicalSex, BodyRegion, Demographics, ExperienceLevel, GoalSpec, MedicalProfile,
        NutritionPreferences, TrainingFocus, TrainingSchedule,
    };

    fn profile(age: u32) -> IntakeProfile {
        IntakeProfile {
            user_id: None,
            demographics: Demographics {
                age,
                sex: BiologicalSex::Female,
                weight_kg: 65.0,
                height_cm: 168.0,
                body_fat_percent: None,
            },
            goal: GoalSpec::default(),
            schedule: TrainingSchedule {
                sessions_per_week: 3,
                available_days: vec![Weekday::Mon, Weekday::Wed, Weekday::Fri],
                session_minutes: 45,
                experience: ExperienceLevel::Beginner,
                training_years: 0.0,
                focus: TrainingFocus::General,
                intensity: TrainingIntensity::Moderate,
            },
            nutrition: NutritionPreferences::default(),
            medical: MedicalProfile::default(),
            modality: None,
        }
    }

    #[test]
    fn test_healthy_adult_is_ok() {
        let verdict = validate_safety(&profile(35), 0.0, &SafetyConfig::default());
        assert_eq!(verdict.level(), SafetyLevel::Ok);
    }

    #[test]
    fn test_uncleared_cardiac_condition_blocks() {
        let mut p = profile(45);
        p.medical.conditions.push(MedicalCondition::CardiovascularDisease);
        let verdict = validate_safety(&p, 0.0, &SafetyConfig::default());
        assert!(verdict.is_blocked());
        assert!(verdict
            .required_modifications()
            .iter()
            .any(|m| m.contains("clearance")));
    }

    #[test]
    fn test_clearance_downgrades_condition_to_warning() {
        let mut p = profile(45);
        p.medical.conditions.push(MedicalCondition::CardiovascularDisease);
        p.medical.doctor_clearance = true;
        assert_eq!(
            validate_safety(&p, 0.0, &SafetyConfig::default()).level(),
            SafetyLevel::Warning
        );
    }

    #[test]
    fn test_rate_of_loss_thresholds() {
        let config = SafetyConfig::default();
        assert_eq!(validate_safety(&profile(35), -1.2, &config).level(), SafetyLevel::Warning);
        assert!(validate_safety(&profile(35), -2.0, &config).is_blocked());
    }

    #[test]
    fn test_pregnancy_with_deficit_blocked_even_when_cleared() {
        let mut p = profile(30);
        p.medical.conditions.push(MedicalCondition::Pregnancy);
        p.medical.doctor_clearance = true;
        p.goal.primary = PrimaryGoal::FatLoss;
        assert!(validate_safety(&p, -0.5, &SafetyConfig::default()).is_blocked());
    }

    #[test]
    fn test_injury_and_medication_warn() {
        let mut p = profile(40);
        p.medical.injuries.push(BodyRegion::Knee);
        p.medical.medications.push("Metoprolol 50mg".to_owned());
        let verdict = validate_safety(&p, 0.0, &SafetyConfig::default());
        assert_eq!(verdict.level(), SafetyLevel::Warning);
        assert_eq!(verdict.findings().len(), 2);
    }

    #[test]
    fn test_adolescent_warns() {
        assert_eq!(
            validate_safety(&profile(17), 0.0, &SafetyConfig::default()).level(),
            SafetyLevel::Warning
        );
        assert!(validate_safety(&profile(14), 0.0, &SafetyConfig::default()).is_blocked());
    }
}
