// ABOUTME: Weekly placement of endurance, interval and sport sessions around resistance training
// ABOUTME: Recovery headroom cap, fixed-time reservations, facility checks, weekend long sessions and taper
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Modality Planner Module
//!
//! Supplementary sessions are placed heuristically. The weekly total is capped
//! at `recovery_headroom - resistance_sessions` so lifting recovery is
//! preserved. Fixed-time sessions go in first and reserve their hour windows,
//! then flexible targets fill the remaining free windows. Nothing here ever
//! fails; sessions that cannot be placed become warnings.

use chrono::{NaiveDate, Weekday};
use coachplan_core::models::{
    IntensityTarget, IntervalStructure, Modality, ModalityKind, ModalityPreferences,
    MultimodalSession, TimeOfDay, TimeWindow, UpcomingEvent,
};
use tracing::debug;

use crate::config::intelligence::ModalityConfig;

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

const WEEKEND: [Weekday; 2] = [Weekday::Sat, Weekday::Sun];

/// Inputs to modality planning
#[derive(Debug, Clone, Copy)]
pub struct ModalityRequest<'a> {
    /// User preferences; `None` plans only the general-health session
    pub preferences: Option<&'a ModalityPreferences>,
    /// Days carrying a resistance session
    pub resistance_days: &'a [Weekday],
    /// First plan day, used for the taper window
    pub valid_from: NaiveDate,
}

/// Supplementary session planner
pub struct ModalityPlanner<'a> {
    config: &'a ModalityConfig,
}

/// Mutable placement state for one week
struct Week<'r> {
    reserved: Vec<TimeWindow>,
    sessions: Vec<MultimodalSession>,
    resistance_days: &'r [Weekday],
}

impl Week<'_> {
    fn is_free(&self, window: &TimeWindow) -> bool {
        !self.reserved.iter().any(|w| w.overlaps(window))
    }

    fn has_session_on(&self, day: Weekday) -> bool {
        self.sessions.iter().any(|s| s.day == day)
    }

    fn has_modality_on(&self, modality: Modality, day: Weekday) -> bool {
        self.sessions
            .iter()
            .any(|s| s.day == day && s.modality == modality)
    }
}

impl<'a> ModalityPlanner<'a> {
    /// Create a planner
    #[must_use]
    pub const fn new(config: &'a ModalityConfig) -> Self {
        Self { config }
    }

    /// Plan one week of supplementary sessions
    ///
    /// Returns the sessions sorted by day and start hour together with
    /// placement warnings.
    #[must_use]
    pub fn plan(&self, request: &ModalityRequest<'_>) -> (Vec<MultimodalSession>, Vec<String>) {
        let defaults = ModalityPreferences::default();
        let preferences = request.preferences.unwrap_or(&defaults);
        let resistance = u8::try_from(request.resistance_days.len()).unwrap_or(u8::MAX);
        let cap = usize::from(self.config.recovery_headroom.saturating_sub(resistance));
        let taper = taper_event(preferences, request.valid_from, self.config.taper_window_days);

        let mut warnings = Vec::new();
        let mut week = Week {
            reserved: preferences.commitments.clone(),
            sessions: Vec::new(),
            resistance_days: request.resistance_days,
        };

        for fixed in &preferences.fixed_sessions {
            let label = fixed.modality.label();
            if week.sessions.len() >= cap {
                warnings.push(format!(
                    "Fixed {label} session on {} skipped: weekly supplementary sessions are capped at {cap} to protect recovery",
                    fixed.day
                ));
                continue;
            }
            if let Some(facility) = fixed.modality.required_facility() {
                if !preferences.facility_available(facility, fixed.day) {
                    warnings.push(format!(
                        "Fixed {label} session on {} skipped: required facility is not available that day",
                        fixed.day
                    ));
                    continue;
                }
            }
            let window = fixed.window();
            if !week.is_free(&window) {
                warnings.push(format!(
                    "Fixed {label} session on {} at {}:00 skipped: it overlaps another commitment",
                    fixed.day, fixed.start_hour
                ));
                continue;
            }
            let session = self.build_session(
                fixed.modality,
                window,
                fixed.duration_minutes,
                true,
                taper,
            );
            week.reserved.push(window);
            week.sessions.push(session);
        }

        for target in &preferences.targets {
            let wanted = usize::from(target.sessions_per_week);
            let mut placed = 0;
            while placed < wanted {
                if week.sessions.len() >= cap {
                    break;
                }
                let Some(window) =
                    self.find_slot(&week, target.modality, target.duration_minutes, preferences)
                else {
                    break;
                };
                let session = self.build_session(
                    target.modality,
                    window,
                    target.duration_minutes,
                    false,
                    taper,
                );
                week.reserved.push(window);
                week.sessions.push(session);
                placed += 1;
            }
            if placed < wanted {
                warnings.push(format!(
                    "Placed {placed} of {wanted} weekly {} sessions (recovery cap {cap}, free windows and facility access permitting)",
                    target.modality.label()
                ));
            }
        }

        if week.sessions.is_empty() && !preferences.cardio_opt_out {
            if cap == 0 {
                warnings.push(format!(
                    "Default {} session skipped: {resistance} resistance sessions leave no recovery headroom",
                    self.config.default_cardio.label()
                ));
            } else {
                self.add_general_health_session(&mut week, preferences, taper, &mut warnings);
            }
        }

        let mut sessions = week.sessions;
        sessions.sort_by_key(|s| (s.day.num_days_from_monday(), s.start_hour));
        debug!(sessions = sessions.len(), cap, "modality sessions planned");
        (sessions, warnings)
    }

    fn add_general_health_session(
        &self,
        week: &mut Week<'_>,
        preferences: &ModalityPreferences,
        taper: Option<&UpcomingEvent>,
        warnings: &mut Vec<String>,
    ) {
        let modality = self.config.default_cardio;
        let minutes = self.config.default_cardio_minutes;
        if let Some(window) = self.find_slot(week, modality, minutes, preferences) {
            let mut session = self.build_session(modality, window, minutes, false, taper);
            session
                .notes
                .push("General-health cardio session added by default".to_owned());
            week.reserved.push(window);
            week.sessions.push(session);
        } else {
            warnings.push(format!(
                "No free window for the default {minutes}-minute {} session",
                modality.label()
            ));
        }
    }

    /// First free window for a flexible session
    fn find_slot(
        &self,
        week: &Week<'_>,
        modality: Modality,
        duration_minutes: u32,
        preferences: &ModalityPreferences,
    ) -> Option<TimeWindow> {
        let hours_needed = duration_minutes.div_ceil(60).max(1);
        let long = modality.prefers_long_sessions()
            && duration_minutes >= self.config.long_session_minutes;

        candidate_days(week, long)
            .into_iter()
            .filter(|day| !week.has_modality_on(modality, *day))
            .filter(|day| {
                modality
                    .required_facility()
                    .is_none_or(|f| preferences.facility_available(f, *day))
            })
            .find_map(|day| {
                self.config
                    .preferred_start_hours
                    .iter()
                    .filter(|hour| u32::from(**hour) + hours_needed <= 24)
                    .map(|hour| TimeWindow::for_duration(day, *hour, duration_minutes))
                    .find(|window| week.is_free(window))
            })
    }

    fn build_session(
        &self,
        modality: Modality,
        window: TimeWindow,
        duration_minutes: u32,
        fixed_time: bool,
        taper: Option<&UpcomingEvent>,
    ) -> MultimodalSession {
        let kind = modality.kind();
        let (heart_rate_zone, rpe, description) = match kind {
            ModalityKind::Endurance => (2, 4, "Conversational pace, nasal breathing possible"),
            ModalityKind::Hiit => (4, 8, "Hard work intervals with full easy recoveries"),
            ModalityKind::Sport => (3, 6, "Skill focus at moderate effort"),
        };
        let intervals = (kind == ModalityKind::Hiit).then(|| self.intervals(duration_minutes));
        let drills = if kind == ModalityKind::Sport {
            drills_for(modality).iter().map(|d| (*d).to_owned()).collect()
        } else {
            Vec::new()
        };

        let mut session = MultimodalSession {
            kind,
            modality,
            day: window.day,
            time_of_day: TimeOfDay::from_hour(window.start_hour),
            start_hour: window.start_hour,
            end_hour: window.end_hour,
            duration_minutes,
            intensity: IntensityTarget {
                heart_rate_zone,
                rpe,
                description: description.to_owned(),
            },
            intervals,
            drills,
            fixed_time,
            notes: Vec::new(),
        };
        if let Some(event) = taper {
            self.apply_taper(&mut session, event);
        }
        session
    }

    fn intervals(&self, duration_minutes: u32) -> IntervalStructure {
        let cycle = self.config.interval_work_seconds + self.config.interval_rest_seconds;
        let work_time = (duration_minutes * 60).saturating_sub(self.config.interval_overhead_seconds);
        let rounds = if cycle == 0 { 4 } else { work_time / cycle };
        IntervalStructure {
            work_seconds: self.config.interval_work_seconds,
            rest_seconds: self.config.interval_rest_seconds,
            rounds: rounds.clamp(4, 12),
        }
    }

    fn apply_taper(&self, session: &mut MultimodalSession, event: &UpcomingEvent) {
        session.intensity.heart_rate_zone = session.intensity.heart_rate_zone.min(2);
        session.intensity.rpe = session
            .intensity
            .rpe
            .saturating_sub(self.config.taper_rpe_reduction)
            .max(3);
        session.intensity.description = "Taper: easy effort, keep the legs fresh".to_owned();
        session.intervals = None;
        session.notes.push(format!(
            "Taper for {} on {}: intensity reduced and intervals removed",
            event.name, event.date
        ));
    }
}

/// Event inside the taper window counted from the plan start
fn taper_event(
    preferences: &ModalityPreferences,
    valid_from: NaiveDate,
    window_days: i64,
) -> Option<&UpcomingEvent> {
    preferences.upcoming_event.as_ref().filter(|event| {
        let days = (event.date - valid_from).num_days();
        (0..=window_days).contains(&days)
    })
}

/// Days in placement priority
///
/// Long sessions try the weekend first. Otherwise days with neither a
/// resistance nor a supplementary session come first, then days with a
/// resistance session only.
fn candidate_days(week: &Week<'_>, long: bool) -> Vec<Weekday> {
    let rank = |day: Weekday| -> u8 {
        let busy = week.has_session_on(day);
        if long && WEEKEND.contains(&day) {
            0
        } else if !busy && !week.resistance_days.contains(&day) {
            1
        } else if !busy {
            2
        } else {
            3
        }
    };
    let mut days = WEEK.to_vec();
    days.sort_by_key(|day| rank(*day));
    days
}

fn drills_for(modality: Modality) -> &'static [&'static str] {
    match modality {
        Modality::Soccer => &["Rondo passing", "1v1 dribbling", "Small-sided game"],
        Modality::Basketball => &["Form shooting", "Defensive slides", "3-on-3 half court"],
        Modality::Tennis => &["Cross-court rally", "Serve targets", "Split-step footwork"],
        Modality::MartialArts => &["Shadow drilling", "Pad rounds", "Positional sparring"],
        Modality::Climbing => &["Footwork traverses", "Route repeats", "Hangboard technique"],
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coachplan_core::models::{FacilityType, FixedModalitySession, ModalityTarget};
    use std::collections::BTreeMap;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()
    }

    fn plan(
        preferences: Option<&ModalityPreferences>,
        resistance_days: &[Weekday],
    ) -> (Vec<MultimodalSession>, Vec<String>) {
        let config = ModalityConfig::default();
        ModalityPlanner::new(&config).plan(&ModalityRequest {
            preferences,
            resistance_days,
            valid_from: start(),
        })
    }

    fn target(modality: Modality, sessions_per_week: u8, duration_minutes: u32) -> ModalityTarget {
        ModalityTarget {
            modality,
            sessions_per_week,
            duration_minutes,
        }
    }

    fn assert_no_overlaps(sessions: &[MultimodalSession]) {
        for (i, a) in sessions.iter().enumerate() {
            for b in &sessions[i + 1..] {
                assert!(!a.window().overlaps(&b.window()), "{a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn test_default_walk_when_nothing_requested() {
        let (sessions, _) = plan(None, &[Weekday::Mon, Weekday::Wed, Weekday::Fri]);
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].modality, Modality::Walking);
        assert_eq!(sessions[0].day, Weekday::Tue);
        assert_eq!(sessions[0].start_hour, 7);
    }

    #[test]
    fn test_opt_out_suppresses_default() {
        let preferences = ModalityPreferences {
            cardio_opt_out: true,
            ..ModalityPreferences::default()
        };
        let (sessions, _) = plan(Some(&preferences), &[Weekday::Mon]);
        assert!(sessions.is_empty());
    }

    #[test]
    fn test_recovery_cap_limits_sessions() {
        let preferences = ModalityPreferences {
            targets: vec![target(Modality::Running, 4, 40)],
            ..ModalityPreferences::default()
        };
        let lifting = [Weekday::Mon, Weekday::Tue, Weekday::Thu, Weekday::Fri];
        let (sessions, warnings) = plan(Some(&preferences), &lifting);
        assert_eq!(sessions.len(), 2);
        assert!(warnings.iter().any(|w| w.contains("Placed 2 of 4")));
    }

    #[test]
    fn test_no_headroom_skips_default_session() {
        let lifting = [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
        ];
        let (sessions, warnings) = plan(None, &lifting);
        assert!(sessions.is_empty());
        assert!(warnings
            .iter()
            .any(|w| w.contains("skipped") && w.contains("no recovery headroom")));
    }

    #[test]
    fn test_long_ride_prefers_weekend() {
        let preferences = ModalityPreferences {
            targets: vec![target(Modality::Cycling, 1, 120)],
            ..ModalityPreferences::default()
        };
        let (sessions, _) = plan(Some(&preferences), &[Weekday::Mon, Weekday::Thu]);
        assert_eq!(sessions[0].day, Weekday::Sat);
        assert_eq!(sessions[0].end_hour - sessions[0].start_hour, 2);
    }

    #[test]
    fn test_facility_restricts_days() {
        let mut access = BTreeMap::new();
        access.insert(FacilityType::Pool, vec![Weekday::Thu]);
        let preferences = ModalityPreferences {
            targets: vec![target(Modality::Swimming, 2, 45)],
            facility_access: access,
            ..ModalityPreferences::default()
        };
        let (sessions, warnings) = plan(Some(&preferences), &[]);
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].day, Weekday::Thu);
        assert!(!warnings.is_empty());
    }

    #[test]
    fn test_fixed_sessions_reserve_and_reject_overlap() {
        let preferences = ModalityPreferences {
            fixed_sessions: vec![
                FixedModalitySession {
                    modality: Modality::Running,
                    day: Weekday::Tue,
                    start_hour: 7,
                    duration_minutes: 60,
                },
                FixedModalitySession {
                    modality: Modality::MartialArts,
                    day: Weekday::Tue,
                    start_hour: 7,
                    duration_minutes: 90,
                },
            ],
            targets: vec![target(Modality::Running, 2, 30)],
            ..ModalityPreferences::default()
        };
        let (sessions, warnings) = plan(Some(&preferences), &[Weekday::Mon]);
        assert!(sessions.iter().any(|s| s.fixed_time && s.day == Weekday::Tue));
        assert!(warnings.iter().any(|w| w.contains("overlaps")));
        assert_no_overlaps(&sessions);
    }

    #[test]
    fn test_commitments_block_windows() {
        let preferences = ModalityPreferences {
            targets: vec![target(Modality::Walking, 1, 30)],
            commitments: vec![TimeWindow {
                day: Weekday::Tue,
                start_hour: 6,
                end_hour: 20,
            }],
            ..ModalityPreferences::default()
        };
        let (sessions, _) = plan(Some(&preferences), &[Weekday::Mon]);
        assert_eq!(sessions[0].day, Weekday::Tue);
        assert!(sessions[0].start_hour >= 20);
    }

    #[test]
    fn test_hiit_rounds_and_taper() {
        let preferences = ModalityPreferences {
            targets: vec![target(Modality::IntervalCircuit, 1, 30)],
            ..ModalityPreferences::default()
        };
        let (sessions, _) = plan(Some(&preferences), &[]);
        let intervals = sessions[0].intervals.as_ref().unwrap();
        assert_eq!(intervals.rounds, 10);

        let tapering = ModalityPreferences {
            upcoming_event: Some(UpcomingEvent {
                name: "City 10K".to_owned(),
                date: start() + chrono::Duration::days(10),
                modality: Some(Modality::Running),
            }),
            ..preferences
        };
        let (sessions, _) = plan(Some(&tapering), &[]);
        assert!(sessions[0].intervals.is_none());
        assert!(sessions[0].intensity.heart_rate_zone <= 2);
        assert_eq!(sessions[0].intensity.rpe, 6);
        assert!(sessions[0].notes.iter().any(|n| n.contains("City 10K")));
    }

    #[test]
    fn test_sport_sessions_carry_drills() {
        let mut access = BTreeMap::new();
        access.insert(FacilityType::Court, WEEK.to_vec());
        let preferences = ModalityPreferences {
            targets: vec![target(Modality::Tennis, 2, 60)],
            facility_access: access,
            ..ModalityPreferences::default()
        };
        let (sessions, _) = plan(Some(&preferences), &[Weekday::Mon, Weekday::Wed]);
        assert_eq!(sessions.len(), 2);
        assert!(sessions.iter().all(|s| !s.drills.is_empty()));
        assert_ne!(sessions[0].day, sessions[1].day);
    }
}
