// ABOUTME: Supplementary modality preferences and scheduled multimodal sessions
// ABOUTME: Endurance, interval and sport sessions with hour windows and facility constraints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::errors::{PlanError, PlanResult};

/// Category of a non-resistance session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalityKind {
    /// Steady-state aerobic work
    Endurance,
    /// High-intensity interval training
    Hiit,
    /// Skill-based sport practice
    Sport,
}

/// Facility a modality may depend on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacilityType {
    /// Swimming pool
    Pool,
    /// Running track
    Track,
    /// Indoor or outdoor court
    Court,
    /// Grass or turf field
    Field,
    /// Climbing wall
    ClimbingWall,
    /// Gym floor with cardio machines
    Gym,
}

/// Specific supplementary activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modality {
    /// Road or trail running
    Running,
    /// Road or stationary cycling
    Cycling,
    /// Lap swimming
    Swimming,
    /// Indoor rowing
    Rowing,
    /// Brisk walking
    Walking,
    /// Interval circuits
    IntervalCircuit,
    /// Soccer practice
    Soccer,
    /// Basketball practice
    Basketball,
    /// Tennis practice
    Tennis,
    /// Martial arts practice
    MartialArts,
    /// Indoor climbing
    Climbing,
}

impl Modality {
    /// Session category
    #[must_use]
    pub const fn kind(&self) -> ModalityKind {
        match self {
            Self::Running | Self::Cycling | Self::Swimming | Self::Rowing | Self::Walking => {
                ModalityKind::Endurance
            }
            Self::IntervalCircuit => ModalityKind::Hiit,
            Self::Soccer | Self::Basketball | Self::Tennis | Self::MartialArts | Self::Climbing => {
                ModalityKind::Sport
            }
        }
    }

    /// Facility that must be available on the scheduled day
    #[must_use]
    pub const fn required_facility(&self) -> Option<FacilityType> {
        match self {
            Self::Swimming => Some(FacilityType::Pool),
            Self::Basketball | Self::Tennis => Some(FacilityType::Court),
            Self::Soccer => Some(FacilityType::Field),
            Self::Climbing => Some(FacilityType::ClimbingWall),
            Self::Rowing => Some(FacilityType::Gym),
            Self::Running
            | Self::Cycling
            | Self::Walking
            | Self::IntervalCircuit
            | Self::MartialArts => None,
        }
    }

    /// Modalities that favour long weekend sessions
    #[must_use]
    pub const fn prefers_long_sessions(&self) -> bool {
        matches!(self, Self::Cycling | Self::Running)
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Cycling => "cycling",
            Self::Swimming => "swimming",
            Self::Rowing => "rowing",
            Self::Walking => "walking",
            Self::IntervalCircuit => "interval circuit",
            Self::Soccer => "soccer",
            Self::Basketball => "basketball",
            Self::Tennis => "tennis",
            Self::MartialArts => "martial arts",
            Self::Climbing => "climbing",
        }
    }
}

/// Coarse time-of-day slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    /// Before 12:00
    Morning,
    /// 12:00 to 17:00
    Afternoon,
    /// 17:00 and later
    Evening,
}

impl TimeOfDay {
    /// Slot containing the given start hour
    #[must_use]
    pub const fn from_hour(hour: u8) -> Self {
        if hour < 12 {
            Self::Morning
        } else if hour < 17 {
            Self::Afternoon
        } else {
            Self::Evening
        }
    }
}

/// Half-open hour window `[start_hour, end_hour)` on one day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Day of the week
    pub day: Weekday,
    /// Inclusive start hour (0-23)
    pub start_hour: u8,
    /// Exclusive end hour (1-24)
    pub end_hour: u8,
}

impl TimeWindow {
    /// Window covering `duration_minutes` starting at `start_hour`, rounded up to whole hours
    #[must_use]
    pub fn for_duration(day: Weekday, start_hour: u8, duration_minutes: u32) -> Self {
        let hours = duration_minutes.div_ceil(60).max(1);
        let end = (u32::from(start_hour) + hours).min(24);
        Self {
            day,
            start_hour,
            end_hour: u8::try_from(end).unwrap_or(24),
        }
    }

    /// Whether two windows share at least one hour on the same day
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.day == other.day
            && self.start_hour < other.end_hour
            && other.start_hour < self.end_hour
    }
}

/// Weekly target for a supplementary modality
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModalityTarget {
    /// Activity
    pub modality: Modality,
    /// Sessions wanted per week
    pub sessions_per_week: u8,
    /// Minutes per session
    pub duration_minutes: u32,
}

/// Session the user has already committed to at a fixed time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedModalitySession {
    /// Activity
    pub modality: Modality,
    /// Day of the week
    pub day: Weekday,
    /// Start hour (0-23)
    pub start_hour: u8,
    /// Minutes
    pub duration_minutes: u32,
}

impl FixedModalitySession {
    /// Hour window reserved by this session
    #[must_use]
    pub fn window(&self) -> TimeWindow {
        TimeWindow::for_duration(self.day, self.start_hour, self.duration_minutes)
    }
}

/// Upcoming race or competition driving a taper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpcomingEvent {
    /// Event name
    pub name: String,
    /// Event date
    pub date: NaiveDate,
    /// Primary modality of the event
    pub modality: Option<Modality>,
}

/// Supplementary modality preferences and facility access
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ModalityPreferences {
    /// Flexible weekly targets
    #[serde(default)]
    pub targets: Vec<ModalityTarget>,
    /// Sessions already fixed in the calendar
    #[serde(default)]
    pub fixed_sessions: Vec<FixedModalitySession>,
    /// Non-training commitments that block time
    #[serde(default)]
    pub commitments: Vec<TimeWindow>,
    /// Days each facility is available; facilities absent from the map are unavailable
    #[serde(default)]
    pub facility_access: BTreeMap<FacilityType, Vec<Weekday>>,
    /// Upcoming race or competition
    pub upcoming_event: Option<UpcomingEvent>,
    /// User explicitly declined cardio
    #[serde(default)]
    pub cardio_opt_out: bool,
}

impl ModalityPreferences {
    /// Whether `facility` can be used on `day`
    #[must_use]
    pub fn facility_available(&self, facility: FacilityType, day: Weekday) -> bool {
        self.facility_access
            .get(&facility)
            .is_some_and(|days| days.contains(&day))
    }

    /// Validate hour ranges and session counts
    ///
    /// # Errors
    ///
    /// Returns `PlanError::Validation` for malformed windows or counts
    pub fn validate(&self) -> PlanResult<()> {
        for fixed in &self.fixed_sessions {
            let end_minute = u32::from(fixed.start_hour) * 60 + fixed.duration_minutes;
            if fixed.start_hour > 23 || fixed.duration_minutes == 0 || end_minute > 24 * 60 {
                return Err(PlanError::validation(
                    "modality.fixed_sessions",
                    format!(
                        "{} at hour {} for {} minutes is not a valid slot",
                        fixed.modality.label(),
                        fixed.start_hour,
                        fixed.duration_minutes
                    ),
                ));
            }
        }
        for window in &self.commitments {
            if window.start_hour >= window.end_hour || window.end_hour > 24 {
                return Err(PlanError::validation(
                    "modality.commitments",
                    format!(
                        "window {}-{} is not a valid hour range",
                        window.start_hour, window.end_hour
                    ),
                ));
            }
        }
        for target in &self.targets {
            if target.sessions_per_week > 7 || target.duration_minutes == 0 {
                return Err(PlanError::validation(
                    "modality.targets",
                    format!(
                        "{} x{} for {} minutes is not a valid weekly target",
                        target.modality.label(),
                        target.sessions_per_week,
                        target.duration_minutes
                    ),
                ));
            }
        }
        Ok(())
    }
}

/// Effort prescription for a supplementary session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntensityTarget {
    /// Heart-rate zone (1-5)
    pub heart_rate_zone: u8,
    /// Rating of perceived exertion (1-10)
    pub rpe: u8,
    /// Plain-language cue
    pub description: String,
}

/// Work/rest interval layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalStructure {
    /// Work interval length (seconds)
    pub work_seconds: u32,
    /// Recovery interval length (seconds)
    pub rest_seconds: u32,
    /// Number of work intervals
    pub rounds: u32,
}

/// A scheduled non-resistance activity slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultimodalSession {
    /// Session category
    pub kind: ModalityKind,
    /// Activity
    pub modality: Modality,
    /// Day of the week
    pub day: Weekday,
    /// Coarse slot
    pub time_of_day: TimeOfDay,
    /// Inclusive start hour
    pub start_hour: u8,
    /// Exclusive end hour
    pub end_hour: u8,
    /// Minutes
    pub duration_minutes: u32,
    /// Effort prescription
    pub intensity: IntensityTarget,
    /// Interval layout for interval sessions
    pub intervals: Option<IntervalStructure>,
    /// Drill list for sport sessions
    #[serde(default)]
    pub drills: Vec<String>,
    /// Whether the user fixed the time
    pub fixed_time: bool,
    /// Coaching notes
    #[serde(default)]
    pub notes: Vec<String>,
}

impl MultimodalSession {
    /// Hour window claimed by this session
    #[must_use]
    pub const fn window(&self) -> TimeWindow {
        TimeWindow {
            day: self.day,
            start_hour: self.start_hour,
            end_hour: self.end_hour,
        }
    }
}
