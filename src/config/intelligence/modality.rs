// ABOUTME: Modality planner configuration: recovery headroom, slot preferences and taper window
// ABOUTME: Default general-health session and intensity targets per session kind
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use coachplan_core::models::Modality;
use serde::{Deserialize, Serialize};

/// Modality planner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModalityConfig {
    /// Combined weekly sessions (resistance + supplementary) before recovery suffers
    pub recovery_headroom: u8,
    /// Start hours tried in order when placing a flexible session
    pub preferred_start_hours: Vec<u8>,
    /// Days before an event during which sessions taper
    pub taper_window_days: i64,
    /// Duration from which long-session modalities prefer weekends (minutes)
    pub long_session_minutes: u32,
    /// Activity used for the guaranteed general-health session
    pub default_cardio: Modality,
    /// Duration of the guaranteed general-health session (minutes)
    pub default_cardio_minutes: u32,
    /// Warm-up plus cool-down excluded from interval rounds (seconds)
    pub interval_overhead_seconds: u32,
    /// Work interval length (seconds)
    pub interval_work_seconds: u32,
    /// Recovery interval length (seconds)
    pub interval_rest_seconds: u32,
    /// RPE reduction applied while tapering
    pub taper_rpe_reduction: u8,
}

impl Default for ModalityConfig {
    fn default() -> Self {
        Self {
            recovery_headroom: 6,
            preferred_start_hours: vec![7, 18, 12, 6, 19, 17, 8, 16, 9, 15, 10, 14, 11, 13, 20],
            taper_window_days: 14,
            long_session_minutes: 60,
            default_cardio: Modality::Walking,
            default_cardio_minutes: 30,
            interval_overhead_seconds: 600,
            interval_work_seconds: 30,
            interval_rest_seconds: 90,
            taper_rpe_reduction: 2,
        }
    }
}
