// ABOUTME: Conversational intake translation into the normalized profile used for generation
// ABOUTME: Loose intake record, keyword tables and the adapter resolving fields by priority
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Intake Adaptation
//!
//! A coaching conversation produces an [`IntakeRecord`]: some fields filled
//! from form inputs, the rest buried in a free-text transcript. The
//! [`IntakeAdapter`] resolves each profile field in a fixed priority order:
//!
//! 1. explicit structured field
//! 2. keyword or pattern match on the transcript
//! 3. advisory inference (primary goal only)
//! 4. documented default
//!
//! Every inference or default appends a warning. Only demographics are
//! mandatory.

/// Intake adapter
pub mod adapter;
/// Keyword mapping tables
pub mod keywords;

pub use adapter::IntakeAdapter;

use coachplan_core::models::ModalityPreferences;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Loosely structured intake as captured by a coaching conversation
///
/// Every field is optional. String fields accept natural phrasing
/// ("lose weight", "Mon/Wed/Fri", "lactose intolerant").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeRecord {
    /// Owning user
    pub user_id: Option<Uuid>,
    /// Age (years)
    pub age: Option<u32>,
    /// Sex as written
    pub sex: Option<String>,
    /// Body weight (kg)
    pub weight_kg: Option<f64>,
    /// Body weight (lb), used when kilograms are absent
    pub weight_lb: Option<f64>,
    /// Height (cm)
    pub height_cm: Option<f64>,
    /// Height (in), used when centimeters are absent
    pub height_in: Option<f64>,
    /// Body fat (%)
    pub body_fat_percent: Option<f64>,
    /// Goal as written
    pub goal: Option<String>,
    /// Target body weight (kg)
    pub target_weight_kg: Option<f64>,
    /// Timeline (weeks)
    pub timeline_weeks: Option<u32>,
    /// Resistance sessions wanted per week
    pub sessions_per_week: Option<u8>,
    /// Days as written ("Monday", "weekends", "tue")
    pub available_days: Vec<String>,
    /// Minutes per session
    pub session_minutes: Option<u32>,
    /// Experience as written
    pub experience: Option<String>,
    /// Years of consistent training
    pub training_years: Option<f64>,
    /// Focus as written
    pub focus: Option<String>,
    /// Intensity as written
    pub intensity: Option<String>,
    /// Dietary pattern as written
    pub dietary_preference: Option<String>,
    /// Allergies as written
    pub allergies: Vec<String>,
    /// Medical conditions as written
    pub conditions: Vec<String>,
    /// Current medications
    pub medications: Vec<String>,
    /// Injuries as written
    pub injuries: Vec<String>,
    /// Physician clearance for exercise
    pub doctor_clearance: Option<bool>,
    /// Supplementary modality preferences, passed through unchanged
    pub modality: Option<ModalityPreferences>,
    /// Free-text conversation transcript
    pub transcript: Option<String>,
}
