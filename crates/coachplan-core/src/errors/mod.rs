// ABOUTME: Unified error handling for plan generation with stable error codes
// ABOUTME: Validation, hard-stop domain outcomes, internal consistency and config failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Every fallible engine operation returns [`PlanResult`]. Errors fall into four
//! families:
//!
//! - **Input validation** (`Validation`, `MissingField`): raised by the first
//!   component that touches a malformed field.
//! - **Hard stops** (`SafetyBlocked`, `Infeasible`): expected outcomes that carry
//!   the verdict details a caller needs to present next steps.
//! - **Internal consistency** (`InternalConsistency`): upstream constraint
//!   composition produced an impossible state.
//! - **Configuration** (`Config`, `Serialization`).
//!
//! Advisory integration failures never surface here; they degrade to
//! "no suggestion" at the call boundary.

use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use crate::models::verdict::{ConstraintViolation, SafetyVerdict, TradeOffOption};

/// Standard error codes surfaced to collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Malformed input value
    InvalidInput = 3000,
    /// Mandatory field absent
    MissingRequiredField = 3001,
    /// Numeric value outside its hard bounds
    ValueOutOfRange = 3003,

    // Domain hard stops (4000-4999)
    /// Safety gate blocked generation
    SafetyBlocked = 4100,
    /// Goal, timeline and schedule cannot be satisfied together
    GoalInfeasible = 4200,

    // Configuration (6000-6999)
    /// Engine configuration failed validation
    ConfigInvalid = 6002,

    // Internal (9000-9999)
    /// Serialization or deserialization failure
    SerializationError = 9003,
    /// Upstream computations produced an impossible state
    InternalConsistency = 9004,
}

impl ErrorCode {
    /// HTTP status a collaborator should use for this code
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            Self::InvalidInput | Self::MissingRequiredField | Self::ValueOutOfRange => 400,
            Self::SafetyBlocked | Self::GoalInfeasible => 422,
            Self::ConfigInvalid | Self::SerializationError | Self::InternalConsistency => 500,
        }
    }

    /// User-facing description
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::MissingRequiredField => "A required field is missing from the intake",
            Self::ValueOutOfRange => "The provided value is outside the acceptable range",
            Self::SafetyBlocked => "The plan cannot be generated safely without changes",
            Self::GoalInfeasible => "The goal cannot be reached with the given constraints",
            Self::ConfigInvalid => "Engine configuration is invalid",
            Self::SerializationError => "Data serialization/deserialization failed",
            Self::InternalConsistency => "An internal consistency check failed",
        }
    }
}

/// Unified error type for the engine
#[derive(Debug, Error)]
pub enum PlanError {
    /// A field is present but invalid
    #[error("invalid value for {field}: {reason}")]
    Validation {
        /// Dotted path of the offending field
        field: String,
        /// What is wrong with it
        reason: String,
    },

    /// A mandatory field is absent
    #[error("missing required field: {0}")]
    MissingField(String),

    /// Safety validation returned a blocked verdict
    #[error("plan generation blocked by safety validation: {}", .verdict.message())]
    SafetyBlocked {
        /// The blocking verdict
        verdict: SafetyVerdict,
    },

    /// Feasibility solver found no assignment
    #[error("requested goal is infeasible: {} constraint(s) violated", .violations.len())]
    Infeasible {
        /// Hard constraints that failed
        violations: Vec<ConstraintViolation>,
        /// Ranked ways forward
        trade_offs: Vec<TradeOffOption>,
    },

    /// Upstream constraint composition produced an impossible state
    #[error("internal consistency error: {0}")]
    InternalConsistency(String),

    /// Engine configuration failed validation
    #[error("configuration error: {0}")]
    Config(String),

    /// JSON encoding or decoding failed
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PlanError {
    /// Create a validation error for `field`
    #[must_use]
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a missing-field error
    #[must_use]
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingField(field.into())
    }

    /// Create an internal consistency error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalConsistency(message.into())
    }

    /// Stable code for this error
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Validation { .. } => ErrorCode::ValueOutOfRange,
            Self::MissingField(_) => ErrorCode::MissingRequiredField,
            Self::SafetyBlocked { .. } => ErrorCode::SafetyBlocked,
            Self::Infeasible { .. } => ErrorCode::GoalInfeasible,
            Self::InternalConsistency(_) => ErrorCode::InternalConsistency,
            Self::Config(_) => ErrorCode::ConfigInvalid,
            Self::Serialization(_) => ErrorCode::SerializationError,
        }
    }

    /// HTTP status for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code().http_status()
    }

    /// Whether this is an expected domain hard stop rather than a defect or bad input
    #[must_use]
    pub const fn is_hard_stop(&self) -> bool {
        matches!(self, Self::SafetyBlocked { .. } | Self::Infeasible { .. })
    }
}

/// Result type alias for convenience
pub type PlanResult<T> = Result<T, PlanError>;

/// Serializable error body for collaborators exposing the engine over HTTP
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Stable code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Structured details (required modifications, trade-offs, ...)
    #[serde(skip_serializing_if = "serde_json::Value::is_null")]
    pub details: serde_json::Value,
}

impl From<&PlanError> for ErrorResponse {
    fn from(error: &PlanError) -> Self {
        let details = match error {
            PlanError::Validation { field, .. } => json!({ "field": field }),
            PlanError::MissingField(field) => json!({ "field": field }),
            PlanError::SafetyBlocked { verdict } => json!({
                "required_modifications": verdict.required_modifications(),
                "findings": verdict.findings(),
            }),
            PlanError::Infeasible {
                violations,
                trade_offs,
            } => json!({
                "violations": violations,
                "trade_offs": trade_offs,
            }),
            PlanError::InternalConsistency(_)
            | PlanError::Config(_)
            | PlanError::Serialization(_) => serde_json::Value::Null,
        };
        Self {
            code: error.code(),
            message: error.to_string(),
            details,
        }
    }
}
