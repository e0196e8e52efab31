// ABOUTME: Core types and constants for the coachplan program generation engine
// ABOUTME: Foundation crate with error handling, intake/plan data models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Coachplan Core
//!
//! Foundation crate providing the shared vocabulary of the coachplan engine.
//! Every stage of plan generation consumes and produces the immutable values
//! defined here, so this crate is designed to change infrequently.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `PlanError`, `ErrorCode` and `PlanResult`
//! - **constants**: Energy conversion factors, plan horizon and input limits
//! - **models**: Intake profile, verdicts, training program, meal plans,
//!   multimodal sessions, grocery list and the final plan bundle

/// Unified error handling system with stable error codes
pub mod errors;

/// Physiological and unit constants shared across components
pub mod constants;

/// Intake and plan data models
pub mod models;

pub use errors::{ErrorCode, ErrorResponse, PlanError, PlanResult};
