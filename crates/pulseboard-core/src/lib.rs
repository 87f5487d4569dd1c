// ABOUTME: Core types and constants for the Pulseboard health tracking platform
// ABOUTME: Foundation crate with measurement models, error handling, and clinical thresholds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pulseboard Contributors

#![deny(unsafe_code)]

//! # Pulseboard Core
//!
//! Foundation crate providing shared types and constants for the Pulseboard
//! health tracking platform. This crate is designed to change infrequently,
//! enabling incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `HealthError` and `HealthResult`
//! - **models**: Measurement records, goals, and tracked interventions
//! - **constants**: Clinical thresholds and defaults organized by domain

/// Unified error handling for store and engine operations
pub mod errors;

/// Core data models (`MeasurementRecord`, `Goal`, `ActiveIntervention`)
pub mod models;

/// Clinical thresholds, score weights, and default fill values
pub mod constants;

pub use errors::{HealthError, HealthResult};
pub use models::{
    ActiveIntervention, FamilyHistory, Gender, Goal, GoalStatus, InterventionStatus,
    MeasurementRecord, Metric, WeeklyGoal,
};
