// ABOUTME: Root crate for the Pulseboard health tracking platform
// ABOUTME: Flat-JSON store, environment configuration, and logging around the engine crates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pulseboard Contributors

#![deny(unsafe_code)]

//! # Pulseboard
//!
//! Personal health tracking core: a composite health score, synthetic-data
//! risk classifiers for three chronic conditions, a rule-based alert
//! engine, and an evidence-graded intervention catalog, persisted through
//! a flat-JSON store.
//!
//! The analysis engines live in [`pulseboard_intelligence`] and the data
//! model in [`pulseboard_core`]; this crate wraps them with persistence,
//! configuration, and logging.

/// Environment-driven store configuration
pub mod config;

/// Tracing subscriber initialization
pub mod logging;

/// Flat-JSON persistence for records, goals, and interventions
pub mod store;

pub use config::StoreConfig;
pub use store::{HealthDataStore, HealthStatistics, MetricStatistics, MetricTrendSummary, NewGoal};

// The engine crates are the public analysis surface.
pub use pulseboard_core as core;
pub use pulseboard_intelligence as intelligence;
