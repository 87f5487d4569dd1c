// ABOUTME: Health intelligence engines for scoring, trends, risk, alerts, and interventions
// ABOUTME: Pure functions over an immutable measurement history, no shared mutable state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pulseboard Contributors

#![deny(unsafe_code)]

//! # Pulseboard Intelligence
//!
//! Analysis engines for the Pulseboard health tracking platform. Every
//! engine takes the measurement history as an immutable slice and returns
//! value objects; no engine depends on another's internal state.
//!
//! ## Engines
//!
//! - **metrics**: composite health score, derived quantities, trend
//!   detection, and input validation
//! - **insights**: human-readable threshold findings on the latest record
//! - **risk**: chronic-condition probability scores from a synthetic-data
//!   classifier, plus factor analysis and narratives
//! - **alerts**: threshold, trend, pattern, and adherence alerting
//! - **interventions**: canned intervention catalog personalized by risk

/// Composite health score, derived metrics, trends, and validation
pub mod metrics;

/// Threshold-based health insights on the latest record
pub mod insights;

/// Chronic-condition risk scoring and analysis
pub mod risk;

/// Threshold, trend, pattern, and adherence alerting
pub mod alerts;

/// Intervention catalog with risk-based personalization
pub mod interventions;

pub use alerts::{Alert, AlertEngine, AlertKind, AlertSeverity, AlertSummary};
pub use insights::{HealthInsight, InsightKind, InsightSeverity};
pub use interventions::{
    group_by_category, EvidenceLevel, Intervention, InterventionCategory, InterventionEngine,
    InterventionPriority, PersonalizedIntervention, ProgressTemplate,
};
pub use metrics::{
    trend_window_means, DerivedMetrics, HealthScoreCalculator, MetricTrend, TrendDirection,
    TREND_METRICS,
};
pub use risk::{Condition, RiskFactor, RiskScore, RiskScoreSet, RiskScorer, SyntheticRiskModel};
