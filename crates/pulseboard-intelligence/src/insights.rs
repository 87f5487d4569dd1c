// ABOUTME: Stateless threshold insights over the latest measurement record
// ABOUTME: Generates warning, info, and success findings for BMI, blood pressure, and glucose
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pulseboard Contributors

//! Health insight generation.
//!
//! Each check is independent and several insights may fire for the same
//! record. Missing fields produce no insight; checks are only performed on
//! values the user actually entered.

use pulseboard_core::constants::{blood_pressure, bmi, glucose};
use pulseboard_core::models::{MeasurementRecord, Metric};
use serde::{Deserialize, Serialize};

/// Severity of an insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightSeverity {
    /// Value is in a range that warrants medical follow-up
    Warning,
    /// Value is outside the optimal range
    Info,
    /// Value is in the healthy range
    Success,
}

/// What the insight is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    /// Body mass index finding
    BodyMass,
    /// Blood pressure finding
    BloodPressure,
    /// Fasting glucose finding
    Glucose,
}

/// A human-readable finding on the latest record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthInsight {
    /// What the insight is about
    pub kind: InsightKind,
    /// Severity of the finding
    pub severity: InsightSeverity,
    /// Metric the finding derives from
    pub metric: Metric,
    /// Human-readable message
    pub message: String,
    /// Suggested next step
    pub recommendation: String,
}

/// Generate insights for the latest record in the history.
///
/// Returns an empty list for an empty history.
#[must_use]
pub fn health_insights(history: &[MeasurementRecord]) -> Vec<HealthInsight> {
    let Some(latest) = history.last() else {
        return Vec::new();
    };

    let mut insights = Vec::new();
    insights.extend(bmi_insight(latest));
    insights.extend(blood_pressure_insight(latest));
    insights.extend(glucose_insight(latest));
    insights
}

fn bmi_insight(record: &MeasurementRecord) -> Option<HealthInsight> {
    let value = record.bmi?;
    let (severity, message, recommendation) = if value > bmi::OBESE {
        (
            InsightSeverity::Warning,
            format!("Your BMI ({value:.1}) indicates obesity. Consider consulting a healthcare provider."),
            "Focus on balanced diet and regular exercise.".to_owned(),
        )
    } else if value > bmi::OVERWEIGHT {
        (
            InsightSeverity::Info,
            format!("Your BMI ({value:.1}) indicates overweight status."),
            "Consider lifestyle modifications to reach healthy weight.".to_owned(),
        )
    } else {
        (
            InsightSeverity::Success,
            format!("Your BMI ({value:.1}) is in the healthy range."),
            "Keep up your current habits.".to_owned(),
        )
    };

    Some(HealthInsight {
        kind: InsightKind::BodyMass,
        severity,
        metric: Metric::Bmi,
        message,
        recommendation,
    })
}

fn blood_pressure_insight(record: &MeasurementRecord) -> Option<HealthInsight> {
    let systolic = record.systolic_bp?;
    let diastolic = record.diastolic_bp?;
    let (severity, message, recommendation) = if systolic > blood_pressure::SYSTOLIC_HIGH
        || diastolic > blood_pressure::DIASTOLIC_HIGH
    {
        (
            InsightSeverity::Warning,
            format!("Your blood pressure ({systolic:.0}/{diastolic:.0}) is in hypertensive range."),
            "Consult healthcare provider immediately.".to_owned(),
        )
    } else if systolic > blood_pressure::SYSTOLIC_ELEVATED
        || diastolic > blood_pressure::DIASTOLIC_ELEVATED
    {
        (
            InsightSeverity::Info,
            format!("Your blood pressure ({systolic:.0}/{diastolic:.0}) is elevated."),
            "Monitor closely and consider lifestyle changes.".to_owned(),
        )
    } else {
        (
            InsightSeverity::Success,
            format!("Your blood pressure ({systolic:.0}/{diastolic:.0}) is normal."),
            "Keep monitoring at your current cadence.".to_owned(),
        )
    };

    Some(HealthInsight {
        kind: InsightKind::BloodPressure,
        severity,
        metric: Metric::SystolicBp,
        message,
        recommendation,
    })
}

fn glucose_insight(record: &MeasurementRecord) -> Option<HealthInsight> {
    let value = record.glucose_fasting?;
    let (severity, message, recommendation) = if value > glucose::DIABETIC {
        (
            InsightSeverity::Warning,
            format!("Your fasting glucose ({value:.0} mg/dL) is in diabetic range."),
            "Consult healthcare provider for diabetes management.".to_owned(),
        )
    } else if value > glucose::PRE_DIABETIC {
        (
            InsightSeverity::Info,
            format!("Your fasting glucose ({value:.0} mg/dL) is in pre-diabetic range."),
            "Consider diet and exercise modifications.".to_owned(),
        )
    } else {
        (
            InsightSeverity::Success,
            format!("Your fasting glucose ({value:.0} mg/dL) is normal."),
            "Maintain your current diet and activity.".to_owned(),
        )
    };

    Some(HealthInsight {
        kind: InsightKind::Glucose,
        severity,
        metric: Metric::GlucoseFasting,
        message,
        recommendation,
    })
}
