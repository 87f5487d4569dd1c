// ABOUTME: Composite health score, derived metrics, trend detection, and record validation
// ABOUTME: Deterministic rule tables over the latest record and windowed means over the history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pulseboard Contributors

//! Health metrics calculation and trend analysis.
//!
//! The composite score starts at 100 and applies additive penalties and
//! bonuses from the most recent record only; all terms are additive, so the
//! result is order-independent. Missing fields are treated at their neutral
//! defaults rather than penalized.

use pulseboard_core::constants::{
    blood_pressure, bmi, cholesterol, cv_risk, defaults, glucose, lifestyle, score, validation,
};
use pulseboard_core::models::{MeasurementRecord, Metric};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Metrics the trend detector watches
pub const TREND_METRICS: [Metric; 5] = [
    Metric::Bmi,
    Metric::SystolicBp,
    Metric::DiastolicBp,
    Metric::GlucoseFasting,
    Metric::TotalCholesterol,
];

/// Window size for the recent-vs-historical mean comparison
const TREND_WINDOW: usize = 5;

/// Histories shorter than this compare against everything before the
/// recent window instead of a fixed leading window
const TREND_FULL_HISTORY_MIN: usize = 10;

/// Quantities derived from a single record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// Body mass index, from height and weight when both are present
    pub bmi: Option<f64>,
    /// Systolic minus diastolic pressure (mmHg)
    pub pulse_pressure: Option<f64>,
    /// Total cholesterol / HDL ratio
    pub total_hdl_ratio: Option<f64>,
    /// LDL / HDL ratio
    pub ldl_hdl_ratio: Option<f64>,
    /// Simplified additive cardiovascular risk score
    pub cv_risk_score: f64,
}

/// Direction of a detected trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    /// Recent mean strictly above the historical mean
    Increasing,
    /// Recent mean at or below the historical mean (ties land here)
    Decreasing,
}

/// Trend summary for one metric
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricTrend {
    /// Metric the trend describes
    pub metric: Metric,
    /// Direction of change
    pub direction: TrendDirection,
    /// Percent magnitude of change relative to the historical mean
    pub magnitude_percent: f64,
    /// Mean of the recent window
    pub recent_avg: f64,
    /// Mean of the historical window
    pub historical_avg: f64,
}

/// Composite health score calculator
pub struct HealthScoreCalculator;

impl HealthScoreCalculator {
    /// Calculate the composite health score for a history.
    ///
    /// Scores the most recent record only; returns 0.0 for an empty
    /// history. The result is clamped to [0, 100].
    #[must_use]
    pub fn calculate(history: &[MeasurementRecord]) -> f64 {
        let Some(latest) = history.last() else {
            return 0.0;
        };

        let mut value = score::BASE;

        let body_mass = latest.bmi.unwrap_or(defaults::BMI);
        if body_mass > bmi::OBESE {
            value -= score::BMI_OBESE_PENALTY;
        } else if body_mass > bmi::OVERWEIGHT {
            value -= score::BMI_OVERWEIGHT_PENALTY;
        } else if body_mass < bmi::UNDERWEIGHT {
            value -= score::BMI_UNDERWEIGHT_PENALTY;
        }

        let systolic = latest.systolic_bp.unwrap_or(defaults::SYSTOLIC_BP);
        let diastolic = latest.diastolic_bp.unwrap_or(defaults::DIASTOLIC_BP);
        if systolic > blood_pressure::SYSTOLIC_HIGH || diastolic > blood_pressure::DIASTOLIC_HIGH {
            value -= score::BP_HIGH_PENALTY;
        } else if systolic > blood_pressure::SYSTOLIC_ELEVATED
            || diastolic > blood_pressure::DIASTOLIC_ELEVATED
        {
            value -= score::BP_ELEVATED_PENALTY;
        }

        let glucose_value = latest.glucose_fasting.unwrap_or(defaults::GLUCOSE_FASTING);
        if glucose_value > glucose::DIABETIC {
            value -= score::GLUCOSE_DIABETIC_PENALTY;
        } else if glucose_value > glucose::PRE_DIABETIC {
            value -= score::GLUCOSE_PRE_DIABETIC_PENALTY;
        }

        let total_chol = latest
            .total_cholesterol
            .unwrap_or(defaults::TOTAL_CHOLESTEROL);
        let hdl = latest.hdl_cholesterol.unwrap_or(defaults::HDL_CHOLESTEROL);
        if total_chol > cholesterol::TOTAL_HIGH {
            value -= score::CHOLESTEROL_HIGH_PENALTY;
        }
        if hdl < cholesterol::HDL_LOW {
            value -= score::HDL_LOW_PENALTY;
        }

        let exercise = latest
            .exercise_minutes_per_week
            .unwrap_or(defaults::EXERCISE_MINUTES_PER_WEEK);
        if exercise >= lifestyle::EXERCISE_TARGET_MINUTES {
            value += score::EXERCISE_BONUS;
        } else if exercise < lifestyle::EXERCISE_LOW_MINUTES {
            value -= score::EXERCISE_PENALTY;
        }

        let sleep = latest.sleep_hours.unwrap_or(defaults::SLEEP_HOURS);
        if (lifestyle::SLEEP_IDEAL_MIN_HOURS..=lifestyle::SLEEP_IDEAL_MAX_HOURS).contains(&sleep) {
            value += score::SLEEP_BONUS;
        } else if sleep < lifestyle::SLEEP_SHORT_HOURS || sleep > lifestyle::SLEEP_LONG_HOURS {
            value -= score::SLEEP_PENALTY;
        }

        let stress = latest.stress_level.unwrap_or(defaults::STRESS_LEVEL);
        if stress <= lifestyle::STRESS_LOW {
            value += score::STRESS_BONUS;
        } else if stress >= lifestyle::STRESS_HIGH {
            value -= score::STRESS_PENALTY;
        }

        if latest.smoking_status.unwrap_or(false) {
            value -= score::SMOKING_PENALTY;
        }

        value.clamp(0.0, 100.0)
    }
}

/// Compute quantities derived from a single record
#[must_use]
pub fn derive_metrics(record: &MeasurementRecord) -> DerivedMetrics {
    let bmi_value = match (record.height_cm, record.weight_kg) {
        (Some(height), Some(weight)) if height > 0.0 => {
            let meters = height / 100.0;
            Some(weight / (meters * meters))
        }
        _ => record.bmi,
    };

    let pulse_pressure = match (record.systolic_bp, record.diastolic_bp) {
        (Some(sys), Some(dia)) => Some(sys - dia),
        _ => None,
    };

    let total_hdl_ratio = match (record.total_cholesterol, record.hdl_cholesterol) {
        (Some(total), Some(hdl)) if hdl > 0.0 => Some(total / hdl),
        _ => None,
    };

    let ldl_hdl_ratio = match (record.ldl_cholesterol, record.hdl_cholesterol) {
        (Some(ldl), Some(hdl)) if hdl > 0.0 => Some(ldl / hdl),
        _ => None,
    };

    let smoking = if record.smoking_status.unwrap_or(false) {
        1.0
    } else {
        0.0
    };
    let cv_risk_score = record
        .age
        .unwrap_or(defaults::AGE)
        .mul_add(cv_risk::AGE_WEIGHT, 0.0)
        + bmi_value.unwrap_or(defaults::BMI) * cv_risk::BMI_WEIGHT
        + record.systolic_bp.unwrap_or(defaults::SYSTOLIC_BP) * cv_risk::SYSTOLIC_WEIGHT
        + record
            .total_cholesterol
            .unwrap_or(defaults::TOTAL_CHOLESTEROL)
            * cv_risk::CHOLESTEROL_WEIGHT
        + smoking * cv_risk::SMOKING_WEIGHT;

    DerivedMetrics {
        bmi: bmi_value,
        pulse_pressure,
        total_hdl_ratio,
        ldl_hdl_ratio,
        cv_risk_score,
    }
}

/// Recent-vs-historical window means for a series of present values.
///
/// The newest five values are averaged against the first five when the
/// series has at least ten, otherwise against the whole series. A
/// two-value series compares the values directly, so a single rise or
/// fall is still reported instead of a degenerate tie.
#[must_use]
pub fn trend_window_means(values: &[f64]) -> (f64, f64) {
    if values.len() == 2 {
        return (values[1], values[0]);
    }
    let recent_avg = mean(&values[values.len().saturating_sub(TREND_WINDOW)..]);
    let historical_avg = if values.len() >= TREND_FULL_HISTORY_MIN {
        mean(&values[..TREND_WINDOW])
    } else {
        mean(values)
    };
    (recent_avg, historical_avg)
}

/// Detect trends across the fixed metric list.
///
/// Compares the mean of the last five present values against the mean of
/// the first five (all values for histories under ten), per metric.
/// Histories with fewer than 2 records return an empty result. The
/// comparison is strict, so a tie reports [`TrendDirection::Decreasing`].
#[must_use]
pub fn detect_trends(history: &[MeasurementRecord]) -> Vec<MetricTrend> {
    if history.len() < 2 {
        return Vec::new();
    }

    let mut trends = Vec::new();
    for metric in TREND_METRICS {
        let values: Vec<f64> = history.iter().filter_map(|r| r.metric(metric)).collect();
        if values.len() < 2 {
            debug!(metric = %metric, present = values.len(), "Too few values for trend");
            continue;
        }

        let (recent_avg, historical_avg) = trend_window_means(&values);

        let direction = if recent_avg > historical_avg {
            TrendDirection::Increasing
        } else {
            TrendDirection::Decreasing
        };
        let magnitude_percent = if historical_avg.abs() < f64::EPSILON {
            0.0
        } else {
            (recent_avg - historical_avg).abs() / historical_avg * 100.0
        };

        trends.push(MetricTrend {
            metric,
            direction,
            magnitude_percent,
            recent_avg,
            historical_avg,
        });
    }

    trends
}

/// Validate a record's clinical ranges.
///
/// Returns a list of human-readable problems; an empty list means the
/// record passed. Only the fields the original intake form requires are
/// checked; lifestyle fields and cholesterol sub-components are not
/// validated.
#[must_use]
pub fn validate_record(record: &MeasurementRecord) -> Vec<String> {
    let mut errors = Vec::new();

    // Age keeps an exclusive lower bound: any positive age is accepted.
    match record.age {
        Some(v) if v > validation::AGE_RANGE.0 && v <= validation::AGE_RANGE.1 => {}
        _ => errors.push("Age must be between 1 and 150 years".to_owned()),
    }
    check_range(
        record.bmi,
        validation::BMI_RANGE,
        "BMI must be between 10 and 60",
        &mut errors,
    );
    check_range(
        record.systolic_bp,
        validation::SYSTOLIC_RANGE,
        "Systolic blood pressure must be between 70 and 250 mmHg",
        &mut errors,
    );
    check_range(
        record.diastolic_bp,
        validation::DIASTOLIC_RANGE,
        "Diastolic blood pressure must be between 40 and 150 mmHg",
        &mut errors,
    );
    check_range(
        record.glucose_fasting,
        validation::GLUCOSE_RANGE,
        "Fasting glucose must be between 50 and 400 mg/dL",
        &mut errors,
    );
    check_range(
        record.total_cholesterol,
        validation::TOTAL_CHOLESTEROL_RANGE,
        "Total cholesterol must be between 100 and 500 mg/dL",
        &mut errors,
    );

    errors
}

fn check_range(value: Option<f64>, range: (f64, f64), message: &str, errors: &mut Vec<String>) {
    match value {
        Some(v) if (range.0..=range.1).contains(&v) => {}
        _ => errors.push(message.to_owned()),
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
