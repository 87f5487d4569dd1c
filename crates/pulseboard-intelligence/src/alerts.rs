// ABOUTME: Four-pass alert engine over the measurement history with severity-ordered output
// ABOUTME: Static threshold tables plus trend, measurement-pattern, and adherence checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pulseboard Contributors

//! Health alerting.
//!
//! Alerts run in four passes: value thresholds on the latest record, trend
//! checks over a 30-day window, measurement-pattern checks, and an
//! adherence heuristic over blood pressure variability. The same underlying
//! problem may fire alerts in more than one pass; the engine does not
//! deduplicate. Output is sorted by severity with a stable sort, so
//! within-severity order follows the pass and table order above.

use chrono::{DateTime, Duration, Utc};
use pulseboard_core::models::{MeasurementRecord, Metric};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Days of silence before the missed-measurements alert fires
const MISSED_MEASUREMENT_DAYS: i64 = 30;

/// Mean gap in days above which measurements count as infrequent
const INFREQUENT_GAP_DAYS: f64 = 14.0;

/// Lookback window for rapid-increase trend checks
const RAPID_INCREASE_WINDOW_DAYS: i64 = 30;

/// Recent-to-historical exercise ratio below which decline is flagged
const EXERCISE_DECLINE_RATIO: f64 = 0.5;

/// Window size for the exercise decline comparison
const EXERCISE_WINDOW: usize = 5;

/// Systolic coefficient of variation above which adherence is questioned
const BP_VARIABILITY_CV: f64 = 0.2;

/// Paired blood pressure readings needed for the adherence check
const BP_VARIABILITY_MIN_READINGS: usize = 5;

/// Metrics the latest record must cover for comprehensive monitoring
const REQUIRED_METRICS: [Metric; 4] = [
    Metric::SystolicBp,
    Metric::DiastolicBp,
    Metric::GlucoseFasting,
    Metric::Bmi,
];

/// Critical thresholds, alert when value is at or above
const CRITICAL_HIGH: [(Metric, f64); 6] = [
    (Metric::SystolicBp, 180.0),
    (Metric::DiastolicBp, 120.0),
    (Metric::GlucoseFasting, 250.0),
    (Metric::TotalCholesterol, 300.0),
    (Metric::Bmi, 40.0),
    (Metric::RestingHeartRate, 120.0),
];

/// Warning thresholds, alert when value is at or above
const WARNING_HIGH: [(Metric, f64); 7] = [
    (Metric::SystolicBp, 140.0),
    (Metric::DiastolicBp, 90.0),
    (Metric::GlucoseFasting, 126.0),
    (Metric::TotalCholesterol, 240.0),
    (Metric::Bmi, 30.0),
    (Metric::RestingHeartRate, 100.0),
    (Metric::Triglycerides, 200.0),
];

/// HDL warning threshold, alert when value is at or below
const WARNING_HDL_LOW: f64 = 40.0;

/// Info thresholds, alert when value is at or above
const INFO_HIGH: [(Metric, f64); 5] = [
    (Metric::SystolicBp, 130.0),
    (Metric::DiastolicBp, 80.0),
    (Metric::GlucoseFasting, 100.0),
    (Metric::TotalCholesterol, 200.0),
    (Metric::Bmi, 25.0),
];

/// Info thresholds, alert when value is at or below
const INFO_LOW: [(Metric, f64); 2] = [
    (Metric::ExerciseMinutesPerWeek, 150.0),
    (Metric::SleepHours, 6.0),
];

/// Long-sleep info threshold, alert when value is at or above
const INFO_SLEEP_HIGH: f64 = 9.0;

/// High-stress info threshold, alert when value is at or above
const INFO_STRESS_HIGH: f64 = 7.0;

/// Thirty-day increases at or above these deltas fire a warning
const RAPID_INCREASE: [(Metric, f64); 4] = [
    (Metric::Bmi, 2.0),
    (Metric::SystolicBp, 20.0),
    (Metric::GlucoseFasting, 30.0),
    (Metric::TotalCholesterol, 50.0),
];

/// Alert urgency, ordered most urgent first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    /// Seek immediate medical attention
    Critical,
    /// Needs follow-up soon
    Warning,
    /// Worth knowing, not urgent
    Info,
}

/// What triggered an alert, with the triggering numbers attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AlertKind {
    /// A value on the latest record crossed a static threshold
    Threshold {
        /// The offending metric
        metric: Metric,
        /// Observed value
        value: f64,
        /// Threshold it crossed
        threshold: f64,
    },
    /// A metric rose faster than its 30-day allowance
    RapidIncrease {
        /// The rising metric
        metric: Metric,
        /// Observed increase over the window
        change: f64,
        /// Increase allowance
        threshold: f64,
    },
    /// Recent exercise fell to under half its historical mean
    ExerciseDecline {
        /// Recent mean minus historical mean, in minutes per week
        change: f64,
    },
    /// No measurements recorded recently
    MissedMeasurements {
        /// Days since the newest record
        days_since_last: i64,
    },
    /// Mean gap between measurements is too long
    InfrequentMeasurements {
        /// Mean gap in days
        average_gap_days: f64,
    },
    /// Key metrics absent from the entire history
    MissingMetrics {
        /// The absent metrics
        missing: Vec<Metric>,
    },
    /// Systolic readings vary too much between measurements
    BloodPressureVariability {
        /// Coefficient of variation of systolic readings
        coefficient_of_variation: f64,
    },
}

/// A single alert with its narrative
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    /// Urgency of the alert
    pub severity: AlertSeverity,
    /// Structured cause
    pub kind: AlertKind,
    /// Human-readable description
    pub message: String,
    /// Suggested next step
    pub recommendation: String,
}

/// Counts by severity plus the most urgent alert
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertSummary {
    /// Total alerts raised
    pub total_alerts: usize,
    /// Critical count
    pub critical: usize,
    /// Warning count
    pub warning: usize,
    /// Info count
    pub info: usize,
    /// First alert after severity sorting, if any
    pub most_urgent: Option<Alert>,
}

/// A consolidated recommendation distilled from one metric's alerts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsolidatedRecommendation {
    /// Severity of the strongest underlying alert
    pub priority: AlertSeverity,
    /// Metric the recommendation concerns, if metric-specific
    pub metric: Option<Metric>,
    /// The recommendation text
    pub recommendation: String,
}

/// Stateless alert engine
#[derive(Debug, Clone, Copy, Default)]
pub struct AlertEngine;

impl AlertEngine {
    /// Create an engine
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Run all four alert passes against the wall clock
    #[must_use]
    pub fn check_alerts(&self, history: &[MeasurementRecord]) -> Vec<Alert> {
        self.check_alerts_at(history, Utc::now())
    }

    /// Run all four alert passes, evaluating recency against `now`.
    ///
    /// Returns an empty list for an empty history. The result is sorted by
    /// severity; ties keep pass order.
    #[must_use]
    pub fn check_alerts_at(
        &self,
        history: &[MeasurementRecord],
        now: DateTime<Utc>,
    ) -> Vec<Alert> {
        if history.is_empty() {
            return Vec::new();
        }

        let mut alerts = value_alerts(history);
        alerts.extend(trend_alerts(history));
        alerts.extend(pattern_alerts(history, now));
        alerts.extend(adherence_alerts(history));

        alerts.sort_by_key(|a| a.severity);
        debug!(count = alerts.len(), "Alert check complete");
        alerts
    }

    /// Summarize alert counts for the history
    #[must_use]
    pub fn alert_summary(&self, history: &[MeasurementRecord]) -> AlertSummary {
        self.alert_summary_at(history, Utc::now())
    }

    /// Summarize alert counts, evaluating recency against `now`
    #[must_use]
    pub fn alert_summary_at(
        &self,
        history: &[MeasurementRecord],
        now: DateTime<Utc>,
    ) -> AlertSummary {
        let alerts = self.check_alerts_at(history, now);
        let count = |severity| alerts.iter().filter(|a| a.severity == severity).count();
        AlertSummary {
            total_alerts: alerts.len(),
            critical: count(AlertSeverity::Critical),
            warning: count(AlertSeverity::Warning),
            info: count(AlertSeverity::Info),
            most_urgent: alerts.first().cloned(),
        }
    }

    /// Consolidate alerts into one recommendation per metric.
    ///
    /// A metric with multiple alerts collapses to its strongest severity
    /// with a generic escalation message; a metric with one alert passes
    /// that alert's recommendation through.
    #[must_use]
    pub fn consolidated_recommendations(&self, alerts: &[Alert]) -> Vec<ConsolidatedRecommendation> {
        let mut groups: Vec<(Option<Metric>, Vec<&Alert>)> = Vec::new();
        for alert in alerts {
            let metric = alert_metric(alert);
            match groups.iter_mut().find(|(m, _)| *m == metric) {
                Some((_, list)) => list.push(alert),
                None => groups.push((metric, vec![alert])),
            }
        }

        let mut recommendations = Vec::new();
        for (metric, group) in groups {
            if group.len() > 1 {
                let strongest = group
                    .iter()
                    .map(|a| a.severity)
                    .min()
                    .unwrap_or(AlertSeverity::Info);
                let subject = metric.map_or("overall health", Metric::display_name);
                let recommendation = match strongest {
                    AlertSeverity::Critical => {
                        format!("Immediate medical attention required for {subject}")
                    }
                    AlertSeverity::Warning | AlertSeverity::Info => {
                        format!("Monitor {subject} closely and consider intervention")
                    }
                };
                recommendations.push(ConsolidatedRecommendation {
                    priority: strongest,
                    metric,
                    recommendation,
                });
            } else if let Some(alert) = group.first() {
                recommendations.push(ConsolidatedRecommendation {
                    priority: alert.severity,
                    metric,
                    recommendation: alert.recommendation.clone(),
                });
            }
        }

        recommendations
    }
}

fn alert_metric(alert: &Alert) -> Option<Metric> {
    match &alert.kind {
        AlertKind::Threshold { metric, .. } | AlertKind::RapidIncrease { metric, .. } => {
            Some(*metric)
        }
        AlertKind::ExerciseDecline { .. } => Some(Metric::ExerciseMinutesPerWeek),
        AlertKind::BloodPressureVariability { .. } => Some(Metric::SystolicBp),
        AlertKind::MissedMeasurements { .. }
        | AlertKind::InfrequentMeasurements { .. }
        | AlertKind::MissingMetrics { .. } => None,
    }
}

fn threshold_alert(
    severity: AlertSeverity,
    metric: Metric,
    value: f64,
    threshold: f64,
    message: String,
    recommendation: &str,
) -> Alert {
    Alert {
        severity,
        kind: AlertKind::Threshold {
            metric,
            value,
            threshold,
        },
        message,
        recommendation: recommendation.to_owned(),
    }
}

#[allow(clippy::too_many_lines)]
fn value_alerts(history: &[MeasurementRecord]) -> Vec<Alert> {
    let mut alerts = Vec::new();
    let Some(latest) = history.last() else {
        return alerts;
    };

    for (metric, threshold) in CRITICAL_HIGH {
        if let Some(value) = latest.metric(metric) {
            if value >= threshold {
                alerts.push(threshold_alert(
                    AlertSeverity::Critical,
                    metric,
                    value,
                    threshold,
                    format!("{} is critically high: {value}", metric.display_name()),
                    "Seek immediate medical attention",
                ));
            }
        }
    }

    for (metric, threshold) in WARNING_HIGH {
        if let Some(value) = latest.metric(metric) {
            if value >= threshold {
                alerts.push(threshold_alert(
                    AlertSeverity::Warning,
                    metric,
                    value,
                    threshold,
                    format!("{} is elevated: {value}", metric.display_name()),
                    "Monitor closely and consider intervention",
                ));
            }
        }
    }
    if let Some(value) = latest.hdl_cholesterol {
        if value <= WARNING_HDL_LOW {
            alerts.push(threshold_alert(
                AlertSeverity::Warning,
                Metric::HdlCholesterol,
                value,
                WARNING_HDL_LOW,
                format!("HDL cholesterol is low: {value} mg/dL"),
                "Consider lifestyle changes to increase HDL",
            ));
        }
    }

    for (metric, threshold) in INFO_HIGH {
        if let Some(value) = latest.metric(metric) {
            if value >= threshold {
                alerts.push(threshold_alert(
                    AlertSeverity::Info,
                    metric,
                    value,
                    threshold,
                    format!("{} is above optimal: {value}", metric.display_name()),
                    "Consider lifestyle modifications",
                ));
            }
        }
    }
    for (metric, threshold) in INFO_LOW {
        if let Some(value) = latest.metric(metric) {
            if value <= threshold {
                alerts.push(threshold_alert(
                    AlertSeverity::Info,
                    metric,
                    value,
                    threshold,
                    format!("{} is below recommended: {value}", metric.display_name()),
                    "Consider increasing to meet recommended levels",
                ));
            }
        }
    }
    if let Some(value) = latest.sleep_hours {
        if value >= INFO_SLEEP_HIGH {
            alerts.push(threshold_alert(
                AlertSeverity::Info,
                Metric::SleepHours,
                value,
                INFO_SLEEP_HIGH,
                format!("Sleep hours are above recommended: {value}"),
                "Excessive sleep may indicate underlying health issues",
            ));
        }
    }
    if let Some(value) = latest.stress_level {
        if value >= INFO_STRESS_HIGH {
            alerts.push(threshold_alert(
                AlertSeverity::Info,
                Metric::StressLevel,
                value,
                INFO_STRESS_HIGH,
                format!("Stress level is high: {value}/10"),
                "Consider stress management techniques",
            ));
        }
    }

    alerts
}

fn trend_alerts(history: &[MeasurementRecord]) -> Vec<Alert> {
    let mut alerts = Vec::new();
    if history.len() < 2 {
        return alerts;
    }

    let Some(newest) = history.iter().map(|r| r.date).max() else {
        return alerts;
    };
    let cutoff = newest - Duration::days(RAPID_INCREASE_WINDOW_DAYS);

    for (metric, threshold) in RAPID_INCREASE {
        let recent: Vec<f64> = history
            .iter()
            .filter(|r| r.date > cutoff)
            .filter_map(|r| r.metric(metric))
            .collect();
        if recent.len() < 2 {
            continue;
        }
        let change = recent[recent.len() - 1] - recent[0];
        if change >= threshold {
            alerts.push(Alert {
                severity: AlertSeverity::Warning,
                kind: AlertKind::RapidIncrease {
                    metric,
                    change,
                    threshold,
                },
                message: format!(
                    "{} has increased rapidly: +{change:.1} in 30 days",
                    metric.display_name()
                ),
                recommendation: "Monitor closely and consider medical evaluation".to_owned(),
            });
        }
    }

    let exercise: Vec<f64> = history
        .iter()
        .filter_map(|r| r.exercise_minutes_per_week)
        .collect();
    if exercise.len() >= 2 {
        let recent = mean(&exercise[exercise.len().saturating_sub(EXERCISE_WINDOW)..]);
        let historical = mean(&exercise[..EXERCISE_WINDOW.min(exercise.len())]);
        if historical > 0.0 && recent / historical < EXERCISE_DECLINE_RATIO {
            alerts.push(Alert {
                severity: AlertSeverity::Info,
                kind: AlertKind::ExerciseDecline {
                    change: recent - historical,
                },
                message: "Exercise activity has declined significantly".to_owned(),
                recommendation:
                    "Consider factors affecting exercise routine and gradually increase activity"
                        .to_owned(),
            });
        }
    }

    alerts
}

fn pattern_alerts(history: &[MeasurementRecord], now: DateTime<Utc>) -> Vec<Alert> {
    let mut alerts = Vec::new();

    if let Some(newest) = history.iter().map(|r| r.date).max() {
        let days_since_last = (now - newest).num_days();
        if days_since_last > MISSED_MEASUREMENT_DAYS {
            alerts.push(Alert {
                severity: AlertSeverity::Info,
                kind: AlertKind::MissedMeasurements { days_since_last },
                message: format!("No health measurements recorded in {days_since_last} days"),
                recommendation: "Regular monitoring is important for tracking progress".to_owned(),
            });
        }
    }

    if history.len() >= 2 {
        let gaps: Vec<f64> = history
            .windows(2)
            .map(|pair| {
                #[allow(clippy::cast_precision_loss)]
                {
                    (pair[1].date - pair[0].date).num_days() as f64
                }
            })
            .collect();
        let average_gap_days = mean(&gaps);
        if average_gap_days > INFREQUENT_GAP_DAYS {
            alerts.push(Alert {
                severity: AlertSeverity::Info,
                kind: AlertKind::InfrequentMeasurements { average_gap_days },
                message: format!(
                    "Measurements are infrequent (average gap: {average_gap_days:.1} days)"
                ),
                recommendation: "Consider more frequent monitoring for better trend analysis"
                    .to_owned(),
            });
        }
    }

    let missing: Vec<Metric> = REQUIRED_METRICS
        .into_iter()
        .filter(|&metric| history.iter().all(|r| r.metric(metric).is_none()))
        .collect();
    if !missing.is_empty() {
        let names: Vec<&str> = missing.iter().map(|m| m.display_name()).collect();
        alerts.push(Alert {
            severity: AlertSeverity::Info,
            kind: AlertKind::MissingMetrics {
                missing: missing.clone(),
            },
            message: format!("Missing key health metrics: {}", names.join(", ")),
            recommendation: "Consider adding these metrics for comprehensive health monitoring"
                .to_owned(),
        });
    }

    alerts
}

fn adherence_alerts(history: &[MeasurementRecord]) -> Vec<Alert> {
    let mut alerts = Vec::new();
    if history.len() < BP_VARIABILITY_MIN_READINGS {
        return alerts;
    }

    let systolic: Vec<f64> = history
        .iter()
        .filter(|r| r.systolic_bp.is_some() && r.diastolic_bp.is_some())
        .filter_map(|r| r.systolic_bp)
        .collect();
    if systolic.len() < BP_VARIABILITY_MIN_READINGS {
        return alerts;
    }

    let avg = mean(&systolic);
    if avg.abs() < f64::EPSILON {
        return alerts;
    }
    let coefficient_of_variation = std_dev(&systolic, avg) / avg;
    if coefficient_of_variation > BP_VARIABILITY_CV {
        alerts.push(Alert {
            severity: AlertSeverity::Info,
            kind: AlertKind::BloodPressureVariability {
                coefficient_of_variation,
            },
            message: "Blood pressure readings show high variability".to_owned(),
            recommendation:
                "Ensure consistent measurement conditions and medication adherence".to_owned(),
        });
    }

    alerts
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

/// Sample standard deviation, matching the ddof=1 convention of the
/// statistics the thresholds were tuned against
fn std_dev(values: &[f64], avg: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let sum_sq: f64 = values.iter().map(|v| (v - avg) * (v - avg)).sum();
    #[allow(clippy::cast_precision_loss)]
    {
        (sum_sq / (values.len() - 1) as f64).sqrt()
    }
}
