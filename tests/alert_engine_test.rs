// ABOUTME: Integration tests for the alert engine across all four passes
// ABOUTME: Covers threshold tables, severity ordering, trend, pattern, and adherence checks

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::Duration;
use common::{base_date, history_of, record_on_day, risky_record};
use pulseboard_core::models::Metric;
use pulseboard_intelligence::alerts::{AlertEngine, AlertKind, AlertSeverity};

fn engine() -> AlertEngine {
    AlertEngine::new()
}

// Evaluate just after the newest record so pattern alerts stay quiet.
fn alerts_now(
    history: &[pulseboard_core::models::MeasurementRecord],
) -> Vec<pulseboard_intelligence::alerts::Alert> {
    let now = history.iter().map(|r| r.date).max().unwrap_or_else(base_date);
    engine().check_alerts_at(history, now)
}

#[test]
fn empty_history_raises_nothing() {
    assert!(engine().check_alerts_at(&[], base_date()).is_empty());
}

#[test]
fn critical_systolic_sorts_first() {
    let mut record = record_on_day(0);
    record.systolic_bp = Some(185.0);
    let alerts = alerts_now(&[record]);

    assert!(!alerts.is_empty());
    let first = &alerts[0];
    assert_eq!(first.severity, AlertSeverity::Critical);
    assert_eq!(
        first.kind,
        AlertKind::Threshold {
            metric: Metric::SystolicBp,
            value: 185.0,
            threshold: 180.0,
        }
    );
    // The same reading also trips the warning and info tables.
    assert!(alerts.len() >= 3);
}

#[test]
fn severity_sort_is_stable_within_a_class() {
    let mut record = record_on_day(0);
    record.systolic_bp = Some(185.0);
    record.glucose_fasting = Some(260.0);
    let alerts = alerts_now(&[record]);

    let critical: Vec<_> = alerts
        .iter()
        .filter(|a| a.severity == AlertSeverity::Critical)
        .collect();
    assert_eq!(critical.len(), 2);
    // Table order: systolic before glucose.
    assert!(matches!(
        critical[0].kind,
        AlertKind::Threshold {
            metric: Metric::SystolicBp,
            ..
        }
    ));
    assert!(matches!(
        critical[1].kind,
        AlertKind::Threshold {
            metric: Metric::GlucoseFasting,
            ..
        }
    ));
}

#[test]
fn low_hdl_fires_a_warning() {
    let mut record = record_on_day(0);
    record.hdl_cholesterol = Some(35.0);
    let alerts = alerts_now(&[record]);

    assert!(alerts.iter().any(|a| a.severity == AlertSeverity::Warning
        && matches!(
            a.kind,
            AlertKind::Threshold {
                metric: Metric::HdlCholesterol,
                ..
            }
        )));
}

#[test]
fn healthy_values_below_all_thresholds_stay_quiet() {
    let mut record = record_on_day(0);
    record.systolic_bp = Some(115.0);
    record.diastolic_bp = Some(75.0);
    record.glucose_fasting = Some(85.0);
    record.bmi = Some(22.0);
    let alerts = alerts_now(&[record]);
    assert!(alerts.is_empty());
}

#[test]
fn rapid_systolic_increase_raises_a_warning() {
    let history = history_of(11, |day, r| {
        r.systolic_bp = Some(110.0 + day as f64 * 2.5);
    });
    let alerts = alerts_now(&history);

    let rapid = alerts
        .iter()
        .find(|a| {
            matches!(
                a.kind,
                AlertKind::RapidIncrease {
                    metric: Metric::SystolicBp,
                    ..
                }
            )
        })
        .unwrap();
    assert_eq!(rapid.severity, AlertSeverity::Warning);
    if let AlertKind::RapidIncrease { change, .. } = rapid.kind {
        assert!((change - 25.0).abs() < 1e-9);
    }
}

#[test]
fn exercise_collapse_raises_info() {
    let history = history_of(10, |day, r| {
        r.exercise_minutes_per_week = Some(if day < 5 { 200.0 } else { 40.0 });
    });
    let alerts = alerts_now(&history);
    assert!(alerts
        .iter()
        .any(|a| matches!(a.kind, AlertKind::ExerciseDecline { .. })));
}

#[test]
fn stale_history_raises_missed_measurements() {
    let record = record_on_day(0);
    let now = base_date() + Duration::days(45);
    let alerts = engine().check_alerts_at(&[record], now);

    let missed = alerts
        .iter()
        .find(|a| matches!(a.kind, AlertKind::MissedMeasurements { .. }))
        .unwrap();
    assert_eq!(
        missed.kind,
        AlertKind::MissedMeasurements {
            days_since_last: 45
        }
    );
}

#[test]
fn sparse_cadence_raises_infrequent_measurements() {
    let history = vec![record_on_day(0), record_on_day(20), record_on_day(40)];
    let alerts = alerts_now(&history);
    assert!(alerts
        .iter()
        .any(|a| matches!(a.kind, AlertKind::InfrequentMeasurements { .. })));
}

#[test]
fn entirely_absent_required_metrics_are_reported() {
    let history = history_of(3, |_, r| {
        r.sleep_hours = Some(7.5);
    });
    let alerts = alerts_now(&history);

    let missing = alerts
        .iter()
        .find_map(|a| match &a.kind {
            AlertKind::MissingMetrics { missing } => Some(missing.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(
        missing,
        vec![
            Metric::SystolicBp,
            Metric::DiastolicBp,
            Metric::GlucoseFasting,
            Metric::Bmi
        ]
    );
}

#[test]
fn erratic_blood_pressure_raises_variability_info() {
    let history = history_of(6, |day, r| {
        r.systolic_bp = Some(if day % 2 == 0 { 100.0 } else { 160.0 });
        r.diastolic_bp = Some(80.0);
    });
    let alerts = alerts_now(&history);
    assert!(alerts
        .iter()
        .any(|a| matches!(a.kind, AlertKind::BloodPressureVariability { .. })));
}

#[test]
fn steady_blood_pressure_passes_the_adherence_check() {
    let history = history_of(6, |_, r| {
        r.systolic_bp = Some(118.0);
        r.diastolic_bp = Some(76.0);
    });
    let alerts = alerts_now(&history);
    assert!(!alerts
        .iter()
        .any(|a| matches!(a.kind, AlertKind::BloodPressureVariability { .. })));
}

#[test]
fn summary_counts_by_severity() {
    let history = vec![risky_record(0)];
    let now = base_date();
    let summary = engine().alert_summary_at(&history, now);

    assert_eq!(
        summary.total_alerts,
        summary.critical + summary.warning + summary.info
    );
    // Nothing in the risky preset crosses a critical threshold.
    assert_eq!(summary.critical, 0);
    assert!(summary.warning > 0);
    let most_urgent = summary.most_urgent.unwrap();
    assert_eq!(most_urgent.severity, AlertSeverity::Warning);
}

#[test]
fn repeated_metric_alerts_consolidate_with_escalation() {
    let mut record = record_on_day(0);
    record.systolic_bp = Some(185.0);
    let alerts = alerts_now(&[record]);
    let recommendations = engine().consolidated_recommendations(&alerts);

    let systolic = recommendations
        .iter()
        .find(|r| r.metric == Some(Metric::SystolicBp))
        .unwrap();
    assert_eq!(systolic.priority, AlertSeverity::Critical);
    assert!(systolic
        .recommendation
        .contains("Immediate medical attention"));
}

#[test]
fn single_alert_passes_its_recommendation_through() {
    let mut record = record_on_day(0);
    record.systolic_bp = Some(115.0);
    record.diastolic_bp = Some(75.0);
    record.glucose_fasting = Some(85.0);
    record.bmi = Some(22.0);
    record.stress_level = Some(8.0);
    let alerts = alerts_now(&[record]);
    assert_eq!(alerts.len(), 1);

    let recommendations = engine().consolidated_recommendations(&alerts);
    assert_eq!(recommendations.len(), 1);
    assert_eq!(
        recommendations[0].recommendation,
        "Consider stress management techniques"
    );
}
