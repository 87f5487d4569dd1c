// ABOUTME: Integration tests for the flat-JSON store using temporary directories
// ABOUTME: Covers persistence round trips, index errors, intervention ids, and statistics

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{base_date, healthy_record, record_on_day, risky_record};
use pulseboard::store::NewGoal;
use pulseboard::{HealthDataStore, StoreConfig};
use pulseboard_core::models::{GoalStatus, InterventionStatus, Metric};
use pulseboard_core::HealthError;
use pulseboard_intelligence::interventions::InterventionEngine;

fn open_store(dir: &tempfile::TempDir) -> HealthDataStore {
    HealthDataStore::open(StoreConfig::with_dir(dir.path())).unwrap()
}

#[test]
fn records_survive_a_reopen() {
    let dir = tempfile::tempdir().unwrap();

    let mut store = open_store(&dir);
    store.add_record(healthy_record(1)).unwrap();
    store.add_record(risky_record(0)).unwrap();
    drop(store);

    let reopened = open_store(&dir);
    assert_eq!(reopened.records().len(), 2);
    // Out-of-order inserts come back sorted ascending by date.
    assert_eq!(reopened.records()[0], risky_record(0));
    assert_eq!(reopened.records()[1], healthy_record(1));
}

#[test]
fn latest_and_recent_read_from_the_tail() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir);
    for day in 0..4 {
        store.add_record(record_on_day(day)).unwrap();
    }

    assert_eq!(store.latest().unwrap().date, record_on_day(3).date);
    let recent = store.recent(2);
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].date, record_on_day(3).date);
    assert_eq!(recent[1].date, record_on_day(2).date);
}

#[test]
fn range_is_inclusive_on_both_ends() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir);
    for day in 0..5 {
        store.add_record(record_on_day(day)).unwrap();
    }

    let slice = store.range(record_on_day(1).date, record_on_day(3).date);
    assert_eq!(slice.len(), 3);
}

#[test]
fn update_resorts_and_delete_returns_the_record() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir);
    store.add_record(record_on_day(0)).unwrap();
    store.add_record(record_on_day(1)).unwrap();

    // Moving the first record past the second re-sorts the history.
    store.update_record(0, record_on_day(5)).unwrap();
    assert_eq!(store.records()[1].date, record_on_day(5).date);

    let removed = store.delete_record(0).unwrap();
    assert_eq!(removed.date, record_on_day(1).date);
    assert_eq!(store.records().len(), 1);
}

#[test]
fn bad_indices_are_errors() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir);

    let update = store.update_record(3, record_on_day(0));
    assert!(matches!(
        update,
        Err(HealthError::RecordIndexOutOfRange { index: 3, len: 0 })
    ));
    assert!(matches!(
        store.delete_record(0),
        Err(HealthError::RecordIndexOutOfRange { .. })
    ));
    assert!(matches!(
        store.update_goal(
            0,
            pulseboard_core::models::Goal {
                goal_type: "weight_loss".into(),
                metric: None,
                target_value: None,
                target_date: None,
                created_at: base_date(),
                status: GoalStatus::Active,
            }
        ),
        Err(HealthError::GoalIndexOutOfRange { .. })
    ));
}

#[test]
fn goals_are_stamped_active_on_creation() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir);
    store
        .add_goal(NewGoal {
            goal_type: "bp_control".into(),
            metric: Some(Metric::SystolicBp),
            target_value: Some(120.0),
            target_date: None,
        })
        .unwrap();
    drop(store);

    let reopened = open_store(&dir);
    assert_eq!(reopened.goals().len(), 1);
    assert_eq!(reopened.goals()[0].status, GoalStatus::Active);
    assert_eq!(reopened.goals()[0].metric, Some(Metric::SystolicBp));
}

#[test]
fn tracked_interventions_get_distinct_ids() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir);

    let engine = InterventionEngine::new();
    let entry = &engine.catalog()[0];
    let template = engine.progress_template_at(entry, base_date());

    let first = store.track_intervention(&template).unwrap();
    let second = store.track_intervention(&template).unwrap();
    assert_ne!(first, second);

    let reopened = open_store(&dir);
    assert_eq!(reopened.active_interventions().len(), 2);
    assert_eq!(
        reopened.active_interventions()[0].status,
        InterventionStatus::NotStarted
    );
    assert_eq!(reopened.active_interventions()[0].weekly_goals.len(), 4);
}

#[test]
fn intervention_updates_address_the_id() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir);

    let engine = InterventionEngine::new();
    let template = engine.progress_template_at(&engine.catalog()[0], base_date());
    let id = store.track_intervention(&template).unwrap();

    let mut updated = store.active_interventions()[0].clone();
    updated.overall_progress = 40;
    updated.status = InterventionStatus::Active;
    store.update_intervention(updated).unwrap();

    let stored = &store.active_interventions()[0];
    assert_eq!(stored.id, id);
    assert_eq!(stored.overall_progress, 40);
    assert!(stored.last_updated >= base_date());

    let mut missing = store.active_interventions()[0].clone();
    missing.id = uuid::Uuid::new_v4();
    assert!(matches!(
        store.update_intervention(missing),
        Err(HealthError::InterventionNotFound { .. })
    ));
}

#[test]
fn export_import_round_trip_skips_duplicates() {
    let source_dir = tempfile::tempdir().unwrap();
    let mut source = open_store(&source_dir);
    source.add_record(healthy_record(0)).unwrap();
    source.add_record(risky_record(1)).unwrap();
    let exported = source.export_json().unwrap();

    let target_dir = tempfile::tempdir().unwrap();
    let mut target = open_store(&target_dir);
    assert_eq!(target.import_json(&exported).unwrap(), 2);
    assert_eq!(target.records().len(), 2);

    // Importing the same document again adds nothing.
    assert_eq!(target.import_json(&exported).unwrap(), 0);
    assert_eq!(target.records().len(), 2);
}

#[test]
fn statistics_summarize_present_metrics_only() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir);
    for (day, value) in [(0, 20.0), (1, 25.0), (2, 30.0)] {
        let mut record = record_on_day(day);
        record.bmi = Some(value);
        store.add_record(record).unwrap();
    }

    let stats = store.statistics();
    let bmi = &stats.metrics[&Metric::Bmi];
    assert!((bmi.mean - 25.0).abs() < 1e-9);
    assert!((bmi.median - 25.0).abs() < 1e-9);
    assert!((bmi.min - 20.0).abs() < f64::EPSILON);
    assert!((bmi.max - 30.0).abs() < f64::EPSILON);
    assert_eq!(bmi.latest, Some(30.0));
    assert!((bmi.std_dev - 5.0).abs() < 1e-9);

    assert!(!stats.metrics.contains_key(&Metric::GlucoseFasting));
    assert!(stats.trends.contains_key(&Metric::Bmi));
}

#[test]
fn statistics_trends_agree_with_the_trend_detector() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_store(&dir);
    let series = [100.0, 180.0, 180.0, 100.0, 100.0, 110.0];
    for (day, value) in series.iter().enumerate() {
        let mut record = record_on_day(day as i64);
        record.systolic_bp = Some(*value);
        store.add_record(record).unwrap();
    }

    let stats = store.statistics();
    let summary = &stats.trends[&Metric::SystolicBp];
    let detected = pulseboard_intelligence::metrics::detect_trends(store.records());
    let systolic = detected
        .iter()
        .find(|t| t.metric == Metric::SystolicBp)
        .unwrap();

    assert_eq!(summary.direction, systolic.direction);
    assert!((summary.magnitude_percent - systolic.magnitude_percent).abs() < 1e-9);
}

#[test]
fn empty_store_has_empty_statistics() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir);
    let stats = store.statistics();
    assert!(stats.metrics.is_empty());
    assert!(stats.trends.is_empty());
}
