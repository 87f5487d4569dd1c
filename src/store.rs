// ABOUTME: Flat-JSON persistence for the measurement history, goals, and tracked interventions
// ABOUTME: Wholesale load at open, wholesale rewrite on every mutation, ascending-date invariant
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pulseboard Contributors

//! Data store.
//!
//! Three flat JSON files under the configured directory: `health_data.json`
//! for the measurement history, `user_goals.json`, and
//! `active_interventions.json`. Every mutation rewrites the affected file
//! in full; there is no locking and no partial-write recovery. The store
//! guarantees the history stays in ascending date order, which the trend
//! and alert engines rely on.

use crate::config::StoreConfig;
use chrono::{DateTime, Utc};
use pulseboard_core::models::{
    ActiveIntervention, Goal, GoalStatus, MeasurementRecord, Metric,
};
use pulseboard_core::{HealthError, HealthResult};
use pulseboard_intelligence::interventions::ProgressTemplate;
use pulseboard_intelligence::metrics::{trend_window_means, TrendDirection};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

const RECORDS_FILE: &str = "health_data.json";
const GOALS_FILE: &str = "user_goals.json";
const INTERVENTIONS_FILE: &str = "active_interventions.json";

/// Fields for a goal being created; the store stamps the rest
#[derive(Debug, Clone)]
pub struct NewGoal {
    /// Free-form goal category
    pub goal_type: String,
    /// Metric the goal targets, when it maps to one
    pub metric: Option<Metric>,
    /// Target value for the metric
    pub target_value: Option<f64>,
    /// Date the user wants to reach the target by
    pub target_date: Option<chrono::NaiveDate>,
}

/// Summary statistics for one metric across the whole history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricStatistics {
    /// Mean of present values
    pub mean: f64,
    /// Median of present values
    pub median: f64,
    /// Sample standard deviation of present values
    pub std_dev: f64,
    /// Smallest present value
    pub min: f64,
    /// Largest present value
    pub max: f64,
    /// Value on the newest record, when present there
    pub latest: Option<f64>,
}

/// Recent-vs-historical movement of one metric
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricTrendSummary {
    /// Direction of the movement
    pub direction: TrendDirection,
    /// Percent magnitude relative to the historical mean
    pub magnitude_percent: f64,
}

/// Per-metric statistics plus trend summaries for the history
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HealthStatistics {
    /// Statistics for every metric with at least one present value
    pub metrics: BTreeMap<Metric, MetricStatistics>,
    /// Trend summaries, present only for metrics with 2+ present values
    pub trends: BTreeMap<Metric, MetricTrendSummary>,
}

/// Flat-JSON store for records, goals, and tracked interventions
pub struct HealthDataStore {
    config: StoreConfig,
    records: Vec<MeasurementRecord>,
    goals: Vec<Goal>,
    interventions: Vec<ActiveIntervention>,
}

impl HealthDataStore {
    /// Open the store, loading whatever files exist under the data dir.
    ///
    /// Missing files load as empty collections; the directory is created
    /// if absent. A corrupt file is an error, not an empty collection.
    ///
    /// # Errors
    /// Returns an error when the directory cannot be created or a data
    /// file exists but cannot be read or parsed.
    pub fn open(config: StoreConfig) -> HealthResult<Self> {
        fs::create_dir_all(&config.data_dir)
            .map_err(|e| HealthError::io(config.data_dir.clone(), e))?;

        let mut records: Vec<MeasurementRecord> =
            load_json(&config.data_dir.join(RECORDS_FILE), "measurement history")?;
        records.sort_by_key(|r| r.date);
        let goals = load_json(&config.data_dir.join(GOALS_FILE), "user goals")?;
        let interventions = load_json(
            &config.data_dir.join(INTERVENTIONS_FILE),
            "active interventions",
        )?;

        info!(
            dir = %config.data_dir.display(),
            records = records.len(),
            "Opened health data store"
        );
        Ok(Self {
            config,
            records,
            goals,
            interventions,
        })
    }

    /// The full history in ascending date order
    #[must_use]
    pub fn records(&self) -> &[MeasurementRecord] {
        &self.records
    }

    /// The newest record, if any
    #[must_use]
    pub fn latest(&self) -> Option<&MeasurementRecord> {
        self.records.last()
    }

    /// The newest records, newest first
    #[must_use]
    pub fn recent(&self, limit: usize) -> Vec<MeasurementRecord> {
        self.records.iter().rev().take(limit).cloned().collect()
    }

    /// Records with dates inside the inclusive range
    #[must_use]
    pub fn range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Vec<MeasurementRecord> {
        self.records
            .iter()
            .filter(|r| r.date >= start && r.date <= end)
            .cloned()
            .collect()
    }

    /// Append a record, keeping the history sorted by date.
    ///
    /// # Errors
    /// Returns an error when persisting the history fails.
    pub fn add_record(&mut self, record: MeasurementRecord) -> HealthResult<()> {
        self.records.push(record);
        self.records.sort_by_key(|r| r.date);
        debug!(records = self.records.len(), "Record added");
        self.save_records()
    }

    /// Replace the record at `index`, re-sorting afterwards.
    ///
    /// # Errors
    /// Returns [`HealthError::RecordIndexOutOfRange`] for a bad index, or
    /// an error when persisting fails.
    pub fn update_record(
        &mut self,
        index: usize,
        record: MeasurementRecord,
    ) -> HealthResult<()> {
        let len = self.records.len();
        let slot = self
            .records
            .get_mut(index)
            .ok_or(HealthError::RecordIndexOutOfRange { index, len })?;
        *slot = record;
        self.records.sort_by_key(|r| r.date);
        self.save_records()
    }

    /// Delete and return the record at `index`.
    ///
    /// # Errors
    /// Returns [`HealthError::RecordIndexOutOfRange`] for a bad index, or
    /// an error when persisting fails.
    pub fn delete_record(&mut self, index: usize) -> HealthResult<MeasurementRecord> {
        if index >= self.records.len() {
            return Err(HealthError::RecordIndexOutOfRange {
                index,
                len: self.records.len(),
            });
        }
        let removed = self.records.remove(index);
        self.save_records()?;
        Ok(removed)
    }

    /// All goals in creation order
    #[must_use]
    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    /// Add a goal, stamping creation time and active status.
    ///
    /// # Errors
    /// Returns an error when persisting the goals fails.
    pub fn add_goal(&mut self, draft: NewGoal) -> HealthResult<()> {
        self.goals.push(Goal {
            goal_type: draft.goal_type,
            metric: draft.metric,
            target_value: draft.target_value,
            target_date: draft.target_date,
            created_at: Utc::now(),
            status: GoalStatus::Active,
        });
        self.save_goals()
    }

    /// Replace the goal at `index`.
    ///
    /// # Errors
    /// Returns [`HealthError::GoalIndexOutOfRange`] for a bad index, or an
    /// error when persisting fails.
    pub fn update_goal(&mut self, index: usize, goal: Goal) -> HealthResult<()> {
        let len = self.goals.len();
        let slot = self
            .goals
            .get_mut(index)
            .ok_or(HealthError::GoalIndexOutOfRange { index, len })?;
        *slot = goal;
        self.save_goals()
    }

    /// All tracked interventions
    #[must_use]
    pub fn active_interventions(&self) -> &[ActiveIntervention] {
        &self.interventions
    }

    /// Start tracking an intervention from its progress template.
    ///
    /// Returns the generated instance id; two trackings of the same
    /// catalog entry get distinct ids.
    ///
    /// # Errors
    /// Returns an error when persisting the interventions fails.
    pub fn track_intervention(&mut self, template: &ProgressTemplate) -> HealthResult<Uuid> {
        let id = Uuid::new_v4();
        self.interventions.push(ActiveIntervention {
            id,
            title: template.intervention_title.clone(),
            target_duration: template.target_duration.clone(),
            progress_metrics: template.progress_metrics.clone(),
            weekly_goals: template.weekly_goals.clone(),
            start_date: template.start_date,
            status: template.status,
            overall_progress: 0,
            notes: String::new(),
            last_updated: template.start_date,
        });
        self.save_interventions()?;
        info!(%id, title = %template.intervention_title, "Intervention tracking started");
        Ok(id)
    }

    /// Replace a tracked intervention, addressed by its instance id.
    ///
    /// The id is preserved and `last_updated` is stamped.
    ///
    /// # Errors
    /// Returns [`HealthError::InterventionNotFound`] when no tracked
    /// intervention has the id, or an error when persisting fails.
    pub fn update_intervention(&mut self, updated: ActiveIntervention) -> HealthResult<()> {
        let id = updated.id;
        let slot = self
            .interventions
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(HealthError::InterventionNotFound { id })?;
        *slot = ActiveIntervention {
            id,
            last_updated: Utc::now(),
            ..updated
        };
        self.save_interventions()
    }

    /// Per-metric statistics plus trend summaries.
    ///
    /// Metrics with no present values are omitted. Trends use the same
    /// windowed comparison as the trend detector and appear only for
    /// metrics with 2+ present values.
    #[must_use]
    pub fn statistics(&self) -> HealthStatistics {
        let mut stats = HealthStatistics::default();

        for metric in Metric::ALL {
            let values: Vec<f64> = self
                .records
                .iter()
                .filter_map(|r| r.metric(metric))
                .collect();
            if values.is_empty() {
                continue;
            }

            stats
                .metrics
                .insert(metric, summarize(&values, self.latest_value(metric)));

            if values.len() >= 2 {
                let (recent, historical) = trend_window_means(&values);
                let direction = if recent > historical {
                    TrendDirection::Increasing
                } else {
                    TrendDirection::Decreasing
                };
                let magnitude_percent = if historical.abs() < f64::EPSILON {
                    0.0
                } else {
                    (recent - historical).abs() / historical * 100.0
                };
                stats.trends.insert(
                    metric,
                    MetricTrendSummary {
                        direction,
                        magnitude_percent,
                    },
                );
            }
        }

        stats
    }

    /// Serialize the full history as pretty-printed JSON.
    ///
    /// # Errors
    /// Returns an error when serialization fails.
    pub fn export_json(&self) -> HealthResult<String> {
        serde_json::to_string_pretty(&self.records)
            .map_err(|e| HealthError::serialization("history export", e))
    }

    /// Merge records from a JSON array into the history.
    ///
    /// Exact duplicates of existing records are skipped. Returns the
    /// number of records actually added.
    ///
    /// # Errors
    /// Returns an error when the input does not parse or persisting fails.
    pub fn import_json(&mut self, data: &str) -> HealthResult<usize> {
        let incoming: Vec<MeasurementRecord> = serde_json::from_str(data)
            .map_err(|e| HealthError::serialization("history import", e))?;

        let mut added = 0;
        for record in incoming {
            if !self.records.contains(&record) {
                self.records.push(record);
                added += 1;
            }
        }
        self.records.sort_by_key(|r| r.date);
        self.save_records()?;
        info!(added, "History import complete");
        Ok(added)
    }

    fn latest_value(&self, metric: Metric) -> Option<f64> {
        self.records.last().and_then(|r| r.metric(metric))
    }

    fn save_records(&self) -> HealthResult<()> {
        save_json(
            &self.config.data_dir.join(RECORDS_FILE),
            &self.records,
            "measurement history",
        )
    }

    fn save_goals(&self) -> HealthResult<()> {
        save_json(&self.config.data_dir.join(GOALS_FILE), &self.goals, "user goals")
    }

    fn save_interventions(&self) -> HealthResult<()> {
        save_json(
            &self.config.data_dir.join(INTERVENTIONS_FILE),
            &self.interventions,
            "active interventions",
        )
    }
}

fn load_json<T: for<'de> Deserialize<'de>>(
    path: &Path,
    context: &'static str,
) -> HealthResult<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let raw = fs::read_to_string(path).map_err(|e| HealthError::io(path, e))?;
    serde_json::from_str(&raw).map_err(|e| HealthError::serialization(context, e))
}

fn save_json<T: Serialize>(path: &PathBuf, data: &[T], context: &'static str) -> HealthResult<()> {
    let encoded = serde_json::to_string_pretty(data)
        .map_err(|e| HealthError::serialization(context, e))?;
    fs::write(path, encoded).map_err(|e| HealthError::io(path.clone(), e))
}

fn summarize(values: &[f64], latest: Option<f64>) -> MetricStatistics {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let avg = mean(values);
    let median = if sorted.len() % 2 == 0 {
        (sorted[sorted.len() / 2 - 1] + sorted[sorted.len() / 2]) / 2.0
    } else {
        sorted[sorted.len() / 2]
    };

    MetricStatistics {
        mean: avg,
        median,
        std_dev: std_dev(values, avg),
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        latest,
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
