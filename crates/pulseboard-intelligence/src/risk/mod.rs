// ABOUTME: Chronic-condition risk scoring behind a swappable RiskScorer seam
// ABOUTME: Ships a synthetic-data oracle trained once at construction, plus factor analysis
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pulseboard Contributors

//! Risk engine for three chronic conditions.
//!
//! [`SyntheticRiskModel`] is a closed, non-adaptive oracle: at construction
//! it samples a synthetic cohort from fixed distributions, labels it with
//! hand-written clinical disjunctions, and fits one standardized tree
//! ensemble per condition. It never retrains and never sees real user data;
//! its output is only as good as the synthetic-data/rule correspondence.
//!
//! Callers that need a real model later implement [`RiskScorer`] and swap
//! it in without touching consumers.

mod analysis;
mod forest;
mod synthetic;

pub use analysis::{analyze_risk_factors, detailed_analysis, RiskFactor};
pub use forest::{RandomForest, StandardScaler};
pub use synthetic::SyntheticCohort;

use pulseboard_core::constants::defaults;
use pulseboard_core::models::{MeasurementRecord, Metric};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Number of synthetic rows sampled per training run
const COHORT_SIZE: usize = 1000;

/// Seed for the synthetic cohort and the forest bootstraps
const TRAINING_SEED: u64 = 42;

/// Trees per condition ensemble
const FOREST_SIZE: usize = 100;

/// The chronic conditions the engine scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Elevated fasting glucose trending toward type-2 diabetes
    PreDiabetes,
    /// Sustained high blood pressure
    Hypertension,
    /// Clustered metabolic risk factors
    MetabolicSyndrome,
}

impl Condition {
    /// All scored conditions, in reporting order
    pub const ALL: [Self; 3] = [Self::PreDiabetes, Self::Hypertension, Self::MetabolicSyndrome];

    /// Stable machine name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PreDiabetes => "pre_diabetes",
            Self::Hypertension => "hypertension",
            Self::MetabolicSyndrome => "metabolic_syndrome",
        }
    }

    /// Human-readable name for narratives
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::PreDiabetes => "Pre-Diabetes",
            Self::Hypertension => "Hypertension",
            Self::MetabolicSyndrome => "Metabolic Syndrome",
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of scoring one condition.
///
/// `Unavailable` is distinct from a low score so callers can tell
/// "genuinely low risk" apart from "scoring failed".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RiskScore {
    /// Positive-class probability in [0, 1]
    Scored {
        /// The probability
        value: f64,
    },
    /// The model could not produce a score
    Unavailable {
        /// Why scoring failed
        reason: String,
    },
}

impl RiskScore {
    /// The probability, treating an unavailable score as zero risk
    #[must_use]
    pub fn value_or_zero(&self) -> f64 {
        match self {
            Self::Scored { value } => *value,
            Self::Unavailable { .. } => 0.0,
        }
    }

    /// Whether a probability was produced
    #[must_use]
    pub const fn is_scored(&self) -> bool {
        matches!(self, Self::Scored { .. })
    }
}

/// Mapping from condition to its risk score, rebuilt on every request
pub type RiskScoreSet = BTreeMap<Condition, RiskScore>;

/// A zero-risk score set, the well-defined result for an empty history
#[must_use]
pub fn zero_scores() -> RiskScoreSet {
    Condition::ALL
        .into_iter()
        .map(|c| (c, RiskScore::Scored { value: 0.0 }))
        .collect()
}

/// Seam for risk scoring implementations
pub trait RiskScorer {
    /// Score the latest record of the history for all conditions
    fn score(&self, history: &[MeasurementRecord]) -> RiskScoreSet;
}

/// The 15 features the classifiers consume, in column order
pub const FEATURE_METRICS: [Metric; 15] = [
    Metric::Age,
    Metric::Bmi,
    Metric::SystolicBp,
    Metric::DiastolicBp,
    Metric::GlucoseFasting,
    Metric::TotalCholesterol,
    Metric::HdlCholesterol,
    Metric::LdlCholesterol,
    Metric::Triglycerides,
    Metric::WaistCircumference,
    Metric::ExerciseMinutesPerWeek,
    Metric::SleepHours,
    Metric::StressLevel,
    Metric::SmokingStatus,
    Metric::AlcoholConsumption,
];

// Column indices into a feature row, shared with the synthetic labeler.
pub(crate) const IDX_AGE: usize = 0;
pub(crate) const IDX_BMI: usize = 1;
pub(crate) const IDX_SYSTOLIC: usize = 2;
pub(crate) const IDX_DIASTOLIC: usize = 3;
pub(crate) const IDX_GLUCOSE: usize = 4;
pub(crate) const IDX_HDL: usize = 6;
pub(crate) const IDX_TRIGLYCERIDES: usize = 8;
pub(crate) const IDX_WAIST: usize = 9;

/// Build the model-input feature vector for a record, filling missing
/// fields with the neutral defaults
#[must_use]
pub fn feature_vector(record: &MeasurementRecord) -> [f64; 15] {
    let mut features = [0.0_f64; 15];
    for (i, metric) in FEATURE_METRICS.into_iter().enumerate() {
        features[i] = record
            .metric(metric)
            .unwrap_or_else(|| default_for(metric));
    }
    features
}

fn default_for(metric: Metric) -> f64 {
    match metric {
        Metric::Age => defaults::AGE,
        Metric::Bmi => defaults::BMI,
        Metric::SystolicBp => defaults::SYSTOLIC_BP,
        Metric::DiastolicBp => defaults::DIASTOLIC_BP,
        Metric::GlucoseFasting => defaults::GLUCOSE_FASTING,
        Metric::TotalCholesterol => defaults::TOTAL_CHOLESTEROL,
        Metric::HdlCholesterol => defaults::HDL_CHOLESTEROL,
        Metric::LdlCholesterol => defaults::LDL_CHOLESTEROL,
        Metric::Triglycerides => defaults::TRIGLYCERIDES,
        Metric::WaistCircumference => defaults::WAIST_CIRCUMFERENCE,
        Metric::ExerciseMinutesPerWeek => defaults::EXERCISE_MINUTES_PER_WEEK,
        Metric::SleepHours => defaults::SLEEP_HOURS,
        Metric::StressLevel => defaults::STRESS_LEVEL,
        Metric::SmokingStatus => defaults::SMOKING_STATUS,
        Metric::AlcoholConsumption => defaults::ALCOHOL_CONSUMPTION,
        _ => 0.0,
    }
}

struct ConditionModel {
    scaler: StandardScaler,
    forest: RandomForest,
}

/// Risk model trained once, at construction, on a synthetic cohort.
///
/// Training is deterministic for a fixed seed and blocks until complete;
/// there is no retraining and the fitted model is never persisted.
pub struct SyntheticRiskModel {
    models: BTreeMap<Condition, ConditionModel>,
}

impl SyntheticRiskModel {
    /// Sample the cohort, label it, and fit one ensemble per condition.
    ///
    /// This is the only CPU-bound step in the platform; it runs on the
    /// order of a second for 1000 rows of 15 features.
    #[must_use]
    pub fn train() -> Self {
        let cohort = SyntheticCohort::generate(COHORT_SIZE, TRAINING_SEED);

        let mut models = BTreeMap::new();
        for condition in Condition::ALL {
            let labels = cohort.labels(condition);
            let positives = labels.iter().filter(|&&l| l).count();
            debug!(
                condition = %condition,
                rows = cohort.rows().len(),
                positives,
                "Fitting condition ensemble"
            );

            let scaler = StandardScaler::fit(cohort.rows());
            let scaled: Vec<Vec<f64>> = cohort.rows().iter().map(|r| scaler.transform(r)).collect();
            let forest = RandomForest::fit(&scaled, &labels, FOREST_SIZE, TRAINING_SEED);

            models.insert(condition, ConditionModel { scaler, forest });
        }

        Self { models }
    }
}

impl Default for SyntheticRiskModel {
    fn default() -> Self {
        Self::train()
    }
}

impl RiskScorer for SyntheticRiskModel {
    fn score(&self, history: &[MeasurementRecord]) -> RiskScoreSet {
        let Some(latest) = history.last() else {
            return zero_scores();
        };

        let features = feature_vector(latest);
        self.models
            .iter()
            .map(|(&condition, model)| {
                let score = score_one(model, &features).unwrap_or_else(|reason| {
                    warn!(condition = %condition, reason = %reason, "Risk scoring unavailable");
                    RiskScore::Unavailable { reason }
                });
                (condition, score)
            })
            .collect()
    }
}

fn score_one(model: &ConditionModel, features: &[f64; 15]) -> Result<RiskScore, String> {
    if let Some(pos) = features.iter().position(|v| !v.is_finite()) {
        return Err(format!(
            "non-finite feature value in column {} ({})",
            pos,
            FEATURE_METRICS[pos].display_name()
        ));
    }

    let scaled = model.scaler.transform(features);
    let value = model.forest.predict_proba(&scaled);
    if value.is_finite() {
        Ok(RiskScore::Scored { value })
    } else {
        Err("classifier produced a non-finite probability".to_owned())
    }
}
