// ABOUTME: Core data models for health measurement records, goals, and tracked interventions
// ABOUTME: Defines MeasurementRecord, the Metric accessor enum, and persistence value objects
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pulseboard Contributors

//! Data models for the measurement history and its satellites.
//!
//! A [`MeasurementRecord`] is one dated snapshot of biometric and lifestyle
//! values. Records may be sparse: every clinical field is optional and the
//! engines fill gaps with neutral defaults. The [`Metric`] enum gives the
//! alert tables and trend detector a uniform, typed way to read any numeric
//! field off a record without string-keyed lookups.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Biological gender recorded with a measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    /// Female
    Female,
    /// Male
    Male,
    /// Other or undisclosed
    Other,
}

/// Family history flags relevant to chronic-condition risk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyHistory {
    /// First-degree relative with diabetes
    #[serde(default)]
    pub diabetes: bool,
    /// First-degree relative with hypertension
    #[serde(default)]
    pub hypertension: bool,
    /// First-degree relative with heart disease
    #[serde(default)]
    pub heart_disease: bool,
}

/// One dated snapshot of biometric and lifestyle measurements.
///
/// Records are immutable once appended except through explicit
/// update-by-index on the store. The history keeps records in ascending
/// date order; duplicate dates are permitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    /// When the measurements were taken
    pub date: DateTime<Utc>,
    /// Age in years
    #[serde(default)]
    pub age: Option<f64>,
    /// Height in centimeters
    #[serde(default)]
    pub height_cm: Option<f64>,
    /// Weight in kilograms
    #[serde(default)]
    pub weight_kg: Option<f64>,
    /// Body mass index, derived from height and weight at entry time
    #[serde(default)]
    pub bmi: Option<f64>,
    /// Waist circumference in centimeters
    #[serde(default)]
    pub waist_circumference: Option<f64>,
    /// Recorded gender
    #[serde(default)]
    pub gender: Option<Gender>,
    /// Systolic blood pressure in mmHg
    #[serde(default)]
    pub systolic_bp: Option<f64>,
    /// Diastolic blood pressure in mmHg
    #[serde(default)]
    pub diastolic_bp: Option<f64>,
    /// Resting heart rate in bpm
    #[serde(default)]
    pub resting_heart_rate: Option<f64>,
    /// Fasting glucose in mg/dL
    #[serde(default)]
    pub glucose_fasting: Option<f64>,
    /// Glycated hemoglobin percentage
    #[serde(default)]
    pub hba1c: Option<f64>,
    /// Total cholesterol in mg/dL
    #[serde(default)]
    pub total_cholesterol: Option<f64>,
    /// HDL cholesterol in mg/dL
    #[serde(default)]
    pub hdl_cholesterol: Option<f64>,
    /// LDL cholesterol in mg/dL
    #[serde(default)]
    pub ldl_cholesterol: Option<f64>,
    /// Triglycerides in mg/dL
    #[serde(default)]
    pub triglycerides: Option<f64>,
    /// Minutes of exercise per week
    #[serde(default)]
    pub exercise_minutes_per_week: Option<f64>,
    /// Average nightly sleep in hours
    #[serde(default)]
    pub sleep_hours: Option<f64>,
    /// Self-reported stress on a 1-10 scale
    #[serde(default)]
    pub stress_level: Option<f64>,
    /// Current smoker
    #[serde(default)]
    pub smoking_status: Option<bool>,
    /// Alcohol consumption on a 0-3 scale
    #[serde(default)]
    pub alcohol_consumption: Option<u8>,
    /// Self-reported diet quality on a 1-4 scale
    #[serde(default)]
    pub diet_quality: Option<u8>,
    /// Family history flags
    #[serde(default)]
    pub family_history: FamilyHistory,
    /// Free-text current medications
    #[serde(default)]
    pub medications: Option<String>,
    /// Free-text known conditions
    #[serde(default)]
    pub conditions: Option<String>,
}

impl MeasurementRecord {
    /// Create an empty record for the given date
    #[must_use]
    pub const fn new(date: DateTime<Utc>) -> Self {
        Self {
            date,
            age: None,
            height_cm: None,
            weight_kg: None,
            bmi: None,
            waist_circumference: None,
            gender: None,
            systolic_bp: None,
            diastolic_bp: None,
            resting_heart_rate: None,
            glucose_fasting: None,
            hba1c: None,
            total_cholesterol: None,
            hdl_cholesterol: None,
            ldl_cholesterol: None,
            triglycerides: None,
            exercise_minutes_per_week: None,
            sleep_hours: None,
            stress_level: None,
            smoking_status: None,
            alcohol_consumption: None,
            diet_quality: None,
            family_history: FamilyHistory {
                diabetes: false,
                hypertension: false,
                heart_disease: false,
            },
            medications: None,
            conditions: None,
        }
    }

    /// Read any numeric metric off the record by its [`Metric`] tag
    #[must_use]
    pub fn metric(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Age => self.age,
            Metric::HeightCm => self.height_cm,
            Metric::WeightKg => self.weight_kg,
            Metric::Bmi => self.bmi,
            Metric::WaistCircumference => self.waist_circumference,
            Metric::SystolicBp => self.systolic_bp,
            Metric::DiastolicBp => self.diastolic_bp,
            Metric::RestingHeartRate => self.resting_heart_rate,
            Metric::GlucoseFasting => self.glucose_fasting,
            Metric::Hba1c => self.hba1c,
            Metric::TotalCholesterol => self.total_cholesterol,
            Metric::HdlCholesterol => self.hdl_cholesterol,
            Metric::LdlCholesterol => self.ldl_cholesterol,
            Metric::Triglycerides => self.triglycerides,
            Metric::ExerciseMinutesPerWeek => self.exercise_minutes_per_week,
            Metric::SleepHours => self.sleep_hours,
            Metric::StressLevel => self.stress_level,
            Metric::SmokingStatus => self.smoking_status.map(|s| if s { 1.0 } else { 0.0 }),
            Metric::AlcoholConsumption => self.alcohol_consumption.map(f64::from),
        }
    }
}

/// Numeric metrics the engines can read off a measurement record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Age in years
    Age,
    /// Height in centimeters
    HeightCm,
    /// Weight in kilograms
    WeightKg,
    /// Body mass index
    Bmi,
    /// Waist circumference in centimeters
    WaistCircumference,
    /// Systolic blood pressure in mmHg
    SystolicBp,
    /// Diastolic blood pressure in mmHg
    DiastolicBp,
    /// Resting heart rate in bpm
    RestingHeartRate,
    /// Fasting glucose in mg/dL
    GlucoseFasting,
    /// Glycated hemoglobin percentage
    Hba1c,
    /// Total cholesterol in mg/dL
    TotalCholesterol,
    /// HDL cholesterol in mg/dL
    HdlCholesterol,
    /// LDL cholesterol in mg/dL
    LdlCholesterol,
    /// Triglycerides in mg/dL
    Triglycerides,
    /// Minutes of exercise per week
    ExerciseMinutesPerWeek,
    /// Average nightly sleep in hours
    SleepHours,
    /// Stress level on a 1-10 scale
    StressLevel,
    /// Current smoker (0/1)
    SmokingStatus,
    /// Alcohol consumption on a 0-3 scale
    AlcoholConsumption,
}

impl Metric {
    /// Every readable metric, in declaration order
    pub const ALL: [Self; 19] = [
        Self::Age,
        Self::HeightCm,
        Self::WeightKg,
        Self::Bmi,
        Self::WaistCircumference,
        Self::SystolicBp,
        Self::DiastolicBp,
        Self::RestingHeartRate,
        Self::GlucoseFasting,
        Self::Hba1c,
        Self::TotalCholesterol,
        Self::HdlCholesterol,
        Self::LdlCholesterol,
        Self::Triglycerides,
        Self::ExerciseMinutesPerWeek,
        Self::SleepHours,
        Self::StressLevel,
        Self::SmokingStatus,
        Self::AlcoholConsumption,
    ];

    /// Human-readable name used in alert and insight messages
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Age => "Age",
            Self::HeightCm => "Height",
            Self::WeightKg => "Weight",
            Self::Bmi => "BMI",
            Self::WaistCircumference => "Waist circumference",
            Self::SystolicBp => "Systolic blood pressure",
            Self::DiastolicBp => "Diastolic blood pressure",
            Self::RestingHeartRate => "Resting heart rate",
            Self::GlucoseFasting => "Fasting glucose",
            Self::Hba1c => "HbA1c",
            Self::TotalCholesterol => "Total cholesterol",
            Self::HdlCholesterol => "HDL cholesterol",
            Self::LdlCholesterol => "LDL cholesterol",
            Self::Triglycerides => "Triglycerides",
            Self::ExerciseMinutesPerWeek => "Weekly exercise",
            Self::SleepHours => "Sleep hours",
            Self::StressLevel => "Stress level",
            Self::SmokingStatus => "Smoking status",
            Self::AlcoholConsumption => "Alcohol consumption",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Lifecycle status of a user goal. Advisory only: the engines never
/// auto-complete or expire a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    /// Goal is being pursued
    Active,
    /// User marked the goal as reached
    Completed,
    /// User gave up on the goal
    Abandoned,
}

/// A user-declared target for a metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    /// Free-form goal category (e.g. "weight_loss", "bp_control")
    pub goal_type: String,
    /// Metric the goal targets, when it maps to one
    #[serde(default)]
    pub metric: Option<Metric>,
    /// Target value for the metric
    #[serde(default)]
    pub target_value: Option<f64>,
    /// Date the user wants to reach the target by
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
    /// When the goal was created (stamped by the store)
    pub created_at: DateTime<Utc>,
    /// Advisory lifecycle status
    pub status: GoalStatus,
}

/// Lifecycle status of a tracked intervention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterventionStatus {
    /// Tracking shell created but no progress logged
    NotStarted,
    /// Intervention is underway
    Active,
    /// All weeks completed
    Completed,
    /// User stopped the intervention
    Abandoned,
}

/// One week of an intervention's goal checklist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyGoal {
    /// Week number, starting at 1
    pub week: u8,
    /// The action step for this week
    pub goal: String,
    /// Whether the user checked it off
    pub completed: bool,
}

/// A catalog intervention the user elected to track.
///
/// Tracked interventions carry a generated instance id so two entries with
/// the same catalog title remain distinguishable; updates address the id,
/// never the title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveIntervention {
    /// Generated instance id (stable across updates)
    pub id: Uuid,
    /// Catalog title of the intervention
    pub title: String,
    /// Expected duration copied from the catalog entry
    pub target_duration: String,
    /// Metrics to watch while the intervention runs
    pub progress_metrics: Vec<String>,
    /// Weekly goal checklist derived from the entry's action steps
    pub weekly_goals: Vec<WeeklyGoal>,
    /// When tracking started
    pub start_date: DateTime<Utc>,
    /// Lifecycle status
    pub status: InterventionStatus,
    /// Overall progress, 0-100
    pub overall_progress: u8,
    /// Free-text notes
    pub notes: String,
    /// Last time the entry was updated
    pub last_updated: DateTime<Utc>,
}
