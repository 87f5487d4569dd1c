// ABOUTME: Shared test helpers for building measurement records and histories
// ABOUTME: Provides dated record builders with healthy and high-risk presets

#![allow(dead_code)]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use pulseboard_core::models::MeasurementRecord;

/// Fixed anchor so histories are reproducible
pub fn base_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap()
}

/// Empty record dated `day` days after the anchor
pub fn record_on_day(day: i64) -> MeasurementRecord {
    MeasurementRecord::new(base_date() + Duration::days(day))
}

/// Record with every scored field in its healthy range
pub fn healthy_record(day: i64) -> MeasurementRecord {
    let mut record = record_on_day(day);
    record.age = Some(35.0);
    record.bmi = Some(22.0);
    record.waist_circumference = Some(75.0);
    record.systolic_bp = Some(115.0);
    record.diastolic_bp = Some(75.0);
    record.glucose_fasting = Some(85.0);
    record.total_cholesterol = Some(180.0);
    record.hdl_cholesterol = Some(60.0);
    record.ldl_cholesterol = Some(90.0);
    record.triglycerides = Some(100.0);
    record.exercise_minutes_per_week = Some(200.0);
    record.sleep_hours = Some(7.5);
    record.stress_level = Some(2.0);
    record.smoking_status = Some(false);
    record
}

/// Record crossing every major penalty threshold
pub fn risky_record(day: i64) -> MeasurementRecord {
    let mut record = record_on_day(day);
    record.age = Some(60.0);
    record.bmi = Some(36.0);
    record.waist_circumference = Some(110.0);
    record.systolic_bp = Some(165.0);
    record.diastolic_bp = Some(102.0);
    record.glucose_fasting = Some(140.0);
    record.total_cholesterol = Some(260.0);
    record.hdl_cholesterol = Some(30.0);
    record.triglycerides = Some(220.0);
    record.exercise_minutes_per_week = Some(30.0);
    record.sleep_hours = Some(5.0);
    record.stress_level = Some(9.0);
    record.smoking_status = Some(true);
    record
}

/// History of daily records where `fill` sets the fields per record
pub fn history_of(n: i64, fill: impl Fn(i64, &mut MeasurementRecord)) -> Vec<MeasurementRecord> {
    (0..n)
        .map(|day| {
            let mut record = record_on_day(day);
            fill(day, &mut record);
            record
        })
        .collect()
}
