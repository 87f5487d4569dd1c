// ABOUTME: Rule-based risk factor contributions and per-condition narrative analysis
// ABOUTME: Reads only the latest record, filling missing fields with neutral defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pulseboard Contributors

//! Risk factor analysis.
//!
//! Unlike the classifiers, these are transparent rule tables: each factor
//! carries a fixed contribution weight, and the narratives spell out which
//! thresholds the latest record crossed. Both run on the latest record only.

use crate::risk::Condition;
use pulseboard_core::constants::{blood_pressure, bmi, cholesterol, defaults, glucose, lifestyle, metabolic};
use pulseboard_core::models::MeasurementRecord;
use serde::Serialize;

/// Age at which pre-diabetes narratives flag age as a contributor
const AGE_RISK_YEARS: f64 = 45.0;

/// A named contributor to overall risk with a fixed weight
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskFactor {
    /// Human-readable factor name
    pub name: &'static str,
    /// Contribution weight in (0, 1]
    pub contribution: f64,
}

/// Identify which risk factors the latest record exhibits.
///
/// Returns an empty list for an empty history. Factors are ordered by the
/// fixed evaluation sequence, not by contribution.
#[must_use]
pub fn analyze_risk_factors(history: &[MeasurementRecord]) -> Vec<RiskFactor> {
    let Some(latest) = history.last() else {
        return Vec::new();
    };

    let mut factors = Vec::new();
    let mut push = |name: &'static str, contribution: f64| {
        factors.push(RiskFactor { name, contribution });
    };

    let body_mass = latest.bmi.unwrap_or(defaults::BMI);
    if body_mass > bmi::OBESE {
        push("Obesity", 0.8);
    } else if body_mass > bmi::OVERWEIGHT {
        push("Overweight", 0.5);
    }

    let systolic = latest.systolic_bp.unwrap_or(defaults::SYSTOLIC_BP);
    let diastolic = latest.diastolic_bp.unwrap_or(defaults::DIASTOLIC_BP);
    if systolic > blood_pressure::SYSTOLIC_HIGH || diastolic > blood_pressure::DIASTOLIC_HIGH {
        push("High Blood Pressure", 0.9);
    } else if systolic > blood_pressure::SYSTOLIC_ELEVATED
        || diastolic > blood_pressure::DIASTOLIC_ELEVATED
    {
        push("Elevated Blood Pressure", 0.6);
    }

    let glucose_value = latest.glucose_fasting.unwrap_or(defaults::GLUCOSE_FASTING);
    if glucose_value > glucose::DIABETIC {
        push("High Glucose", 0.9);
    } else if glucose_value > glucose::PRE_DIABETIC {
        push("Elevated Glucose", 0.6);
    }

    if latest
        .total_cholesterol
        .unwrap_or(defaults::TOTAL_CHOLESTEROL)
        > cholesterol::TOTAL_HIGH
    {
        push("High Cholesterol", 0.7);
    }
    if latest.hdl_cholesterol.unwrap_or(defaults::HDL_CHOLESTEROL) < cholesterol::HDL_LOW {
        push("Low HDL", 0.6);
    }

    if latest
        .exercise_minutes_per_week
        .unwrap_or(defaults::EXERCISE_MINUTES_PER_WEEK)
        < lifestyle::EXERCISE_LOW_MINUTES
    {
        push("Insufficient Exercise", 0.5);
    }

    if latest.smoking_status.unwrap_or(false) {
        push("Smoking", 0.8);
    }

    factors
}

/// Build the narrative analysis for one condition from the latest record.
///
/// Returns a fixed placeholder message for an empty history.
#[must_use]
pub fn detailed_analysis(condition: Condition, history: &[MeasurementRecord]) -> String {
    let Some(latest) = history.last() else {
        return "No data available for analysis.".to_owned();
    };

    match condition {
        Condition::PreDiabetes => pre_diabetes_narrative(latest),
        Condition::Hypertension => hypertension_narrative(latest),
        Condition::MetabolicSyndrome => metabolic_syndrome_narrative(latest),
    }
}

fn pre_diabetes_narrative(record: &MeasurementRecord) -> String {
    let mut text = String::from("**Pre-Diabetes Risk Analysis:**\n\n");

    let glucose_value = record.glucose_fasting.unwrap_or(defaults::GLUCOSE_FASTING);
    if glucose_value >= glucose::PRE_DIABETIC {
        text.push_str(&format!(
            "- Fasting glucose ({glucose_value:.0} mg/dL) is in pre-diabetic range (100-125 mg/dL)\n"
        ));
    } else {
        text.push_str(&format!(
            "- Fasting glucose ({glucose_value:.0} mg/dL) is normal (<100 mg/dL)\n"
        ));
    }

    let body_mass = record.bmi.unwrap_or(defaults::BMI);
    if body_mass >= bmi::OBESE {
        text.push_str(&format!("- BMI ({body_mass:.1}) indicates obesity (>=30)\n"));
    } else if body_mass >= bmi::OVERWEIGHT {
        text.push_str(&format!(
            "- BMI ({body_mass:.1}) indicates overweight (25-29.9)\n"
        ));
    } else {
        text.push_str(&format!("- BMI ({body_mass:.1}) is normal (<25)\n"));
    }

    let age = record.age.unwrap_or(defaults::AGE);
    if age >= AGE_RISK_YEARS {
        text.push_str(&format!("- Age ({age:.0}) is a risk factor (>=45 years)\n"));
    }

    text
}

fn hypertension_narrative(record: &MeasurementRecord) -> String {
    let mut text = String::from("**Hypertension Risk Analysis:**\n\n");

    let systolic = record.systolic_bp.unwrap_or(defaults::SYSTOLIC_BP);
    let diastolic = record.diastolic_bp.unwrap_or(defaults::DIASTOLIC_BP);
    if systolic >= blood_pressure::SYSTOLIC_HIGH || diastolic >= blood_pressure::DIASTOLIC_HIGH {
        text.push_str(&format!(
            "- Blood pressure ({systolic:.0}/{diastolic:.0} mmHg) is in hypertensive range\n"
        ));
    } else if systolic >= blood_pressure::SYSTOLIC_ELEVATED
        || diastolic >= blood_pressure::DIASTOLIC_ELEVATED
    {
        text.push_str(&format!(
            "- Blood pressure ({systolic:.0}/{diastolic:.0} mmHg) is elevated\n"
        ));
    } else {
        text.push_str(&format!(
            "- Blood pressure ({systolic:.0}/{diastolic:.0} mmHg) is normal\n"
        ));
    }

    text
}

fn metabolic_syndrome_narrative(record: &MeasurementRecord) -> String {
    let mut text = String::from("**Metabolic Syndrome Risk Analysis:**\n\n");

    let waist = record
        .waist_circumference
        .unwrap_or(defaults::WAIST_CIRCUMFERENCE);
    let triglycerides = record.triglycerides.unwrap_or(defaults::TRIGLYCERIDES);
    let hdl = record.hdl_cholesterol.unwrap_or(defaults::HDL_CHOLESTEROL);

    // Only three of the five ATP III criteria are observable from the
    // intake fields; the denominator stays at five so the narrative does
    // not overstate certainty.
    let mut criteria_met = 0;
    if waist > metabolic::WAIST_HIGH_CM {
        text.push_str(&format!(
            "- Waist circumference ({waist:.0} cm) exceeds threshold\n"
        ));
        criteria_met += 1;
    }
    if triglycerides >= cholesterol::TRIGLYCERIDES_HIGH {
        text.push_str(&format!(
            "- Triglycerides ({triglycerides:.0} mg/dL) are elevated\n"
        ));
        criteria_met += 1;
    }
    if hdl < cholesterol::HDL_LOW {
        text.push_str(&format!("- HDL cholesterol ({hdl:.0} mg/dL) is low\n"));
        criteria_met += 1;
    }

    text.push_str(&format!(
        "\n**Criteria met: {criteria_met}/5** (3 or more indicates metabolic syndrome)\n"
    ));

    text
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use chrono::Utc;

    fn record_with(f: impl FnOnce(&mut MeasurementRecord)) -> MeasurementRecord {
        let mut record = MeasurementRecord::new(Utc::now());
        f(&mut record);
        record
    }

    #[test]
    fn empty_history_has_no_factors() {
        assert!(analyze_risk_factors(&[]).is_empty());
    }

    #[test]
    fn high_bp_outranks_elevated_bp() {
        let record = record_with(|r| {
            r.systolic_bp = Some(145.0);
            r.diastolic_bp = Some(85.0);
        });
        let factors = analyze_risk_factors(&[record]);
        assert!(factors.iter().any(|f| f.name == "High Blood Pressure"));
        assert!(!factors.iter().any(|f| f.name == "Elevated Blood Pressure"));
    }

    #[test]
    fn neutral_record_has_no_factors() {
        let record = MeasurementRecord::new(Utc::now());
        assert!(analyze_risk_factors(&[record]).is_empty());
    }

    #[test]
    fn smoking_contributes() {
        let record = record_with(|r| r.smoking_status = Some(true));
        let factors = analyze_risk_factors(&[record]);
        assert_eq!(factors.len(), 1);
        assert_eq!(factors[0].name, "Smoking");
        assert!((factors[0].contribution - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn metabolic_narrative_counts_criteria() {
        let record = record_with(|r| {
            r.waist_circumference = Some(95.0);
            r.triglycerides = Some(180.0);
            r.hdl_cholesterol = Some(35.0);
        });
        let text = detailed_analysis(Condition::MetabolicSyndrome, &[record]);
        assert!(text.contains("Criteria met: 3/5"));
    }

    #[test]
    fn empty_history_narrative_placeholder() {
        let text = detailed_analysis(Condition::PreDiabetes, &[]);
        assert_eq!(text, "No data available for analysis.");
    }
}
