// ABOUTME: Clinical thresholds, score weights, and default fill values organized by domain
// ABOUTME: Single source of truth for the cut points used by scoring, alerting, and risk labeling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pulseboard Contributors

//! Clinical constants used across the engines.
//!
//! Values follow common clinical guidance (ADA glucose cut points, ACC/AHA
//! blood pressure stages, ATP III lipid panels) simplified to the single
//! thresholds the rule tables consult.

/// Body mass index cut points
pub mod bmi {
    /// Obesity threshold
    pub const OBESE: f64 = 30.0;
    /// Overweight threshold
    pub const OVERWEIGHT: f64 = 25.0;
    /// Underweight threshold
    pub const UNDERWEIGHT: f64 = 18.5;
}

/// Blood pressure cut points in mmHg
pub mod blood_pressure {
    /// Stage-2 hypertensive systolic threshold
    pub const SYSTOLIC_HIGH: f64 = 140.0;
    /// Elevated systolic threshold
    pub const SYSTOLIC_ELEVATED: f64 = 130.0;
    /// Normal systolic reference
    pub const SYSTOLIC_NORMAL: f64 = 120.0;
    /// Stage-2 hypertensive diastolic threshold
    pub const DIASTOLIC_HIGH: f64 = 90.0;
    /// Elevated diastolic threshold
    pub const DIASTOLIC_ELEVATED: f64 = 80.0;
}

/// Fasting glucose cut points in mg/dL
pub mod glucose {
    /// Diabetic-range threshold
    pub const DIABETIC: f64 = 126.0;
    /// Pre-diabetic threshold
    pub const PRE_DIABETIC: f64 = 100.0;
}

/// Cholesterol panel cut points in mg/dL
pub mod cholesterol {
    /// High total cholesterol
    pub const TOTAL_HIGH: f64 = 240.0;
    /// Borderline total cholesterol
    pub const TOTAL_BORDERLINE: f64 = 200.0;
    /// Low HDL threshold (risk when below)
    pub const HDL_LOW: f64 = 40.0;
    /// Elevated triglycerides
    pub const TRIGLYCERIDES_HIGH: f64 = 150.0;
}

/// Lifestyle guidance thresholds
pub mod lifestyle {
    /// Recommended weekly exercise minutes
    pub const EXERCISE_TARGET_MINUTES: f64 = 150.0;
    /// Weekly exercise floor below which the score is penalized
    pub const EXERCISE_LOW_MINUTES: f64 = 75.0;
    /// Lower bound of the restorative sleep window
    pub const SLEEP_IDEAL_MIN_HOURS: f64 = 7.0;
    /// Upper bound of the restorative sleep window
    pub const SLEEP_IDEAL_MAX_HOURS: f64 = 8.0;
    /// Short-sleep threshold
    pub const SLEEP_SHORT_HOURS: f64 = 6.0;
    /// Long-sleep threshold
    pub const SLEEP_LONG_HOURS: f64 = 9.0;
    /// Low-stress threshold on the 1-10 scale
    pub const STRESS_LOW: f64 = 3.0;
    /// High-stress threshold on the 1-10 scale
    pub const STRESS_HIGH: f64 = 8.0;
}

/// Metabolic syndrome criteria thresholds
pub mod metabolic {
    /// Waist circumference threshold in centimeters
    pub const WAIST_HIGH_CM: f64 = 88.0;
}

/// Additive penalties and bonuses for the composite health score
pub mod score {
    /// Score every history starts from
    pub const BASE: f64 = 100.0;
    /// Penalty for obese BMI
    pub const BMI_OBESE_PENALTY: f64 = 20.0;
    /// Penalty for overweight BMI
    pub const BMI_OVERWEIGHT_PENALTY: f64 = 10.0;
    /// Penalty for underweight BMI
    pub const BMI_UNDERWEIGHT_PENALTY: f64 = 15.0;
    /// Penalty for hypertensive blood pressure
    pub const BP_HIGH_PENALTY: f64 = 25.0;
    /// Penalty for elevated blood pressure
    pub const BP_ELEVATED_PENALTY: f64 = 15.0;
    /// Penalty for diabetic-range glucose
    pub const GLUCOSE_DIABETIC_PENALTY: f64 = 30.0;
    /// Penalty for pre-diabetic glucose
    pub const GLUCOSE_PRE_DIABETIC_PENALTY: f64 = 15.0;
    /// Penalty for high total cholesterol
    pub const CHOLESTEROL_HIGH_PENALTY: f64 = 15.0;
    /// Penalty for low HDL
    pub const HDL_LOW_PENALTY: f64 = 10.0;
    /// Bonus for meeting the weekly exercise target
    pub const EXERCISE_BONUS: f64 = 5.0;
    /// Penalty for insufficient exercise
    pub const EXERCISE_PENALTY: f64 = 10.0;
    /// Bonus for sleeping inside the ideal window
    pub const SLEEP_BONUS: f64 = 5.0;
    /// Penalty for short or long sleep
    pub const SLEEP_PENALTY: f64 = 10.0;
    /// Bonus for low stress
    pub const STRESS_BONUS: f64 = 5.0;
    /// Penalty for high stress
    pub const STRESS_PENALTY: f64 = 15.0;
    /// Penalty for current smoking
    pub const SMOKING_PENALTY: f64 = 20.0;
}

/// Neutral fill values used when a record is missing a field.
///
/// These are the same defaults the risk feature vector and the score
/// calculator use, so a sparse record is scored as if it were ordinary
/// rather than pathological.
pub mod defaults {
    /// Age in years
    pub const AGE: f64 = 40.0;
    /// Body mass index
    pub const BMI: f64 = 25.0;
    /// Systolic blood pressure in mmHg
    pub const SYSTOLIC_BP: f64 = 120.0;
    /// Diastolic blood pressure in mmHg
    pub const DIASTOLIC_BP: f64 = 80.0;
    /// Fasting glucose in mg/dL
    pub const GLUCOSE_FASTING: f64 = 90.0;
    /// Total cholesterol in mg/dL
    pub const TOTAL_CHOLESTEROL: f64 = 200.0;
    /// HDL cholesterol in mg/dL
    pub const HDL_CHOLESTEROL: f64 = 50.0;
    /// LDL cholesterol in mg/dL
    pub const LDL_CHOLESTEROL: f64 = 100.0;
    /// Triglycerides in mg/dL
    pub const TRIGLYCERIDES: f64 = 150.0;
    /// Waist circumference in centimeters
    pub const WAIST_CIRCUMFERENCE: f64 = 80.0;
    /// Minutes of exercise per week
    pub const EXERCISE_MINUTES_PER_WEEK: f64 = 150.0;
    /// Average nightly sleep in hours
    pub const SLEEP_HOURS: f64 = 7.0;
    /// Stress level on the 1-10 scale
    pub const STRESS_LEVEL: f64 = 5.0;
    /// Smoking status (non-smoker)
    pub const SMOKING_STATUS: f64 = 0.0;
    /// Alcohol consumption on the 0-3 scale
    pub const ALCOHOL_CONSUMPTION: f64 = 0.0;
}

/// Accepted input ranges for record validation
pub mod validation {
    /// Age range in years; the lower bound is exclusive
    pub const AGE_RANGE: (f64, f64) = (0.0, 150.0);
    /// BMI range
    pub const BMI_RANGE: (f64, f64) = (10.0, 60.0);
    /// Systolic blood pressure range in mmHg
    pub const SYSTOLIC_RANGE: (f64, f64) = (70.0, 250.0);
    /// Diastolic blood pressure range in mmHg
    pub const DIASTOLIC_RANGE: (f64, f64) = (40.0, 150.0);
    /// Fasting glucose range in mg/dL
    pub const GLUCOSE_RANGE: (f64, f64) = (50.0, 400.0);
    /// Total cholesterol range in mg/dL
    pub const TOTAL_CHOLESTEROL_RANGE: (f64, f64) = (100.0, 500.0);
}

/// Simplified cardiovascular risk score weights
pub mod cv_risk {
    /// Weight applied to age
    pub const AGE_WEIGHT: f64 = 0.1;
    /// Weight applied to BMI
    pub const BMI_WEIGHT: f64 = 0.2;
    /// Weight applied to systolic blood pressure
    pub const SYSTOLIC_WEIGHT: f64 = 0.05;
    /// Weight applied to total cholesterol
    pub const CHOLESTEROL_WEIGHT: f64 = 0.01;
    /// Flat addition for current smoking
    pub const SMOKING_WEIGHT: f64 = 10.0;
}
