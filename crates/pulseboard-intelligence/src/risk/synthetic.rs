// ABOUTME: Seeded synthetic training cohort with clinically plausible marginal distributions
// ABOUTME: Labels rows per condition from the same threshold disjunctions the alert tables use
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pulseboard Contributors

//! Synthetic cohort generation.
//!
//! Each feature is sampled independently, so the cohort has plausible
//! marginals but no real covariance structure. Labels are deterministic
//! functions of the sampled features; the classifiers learn to reproduce
//! the labeling disjunctions, smoothed by the ensemble.

use super::{
    IDX_AGE, IDX_BMI, IDX_DIASTOLIC, IDX_GLUCOSE, IDX_HDL, IDX_SYSTOLIC, IDX_TRIGLYCERIDES,
    IDX_WAIST,
};
use crate::risk::Condition;
use pulseboard_core::constants::{blood_pressure, bmi, cholesterol, glucose, metabolic};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Exp1, StandardNormal};

/// Age above which pre-diabetes risk is labeled positive
const AGE_RISK_YEARS: f64 = 45.0;

/// BMI above which hypertension risk is labeled positive
const BMI_HYPERTENSION_RISK: f64 = 28.0;

// (mean, standard deviation) for the normally distributed features.
const AGE_DIST: (f64, f64) = (45.0, 15.0);
const BMI_DIST: (f64, f64) = (26.0, 5.0);
const SYSTOLIC_DIST: (f64, f64) = (125.0, 20.0);
const DIASTOLIC_DIST: (f64, f64) = (80.0, 10.0);
const GLUCOSE_DIST: (f64, f64) = (95.0, 15.0);
const TOTAL_CHOLESTEROL_DIST: (f64, f64) = (200.0, 40.0);
const HDL_DIST: (f64, f64) = (50.0, 15.0);
const LDL_DIST: (f64, f64) = (120.0, 30.0);
const TRIGLYCERIDES_DIST: (f64, f64) = (150.0, 50.0);
const WAIST_DIST: (f64, f64) = (85.0, 15.0);
const SLEEP_DIST: (f64, f64) = (7.0, 1.5);

/// Mean of the exponential weekly-exercise distribution
const EXERCISE_MEAN_MINUTES: f64 = 120.0;

/// Population smoking prevalence
const SMOKING_RATE: f64 = 0.2;

/// A generated training cohort, rows in feature-column order
pub struct SyntheticCohort {
    rows: Vec<[f64; 15]>,
}

impl SyntheticCohort {
    /// Sample `n` rows deterministically from `seed`
    #[must_use]
    pub fn generate(n: usize, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let rows = (0..n).map(|_| sample_row(&mut rng)).collect();
        Self { rows }
    }

    /// The sampled feature rows
    #[must_use]
    pub fn rows(&self) -> &[[f64; 15]] {
        &self.rows
    }

    /// Binary labels for one condition, aligned with [`Self::rows`]
    #[must_use]
    pub fn labels(&self, condition: Condition) -> Vec<bool> {
        self.rows.iter().map(|row| label(condition, row)).collect()
    }
}

fn sample_row(rng: &mut ChaCha8Rng) -> [f64; 15] {
    let exercise: f64 = {
        let unit: f64 = rng.sample(Exp1);
        EXERCISE_MEAN_MINUTES * unit
    };
    let stress = f64::from(rng.gen_range(1..=10));
    let smoking = if rng.gen_bool(SMOKING_RATE) { 1.0 } else { 0.0 };
    let alcohol = {
        let roll: f64 = rng.gen();
        if roll < 0.5 {
            0.0
        } else if roll < 0.8 {
            1.0
        } else {
            2.0
        }
    };

    [
        normal(rng, AGE_DIST),
        normal(rng, BMI_DIST),
        normal(rng, SYSTOLIC_DIST),
        normal(rng, DIASTOLIC_DIST),
        normal(rng, GLUCOSE_DIST),
        normal(rng, TOTAL_CHOLESTEROL_DIST),
        normal(rng, HDL_DIST),
        normal(rng, LDL_DIST),
        normal(rng, TRIGLYCERIDES_DIST),
        normal(rng, WAIST_DIST),
        exercise,
        normal(rng, SLEEP_DIST),
        stress,
        smoking,
        alcohol,
    ]
}

fn normal(rng: &mut ChaCha8Rng, (mean, std_dev): (f64, f64)) -> f64 {
    let unit: f64 = rng.sample(StandardNormal);
    std_dev.mul_add(unit, mean)
}

fn label(condition: Condition, row: &[f64; 15]) -> bool {
    match condition {
        Condition::PreDiabetes => {
            row[IDX_GLUCOSE] > glucose::PRE_DIABETIC
                || row[IDX_BMI] > bmi::OBESE
                || row[IDX_AGE] > AGE_RISK_YEARS
        }
        Condition::Hypertension => {
            row[IDX_SYSTOLIC] > blood_pressure::SYSTOLIC_ELEVATED
                || row[IDX_DIASTOLIC] > blood_pressure::DIASTOLIC_ELEVATED
                || row[IDX_BMI] > BMI_HYPERTENSION_RISK
        }
        Condition::MetabolicSyndrome => {
            row[IDX_WAIST] > metabolic::WAIST_HIGH_CM
                || row[IDX_TRIGLYCERIDES] > cholesterol::TRIGLYCERIDES_HIGH
                || row[IDX_HDL] < cholesterol::HDL_LOW
                || row[IDX_GLUCOSE] > glucose::PRE_DIABETIC
                || row[IDX_SYSTOLIC] > blood_pressure::SYSTOLIC_ELEVATED
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn generation_is_deterministic_for_a_seed() {
        let a = SyntheticCohort::generate(50, 7);
        let b = SyntheticCohort::generate(50, 7);
        assert_eq!(a.rows(), b.rows());
    }

    #[test]
    fn different_seeds_differ() {
        let a = SyntheticCohort::generate(50, 7);
        let b = SyntheticCohort::generate(50, 8);
        assert_ne!(a.rows(), b.rows());
    }

    #[test]
    fn labels_match_the_disjunctions() {
        let cohort = SyntheticCohort::generate(200, 42);
        let labels = cohort.labels(Condition::Hypertension);
        for (row, &positive) in cohort.rows().iter().zip(&labels) {
            let expected = row[IDX_SYSTOLIC] > 130.0 || row[IDX_DIASTOLIC] > 80.0 || row[IDX_BMI] > 28.0;
            assert_eq!(positive, expected);
        }
    }

    #[test]
    fn both_classes_are_represented() {
        let cohort = SyntheticCohort::generate(1000, 42);
        for condition in Condition::ALL {
            let labels = cohort.labels(condition);
            let positives = labels.iter().filter(|&&l| l).count();
            assert!(positives > 0, "{condition}: no positives");
            assert!(positives < labels.len(), "{condition}: no negatives");
        }
    }
}
