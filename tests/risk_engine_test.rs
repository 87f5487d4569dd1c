// ABOUTME: Integration tests for the synthetic risk model and factor analysis
// ABOUTME: Covers deterministic training, probability bounds, and risk ordering between profiles

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{healthy_record, risky_record};
use pulseboard_intelligence::risk::{
    analyze_risk_factors, zero_scores, Condition, RiskScore, RiskScorer, SyntheticRiskModel,
};

#[test]
fn empty_history_scores_zero_for_all_conditions() {
    let model = SyntheticRiskModel::train();
    let scores = model.score(&[]);

    assert_eq!(scores.len(), 3);
    for condition in Condition::ALL {
        assert_eq!(scores[&condition], RiskScore::Scored { value: 0.0 });
    }
    assert_eq!(scores, zero_scores());
}

#[test]
fn probabilities_stay_in_unit_interval() {
    let model = SyntheticRiskModel::train();
    for history in [vec![healthy_record(0)], vec![risky_record(0)]] {
        for (_, score) in model.score(&history) {
            match score {
                RiskScore::Scored { value } => assert!((0.0..=1.0).contains(&value)),
                RiskScore::Unavailable { reason } => panic!("unexpected: {reason}"),
            }
        }
    }
}

#[test]
fn risky_profile_outscores_healthy_profile() {
    let model = SyntheticRiskModel::train();
    let healthy = model.score(&[healthy_record(0)]);
    let risky = model.score(&[risky_record(0)]);

    for condition in Condition::ALL {
        assert!(
            risky[&condition].value_or_zero() > healthy[&condition].value_or_zero(),
            "{condition}: risky should outscore healthy"
        );
    }
}

#[test]
fn training_is_deterministic() {
    let first = SyntheticRiskModel::train();
    let second = SyntheticRiskModel::train();

    let history = vec![risky_record(0)];
    let a = first.score(&history);
    let b = second.score(&history);
    for condition in Condition::ALL {
        assert!(
            (a[&condition].value_or_zero() - b[&condition].value_or_zero()).abs() < f64::EPSILON
        );
    }
}

#[test]
fn only_latest_record_is_scored() {
    let model = SyntheticRiskModel::train();
    let latest_only = model.score(&[risky_record(0)]);
    let with_prefix = model.score(&[healthy_record(0), risky_record(1)]);

    for condition in Condition::ALL {
        assert!(
            (latest_only[&condition].value_or_zero() - with_prefix[&condition].value_or_zero())
                .abs()
                < f64::EPSILON
        );
    }
}

#[test]
fn risky_preset_trips_the_expected_factors() {
    let factors = analyze_risk_factors(&[risky_record(0)]);
    let names: Vec<&str> = factors.iter().map(|f| f.name).collect();

    assert_eq!(
        names,
        vec![
            "Obesity",
            "High Blood Pressure",
            "High Glucose",
            "High Cholesterol",
            "Low HDL",
            "Insufficient Exercise",
            "Smoking"
        ]
    );
}

#[test]
fn healthy_preset_has_no_factors() {
    assert!(analyze_risk_factors(&[healthy_record(0)]).is_empty());
}
