// ABOUTME: Evidence-graded intervention catalog with risk-driven personalization
// ABOUTME: Four categories of canned entries plus metric-triggered synthesized additions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pulseboard Contributors

//! Intervention recommendations.
//!
//! The catalog is fixed at construction. Personalization never edits the
//! catalog in place: entries are cloned, their priority escalated when a
//! targeted condition scores high, and annotated with why they were
//! selected. Four additional entries are synthesized on the fly when the
//! latest record's numbers call for them.

use crate::risk::{Condition, RiskScoreSet};
use chrono::{DateTime, Utc};
use pulseboard_core::constants::{blood_pressure, bmi, defaults, glucose, lifestyle};
use pulseboard_core::models::{InterventionStatus, MeasurementRecord, WeeklyGoal};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Risk score above which a targeted intervention escalates to critical
const HIGH_RISK_THRESHOLD: f64 = 0.7;

/// Risk score above which a targeted intervention is recommended
const MODERATE_RISK_THRESHOLD: f64 = 0.4;

/// Action steps converted to weekly goals in a progress template
const WEEKLY_GOAL_COUNT: usize = 4;

/// Grouping of catalog interventions
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterventionCategory {
    /// Diet composition changes
    Dietary,
    /// Physical activity programs
    Exercise,
    /// Sleep, stress, and habit changes
    Lifestyle,
    /// Self-measurement routines
    Monitoring,
}

impl InterventionCategory {
    /// All categories in catalog order
    pub const ALL: [Self; 4] = [Self::Dietary, Self::Exercise, Self::Lifestyle, Self::Monitoring];
}

/// How urgently an intervention should be started
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterventionPriority {
    /// Useful but not pressing
    Medium,
    /// Should be started soon
    High,
    /// Should be started immediately
    Critical,
}

/// Strength of the clinical evidence behind an intervention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceLevel {
    /// Supported by consistent trial evidence
    Strong,
    /// Supported by observational or mixed evidence
    Moderate,
}

/// One catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intervention {
    /// Catalog title
    pub title: String,
    /// Category the entry belongs to
    pub category: InterventionCategory,
    /// Base urgency before personalization
    pub priority: InterventionPriority,
    /// Evidence grade
    pub evidence_level: EvidenceLevel,
    /// What the intervention involves
    pub description: String,
    /// What following it should achieve
    pub expected_outcome: String,
    /// Concrete steps, in order
    pub action_steps: Vec<String>,
    /// Conditions the entry is designed to address
    pub target_conditions: Vec<Condition>,
    /// Expected duration as free text
    pub duration: String,
}

/// A catalog entry selected for this user, with the reason attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalizedIntervention {
    /// The entry, with priority possibly escalated
    pub intervention: Intervention,
    /// Why this entry was selected
    pub personalized_note: String,
}

/// Tracking scaffold generated for an intervention
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressTemplate {
    /// Title of the intervention being tracked
    pub intervention_title: String,
    /// When tracking starts
    pub start_date: DateTime<Utc>,
    /// Expected duration copied from the entry
    pub target_duration: String,
    /// Metrics to watch, by category
    pub progress_metrics: Vec<String>,
    /// One goal per week from the leading action steps
    pub weekly_goals: Vec<WeeklyGoal>,
    /// Initial lifecycle status
    pub status: InterventionStatus,
}

/// Catalog holder and personalization logic
pub struct InterventionEngine {
    catalog: Vec<Intervention>,
}

impl Default for InterventionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InterventionEngine {
    /// Build the engine with the full fixed catalog
    #[must_use]
    pub fn new() -> Self {
        Self {
            catalog: build_catalog(),
        }
    }

    /// The full catalog, in category order
    #[must_use]
    pub fn catalog(&self) -> &[Intervention] {
        &self.catalog
    }

    /// Select and personalize interventions for this user.
    ///
    /// Returns an empty list for an empty history. Entries targeting a
    /// condition scoring above the high-risk threshold are escalated to
    /// critical; entries targeting a moderate-risk condition are included
    /// at their base priority; remaining entries are included only when
    /// their base priority is already high or critical. The result is a
    /// flat list in catalog order; use [`group_by_category`] for a
    /// per-category view.
    #[must_use]
    pub fn personalized(
        &self,
        history: &[MeasurementRecord],
        risk_scores: &RiskScoreSet,
    ) -> Vec<PersonalizedIntervention> {
        let Some(latest) = history.last() else {
            return Vec::new();
        };

        let high_risk: Vec<Condition> = risk_bucket(risk_scores, |v| v > HIGH_RISK_THRESHOLD);
        let moderate_risk: Vec<Condition> = risk_bucket(risk_scores, |v| {
            v > MODERATE_RISK_THRESHOLD && v <= HIGH_RISK_THRESHOLD
        });
        debug!(
            high = high_risk.len(),
            moderate = moderate_risk.len(),
            "Personalizing interventions"
        );

        let mut selected = Vec::new();
        for entry in &self.catalog {
            let targets_high = entry.target_conditions.iter().any(|c| high_risk.contains(c));
            let targets_moderate = entry
                .target_conditions
                .iter()
                .any(|c| moderate_risk.contains(c));

            if targets_high {
                let mut escalated = entry.clone();
                escalated.priority = InterventionPriority::Critical;
                selected.push(PersonalizedIntervention {
                    intervention: escalated,
                    personalized_note: format!(
                        "High priority due to elevated risk in {}",
                        join_conditions(&high_risk)
                    ),
                });
            } else if targets_moderate {
                selected.push(PersonalizedIntervention {
                    intervention: entry.clone(),
                    personalized_note: format!(
                        "Recommended due to moderate risk in {}",
                        join_conditions(&moderate_risk)
                    ),
                });
            } else if entry.priority >= InterventionPriority::High {
                selected.push(PersonalizedIntervention {
                    intervention: entry.clone(),
                    personalized_note: "General health maintenance".to_owned(),
                });
            }
        }

        selected.extend(synthesized_interventions(latest));
        selected
    }

    /// Build a tracking scaffold for an intervention, stamped with the
    /// wall clock
    #[must_use]
    pub fn progress_template(&self, intervention: &Intervention) -> ProgressTemplate {
        self.progress_template_at(intervention, Utc::now())
    }

    /// Build a tracking scaffold with an explicit start timestamp
    #[must_use]
    pub fn progress_template_at(
        &self,
        intervention: &Intervention,
        start_date: DateTime<Utc>,
    ) -> ProgressTemplate {
        let weekly_goals = intervention
            .action_steps
            .iter()
            .take(WEEKLY_GOAL_COUNT)
            .enumerate()
            .map(|(i, step)| WeeklyGoal {
                week: (i + 1) as u8,
                goal: step.clone(),
                completed: false,
            })
            .collect();

        ProgressTemplate {
            intervention_title: intervention.title.clone(),
            start_date,
            target_duration: intervention.duration.clone(),
            progress_metrics: progress_metrics(intervention.category),
            weekly_goals,
            status: InterventionStatus::NotStarted,
        }
    }
}

/// Group a personalized selection by catalog category, in category order
#[must_use]
pub fn group_by_category(
    selected: &[PersonalizedIntervention],
) -> BTreeMap<InterventionCategory, Vec<PersonalizedIntervention>> {
    let mut grouped: BTreeMap<InterventionCategory, Vec<PersonalizedIntervention>> =
        BTreeMap::new();
    for item in selected {
        grouped
            .entry(item.intervention.category)
            .or_default()
            .push(item.clone());
    }
    grouped
}

fn risk_bucket(scores: &RiskScoreSet, predicate: impl Fn(f64) -> bool) -> Vec<Condition> {
    scores
        .iter()
        .filter(|(_, score)| predicate(score.value_or_zero()))
        .map(|(&condition, _)| condition)
        .collect()
}

// Notes carry the stable condition keys, not the display names.
fn join_conditions(conditions: &[Condition]) -> String {
    conditions
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn progress_metrics(category: InterventionCategory) -> Vec<String> {
    let metrics: &[&str] = match category {
        InterventionCategory::Dietary => {
            &["weight", "waist_circumference", "glucose_fasting", "cholesterol"]
        }
        InterventionCategory::Exercise => {
            &["exercise_minutes_per_week", "resting_heart_rate", "weight", "bmi"]
        }
        InterventionCategory::Lifestyle => {
            &["sleep_hours", "stress_level", "systolic_bp", "diastolic_bp"]
        }
        InterventionCategory::Monitoring => &["measurement_frequency", "target_range_adherence"],
    };
    metrics.iter().map(|&m| m.to_owned()).collect()
}

fn synthesized_interventions(latest: &MeasurementRecord) -> Vec<PersonalizedIntervention> {
    let mut extra = Vec::new();

    let body_mass = latest.bmi.unwrap_or(defaults::BMI);
    if body_mass > bmi::OBESE {
        extra.push(PersonalizedIntervention {
            intervention: entry(
                "Calorie Restriction for Weight Loss",
                InterventionCategory::Dietary,
                InterventionPriority::High,
                EvidenceLevel::Strong,
                "Implement moderate calorie restriction to achieve healthy weight loss.",
                "Lose 1-2 pounds per week, improve metabolic health",
                &[
                    "Reduce daily calorie intake by 500-750 calories",
                    "Focus on portion control",
                    "Use smaller plates and bowls",
                    "Eat slowly and mindfully",
                    "Track food intake with app or journal",
                ],
                &[Condition::PreDiabetes, Condition::MetabolicSyndrome],
                "3-6 months",
            ),
            personalized_note: format!("Recommended due to BMI of {body_mass:.1}"),
        });
    }

    let systolic = latest.systolic_bp.unwrap_or(defaults::SYSTOLIC_BP);
    if systolic > blood_pressure::SYSTOLIC_ELEVATED {
        extra.push(PersonalizedIntervention {
            intervention: entry(
                "Sodium Reduction Protocol",
                InterventionCategory::Lifestyle,
                InterventionPriority::High,
                EvidenceLevel::Strong,
                "Aggressive sodium reduction to lower blood pressure.",
                "Reduce systolic BP by 2-8 mmHg",
                &[
                    "Limit sodium to less than 1,500mg daily",
                    "Read nutrition labels carefully",
                    "Cook meals at home more often",
                    "Use herbs and spices instead of salt",
                    "Avoid processed and restaurant foods",
                ],
                &[Condition::Hypertension],
                "2-4 weeks",
            ),
            personalized_note: format!("Recommended due to systolic BP of {systolic:.0} mmHg"),
        });
    }

    let glucose_value = latest.glucose_fasting.unwrap_or(defaults::GLUCOSE_FASTING);
    if glucose_value > glucose::PRE_DIABETIC {
        extra.push(PersonalizedIntervention {
            intervention: entry(
                "Glycemic Index Management",
                InterventionCategory::Dietary,
                InterventionPriority::High,
                EvidenceLevel::Moderate,
                "Focus on low glycemic index foods to improve glucose control.",
                "Stabilize blood glucose levels, reduce post-meal spikes",
                &[
                    "Choose foods with GI less than 55",
                    "Pair carbohydrates with protein or healthy fats",
                    "Avoid high-GI foods (white bread, sugary drinks)",
                    "Eat regular, smaller meals throughout the day",
                    "Monitor blood glucose response to different foods",
                ],
                &[Condition::PreDiabetes],
                "4-6 weeks",
            ),
            personalized_note: format!(
                "Recommended due to fasting glucose of {glucose_value:.0} mg/dL"
            ),
        });
    }

    let exercise = latest
        .exercise_minutes_per_week
        .unwrap_or(defaults::EXERCISE_MINUTES_PER_WEEK);
    if exercise < lifestyle::EXERCISE_TARGET_MINUTES {
        let mut plan = entry(
            "Physical Activity Increase Plan",
            InterventionCategory::Exercise,
            InterventionPriority::High,
            EvidenceLevel::Strong,
            "Gradual increase in physical activity to meet recommended guidelines.",
            "Improve cardiovascular health, enhance insulin sensitivity",
            &[
                "Add 10-15 minutes of activity every week",
                "Include activities you enjoy (dancing, hiking, sports)",
                "Use fitness tracker or app to monitor progress",
                "Find exercise buddy for accountability",
            ],
            &[
                Condition::PreDiabetes,
                Condition::Hypertension,
                Condition::MetabolicSyndrome,
            ],
            "6-8 weeks",
        );
        plan.action_steps.insert(
            0,
            format!("Increase weekly exercise from {exercise:.0} to 150 minutes"),
        );
        extra.push(PersonalizedIntervention {
            intervention: plan,
            personalized_note: format!("Current activity level: {exercise:.0} minutes/week"),
        });
    }

    extra
}

fn entry(
    title: &str,
    category: InterventionCategory,
    priority: InterventionPriority,
    evidence_level: EvidenceLevel,
    description: &str,
    expected_outcome: &str,
    action_steps: &[&str],
    target_conditions: &[Condition],
    duration: &str,
) -> Intervention {
    Intervention {
        title: title.to_owned(),
        category,
        priority,
        evidence_level,
        description: description.to_owned(),
        expected_outcome: expected_outcome.to_owned(),
        action_steps: action_steps.iter().map(|&s| s.to_owned()).collect(),
        target_conditions: target_conditions.to_vec(),
        duration: duration.to_owned(),
    }
}

#[allow(clippy::too_many_lines)]
fn build_catalog() -> Vec<Intervention> {
    vec![
        entry(
            "Mediterranean Diet Adoption",
            InterventionCategory::Dietary,
            InterventionPriority::High,
            EvidenceLevel::Strong,
            "Adopt a Mediterranean-style diet rich in fruits, vegetables, whole grains, lean proteins, and healthy fats.",
            "Reduce cardiovascular risk by 20-30%, improve insulin sensitivity",
            &[
                "Increase olive oil consumption to 2-3 tablespoons daily",
                "Eat fish 2-3 times per week",
                "Consume 5-7 servings of fruits and vegetables daily",
                "Choose whole grains over refined carbohydrates",
                "Include nuts and seeds in daily diet",
            ],
            &[
                Condition::PreDiabetes,
                Condition::Hypertension,
                Condition::MetabolicSyndrome,
            ],
            "3-6 months",
        ),
        entry(
            "DASH Diet Implementation",
            InterventionCategory::Dietary,
            InterventionPriority::High,
            EvidenceLevel::Strong,
            "Follow Dietary Approaches to Stop Hypertension (DASH) diet to reduce blood pressure.",
            "Reduce systolic BP by 8-14 mmHg",
            &[
                "Limit sodium intake to less than 2,300mg daily",
                "Increase potassium-rich foods (bananas, spinach, beans)",
                "Consume 4-5 servings of fruits and vegetables daily",
                "Choose low-fat dairy products",
                "Limit red meat and processed foods",
            ],
            &[Condition::Hypertension],
            "2-4 weeks to see initial results",
        ),
        entry(
            "Carbohydrate Counting",
            InterventionCategory::Dietary,
            InterventionPriority::Medium,
            EvidenceLevel::Moderate,
            "Learn to count carbohydrates to better manage blood glucose levels.",
            "Improve glucose control and reduce HbA1c by 0.5-1%",
            &[
                "Track carbohydrate intake for 2 weeks",
                "Aim for 45-60g carbs per meal",
                "Choose complex carbohydrates over simple sugars",
                "Use measuring cups and food scales initially",
                "Keep a food diary",
            ],
            &[Condition::PreDiabetes],
            "4-8 weeks",
        ),
        entry(
            "Progressive Aerobic Exercise Program",
            InterventionCategory::Exercise,
            InterventionPriority::High,
            EvidenceLevel::Strong,
            "Structured aerobic exercise program starting with low intensity and gradually increasing.",
            "Reduce cardiovascular risk, improve insulin sensitivity, lower blood pressure",
            &[
                "Start with 10-15 minutes of walking daily",
                "Gradually increase to 30 minutes, 5 days per week",
                "Include activities like swimming, cycling, or dancing",
                "Monitor heart rate during exercise",
                "Track progress weekly",
            ],
            &[
                Condition::PreDiabetes,
                Condition::Hypertension,
                Condition::MetabolicSyndrome,
            ],
            "8-12 weeks",
        ),
        entry(
            "Resistance Training Program",
            InterventionCategory::Exercise,
            InterventionPriority::Medium,
            EvidenceLevel::Moderate,
            "Add resistance training to improve muscle mass and metabolic health.",
            "Increase muscle mass, improve glucose metabolism, enhance bone density",
            &[
                "Perform resistance exercises 2-3 times per week",
                "Start with bodyweight exercises (push-ups, squats)",
                "Progress to light weights or resistance bands",
                "Focus on major muscle groups",
                "Allow 48 hours rest between sessions",
            ],
            &[Condition::PreDiabetes, Condition::MetabolicSyndrome],
            "6-8 weeks",
        ),
        entry(
            "High-Intensity Interval Training (HIIT)",
            InterventionCategory::Exercise,
            InterventionPriority::Medium,
            EvidenceLevel::Moderate,
            "Short bursts of high-intensity exercise followed by recovery periods.",
            "Improve cardiovascular fitness, enhance insulin sensitivity",
            &[
                "Start with 2-3 HIIT sessions per week",
                "Alternate 30 seconds high intensity with 90 seconds recovery",
                "Total session duration: 15-20 minutes",
                "Include exercises like burpees, mountain climbers, jumping jacks",
                "Gradually increase intensity and duration",
            ],
            &[Condition::PreDiabetes, Condition::MetabolicSyndrome],
            "4-6 weeks",
        ),
        entry(
            "Stress Management Program",
            InterventionCategory::Lifestyle,
            InterventionPriority::High,
            EvidenceLevel::Moderate,
            "Implement stress reduction techniques to improve overall health outcomes.",
            "Reduce cortisol levels, improve sleep quality, lower blood pressure",
            &[
                "Practice mindfulness meditation 10-15 minutes daily",
                "Try deep breathing exercises during stressful moments",
                "Engage in relaxing activities (yoga, tai chi, reading)",
                "Maintain social connections and support networks",
                "Consider professional counseling if needed",
            ],
            &[Condition::Hypertension, Condition::MetabolicSyndrome],
            "6-8 weeks",
        ),
        entry(
            "Sleep Hygiene Improvement",
            InterventionCategory::Lifestyle,
            InterventionPriority::Medium,
            EvidenceLevel::Moderate,
            "Optimize sleep quality and duration to support metabolic health.",
            "Improve insulin sensitivity, reduce appetite hormones, lower stress",
            &[
                "Maintain consistent sleep schedule (7-9 hours nightly)",
                "Create a relaxing bedtime routine",
                "Limit screen time 1 hour before bed",
                "Keep bedroom cool, dark, and quiet",
                "Avoid caffeine and large meals before bedtime",
            ],
            &[Condition::PreDiabetes, Condition::MetabolicSyndrome],
            "2-4 weeks",
        ),
        entry(
            "Smoking Cessation Program",
            InterventionCategory::Lifestyle,
            InterventionPriority::Critical,
            EvidenceLevel::Strong,
            "Comprehensive smoking cessation program with behavioral and pharmacological support.",
            "Dramatically reduce cardiovascular risk, improve lung function",
            &[
                "Set a quit date within 2 weeks",
                "Remove smoking triggers from environment",
                "Consider nicotine replacement therapy",
                "Join a smoking cessation support group",
                "Develop alternative coping strategies",
            ],
            &[Condition::Hypertension, Condition::MetabolicSyndrome],
            "12-16 weeks",
        ),
        entry(
            "Home Blood Pressure Monitoring",
            InterventionCategory::Monitoring,
            InterventionPriority::High,
            EvidenceLevel::Strong,
            "Regular home blood pressure monitoring to track hypertension management.",
            "Better blood pressure control, early detection of changes",
            &[
                "Measure blood pressure twice daily at same times",
                "Use validated home blood pressure monitor",
                "Record readings in log or app",
                "Report concerning readings to healthcare provider",
                "Bring logs to medical appointments",
            ],
            &[Condition::Hypertension],
            "Ongoing",
        ),
        entry(
            "Glucose Self-Monitoring",
            InterventionCategory::Monitoring,
            InterventionPriority::Medium,
            EvidenceLevel::Moderate,
            "Regular blood glucose monitoring to track diabetes prevention efforts.",
            "Better glucose control awareness, early intervention",
            &[
                "Check fasting glucose 2-3 times per week",
                "Monitor post-meal glucose occasionally",
                "Track patterns in glucose readings",
                "Correlate readings with diet and exercise",
                "Share data with healthcare provider",
            ],
            &[Condition::PreDiabetes],
            "Ongoing",
        ),
        entry(
            "Weight Management Tracking",
            InterventionCategory::Monitoring,
            InterventionPriority::Medium,
            EvidenceLevel::Moderate,
            "Regular weight monitoring and body composition tracking.",
            "Maintain healthy weight, track progress",
            &[
                "Weigh yourself weekly at same time of day",
                "Measure waist circumference monthly",
                "Track BMI changes over time",
                "Monitor clothing fit as additional indicator",
                "Set realistic weight loss goals (1-2 lbs/week)",
            ],
            &[Condition::PreDiabetes, Condition::MetabolicSyndrome],
            "Ongoing",
        ),
    ]
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::risk::RiskScore;
    use chrono::Utc;

    fn scores(pre: f64, hyp: f64, met: f64) -> RiskScoreSet {
        [
            (Condition::PreDiabetes, pre),
            (Condition::Hypertension, hyp),
            (Condition::MetabolicSyndrome, met),
        ]
        .into_iter()
        .map(|(c, v)| (c, RiskScore::Scored { value: v }))
        .collect()
    }

    #[test]
    fn catalog_has_three_entries_per_category() {
        let engine = InterventionEngine::new();
        for category in InterventionCategory::ALL {
            let count = engine
                .catalog()
                .iter()
                .filter(|e| e.category == category)
                .count();
            assert_eq!(count, 3, "{category:?}");
        }
    }

    #[test]
    fn empty_history_gets_nothing() {
        let engine = InterventionEngine::new();
        assert!(engine.personalized(&[], &scores(0.9, 0.9, 0.9)).is_empty());
    }

    #[test]
    fn high_risk_escalates_to_critical() {
        let engine = InterventionEngine::new();
        let record = MeasurementRecord::new(Utc::now());
        let selected = engine.personalized(&[record], &scores(0.8, 0.0, 0.0));

        let carb_counting = selected
            .iter()
            .find(|p| p.intervention.title == "Carbohydrate Counting")
            .unwrap();
        assert_eq!(
            carb_counting.intervention.priority,
            InterventionPriority::Critical
        );
        assert!(carb_counting
            .personalized_note
            .contains("elevated risk in pre_diabetes"));
    }

    #[test]
    fn moderate_risk_keeps_base_priority() {
        let engine = InterventionEngine::new();
        let record = MeasurementRecord::new(Utc::now());
        let selected = engine.personalized(&[record], &scores(0.5, 0.0, 0.0));

        let carb_counting = selected
            .iter()
            .find(|p| p.intervention.title == "Carbohydrate Counting")
            .unwrap();
        assert_eq!(
            carb_counting.intervention.priority,
            InterventionPriority::Medium
        );
        assert!(carb_counting.personalized_note.contains("moderate risk"));
    }

    #[test]
    fn low_risk_filters_medium_priority_entries() {
        let engine = InterventionEngine::new();
        let record = MeasurementRecord::new(Utc::now());
        let selected = engine.personalized(&[record], &scores(0.1, 0.1, 0.1));

        assert!(!selected
            .iter()
            .any(|p| p.intervention.title == "Carbohydrate Counting"));
        assert!(selected
            .iter()
            .all(|p| p.personalized_note == "General health maintenance"));
    }

    #[test]
    fn grouping_follows_category_order() {
        let engine = InterventionEngine::new();
        let record = MeasurementRecord::new(Utc::now());
        let selected = engine.personalized(&[record], &scores(0.8, 0.8, 0.8));
        let grouped = group_by_category(&selected);

        assert!(grouped.keys().copied().eq(InterventionCategory::ALL));
        let total: usize = grouped.values().map(Vec::len).sum();
        assert_eq!(total, selected.len());
        for (category, items) in &grouped {
            assert!(items.iter().all(|p| p.intervention.category == *category));
        }
    }

    #[test]
    fn obese_bmi_synthesizes_calorie_restriction() {
        let engine = InterventionEngine::new();
        let mut record = MeasurementRecord::new(Utc::now());
        record.bmi = Some(32.0);
        let selected = engine.personalized(&[record], &scores(0.0, 0.0, 0.0));

        let synthesized = selected
            .iter()
            .find(|p| p.intervention.title == "Calorie Restriction for Weight Loss")
            .unwrap();
        assert!(synthesized.personalized_note.contains("BMI of 32.0"));
    }

    #[test]
    fn low_exercise_plan_names_current_level() {
        let engine = InterventionEngine::new();
        let mut record = MeasurementRecord::new(Utc::now());
        record.exercise_minutes_per_week = Some(60.0);
        let selected = engine.personalized(&[record], &scores(0.0, 0.0, 0.0));

        let plan = selected
            .iter()
            .find(|p| p.intervention.title == "Physical Activity Increase Plan")
            .unwrap();
        assert_eq!(
            plan.intervention.action_steps[0],
            "Increase weekly exercise from 60 to 150 minutes"
        );
    }

    #[test]
    fn progress_template_takes_first_four_steps() {
        let engine = InterventionEngine::new();
        let entry = &engine.catalog()[0];
        let template = engine.progress_template_at(entry, Utc::now());

        assert_eq!(template.weekly_goals.len(), 4);
        assert_eq!(template.weekly_goals[0].week, 1);
        assert_eq!(template.weekly_goals[3].week, 4);
        assert!(template.weekly_goals.iter().all(|g| !g.completed));
        assert_eq!(template.status, InterventionStatus::NotStarted);
        assert_eq!(
            template.progress_metrics,
            vec!["weight", "waist_circumference", "glucose_fasting", "cholesterol"]
        );
    }
}
