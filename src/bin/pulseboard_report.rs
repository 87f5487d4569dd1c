// ABOUTME: Dashboard report CLI that runs every engine over the stored history
// ABOUTME: Prints a JSON summary of score, risks, alerts, and interventions to stdout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pulseboard Contributors

//! Pulseboard report binary.
//!
//! Usage:
//! ```bash
//! # Report over the default data directory
//! cargo run --bin pulseboard-report
//!
//! # Explicit data directory, compact output
//! cargo run --bin pulseboard-report -- --data-dir ./data --compact
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use pulseboard::{logging, HealthDataStore, StoreConfig};
use pulseboard_intelligence::alerts::{AlertEngine, AlertSummary, ConsolidatedRecommendation};
use pulseboard_intelligence::insights::{health_insights, HealthInsight};
use pulseboard_intelligence::interventions::{InterventionEngine, PersonalizedIntervention};
use pulseboard_intelligence::metrics::{detect_trends, HealthScoreCalculator, MetricTrend};
use pulseboard_intelligence::risk::{
    analyze_risk_factors, detailed_analysis, Condition, RiskFactor, RiskScoreSet, RiskScorer,
    SyntheticRiskModel,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "pulseboard-report",
    about = "Pulseboard dashboard report",
    long_about = "Load the stored measurement history, run all analysis engines, and print a JSON summary"
)]
struct ReportArgs {
    /// Data directory override (defaults to PULSEBOARD_DATA_DIR or the platform data dir)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Print compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,

    /// Skip training the risk model (omits risk scores and interventions)
    #[arg(long)]
    skip_risk: bool,
}

/// Everything the dashboard renders, in one document
#[derive(Serialize)]
struct DashboardReport {
    record_count: usize,
    health_score: f64,
    trends: Vec<MetricTrend>,
    insights: Vec<HealthInsight>,
    risk_scores: Option<RiskScoreSet>,
    risk_factors: Vec<RiskFactor>,
    risk_narratives: Vec<ConditionNarrative>,
    alert_summary: AlertSummary,
    recommendations: Vec<ConsolidatedRecommendation>,
    interventions: Vec<PersonalizedIntervention>,
}

#[derive(Serialize)]
struct ConditionNarrative {
    condition: Condition,
    analysis: String,
}

fn main() -> Result<()> {
    logging::init()?;
    let args = ReportArgs::parse();

    let config = match args.data_dir {
        Some(dir) => StoreConfig::with_dir(dir),
        None => StoreConfig::from_env().context("resolving data directory")?,
    };
    let store = HealthDataStore::open(config).context("opening health data store")?;
    let history = store.records();
    info!(records = history.len(), "Building dashboard report");

    let alert_engine = AlertEngine::new();
    let alerts = alert_engine.check_alerts(history);

    let (risk_scores, interventions) = if args.skip_risk {
        (None, Vec::new())
    } else {
        let model = SyntheticRiskModel::train();
        let scores = model.score(history);
        let interventions = InterventionEngine::new().personalized(history, &scores);
        (Some(scores), interventions)
    };

    let report = DashboardReport {
        record_count: history.len(),
        health_score: HealthScoreCalculator::calculate(history),
        trends: detect_trends(history),
        insights: health_insights(history),
        risk_factors: analyze_risk_factors(history),
        risk_narratives: Condition::ALL
            .into_iter()
            .map(|condition| ConditionNarrative {
                condition,
                analysis: detailed_analysis(condition, history),
            })
            .collect(),
        alert_summary: alert_engine.alert_summary(history),
        recommendations: alert_engine.consolidated_recommendations(&alerts),
        risk_scores,
        interventions,
    };

    let rendered = if args.compact {
        serde_json::to_string(&report)?
    } else {
        serde_json::to_string_pretty(&report)?
    };
    println!("{rendered}");
    Ok(())
}
