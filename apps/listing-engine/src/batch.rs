//! Batch validation — scores many listings on the blocking pool.
//!
//! # spawn_blocking pattern
//! Scoring is CPU-bound and synchronous. Each listing runs in its own
//! `spawn_blocking` task through a `JoinSet`, so an async host never stalls
//! its executor. Tasks take owned data and tag their output with the input
//! index; reports are returned in input order whatever order tasks finish in.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;
use tracing::info;

use crate::errors::EngineError;
use crate::quality::content::ContentSection;
use crate::quality::issues::Severity;
use crate::quality::scorer::{QualityScorer, ValidationReport};

/// Aggregate view over a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub listings: usize,
    pub mean_overall_score: f64,
    pub grade_counts: BTreeMap<String, usize>,
    pub critical_issues: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// One report per input listing, in input order.
    pub reports: Vec<ValidationReport>,
    pub summary: BatchSummary,
}

pub async fn validate_batch(
    scorer: &QualityScorer,
    listings: Vec<Vec<ContentSection>>,
) -> Result<BatchOutcome, EngineError> {
    let total = listings.len();
    let mut tasks = JoinSet::new();
    for (index, sections) in listings.into_iter().enumerate() {
        let scorer = scorer.clone();
        tasks.spawn_blocking(move || (index, scorer.score(&sections)));
    }

    let mut slots: Vec<Option<ValidationReport>> = vec![None; total];
    while let Some(joined) = tasks.join_next().await {
        let (index, report) = joined?;
        slots[index] = Some(report);
    }

    let reports: Vec<ValidationReport> = slots
        .into_iter()
        .enumerate()
        .map(|(i, slot)| {
            slot.ok_or_else(|| EngineError::Worker(format!("listing {i} produced no report")))
        })
        .collect::<Result<_, _>>()?;

    let summary = summarize(&reports);
    info!(
        listings = summary.listings,
        mean = summary.mean_overall_score,
        "Batch validation complete"
    );
    Ok(BatchOutcome { reports, summary })
}

fn summarize(reports: &[ValidationReport]) -> BatchSummary {
    let mut grade_counts = BTreeMap::new();
    for report in reports {
        *grade_counts.entry(report.grade.clone()).or_insert(0) += 1;
    }
    let mean = if reports.is_empty() {
        0.0
    } else {
        let sum: f64 = reports.iter().map(|r| r.overall_score).sum();
        (sum / reports.len() as f64 * 10.0).round() / 10.0
    };
    BatchSummary {
        listings: reports.len(),
        mean_overall_score: mean,
        grade_counts,
        critical_issues: reports
            .iter()
            .flat_map(|r| &r.issues)
            .filter(|i| i.severity == Severity::Critical)
            .count(),
    }
}
