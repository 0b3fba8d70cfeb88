//! Monthly summary aggregation
//!
//! Folds per-topic average-score outcomes, failures included, into one
//! ordered report with derived statistics.

use serde::Serialize;

use crate::api::catalog::TopicRef;
use crate::api::types::AverageVisibility;
use crate::error::{MintError, Result};
use crate::fanout::FetchOutcome;
use crate::params::DateRange;

/// Reason recorded when the upstream returned a range with no data points
pub const NO_DATA_REASON: &str = "no data points in range";

/// Visibility band used for rendering
///
/// Lower bounds are inclusive, upper bounds exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoreBand {
    High,
    Medium,
    Low,
    VeryLow,
    Unknown,
}

impl ScoreBand {
    /// Band for an average score
    pub fn for_score(score: f64) -> Self {
        if score >= 60.0 {
            Self::High
        } else if score >= 40.0 {
            Self::Medium
        } else if score >= 20.0 {
            Self::Low
        } else {
            Self::VeryLow
        }
    }

    /// Rendering label
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::VeryLow => "very-low",
            Self::Unknown => "unknown",
        }
    }
}

/// One topic's line of the monthly summary
///
/// Exactly one of `average_score` and `error` is present.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRow {
    pub brand: String,
    pub topic: String,
    pub average_score: Option<f64>,
    pub sample_count: u64,
    pub error: Option<String>,
    pub status: ScoreBand,
}

/// A row cited by the derived statistics
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatPoint {
    pub brand: String,
    pub topic: String,
    pub average_score: f64,
}

/// The aggregated monthly summary
#[derive(Debug, Clone)]
pub struct SummaryReport {
    pub start_date: String,
    pub end_date: String,
    pub rows: Vec<SummaryRow>,
    pub mean_score: Option<f64>,
    pub best: Option<StatPoint>,
    pub worst: Option<StatPoint>,
    pub succeeded: usize,
    pub failed: usize,
}

/// Aggregate per-topic outcomes into an ordered summary report
///
/// Rows are ordered by (brand, topic). Failed topics keep their row with
/// the failure reason and are excluded from the mean; a success whose
/// average is null is treated the same way. Statistics tie-break on first
/// occurrence in the ordered row list. Zero topics is an explicit
/// `EmptyResult`, never a statistics error.
pub fn summarize(
    outcomes: Vec<(TopicRef, FetchOutcome<AverageVisibility>)>,
    range: &DateRange,
) -> Result<SummaryReport> {
    if outcomes.is_empty() {
        return Err(MintError::EmptyResult(
            "no topics matched the given filters".to_string(),
        ));
    }

    let mut rows: Vec<SummaryRow> = outcomes
        .into_iter()
        .map(|(topic, outcome)| build_row(topic, outcome))
        .collect();
    rows.sort_by(|a, b| {
        (a.brand.as_str(), a.topic.as_str()).cmp(&(b.brand.as_str(), b.topic.as_str()))
    });

    let succeeded = rows.iter().filter(|r| r.average_score.is_some()).count();
    let failed = rows.len() - succeeded;

    let mut sum = 0.0;
    let mut best: Option<StatPoint> = None;
    let mut worst: Option<StatPoint> = None;
    for row in &rows {
        let Some(score) = row.average_score else {
            continue;
        };
        sum += score;
        if best.as_ref().is_none_or(|b| score > b.average_score) {
            best = Some(stat_point(row, score));
        }
        if worst.as_ref().is_none_or(|w| score < w.average_score) {
            worst = Some(stat_point(row, score));
        }
    }
    let mean_score = if succeeded > 0 {
        Some(round2(sum / succeeded as f64))
    } else {
        None
    };

    Ok(SummaryReport {
        start_date: range.start_string(),
        end_date: range.end_string(),
        rows,
        mean_score,
        best,
        worst,
        succeeded,
        failed,
    })
}

fn build_row(topic: TopicRef, outcome: FetchOutcome<AverageVisibility>) -> SummaryRow {
    let (average_score, sample_count, error) = match outcome {
        FetchOutcome::Success(average) => match average.average_score {
            Some(score) => (Some(score), average.sample_count, None),
            // A 2xx with a null average carries no usable data point
            None => (None, average.sample_count, Some(NO_DATA_REASON.to_string())),
        },
        FetchOutcome::Failure(reason) => (None, 0, Some(reason)),
    };

    let status = match average_score {
        Some(score) => ScoreBand::for_score(score),
        None => ScoreBand::Unknown,
    };

    SummaryRow {
        brand: topic.brand_name,
        topic: topic.market_label,
        average_score,
        sample_count,
        error,
        status,
    }
}

fn stat_point(row: &SummaryRow, score: f64) -> StatPoint {
    StatPoint {
        brand: row.brand.clone(),
        topic: row.topic.clone(),
        average_score: score,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
