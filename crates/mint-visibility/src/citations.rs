//! Citation merge engine
//!
//! Combines the global citations payload and every per-model payload into
//! unified ranked tables. The merge is a pure function of the settled
//! outcome set, so outcome arrival order never changes the result.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::api::types::{CitationMetrics, CitationsPayload};
use crate::fanout::FetchOutcome;
use crate::params::DateRange;

/// One ranked source row
///
/// Rank is 1-based and strictly increasing within a model's table; equal
/// counts keep their first-seen order instead of sharing a rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedRow {
    pub model: String,
    pub value: String,
    pub count: u64,
    pub rank: usize,
}

/// One per-date source count, unranked
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeRow {
    pub model: String,
    pub date: String,
    pub value: String,
    pub count: u64,
}

/// Request-volume totals for one model
#[derive(Debug, Clone, Serialize)]
pub struct ModelMetrics {
    pub model: String,
    #[serde(flatten)]
    pub metrics: CitationMetrics,
}

/// Provenance attached to a merged citation report
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CitationMetadata {
    /// Every dimension a fetch was attempted for, rollup first
    pub models: Vec<String>,
    /// Failure reason per model whose fetch failed
    ///
    /// An absent model with no entry here simply had zero citations.
    pub errors: BTreeMap<String, String>,
    pub start_date: String,
    pub end_date: String,
    pub top_n: usize,
}

/// Merged citation tables across the rollup and every model
#[derive(Debug, Clone, Serialize)]
pub struct CitationReport {
    pub top_domains: Vec<RankedRow>,
    pub top_urls: Vec<RankedRow>,
    pub domains_over_time: Vec<TimeRow>,
    pub urls_over_time: Vec<TimeRow>,
    pub global_metrics: Vec<ModelMetrics>,
    pub metadata: CitationMetadata,
}

/// Merge per-dimension citation outcomes into one report
///
/// `outcomes` is ordered with the `GLOBAL` rollup first; a failed outcome
/// contributes no rows to any table but stays listed in the metadata.
/// Each model's tables are ranked over its full result set and only then
/// truncated to `top_n`.
pub fn merge_citations(
    outcomes: &[(String, FetchOutcome<CitationsPayload>)],
    range: &DateRange,
    top_n: usize,
) -> CitationReport {
    let mut report = CitationReport {
        top_domains: Vec::new(),
        top_urls: Vec::new(),
        domains_over_time: Vec::new(),
        urls_over_time: Vec::new(),
        global_metrics: Vec::new(),
        metadata: CitationMetadata {
            models: outcomes.iter().map(|(model, _)| model.clone()).collect(),
            errors: BTreeMap::new(),
            start_date: range.start_string(),
            end_date: range.end_string(),
            top_n,
        },
    };

    for (model, outcome) in outcomes {
        let payload = match outcome {
            FetchOutcome::Success(payload) => payload,
            FetchOutcome::Failure(reason) => {
                report.metadata.errors.insert(model.clone(), reason.clone());
                continue;
            }
        };

        report.top_domains.extend(rank_rows(
            model,
            payload.top_domains.iter().map(|d| (d.domain.as_str(), d.count)),
            top_n,
        ));
        report.top_urls.extend(rank_rows(
            model,
            payload.top_urls.iter().map(|u| (u.url.as_str(), u.count)),
            top_n,
        ));

        report
            .domains_over_time
            .extend(payload.domains_over_time.iter().map(|d| TimeRow {
                model: model.clone(),
                date: d.date.clone(),
                value: d.domain.clone(),
                count: d.count,
            }));
        report
            .urls_over_time
            .extend(payload.urls_over_time.iter().map(|u| TimeRow {
                model: model.clone(),
                date: u.date.clone(),
                value: u.url.clone(),
                count: u.count,
            }));

        report.global_metrics.push(ModelMetrics {
            model: model.clone(),
            metrics: payload.metrics.clone(),
        });
    }

    report
}

/// Rank one model's counts and truncate to the top N
///
/// Stable sort by count descending, so equal counts keep first-seen order;
/// rank is the 1-based position after sorting. Truncation happens only
/// after the full set is ranked.
fn rank_rows<'a>(
    model: &str,
    counts: impl Iterator<Item = (&'a str, u64)>,
    top_n: usize,
) -> Vec<RankedRow> {
    let mut rows: Vec<RankedRow> = counts
        .map(|(value, count)| RankedRow {
            model: model.to_string(),
            value: value.to_string(),
            count,
            rank: 0,
        })
        .collect();

    rows.sort_by(|a, b| b.count.cmp(&a.count));
    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i + 1;
    }
    rows.truncate(top_n);
    rows
}
