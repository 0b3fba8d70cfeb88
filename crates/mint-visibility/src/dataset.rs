//! Score dataset construction
//!
//! Flattens the global aggregated series plus every per-model series into
//! one tabular dataset with per-entity variation columns.

use serde::Serialize;
use std::collections::HashSet;

use crate::api::types::{AggregatedVisibility, ChartPoint};
use crate::params::GLOBAL_MODEL;

/// Label for the account's own brand in score rows
///
/// The aggregated endpoint does not carry the brand's display name.
pub const BRAND_LABEL: &str = "Your Brand";

/// Column order of the dataset, exported alongside the rows
pub const COLUMNS: [&str; 7] = [
    "Date",
    "EntityName",
    "EntityType",
    "Score",
    "Model",
    "Variation_Points",
    "Variation_Percent",
];

/// Entity classification for score rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntityType {
    Brand,
    Competitor,
}

/// One row of the score dataset
#[derive(Debug, Clone, Serialize)]
pub struct ScoreRow {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "EntityName")]
    pub entity_name: String,
    #[serde(rename = "EntityType")]
    pub entity_type: EntityType,
    #[serde(rename = "Score")]
    pub score: f64,
    #[serde(rename = "Model")]
    pub model: String,
    #[serde(rename = "Variation_Points")]
    pub variation_points: Option<f64>,
    #[serde(rename = "Variation_Percent")]
    pub variation_percent: Option<f64>,
}

/// Derived counts attached to a score dataset
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetMetadata {
    pub total_rows: usize,
    pub brand_rows: usize,
    pub competitor_rows: usize,
    pub unique_competitors: usize,
    pub models_analyzed: usize,
    pub models: Vec<String>,
    pub date_range: DateBounds,
}

/// First and last row dates of a dataset
#[derive(Debug, Clone, Serialize)]
pub struct DateBounds {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// The complete score dataset payload
#[derive(Debug, Clone, Serialize)]
pub struct ScoreDataset {
    pub dataset: Vec<ScoreRow>,
    pub metadata: DatasetMetadata,
    pub columns: Vec<&'static str>,
}

/// Build the score dataset from the global series and per-model series
///
/// `attempted` is every model a fetch was issued for; `per_model` carries
/// only the successful ones. A model that failed stays in the metadata
/// model list but contributes no rows.
pub fn build_dataset(
    global: &AggregatedVisibility,
    per_model: &[(String, AggregatedVisibility)],
    attempted: &[String],
) -> ScoreDataset {
    let mut rows = Vec::new();

    push_series(&mut rows, GLOBAL_MODEL, &global.chart_data);
    for (model, payload) in per_model {
        push_series(&mut rows, model, &payload.chart_data);
    }

    let brand_rows = rows
        .iter()
        .filter(|r| r.entity_type == EntityType::Brand)
        .count();
    let competitor_rows = rows.len() - brand_rows;
    let unique_competitors = rows
        .iter()
        .filter(|r| r.entity_type == EntityType::Competitor)
        .map(|r| r.entity_name.as_str())
        .collect::<HashSet<_>>()
        .len();

    let mut models = Vec::with_capacity(attempted.len() + 1);
    models.push(GLOBAL_MODEL.to_string());
    models.extend(attempted.iter().cloned());

    let metadata = DatasetMetadata {
        total_rows: rows.len(),
        brand_rows,
        competitor_rows,
        unique_competitors,
        models_analyzed: attempted.len() + 1,
        models,
        date_range: DateBounds {
            start: rows.first().map(|r| r.date.clone()),
            end: rows.last().map(|r| r.date.clone()),
        },
    };

    ScoreDataset {
        dataset: rows,
        metadata,
        columns: COLUMNS.to_vec(),
    }
}

/// Append the brand and competitor rows of one model's series
fn push_series(rows: &mut Vec<ScoreRow>, model: &str, chart: &[ChartPoint]) {
    for (i, point) in chart.iter().enumerate() {
        let previous = if i > 0 { Some(&chart[i - 1]) } else { None };

        let (points, percent) = variation(point.brand, previous.map(|p| p.brand));
        rows.push(ScoreRow {
            date: point.date.clone(),
            entity_name: BRAND_LABEL.to_string(),
            entity_type: EntityType::Brand,
            score: point.brand,
            model: model.to_string(),
            variation_points: points,
            variation_percent: percent,
        });

        for (name, score) in &point.competitors {
            if *score <= 0.0 {
                continue;
            }
            let prev_score =
                previous.map(|p| p.competitors.get(name).copied().unwrap_or(0.0));
            let (points, percent) = variation(*score, prev_score);
            rows.push(ScoreRow {
                date: point.date.clone(),
                entity_name: name.clone(),
                entity_type: EntityType::Competitor,
                score: *score,
                model: model.to_string(),
                variation_points: points,
                variation_percent: percent,
            });
        }
    }
}

/// Variation vs. the previous point of the same series
///
/// The first point has no variation; a zero previous score yields a zero
/// percent change rather than a division.
fn variation(score: f64, previous: Option<f64>) -> (Option<f64>, Option<f64>) {
    match previous {
        None => (None, None),
        Some(prev) => {
            let points = round2(score - prev);
            let percent = if prev > 0.0 {
                round2(points / prev * 100.0)
            } else {
                0.0
            };
            (Some(points), Some(percent))
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
