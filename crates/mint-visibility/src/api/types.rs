//! Typed payloads for the Mint.ai REST API
//!
//! Every response is decoded into one of these shapes; a body that does not
//! fit fails the request as `MalformedResponse` instead of flowing through
//! as loose JSON.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One entry of `GET /domains` or `GET /domains/{id}/topics`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl CatalogEntry {
    /// Display label, preferring `displayName` over `name`
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("Unknown")
    }
}

/// One point of an aggregated visibility series
#[derive(Debug, Clone, Deserialize)]
pub struct ChartPoint {
    pub date: String,
    #[serde(default)]
    pub brand: f64,
    #[serde(default)]
    pub competitors: BTreeMap<String, f64>,
}

/// `GET .../visibility/aggregated`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedVisibility {
    #[serde(default)]
    pub available_models: Vec<String>,
    #[serde(default)]
    pub chart_data: Vec<ChartPoint>,
}

/// One domain row of a citations payload
#[derive(Debug, Clone, Deserialize)]
pub struct DomainCount {
    pub domain: String,
    #[serde(default)]
    pub count: u64,
}

/// One URL row of a citations payload
#[derive(Debug, Clone, Deserialize)]
pub struct UrlCount {
    pub url: String,
    #[serde(default)]
    pub count: u64,
}

/// One per-date domain count of a citations payload
#[derive(Debug, Clone, Deserialize)]
pub struct DomainDateCount {
    pub date: String,
    pub domain: String,
    #[serde(default)]
    pub count: u64,
}

/// One per-date URL count of a citations payload
#[derive(Debug, Clone, Deserialize)]
pub struct UrlDateCount {
    pub date: String,
    pub url: String,
    #[serde(default)]
    pub count: u64,
}

/// Request-volume totals attached to a citations payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitationMetrics {
    #[serde(default)]
    pub prompt_count: u64,
    #[serde(default)]
    pub answer_count: u64,
    #[serde(default)]
    pub citation_count: u64,
    #[serde(default)]
    pub report_count: u64,
}

/// `GET .../citations`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitationsPayload {
    #[serde(default)]
    pub available_models: Vec<String>,
    #[serde(default)]
    pub top_domains: Vec<DomainCount>,
    #[serde(default)]
    pub top_urls: Vec<UrlCount>,
    #[serde(default)]
    pub domains_over_time: Vec<DomainDateCount>,
    #[serde(default)]
    pub urls_over_time: Vec<UrlDateCount>,
    #[serde(default)]
    pub metrics: CitationMetrics,
}

/// `GET .../visibility/average`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AverageVisibility {
    #[serde(default)]
    pub average_score: Option<f64>,
    #[serde(default)]
    pub sample_count: u64,
}
