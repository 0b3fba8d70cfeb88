//! Tool aggregating a monthly visibility summary across the whole catalog

use async_trait::async_trait;
use mint_tools::{Result as ToolResult, Tool, ToolError};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;

use crate::api::{MintClient, TopicRef, fetch_catalog};
use crate::config::MintConfig;
use crate::error::{MintError, Result};
use crate::fanout::fan_out;
use crate::params::{DateRange, ModelSelector, TopicFilters};
use crate::render::render_summary;
use crate::summary::summarize;

/// Tool for the catalog-wide monthly visibility summary
///
/// Discovers every topic, filters by brand and market, issues one average
/// request per remaining topic in bounded batches, and renders the
/// aggregate as a markdown table.
pub struct MonthlySummaryTool {
    client: MintClient,
    config: Arc<MintConfig>,
}

#[derive(Debug, Deserialize)]
struct SummaryParams {
    #[serde(default, rename = "startDate")]
    start_date: Option<String>,
    #[serde(default, rename = "endDate")]
    end_date: Option<String>,
    #[serde(default)]
    models: Option<String>,
    #[serde(default)]
    brand_filter: Option<String>,
    #[serde(default)]
    market_filter: Option<String>,
}

impl MonthlySummaryTool {
    /// Create a new monthly summary tool
    pub fn new(client: MintClient, config: Arc<MintConfig>) -> Self {
        Self { client, config }
    }

    async fn fetch(&self, params: SummaryParams) -> Result<Value> {
        let range = DateRange::resolve(
            params.start_date.as_deref(),
            params.end_date.as_deref(),
            self.config.summary_lookback_days,
        )?;
        let selector = ModelSelector::parse(params.models.as_deref())?;
        let filters = TopicFilters::new(params.brand_filter.clone(), params.market_filter.clone());

        // Filtering happens on the catalog, before any per-topic request
        let catalog = fetch_catalog(&self.client).await?;
        let topics: Vec<TopicRef> = catalog
            .topics
            .into_iter()
            .filter(|topic| filters.matches(&topic.brand_name, &topic.display_name))
            .collect();
        info!(
            "Summarizing {} topics from {} to {}",
            topics.len(),
            range.start_string(),
            range.end_string()
        );

        let models_query = selector.query_value();
        let outcomes = fan_out(topics, self.config.topic_concurrency, |topic| {
            let client = self.client.clone();
            let models = models_query.clone();
            async move {
                client
                    .average_visibility(&topic.domain_id, &topic.topic_id, &range, models.as_deref())
                    .await
            }
        })
        .await;

        let report = match summarize(outcomes, &range) {
            Ok(report) => report,
            Err(MintError::EmptyResult(message)) => {
                return Ok(json!({
                    "status": "empty",
                    "message": message,
                    "markdown_table": Value::Null,
                    "rows": [],
                    "metadata": {
                        "startDate": range.start_string(),
                        "endDate": range.end_string(),
                        "brandFilter": params.brand_filter,
                        "marketFilter": params.market_filter,
                    }
                }));
            }
            Err(e) => return Err(e),
        };

        if report.succeeded == 0 {
            return Err(MintError::DataUnavailable(format!(
                "all {} topic requests failed",
                report.failed
            )));
        }

        let markdown = render_summary(&report);
        Ok(json!({
            "status": "success",
            "markdown_table": markdown,
            "rows": report.rows,
            "metadata": {
                "startDate": report.start_date,
                "endDate": report.end_date,
                "topicCount": report.succeeded + report.failed,
                "succeeded": report.succeeded,
                "failed": report.failed,
                "meanScore": report.mean_score,
                "best": report.best,
                "worst": report.worst,
                "brandFilter": params.brand_filter,
                "marketFilter": params.market_filter,
            }
        }))
    }
}

#[async_trait]
impl Tool for MonthlySummaryTool {
    async fn execute(&self, params: Value) -> ToolResult<Value> {
        let params: SummaryParams = serde_json::from_value(params)
            .map_err(|e| ToolError::InvalidParams(e.to_string()))?;

        Ok(self.fetch(params).await?)
    }

    fn name(&self) -> &str {
        "get_visibility_monthly_summary"
    }

    fn description(&self) -> &str {
        "Aggregate the average visibility score of EVERY topic over a period \
         (default: the last year) into one markdown report. Optionally narrow \
         the catalog with case-insensitive brand_filter / market_filter \
         substrings before any data is fetched."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "startDate": {
                    "type": "string",
                    "description": "Start date as YYYY-MM-DD (optional, defaults to 365 days before today; must be given together with endDate)"
                },
                "endDate": {
                    "type": "string",
                    "description": "End date as YYYY-MM-DD (optional, defaults to today; must be given together with startDate)"
                },
                "models": {
                    "type": "string",
                    "description": "Optional comma-separated model filter applied to every topic average"
                },
                "brand_filter": {
                    "type": "string",
                    "description": "Case-insensitive substring filter on brand names"
                },
                "market_filter": {
                    "type": "string",
                    "description": "Case-insensitive substring filter on full topic display names"
                }
            },
            "required": []
        })
    }
}
