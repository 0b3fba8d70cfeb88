//! Tool comparing citation sources across models

use async_trait::async_trait;
use mint_tools::{Result as ToolResult, Tool, ToolError};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::api::MintClient;
use crate::citations::merge_citations;
use crate::config::MintConfig;
use crate::error::{MintError, Result};
use crate::fanout::{FetchOutcome, fan_out};
use crate::params::{DateRange, GLOBAL_MODEL, ModelSelector};

/// Tool for the cross-model citation comparison
///
/// One rollup request plus one request per model, merged into unified
/// ranked tables. A single model's failure only blanks its own rows.
pub struct CitationsTool {
    client: MintClient,
    config: Arc<MintConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CitationsParams {
    domain_id: String,
    topic_id: String,
    #[serde(default)]
    start_date: Option<String>,
    #[serde(default)]
    end_date: Option<String>,
    #[serde(default)]
    models: Option<String>,
}

impl CitationsTool {
    /// Create a new citation comparison tool
    pub fn new(client: MintClient, config: Arc<MintConfig>) -> Self {
        Self { client, config }
    }

    async fn fetch(&self, params: CitationsParams) -> Result<Value> {
        let range = DateRange::resolve(
            params.start_date.as_deref(),
            params.end_date.as_deref(),
            self.config.citations_lookback_days,
        )?;
        let selector = ModelSelector::parse(params.models.as_deref())?;

        // The rollup request doubles as model discovery, so it goes first;
        // with an explicit selector its failure still leaves per-model work
        let global_outcome = match self
            .client
            .citations(
                &params.domain_id,
                &params.topic_id,
                &range,
                self.config.page_limit,
                None,
            )
            .await
        {
            Ok(payload) => FetchOutcome::Success(payload),
            Err(e) => FetchOutcome::Failure(e.to_string()),
        };

        let available = match &global_outcome {
            FetchOutcome::Success(payload) => payload.available_models.clone(),
            FetchOutcome::Failure(_) => Vec::new(),
        };
        let models = selector.fan_out_models(&available);

        let limit = models.len().max(1);
        let per_model = fan_out(models, limit, |model| {
            let client = self.client.clone();
            let domain_id = params.domain_id.clone();
            let topic_id = params.topic_id.clone();
            let page_limit = self.config.page_limit;
            async move {
                client
                    .citations(&domain_id, &topic_id, &range, page_limit, Some(&model))
                    .await
            }
        })
        .await;

        let mut outcomes = Vec::with_capacity(per_model.len() + 1);
        outcomes.push((GLOBAL_MODEL.to_string(), global_outcome));
        outcomes.extend(per_model);

        if !outcomes.iter().any(|(_, outcome)| outcome.is_success()) {
            return Err(MintError::DataUnavailable(format!(
                "all {} citation requests failed",
                outcomes.len()
            )));
        }

        let report = merge_citations(&outcomes, &range, self.config.top_n);
        Ok(json!({
            "status": "success",
            "data": report,
        }))
    }
}

#[async_trait]
impl Tool for CitationsTool {
    async fn execute(&self, params: Value) -> ToolResult<Value> {
        let params: CitationsParams = serde_json::from_value(params)
            .map_err(|e| ToolError::InvalidParams(e.to_string()))?;

        Ok(self.fetch(params).await?)
    }

    fn name(&self) -> &str {
        "get_citations"
    }

    fn description(&self) -> &str {
        "Compare citation sources across LLM models for one topic. Returns \
         ranked top domains and top URLs per model (GLOBAL rollup first), \
         per-date counts over time, and request-volume metrics per model."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "domainId": {
                    "type": "string",
                    "description": "Domain id (use get_domains_and_topics to find it)"
                },
                "topicId": {
                    "type": "string",
                    "description": "Topic id (use get_domains_and_topics to find it)"
                },
                "startDate": {
                    "type": "string",
                    "description": "Start date as YYYY-MM-DD (optional, defaults to 90 days before today; must be given together with endDate)"
                },
                "endDate": {
                    "type": "string",
                    "description": "End date as YYYY-MM-DD (optional, defaults to today; must be given together with startDate)"
                },
                "models": {
                    "type": "string",
                    "description": "Optional comma-separated model filter (default: all available models)"
                }
            },
            "required": ["domainId", "topicId"]
        })
    }
}
