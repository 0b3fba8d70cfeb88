//! Tool building the per-model visibility score dataset

use async_trait::async_trait;
use mint_tools::{Result as ToolResult, Tool, ToolError};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::warn;

use crate::api::MintClient;
use crate::config::MintConfig;
use crate::dataset::build_dataset;
use crate::error::Result;
use crate::fanout::{FetchOutcome, fan_out};
use crate::params::{DateRange, ModelSelector};

/// Tool for the complete visibility score dataset, split by model
///
/// Issues the cross-model rollup request first, then one request per model
/// concurrently, and flattens everything into one tabular dataset with
/// variation columns.
pub struct VisibilityScoresTool {
    client: MintClient,
    config: Arc<MintConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScoresParams {
    domain_id: String,
    topic_id: String,
    #[serde(default)]
    start_date: Option<String>,
    #[serde(default)]
    end_date: Option<String>,
    #[serde(default)]
    models: Option<String>,
}

impl VisibilityScoresTool {
    /// Create a new score dataset tool
    pub fn new(client: MintClient, config: Arc<MintConfig>) -> Self {
        Self { client, config }
    }

    async fn fetch(&self, params: ScoresParams) -> Result<Value> {
        let range = DateRange::resolve(
            params.start_date.as_deref(),
            params.end_date.as_deref(),
            self.config.scores_lookback_days,
        )?;
        let selector = ModelSelector::parse(params.models.as_deref())?;

        // The rollup series is the backbone of the dataset and doubles as
        // model discovery; without it there is nothing to build
        let global = self
            .client
            .aggregated_visibility(
                &params.domain_id,
                &params.topic_id,
                &range,
                self.config.page_limit,
                None,
            )
            .await?;

        let models = selector.fan_out_models(&global.available_models);
        let limit = models.len().max(1);
        let outcomes = fan_out(models, limit, |model| {
            let client = self.client.clone();
            let domain_id = params.domain_id.clone();
            let topic_id = params.topic_id.clone();
            let page_limit = self.config.page_limit;
            async move {
                client
                    .aggregated_visibility(&domain_id, &topic_id, &range, page_limit, Some(&model))
                    .await
            }
        })
        .await;

        let mut per_model = Vec::new();
        let mut attempted = Vec::with_capacity(outcomes.len());
        for (model, outcome) in outcomes {
            match outcome {
                FetchOutcome::Success(payload) => {
                    attempted.push(model.clone());
                    per_model.push((model, payload));
                }
                FetchOutcome::Failure(reason) => {
                    warn!("Error fetching data for model {model}: {reason}");
                    attempted.push(model);
                }
            }
        }

        let dataset = build_dataset(&global, &per_model, &attempted);
        Ok(json!({
            "status": "success",
            "data": dataset,
        }))
    }
}

#[async_trait]
impl Tool for VisibilityScoresTool {
    async fn execute(&self, params: Value) -> ToolResult<Value> {
        let params: ScoresParams = serde_json::from_value(params)
            .map_err(|e| ToolError::InvalidParams(e.to_string()))?;

        Ok(self.fetch(params).await?)
    }

    fn name(&self) -> &str {
        "get_visibility_scores"
    }

    fn description(&self) -> &str {
        "COMPLETE visibility analysis split by LLM model. Returns a structured \
         dataset with: Date | EntityName (brand or competitor) | EntityType | \
         Score | Model (GLOBAL or a model name) | Variation_Points | \
         Variation_Percent. Covers the brand AND its competitors on every model."
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
