//! HTTP client for the Mint.ai REST API
//!
//! One authenticated GET per logical endpoint, a fixed request timeout, and
//! no internal retry. Failed requests surface as typed errors; whether a
//! failure aborts the overall tool call is the caller's decision.

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

use crate::api::types::{AggregatedVisibility, AverageVisibility, CatalogEntry, CitationsPayload};
use crate::config::MintConfig;
use crate::error::{MintError, Result};
use crate::params::DateRange;

/// Client for the Mint.ai visibility API
#[derive(Debug, Clone)]
pub struct MintClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl MintClient {
    /// Create a client from configuration
    pub fn new(config: &MintConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| MintError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Perform a GET request against one logical endpoint and decode the body
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &HashMap<&str, String>,
    ) -> Result<T> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(MintError::Config(
                "MINT_API_KEY environment variable is required".to_string(),
            ));
        };

        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .header("X-API-Key", api_key)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MintError::Timeout {
                        endpoint: path.to_string(),
                    }
                } else {
                    MintError::Network {
                        endpoint: path.to_string(),
                        reason: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(MintError::HttpStatus {
                status: status.as_u16(),
                endpoint: path.to_string(),
            });
        }

        response.json::<T>().await.map_err(|e| {
            if e.is_timeout() {
                MintError::Timeout {
                    endpoint: path.to_string(),
                }
            } else {
                MintError::MalformedResponse {
                    endpoint: path.to_string(),
                    reason: e.to_string(),
                }
            }
        })
    }

    /// List all domains
    pub async fn domains(&self) -> Result<Vec<CatalogEntry>> {
        self.get("/domains", &HashMap::new()).await
    }

    /// List the topics of one domain
    pub async fn topics(&self, domain_id: &str) -> Result<Vec<CatalogEntry>> {
        self.get(&format!("/domains/{domain_id}/topics"), &HashMap::new())
            .await
    }

    /// Aggregated visibility series for one topic
    ///
    /// Without a `models` filter the response is the cross-model rollup and
    /// carries the list of available models.
    pub async fn aggregated_visibility(
        &self,
        domain_id: &str,
        topic_id: &str,
        range: &DateRange,
        page_limit: u32,
        models: Option<&str>,
    ) -> Result<AggregatedVisibility> {
        let mut params = base_params(range, page_limit);
        if let Some(models) = models {
            params.insert("models", models.to_string());
        }

        self.get(
            &format!("/domains/{domain_id}/topics/{topic_id}/visibility/aggregated"),
            &params,
        )
        .await
    }

    /// Citation sources for one topic
    pub async fn citations(
        &self,
        domain_id: &str,
        topic_id: &str,
        range: &DateRange,
        page_limit: u32,
        models: Option<&str>,
    ) -> Result<CitationsPayload> {
        let mut params = base_params(range, page_limit);
        if let Some(models) = models {
            params.insert("models", models.to_string());
        }

        self.get(
            &format!("/domains/{domain_id}/topics/{topic_id}/citations"),
            &params,
        )
        .await
    }

    /// Average visibility score for one topic over a range
    pub async fn average_visibility(
        &self,
        domain_id: &str,
        topic_id: &str,
        range: &DateRange,
        models: Option<&str>,
    ) -> Result<AverageVisibility> {
        let mut params: HashMap<&str, String> = HashMap::new();
        params.insert("startDate", range.start_string());
        params.insert("endDate", range.end_string());
        if let Some(models) = models {
            params.insert("models", models.to_string());
        }

        self.get(
            &format!("/domains/{domain_id}/topics/{topic_id}/visibility/average"),
            &params,
        )
        .await
    }
}

/// Query parameters shared by the paginated series endpoints
fn base_params(range: &DateRange, page_limit: u32) -> HashMap<&'static str, String> {
    let mut params = HashMap::new();
    params.insert("startDate", range.start_string());
    params.insert("endDate", range.end_string());
    params.insert("latestOnly", "false".to_string());
    params.insert("page", "1".to_string());
    params.insert("limit", page_limit.to_string());
    params
}
