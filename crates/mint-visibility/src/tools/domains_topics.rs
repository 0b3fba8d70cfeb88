//! Tool listing every available domain and topic

use async_trait::async_trait;
use mint_tools::{Result as ToolResult, Tool};
use serde_json::{Value, json};

use crate::api::{MintClient, fetch_catalog};
use crate::error::Result;

/// Tool exposing the full domain and topic catalog
///
/// An LLM client calls this first to resolve a brand or topic name it was
/// given in prose into the ids the other tools require.
pub struct DomainsTopicsTool {
    client: MintClient,
}

impl DomainsTopicsTool {
    /// Create a new catalog tool
    pub fn new(client: MintClient) -> Self {
        Self { client }
    }

    async fn fetch(&self) -> Result<Value> {
        let catalog = fetch_catalog(&self.client).await?;

        let topics: Vec<Value> = catalog
            .topics
            .iter()
            .map(|topic| {
                json!({
                    "id": topic.topic_id,
                    "name": topic.market_label,
                    "domainId": topic.domain_id,
                    "domainName": topic.brand_name,
                })
            })
            .collect();
        let mapping = catalog.mapping();
        let total_domains = catalog.domains.len();
        let total_topics = topics.len();

        Ok(json!({
            "status": "success",
            "data": {
                "domains": catalog.domains,
                "topics": topics,
                "mapping": mapping,
                "summary": {
                    "totalDomains": total_domains,
                    "totalTopics": total_topics,
                }
            }
        }))
    }
}

#[async_trait]
impl Tool for DomainsTopicsTool {
    async fn execute(&self, _params: Value) -> ToolResult<Value> {
        Ok(self.fetch().await?)
    }

    fn name(&self) -> &str {
        "get_domains_and_topics"
    }

    fn description(&self) -> &str {
        "List ALL domains and topics available in Mint.ai. Use this tool FIRST \
         when the user mentions a domain or topic name without providing ids."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {},
            "required": []
        })
    }
}
