//! Domain and topic catalog retrieval
//!
//! The catalog is fetched once per tool invocation and treated as immutable
//! for the rest of that invocation.

use serde::Serialize;
use serde_json::{Value, json};

use crate::api::client::MintClient;
use crate::error::Result;

/// Separator between brand and market in a topic display name
pub const NAME_SEPARATOR: &str = " > ";

/// One domain of the catalog
#[derive(Debug, Clone, Serialize)]
pub struct DomainInfo {
    pub id: String,
    pub name: String,
}

/// One analysable (domain, topic) pair from the catalog
///
/// The display name follows the `"Brand > Topic"` convention; downstream
/// fan-out treats the pair of ids as an opaque addressable unit.
#[derive(Debug, Clone)]
pub struct TopicRef {
    pub domain_id: String,
    pub topic_id: String,
    pub display_name: String,
    pub brand_name: String,
    pub market_label: String,
}

impl TopicRef {
    /// Build a topic reference from its catalog parts
    pub fn new(
        domain_id: impl Into<String>,
        brand_name: impl Into<String>,
        topic_id: impl Into<String>,
        market_label: impl Into<String>,
    ) -> Self {
        let brand_name = brand_name.into();
        let market_label = market_label.into();
        Self {
            domain_id: domain_id.into(),
            topic_id: topic_id.into(),
            display_name: format!("{brand_name}{NAME_SEPARATOR}{market_label}"),
            brand_name,
            market_label,
        }
    }
}

/// Full catalog snapshot used by the tools
#[derive(Debug, Clone)]
pub struct Catalog {
    pub domains: Vec<DomainInfo>,
    pub topics: Vec<TopicRef>,
}

impl Catalog {
    /// `"Brand > Topic"` lookup table for resolving names to ids
    pub fn mapping(&self) -> serde_json::Map<String, Value> {
        let mut map = serde_json::Map::new();
        for topic in &self.topics {
            map.insert(
                topic.display_name.clone(),
                json!({
                    "domainId": topic.domain_id,
                    "topicId": topic.topic_id,
                    "domainName": topic.brand_name,
                    "topicName": topic.market_label,
                }),
            );
        }
        map
    }
}

/// Fetch every domain and the topics under each
///
/// A domain whose topic listing fails is logged and skipped; it stays in
/// the domain list but contributes no topics.
pub async fn fetch_catalog(client: &MintClient) -> Result<Catalog> {
    let entries = client.domains().await?;

    let mut domains = Vec::with_capacity(entries.len());
    let mut topics = Vec::new();

    for entry in &entries {
        let domain_name = entry.label().to_string();
        domains.push(DomainInfo {
            id: entry.id.clone(),
            name: domain_name.clone(),
        });

        let listing = match client.topics(&entry.id).await {
            Ok(listing) => listing,
            Err(e) => {
                tracing::warn!("Error fetching topics for domain {}: {e}", entry.id);
                continue;
            }
        };

        for topic in &listing {
            topics.push(TopicRef::new(
                entry.id.clone(),
                domain_name.clone(),
                topic.id.clone(),
                topic.label(),
            ));
        }
    }

    Ok(Catalog { domains, topics })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MintConfig;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_topic_ref_display_name() {
        let topic = TopicRef::new("d1", "IBIS", "t1", "hotels in Paris");
        assert_eq!(topic.display_name, "IBIS > hotels in Paris");
        assert_eq!(topic.brand_name, "IBIS");
        assert_eq!(topic.market_label, "hotels in Paris");
    }

    #[test]
    fn test_mapping_keys_and_shape() {
        let catalog = Catalog {
            domains: vec![DomainInfo {
                id: "d1".to_string(),
                name: "IBIS".to_string(),
            }],
            topics: vec![TopicRef::new("d1", "IBIS", "t1", "hotels in Paris")],
        };

        let mapping = catalog.mapping();
        let entry = mapping.get("IBIS > hotels in Paris").unwrap();
        assert_eq!(entry["domainId"], "d1");
        assert_eq!(entry["topicId"], "t1");
        assert_eq!(entry["domainName"], "IBIS");
        assert_eq!(entry["topicName"], "hotels in Paris");
    }

    #[tokio::test]
    async fn test_failed_topic_listing_skips_domain_but_keeps_rest() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/domains"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": "d1", "displayName": "IBIS"},
                {"id": "d2", "displayName": "Fairmont"}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/domains/d1/topics"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/domains/d2/topics"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": "t2", "displayName": "luxury resorts"}
            ])))
            .mount(&server)
            .await;

        let config = MintConfig::builder()
            .api_key("test-key")
            .base_url(server.uri())
            .build()
            .unwrap();
        let client = MintClient::new(&config).unwrap();

        let catalog = fetch_catalog(&client).await.unwrap();
        assert_eq!(catalog.domains.len(), 2);
        assert_eq!(catalog.topics.len(), 1);
        assert_eq!(catalog.topics[0].display_name, "Fairmont > luxury resorts");
    }
}
