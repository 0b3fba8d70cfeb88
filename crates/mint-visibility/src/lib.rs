//! Mint.ai brand-visibility analytics for LLM clients
//!
//! This crate turns the Mint.ai analytics REST API into a small set of
//! MCP-callable tools. It includes:
//!
//! - Catalog discovery (every domain and topic, with a name-to-id mapping)
//! - Per-model visibility score datasets with variation columns
//! - Cross-model citation comparison with ranked source tables
//! - Catalog-wide monthly summaries rendered as markdown
//!
//! # Architecture
//!
//! The two elaborate tools share one fan-out engine: N independent requests
//! run concurrently (bounded for the per-topic case), each settles into a
//! [`fanout::FetchOutcome`], and a pure merge step folds the settled set
//! into one report. A single request's failure never aborts its siblings;
//! it surfaces as a per-item error marker in the final payload.
//!
//! - `params`: resolves optional inputs into concrete request parameters
//! - `api`: HTTP client, typed payloads, and the catalog fetcher
//! - `fanout`: bounded-concurrency fan-out with per-item failure tolerance
//! - `citations` / `summary` / `dataset`: merge and aggregation engines
//! - `render`: markdown rendering of the monthly summary
//! - `tools`: the four MCP tool implementations
//!
//! # Example
//!
//! ```rust,ignore
//! use mint_tools::Tool;
//! use mint_visibility::api::MintClient;
//! use mint_visibility::config::MintConfig;
//! use mint_visibility::tools::MonthlySummaryTool;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Arc::new(MintConfig::from_env());
//!     let client = MintClient::new(&config)?;
//!
//!     let tool = MonthlySummaryTool::new(client, config);
//!     let report = tool
//!         .execute(json!({ "brand_filter": "IBIS" }))
//!         .await?;
//!     println!("{}", report["markdown_table"]);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod citations;
pub mod config;
pub mod dataset;
pub mod error;
pub mod fanout;
pub mod params;
pub mod render;
pub mod summary;
pub mod tools;

// Re-export main types for convenience
pub use api::{Catalog, MintClient, TopicRef, fetch_catalog};
pub use config::MintConfig;
pub use error::{MintError, Result};
pub use fanout::{FetchOutcome, fan_out};
pub use params::{DateRange, GLOBAL_MODEL, ModelSelector, TopicFilters};

// Re-export the tools
pub use tools::{CitationsTool, DomainsTopicsTool, MonthlySummaryTool, VisibilityScoresTool};
