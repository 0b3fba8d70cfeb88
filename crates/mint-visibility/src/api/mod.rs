//! Mint.ai REST API access

pub mod catalog;
pub mod client;
pub mod types;

pub use catalog::{Catalog, DomainInfo, TopicRef, fetch_catalog};
pub use client::MintClient;
pub use types::{
    AggregatedVisibility, AverageVisibility, CatalogEntry, ChartPoint, CitationMetrics,
    CitationsPayload, DomainCount, DomainDateCount, UrlCount, UrlDateCount,
};
