//! MCP tools for Mint.ai visibility analytics

pub mod domains_topics;
pub mod visibility_scores;
pub mod citations;
pub mod monthly_summary;

pub use domains_topics::DomainsTopicsTool;
pub use visibility_scores::VisibilityScoresTool;
pub use citations::CitationsTool;
pub use monthly_summary::MonthlySummaryTool;
