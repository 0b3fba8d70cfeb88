//! Configuration for visibility analytics operations

use crate::error::{MintError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default upstream base URL
pub const DEFAULT_BASE_URL: &str = "https://api.getmint.ai/api";

/// Configuration for the Mint.ai client and the tools built on it
///
/// Built once at process start and passed explicitly to each tool; every
/// default a tool applies (lookback windows, concurrency cap, top-N) lives
/// here so tests can override them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MintConfig {
    /// API key forwarded as `X-API-Key` (optional at boot, required per request)
    pub api_key: Option<String>,

    /// Upstream base URL
    pub base_url: String,

    /// Request timeout duration
    pub request_timeout: Duration,

    /// Default lookback window for the score dataset tool, in days
    pub scores_lookback_days: i64,

    /// Default lookback window for the citation tool, in days
    pub citations_lookback_days: i64,

    /// Default lookback window for the monthly summary tool, in days
    pub summary_lookback_days: i64,

    /// Maximum concurrent per-topic requests during summary fan-out
    pub topic_concurrency: usize,

    /// Ranked-table truncation size for the citation tool
    pub top_n: usize,

    /// Page size forwarded to paginated upstream endpoints
    pub page_limit: u32,
}

impl Default for MintConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            scores_lookback_days: 90,
            citations_lookback_days: 90,
            summary_lookback_days: 365,
            topic_concurrency: 8,
            top_n: 10,
            page_limit: 100,
        }
    }
}

impl MintConfig {
    /// Create a new configuration builder
    pub fn builder() -> MintConfigBuilder {
        MintConfigBuilder::default()
    }

    /// Load configuration from environment variables
    ///
    /// Reads `MINT_API_KEY` and `MINT_BASE_URL`; anything absent or empty
    /// keeps its default.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(key) = std::env::var("MINT_API_KEY") {
            if !key.is_empty() {
                config.api_key = Some(key);
            }
        }
        if let Ok(url) = std::env::var("MINT_BASE_URL") {
            if !url.is_empty() {
                config.base_url = url;
            }
        }
        config
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(MintError::Config("base_url must not be empty".to_string()));
        }

        if self.topic_concurrency == 0 {
            return Err(MintError::Config(
                "topic_concurrency must be greater than 0".to_string(),
            ));
        }

        if self.top_n == 0 {
            return Err(MintError::Config("top_n must be greater than 0".to_string()));
        }

        if self.scores_lookback_days <= 0
            || self.citations_lookback_days <= 0
            || self.summary_lookback_days <= 0
        {
            return Err(MintError::Config(
                "lookback windows must be at least one day".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for MintConfig
#[derive(Debug, Default)]
pub struct MintConfigBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    request_timeout: Option<Duration>,
    scores_lookback_days: Option<i64>,
    citations_lookback_days: Option<i64>,
    summary_lookback_days: Option<i64>,
    topic_concurrency: Option<usize>,
    top_n: Option<usize>,
    page_limit: Option<u32>,
}

impl MintConfigBuilder {
    /// Set the API key
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the upstream base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set the score dataset default lookback, in days
    pub fn scores_lookback_days(mut self, days: i64) -> Self {
        self.scores_lookback_days = Some(days);
        self
    }

    /// Set the citation default lookback, in days
    pub fn citations_lookback_days(mut self, days: i64) -> Self {
        self.citations_lookback_days = Some(days);
        self
    }

    /// Set the monthly summary default lookback, in days
    pub fn summary_lookback_days(mut self, days: i64) -> Self {
        self.summary_lookback_days = Some(days);
        self
    }

    /// Set the per-topic fan-out concurrency cap
    pub fn topic_concurrency(mut self, cap: usize) -> Self {
        self.topic_concurrency = Some(cap);
        self
    }

    /// Set the ranked-table truncation size
    pub fn top_n(mut self, n: usize) -> Self {
        self.top_n = Some(n);
        self
    }

    /// Set the upstream page size
    pub fn page_limit(mut self, limit: u32) -> Self {
        self.page_limit = Some(limit);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<MintConfig> {
        let defaults = MintConfig::default();

        let config = MintConfig {
            api_key: self.api_key,
            base_url: self.base_url.unwrap_or(defaults.base_url),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            scores_lookback_days: self
                .scores_lookback_days
                .unwrap_or(defaults.scores_lookback_days),
            citations_lookback_days: self
                .citations_lookback_days
                .unwrap_or(defaults.citations_lookback_days),
            summary_lookback_days: self
                .summary_lookback_days
                .unwrap_or(defaults.summary_lookback_days),
            topic_concurrency: self.topic_concurrency.unwrap_or(defaults.topic_concurrency),
            top_n: self.top_n.unwrap_or(defaults.top_n),
            page_limit: self.page_limit.unwrap_or(defaults.page_limit),
        };

        config.validate()?;
        Ok(config)
    }
}
