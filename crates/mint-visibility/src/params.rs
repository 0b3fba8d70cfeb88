//! Request parameter resolution
//!
//! Normalizes the optional inputs the tools accept (date range, model
//! filter, brand/market filters) into concrete request parameters before
//! any network call is issued.

use chrono::{Duration, NaiveDate, Utc};

use crate::error::{MintError, Result};

/// Pseudo-model identifier for the cross-model aggregate
///
/// Always distinct from any named model; the rollup is its own request and
/// never part of a per-model fan-out.
pub const GLOBAL_MODEL: &str = "GLOBAL";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A concrete, inclusive date range with start <= end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Resolve an optional start/end pair against a default lookback window
    ///
    /// Both dates omitted: the window is `[today - lookback_days, today]`.
    /// Exactly one date given: rejected with `InvalidRange`, the missing
    /// boundary is never inferred.
    pub fn resolve(start: Option<&str>, end: Option<&str>, lookback_days: i64) -> Result<Self> {
        Self::resolve_at(Utc::now().date_naive(), start, end, lookback_days)
    }

    fn resolve_at(
        today: NaiveDate,
        start: Option<&str>,
        end: Option<&str>,
        lookback_days: i64,
    ) -> Result<Self> {
        match (start, end) {
            (None, None) => Ok(Self {
                start: today - Duration::days(lookback_days),
                end: today,
            }),
            (Some(start), Some(end)) => {
                let start = parse_date(start)?;
                let end = parse_date(end)?;
                if start > end {
                    return Err(MintError::InvalidRange(format!(
                        "startDate {start} is after endDate {end}"
                    )));
                }
                Ok(Self { start, end })
            }
            _ => Err(MintError::InvalidRange(
                "startDate and endDate must be provided together".to_string(),
            )),
        }
    }

    /// Start boundary formatted as YYYY-MM-DD
    pub fn start_string(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    /// End boundary formatted as YYYY-MM-DD
    pub fn end_string(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
        MintError::InvalidRange(format!("invalid date {value:?}, expected YYYY-MM-DD"))
    })
}

/// Which model dimensions a tool call covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSelector {
    /// Every model the upstream knows for the topic
    All,
    /// An explicit, ordered, deduplicated list
    Listed(Vec<String>),
}

impl ModelSelector {
    /// Parse a comma-separated model filter
    ///
    /// `None` or an empty string selects all models. Tokens are split on
    /// commas verbatim, no whitespace trimming, deduplicated preserving
    /// first occurrence. A non-empty filter that parses to nothing is
    /// rejected with `InvalidFilter`.
    pub fn parse(filter: Option<&str>) -> Result<Self> {
        let Some(raw) = filter else {
            return Ok(Self::All);
        };
        if raw.is_empty() {
            return Ok(Self::All);
        }

        let mut models: Vec<String> = Vec::new();
        for token in raw.split(',') {
            if token.is_empty() {
                continue;
            }
            if !models.iter().any(|m| m == token) {
                models.push(token.to_string());
            }
        }

        if models.is_empty() {
            return Err(MintError::InvalidFilter(format!(
                "model filter {raw:?} contains no model names"
            )));
        }

        Ok(Self::Listed(models))
    }

    /// The per-model fan-out list for this selector
    ///
    /// An explicit list is used verbatim; the wildcard takes whatever the
    /// upstream discovered. `GLOBAL` never appears here since the rollup is
    /// a separate request.
    pub fn fan_out_models(&self, available: &[String]) -> Vec<String> {
        let source = match self {
            Self::All => available,
            Self::Listed(models) => models,
        };
        source
            .iter()
            .filter(|m| *m != GLOBAL_MODEL)
            .cloned()
            .collect()
    }

    /// The upstream `models=` filter value, when the selection is explicit
    ///
    /// `GLOBAL` is stripped: the aggregate is the unfiltered view, not a
    /// model the upstream knows. A selection of only `GLOBAL` therefore
    /// sends no filter at all.
    pub fn query_value(&self) -> Option<String> {
        match self {
            Self::All => None,
            Self::Listed(models) => {
                let named: Vec<&str> = models
                    .iter()
                    .filter(|m| *m != GLOBAL_MODEL)
                    .map(String::as_str)
                    .collect();
                if named.is_empty() {
                    None
                } else {
                    Some(named.join(","))
                }
            }
        }
    }
}

/// Case-insensitive substring filters applied to the topic catalog
///
/// Applied before any per-topic request is issued, to bound fan-out size.
#[derive(Debug, Clone, Default)]
pub struct TopicFilters {
    pub brand: Option<String>,
    pub market: Option<String>,
}

impl TopicFilters {
    /// Create filters from the raw tool parameters
    pub fn new(brand: Option<String>, market: Option<String>) -> Self {
        Self { brand, market }
    }

    /// Whether a catalog entry with this brand name and display name passes
    pub fn matches(&self, brand_name: &str, display_name: &str) -> bool {
        if let Some(brand) = &self.brand {
            if !brand_name.to_lowercase().contains(&brand.to_lowercase()) {
                return false;
            }
        }
        if let Some(market) = &self.market {
            if !display_name.to_lowercase().contains(&market.to_lowercase()) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_explicit_range_passes_through_unchanged() {
        let range =
            DateRange::resolve(Some("2025-01-15"), Some("2025-03-01"), 90).unwrap();
        assert_eq!(range.start, date("2025-01-15"));
        assert_eq!(range.end, date("2025-03-01"));
        assert_eq!(range.start_string(), "2025-01-15");
        assert_eq!(range.end_string(), "2025-03-01");
    }

    #[test]
    fn test_omitted_range_uses_lookback_window() {
        let today = date("2025-08-21");
        let range = DateRange::resolve_at(today, None, None, 90).unwrap();
        assert_eq!(range.end, today);
        assert_eq!(range.start, date("2025-05-23"));

        let range = DateRange::resolve_at(today, None, None, 365).unwrap();
        assert_eq!(range.start, date("2024-08-21"));
    }

    #[test]
    fn test_partial_range_is_rejected() {
        assert!(matches!(
            DateRange::resolve(Some("2025-01-01"), None, 90),
            Err(MintError::InvalidRange(_))
        ));
        assert!(matches!(
            DateRange::resolve(None, Some("2025-01-01"), 90),
            Err(MintError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        assert!(matches!(
            DateRange::resolve(Some("2025-03-01"), Some("2025-01-15"), 90),
            Err(MintError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_unparseable_date_is_rejected() {
        assert!(matches!(
            DateRange::resolve(Some("15/01/2025"), Some("2025-03-01"), 90),
            Err(MintError::InvalidRange(_))
        ));
        assert!(matches!(
            DateRange::resolve(Some("2025-01-15"), Some("not-a-date"), 90),
            Err(MintError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_single_day_range_is_valid() {
        let range =
            DateRange::resolve(Some("2025-06-01"), Some("2025-06-01"), 90).unwrap();
        assert_eq!(range.start, range.end);
    }

    #[test]
    fn test_selector_defaults_to_all() {
        assert_eq!(ModelSelector::parse(None).unwrap(), ModelSelector::All);
        assert_eq!(ModelSelector::parse(Some("")).unwrap(), ModelSelector::All);
    }

    #[test]
    fn test_selector_splits_and_dedups_preserving_order() {
        let selector = ModelSelector::parse(Some("gpt-4o,claude-3,gpt-4o,gemini")).unwrap();
        assert_eq!(
            selector,
            ModelSelector::Listed(vec![
                "gpt-4o".to_string(),
                "claude-3".to_string(),
                "gemini".to_string(),
            ])
        );
    }

    #[test]
    fn test_selector_does_not_trim_whitespace() {
        let selector = ModelSelector::parse(Some("gpt-4o, claude-3")).unwrap();
        assert_eq!(
            selector,
            ModelSelector::Listed(vec!["gpt-4o".to_string(), " claude-3".to_string()])
        );
    }

    #[test]
    fn test_selector_rejects_filter_with_no_names() {
        assert!(matches!(
            ModelSelector::parse(Some(",,")),
            Err(MintError::InvalidFilter(_))
        ));
    }

    #[test]
    fn test_fan_out_models_strips_global() {
        let available = vec!["gpt-4o".to_string(), "claude-3".to_string()];

        let all = ModelSelector::All;
        assert_eq!(all.fan_out_models(&available), available);

        let listed = ModelSelector::parse(Some("GLOBAL,gpt-4o")).unwrap();
        assert_eq!(listed.fan_out_models(&available), vec!["gpt-4o".to_string()]);

        let global_only = ModelSelector::parse(Some("GLOBAL")).unwrap();
        assert!(global_only.fan_out_models(&available).is_empty());
    }

    #[test]
    fn test_query_value_strips_global() {
        assert_eq!(ModelSelector::All.query_value(), None);

        let listed = ModelSelector::parse(Some("GLOBAL,gpt-4o,claude-3")).unwrap();
        assert_eq!(listed.query_value().as_deref(), Some("gpt-4o,claude-3"));

        let global_only = ModelSelector::parse(Some("GLOBAL")).unwrap();
        assert_eq!(global_only.query_value(), None);
    }

    #[test]
    fn test_topic_filters_match_case_insensitively() {
        let filters = TopicFilters::new(Some("ibis".to_string()), None);
        assert!(filters.matches("IBIS", "IBIS > hotels in Paris"));
        assert!(!filters.matches("Fairmont", "Fairmont > luxury resorts"));

        let filters = TopicFilters::new(None, Some("PARIS".to_string()));
        assert!(filters.matches("IBIS", "IBIS > hotels in Paris"));
        assert!(!filters.matches("IBIS", "IBIS > hotels in Lyon"));

        let filters = TopicFilters::new(Some("ibis".to_string()), Some("lyon".to_string()));
        assert!(filters.matches("IBIS", "IBIS > hotels in Lyon"));
        assert!(!filters.matches("IBIS", "IBIS > hotels in Paris"));
    }

    #[test]
    fn test_empty_filters_match_everything() {
        let filters = TopicFilters::default();
        assert!(filters.matches("IBIS", "IBIS > hotels in Paris"));
    }
}
