//! Error types for visibility analytics operations

use thiserror::Error;

/// Result type alias for visibility operations
pub type Result<T> = std::result::Result<T, MintError>;

/// Errors produced by the Mint.ai client and the tools built on it
#[derive(Debug, Error)]
pub enum MintError {
    /// Date range rejected before any request was issued
    #[error("Invalid date range: {0}")]
    InvalidRange(String),

    /// Model filter parsed to an empty set
    #[error("Invalid model filter: {0}")]
    InvalidFilter(String),

    /// Filters matched zero topics
    #[error("Empty result: {0}")]
    EmptyResult(String),

    /// Every fan-out request failed, nothing to aggregate
    #[error("No data available: {0}")]
    DataUnavailable(String),

    /// A single request exceeded the configured timeout
    #[error("Request to {endpoint} timed out")]
    Timeout { endpoint: String },

    /// Upstream answered with a non-success status
    #[error("HTTP {status} from {endpoint}")]
    HttpStatus { status: u16, endpoint: String },

    /// Upstream body did not decode into the expected shape
    #[error("Malformed response from {endpoint}: {reason}")]
    MalformedResponse { endpoint: String, reason: String },

    /// Transport failure that is neither a timeout nor an HTTP status
    #[error("Network error on {endpoint}: {reason}")]
    Network { endpoint: String, reason: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convert MintError to mint_tools::ToolError
///
/// Resolver-level validation failures are input problems; everything else
/// is an execution failure.
impl From<MintError> for mint_tools::ToolError {
    fn from(err: MintError) -> Self {
        match err {
            MintError::InvalidRange(_) | MintError::InvalidFilter(_) => {
                mint_tools::ToolError::InvalidParams(err.to_string())
            }
            _ => mint_tools::ToolError::ExecutionFailed(err.to_string()),
        }
    }
}
