//! Error types for tool execution

use thiserror::Error;

/// Result type alias for tool operations
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type for tool execution
#[derive(Debug, Error)]
pub enum ToolError {
    /// Tool input did not match the declared schema
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// Tool ran but could not produce a result
    #[error("Tool execution failed: {0}")]
    ExecutionFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ToolError::InvalidParams("missing field `domainId`".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid parameters: missing field `domainId`"
        );

        let err = ToolError::ExecutionFailed("upstream timed out".to_string());
        assert_eq!(err.to_string(), "Tool execution failed: upstream timed out");
    }
}
