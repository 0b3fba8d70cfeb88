//! Tool trait definition

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Trait for tools exposed over MCP
///
/// Tools are functions that MCP clients can call to query visibility data.
/// Each tool must provide a name, description, and JSON schema for its input.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Execute the tool with given parameters
    ///
    /// # Arguments
    ///
    /// * `params` - Tool input as JSON value (should match input_schema)
    ///
    /// # Returns
    ///
    /// Tool output as JSON value
    async fn execute(&self, params: Value) -> Result<Value>;

    /// Get the tool's name
    ///
    /// Must be unique within a ToolRegistry
    fn name(&self) -> &str;

    /// Get the tool's description
    ///
    /// This description helps the calling model understand when to use this tool
    fn description(&self) -> &str;

    /// Get the tool's input schema (JSON Schema format)
    ///
    /// Describes the parameters this tool expects. The calling model uses this
    /// schema to generate valid tool calls.
    ///
    /// # Example
    ///
    /// ```
    /// use serde_json::json;
    ///
    /// // Example schema for a domain-scoped tool:
    /// let schema = json!({
    ///     "type": "object",
    ///     "properties": {
    ///         "domainId": { "type": "string" },
    ///         "startDate": { "type": "string" },
    ///         "endDate": { "type": "string" }
    ///     },
    ///     "required": ["domainId"]
    /// });
    /// ```
    fn input_schema(&self) -> Value;
}
