//! Tool registry for managing available tools

use crate::Tool;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

struct Inner {
    tools: HashMap<String, Arc<dyn Tool>>,
    order: Vec<String>,
}

/// Registry for managing tools
///
/// Tools are listed in registration order so that `tools/list` responses
/// are stable across runs.
pub struct ToolRegistry {
    inner: RwLock<Inner>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self {
            inner: RwLock::new(Inner {
                tools: HashMap::new(),
                order: Vec::new(),
            }),
        }
    }
}

impl ToolRegistry {
    /// Create a new tool registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool
    ///
    /// Re-registering a name replaces the tool but keeps its original
    /// position in the listing.
    pub fn register(&self, tool: Arc<dyn Tool>) {
        let mut inner = self.inner.write().unwrap();
        let name = tool.name().to_string();
        if inner.tools.insert(name.clone(), tool).is_none() {
            inner.order.push(name);
        }
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        let inner = self.inner.read().unwrap();
        inner.tools.get(name).cloned()
    }

    /// List all registered tools in registration order
    ///
    /// This is what the server uses to build `tools/list` responses.
    pub fn list_tools(&self) -> Vec<Arc<dyn Tool>> {
        let inner = self.inner.read().unwrap();
        inner
            .order
            .iter()
            .filter_map(|name| inner.tools.get(name).cloned())
            .collect()
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        let inner = self.inner.read().unwrap();
        inner.tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        let inner = self.inner.read().unwrap();
        inner.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Result;
    use async_trait::async_trait;
    use serde_json::{json, Value};

    struct NamedTool(&'static str);

    #[async_trait]
    impl Tool for NamedTool {
        async fn execute(&self, _params: Value) -> Result<Value> {
            Ok(json!({"tool": self.0}))
        }

        fn name(&self) -> &str {
            self.0
        }

        fn description(&self) -> &str {
            "test tool"
        }

        fn input_schema(&self) -> Value {
            json!({"type": "object"})
        }
    }

    #[test]
    fn test_register_and_get() {
        let registry = ToolRegistry::new();
        assert!(registry.is_empty());

        registry.register(Arc::new(NamedTool("alpha")));
        assert_eq!(registry.len(), 1);
        assert!(registry.get("alpha").is_some());
        assert!(registry.get("beta").is_none());
    }

    #[test]
    fn test_list_preserves_registration_order() {
        let registry = ToolRegistry::new();
        registry.register(Arc::new(NamedTool("charlie")));
        registry.register(Arc::new(NamedTool("alpha")));
        registry.register(Arc::new(NamedTool("beta")));

        let tools = registry.list_tools();
        let names: Vec<&str> = tools.iter().map(|t| t.name()).collect();
        // HashMap iteration order would not give us this
        assert_eq!(names, vec!["charlie", "alpha", "beta"]);
    }

    #[tokio::test]
    async fn test_execute_through_registry() {
        let registry = ToolRegistry::new();
        registry.register(Arc::new(NamedTool("alpha")));

        let tool = registry.get("alpha").unwrap();
        let output = tool.execute(json!({})).await.unwrap();
        assert_eq!(output, json!({"tool": "alpha"}));
    }

    #[test]
    fn test_reregister_keeps_position() {
        let registry = ToolRegistry::new();
        registry.register(Arc::new(NamedTool("alpha")));
        registry.register(Arc::new(NamedTool("beta")));
        registry.register(Arc::new(NamedTool("alpha")));

        assert_eq!(registry.len(), 2);
        let tools = registry.list_tools();
        let names: Vec<&str> = tools.iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["alpha", "beta"]);
    }
}
