//! Tool registry and dispatcher

use crate::Tool;
use market_core::{Error, Result};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Registry for managing and dispatching tools
///
/// Tools are kept sorted by name so listings are stable between calls.
#[derive(Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create a new tool registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Register every tool in `tools`
    pub fn with_tools(mut self, tools: impl IntoIterator<Item = Arc<dyn Tool>>) -> Self {
        for tool in tools {
            self.register(tool);
        }
        self
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// List all registered tools, sorted by name
    pub fn list_tools(&self) -> Vec<Arc<dyn Tool>> {
        self.tools.values().cloned().collect()
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Dispatch a call to the named tool
    ///
    /// `Error::NoData` is recovered into a descriptive payload so the host can
    /// relay "no data available" instead of seeing a failure. Every other
    /// error is returned to the caller.
    pub async fn invoke(&self, name: &str, params: Value) -> Result<Value> {
        let tool = self
            .get(name)
            .ok_or_else(|| Error::UnknownTool(name.to_string()))?;

        debug!(tool = name, "Invoking tool");

        match tool.execute(params).await {
            Err(Error::NoData(subject)) => {
                info!(tool = name, subject = %subject, "No data available");
                Ok(no_data_payload(&subject))
            }
            other => other,
        }
    }
}

/// Payload reported when the provider has no data for `subject`
pub fn no_data_payload(subject: &str) -> Value {
    json!({
        "symbol": subject,
        "error": Error::NoData(subject.to_string()).to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        async fn execute(&self, params: Value) -> Result<Value> {
            Ok(params)
        }

        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echo the arguments back"
        }

        fn input_schema(&self) -> Value {
            json!({"type": "object"})
        }
    }

    struct FailingTool(Error);

    #[async_trait]
    impl Tool for FailingTool {
        async fn execute(&self, _params: Value) -> Result<Value> {
            Err(self.0.clone())
        }

        fn name(&self) -> &str {
            "failing"
        }

        fn description(&self) -> &str {
            "Always fails"
        }

        fn input_schema(&self) -> Value {
            json!({"type": "object"})
        }
    }

    #[test]
    fn test_register_and_list_sorted() {
        let registry = ToolRegistry::new().with_tools([
            Arc::new(FailingTool(Error::Provider("down".into()))) as Arc<dyn Tool>,
            Arc::new(EchoTool) as Arc<dyn Tool>,
        ]);

        assert_eq!(registry.len(), 2);
        assert!(!registry.is_empty());
        let names: Vec<String> = registry
            .list_tools()
            .iter()
            .map(|t| t.name().to_string())
            .collect();
        assert_eq!(names, vec!["echo", "failing"]);
        assert!(registry.get("echo").is_some());
        assert!(registry.get("missing").is_none());
    }

    #[tokio::test]
    async fn test_invoke_success() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool));

        let result = registry.invoke("echo", json!({"symbol": "AAPL"})).await;
        assert_eq!(result.unwrap(), json!({"symbol": "AAPL"}));
    }

    #[tokio::test]
    async fn test_invoke_unknown_tool() {
        let registry = ToolRegistry::new();
        let err = registry.invoke("nope", json!({})).await.unwrap_err();
        assert_eq!(err, Error::UnknownTool("nope".to_string()));
    }

    #[tokio::test]
    async fn test_invoke_recovers_no_data() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(FailingTool(Error::NoData("ZZZQQQ".into()))));

        let result = registry.invoke("failing", json!({})).await.unwrap();
        assert_eq!(result["symbol"], "ZZZQQQ");
        assert_eq!(result["error"], "No data available for ZZZQQQ");
    }

    #[tokio::test]
    async fn test_invoke_propagates_provider_error() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(FailingTool(Error::Provider("timeout".into()))));

        let err = registry.invoke("failing", json!({})).await.unwrap_err();
        assert_eq!(err, Error::Provider("timeout".to_string()));
    }
}
