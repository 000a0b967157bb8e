//! The `Tool` trait

use async_trait::async_trait;
use market_core::Result;
use serde_json::Value;

/// A host-invocable operation
///
/// Each tool is a single stateless request/response operation identified by a
/// stable name and described by a JSON Schema for its arguments.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Run the tool on `params`, the host-supplied arguments
    ///
    /// `Error::NoData` signals that the provider had nothing for the request;
    /// the registry turns it into a regular payload. Arguments that do not fit
    /// the schema are reported as `Error::InvalidArguments`.
    async fn execute(&self, params: Value) -> Result<Value>;

    /// Stable name, unique within a [`crate::ToolRegistry`]
    fn name(&self) -> &str;

    /// Text shown to the host when it decides which tool to call
    fn description(&self) -> &str;

    /// JSON Schema of the arguments
    ///
    /// ```
    /// use market_tools::schema::{object, symbol};
    /// use serde_json::json;
    ///
    /// let schema = object(json!({ "symbol": symbol() }), &["symbol"]);
    /// assert_eq!(schema["type"], "object");
    /// ```
    fn input_schema(&self) -> Value;
}
