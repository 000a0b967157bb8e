//! JSON Schema builders for tool inputs
//!
//! Tools describe their arguments with these helpers so every input schema has
//! the same shape in `tools/list`.

use serde_json::{Value, json};

/// Create a JSON Schema object type
///
/// # Arguments
///
/// * `properties` - Map of property names to their schemas
/// * `required` - List of required property names
///
/// # Example
///
/// ```
/// use market_tools::schema::{object, string};
/// use serde_json::json;
///
/// let schema = object(
///     json!({ "symbol": string("Stock ticker symbol") }),
///     &["symbol"],
/// );
/// assert_eq!(schema["required"][0], "symbol");
/// ```
pub fn object(properties: Value, required: &[&str]) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

/// Create a JSON Schema string type
pub fn string(description: &str) -> Value {
    json!({
        "type": "string",
        "description": description,
    })
}

/// Create a JSON Schema integer type bounded to `[minimum, maximum]`
pub fn integer(description: &str, minimum: i64, maximum: i64) -> Value {
    json!({
        "type": "integer",
        "description": description,
        "minimum": minimum,
        "maximum": maximum,
    })
}

/// Create a JSON Schema array type holding between `min_items` and `max_items` items
pub fn array(items: Value, description: &str, min_items: usize, max_items: usize) -> Value {
    json!({
        "type": "array",
        "items": items,
        "description": description,
        "minItems": min_items,
        "maxItems": max_items,
    })
}

/// Attach a default value to a schema
pub fn with_default(mut schema: Value, default: impl Into<Value>) -> Value {
    if let Some(map) = schema.as_object_mut() {
        map.insert("default".to_string(), default.into());
    }
    schema
}

/// Attach example values to a schema
///
/// Used where the accepted values are decided by the provider, so the schema
/// suggests rather than restricts.
pub fn with_examples(mut schema: Value, examples: &[&str]) -> Value {
    if let Some(map) = schema.as_object_mut() {
        map.insert("examples".to_string(), json!(examples));
    }
    schema
}

/// Schema for the ubiquitous `symbol` argument
pub fn symbol() -> Value {
    string("Stock ticker symbol (e.g., AAPL, GOOGL, MSFT, TSLA)")
}
