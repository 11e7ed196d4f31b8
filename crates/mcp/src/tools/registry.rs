// Tool trait, registry and input-schema helpers

use crate::protocol::{CallToolResult, ToolSchema};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Tool executor trait
///
/// `execute` is infallible: a tool reports failure inside its result
/// mapping, so the transport never sees a protocol fault for bad input.
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool schema for MCP
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with given arguments
    async fn execute(&self, arguments: serde_json::Value) -> CallToolResult;
}

/// Tool registry keyed by tool name
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: BTreeMap::new(),
        }
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let schema = tool.schema();
        self.tools.insert(schema.name, tool);
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// All tool schemas, sorted by name
    pub fn list_schemas(&self) -> Vec<ToolSchema> {
        self.tools.values().map(|t| t.schema()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// Helper functions for creating tool schemas

pub fn json_schema_object(properties: serde_json::Value, required: Vec<&str>) -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

pub fn json_schema_string(description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "string",
        "description": description
    })
}

pub fn json_schema_enum(values: &[&str], description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "string",
        "enum": values,
        "description": description
    })
}

pub fn json_schema_integer(
    description: &str,
    minimum: Option<i64>,
    maximum: Option<i64>,
    default: Option<i64>,
) -> serde_json::Value {
    let mut schema = serde_json::json!({
        "type": "integer",
        "description": description
    });
    if let Some(min) = minimum {
        schema["minimum"] = min.into();
    }
    if let Some(max) = maximum {
        schema["maximum"] = max.into();
    }
    if let Some(default) = default {
        schema["default"] = default.into();
    }
    schema
}

pub fn json_schema_number(description: &str, default: Option<f64>) -> serde_json::Value {
    let mut schema = serde_json::json!({
        "type": "number",
        "description": description
    });
    if let Some(default) = default {
        schema["default"] = default.into();
    }
    schema
}
