// Tool trait and the registry tools are bound into

use crate::protocol::{CallToolResult, ToolSchema};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;

/// Tool executor trait
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool schema for MCP
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with given arguments
    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult>;
}

/// Tool registry for managing available tools
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool. A second registration under the same name replaces the first.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let schema = tool.schema();
        tracing::debug!(tool = %schema.name, "Registering tool");
        self.tools.insert(schema.name, tool);
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// List all tool schemas, ordered by name
    pub fn list_schemas(&self) -> Vec<ToolSchema> {
        let mut schemas: Vec<ToolSchema> = self.tools.values().map(|t| t.schema()).collect();
        schemas.sort_by(|a, b| a.name.cmp(&b.name));
        schemas
    }

    /// Check if a tool exists
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

/// Deserialize tool arguments; absent or null arguments mean "all defaults".
pub fn parse_arguments<T: DeserializeOwned>(tool: &str, arguments: serde_json::Value) -> Result<T> {
    let arguments = if arguments.is_null() {
        serde_json::json!({})
    } else {
        arguments
    };

    serde_json::from_value(arguments).with_context(|| format!("Invalid arguments for {}", tool))
}

// Helper functions for creating tool schemas

pub fn json_schema_object(properties: serde_json::Value, required: Vec<&str>) -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

pub fn json_schema_string(description: &str, default: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "string",
        "description": description,
        "default": default
    })
}

pub fn json_schema_enum(description: &str, values: &[&str], default: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "string",
        "description": description,
        "enum": values,
        "default": default
    })
}
