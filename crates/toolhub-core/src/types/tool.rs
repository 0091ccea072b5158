//! Tool descriptor types

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::mcp::McpTool;

/// A tool advertised by a registry server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Tool name, unique across all configured servers
    pub name: String,
    /// Description of what the tool does
    pub description: String,
    /// JSON Schema for the input parameters
    #[serde(rename = "inputSchema", skip_serializing_if = "Option::is_none")]
    pub parameter_schema: Option<Value>,
    /// Registry server that advertised this tool
    pub server: String,
}

impl ToolDescriptor {
    /// Create a new tool descriptor
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        server: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameter_schema: None,
            server: server.into(),
        }
    }

    /// Set the parameter schema
    pub fn with_schema(mut self, schema: Value) -> Self {
        self.parameter_schema = Some(schema);
        self
    }

    /// Convert an MCP tool listed by `server`
    pub fn from_mcp(tool: McpTool, server: &str) -> Self {
        let schema = tool.input_schema.as_ref();
        Self {
            name: tool.name.to_string(),
            description: tool.description.map(|s| s.to_string()).unwrap_or_default(),
            parameter_schema: (!schema.is_empty()).then(|| Value::Object(schema.clone())),
            server: server.to_string(),
        }
    }

    /// Names of the top-level schema properties, in schema order
    pub fn parameter_names(&self) -> Vec<String> {
        self.parameter_schema
            .as_ref()
            .and_then(|schema| schema.get("properties"))
            .and_then(Value::as_object)
            .map(|props| props.keys().cloned().collect())
            .unwrap_or_default()
    }
}

/// Human-readable view of a tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSummary {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<String>,
}

impl From<&ToolDescriptor> for ToolSummary {
    fn from(tool: &ToolDescriptor) -> Self {
        let description = if tool.description.is_empty() {
            "No description available".to_string()
        } else {
            tool.description.clone()
        };
        Self {
            name: tool.name.clone(),
            description,
            parameters: tool.parameter_names(),
        }
    }
}

/// Immutable snapshot of every tool fetched in one cache generation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolSet {
    tools: HashMap<String, ToolDescriptor>,
}

impl ToolSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tool. Returns `false` and keeps the existing entry if the name is taken.
    pub fn insert(&mut self, tool: ToolDescriptor) -> bool {
        if self.tools.contains_key(&tool.name) {
            return false;
        }
        self.tools.insert(tool.name.clone(), tool);
        true
    }

    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.get(name)
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

    pub fn iter(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.tools.values()
    }

    /// Tool names in alphabetical order
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Summaries of all tools, ordered by name
    pub fn summaries(&self) -> Vec<ToolSummary> {
        let mut summaries: Vec<ToolSummary> = self.tools.values().map(ToolSummary::from).collect();
        summaries.sort_by(|a, b| a.name.cmp(&b.name));
        summaries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parameter_names() {
        let tool = ToolDescriptor::new("confluence_search", "Search pages", "mcp-atlassian")
            .with_schema(json!({
                "type": "object",
                "properties": {
                    "query": { "type": "string" },
                    "limit": { "type": "integer" }
                }
            }));

        let mut names = tool.parameter_names();
        names.sort();
        assert_eq!(names, vec!["limit", "query"]);
        assert!(ToolDescriptor::new("bare", "", "s").parameter_names().is_empty());
    }

    #[test]
    fn test_summary_fills_missing_description() {
        let summary = ToolSummary::from(&ToolDescriptor::new("bare", "", "s"));
        assert_eq!(summary.description, "No description available");
        assert!(summary.parameters.is_empty());
    }

    #[test]
    fn test_tool_set_keeps_first_duplicate() {
        let mut set = ToolSet::new();
        assert!(set.insert(ToolDescriptor::new("b", "from one", "one")));
        assert!(set.insert(ToolDescriptor::new("a", "from one", "one")));
        assert!(!set.insert(ToolDescriptor::new("b", "from two", "two")));

        assert_eq!(set.len(), 2);
        assert_eq!(set.get("b").map(|t| t.server.as_str()), Some("one"));
        assert_eq!(set.names(), vec!["a", "b"]);
        assert_eq!(set.summaries()[0].name, "a");
    }
}
