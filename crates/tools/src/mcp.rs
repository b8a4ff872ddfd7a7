//! MCP-style tool interface
//!
//! A tool has a name, a description, a JSON input schema and an async
//! `execute` taking JSON arguments. Results are JSON content blocks.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use thiserror::Error;

/// Tool trait
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn schema(&self) -> ToolSchema;

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError>;
}

/// Tool schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: InputSchema,
}

/// JSON Schema for tool input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    pub properties: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

impl InputSchema {
    pub fn object() -> Self {
        Self {
            schema_type: "object".to_string(),
            properties: Map::new(),
            required: Vec::new(),
        }
    }

    pub fn property(mut self, name: &str, schema: PropertySchema, required: bool) -> Self {
        self.properties.insert(name.to_string(), schema.into_value());
        if required {
            self.required.push(name.to_string());
        }
        self
    }
}

/// Schema of a single property
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySchema {
    property_type: &'static str,
    description: String,
    enum_values: Option<Vec<String>>,
    minimum: Option<f64>,
}

impl PropertySchema {
    pub fn integer(description: &str) -> Self {
        Self {
            property_type: "integer",
            description: description.to_string(),
            enum_values: None,
            minimum: None,
        }
    }

    pub fn enum_type(description: &str, values: Vec<String>) -> Self {
        Self {
            property_type: "string",
            description: description.to_string(),
            enum_values: Some(values),
            minimum: None,
        }
    }

    pub fn with_minimum(mut self, minimum: f64) -> Self {
        self.minimum = Some(minimum);
        self
    }

    fn into_value(self) -> Value {
        let mut value = json!({
            "type": self.property_type,
            "description": self.description,
        });
        if let Some(values) = self.enum_values {
            value["enum"] = json!(values);
        }
        if let Some(minimum) = self.minimum {
            value["minimum"] = json!(minimum);
        }
        value
    }
}

/// Content block in a tool result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Text { text: String },
}

/// Tool execution output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolOutput {
    pub content: Vec<ContentBlock>,
    #[serde(rename = "isError", default)]
    pub is_error: bool,
}

impl ToolOutput {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::Text { text: text.into() }],
            is_error: false,
        }
    }

    /// Pretty-printed JSON as a text block
    pub fn json(value: Value) -> Self {
        let text = serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());
        Self::text(text)
    }

    /// First text block parsed back as JSON
    pub fn as_json(&self) -> Option<Value> {
        self.content.iter().find_map(|block| match block {
            ContentBlock::Text { text } => serde_json::from_str(text).ok(),
        })
    }
}

/// JSON-RPC style error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    InvalidParams,
    InternalError,
}

impl ErrorCode {
    pub fn code(&self) -> i32 {
        match self {
            Self::InvalidParams => -32602,
            Self::InternalError => -32603,
        }
    }
}

/// Tool execution error
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message} (code {})", code.code())]
pub struct ToolError {
    pub code: ErrorCode,
    pub message: String,
}

impl ToolError {
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::InvalidParams,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::InternalError,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_schema_builder() {
        let schema = InputSchema::object()
            .property("age", PropertySchema::integer("Age").with_minimum(0.0), true)
            .property(
                "state",
                PropertySchema::enum_type("State", vec!["telangana".into()]),
                false,
            );
        assert_eq!(schema.required, vec!["age"]);
        assert_eq!(schema.properties["age"]["type"], "integer");
        assert_eq!(schema.properties["state"]["enum"][0], "telangana");
    }

    #[test]
    fn test_tool_output_json() {
        let output = ToolOutput::json(json!({"eligible": ["SchemeA"]}));
        assert!(!output.is_error);
        assert_eq!(output.as_json().unwrap()["eligible"][0], "SchemeA");
    }

    #[test]
    fn test_tool_error_display() {
        let err = ToolError::invalid_params("age is required");
        assert_eq!(err.to_string(), "age is required (code -32602)");
    }
}
