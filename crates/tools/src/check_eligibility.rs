//! Eligibility Check Tool
//!
//! Exposes the evaluator as the `check_eligibility` tool. Arguments are
//! the profile fields; any of them may be omitted, in which case the
//! result carries the evaluator's missing-fields error.

use async_trait::async_trait;
use scheme_voice_core::{EligibilityEvaluator, Profile, StateCode};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::mcp::{InputSchema, PropertySchema, Tool, ToolError, ToolOutput, ToolSchema};

const TOOL_NAME: &str = "check_eligibility";
const TOOL_DESCRIPTION: &str =
    "Check which welfare schemes an applicant qualifies for by age and annual income";

pub struct EligibilityCheckTool {
    evaluator: Arc<dyn EligibilityEvaluator>,
}

impl EligibilityCheckTool {
    pub fn new(evaluator: Arc<dyn EligibilityEvaluator>) -> Self {
        Self { evaluator }
    }

    fn number_arg(input: &Value, name: &str) -> Result<Option<u64>, ToolError> {
        match input.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => value.as_u64().map(Some).ok_or_else(|| {
                ToolError::invalid_params(format!("{} must be a non-negative integer", name))
            }),
        }
    }

    fn state_arg(input: &Value) -> Result<Option<StateCode>, ToolError> {
        match input.get("state") {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => s
                .parse::<StateCode>()
                .map(Some)
                .map_err(|e| ToolError::invalid_params(e.to_string())),
            Some(_) => Err(ToolError::invalid_params("state must be a string")),
        }
    }
}

#[async_trait]
impl Tool for EligibilityCheckTool {
    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn description(&self) -> &str {
        TOOL_DESCRIPTION
    }

    fn schema(&self) -> ToolSchema {
        let states = StateCode::ALL
            .iter()
            .map(|code| code.as_str().to_string())
            .collect();

        ToolSchema {
            name: TOOL_NAME.to_string(),
            description: TOOL_DESCRIPTION.to_string(),
            input_schema: InputSchema::object()
                .property(
                    "age",
                    PropertySchema::integer("Applicant age in years").with_minimum(1.0),
                    true,
                )
                .property(
                    "income",
                    PropertySchema::integer("Annual household income in rupees").with_minimum(1.0),
                    true,
                )
                .property(
                    "state",
                    PropertySchema::enum_type("State of residence", states),
                    true,
                ),
        }
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        if !input.is_object() {
            return Err(ToolError::invalid_params("arguments must be an object"));
        }

        let profile = Profile {
            age: Self::number_arg(&input, "age")?,
            income: Self::number_arg(&input, "income")?,
            state: Self::state_arg(&input)?,
        };

        let result = self.evaluator.evaluate(&profile);
        let value = serde_json::to_value(&result)
            .map_err(|e| ToolError::internal(format!("failed to encode result: {}", e)))?;

        let message = if let Some(error) = &result.error {
            error.clone()
        } else if result.eligible.is_empty() {
            "No eligible schemes found".to_string()
        } else {
            format!("Eligible for: {}", result.eligible.join(", "))
        };

        Ok(ToolOutput::json(json!({
            "result": value,
            "message": message,
        })))
    }
}
