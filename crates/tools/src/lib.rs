//! Scheme eligibility tools
//!
//! - [`SchemeCatalog`]: rule table loaded from JSON
//! - [`RuleBasedEvaluator`]: the [`EligibilityEvaluator`](scheme_voice_core::EligibilityEvaluator)
//!   used by the intake session
//! - [`EligibilityCheckTool`]: the same evaluation behind an MCP-style tool interface

pub mod catalog;
pub mod check_eligibility;
pub mod eligibility;
pub mod mcp;

pub use catalog::SchemeCatalog;
pub use check_eligibility::EligibilityCheckTool;
pub use eligibility::RuleBasedEvaluator;
pub use mcp::{ContentBlock, ErrorCode, InputSchema, PropertySchema, Tool, ToolError, ToolOutput, ToolSchema};

use thiserror::Error;

/// Errors raised while preparing the evaluator
#[derive(Error, Debug)]
pub enum ToolsError {
    #[error("Scheme catalog not found: {0}")]
    CatalogNotFound(String),

    #[error("Invalid scheme catalog: {0}")]
    InvalidCatalog(String),

    #[error("IO error: {0}")]
    Io(String),
}
