//! Scheme catalog loading
//!
//! The catalog is a JSON array of rules:
//!
//! ```json
//! [
//!   {"name": "SchemeA", "max_income": 200000},
//!   {"name": "SchemeB", "min_age": 18, "max_income": 100000}
//! ]
//! ```

use scheme_voice_core::SchemeRule;
use std::path::Path;

use crate::ToolsError;

/// Ordered collection of scheme rules
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemeCatalog {
    rules: Vec<SchemeRule>,
}

impl SchemeCatalog {
    pub fn new(rules: Vec<SchemeRule>) -> Self {
        Self { rules }
    }

    /// Load the catalog from a JSON file
    ///
    /// A missing file is reported as [`ToolsError::CatalogNotFound`]; the
    /// application treats it as fatal at startup.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ToolsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ToolsError::CatalogNotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ToolsError::Io(format!("{}: {}", path.display(), e)))?;
        let catalog = Self::from_json(&content)?;

        tracing::info!(
            path = %path.display(),
            schemes = catalog.len(),
            "Loaded scheme catalog"
        );
        Ok(catalog)
    }

    pub fn from_json(json: &str) -> Result<Self, ToolsError> {
        let rules: Vec<SchemeRule> =
            serde_json::from_str(json).map_err(|e| ToolsError::InvalidCatalog(e.to_string()))?;

        for rule in &rules {
            if rule.name.trim().is_empty() {
                return Err(ToolsError::InvalidCatalog(
                    "scheme name must not be empty".to_string(),
                ));
            }
            if let (Some(min), Some(max)) = (rule.min_age, rule.max_age) {
                if min > max {
                    return Err(ToolsError::InvalidCatalog(format!(
                        "{}: min_age {} exceeds max_age {}",
                        rule.name, min, max
                    )));
                }
            }
        }

        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[SchemeRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
