//! Scheme rules and evaluation results

use serde::{Deserialize, Serialize};

use crate::SlotName;

/// Eligibility rule for a single welfare scheme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeRule {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_age: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_age: Option<u64>,
    pub max_income: u64,
}

/// Why a profile fails a scheme rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IneligibilityReason {
    AgeBelowMinimum,
    AgeAboveMaximum,
    IncomeExceedsLimit,
}

impl IneligibilityReason {
    pub fn message(&self) -> &'static str {
        match self {
            Self::AgeBelowMinimum => "Age below minimum requirement",
            Self::AgeAboveMaximum => "Age above maximum limit",
            Self::IncomeExceedsLimit => "Income exceeds limit",
        }
    }
}

impl std::fmt::Display for IneligibilityReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeIneligibility {
    pub scheme: String,
    pub reasons: Vec<IneligibilityReason>,
}

/// Outcome of evaluating a profile against the catalog
///
/// When `error` is set both scheme lists are empty and `missing` names
/// the slots that prevented evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityResult {
    pub eligible: Vec<String>,
    pub not_eligible: Vec<SchemeIneligibility>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<SlotName>,
}

impl EligibilityResult {
    /// Result for a profile with unfilled slots
    pub fn missing_fields(missing: Vec<SlotName>) -> Self {
        let names: Vec<&str> = missing.iter().map(|slot| slot.as_str()).collect();
        Self {
            eligible: Vec::new(),
            not_eligible: Vec::new(),
            error: Some(format!("Missing required fields: {}", names.join(", "))),
            missing,
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
