//! Eligibility evaluation seam

use crate::eligibility::EligibilityResult;
use crate::profile::Profile;

/// Evaluates a collected profile against scheme rules
///
/// Evaluation is a pure filter. Incomplete profiles produce a structured
/// error inside [`EligibilityResult`] rather than a `Result::Err`.
pub trait EligibilityEvaluator: Send + Sync + 'static {
    fn evaluate(&self, profile: &Profile) -> EligibilityResult;
}
