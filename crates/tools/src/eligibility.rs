//! Rule-based eligibility evaluation

use scheme_voice_core::{
    EligibilityEvaluator, EligibilityResult, IneligibilityReason, Profile, SchemeIneligibility,
    SchemeRule, SlotName, SlotValue,
};

use crate::catalog::SchemeCatalog;

/// Filters the catalog by age and income bounds
///
/// State is collected but not used: no rule in the catalog is
/// state-specific.
#[derive(Debug, Clone)]
pub struct RuleBasedEvaluator {
    catalog: SchemeCatalog,
}

impl RuleBasedEvaluator {
    pub fn new(catalog: SchemeCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &SchemeCatalog {
        &self.catalog
    }

    /// Empty slots plus numeric slots holding zero, in fill order
    fn missing_fields(profile: &Profile) -> Vec<SlotName> {
        SlotName::ORDER
            .into_iter()
            .filter(|slot| matches!(profile.get(*slot), None | Some(SlotValue::Number(0))))
            .collect()
    }

    /// Every rule the applicant fails, in a fixed order
    fn reasons(rule: &SchemeRule, age: u64, income: u64) -> Vec<IneligibilityReason> {
        let mut reasons = Vec::new();
        if rule.min_age.is_some_and(|min| age < min) {
            reasons.push(IneligibilityReason::AgeBelowMinimum);
        }
        if rule.max_age.is_some_and(|max| age > max) {
            reasons.push(IneligibilityReason::AgeAboveMaximum);
        }
        if income > rule.max_income {
            reasons.push(IneligibilityReason::IncomeExceedsLimit);
        }
        reasons
    }
}

impl EligibilityEvaluator for RuleBasedEvaluator {
    fn evaluate(&self, profile: &Profile) -> EligibilityResult {
        let (age, income) = match (profile.age, profile.income, profile.state) {
            (Some(age), Some(income), Some(_)) if age > 0 && income > 0 => (age, income),
            _ => {
                let missing = Self::missing_fields(profile);
                tracing::info!(?missing, "Profile incomplete, skipping evaluation");
                return EligibilityResult::missing_fields(missing);
            },
        };

        let mut result = EligibilityResult::default();
        for rule in self.catalog.rules() {
            let reasons = Self::reasons(rule, age, income);
            if reasons.is_empty() {
                result.eligible.push(rule.name.clone());
            } else {
                result.not_eligible.push(SchemeIneligibility {
                    scheme: rule.name.clone(),
                    reasons,
                });
            }
        }

        tracing::info!(
            eligible = result.eligible.len(),
            not_eligible = result.not_eligible.len(),
            "Evaluated eligibility"
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scheme_voice_core::StateCode;

    fn rule(name: &str, min_age: Option<u64>, max_age: Option<u64>, max_income: u64) -> SchemeRule {
        SchemeRule {
            name: name.to_string(),
            min_age,
            max_age,
            max_income,
        }
    }

    fn profile(age: u64, income: u64, state: StateCode) -> Profile {
        Profile {
            age: Some(age),
            income: Some(income),
            state: Some(state),
        }
    }

    #[test]
    fn test_eligible_within_income() {
        let evaluator = RuleBasedEvaluator::new(SchemeCatalog::new(vec![rule(
            "SchemeA", None, None, 200000,
        )]));
        let result = evaluator.evaluate(&profile(22, 150000, StateCode::Telangana));
        assert_eq!(result.eligible, vec!["SchemeA"]);
        assert!(result.not_eligible.is_empty());
        assert!(result.error.is_none());
    }

    #[test]
    fn test_age_below_minimum() {
        let evaluator = RuleBasedEvaluator::new(SchemeCatalog::new(vec![rule(
            "SchemeB",
            Some(18),
            None,
            100000,
        )]));
        let result = evaluator.evaluate(&profile(15, 50000, StateCode::Maharashtra));
        assert!(result.eligible.is_empty());
        assert_eq!(
            result.not_eligible,
            vec![SchemeIneligibility {
                scheme: "SchemeB".to_string(),
                reasons: vec![IneligibilityReason::AgeBelowMinimum],
            }]
        );
        assert_eq!(
            result.not_eligible[0].reasons[0].to_string(),
            "Age below minimum requirement"
        );
    }

    #[test]
    fn test_reasons_accumulate() {
        let evaluator = RuleBasedEvaluator::new(SchemeCatalog::new(vec![rule(
            "Pension",
            Some(60),
            Some(40),
            10000,
        )]));
        let result = evaluator.evaluate(&Profile {
            age: Some(50),
            income: Some(20000),
            state: Some(StateCode::TamilNadu),
        });
        assert_eq!(
            result.not_eligible[0].reasons,
            vec![
                IneligibilityReason::AgeBelowMinimum,
                IneligibilityReason::AgeAboveMaximum,
                IneligibilityReason::IncomeExceedsLimit,
            ]
        );
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        let evaluator = RuleBasedEvaluator::new(SchemeCatalog::new(vec![rule(
            "Edge",
            Some(18),
            Some(60),
            100000,
        )]));
        assert_eq!(
            evaluator.evaluate(&profile(18, 100000, StateCode::WestBengal)).eligible,
            vec!["Edge"]
        );
        assert_eq!(
            evaluator.evaluate(&profile(60, 1, StateCode::WestBengal)).eligible,
            vec!["Edge"]
        );
    }

    #[test]
    fn test_missing_income() {
        let evaluator = RuleBasedEvaluator::new(SchemeCatalog::new(vec![rule(
            "SchemeA", None, None, 200000,
        )]));
        let result = evaluator.evaluate(&Profile {
            age: Some(30),
            income: None,
            state: Some(StateCode::Telangana),
        });
        assert!(result.eligible.is_empty());
        assert!(result.not_eligible.is_empty());
        assert_eq!(result.missing, vec![SlotName::Income]);
        assert!(result.error.unwrap().contains("income"));
    }

    #[test]
    fn test_zero_age_and_income_count_as_missing() {
        let evaluator = RuleBasedEvaluator::new(SchemeCatalog::new(vec![rule(
            "SchemeA", None, None, 200000,
        )]));
        let result = evaluator.evaluate(&profile(0, 0, StateCode::Telangana));
        assert!(result.eligible.is_empty());
        assert!(result.not_eligible.is_empty());
        assert_eq!(result.missing, vec![SlotName::Age, SlotName::Income]);
        assert_eq!(
            result.error.as_deref(),
            Some("Missing required fields: age, income")
        );

        let result = evaluator.evaluate(&Profile {
            age: Some(30),
            income: Some(0),
            state: None,
        });
        assert_eq!(result.missing, vec![SlotName::Income, SlotName::State]);
    }

    #[test]
    fn test_order_follows_catalog() {
        let evaluator = RuleBasedEvaluator::new(SchemeCatalog::new(vec![
            rule("Z", None, None, 500000),
            rule("A", None, None, 500000),
        ]));
        let result = evaluator.evaluate(&profile(30, 1000, StateCode::Telangana));
        assert_eq!(result.eligible, vec!["Z", "A"]);
    }
}
