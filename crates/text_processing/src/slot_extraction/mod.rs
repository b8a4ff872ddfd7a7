//! Slot Value Extraction
//!
//! Turns a noisy transcript into a typed candidate for one slot. The
//! extractor is stateless and never writes to the profile; the caller
//! decides what to do with the candidate.
//!
//! - Numeric slots (`age`, `income`): the **last** number in the utterance,
//!   provided it is positive.
//! - Categorical slot (`state`): the first state in table order whose
//!   spelling appears in the utterance.

use scheme_voice_config::Vocabulary;
use scheme_voice_core::{SlotKind, SlotName, SlotValue, StateCode};
use std::ops::Range;

use crate::keywords::KeywordTable;
use crate::numerals::extract_numbers;

/// Candidate value for a slot plus where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub value: SlotValue,
    /// Byte range of the match (in the lowercased text for keyword matches)
    pub span: Range<usize>,
    /// The matched text
    pub matched: String,
}

/// Rule-based slot extractor
#[derive(Debug, Clone)]
pub struct SlotExtractor {
    states: KeywordTable<StateCode>,
}

impl Default for SlotExtractor {
    fn default() -> Self {
        Self::new(&Vocabulary::default())
    }
}

impl SlotExtractor {
    pub fn new(vocabulary: &Vocabulary) -> Self {
        Self {
            states: KeywordTable::new(vocabulary.states.clone()),
        }
    }

    /// Extract a candidate for `slot` from `text`
    pub fn extract(&self, slot: SlotName, text: &str) -> Option<Extraction> {
        let extraction = match slot.kind() {
            SlotKind::Numeric => self.extract_number(text),
            SlotKind::Categorical => self.extract_state(text),
        };

        match &extraction {
            Some(found) => tracing::debug!(
                slot = %slot,
                value = %found.value,
                matched = %found.matched,
                "Extracted slot candidate"
            ),
            None => tracing::debug!(slot = %slot, "No slot candidate in utterance"),
        }

        extraction
    }

    /// Last number in the text; a trailing zero is not a candidate
    pub fn extract_number(&self, text: &str) -> Option<Extraction> {
        extract_numbers(text)
            .pop()
            .filter(|m| m.value > 0)
            .map(|m| Extraction {
                value: SlotValue::Number(m.value),
                matched: text[m.span.clone()].to_string(),
                span: m.span,
            })
    }

    /// First state in table order mentioned in the text
    pub fn extract_state(&self, text: &str) -> Option<Extraction> {
        self.states.first_match(text).map(|m| Extraction {
            value: SlotValue::State(m.value),
            matched: m.variant,
            span: m.span,
        })
    }
}
