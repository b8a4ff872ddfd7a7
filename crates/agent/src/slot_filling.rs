//! Slot-Filling Controller
//!
//! Walks the slots in fill order and asks for each missing one until it is
//! filled or its attempts run out. Per attempt: speak the slot prompt,
//! listen once, extract a candidate, try to store it. A failed
//! transcription, an utterance without a candidate and a contradicting
//! candidate each use up the attempt.

use scheme_voice_config::{DialogueConfig, PromptCatalog, PromptKey};
use scheme_voice_core::{Contradiction, Language, SlotName, SlotUpdate, SlotValue};
use scheme_voice_text_processing::SlotExtractor;
use serde::Serialize;
use std::sync::Arc;

use crate::memory::ConversationMemory;
use crate::voice::VoiceChannel;

/// Notified whenever a candidate conflicts with a stored value
///
/// The stored value is never replaced; the handler only observes. This is a
/// hook for future renegotiation of answers: the controller re-checks each
/// slot before every attempt and stops once it is filled, so it cannot
/// trigger the hook today.
pub trait ContradictionHandler: Send + Sync {
    fn on_contradiction(&self, contradiction: &Contradiction, language: Language);
}

/// Logs the contradiction and keeps the stored value
#[derive(Debug, Clone, Copy, Default)]
pub struct RejectContradictions;

impl ContradictionHandler for RejectContradictions {
    fn on_contradiction(&self, contradiction: &Contradiction, language: Language) {
        tracing::warn!(
            slot = %contradiction.slot,
            old_value = %contradiction.old_value,
            new_value = %contradiction.new_value,
            language = %language,
            "Contradicting answer rejected"
        );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotFillingConfig {
    /// Attempts per slot
    pub max_attempts: u32,
}

impl Default for SlotFillingConfig {
    fn default() -> Self {
        Self { max_attempts: 3 }
    }
}

impl From<&DialogueConfig> for SlotFillingConfig {
    fn from(config: &DialogueConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
        }
    }
}

/// What happened to one slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SlotOutcome {
    /// Filled before the controller reached it; never prompted
    AlreadyFilled,
    Filled { value: SlotValue, attempts: u32 },
    Exhausted { attempts: u32 },
}

/// Per-slot outcomes in fill order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SlotFillingReport {
    pub slots: Vec<(SlotName, SlotOutcome)>,
}

impl SlotFillingReport {
    pub fn outcome(&self, slot: SlotName) -> Option<SlotOutcome> {
        self.slots
            .iter()
            .find(|(name, _)| *name == slot)
            .map(|(_, outcome)| *outcome)
    }

    /// Speech round trips used across all slots
    pub fn total_attempts(&self) -> u32 {
        self.slots
            .iter()
            .map(|(_, outcome)| match outcome {
                SlotOutcome::AlreadyFilled => 0,
                SlotOutcome::Filled { attempts, .. } | SlotOutcome::Exhausted { attempts } => {
                    *attempts
                },
            })
            .sum()
    }
}

fn prompt_key(slot: SlotName) -> PromptKey {
    match slot {
        SlotName::Age => PromptKey::AskAge,
        SlotName::Income => PromptKey::AskIncome,
        SlotName::State => PromptKey::AskState,
    }
}

pub struct SlotFillingController {
    config: SlotFillingConfig,
    voice: VoiceChannel,
    prompts: Arc<PromptCatalog>,
    extractor: Arc<SlotExtractor>,
    contradictions: Arc<dyn ContradictionHandler>,
}

impl SlotFillingController {
    pub fn new(
        config: SlotFillingConfig,
        voice: VoiceChannel,
        prompts: Arc<PromptCatalog>,
        extractor: Arc<SlotExtractor>,
    ) -> Self {
        Self {
            config,
            voice,
            prompts,
            extractor,
            contradictions: Arc::new(RejectContradictions),
        }
    }

    pub fn with_contradiction_handler(mut self, handler: Arc<dyn ContradictionHandler>) -> Self {
        self.contradictions = handler;
        self
    }

    /// Fill every missing slot, in order
    pub async fn run(&self, memory: &mut ConversationMemory) -> SlotFillingReport {
        let mut report = SlotFillingReport::default();
        for slot in SlotName::ORDER {
            let outcome = self.fill_slot(slot, memory).await;
            tracing::info!(slot = %slot, ?outcome, "Slot finished");
            report.slots.push((slot, outcome));
        }
        report
    }

    async fn fill_slot(&self, slot: SlotName, memory: &mut ConversationMemory) -> SlotOutcome {
        let language = memory.language();
        let mut attempts = 0;

        while attempts < self.config.max_attempts {
            if memory.profile().is_filled(slot) {
                if attempts == 0 {
                    tracing::debug!(slot = %slot, "Already filled, skipping");
                    return SlotOutcome::AlreadyFilled;
                }
                break;
            }

            let turn = format!("{}_retry_{}", slot, attempts);
            attempts += 1;

            let prompt = self.prompts.get(prompt_key(slot), language).to_string();
            self.voice.say(&prompt, language).await;
            memory.add_agent_utterance(prompt);

            let transcript = match self.voice.listen(&turn, language).await {
                Ok(transcript) => transcript,
                Err(e) => {
                    tracing::warn!(slot = %slot, attempt = attempts, error = %e, "Turn failed");
                    continue;
                },
            };
            memory.add_user_utterance(transcript.text.clone());

            let candidate = match self.extractor.extract(slot, &transcript.text) {
                Some(candidate) => candidate,
                None => {
                    tracing::info!(slot = %slot, attempt = attempts, "No value recognized");
                    continue;
                },
            };

            match memory.update(slot, candidate.value) {
                Ok(SlotUpdate::Stored) => {
                    return SlotOutcome::Filled {
                        value: candidate.value,
                        attempts,
                    };
                },
                Ok(SlotUpdate::Contradiction(contradiction)) => {
                    self.contradictions.on_contradiction(&contradiction, language);
                },
                Err(e) => {
                    tracing::warn!(slot = %slot, error = %e, "Candidate rejected");
                },
            }
        }

        match memory.profile().get(slot) {
            Some(value) => SlotOutcome::Filled { value, attempts },
            None => {
                tracing::warn!(slot = %slot, attempts, "Slot left empty after all attempts");
                SlotOutcome::Exhausted { attempts }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_helpers() {
        let report = SlotFillingReport {
            slots: vec![
                (SlotName::Age, SlotOutcome::AlreadyFilled),
                (
                    SlotName::Income,
                    SlotOutcome::Filled {
                        value: SlotValue::Number(50000),
                        attempts: 2,
                    },
                ),
                (SlotName::State, SlotOutcome::Exhausted { attempts: 3 }),
            ],
        };
        assert_eq!(report.total_attempts(), 5);
        assert_eq!(report.outcome(SlotName::Age), Some(SlotOutcome::AlreadyFilled));
    }

    #[test]
    fn test_config_from_dialogue() {
        let dialogue = DialogueConfig {
            max_attempts: 5,
            ..Default::default()
        };
        assert_eq!(SlotFillingConfig::from(&dialogue).max_attempts, 5);
        assert_eq!(SlotFillingConfig::default().max_attempts, 3);
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_value(SlotOutcome::Filled {
            value: SlotValue::Number(22),
            attempts: 1,
        })
        .unwrap();
        assert_eq!(json["outcome"], "filled");
        assert_eq!(json["value"], 22);
    }
}
