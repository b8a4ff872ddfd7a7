//! Intake session
//!
//! Drives one conversation end to end: language bootstrap, greeting and
//! opening utterance, slot filling, evaluation and the spoken verdict.
//! Every line spoken or heard after the language is chosen lands in the
//! session history.

use scheme_voice_config::{DialogueConfig, PromptCatalog, PromptKey, Vocabulary};
use scheme_voice_core::{
    EligibilityEvaluator, EligibilityResult, Language, Profile, SlotKind, SlotName, SlotUpdate,
    Utterance,
};
use scheme_voice_text_processing::SlotExtractor;
use serde::Serialize;
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

use crate::bootstrap::{BootstrapConfig, BootstrapMethod, LanguageBootstrap};
use crate::memory::ConversationMemory;
use crate::slot_filling::{SlotFillingConfig, SlotFillingController, SlotFillingReport};
use crate::voice::VoiceChannel;

const OPENING_TURN: &str = "init";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub bootstrap: BootstrapConfig,
    pub slot_filling: SlotFillingConfig,
    /// Fill categorical slots from the opening utterance
    pub prefill_from_opening: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::from(&DialogueConfig::default())
    }
}

impl From<&DialogueConfig> for SessionConfig {
    fn from(config: &DialogueConfig) -> Self {
        Self {
            bootstrap: BootstrapConfig::from(config),
            slot_filling: SlotFillingConfig::from(config),
            prefill_from_opening: config.prefill_from_opening,
        }
    }
}

/// Everything a finished session produced
#[derive(Debug, Clone, Serialize)]
pub struct SessionOutcome {
    pub session_id: String,
    pub language: Language,
    pub language_method: BootstrapMethod,
    pub profile: Profile,
    pub report: SlotFillingReport,
    pub result: EligibilityResult,
    pub history: Vec<Utterance>,
}

pub struct IntakeSession {
    config: SessionConfig,
    voice: VoiceChannel,
    prompts: Arc<PromptCatalog>,
    extractor: Arc<SlotExtractor>,
    bootstrap: LanguageBootstrap,
    controller: SlotFillingController,
    evaluator: Arc<dyn EligibilityEvaluator>,
}

impl IntakeSession {
    pub fn new(
        config: SessionConfig,
        voice: VoiceChannel,
        prompts: Arc<PromptCatalog>,
        vocabulary: &Vocabulary,
        evaluator: Arc<dyn EligibilityEvaluator>,
    ) -> Self {
        let extractor = Arc::new(SlotExtractor::new(vocabulary));
        let bootstrap =
            LanguageBootstrap::new(config.bootstrap, voice.clone(), prompts.clone(), vocabulary);
        let controller = SlotFillingController::new(
            config.slot_filling,
            voice.clone(),
            prompts.clone(),
            extractor.clone(),
        );

        Self {
            config,
            voice,
            prompts,
            extractor,
            bootstrap,
            controller,
            evaluator,
        }
    }

    pub async fn run(&self) -> SessionOutcome {
        let session_id = Uuid::new_v4().to_string();
        let span = tracing::info_span!("session", session_id = %session_id);
        self.converse(session_id).instrument(span).await
    }

    async fn converse(&self, session_id: String) -> SessionOutcome {
        let chosen = self.bootstrap.run().await;
        let mut memory = ConversationMemory::new(chosen.language);
        tracing::info!(language = %chosen.language, method = ?chosen.method, "Session started");

        self.speak(&mut memory, self.prompts.get(PromptKey::Greeting, chosen.language).to_string())
            .await;
        self.opening_turn(&mut memory).await;

        let report = self.controller.run(&mut memory).await;

        let result = self.evaluator.evaluate(memory.profile());
        tracing::info!(
            eligible = result.eligible.len(),
            not_eligible = result.not_eligible.len(),
            error = ?result.error,
            "Eligibility evaluated"
        );

        let response = self.response_text(&result, memory.language());
        self.speak(&mut memory, response).await;
        let thanks = self.prompts.get(PromptKey::Thanks, memory.language()).to_string();
        self.speak(&mut memory, thanks).await;

        let (language, profile, history) = memory.into_parts();
        SessionOutcome {
            session_id,
            language,
            language_method: chosen.method,
            profile,
            report,
            result,
            history,
        }
    }

    /// Listen once after the greeting and prefill what can be attributed
    async fn opening_turn(&self, memory: &mut ConversationMemory) {
        let transcript = match self.voice.listen(OPENING_TURN, memory.language()).await {
            Ok(transcript) => transcript,
            Err(e) => {
                tracing::warn!(error = %e, "Opening utterance not captured");
                return;
            },
        };
        memory.add_user_utterance(transcript.text.clone());

        if !self.config.prefill_from_opening {
            return;
        }

        // A bare number cannot be attributed to age or income
        for slot in SlotName::ORDER
            .into_iter()
            .filter(|slot| slot.kind() == SlotKind::Categorical)
        {
            if let Some(candidate) = self.extractor.extract(slot, &transcript.text) {
                match memory.update(slot, candidate.value) {
                    Ok(SlotUpdate::Stored) => {
                        tracing::info!(slot = %slot, value = %candidate.value, "Prefilled from opening")
                    },
                    Ok(SlotUpdate::Contradiction(_)) => {},
                    Err(e) => tracing::warn!(slot = %slot, error = %e, "Prefill rejected"),
                }
            }
        }
    }

    fn response_text(&self, result: &EligibilityResult, language: Language) -> String {
        if !result.eligible.is_empty() {
            return self.prompts.render(
                PromptKey::Eligible,
                language,
                "schemes",
                &result.eligible.join(", "),
            );
        }

        let error = match &result.error {
            Some(error) => error.clone(),
            None => self.prompts.get(PromptKey::NoScheme, language).to_string(),
        };
        self.prompts.render(PromptKey::Apology, language, "error", &error)
    }

    async fn speak(&self, memory: &mut ConversationMemory, text: String) {
        self.voice.say(&text, memory.language()).await;
        memory.add_agent_utterance(text);
    }
}
