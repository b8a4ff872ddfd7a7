//! Language bootstrap
//!
//! One pass, no retries: ask for a language in the bootstrap language,
//! match the reply against the language keyword table, optionally confirm.
//! Anything short of a clear choice ends in the fallback language.

use scheme_voice_config::{ConfirmationWords, DialogueConfig, PromptCatalog, PromptKey, Vocabulary};
use scheme_voice_core::Language;
use scheme_voice_text_processing::{classify_confirmation, Confirmation, KeywordTable};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

use crate::voice::VoiceChannel;

const SELECT_TURN: &str = "language_select";
const CONFIRM_TURN: &str = "language_confirm";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootstrapConfig {
    pub bootstrap_language: Language,
    pub fallback_language: Language,
    pub confirm_language: bool,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self::from(&DialogueConfig::default())
    }
}

impl From<&DialogueConfig> for BootstrapConfig {
    fn from(config: &DialogueConfig) -> Self {
        Self {
            bootstrap_language: config.bootstrap_language,
            fallback_language: config.fallback_language,
            confirm_language: config.confirm_language,
        }
    }
}

/// How the session language was decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BootstrapMethod {
    /// Matched from the reply, no confirmation asked
    Detected,
    /// Matched and then confirmed with a yes
    Confirmed,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BootstrapOutcome {
    pub language: Language,
    pub method: BootstrapMethod,
}

pub struct LanguageBootstrap {
    config: BootstrapConfig,
    voice: VoiceChannel,
    prompts: Arc<PromptCatalog>,
    languages: KeywordTable<Language>,
    confirmations: HashMap<Language, ConfirmationWords>,
}

impl LanguageBootstrap {
    pub fn new(
        config: BootstrapConfig,
        voice: VoiceChannel,
        prompts: Arc<PromptCatalog>,
        vocabulary: &Vocabulary,
    ) -> Self {
        Self {
            config,
            voice,
            prompts,
            languages: KeywordTable::new(vocabulary.languages.clone()),
            confirmations: vocabulary.confirmations.clone(),
        }
    }

    pub async fn run(&self) -> BootstrapOutcome {
        let asked_in = self.config.bootstrap_language;
        let prompt = self.prompts.get(PromptKey::LanguageSelection, asked_in);
        self.voice.say(prompt, asked_in).await;

        let transcript = match self.voice.listen(SELECT_TURN, asked_in).await {
            Ok(transcript) => transcript,
            Err(e) => {
                tracing::warn!(error = %e, "Language selection failed");
                return self.fallback();
            },
        };

        let detected = match self.languages.first_match(&transcript.text) {
            Some(found) => {
                tracing::info!(language = %found.value, variant = %found.variant, "Language detected");
                found.value
            },
            None => {
                tracing::info!(text = %transcript.text, "No language recognized");
                return self.fallback();
            },
        };

        if !self.config.confirm_language {
            return BootstrapOutcome {
                language: detected,
                method: BootstrapMethod::Detected,
            };
        }

        if self.confirm(detected).await {
            BootstrapOutcome {
                language: detected,
                method: BootstrapMethod::Confirmed,
            }
        } else {
            self.fallback()
        }
    }

    async fn confirm(&self, language: Language) -> bool {
        let question = self.prompts.get(PromptKey::LanguageConfirmation, language);
        self.voice.say(question, language).await;

        let reply = match self.voice.listen(CONFIRM_TURN, language).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(language = %language, error = %e, "Language confirmation failed");
                return false;
            },
        };

        let words = self.confirmations.get(&language).cloned().unwrap_or_default();
        let answer = classify_confirmation(&words, &reply.text);
        tracing::info!(language = %language, ?answer, "Language confirmation");
        answer == Confirmation::Yes
    }

    fn fallback(&self) -> BootstrapOutcome {
        tracing::info!(language = %self.config.fallback_language, "Using fallback language");
        BootstrapOutcome {
            language: self.config.fallback_language,
            method: BootstrapMethod::Fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_dialogue() {
        let dialogue = DialogueConfig {
            fallback_language: Language::Tamil,
            confirm_language: true,
            ..Default::default()
        };
        let config = BootstrapConfig::from(&dialogue);
        assert_eq!(config.bootstrap_language, Language::Hindi);
        assert_eq!(config.fallback_language, Language::Tamil);
        assert!(config.confirm_language);
    }

    #[test]
    fn test_method_serialization() {
        let outcome = BootstrapOutcome {
            language: Language::Bengali,
            method: BootstrapMethod::Fallback,
        };
        let json = serde_json::to_value(outcome).unwrap();
        assert_eq!(json["language"], "bn");
        assert_eq!(json["method"], "fallback");
    }
}
