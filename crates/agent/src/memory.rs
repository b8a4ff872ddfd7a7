//! Conversation Memory
//!
//! Per-session store for the selected language, the eligibility profile and
//! the ordered dialogue history. A value written to a filled slot is kept
//! only if it equals the stored one; a different value is reported as a
//! contradiction and the stored value stays.

use scheme_voice_core::{
    Contradiction, Language, Profile, Result, SlotName, SlotUpdate, SlotValue, SpeakerRole,
    Utterance,
};
use serde::Serialize;

/// Borrowed read view of the memory
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MemorySnapshot<'a> {
    pub language: Language,
    pub profile: &'a Profile,
    pub history: &'a [Utterance],
}

/// Session memory
#[derive(Debug, Clone)]
pub struct ConversationMemory {
    language: Language,
    profile: Profile,
    history: Vec<Utterance>,
}

impl ConversationMemory {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            profile: Profile::new(),
            history: Vec::new(),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn history(&self) -> &[Utterance] {
        &self.history
    }

    /// Write a slot value unless it contradicts a stored one
    pub fn update(&mut self, slot: SlotName, value: SlotValue) -> Result<SlotUpdate> {
        if let Some(old_value) = self.profile.get(slot) {
            if old_value != value {
                tracing::debug!(
                    slot = %slot,
                    old_value = %old_value,
                    new_value = %value,
                    "Contradiction detected"
                );
                return Ok(SlotUpdate::Contradiction(Contradiction {
                    slot,
                    old_value,
                    new_value: value,
                }));
            }
        }

        self.profile.set(slot, value)?;
        tracing::debug!(slot = %slot, value = %value, "Slot updated");
        Ok(SlotUpdate::Stored)
    }

    /// Unfilled slots in fill order
    pub fn missing_slots(&self) -> Vec<SlotName> {
        self.profile.missing_slots()
    }

    pub fn snapshot(&self) -> MemorySnapshot<'_> {
        MemorySnapshot {
            language: self.language,
            profile: &self.profile,
            history: &self.history,
        }
    }

    pub fn append_utterance(&mut self, role: SpeakerRole, text: impl Into<String>) {
        self.history.push(Utterance::new(role, text));
    }

    pub fn add_user_utterance(&mut self, text: impl Into<String>) {
        self.append_utterance(SpeakerRole::User, text);
    }

    pub fn add_agent_utterance(&mut self, text: impl Into<String>) {
        self.append_utterance(SpeakerRole::Agent, text);
    }

    /// Consume the memory, returning the profile and history
    pub fn into_parts(self) -> (Language, Profile, Vec<Utterance>) {
        (self.language, self.profile, self.history)
    }
}
