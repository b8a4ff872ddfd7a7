//! Conversation turns recorded during an intake session

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who produced an utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeakerRole {
    User,
    Agent,
}

impl std::fmt::Display for SpeakerRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Agent => write!(f, "agent"),
        }
    }
}

/// A single line of dialogue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    /// Role of the speaker
    pub role: SpeakerRole,
    /// Spoken or transcribed text
    pub text: String,
    /// When the utterance was recorded
    pub timestamp: DateTime<Utc>,
}

impl Utterance {
    pub fn new(role: SpeakerRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(SpeakerRole::User, text)
    }

    pub fn agent(text: impl Into<String>) -> Self {
        Self::new(SpeakerRole::Agent, text)
    }
}
