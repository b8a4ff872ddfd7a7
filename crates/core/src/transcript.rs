//! Speech recognition output

use serde::{Deserialize, Serialize};

use crate::Language;

/// Final transcript of one captured utterance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    /// Recognized text
    pub text: String,
    /// Recognizer confidence in `[0, 1]`
    pub confidence: f32,
    /// Language the audio was recognized in
    pub language: Language,
}

impl Transcript {
    pub fn new(text: impl Into<String>, confidence: f32, language: Language) -> Self {
        Self {
            text: text.into(),
            confidence: confidence.clamp(0.0, 1.0),
            language,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}
