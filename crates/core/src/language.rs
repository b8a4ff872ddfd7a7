//! Language definitions for the supported intake languages
//!
//! The assistant speaks five Indian languages. Each language carries the
//! ISO 639-1 code used internally and the BCP-47 locale sent to the
//! speech services.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Supported conversation languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Language {
    #[default]
    #[serde(rename = "hi")]
    Hindi,
    #[serde(rename = "te")]
    Telugu,
    #[serde(rename = "mr")]
    Marathi,
    #[serde(rename = "ta")]
    Tamil,
    #[serde(rename = "bn")]
    Bengali,
}

impl Language {
    /// All supported languages, in the order they are offered to the user
    pub const ALL: [Language; 5] = [
        Language::Hindi,
        Language::Telugu,
        Language::Marathi,
        Language::Tamil,
        Language::Bengali,
    ];

    /// Get ISO 639-1 code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Hindi => "hi",
            Self::Telugu => "te",
            Self::Marathi => "mr",
            Self::Tamil => "ta",
            Self::Bengali => "bn",
        }
    }

    /// Get the BCP-47 locale used by STT/TTS services
    pub fn locale(&self) -> &'static str {
        match self {
            Self::Hindi => "hi-IN",
            Self::Telugu => "te-IN",
            Self::Marathi => "mr-IN",
            Self::Tamil => "ta-IN",
            Self::Bengali => "bn-IN",
        }
    }

    /// Get human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Hindi => "Hindi",
            Self::Telugu => "Telugu",
            Self::Marathi => "Marathi",
            Self::Tamil => "Tamil",
            Self::Bengali => "Bengali",
        }
    }

    /// Parse from ISO code
    pub fn from_code(code: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|lang| lang.code().eq_ignore_ascii_case(code.trim()))
            .ok_or_else(|| Error::UnsupportedLanguage(code.to_string()))
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_code(s)
    }
}
