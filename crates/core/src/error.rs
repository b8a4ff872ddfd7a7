//! Error types shared across crates

use thiserror::Error;

use crate::profile::{SlotKind, SlotName};

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Unknown slot: {0}")]
    UnknownSlot(String),

    #[error("Unknown state code: {0}")]
    UnknownState(String),

    #[error("Slot {slot} expects a {expected} value")]
    SlotKindMismatch { slot: SlotName, expected: SlotKind },

    #[error("Audio error: {0}")]
    Audio(String),

    #[error("Speech synthesis error: {0}")]
    Synthesis(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Speech-to-text failure modes
///
/// Every variant is recoverable from the dialogue's point of view: the
/// caller counts the turn as a failed attempt and moves on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SttError {
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Audio file not found: {0}")]
    AudioNotFound(String),

    #[error("No speech detected")]
    NoSpeechDetected,

    #[error("Transcription service error: {0}")]
    Service(String),
}
