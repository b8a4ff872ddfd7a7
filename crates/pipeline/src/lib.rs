//! Speech I/O adapters for the scheme intake assistant
//!
//! Implements the speech traits from `scheme-voice-core`:
//! - **Cloud**: Google Cloud Speech-to-Text and Text-to-Speech over REST
//! - **Console**: typed replies and printed prompts for development
//! - **Device** (feature `audio-device`): microphone capture and speaker
//!   playback through `cpal`

pub mod audio;
pub mod console;
pub mod stt;
pub mod tts;

pub use audio::{AudioPlayer, SilentPlayer};
#[cfg(feature = "audio-device")]
pub use audio::{MicrophoneRecorder, SpeakerPlayer};
pub use console::{ConsoleCapture, ConsoleSpeaker, ConsoleTranscriber};
pub use stt::{CloudSpeechStt, CloudSttConfig};
pub use tts::{CloudTts, CloudTtsConfig};

use thiserror::Error;

/// Pipeline errors
#[derive(Error, Debug, Clone)]
pub enum PipelineError {
    #[error("Audio error: {0}")]
    Audio(String),

    #[error("Device error: {0}")]
    Device(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Service error: {0}")]
    Service(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for PipelineError {
    fn from(err: std::io::Error) -> Self {
        PipelineError::Io(err.to_string())
    }
}

impl From<hound::Error> for PipelineError {
    fn from(err: hound::Error) -> Self {
        PipelineError::Audio(err.to_string())
    }
}

impl From<reqwest::Error> for PipelineError {
    fn from(err: reqwest::Error) -> Self {
        PipelineError::Http(err.to_string())
    }
}

impl From<PipelineError> for scheme_voice_core::Error {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Audio(msg) | PipelineError::Device(msg) => {
                scheme_voice_core::Error::Audio(msg)
            },
            PipelineError::Io(msg) => scheme_voice_core::Error::Io(msg),
            PipelineError::Http(msg) | PipelineError::Service(msg) => {
                scheme_voice_core::Error::Synthesis(msg)
            },
        }
    }
}
