//! Core traits and types for the scheme intake voice assistant
//!
//! This crate provides foundational types used across all other crates:
//! - Language definitions for the five supported Indian languages
//! - Profile, slot and state types collected during intake
//! - Conversation utterances and speech transcripts
//! - Scheme rules and eligibility results
//! - Collaborator traits for speech I/O and evaluation

pub mod conversation;
pub mod eligibility;
pub mod error;
pub mod language;
pub mod profile;
pub mod traits;
pub mod transcript;

pub use conversation::{SpeakerRole, Utterance};
pub use eligibility::{EligibilityResult, IneligibilityReason, SchemeIneligibility, SchemeRule};
pub use error::{Error, Result, SttError};
pub use language::Language;
pub use profile::{
    Contradiction, Profile, SlotKind, SlotName, SlotUpdate, SlotValue, StateCode,
};
pub use traits::{AudioCapture, EligibilityEvaluator, SpeechToText, TextToSpeech};
pub use transcript::Transcript;
