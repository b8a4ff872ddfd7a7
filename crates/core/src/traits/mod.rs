//! Collaborator traits
//!
//! Every external call the dialogue makes goes through one of these.

mod eligibility;
mod speech;

pub use eligibility::EligibilityEvaluator;
pub use speech::{AudioCapture, SpeechToText, TextToSpeech};
