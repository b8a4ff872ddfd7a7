//! Scheme eligibility intake agent
//!
//! Features:
//! - Spoken language bootstrap with optional confirmation
//! - Per-session conversation memory with contradiction detection
//! - Slot filling for age, income and state with bounded retries
//! - Full intake session ending in an eligibility verdict

pub mod bootstrap;
pub mod memory;
pub mod session;
pub mod slot_filling;
pub mod voice;

pub use bootstrap::{BootstrapConfig, BootstrapMethod, BootstrapOutcome, LanguageBootstrap};
pub use memory::{ConversationMemory, MemorySnapshot};
pub use session::{IntakeSession, SessionConfig, SessionOutcome};
pub use slot_filling::{
    ContradictionHandler, RejectContradictions, SlotFillingConfig, SlotFillingController,
    SlotFillingReport, SlotOutcome,
};
pub use voice::VoiceChannel;

use scheme_voice_core::SttError;
use thiserror::Error;

/// Agent errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AgentError {
    #[error("Capture error: {0}")]
    Capture(String),

    #[error("Transcription error: {0}")]
    Transcription(#[from] SttError),

    #[error(transparent)]
    Core(#[from] scheme_voice_core::Error),
}
