//! Voice channel
//!
//! Bundles the three speech collaborators and runs one speak or one
//! listen turn at a time. Synthesis failures are logged and swallowed;
//! capture and transcription failures are returned to the caller.

use scheme_voice_core::{AudioCapture, Language, SpeechToText, TextToSpeech, Transcript};
use std::path::PathBuf;
use std::sync::Arc;

use crate::AgentError;

#[derive(Clone)]
pub struct VoiceChannel {
    capture: Arc<dyn AudioCapture>,
    stt: Arc<dyn SpeechToText>,
    tts: Arc<dyn TextToSpeech>,
    work_dir: PathBuf,
}

impl VoiceChannel {
    pub fn new(
        capture: Arc<dyn AudioCapture>,
        stt: Arc<dyn SpeechToText>,
        tts: Arc<dyn TextToSpeech>,
        work_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            capture,
            stt,
            tts,
            work_dir: work_dir.into(),
        }
    }

    /// Speak a line; failures are logged, never returned
    pub async fn say(&self, text: &str, language: Language) {
        tracing::info!(language = %language, text = %text, "Agent");
        if let Err(e) = self.tts.speak(text, language).await {
            tracing::warn!(language = %language, error = %e, "Speech synthesis failed");
        }
    }

    /// Record one utterance named `turn` and transcribe it in `language`
    pub async fn listen(&self, turn: &str, language: Language) -> Result<Transcript, AgentError> {
        let destination = self.work_dir.join(format!("{}.wav", turn));
        let recording = self
            .capture
            .capture(&destination)
            .await
            .map_err(|e| AgentError::Capture(e.to_string()))?;

        let transcript = self.stt.transcribe(&recording, language).await?;
        tracing::info!(
            turn,
            language = %language,
            confidence = transcript.confidence,
            text = %transcript.text,
            "User"
        );
        Ok(transcript)
    }
}

impl std::fmt::Debug for VoiceChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoiceChannel")
            .field("stt", &self.stt.model_name())
            .field("work_dir", &self.work_dir)
            .finish()
    }
}
