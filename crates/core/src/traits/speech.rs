//! Speech I/O traits
//!
//! Capture, transcription and synthesis are each one request/response
//! call. The dialogue awaits every call before issuing the next one.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::transcript::Transcript;
use crate::{Language, Result, SttError};

/// Records one fixed-length utterance from the user
///
/// Implementations:
/// - `MicrophoneRecorder` - default input device (feature `audio-device`)
/// - `ConsoleCapture` - reads a typed reply from stdin
#[async_trait]
pub trait AudioCapture: Send + Sync + 'static {
    /// Capture audio into `destination`
    ///
    /// # Returns
    /// Path of the written recording (normally `destination`)
    async fn capture(&self, destination: &Path) -> Result<PathBuf>;
}

/// Speech-to-Text interface
///
/// # Example
///
/// ```ignore
/// let stt: Arc<dyn SpeechToText> = Arc::new(CloudSpeechStt::new(config)?);
/// let transcript = stt.transcribe(&path, Language::Telugu).await?;
/// println!("Transcribed: {}", transcript.text);
/// ```
#[async_trait]
pub trait SpeechToText: Send + Sync + 'static {
    /// Transcribe a recorded utterance in the given language
    async fn transcribe(
        &self,
        audio: &Path,
        language: Language,
    ) -> std::result::Result<Transcript, SttError>;

    /// Get model name for logging
    fn model_name(&self) -> &str;
}

/// Text-to-Speech interface
#[async_trait]
pub trait TextToSpeech: Send + Sync + 'static {
    /// Speak `text` aloud in `language`
    ///
    /// Callers log failures and carry on.
    async fn speak(&self, text: &str, language: Language) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct EchoStt;

    #[async_trait]
    impl SpeechToText for EchoStt {
        async fn transcribe(
            &self,
            audio: &Path,
            language: Language,
        ) -> std::result::Result<Transcript, SttError> {
            let name = audio
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| SttError::AudioNotFound(audio.display().to_string()))?;
            Ok(Transcript::new(name, 1.0, language))
        }

        fn model_name(&self) -> &str {
            "echo"
        }
    }

    #[derive(Default)]
    struct RecordingTts {
        spoken: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl TextToSpeech for RecordingTts {
        async fn speak(&self, text: &str, _language: Language) -> Result<()> {
            self.spoken.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_stt_trait_object() {
        let stt: Box<dyn SpeechToText> = Box::new(EchoStt);
        let transcript = stt
            .transcribe(Path::new("/tmp/telangana.wav"), Language::Telugu)
            .await
            .unwrap();
        assert_eq!(transcript.text, "telangana");
        assert_eq!(transcript.language, Language::Telugu);
        assert_eq!(stt.model_name(), "echo");
    }

    #[tokio::test]
    async fn test_tts_trait_object() {
        let tts = RecordingTts::default();
        tts.speak("नमस्ते", Language::Hindi).await.unwrap();
        assert_eq!(tts.spoken.lock().unwrap().as_slice(), ["नमस्ते"]);
    }
}
