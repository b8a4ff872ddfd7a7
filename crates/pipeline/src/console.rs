//! Text-mode speech stand-ins
//!
//! `ConsoleCapture` reads a typed reply from stdin and stores it next to
//! the requested recording path with a `.txt` extension.
//! `ConsoleTranscriber` reads that file back as the transcript, so the
//! dialogue runs unchanged without a microphone or a speech service.

use async_trait::async_trait;
use scheme_voice_core::{
    AudioCapture, Error, Language, Result, SpeechToText, SttError, TextToSpeech, Transcript,
};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::Mutex;

/// Reads one line from stdin per turn
pub struct ConsoleCapture {
    stdin: Mutex<BufReader<tokio::io::Stdin>>,
}

impl Default for ConsoleCapture {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleCapture {
    pub fn new() -> Self {
        Self {
            stdin: Mutex::new(BufReader::new(tokio::io::stdin())),
        }
    }
}

/// Path the console adapters use for a turn's text
pub fn transcript_path(destination: &Path) -> PathBuf {
    destination.with_extension("txt")
}

#[async_trait]
impl AudioCapture for ConsoleCapture {
    async fn capture(&self, destination: &Path) -> Result<PathBuf> {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let mut line = String::new();
        let read = self.stdin.lock().await.read_line(&mut line).await?;
        if read == 0 {
            return Err(Error::Audio("stdin closed".to_string()));
        }

        let path = transcript_path(destination);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, line.trim()).await?;
        Ok(path)
    }
}

/// Reads back what [`ConsoleCapture`] stored
#[derive(Debug, Clone, Default)]
pub struct ConsoleTranscriber;

#[async_trait]
impl SpeechToText for ConsoleTranscriber {
    async fn transcribe(
        &self,
        audio: &Path,
        language: Language,
    ) -> std::result::Result<Transcript, SttError> {
        let path = if audio.extension().is_some_and(|ext| ext == "txt") {
            audio.to_path_buf()
        } else {
            transcript_path(audio)
        };

        let text = tokio::fs::read_to_string(&path)
            .await
            .map_err(|_| SttError::AudioNotFound(path.display().to_string()))?;

        let text = text.trim();
        if text.is_empty() {
            return Err(SttError::NoSpeechDetected);
        }
        Ok(Transcript::new(text, 1.0, language))
    }

    fn model_name(&self) -> &str {
        "console"
    }
}

/// Prints each line with its language code
#[derive(Debug, Clone, Default)]
pub struct ConsoleSpeaker;

#[async_trait]
impl TextToSpeech for ConsoleSpeaker {
    async fn speak(&self, text: &str, language: Language) -> Result<()> {
        let mut stdout = tokio::io::stdout();
        stdout
            .write_all(format!("[{}] {}\n", language, text).as_bytes())
            .await?;
        stdout.flush().await?;
        Ok(())
    }
}
