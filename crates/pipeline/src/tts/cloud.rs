//! Google Cloud Text-to-Speech REST backend
//!
//! Each line is synthesized to a LINEAR16 WAV under the work directory,
//! played through the configured [`AudioPlayer`], then removed.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use scheme_voice_config::Settings;
use scheme_voice_core::{Language, Result, TextToSpeech};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::audio::AudioPlayer;
use crate::PipelineError;

/// Cloud TTS configuration
#[derive(Debug, Clone)]
pub struct CloudTtsConfig {
    /// Full `text:synthesize` URL
    pub endpoint: String,
    pub api_key: String,
    pub timeout_ms: u64,
    pub sample_rate: u32,
    /// Where synthesized files are written
    pub work_dir: PathBuf,
}

impl Default for CloudTtsConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://texttospeech.googleapis.com/v1/text:synthesize".to_string(),
            api_key: String::new(),
            timeout_ms: 15000,
            sample_rate: 16000,
            work_dir: PathBuf::from("audio"),
        }
    }
}

impl CloudTtsConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            endpoint: settings.speech.tts_endpoint.clone(),
            api_key: settings.api_key().unwrap_or_default().to_string(),
            timeout_ms: settings.speech.timeout_ms,
            sample_rate: settings.audio.sample_rate,
            work_dir: settings.audio.work_dir.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct SynthesisInput<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelection<'a> {
    language_code: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfigBody {
    audio_encoding: &'static str,
    sample_rate_hertz: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeRequest<'a> {
    input: SynthesisInput<'a>,
    voice: VoiceSelection<'a>,
    audio_config: AudioConfigBody,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    audio_content: String,
}

/// Cloud TTS client
pub struct CloudTts {
    config: CloudTtsConfig,
    client: reqwest::Client,
    player: Arc<dyn AudioPlayer>,
    counter: AtomicU64,
}

impl CloudTts {
    pub fn new(config: CloudTtsConfig, player: Arc<dyn AudioPlayer>) -> std::result::Result<Self, PipelineError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| PipelineError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            client,
            player,
            counter: AtomicU64::new(0),
        })
    }

    fn request<'a>(&self, text: &'a str, language: Language) -> SynthesizeRequest<'a> {
        SynthesizeRequest {
            input: SynthesisInput { text },
            voice: VoiceSelection {
                language_code: language.locale(),
            },
            audio_config: AudioConfigBody {
                audio_encoding: "LINEAR16",
                sample_rate_hertz: self.config.sample_rate,
            },
        }
    }

    async fn synthesize(&self, text: &str, language: Language) -> std::result::Result<Vec<u8>, PipelineError> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&self.request(text, language))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PipelineError::Service(format!("TTS service returned {}", status)));
        }

        let body: SynthesizeResponse = response.json().await?;
        STANDARD
            .decode(body.audio_content)
            .map_err(|e| PipelineError::Service(format!("Invalid audio content: {}", e)))
    }
}

#[async_trait]
impl TextToSpeech for CloudTts {
    async fn speak(&self, text: &str, language: Language) -> Result<()> {
        if text.trim().is_empty() {
            return Ok(());
        }

        let audio = self.synthesize(text, language).await?;

        tokio::fs::create_dir_all(&self.config.work_dir).await?;
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        let path = self.config.work_dir.join(format!("tts_{}.wav", n));
        tokio::fs::write(&path, &audio).await?;

        let played = self.player.play(&path).await;
        if let Err(e) = tokio::fs::remove_file(&path).await {
            tracing::debug!(path = %path.display(), error = %e, "Could not remove synthesized audio");
        }
        played?;

        tracing::debug!(language = %language, bytes = audio.len(), "Spoke line");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SilentPlayer;

    #[test]
    fn test_request_shape() {
        let tts = CloudTts::new(CloudTtsConfig::default(), Arc::new(SilentPlayer)).unwrap();
        let value = serde_json::to_value(tts.request("నమస్కారం", Language::Telugu)).unwrap();
        assert_eq!(value["input"]["text"], "నమస్కారం");
        assert_eq!(value["voice"]["languageCode"], "te-IN");
        assert_eq!(value["audioConfig"]["audioEncoding"], "LINEAR16");
        assert_eq!(value["audioConfig"]["sampleRateHertz"], 16000);
    }

    #[tokio::test]
    async fn test_empty_text_is_noop() {
        let tts = CloudTts::new(CloudTtsConfig::default(), Arc::new(SilentPlayer)).unwrap();
        assert!(tts.speak("  ", Language::Hindi).await.is_ok());
    }
}
