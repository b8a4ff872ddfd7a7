//! Google Cloud Speech-to-Text REST backend
//!
//! One synchronous `speech:recognize` call per utterance. The recognizer is
//! locked to the session language's locale; no auto-detection.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use scheme_voice_config::Settings;
use scheme_voice_core::{Language, SpeechToText, SttError, Transcript};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::PipelineError;

/// Cloud STT configuration
#[derive(Debug, Clone)]
pub struct CloudSttConfig {
    /// Full `speech:recognize` URL
    pub endpoint: String,
    pub api_key: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
    pub automatic_punctuation: bool,
    /// Languages this deployment accepts
    pub languages: Vec<Language>,
}

impl Default for CloudSttConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://speech.googleapis.com/v1p1beta1/speech:recognize".to_string(),
            api_key: String::new(),
            timeout_ms: 15000,
            automatic_punctuation: true,
            languages: Language::ALL.to_vec(),
        }
    }
}

impl CloudSttConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            endpoint: settings.speech.stt_endpoint.clone(),
            api_key: settings.api_key().unwrap_or_default().to_string(),
            timeout_ms: settings.speech.timeout_ms,
            automatic_punctuation: settings.speech.automatic_punctuation,
            ..Default::default()
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecognitionConfig<'a> {
    encoding: &'static str,
    sample_rate_hertz: u32,
    language_code: &'a str,
    enable_automatic_punctuation: bool,
}

#[derive(Debug, Serialize)]
struct RecognitionAudio {
    content: String,
}

#[derive(Debug, Serialize)]
struct RecognizeRequest<'a> {
    config: RecognitionConfig<'a>,
    audio: RecognitionAudio,
}

#[derive(Debug, Default, Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    results: Vec<RecognitionResult>,
}

#[derive(Debug, Deserialize)]
struct RecognitionResult {
    #[serde(default)]
    alternatives: Vec<RecognitionAlternative>,
}

#[derive(Debug, Deserialize)]
struct RecognitionAlternative {
    #[serde(default)]
    transcript: String,
    #[serde(default)]
    confidence: f32,
}

/// Cloud STT client
pub struct CloudSpeechStt {
    config: CloudSttConfig,
    client: reqwest::Client,
}

impl CloudSpeechStt {
    pub fn new(config: CloudSttConfig) -> Result<Self, PipelineError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| PipelineError::Http(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!(endpoint = %config.endpoint, "Cloud STT backend ready");
        Ok(Self { config, client })
    }

    fn sample_rate(audio: &Path) -> Result<u32, SttError> {
        hound::WavReader::open(audio)
            .map(|reader| reader.spec().sample_rate)
            .map_err(|e| SttError::Service(format!("Unreadable WAV {}: {}", audio.display(), e)))
    }

    /// First alternative of the first result, or `NoSpeechDetected`
    fn parse_response(
        response: RecognizeResponse,
        language: Language,
    ) -> Result<Transcript, SttError> {
        let alternative = response
            .results
            .into_iter()
            .next()
            .and_then(|result| result.alternatives.into_iter().next())
            .ok_or(SttError::NoSpeechDetected)?;

        let text = alternative.transcript.trim();
        if text.is_empty() {
            return Err(SttError::NoSpeechDetected);
        }
        Ok(Transcript::new(text, alternative.confidence, language))
    }
}

#[async_trait]
impl SpeechToText for CloudSpeechStt {
    async fn transcribe(&self, audio: &Path, language: Language) -> Result<Transcript, SttError> {
        if !audio.exists() {
            return Err(SttError::AudioNotFound(audio.display().to_string()));
        }
        if !self.config.languages.contains(&language) {
            return Err(SttError::UnsupportedLanguage(language.code().to_string()));
        }

        let sample_rate = Self::sample_rate(audio)?;
        let bytes = tokio::fs::read(audio)
            .await
            .map_err(|_| SttError::AudioNotFound(audio.display().to_string()))?;

        let request = RecognizeRequest {
            config: RecognitionConfig {
                encoding: "LINEAR16",
                sample_rate_hertz: sample_rate,
                language_code: language.locale(),
                enable_automatic_punctuation: self.config.automatic_punctuation,
            },
            audio: RecognitionAudio {
                content: STANDARD.encode(&bytes),
            },
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| SttError::Service(format!("STT request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, body = %body, "STT service returned error");
            return Err(SttError::Service(format!("STT service returned {}", status)));
        }

        let parsed: RecognizeResponse = response
            .json()
            .await
            .map_err(|e| SttError::Service(format!("Failed to parse STT response: {}", e)))?;

        let transcript = Self::parse_response(parsed, language)?;
        tracing::debug!(
            language = %language,
            confidence = transcript.confidence,
            text = %transcript.text,
            "Transcribed utterance"
        );
        Ok(transcript)
    }

    fn model_name(&self) -> &str {
        "google-cloud-speech"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<Transcript, SttError> {
        let response: RecognizeResponse = serde_json::from_str(json).unwrap();
        CloudSpeechStt::parse_response(response, Language::Telugu)
    }

    #[test]
    fn test_parse_first_alternative() {
        let transcript = parse(
            r#"{"results": [
                {"alternatives": [{"transcript": " తెలంగాణ ", "confidence": 0.91}]},
                {"alternatives": [{"transcript": "ignored", "confidence": 0.5}]}
            ]}"#,
        )
        .unwrap();
        assert_eq!(transcript.text, "తెలంగాణ");
        assert!((transcript.confidence - 0.91).abs() < 1e-6);
        assert_eq!(transcript.language, Language::Telugu);
    }

    #[test]
    fn test_parse_empty_results() {
        assert_eq!(parse("{}").unwrap_err(), SttError::NoSpeechDetected);
        assert_eq!(
            parse(r#"{"results": [{"alternatives": [{"transcript": "  "}]}]}"#).unwrap_err(),
            SttError::NoSpeechDetected
        );
    }

    #[test]
    fn test_request_shape() {
        let request = RecognizeRequest {
            config: RecognitionConfig {
                encoding: "LINEAR16",
                sample_rate_hertz: 16000,
                language_code: Language::Hindi.locale(),
                enable_automatic_punctuation: true,
            },
            audio: RecognitionAudio {
                content: STANDARD.encode(b"abc"),
            },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["config"]["sampleRateHertz"], 16000);
        assert_eq!(value["config"]["languageCode"], "hi-IN");
        assert_eq!(value["config"]["enableAutomaticPunctuation"], true);
        assert_eq!(value["audio"]["content"], "YWJj");
    }

    #[tokio::test]
    async fn test_missing_audio_file() {
        let stt = CloudSpeechStt::new(CloudSttConfig::default()).unwrap();
        let err = stt
            .transcribe(Path::new("/nonexistent/turn.wav"), Language::Hindi)
            .await
            .unwrap_err();
        assert!(matches!(err, SttError::AudioNotFound(_)));
    }

    #[tokio::test]
    async fn test_unsupported_language() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("turn.wav");
        crate::audio::write_wav_i16(&path, &[0.0; 16], 16000).unwrap();

        let stt = CloudSpeechStt::new(CloudSttConfig {
            languages: vec![Language::Hindi],
            ..Default::default()
        })
        .unwrap();
        let err = stt.transcribe(&path, Language::Bengali).await.unwrap_err();
        assert_eq!(err, SttError::UnsupportedLanguage("bn".to_string()));
    }
}
