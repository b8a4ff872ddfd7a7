//! Main settings module

use config::{Config, Environment, File};
use scheme_voice_core::Language;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::ConfigError;

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    /// Development mode - console speech I/O is acceptable
    #[default]
    Development,
    /// Production mode - cloud speech credentials are required
    Production,
}

impl RuntimeEnvironment {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    /// Dialogue behaviour
    #[serde(default)]
    pub dialogue: DialogueConfig,

    /// Recording parameters
    #[serde(default)]
    pub audio: AudioConfig,

    /// Speech service selection and endpoints
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Scheme catalog location
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Optional YAML file overriding built-in prompts
    #[serde(default)]
    pub prompts_path: Option<PathBuf>,

    /// Optional YAML file overriding built-in keyword tables
    #[serde(default)]
    pub vocabulary_path: Option<PathBuf>,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Slot-filling and language selection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogueConfig {
    /// Attempts per slot before giving up on it
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Language used to ask for the language choice
    #[serde(default)]
    pub bootstrap_language: Language,

    /// Language used when selection fails
    #[serde(default)]
    pub fallback_language: Language,

    /// Ask the user to confirm the detected language
    #[serde(default)]
    pub confirm_language: bool,

    /// Fill the state slot from the opening utterance when possible
    #[serde(default = "default_true")]
    pub prefill_from_opening: bool,
}

fn default_max_attempts() -> u32 {
    3
}

fn default_true() -> bool {
    true
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            bootstrap_language: Language::default(),
            fallback_language: Language::default(),
            confirm_language: false,
            prefill_from_opening: true,
        }
    }
}

/// Recording settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    #[serde(default = "default_channels")]
    pub channels: u16,

    /// Fixed recording length per turn
    #[serde(default = "default_record_seconds")]
    pub record_seconds: u32,

    /// Pause before recording starts
    #[serde(default = "default_pre_roll_ms")]
    pub pre_roll_ms: u64,

    /// Directory for recordings and synthesized audio
    #[serde(default = "default_work_dir")]
    pub work_dir: PathBuf,
}

fn default_sample_rate() -> u32 {
    16000
}

fn default_channels() -> u16 {
    1
}

fn default_record_seconds() -> u32 {
    8
}

fn default_pre_roll_ms() -> u64 {
    2000
}

fn default_work_dir() -> PathBuf {
    PathBuf::from("audio")
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            channels: default_channels(),
            record_seconds: default_record_seconds(),
            pre_roll_ms: default_pre_roll_ms(),
            work_dir: default_work_dir(),
        }
    }
}

/// Which speech adapters to wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SpeechMode {
    /// Typed input and printed output
    #[default]
    Console,
    /// Google Cloud Speech and Text-to-Speech
    Cloud,
}

/// Speech service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    #[serde(default)]
    pub mode: SpeechMode,

    #[serde(default = "default_stt_endpoint")]
    pub stt_endpoint: String,

    #[serde(default = "default_tts_endpoint")]
    pub tts_endpoint: String,

    /// API key for the cloud services (falls back to GOOGLE_API_KEY)
    #[serde(default = "default_api_key")]
    pub api_key: Option<String>,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_true")]
    pub automatic_punctuation: bool,
}

fn default_stt_endpoint() -> String {
    "https://speech.googleapis.com/v1p1beta1/speech:recognize".to_string()
}

fn default_tts_endpoint() -> String {
    "https://texttospeech.googleapis.com/v1/text:synthesize".to_string()
}

fn default_api_key() -> Option<String> {
    std::env::var("GOOGLE_API_KEY")
        .ok()
        .filter(|key| !key.trim().is_empty())
}

fn default_timeout_ms() -> u64 {
    15000
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            mode: SpeechMode::default(),
            stt_endpoint: default_stt_endpoint(),
            tts_endpoint: default_tts_endpoint(),
            api_key: default_api_key(),
            timeout_ms: default_timeout_ms(),
            automatic_punctuation: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("data/schemes.json")
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub log_json: bool,

    /// Directory for per-session log files (console only when unset)
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
            log_dir: None,
        }
    }
}

impl Settings {
    /// Create default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_dialogue()?;
        self.validate_audio()?;
        self.validate_speech()?;
        Ok(())
    }

    fn validate_dialogue(&self) -> Result<(), ConfigError> {
        if !(1..=10).contains(&self.dialogue.max_attempts) {
            return Err(ConfigError::InvalidValue {
                field: "dialogue.max_attempts".to_string(),
                message: format!(
                    "Must be between 1 and 10, got {}",
                    self.dialogue.max_attempts
                ),
            });
        }
        Ok(())
    }

    fn validate_audio(&self) -> Result<(), ConfigError> {
        let audio = &self.audio;

        if !(8000..=48000).contains(&audio.sample_rate) {
            return Err(ConfigError::InvalidValue {
                field: "audio.sample_rate".to_string(),
                message: format!("Must be between 8000 and 48000, got {}", audio.sample_rate),
            });
        }

        if audio.channels != 1 {
            return Err(ConfigError::InvalidValue {
                field: "audio.channels".to_string(),
                message: "Only mono recording is supported".to_string(),
            });
        }

        if audio.record_seconds == 0 || audio.record_seconds > 60 {
            return Err(ConfigError::InvalidValue {
                field: "audio.record_seconds".to_string(),
                message: format!("Must be between 1 and 60, got {}", audio.record_seconds),
            });
        }

        Ok(())
    }

    fn validate_speech(&self) -> Result<(), ConfigError> {
        if self.speech.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "speech.timeout_ms".to_string(),
                message: "Timeout must be positive".to_string(),
            });
        }

        let needs_key = self.speech.mode == SpeechMode::Cloud || self.environment.is_production();
        if needs_key && self.api_key().is_none() {
            return Err(ConfigError::MissingField("speech.api_key".to_string()));
        }

        Ok(())
    }

    /// Cloud API key, if one is configured and non-empty
    pub fn api_key(&self) -> Option<&str> {
        self.speech
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

/// Load settings from files and environment
///
/// Layering, lowest to highest: built-in defaults, `config/default`,
/// `config/{env}`, then `SCHEME_VOICE__SECTION__FIELD` variables.
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    // Load default config
    builder = builder.add_source(File::with_name("config/default").required(false));

    // Load environment-specific config
    if let Some(env_name) = env {
        builder =
            builder.add_source(File::with_name(&format!("config/{}", env_name)).required(false));
    }

    // Load from environment variables
    builder = builder.add_source(
        Environment::with_prefix("SCHEME_VOICE")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    Ok(settings)
}
