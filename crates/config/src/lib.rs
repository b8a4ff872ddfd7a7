//! Configuration management for the scheme intake assistant
//!
//! Supports loading configuration from:
//! - YAML/TOML files under `config/`
//! - Environment variables (SCHEME_VOICE_ prefix)
//! - Optional YAML overrides for prompts and keyword vocabularies

pub mod prompts;
pub mod settings;
pub mod vocabulary;

pub use prompts::{PromptCatalog, PromptKey};
pub use settings::{
    load_settings, AudioConfig, CatalogConfig, DialogueConfig, ObservabilityConfig,
    RuntimeEnvironment, Settings, SpeechConfig, SpeechMode,
};
pub use vocabulary::{ConfirmationWords, KeywordEntry, Vocabulary};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
