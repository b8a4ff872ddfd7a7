//! Scheme intake assistant entry point
//!
//! Loads settings, prompts, vocabulary and the scheme catalog, wires the
//! speech adapters for the configured mode and runs one intake session.

use anyhow::Context;
use std::fs::File;
use std::sync::{Arc, Mutex};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use scheme_voice_agent::{IntakeSession, SessionConfig, VoiceChannel};
use scheme_voice_config::{load_settings, PromptCatalog, Settings, SpeechMode, Vocabulary};
use scheme_voice_core::{AudioCapture, EligibilityEvaluator, SpeechToText, TextToSpeech};
use scheme_voice_pipeline::{
    CloudSpeechStt, CloudSttConfig, ConsoleCapture, ConsoleSpeaker, ConsoleTranscriber,
};
use scheme_voice_tools::{RuleBasedEvaluator, SchemeCatalog};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Priority: env vars > config/{env} > config/default > defaults
    let env = std::env::var("SCHEME_VOICE_ENV").ok();
    let settings = match load_settings(env.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            // Tracing is not initialized yet
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        },
    };

    init_tracing(&settings)?;

    tracing::info!("Starting scheme intake assistant v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        environment = ?settings.environment,
        config_path = env.as_deref().unwrap_or("default"),
        mode = ?settings.speech.mode,
        "Configuration loaded"
    );

    let prompts = match &settings.prompts_path {
        Some(path) => PromptCatalog::load(path)
            .with_context(|| format!("loading prompts from {}", path.display()))?,
        None => PromptCatalog::builtin(),
    };
    let vocabulary = match &settings.vocabulary_path {
        Some(path) => Vocabulary::load(path)
            .with_context(|| format!("loading vocabulary from {}", path.display()))?,
        None => Vocabulary::default(),
    };

    let catalog = SchemeCatalog::load(&settings.catalog.path).map_err(|e| {
        tracing::error!(path = %settings.catalog.path.display(), error = %e, "Scheme catalog unavailable");
        e
    })?;
    let evaluator: Arc<dyn EligibilityEvaluator> = Arc::new(RuleBasedEvaluator::new(catalog));

    std::fs::create_dir_all(&settings.audio.work_dir).with_context(|| {
        format!("creating work directory {}", settings.audio.work_dir.display())
    })?;
    let voice = build_voice(&settings)?;
    tracing::info!(voice = ?voice, "Speech adapters ready");

    let session = IntakeSession::new(
        SessionConfig::from(&settings.dialogue),
        voice,
        Arc::new(prompts),
        &vocabulary,
        evaluator,
    );
    let outcome = session.run().await;

    tracing::info!(
        session_id = %outcome.session_id,
        language = %outcome.language,
        eligible = ?outcome.result.eligible,
        error = ?outcome.result.error,
        "Session complete"
    );
    tracing::debug!(outcome = %serde_json::to_string(&outcome)?, "Session record");

    Ok(())
}

/// Wire capture, transcription and synthesis for the configured mode
fn build_voice(settings: &Settings) -> anyhow::Result<VoiceChannel> {
    let work_dir = settings.audio.work_dir.clone();

    let voice = match settings.speech.mode {
        SpeechMode::Console => {
            let capture: Arc<dyn AudioCapture> = Arc::new(ConsoleCapture::new());
            let stt: Arc<dyn SpeechToText> = Arc::new(ConsoleTranscriber);
            let tts: Arc<dyn TextToSpeech> = Arc::new(ConsoleSpeaker);
            VoiceChannel::new(capture, stt, tts, work_dir)
        },
        SpeechMode::Cloud => {
            let stt: Arc<dyn SpeechToText> =
                Arc::new(CloudSpeechStt::new(CloudSttConfig::from_settings(settings))?);
            let (capture, tts) = device_io(settings)?;
            VoiceChannel::new(capture, stt, tts, work_dir)
        },
    };

    Ok(voice)
}

#[cfg(feature = "audio-device")]
fn device_io(
    settings: &Settings,
) -> anyhow::Result<(Arc<dyn AudioCapture>, Arc<dyn TextToSpeech>)> {
    use scheme_voice_pipeline::{CloudTts, CloudTtsConfig, MicrophoneRecorder, SpeakerPlayer};

    let capture: Arc<dyn AudioCapture> = Arc::new(MicrophoneRecorder::new(&settings.audio));
    let tts: Arc<dyn TextToSpeech> = Arc::new(CloudTts::new(
        CloudTtsConfig::from_settings(settings),
        Arc::new(SpeakerPlayer::new()),
    )?);
    Ok((capture, tts))
}

#[cfg(not(feature = "audio-device"))]
fn device_io(
    _settings: &Settings,
) -> anyhow::Result<(Arc<dyn AudioCapture>, Arc<dyn TextToSpeech>)> {
    anyhow::bail!("speech.mode = cloud needs a build with the `audio-device` feature")
}

/// Console layer plus an optional per-session log file
fn init_tracing(settings: &Settings) -> anyhow::Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = &settings.observability.log_level;
        format!("scheme_voice={}", level).into()
    });

    // stdout belongs to the console dialogue
    let subscriber = tracing_subscriber::registry().with(env_filter);
    let fmt_layer = if settings.observability.log_json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed()
    };

    let file_layer = match &settings.observability.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating log directory {}", dir.display()))?;
            let name = format!("agent_{}.log", chrono::Local::now().format("%Y%m%d_%H%M%S"));
            let file = File::create(dir.join(&name))
                .with_context(|| format!("creating log file {}", name))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .boxed(),
            )
        },
        None => None,
    };

    subscriber.with(fmt_layer).with(file_layer).init();
    Ok(())
}
