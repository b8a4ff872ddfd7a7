//! Default-device capture and playback via cpal
//!
//! cpal streams are not `Send`, so each recording or playback builds its
//! stream on a blocking thread and drops it there.

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, SampleFormat, Stream, StreamConfig};
use scheme_voice_config::AudioConfig;
use scheme_voice_core::{AudioCapture, Result};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::{downmix, read_wav_mono, resample, write_wav_i16, AudioPlayer};
use crate::PipelineError;

/// Records fixed-length utterances from the default input device
#[derive(Debug, Clone)]
pub struct MicrophoneRecorder {
    sample_rate: u32,
    record_duration: Duration,
    pre_roll: Duration,
}

impl MicrophoneRecorder {
    pub fn new(config: &AudioConfig) -> Self {
        Self {
            sample_rate: config.sample_rate,
            record_duration: Duration::from_secs(u64::from(config.record_seconds)),
            pre_roll: Duration::from_millis(config.pre_roll_ms),
        }
    }

    fn record_blocking(duration: Duration) -> std::result::Result<(Vec<f32>, u32), PipelineError> {
        let device = cpal::default_host()
            .default_input_device()
            .ok_or_else(|| PipelineError::Device("No input device".to_string()))?;
        let supported = device
            .default_input_config()
            .map_err(|e| PipelineError::Device(e.to_string()))?;

        let config: StreamConfig = supported.config();
        let samples = Arc::new(Mutex::new(Vec::<f32>::new()));
        let stream = build_input_stream(&device, &config, supported.sample_format(), samples.clone())?;

        stream
            .play()
            .map_err(|e| PipelineError::Device(e.to_string()))?;
        std::thread::sleep(duration);
        drop(stream);

        let interleaved = samples
            .lock()
            .map_err(|_| PipelineError::Device("Capture buffer poisoned".to_string()))?
            .clone();
        Ok((downmix(&interleaved, config.channels), config.sample_rate.0))
    }
}

fn build_input_stream(
    device: &Device,
    config: &StreamConfig,
    format: SampleFormat,
    samples: Arc<Mutex<Vec<f32>>>,
) -> std::result::Result<Stream, PipelineError> {
    let on_error = |err: cpal::StreamError| tracing::warn!(error = %err, "Input stream error");

    let stream = match format {
        SampleFormat::F32 => device.build_input_stream(
            config,
            move |data: &[f32], _: &_| {
                if let Ok(mut buf) = samples.lock() {
                    buf.extend_from_slice(data);
                }
            },
            on_error,
            None,
        ),
        SampleFormat::I16 => device.build_input_stream(
            config,
            move |data: &[i16], _: &_| {
                if let Ok(mut buf) = samples.lock() {
                    buf.extend(data.iter().map(|&s| s as f32 / i16::MAX as f32));
                }
            },
            on_error,
            None,
        ),
        other => {
            return Err(PipelineError::Device(format!(
                "Unsupported input sample format: {:?}",
                other
            )))
        },
    };

    stream.map_err(|e| PipelineError::Device(e.to_string()))
}

#[async_trait]
impl AudioCapture for MicrophoneRecorder {
    async fn capture(&self, destination: &Path) -> Result<PathBuf> {
        if let Some(parent) = destination.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tracing::info!(seconds = self.record_duration.as_secs(), "Recording starts shortly");
        tokio::time::sleep(self.pre_roll).await;
        tracing::info!("Recording");

        let duration = self.record_duration;
        let (samples, device_rate) = tokio::task::spawn_blocking(move || Self::record_blocking(duration))
            .await
            .map_err(|e| PipelineError::Device(format!("Recording task failed: {}", e)))??;

        let resampled = resample(&samples, device_rate, self.sample_rate);
        write_wav_i16(destination, &resampled, self.sample_rate)?;

        tracing::debug!(
            path = %destination.display(),
            samples = resampled.len(),
            device_rate,
            "Recording saved"
        );
        Ok(destination.to_path_buf())
    }
}

/// Plays WAV files through the default output device
#[derive(Debug, Clone, Default)]
pub struct SpeakerPlayer;

impl SpeakerPlayer {
    pub fn new() -> Self {
        Self
    }

    fn play_blocking(samples: Vec<f32>, rate: u32) -> std::result::Result<(), PipelineError> {
        let device = cpal::default_host()
            .default_output_device()
            .ok_or_else(|| PipelineError::Device("No output device".to_string()))?;
        let supported = device
            .default_output_config()
            .map_err(|e| PipelineError::Device(e.to_string()))?;
        if supported.sample_format() != SampleFormat::F32 {
            return Err(PipelineError::Device(format!(
                "Unsupported output sample format: {:?}",
                supported.sample_format()
            )));
        }

        let config: StreamConfig = supported.config();
        let channels = config.channels as usize;
        let device_rate = config.sample_rate.0;
        let samples = resample(&samples, rate, device_rate);
        let duration = Duration::from_secs_f32(samples.len() as f32 / device_rate as f32);

        let mut position = 0usize;
        let stream = device
            .build_output_stream(
                &config,
                move |out: &mut [f32], _: &_| {
                    for frame in out.chunks_mut(channels) {
                        let value = samples.get(position).copied().unwrap_or(0.0);
                        frame.iter_mut().for_each(|s| *s = value);
                        position += 1;
                    }
                },
                |err: cpal::StreamError| tracing::warn!(error = %err, "Output stream error"),
                None,
            )
            .map_err(|e| PipelineError::Device(e.to_string()))?;

        stream
            .play()
            .map_err(|e| PipelineError::Device(e.to_string()))?;
        std::thread::sleep(duration + Duration::from_millis(200));
        drop(stream);
        Ok(())
    }
}

#[async_trait]
impl AudioPlayer for SpeakerPlayer {
    async fn play(&self, wav: &Path) -> std::result::Result<(), PipelineError> {
        let audio = read_wav_mono(wav)?;
        tokio::task::spawn_blocking(move || Self::play_blocking(audio.samples, audio.sample_rate))
            .await
            .map_err(|e| PipelineError::Device(format!("Playback task failed: {}", e)))?
    }
}
