//! Audio helpers: WAV I/O, channel downmix, resampling and playback

#[cfg(feature = "audio-device")]
mod device;
#[cfg(feature = "audio-device")]
mod resample;

#[cfg(feature = "audio-device")]
pub use device::{MicrophoneRecorder, SpeakerPlayer};
#[cfg(feature = "audio-device")]
pub use resample::resample;

use async_trait::async_trait;
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::path::Path;

use crate::PipelineError;

/// Decoded mono audio
#[derive(Debug, Clone, PartialEq)]
pub struct MonoAudio {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl MonoAudio {
    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

/// Read a WAV file as mono f32 samples in `[-1.0, 1.0]`
pub fn read_wav_mono(path: &Path) -> Result<MonoAudio, PipelineError> {
    let reader = WavReader::open(path)
        .map_err(|e| PipelineError::Audio(format!("Failed to open {}: {}", path.display(), e)))?;

    let spec = reader.spec();
    let samples: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .filter_map(Result::ok)
            .collect(),
        SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample.saturating_sub(1))) as f32;
            reader
                .into_samples::<i32>()
                .filter_map(Result::ok)
                .map(|s| s as f32 / max_val)
                .collect()
        },
    };

    Ok(MonoAudio {
        samples: downmix(&samples, spec.channels),
        sample_rate: spec.sample_rate,
    })
}

/// Write mono f32 samples as 16-bit PCM WAV
pub fn write_wav_i16(path: &Path, samples: &[f32], sample_rate: u32) -> Result<(), PipelineError> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec)?;
    for &sample in samples {
        writer.write_sample(to_i16(sample))?;
    }
    writer.finalize()?;
    Ok(())
}

fn to_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16
}

/// Average interleaved channels into one
pub fn downmix(interleaved: &[f32], channels: u16) -> Vec<f32> {
    if channels <= 1 {
        return interleaved.to_vec();
    }
    interleaved
        .chunks(channels as usize)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect()
}

/// Plays a synthesized WAV file
#[async_trait]
pub trait AudioPlayer: Send + Sync + 'static {
    async fn play(&self, wav: &Path) -> Result<(), PipelineError>;
}

/// Player that only logs what would be played
#[derive(Debug, Clone, Default)]
pub struct SilentPlayer;

#[async_trait]
impl AudioPlayer for SilentPlayer {
    async fn play(&self, wav: &Path) -> Result<(), PipelineError> {
        let audio = read_wav_mono(wav)?;
        tracing::debug!(
            path = %wav.display(),
            seconds = audio.duration_secs(),
            "Skipping playback (no audio device)"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downmix_stereo() {
        let mono = downmix(&[0.5, 0.1, -0.2, 0.2], 2);
        assert_eq!(mono.len(), 2);
        assert!((mono[0] - 0.3).abs() < 1e-6);
        assert!(mono[1].abs() < 1e-6);
    }

    #[test]
    fn test_wav_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        let samples: Vec<f32> = (0..1600).map(|i| ((i as f32) * 0.01).sin() * 0.5).collect();

        write_wav_i16(&path, &samples, 16000).unwrap();
        let audio = read_wav_mono(&path).unwrap();

        assert_eq!(audio.sample_rate, 16000);
        assert_eq!(audio.samples.len(), 1600);
        assert!((audio.duration_secs() - 0.1).abs() < 1e-6);
        assert!((audio.samples[100] - samples[100]).abs() < 1e-3);
    }

    #[tokio::test]
    async fn test_silent_player_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.wav");
        write_wav_i16(&path, &[0.0; 160], 16000).unwrap();
        assert!(SilentPlayer.play(&path).await.is_ok());
        assert!(SilentPlayer.play(&dir.path().join("missing.wav")).await.is_err());
    }
}
