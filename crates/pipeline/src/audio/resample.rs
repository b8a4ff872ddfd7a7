//! Sample-rate conversion between device rates and the recognizer rate

use rubato::{FftFixedIn, Resampler};

use crate::PipelineError;

/// Inputs shorter than this are interpolated linearly
const MIN_FFT_SAMPLES: usize = 64;
const CHUNK_SIZE: usize = 1024;

/// Band-limited resampling through rubato's `FftFixedIn`
///
/// Falls back to linear interpolation for very short inputs or when the
/// resampler cannot be built.
pub fn resample(samples: &[f32], from_rate: u32, to_rate: u32) -> Vec<f32> {
    if from_rate == to_rate || samples.is_empty() || from_rate == 0 || to_rate == 0 {
        return samples.to_vec();
    }
    if samples.len() < MIN_FFT_SAMPLES {
        return resample_linear(samples, from_rate, to_rate);
    }

    match resample_fft(samples, from_rate, to_rate) {
        Ok(resampled) => resampled,
        Err(e) => {
            tracing::warn!(error = %e, from_rate, to_rate, "FFT resampling failed, using linear fallback");
            resample_linear(samples, from_rate, to_rate)
        },
    }
}

fn resample_fft(samples: &[f32], from_rate: u32, to_rate: u32) -> Result<Vec<f32>, PipelineError> {
    let mut resampler = FftFixedIn::<f32>::new(
        from_rate as usize,
        to_rate as usize,
        samples.len().min(CHUNK_SIZE),
        2,
        1,
    )
    .map_err(|e| PipelineError::Audio(format!("Resampler init failed: {}", e)))?;

    let expected = (samples.len() as u64 * u64::from(to_rate) / u64::from(from_rate)) as usize;
    let mut output = Vec::with_capacity(expected + CHUNK_SIZE);

    // The resampler may round the chunk size up to fit its FFT length
    for chunk in samples.chunks(resampler.input_frames_next()) {
        let input = [chunk];
        let frames = if chunk.len() == resampler.input_frames_next() {
            resampler.process(&input[..], None)
        } else {
            resampler.process_partial(Some(&input[..]), None)
        }
        .map_err(|e| PipelineError::Audio(format!("Resampling failed: {}", e)))?;
        output.extend_from_slice(&frames[0]);
    }

    // Flush the filter tail
    let tail = resampler
        .process_partial::<&[f32]>(None, None)
        .map_err(|e| PipelineError::Audio(format!("Resampling failed: {}", e)))?;
    output.extend_from_slice(&tail[0]);

    output.truncate(expected);
    Ok(output)
}

/// Linear interpolation fallback for very short inputs
fn resample_linear(samples: &[f32], from_rate: u32, to_rate: u32) -> Vec<f32> {
    let ratio = from_rate as f64 / to_rate as f64;
    let out_len = ((samples.len() as f64) / ratio).floor() as usize;
    let last = samples.len() - 1;

    (0..out_len)
        .map(|i| {
            let pos = i as f64 * ratio;
            let idx = pos.floor() as usize;
            let frac = (pos - idx as f64) as f32;
            let a = samples[idx.min(last)];
            let b = samples[(idx + 1).min(last)];
            a + (b - a) * frac
        })
        .collect()
}
