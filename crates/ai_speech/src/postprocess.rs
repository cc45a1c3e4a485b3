//! Playback-speed adjustment for synthesized audio
//!
//! Re-times an artifact by reinterpreting its sample stream at
//! `original_rate * multiplier` and resampling back to the original
//! rate. Known limitation: this couples speed and pitch (speeding up
//! raises pitch); it is not a pitch-preserving time stretch.

use tracing::{debug, instrument};

use crate::converter::AudioConverter;
use crate::error::SpeechError;
use crate::pcm;
use crate::types::{AudioData, AudioFormat};

/// The multipliers the speed tiers map to
pub const SUPPORTED_MULTIPLIERS: [f32; 4] = [0.5, 1.0, 1.5, 2.0];

/// Adjusts the playback speed of compressed audio artifacts
#[derive(Debug, Clone, Default)]
pub struct SpeedAdjuster {
    converter: AudioConverter,
}

impl SpeedAdjuster {
    /// Create a new speed adjuster
    #[must_use]
    pub const fn new(converter: AudioConverter) -> Self {
        Self { converter }
    }

    /// Re-time audio by the given multiplier
    ///
    /// A multiplier of 1.0 is a no-op and returns the input bytes
    /// unchanged. On any failure the caller still holds the original
    /// artifact; nothing is modified in place.
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::AudioProcessing` for a multiplier outside
    /// the supported set, corrupt input, or a failed decode/encode.
    #[instrument(skip(self, audio), fields(format = %audio.format(), multiplier = f64::from(multiplier)))]
    pub async fn adjust(
        &self,
        audio: &AudioData,
        multiplier: f32,
    ) -> Result<AudioData, SpeechError> {
        if (multiplier - 1.0).abs() < f32::EPSILON {
            debug!("Multiplier is 1.0, skipping adjustment");
            return Ok(audio.clone());
        }

        if !SUPPORTED_MULTIPLIERS
            .iter()
            .any(|m| (m - multiplier).abs() < f32::EPSILON)
        {
            return Err(SpeechError::AudioProcessing(format!(
                "Unsupported speed multiplier: {multiplier}"
            )));
        }

        let wav = self.converter.decode_to_pcm_wav(audio).await?;
        let decoded = pcm::read_wav(wav.data())?;

        let retimed = retime(&decoded.samples, multiplier);
        debug!(
            input_samples = decoded.samples.len(),
            output_samples = retimed.len(),
            "Re-timed sample stream"
        );

        let wav_bytes = pcm::write_wav(&retimed, decoded.sample_rate)?;
        let retimed_wav =
            AudioData::new(wav_bytes, AudioFormat::Wav).with_sample_rate(decoded.sample_rate);

        self.converter.convert(&retimed_wav, audio.format()).await
    }
}

/// Re-time a sample stream by a rate multiplier
///
/// Equivalent to declaring the stream at `rate * multiplier` and
/// resampling back to `rate` with linear interpolation: output sample
/// `i` reads input position `i * multiplier`. Duration shrinks by the
/// multiplier and pitch shifts with it.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn retime(samples: &[f32], multiplier: f32) -> Vec<f32> {
    if samples.is_empty() || multiplier <= 0.0 {
        return Vec::new();
    }

    let out_len = (samples.len() as f64 / f64::from(multiplier)).floor() as usize;

    let mut out = Vec::with_capacity(out_len);
    for i in 0..out_len {
        let pos = i as f64 * f64::from(multiplier);
        let idx = pos.floor() as usize;
        if idx + 1 < samples.len() {
            let frac = (pos - pos.floor()) as f32;
            out.push(samples[idx].mul_add(1.0 - frac, samples[idx + 1] * frac));
        } else if idx < samples.len() {
            out.push(samples[idx]);
        } else {
            break;
        }
    }
    out
}
