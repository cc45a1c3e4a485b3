//! Audio processing port - speed adjustment and waveform sampling

use async_trait::async_trait;
use domain::AudioFormat;
#[cfg(test)]
use mockall::automock;
use serde::Serialize;

use crate::error::ApplicationError;

/// Amplitude-vs-time chart data for the synthesis panel
#[derive(Debug, Clone, Serialize)]
pub struct WaveformData {
    /// Time axis in seconds, same length as `amplitude`
    pub time_secs: Vec<f32>,
    /// Normalized amplitude in [-1, 1], at most 10 000 points
    pub amplitude: Vec<f32>,
    /// Total duration of the audio in seconds
    pub duration_secs: f32,
}

/// Port for local audio post-processing
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AudioProcessingPort: Send + Sync {
    /// Re-time audio by a speed multiplier
    ///
    /// Pitch-coupled: the multiplier changes duration and pitch
    /// together. A multiplier of 1.0 returns the input unchanged.
    ///
    /// # Returns
    /// The re-timed audio in the same container format
    async fn adjust_speed(
        &self,
        audio_data: Vec<u8>,
        format: AudioFormat,
        multiplier: f32,
    ) -> Result<Vec<u8>, ApplicationError>;

    /// Build waveform chart data for an audio buffer
    async fn waveform(
        &self,
        audio_data: Vec<u8>,
        format: AudioFormat,
    ) -> Result<WaveformData, ApplicationError>;
}
