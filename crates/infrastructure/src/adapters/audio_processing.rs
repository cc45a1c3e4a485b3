//! Audio processing adapter - speed adjustment and waveform sampling

use ai_speech::types::AudioData;
use ai_speech::{AudioConverter, SpeedAdjuster, WaveformRenderer};
use application::ApplicationError;
use application::ports::{AudioProcessingPort, WaveformData};
use async_trait::async_trait;
use domain::AudioFormat;
use tracing::instrument;

use super::{to_application_error, to_speech_format};

/// Adapter implementing [`AudioProcessingPort`] over the local audio
/// toolchain
#[derive(Debug, Clone)]
pub struct AudioProcessingAdapter {
    adjuster: SpeedAdjuster,
    renderer: WaveformRenderer,
}

impl AudioProcessingAdapter {
    /// Create a new audio processing adapter
    #[must_use]
    pub fn new(converter: AudioConverter) -> Self {
        Self {
            adjuster: SpeedAdjuster::new(converter.clone()),
            renderer: WaveformRenderer::new(converter),
        }
    }

    /// Create an adapter from an optional ffmpeg path override
    #[must_use]
    pub fn with_ffmpeg_path(ffmpeg_path: Option<&str>) -> Self {
        let converter =
            ffmpeg_path.map_or_else(AudioConverter::new, AudioConverter::with_ffmpeg_path);
        Self::new(converter)
    }
}

#[async_trait]
impl AudioProcessingPort for AudioProcessingAdapter {
    #[instrument(skip(self, audio_data), fields(size = audio_data.len(), multiplier = f64::from(multiplier)))]
    async fn adjust_speed(
        &self,
        audio_data: Vec<u8>,
        format: AudioFormat,
        multiplier: f32,
    ) -> Result<Vec<u8>, ApplicationError> {
        let audio = AudioData::new(audio_data, to_speech_format(format));
        self.adjuster
            .adjust(&audio, multiplier)
            .await
            .map(AudioData::into_data)
            .map_err(to_application_error)
    }

    #[instrument(skip(self, audio_data), fields(size = audio_data.len()))]
    async fn waveform(
        &self,
        audio_data: Vec<u8>,
        format: AudioFormat,
    ) -> Result<WaveformData, ApplicationError> {
        let audio = AudioData::new(audio_data, to_speech_format(format));
        let waveform = self
            .renderer
            .render(&audio)
            .await
            .map_err(to_application_error)?;

        Ok(WaveformData {
            time_secs: waveform.time_secs,
            amplitude: waveform.amplitude,
            duration_secs: waveform.duration_secs,
        })
    }
}
