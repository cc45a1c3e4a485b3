//! Waveform chart data for the synthesis panel
//!
//! Produces a display-only amplitude-vs-time series from an audio
//! artifact: normalize to [-1, 1], downsample to a plottable point
//! count, pair with a linear time axis. Nothing downstream derives data
//! from the chart.

use serde::Serialize;
use tracing::{debug, instrument};

use crate::converter::AudioConverter;
use crate::error::SpeechError;
use crate::pcm::{self, MonoPcm};
use crate::types::AudioData;

/// Maximum number of chart points, for plotting performance
pub const MAX_POINTS: usize = 10_000;

/// Amplitude-vs-time chart data
#[derive(Debug, Clone, Serialize)]
pub struct Waveform {
    /// Time axis in seconds, same length as `amplitude`
    pub time_secs: Vec<f32>,
    /// Normalized amplitude in [-1, 1]
    pub amplitude: Vec<f32>,
    /// Total duration of the source audio in seconds
    pub duration_secs: f32,
}

impl Waveform {
    /// Build chart data from decoded mono PCM
    ///
    /// Normalization divides by the maximum absolute sample and is
    /// skipped when every sample is zero (the flat line stays flat, and
    /// there is no division by zero).
    #[must_use]
    pub fn from_pcm(pcm: &MonoPcm) -> Self {
        let duration_secs = pcm.duration_secs();
        if pcm.samples.is_empty() {
            return Self {
                time_secs: Vec::new(),
                amplitude: Vec::new(),
                duration_secs,
            };
        }

        let peak = pcm.samples.iter().fold(0.0f32, |max, s| max.max(s.abs()));

        // Every Nth sample, N = floor(len / MAX_POINTS)
        let step = (pcm.samples.len() / MAX_POINTS).max(1);

        let amplitude: Vec<f32> = pcm
            .samples
            .iter()
            .step_by(step)
            .take(MAX_POINTS)
            .map(|&s| if peak > 0.0 { s / peak } else { s })
            .collect();

        #[allow(clippy::cast_precision_loss)]
        let time_secs: Vec<f32> = (0..amplitude.len())
            .map(|i| (i * step) as f32 / pcm.sample_rate.max(1) as f32)
            .collect();

        Self {
            time_secs,
            amplitude,
            duration_secs,
        }
    }

    /// Number of chart points
    #[must_use]
    pub fn len(&self) -> usize {
        self.amplitude.len()
    }

    /// Whether the chart has no points
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.amplitude.is_empty()
    }
}

/// Renders waveform chart data from audio artifacts
#[derive(Debug, Clone, Default)]
pub struct WaveformRenderer {
    converter: AudioConverter,
}

impl WaveformRenderer {
    /// Create a new waveform renderer
    #[must_use]
    pub const fn new(converter: AudioConverter) -> Self {
        Self { converter }
    }

    /// Decode an artifact and build its waveform chart data
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::AudioProcessing` when the artifact cannot
    /// be decoded. Callers treat this as a missing chart, not a failure
    /// of the surrounding flow.
    #[instrument(skip(self, audio), fields(format = %audio.format()))]
    pub async fn render(&self, audio: &AudioData) -> Result<Waveform, SpeechError> {
        let wav = self.converter.decode_to_pcm_wav(audio).await?;
        let pcm = pcm::read_wav(wav.data())?;

        debug!(
            samples = pcm.samples.len(),
            sample_rate = pcm.sample_rate,
            "Decoded audio for waveform"
        );

        Ok(Waveform::from_pcm(&pcm))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AudioFormat;
    use proptest::prelude::*;

    fn pcm(samples: Vec<f32>, sample_rate: u32) -> MonoPcm {
        MonoPcm {
            samples,
            sample_rate,
        }
    }

    #[test]
    fn silent_signal_stays_flat_without_division_error() {
        let waveform = Waveform::from_pcm(&pcm(vec![0.0; 5000], 8000));

        assert_eq!(waveform.len(), 5000);
        assert!(waveform.amplitude.iter().all(|a| *a == 0.0));
        assert!(waveform.amplitude.iter().all(|a| a.is_finite()));
    }

    #[test]
    fn long_input_is_downsampled_to_at_most_max_points() {
        let samples: Vec<f32> = (0..50_000)
            .map(|i| if i % 2 == 0 { 0.5 } else { -0.5 })
            .collect();
        let waveform = Waveform::from_pcm(&pcm(samples, 44_100));

        assert!(waveform.len() <= MAX_POINTS);
        assert_eq!(waveform.time_secs.len(), waveform.amplitude.len());
    }

    #[test]
    fn short_input_keeps_every_sample() {
        let waveform = Waveform::from_pcm(&pcm(vec![0.1, -0.2, 0.3], 8000));
        assert_eq!(waveform.len(), 3);
    }

    #[test]
    fn normalization_scales_peak_to_one() {
        let waveform = Waveform::from_pcm(&pcm(vec![0.0, 0.25, -0.5, 0.125], 8000));

        let peak = waveform
            .amplitude
            .iter()
            .fold(0.0f32, |max, a| max.max(a.abs()));
        assert!((peak - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn time_axis_is_linear_from_zero() {
        let waveform = Waveform::from_pcm(&pcm(vec![0.5; 4], 2));

        assert_eq!(waveform.time_secs, vec![0.0, 0.5, 1.0, 1.5]);
        assert!((waveform.duration_secs - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn empty_input_yields_empty_chart() {
        let waveform = Waveform::from_pcm(&pcm(Vec::new(), 8000));
        assert!(waveform.is_empty());
        assert!(waveform.duration_secs.abs() < f32::EPSILON);
    }

    #[test]
    fn chart_serializes_for_the_browser() {
        let waveform = Waveform::from_pcm(&pcm(vec![0.0, 1.0], 2));
        let json = serde_json::to_string(&waveform).unwrap();
        assert!(json.contains("time_secs"));
        assert!(json.contains("amplitude"));
        assert!(json.contains("duration_secs"));
    }

    #[tokio::test]
    async fn render_reports_unreadable_input() {
        let renderer = WaveformRenderer::new(AudioConverter::new());
        // WAV format short-circuits ffmpeg; garbage bytes fail the parse
        let audio = AudioData::new(vec![1, 2, 3, 4], AudioFormat::Wav);

        let result = renderer.render(&audio).await;
        assert!(matches!(result, Err(SpeechError::AudioProcessing(_))));
    }

    #[tokio::test]
    async fn render_builds_chart_from_wav() {
        let samples = vec![0.0f32; 12_000];
        let bytes = crate::pcm::write_wav(&samples, 8000).unwrap();
        let audio = AudioData::new(bytes, AudioFormat::Wav);

        let renderer = WaveformRenderer::new(AudioConverter::new());
        let waveform = renderer.render(&audio).await.unwrap();

        assert!(waveform.len() <= MAX_POINTS);
        assert!((waveform.duration_secs - 1.5).abs() < 0.001);
    }

    proptest! {
        #[test]
        fn point_count_never_exceeds_max(len in 0usize..60_000, rate in 1u32..96_000) {
            let samples = vec![0.25f32; len];
            let waveform = Waveform::from_pcm(&pcm(samples, rate));
            prop_assert!(waveform.len() <= MAX_POINTS);
            prop_assert_eq!(waveform.time_secs.len(), waveform.amplitude.len());
        }

        #[test]
        fn time_axis_is_monotonic(len in 2usize..20_000) {
            let samples = vec![0.5f32; len];
            let waveform = Waveform::from_pcm(&pcm(samples, 8000));
            for pair in waveform.time_secs.windows(2) {
                prop_assert!(pair[0] < pair[1]);
            }
        }
    }
}
