//! WAV sample access helpers
//!
//! Reads WAV buffers into f32 sample vectors (range -1.0 to 1.0) and
//! writes them back as 16-bit PCM. Multi-channel input is mixed down to
//! mono by averaging, since the analysis paths are single-channel.

use std::io::Cursor;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use crate::error::SpeechError;

/// Decoded mono PCM: samples in [-1.0, 1.0] plus the sample rate in Hz
#[derive(Debug, Clone)]
pub struct MonoPcm {
    /// Mono samples
    pub samples: Vec<f32>,
    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl MonoPcm {
    /// Duration of the signal in seconds
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

/// Read a WAV buffer into mono f32 samples
///
/// # Errors
///
/// Returns `SpeechError::AudioProcessing` for malformed WAV data or an
/// unsupported bit depth.
#[allow(clippy::cast_precision_loss)]
pub fn read_wav(data: &[u8]) -> Result<MonoPcm, SpeechError> {
    let mut reader = WavReader::new(Cursor::new(data))?;
    let spec = reader.spec();

    let samples: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<Result<Vec<f32>, hound::Error>>()?,
        SampleFormat::Int => match spec.bits_per_sample {
            16 => reader
                .samples::<i16>()
                .map(|s| s.map(|sample| f32::from(sample) / f32::from(i16::MAX)))
                .collect::<Result<Vec<f32>, hound::Error>>()?,
            24 => reader
                .samples::<i32>()
                .map(|s| s.map(|sample| sample as f32 / 8_388_608.0)) // 2^23
                .collect::<Result<Vec<f32>, hound::Error>>()?,
            32 => reader
                .samples::<i32>()
                .map(|s| s.map(|sample| sample as f32 / i32::MAX as f32))
                .collect::<Result<Vec<f32>, hound::Error>>()?,
            other => {
                return Err(SpeechError::AudioProcessing(format!(
                    "Unsupported bit depth: {other}"
                )));
            },
        },
    };

    let samples = if spec.channels > 1 {
        mix_to_mono(&samples, spec.channels)
    } else {
        samples
    };

    Ok(MonoPcm {
        samples,
        sample_rate: spec.sample_rate,
    })
}

/// Write mono f32 samples as a 16-bit PCM WAV buffer
///
/// # Errors
///
/// Returns `SpeechError::AudioProcessing` if encoding fails.
pub fn write_wav(samples: &[f32], sample_rate: u32) -> Result<Vec<u8>, SpeechError> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = WavWriter::new(&mut cursor, spec)?;
        for &sample in samples {
            #[allow(clippy::cast_possible_truncation)]
            let sample_i16 = (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16;
            writer.write_sample(sample_i16)?;
        }
        writer.finalize()?;
    }

    Ok(cursor.into_inner())
}

/// Mix interleaved multi-channel samples down to mono by averaging
fn mix_to_mono(samples: &[f32], channels: u16) -> Vec<f32> {
    let divisor = f32::from(channels);
    let channels = usize::from(channels);
    samples
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / divisor)
        .collect()
}
