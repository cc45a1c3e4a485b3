//! Audio container formats known to the flows
//!
//! Uploads arrive as WAV at minimum; compressed containers are accepted
//! when a transcode path exists. Synthesized artifacts are MP3.

use serde::{Deserialize, Serialize};

/// Audio container formats accepted or produced by the flows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    /// WAV (uncompressed PCM)
    Wav,
    /// MP3
    Mp3,
    /// OGG container
    Ogg,
    /// FLAC (lossless)
    Flac,
}

impl AudioFormat {
    /// File extension for this format
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::Mp3 => "mp3",
            Self::Ogg => "ogg",
            Self::Flac => "flac",
        }
    }

    /// MIME type for this format
    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Wav => "audio/wav",
            Self::Mp3 => "audio/mpeg",
            Self::Ogg => "audio/ogg",
            Self::Flac => "audio/flac",
        }
    }

    /// Resolve a format from a file extension
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "wav" => Some(Self::Wav),
            "mp3" => Some(Self::Mp3),
            "ogg" => Some(Self::Ogg),
            "flac" => Some(Self::Flac),
            _ => None,
        }
    }

    /// Resolve a format from a MIME type
    #[must_use]
    pub fn from_mime_type(mime: &str) -> Option<Self> {
        // Handle compound MIME types like "audio/ogg; codecs=opus"
        let base = mime.split(';').next().unwrap_or(mime).trim();
        match base {
            "audio/wav" | "audio/x-wav" | "audio/wave" => Some(Self::Wav),
            "audio/mpeg" | "audio/mp3" => Some(Self::Mp3),
            "audio/ogg" => Some(Self::Ogg),
            "audio/flac" | "audio/x-flac" => Some(Self::Flac),
            _ => None,
        }
    }

    /// Resolve a format from an uploaded file name
    #[must_use]
    pub fn from_file_name(name: &str) -> Option<Self> {
        name.rsplit('.').next().and_then(Self::from_extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensions_are_correct() {
        assert_eq!(AudioFormat::Wav.extension(), "wav");
        assert_eq!(AudioFormat::Mp3.extension(), "mp3");
        assert_eq!(AudioFormat::Ogg.extension(), "ogg");
        assert_eq!(AudioFormat::Flac.extension(), "flac");
    }

    #[test]
    fn mime_types_are_correct() {
        assert_eq!(AudioFormat::Wav.mime_type(), "audio/wav");
        assert_eq!(AudioFormat::Mp3.mime_type(), "audio/mpeg");
        assert_eq!(AudioFormat::Ogg.mime_type(), "audio/ogg");
        assert_eq!(AudioFormat::Flac.mime_type(), "audio/flac");
    }

    #[test]
    fn from_extension_is_case_insensitive() {
        assert_eq!(AudioFormat::from_extension("WAV"), Some(AudioFormat::Wav));
        assert_eq!(AudioFormat::from_extension("Mp3"), Some(AudioFormat::Mp3));
        assert_eq!(AudioFormat::from_extension("aiff"), None);
    }

    #[test]
    fn from_mime_type_handles_variants() {
        assert_eq!(
            AudioFormat::from_mime_type("audio/x-wav"),
            Some(AudioFormat::Wav)
        );
        assert_eq!(
            AudioFormat::from_mime_type("audio/mp3"),
            Some(AudioFormat::Mp3)
        );
        assert_eq!(
            AudioFormat::from_mime_type("audio/ogg; codecs=opus"),
            Some(AudioFormat::Ogg)
        );
        assert_eq!(AudioFormat::from_mime_type("text/plain"), None);
    }

    #[test]
    fn from_file_name_uses_last_extension() {
        assert_eq!(
            AudioFormat::from_file_name("recording.wav"),
            Some(AudioFormat::Wav)
        );
        assert_eq!(
            AudioFormat::from_file_name("archive.tar.flac"),
            Some(AudioFormat::Flac)
        );
        assert_eq!(AudioFormat::from_file_name("noextension"), None);
    }

    #[test]
    fn serde_round_trip_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&AudioFormat::Flac).unwrap(),
            "\"flac\""
        );
        let fmt: AudioFormat = serde_json::from_str("\"mp3\"").unwrap();
        assert_eq!(fmt, AudioFormat::Mp3);
    }
}
