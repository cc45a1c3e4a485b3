//! Concrete adapters behind the application ports

pub mod artifact_store;
pub mod audio_processing;
pub mod speech;

pub use artifact_store::FilesystemArtifactStore;
pub use audio_processing::AudioProcessingAdapter;
pub use speech::SpeechAdapter;

use ai_speech::SpeechError;
use application::ApplicationError;

/// Map a speech-layer error into the application taxonomy
///
/// Kept as a function because both error types are foreign to this
/// crate.
pub(crate) fn to_application_error(err: SpeechError) -> ApplicationError {
    match err {
        SpeechError::UnintelligibleAudio => ApplicationError::UnintelligibleAudio,
        SpeechError::ServiceUnavailable(msg) | SpeechError::InvalidResponse(msg) => {
            ApplicationError::ServiceUnavailable(msg)
        },
        SpeechError::UnsupportedFormat(msg) => ApplicationError::UnsupportedFormat(msg),
        SpeechError::SynthesisFailed(msg) => ApplicationError::SynthesisFailed(msg),
        SpeechError::TranscriptionFailed(msg) => ApplicationError::TranscriptionFailed(msg),
        SpeechError::AudioProcessing(msg) => ApplicationError::AudioProcessing(msg),
        SpeechError::Io(msg) => ApplicationError::Storage(msg),
        SpeechError::Configuration(msg) => ApplicationError::Internal(msg),
    }
}

/// Map a domain container format to the speech layer's
pub(crate) const fn to_speech_format(format: domain::AudioFormat) -> ai_speech::AudioFormat {
    match format {
        domain::AudioFormat::Wav => ai_speech::AudioFormat::Wav,
        domain::AudioFormat::Mp3 => ai_speech::AudioFormat::Mp3,
        domain::AudioFormat::Ogg => ai_speech::AudioFormat::Ogg,
        domain::AudioFormat::Flac => ai_speech::AudioFormat::Flac,
    }
}

/// Map a speech-layer container format back to the domain's
pub(crate) const fn to_domain_format(format: ai_speech::AudioFormat) -> domain::AudioFormat {
    match format {
        ai_speech::AudioFormat::Wav => domain::AudioFormat::Wav,
        ai_speech::AudioFormat::Mp3 => domain::AudioFormat::Mp3,
        ai_speech::AudioFormat::Ogg => domain::AudioFormat::Ogg,
        ai_speech::AudioFormat::Flac => domain::AudioFormat::Flac,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unintelligible_maps_to_unintelligible() {
        let err = to_application_error(SpeechError::UnintelligibleAudio);
        assert!(matches!(err, ApplicationError::UnintelligibleAudio));
    }

    #[test]
    fn service_unavailable_maps_through() {
        let err = to_application_error(SpeechError::ServiceUnavailable("down".to_string()));
        assert!(matches!(err, ApplicationError::ServiceUnavailable(_)));
    }

    #[test]
    fn invalid_response_counts_as_service_unavailable() {
        let err = to_application_error(SpeechError::InvalidResponse("garbage".to_string()));
        assert!(matches!(err, ApplicationError::ServiceUnavailable(_)));
    }

    #[test]
    fn io_maps_to_storage() {
        let err = to_application_error(SpeechError::Io("disk".to_string()));
        assert!(matches!(err, ApplicationError::Storage(_)));
    }

    #[test]
    fn format_mapping_round_trips() {
        for format in [
            domain::AudioFormat::Wav,
            domain::AudioFormat::Mp3,
            domain::AudioFormat::Ogg,
            domain::AudioFormat::Flac,
        ] {
            assert_eq!(to_domain_format(to_speech_format(format)), format);
        }
    }
}
