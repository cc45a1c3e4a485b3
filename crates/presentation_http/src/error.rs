//! API error handling
//!
//! Maps the application error taxonomy to JSON responses with stable
//! `code` strings, one per failure mode, so each panel can show a
//! distinct message. No error here crashes the process and none is
//! retried.

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::DomainError;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body or multipart shape was malformed
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A selector value was outside its table
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// Synthesis language outside the supported set
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Input text was empty
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Upload container unrecognized
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The recognizer could not map the audio to text
    #[error("Could not understand the audio")]
    UnintelligibleAudio,

    /// A speech backend rejected the request or was unreachable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Artifact does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Temp file or artifact I/O failed
    #[error("I/O failure: {0}")]
    Io(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// User-visible error message
    pub error: String,
    /// Stable error code
    pub code: String,
}

impl ApiError {
    /// HTTP status and stable code for this error
    fn parts(&self) -> (StatusCode, &'static str) {
        match self {
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            Self::InvalidSelection(_) => (StatusCode::BAD_REQUEST, "invalid_selection"),
            Self::UnsupportedLanguage(_) => (StatusCode::BAD_REQUEST, "unsupported_language"),
            Self::EmptyInput(_) => (StatusCode::BAD_REQUEST, "empty_input"),
            Self::UnsupportedFormat(_) => {
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, "unsupported_format")
            },
            Self::UnintelligibleAudio => {
                (StatusCode::UNPROCESSABLE_ENTITY, "unintelligible_audio")
            },
            Self::ServiceUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "service_unavailable")
            },
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            Self::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "io_failure"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.parts();
        let body = ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Domain(domain_err) => match domain_err {
                DomainError::InvalidSelection { .. } => {
                    Self::InvalidSelection(domain_err.to_string())
                },
                DomainError::UnsupportedLanguage(code) => Self::UnsupportedLanguage(code),
                DomainError::EmptyText => Self::EmptyInput(domain_err.to_string()),
            },
            ApplicationError::UnintelligibleAudio => Self::UnintelligibleAudio,
            ApplicationError::ServiceUnavailable(msg)
            | ApplicationError::SynthesisFailed(msg)
            | ApplicationError::TranscriptionFailed(msg) => Self::ServiceUnavailable(msg),
            ApplicationError::UnsupportedFormat(msg) => Self::UnsupportedFormat(msg),
            ApplicationError::AudioProcessing(msg) | ApplicationError::Storage(msg) => {
                Self::Io(msg)
            },
            ApplicationError::NotFound(msg) => Self::NotFound(msg),
            ApplicationError::Internal(msg) => Self::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_failure_mode_has_a_distinct_code() {
        let errors = [
            ApiError::BadRequest(String::new()),
            ApiError::InvalidSelection(String::new()),
            ApiError::UnsupportedLanguage(String::new()),
            ApiError::EmptyInput(String::new()),
            ApiError::UnsupportedFormat(String::new()),
            ApiError::UnintelligibleAudio,
            ApiError::ServiceUnavailable(String::new()),
            ApiError::NotFound(String::new()),
            ApiError::Io(String::new()),
            ApiError::Internal(String::new()),
        ];

        let mut codes: Vec<&str> = errors.iter().map(|e| e.parts().1).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn into_response_status_codes() {
        assert_eq!(
            ApiError::InvalidSelection("x".to_string())
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::UnsupportedLanguage("xx".to_string())
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::UnsupportedFormat("aiff".to_string())
                .into_response()
                .status(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
        assert_eq!(
            ApiError::UnintelligibleAudio.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::ServiceUnavailable("down".to_string())
                .into_response()
                .status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::NotFound("x.mp3".to_string())
                .into_response()
                .status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Io("disk".to_string()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn error_response_serialization() {
        let resp = ErrorResponse {
            error: "Could not understand the audio".to_string(),
            code: "unintelligible_audio".to_string(),
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("error"));
        assert!(json.contains("unintelligible_audio"));
    }

    #[test]
    fn unsupported_language_converts() {
        let source: ApplicationError = DomainError::UnsupportedLanguage("xx".to_string()).into();
        let result: ApiError = source.into();
        assert!(matches!(result, ApiError::UnsupportedLanguage(_)));
    }

    #[test]
    fn invalid_selection_converts() {
        let source: ApplicationError =
            DomainError::invalid_selection("speed", "warp").into();
        let result: ApiError = source.into();
        assert!(matches!(result, ApiError::InvalidSelection(_)));
    }

    #[test]
    fn empty_text_converts() {
        let source: ApplicationError = DomainError::EmptyText.into();
        let result: ApiError = source.into();
        assert!(matches!(result, ApiError::EmptyInput(_)));
    }

    #[test]
    fn unintelligible_audio_converts() {
        let result: ApiError = ApplicationError::UnintelligibleAudio.into();
        assert!(matches!(result, ApiError::UnintelligibleAudio));
    }

    #[test]
    fn synthesis_failure_converts_to_service_unavailable() {
        let result: ApiError = ApplicationError::SynthesisFailed("HTTP 404".to_string()).into();
        assert!(matches!(result, ApiError::ServiceUnavailable(_)));
    }

    #[test]
    fn storage_converts_to_io_failure() {
        let result: ApiError = ApplicationError::Storage("disk full".to_string()).into();
        assert!(matches!(result, ApiError::Io(_)));
    }

    #[test]
    fn not_found_converts() {
        let result: ApiError = ApplicationError::NotFound("gone.mp3".to_string()).into();
        assert!(matches!(result, ApiError::NotFound(_)));
    }
}
