//! Transcription handlers - the Speech-to-Text panel's trigger action

use axum::{
    Json,
    extract::{Multipart, State},
};
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;

use crate::{error::ApiError, state::AppState};

/// Transcription response body
#[derive(Debug, Serialize, ToSchema)]
pub struct TranscribeResponse {
    /// Transcribed text
    pub text: String,
    /// Language the recognizer was asked for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Confidence score (0.0 - 1.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

/// Transcribe an uploaded audio file
///
/// Expects a multipart form with a `file` part (the audio upload) and a
/// `language` part (the declared language code).
#[utoipa::path(
    post,
    path = "/v1/speech/transcribe",
    tag = "speech",
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Transcript", body = TranscribeResponse),
        (status = 400, description = "Malformed upload or invalid selection", body = crate::error::ErrorResponse),
        (status = 415, description = "Unrecognized audio container", body = crate::error::ErrorResponse),
        (status = 422, description = "Audio could not be understood", body = crate::error::ErrorResponse),
        (status = 503, description = "Recognition backend unavailable", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state, multipart))]
pub async fn transcribe(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<TranscribeResponse>, ApiError> {
    let mut upload: Option<(String, Option<String>, Vec<u8>)> = None;
    let mut language: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart request: {e}")))?
    {
        let Some(name) = field.name().map(ToString::to_string) else {
            continue;
        };
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field.content_type().map(ToString::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {e}")))?
                    .to_vec();
                upload = Some((file_name, content_type, data));
            },
            "language" => {
                language = Some(field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read language field: {e}"))
                })?);
            },
            _ => {},
        }
    }

    let (file_name, content_type, data) =
        upload.ok_or_else(|| ApiError::BadRequest("Missing file field".to_string()))?;
    let language =
        language.ok_or_else(|| ApiError::BadRequest("Missing language field".to_string()))?;

    let result = state
        .transcription_service
        .transcribe(data, &file_name, content_type.as_deref(), &language)
        .await?;

    Ok(Json(TranscribeResponse {
        text: result.text,
        language: result.language,
        confidence: result.confidence,
    }))
}
