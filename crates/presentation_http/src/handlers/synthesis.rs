//! Synthesis handlers - the Text-to-Speech panel's trigger action

use application::ports::WaveformData;
use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;
use validator::Validate;

use crate::{error::ApiError, state::AppState};

/// Synthesis request body
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SynthesizeRequest {
    /// Text to convert to speech
    #[validate(length(min = 1, message = "text must not be empty"))]
    pub text: String,
    /// Language code from the supported set
    pub language: String,
    /// Speed tier name
    #[serde(default = "default_speed")]
    pub speed: String,
}

fn default_speed() -> String {
    "normal".to_string()
}

/// Synthesis response body
#[derive(Debug, Serialize, ToSchema)]
pub struct SynthesizeResponse {
    /// Artifact file name under the output directory
    pub file_name: String,
    /// URL for in-browser playback
    pub audio_url: String,
    /// URL that forces a download
    pub download_url: String,
    /// The speed tier that was requested
    pub speed: String,
    /// Whether the speed adjustment was applied
    pub speed_adjusted: bool,
    /// Waveform chart data; absent when rendering failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waveform: Option<WaveformDto>,
}

/// Waveform chart data for the panel's canvas
#[derive(Debug, Serialize, ToSchema)]
pub struct WaveformDto {
    /// Time axis in seconds
    pub time_secs: Vec<f32>,
    /// Normalized amplitude in [-1, 1]
    pub amplitude: Vec<f32>,
    /// Total duration in seconds
    pub duration_secs: f32,
}

impl From<WaveformData> for WaveformDto {
    fn from(data: WaveformData) -> Self {
        Self {
            time_secs: data.time_secs,
            amplitude: data.amplitude,
            duration_secs: data.duration_secs,
        }
    }
}

/// Convert text to speech
#[utoipa::path(
    post,
    path = "/v1/speech/synthesize",
    tag = "speech",
    request_body = SynthesizeRequest,
    responses(
        (status = 200, description = "Artifact written", body = SynthesizeResponse),
        (status = 400, description = "Invalid selection or empty text", body = crate::error::ErrorResponse),
        (status = 503, description = "Synthesis backend unavailable", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state, request), fields(text_len = request.text.len(), language = %request.language))]
pub async fn synthesize(
    State(state): State<AppState>,
    Json(request): Json<SynthesizeRequest>,
) -> Result<Json<SynthesizeResponse>, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::EmptyInput(e.to_string()))?;

    let outcome = state
        .synthesis_service
        .synthesize(&request.text, &request.language, &request.speed)
        .await?;

    Ok(Json(SynthesizeResponse {
        audio_url: format!("/v1/audio/{}", outcome.artifact.file_name),
        download_url: format!("/v1/audio/{}?download=true", outcome.artifact.file_name),
        file_name: outcome.artifact.file_name,
        speed: outcome.speed.to_string(),
        speed_adjusted: outcome.speed_adjusted,
        waveform: outcome.waveform.map(Into::into),
    }))
}
