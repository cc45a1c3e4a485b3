//! Artifact playback and download handler

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderValue, header},
    response::{IntoResponse, Response},
};
use domain::AudioFormat;
use serde::Deserialize;
use tracing::instrument;
use utoipa::IntoParams;

use crate::{error::ApiError, state::AppState};

/// Query parameters for the audio endpoint
#[derive(Debug, Deserialize, IntoParams)]
pub struct AudioQuery {
    /// Force a download instead of in-browser playback
    #[serde(default)]
    pub download: bool,
}

/// Serve a synthesized artifact
#[utoipa::path(
    get,
    path = "/v1/audio/{file_name}",
    tag = "speech",
    params(
        ("file_name" = String, Path, description = "Artifact file name"),
        AudioQuery
    ),
    responses(
        (status = 200, description = "Artifact bytes", content_type = "audio/mpeg"),
        (status = 404, description = "Artifact does not exist", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state), fields(file_name = %file_name, download = query.download))]
pub async fn serve_audio(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
    Query(query): Query<AudioQuery>,
) -> Result<Response, ApiError> {
    let data = state.artifact_store.load(&file_name).await?;

    let mime = AudioFormat::from_file_name(&file_name)
        .map_or("application/octet-stream", AudioFormat::mime_type);

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(mime));
    if query.download {
        let disposition = format!("attachment; filename=\"{file_name}\"");
        headers.insert(
            header::CONTENT_DISPOSITION,
            HeaderValue::from_str(&disposition)
                .map_err(|e| ApiError::Internal(format!("Invalid artifact name: {e}")))?,
        );
    }

    Ok((headers, data).into_response())
}
