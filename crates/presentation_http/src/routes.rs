//! Route definitions

use axum::{
    Router,
    routing::{get, post},
};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // The two-panel page
        .route("/", get(handlers::ui::index))
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Speech API (v1)
        .route("/v1/speech/options", get(handlers::options::get_options))
        .route("/v1/speech/synthesize", post(handlers::synthesis::synthesize))
        .route(
            "/v1/speech/transcribe",
            post(handlers::transcription::transcribe),
        )
        // Artifact playback/download
        .route("/v1/audio/{file_name}", get(handlers::audio::serve_audio))
        // OpenAPI documentation
        .merge(crate::openapi::create_openapi_routes())
        // Attach state
        .with_state(state)
}
