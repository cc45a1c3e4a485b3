//! OpenAPI documentation module
//!
//! Provides OpenAPI 3.0 documentation for the VoiceBooth HTTP API with
//! Swagger UI for interactive exploration.

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{handlers, state::AppState};

/// OpenAPI documentation for VoiceBooth
#[derive(OpenApi)]
#[openapi(
    info(
        title = "VoiceBooth API",
        version = "0.2.0",
        description = "Browser demo converting text to spoken audio and uploaded audio to text",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    tags(
        (name = "health", description = "Health check and readiness endpoints"),
        (name = "speech", description = "Synthesis, transcription, and artifact endpoints")
    ),
    paths(
        // Health endpoints
        handlers::health::health_check,
        handlers::health::readiness_check,
        // Speech endpoints
        handlers::options::get_options,
        handlers::synthesis::synthesize,
        handlers::transcription::transcribe,
        handlers::audio::serve_audio,
    ),
    components(
        schemas(
            // Health schemas
            handlers::health::HealthResponse,
            handlers::health::ReadinessResponse,
            // Speech schemas
            handlers::options::OptionsResponse,
            handlers::options::LanguageOption,
            handlers::options::SpeedOption,
            handlers::synthesis::SynthesizeRequest,
            handlers::synthesis::SynthesizeResponse,
            handlers::synthesis::WaveformDto,
            handlers::transcription::TranscribeResponse,
            // Error schemas
            crate::error::ErrorResponse,
        )
    )
)]
pub struct ApiDoc;

/// Create OpenAPI documentation routes
///
/// Adds the following routes:
/// - `/api-docs/openapi.json` - OpenAPI specification (used by Swagger UI)
/// - `/swagger-ui/*` - Swagger UI interactive documentation
pub fn create_openapi_routes() -> Router<AppState> {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
