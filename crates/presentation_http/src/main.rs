//! VoiceBooth HTTP Server
//!
//! Main entry point for the browser-served speech demo.

use std::{sync::Arc, time::Duration};

use application::{SynthesisService, TranscriptionService};
use domain::LanguageTable;
use infrastructure::{
    AppConfig, AudioProcessingAdapter, FilesystemArtifactStore, SpeechAdapter,
};
use presentation_http::{routes, state::AppState};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "voicebooth_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("🎙️ VoiceBooth v{} starting...", env!("CARGO_PKG_VERSION"));

    // Load configuration; built once, never mutated afterwards
    let config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });

    info!(
        host = %config.server.host,
        port = %config.server.port,
        output_dir = %config.storage.output_dir.display(),
        "Configuration loaded"
    );

    // Fixed selector tables, shared by reference
    let languages = Arc::new(LanguageTable::default());

    // Wire the adapters
    let speech_adapter = SpeechAdapter::new(&config.speech, config.storage.temp_dir.clone())
        .map_err(|e| anyhow::anyhow!("Failed to initialize speech adapter: {e}"))?;
    let speech: Arc<dyn application::ports::SpeechPort> = Arc::new(speech_adapter);

    let audio: Arc<dyn application::ports::AudioProcessingPort> = Arc::new(
        AudioProcessingAdapter::with_ffmpeg_path(config.speech.ffmpeg_path.as_deref()),
    );

    let store = FilesystemArtifactStore::new(config.storage.output_dir.clone())
        .map_err(|e| anyhow::anyhow!("Failed to initialize artifact store: {e}"))?;
    let store: Arc<dyn application::ports::ArtifactStorePort> = Arc::new(store);

    // Initialize services
    let synthesis_service = SynthesisService::new(
        Arc::clone(&speech),
        Arc::clone(&audio),
        Arc::clone(&store),
        Arc::clone(&languages),
    );
    let transcription_service =
        TranscriptionService::new(Arc::clone(&speech), Arc::clone(&languages));

    let state = AppState {
        synthesis_service: Arc::new(synthesis_service),
        transcription_service: Arc::new(transcription_service),
        artifact_store: store,
        languages,
    };

    // Build router
    let app = routes::create_router(state);

    // Configure CORS layer
    let cors_layer = if config.server.allowed_origins.is_empty() {
        // Local use: allow all origins
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use axum::http::{HeaderValue, Method};
        let origins: Vec<HeaderValue> = config
            .server
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any)
    };

    // Add middleware (order matters: first added = outermost)
    let app = app
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .layer(RequestBodyLimitLayer::new(config.server.max_upload_bytes));

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;

    info!("🚀 Server listening on http://{}", addr);
    info!("📚 API docs: http://{}/swagger-ui", addr);

    // Graceful shutdown configuration
    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    info!("👋 Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM) and handle graceful shutdown
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        // Log error but continue waiting - this is a best-effort signal handler
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("📥 Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("📥 Received SIGTERM, initiating graceful shutdown...");
        }
    }

    info!("⏳ Waiting up to {:?} for connections to close...", timeout);
    // The actual connection draining is handled by axum's graceful_shutdown
}
