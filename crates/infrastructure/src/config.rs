//! Application configuration

use std::path::PathBuf;

use ai_speech::SpeechConfig;
use serde::{Deserialize, Serialize};

/// Main application configuration
///
/// Built once at startup and shared by reference; nothing mutates it at
/// runtime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Speech service configuration
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Artifact and temp storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to
    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins (empty = allow all, for local use)
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    /// Graceful shutdown timeout in seconds
    #[serde(default)]
    pub shutdown_timeout_secs: Option<u64>,

    /// Maximum accepted upload size in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    3000
}

const fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024 // 10 MiB
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origins: Vec::new(),
            shutdown_timeout_secs: Some(30),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

/// Artifact and temp storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory synthesized artifacts are written under
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Directory for request-scoped temp files (system default if unset)
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("speech_outputs")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            temp_dir: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment and optional file
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // Start with defaults
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("storage.output_dir", "speech_outputs")?
            // Load from file if exists
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables (e.g., VOICEBOOTH_SERVER_PORT)
            .add_source(
                config::Environment::with_prefix("VOICEBOOTH")
                    .separator("_")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
