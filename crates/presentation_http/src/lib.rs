//! VoiceBooth HTTP presentation layer
//!
//! Serves the two-panel browser UI and the JSON endpoints behind it.

pub mod error;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
