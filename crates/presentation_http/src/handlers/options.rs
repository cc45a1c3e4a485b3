//! Selector options handler
//!
//! Exposes the fixed language and speed tables for the two panels'
//! selector widgets.

use axum::{Json, extract::State};
use domain::SpeedTier;
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

/// The selector tables
#[derive(Debug, Serialize, ToSchema)]
pub struct OptionsResponse {
    /// Supported languages in display order
    pub languages: Vec<LanguageOption>,
    /// Speed tiers in display order
    pub speeds: Vec<SpeedOption>,
}

/// One language selector entry
#[derive(Debug, Serialize, ToSchema)]
pub struct LanguageOption {
    /// Short code (e.g. "en")
    pub code: String,
    /// Display name (e.g. "English")
    pub name: String,
}

/// One speed selector entry
#[derive(Debug, Serialize, ToSchema)]
pub struct SpeedOption {
    /// Tier name (e.g. "very_fast")
    pub tier: String,
    /// Numeric multiplier (e.g. 2.0)
    pub multiplier: f32,
}

/// List the language and speed options
#[utoipa::path(
    get,
    path = "/v1/speech/options",
    tag = "speech",
    responses(
        (status = 200, description = "Selector tables", body = OptionsResponse)
    )
)]
pub async fn get_options(State(state): State<AppState>) -> Json<OptionsResponse> {
    Json(OptionsResponse {
        languages: state
            .languages
            .iter()
            .map(|language| LanguageOption {
                code: language.code.clone(),
                name: language.name.clone(),
            })
            .collect(),
        speeds: SpeedTier::ALL
            .iter()
            .map(|tier| SpeedOption {
                tier: tier.as_str().to_string(),
                multiplier: tier.multiplier(),
            })
            .collect(),
    })
}
