//! GET/PUT /api/settings. API keys never leave the server.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use aiact_classify::engine::SUPPORTED_PROVIDERS;
use aiact_core::{ai_configured, Settings};

use crate::{ApiError, ApiResult, AppState};

const SEARCH_PROVIDERS: [&str; 3] = ["", "duckduckgo", "serper"];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub provider: String,
    pub model: String,
    /// Empty keeps the stored key.
    #[serde(default)]
    pub api_key: String,
    pub search_provider: Option<String>,
    /// Empty keeps the stored key.
    #[serde(default)]
    pub search_api_key: String,
    pub timeout_secs: Option<u64>,
}

fn masked(settings: &Settings) -> Value {
    json!({
        "provider": settings.ai.provider,
        "model": settings.ai.model,
        "hasKey": !settings.ai.api_key.is_empty(),
        "configured": ai_configured(&settings.ai),
        "searchProvider": settings.search.provider,
        "hasSearchKey": !settings.search.api_key.is_empty(),
        "searchEnabled": settings.search_enabled(),
        "timeoutSecs": settings.timeout_secs,
    })
}

pub async fn get_settings(State(state): State<AppState>) -> Json<Value> {
    Json(masked(&state.settings()))
}

pub async fn put_settings(
    State(state): State<AppState>,
    payload: Result<Json<SettingsUpdate>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(update) = payload?;
    let provider = update.provider.trim().to_string();
    if !SUPPORTED_PROVIDERS.contains(&provider.as_str()) {
        return Err(ApiError::BadRequest(format!(
            "Unknown provider `{provider}`, expected one of: {}",
            SUPPORTED_PROVIDERS.join(", ")
        )));
    }
    if let Some(search) = &update.search_provider {
        if !SEARCH_PROVIDERS.contains(&search.trim()) {
            return Err(ApiError::BadRequest(format!("Unknown search provider `{search}`")));
        }
    }
    if update.timeout_secs == Some(0) {
        return Err(ApiError::BadRequest("timeoutSecs must be positive".to_string()));
    }

    let saved = state
        .update_settings(|s| {
            s.ai.provider = provider;
            s.ai.model = update.model.trim().to_string();
            if !update.api_key.is_empty() {
                s.ai.api_key = update.api_key;
            }
            if let Some(search) = update.search_provider {
                s.search.provider = search.trim().to_string();
            }
            if !update.search_api_key.is_empty() {
                s.search.api_key = update.search_api_key;
            }
            if let Some(secs) = update.timeout_secs {
                s.timeout_secs = secs;
            }
        })
        .map_err(|e| ApiError::Internal(format!("save settings: {e}")))?;

    info!(provider = %saved.ai.provider, model = %saved.ai.model, "settings updated");
    Ok(Json(masked(&saved)))
}
