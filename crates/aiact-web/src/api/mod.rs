//! HTTP routes

mod assess;
mod export;
mod settings;
mod ui;

use axum::{routing::get, Json, Router};

use aiact_core::samples::{ExampleCase, EXAMPLES};

use crate::AppState;

pub use assess::MIN_DESCRIPTION_CHARS;

pub fn assess_routes() -> Router<AppState> {
    use axum::routing::post;

    Router::new()
        .route("/api/assess", post(assess::assess))
        .route("/api/harvest", post(assess::harvest))
        .route("/api/classify", post(assess::classify))
}

pub fn export_routes() -> Router<AppState> {
    use axum::routing::post;

    Router::new()
        .route("/api/export/json", post(export::export_json))
        .route("/api/export/text", post(export::export_text))
}

pub fn settings_routes() -> Router<AppState> {
    Router::new().route(
        "/api/settings",
        get(settings::get_settings).put(settings::put_settings),
    )
}

pub fn ui_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(ui::index_page))
        .route("/api/examples", get(examples))
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(|| async { "ok" }))
}

async fn examples() -> Json<&'static [ExampleCase]> {
    Json(EXAMPLES)
}
