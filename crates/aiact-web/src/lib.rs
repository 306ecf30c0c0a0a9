//! aiact-web: form page and JSON API over the assessment pipeline.

pub mod api;
pub mod error;
pub mod state;

use axum::Router;
use tower_http::trace::TraceLayer;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // UI routes (HTML page + examples)
        .merge(api::ui_routes())
        // API routes
        .merge(api::assess_routes())
        .merge(api::export_routes())
        .merge(api::settings_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
