use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use aiact_core::settings::{read_settings, settings_path};
use aiact_core::ai_configured;
use aiact_web::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .init();

    info!("Starting aiact-web {}", env!("CARGO_PKG_VERSION"));

    let path = settings_path();
    let settings = read_settings(&path).with_env_credentials();
    info!("Settings: {}", path.display());
    if ai_configured(&settings.ai) {
        info!(
            provider = %settings.ai.provider,
            model = %settings.ai.model,
            "model provider configured"
        );
    } else {
        warn!("No model provider configured; set it on the Settings tab or via AIACT_API_KEY");
    }
    if !settings.search_enabled() {
        info!("Web search augmentation unavailable");
    }

    let addr = settings.listen_addr.clone();
    let app = aiact_web::build_router(AppState::new(settings, path));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    info!("Listening on http://{addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
