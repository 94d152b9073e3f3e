use std::path::PathBuf;
use tokio::signal;
use tokio::sync::oneshot;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use safecare::build_api;
use safecare::config::{load_config, DEFAULT_CONFIG_PATH};
use safecare::triage::{RED_FLAG_KEYWORDS, YELLOW_FLAG_KEYWORDS};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("safecare=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_path = std::env::var("SAFECARE_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = load_config(&config_path)?.with_env(|key| std::env::var(key).ok())?;

    let api = build_api(&config)?;
    let addr = config.api.socket_addr()?;
    let model = api.engine().model();

    if !model.has_api_key() {
        warn!("GEMINI_API_KEY is not set; triage will fall back to keyword rules only");
    }

    info!(
        "Triage rules loaded: {} red flag keywords, {} yellow flag keywords",
        RED_FLAG_KEYWORDS.len(),
        YELLOW_FLAG_KEYWORDS.len()
    );
    info!("Oracle model: {}", model.model());

    // Create a channel for shutdown signal
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let (bound, server) = warp::serve(api.routes())
        .try_bind_with_graceful_shutdown(addr, async move {
            shutdown_rx.await.ok();
            info!("Shutting down server...");
        })?;

    info!("SafeCare API listening on {}", bound);
    let server_handle = tokio::spawn(server);

    signal::ctrl_c().await?;
    info!("Ctrl+C received, starting graceful shutdown");
    shutdown_tx.send(()).ok();

    server_handle.await?;
    info!("Server shutdown complete");
    Ok(())
}
