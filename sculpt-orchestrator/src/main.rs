use anyhow::{Context, Result};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sculpt_orchestrator::api::{self, AppState};
use sculpt_orchestrator::config::Config;
use sculpt_orchestrator::orchestrator::TaskOrchestrator;
use sculpt_orchestrator::provider::MeshyProvider;
use sculpt_orchestrator::service::session_service::SessionService;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before anything reads the environment, RUST_LOG included
    let dotenv = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sculpt_orchestrator=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Sculpt Orchestrator...");

    if dotenv.is_ok() {
        tracing::debug!("Loaded environment from .env");
    }

    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    let policy = config.poll_policy();
    tracing::info!(
        "Provider: {}, poll budget: {} x {:?} ({:?} worst case)",
        config.provider_url,
        policy.max_attempts,
        policy.interval,
        policy.budget()
    );

    let provider =
        MeshyProvider::from_config(&config).context("Failed to build provider client")?;

    let orchestrator = Arc::new(TaskOrchestrator::new(
        Arc::new(provider),
        policy,
        config.result_formats.clone(),
    ));
    let sessions = Arc::new(SessionService::new(
        Arc::clone(&orchestrator),
        config.session_retention,
    ));

    // Build router with all API endpoints
    let app = api::create_router(AppState::new(orchestrator, sessions));

    tracing::info!("Listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    axum::serve(listener, app)
        .await
        .context("Failed to start server")?;

    Ok(())
}
