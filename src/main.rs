// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_controller::ControllerDeps;
use crate::application::registry::{ActionRegistry, HOSPITAL_DASHBOARD_ACTION};
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::jsonrpc_source::JsonRpcDataSource;
use crate::infrastructure::surface_store::SurfaceStore;
use crate::presentation::app_state::AppState;
use crate::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Load configuration
    let config = load_app_config().context("Failed to load dashboard configuration")?;

    // Create data source and display host (infrastructure layer)
    let source = Arc::new(JsonRpcDataSource::new(
        &config.backend,
        config.dashboard.date_range_days,
    )?);
    let surfaces = Arc::new(SurfaceStore::new());

    // Instantiate the controller through the action registry (application layer)
    let registry = ActionRegistry::with_defaults()?;
    let deps = ControllerDeps {
        source,
        host: surfaces.clone(),
        settings: config.dashboard.controller_settings(),
    };
    let controller = registry
        .instantiate(HOSPITAL_DASHBOARD_ACTION, deps)
        .context("Dashboard action is not registered")?;

    if config.dashboard.fetch_timeout_ms.is_none() {
        tracing::warn!("No fetch timeout configured; a hung backend call keeps its surface stale");
    }

    // Mount surfaces and start the first refresh; renders land as fetches complete
    let first = controller.activate();
    tracing::info!(refresh_id = first.id(), "Initial dashboard load started");

    let state = Arc::new(AppState {
        controller: controller.clone(),
        surfaces,
    });
    let router = build_router(state);

    // Start server
    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.server.bind))?;
    tracing::info!("Starting hospital-dashboard service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Tear the view down; fetches still in flight render into nothing
    controller.deactivate();
    tracing::info!("hospital-dashboard service stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        // Without a signal handler, keep serving until the process is killed
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
