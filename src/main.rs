// Main entry point - Dependency injection and server setup
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use axum::{routing::{get, post}, Router};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_service::DashboardService;
use crate::infrastructure::config::load_dashboard_config;
use crate::infrastructure::http_gateway::HttpDashboardGateway;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    carousel_goto, carousel_next, carousel_pause, carousel_prev, clear_maintenance_filter,
    clear_warranty_filter, close_drill_down, get_dashboard, health_check, open_drill_down,
    page_drill_down, reload_dashboard, sort_drill_down, toggle_maintenance_filter,
    toggle_warranty_filter,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_dashboard_config()?;

    // Create gateway (infrastructure layer)
    let gateway = Arc::new(HttpDashboardGateway::new(&config.api)?);

    // Create service (application layer) and start the carousel clock
    let dashboard = DashboardService::new(gateway, config.carousel.settings());
    let carousel_driver = dashboard.spawn_carousel_driver();
    dashboard.load().await;

    let state = Arc::new(AppState { dashboard });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/dashboard", get(get_dashboard))
        .route("/dashboard/reload", post(reload_dashboard))
        .route("/carousel/next", post(carousel_next))
        .route("/carousel/prev", post(carousel_prev))
        .route("/carousel/pause", post(carousel_pause))
        .route("/carousel/goto/:index", post(carousel_goto))
        .route("/filters/warranty/toggle", post(toggle_warranty_filter))
        .route("/filters/warranty/clear", post(clear_warranty_filter))
        .route("/filters/maintenance/toggle", post(toggle_maintenance_filter))
        .route("/filters/maintenance/clear", post(clear_maintenance_filter))
        .route("/drilldown/open", post(open_drill_down))
        .route("/drilldown/sort", post(sort_drill_down))
        .route("/drilldown/page", post(page_drill_down))
        .route("/drilldown/close", post(close_drill_down))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config.server.bind.parse()?;
    tracing::info!("Starting itam-dashboard service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    carousel_driver.abort();
    Ok(())
}
