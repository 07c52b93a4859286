// Main entry point - Dependency injection and server setup
use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use roi_dashboard::application::chart_service::ChartService;
use roi_dashboard::application::filter_service::FilterService;
use roi_dashboard::application::pipeline::ChartPipeline;
use roi_dashboard::infrastructure::config::{load_app_config, DEFAULT_CONFIG_PATH};
use roi_dashboard::infrastructure::http_roi_repository::HttpRoiRepository;
use roi_dashboard::presentation::app_state::AppState;
use roi_dashboard::presentation::router;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("roi_dashboard=info,tower_http=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Load configuration
    let config_path = std::env::var("ROI_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let app_config = load_app_config(&config_path)?;
    let pipeline_config = app_config.pipeline_config()?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(HttpRoiRepository::new(&app_config.upstream)?);

    // Create services (application layer)
    let filter_service = FilterService::new(repository.clone());
    let chart_service = ChartService::new(
        repository,
        ChartPipeline::new(pipeline_config),
        app_config.chart.default_mode,
        app_config.chart.default_scale,
    );

    let state = Arc::new(AppState {
        filter_service,
        chart_service,
    });

    let addr: SocketAddr = app_config
        .server
        .bind_addr
        .parse()
        .with_context(|| format!("Invalid bind address {}", app_config.server.bind_addr))?;
    tracing::info!(
        "Starting roi-dashboard on {} (upstream {})",
        addr,
        app_config.upstream.base_url
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router(state)).await?;

    Ok(())
}
