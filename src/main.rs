// Main entry point - Dependency injection and startup
use std::sync::Arc;

use taxi_dashboard::application::orchestrator::DashboardController;
use taxi_dashboard::application::taxi_api::TaxiApi;
use taxi_dashboard::application::view::DashboardView;
use taxi_dashboard::infrastructure::config::load_dashboard_config;
use taxi_dashboard::infrastructure::http_gateway::HttpGateway;
use taxi_dashboard::presentation::commands::HELP;
use taxi_dashboard::presentation::input::{command_stream, run_commands};
use taxi_dashboard::presentation::terminal::TerminalView;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing on stderr; stdout belongs to the dashboard
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let config = load_dashboard_config()?;
    tracing::info!("Using API at {}", config.api.base_url);

    // Gateway (infrastructure) -> typed API and controller (application) -> terminal (presentation)
    let gateway = Arc::new(HttpGateway::new(&config.api.base_url, config.api.timeout())?);
    let api = TaxiApi::new(gateway);
    let view = TerminalView::new(std::io::stdout());
    let mut controller = DashboardController::new(api, view, config.filters.to_filter_state());

    // A failed health probe ends the session here
    controller.startup().await?;
    controller.view_mut().notice(HELP);

    run_commands(&mut controller, command_stream(tokio::io::stdin())).await;

    Ok(())
}
