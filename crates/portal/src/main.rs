use access::utils::{Telemetry, init_logger};
use anyhow::{Context, Result};
use dotenv::dotenv;
use portal::{config::Config, handler::AppRouter, state::AppState};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;

    let telemetry = match config.otel_endpoint.as_deref() {
        Some(endpoint) => {
            Some(Telemetry::init("portal", endpoint).context("Failed to initialize telemetry")?)
        }
        None => None,
    };

    let _log_guard = init_logger(
        telemetry.as_ref().map(Telemetry::logger_provider),
        "portal",
        config.dev_mode,
        config.enable_file_log,
    );

    let state = AppState::new(&config)
        .await
        .context("Failed to create AppState")?;

    info!(
        "Portal starting with {:?} sessions on port {}",
        config.session_backend, config.port
    );

    AppRouter::serve(config.port, state)
        .await
        .context("Failed to start server")?;

    info!("Shutting down portal...");

    if let Some(telemetry) = telemetry {
        if let Err(e) = telemetry.shutdown() {
            error!("Telemetry shutdown failed: {e:#}");
        }
    }

    Ok(())
}
