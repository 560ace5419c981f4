//! CertWatch Server: certification expiry tracker
//!
//! Main entry point that loads configuration, initializes logging, and
//! starts the HTTP server with its background scheduler.

use tracing_subscriber::{EnvFilter, fmt};

use certwatch_core::config::AppConfig;
use certwatch_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from the config directory and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let config_dir = std::env::var("CERTWATCH_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    let env = std::env::var("CERTWATCH_ENV").unwrap_or_else(|_| "development".to_string());

    AppConfig::load_from(&config_dir, &env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting CertWatch v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        database = %config.database.url,
        scheduler = config.worker.enabled,
        expiry_check_cron = %config.worker.expiry_check_cron,
        "Configuration loaded"
    );

    certwatch_api::run_server(config).await?;

    tracing::info!("CertWatch server shut down gracefully");
    Ok(())
}
