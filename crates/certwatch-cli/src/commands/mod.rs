//! CLI command definitions and dispatch.

pub mod check;
pub mod cleanup;
pub mod clients;
pub mod migrate;
pub mod seed;
pub mod serve;

use clap::{Parser, Subcommand};

use certwatch_api::AppState;
use certwatch_core::config::AppConfig;
use certwatch_core::error::AppError;
use certwatch_database::DatabasePool;

use crate::output::OutputFormat;

/// Environment variable selecting the configuration overlay.
pub const ENV_VAR: &str = "CERTWATCH_ENV";

/// CertWatch: certification expiry tracker
#[derive(Debug, Parser)]
#[command(name = "certwatch", version, about, long_about = None)]
pub struct Cli {
    /// Directory containing default.toml and the environment overlays
    #[arg(short, long, default_value = "config")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the CertWatch server
    Serve(serve::ServeArgs),
    /// Apply pending database migrations
    Migrate,
    /// Load the sample clients into an empty database
    Seed,
    /// Run the certificate expiry check now
    Check,
    /// Delete read notifications older than the retention window
    Cleanup(cleanup::CleanupArgs),
    /// List clients
    Clients(clients::ClientsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = load_config(&self.config)?;
        match &self.command {
            Commands::Serve(args) => serve::execute(args, config).await,
            Commands::Migrate => migrate::execute(&config).await,
            Commands::Seed => seed::execute(config, self.format).await,
            Commands::Check => check::execute(config, self.format).await,
            Commands::Cleanup(args) => cleanup::execute(args, config, self.format).await,
            Commands::Clients(args) => clients::execute(args, config, self.format).await,
        }
    }
}

/// Helper: load configuration from the given directory
pub fn load_config(config_dir: &str) -> Result<AppConfig, AppError> {
    let env = std::env::var(ENV_VAR).unwrap_or_else(|_| "development".to_string());
    tracing::debug!(config_dir, env = %env, "Loading configuration");
    AppConfig::load_from(config_dir, &env)
}

/// Helper: connect, migrate, and build the service graph
pub async fn open_state(config: AppConfig) -> Result<AppState, AppError> {
    let db = DatabasePool::initialize(&config.database).await?;
    Ok(certwatch_api::build_state(config, db))
}
