//! Start the CertWatch server.

use clap::Args;

use certwatch_core::config::AppConfig;
use certwatch_core::error::AppError;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,

    /// Load the sample clients when the database is empty
    #[arg(long)]
    pub seed: bool,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, mut config: AppConfig) -> Result<(), AppError> {
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }
    if args.seed {
        config.seed.on_startup = true;
    }

    println!("Starting CertWatch server...");
    println!("  Host: {}", config.server.host);
    println!("  Port: {}", config.server.port);

    certwatch_api::run_server(config).await
}
