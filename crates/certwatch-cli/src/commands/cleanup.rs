//! Notification retention command.

use clap::Args;

use certwatch_core::config::AppConfig;
use certwatch_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Arguments for the cleanup command
#[derive(Debug, Args)]
pub struct CleanupArgs {
    /// Age in days; defaults to `worker.retention_days`
    #[arg(short, long)]
    pub days: Option<i64>,
}

/// Execute the cleanup command
pub async fn execute(
    args: &CleanupArgs,
    config: AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let days = args.days.unwrap_or(config.worker.retention_days);
    let state = super::open_state(config).await?;
    let deleted = state.expiry_service.cleanup(days).await;
    state.db.close().await;
    let deleted = deleted?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::json!({ "deleted": deleted, "days": days }))
        }
        OutputFormat::Table => output::print_success(&format!(
            "Deleted {} read notifications older than {} days.",
            deleted, days
        )),
    }
    Ok(())
}
