//! Sample data command.

use certwatch_core::config::AppConfig;
use certwatch_core::error::AppError;
use certwatch_service::client::seed_if_empty;

use crate::output::{self, OutputFormat};

/// Execute the seed command
pub async fn execute(config: AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let state = super::open_state(config).await?;
    let inserted = seed_if_empty(&state.client_repo, &state.system_log_repo).await?;
    state.db.close().await;

    match (format, inserted) {
        (OutputFormat::Json, _) => {
            println!("{}", serde_json::json!({ "inserted": inserted }));
        }
        (OutputFormat::Table, 0) => {
            output::print_warning("Database already contains clients; nothing seeded.")
        }
        (OutputFormat::Table, n) => output::print_success(&format!("Seeded {} clients.", n)),
    }
    Ok(())
}
