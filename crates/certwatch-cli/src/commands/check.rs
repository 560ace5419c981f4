//! Manual expiry check command.

use certwatch_core::config::AppConfig;
use certwatch_core::error::AppError;
use certwatch_service::{SweepOutcome, SweepTrigger};

use crate::output::{self, OutputFormat};

/// Execute the check command
///
/// Recorded in the system log as a manual check.
pub async fn execute(config: AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let state = super::open_state(config).await?;
    let outcome = state.expiry_service.check_now(SweepTrigger::Manual).await;
    state.db.close().await;

    match outcome? {
        SweepOutcome::Completed(result) => output::print_summary(
            "Expiry check completed",
            &[
                ("Clients checked", result.total_checked.to_string()),
                ("Notifications created", result.created.to_string()),
                ("Statuses updated", result.updated.to_string()),
            ],
            &result,
            format,
        ),
        SweepOutcome::Skipped => output::print_warning("Another expiry check is running."),
    }
    Ok(())
}
