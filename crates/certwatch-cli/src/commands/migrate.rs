//! Database migration command.

use certwatch_core::config::AppConfig;
use certwatch_core::error::AppError;
use certwatch_database::DatabasePool;
use certwatch_database::migration::run_migrations;

use crate::output;

/// Execute the migrate command
pub async fn execute(config: &AppConfig) -> Result<(), AppError> {
    let db = DatabasePool::connect(&config.database).await?;

    println!("Running database migrations...");
    run_migrations(db.pool()).await?;
    db.close().await;

    output::print_success("All migrations applied successfully.");
    Ok(())
}
