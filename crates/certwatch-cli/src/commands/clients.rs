//! Client listing command.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use certwatch_core::config::AppConfig;
use certwatch_core::error::AppError;
use certwatch_core::types::pagination::{MAX_PAGE_SIZE, PageRequest};
use certwatch_entity::client::ClientStatus;
use certwatch_service::ClientService;
use certwatch_service::client::ClientQuery;

use crate::output::{self, OutputFormat};

/// Arguments for the clients command
#[derive(Debug, Args)]
pub struct ClientsArgs {
    /// Only show `active` or `expired` clients
    #[arg(short, long)]
    pub status: Option<String>,

    /// Free text search over name, location, and business type
    #[arg(long)]
    pub search: Option<String>,

    /// Page number
    #[arg(long, default_value_t = 1)]
    pub page: u64,
}

/// Client display row
#[derive(Debug, Serialize, Tabled)]
struct ClientRow {
    /// Name
    name: String,
    /// Location
    location: String,
    /// Expiry
    expiry: String,
    /// Days left
    days: String,
    /// Status
    status: String,
}

/// Execute the clients command
pub async fn execute(
    args: &ClientsArgs,
    config: AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let status = args
        .status
        .as_deref()
        .map(str::parse::<ClientStatus>)
        .transpose()?;
    let query = ClientQuery {
        search: args.search.clone(),
        status,
    };

    let state = super::open_state(config).await?;
    let page = state
        .client_service
        .list(
            &query,
            PageRequest::new(args.page, MAX_PAGE_SIZE),
            ClientService::today(),
        )
        .await;
    state.db.close().await;
    let page = page?;

    let rows: Vec<ClientRow> = page
        .items
        .iter()
        .map(|v| ClientRow {
            name: v.client.name.clone(),
            location: v.client.location.clone(),
            expiry: v.client.expiry_date.clone(),
            days: v
                .days_remaining_label
                .clone()
                .unwrap_or_else(|| "-".to_string()),
            status: v.client.status.to_string(),
        })
        .collect();

    output::print_list(&rows, format);
    if format == OutputFormat::Table && page.total_pages > 1 {
        output::print_kv(
            "Page",
            &format!("{} of {} ({} clients)", page.page, page.total_pages, page.total_items),
        );
    }
    Ok(())
}
