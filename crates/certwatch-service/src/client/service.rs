//! Client CRUD, statistics, and export.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::info;

use certwatch_core::config::ExpiryConfig;
use certwatch_core::error::AppError;
use certwatch_core::types::ClientId;
use certwatch_core::types::pagination::{PageRequest, PageResponse};
use certwatch_database::repositories::ClientRepository;
use certwatch_entity::client::{Client, ClientInput, ClientStatus};
use certwatch_entity::system_log::SystemAction;

use super::view::{ClientExport, ClientStats, ClientView};
use crate::system_log::SystemLogService;

/// Filters for client listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientQuery {
    /// Free text matched against name, location, and business type.
    pub search: Option<String>,
    /// Restrict to one status.
    pub status: Option<ClientStatus>,
}

/// Manages client records.
#[derive(Debug, Clone)]
pub struct ClientService {
    /// Client repository.
    client_repo: Arc<ClientRepository>,
    /// System log writer.
    system_log: Arc<SystemLogService>,
    /// Dashboard windows.
    expiry: ExpiryConfig,
}

impl ClientService {
    /// Creates a new client service.
    pub fn new(
        client_repo: Arc<ClientRepository>,
        system_log: Arc<SystemLogService>,
        expiry: ExpiryConfig,
    ) -> Self {
        Self {
            client_repo,
            system_log,
            expiry,
        }
    }

    /// Today's local calendar date.
    pub fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    /// Lists clients ordered by expiry date.
    pub async fn list(
        &self,
        query: &ClientQuery,
        page: PageRequest,
        today: NaiveDate,
    ) -> Result<PageResponse<ClientView>, AppError> {
        let search = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let page = self.client_repo.search(search, query.status, &page).await?;
        Ok(page.map(|c| ClientView::new(c, today, &self.expiry)))
    }

    /// Gets a single client.
    pub async fn get(&self, id: ClientId, today: NaiveDate) -> Result<ClientView, AppError> {
        let client = self.find(id).await?;
        Ok(ClientView::new(client, today, &self.expiry))
    }

    /// Creates a client.
    pub async fn create(&self, input: ClientInput) -> Result<Client, AppError> {
        validate_input(&input)?;
        let client = self.client_repo.create(&input).await?;

        info!(client_id = %client.id, name = %client.name, "Client created");
        self.system_log
            .record(
                SystemAction::ClientCreated,
                format!("New client added: {}", client.name),
            )
            .await?;
        Ok(client)
    }

    /// Replaces every editable field of a client.
    pub async fn update(&self, id: ClientId, input: ClientInput) -> Result<Client, AppError> {
        validate_input(&input)?;
        let client = self
            .client_repo
            .update(id, &input)
            .await?
            .ok_or_else(|| AppError::not_found("Client not found"))?;

        info!(client_id = %client.id, "Client updated");
        self.system_log
            .record(
                SystemAction::ClientUpdated,
                format!("Client updated: {}", client.name),
            )
            .await?;
        Ok(client)
    }

    /// Deletes a client and, by cascade, its notifications.
    pub async fn delete(&self, id: ClientId) -> Result<(), AppError> {
        let client = self.find(id).await?;
        if !self.client_repo.delete(id).await? {
            return Err(AppError::not_found("Client not found"));
        }

        info!(client_id = %id, "Client deleted");
        self.system_log
            .record(
                SystemAction::ClientDeleted,
                format!("Client deleted: {}", client.name),
            )
            .await?;
        Ok(())
    }

    /// Dashboard counters.
    pub async fn stats(&self, today: NaiveDate) -> Result<ClientStats, AppError> {
        let total_clients = self.client_repo.count_all().await?;
        let active_certificates = self.client_repo.count_by_status(ClientStatus::Active).await?;
        let expired_certificates = self
            .client_repo
            .count_by_status(ClientStatus::Expired)
            .await?;

        let window = self.expiry.expiring_soon_days;
        let expiring_soon = self
            .client_repo
            .list_active()
            .await?
            .iter()
            .filter_map(|c| c.days_remaining(today))
            .filter(|d| (0..=window).contains(d))
            .count() as i64;

        Ok(ClientStats {
            total_clients,
            active_certificates,
            expiring_soon,
            expired_certificates,
        })
    }

    /// Active clients expiring within the dashboard window, soonest first.
    pub async fn expiring_soon(&self, today: NaiveDate) -> Result<Vec<ClientView>, AppError> {
        let window = self.expiry.expiring_soon_days;
        let mut views: Vec<ClientView> = self
            .client_repo
            .list_active()
            .await?
            .into_iter()
            .map(|c| ClientView::new(c, today, &self.expiry))
            .filter(|v| matches!(v.days_remaining, Some(d) if (0..=window).contains(&d)))
            .collect();

        views.sort_by_key(|v| v.days_remaining);
        views.truncate(self.expiry.expiring_soon_limit.max(0) as usize);
        Ok(views)
    }

    /// Every client, ordered by name, with days remaining.
    pub async fn export(&self, today: NaiveDate) -> Result<ClientExport, AppError> {
        let clients = self.client_repo.list_all().await?;
        info!(count = clients.len(), "Exporting clients");
        Ok(ClientExport::build(clients, today))
    }

    async fn find(&self, id: ClientId) -> Result<Client, AppError> {
        self.client_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Client not found"))
    }
}

/// Rejects inputs with blank required text.
fn validate_input(input: &ClientInput) -> Result<(), AppError> {
    let required = [
        ("name", &input.name),
        ("business_type", &input.business_type),
        ("location", &input.location),
        ("certification_body", &input.certification_body),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(AppError::validation(format!("Field '{field}' must not be empty")));
        }
    }
    Ok(())
}
