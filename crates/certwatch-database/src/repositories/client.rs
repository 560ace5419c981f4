//! Client repository implementation.

use chrono::Utc;
use sqlx::SqlitePool;

use certwatch_core::error::{AppError, ErrorKind};
use certwatch_core::result::AppResult;
use certwatch_core::types::ClientId;
use certwatch_core::types::pagination::{PageRequest, PageResponse};
use certwatch_entity::client::{Client, ClientInput, ClientStatus, DATE_FORMAT};

/// Repository for client CRUD operations.
#[derive(Debug, Clone)]
pub struct ClientRepository {
    pool: SqlitePool,
}

impl ClientRepository {
    /// Create a new client repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a client by ID.
    pub async fn find_by_id(&self, id: ClientId) -> AppResult<Option<Client>> {
        sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find client", e))
    }

    /// Search clients by free text and status, ordered by expiry date.
    ///
    /// The text matches name, location, or business type.
    pub async fn search(
        &self,
        query: Option<&str>,
        status: Option<ClientStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Client>> {
        let mut conditions = Vec::new();
        if query.is_some() {
            conditions.push("(name LIKE ? OR location LIKE ? OR business_type LIKE ?)");
        }
        if status.is_some() {
            conditions.push("status = ?");
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_sql = format!("SELECT COUNT(*) FROM clients {where_clause}");
        let select_sql = format!(
            "SELECT * FROM clients {where_clause} ORDER BY expiry_date ASC, name ASC LIMIT ? OFFSET ?"
        );

        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        let mut select_query = sqlx::query_as::<_, Client>(&select_sql);

        if let Some(q) = query {
            let pattern = format!("%{q}%");
            for _ in 0..3 {
                count_query = count_query.bind(pattern.clone());
                select_query = select_query.bind(pattern.clone());
            }
        }
        if let Some(s) = status {
            count_query = count_query.bind(s);
            select_query = select_query.bind(s);
        }

        let total = count_query.fetch_one(&self.pool).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count clients", e)
        })?;

        let clients = select_query
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to search clients", e))?;

        Ok(PageResponse::new(
            clients,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Insert a new client.
    pub async fn create(&self, input: &ClientInput) -> AppResult<Client> {
        let now = Utc::now();
        sqlx::query_as::<_, Client>(
            "INSERT INTO clients (id, name, business_type, address, location, expiry_date, \
             last_audit_date, certification_body, contact_person, contact_channel, status, \
             created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(ClientId::new())
        .bind(&input.name)
        .bind(&input.business_type)
        .bind(&input.address)
        .bind(&input.location)
        .bind(input.expiry_date.format(DATE_FORMAT).to_string())
        .bind(input.last_audit_date.format(DATE_FORMAT).to_string())
        .bind(&input.certification_body)
        .bind(&input.contact_person)
        .bind(&input.contact_channel)
        .bind(input.status)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create client", e))
    }

    /// Replace every editable field of a client.
    ///
    /// Returns `None` when no client has the given ID.
    pub async fn update(&self, id: ClientId, input: &ClientInput) -> AppResult<Option<Client>> {
        sqlx::query_as::<_, Client>(
            "UPDATE clients SET name = ?, business_type = ?, address = ?, location = ?, \
             expiry_date = ?, last_audit_date = ?, certification_body = ?, contact_person = ?, \
             contact_channel = ?, status = ?, updated_at = ? \
             WHERE id = ? RETURNING *",
        )
        .bind(&input.name)
        .bind(&input.business_type)
        .bind(&input.address)
        .bind(&input.location)
        .bind(input.expiry_date.format(DATE_FORMAT).to_string())
        .bind(input.last_audit_date.format(DATE_FORMAT).to_string())
        .bind(&input.certification_body)
        .bind(&input.contact_person)
        .bind(&input.contact_channel)
        .bind(input.status)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update client", e))
    }

    /// Set the status of a client and bump `updated_at`.
    pub async fn update_status(&self, id: ClientId, status: ClientStatus) -> AppResult<bool> {
        let result = sqlx::query("UPDATE clients SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update client status", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a client. Its notifications are removed by cascade.
    pub async fn delete(&self, id: ClientId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM clients WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete client", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// List every client whose status is `Active`.
    pub async fn list_active(&self) -> AppResult<Vec<Client>> {
        sqlx::query_as::<_, Client>(
            "SELECT * FROM clients WHERE status = ? ORDER BY expiry_date ASC",
        )
        .bind(ClientStatus::Active)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list active clients", e))
    }

    /// List every client ordered by name.
    pub async fn list_all(&self) -> AppResult<Vec<Client>> {
        sqlx::query_as::<_, Client>("SELECT * FROM clients ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list clients", e))
    }

    /// Count all clients.
    pub async fn count_all(&self) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM clients")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count clients", e))
    }

    /// Count clients with the given status.
    pub async fn count_by_status(&self, status: ClientStatus) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM clients WHERE status = ?")
            .bind(status)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count clients", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DatabasePool;
    use crate::migration::run_migrations;
    use chrono::NaiveDate;

    async fn repo() -> ClientRepository {
        let db = DatabasePool::connect_in_memory().await.expect("connect");
        run_migrations(db.pool()).await.expect("migrate");
        ClientRepository::new(db.into_pool())
    }

    fn input(name: &str, location: &str, expiry: &str) -> ClientInput {
        ClientInput {
            name: name.to_string(),
            business_type: "Manufacturing".to_string(),
            address: "Jl. Sudirman No. 1".to_string(),
            location: location.to_string(),
            expiry_date: NaiveDate::parse_from_str(expiry, "%Y-%m-%d").unwrap(),
            last_audit_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            certification_body: "TUV".to_string(),
            contact_person: "Budi".to_string(),
            contact_channel: "budi@example.com".to_string(),
            status: ClientStatus::Active,
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = repo().await;
        let created = repo
            .create(&input("PT. Alpha", "Jakarta", "2025-06-01"))
            .await
            .unwrap();
        assert_eq!(created.expiry_date, "2025-06-01");
        assert_eq!(created.status, ClientStatus::Active);

        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.name, "PT. Alpha");
        assert!(repo.find_by_id(ClientId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_search_filters_and_orders_by_expiry() {
        let repo = repo().await;
        repo.create(&input("PT. Late", "Bandung", "2026-01-01")).await.unwrap();
        repo.create(&input("PT. Early", "Jakarta", "2025-01-01")).await.unwrap();
        let gone = repo.create(&input("PT. Gone", "Jakarta", "2024-01-01")).await.unwrap();
        repo.update_status(gone.id, ClientStatus::Expired).await.unwrap();

        let all = repo.search(None, None, &PageRequest::default()).await.unwrap();
        let names: Vec<_> = all.items.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["PT. Gone", "PT. Early", "PT. Late"]);

        let jakarta_active = repo
            .search(Some("jakarta"), Some(ClientStatus::Active), &PageRequest::default())
            .await
            .unwrap();
        assert_eq!(jakarta_active.total_items, 1);
        assert_eq!(jakarta_active.items[0].name, "PT. Early");

        let paged = repo.search(None, None, &PageRequest::new(2, 2)).await.unwrap();
        assert_eq!(paged.items.len(), 1);
        assert_eq!(paged.total_pages, 2);
    }

    #[tokio::test]
    async fn test_update_delete_and_counts() {
        let repo = repo().await;
        let c = repo.create(&input("PT. Beta", "Surabaya", "2025-06-01")).await.unwrap();

        let mut changed = input("PT. Beta Baru", "Surabaya", "2026-06-01");
        changed.status = ClientStatus::Expired;
        let updated = repo.update(c.id, &changed).await.unwrap().unwrap();
        assert_eq!(updated.name, "PT. Beta Baru");
        assert_eq!(updated.expiry_date, "2026-06-01");
        assert!(repo.update(ClientId::new(), &changed).await.unwrap().is_none());

        assert_eq!(repo.count_all().await.unwrap(), 1);
        assert_eq!(repo.count_by_status(ClientStatus::Expired).await.unwrap(), 1);
        assert!(repo.list_active().await.unwrap().is_empty());

        assert!(repo.delete(c.id).await.unwrap());
        assert!(!repo.delete(c.id).await.unwrap());
        assert_eq!(repo.count_all().await.unwrap(), 0);
    }
}
