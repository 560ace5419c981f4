//! Read-side projections of client records.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use certwatch_core::config::ExpiryConfig;
use certwatch_entity::client::{Client, ExpiryUrgency, days_remaining_label};

/// A client with its expiry state derived for `today`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientView {
    /// The stored record.
    #[serde(flatten)]
    pub client: Client,
    /// Days until expiry, absent when the stored date does not parse.
    pub days_remaining: Option<i64>,
    /// Urgency classification.
    pub urgency: ExpiryUrgency,
    /// Short relative label ("Today", "3 days", ...).
    pub days_remaining_label: Option<String>,
}

impl ClientView {
    /// Derive the view of `client` as of `today`.
    pub fn new(client: Client, today: NaiveDate, config: &ExpiryConfig) -> Self {
        let days_remaining = client.days_remaining(today);
        let urgency = ExpiryUrgency::classify(
            client.status,
            days_remaining.unwrap_or(0),
            config.warning_window_days,
            config.expiring_soon_days,
        );
        Self {
            days_remaining_label: days_remaining.map(days_remaining_label),
            days_remaining,
            urgency,
            client,
        }
    }
}

/// Dashboard counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientStats {
    /// All clients.
    pub total_clients: i64,
    /// Clients with status `Active`.
    pub active_certificates: i64,
    /// Active clients expiring within the dashboard window.
    pub expiring_soon: i64,
    /// Clients with status `Expired`.
    pub expired_certificates: i64,
}

/// One row of the client export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRow {
    /// 1-based row number.
    #[serde(rename = "No")]
    pub number: usize,
    #[serde(rename = "Client Name")]
    pub name: String,
    #[serde(rename = "Business Type")]
    pub business_type: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Expiry Date")]
    pub expiry_date: String,
    #[serde(rename = "Last Audit")]
    pub last_audit_date: String,
    #[serde(rename = "Certification Body")]
    pub certification_body: String,
    #[serde(rename = "Contact Person")]
    pub contact_person: String,
    #[serde(rename = "Phone/Email")]
    pub contact_channel: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Days Remaining")]
    pub days_remaining: Option<i64>,
}

/// Full client export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientExport {
    /// Suggested download file name.
    pub filename: String,
    /// When the export was produced.
    pub exported_at: DateTime<Utc>,
    /// One row per client, ordered by name.
    pub data: Vec<ExportRow>,
}

impl ClientExport {
    /// Build the export of `clients` as of `today`.
    pub fn build(clients: Vec<Client>, today: NaiveDate) -> Self {
        let data = clients
            .into_iter()
            .enumerate()
            .map(|(i, c)| ExportRow {
                number: i + 1,
                days_remaining: c.days_remaining(today),
                name: c.name,
                business_type: c.business_type,
                address: c.address,
                location: c.location,
                expiry_date: c.expiry_date,
                last_audit_date: c.last_audit_date,
                certification_body: c.certification_body,
                contact_person: c.contact_person,
                contact_channel: c.contact_channel,
                status: c.status.to_string(),
            })
            .collect();
        Self {
            filename: format!("ISO_Clients_Export_{}.json", today.format("%Y-%m-%d")),
            exported_at: Utc::now(),
            data,
        }
    }
}
