//! Client entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use certwatch_core::types::ClientId;

use super::expiry::{days_until, parse_date};
use super::status::ClientStatus;

/// A certified client organization and its certificate record.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Client {
    /// Unique client identifier.
    pub id: ClientId,
    /// Organization name.
    pub name: String,
    /// Line of business, e.g. `"Manufacturing"`.
    pub business_type: String,
    /// Street address.
    pub address: String,
    /// City or region.
    pub location: String,
    /// Certificate expiry date (`YYYY-MM-DD`).
    pub expiry_date: String,
    /// Date of the last audit (`YYYY-MM-DD`).
    pub last_audit_date: String,
    /// Body that issued the certificate.
    pub certification_body: String,
    /// Contact person at the client.
    pub contact_person: String,
    /// Phone number and/or email of the contact.
    pub contact_channel: String,
    /// Persisted certification status.
    pub status: ClientStatus,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Client {
    /// Parsed certificate expiry date, if the stored value is well formed.
    pub fn parsed_expiry_date(&self) -> Option<NaiveDate> {
        parse_date(&self.expiry_date)
    }

    /// Days remaining until expiry relative to `today`.
    ///
    /// Returns `None` when the stored expiry date cannot be parsed.
    pub fn days_remaining(&self, today: NaiveDate) -> Option<i64> {
        self.parsed_expiry_date().map(|d| days_until(d, today))
    }

    /// Whether the sweep should still evaluate this client.
    pub fn is_active(&self) -> bool {
        self.status != ClientStatus::Expired
    }
}

/// Data required to create or fully replace a client record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientInput {
    /// Organization name.
    pub name: String,
    /// Line of business.
    pub business_type: String,
    /// Street address.
    pub address: String,
    /// City or region.
    pub location: String,
    /// Certificate expiry date (`YYYY-MM-DD`).
    pub expiry_date: NaiveDate,
    /// Date of the last audit (`YYYY-MM-DD`).
    pub last_audit_date: NaiveDate,
    /// Issuing certification body.
    pub certification_body: String,
    /// Contact person.
    pub contact_person: String,
    /// Phone and/or email.
    pub contact_channel: String,
    /// Status to persist.
    pub status: ClientStatus,
}
