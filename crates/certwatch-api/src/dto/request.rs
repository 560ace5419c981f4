//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use certwatch_core::error::AppError;
use certwatch_entity::client::{ClientInput, ClientStatus, parse_date};
use certwatch_entity::notification::{ReadFilter, Severity};

/// Create or replace a client.
///
/// Field aliases accept the column names used by older exports.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ClientRequest {
    /// Organization name.
    #[serde(alias = "client_name")]
    #[validate(length(min = 1, max = 200, message = "Client name is required"))]
    pub name: String,
    /// Line of business.
    #[validate(length(min = 1, max = 200, message = "Business type is required"))]
    pub business_type: String,
    /// Street address.
    #[serde(default, alias = "client_address")]
    #[validate(length(max = 500))]
    pub address: String,
    /// City or region.
    #[serde(alias = "client_location")]
    #[validate(length(min = 1, max = 200, message = "Location is required"))]
    pub location: String,
    /// Certificate expiry date, `YYYY-MM-DD`.
    #[serde(alias = "certificate_expiry_date")]
    #[validate(length(min = 1, message = "Expiry date is required"))]
    pub expiry_date: String,
    /// Last audit date, `YYYY-MM-DD`.
    #[validate(length(min = 1, message = "Last audit date is required"))]
    pub last_audit_date: String,
    /// Issuing certification body.
    #[validate(length(min = 1, max = 200, message = "Certification body is required"))]
    pub certification_body: String,
    /// Contact person.
    #[serde(default)]
    pub contact_person: String,
    /// Phone and/or email.
    #[serde(default, alias = "phone_email")]
    pub contact_channel: String,
    /// `Active` (default) or `Expired`.
    #[serde(default)]
    pub status: Option<String>,
}

impl ClientRequest {
    /// Parses dates and status into a domain input.
    pub fn into_input(self) -> Result<ClientInput, AppError> {
        let expiry_date = parse_date(&self.expiry_date).ok_or_else(|| {
            AppError::validation(format!("Invalid expiry date: '{}'", self.expiry_date))
        })?;
        let last_audit_date = parse_date(&self.last_audit_date).ok_or_else(|| {
            AppError::validation(format!(
                "Invalid last audit date: '{}'",
                self.last_audit_date
            ))
        })?;
        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") => ClientStatus::Active,
            Some(raw) => raw.parse()?,
        };

        Ok(ClientInput {
            name: self.name.trim().to_string(),
            business_type: self.business_type.trim().to_string(),
            address: self.address,
            location: self.location.trim().to_string(),
            expiry_date,
            last_audit_date,
            certification_body: self.certification_body.trim().to_string(),
            contact_person: self.contact_person,
            contact_channel: self.contact_channel,
            status,
        })
    }
}

/// Client list filters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientFilterParams {
    /// Free text search.
    pub search: Option<String>,
    /// `Active`, `Expired`, or `All`.
    pub status: Option<String>,
}

impl ClientFilterParams {
    /// Status filter, where `All` or an empty value means no filter.
    pub fn status_filter(&self) -> Result<Option<ClientStatus>, AppError> {
        match self.status.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) if s.eq_ignore_ascii_case("all") => Ok(None),
            Some(s) => s.parse().map(Some),
        }
    }
}

/// Notification list filters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationFilterParams {
    /// `read`, `unread`, or `all`.
    pub status: Option<String>,
    /// `warning`, `danger`, or `info`.
    pub severity: Option<String>,
}

impl NotificationFilterParams {
    /// Read-state filter.
    pub fn read_filter(&self) -> Result<ReadFilter, AppError> {
        match self.status.as_deref().map(|s| s.trim().to_lowercase()).as_deref() {
            None | Some("") | Some("all") => Ok(ReadFilter::All),
            Some("read") => Ok(ReadFilter::Read),
            Some("unread") => Ok(ReadFilter::Unread),
            Some(other) => Err(AppError::validation(format!(
                "Invalid notification status: '{other}'. Expected one of: read, unread, all"
            ))),
        }
    }

    /// Severity filter.
    pub fn severity_filter(&self) -> Result<Option<Severity>, AppError> {
        match self.severity.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) if s.eq_ignore_ascii_case("all") => Ok(None),
            Some(s) => s.parse().map(Some),
        }
    }
}

/// System log listing parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SystemLogParams {
    /// Maximum entries to return.
    pub limit: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ClientRequest {
        ClientRequest {
            name: "PT Sinar Jaya".to_string(),
            business_type: "Manufacturing".to_string(),
            address: String::new(),
            location: "Jakarta".to_string(),
            expiry_date: "2025-02-15".to_string(),
            last_audit_date: "2024-02-15".to_string(),
            certification_body: "TUV".to_string(),
            contact_person: String::new(),
            contact_channel: String::new(),
            status: None,
        }
    }

    #[test]
    fn test_valid_request_converts() {
        let req = request();
        assert!(req.validate().is_ok());
        let input = req.into_input().unwrap();
        assert_eq!(input.status, ClientStatus::Active);
        assert_eq!(input.expiry_date.to_string(), "2025-02-15");
    }

    #[test]
    fn test_empty_name_fails_validation() {
        let req = ClientRequest {
            name: String::new(),
            ..request()
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_bad_date_rejected() {
        let req = ClientRequest {
            expiry_date: "15/02/2025".to_string(),
            ..request()
        };
        let err = req.into_input().unwrap_err();
        assert_eq!(err.kind, certwatch_core::error::ErrorKind::Validation);
    }

    #[test]
    fn test_legacy_field_names_accepted() {
        let json = serde_json::json!({
            "client_name": "CV Maju",
            "business_type": "Food",
            "client_location": "Bandung",
            "certificate_expiry_date": "2025-03-01",
            "last_audit_date": "2024-03-01",
            "certification_body": "SGS",
            "phone_email": "maju@example.com",
            "status": "Expired"
        });
        let req: ClientRequest = serde_json::from_value(json).unwrap();
        let input = req.into_input().unwrap();
        assert_eq!(input.name, "CV Maju");
        assert_eq!(input.contact_channel, "maju@example.com");
        assert_eq!(input.status, ClientStatus::Expired);
    }

    #[test]
    fn test_filters() {
        let all = ClientFilterParams {
            search: None,
            status: Some("All".to_string()),
        };
        assert_eq!(all.status_filter().unwrap(), None);

        let unread = NotificationFilterParams {
            status: Some("unread".to_string()),
            severity: Some("danger".to_string()),
        };
        assert_eq!(unread.read_filter().unwrap(), ReadFilter::Unread);
        assert_eq!(unread.severity_filter().unwrap(), Some(Severity::Danger));

        let bad = NotificationFilterParams {
            status: Some("maybe".to_string()),
            severity: None,
        };
        assert!(bad.read_filter().is_err());
    }
}
