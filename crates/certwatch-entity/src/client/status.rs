//! Client certification status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Persisted certification status of a client.
///
/// Only the expiry sweep and explicit edits change this value; it is never
/// recomputed on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "PascalCase")]
pub enum ClientStatus {
    /// Certificate is considered valid.
    Active,
    /// The sweep observed the certificate past its expiry date.
    Expired,
}

impl ClientStatus {
    /// Return the status as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Expired => "Expired",
        }
    }
}

impl Default for ClientStatus {
    fn default() -> Self {
        Self::Active
    }
}

impl fmt::Display for ClientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ClientStatus {
    type Err = certwatch_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "expired" => Ok(Self::Expired),
            _ => Err(certwatch_core::AppError::validation(format!(
                "Invalid client status: '{s}'. Expected one of: Active, Expired"
            ))),
        }
    }
}
