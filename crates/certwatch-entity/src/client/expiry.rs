//! Calendar-day arithmetic on certificate expiry dates.
//!
//! All comparisons are date-only; time of day never influences the number
//! of days remaining.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::status::ClientStatus;

/// Storage format for certificate and audit dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a stored date.
///
/// Accepts plain `YYYY-MM-DD` as well as RFC 3339 and SQL datetime strings,
/// keeping only the calendar date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|dt| dt.date())
}

/// Whole calendar days from `today` until `expiry`. Negative once past due.
pub fn days_until(expiry: NaiveDate, today: NaiveDate) -> i64 {
    (expiry - today).num_days()
}

/// Render a date for notification text, e.g. `15 February 2025`.
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%-d %B %Y").to_string()
}

/// Short relative label shown next to a client.
pub fn days_remaining_label(days: i64) -> String {
    match days {
        d if d < 0 => {
            let past = d.unsigned_abs();
            format!("{past} day{} ago", if past == 1 { "" } else { "s" })
        }
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        d => format!("{d} days"),
    }
}

/// Read-time classification of how close a certificate is to lapsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpiryUrgency {
    /// Past due, or already marked expired.
    Expired,
    /// Inside the notification window.
    Critical,
    /// Inside the dashboard "expiring soon" window.
    Warning,
    /// Comfortably valid.
    Active,
}

impl ExpiryUrgency {
    /// Classify a certificate from its status and remaining days.
    pub fn classify(
        status: ClientStatus,
        days: i64,
        critical_window: i64,
        warning_window: i64,
    ) -> Self {
        if status == ClientStatus::Expired || days < 0 {
            Self::Expired
        } else if days <= critical_window {
            Self::Critical
        } else if days <= warning_window {
            Self::Warning
        } else {
            Self::Active
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_accepts_common_shapes() {
        assert_eq!(parse_date("2025-02-15"), Some(date(2025, 2, 15)));
        assert_eq!(parse_date(" 2025-02-15 "), Some(date(2025, 2, 15)));
        assert_eq!(parse_date("2025-02-15T23:59:00+07:00"), Some(date(2025, 2, 15)));
        assert_eq!(parse_date("2025-02-15 08:00:00"), Some(date(2025, 2, 15)));
        assert_eq!(parse_date("15/02/2025"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_days_until_crosses_month_and_year() {
        assert_eq!(days_until(date(2025, 3, 1), date(2025, 2, 27)), 2);
        assert_eq!(days_until(date(2025, 1, 1), date(2024, 12, 31)), 1);
        assert_eq!(days_until(date(2024, 12, 31), date(2025, 1, 1)), -1);
        assert_eq!(days_until(date(2025, 1, 1), date(2025, 1, 1)), 0);
    }

    #[test]
    fn test_labels() {
        assert_eq!(days_remaining_label(-1), "1 day ago");
        assert_eq!(days_remaining_label(-4), "4 days ago");
        assert_eq!(days_remaining_label(0), "Today");
        assert_eq!(days_remaining_label(1), "Tomorrow");
        assert_eq!(days_remaining_label(12), "12 days");
    }

    #[test]
    fn test_long_date() {
        assert_eq!(format_long_date(date(2025, 2, 5)), "5 February 2025");
    }

    #[test]
    fn test_urgency() {
        let c = |status, days| ExpiryUrgency::classify(status, days, 5, 30);
        assert_eq!(c(ClientStatus::Expired, 100), ExpiryUrgency::Expired);
        assert_eq!(c(ClientStatus::Active, -1), ExpiryUrgency::Expired);
        assert_eq!(c(ClientStatus::Active, 0), ExpiryUrgency::Critical);
        assert_eq!(c(ClientStatus::Active, 5), ExpiryUrgency::Critical);
        assert_eq!(c(ClientStatus::Active, 6), ExpiryUrgency::Warning);
        assert_eq!(c(ClientStatus::Active, 31), ExpiryUrgency::Active);
    }
}
