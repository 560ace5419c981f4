//! Notification wording.

use certwatch_entity::client::{Client, format_long_date};
use certwatch_entity::notification::{NewNotification, Severity};

/// The notice raised when a certificate has lapsed.
pub fn expired_notice(client: &Client, days: i64) -> NewNotification {
    NewNotification {
        client_id: client.id,
        title: format!("{} - Certificate Expired", client.name),
        message: format!(
            "Certificate has expired on {}. Please renew immediately.",
            display_expiry(client)
        ),
        severity: Severity::Danger,
        days_remaining: days,
    }
}

/// The notice raised while a certificate is inside the warning window.
pub fn approaching_notice(client: &Client, days: i64, severity: Severity) -> NewNotification {
    let date = display_expiry(client);
    let message = match days {
        0 => format!("Certificate expires today ({date}). Urgent action required!"),
        1 => format!("Certificate will expire in 1 day on {date}"),
        n => format!("Certificate will expire in {n} days on {date}"),
    };
    NewNotification {
        client_id: client.id,
        title: format!("{} - Certificate Expiring Soon", client.name),
        message,
        severity,
        days_remaining: days,
    }
}

/// Long-form expiry date, or the stored text when it does not parse.
fn display_expiry(client: &Client) -> String {
    client
        .parsed_expiry_date()
        .map(format_long_date)
        .unwrap_or_else(|| client.expiry_date.clone())
}
