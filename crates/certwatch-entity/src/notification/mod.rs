//! Expiry notification entities.

pub mod model;
pub mod severity;

pub use model::{NewNotification, Notification, NotificationDetail, ReadFilter};
pub use severity::Severity;
