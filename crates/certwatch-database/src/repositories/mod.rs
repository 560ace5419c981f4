//! Repository implementations for all CertWatch entities.

pub mod client;
pub mod notification;
pub mod system_log;

pub use client::ClientRepository;
pub use notification::{NotificationCounts, NotificationRepository};
pub use system_log::SystemLogRepository;
