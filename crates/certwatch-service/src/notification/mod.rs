//! Notification feed management.

pub mod service;

pub use service::NotificationService;
