//! HTTP handlers grouped by resource.

pub mod client;
pub mod dashboard;
pub mod export;
pub mod health;
pub mod notification;
pub mod system_log;
