//! # certwatch-entity
//!
//! Domain entity models for CertWatch. Every struct in this crate
//! represents a database table row or a domain value object. Database
//! entities derive `sqlx::FromRow`.

pub mod client;
pub mod notification;
pub mod system_log;
