//! Operator-visible action log.

pub mod service;

pub use service::SystemLogService;
