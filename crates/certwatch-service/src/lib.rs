//! # certwatch-service
//!
//! Business logic service layer for CertWatch. The expiry sweep lives in
//! [`expiry`]; the remaining services orchestrate repositories for the
//! operator-facing use cases.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod client;
pub mod expiry;
pub mod notification;
pub mod system_log;

pub use client::{ClientService, ClientStats, ClientView};
pub use expiry::{
    EvaluationResult, ExpiryEvaluator, ExpiryMonitor, ExpiryPolicy, ExpiryService, ExpiryStore,
    SqlExpiryStore, SweepOutcome, SweepTrigger,
};
pub use notification::NotificationService;
pub use system_log::SystemLogService;
