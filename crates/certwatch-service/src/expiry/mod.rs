//! Certificate expiry sweep.
//!
//! The [`ExpiryEvaluator`] walks a snapshot of active clients, flips past-due
//! ones to `Expired`, and raises at most one open notification per
//! (client, threshold). [`ExpiryMonitor`] serializes sweeps so that the cron
//! tick and the manual trigger never overlap, and [`ExpiryService`] is the
//! caller that records each run in the system log.

pub mod evaluator;
#[cfg(any(test, feature = "test-util"))]
pub mod memory;
pub mod monitor;
pub mod notice;
pub mod policy;
pub mod service;
pub mod store;

pub use evaluator::{EvaluationResult, ExpiryEvaluator};
#[cfg(any(test, feature = "test-util"))]
pub use memory::InMemoryExpiryStore;
pub use monitor::{ExpiryMonitor, SweepOutcome, SweepTrigger};
pub use policy::{ExpiryDecision, ExpiryPolicy};
pub use service::ExpiryService;
pub use store::{ExpiryStore, SqlExpiryStore};
