//! Scheduled tasks for CertWatch.
//!
//! This crate provides:
//! - A job executor that dispatches scheduled tasks to the correct handler
//! - A cron scheduler that fires the daily expiry check and the weekly
//!   notification retention sweep
//! - The job handlers for both tasks

pub mod executor;
pub mod jobs;
pub mod scheduler;

pub use executor::{JobExecutionError, JobExecutor, JobHandler, ScheduledTask};
pub use scheduler::CronScheduler;
