//! # certwatch-api
//!
//! HTTP API layer for CertWatch built on Axum.
//!
//! Provides the REST endpoints for clients, notifications, the dashboard,
//! export, and the system log, together with middleware (CORS, compression,
//! tracing, request logging), extractors, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state, run_server};
pub use state::AppState;
