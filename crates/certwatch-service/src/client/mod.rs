//! Client record management, dashboard statistics, and export.

pub mod seed;
pub mod service;
pub mod view;

pub use seed::{sample_clients, seed_if_empty};
pub use service::{ClientQuery, ClientService};
pub use view::{ClientExport, ClientStats, ClientView, ExportRow};
