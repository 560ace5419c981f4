//! Built-in job handler implementations.

pub mod expiry_check;
pub mod retention;

pub use expiry_check::ExpiryCheckJobHandler;
pub use retention::RetentionJobHandler;
