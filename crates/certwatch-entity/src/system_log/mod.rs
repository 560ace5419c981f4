//! System log entities.

pub mod model;

pub use model::{SystemAction, SystemLogEntry};
