//! Custom Axum extractors.

pub mod pagination;
pub mod path;
pub mod validated;

pub use pagination::PaginationParams;
pub use path::parse_id;
pub use validated::ValidatedJson;
