//! Certified client domain entities.

pub mod expiry;
pub mod model;
pub mod status;

pub use expiry::{
    DATE_FORMAT, ExpiryUrgency, days_remaining_label, days_until, format_long_date, parse_date,
};
pub use model::{Client, ClientInput};
pub use status::ClientStatus;
