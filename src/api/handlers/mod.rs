pub mod countries;
pub mod helpers;
pub mod status;

pub use countries::{SummaryImage, countries_routes};
pub use helpers::{ErrorBody, error_from, message_response};
pub use status::{default_not_found, index, status_routes};
