//! HTTP surface

pub mod handlers;

pub use handlers::{
    SummaryImage, countries_routes, default_not_found, index, status_routes,
};
