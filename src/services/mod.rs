//! Service layer for business logic
//!
//! Shared between the HTTP handlers and the `refresh` CLI command.

mod country_service;
pub mod merge;
mod refresh_service;

pub use country_service::*;
pub use merge::{MergeOutcome, build_rows, random_gdp_factor};
pub use refresh_service::*;
