//! countryfx - country metadata and exchange rate aggregation service
//!
//! Fetches country metadata and USD exchange rates from two upstream
//! sources, derives an estimated GDP per country, persists the merged table
//! and serves it over HTTP together with a rendered summary image.
//!
//! # Architecture
//! - `sources`: upstream country and exchange rate clients
//! - `services`: merge engine, refresh pipeline and query operations
//! - `storage`: sea-orm backed country table (SQLite / MySQL / PostgreSQL)
//! - `render`: summary image generation
//! - `api`: HTTP handlers and routes
//! - `config`: Configuration management
//! - `runtime`: Application lifecycle and execution modes
//! - `system`: Logging setup

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod render;
pub mod runtime;
pub mod services;
pub mod sources;
pub mod storage;
pub mod system;
