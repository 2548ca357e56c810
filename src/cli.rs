//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

use crate::config::DEFAULT_CONFIG_PATH;

/// countryfx - country metadata and exchange rate aggregation service
#[derive(Parser)]
#[command(name = "countryfx")]
#[command(version)]
#[command(about = "Country metadata and exchange rate aggregation service", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, short = 'c', global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Run one refresh against the configured sources and exit
    Refresh,

    /// Print a sample configuration file
    GenerateConfig,
}
