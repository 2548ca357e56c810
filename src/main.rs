use clap::Parser;

use countryfx::cli::{Cli, Commands};
use countryfx::config::{StaticConfig, validate_config};
use countryfx::errors::CountryFxError;
use countryfx::runtime::modes;
use countryfx::system::init_logging;

fn exit_with(err: &CountryFxError) -> ! {
    eprintln!("{}", err.format_colored());
    std::process::exit(1);
}

#[actix_web::main]
async fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Serve);

    if command == Commands::GenerateConfig {
        println!("{}", StaticConfig::generate_sample_config());
        return;
    }

    dotenvy::dotenv().ok();

    let config = match StaticConfig::load(&cli.config) {
        Ok(config) => config,
        Err(e) => exit_with(&CountryFxError::validation(format!(
            "Failed to load configuration from {}: {}",
            cli.config, e
        ))),
    };
    if let Err(e) = validate_config(&config) {
        exit_with(&e);
    }

    // guard 必须存活到进程退出
    let _log_guard = match init_logging(&config.logging) {
        Ok(guard) => guard,
        Err(e) => exit_with(&e),
    };

    let result = match command {
        Commands::Refresh => modes::run_refresh_once(&config).await,
        _ => modes::run_server(&config).await,
    };

    if let Err(e) = result {
        tracing::error!("{:#}", e);
        match e.downcast_ref::<CountryFxError>() {
            Some(err) => eprintln!("{}", err.format_colored()),
            None => eprintln!("{}", CountryFxError::internal(format!("{:#}", e)).format_colored()),
        }
        std::process::exit(1);
    }
}
