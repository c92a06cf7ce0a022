//! CLI entry point for nestpilot.

mod cli;
mod commands;
mod output;

use clap::Parser;
use nest_observability::ObservabilityConfig;

use crate::cli::Cli;

/// Load `.env` from the working directory or the nearest parent that has one.
fn load_env_file() {
    let Ok(cwd) = std::env::current_dir() else {
        return;
    };
    for dir in cwd.ancestors().take(32) {
        let env_file = dir.join(".env");
        if env_file.exists() {
            let _ = dotenvy::from_path(&env_file);
            break;
        }
    }
}

fn init_logging(verbose: bool) {
    let mut config = ObservabilityConfig::from_env();
    config.service_name = "nestpilot-cli".to_string();
    if verbose {
        config.log_level = Some("debug".to_string());
    } else if config.log_level.is_none() {
        config.log_level = Some("warn".to_string());
    }
    if let Err(e) = nest_observability::init(config) {
        output::warning(&format!("Logging disabled: {e}"));
    }
}

#[tokio::main]
async fn main() {
    load_env_file();
    let cli = Cli::parse();
    output::init(cli.output);
    init_logging(cli.verbose);

    let result = commands::handle(cli).await;
    nest_observability::shutdown();

    if let Err(e) = result {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
