// SPDX-FileCopyrightText: 2026 Relay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Relay: an HTTP bridge to a Telegram user account and a caption
//! transcript service.

mod serve;
mod shutdown;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use relay_config::{ConfigError, RelayConfig};

/// Relay - messaging bridge and caption transcript facades.
#[derive(Parser, Debug)]
#[command(name = "relay", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Log in to the messaging account and serve GET /updates and POST /send.
    Bridge,
    /// Serve POST /transcript.
    Transcript,
    /// Load and validate configuration, then print the resolved settings.
    CheckConfig,
}

fn load(path: Option<&std::path::Path>) -> Result<RelayConfig, Vec<ConfigError>> {
    match path {
        Some(path) => relay_config::load_and_validate_path(path),
        None => relay_config::load_and_validate(),
    }
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("relay={log_level},tower_http={log_level},warn"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            relay_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::CheckConfig => match serve::session_dir(&config) {
            Ok(dir) => {
                println!("{}", serve::describe(&config, &dir));
                Ok(())
            }
            Err(e) => Err(e),
        },
        Commands::Bridge => {
            if let Err(errors) = relay_config::validate_bridge_credentials(&config) {
                relay_config::render_errors(&errors);
                std::process::exit(1);
            }
            init_tracing(&config.log.level);
            let cancel = shutdown::install_signal_handler();
            serve::run_bridge(&config, cancel).await
        }
        Commands::Transcript => {
            init_tracing(&config.log.level);
            let cancel = shutdown::install_signal_handler();
            serve::run_transcript(&config, cancel).await
        }
    };

    if let Err(e) = result {
        eprintln!("relay: {e}");
        std::process::exit(1);
    }
}
