// ABOUTME: Server binary for the Fitplan weekly plan service
// ABOUTME: Initializes logging, loads configuration, and serves the plan API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Fitplan Server Binary
//!
//! Starts the HTTP API that turns a fitness profile into a weekly plan.

use anyhow::Result;
use clap::Parser;
use fitplan_server::{config::environment::ServerConfig, constants::routes, logging, server};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "fitplan-server")]
#[command(about = "Fitplan - weekly workout and diet plans with a rule-based fallback")]
pub struct Args {
    /// Override HTTP bind address
    #[arg(long)]
    http_host: Option<String>,

    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = match Args::try_parse() {
        Ok(args) => args,
        // --help and --version
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            eprintln!("Argument parsing failed: {e}");
            eprintln!("Using configuration from environment only");
            Args {
                http_host: None,
                http_port: None,
            }
        }
    };

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;

    if let Some(http_host) = args.http_host {
        config.http_host = http_host;
    }
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    info!("Starting Fitplan server");
    info!("{}", config.summary());
    display_available_endpoints(&config);

    if let Err(e) = server::run(config).await {
        error!("Server error: {e:#}");
        return Err(e);
    }

    Ok(())
}

/// Display all available API endpoints
fn display_available_endpoints(config: &ServerConfig) {
    let address = config.bind_address();
    info!("=== Available API Endpoints ===");
    info!("   Generate Plan:     POST http://{address}{}", routes::GENERATE_PLAN);
    info!("   Health:            GET  http://{address}{}", routes::HEALTH);
    info!("   Readiness:         GET  http://{address}{}", routes::READY);
    info!("=== End of Endpoint List ===");
}
