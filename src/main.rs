//! FTP Gateway - Entry Point
//!
//! A small HTTP API that proxies file-management operations onto a remote FTP server.

use env_logger::Env;
use log::{error, info};
use std::process;

use ftp_gateway::Server;
use ftp_gateway::config::GatewayConfig;

#[tokio::main]
async fn main() {
    // Initialize the logger (RUST_LOG overrides the default level)
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    info!("Launching FTP gateway...");

    let config = match GatewayConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            process::exit(1);
        }
    };

    let server = match Server::bind(&config).await {
        Ok(server) => server,
        Err(_) => process::exit(1),
    };

    if let Err(e) = server.start().await {
        error!("Server error: {}", e);
        process::exit(1);
    }
}
