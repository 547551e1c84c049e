use log::{error, info, warn};
use std::net::SocketAddr;

use keygate::config::ServerConfig;
use keygate::server::{routes, AppState};

#[tokio::main]
async fn main() {
    // Initialize env
    let dotenv_result = dotenvy::dotenv();

    // Initialize logging
    env_logger::init();

    match dotenv_result {
        Ok(path) => info!("Environment variables loaded from {}", path.display()),
        Err(e) => warn!("Failed to load .env file: {}", e),
    };

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    info!("Configuration: host={}, port={}", config.host, config.port);

    let addr: SocketAddr = match config.bind_address().parse() {
        Ok(addr) => addr,
        Err(e) => {
            error!("Failed to parse server address: {}", e);
            std::process::exit(1);
        }
    };

    let state = AppState::new(config);
    info!("Issuing tokens valid for {}h", state.issuer.ttl().num_hours());
    state.security_logger.clone().start_cleanup_task();

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for shutdown signal: {}", e);
        }
        info!("Shutdown signal received");
    };

    match warp::serve(routes(state)).try_bind_with_graceful_shutdown(addr, shutdown) {
        Ok((bound, server)) => {
            info!("Starting Keygate server on {}", bound);
            server.await;
            info!("Server stopped");
        }
        Err(e) => {
            error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    }
}
