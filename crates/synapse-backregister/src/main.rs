//! Synapse back-register - Entry point.

use synapse_backregister::{
    api::{create_router_with_rate_limit, AppState, RateLimitState},
    config::Config,
    synapse::SynapseClient,
};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(server = %config.server, "Starting Synapse back-register");

    let synapse = match SynapseClient::new(config.server.clone(), &config.upstream) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to create homeserver client: {}", e);
            std::process::exit(1);
        }
    };

    let state = AppState::new(config.secret.clone(), synapse);
    let rate_limit = RateLimitState::new(config.rate_limit.submissions_per_minute);
    let app = create_router_with_rate_limit(state, rate_limit);

    let addr = match config.listen.socket_addr() {
        Ok(a) => a,
        Err(e) => {
            error!("Invalid listen address: {:#}", e);
            std::process::exit(1);
        }
    };

    info!("Listening on {}", addr);

    let listener = match TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
