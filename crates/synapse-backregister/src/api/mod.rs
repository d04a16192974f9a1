//! HTTP front end: the registration page and health endpoint.

mod handlers;
mod middleware;
pub mod page;
mod types;

pub use handlers::*;
pub use middleware::{logging_middleware, rate_limit_middleware, RateLimitState};
pub use types::*;

use crate::synapse::SynapseClient;
use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use secrecy::SecretString;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared application state. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Registration shared secret, used only as the MAC key
    pub secret: Arc<SecretString>,
    /// Homeserver client
    pub synapse: Arc<SynapseClient>,
}

impl AppState {
    /// Create new application state.
    pub fn new(secret: SecretString, synapse: SynapseClient) -> Self {
        Self {
            secret: Arc::new(secret),
            synapse: Arc::new(synapse),
        }
    }
}

/// Create the router with the default submission rate limit.
pub fn create_router(state: AppState) -> Router {
    create_router_with_rate_limit(state, RateLimitState::new(10))
}

/// Create the router with a custom submission rate limit.
///
/// Only form submissions count against the limit.
pub fn create_router_with_rate_limit(state: AppState, rate_limit: RateLimitState) -> Router {
    let submit = post(handlers::submit).route_layer(axum_middleware::from_fn_with_state(
        rate_limit,
        rate_limit_middleware,
    ));

    Router::new()
        .route("/", get(handlers::show_form).merge(submit))
        .route("/health", get(handlers::health))
        .layer(axum_middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
