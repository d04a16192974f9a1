//! Rate limiting and request logging middleware.

use crate::outcome::Outcome;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use std::{num::NonZeroU32, sync::Arc};
use tracing::{debug, warn};

/// Global rate limiter (not keyed by IP).
pub type GlobalLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Rate limiter state shared across requests.
#[derive(Clone)]
pub struct RateLimitState {
    /// Global limiter for registration submissions
    pub global: Arc<GlobalLimiter>,
}

impl RateLimitState {
    /// Create a limiter allowing `submissions_per_minute` submissions.
    ///
    /// A limit of zero is raised to one.
    pub fn new(submissions_per_minute: u32) -> Self {
        let quota = Quota::per_minute(
            NonZeroU32::new(submissions_per_minute).unwrap_or(NonZeroU32::MIN),
        );

        Self {
            global: Arc::new(RateLimiter::direct(quota)),
        }
    }

    /// Create a permissive rate limiter for testing.
    pub fn permissive() -> Self {
        Self::new(1000)
    }
}

/// Rate limiting middleware for form submissions.
///
/// Over the limit the page is rendered with a 429.
pub async fn rate_limit_middleware(
    State(rate_limit): State<RateLimitState>,
    request: Request,
    next: Next,
) -> Result<Response, Outcome> {
    if rate_limit.global.check().is_err() {
        warn!("Registration rate limit exceeded");
        return Err(Outcome::RateLimited);
    }

    debug!("Rate limit check passed");
    Ok(next.run(request).await)
}

/// Logging middleware for requests.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = std::time::Instant::now();

    debug!(%method, %uri, "Request started");

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();

    if status.is_success() {
        debug!(%method, %uri, %status, ?duration, "Request completed");
    } else {
        warn!(%method, %uri, %status, ?duration, "Request failed");
    }

    response
}
