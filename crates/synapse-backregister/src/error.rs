//! Error types for the registration front end.

use thiserror::Error;

/// A submission rejected before any MAC or network work happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("username is empty")]
    EmptyUsername,

    #[error("password is shorter than {min} bytes")]
    WeakPassword { min: usize },
}

/// Failure of the outbound registration call itself.
///
/// Responses the homeserver does send back, including error statuses, are not
/// errors at this level; they are classified into an `Outcome`.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("Failed to serialize registration payload: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Homeserver unreachable: {0}")]
    Unreachable(#[from] reqwest::Error),

    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(String),
}
