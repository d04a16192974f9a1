//! Terminal results of a registration attempt.

use crate::error::{RegistrationError, ValidationError};
use axum::http::StatusCode;

/// The closed set of results a request to the front end can end in.
///
/// Each variant maps to exactly one status code and notice; see
/// [`Outcome::status`] and [`Outcome::notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Plain form, nothing submitted yet.
    Form,
    Registered,
    EmptyUsername,
    WeakPassword,
    /// Homeserver reported the user ID is in use. Carries its status code.
    UsernameTaken(u16),
    /// Any other homeserver rejection. Carries its status code.
    RegistrationRejected(u16),
    UpstreamUnreachable,
    SerializationError,
    RateLimited,
}

impl Outcome {
    /// HTTP status returned to the browser.
    ///
    /// Upstream statuses are mirrored; one that is not a valid HTTP status
    /// becomes 502.
    pub fn status(&self) -> StatusCode {
        match self {
            Outcome::Form | Outcome::Registered => StatusCode::OK,
            Outcome::EmptyUsername | Outcome::WeakPassword => StatusCode::BAD_REQUEST,
            Outcome::UsernameTaken(code) | Outcome::RegistrationRejected(code) => {
                StatusCode::from_u16(*code).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Outcome::UpstreamUnreachable | Outcome::SerializationError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Outcome::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        }
    }

    /// Notice shown above the form, if any.
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            Outcome::Form => None,
            Outcome::Registered => Some("You're registered!"),
            Outcome::EmptyUsername => Some("Must enter a username"),
            Outcome::WeakPassword => Some("Password must be 10+ chars"),
            Outcome::UsernameTaken(_) => Some("Username already in use"),
            Outcome::RegistrationRejected(_) => Some("Registration error :(!"),
            Outcome::UpstreamUnreachable => Some("Error hitting registration server"),
            Outcome::SerializationError => Some("Internal error building registration request"),
            Outcome::RateLimited => Some("Too many registration attempts, try again later"),
        }
    }

    /// Short machine-friendly name, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Outcome::Form => "form",
            Outcome::Registered => "registered",
            Outcome::EmptyUsername => "empty_username",
            Outcome::WeakPassword => "weak_password",
            Outcome::UsernameTaken(_) => "username_taken",
            Outcome::RegistrationRejected(_) => "registration_rejected",
            Outcome::UpstreamUnreachable => "upstream_unreachable",
            Outcome::SerializationError => "serialization_error",
            Outcome::RateLimited => "rate_limited",
        }
    }
}

impl From<ValidationError> for Outcome {
    fn from(e: ValidationError) -> Self {
        match e {
            ValidationError::EmptyUsername => Outcome::EmptyUsername,
            ValidationError::WeakPassword { .. } => Outcome::WeakPassword,
        }
    }
}

impl From<&RegistrationError> for Outcome {
    fn from(e: &RegistrationError) -> Self {
        match e {
            RegistrationError::Serialization(_) => Outcome::SerializationError,
            RegistrationError::Unreachable(_) | RegistrationError::ClientBuild(_) => {
                Outcome::UpstreamUnreachable
            }
        }
    }
}
