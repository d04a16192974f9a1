//! Synapse back-register - web front end for shared-secret user registration.
//!
//! Serves a username/password form, and for each submission:
//! - validates the input
//! - derives the shared-secret MAC over the username
//! - registers the user on the homeserver and reports the outcome

pub mod api;
pub mod config;
pub mod error;
pub mod outcome;
pub mod synapse;
pub mod validation;

pub use config::Config;
pub use error::{RegistrationError, ValidationError};
pub use outcome::Outcome;
pub use synapse::{authenticate, SynapseClient};
pub use validation::validate;
