//! Synapse shared-secret registration: MAC derivation and the homeserver client.

mod client;
mod mac;
mod types;

pub use client::{classify_rejection, SynapseClient, REGISTER_PATH, USER_ID_TAKEN_MARKER, VERSIONS_PATH};
pub use mac::authenticate;
pub use types::{AuthData, RegisterPayload, SHARED_SECRET_AUTH_TYPE};
