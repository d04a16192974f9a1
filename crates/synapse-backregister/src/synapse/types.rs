//! Wire types for the homeserver registration API.

use serde::Serialize;

/// Auth type for shared-secret registration.
pub const SHARED_SECRET_AUTH_TYPE: &str = "org.matrix.login.shared_secret";

/// Body of `POST /_matrix/client/r0/register`.
#[derive(Debug, Serialize)]
pub struct RegisterPayload<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub mac: &'a str,
    pub auth: AuthData,
}

/// Authentication discriminator.
#[derive(Debug, Serialize)]
pub struct AuthData {
    #[serde(rename = "type")]
    pub auth_type: &'static str,
}

impl<'a> RegisterPayload<'a> {
    pub fn shared_secret(username: &'a str, password: &'a str, mac: &'a str) -> Self {
        Self {
            username,
            password,
            mac,
            auth: AuthData {
                auth_type: SHARED_SECRET_AUTH_TYPE,
            },
        }
    }
}
