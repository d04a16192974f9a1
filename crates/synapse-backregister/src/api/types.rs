//! API request and response types.

use serde::{Deserialize, Serialize};

/// Form body posted by the registration page.
///
/// Missing fields decode as empty strings.
#[derive(Debug, Default, Deserialize)]
pub struct RegistrationForm {
    #[serde(rename = "Username", default)]
    pub username: String,

    #[serde(rename = "Password", default)]
    pub password: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub upstream_healthy: bool,
}
