//! Homeserver client for shared-secret registration.

use super::types::RegisterPayload;
use crate::config::UpstreamConfig;
use crate::error::RegistrationError;
use crate::outcome::Outcome;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::{debug, error, instrument, warn};

/// Registration endpoint, relative to the homeserver base URL.
pub const REGISTER_PATH: &str = "/_matrix/client/r0/register";

/// Endpoint used to probe homeserver health.
pub const VERSIONS_PATH: &str = "/_matrix/client/versions";

/// Error text Synapse returns when the requested user ID exists.
pub const USER_ID_TAKEN_MARKER: &str = "User ID already taken";

/// Longest prefix of an upstream error body written to the log, in bytes.
const MAX_LOGGED_BODY: usize = 512;

/// Cut `text` to at most `MAX_LOGGED_BODY` bytes on a char boundary.
fn log_prefix(text: &str) -> &str {
    if text.len() <= MAX_LOGGED_BODY {
        return text;
    }
    let end = text
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|&i| i <= MAX_LOGGED_BODY)
        .last()
        .unwrap_or(0);
    &text[..end]
}

/// Classify an error response from the homeserver.
///
/// This is a substring match on Synapse's free-text error message. If the
/// wording changes upstream, taken usernames fall through to
/// `RegistrationRejected`. A body that could not be read is `None`.
pub fn classify_rejection(status: u16, body: Option<&str>) -> Outcome {
    match body {
        Some(text) if text.contains(USER_ID_TAKEN_MARKER) => Outcome::UsernameTaken(status),
        _ => Outcome::RegistrationRejected(status),
    }
}

/// Client for a Synapse homeserver's registration API.
#[derive(Clone)]
pub struct SynapseClient {
    client: Client,
    base_url: String,
}

impl SynapseClient {
    /// Create a new client. Trailing `/` on `base_url` is dropped.
    pub fn new(base_url: impl Into<String>, upstream: &UpstreamConfig) -> Result<Self, RegistrationError> {
        let client = Client::builder()
            .timeout(upstream.timeout)
            .connect_timeout(upstream.connect_timeout)
            .build()
            .map_err(|e| RegistrationError::ClientBuild(e.to_string()))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    /// Full URL registration requests are posted to.
    pub fn register_url(&self) -> String {
        format!("{}{}", self.base_url, REGISTER_PATH)
    }

    /// Check if the homeserver answers its versions endpoint.
    pub async fn health_check(&self) -> bool {
        self.client
            .get(format!("{}{}", self.base_url, VERSIONS_PATH))
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    /// Submit a registration and classify the result.
    ///
    /// Transport failures become `UpstreamUnreachable`; nothing is retried.
    #[instrument(skip(self, password, mac))]
    pub async fn register(&self, username: &str, password: &str, mac: &str) -> Outcome {
        match self.try_register(username, password, mac).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(error = %e, "Registration request failed");
                Outcome::from(&e)
            }
        }
    }

    async fn try_register(
        &self,
        username: &str,
        password: &str,
        mac: &str,
    ) -> Result<Outcome, RegistrationError> {
        let payload = RegisterPayload::shared_secret(username, password, mac);
        let body = serde_json::to_vec(&payload)?;

        let url = self.register_url();
        debug!(url = %url, "Sending registration request");

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() < 400 {
            debug!(status = %status, "Registration accepted");
            return Ok(Outcome::Registered);
        }

        let body = match response.text().await {
            Ok(text) => {
                warn!(
                    status = %status,
                    body = %log_prefix(&text),
                    body_len = text.len(),
                    "Homeserver rejected registration"
                );
                Some(text)
            }
            Err(e) => {
                error!(status = %status, error = %e, "Failed to read homeserver error body");
                None
            }
        };

        Ok(classify_rejection(status.as_u16(), body.as_deref()))
    }
}
