//! HTTP request handlers.

use super::types::{HealthResponse, RegistrationForm};
use super::AppState;
use crate::outcome::Outcome;
use crate::synapse::authenticate;
use crate::validation::validate;
use axum::{
    extract::{rejection::FormRejection, State},
    Form, Json,
};
use tracing::{debug, error, info, warn};

/// Health check endpoint.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let upstream_healthy = state.synapse.health_check().await;

    Json(HealthResponse {
        status: "ok".to_string(),
        upstream_healthy,
    })
}

/// Render the empty registration form.
pub async fn show_form() -> Outcome {
    Outcome::Form
}

/// Handle a submitted registration form.
///
/// A body that does not decode as a form is treated like one with both
/// fields empty.
pub async fn submit(
    State(state): State<AppState>,
    form: Result<Form<RegistrationForm>, FormRejection>,
) -> Outcome {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            debug!(error = %rejection, "Undecodable registration form, treating fields as empty");
            RegistrationForm::default()
        }
    };

    let outcome = process_registration(&state, &form.username, &form.password).await;

    match outcome {
        Outcome::Registered => info!(username = %form.username, "User registered"),
        Outcome::UpstreamUnreachable | Outcome::SerializationError => {
            error!(username = %form.username, outcome = outcome.kind(), "Registration failed")
        }
        _ => warn!(username = %form.username, outcome = outcome.kind(), "Registration refused"),
    }

    outcome
}

/// Validate, authenticate, and submit one registration.
///
/// No MAC is computed and no upstream call is made for a submission that
/// fails validation.
pub async fn process_registration(state: &AppState, username: &str, password: &str) -> Outcome {
    if let Err(e) = validate(username, password) {
        return e.into();
    }

    let mac = authenticate(username, &state.secret);
    state.synapse.register(username, password, &mac).await
}
