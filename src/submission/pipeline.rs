use tracing::Instrument;
use uuid::Uuid;

use crate::error::{AppError, RelayError};
use crate::models::{ContactForm, Submission};
use crate::state::AppState;

use super::fields;

/// Validate, verify, persist, notify. Steps run strictly in that order and
/// the first failure stops the sequence. Nothing is retried or rolled back.
pub async fn run(state: &AppState, form: ContactForm) -> Result<Submission, AppError> {
    let span = tracing::info_span!("submission", request_id = %Uuid::now_v7());
    relay(state, form).instrument(span).await
}

async fn relay(state: &AppState, form: ContactForm) -> Result<Submission, AppError> {
    let form = fields::require_all(form).map_err(|missing| {
        tracing::info!(?missing, "Validation error: All fields are required!");
        AppError::MissingFields
    })?;

    let verification = state
        .verifier
        .verify(&form.email)
        .await
        .map_err(RelayError::Verification)?;

    if !verification.is_verified {
        tracing::info!("Validation error: Invalid email address!");
        return Err(AppError::InvalidEmail);
    }

    let submission = form.into_submission();

    state
        .store
        .insert(&submission)
        .await
        .map_err(RelayError::Storage)?;
    tracing::debug!("Submission stored");

    state
        .mailer
        .send_notification(&submission)
        .await
        .map_err(RelayError::Mail)?;

    tracing::info!("Email sent and data saved");
    Ok(submission)
}
