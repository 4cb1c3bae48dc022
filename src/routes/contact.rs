use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::error::AppError;
use crate::models::ContactForm;
use crate::state::SharedState;
use crate::submission::{parser, pipeline};

pub const SUCCESS_MESSAGE: &str = "Email sent and data saved successfully!";

pub async fn send_email(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, AppError> {
    let body = body.map_err(|rejection| {
        let msg = format!("Invalid request body: {}", rejection.body_text());
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(msg)
        } else {
            AppError::BadRequest(msg)
        }
    })?;

    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok());

    let raw_data = if content_type.is_some_and(|ct| ct.contains("multipart/form-data")) {
        parser::parse_multipart(&headers, body).await
    } else {
        parser::parse_body(content_type, &body)
    }
    .map_err(|e| AppError::BadRequest(format!("Invalid request body: {e}")))?;

    if let Some(obj) = raw_data.as_object() {
        tracing::debug!(fields = ?obj.keys().collect::<Vec<_>>(), "Received contact form submission");
    }

    pipeline::run(&state, ContactForm::from_value(&raw_data)).await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": SUCCESS_MESSAGE,
        })),
    )
        .into_response())
}
