use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

pub const MISSING_FIELDS: &str = "All fields are required!";
pub const INVALID_EMAIL: &str = "Invalid email address!";
pub const RELAY_FAILED: &str = "Email sending or data saving failed!";

#[derive(Debug)]
pub enum AppError {
    MissingFields,
    InvalidEmail,
    BadRequest(String),
    PayloadTooLarge(String),
    Relay(RelayError),
}

/// Failure of one of the collaborator calls after validation passed.
///
/// Every variant renders the same 500 payload; the tag only shows up in logs.
#[derive(Debug, Clone, PartialEq)]
pub enum RelayError {
    Verification(String),
    Storage(String),
    Mail(String),
}

impl RelayError {
    pub fn stage(&self) -> &'static str {
        match self {
            RelayError::Verification(_) => "verification",
            RelayError::Storage(_) => "storage",
            RelayError::Mail(_) => "mail",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            RelayError::Verification(msg) | RelayError::Storage(msg) | RelayError::Mail(msg) => {
                msg
            }
        }
    }
}

impl std::fmt::Display for RelayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for RelayError {}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::MissingFields => write!(f, "{MISSING_FIELDS}"),
            AppError::InvalidEmail => write!(f, "{INVALID_EMAIL}"),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {msg}"),
            AppError::PayloadTooLarge(msg) => write!(f, "Payload Too Large: {msg}"),
            AppError::Relay(err) => write!(f, "Relay Error ({}): {err}", err.stage()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::MissingFields => {
                (StatusCode::BAD_REQUEST, axum::Json(json!({ "error": MISSING_FIELDS })))
                    .into_response()
            }
            AppError::InvalidEmail => {
                (StatusCode::BAD_REQUEST, axum::Json(json!({ "error": INVALID_EMAIL })))
                    .into_response()
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, axum::Json(json!({ "error": msg }))).into_response()
            }
            AppError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, axum::Json(json!({ "error": msg }))).into_response()
            }
            AppError::Relay(err) => {
                tracing::error!(stage = err.stage(), "Error sending email or saving data: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    axum::Json(json!({
                        "success": false,
                        "message": RELAY_FAILED,
                        "error": err.message(),
                    })),
                )
                    .into_response()
            }
        }
    }
}

impl From<RelayError> for AppError {
    fn from(err: RelayError) -> Self {
        AppError::Relay(err)
    }
}
