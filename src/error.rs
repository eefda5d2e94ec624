//! HTTP error type and its JSON envelope.
//!
//! Every failure leaves the service as
//! `{"error": {"code": "...", "message": "...", "details": {...}}}`.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::application::services::LinkError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug)]
pub enum AppError {
    Validation { message: String, details: Value },
    NotFound { message: String, details: Value },
    Conflict { message: String, details: Value },
    Gone { message: String, details: Value },
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn gone(message: impl Into<String>, details: Value) -> Self {
        Self::Gone {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Gone { .. } => StatusCode::GONE,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, message, details) = match self {
            AppError::Validation { message, details } => ("validation_error", message, details),
            AppError::NotFound { message, details } => ("not_found", message, details),
            AppError::Conflict { message, details } => ("conflict", message, details),
            AppError::Gone { message, details } => ("gone", message, details),
            AppError::Internal { message, details } => ("internal_error", message, details),
        };

        ErrorInfo {
            code,
            message: message.clone(),
            details: details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<LinkError> for AppError {
    fn from(e: LinkError) -> Self {
        match e {
            LinkError::InvalidUrl(reason) => AppError::bad_request(
                "Invalid URL",
                json!({ "field": "url", "reason": reason.to_string() }),
            ),
            LinkError::InvalidCustomCode(reason) => AppError::bad_request(
                "Invalid custom code",
                json!({ "field": "custom_code", "reason": reason.to_string() }),
            ),
            LinkError::CodeAlreadyInUse(code) => {
                AppError::conflict("Short code already in use", json!({ "code": code }))
            }
            LinkError::NotFound(code) => {
                AppError::not_found("Short link not found", json!({ "code": code }))
            }
            LinkError::Expired(code) => {
                AppError::gone("Short link has expired", json!({ "code": code }))
            }
            LinkError::GenerationExhausted { attempts } => {
                tracing::error!(attempts, "Short code generation exhausted");
                AppError::internal(
                    "Failed to generate a unique short code",
                    json!({ "attempts": attempts }),
                )
            }
            LinkError::Randomness(e) => {
                tracing::error!(error = %e, "Random source failure");
                AppError::internal("Internal server error", json!({}))
            }
            LinkError::Store(e) => {
                tracing::error!(error = %e, "Storage failure");
                AppError::internal("Internal server error", json!({}))
            }
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = e.field_errors().keys().map(|k| k.to_string()).collect();
        fields.sort();

        AppError::bad_request(
            "Request validation failed",
            json!({ "fields": fields, "reason": e.to_string() }),
        )
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(
            "Invalid JSON body",
            json!({ "reason": rejection.body_text() }),
        )
    }
}
