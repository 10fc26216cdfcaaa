use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::models::ErrorResponse;

/// Errors surfaced by the extraction and recommendation pipeline
///
/// Configuration errors are raised while loading the dictionary or catalog and
/// are fatal at startup. The other variants are request-scoped.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl MatchError {
    fn code(&self) -> &'static str {
        match self {
            MatchError::Configuration(_) => "configuration_error",
            MatchError::Validation(_) => "validation_failed",
            MatchError::PayloadTooLarge(_) => "payload_too_large",
            MatchError::Internal(_) => "internal_error",
        }
    }
}

impl ResponseError for MatchError {
    fn status_code(&self) -> StatusCode {
        match self {
            MatchError::Validation(_) => StatusCode::BAD_REQUEST,
            MatchError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            MatchError::Configuration(_) | MatchError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        // Internal details stay in the log, callers get a generic message
        let message = match self {
            MatchError::Validation(msg) | MatchError::PayloadTooLarge(msg) => msg.clone(),
            MatchError::Configuration(msg) | MatchError::Internal(msg) => {
                tracing::error!("Request failed: {}", msg);
                "An internal server error occurred".to_string()
            }
        };

        HttpResponse::build(status).json(ErrorResponse {
            error: self.code().to_string(),
            message,
            status_code: status.as_u16(),
        })
    }
}
