//! services/api/src/error.rs
//!
//! Defines the primary error type for the entire API service and how it is
//! rendered as an HTTP response.

use crate::config::ConfigError;
use crate::web::protocol::{ErrorResponse, REQUEST_FIELDS};
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::{error, warn};
use tutor_roster_core::ports::PortError;
use tutor_roster_core::validation::ValidationErrors;

/// The primary error type for the `api` service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error that propagated up from the roster port.
    #[error("Service Port Error: {0}")]
    Port(#[from] PortError),

    /// A request body that could not be read into the expected form.
    #[error("Invalid request body: {errors}")]
    Payload {
        status: StatusCode,
        errors: ValidationErrors,
    },

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let errors = match &rejection {
            JsonRejection::JsonDataError(_) => field_errors(&rejection.body_text()),
            JsonRejection::JsonSyntaxError(_) => {
                let mut errors = ValidationErrors::new();
                errors.add("body", "Request body is not valid JSON");
                errors
            }
            _ => {
                let mut errors = ValidationErrors::new();
                errors.add("body", rejection.body_text());
                errors
            }
        };
        let status = match rejection {
            JsonRejection::MissingJsonContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            JsonRejection::JsonSyntaxError(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::UNPROCESSABLE_ENTITY,
        };
        ApiError::Payload { status, errors }
    }
}

/// Attributes a deserialization failure to the form field it names.
///
/// The rejection text reads `...target type: <field>: <reason>`; anything that
/// does not name a known field is reported against `body`.
fn field_errors(text: &str) -> ValidationErrors {
    let detail = text
        .split_once("target type: ")
        .map_or(text, |(_, detail)| detail);
    let mut errors = ValidationErrors::new();
    match detail.split_once(": ") {
        Some((path, reason)) => match REQUEST_FIELDS.iter().find(|field| **field == path) {
            Some(field) => errors.add(*field, reason),
            None => errors.add("body", detail),
        },
        None => errors.add("body", detail),
    }
    errors
}

fn validation_response(status: StatusCode, errors: ValidationErrors) -> (StatusCode, ErrorResponse) {
    warn!("Rejected command: {}", errors);
    (
        status,
        ErrorResponse {
            message: "Validation failed".to_string(),
            errors: errors
                .iter()
                .map(|(field, message)| (field.to_string(), message.to_string()))
                .collect(),
        },
    )
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Port(PortError::Validation(errors)) => {
                validation_response(StatusCode::UNPROCESSABLE_ENTITY, errors)
            }
            ApiError::Payload { status, errors } => validation_response(status, errors),
            ApiError::Port(PortError::NotFound(what)) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::message(format!("Not found: {}", what)),
            ),
            other => {
                error!("Request failed: {:?}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::message("Internal server error"),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
