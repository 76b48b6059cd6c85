//! HTTP-facing error handling for the form intake service.
//!
//! Application errors are mapped to an [`ErrorCode`], which decides the
//! status code, the stable reason string and the error class reported to the
//! caller.
//!
//! # Status Codes
//!
//! | Class | Code | Status |
//! |-------|------|--------|
//! | validation | `MISSING_FIELD`, `MALFORMED_FORM` | 400 |
//! | validation | `METHOD_NOT_ALLOWED` | 405 |
//! | validation | `INVALID_FIELD`, `UNKNOWN_PRODUCT` | 422 |
//! | connection | `STORE_UNAVAILABLE` | 503 |
//! | storage | `STORAGE_FAILED` | 500 |
//! | storage | `STORAGE_TIMEOUT` | 504 |

use std::collections::HashMap;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::SubmissionError;
use crate::domain::shared::ValidationError;

/// Error codes returned to HTTP callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation errors
    /// A required field was absent or blank.
    MissingField,
    /// A field was present but not acceptable.
    InvalidField,
    /// The review points at a product that does not exist.
    UnknownProduct,
    /// The body could not be decoded as a form.
    MalformedForm,
    /// The request was not a `POST`.
    MethodNotAllowed,

    // Connection errors
    /// The store could not be reached.
    StoreUnavailable,

    // Storage errors
    /// The insert failed.
    StorageFailed,
    /// The insert did not finish within the statement timeout.
    StorageTimeout,
}

/// Error class reported next to the code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorClass {
    /// Rejected before reaching the store.
    Validation,
    /// Store unreachable.
    Connection,
    /// Store reached, write failed.
    Storage,
}

impl ErrorCode {
    /// HTTP status for this code.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MissingField | Self::MalformedForm => StatusCode::BAD_REQUEST,
            Self::InvalidField | Self::UnknownProduct => StatusCode::UNPROCESSABLE_ENTITY,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::StorageFailed => StatusCode::INTERNAL_SERVER_ERROR,
            Self::StorageTimeout => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    /// Stable reason string.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::MissingField => "MISSING_FIELD",
            Self::InvalidField => "INVALID_FIELD",
            Self::UnknownProduct => "UNKNOWN_PRODUCT",
            Self::MalformedForm => "MALFORMED_FORM",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::StoreUnavailable => "STORE_UNAVAILABLE",
            Self::StorageFailed => "STORAGE_FAILED",
            Self::StorageTimeout => "STORAGE_TIMEOUT",
        }
    }

    /// Error class.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::MissingField
            | Self::InvalidField
            | Self::UnknownProduct
            | Self::MalformedForm
            | Self::MethodNotAllowed => ErrorClass::Validation,
            Self::StoreUnavailable => ErrorClass::Connection,
            Self::StorageFailed | Self::StorageTimeout => ErrorClass::Storage,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason())
    }
}

/// An error ready to be sent to an HTTP caller.
///
/// The message is safe to show: store errors carry a generic message and the
/// driver text is only logged.
#[derive(Debug, Error)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
    context: Vec<(String, String)>,
}

impl ApiError {
    /// Create a new API error.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: Vec::new(),
        }
    }

    /// Add context to the error.
    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.push((key.into(), value.into()));
        self
    }

    /// Get the error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Get the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the context.
    #[must_use]
    pub fn context(&self) -> &[(String, String)] {
        &self.context
    }

    /// Convert to the JSON error body.
    #[must_use]
    pub fn to_http_response(&self) -> HttpErrorResponse {
        HttpErrorResponse {
            code: self.code.reason().to_string(),
            message: self.message.clone(),
            class: self.code.class(),
            details: self.context.iter().cloned().collect(),
        }
    }

    /// Non-`POST` request to a form endpoint.
    #[must_use]
    pub fn method_not_allowed(method: &str) -> Self {
        ValidationError::NotSubmitted {
            method: method.to_string(),
        }
        .into()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code.reason(), self.message)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        let code = match &err {
            ValidationError::NotSubmitted { .. } => ErrorCode::MethodNotAllowed,
            ValidationError::MissingField { .. } => ErrorCode::MissingField,
            ValidationError::InvalidNumber { .. }
            | ValidationError::OutOfRange { .. }
            | ValidationError::TooLong { .. } => ErrorCode::InvalidField,
            ValidationError::UnknownProduct { .. } => ErrorCode::UnknownProduct,
            ValidationError::MalformedForm { .. } => ErrorCode::MalformedForm,
        };

        let mut api_error = Self::new(code, err.to_string());
        if let Some(field) = err.field() {
            api_error = api_error.with_context("field", field);
        }
        if let ValidationError::NotSubmitted { method } = err {
            api_error = api_error.with_context("method", method);
        }
        api_error
    }
}

impl From<SubmissionError> for ApiError {
    fn from(err: SubmissionError) -> Self {
        match err {
            SubmissionError::Validation(validation) => validation.into(),
            SubmissionError::Connection { .. } => Self::new(
                ErrorCode::StoreUnavailable,
                "The store is unavailable, please try again later",
            ),
            SubmissionError::Storage {
                timed_out: true, ..
            } => Self::new(
                ErrorCode::StorageTimeout,
                "The submission could not be saved in time",
            ),
            SubmissionError::Storage { .. } => {
                Self::new(ErrorCode::StorageFailed, "The submission could not be saved")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self.to_http_response())).into_response()
    }
}

/// HTTP error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpErrorResponse {
    /// Error code string.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Error class.
    pub class: ErrorClass,
    /// Additional details.
    pub details: HashMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(ErrorCode::MissingField, StatusCode::BAD_REQUEST, ErrorClass::Validation)]
    #[test_case(ErrorCode::InvalidField, StatusCode::UNPROCESSABLE_ENTITY, ErrorClass::Validation)]
    #[test_case(ErrorCode::MethodNotAllowed, StatusCode::METHOD_NOT_ALLOWED, ErrorClass::Validation)]
    #[test_case(ErrorCode::StoreUnavailable, StatusCode::SERVICE_UNAVAILABLE, ErrorClass::Connection)]
    #[test_case(ErrorCode::StorageFailed, StatusCode::INTERNAL_SERVER_ERROR, ErrorClass::Storage)]
    #[test_case(ErrorCode::StorageTimeout, StatusCode::GATEWAY_TIMEOUT, ErrorClass::Storage)]
    fn test_error_code_mapping(code: ErrorCode, status: StatusCode, class: ErrorClass) {
        assert_eq!(code.status(), status);
        assert_eq!(code.class(), class);
    }

    #[test]
    fn test_missing_field_carries_field_context() {
        let error: ApiError = ValidationError::MissingField { field: "email" }.into();

        assert_eq!(error.code(), ErrorCode::MissingField);
        let response = error.to_http_response();
        assert_eq!(response.details.get("field").map(String::as_str), Some("email"));
        assert_eq!(response.class, ErrorClass::Validation);
    }

    #[test]
    fn test_storage_error_hides_driver_text() {
        let error: ApiError = SubmissionError::storage("no such table: orders").into();

        assert_eq!(error.code(), ErrorCode::StorageFailed);
        assert!(!error.message().contains("orders"));
        assert!(error.context().is_empty());
    }

    #[test]
    fn test_connection_error_hides_driver_text() {
        let error: ApiError = SubmissionError::Connection {
            message: "Access denied for user 'root'@'localhost'".to_string(),
        }
        .into();

        assert_eq!(error.code(), ErrorCode::StoreUnavailable);
        assert!(!error.message().contains("root"));
    }

    #[test]
    fn test_timeout_maps_to_storage_timeout() {
        let error: ApiError = SubmissionError::Storage {
            message: "Statement timed out after 5ms".to_string(),
            timed_out: true,
        }
        .into();

        assert_eq!(error.code(), ErrorCode::StorageTimeout);
    }

    #[test]
    fn test_method_not_allowed() {
        let error = ApiError::method_not_allowed("GET");

        assert_eq!(error.code(), ErrorCode::MethodNotAllowed);
        assert_eq!(
            error.to_http_response().details.get("method").map(String::as_str),
            Some("GET")
        );
    }

    #[test]
    fn test_error_display() {
        let error: ApiError = ValidationError::MissingField { field: "name" }.into();
        assert_eq!(error.to_string(), "[MISSING_FIELD] Missing required field 'name'");
    }

    #[test]
    fn test_http_response_serializes_class_lowercase() {
        let error = ApiError::new(ErrorCode::StorageFailed, "failed");
        let json = serde_json::to_value(error.to_http_response()).unwrap();

        assert_eq!(json["class"], "storage");
        assert_eq!(json["code"], "STORAGE_FAILED");
    }
}
